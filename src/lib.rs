#![forbid(unsafe_code)]
//! # Braid: callback pipelines over a single-shot continuation chain
//!
//! Build asynchronous computations as pipelines of callbacks that produce
//! values or failures. Pipelines are composed bottom-up - each operation
//! consumes a future and returns a new one - and evaluated top-down when a
//! terminal sink is attached. Every chain evaluates exactly once, and every
//! stage callback runs at most once.
//!
//! There is no built-in scheduler. A pipeline evaluates synchronously through
//! nested calls unless a stage parks its promise for later resolution, or an
//! [`enqueue`](Future::enqueue) hop routes the downstream stages through a
//! caller-supplied [`Executor`].
//!
//! ```rust
//! use braid::prelude::*;
//! use std::rc::Rc;
//!
//! let queue = Rc::new(WorkQueue::new());
//!
//! Future::<i32>::value(6581)
//!     .then(|code| Ok::<_, i32>(format!("chip {code}")))
//!     .enqueue(Rc::clone(&queue))
//!     .then(|name: String| {
//!         assert_eq!(name, "chip 6581");
//!         Ok::<_, i32>(())
//!     })
//!     .done(|outcome| assert!(outcome.is_value()));
//!
//! // The stages past the hop run when something drives the queue.
//! assert_eq!(queue.run(), 1);
//! ```
//!
//! ## Module organization
//!
//! - [`chain`] - the continuation chain the whole crate is built around
//! - [`outcome`] - the value-or-failure result type and the promise alias
//! - [`stage`] - accepted stage return shapes and their lowering
//! - [`future`] - the typed future: `then`/`fail`/`map`, operators, hops
//! - [`tuple`] - flat tuple concatenation and prefix extraction
//! - [`combine`] - `when_all`, `when_any`, `when_seq`
//! - [`async_future`] - futures that must hop an executor before use
//! - [`executor`] - the executor contract and a FIFO [`WorkQueue`]
//! - [`testing`] - drive-and-assert helpers for tests
//! - [`prelude`] - common imports
//!
//! ## Dropping pipelines
//!
//! Dropping a future that was never driven **evaluates it** into a discarding
//! sink, so side effects scheduled in the pipeline still happen. Use
//! [`Future::freeze`] to drop a pipeline without running it, and the `strict`
//! cargo feature to turn drop-of-armed into a diagnostic. A promise that a
//! stage parked elsewhere outlives this: dropping the originating future does
//! not cancel an eventual external resolution.

pub mod async_future;
pub mod chain;
pub mod combine;
pub mod executor;
pub mod future;
pub mod outcome;
pub mod prelude;
pub mod stage;
pub mod testing;
pub mod tuple;

pub use async_future::AsyncFuture;
pub use chain::{Chain, Continuation};
pub use combine::{when_all, when_any, when_seq};
pub use executor::{Executor, Work, WorkQueue};
pub use future::Future;
pub use outcome::{Outcome, Promise};
pub use stage::{IntoStage, StageResult};
pub use tuple::{Concat, Prefix};
