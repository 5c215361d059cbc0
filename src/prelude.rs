//! Common imports for building pipelines.
//!
//! ```rust
//! use braid::prelude::*;
//!
//! Future::<i32>::value(1)
//!     .then(|value| Ok::<_, i32>(value + 1))
//!     .done(|outcome| assert_eq!(outcome, Outcome::Value(2)));
//! ```

pub use crate::async_future::AsyncFuture;
pub use crate::chain::{Chain, Continuation};
pub use crate::combine::{when_all, when_any, when_seq};
pub use crate::executor::{Executor, Work, WorkQueue};
pub use crate::future::Future;
pub use crate::outcome::{Outcome, Promise};
pub use crate::stage::{IntoStage, StageResult};
pub use crate::tuple::{Concat, Prefix};
