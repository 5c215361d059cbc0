//! Aggregating combinators over multiple futures.
//!
//! [`when_all`] collects every result, [`when_any`] races for the first, and
//! [`when_seq`] evaluates inputs strictly one after another. The binary
//! operators `&`, `|` and `>>` on [`Future`](crate::Future) lower to the same
//! aggregators.
//!
//! Each aggregator is shared between the continuations feeding it and the
//! output promise; the promise is taken out of the shared state before it is
//! invoked, which is what makes sink firing at-most-once even when inputs
//! resolve re-entrantly.

mod all;
mod any;
mod pair;
mod seq;

pub use all::when_all;
pub use any::when_any;
pub use seq::when_seq;

pub(crate) use any::select;
pub(crate) use pair::{after, both};
