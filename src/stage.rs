//! What a stage callback may hand back, and how it lowers into the chain.

use crate::future::Future;
use crate::outcome::{Outcome, Promise};

/// The discriminated return of a stage callback: a plain value, a nested
/// future to splice in, or a failure.
///
/// Stages rarely name this type. A [`then`](crate::Future::then) or
/// [`fail`](crate::Future::fail) callback returns any [`IntoStage`] shape -
/// most often `Ok(value)` or `Err(error)` - and the library lowers it through
/// `StageResult`. Returning `StageResult` directly is useful when one callback
/// needs to pick between a value and a nested future at runtime:
///
/// ```rust
/// use braid::{Future, StageResult};
///
/// fn lookup(cached: bool) -> StageResult<i32, i32> {
///     if cached {
///         StageResult::Value(42)
///     } else {
///         StageResult::Nested(Future::value(42))
///     }
/// }
///
/// Future::<bool>::value(false)
///     .then(lookup)
///     .done(|outcome| assert_eq!(outcome.unwrap_value(), 42));
/// ```
pub enum StageResult<T: 'static, E: 'static = i32> {
    /// Resolve downstream with this value.
    Value(T),
    /// Splice in a nested future: its chain is evaluated directly into the
    /// downstream promise, not wrapped.
    Nested(Future<T, E>),
    /// Resolve downstream with this failure.
    Failure(E),
}

impl<T: 'static, E: 'static> StageResult<T, E> {
    /// Deliver this result into `promise`. For `Nested` this is the
    /// flattening step.
    pub fn resolve_into(self, promise: Promise<T, E>) {
        match self {
            StageResult::Value(value) => promise(Outcome::Value(value)),
            StageResult::Nested(future) => future.into_chain().evaluate_continuation(promise),
            StageResult::Failure(error) => promise(Outcome::Failure(error)),
        }
    }
}

/// Conversion from the accepted stage return shapes into [`StageResult`].
///
/// Implemented for exactly four shapes:
///
/// - `Result<T, E>` - `Ok` is a value, `Err` a failure
/// - [`Future<T, E>`] - a nested future, flattened into the pipeline
/// - [`StageResult<T, E>`] - passed through unchanged
/// - `()` - unit success, for stages that only perform side effects
///
/// A stage returning anything else fails to compile with a note listing these
/// shapes.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an accepted stage return type",
    note = "stage callbacks return `Ok(value)`, `Err(error)`, a nested `Future`, a `StageResult`, or `()`"
)]
pub trait IntoStage<E: 'static> {
    /// The success type the stage resolves to; it becomes the value type of
    /// the downstream future.
    type Value: 'static;

    /// Perform the conversion.
    fn into_stage(self) -> StageResult<Self::Value, E>;
}

impl<T: 'static, E: 'static> IntoStage<E> for StageResult<T, E> {
    type Value = T;

    fn into_stage(self) -> StageResult<T, E> {
        self
    }
}

impl<T: 'static, E: 'static> IntoStage<E> for Future<T, E> {
    type Value = T;

    fn into_stage(self) -> StageResult<T, E> {
        StageResult::Nested(self)
    }
}

impl<T: 'static, E: 'static> IntoStage<E> for Result<T, E> {
    type Value = T;

    fn into_stage(self) -> StageResult<T, E> {
        match self {
            Ok(value) => StageResult::Value(value),
            Err(error) => StageResult::Failure(error),
        }
    }
}

impl<E: 'static> IntoStage<E> for () {
    type Value = ();

    fn into_stage(self) -> StageResult<(), E> {
        StageResult::Value(())
    }
}
