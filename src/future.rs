//! The typed future: success/failure propagation over a continuation chain.
//!
//! A [`Future`] is a lazily evaluated pipeline that eventually produces an
//! [`Outcome<T, E>`]. Stages are attached with [`then`](Future::then) (success
//! path), [`fail`](Future::fail) (failure path) and [`map`](Future::map)
//! (both); nothing runs until a terminal [`done`](Future::done) drives the
//! chain. Each stage decides whether to resolve synchronously or to park its
//! promise and resolve later.
//!
//! ```rust
//! use braid::Future;
//!
//! Future::<i32>::new(|promise| promise(braid::Outcome::Value(6581)))
//!     .then(|value| Ok::<_, i32>(format!("chip {value}")))
//!     .then(|name: String| {
//!         assert_eq!(name, "chip 6581");
//!         Err::<(), _>(-2)
//!     })
//!     .fail(|error| {
//!         assert_eq!(error, -2);
//!         Ok(())
//!     })
//!     .done(|outcome| assert!(outcome.is_value()));
//! ```

use std::ops::{BitAnd, BitOr, Shr};

use crate::chain::Chain;
use crate::combine;
use crate::executor::Executor;
use crate::outcome::{Outcome, Promise};
use crate::stage::IntoStage;
use crate::tuple::{Concat, Prefix};

/// A lazily evaluated pipeline resulting in a value of type `T` or a failure
/// of type `E` (default `i32`).
///
/// Futures are move-only and single-shot: every composing operation consumes
/// the future and returns a new one, and the underlying chain evaluates
/// exactly once. Dropping a future that was never driven evaluates it into a
/// discarding sink so its side effects still happen; [`freeze`](Future::freeze)
/// opts out of that.
#[must_use = "futures are lazy; drive the pipeline with `done`, or `freeze` it"]
pub struct Future<T: 'static, E: 'static = i32> {
    chain: Chain<Outcome<T, E>>,
}

impl<T: 'static, E: 'static> Future<T, E> {
    /// Create a future from an activator that receives the promise to
    /// resolve.
    ///
    /// The activator runs when the pipeline is driven. It may resolve the
    /// promise immediately, or park it somewhere and resolve it later - the
    /// downstream stages run whenever that happens.
    ///
    /// ```rust
    /// use braid::{Future, Outcome};
    ///
    /// Future::<i32>::new(|promise| promise(Outcome::Value(123)))
    ///     .done(|outcome| assert_eq!(outcome, Outcome::Value(123)));
    /// ```
    pub fn new<A>(activator: A) -> Self
    where
        A: FnOnce(Promise<T, E>) + 'static,
    {
        Future {
            chain: Chain::new(activator),
        }
    }

    /// A future that immediately resolves with `value`.
    pub fn value(value: T) -> Self {
        Future::new(move |promise| promise(Outcome::Value(value)))
    }

    /// A future that immediately resolves with `error`.
    pub fn failure(error: E) -> Self {
        Future::new(move |promise| promise(Outcome::Failure(error)))
    }

    /// Wrap an existing chain of outcomes.
    pub fn from_chain(chain: Chain<Outcome<T, E>>) -> Self {
        Future { chain }
    }

    /// Unwrap the underlying chain.
    pub fn into_chain(self) -> Chain<Outcome<T, E>> {
        self.chain
    }

    /// Attach a stage that runs on success.
    ///
    /// The stage receives the upstream value by move and returns any
    /// [`IntoStage`] shape: `Ok(value)`, `Err(error)`, a nested [`Future`]
    /// (spliced into the pipeline), a [`StageResult`](crate::StageResult), or
    /// `()` for pure side effects. An upstream failure skips the stage and
    /// propagates.
    ///
    /// ```rust
    /// use braid::Future;
    ///
    /// Future::<i32>::value(2)
    ///     .then(|value| Ok::<_, i32>(value * 3))
    ///     .then(|value: i32| {
    ///         assert_eq!(value, 6);
    ///         Future::value(value + 1)
    ///     })
    ///     .done(|outcome| assert_eq!(outcome.unwrap_value(), 7));
    /// ```
    pub fn then<S, R>(self, stage: S) -> Future<R::Value, E>
    where
        S: FnOnce(T) -> R + 'static,
        R: IntoStage<E>,
    {
        Future::from_chain(self.chain.transform(move |outcome, promise| match outcome {
            Outcome::Value(value) => stage(value).into_stage().resolve_into(promise),
            Outcome::Failure(error) => promise(Outcome::Failure(error)),
        }))
    }

    /// Embraid `other` after this future: when this future succeeds, `other`
    /// is evaluated and its result becomes the pipeline's result. This
    /// future's value is discarded.
    ///
    /// On failure, the failure is forwarded and `other` never runs - its
    /// chain is frozen, so it does not run on drop either.
    pub fn then_future<U: 'static>(self, other: Future<U, E>) -> Future<U, E> {
        let other_chain = other.into_chain();

        Future::from_chain(self.chain.transform(move |outcome, promise| match outcome {
            Outcome::Value(_) => other_chain.evaluate_continuation(promise),
            Outcome::Failure(error) => {
                other_chain.cancel();
                promise(Outcome::Failure(error));
            }
        }))
    }

    /// Attach a stage that runs on failure.
    ///
    /// The stage receives the error by move. Returning `Ok(value)` or a
    /// nested future recovers the pipeline; returning `Err(error)` keeps the
    /// failure propagating (possibly remapped). A successful upstream skips
    /// the stage.
    ///
    /// ```rust
    /// use braid::Future;
    ///
    /// Future::<i32>::failure(-404)
    ///     .fail(|error| {
    ///         assert_eq!(error, -404);
    ///         Ok(0)
    ///     })
    ///     .done(|outcome| assert_eq!(outcome.unwrap_value(), 0));
    /// ```
    pub fn fail<S, R>(self, stage: S) -> Future<T, E>
    where
        S: FnOnce(E) -> R + 'static,
        R: IntoStage<E, Value = T>,
    {
        Future::from_chain(self.chain.transform(move |outcome, promise| match outcome {
            Outcome::Value(value) => promise(Outcome::Value(value)),
            Outcome::Failure(error) => stage(error).into_stage().resolve_into(promise),
        }))
    }

    /// Attach a stage that runs on both paths. The stage receives the full
    /// [`Outcome`] and its return becomes the downstream outcome unmodified.
    pub fn map<U, S>(self, stage: S) -> Future<U, E>
    where
        U: 'static,
        S: FnOnce(Outcome<T, E>) -> Outcome<U, E> + 'static,
    {
        Future::from_chain(
            self.chain
                .transform(move |outcome, promise| promise(stage(outcome))),
        )
    }

    /// Synonym of [`map`](Future::map), for stages that clean up regardless
    /// of how the pipeline went.
    pub fn finally<U, S>(self, stage: S) -> Future<U, E>
    where
        U: 'static,
        S: FnOnce(Outcome<T, E>) -> Outcome<U, E> + 'static,
    {
        self.map(stage)
    }

    /// Terminal: attach the sink and drive the pipeline.
    ///
    /// This is the fundamental way to start evaluation. The sink receives the
    /// final [`Outcome`]; depending on the stages it may run within this call
    /// or later, when some parked promise resolves.
    pub fn done<S>(self, sink: S)
    where
        S: FnOnce(Outcome<T, E>) + 'static,
    {
        self.chain.evaluate_into(sink);
    }

    /// Drive the pipeline and discard the result.
    pub fn ignore_result(self) {
        self.done(|_| ());
    }

    /// Cancel the pipeline so that dropping it does not drive evaluation.
    pub fn freeze(self) {
        self.chain.cancel();
    }

    /// Insert an executor hop: once the upstream resolves, the pending
    /// outcome and the downstream continuation are packaged into a single
    /// work unit and submitted to `executor`. Every stage attached after the
    /// hop runs on whatever context drives the executor.
    ///
    /// The executor is captured by value; pass a cheap handle such as an
    /// `Rc<WorkQueue>`.
    pub fn enqueue<X>(self, executor: X) -> Future<T, E>
    where
        X: Executor + 'static,
    {
        Future::from_chain(self.chain.transform(move |outcome, promise| {
            tracing::trace!("deferring downstream continuation through executor hop");
            executor.submit(Box::new(move || promise(outcome)));
        }))
    }

    /// Lift the value into a one-element tuple, making the future usable as
    /// an operand of `&` and `>>`.
    ///
    /// ```rust
    /// use braid::Future;
    ///
    /// let pair = Future::<i32>::value(1).solo() & Future::<bool>::value(true).solo();
    /// pair.done(|outcome| assert_eq!(outcome.unwrap_value(), (1, true)));
    /// ```
    pub fn solo(self) -> Future<(T,), E> {
        Future::from_chain(
            self.chain
                .transform(|outcome, promise| promise(outcome.map(|value| (value,)))),
        )
    }

    /// Attach a zero-argument success stage, discarding the upstream value.
    pub fn then0<S, R>(self, stage: S) -> Future<R::Value, E>
    where
        S: FnOnce() -> R + 'static,
        R: IntoStage<E>,
    {
        self.then(move |_value| stage())
    }

    /// Attach a one-argument success stage observing the first element of the
    /// upstream tuple.
    pub fn then1<A, S, R>(self, stage: S) -> Future<R::Value, E>
    where
        T: Prefix<(A,)>,
        A: 'static,
        S: FnOnce(A) -> R + 'static,
        R: IntoStage<E>,
    {
        self.then(move |value: T| {
            let (a,) = <T as Prefix<(A,)>>::prefix(value);
            stage(a)
        })
    }

    /// Attach a two-argument success stage observing the first two elements
    /// of the upstream tuple.
    pub fn then2<A, B, S, R>(self, stage: S) -> Future<R::Value, E>
    where
        T: Prefix<(A, B)>,
        A: 'static,
        B: 'static,
        S: FnOnce(A, B) -> R + 'static,
        R: IntoStage<E>,
    {
        self.then(move |value: T| {
            let (a, b) = <T as Prefix<(A, B)>>::prefix(value);
            stage(a, b)
        })
    }

    /// Attach a three-argument success stage observing the first three
    /// elements of the upstream tuple.
    pub fn then3<A, B, C, S, R>(self, stage: S) -> Future<R::Value, E>
    where
        T: Prefix<(A, B, C)>,
        A: 'static,
        B: 'static,
        C: 'static,
        S: FnOnce(A, B, C) -> R + 'static,
        R: IntoStage<E>,
    {
        self.then(move |value: T| {
            let (a, b, c) = <T as Prefix<(A, B, C)>>::prefix(value);
            stage(a, b, c)
        })
    }

    /// Attach a four-argument success stage observing the first four elements
    /// of the upstream tuple.
    pub fn then4<A, B, C, D, S, R>(self, stage: S) -> Future<R::Value, E>
    where
        T: Prefix<(A, B, C, D)>,
        A: 'static,
        B: 'static,
        C: 'static,
        D: 'static,
        S: FnOnce(A, B, C, D) -> R + 'static,
        R: IntoStage<E>,
    {
        self.then(move |value: T| {
            let (a, b, c, d) = <T as Prefix<(A, B, C, D)>>::prefix(value);
            stage(a, b, c, d)
        })
    }
}

impl<T: 'static, E: 'static> From<Outcome<T, E>> for Future<T, E> {
    /// A future that immediately resolves with the given outcome. Useful in
    /// generic code that holds either a value or a failure.
    fn from(outcome: Outcome<T, E>) -> Self {
        Future::new(move |promise| promise(outcome))
    }
}

/// Parallel-and: evaluate both operands eagerly; resolve with the flat
/// concatenation of their tuple values once both succeed, or with the first
/// failure.
impl<L, R, E> BitAnd<Future<R, E>> for Future<L, E>
where
    L: Concat<R> + 'static,
    R: 'static,
    E: 'static,
    <L as Concat<R>>::Output: 'static,
{
    type Output = Future<<L as Concat<R>>::Output, E>;

    fn bitand(self, rhs: Future<R, E>) -> Self::Output {
        combine::both(self, rhs)
    }
}

/// Select-or: evaluate both operands eagerly; resolve with whichever
/// completes first, success or failure. Later completions are absorbed.
impl<T: 'static, E: 'static> BitOr for Future<T, E> {
    type Output = Future<T, E>;

    fn bitor(self, rhs: Future<T, E>) -> Self::Output {
        combine::select(self, rhs)
    }
}

/// Sequential-and: evaluate the left operand; once it succeeds, evaluate the
/// right one and resolve with the flat concatenation. On a left failure the
/// right operand is frozen, not run.
impl<L, R, E> Shr<Future<R, E>> for Future<L, E>
where
    L: Concat<R> + 'static,
    R: 'static,
    E: 'static,
    <L as Concat<R>>::Output: 'static,
{
    type Output = Future<<L as Concat<R>>::Output, E>;

    fn shr(self, rhs: Future<R, E>) -> Self::Output {
        combine::after(self, rhs)
    }
}
