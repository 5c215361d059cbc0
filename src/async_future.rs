//! A future that must hop an executor before handlers may be attached.

use std::ops::{BitAnd, BitOr};

use crate::combine;
use crate::executor::Executor;
use crate::future::Future;
use crate::tuple::Concat;

/// A [`Future`] whose handler-attachment surface is statically removed.
///
/// `AsyncFuture` exposes no `then`, `fail`, `map` or `done`. To attach
/// anything, the computation must first be bound to an executor with
/// [`enqueue`](AsyncFuture::enqueue), which yields an ordinary [`Future`].
/// The type thereby enforces an execution boundary: downstream code provably
/// runs on the context that drives the executor.
///
/// Combining still works before the hop - `&` and `|` in any pairing with
/// `Future`, and [`AsyncFuture::when_all`] - and always yields another
/// `AsyncFuture`: one async operand makes the whole combination async.
///
/// ```rust
/// use braid::{AsyncFuture, Future, WorkQueue};
/// use std::rc::Rc;
///
/// let queue = Rc::new(WorkQueue::new());
///
/// let pending: AsyncFuture<i32> = Future::value(123).into();
/// pending
///     .enqueue(Rc::clone(&queue))
///     .then(|value| Ok::<_, i32>(value + 1))
///     .done(|outcome| assert_eq!(outcome.unwrap_value(), 124));
///
/// assert_eq!(queue.run(), 1);
/// ```
#[must_use = "bind to an executor with `enqueue` to obtain a usable future"]
pub struct AsyncFuture<T: 'static, E: 'static = i32> {
    future: Future<T, E>,
}

impl<T: 'static, E: 'static> AsyncFuture<T, E> {
    /// Wrap a future, hiding its handler surface.
    pub fn new(future: Future<T, E>) -> Self {
        AsyncFuture { future }
    }

    /// Bind to an executor, yielding an ordinary [`Future`] whose downstream
    /// stages run on the executor's context.
    pub fn enqueue<X>(self, executor: X) -> Future<T, E>
    where
        X: Executor + 'static,
    {
        self.future.enqueue(executor)
    }

    /// Drive the pipeline and discard the result.
    pub fn ignore_result(self) {
        self.future.ignore_result();
    }

    /// Lift the value into a one-element tuple, making this usable as an
    /// operand of `&`.
    pub fn solo(self) -> AsyncFuture<(T,), E> {
        AsyncFuture::new(self.future.solo())
    }

    /// [`when_all`](crate::when_all) over async futures; the aggregate is
    /// itself async.
    pub fn when_all(futures: Vec<AsyncFuture<T, E>>) -> AsyncFuture<Vec<T>, E> {
        AsyncFuture::new(combine::when_all(
            futures.into_iter().map(|future| future.future).collect(),
        ))
    }
}

impl<T: 'static, E: 'static> From<Future<T, E>> for AsyncFuture<T, E> {
    fn from(future: Future<T, E>) -> Self {
        AsyncFuture::new(future)
    }
}

impl<L, R, E> BitAnd<AsyncFuture<R, E>> for AsyncFuture<L, E>
where
    L: Concat<R> + 'static,
    R: 'static,
    E: 'static,
    <L as Concat<R>>::Output: 'static,
{
    type Output = AsyncFuture<<L as Concat<R>>::Output, E>;

    fn bitand(self, rhs: AsyncFuture<R, E>) -> Self::Output {
        AsyncFuture::new(self.future & rhs.future)
    }
}

impl<L, R, E> BitAnd<Future<R, E>> for AsyncFuture<L, E>
where
    L: Concat<R> + 'static,
    R: 'static,
    E: 'static,
    <L as Concat<R>>::Output: 'static,
{
    type Output = AsyncFuture<<L as Concat<R>>::Output, E>;

    fn bitand(self, rhs: Future<R, E>) -> Self::Output {
        AsyncFuture::new(self.future & rhs)
    }
}

impl<L, R, E> BitAnd<AsyncFuture<R, E>> for Future<L, E>
where
    L: Concat<R> + 'static,
    R: 'static,
    E: 'static,
    <L as Concat<R>>::Output: 'static,
{
    type Output = AsyncFuture<<L as Concat<R>>::Output, E>;

    fn bitand(self, rhs: AsyncFuture<R, E>) -> Self::Output {
        AsyncFuture::new(self & rhs.future)
    }
}

impl<T: 'static, E: 'static> BitOr for AsyncFuture<T, E> {
    type Output = AsyncFuture<T, E>;

    fn bitor(self, rhs: AsyncFuture<T, E>) -> Self::Output {
        AsyncFuture::new(self.future | rhs.future)
    }
}

impl<T: 'static, E: 'static> BitOr<Future<T, E>> for AsyncFuture<T, E> {
    type Output = AsyncFuture<T, E>;

    fn bitor(self, rhs: Future<T, E>) -> Self::Output {
        AsyncFuture::new(self.future | rhs)
    }
}

impl<T: 'static, E: 'static> BitOr<AsyncFuture<T, E>> for Future<T, E> {
    type Output = AsyncFuture<T, E>;

    fn bitor(self, rhs: AsyncFuture<T, E>) -> Self::Output {
        AsyncFuture::new(self | rhs.future)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::WorkQueue;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_enqueue_yields_a_future_bound_to_the_executor() {
        let queue = Rc::new(WorkQueue::new());
        let count = Rc::new(Cell::new(0));
        let stage = Rc::clone(&count);

        let pending: AsyncFuture<i32> = Future::value(123).into();
        pending
            .enqueue(Rc::clone(&queue))
            .then(move |value| {
                assert_eq!(value, 123);
                stage.set(stage.get() + 1);
            })
            .done(|_| ());

        assert_eq!(count.get(), 0);
        queue.run();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_mixed_and_operands_produce_an_async_future() {
        // Each pairing with at least one async operand must type as async.
        let afut: AsyncFuture<(i32,)> = Future::<i32>::value(123).solo().into();
        let fut = Future::<String>::value("123".to_string()).solo();
        let _: AsyncFuture<(i32, String)> = afut & fut;

        let afut: AsyncFuture<(i32,)> = Future::<i32>::value(123).solo().into();
        let fut = Future::<String>::value("123".to_string()).solo();
        let _: AsyncFuture<(String, i32)> = fut & afut;

        let lhs: AsyncFuture<(i32,)> = Future::<i32>::value(123).solo().into();
        let rhs: AsyncFuture<(String,)> = Future::<String>::value("123".to_string()).solo().into();
        let _: AsyncFuture<(i32, String)> = lhs & rhs;
    }

    #[test]
    fn test_mixed_or_operands_produce_an_async_future() {
        let afut: AsyncFuture<i32> = Future::value(123).into();
        let _: AsyncFuture<i32> = afut | Future::value(124);

        let afut: AsyncFuture<i32> = Future::value(123).into();
        let _: AsyncFuture<i32> = Future::value(124) | afut;

        let lhs: AsyncFuture<i32> = Future::value(123).into();
        let rhs: AsyncFuture<i32> = Future::value(124).into();
        let _: AsyncFuture<i32> = lhs | rhs;
    }

    #[test]
    fn test_combined_async_future_resolves_through_the_hop() {
        let queue = Rc::new(WorkQueue::new());
        let result = Rc::new(Cell::new(None));

        let lhs: AsyncFuture<(i32,)> = Future::<i32>::value(1).solo().into();
        let rhs = Future::<bool>::value(true).solo();

        let sink = Rc::clone(&result);
        (lhs & rhs)
            .enqueue(Rc::clone(&queue))
            .done(move |outcome| sink.set(Some(outcome.unwrap_value())));

        assert!(result.take().is_none());
        queue.run();
        assert_eq!(result.take(), Some((1, true)));
    }

    #[test]
    fn test_when_all_over_async_futures_is_async() {
        let queue = Rc::new(WorkQueue::new());
        let result = Rc::new(Cell::new(None));

        let futures = vec![
            AsyncFuture::from(Future::<i32>::value(1)),
            AsyncFuture::from(Future::<i32>::value(2)),
        ];

        let sink = Rc::clone(&result);
        AsyncFuture::when_all(futures)
            .enqueue(Rc::clone(&queue))
            .done(move |outcome| sink.set(Some(outcome.unwrap_value())));

        assert!(result.take().is_none());
        queue.run();
        assert_eq!(result.take(), Some(vec![1, 2]));
    }
}
