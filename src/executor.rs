//! The executor contract and a single-threaded FIFO work queue.
//!
//! An executor accepts a unit of [`Work`] and runs it later, exactly once, on
//! whatever context drives it. The library never observes an executor beyond
//! that: [`Future::enqueue`](crate::Future::enqueue) packages the pending
//! result and the downstream continuation into one work unit and hands it
//! over.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use either::Either;

/// A move-only, invoke-once unit of work.
pub type Work = Box<dyn FnOnce()>;

/// Something that can accept a work unit and run it later.
///
/// The implementation must eventually invoke the work exactly once. Executors
/// are captured by value at each [`enqueue`](crate::Future::enqueue) hop, so
/// they are expected to be cheap handles - typically an `Rc` or `Arc` around
/// the real queue.
pub trait Executor {
    /// Accept a work unit for later execution.
    fn submit(&self, work: Work);
}

impl<X: Executor + ?Sized> Executor for &X {
    fn submit(&self, work: Work) {
        (**self).submit(work);
    }
}

impl<X: Executor + ?Sized> Executor for Rc<X> {
    fn submit(&self, work: Work) {
        (**self).submit(work);
    }
}

impl<X: Executor + ?Sized> Executor for Arc<X> {
    fn submit(&self, work: Work) {
        (**self).submit(work);
    }
}

impl<L: Executor, R: Executor> Executor for Either<L, R> {
    fn submit(&self, work: Work) {
        match self {
            Either::Left(left) => left.submit(work),
            Either::Right(right) => right.submit(work),
        }
    }
}

/// An executor backed by a closure.
///
/// Created via [`from_fn`].
pub struct FnExecutor<F>(F);

/// Create an executor from a closure that accepts work units.
///
/// ```rust
/// use braid::executor::{from_fn, Executor};
///
/// let inline = from_fn(|work| work());
/// inline.submit(Box::new(|| ()));
/// ```
pub fn from_fn<F>(f: F) -> FnExecutor<F>
where
    F: Fn(Work),
{
    FnExecutor(f)
}

impl<F: Fn(Work)> Executor for FnExecutor<F> {
    fn submit(&self, work: Work) {
        (self.0)(work);
    }
}

/// A single-threaded FIFO queue of pending work.
///
/// [`submit`](Executor::submit) appends; [`run`](WorkQueue::run) drains and
/// executes the batch that was pending when it was called. Work submitted
/// *while* a batch runs lands in the next batch, which is what makes the
/// queue usable for stepping pipelines one executor hop at a time:
///
/// ```rust
/// use braid::{Future, WorkQueue};
/// use std::rc::Rc;
///
/// let queue = Rc::new(WorkQueue::new());
///
/// Future::<i32>::value(1)
///     .enqueue(Rc::clone(&queue))
///     .then(|value| Ok::<_, i32>(value + 1))
///     .done(|outcome| assert_eq!(outcome.unwrap_value(), 2));
///
/// assert_eq!(queue.run(), 1);
/// ```
#[derive(Default)]
pub struct WorkQueue {
    items: RefCell<Vec<Work>>,
}

impl WorkQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every work unit that was pending when this call started. Returns
    /// the number of units executed.
    pub fn run(&self) -> usize {
        let batch = std::mem::take(&mut *self.items.borrow_mut());
        let count = batch.len();
        for work in batch {
            work();
        }
        count
    }

    /// Number of pending work units.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Whether the queue has no pending work.
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl Executor for WorkQueue {
    fn submit(&self, work: Work) {
        self.items.borrow_mut().push(work);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_run_executes_the_pending_batch_in_order() {
        let queue = WorkQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let log = Rc::clone(&log);
            queue.submit(Box::new(move || log.borrow_mut().push(i)));
        }

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.run(), 3);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_work_submitted_during_run_lands_in_the_next_batch() {
        let queue = Rc::new(WorkQueue::new());
        let ran = Rc::new(Cell::new(0));

        let resubmit = Rc::clone(&queue);
        let inner_ran = Rc::clone(&ran);
        queue.submit(Box::new(move || {
            let inner_ran = Rc::clone(&inner_ran);
            resubmit.submit(Box::new(move || inner_ran.set(inner_ran.get() + 1)));
        }));

        assert_eq!(queue.run(), 1);
        assert_eq!(ran.get(), 0);

        assert_eq!(queue.run(), 1);
        assert_eq!(ran.get(), 1);
    }

    #[test]
    fn test_from_fn_runs_work_through_the_closure() {
        let ran = Rc::new(Cell::new(false));
        let executor = from_fn(|work: Work| work());

        let flag = Rc::clone(&ran);
        executor.submit(Box::new(move || flag.set(true)));

        assert!(ran.get());
    }

    #[test]
    fn test_either_dispatches_to_the_active_side() {
        let left_queue = Rc::new(WorkQueue::new());
        let right_queue = Rc::new(WorkQueue::new());

        let executor: Either<Rc<WorkQueue>, Rc<WorkQueue>> = Either::Left(Rc::clone(&left_queue));
        executor.submit(Box::new(|| ()));

        assert_eq!(left_queue.len(), 1);
        assert!(right_queue.is_empty());

        let executor: Either<Rc<WorkQueue>, Rc<WorkQueue>> = Either::Right(Rc::clone(&right_queue));
        executor.submit(Box::new(|| ()));

        assert_eq!(right_queue.len(), 1);
    }
}
