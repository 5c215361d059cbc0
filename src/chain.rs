//! The continuation chain: a lazy computation built bottom-up and evaluated
//! top-down.
//!
//! A [`Chain<T>`] owns an *activator*: a one-shot closure that, handed a sink
//! [`Continuation`], starts evaluation. Composing with [`Chain::transform`]
//! wraps the activator so that each stage funnels its output into the next
//! stage's continuation. Nothing runs until [`Chain::evaluate_into`] fires
//! the outermost activator.
//!
//! ```rust
//! use braid::chain::Chain;
//!
//! Chain::new(|continuation| continuation(12345))
//!     .transform(|value: i32, continuation| continuation(value.to_string()))
//!     .evaluate_into(|value| assert_eq!(value, "12345"));
//! ```

use std::fmt;

/// A single-shot sink. Invoked at most once; dropped without invocation when
/// the owning chain is cancelled.
pub type Continuation<T> = Box<dyn FnOnce(T)>;

type Activator<T> = Box<dyn FnOnce(Continuation<T>)>;

/// A deferred computation producing a `T`.
///
/// A chain is *armed* from construction until it is consumed by
/// [`evaluate_into`](Chain::evaluate_into) or [`cancel`](Chain::cancel).
/// Ownership makes double evaluation unrepresentable: every consuming
/// operation takes `self`, and `Chain` is not `Clone`.
///
/// # Drop behavior
///
/// Dropping an **armed** chain evaluates it into a discarding sink. A pipeline
/// whose result nobody holds still runs, so its side effects happen. Call
/// [`cancel`](Chain::cancel) (or [`Future::freeze`](crate::Future::freeze) at
/// the future layer) to drop a chain without running it. With the `strict`
/// cargo feature enabled, a drop-while-armed additionally logs a warning and
/// trips a debug assertion.
///
/// Note that a stage may have saved its continuation somewhere before the
/// drop: in that case the drop starts evaluation, and the saved continuation
/// finishes it whenever the holder fires it.
pub struct Chain<T: 'static> {
    activator: Option<Activator<T>>,
}

impl<T: 'static> Chain<T> {
    /// Create a chain from an activator. The activator captures all upstream
    /// state and runs when the chain is evaluated.
    pub fn new<A>(activator: A) -> Self
    where
        A: FnOnce(Continuation<T>) + 'static,
    {
        Chain {
            activator: Some(Box::new(activator)),
        }
    }

    /// Append a stage, producing the new chain tail.
    ///
    /// The stage receives the parent's value and the downstream continuation;
    /// it decides when (and whether) to invoke the continuation. This is the
    /// sole composition primitive; everything else in the crate lowers to it.
    pub fn transform<U, S>(mut self, stage: S) -> Chain<U>
    where
        U: 'static,
        S: FnOnce(T, Continuation<U>) + 'static,
    {
        let parent = self.activator.take();

        Chain::new(move |next: Continuation<U>| {
            if let Some(parent) = parent {
                parent(Box::new(move |value: T| stage(value, next)));
            }
        })
    }

    /// Consume the chain and start evaluation, delivering the final value to
    /// `sink`.
    ///
    /// Evaluation may complete synchronously within this call, or later if
    /// some stage saved its continuation for external resolution.
    pub fn evaluate_into<S>(self, sink: S)
    where
        S: FnOnce(T) + 'static,
    {
        self.evaluate_continuation(Box::new(sink));
    }

    /// Like [`evaluate_into`](Chain::evaluate_into) but takes an already-boxed
    /// continuation, avoiding a second allocation when forwarding one.
    pub fn evaluate_continuation(mut self, sink: Continuation<T>) {
        if let Some(activator) = self.activator.take() {
            activator(sink);
        }
    }

    /// Drop the activator without firing it. The chain will not run, not even
    /// on drop.
    pub fn cancel(mut self) {
        drop(self.activator.take());
    }

    /// Whether the chain still holds its activator.
    pub fn is_armed(&self) -> bool {
        self.activator.is_some()
    }
}

impl<T: 'static> Drop for Chain<T> {
    fn drop(&mut self) {
        if let Some(activator) = self.activator.take() {
            #[cfg(feature = "strict")]
            {
                tracing::warn!("armed chain dropped; evaluating into a discarding sink");
                debug_assert!(false, "armed chain dropped (`strict` feature is enabled)");
            }
            #[cfg(not(feature = "strict"))]
            tracing::trace!("armed chain dropped; evaluating into a discarding sink");

            activator(Box::new(|_| ()));
        }
    }
}

impl<T: 'static> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("armed", &self.is_armed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_chain_of_one_element_evaluates_directly_into_the_sink() {
        let result = Rc::new(Cell::new(0));
        let sink_result = Rc::clone(&result);

        Chain::new(|continuation| continuation(12345))
            .evaluate_into(move |value| sink_result.set(value));

        assert_eq!(result.get(), 12345);
    }

    #[test]
    fn test_chain_evaluates_into_sink_when_saved_continuation_fires() {
        let result = Rc::new(Cell::new(0));
        let sink_result = Rc::clone(&result);
        let saved: Rc<Cell<Option<Continuation<i32>>>> = Rc::new(Cell::new(None));
        let stage_saved = Rc::clone(&saved);

        Chain::new(move |continuation| stage_saved.set(Some(continuation)))
            .evaluate_into(move |value| sink_result.set(value));

        // Nothing happened yet; the continuation is parked.
        assert_eq!(result.get(), 0);

        let continuation = saved.take().expect("activator saved the continuation");
        continuation(4433);

        assert_eq!(result.get(), 4433);
    }

    #[test]
    fn test_transform_funnels_each_stage_into_the_next() {
        let count = Rc::new(Cell::new(0));
        let first = Rc::clone(&count);
        let second = Rc::clone(&count);

        Chain::new(|continuation| continuation(12345))
            .transform(move |value: i32, continuation| {
                assert_eq!(value, 12345);
                first.set(first.get() + 1);
                continuation("hello");
            })
            .transform(move |value: &str, continuation| {
                assert_eq!(value, "hello");
                second.set(second.get() + 1);
                continuation("moof");
            })
            .evaluate_into(|_| ());

        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_armed_chain_runs_on_drop() {
        let count = Rc::new(Cell::new(0));
        let stage = Rc::clone(&count);

        {
            let _chain = Chain::new(move |continuation: Continuation<i32>| {
                stage.set(stage.get() + 1);
                continuation(12345);
            });
        }

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_cancelled_chain_does_not_run_on_drop() {
        let count = Rc::new(Cell::new(0));
        let stage = Rc::clone(&count);

        let chain = Chain::new(move |continuation: Continuation<i32>| {
            stage.set(stage.get() + 1);
            continuation(12345);
        });
        chain.cancel();

        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_evaluated_chain_does_not_run_again_on_drop() {
        let count = Rc::new(Cell::new(0));
        let stage = Rc::clone(&count);

        let chain = Chain::new(move |continuation: Continuation<i32>| {
            stage.set(stage.get() + 1);
            continuation(12345);
        });
        chain.evaluate_into(|_| ());

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_evaluation_can_be_disrupted_and_resumed() {
        let count = Rc::new(Cell::new(0));
        let first = Rc::clone(&count);
        let second = Rc::clone(&count);
        let third = Rc::clone(&count);
        let saved: Rc<Cell<Option<Continuation<&'static str>>>> = Rc::new(Cell::new(None));
        let stage_saved = Rc::clone(&saved);

        Chain::new(move |continuation| {
            first.set(first.get() + 1);
            continuation(12345);
        })
        .transform(move |value: i32, continuation| {
            assert_eq!(value, 12345);
            second.set(second.get() + 1);
            stage_saved.set(Some(continuation));
        })
        .transform(move |value: &str, continuation| {
            assert_eq!(value, "hello");
            third.set(third.get() + 1);
            continuation("moof");
        })
        .evaluate_into(|_| ());

        // Stuck: the middle stage parked its continuation.
        assert_eq!(count.get(), 2);

        let continuation = saved.take().expect("stage saved the continuation");
        continuation("hello");
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn test_saved_continuation_outlives_the_drop_of_its_chain() {
        let result = Rc::new(Cell::new(0));
        let sink_result = Rc::clone(&result);
        let saved: Rc<Cell<Option<Continuation<i32>>>> = Rc::new(Cell::new(None));
        let stage_saved = Rc::clone(&saved);

        {
            let chain = Chain::new(move |continuation| stage_saved.set(Some(continuation)));
            chain
                .transform(move |value: i32, continuation| continuation(value + 1))
                .evaluate_into(move |value| sink_result.set(value));
        }

        // The chain is gone but the parked continuation still resolves.
        let continuation = saved.take().expect("activator saved the continuation");
        continuation(100);
        assert_eq!(result.get(), 101);
    }
}
