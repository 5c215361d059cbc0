//! First-completion aggregation: `when_any` and the `|` operator.

use std::cell::RefCell;
use std::rc::Rc;

use crate::chain::Chain;
use crate::future::Future;
use crate::outcome::{Outcome, Promise};

/// Evaluate every chain into a shared one-shot promise. The first resolution
/// of any kind consumes the promise; the rest land on an empty slot.
fn race<T, E>(chains: Vec<Chain<Outcome<T, E>>>, promise: Promise<T, E>)
where
    T: 'static,
    E: 'static,
{
    let first = Rc::new(RefCell::new(Some(promise)));

    for chain in chains {
        let first = Rc::clone(&first);
        chain.evaluate_into(move |outcome| {
            let taken = first.borrow_mut().take();
            if let Some(promise) = taken {
                promise(outcome);
            }
        });
    }
}

/// The `|` operator: first of two completions wins, success or failure.
pub(crate) fn select<T, E>(lhs: Future<T, E>, rhs: Future<T, E>) -> Future<T, E>
where
    T: 'static,
    E: 'static,
{
    let chains = vec![lhs.into_chain(), rhs.into_chain()];
    Future::new(move |promise| race(chains, promise))
}

/// Resolve with the first future to complete, whether it succeeded or failed.
/// All inputs are evaluated eagerly; completions after the first are absorbed
/// silently.
///
/// An empty input resolves immediately with `T::default()` - the `Default`
/// bound exists solely for that case, and makes the behavior visible in the
/// signature.
///
/// ```rust
/// use braid::{when_any, Future};
///
/// let futures = vec![Future::<i32>::value(444), Future::<i32>::value(123)];
/// when_any(futures).done(|outcome| assert_eq!(outcome.unwrap_value(), 444));
/// ```
pub fn when_any<T, E>(futures: Vec<Future<T, E>>) -> Future<T, E>
where
    T: Default + 'static,
    E: 'static,
{
    let chains: Vec<_> = futures.into_iter().map(Future::into_chain).collect();

    Future::new(move |promise| {
        if chains.is_empty() {
            promise(Outcome::Value(T::default()));
            return;
        }
        race(chains, promise);
    })
}
