//! Sequential aggregation: `when_seq`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::chain::Chain;
use crate::future::Future;
use crate::outcome::{Outcome, Promise};

/// Owns the not-yet-evaluated chains and the collected values. Chain *i + 1*
/// is popped and evaluated only after chain *i*'s value has been written.
struct Submitter<T, E>
where
    T: 'static,
    E: 'static,
{
    chains: VecDeque<Chain<Outcome<T, E>>>,
    values: Vec<T>,
    promise: Option<Promise<Vec<T>, E>>,
}

impl<T: 'static, E: 'static> Submitter<T, E> {
    fn advance(cell: &Rc<RefCell<Self>>) {
        let next = cell.borrow_mut().chains.pop_front();
        let Some(chain) = next else {
            return;
        };

        let submitter = Rc::clone(cell);
        chain.evaluate_into(move |outcome| Submitter::absorb(&submitter, outcome));
    }

    fn absorb(cell: &Rc<RefCell<Self>>, outcome: Outcome<T, E>) {
        enum Step<T, E>
        where
            T: 'static,
            E: 'static,
        {
            Fire(Promise<Vec<T>, E>, Outcome<Vec<T>, E>),
            Advance,
        }

        let step = {
            let mut submitter = cell.borrow_mut();
            match outcome {
                Outcome::Failure(error) => {
                    // The rest of the sequence must not run, not even on drop.
                    let remaining: Vec<_> = submitter.chains.drain(..).collect();
                    let promise = submitter.promise.take();
                    drop(submitter);

                    for chain in remaining {
                        chain.cancel();
                    }
                    match promise {
                        Some(promise) => Step::Fire(promise, Outcome::Failure(error)),
                        None => return,
                    }
                }
                Outcome::Value(value) => {
                    submitter.values.push(value);
                    if submitter.chains.is_empty() {
                        let values = std::mem::take(&mut submitter.values);
                        match submitter.promise.take() {
                            Some(promise) => Step::Fire(promise, Outcome::Value(values)),
                            None => return,
                        }
                    } else {
                        Step::Advance
                    }
                }
            }
        };

        match step {
            Step::Fire(promise, outcome) => promise(outcome),
            Step::Advance => Submitter::advance(cell),
        }
    }
}

/// Evaluate the inputs strictly one after another and resolve with their
/// values in order. A failure short-circuits: the failing input's error
/// resolves the output and the remaining inputs are cancelled without ever
/// being evaluated. An empty input resolves immediately with an empty vector.
///
/// ```rust
/// use braid::{when_seq, Future};
///
/// let futures = vec![Future::<i32>::value(444), Future::<i32>::value(123)];
/// when_seq(futures).done(|outcome| assert_eq!(outcome.unwrap_value(), vec![444, 123]));
/// ```
pub fn when_seq<T, E>(futures: Vec<Future<T, E>>) -> Future<Vec<T>, E>
where
    T: 'static,
    E: 'static,
{
    let chains: VecDeque<_> = futures.into_iter().map(Future::into_chain).collect();

    Future::new(move |promise| {
        if chains.is_empty() {
            promise(Outcome::Value(Vec::new()));
            return;
        }

        let submitter = Rc::new(RefCell::new(Submitter {
            chains,
            values: Vec::new(),
            promise: Some(promise),
        }));
        Submitter::advance(&submitter);
    })
}
