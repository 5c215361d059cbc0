//! The two-operand aggregators behind `&` and `>>`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::future::Future;
use crate::outcome::{Outcome, Promise};
use crate::tuple::Concat;

/// Slots for the parallel-and aggregator. The promise is consumed by the
/// first failure or by the completion of both sides, whichever comes first.
struct PairSlots<L, R, E>
where
    L: Concat<R> + 'static,
    R: 'static,
    E: 'static,
    <L as Concat<R>>::Output: 'static,
{
    lhs: Option<L>,
    rhs: Option<R>,
    promise: Option<Promise<<L as Concat<R>>::Output, E>>,
}

type Fire<T, E> = Option<(Promise<T, E>, Outcome<T, E>)>;

impl<L, R, E> PairSlots<L, R, E>
where
    L: Concat<R> + 'static,
    R: 'static,
    E: 'static,
    <L as Concat<R>>::Output: 'static,
{
    fn assign_lhs(cell: &Rc<RefCell<Self>>, outcome: Outcome<L, E>) {
        let fire = {
            let mut slots = cell.borrow_mut();
            match outcome {
                Outcome::Failure(error) => slots.fail(error),
                Outcome::Value(value) => {
                    slots.lhs = Some(value);
                    slots.ready()
                }
            }
        };
        if let Some((promise, outcome)) = fire {
            promise(outcome);
        }
    }

    fn assign_rhs(cell: &Rc<RefCell<Self>>, outcome: Outcome<R, E>) {
        let fire = {
            let mut slots = cell.borrow_mut();
            match outcome {
                Outcome::Failure(error) => slots.fail(error),
                Outcome::Value(value) => {
                    slots.rhs = Some(value);
                    slots.ready()
                }
            }
        };
        if let Some((promise, outcome)) = fire {
            promise(outcome);
        }
    }

    fn fail(&mut self, error: E) -> Fire<<L as Concat<R>>::Output, E> {
        self.promise
            .take()
            .map(|promise| (promise, Outcome::Failure(error)))
    }

    fn ready(&mut self) -> Fire<<L as Concat<R>>::Output, E> {
        if self.promise.is_some() && self.lhs.is_some() && self.rhs.is_some() {
            let lhs = self.lhs.take()?;
            let rhs = self.rhs.take()?;
            let promise = self.promise.take()?;
            Some((promise, Outcome::Value(lhs.concat(rhs))))
        } else {
            None
        }
    }
}

/// Parallel-and: evaluate both chains as soon as the combined chain fires;
/// resolve with the flat concatenation on both-success, or with the first
/// failure. A late result on the other side lands in a consumed aggregator
/// and is dropped.
pub(crate) fn both<L, R, E>(lhs: Future<L, E>, rhs: Future<R, E>) -> Future<<L as Concat<R>>::Output, E>
where
    L: Concat<R> + 'static,
    R: 'static,
    E: 'static,
    <L as Concat<R>>::Output: 'static,
{
    let lhs_chain = lhs.into_chain();
    let rhs_chain = rhs.into_chain();

    Future::new(move |promise| {
        let slots = Rc::new(RefCell::new(PairSlots {
            lhs: None,
            rhs: None,
            promise: Some(promise),
        }));

        let for_lhs = Rc::clone(&slots);
        lhs_chain.evaluate_into(move |outcome| PairSlots::assign_lhs(&for_lhs, outcome));

        let for_rhs = slots;
        rhs_chain.evaluate_into(move |outcome| PairSlots::assign_rhs(&for_rhs, outcome));
    })
}

/// Sequential-and: evaluate `lhs`; once it succeeds, evaluate `rhs` and
/// resolve with the flat concatenation. On an lhs failure the rhs chain is
/// cancelled so it neither runs nor drop-runs.
pub(crate) fn after<L, R, E>(lhs: Future<L, E>, rhs: Future<R, E>) -> Future<<L as Concat<R>>::Output, E>
where
    L: Concat<R> + 'static,
    R: 'static,
    E: 'static,
    <L as Concat<R>>::Output: 'static,
{
    let lhs_chain = lhs.into_chain();
    let rhs_chain = rhs.into_chain();

    Future::new(move |promise| {
        lhs_chain.evaluate_into(move |outcome| match outcome {
            Outcome::Failure(error) => {
                rhs_chain.cancel();
                promise(Outcome::Failure(error));
            }
            Outcome::Value(lhs_value) => {
                rhs_chain.evaluate_into(move |outcome| match outcome {
                    Outcome::Value(rhs_value) => {
                        promise(Outcome::Value(lhs_value.concat(rhs_value)));
                    }
                    Outcome::Failure(error) => promise(Outcome::Failure(error)),
                });
            }
        });
    })
}
