//! All-completion aggregation: `when_all`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::future::Future;
use crate::outcome::{Outcome, Promise};

/// One slot per input, a completion count, and the output promise.
struct Gather<T, E>
where
    T: 'static,
    E: 'static,
{
    slots: Vec<Option<T>>,
    finished: usize,
    promise: Option<Promise<Vec<T>, E>>,
}

impl<T: 'static, E: 'static> Gather<T, E> {
    fn assign(cell: &Rc<RefCell<Self>>, index: usize, outcome: Outcome<T, E>) {
        let fire = {
            let mut gather = cell.borrow_mut();
            match outcome {
                Outcome::Failure(error) => gather
                    .promise
                    .take()
                    .map(|promise| (promise, Outcome::Failure(error))),
                Outcome::Value(value) => {
                    gather.slots[index] = Some(value);
                    gather.finished += 1;
                    if gather.finished == gather.slots.len() {
                        let values: Vec<T> = gather
                            .slots
                            .iter_mut()
                            .map(|slot| slot.take().expect("every slot is filled on completion"))
                            .collect();
                        gather
                            .promise
                            .take()
                            .map(|promise| (promise, Outcome::Value(values)))
                    } else {
                        None
                    }
                }
            }
        };
        if let Some((promise, outcome)) = fire {
            promise(outcome);
        }
    }
}

/// Resolve with every input's value, in input order, once all inputs have
/// succeeded - or with the first failure, after which remaining results are
/// absorbed. All inputs are evaluated eagerly; resolution order does not
/// matter. An empty input resolves immediately with an empty vector.
///
/// ```rust
/// use braid::{when_all, Future};
///
/// let futures = vec![Future::<i32>::value(123), Future::<i32>::value(444)];
/// when_all(futures).done(|outcome| assert_eq!(outcome.unwrap_value(), vec![123, 444]));
/// ```
pub fn when_all<T, E>(futures: Vec<Future<T, E>>) -> Future<Vec<T>, E>
where
    T: 'static,
    E: 'static,
{
    let chains: Vec<_> = futures.into_iter().map(Future::into_chain).collect();

    Future::new(move |promise| {
        if chains.is_empty() {
            promise(Outcome::Value(Vec::new()));
            return;
        }

        let gather = Rc::new(RefCell::new(Gather {
            slots: chains.iter().map(|_| None).collect(),
            finished: 0,
            promise: Some(promise),
        }));

        for (index, chain) in chains.into_iter().enumerate() {
            let gather = Rc::clone(&gather);
            chain.evaluate_into(move |outcome| Gather::assign(&gather, index, outcome));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assert_failure_eq, assert_value_eq};
    use std::cell::Cell;

    #[test]
    fn test_all_successful_inputs_resolve_in_input_order() {
        let futures = vec![Future::<i32>::value(123), Future::<i32>::value(444)];
        assert_value_eq(when_all(futures), vec![123, 444]);
    }

    #[test]
    fn test_out_of_order_resolution_preserves_input_order() {
        let first: Rc<Cell<Option<Promise<i32, i32>>>> = Rc::new(Cell::new(None));
        let second: Rc<Cell<Option<Promise<i32, i32>>>> = Rc::new(Cell::new(None));
        let called = Rc::new(Cell::new(false));

        let save_first = Rc::clone(&first);
        let save_second = Rc::clone(&second);
        let futures = vec![
            Future::<i32>::new(move |promise| save_first.set(Some(promise))),
            Future::<i32>::new(move |promise| save_second.set(Some(promise))),
        ];

        let flag = Rc::clone(&called);
        when_all(futures)
            .then(move |result| {
                assert_eq!(result, vec![123, 444]);
                flag.set(true);
            })
            .done(|_| ());

        assert!(!called.get());

        let promise = second.take().expect("second promise is live");
        promise(Outcome::Value(444));
        assert!(!called.get());

        let promise = first.take().expect("first promise is live");
        promise(Outcome::Value(123));
        assert!(called.get());
    }

    #[test]
    fn test_empty_input_resolves_immediately() {
        assert_value_eq(when_all(Vec::<Future<i32, i32>>::new()), Vec::new());
    }

    #[test]
    fn test_first_failure_wins() {
        let futures = vec![
            Future::<i32>::value(4),
            Future::<i32>::failure(444),
            Future::<i32>::failure(456),
            Future::<i32>::value(5),
        ];
        assert_failure_eq(when_all(futures), 444);
    }

    #[test]
    fn test_supports_unit_inputs() {
        let futures = vec![Future::<(), i32>::value(())];
        assert_value_eq(when_all(futures), vec![()]);
    }
}
