//! Assertion helpers for driving pipelines in tests.
//!
//! Both helpers drive the future and assert that the sink fired before they
//! return, so they only suit pipelines that resolve synchronously. Pipelines
//! with parked promises or executor hops are asserted by hand.

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;

use crate::future::Future;
use crate::outcome::Outcome;

/// Drive `future` and assert it resolves, synchronously, with `expected`.
///
/// ```rust
/// use braid::testing::assert_value_eq;
/// use braid::Future;
///
/// assert_value_eq(Future::<i32>::value(42), 42);
/// ```
pub fn assert_value_eq<T, E>(future: Future<T, E>, expected: T)
where
    T: PartialEq + Debug + 'static,
    E: Debug + 'static,
{
    let called = Rc::new(Cell::new(false));
    let flag = Rc::clone(&called);

    future.done(move |outcome| {
        flag.set(true);
        match outcome {
            Outcome::Value(value) => assert_eq!(value, expected),
            Outcome::Failure(error) => {
                panic!("expected value {expected:?}, got failure {error:?}")
            }
        }
    });

    assert!(called.get(), "pipeline did not resolve synchronously");
}

/// Drive `future` and assert it fails, synchronously, with `expected`.
///
/// ```rust
/// use braid::testing::assert_failure_eq;
/// use braid::Future;
///
/// assert_failure_eq(Future::<i32>::failure(-7), -7);
/// ```
pub fn assert_failure_eq<T, E>(future: Future<T, E>, expected: E)
where
    T: Debug + 'static,
    E: PartialEq + Debug + 'static,
{
    let called = Rc::new(Cell::new(false));
    let flag = Rc::clone(&called);

    future.done(move |outcome| {
        flag.set(true);
        match outcome {
            Outcome::Value(value) => {
                panic!("expected failure {expected:?}, got value {value:?}")
            }
            Outcome::Failure(error) => assert_eq!(error, expected),
        }
    });

    assert!(called.get(), "pipeline did not resolve synchronously");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_value_eq_accepts_a_matching_value() {
        assert_value_eq(Future::<i32>::value(1), 1);
    }

    #[test]
    #[should_panic(expected = "got failure")]
    fn test_assert_value_eq_rejects_a_failure() {
        assert_value_eq(Future::<i32>::failure(1), 1);
    }

    #[test]
    fn test_assert_failure_eq_accepts_a_matching_failure() {
        assert_failure_eq(Future::<i32>::failure(9), 9);
    }

    #[test]
    #[should_panic(expected = "did not resolve synchronously")]
    fn test_suspended_pipelines_are_rejected() {
        assert_value_eq(Future::<i32>::new(|promise| drop(promise)), 1);
    }
}
