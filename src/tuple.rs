//! Flat tuple concatenation and prefix extraction.
//!
//! The parallel (`&`) and sequential (`>>`) operators concatenate their
//! operands' tuple values into one flat tuple; `()` is the neutral element
//! and disappears from the result. Concatenation is driven by [`Concat`],
//! implemented for every pair of tuples up to arity four per side.
//!
//! Scalar-valued futures join in by lifting into a one-element tuple with
//! [`Future::solo`](crate::Future::solo):
//!
//! ```rust
//! use braid::Future;
//!
//! let combined = Future::<i32>::value(123).solo() & Future::<bool>::value(true).solo();
//! combined.done(|outcome| assert_eq!(outcome.unwrap_value(), (123, true)));
//! ```
//!
//! [`Prefix`] powers the arity-explicit stage bindings
//! ([`then1`](crate::Future::then1) through [`then4`](crate::Future::then4)):
//! a k-ary stage attached to an m-tuple pipeline observes the first k
//! elements and discards the rest.

/// Flat, `()`-neutral tuple concatenation.
///
/// `(a, b).concat((c,))` is `(a, b, c)`; `(a,).concat(())` is `(a,)`. The
/// operation is associative, so operator chains produce the same flat tuple
/// regardless of grouping.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be concatenated with `{R}`",
    note = "`&` and `>>` operands carry tuple values; lift a scalar future with `.solo()` first"
)]
pub trait Concat<R> {
    /// The flat concatenation of `Self` and `R`.
    type Output;

    /// Concatenate, preserving element order: `self` first, then `rhs`.
    fn concat(self, rhs: R) -> Self::Output;
}

impl Concat<()> for () {
    type Output = ();

    fn concat(self, _rhs: ()) -> Self::Output {}
}

macro_rules! impl_concat {
    (($($l:ident $lv:ident),*), ($($r:ident $rv:ident),*)) => {
        impl<$($l,)* $($r,)*> Concat<($($r,)*)> for ($($l,)*) {
            type Output = ($($l,)* $($r,)*);

            fn concat(self, rhs: ($($r,)*)) -> Self::Output {
                let ($($lv,)*) = self;
                let ($($rv,)*) = rhs;
                ($($lv,)* $($rv,)*)
            }
        }
    };
}

impl_concat!((), (B0 b0));
impl_concat!((), (B0 b0, B1 b1));
impl_concat!((), (B0 b0, B1 b1, B2 b2));
impl_concat!((), (B0 b0, B1 b1, B2 b2, B3 b3));
impl_concat!((A0 a0), ());
impl_concat!((A0 a0), (B0 b0));
impl_concat!((A0 a0), (B0 b0, B1 b1));
impl_concat!((A0 a0), (B0 b0, B1 b1, B2 b2));
impl_concat!((A0 a0), (B0 b0, B1 b1, B2 b2, B3 b3));
impl_concat!((A0 a0, A1 a1), ());
impl_concat!((A0 a0, A1 a1), (B0 b0));
impl_concat!((A0 a0, A1 a1), (B0 b0, B1 b1));
impl_concat!((A0 a0, A1 a1), (B0 b0, B1 b1, B2 b2));
impl_concat!((A0 a0, A1 a1), (B0 b0, B1 b1, B2 b2, B3 b3));
impl_concat!((A0 a0, A1 a1, A2 a2), ());
impl_concat!((A0 a0, A1 a1, A2 a2), (B0 b0));
impl_concat!((A0 a0, A1 a1, A2 a2), (B0 b0, B1 b1));
impl_concat!((A0 a0, A1 a1, A2 a2), (B0 b0, B1 b1, B2 b2));
impl_concat!((A0 a0, A1 a1, A2 a2, A3 a3), ());
impl_concat!((A0 a0, A1 a1, A2 a2, A3 a3), (B0 b0));
impl_concat!((A0 a0, A1 a1, A2 a2, A3 a3), (B0 b0, B1 b1));

/// Extraction of the first k elements of a tuple, discarding the rest.
///
/// `(A, B, C)` implements `Prefix<(A,)>`, `Prefix<(A, B)>` and
/// `Prefix<(A, B, C)>`.
#[diagnostic::on_unimplemented(
    message = "`{P}` is not a prefix of `{Self}`",
    note = "a k-ary stage can only be attached to a pipeline producing a tuple of k or more elements"
)]
pub trait Prefix<P> {
    /// Return the prefix, dropping the remaining elements.
    fn prefix(self) -> P;
}

impl Prefix<()> for () {
    fn prefix(self) {}
}

macro_rules! impl_prefix {
    (($($keep:ident $kv:ident),*), ($($rest:ident $rv:ident),*)) => {
        impl<$($keep,)* $($rest,)*> Prefix<($($keep,)*)> for ($($keep,)* $($rest,)*) {
            fn prefix(self) -> ($($keep,)*) {
                #[allow(unused_variables)]
                let ($($kv,)* $($rv,)*) = self;
                ($($kv,)*)
            }
        }
    };
}

impl_prefix!((T0 t0), ());
impl_prefix!((T0 t0), (T1 t1));
impl_prefix!((T0 t0), (T1 t1, T2 t2));
impl_prefix!((T0 t0), (T1 t1, T2 t2, T3 t3));
impl_prefix!((T0 t0), (T1 t1, T2 t2, T3 t3, T4 t4));
impl_prefix!((T0 t0), (T1 t1, T2 t2, T3 t3, T4 t4, T5 t5));
impl_prefix!((T0 t0, T1 t1), ());
impl_prefix!((T0 t0, T1 t1), (T2 t2));
impl_prefix!((T0 t0, T1 t1), (T2 t2, T3 t3));
impl_prefix!((T0 t0, T1 t1), (T2 t2, T3 t3, T4 t4));
impl_prefix!((T0 t0, T1 t1), (T2 t2, T3 t3, T4 t4, T5 t5));
impl_prefix!((T0 t0, T1 t1, T2 t2), ());
impl_prefix!((T0 t0, T1 t1, T2 t2), (T3 t3));
impl_prefix!((T0 t0, T1 t1, T2 t2), (T3 t3, T4 t4));
impl_prefix!((T0 t0, T1 t1, T2 t2), (T3 t3, T4 t4, T5 t5));
impl_prefix!((T0 t0, T1 t1, T2 t2, T3 t3), ());
impl_prefix!((T0 t0, T1 t1, T2 t2, T3 t3), (T4 t4));
impl_prefix!((T0 t0, T1 t1, T2 t2, T3 t3), (T4 t4, T5 t5));
impl_prefix!((T0 t0, T1 t1, T2 t2, T3 t3, T4 t4), ());
impl_prefix!((T0 t0, T1 t1, T2 t2, T3 t3, T4 t4), (T5 t5));
impl_prefix!((T0 t0, T1 t1, T2 t2, T3 t3, T4 t4, T5 t5), ());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_is_flat() {
        assert_eq!((1,).concat((true,)), (1, true));
        assert_eq!((1, true).concat(("x",)), (1, true, "x"));
        assert_eq!((1,).concat((true, "x")), (1, true, "x"));
        assert_eq!((1, true).concat(("x", 2.5)), (1, true, "x", 2.5));
    }

    #[test]
    fn test_unit_is_neutral_on_both_sides() {
        assert_eq!(().concat((1, true)), (1, true));
        assert_eq!((1, true).concat(()), (1, true));
    }

    #[test]
    fn test_concat_is_associative() {
        let left = (1,).concat((true,)).concat(("x",));
        let right = (1,).concat((true,).concat(("x",)));
        assert_eq!(left, right);
    }

    #[test]
    fn test_prefix_takes_the_leading_elements() {
        let (a,) = (1, true, "x").prefix();
        assert_eq!(a, 1);

        let (a, b) = (1, true, "x").prefix();
        assert_eq!((a, b), (1, true));

        let (a, b, c) = (1, true, "x").prefix();
        assert_eq!((a, b, c), (1, true, "x"));
    }
}
