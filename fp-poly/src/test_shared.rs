//! Strategies shared between the test modules.

use proptest::collection::vec;
use proptest::prelude::*;

use crate::math::polynomial::Polynomial;

/// Field orders small enough to make collisions and cancellations likely.
pub(crate) fn small_prime() -> impl Strategy<Value = u8> {
    prop::sample::select(vec![2, 3, 5, 7, 11, 13])
}

/// Polynomials of degree at most `max_degree` with coefficients in `0..order`.
pub(crate) fn polynomial_over(order: u8, max_degree: usize) -> BoxedStrategy<Polynomial> {
    vec(0..order, 1..=max_degree + 1)
        .prop_map(|coefficients| Polynomial::from_dense(&coefficients).unwrap())
        .boxed()
}

pub(crate) fn nonzero_polynomial_over(order: u8, max_degree: usize) -> BoxedStrategy<Polynomial> {
    polynomial_over(order, max_degree)
        .prop_filter("polynomial must be nonzero", |p| !p.is_zero())
        .boxed()
}
