use rand::Rng;
use tracing::debug;

use super::Polynomial;
use crate::config;
use crate::error::PolynomialError;
use crate::math::field::Field;
use crate::math::primality::random_prime;

impl Polynomial {
    /// A random polynomial of exactly the given degree, using the
    /// thread-local random number generator.
    pub fn random(degree: usize, field: &Field) -> Result<Self, PolynomialError> {
        Self::random_with(degree, field, &mut rand::rng())
    }

    /// A random polynomial of exactly the given degree. The leading coefficient is drawn
    /// uniformly from the nonzero field elements, every lower coefficient uniformly from all
    /// field elements.
    ///
    /// # Errors
    ///
    /// [`MemoryExhausted`](PolynomialError::MemoryExhausted) if a polynomial of that degree
    /// cannot be stored.
    pub fn random_with<R: Rng + ?Sized>(
        degree: usize,
        field: &Field,
        rng: &mut R,
    ) -> Result<Self, PolynomialError> {
        let order = field.order();
        let leading_coefficient = rng.random_range(1..order);
        let mut lower_terms = vec![];
        lower_terms.try_reserve_exact(degree)?;
        lower_terms.extend((0..degree).map(|d| (d, rng.random_range(0..order))));

        let terms = lower_terms.into_iter().chain([(degree, leading_coefficient)]);
        Self::from_sorted_terms(terms)
    }

    /// A polynomial whose coefficients are the base-`q` digits of a random prime with `digits`
    /// decimal digits, where `q` is the order of the field. The least significant digit becomes
    /// the constant term.
    ///
    /// By Cohn's criterion, such polynomials are often irreducible. This is not checked.
    pub fn cohn_candidate<R: Rng + ?Sized>(
        digits: usize,
        field: &Field,
        rng: &mut R,
    ) -> Result<Self, PolynomialError> {
        let prime = random_prime(digits, rng)?;
        let expansion = prime.to_radix_le(field.order().into());
        Self::from_sorted_terms(expansion.into_iter().enumerate())
    }

    /// A random irreducible polynomial, derived from a random prime with `digits` decimal
    /// digits. See [`random_irreducible_with`](Self::random_irreducible_with).
    pub fn random_irreducible(digits: usize, field: &Field) -> Result<Self, PolynomialError> {
        Self::random_irreducible_with(digits, field, &mut rand::rng())
    }

    /// Draws [Cohn candidates](Self::cohn_candidate) until one passes the
    /// [irreducibility test](Self::is_irreducible).
    ///
    /// # Errors
    ///
    /// [`GenerationExhausted`](PolynomialError::GenerationExhausted) if no candidate passes
    /// within the [configured number of attempts](config::set_irreducible_generation_attempts).
    /// This is certain to happen if every prime with `digits` digits is smaller than the field's
    /// order, since all candidates are then constant.
    pub fn random_irreducible_with<R: Rng + ?Sized>(
        digits: usize,
        field: &Field,
        rng: &mut R,
    ) -> Result<Self, PolynomialError> {
        let attempts = config::irreducible_generation_attempts();
        for attempt in 1..=attempts {
            let candidate = Self::cohn_candidate(digits, field, rng)?;
            if candidate.is_irreducible(field)? {
                debug!(%candidate, attempt, "found irreducible polynomial");
                return Ok(candidate);
            }
            debug!(%candidate, attempt, "rejected reducible candidate");
        }

        Err(PolynomialError::GenerationExhausted(attempts))
    }
}
