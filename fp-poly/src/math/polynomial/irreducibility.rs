use num_bigint::BigUint;
use tracing::debug;

use super::Polynomial;
use crate::config;
use crate::error::PolynomialError;
use crate::math::bit_index::BitIndex;
use crate::math::field::Field;
use crate::math::other::checked_power;
use crate::math::other::prime_divisors;

impl Polynomial {
    /// `x^exponent - x` over the given field. Requires `exponent > 1`.
    pub(crate) fn frobenius_binomial(
        exponent: usize,
        field: &Field,
    ) -> Result<Self, PolynomialError> {
        debug_assert!(exponent > 1);
        let mut presence = BitIndex::new();
        presence.set(exponent)?;
        presence.set(1)?;
        Ok(Self {
            presence,
            terms: vec![field.neg(1), 1],
        })
    }

    /// `(x^(q^k) - x) mod self`, where `q` is the order of the field.
    ///
    /// If `q^k` does not exceed the [configured cutoff](config::set_frobenius_direct_cutoff),
    /// the binomial is built explicitly and divided by `self`. Otherwise, `x` is raised to the
    /// `q`-th power `k` times modulo `self`.
    fn frobenius_residue(&self, k: usize, field: &Field) -> Result<Self, PolynomialError> {
        let order = usize::from(field.order());
        let direct_exponent =
            checked_power(order, k).filter(|&e| e <= config::frobenius_direct_cutoff());
        if let Some(exponent) = direct_exponent {
            let (_, residue) = Self::frobenius_binomial(exponent, field)?.divide(self, field)?;
            return Ok(residue);
        }

        let (_, x) = Self::x().divide(self, field)?;
        let order = BigUint::from(order);
        let mut power = x.clone();
        for _ in 0..k {
            power = power.pow_mod(&order, self, field)?;
        }

        power.sub(&x, Some(field))
    }

    /// Rabin's irreducibility test.
    ///
    /// A polynomial `p` of degree `n` over F_q is irreducible if and only if `p` divides
    /// `x^(q^n) - x` and `gcd(x^(q^(n/r)) - x, p) = 1` for every prime `r` dividing `n`.
    /// Constant polynomials, including zero, are not irreducible.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fp_poly::prelude::*;
    /// let field = Field::prime_field(3).unwrap();
    /// let p: Polynomial = "x^2 + 1".parse().unwrap();
    /// assert!(p.is_irreducible(&field).unwrap());
    ///
    /// let q: Polynomial = "x^2 + 2".parse().unwrap();
    /// assert!(!q.is_irreducible(&field).unwrap());
    /// ```
    pub fn is_irreducible(&self, field: &Field) -> Result<bool, PolynomialError> {
        self.check_structure()?;
        let polynomial = self.reduce_coefficients(field);
        let degree = polynomial.degree();
        if degree == 0 {
            debug!(%polynomial, "constant polynomials are not irreducible");
            return Ok(false);
        }

        if !polynomial.frobenius_residue(degree, field)?.is_zero() {
            debug!(%polynomial, "does not divide x^(q^n) - x");
            return Ok(false);
        }
        for prime in prime_divisors(degree) {
            let residue = polynomial.frobenius_residue(degree / prime, field)?;
            let gcd = residue.gcd(&polynomial, field)?;
            if !gcd.is_one() {
                debug!(%polynomial, %gcd, prime, "has a factor of degree dividing n/r");
                return Ok(false);
            }
        }

        debug!(%polynomial, "irreducible");
        Ok(true)
    }
}
