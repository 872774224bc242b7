use num_bigint::BigUint;
use tracing::trace;

use super::Polynomial;
use super::TermOperation;
use crate::error::PolynomialError;
use crate::math::field::Field;

impl Polynomial {
    /// Schoolbook long division. Returns `(quotient, remainder)` such that
    /// `quotient · divisor + remainder == self` and the remainder is zero or of lower degree
    /// than the divisor. Both operands are reduced modulo the field's order first.
    ///
    /// # Errors
    ///
    /// [`DivisionByZero`](PolynomialError::DivisionByZero) if the divisor is zero modulo the
    /// field's order.
    pub fn divide(&self, divisor: &Self, field: &Field) -> Result<(Self, Self), PolynomialError> {
        self.check_structure()?;
        divisor.check_structure()?;

        let divisor = divisor.reduce_coefficients(field);
        if divisor.is_zero() {
            return Err(PolynomialError::DivisionByZero);
        }
        let leading_inverse = field
            .inverse(divisor.leading_coefficient())
            .ok_or(PolynomialError::DivisionByZero)?;

        let mut quotient = Self::zero();
        let mut remainder = self.reduce_coefficients(field);
        while !remainder.is_zero() && remainder.degree() >= divisor.degree() {
            let remainder_degree = remainder.degree();
            let shift = remainder_degree - divisor.degree();
            let coefficient = field.mul(leading_inverse, remainder.leading_coefficient());
            trace!(remainder_degree, shift, coefficient, "long division step");

            quotient.insert_term(coefficient, shift, Some(field), TermOperation::Addition)?;
            for (degree, divisor_coefficient) in divisor.iter() {
                let product = field.mul(divisor_coefficient, coefficient);
                remainder.insert_term(
                    product,
                    degree + shift,
                    Some(field),
                    TermOperation::Subtraction,
                )?;
            }
            debug_assert!(remainder.is_zero() || remainder.degree() < remainder_degree);
        }

        Ok((quotient, remainder))
    }

    /// The monic greatest common divisor of `self` and `other`. Zero if both are zero.
    pub fn gcd(&self, other: &Self, field: &Field) -> Result<Self, PolynomialError> {
        let mut previous = self.reduce_coefficients(field);
        let mut current = other.reduce_coefficients(field);
        while !current.is_zero() {
            let (_, remainder) = previous.divide(&current, field)?;
            previous = std::mem::replace(&mut current, remainder);
        }

        Ok(previous.monic(field))
    }

    /// The extended Euclidean algorithm. Returns `(g, u, v)` such that `g` is the monic
    /// greatest common divisor of `self` and `other`, and `u · self + v · other == g`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fp_poly::prelude::*;
    /// let field = Field::prime_field(5).unwrap();
    /// let p: Polynomial = "4 + x^2".parse().unwrap();
    /// let q: Polynomial = "3 + x".parse().unwrap();
    /// let (g, u, v) = p.gcd_extended(&q, &field).unwrap();
    /// assert_eq!("3 + x", g.to_string());
    ///
    /// let up = u.mul(&p, Some(&field)).unwrap();
    /// let vq = v.mul(&q, Some(&field)).unwrap();
    /// assert_eq!(g, up.add(&vq, Some(&field)).unwrap());
    /// ```
    pub fn gcd_extended(
        &self,
        other: &Self,
        field: &Field,
    ) -> Result<(Self, Self, Self), PolynomialError> {
        let (mut old_r, mut r) = (
            self.reduce_coefficients(field),
            other.reduce_coefficients(field),
        );
        let (mut old_s, mut s) = (Self::one(), Self::zero());
        let (mut old_t, mut t) = (Self::zero(), Self::one());

        while !r.is_zero() {
            let (quotient, remainder) = old_r.divide(&r, field)?;
            old_r = std::mem::replace(&mut r, remainder);

            let next_s = old_s.sub(&quotient.mul(&s, Some(field))?, Some(field))?;
            old_s = std::mem::replace(&mut s, next_s);

            let next_t = old_t.sub(&quotient.mul(&t, Some(field))?, Some(field))?;
            old_t = std::mem::replace(&mut t, next_t);
        }

        if let Some(scale) = field.inverse(old_r.leading_coefficient()) {
            old_r = old_r.scalar_mul(scale, field);
            old_s = old_s.scalar_mul(scale, field);
            old_t = old_t.scalar_mul(scale, field);
        }
        for polynomial in [&mut old_r, &mut old_s, &mut old_t] {
            polynomial.normalize();
        }

        Ok((old_r, old_s, old_t))
    }

    /// `self^exponent mod modulus`, by square-and-multiply.
    pub fn pow_mod(
        &self,
        exponent: &BigUint,
        modulus: &Self,
        field: &Field,
    ) -> Result<Self, PolynomialError> {
        let (_, base) = self.divide(modulus, field)?;
        let (_, mut acc) = Self::one().divide(modulus, field)?;
        for bit in (0..exponent.bits()).rev() {
            (_, acc) = acc.mul(&acc, Some(field))?.divide(modulus, field)?;
            if exponent.bit(bit) {
                (_, acc) = acc.mul(&base, Some(field))?.divide(modulus, field)?;
            }
        }

        Ok(acc)
    }
}
