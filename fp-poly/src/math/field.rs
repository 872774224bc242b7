use serde::Deserialize;
use serde::Serialize;

use super::other::is_prime;
use super::polynomial::Polynomial;
use crate::error::PolynomialError;

/// A prime field F_p, or its extension GF(p^n) if an irreducible polynomial of degree `n` is
/// attached.
///
/// The order is a prime of at most 255, which keeps every field element in a `u8` and makes
/// the linear search in [`Field::inverse`] cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FieldParts")]
pub struct Field {
    order: u8,
    irreducible_polynomial: Option<Polynomial>,
}

#[derive(Deserialize)]
struct FieldParts {
    order: u8,
    irreducible_polynomial: Option<Polynomial>,
}

impl TryFrom<FieldParts> for Field {
    type Error = PolynomialError;

    fn try_from(parts: FieldParts) -> Result<Self, Self::Error> {
        Self::galois_field(parts.order, parts.irreducible_polynomial)
    }
}

impl Field {
    /// The prime field F_`order`.
    pub fn prime_field(order: u8) -> Result<Self, PolynomialError> {
        Self::galois_field(order, None)
    }

    /// The field F_`order`[x] / (`irreducible_polynomial`). Without a polynomial, this is the
    /// prime field.
    ///
    /// The polynomial's coefficients are reduced modulo `order`. Its irreducibility is not
    /// checked; see [`Polynomial::is_irreducible`].
    pub fn galois_field(
        order: u8,
        irreducible_polynomial: Option<Polynomial>,
    ) -> Result<Self, PolynomialError> {
        if !is_prime(order.into()) {
            return Err(PolynomialError::InvalidFieldOrder(order));
        }

        let mut field = Self {
            order,
            irreducible_polynomial: None,
        };
        if let Some(modulus) = irreducible_polynomial {
            let modulus = modulus.reduce_coefficients(&field);
            if modulus.degree() == 0 {
                let reason = format!("extension modulus {modulus} is constant");
                return Err(PolynomialError::StructuralInconsistency(reason));
            }
            field.irreducible_polynomial = Some(modulus);
        }

        Ok(field)
    }

    pub fn order(&self) -> u8 {
        self.order
    }

    pub fn irreducible_polynomial(&self) -> Option<&Polynomial> {
        self.irreducible_polynomial.as_ref()
    }

    pub fn is_prime_field(&self) -> bool {
        self.irreducible_polynomial.is_none()
    }

    /// The degree `n` of the extension GF(p^n) over F_p. 1 for prime fields.
    pub fn extension_degree(&self) -> usize {
        self.irreducible_polynomial
            .as_ref()
            .map_or(1, Polynomial::degree)
    }

    pub fn reduce(&self, value: u8) -> u8 {
        value % self.order
    }

    pub fn add(&self, lhs: u8, rhs: u8) -> u8 {
        let sum = u16::from(self.reduce(lhs)) + u16::from(self.reduce(rhs));
        (sum % u16::from(self.order)) as u8
    }

    pub fn sub(&self, lhs: u8, rhs: u8) -> u8 {
        let (lhs, rhs) = (self.reduce(lhs), self.reduce(rhs));
        if lhs < rhs {
            // `order + lhs - rhs` is in (0, order) and cannot leave the byte range
            self.order - (rhs - lhs)
        } else {
            lhs - rhs
        }
    }

    pub fn neg(&self, value: u8) -> u8 {
        self.sub(0, value)
    }

    pub fn mul(&self, lhs: u8, rhs: u8) -> u8 {
        let product = u16::from(lhs) * u16::from(rhs);
        (product % u16::from(self.order)) as u8
    }

    pub fn pow(&self, base: u8, exponent: usize) -> u8 {
        let mut acc = self.reduce(1);
        let mut base = self.reduce(base);
        let mut exponent = exponent;
        while exponent > 0 {
            if exponent & 1 == 1 {
                acc = self.mul(acc, base);
            }
            base = self.mul(base, base);
            exponent >>= 1;
        }

        acc
    }

    /// The multiplicative inverse of `value`, found by linear search over `1..order`. `None` if
    /// `value` is a multiple of the order.
    pub fn inverse(&self, value: u8) -> Option<u8> {
        (1..self.order).find(|&candidate| self.mul(value, candidate) == 1)
    }
}
