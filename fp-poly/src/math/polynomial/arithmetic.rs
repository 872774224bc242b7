use super::Polynomial;
use super::TermOperation;
use crate::error::PolynomialError;
use crate::math::field::Field;

impl Polynomial {
    /// `self + other`. With a field, coefficients are added modulo its order.
    ///
    /// # Errors
    ///
    /// Without a field, fails with [`CoefficientOverflow`](PolynomialError::CoefficientOverflow)
    /// if a sum does not fit into a byte.
    pub fn add(&self, other: &Self, field: Option<&Field>) -> Result<Self, PolynomialError> {
        self.check_structure()?;
        other.check_structure()?;

        match (self.is_zero(), other.is_zero()) {
            (true, _) => Ok(Self::copy_into(other, field)),
            (_, true) => Ok(Self::copy_into(self, field)),
            _ => self.combine(other, field, TermOperation::Addition),
        }
    }

    /// `self - other`. With a field, coefficients are subtracted modulo its order.
    ///
    /// # Errors
    ///
    /// Without a field, fails with
    /// [`CoefficientUnderflow`](PolynomialError::CoefficientUnderflow) if a difference would be
    /// negative, and with [`NotImplemented`](PolynomialError::NotImplemented) if a nonzero
    /// polynomial is subtracted from zero.
    pub fn sub(&self, other: &Self, field: Option<&Field>) -> Result<Self, PolynomialError> {
        self.check_structure()?;
        other.check_structure()?;

        if other.is_zero() {
            return Ok(Self::copy_into(self, field));
        }
        if self.is_zero() && field.is_none() {
            return Err(PolynomialError::NotImplemented(
                "negation of a polynomial without a field",
            ));
        }

        self.combine(other, field, TermOperation::Subtraction)
    }

    /// The product `self · other`, as the sparse convolution of the stored terms. The cost is
    /// proportional to the product of the numbers of terms, independent of the degrees.
    ///
    /// # Errors
    ///
    /// Without a field, fails with [`CoefficientOverflow`](PolynomialError::CoefficientOverflow)
    /// if a coefficient of the product does not fit into a byte.
    pub fn mul(&self, other: &Self, field: Option<&Field>) -> Result<Self, PolynomialError> {
        self.check_structure()?;
        other.check_structure()?;
        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero());
        }

        let mut product = Self::zero();
        for (lhs_degree, lhs_coefficient) in self.iter() {
            for (rhs_degree, rhs_coefficient) in other.iter() {
                let degree = lhs_degree
                    .checked_add(rhs_degree)
                    .ok_or(PolynomialError::DegreeOverflow)?;
                let coefficient = match field {
                    Some(field) => field.mul(lhs_coefficient, rhs_coefficient),
                    None => {
                        let wide = u16::from(lhs_coefficient) * u16::from(rhs_coefficient);
                        u8::try_from(wide)
                            .map_err(|_| PolynomialError::CoefficientOverflow { degree })?
                    }
                };
                product.insert_term(coefficient, degree, field, TermOperation::Addition)?;
            }
        }

        Ok(product)
    }

    /// The product `self · other` in the extension field, _i.e._, reduced modulo the field's
    /// irreducible polynomial.
    pub fn mul_fq(&self, other: &Self, field: &Field) -> Result<Self, PolynomialError> {
        let modulus = Self::extension_modulus(field)?;
        let (_, remainder) = self.mul(other, Some(field))?.divide(modulus, field)?;
        Ok(remainder)
    }

    /// The multiplicative inverse of `self` in the extension field, found through the
    /// extended Euclidean algorithm with the field's irreducible polynomial.
    ///
    /// # Errors
    ///
    /// [`FieldMissing`](PolynomialError::FieldMissing) for prime fields and
    /// [`DivisionByZero`](PolynomialError::DivisionByZero) if `self` shares a factor with the
    /// modulus, in particular if it is zero in the extension field.
    pub fn inverse_fq(&self, field: &Field) -> Result<Self, PolynomialError> {
        let modulus = Self::extension_modulus(field)?;
        let (_, reduced) = self.divide(modulus, field)?;
        if reduced.is_zero() {
            return Err(PolynomialError::DivisionByZero);
        }

        let (gcd, inverse, _) = reduced.gcd_extended(modulus, field)?;
        if !gcd.is_one() {
            return Err(PolynomialError::DivisionByZero);
        }
        let (_, inverse) = inverse.divide(modulus, field)?;

        Ok(inverse)
    }

    fn extension_modulus(field: &Field) -> Result<&Self, PolynomialError> {
        field
            .irreducible_polynomial()
            .ok_or(PolynomialError::FieldMissing("irreducible polynomial of the extension"))
    }

    fn copy_into(polynomial: &Self, field: Option<&Field>) -> Self {
        match field {
            Some(field) => polynomial.reduce_coefficients(field),
            None => polynomial.clone(),
        }
    }

    /// Feeds all terms of `self` into a fresh polynomial, then all terms of `other` with the
    /// given operation.
    fn combine(
        &self,
        other: &Self,
        field: Option<&Field>,
        operation: TermOperation,
    ) -> Result<Self, PolynomialError> {
        let mut result = Self::zero();
        for (degree, coefficient) in self.iter() {
            result.insert_term(coefficient, degree, field, TermOperation::Addition)?;
        }
        for (degree, coefficient) in other.iter() {
            result.insert_term(coefficient, degree, field, operation)?;
        }

        Ok(result)
    }
}
