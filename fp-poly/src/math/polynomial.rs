use std::fmt::Debug;
use std::fmt::Formatter;

use arbitrary::Arbitrary;
use arbitrary::Unstructured;
use num_bigint::BigUint;

use super::bit_index::BitIndex;
use super::field::Field;
use crate::error::PolynomialError;

mod arithmetic;
mod assertion;
mod division;
mod irreducibility;
mod random;
mod text;

/// Whether a term is added to or subtracted from the stored coefficient.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum TermOperation {
    Addition,
    Subtraction,
}

/// A univariate polynomial with byte-sized coefficients, in sparse form.
///
/// Bit `i` of the presence index is set if and only if a term of degree `i` is stored. The
/// `k`-th stored term belongs to the `k`-th set bit, which keeps the terms sorted by
/// increasing degree. Only nonzero terms are stored, with one exception: the zero polynomial
/// is represented canonically as a single stored `0` at degree 0.
///
/// Space is proportional to the number of nonzero terms, not to the degree.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Polynomial {
    presence: BitIndex,
    terms: Vec<u8>,
}

impl Debug for Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Polynomial")
            .field("presence", self.presence.as_biguint())
            .field("terms", &self.terms)
            .finish()
    }
}

impl<'a> Arbitrary<'a> for Polynomial {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let dense: Vec<u8> = u.arbitrary()?;
        Self::from_sorted_terms(dense.into_iter().enumerate())
            .map_err(|_| arbitrary::Error::IncorrectFormat)
    }
}

impl Polynomial {
    pub fn zero() -> Self {
        Self {
            presence: BitIndex::from(1),
            terms: vec![0],
        }
    }

    pub fn one() -> Self {
        Self {
            presence: BitIndex::from(1),
            terms: vec![1],
        }
    }

    /// The polynomial `x`.
    pub fn x() -> Self {
        Self {
            presence: BitIndex::from(0b10),
            terms: vec![1],
        }
    }

    /// `coefficient · x^degree`
    ///
    /// # Errors
    ///
    /// [`MemoryExhausted`](PolynomialError::MemoryExhausted) if the presence bitmask for
    /// `degree` cannot be allocated.
    pub fn monomial(coefficient: u8, degree: usize) -> Result<Self, PolynomialError> {
        if coefficient == 0 {
            return Ok(Self::zero());
        }

        let mut presence = BitIndex::new();
        presence.set(degree)?;
        Ok(Self {
            presence,
            terms: vec![coefficient],
        })
    }

    /// Build a polynomial from an explicit presence bitmask and the coefficients of the
    /// corresponding degrees, in order of increasing degree.
    ///
    /// # Errors
    ///
    /// Fails if the bitmask is empty, if the number of set bits differs from the number of
    /// coefficients, or if a zero is stored anywhere but in the canonical zero polynomial.
    pub fn from_parts(
        presence: impl Into<BigUint>,
        terms: Vec<u8>,
    ) -> Result<Self, PolynomialError> {
        let polynomial = Self {
            presence: BitIndex::from(presence.into()),
            terms,
        };
        polynomial.check_structure()?;
        if !polynomial.is_canonical_zero() && polynomial.terms.contains(&0) {
            let reason = format!("zero coefficient stored in {:?}", polynomial.terms);
            return Err(PolynomialError::StructuralInconsistency(reason));
        }

        Ok(polynomial)
    }

    /// Build a polynomial from its dense coefficients, in order of increasing degree. That
    /// is, the leading coefficient is the last element of the slice.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fp_poly::prelude::*;
    /// let p = Polynomial::from_dense(&[1, 1, 0, 1]).unwrap();
    /// assert_eq!("1 + x + x^3", p.to_string());
    /// assert!(p.assert_structure(11u32, &[1, 1, 1]).is_ok());
    /// ```
    pub fn from_dense(coefficients: &[u8]) -> Result<Self, PolynomialError> {
        if coefficients.is_empty() {
            return Err(PolynomialError::NullArgument("dense coefficient array"));
        }

        let terms = coefficients.iter().copied().enumerate();
        Self::from_sorted_terms(terms)
    }

    /// Collects `(degree, coefficient)` pairs of strictly increasing degree. Zero coefficients
    /// are skipped and do not take part in the ordering.
    ///
    /// # Errors
    ///
    /// [`StructuralInconsistency`](PolynomialError::StructuralInconsistency) if a nonzero
    /// term's degree does not exceed that of the previous nonzero term, and
    /// [`MemoryExhausted`](PolynomialError::MemoryExhausted) if the terms cannot be stored.
    pub(crate) fn from_sorted_terms(
        terms: impl IntoIterator<Item = (usize, u8)>,
    ) -> Result<Self, PolynomialError> {
        let mut presence = BitIndex::new();
        let mut coefficients = vec![];
        for (degree, coefficient) in terms {
            if coefficient == 0 {
                continue;
            }
            if degree < presence.bit_length() {
                let reason = format!(
                    "term of degree {degree} follows a term of degree {}",
                    presence.bit_length() - 1
                );
                return Err(PolynomialError::StructuralInconsistency(reason));
            }
            coefficients.try_reserve(1)?;
            presence.set(degree)?;
            coefficients.push(coefficient);
        }

        if coefficients.is_empty() {
            return Ok(Self::zero());
        }
        Ok(Self {
            presence,
            terms: coefficients,
        })
    }

    /// The presence bitmask: bit `i` is set iff a term of degree `i` is stored.
    pub fn presence(&self) -> &BigUint {
        self.presence.as_biguint()
    }

    /// The stored coefficients, in order of increasing degree.
    pub fn terms(&self) -> &[u8] {
        &self.terms
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// The stored `(degree, coefficient)` pairs, in order of increasing degree.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.presence
            .iter_ones()
            .zip(self.terms.iter().copied())
    }

    /// The index of the highest set presence bit. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.presence.bit_length().saturating_sub(1)
    }

    /// The degree of the `position`-th stored term.
    pub fn position_to_degree(&self, position: usize) -> Option<usize> {
        self.presence.select(position)
    }

    /// The stored coefficient of degree `degree`, located by counting the presence bits below
    /// it. `None` if no term of that degree is stored.
    ///
    /// # Errors
    ///
    /// Fails if `degree` exceeds [the degree](Self::degree) of the polynomial.
    pub fn degree_to_term(&self, degree: usize) -> Result<Option<u8>, PolynomialError> {
        if degree > self.degree() {
            let reason = format!(
                "requested degree {degree} exceeds the degree {} of the polynomial",
                self.degree()
            );
            return Err(PolynomialError::StructuralInconsistency(reason));
        }
        if !self.presence.test(degree) {
            return Ok(None);
        }

        let position = self.presence.rank(degree);
        match self.terms.get(position) {
            Some(&coefficient) => Ok(Some(coefficient)),
            None => Err(Self::missing_term(degree)),
        }
    }

    /// The coefficient of degree `degree`, which is 0 if no term is stored there.
    pub fn coefficient(&self, degree: usize) -> u8 {
        if !self.presence.test(degree) {
            return 0;
        }
        let position = self.presence.rank(degree);
        self.terms.get(position).copied().unwrap_or(0)
    }

    /// The coefficient of the term of highest degree. 0 for the zero polynomial.
    pub fn leading_coefficient(&self) -> u8 {
        self.terms.last().copied().unwrap_or(0)
    }

    /// Tolerates non-canonical representations of zero.
    pub fn is_zero(&self) -> bool {
        self.terms.iter().all(|&coefficient| coefficient == 0)
    }

    /// `true` iff `self` is the constant polynomial 1.
    pub fn is_one(&self) -> bool {
        self.terms == [1] && self.presence == BitIndex::from(1)
    }

    fn is_canonical_zero(&self) -> bool {
        self.terms == [0] && self.presence == BitIndex::from(1)
    }

    fn missing_term(degree: usize) -> PolynomialError {
        let reason = format!("presence bit {degree} is set but no term is stored for it");
        PolynomialError::StructuralInconsistency(reason)
    }

    /// Verify that the presence bitmask and the term sequence agree.
    pub fn check_structure(&self) -> Result<(), PolynomialError> {
        if self.terms.is_empty() {
            let reason = "term sequence is empty".to_string();
            return Err(PolynomialError::StructuralInconsistency(reason));
        }
        if self.presence.is_zero() {
            let reason = "presence bitmask is empty".to_string();
            return Err(PolynomialError::StructuralInconsistency(reason));
        }
        let num_set_bits = self.presence.count_ones();
        if num_set_bits != self.terms.len() {
            let reason = format!(
                "presence bitmask has {num_set_bits} set bits but {} terms are stored",
                self.terms.len()
            );
            return Err(PolynomialError::StructuralInconsistency(reason));
        }

        Ok(())
    }

    /// Add `coefficient · x^degree` to `self`, in place.
    ///
    /// Without a field, the coefficient must stay in the byte range. With a field, the
    /// coefficients are combined modulo its order.
    ///
    /// # Errors
    ///
    /// [`CoefficientOverflow`](PolynomialError::CoefficientOverflow) if no field is given and the
    /// sum does not fit into a byte, and [`MemoryExhausted`](PolynomialError::MemoryExhausted)
    /// if a new term cannot be stored. On error, `self` is unchanged.
    pub fn add_single_term(
        &mut self,
        coefficient: u8,
        degree: usize,
        field: Option<&Field>,
    ) -> Result<(), PolynomialError> {
        self.insert_term(coefficient, degree, field, TermOperation::Addition)
    }

    pub(crate) fn insert_term(
        &mut self,
        coefficient: u8,
        degree: usize,
        field: Option<&Field>,
        operation: TermOperation,
    ) -> Result<(), PolynomialError> {
        if coefficient == 0 || field.is_some_and(|f| f.reduce(coefficient) == 0) {
            return Ok(());
        }

        let is_stored = self.presence.test(degree);
        let mut position = self.presence.rank(degree);
        let stored = if is_stored {
            *self
                .terms
                .get(position)
                .ok_or_else(|| Self::missing_term(degree))?
        } else {
            0
        };

        let combined = match (field, operation) {
            (None, TermOperation::Addition) => stored
                .checked_add(coefficient)
                .ok_or(PolynomialError::CoefficientOverflow { degree })?,
            (None, TermOperation::Subtraction) => stored
                .checked_sub(coefficient)
                .ok_or(PolynomialError::CoefficientUnderflow { degree })?,
            (Some(field), TermOperation::Addition) => field.add(stored, coefficient),
            (Some(field), TermOperation::Subtraction) => field.sub(stored, coefficient),
        };

        match (is_stored, combined) {
            (true, 0) => {
                self.presence.clear(degree);
                self.terms.remove(position);
            }
            (true, value) => self.terms[position] = value,
            (false, 0) => (),
            (false, value) => {
                if position > self.terms.len() {
                    let reason = format!("cannot insert at position {position}");
                    return Err(PolynomialError::TermSequenceError(reason));
                }
                let replaces_placeholder = degree != 0 && self.is_canonical_zero();
                self.terms.try_reserve(1)?;
                self.presence.set(degree)?;

                // the placeholder of the canonical zero must not survive a new term
                if replaces_placeholder {
                    self.presence.clear(0);
                    self.terms.clear();
                    position = 0;
                }
                self.terms.insert(position, value);
            }
        }

        if self.is_zero() {
            *self = Self::zero();
        }

        Ok(())
    }

    /// Drop all stored zero coefficients. A polynomial without nonzero terms becomes the
    /// canonical zero.
    pub fn normalize(&mut self) {
        if self.is_canonical_zero() || !self.terms.contains(&0) {
            return;
        }

        // clearing a bit leaves the positions of all lower bits intact
        for position in (0..self.terms.len()).rev() {
            if self.terms[position] != 0 {
                continue;
            }
            if let Some(degree) = self.presence.select(position) {
                self.presence.clear(degree);
            }
        }
        self.terms.retain(|&coefficient| coefficient != 0);
        if self.terms.is_empty() {
            *self = Self::zero();
        }
    }

    fn map_coefficients(&self, map: impl Fn(u8) -> u8) -> Self {
        let mut mapped = self.clone();
        for coefficient in &mut mapped.terms {
            *coefficient = map(*coefficient);
        }
        mapped.normalize();
        mapped
    }

    /// All coefficients reduced modulo the field's order.
    #[must_use]
    pub fn reduce_coefficients(&self, field: &Field) -> Self {
        self.map_coefficients(|coefficient| field.reduce(coefficient))
    }

    #[must_use]
    pub fn scalar_mul(&self, scalar: u8, field: &Field) -> Self {
        self.map_coefficients(|coefficient| field.mul(coefficient, scalar))
    }

    /// The additive inverse within the field.
    #[must_use]
    pub fn negate(&self, field: &Field) -> Self {
        self.map_coefficients(|coefficient| field.neg(coefficient))
    }

    /// `self`, scaled to have leading coefficient 1. The zero polynomial stays zero.
    #[must_use]
    pub fn monic(&self, field: &Field) -> Self {
        let reduced = self.reduce_coefficients(field);
        match field.inverse(reduced.leading_coefficient()) {
            Some(inverse) => reduced.scalar_mul(inverse, field),
            None => reduced,
        }
    }

    pub fn evaluate(&self, x: u8, field: &Field) -> u8 {
        self.iter().fold(0, |acc, (degree, coefficient)| {
            field.add(acc, field.mul(coefficient, field.pow(x, degree)))
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::collection::vec;
    use proptest::prelude::*;
    use proptest_arbitrary_interop::arb;
    use test_strategy::proptest;

    use super::*;
    use crate::test_shared::polynomial_over;
    use crate::test_shared::small_prime;

    impl proptest::arbitrary::Arbitrary for Polynomial {
        type Parameters = ();

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            arb().boxed()
        }

        type Strategy = BoxedStrategy<Self>;
    }

    fn assert_invariants(polynomial: &Polynomial) {
        polynomial.check_structure().unwrap();
        if !polynomial.is_canonical_zero() {
            assert!(!polynomial.terms.contains(&0), "{polynomial:?}");
        }
    }

    #[test]
    fn polynomial_can_be_debug_printed() {
        let polynomial = Polynomial::from_dense(&[1, 2, 3]).unwrap();
        println!("{polynomial:?}");
    }

    #[test]
    fn zero_polynomial_is_canonical() {
        let zero = Polynomial::zero();
        assert_eq!(0, zero.degree());
        assert!(zero.is_zero());
        assert!(!zero.is_one());
        assert!(zero.assert_structure(1u32, &[0]).is_ok());
    }

    #[test]
    fn dense_array_of_zeros_is_canonical_zero() {
        let zero = Polynomial::from_dense(&[0, 0, 0, 0]).unwrap();
        assert_eq!(Polynomial::zero(), zero);
    }

    #[test]
    fn empty_dense_array_is_rejected() {
        assert_eq!(
            Err(PolynomialError::NullArgument("dense coefficient array")),
            Polynomial::from_dense(&[])
        );
    }

    #[test]
    fn dense_array_builds_sparse_representation() {
        let p = Polynomial::from_dense(&[1, 1, 0, 1]).unwrap();
        assert!(p.assert_structure(11u32, &[1, 1, 1]).is_ok());
        assert_eq!(3, p.degree());
        assert_eq!(Some(3), p.position_to_degree(2));
        assert_eq!(None, p.position_to_degree(3));
    }

    #[test]
    fn from_parts_rejects_inconsistent_bitmask() {
        let err = Polynomial::from_parts(11u32, vec![1, 1]).unwrap_err();
        assert!(matches!(err, PolynomialError::StructuralInconsistency(_)));
    }

    #[test]
    fn from_parts_rejects_empty_bitmask() {
        let err = Polynomial::from_parts(0u32, vec![]).unwrap_err();
        assert!(matches!(err, PolynomialError::StructuralInconsistency(_)));
    }

    #[test]
    fn from_parts_rejects_stored_zeros() {
        let err = Polynomial::from_parts(0b11u32, vec![0, 4]).unwrap_err();
        assert!(matches!(err, PolynomialError::StructuralInconsistency(_)));
    }

    #[test]
    fn from_parts_accepts_canonical_zero() {
        let zero = Polynomial::from_parts(1u32, vec![0]).unwrap();
        assert!(zero.is_zero());
    }

    #[test]
    fn degree_to_term_locates_stored_terms() {
        let p = Polynomial::from_parts(0b1010_0001u32, vec![4, 5, 6]).unwrap();
        assert_eq!(Ok(Some(4)), p.degree_to_term(0));
        assert_eq!(Ok(None), p.degree_to_term(1));
        assert_eq!(Ok(Some(5)), p.degree_to_term(5));
        assert_eq!(Ok(Some(6)), p.degree_to_term(7));
        assert!(p.degree_to_term(8).is_err());
        assert_eq!(0, p.coefficient(100));
        assert_eq!(6, p.leading_coefficient());
    }

    #[test]
    fn adding_a_term_to_zero_removes_the_placeholder() {
        let mut p = Polynomial::zero();
        p.add_single_term(7, 5, None).unwrap();
        assert!(p.assert_structure(1u32 << 5, &[7]).is_ok());
    }

    #[test]
    fn adding_a_constant_to_zero_replaces_the_placeholder() {
        let mut p = Polynomial::zero();
        p.add_single_term(7, 0, None).unwrap();
        assert!(p.assert_structure(1u32, &[7]).is_ok());
    }

    #[test]
    fn adding_a_multiple_of_the_order_is_a_no_op() {
        let field = Field::prime_field(5).unwrap();
        let mut p = Polynomial::from_dense(&[1, 2]).unwrap();
        let before = p.clone();
        p.add_single_term(10, 1, Some(&field)).unwrap();
        p.add_single_term(0, 7, None).unwrap();
        assert_eq!(before, p);
    }

    #[test]
    fn terms_are_inserted_in_degree_order() {
        let mut p = Polynomial::zero();
        for degree in [9, 2, 5, 0, 7] {
            p.add_single_term(degree as u8 + 1, degree, None).unwrap();
        }
        assert!(p.assert_structure(0b10_1010_0101u32, &[1, 3, 6, 8, 10]).is_ok());
    }

    #[test]
    fn overflowing_coefficient_is_rejected_without_modification() {
        let mut p = Polynomial::from_dense(&[200, 1]).unwrap();
        let before = p.clone();
        let err = p.add_single_term(100, 0, None).unwrap_err();
        assert_eq!(PolynomialError::CoefficientOverflow { degree: 0 }, err);
        assert_eq!(before, p);
    }

    #[test]
    fn unallocatable_degree_is_rejected_without_modification() {
        let mut zero = Polynomial::zero();
        let err = zero.add_single_term(1, usize::MAX, None).unwrap_err();
        assert!(matches!(err, PolynomialError::MemoryExhausted(_)));
        assert_eq!(Polynomial::zero(), zero);

        let mut p = Polynomial::from_dense(&[1, 2]).unwrap();
        let before = p.clone();
        let err = p.add_single_term(3, usize::MAX, None).unwrap_err();
        assert!(matches!(err, PolynomialError::MemoryExhausted(_)));
        assert_eq!(before, p);
    }

    #[test]
    fn monomial_of_unallocatable_degree_is_rejected() {
        let err = Polynomial::monomial(1, usize::MAX).unwrap_err();
        assert!(matches!(err, PolynomialError::MemoryExhausted(_)));
        assert_eq!(Ok(Polynomial::zero()), Polynomial::monomial(0, usize::MAX));
    }

    #[test]
    fn terms_out_of_degree_order_are_rejected() {
        let err = Polynomial::from_sorted_terms([(3, 1), (1, 2)]).unwrap_err();
        assert!(matches!(err, PolynomialError::StructuralInconsistency(_)));

        let err = Polynomial::from_sorted_terms([(2, 1), (2, 1)]).unwrap_err();
        assert!(matches!(err, PolynomialError::StructuralInconsistency(_)));

        // zero terms are skipped before the ordering is checked
        let p = Polynomial::from_sorted_terms([(3, 1), (1, 0), (4, 2)]).unwrap();
        assert!(p.assert_structure(0b1_1000u32, &[1, 2]).is_ok());
    }

    #[test]
    fn constants_one_and_x_are_canonical() {
        assert!(Polynomial::one().assert_structure(1u32, &[1]).is_ok());
        assert!(Polynomial::x().assert_structure(0b10u32, &[1]).is_ok());
        assert_eq!(Ok(Polynomial::x()), Polynomial::monomial(1, 1));
    }

    #[test]
    fn cancelling_the_only_term_gives_canonical_zero() {
        let field = Field::prime_field(3).unwrap();
        let mut p = Polynomial::monomial(2, 4).unwrap();
        p.add_single_term(1, 4, Some(&field)).unwrap();
        assert_eq!(Polynomial::zero(), p);
    }

    #[test]
    fn subtracting_from_an_absent_term_negates_modulo_the_order() {
        let field = Field::prime_field(7).unwrap();
        let mut p = Polynomial::one();
        p.insert_term(3, 2, Some(&field), TermOperation::Subtraction)
            .unwrap();
        assert!(p.assert_structure(0b101u32, &[1, 4]).is_ok());
    }

    #[test]
    fn subtracting_from_an_absent_term_without_field_underflows() {
        let mut p = Polynomial::one();
        let err = p
            .insert_term(3, 2, None, TermOperation::Subtraction)
            .unwrap_err();
        assert_eq!(PolynomialError::CoefficientUnderflow { degree: 2 }, err);
    }

    #[test]
    fn normalizing_drops_stored_zeros() {
        let mut p = Polynomial {
            presence: BitIndex::from(0b111),
            terms: vec![0, 2, 0],
        };
        p.normalize();
        assert!(p.assert_structure(0b10u32, &[2]).is_ok());

        let mut all_zero = Polynomial {
            presence: BitIndex::from(0b110),
            terms: vec![0, 0],
        };
        assert!(all_zero.is_zero());
        all_zero.normalize();
        assert_eq!(Polynomial::zero(), all_zero);
    }

    #[test]
    fn evaluating_x_squared_plus_one_over_f3() {
        let field = Field::prime_field(3).unwrap();
        let p = Polynomial::from_dense(&[1, 0, 1]).unwrap();
        let values = (0..3).map(|x| p.evaluate(x, &field)).collect::<Vec<_>>();
        assert_eq!(vec![1, 2, 2], values);
    }

    #[proptest]
    fn arbitrary_polynomials_uphold_invariants(polynomial: Polynomial) {
        assert_invariants(&polynomial);
    }

    #[proptest]
    fn single_term_insertion_upholds_invariants(
        #[strategy(small_prime())] order: u8,
        #[strategy(vec((any::<u8>(), 0usize..40), 0..30))] insertions: Vec<(u8, usize)>,
    ) {
        let field = Field::prime_field(order).unwrap();
        let mut polynomial = Polynomial::zero();
        for (coefficient, degree) in insertions {
            polynomial
                .add_single_term(coefficient, degree, Some(&field))
                .unwrap();
            assert_invariants(&polynomial);
            prop_assert!(polynomial.terms.iter().all(|&c| c < order));
        }
    }

    #[proptest]
    fn stored_degrees_agree_with_positions(polynomial: Polynomial) {
        for (position, (degree, coefficient)) in polynomial.iter().enumerate() {
            prop_assert_eq!(Some(degree), polynomial.position_to_degree(position));
            prop_assert_eq!(Ok(Some(coefficient)), polynomial.degree_to_term(degree));
        }
    }

    #[proptest]
    fn monic_polynomial_has_leading_coefficient_one(
        #[strategy(small_prime())] order: u8,
        #[strategy(polynomial_over(#order, 12))]
        #[filter(!#polynomial.is_zero())]
        polynomial: Polynomial,
    ) {
        let field = Field::prime_field(order).unwrap();
        prop_assert_eq!(1, polynomial.monic(&field).leading_coefficient());
    }

    #[proptest]
    fn negation_is_an_involution(
        #[strategy(small_prime())] order: u8,
        #[strategy(polynomial_over(#order, 12))] polynomial: Polynomial,
    ) {
        let field = Field::prime_field(order).unwrap();
        prop_assert_eq!(&polynomial, &polynomial.negate(&field).negate(&field));
    }
}
