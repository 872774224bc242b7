use itertools::EitherOrBoth;
use itertools::Itertools;
use num_bigint::BigUint;

use super::Polynomial;
use crate::error::StructureMismatch;

impl Polynomial {
    /// Compare the presence bitmask and the stored terms against the expected ones. Reports the
    /// first point of divergence.
    pub fn assert_structure(
        &self,
        expected_presence: impl Into<BigUint>,
        expected_terms: &[u8],
    ) -> Result<(), StructureMismatch> {
        let expected_presence = expected_presence.into();
        if self.presence() != &expected_presence {
            return Err(StructureMismatch::Presence {
                expected: expected_presence,
                actual: self.presence().clone(),
            });
        }

        let expected = expected_terms.len();
        let pairs = self.terms().iter().zip_longest(expected_terms);
        for (position, pair) in pairs.enumerate() {
            match pair {
                EitherOrBoth::Both(&actual, &wanted) if actual != wanted => {
                    return Err(StructureMismatch::Coefficient {
                        position,
                        expected: wanted,
                        actual,
                    });
                }
                EitherOrBoth::Both(_, _) => (),
                EitherOrBoth::Left(_) => return Err(StructureMismatch::MoreTerms { expected }),
                EitherOrBoth::Right(_) => {
                    let actual = self.num_terms();
                    return Err(StructureMismatch::FewerTerms { expected, actual });
                }
            }
        }

        Ok(())
    }

    /// Compare the structure against that of another polynomial.
    pub fn assert_same_structure(&self, other: &Self) -> Result<(), StructureMismatch> {
        self.assert_structure(other.presence().clone(), other.terms())
    }
}
