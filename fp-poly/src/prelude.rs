pub use crate::error::ParsePolynomialError;
pub use crate::error::PolynomialError;
pub use crate::error::StructureMismatch;
pub use crate::math::bit_index::BitIndex;
pub use crate::math::field::Field;
pub use crate::math::polynomial::Polynomial;
