pub mod bit_index;
pub mod field;
pub mod other;
pub mod polynomial;
pub mod primality;
