//! Exact arithmetic on sparse univariate polynomials over prime fields F_p and
//! their extensions GF(p^n).
//!
//! A [`Polynomial`](math::polynomial::Polynomial) stores only its nonzero terms,
//! addressed through a bitmask of present degrees, so that sparse polynomials of
//! very high degree stay cheap. Arithmetic, Euclidean division, (extended) GCD,
//! Rabin's irreducibility test, random generation, and a textual notation are
//! built on top.
//!
//! ```
//! # use fp_poly::prelude::*;
//! let field = Field::prime_field(3)?;
//! let p: Polynomial = "x + 1".parse()?;
//! let square = p.mul(&p, Some(&field))?;
//! assert_eq!("1 + 2*x + x^2", square.to_string());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod math;
pub mod prelude;

#[cfg(test)]
pub(crate) mod test_shared;
