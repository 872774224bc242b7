use std::collections::TryReserveError;
use std::num::ParseIntError;

use num_bigint::BigUint;
use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum PolynomialError {
    #[error("required argument is missing: {0}")]
    NullArgument(&'static str),

    #[error("out of memory while growing the term sequence")]
    MemoryExhausted(#[from] TryReserveError),

    #[error("term sequence: {0}")]
    TermSequenceError(String),

    #[error("structural inconsistency: {0}")]
    StructuralInconsistency(String),

    #[error("coefficient overflow at degree {degree}")]
    CoefficientOverflow { degree: usize },

    #[error("coefficient underflow at degree {degree}")]
    CoefficientUnderflow { degree: usize },

    #[error("field missing: {0}")]
    FieldMissing(&'static str),

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("division by the zero polynomial")]
    DivisionByZero,

    #[error("invalid field order {0}: must be a prime in 2..=255")]
    InvalidFieldOrder(u8),

    #[error("degree does not fit into `usize`")]
    DegreeOverflow,

    #[error("a random prime needs at least one digit, got {0}")]
    InvalidDigitCount(usize),

    #[error("no irreducible polynomial found after {0} attempts")]
    GenerationExhausted(usize),
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum ParsePolynomialError {
    #[error("cannot parse a polynomial from an empty string")]
    Empty,

    #[error("unexpected character {found:?} at byte {position}")]
    UnexpectedCharacter { position: usize, found: char },

    #[error("expected a term at byte {0}, found the end of the input")]
    UnexpectedEnd(usize),

    #[error("invalid coefficient at byte {position}")]
    InvalidCoefficient {
        position: usize,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid degree at byte {position}")]
    InvalidDegree {
        position: usize,
        #[source]
        source: ParseIntError,
    },

    #[error("combining terms failed")]
    Arithmetic(#[from] PolynomialError),
}

/// The first point at which a polynomial diverges from an expected structure.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum StructureMismatch {
    #[error("expected presence bitmask {expected} but got {actual}")]
    Presence { expected: BigUint, actual: BigUint },

    #[error("expected {expected} terms but the polynomial stores more")]
    MoreTerms { expected: usize },

    #[error("expected {expected} terms but the polynomial stores only {actual}")]
    FewerTerms { expected: usize, actual: usize },

    #[error("expected coefficient {expected} but got {actual} at position {position}")]
    Coefficient {
        position: usize,
        expected: u8,
        actual: u8,
    },
}
