use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use itertools::Itertools;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use super::Polynomial;
use crate::error::ParsePolynomialError;

impl Display for Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let terms = self
            .iter()
            .filter(|&(_, coefficient)| coefficient != 0)
            .map(|(degree, coefficient)| match (degree, coefficient) {
                (0, c) => format!("{c}"),
                (1, 1) => "x".to_string(),
                (1, c) => format!("{c}*x"),
                (d, 1) => format!("x^{d}"),
                (d, c) => format!("{c}*x^{d}"),
            })
            .join(" + ");
        write!(f, "{terms}")
    }
}

impl FromStr for Polynomial {
    type Err = ParsePolynomialError;

    /// Parses terms of the form `C`, `C*x`, `C*x^D`, `x`, or `x^D`, separated by `+`. A
    /// missing coefficient is 1. Terms of equal degree are summed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParsePolynomialError::Empty);
        }

        let mut polynomial = Self::zero();
        let mut parser = TermParser::new(s);
        loop {
            let (coefficient, degree) = parser.term()?;
            polynomial.add_single_term(coefficient, degree, None)?;
            if !parser.separator()? {
                return Ok(polynomial);
            }
        }
    }
}

struct TermParser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> TermParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.position += c.len_utf8();
        }
    }

    /// The maximal run of ASCII digits at the current position, and its start.
    fn digits(&mut self) -> (usize, &'a str) {
        let start = self.position;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.position += 1;
        }
        (start, &self.input[start..self.position])
    }

    fn unexpected(&self) -> ParsePolynomialError {
        match self.peek() {
            Some(found) => ParsePolynomialError::UnexpectedCharacter {
                position: self.position,
                found,
            },
            None => ParsePolynomialError::UnexpectedEnd(self.position),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParsePolynomialError> {
        if self.peek() != Some(expected) {
            return Err(self.unexpected());
        }
        self.position += expected.len_utf8();
        Ok(())
    }

    /// Returns `(coefficient, degree)`.
    fn term(&mut self) -> Result<(u8, usize), ParsePolynomialError> {
        self.skip_whitespace();
        let (position, digits) = self.digits();
        let coefficient = if digits.is_empty() {
            None
        } else {
            let coefficient = digits.parse().map_err(|source| {
                ParsePolynomialError::InvalidCoefficient { position, source }
            })?;
            Some(coefficient)
        };

        self.skip_whitespace();
        if let Some(constant) = coefficient {
            if self.peek() != Some('*') {
                return Ok((constant, 0));
            }
            self.expect('*')?;
            self.skip_whitespace();
        }
        self.expect('x')?;

        self.skip_whitespace();
        let degree = match self.peek() {
            Some('^') => {
                self.expect('^')?;
                self.skip_whitespace();
                let (position, digits) = self.digits();
                if digits.is_empty() {
                    return Err(self.unexpected());
                }
                digits
                    .parse()
                    .map_err(|source| ParsePolynomialError::InvalidDegree { position, source })?
            }
            _ => 1,
        };

        Ok((coefficient.unwrap_or(1), degree))
    }

    /// Consumes a `+`. Returns `false` at the end of the input.
    fn separator(&mut self) -> Result<bool, ParsePolynomialError> {
        self.skip_whitespace();
        match self.peek() {
            None => Ok(false),
            Some('+') => {
                self.position += 1;
                Ok(true)
            }
            Some(_) => Err(self.unexpected()),
        }
    }
}

impl Serialize for Polynomial {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Polynomial {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;
    use crate::error::PolynomialError;
    use crate::test_shared::polynomial_over;

    #[test]
    fn zero_is_printed_as_zero() {
        assert_eq!("0", Polynomial::zero().to_string());
        assert_eq!(Polynomial::zero(), "0".parse().unwrap());
    }

    #[test]
    fn printing_omits_unit_coefficients_above_degree_zero() {
        let p = Polynomial::from_dense(&[1, 1, 0, 1]).unwrap();
        assert_eq!("1 + x + x^3", p.to_string());

        let q = Polynomial::from_dense(&[0, 2, 3, 0, 1]).unwrap();
        assert_eq!("2*x + 3*x^2 + x^4", q.to_string());
    }

    #[test]
    fn all_term_forms_are_parsed() {
        let p: Polynomial = "4 + 2*x + x^2 + 3*x^5 + x".parse().unwrap();
        assert!(p.assert_structure(0b10_0111u32, &[4, 3, 1, 3]).is_ok());
    }

    #[test]
    fn whitespace_is_optional() {
        let spaced: Polynomial = "  1 +  2 * x ^ 3 ".parse().unwrap();
        let compact: Polynomial = "1+2*x^3".parse().unwrap();
        assert_eq!(spaced, compact);
    }

    #[test]
    fn terms_may_appear_in_any_order() {
        let p: Polynomial = "x^2 + 2*x + 1".parse().unwrap();
        assert_eq!("1 + 2*x + x^2", p.to_string());
    }

    #[test]
    fn explicit_zero_coefficients_are_dropped() {
        let p: Polynomial = "0*x + 1".parse().unwrap();
        assert!(p.is_one());
        let q: Polynomial = "0*x^7".parse().unwrap();
        assert!(q.is_zero());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(Err(ParsePolynomialError::Empty), "".parse::<Polynomial>());
        assert_eq!(Err(ParsePolynomialError::Empty), "   ".parse::<Polynomial>());
    }

    #[test]
    fn malformed_input_is_rejected() {
        let err = "1 + y".parse::<Polynomial>().unwrap_err();
        let expected = ParsePolynomialError::UnexpectedCharacter {
            position: 4,
            found: 'y',
        };
        assert_eq!(expected, err);

        let err = "1 + ".parse::<Polynomial>().unwrap_err();
        assert_eq!(ParsePolynomialError::UnexpectedEnd(4), err);

        let err = "x^".parse::<Polynomial>().unwrap_err();
        assert_eq!(ParsePolynomialError::UnexpectedEnd(2), err);

        let err = "2 x".parse::<Polynomial>().unwrap_err();
        assert!(matches!(err, ParsePolynomialError::UnexpectedCharacter { found: 'x', .. }));
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        let err = "256*x".parse::<Polynomial>().unwrap_err();
        assert!(matches!(err, ParsePolynomialError::InvalidCoefficient { position: 0, .. }));

        let err = "x^99999999999999999999999".parse::<Polynomial>().unwrap_err();
        assert!(matches!(err, ParsePolynomialError::InvalidDegree { position: 2, .. }));
    }

    #[test]
    fn coefficients_overflowing_a_byte_are_rejected() {
        let err = "200*x + 100*x".parse::<Polynomial>().unwrap_err();
        let expected = PolynomialError::CoefficientOverflow { degree: 1 };
        assert_eq!(ParsePolynomialError::Arithmetic(expected), err);
    }

    #[test]
    fn degrees_too_large_to_store_are_rejected() {
        let err = "x^100000000000000000".parse::<Polynomial>().unwrap_err();
        assert!(matches!(
            err,
            ParsePolynomialError::Arithmetic(PolynomialError::MemoryExhausted(_))
        ));
    }

    #[test]
    fn polynomial_serializes_as_text() {
        let p: Polynomial = "3 + x^4".parse().unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(r#""3 + x^4""#, json);
        assert_eq!(p, serde_json::from_str(&json).unwrap());
        assert!(serde_json::from_str::<Polynomial>(r#""3 +""#).is_err());
    }

    #[proptest]
    fn printed_polynomial_parses_to_itself(
        #[strategy(polynomial_over(251, 30))] polynomial: Polynomial,
    ) {
        let text = polynomial.to_string();
        prop_assert_eq!(polynomial, text.parse::<Polynomial>().unwrap());
    }
}
