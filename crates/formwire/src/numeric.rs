//! Integer coercion for numbers that may arrive as integer, float or
//! exponential-notation literals.
//!
//! Some producers emit large identifiers as `1.774766e+06`.
//! Those must still resolve to the exact integer `1774766`, so every integer
//! attribute is read through [`to_int64`].

use std::borrow::Cow;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    #[error("`{0}` is not a numeric literal")]
    NotNumeric(String),
    #[error("`{0}` is outside the 64-bit integer range")]
    OutOfRange(String),
}

/// A number as a document tree reports it.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberRepr<'a> {
    /// Already an exact integer.
    Int(i64),
    /// A binary floating point value.
    Float(f64),
    /// Literal text still to be parsed.
    Literal(Cow<'a, str>),
}

impl NumberRepr<'_> {
    pub fn to_int64(&self) -> Result<i64, NumericError> {
        match self {
            NumberRepr::Int(i) => Ok(*i),
            NumberRepr::Float(f) => truncate(*f).ok_or_else(|| NumericError::OutOfRange(f.to_string())),
            NumberRepr::Literal(s) => to_int64(s),
        }
    }
}

/// Parses `literal` as an exact integer, falling back to a float parse
/// truncated toward zero.
pub fn to_int64(literal: &str) -> Result<i64, NumericError> {
    let literal = literal.trim();
    if let Ok(i) = literal.parse::<i64>() {
        return Ok(i);
    }
    if !is_decimal_literal(literal) {
        return Err(NumericError::NotNumeric(literal.to_owned()));
    }
    let f: f64 = literal
        .parse()
        .map_err(|_| NumericError::NotNumeric(literal.to_owned()))?;
    truncate(f).ok_or_else(|| NumericError::OutOfRange(literal.to_owned()))
}

// `f64::from_str` also accepts "inf", "NaN" and friends.
fn is_decimal_literal(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
}

fn truncate(f: f64) -> Option<i64> {
    // 2^63 is exactly representable; every f64 below it truncates into range.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !f.is_finite() || f >= LIMIT || f < -LIMIT {
        return None;
    }
    Some(f.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exact_integers_parse_losslessly() {
        assert_eq!(to_int64("1111111"), Ok(1_111_111));
        assert_eq!(to_int64("-42"), Ok(-42));
        assert_eq!(to_int64("9223372036854775807"), Ok(i64::MAX));
        assert_eq!(to_int64("-9223372036854775808"), Ok(i64::MIN));
    }

    #[test]
    fn exponential_literals_resolve_to_integers() {
        assert_eq!(to_int64("1.774766e+06"), Ok(1_774_766));
        assert_eq!(to_int64("1.111111e+06"), Ok(1_111_111));
        assert_eq!(to_int64("1E3"), Ok(1000));
    }

    #[test]
    fn floats_truncate_toward_zero() {
        assert_eq!(to_int64("5.9"), Ok(5));
        assert_eq!(to_int64("-5.9"), Ok(-5));
        assert_eq!(to_int64("0.5"), Ok(0));
    }

    #[test]
    fn rejects_non_numbers() {
        for s in ["", "abc", "inf", "NaN", "infinity", "1,5", "0x10"] {
            assert!(
                matches!(to_int64(s), Err(NumericError::NotNumeric(_))),
                "{s:?}"
            );
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            to_int64("1e19"),
            Err(NumericError::OutOfRange(_))
        ));
        assert!(matches!(
            to_int64("18446744073709551615"),
            Err(NumericError::OutOfRange(_))
        ));
        assert!(NumberRepr::Float(f64::NAN).to_int64().is_err());
    }

    #[test]
    fn repr_dispatch() {
        assert_eq!(NumberRepr::Int(7).to_int64(), Ok(7));
        assert_eq!(NumberRepr::Float(1_774_766.0).to_int64(), Ok(1_774_766));
        assert_eq!(NumberRepr::Literal("12.0".into()).to_int64(), Ok(12));
    }

    proptest! {
        #[test]
        fn integer_text_round_trips(i in any::<i64>()) {
            prop_assert_eq!(to_int64(&i.to_string()), Ok(i));
        }

        #[test]
        fn exponential_text_of_safe_integers_round_trips(i in -(1i64 << 53)..(1i64 << 53)) {
            let literal = format!("{:e}", i as f64);
            prop_assert_eq!(to_int64(&literal), Ok(i));
        }
    }
}
