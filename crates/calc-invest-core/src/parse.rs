//! Lenient parsing of free-text numeric fields.
//!
//! Form fields are forgiving: text that does not start with a number reads
//! as zero, and a valid numeric prefix is kept (`"12abc"` reads as 12). A
//! comma is accepted as the decimal separator. A well-formed number that
//! does not fit a `Decimal` is an error rather than a silent truncation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::CalcInvestError;
use crate::types::{Months, MAX_TERM_MONTHS};
use crate::CalcInvestResult;

/// A holding term read from free text, with a note when it had to be
/// adjusted to a whole non-negative number of months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTerm {
    pub months: Months,
    pub adjustment: Option<String>,
}

/// Parse a decimal, falling back to the longest numeric prefix, then zero.
///
/// Fails only when the whole text is a number that `Decimal` cannot hold,
/// such as `"1e40"`, `"1e-40"` or a 32-digit integer.
pub fn parse_lenient(text: &str) -> CalcInvestResult<Decimal> {
    let normalized = text.trim().replace(',', ".");
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }

    if let Ok(v) = Decimal::from_str(&normalized) {
        return Ok(v);
    }
    if let Ok(v) = Decimal::from_scientific(&normalized) {
        return Ok(v);
    }
    if is_numeric_literal(&normalized) {
        return Err(CalcInvestError::InvalidInput {
            field: "number".into(),
            reason: format!("'{}' cannot be represented as a decimal", text.trim()),
        });
    }

    let prefix = numeric_prefix(&normalized);
    Ok(Decimal::from_str(prefix).unwrap_or(Decimal::ZERO))
}

/// Parse a term in months.
///
/// Negative terms clamp to 0 and fractional terms are floored, which is the
/// number of whole periods the projection loop would run anyway. Terms above
/// the engine limit are passed through and rejected later by validation.
pub fn parse_term_months(text: &str) -> CalcInvestResult<ParsedTerm> {
    let raw = parse_lenient(text)?;

    if raw.is_sign_negative() && !raw.is_zero() {
        log::warn!("negative term {raw} clamped to 0 months");
        return Ok(ParsedTerm {
            months: 0,
            adjustment: Some(format!("Negative term {raw} clamped to 0 months")),
        });
    }

    let whole = raw.trunc();
    let months = whole.to_u32().unwrap_or(MAX_TERM_MONTHS + 1);
    let adjustment = if whole != raw {
        log::warn!("fractional term {raw} floored to {months} months");
        Some(format!("Fractional term {raw} floored to {months} months"))
    } else {
        None
    };

    Ok(ParsedTerm { months, adjustment })
}

/// Whole text shaped like `[+-]digits[.digits][(e|E)[+-]digits]`, digits
/// required on both sides of the point.
fn is_numeric_literal(text: &str) -> bool {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(at) => (&text[..at], Some(&text[at + 1..])),
        None => (text, None),
    };

    let unsigned = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    let mantissa_ok = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => all_digits(int_part) && all_digits(frac_part),
        None => all_digits(unsigned),
    };

    let exponent_ok = exponent.map_or(true, |exp| {
        all_digits(exp.strip_prefix(['+', '-']).unwrap_or(exp))
    });

    mantissa_ok && exponent_ok
}

/// Longest leading slice shaped like `[+-]digits[.digits]`.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut valid_end = if end > digits_start { end } else { 0 };

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            valid_end = frac_end;
        }
    }

    &text[..valid_end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_lenient("1000").unwrap(), dec!(1000));
        assert_eq!(parse_lenient(" 14.90 ").unwrap(), dec!(14.90));
        assert_eq!(parse_lenient("-0.25").unwrap(), dec!(-0.25));
        assert_eq!(parse_lenient("1e3").unwrap(), dec!(1000));
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(parse_lenient("14,90").unwrap(), dec!(14.90));
    }

    #[test]
    fn test_invalid_reads_as_zero() {
        assert_eq!(parse_lenient("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_lenient("abc").unwrap(), Decimal::ZERO);
        assert_eq!(parse_lenient("-").unwrap(), Decimal::ZERO);
        assert_eq!(parse_lenient(".").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_numeric_prefix_is_kept() {
        assert_eq!(parse_lenient("12abc").unwrap(), dec!(12));
        assert_eq!(parse_lenient("3.5%").unwrap(), dec!(3.5));
        assert_eq!(parse_lenient("7.").unwrap(), dec!(7));
    }

    #[test]
    fn test_term_whole() {
        let t = parse_term_months("9").unwrap();
        assert_eq!(t.months, 9);
        assert!(t.adjustment.is_none());
    }

    #[test]
    fn test_term_fractional_is_floored() {
        let t = parse_term_months("9.7").unwrap();
        assert_eq!(t.months, 9);
        assert!(t.adjustment.is_some());
    }

    #[test]
    fn test_term_negative_clamps() {
        let t = parse_term_months("-3").unwrap();
        assert_eq!(t.months, 0);
        assert!(t.adjustment.is_some());
    }

    #[test]
    fn test_term_invalid_is_zero() {
        let t = parse_term_months("twelve").unwrap();
        assert_eq!(t.months, 0);
        assert!(t.adjustment.is_none());
    }

    #[test]
    fn test_out_of_range_number_is_an_error() {
        assert!(matches!(
            parse_lenient("1e40"),
            Err(CalcInvestError::InvalidInput { .. })
        ));
        assert!(matches!(
            parse_lenient("99999999999999999999999999999999"),
            Err(CalcInvestError::InvalidInput { .. })
        ));
        assert!(parse_term_months("1e40").is_err());
    }

    #[test]
    fn test_numeric_literal_shape() {
        assert!(is_numeric_literal("99999999999999999999999999999999"));
        assert!(is_numeric_literal("-1.5E+40"));
        assert!(!is_numeric_literal("12abc"));
        assert!(!is_numeric_literal("1e"));
        assert!(!is_numeric_literal("7."));
        assert!(!is_numeric_literal("."));
        assert!(!is_numeric_literal("-"));
    }
}
