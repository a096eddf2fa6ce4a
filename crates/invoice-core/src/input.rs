//! # Input Module
//!
//! Coercion of raw form input into domain values.
//!
//! ## Coercion Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      What the form may send                             │
//! │                                                                         │
//! │   "12"        ──► 12                                                   │
//! │   " 2.50 "    ──► 2.50                                                 │
//! │   "3 boxes"   ──► 3        (leading number, rest ignored)              │
//! │   "1e3"       ──► 1000                                                 │
//! │   ""          ──► 0                                                    │
//! │   "other"     ──► 0        (the tax selector's "Other" option)         │
//! │   "-5"        ──► 0        (negatives never contribute)                │
//! │   "1e30"      ──► Decimal::MAX (out of range saturates)                │
//! │                                                                         │
//! │   No error is ever raised: bad input degrades to zero contribution.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Date format used by `<input type="date">`.
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Clamps negative values to zero.
#[inline]
pub fn non_negative(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        Decimal::ZERO
    } else {
        value
    }
}

/// Parses a numeric form field leniently.
///
/// ## Rules
/// - Leading whitespace is skipped
/// - Takes the longest numeric prefix: sign, digits, fraction, exponent
/// - No digits or a negative result → `0`
/// - A positive literal beyond the Decimal range → [`Decimal::MAX`]
///
/// ## Example
/// ```rust
/// use invoice_core::input::parse_number;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_number("2.5kg"), Decimal::new(25, 1));
/// assert_eq!(parse_number("abc"), Decimal::ZERO);
/// assert_eq!(parse_number("-4"), Decimal::ZERO);
/// assert_eq!(parse_number("1e30"), Decimal::MAX);
/// ```
pub fn parse_number(raw: &str) -> Decimal {
    let Some(literal) = numeric_prefix(raw.trim_start()) else {
        return Decimal::ZERO;
    };

    let (mantissa, exponent) = match literal.find(['e', 'E']) {
        Some(at) => (&literal[..at], parse_exponent(&literal[at + 1..])),
        None => (literal, 0),
    };

    // The prefix is syntactically valid, so a failure here is overflow
    let saturated = if mantissa.starts_with('-') {
        Decimal::ZERO
    } else {
        Decimal::MAX
    };

    parse_mantissa(mantissa)
        .and_then(|value| scale_by_power_of_ten(value, exponent))
        .map(non_negative)
        .unwrap_or(saturated)
}

/// Exponent digits too long for i32 clamp to just past the Decimal range.
fn parse_exponent(digits: &str) -> i32 {
    digits.parse::<i32>().unwrap_or(if digits.starts_with('-') { -29 } else { 29 })
}

/// Parses `[+-]digits[.digits]`, tolerating a missing integer part.
fn parse_mantissa(mantissa: &str) -> Option<Decimal> {
    let (negative, unsigned) = match mantissa.as_bytes().first() {
        Some(b'-') => (true, &mantissa[1..]),
        Some(b'+') => (false, &mantissa[1..]),
        _ => (false, mantissa),
    };

    let value = if unsigned.starts_with('.') {
        Decimal::from_str(&format!("0{}", unsigned)).ok()?
    } else {
        Decimal::from_str(unsigned).ok()?
    };

    Some(if negative { -value } else { value })
}

/// `value × 10^exponent`, or `None` on overflow.
fn scale_by_power_of_ten(value: Decimal, exponent: i32) -> Option<Decimal> {
    // Decimal holds at most 28 significant digits either side
    if value.is_zero() || exponent < -28 {
        return Some(if exponent < -28 { Decimal::ZERO } else { value });
    }
    if exponent > 28 {
        return None;
    }

    let ten = Decimal::TEN;
    let mut scaled = value;
    if exponent >= 0 {
        for _ in 0..exponent {
            scaled = scaled.checked_mul(ten)?;
        }
    } else {
        for _ in 0..exponent.unsigned_abs() {
            scaled = scaled.checked_div(ten)?;
        }
    }
    Some(scaled)
}

/// Returns the longest prefix of `s` that forms a decimal literal.
fn numeric_prefix(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        // "5." is a valid literal but Decimal wants digits after the dot
        end = if frac_end > frac_start { frac_end } else { end };
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    Some(&s[..end])
}

/// Parses a date field (`YYYY-MM-DD`). Anything else is treated as unset.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), FORM_DATE_FORMAT).ok()
}

/// Whether a text field should fall back to its placeholder.
#[inline]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_plain() {
        assert_eq!(parse_number("12"), Decimal::from(12));
        assert_eq!(parse_number("0.01"), Decimal::new(1, 2));
        assert_eq!(parse_number("  2.50 "), Decimal::new(250, 2));
        assert_eq!(parse_number("+7"), Decimal::from(7));
        assert_eq!(parse_number(".5"), Decimal::new(5, 1));
        assert_eq!(parse_number("5."), Decimal::from(5));
    }

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number("3 boxes"), Decimal::from(3));
        assert_eq!(parse_number("10%"), Decimal::from(10));
        assert_eq!(parse_number("1.2.3"), Decimal::new(12, 1));
    }

    #[test]
    fn test_parse_number_exponent() {
        assert_eq!(parse_number("1e3"), Decimal::from(1000));
        assert_eq!(parse_number("2.5E-1"), Decimal::new(25, 2));
        // Dangling exponent marker is ignored
        assert_eq!(parse_number("4e"), Decimal::from(4));
    }

    #[test]
    fn test_parse_number_out_of_range_saturates() {
        assert_eq!(parse_number("1e30"), Decimal::MAX);
        assert_eq!(parse_number("1e99999999999"), Decimal::MAX);
        assert_eq!(parse_number("123456789012345678901234567890"), Decimal::MAX);
        assert_eq!(parse_number("79228162514264337593543950335"), Decimal::MAX);
        assert_eq!(parse_number("1e28"), Decimal::from_i128_with_scale(10_i128.pow(28), 0));
        assert_eq!(parse_number("-1e30"), Decimal::ZERO);
        assert_eq!(parse_number("1e-99999999999"), Decimal::ZERO);
        assert_eq!(parse_number("0e99"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_number_garbage_is_zero() {
        assert_eq!(parse_number(""), Decimal::ZERO);
        assert_eq!(parse_number("   "), Decimal::ZERO);
        assert_eq!(parse_number("other"), Decimal::ZERO);
        assert_eq!(parse_number("."), Decimal::ZERO);
        assert_eq!(parse_number("-"), Decimal::ZERO);
        assert_eq!(parse_number("NaN"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_number_negative_is_zero() {
        assert_eq!(parse_number("-5"), Decimal::ZERO);
        assert_eq!(parse_number("-0.01"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-09"), NaiveDate::from_ymd_opt(2024, 3, 9));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("09/03/2024"), None);
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t"));
        assert!(!is_blank(" Acme "));
    }
}
