//! Decimal shape of a floating-point value

use std::fmt;

/// Digit counts of a number's shortest plain decimal form
///
/// The value is written as the shortest decimal string that round-trips to
/// the same `f64`, in plain notation (never with an exponent) and with
/// trailing fractional zeros stripped. Every digit character counts toward
/// [`total_digits`](Self::total_digits), including the `0` before the point
/// of a value below one and any zeros right after the point.
///
/// ```
/// use sheetfit_format::DecimalShape;
///
/// let shape = DecimalShape::from_f64(0.000112233456789).unwrap();
/// assert_eq!(shape.total_digits, 16);
/// assert_eq!(shape.digits_before_decimal, 1);
/// assert_eq!(shape.digits_after_decimal, 15);
/// assert!(!shape.is_integer);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecimalShape {
    pub total_digits: u32,
    pub digits_before_decimal: u32,
    pub digits_after_decimal: u32,
    pub is_integer: bool,
    pub is_negative: bool,
}

impl DecimalShape {
    /// Derive the shape of a value; `None` for NaN and infinities
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        // `Display` for f64 prints the shortest round-trip form without an
        // exponent, and never a trailing ".0"
        let plain = format!("{}", value.abs());
        Some(Self::from_plain(&plain, value < 0.0))
    }

    fn from_plain(plain: &str, is_negative: bool) -> Self {
        let (int_part, frac_part) = match plain.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
            None => (plain, ""),
        };

        let digits_before_decimal = count_digits(int_part);
        let digits_after_decimal = count_digits(frac_part);

        Self {
            total_digits: digits_before_decimal + digits_after_decimal,
            digits_before_decimal,
            digits_after_decimal,
            is_integer: digits_after_decimal == 0,
            is_negative,
        }
    }
}

impl fmt::Display for DecimalShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} digits ({} before, {} after){}",
            self.total_digits,
            self.digits_before_decimal,
            self.digits_after_decimal,
            if self.is_negative { ", negative" } else { "" }
        )
    }
}

fn count_digits(s: &str) -> u32 {
    s.bytes().filter(u8::is_ascii_digit).count() as u32
}
