//! Display-format classifier for "General"-formatted numbers
//!
//! Long numbers in the General format render poorly once a document is
//! converted: wide integers overflow their column and long fractions lose
//! their tail arbitrarily. The classifier picks a scientific or a
//! truncated-decimal pattern for such values and leaves everything else
//! alone.
//!
//! # Example
//!
//! ```rust
//! use sheetfit_format::{classify, FormatDecision};
//!
//! assert_eq!(classify(123.0), FormatDecision::Unchanged);
//! assert_eq!(
//!     classify(0.123456789012345),
//!     FormatDecision::TruncatedDecimal("0.#########".into())
//! );
//! ```

use std::fmt;

use sheetfit_model::{CellValue, FormatEntry};

use crate::shape::DecimalShape;

/// Pattern used for scientific notation
pub const SCIENTIFIC_PATTERN: &str = "0.#####E+00";

/// Outcome of classifying one value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "pattern"))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FormatDecision {
    /// Keep the General format
    Unchanged,
    /// Switch to a scientific-notation pattern
    Scientific(String),
    /// Switch to a decimal pattern limiting the shown fraction digits
    TruncatedDecimal(String),
}

impl FormatDecision {
    /// The new pattern, if the format changes
    pub fn pattern(&self) -> Option<&str> {
        match self {
            FormatDecision::Unchanged => None,
            FormatDecision::Scientific(p) | FormatDecision::TruncatedDecimal(p) => Some(p),
        }
    }

    /// True when the format changes
    pub fn is_change(&self) -> bool {
        !matches!(self, FormatDecision::Unchanged)
    }
}

impl fmt::Display for FormatDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatDecision::Unchanged => f.write_str("unchanged"),
            FormatDecision::Scientific(p) => write!(f, "scientific {p}"),
            FormatDecision::TruncatedDecimal(p) => write!(f, "truncated {p}"),
        }
    }
}

/// Thresholds of the classification policy
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassifierOptions {
    /// Integer-part digit count from which a value goes scientific (default: 12)
    pub scientific_digits: u32,
    /// Magnitude below which long values go scientific (default: 0.0001)
    pub small_magnitude: f64,
    /// Total digit count from which a value counts as long (default: 11)
    pub long_number_digits: u32,
    /// Significant digits kept by a truncated decimal (default: 10)
    pub significant_digits: u32,
    /// Pattern written for scientific notation
    pub scientific_pattern: String,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            scientific_digits: 12,
            small_magnitude: 0.0001,
            long_number_digits: 11,
            significant_digits: 10,
            scientific_pattern: SCIENTIFIC_PATTERN.to_string(),
        }
    }
}

/// Classifies numbers against a [`ClassifierOptions`] policy
#[derive(Debug, Clone, Default)]
pub struct FormatClassifier {
    options: ClassifierOptions,
}

impl FormatClassifier {
    pub fn new(options: ClassifierOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// Decide the display format of a value
    ///
    /// First match wins:
    /// 1. at least `scientific_digits` digits before the point: scientific
    /// 2. below `small_magnitude` with at least `long_number_digits` digits:
    ///    scientific
    /// 3. a fraction with at least `long_number_digits` digits: `"0."`
    ///    followed by one `#` per fraction digit that fits in
    ///    `significant_digits`
    /// 4. otherwise unchanged
    ///
    /// NaN and infinities are always unchanged.
    pub fn classify(&self, value: f64) -> FormatDecision {
        match DecimalShape::from_f64(value) {
            Some(shape) => self.classify_shape(value, &shape),
            None => FormatDecision::Unchanged,
        }
    }

    /// Decide the display format from a precomputed shape
    pub fn classify_shape(&self, value: f64, shape: &DecimalShape) -> FormatDecision {
        let opts = &self.options;

        if shape.digits_before_decimal >= opts.scientific_digits {
            return FormatDecision::Scientific(opts.scientific_pattern.clone());
        }
        if value.abs() < opts.small_magnitude && shape.total_digits >= opts.long_number_digits {
            return FormatDecision::Scientific(opts.scientific_pattern.clone());
        }
        if !shape.is_integer && shape.total_digits >= opts.long_number_digits {
            let overflow = shape.total_digits.saturating_sub(opts.significant_digits);
            let hashes = shape.digits_after_decimal.saturating_sub(overflow) as usize;
            return FormatDecision::TruncatedDecimal(format!("0.{}", "#".repeat(hashes)));
        }

        FormatDecision::Unchanged
    }

    /// Decide the display format of a cell
    ///
    /// Only plain numbers whose current format is literally "General" are
    /// classified; formulas, text and other formats are left unchanged.
    pub fn classify_cell(&self, value: &CellValue, current: &FormatEntry) -> FormatDecision {
        if !current.is_general() {
            return FormatDecision::Unchanged;
        }
        match value.as_number() {
            Some(n) => self.classify(n),
            None => FormatDecision::Unchanged,
        }
    }
}

/// Classify a value with the default policy
pub fn classify(value: f64) -> FormatDecision {
    FormatClassifier::default().classify(value)
}
