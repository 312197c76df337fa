//! # sheetfit-format
//!
//! Numeric display-format classification for spreadsheet cells.
//!
//! - [`DecimalShape`] - Digit counts of a number's plain decimal form
//! - [`FormatClassifier`] - Picks a scientific or truncated-decimal pattern
//!   for long "General" numbers
//! - [`FormatRegistry`] - Resolves a pattern to a format key, creating it
//!   only when the document does not have it yet

pub mod classifier;
pub mod error;
pub mod registry;
pub mod shape;

pub use classifier::{
    classify, ClassifierOptions, FormatClassifier, FormatDecision, SCIENTIFIC_PATTERN,
};
pub use error::{FormatError, Result};
pub use registry::FormatRegistry;
pub use shape::DecimalShape;
