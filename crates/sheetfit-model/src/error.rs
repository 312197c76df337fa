//! Error types for sheetfit-model

use thiserror::Error;

/// Result type alias using [`ModelError`]
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised by a document-model facade
#[derive(Debug, Error)]
pub enum ModelError {
    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Page style not found by name
    #[error("Page style not found: {0}")]
    PageStyleNotFound(String),

    /// Invalid A1-style cell address
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Cell position outside the sheet limits
    #[error("Cell ({col}, {row}) out of bounds")]
    CellOutOfBounds { col: u32, row: u32 },

    /// No number format registered under this key
    #[error("Number format not found: {0}")]
    FormatNotFound(i32),

    /// `add_new` called for a pattern that already exists for the locale
    #[error("Number format already exists: {pattern} ({locale})")]
    DuplicateFormat { pattern: String, locale: String },

    /// Pattern rejected by the format table
    #[error("Invalid number format pattern: {0:?}")]
    InvalidPattern(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// The model refused a property write
    #[error("Property {property} rejected: {reason}")]
    PropertyRejected {
        property: &'static str,
        reason: String,
    },

    /// A lock guarding the model was poisoned by a panicking writer
    #[error("Document model lock poisoned")]
    Poisoned,

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl ModelError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ModelError::Other(msg.into())
    }

    /// Create a [`ModelError::PropertyRejected`]
    pub fn rejected<S: Into<String>>(property: &'static str, reason: S) -> Self {
        ModelError::PropertyRejected {
            property,
            reason: reason.into(),
        }
    }
}
