//! Error types for sheetfit-format

use sheetfit_model::ModelError;
use thiserror::Error;

/// Result type alias using [`FormatError`]
pub type Result<T> = std::result::Result<T, FormatError>;

/// Errors raised while resolving number formats
#[derive(Debug, Error)]
pub enum FormatError {
    /// The document's format table failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The table refused to create the pattern but does not report it either
    #[error("Could not resolve number format {pattern:?} for locale {locale}")]
    Unresolved { pattern: String, locale: String },
}
