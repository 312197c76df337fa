//! Error types for sheetfit

use sheetfit_format::FormatError;
use sheetfit_layout::FitError;
use sheetfit_model::ModelError;
use thiserror::Error;

/// Result type alias using [`FilterError`]
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors that stop a filter
///
/// Failures scoped to one cell or one sheet do not surface here; they are
/// collected in the filter's report.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A document-level model call failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Number format resolution failed
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Fitting failed
    #[error(transparent)]
    Fit(#[from] FitError),

    /// The run was cancelled
    #[error("Filter run cancelled")]
    Cancelled,

    /// The run passed its deadline
    #[error("Filter run exceeded its deadline")]
    DeadlineExceeded,
}

impl FilterError {
    /// True for cancellation and deadline errors
    pub fn is_cancellation(&self) -> bool {
        matches!(self, FilterError::Cancelled | FilterError::DeadlineExceeded)
    }
}
