//! Error types for sheetfit-layout

use sheetfit_model::ModelError;
use thiserror::Error;

/// Result type alias using [`FitError`]
pub type Result<T> = std::result::Result<T, FitError>;

/// Errors raised while fitting a sheet
#[derive(Debug, Error)]
pub enum FitError {
    /// A document-model call failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The caller interrupted the fit
    #[error("Fitting sheet {sheet} was interrupted")]
    Interrupted { sheet: String },
}
