//! Fitting options

use sheetfit_model::{MAX_COLUMNS, MAX_ROWS};

/// Options for fitting a sheet onto one page
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FitOptions {
    /// Floor for each counted page margin, in 1/100 mm (default: 2100)
    pub min_margin: i32,
    /// Floor for the header and footer heights, in 1/100 mm (default: 1200)
    pub min_header_footer_height: i32,
    /// Count formula cells with an empty result toward the used range
    /// (default: true)
    ///
    /// The host reports such cells as used although they print nothing. When
    /// false, trailing rows and columns holding only such cells are trimmed.
    pub count_blank_formula_results: bool,
    /// Number of columns the range may grow to (default: sheet limit)
    pub max_columns: u32,
    /// Number of rows the range may grow to (default: sheet limit)
    pub max_rows: u32,
    /// Growth steps between two interruption checks (default: 256)
    pub check_interval: u32,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            min_margin: 2100,
            min_header_footer_height: 1200,
            count_blank_formula_results: true,
            max_columns: MAX_COLUMNS,
            max_rows: MAX_ROWS,
            check_interval: 256,
        }
    }
}
