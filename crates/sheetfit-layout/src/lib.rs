//! # sheetfit-layout
//!
//! Computes the smallest page that prints a sheet on one sheet of paper.
//!
//! The fitter sums the widths and heights of the sheet's used columns and
//! rows, compares the result with the extent of the floating shapes, grows
//! the range one column or row at a time until it covers them, then adds
//! header, footer and margin allowances.
//!
//! - [`PageFitter`] - Measures sheets and writes single-page layouts
//! - [`SheetMeasure`] and [`SheetFit`] - Per-sheet results
//! - [`Allowances`] - Space reserved around the content
//! - [`FitOptions`] - Minimums, limits and used-range handling

pub mod allowance;
pub mod error;
pub mod fitter;
pub mod measure;
pub mod options;

pub use allowance::Allowances;
pub use error::{FitError, Result};
pub use fitter::{PageFitter, SheetFit};
pub use measure::{graphics_size, measure_sheet, printable_range, used_size, SheetMeasure};
pub use options::FitOptions;
