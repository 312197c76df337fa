//! # sheetfit
//!
//! Post-conversion filters for spreadsheet documents.
//!
//! After an office document has been converted, a chain of filters inspects
//! the live document model and rewrites presentation properties before the
//! document is written out:
//!
//! - [`NumberFormatFilter`] - Gives long "General" numbers a scientific or
//!   truncated-decimal format
//! - [`SinglePageFilter`] - Sizes page styles so each visible sheet prints on
//!   one page, including its floating graphics
//!
//! Documents of another kind pass through untouched.
//!
//! ## Example
//!
//! ```rust
//! use sheetfit::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("A1", 100000000000.0).unwrap();
//! sheet.set_cell_value("B2", 0.123456789012345).unwrap();
//!
//! let doc = SharedWorkbook::new(workbook);
//! let chain = FilterChain::from_options(&ChainOptions::default());
//! let report = chain
//!     .apply(&Document::Spreadsheet(&doc), &FilterContext::new())
//!     .unwrap();
//!
//! assert!(report.is_clean());
//! assert_eq!(report.report("number-format").unwrap().cells_changed, 2);
//! ```

pub mod cancel;
pub mod error;
pub mod filter;
pub mod number_format_filter;
pub mod options;
mod parallel;
pub mod prelude;
pub mod report;
pub mod single_page_filter;

pub use cancel::CancelToken;
pub use error::{FilterError, Result};
pub use filter::{Filter, FilterChain, FilterContext};
pub use number_format_filter::NumberFormatFilter;
pub use options::{
    ChainOptions, NumberFormatOptions, Parallelism, SharedStylePolicy, SinglePageOptions,
};
pub use report::{ChainReport, FilterReport, ItemFailure};
pub use single_page_filter::SinglePageFilter;

// Re-export model types
pub use sheetfit_model::{
    CellPos, CellValue, Document, DocumentKind, FormatId, Locale, ModelError, PageStyle,
    SharedWorkbook, SizeBox, SpreadsheetDocument, Workbook, Worksheet,
};

// Re-export the core algorithms
pub use sheetfit_format::{
    classify, ClassifierOptions, DecimalShape, FormatClassifier, FormatDecision,
};
pub use sheetfit_layout::{FitOptions, PageFitter, SheetFit, SheetMeasure};
