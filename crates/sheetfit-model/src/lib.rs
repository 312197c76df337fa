//! # sheetfit-model
//!
//! Document-model facade for the sheetfit post-conversion filters.
//!
//! This crate provides the types the filters read and write:
//! - [`SpreadsheetDocument`] and [`NumberFormats`] - The facade over a loaded document
//! - [`Document`] - A document tagged with its kind, as handed to the filter chain
//! - [`PageStyle`] and [`PageLayout`] - Page style properties
//! - [`Workbook`], [`Worksheet`] - An in-memory document model
//! - [`SharedWorkbook`] - The in-memory model behind the facade
//!
//! ## Example
//!
//! ```rust
//! use sheetfit_model::{CellValue, SharedWorkbook, SpreadsheetDocument, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("A1", 42.0).unwrap();
//! sheet.set_cell_formula("B1", "=A1*2").unwrap();
//!
//! let doc = SharedWorkbook::new(workbook);
//! assert_eq!(doc.sheet_names().unwrap(), vec!["Sheet1".to_string()]);
//! assert_eq!(
//!     doc.cell_value("Sheet1", "A1".parse().unwrap()).unwrap(),
//!     CellValue::Number(42.0)
//! );
//! ```

pub mod cell;
pub mod document;
pub mod error;
pub mod facade;
pub mod geometry;
pub mod number_format;
pub mod page_style;
pub mod shape;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{Cell, CellValue, FormatId};
pub use document::{Document, DocumentKind};
pub use error::{ModelError, Result};
pub use facade::{NumberFormats, SpreadsheetDocument};
pub use geometry::{CellPos, CellRangeAddress, Point, SizeBox, UsedRange};
pub use number_format::{FormatEntry, FormatTable, Locale, GENERAL_PATTERN};
pub use page_style::{Margins, PageLayout, PageStyle, DEFAULT_PAGE_STYLE};
pub use shape::Shape;
pub use workbook::{SharedWorkbook, Workbook};
pub use worksheet::{Worksheet, DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT};

/// Maximum number of rows in a worksheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet
pub const MAX_COLUMNS: u32 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
