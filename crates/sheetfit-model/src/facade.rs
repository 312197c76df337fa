//! The document-model facade
//!
//! Filters never own document objects. They address sheets and page styles by
//! name and issue one query or command per call, so any backend (the
//! in-memory [`SharedWorkbook`](crate::SharedWorkbook), a remote office
//! process) can sit behind these traits.
//!
//! All methods take `&self`: implementations use interior mutability, which
//! lets per-sheet work run on several threads when
//! [`SpreadsheetDocument::supports_concurrent_access`] allows it.

use crate::cell::{CellValue, FormatId};
use crate::error::Result;
use crate::geometry::{CellPos, CellRangeAddress, UsedRange};
use crate::number_format::{FormatEntry, Locale};
use crate::page_style::{PageLayout, PageStyle};
use crate::shape::Shape;

/// Access to a spreadsheet document
pub trait SpreadsheetDocument: Send + Sync {
    /// Sheet names in document order
    fn sheet_names(&self) -> Result<Vec<String>>;

    /// Whether the sheet is visible
    fn is_sheet_visible(&self, sheet: &str) -> Result<bool>;

    /// End of the sheet's used area
    fn used_range(&self, sheet: &str) -> Result<UsedRange>;

    /// Width of one column, in 1/100 mm
    fn column_width(&self, sheet: &str, col: u32) -> Result<i32>;

    /// Height of one row, in 1/100 mm
    fn row_height(&self, sheet: &str, row: u32) -> Result<i32>;

    /// Floating shapes on the sheet's draw page
    fn shapes(&self, sheet: &str) -> Result<Vec<Shape>>;

    /// Replace the sheet's print areas; an empty list prints the whole sheet
    fn set_print_areas(&self, sheet: &str, areas: &[CellRangeAddress]) -> Result<()>;

    /// Name of the page style the sheet references
    fn page_style_name(&self, sheet: &str) -> Result<String>;

    /// Current properties of a page style
    fn page_style(&self, name: &str) -> Result<PageStyle>;

    /// Write size, margins, centering and scaling of a page style
    fn set_page_layout(&self, name: &str, layout: &PageLayout) -> Result<()>;

    /// Value of one cell
    fn cell_value(&self, sheet: &str, pos: CellPos) -> Result<CellValue>;

    /// Number format key of one cell
    fn cell_format(&self, sheet: &str, pos: CellPos) -> Result<FormatId>;

    /// Set the number format key of one cell
    fn set_cell_format(&self, sheet: &str, pos: CellPos, format: FormatId) -> Result<()>;

    /// The document's number format table
    fn number_formats(&self) -> &dyn NumberFormats;

    /// Whether calls may be issued from several threads at once
    fn supports_concurrent_access(&self) -> bool {
        true
    }
}

/// Access to a document's number format table
pub trait NumberFormats: Send + Sync {
    /// Pattern and locale of a format
    fn get_by_key(&self, id: FormatId) -> Result<FormatEntry>;

    /// Key of an existing `(pattern, locale)` entry, if any
    fn query_key(&self, pattern: &str, locale: &Locale) -> Result<Option<FormatId>>;

    /// Register a new entry. Not idempotent: adding an existing entry fails
    /// or duplicates it depending on the backend.
    fn add_new(&self, pattern: &str, locale: &Locale) -> Result<FormatId>;
}
