//! Workbook type and its shared, thread-safe facade

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cell::{CellValue, FormatId};
use crate::error::{ModelError, Result};
use crate::facade::{NumberFormats, SpreadsheetDocument};
use crate::geometry::{CellPos, CellRangeAddress, UsedRange};
use crate::number_format::{FormatEntry, FormatTable, Locale};
use crate::page_style::{PageLayout, PageStyle, DEFAULT_PAGE_STYLE};
use crate::shape::Shape;
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// Holds the worksheets, the named page styles they reference, and the
/// number format table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
    /// Page styles by name
    #[cfg_attr(feature = "serde", serde(default = "default_page_styles"))]
    page_styles: BTreeMap<String, PageStyle>,
    /// Number format table
    #[cfg_attr(feature = "serde", serde(default))]
    number_formats: FormatTable,
}

impl Workbook {
    /// Create a new workbook with one worksheet and the default page style
    pub fn new() -> Self {
        let mut wb = Self::empty();
        wb.worksheets.push(Worksheet::new("Sheet1"));
        wb
    }

    /// Create a workbook with no worksheets
    pub fn empty() -> Self {
        Self {
            worksheets: Vec::new(),
            page_styles: default_page_styles(),
            number_formats: FormatTable::new(),
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Get a mutable worksheet by name
    pub fn worksheet_by_name_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.worksheets.iter_mut().find(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new worksheet with specified name and return its index
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name, None)?;
        self.worksheets.push(Worksheet::new(name));
        Ok(self.worksheets.len() - 1)
    }

    /// Add an existing worksheet to the workbook
    pub fn add_existing_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        self.validate_sheet_name(worksheet.name(), None)?;
        self.worksheets.push(worksheet);
        Ok(self.worksheets.len() - 1)
    }

    /// Remove a worksheet by index
    pub fn remove_worksheet(&mut self, index: usize) -> Option<Worksheet> {
        if index < self.worksheets.len() {
            Some(self.worksheets.remove(index))
        } else {
            None
        }
    }

    /// Rename a worksheet
    pub fn rename_worksheet(&mut self, index: usize, new_name: &str) -> Result<()> {
        if index >= self.worksheets.len() {
            return Err(ModelError::other(format!("Sheet index {index} out of bounds")));
        }
        self.validate_sheet_name(new_name, Some(index))?;
        self.worksheets[index].set_name(new_name);
        Ok(())
    }

    // ==================== Page Styles ====================

    /// Get a page style by name
    pub fn page_style(&self, name: &str) -> Option<&PageStyle> {
        self.page_styles.get(name)
    }

    /// Get a mutable page style by name
    pub fn page_style_mut(&mut self, name: &str) -> Option<&mut PageStyle> {
        self.page_styles.get_mut(name)
    }

    /// Add or replace a page style
    pub fn set_page_style<S: Into<String>>(&mut self, name: S, style: PageStyle) {
        self.page_styles.insert(name.into(), style);
    }

    /// Iterate over page styles by name
    pub fn page_styles(&self) -> impl Iterator<Item = (&str, &PageStyle)> {
        self.page_styles.iter().map(|(n, s)| (n.as_str(), s))
    }

    // ==================== Number Formats ====================

    /// The number format table
    pub fn number_formats(&self) -> &FormatTable {
        &self.number_formats
    }

    /// The number format table (mutable)
    pub fn number_formats_mut(&mut self) -> &mut FormatTable {
        &mut self.number_formats
    }

    /// Validate a sheet name, optionally excluding a sheet from duplicate check
    fn validate_sheet_name(&self, name: &str, exclude_index: Option<usize>) -> Result<()> {
        if name.is_empty() {
            return Err(ModelError::InvalidSheetName(
                "Sheet name cannot be empty".into(),
            ));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(ModelError::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(ModelError::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        // Sheet names are case-insensitive
        let name_lower = name.to_lowercase();
        for (i, ws) in self.worksheets.iter().enumerate() {
            if Some(i) != exclude_index && ws.name().to_lowercase() == name_lower {
                return Err(ModelError::DuplicateSheetName(name.into()));
            }
        }

        Ok(())
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

fn default_page_styles() -> BTreeMap<String, PageStyle> {
    let mut styles = BTreeMap::new();
    styles.insert(DEFAULT_PAGE_STYLE.to_string(), PageStyle::default());
    styles
}

/// A [`Workbook`] behind a read/write lock, implementing the document facade
///
/// ```
/// use sheetfit_model::{SharedWorkbook, SpreadsheetDocument, Workbook};
///
/// let mut wb = Workbook::new();
/// wb.worksheet_mut(0).unwrap().set_cell_value("B3", 7.0).unwrap();
///
/// let doc = SharedWorkbook::new(wb);
/// let used = doc.used_range("Sheet1").unwrap();
/// assert_eq!((used.end_column, used.end_row), (1, 2));
/// ```
#[derive(Debug)]
pub struct SharedWorkbook {
    inner: RwLock<Workbook>,
    concurrent: bool,
}

impl SharedWorkbook {
    /// Wrap a workbook
    pub fn new(workbook: Workbook) -> Self {
        Self {
            inner: RwLock::new(workbook),
            concurrent: true,
        }
    }

    /// Declare whether callers may use this model from several threads
    pub fn with_concurrent_access(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    /// Unwrap the workbook
    pub fn into_inner(self) -> Result<Workbook> {
        self.inner.into_inner().map_err(|_| ModelError::Poisoned)
    }

    /// Clone the current workbook state
    pub fn snapshot(&self) -> Result<Workbook> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Workbook>> {
        self.inner.read().map_err(|_| ModelError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Workbook>> {
        self.inner.write().map_err(|_| ModelError::Poisoned)
    }

    fn with_sheet<T>(&self, sheet: &str, f: impl FnOnce(&Worksheet) -> T) -> Result<T> {
        let wb = self.read()?;
        let ws = wb
            .worksheet_by_name(sheet)
            .ok_or_else(|| ModelError::SheetNotFound(sheet.to_string()))?;
        Ok(f(ws))
    }

    fn with_sheet_mut<T>(
        &self,
        sheet: &str,
        f: impl FnOnce(&mut Worksheet) -> Result<T>,
    ) -> Result<T> {
        let mut wb = self.write()?;
        let ws = wb
            .worksheet_by_name_mut(sheet)
            .ok_or_else(|| ModelError::SheetNotFound(sheet.to_string()))?;
        f(ws)
    }
}

impl From<Workbook> for SharedWorkbook {
    fn from(workbook: Workbook) -> Self {
        Self::new(workbook)
    }
}

impl SpreadsheetDocument for SharedWorkbook {
    fn sheet_names(&self) -> Result<Vec<String>> {
        Ok(self
            .read()?
            .worksheets()
            .map(|ws| ws.name().to_string())
            .collect())
    }

    fn is_sheet_visible(&self, sheet: &str) -> Result<bool> {
        self.with_sheet(sheet, |ws| ws.is_visible())
    }

    fn used_range(&self, sheet: &str) -> Result<UsedRange> {
        self.with_sheet(sheet, |ws| ws.used_range())
    }

    fn column_width(&self, sheet: &str, col: u32) -> Result<i32> {
        self.with_sheet(sheet, |ws| ws.column_width(col))
    }

    fn row_height(&self, sheet: &str, row: u32) -> Result<i32> {
        self.with_sheet(sheet, |ws| ws.row_height(row))
    }

    fn shapes(&self, sheet: &str) -> Result<Vec<Shape>> {
        self.with_sheet(sheet, |ws| ws.shapes().to_vec())
    }

    fn set_print_areas(&self, sheet: &str, areas: &[CellRangeAddress]) -> Result<()> {
        self.with_sheet_mut(sheet, |ws| {
            ws.set_print_areas(areas.to_vec());
            Ok(())
        })
    }

    fn page_style_name(&self, sheet: &str) -> Result<String> {
        self.with_sheet(sheet, |ws| ws.page_style().to_string())
    }

    fn page_style(&self, name: &str) -> Result<PageStyle> {
        self.read()?
            .page_style(name)
            .cloned()
            .ok_or_else(|| ModelError::PageStyleNotFound(name.to_string()))
    }

    fn set_page_layout(&self, name: &str, layout: &PageLayout) -> Result<()> {
        if layout.size.width <= 0 || layout.size.height <= 0 {
            return Err(ModelError::rejected(
                "Size",
                format!("page size {} must be positive", layout.size),
            ));
        }
        let mut wb = self.write()?;
        let style = wb
            .page_style_mut(name)
            .ok_or_else(|| ModelError::PageStyleNotFound(name.to_string()))?;
        style.apply(layout);
        Ok(())
    }

    fn cell_value(&self, sheet: &str, pos: CellPos) -> Result<CellValue> {
        self.with_sheet(sheet, |ws| ws.value_at(pos))
    }

    fn cell_format(&self, sheet: &str, pos: CellPos) -> Result<FormatId> {
        self.with_sheet(sheet, |ws| ws.format_at(pos))
    }

    fn set_cell_format(&self, sheet: &str, pos: CellPos, format: FormatId) -> Result<()> {
        let mut wb = self.write()?;
        // Only registered keys may be applied
        wb.number_formats().get(format)?;
        let ws = wb
            .worksheet_by_name_mut(sheet)
            .ok_or_else(|| ModelError::SheetNotFound(sheet.to_string()))?;
        ws.set_cell_format_at(pos, format)
    }

    fn number_formats(&self) -> &dyn NumberFormats {
        self
    }

    fn supports_concurrent_access(&self) -> bool {
        self.concurrent
    }
}

impl NumberFormats for SharedWorkbook {
    fn get_by_key(&self, id: FormatId) -> Result<FormatEntry> {
        self.read()?.number_formats().get(id).cloned()
    }

    fn query_key(&self, pattern: &str, locale: &Locale) -> Result<Option<FormatId>> {
        Ok(self.read()?.number_formats().query_key(pattern, locale))
    }

    fn add_new(&self, pattern: &str, locale: &Locale) -> Result<FormatId> {
        self.write()?.number_formats_mut().add_new(pattern, locale)
    }
}
