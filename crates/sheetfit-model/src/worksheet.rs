//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{Cell, CellValue, FormatId};
use crate::error::{ModelError, Result};
use crate::geometry::{CellPos, CellRangeAddress, UsedRange};
use crate::page_style::DEFAULT_PAGE_STYLE;
use crate::shape::Shape;
use crate::{MAX_COLUMNS, MAX_ROWS};

/// Default column width in 1/100 mm
pub const DEFAULT_COLUMN_WIDTH: i32 = 2258;

/// Default row height in 1/100 mm
pub const DEFAULT_ROW_HEIGHT: i32 = 452;

/// A worksheet (single sheet in a workbook)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Sheet is visible
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    visible: bool,
    /// Cell storage
    #[cfg_attr(feature = "serde", serde(default, with = "placed_cells"))]
    cells: BTreeMap<CellPos, Cell>,
    /// Width of columns without a custom width
    #[cfg_attr(feature = "serde", serde(default = "default_column_width"))]
    default_column_width: i32,
    /// Height of rows without a custom height
    #[cfg_attr(feature = "serde", serde(default = "default_row_height"))]
    default_row_height: i32,
    /// Custom column widths
    #[cfg_attr(feature = "serde", serde(default))]
    column_widths: BTreeMap<u32, i32>,
    /// Custom row heights
    #[cfg_attr(feature = "serde", serde(default))]
    row_heights: BTreeMap<u32, i32>,
    /// Floating shapes on the draw page
    #[cfg_attr(feature = "serde", serde(default))]
    shapes: Vec<Shape>,
    /// Explicit print areas
    #[cfg_attr(feature = "serde", serde(default))]
    print_areas: Vec<CellRangeAddress>,
    /// Name of the referenced page style
    #[cfg_attr(feature = "serde", serde(default = "default_page_style"))]
    page_style: String,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            visible: true,
            cells: BTreeMap::new(),
            default_column_width: DEFAULT_COLUMN_WIDTH,
            default_row_height: DEFAULT_ROW_HEIGHT,
            column_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
            shapes: Vec::new(),
            print_areas: Vec::new(),
            page_style: DEFAULT_PAGE_STYLE.to_string(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub(crate) fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Check if sheet is visible
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set sheet visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    // === Cell Access ===

    /// Get a cell by A1-style address
    pub fn cell(&self, address: &str) -> Result<Option<&Cell>> {
        let pos = CellPos::parse(address)?;
        Ok(self.cells.get(&pos))
    }

    /// Get a cell by position
    pub fn cell_at(&self, pos: CellPos) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    /// Get the value at a position (Empty if no cell is stored)
    pub fn value_at(&self, pos: CellPos) -> CellValue {
        self.cells
            .get(&pos)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    /// Get the format key at a position (General if no cell is stored)
    pub fn format_at(&self, pos: CellPos) -> FormatId {
        self.cells
            .get(&pos)
            .map(|c| c.format)
            .unwrap_or(FormatId::GENERAL)
    }

    /// Set a cell value by A1-style address
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let pos = CellPos::parse(address)?;
        self.set_cell_value_at(pos, value)
    }

    /// Set a cell value by position
    ///
    /// Setting [`CellValue::Empty`] on an unformatted cell removes it.
    pub fn set_cell_value_at<V: Into<CellValue>>(&mut self, pos: CellPos, value: V) -> Result<()> {
        validate_cell_position(pos)?;
        let value = value.into();
        if value.is_empty() && self.format_at(pos) == FormatId::GENERAL {
            self.cells.remove(&pos);
            return Ok(());
        }
        self.cells.entry(pos).or_default().value = value;
        Ok(())
    }

    /// Set a formula by A1-style address
    pub fn set_cell_formula(&mut self, address: &str, formula: &str) -> Result<()> {
        let pos = CellPos::parse(address)?;
        self.set_cell_value_at(pos, CellValue::formula(formula))
    }

    /// Set the number format key of a cell
    pub fn set_cell_format_at(&mut self, pos: CellPos, format: FormatId) -> Result<()> {
        validate_cell_position(pos)?;
        self.cells.entry(pos).or_default().format = format;
        Ok(())
    }

    /// Clear a cell (value and format)
    pub fn clear_cell_at(&mut self, pos: CellPos) {
        self.cells.remove(&pos);
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the sheet holds no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over stored cells in column-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellPos, &Cell)> {
        self.cells.iter().map(|(pos, cell)| (*pos, cell))
    }

    /// End of the used area
    ///
    /// The used area starts at A1 and reaches the last column and the last
    /// row holding a non-empty value. Formula cells count even when their
    /// result is an empty string.
    pub fn used_range(&self) -> UsedRange {
        self.cells
            .iter()
            .filter(|(_, cell)| !cell.value.is_empty())
            .fold(UsedRange::default(), |range, (pos, _)| UsedRange {
                end_column: range.end_column.max(pos.col),
                end_row: range.end_row.max(pos.row),
            })
    }

    // === Row/Column Operations ===

    /// Get column width
    pub fn column_width(&self, col: u32) -> i32 {
        self.column_widths
            .get(&col)
            .copied()
            .unwrap_or(self.default_column_width)
    }

    /// Set column width
    pub fn set_column_width(&mut self, col: u32, width: i32) {
        self.column_widths.insert(col, width.max(0));
    }

    /// Get row height
    pub fn row_height(&self, row: u32) -> i32 {
        self.row_heights
            .get(&row)
            .copied()
            .unwrap_or(self.default_row_height)
    }

    /// Set row height
    pub fn set_row_height(&mut self, row: u32, height: i32) {
        self.row_heights.insert(row, height.max(0));
    }

    /// Set the width of every column without a custom width
    pub fn set_default_column_width(&mut self, width: i32) {
        self.default_column_width = width.max(0);
    }

    /// Set the height of every row without a custom height
    pub fn set_default_row_height(&mut self, height: i32) {
        self.default_row_height = height.max(0);
    }

    // === Draw Page ===

    /// Floating shapes
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Add a floating shape
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    // === Print Settings ===

    /// Explicit print areas (empty = whole sheet)
    pub fn print_areas(&self) -> &[CellRangeAddress] {
        &self.print_areas
    }

    /// Replace the print areas
    pub fn set_print_areas(&mut self, areas: Vec<CellRangeAddress>) {
        self.print_areas = areas;
    }

    /// Name of the referenced page style
    pub fn page_style(&self) -> &str {
        &self.page_style
    }

    /// Reference another page style
    pub fn set_page_style<S: Into<String>>(&mut self, name: S) {
        self.page_style = name.into();
    }
}

fn validate_cell_position(pos: CellPos) -> Result<()> {
    if pos.col >= MAX_COLUMNS || pos.row >= MAX_ROWS {
        return Err(ModelError::CellOutOfBounds {
            col: pos.col,
            row: pos.row,
        });
    }
    Ok(())
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

#[cfg(feature = "serde")]
fn default_column_width() -> i32 {
    DEFAULT_COLUMN_WIDTH
}

#[cfg(feature = "serde")]
fn default_row_height() -> i32 {
    DEFAULT_ROW_HEIGHT
}

#[cfg(feature = "serde")]
fn default_page_style() -> String {
    DEFAULT_PAGE_STYLE.to_string()
}

/// Cells are stored keyed by position but serialized as a flat list, since
/// JSON maps only take string keys.
#[cfg(feature = "serde")]
mod placed_cells {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::cell::{Cell, CellValue, FormatId};
    use crate::geometry::CellPos;

    #[derive(Serialize, Deserialize)]
    struct PlacedCell {
        col: u32,
        row: u32,
        value: CellValue,
        #[serde(default)]
        format: FormatId,
    }

    pub fn serialize<S: Serializer>(
        cells: &BTreeMap<CellPos, Cell>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let list: Vec<PlacedCell> = cells
            .iter()
            .map(|(pos, cell)| PlacedCell {
                col: pos.col,
                row: pos.row,
                value: cell.value.clone(),
                format: cell.format,
            })
            .collect();
        list.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<CellPos, Cell>, D::Error> {
        let list = Vec::<PlacedCell>::deserialize(deserializer)?;
        Ok(list
            .into_iter()
            .map(|c| {
                (
                    CellPos::new(c.col, c.row),
                    Cell {
                        value: c.value,
                        format: c.format,
                    },
                )
            })
            .collect())
    }
}
