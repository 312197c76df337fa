//! Sheet measurement: used size, graphics box and range growth

use sheetfit_model::{CellPos, SizeBox, SpreadsheetDocument, UsedRange};

use crate::error::{FitError, Result};
use crate::options::FitOptions;

/// Read-only measurement of one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetMeasure {
    /// Sheet name
    pub sheet: String,
    /// Used range reported by the sheet, after optional trimming
    pub initial_range: UsedRange,
    /// Range after growing it over the graphics
    pub final_range: UsedRange,
    /// Size of `initial_range`
    pub used_size: SizeBox,
    /// Extent of the floating shapes
    pub graphics_size: SizeBox,
    /// Size of the printed content; covers `graphics_size`
    pub content_size: SizeBox,
    /// Columns and rows added while growing the range
    pub steps: u32,
    /// The range hit a sheet limit before covering the graphics
    pub capped: bool,
}

/// Sum of column widths `0..=end_column` and row heights `0..=end_row`
pub fn used_size(
    doc: &dyn SpreadsheetDocument,
    sheet: &str,
    range: UsedRange,
    interrupted: &dyn Fn() -> bool,
) -> Result<SizeBox> {
    let mut size = SizeBox::ZERO;
    for col in 0..=range.end_column {
        size.width = size.width.saturating_add(doc.column_width(sheet, col)?.max(0));
    }
    for row in 0..=range.end_row {
        if interrupted() {
            return Err(interruption(sheet));
        }
        size.height = size.height.saturating_add(doc.row_height(sheet, row)?.max(0));
    }
    Ok(size)
}

/// Far corner of the floating shapes, or zero without shapes
pub fn graphics_size(doc: &dyn SpreadsheetDocument, sheet: &str) -> Result<SizeBox> {
    Ok(doc
        .shapes(sheet)?
        .iter()
        .fold(SizeBox::ZERO, |acc, shape| acc.max(shape.far_corner())))
}

/// Used range without trailing rows and columns of blank formula results
///
/// Cells are read row by row; an interruption is checked once per row.
pub fn printable_range(
    doc: &dyn SpreadsheetDocument,
    sheet: &str,
    range: UsedRange,
    interrupted: &dyn Fn() -> bool,
) -> Result<UsedRange> {
    let mut printable = UsedRange::default();
    for row in 0..=range.end_row {
        if interrupted() {
            return Err(interruption(sheet));
        }
        for col in 0..=range.end_column {
            let value = doc.cell_value(sheet, CellPos::new(col, row))?;
            if value.is_empty() || value.is_blank_formula_result() {
                continue;
            }
            printable.end_column = printable.end_column.max(col);
            printable.end_row = printable.end_row.max(row);
        }
    }
    Ok(printable)
}

/// Range growth state for one sheet
struct Growth<'a> {
    doc: &'a dyn SpreadsheetDocument,
    sheet: &'a str,
    range: UsedRange,
    size: SizeBox,
    steps: u32,
}

impl Growth<'_> {
    fn add_column(&mut self) -> Result<()> {
        self.range.end_column += 1;
        let width = self.doc.column_width(self.sheet, self.range.end_column)?;
        self.size.width = self.size.width.saturating_add(width.max(0));
        self.steps += 1;
        Ok(())
    }

    fn add_row(&mut self) -> Result<()> {
        self.range.end_row += 1;
        let height = self.doc.row_height(self.sheet, self.range.end_row)?;
        self.size.height = self.size.height.saturating_add(height.max(0));
        self.steps += 1;
        Ok(())
    }
}

/// Measure a sheet and grow its range until it covers the graphics
///
/// Each round adds one column while the width falls short and one row while
/// the height falls short. A dimension stops growing at the sheet limit; the
/// content size is then clamped up to the graphics size.
pub fn measure_sheet(
    doc: &dyn SpreadsheetDocument,
    sheet: &str,
    options: &FitOptions,
    interrupted: &dyn Fn() -> bool,
) -> Result<SheetMeasure> {
    let mut initial_range = doc.used_range(sheet)?;
    if !options.count_blank_formula_results {
        initial_range = printable_range(doc, sheet, initial_range, interrupted)?;
    }

    let used = used_size(doc, sheet, initial_range, interrupted)?;
    let graphics = graphics_size(doc, sheet)?;

    let mut growth = Growth {
        doc,
        sheet,
        range: initial_range,
        size: used,
        steps: 0,
    };
    let mut width_capped = false;
    let mut height_capped = false;
    let check_interval = options.check_interval.max(1);

    loop {
        let short_width = !width_capped && growth.size.width < graphics.width;
        let short_height = !height_capped && growth.size.height < graphics.height;
        if !short_width && !short_height {
            break;
        }

        if short_width {
            if growth.range.column_count() < options.max_columns {
                growth.add_column()?;
            } else {
                width_capped = true;
            }
        }
        if short_height {
            if growth.range.row_count() < options.max_rows {
                growth.add_row()?;
            } else {
                height_capped = true;
            }
        }

        if growth.steps % check_interval == 0 && interrupted() {
            return Err(interruption(sheet));
        }
    }

    let capped = width_capped || height_capped;
    let content_size = if capped {
        tracing::warn!(
            sheet,
            range = %growth.range,
            graphics = %graphics,
            "sheet limit reached before covering graphics, clamping content size"
        );
        growth.size.max(graphics)
    } else {
        growth.size
    };

    tracing::debug!(
        sheet,
        initial = %initial_range,
        grown = %growth.range,
        used = %used,
        graphics = %graphics,
        steps = growth.steps,
        "measured sheet"
    );

    Ok(SheetMeasure {
        sheet: sheet.to_string(),
        initial_range,
        final_range: growth.range,
        used_size: used,
        graphics_size: graphics,
        content_size,
        steps: growth.steps,
        capped,
    })
}

fn interruption(sheet: &str) -> FitError {
    FitError::Interrupted {
        sheet: sheet.to_string(),
    }
}
