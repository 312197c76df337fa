//! Number-format filter
//!
//! Walks the used area of every visible sheet and switches long
//! "General"-formatted numbers to a scientific or truncated-decimal pattern.
//! The new format is created under the locale of the cell's current format.
//! Only the format key is written; cell values are never touched.

use sheetfit_format::{FormatClassifier, FormatDecision, FormatRegistry};
use sheetfit_model::{CellPos, Document, SpreadsheetDocument};

use crate::error::Result;
use crate::filter::{Filter, FilterContext};
use crate::options::NumberFormatOptions;
use crate::report::{FilterReport, ItemFailure};

/// Filter reformatting long "General" numbers
#[derive(Debug, Clone, Default)]
pub struct NumberFormatFilter {
    options: NumberFormatOptions,
    classifier: FormatClassifier,
}

/// What happened to one cell
enum CellOutcome {
    /// Not a number
    Skipped,
    /// A number whose format stays
    Kept,
    /// A number whose format changed
    Changed,
}

impl NumberFormatFilter {
    pub const NAME: &'static str = "number-format";

    pub fn new(options: NumberFormatOptions) -> Self {
        let classifier = FormatClassifier::new(options.classifier.clone());
        Self {
            options,
            classifier,
        }
    }

    pub fn options(&self) -> &NumberFormatOptions {
        &self.options
    }

    fn process_sheet(
        &self,
        doc: &dyn SpreadsheetDocument,
        sheet: &str,
        registry: &mut FormatRegistry<'_>,
        ctx: &FilterContext,
        report: &mut FilterReport,
    ) -> Result<()> {
        let range = doc.used_range(sheet)?;
        tracing::debug!(sheet, range = %range, "scanning used area");

        for row in 0..=range.end_row {
            ctx.cancel.check()?;
            for col in 0..=range.end_column {
                let pos = CellPos::new(col, row);
                match self.process_cell(doc, sheet, pos, registry) {
                    Ok(CellOutcome::Skipped) => {}
                    Ok(CellOutcome::Kept) => report.cells_examined += 1,
                    Ok(CellOutcome::Changed) => {
                        report.cells_examined += 1;
                        report.cells_changed += 1;
                    }
                    Err(e) => report.add_failure(ItemFailure::cell(sheet, pos, e)),
                }
            }
        }
        Ok(())
    }

    fn process_cell(
        &self,
        doc: &dyn SpreadsheetDocument,
        sheet: &str,
        pos: CellPos,
        registry: &mut FormatRegistry<'_>,
    ) -> Result<CellOutcome> {
        let value = doc.cell_value(sheet, pos)?;
        let Some(number) = value.as_number() else {
            return Ok(CellOutcome::Skipped);
        };

        let current_id = doc.cell_format(sheet, pos)?;
        let current = doc.number_formats().get_by_key(current_id)?;

        let decision = self.classifier.classify_cell(&value, &current);
        let pattern = match &decision {
            FormatDecision::Unchanged => return Ok(CellOutcome::Kept),
            FormatDecision::Scientific(p) | FormatDecision::TruncatedDecimal(p) => p,
        };

        let new_id = registry.resolve_or_create(pattern, &current.locale)?;
        if new_id == current_id {
            return Ok(CellOutcome::Kept);
        }
        doc.set_cell_format(sheet, pos, new_id)?;

        tracing::debug!(
            sheet,
            cell = %pos,
            value = number,
            decision = %decision,
            locale = %current.locale,
            "changed number format"
        );
        Ok(CellOutcome::Changed)
    }
}

impl Filter for NumberFormatFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, doc: &Document<'_>, ctx: &FilterContext) -> Result<FilterReport> {
        let Some(sheets) = doc.as_spreadsheet() else {
            return Ok(FilterReport::pass_through(Self::NAME, doc.kind()));
        };

        let mut report = FilterReport::new(Self::NAME, doc.kind());
        let mut registry = FormatRegistry::new(sheets.number_formats());

        for sheet in sheets.sheet_names()? {
            ctx.cancel.check()?;

            let visible = match sheets.is_sheet_visible(&sheet) {
                Ok(visible) => visible,
                Err(e) => {
                    report.add_failure(ItemFailure::sheet(&sheet, e));
                    continue;
                }
            };
            if !visible && !self.options.include_hidden_sheets {
                tracing::debug!(sheet = %sheet, "skipping hidden sheet");
                report.sheets_skipped += 1;
                continue;
            }

            match self.process_sheet(sheets, &sheet, &mut registry, ctx, &mut report) {
                Ok(()) => report.sheets_processed += 1,
                Err(e) if e.is_cancellation() => return Err(e),
                Err(e) => report.add_failure(ItemFailure::sheet(&sheet, e)),
            }
        }

        report.formats_created = registry.created();
        Ok(report)
    }
}

impl From<NumberFormatOptions> for NumberFormatFilter {
    fn from(options: NumberFormatOptions) -> Self {
        Self::new(options)
    }
}

