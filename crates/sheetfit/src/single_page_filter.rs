//! Single-page filter
//!
//! Clears the print areas of every sheet, then sizes the page style of each
//! visible sheet so the sheet prints on exactly one page. Hidden sheets keep
//! their page style.
//!
//! Sheets are measured independently, in parallel when the document allows
//! it. Page styles are written afterwards, one style at a time, so two
//! sheets never write the same style concurrently.

use std::collections::BTreeMap;

use sheetfit_layout::{FitError, PageFitter, SheetFit, SheetMeasure};
use sheetfit_model::{Document, PageLayout, SizeBox, SpreadsheetDocument};

use crate::error::Result;
use crate::filter::{Filter, FilterContext};
use crate::options::{SharedStylePolicy, SinglePageOptions};
use crate::parallel::map_ordered;
use crate::report::{FilterReport, ItemFailure};

/// Filter fitting each visible sheet onto one page
#[derive(Debug, Clone, Default)]
pub struct SinglePageFilter {
    options: SinglePageOptions,
    fitter: PageFitter,
}

/// A measured sheet and the style it references
struct Measured {
    measure: SheetMeasure,
    style: String,
}

impl SinglePageFilter {
    pub const NAME: &'static str = "single-page";

    pub fn new(options: SinglePageOptions) -> Self {
        let fitter = PageFitter::new(options.fit.clone());
        Self { options, fitter }
    }

    pub fn options(&self) -> &SinglePageOptions {
        &self.options
    }

    /// Clear print areas everywhere and return the visible sheets
    ///
    /// A sheet whose print areas cannot be cleared is not fitted.
    fn prepare_sheets(
        &self,
        doc: &dyn SpreadsheetDocument,
        ctx: &FilterContext,
        report: &mut FilterReport,
    ) -> Result<Vec<String>> {
        let mut visible_sheets = Vec::new();
        for sheet in doc.sheet_names()? {
            ctx.cancel.check()?;

            if let Err(e) = doc.set_print_areas(&sheet, &[]) {
                report.add_failure(ItemFailure::sheet(&sheet, e));
                continue;
            }
            match doc.is_sheet_visible(&sheet) {
                Ok(true) => visible_sheets.push(sheet),
                Ok(false) => {
                    tracing::debug!(sheet = %sheet, "hidden sheet, print areas cleared only");
                    report.sheets_skipped += 1;
                }
                Err(e) => report.add_failure(ItemFailure::sheet(&sheet, e)),
            }
        }
        Ok(visible_sheets)
    }

    /// Measure a sheet, stopping early once the token fires
    fn measure_checked(
        &self,
        doc: &dyn SpreadsheetDocument,
        sheet: &str,
        ctx: &FilterContext,
    ) -> std::result::Result<SheetMeasure, FitError> {
        let interrupted = || ctx.cancel.should_stop();
        if interrupted() {
            return Err(FitError::Interrupted {
                sheet: sheet.to_string(),
            });
        }
        self.fitter.measure(doc, sheet, &interrupted)
    }

    fn measure_one(
        &self,
        doc: &dyn SpreadsheetDocument,
        sheet: &str,
        ctx: &FilterContext,
    ) -> std::result::Result<Measured, FitError> {
        let measure = self.measure_checked(doc, sheet, ctx)?;
        let style = doc.page_style_name(sheet)?;
        Ok(Measured { measure, style })
    }

    /// Measure all sheets, then write each page style once
    fn fit_union(
        &self,
        doc: &dyn SpreadsheetDocument,
        sheets: &[String],
        ctx: &FilterContext,
        report: &mut FilterReport,
    ) -> Result<()> {
        let results = map_ordered(
            sheets,
            self.options.parallelism,
            doc.supports_concurrent_access(),
            |sheet| self.measure_one(doc, sheet, ctx),
        );

        // Group by style, keeping document order inside each group
        let mut by_style: BTreeMap<String, Vec<SheetMeasure>> = BTreeMap::new();
        for (sheet, result) in sheets.iter().zip(results) {
            match result {
                Ok(m) => by_style.entry(m.style).or_default().push(m.measure),
                Err(FitError::Interrupted { .. }) => return Err(ctx.cancel.stop_error()),
                Err(e) => report.add_failure(ItemFailure::sheet(sheet, e)),
            }
        }

        for (style_name, measures) in by_style {
            ctx.cancel.check()?;

            let content = measures
                .iter()
                .fold(SizeBox::ZERO, |acc, m| acc.max(m.content_size));
            let written = doc.page_style(&style_name).and_then(|style| {
                let page_size = self.fitter.page_size(content, &style);
                doc.set_page_layout(&style_name, &PageLayout::single_page(page_size))
                    .map(|()| page_size)
            });

            match written {
                Ok(page_size) => {
                    report.styles_written += 1;
                    tracing::info!(
                        page_style = %style_name,
                        sheets = measures.len(),
                        page_size = %page_size,
                        "fitted page style to a single page"
                    );
                    for measure in measures {
                        report.sheets_processed += 1;
                        report.fits.push(SheetFit {
                            measure,
                            page_style: style_name.clone(),
                            page_size,
                        });
                    }
                }
                Err(e) => {
                    for measure in &measures {
                        report.add_failure(ItemFailure::sheet(&measure.sheet, &e));
                    }
                }
            }
        }
        Ok(())
    }

    /// Fit sheets one after the other, each writing its own style
    fn fit_sequential(
        &self,
        doc: &dyn SpreadsheetDocument,
        sheets: &[String],
        ctx: &FilterContext,
        report: &mut FilterReport,
    ) -> Result<()> {
        for sheet in sheets {
            ctx.cancel.check()?;
            match self.fit_one(doc, sheet, ctx) {
                Ok(fit) => {
                    report.sheets_processed += 1;
                    report.styles_written += 1;
                    report.fits.push(fit);
                }
                Err(FitError::Interrupted { .. }) => return Err(ctx.cancel.stop_error()),
                Err(e) => report.add_failure(ItemFailure::sheet(sheet, e)),
            }
        }
        Ok(())
    }

    fn fit_one(
        &self,
        doc: &dyn SpreadsheetDocument,
        sheet: &str,
        ctx: &FilterContext,
    ) -> std::result::Result<SheetFit, FitError> {
        let measure = self.measure_checked(doc, sheet, ctx)?;
        self.fitter.fit_measured(doc, measure)
    }
}

impl Filter for SinglePageFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, doc: &Document<'_>, ctx: &FilterContext) -> Result<FilterReport> {
        let Some(sheets) = doc.as_spreadsheet() else {
            return Ok(FilterReport::pass_through(Self::NAME, doc.kind()));
        };

        let mut report = FilterReport::new(Self::NAME, doc.kind());
        let visible = self.prepare_sheets(sheets, ctx, &mut report)?;

        match self.options.shared_styles {
            SharedStylePolicy::Union => self.fit_union(sheets, &visible, ctx, &mut report)?,
            SharedStylePolicy::LastWriteWins => {
                self.fit_sequential(sheets, &visible, ctx, &mut report)?
            }
        }

        Ok(report)
    }
}

impl From<SinglePageOptions> for SinglePageFilter {
    fn from(options: SinglePageOptions) -> Self {
        Self::new(options)
    }
}

