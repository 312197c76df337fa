//! Single-page fitter

use sheetfit_model::{PageLayout, PageStyle, SizeBox, SpreadsheetDocument};

use crate::allowance::Allowances;
use crate::error::Result;
use crate::measure::{measure_sheet, SheetMeasure};
use crate::options::FitOptions;

/// Result of fitting one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetFit {
    /// Measurement the page size was derived from
    pub measure: SheetMeasure,
    /// Page style written
    pub page_style: String,
    /// Page size written to the style
    pub page_size: SizeBox,
}

/// Fits sheets onto a single printed page
///
/// # Example
///
/// ```rust
/// use sheetfit_layout::PageFitter;
/// use sheetfit_model::{SharedWorkbook, SpreadsheetDocument, Workbook, DEFAULT_PAGE_STYLE};
///
/// let mut wb = Workbook::new();
/// wb.worksheet_mut(0).unwrap().set_cell_value("C4", 1.0).unwrap();
/// let doc = SharedWorkbook::new(wb);
///
/// let fit = PageFitter::default().fit_to_single_page(&doc, "Sheet1").unwrap();
/// assert_eq!(doc.page_style(DEFAULT_PAGE_STYLE).unwrap().size, fit.page_size);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PageFitter {
    options: FitOptions,
}

impl PageFitter {
    pub fn new(options: FitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Measure a sheet without writing anything
    pub fn measure(
        &self,
        doc: &dyn SpreadsheetDocument,
        sheet: &str,
        interrupted: &dyn Fn() -> bool,
    ) -> Result<SheetMeasure> {
        measure_sheet(doc, sheet, &self.options, interrupted)
    }

    /// Page size for `content` printed with `style`
    pub fn page_size(&self, content: SizeBox, style: &PageStyle) -> SizeBox {
        Allowances::for_style(style, &self.options).page_size(content)
    }

    /// Write a single-page layout of `page_size` to a page style
    pub fn write_layout(
        &self,
        doc: &dyn SpreadsheetDocument,
        style: &str,
        page_size: SizeBox,
    ) -> Result<()> {
        doc.set_page_layout(style, &PageLayout::single_page(page_size))?;
        Ok(())
    }

    /// Fit one sheet onto one page
    ///
    /// Clears the sheet's print areas, measures it, and writes the page size
    /// plus allowances to the sheet's page style together with centering,
    /// zero margins and scale-to-one-page.
    pub fn fit_to_single_page(
        &self,
        doc: &dyn SpreadsheetDocument,
        sheet: &str,
    ) -> Result<SheetFit> {
        self.fit_to_single_page_with(doc, sheet, &|| false)
    }

    /// [`fit_to_single_page`](Self::fit_to_single_page) with an interruption check
    pub fn fit_to_single_page_with(
        &self,
        doc: &dyn SpreadsheetDocument,
        sheet: &str,
        interrupted: &dyn Fn() -> bool,
    ) -> Result<SheetFit> {
        doc.set_print_areas(sheet, &[])?;
        let measure = self.measure(doc, sheet, interrupted)?;
        self.fit_measured(doc, measure)
    }

    /// Size and write the page style of an already measured sheet
    ///
    /// Print areas are left as they are.
    pub fn fit_measured(
        &self,
        doc: &dyn SpreadsheetDocument,
        measure: SheetMeasure,
    ) -> Result<SheetFit> {
        let style_name = doc.page_style_name(&measure.sheet)?;
        let style = doc.page_style(&style_name)?;
        let page_size = self.page_size(measure.content_size, &style);
        self.write_layout(doc, &style_name, page_size)?;

        tracing::info!(
            sheet = %measure.sheet,
            page_style = %style_name,
            page_size = %page_size,
            "fitted sheet to a single page"
        );

        Ok(SheetFit {
            measure,
            page_style: style_name,
            page_size,
        })
    }
}
