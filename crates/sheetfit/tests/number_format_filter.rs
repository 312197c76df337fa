use pretty_assertions::assert_eq;
use sheetfit::prelude::*;
use sheetfit::{CellPos, CellValue, FormatId, Locale, ModelError};
use sheetfit_model::{
    CellRangeAddress, NumberFormats, PageLayout, PageStyle, Shape, UsedRange,
};

fn pos(addr: &str) -> CellPos {
    addr.parse().unwrap()
}

fn pattern_at(doc: &SharedWorkbook, sheet: &str, addr: &str) -> String {
    let id = doc.cell_format(sheet, pos(addr)).unwrap();
    doc.number_formats().get_by_key(id).unwrap().pattern
}

fn run(doc: &SharedWorkbook, options: NumberFormatOptions) -> FilterReport {
    NumberFormatFilter::new(options)
        .apply(&Document::Spreadsheet(doc), &FilterContext::new())
        .unwrap()
}

#[test]
fn long_numbers_get_new_formats() {
    let mut wb = Workbook::new();
    let ws = wb.worksheet_mut(0).unwrap();
    ws.set_cell_value("A1", 100000000000.0).unwrap();
    ws.set_cell_value("B1", 0.123456789012345).unwrap();
    ws.set_cell_value("C1", 0.00001234567).unwrap();
    ws.set_cell_value("A2", 123.0).unwrap();
    ws.set_cell_value("B2", "text").unwrap();
    let doc = SharedWorkbook::new(wb);

    let report = run(&doc, NumberFormatOptions::default());

    assert_eq!(pattern_at(&doc, "Sheet1", "A1"), "0.#####E+00");
    assert_eq!(pattern_at(&doc, "Sheet1", "B1"), "0.#########");
    assert_eq!(pattern_at(&doc, "Sheet1", "C1"), "0.#####E+00");
    assert_eq!(pattern_at(&doc, "Sheet1", "A2"), "General");

    assert_eq!(report.sheets_processed, 1);
    assert_eq!(report.cells_examined, 4);
    assert_eq!(report.cells_changed, 3);
    assert_eq!(report.formats_created, 2);
    assert!(report.failures.is_empty());

    // Values are never rewritten
    assert_eq!(
        doc.cell_value("Sheet1", pos("A1")).unwrap(),
        CellValue::Number(100000000000.0)
    );
}

#[test]
fn new_format_keeps_current_locale() {
    let mut wb = Workbook::new();
    let german = Locale::new("de", "DE");
    let general_de = wb
        .number_formats_mut()
        .add_new("General", &german)
        .unwrap();
    let ws = wb.worksheet_mut(0).unwrap();
    ws.set_cell_value("A1", 100000000000.0).unwrap();
    ws.set_cell_format_at(pos("A1"), general_de).unwrap();
    let doc = SharedWorkbook::new(wb);

    run(&doc, NumberFormatOptions::default());

    let id = doc.cell_format("Sheet1", pos("A1")).unwrap();
    let entry = doc.number_formats().get_by_key(id).unwrap();
    assert_eq!(entry.pattern, "0.#####E+00");
    assert_eq!(entry.locale, german);
}

#[test]
fn non_general_formats_and_formulas_untouched() {
    let mut wb = Workbook::new();
    let ws = wb.worksheet_mut(0).unwrap();
    ws.set_cell_value("A1", 100000000000.0).unwrap();
    ws.set_cell_format_at(pos("A1"), FormatId(2)).unwrap();
    ws.set_cell_value_at(
        pos("B1"),
        CellValue::formula_with_result("=A1*10", CellValue::Number(1e12)),
    )
    .unwrap();
    let doc = SharedWorkbook::new(wb);

    let report = run(&doc, NumberFormatOptions::default());

    assert_eq!(doc.cell_format("Sheet1", pos("A1")).unwrap(), FormatId(2));
    assert_eq!(doc.cell_format("Sheet1", pos("B1")).unwrap(), FormatId::GENERAL);
    assert_eq!(report.cells_changed, 0);
    assert_eq!(report.formats_created, 0);
}

#[test]
fn shared_pattern_created_once() {
    let mut wb = Workbook::new();
    wb.add_worksheet_with_name("Second").unwrap();
    for i in 0..2 {
        let ws = wb.worksheet_mut(i).unwrap();
        ws.set_cell_value("A1", 100000000000.0).unwrap();
        ws.set_cell_value("A5", -250000000000.0).unwrap();
    }
    let doc = SharedWorkbook::new(wb);

    let report = run(&doc, NumberFormatOptions::default());

    assert_eq!(report.cells_changed, 4);
    assert_eq!(report.formats_created, 1);
    assert_eq!(
        doc.cell_format("Sheet1", pos("A1")).unwrap(),
        doc.cell_format("Second", pos("A5")).unwrap()
    );
}

#[test]
fn hidden_sheets_skipped_unless_included() {
    let mut wb = Workbook::new();
    wb.add_worksheet_with_name("Hidden").unwrap();
    let ws = wb.worksheet_by_name_mut("Hidden").unwrap();
    ws.set_visible(false);
    ws.set_cell_value("A1", 100000000000.0).unwrap();

    let doc = SharedWorkbook::new(wb.clone());
    let report = run(&doc, NumberFormatOptions::default());
    assert_eq!(report.sheets_skipped, 1);
    assert_eq!(pattern_at(&doc, "Hidden", "A1"), "General");

    let doc = SharedWorkbook::new(wb);
    let report = run(
        &doc,
        NumberFormatOptions {
            include_hidden_sheets: true,
            ..NumberFormatOptions::default()
        },
    );
    assert_eq!(report.sheets_skipped, 0);
    assert_eq!(pattern_at(&doc, "Hidden", "A1"), "0.#####E+00");
}

#[test]
fn other_documents_pass_through() {
    let filter = NumberFormatFilter::default();
    for doc in [Document::Text, Document::Presentation, Document::Drawing] {
        let report = filter.apply(&doc, &FilterContext::new()).unwrap();
        assert!(!report.applied);
        assert_eq!(report.document, doc.kind());
    }
}

#[test]
fn cancellation_stops_the_filter() {
    let mut wb = Workbook::new();
    wb.worksheet_mut(0)
        .unwrap()
        .set_cell_value("A1", 100000000000.0)
        .unwrap();
    let doc = SharedWorkbook::new(wb);

    let cancel = CancelToken::new();
    cancel.cancel();
    let err = NumberFormatFilter::default()
        .apply(
            &Document::Spreadsheet(&doc),
            &FilterContext::with_cancel(cancel),
        )
        .unwrap_err();

    assert!(matches!(err, FilterError::Cancelled));
    assert_eq!(pattern_at(&doc, "Sheet1", "A1"), "General");
}

/// Document failing on one cell and one sheet
struct FlakyDocument {
    inner: SharedWorkbook,
    bad_cell: CellPos,
    bad_sheet: &'static str,
}

impl SpreadsheetDocument for FlakyDocument {
    fn sheet_names(&self) -> sheetfit_model::Result<Vec<String>> {
        self.inner.sheet_names()
    }

    fn is_sheet_visible(&self, sheet: &str) -> sheetfit_model::Result<bool> {
        self.inner.is_sheet_visible(sheet)
    }

    fn used_range(&self, sheet: &str) -> sheetfit_model::Result<UsedRange> {
        if sheet == self.bad_sheet {
            return Err(ModelError::other("backend disconnected"));
        }
        self.inner.used_range(sheet)
    }

    fn column_width(&self, sheet: &str, col: u32) -> sheetfit_model::Result<i32> {
        self.inner.column_width(sheet, col)
    }

    fn row_height(&self, sheet: &str, row: u32) -> sheetfit_model::Result<i32> {
        self.inner.row_height(sheet, row)
    }

    fn shapes(&self, sheet: &str) -> sheetfit_model::Result<Vec<Shape>> {
        self.inner.shapes(sheet)
    }

    fn set_print_areas(
        &self,
        sheet: &str,
        areas: &[CellRangeAddress],
    ) -> sheetfit_model::Result<()> {
        self.inner.set_print_areas(sheet, areas)
    }

    fn page_style_name(&self, sheet: &str) -> sheetfit_model::Result<String> {
        self.inner.page_style_name(sheet)
    }

    fn page_style(&self, name: &str) -> sheetfit_model::Result<PageStyle> {
        self.inner.page_style(name)
    }

    fn set_page_layout(&self, name: &str, layout: &PageLayout) -> sheetfit_model::Result<()> {
        self.inner.set_page_layout(name, layout)
    }

    fn cell_value(&self, sheet: &str, pos: CellPos) -> sheetfit_model::Result<CellValue> {
        self.inner.cell_value(sheet, pos)
    }

    fn cell_format(&self, sheet: &str, pos: CellPos) -> sheetfit_model::Result<FormatId> {
        if pos == self.bad_cell {
            return Err(ModelError::rejected("NumberFormat", "cell locked"));
        }
        self.inner.cell_format(sheet, pos)
    }

    fn set_cell_format(
        &self,
        sheet: &str,
        pos: CellPos,
        format: FormatId,
    ) -> sheetfit_model::Result<()> {
        self.inner.set_cell_format(sheet, pos, format)
    }

    fn number_formats(&self) -> &dyn NumberFormats {
        self.inner.number_formats()
    }
}

#[test]
fn failures_are_isolated_per_cell_and_sheet() {
    let mut wb = Workbook::new();
    {
        let ws = wb.worksheet_mut(0).unwrap();
        ws.set_cell_value("A1", 100000000000.0).unwrap();
        ws.set_cell_value("B1", 100000000000.0).unwrap();
    }
    wb.add_worksheet_with_name("Broken").unwrap();
    wb.add_worksheet_with_name("Last").unwrap();
    wb.worksheet_by_name_mut("Last")
        .unwrap()
        .set_cell_value("C3", 100000000000.0)
        .unwrap();

    let doc = FlakyDocument {
        inner: SharedWorkbook::new(wb),
        bad_cell: pos("A1"),
        bad_sheet: "Broken",
    };
    let report = NumberFormatFilter::default()
        .apply(&Document::Spreadsheet(&doc), &FilterContext::new())
        .unwrap();

    assert_eq!(report.failure_count(), 2);
    assert_eq!(report.failures[0].sheet, "Sheet1");
    assert_eq!(report.failures[0].cell, Some(pos("A1")));
    assert_eq!(report.failures[1].sheet, "Broken");
    assert_eq!(report.failures[1].cell, None);

    assert_eq!(report.sheets_processed, 2);
    assert_eq!(report.cells_changed, 2);
    assert_eq!(pattern_at(&doc.inner, "Sheet1", "B1"), "0.#####E+00");
    assert_eq!(pattern_at(&doc.inner, "Last", "C3"), "0.#####E+00");
}
