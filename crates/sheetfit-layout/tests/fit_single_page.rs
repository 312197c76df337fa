use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sheetfit_layout::{FitError, FitOptions, PageFitter};
use sheetfit_model::{
    CellPos, CellRangeAddress, CellValue, Margins, Point, Shape, SharedWorkbook, SizeBox,
    SpreadsheetDocument, UsedRange, Workbook, DEFAULT_PAGE_STYLE,
};

/// Sheet with cells up to E10, 2000-wide columns and 400-high rows
fn five_by_ten() -> Workbook {
    let mut wb = Workbook::new();
    let ws = wb.worksheet_mut(0).unwrap();
    ws.set_default_column_width(2000);
    ws.set_default_row_height(400);
    ws.set_cell_value("A1", 1.0).unwrap();
    ws.set_cell_value("E10", 2.0).unwrap();
    wb
}

#[test]
fn shape_overflow_grows_range_then_adds_allowances() {
    let mut wb = five_by_ten();
    wb.worksheet_mut(0)
        .unwrap()
        .add_shape(Shape::new(Point::new(9000, 3500), SizeBox::new(2000, 1000)));
    let doc = SharedWorkbook::new(wb);

    let fit = PageFitter::default()
        .fit_to_single_page(&doc, "Sheet1")
        .unwrap();

    assert_eq!(fit.measure.initial_range, UsedRange::new(4, 9));
    assert_eq!(fit.measure.used_size, SizeBox::new(10000, 4000));
    assert_eq!(fit.measure.graphics_size, SizeBox::new(11000, 4500));
    assert_eq!(fit.measure.final_range, UsedRange::new(5, 11));
    assert_eq!(fit.measure.content_size, SizeBox::new(12000, 4800));
    assert_eq!(fit.measure.steps, 3);
    assert!(!fit.measure.capped);

    // 2 x 2100 wide; header 1200 + 2100 and footer 1200 + 2100 high
    assert_eq!(fit.page_size, SizeBox::new(16200, 11400));

    let style = doc.page_style(DEFAULT_PAGE_STYLE).unwrap();
    assert_eq!(style.size, SizeBox::new(16200, 11400));
    assert_eq!(style.margins, Margins::ZERO);
    assert_eq!(style.scale_to_pages, 1);
    assert!(style.center_horizontally);
    assert!(style.center_vertically);
}

#[test]
fn covered_graphics_leave_range_alone() {
    let mut wb = five_by_ten();
    wb.worksheet_mut(0)
        .unwrap()
        .add_shape(Shape::new(Point::new(100, 100), SizeBox::new(500, 500)));
    let doc = SharedWorkbook::new(wb);

    let fit = PageFitter::default()
        .fit_to_single_page(&doc, "Sheet1")
        .unwrap();
    assert_eq!(fit.measure.final_range, fit.measure.initial_range);
    assert_eq!(fit.measure.content_size, SizeBox::new(10000, 4000));
}

#[test]
fn print_areas_are_cleared() {
    let mut wb = five_by_ten();
    wb.worksheet_mut(0).unwrap().set_print_areas(vec![CellRangeAddress::new(
        CellPos::new(0, 0),
        CellPos::new(1, 1),
    )]);
    let doc = SharedWorkbook::new(wb);

    PageFitter::default()
        .fit_to_single_page(&doc, "Sheet1")
        .unwrap();

    let wb = doc.into_inner().unwrap();
    assert!(wb.worksheet(0).unwrap().print_areas().is_empty());
}

#[test]
fn header_footer_and_margin_floors() {
    let mut wb = five_by_ten();
    let style = wb.page_style_mut(DEFAULT_PAGE_STYLE).unwrap();
    style.header_on = false;
    style.footer_height = 1800;
    style.margins = Margins {
        top: 5000,
        bottom: 3000,
        left: 0,
        right: 2500,
    };
    let doc = SharedWorkbook::new(wb);

    let fit = PageFitter::default()
        .fit_to_single_page(&doc, "Sheet1")
        .unwrap();
    assert_eq!(
        fit.page_size,
        SizeBox::new(10000 + 2100 + 2500, 4000 + 1800 + 3000)
    );
}

#[test]
fn fit_measured_matches_full_fit_and_keeps_print_areas() {
    let area = CellRangeAddress::new(CellPos::new(0, 0), CellPos::new(1, 1));
    let mut wb = five_by_ten();
    wb.worksheet_mut(0).unwrap().set_print_areas(vec![area]);
    let doc = SharedWorkbook::new(wb.clone());

    let fitter = PageFitter::default();
    let measure = fitter.measure(&doc, "Sheet1", &|| false).unwrap();
    let fit = fitter.fit_measured(&doc, measure).unwrap();

    let full_doc = SharedWorkbook::new(wb);
    let full = fitter.fit_to_single_page(&full_doc, "Sheet1").unwrap();

    assert_eq!(fit, full);
    assert_eq!(
        doc.page_style(DEFAULT_PAGE_STYLE).unwrap(),
        full_doc.page_style(DEFAULT_PAGE_STYLE).unwrap()
    );
    let wb = doc.into_inner().unwrap();
    assert_eq!(wb.worksheet(0).unwrap().print_areas().to_vec(), vec![area]);
}

#[test]
fn footer_allowance_kept_with_footer_off() {
    let mut wb = five_by_ten();
    let style = wb.page_style_mut(DEFAULT_PAGE_STYLE).unwrap();
    style.header_on = false;
    style.footer_on = false;
    let doc = SharedWorkbook::new(wb);

    let fit = PageFitter::default()
        .fit_to_single_page(&doc, "Sheet1")
        .unwrap();
    assert_eq!(fit.page_size, SizeBox::new(14200, 4000 + 1200 + 2100));
}

#[test]
fn blank_formula_results_trimmed_when_configured() {
    let mut wb = five_by_ten();
    let ws = wb.worksheet_mut(0).unwrap();
    ws.set_cell_value_at(
        CellPos::new(7, 19),
        CellValue::formula_with_result("=IF(A1>5,1,\"\")", CellValue::text("")),
    )
    .unwrap();
    let doc = SharedWorkbook::new(wb);

    let counted = PageFitter::default().measure(&doc, "Sheet1", &|| false).unwrap();
    assert_eq!(counted.initial_range, UsedRange::new(7, 19));

    let trimmed = PageFitter::new(FitOptions {
        count_blank_formula_results: false,
        ..FitOptions::default()
    })
    .measure(&doc, "Sheet1", &|| false)
    .unwrap();
    assert_eq!(trimmed.initial_range, UsedRange::new(4, 9));
    assert_eq!(trimmed.used_size, SizeBox::new(10000, 4000));
}

#[test]
fn sheet_limit_clamps_content() {
    let mut wb = five_by_ten();
    wb.worksheet_mut(0)
        .unwrap()
        .add_shape(Shape::new(Point::new(0, 0), SizeBox::new(50000, 1000)));
    let doc = SharedWorkbook::new(wb);

    let measure = PageFitter::new(FitOptions {
        max_columns: 8,
        ..FitOptions::default()
    })
    .measure(&doc, "Sheet1", &|| false)
    .unwrap();

    assert!(measure.capped);
    assert_eq!(measure.final_range.end_column, 7);
    assert_eq!(measure.content_size, SizeBox::new(50000, 4000));
}

#[test]
fn interruption_aborts_the_sheet() {
    let doc = SharedWorkbook::new(five_by_ten());
    let err = PageFitter::default()
        .fit_to_single_page_with(&doc, "Sheet1", &|| true)
        .unwrap_err();
    assert!(matches!(err, FitError::Interrupted { ref sheet } if sheet == "Sheet1"));

    // Nothing was written to the style
    let style = doc.page_style(DEFAULT_PAGE_STYLE).unwrap();
    assert_eq!(style.scale_to_pages, 0);
}

#[test]
fn missing_page_style_fails() {
    let mut wb = five_by_ten();
    wb.worksheet_mut(0).unwrap().set_page_style("Gone");
    let doc = SharedWorkbook::new(wb);

    let err = PageFitter::default()
        .fit_to_single_page(&doc, "Sheet1")
        .unwrap_err();
    assert!(matches!(err, FitError::Model(_)));
}

fn sheet_with(
    end_col: u32,
    end_row: u32,
    col_width: i32,
    row_height: i32,
    corner: (i32, i32),
) -> SharedWorkbook {
    let mut wb = Workbook::new();
    let ws = wb.worksheet_mut(0).unwrap();
    ws.set_default_column_width(col_width);
    ws.set_default_row_height(row_height);
    ws.set_cell_value_at(CellPos::new(end_col, end_row), 1.0)
        .unwrap();
    ws.add_shape(Shape::new(
        Point::new(0, 0),
        SizeBox::new(corner.0, corner.1),
    ));
    SharedWorkbook::new(wb)
}

proptest! {
    #[test]
    fn growth_covers_graphics_minimally(
        end_col in 0u32..20,
        end_row in 0u32..40,
        col_width in 100i32..3000,
        row_height in 100i32..1000,
        corner in (0i32..60_000, 0i32..40_000),
    ) {
        let doc = sheet_with(end_col, end_row, col_width, row_height, corner);
        let m = PageFitter::default().measure(&doc, "Sheet1", &|| false).unwrap();

        prop_assert!(m.content_size.covers(&m.graphics_size));
        prop_assert!(m.final_range.end_column >= m.initial_range.end_column);
        prop_assert!(m.final_range.end_row >= m.initial_range.end_row);
        prop_assert!(!m.capped);

        // One column or row fewer would no longer cover the graphics
        if m.final_range.end_column > m.initial_range.end_column {
            prop_assert!(m.content_size.width - col_width < m.graphics_size.width);
        }
        if m.final_range.end_row > m.initial_range.end_row {
            prop_assert!(m.content_size.height - row_height < m.graphics_size.height);
        }
    }

    #[test]
    fn page_size_never_smaller_than_content(
        end_col in 0u32..10,
        end_row in 0u32..10,
        corner in (0i32..30_000, 0i32..30_000),
    ) {
        let doc = sheet_with(end_col, end_row, 2258, 452, corner);
        let fit = PageFitter::default().fit_to_single_page(&doc, "Sheet1").unwrap();
        prop_assert!(fit.page_size.covers(&fit.measure.content_size));
        prop_assert_eq!(doc.page_style(DEFAULT_PAGE_STYLE).unwrap().size, fit.page_size);
    }
}
