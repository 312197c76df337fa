//! Filter reports

use std::fmt;

use sheetfit_layout::SheetFit;
use sheetfit_model::{CellPos, DocumentKind};

/// A cell or sheet the filter could not process
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemFailure {
    pub sheet: String,
    /// Failing cell; `None` when the whole sheet failed
    pub cell: Option<CellPos>,
    pub message: String,
}

impl ItemFailure {
    pub fn sheet<S: Into<String>, M: fmt::Display>(sheet: S, error: M) -> Self {
        Self {
            sheet: sheet.into(),
            cell: None,
            message: error.to_string(),
        }
    }

    pub fn cell<S: Into<String>, M: fmt::Display>(sheet: S, cell: CellPos, error: M) -> Self {
        Self {
            sheet: sheet.into(),
            cell: Some(cell),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell {
            Some(cell) => write!(f, "{}!{}: {}", self.sheet, cell, self.message),
            None => write!(f, "{}: {}", self.sheet, self.message),
        }
    }
}

/// Outcome of one filter on one document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterReport {
    /// Filter name
    pub filter: String,
    /// Kind of the document seen
    pub document: DocumentKind,
    /// False when the filter passed the document through untouched
    pub applied: bool,
    /// Sheets the filter worked on
    pub sheets_processed: usize,
    /// Sheets skipped (hidden)
    pub sheets_skipped: usize,
    /// Numeric cells examined
    pub cells_examined: usize,
    /// Cells whose format was changed
    pub cells_changed: usize,
    /// Number formats added to the document
    pub formats_created: usize,
    /// Page styles written
    pub styles_written: usize,
    /// Per-sheet fitting results
    pub fits: Vec<SheetFit>,
    /// Cells and sheets that failed
    pub failures: Vec<ItemFailure>,
}

impl FilterReport {
    /// Empty report for a filter applied to a document
    pub fn new<S: Into<String>>(filter: S, document: DocumentKind) -> Self {
        Self {
            filter: filter.into(),
            document,
            applied: true,
            sheets_processed: 0,
            sheets_skipped: 0,
            cells_examined: 0,
            cells_changed: 0,
            formats_created: 0,
            styles_written: 0,
            fits: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Report for a document the filter does not handle
    pub fn pass_through<S: Into<String>>(filter: S, document: DocumentKind) -> Self {
        Self {
            applied: false,
            ..Self::new(filter, document)
        }
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Record a failure
    pub fn add_failure(&mut self, failure: ItemFailure) {
        tracing::warn!(
            filter = %self.filter,
            sheet = %failure.sheet,
            cell = ?failure.cell.map(|c| c.to_string()),
            error = %failure.message,
            "item failed"
        );
        self.failures.push(failure);
    }

    /// One-line summary
    pub fn format(&self, prefix: &str) -> String {
        if !self.applied {
            return format!("{prefix} {} passed through {}", self.filter, self.document);
        }
        format!(
            "{prefix} {} sheets={} skipped={} cells={} changed={} formats={} styles={} failures={}",
            self.filter,
            self.sheets_processed,
            self.sheets_skipped,
            self.cells_examined,
            self.cells_changed,
            self.formats_created,
            self.styles_written,
            self.failure_count()
        )
    }
}

impl fmt::Display for FilterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[FILTER]"))
    }
}

/// Outcome of a whole chain, one report per filter in chain order
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainReport {
    pub reports: Vec<FilterReport>,
}

impl ChainReport {
    pub fn failure_count(&self) -> usize {
        self.reports.iter().map(FilterReport::failure_count).sum()
    }

    /// True when no item failed
    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }

    /// All failures, in chain order
    pub fn failures(&self) -> impl Iterator<Item = &ItemFailure> {
        self.reports.iter().flat_map(|r| r.failures.iter())
    }

    /// Report of the filter with this name
    pub fn report(&self, filter: &str) -> Option<&FilterReport> {
        self.reports.iter().find(|r| r.filter == filter)
    }
}

impl fmt::Display for ChainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, report) in self.reports.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{report}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lines() {
        let mut report = FilterReport::new("number-format", DocumentKind::Spreadsheet);
        report.sheets_processed = 2;
        report.cells_examined = 10;
        report.cells_changed = 3;
        report.add_failure(ItemFailure::cell("Data", CellPos::new(1, 4), "boom"));

        assert_eq!(
            report.to_string(),
            "[FILTER] number-format sheets=2 skipped=0 cells=10 changed=3 formats=0 styles=0 failures=1"
        );
        assert_eq!(report.failures[0].to_string(), "Data!B5: boom");

        let skipped = FilterReport::pass_through("single-page", DocumentKind::Text);
        assert_eq!(
            skipped.format(">"),
            "> single-page passed through text"
        );
    }

    #[test]
    fn test_chain_totals() {
        let mut a = FilterReport::new("a", DocumentKind::Spreadsheet);
        a.add_failure(ItemFailure::sheet("S1", "bad"));
        let b = FilterReport::new("b", DocumentKind::Spreadsheet);
        let chain = ChainReport {
            reports: vec![a, b],
        };

        assert_eq!(chain.failure_count(), 1);
        assert!(!chain.is_clean());
        assert!(chain.report("b").is_some());
        assert_eq!(chain.failures().next().unwrap().sheet, "S1");
        assert_eq!(chain.to_string().lines().count(), 2);
    }
}
