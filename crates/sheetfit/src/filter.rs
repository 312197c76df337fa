//! Filter trait and filter chain

use sheetfit_model::Document;

use crate::cancel::CancelToken;
use crate::error::Result;
use crate::number_format_filter::NumberFormatFilter;
use crate::options::ChainOptions;
use crate::report::{ChainReport, FilterReport};
use crate::single_page_filter::SinglePageFilter;

/// Per-run state handed to every filter
#[derive(Debug, Clone, Default)]
pub struct FilterContext {
    pub cancel: CancelToken,
}

impl FilterContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(cancel: CancelToken) -> Self {
        Self { cancel }
    }
}

/// A post-conversion transform
///
/// Documents of a kind the filter does not handle pass through untouched
/// and produce a report with `applied == false`.
pub trait Filter: Send + Sync {
    /// Short name used in reports and logs
    fn name(&self) -> &'static str;

    /// Apply the filter to a document
    fn apply(&self, doc: &Document<'_>, ctx: &FilterContext) -> Result<FilterReport>;
}

/// Filters applied in order to each document
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from options: number formats first, then page fitting
    pub fn from_options(options: &ChainOptions) -> Self {
        let mut chain = Self::new();
        if let Some(opts) = &options.number_format {
            chain.push(NumberFormatFilter::new(opts.clone()));
        }
        if let Some(opts) = &options.single_page {
            chain.push(SinglePageFilter::new(opts.clone()));
        }
        chain
    }

    /// Append a filter
    pub fn push<F: Filter + 'static>(&mut self, filter: F) {
        self.filters.push(Box::new(filter));
    }

    /// Append a filter, builder style
    pub fn with<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.push(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Names of the filters, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Run every filter on the document
    ///
    /// Stops at the first filter error, including cancellation. Item
    /// failures are kept in the reports and do not stop the chain.
    pub fn apply(&self, doc: &Document<'_>, ctx: &FilterContext) -> Result<ChainReport> {
        let mut chain_report = ChainReport::default();
        for filter in &self.filters {
            ctx.cancel.check()?;
            let report = filter.apply(doc, ctx)?;
            tracing::info!("{}", report);
            chain_report.reports.push(report);
        }
        Ok(chain_report)
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.names())
            .finish()
    }
}
