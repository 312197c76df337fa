//! Prelude module - common imports for sheetfit users
//!
//! ```rust
//! use sheetfit::prelude::*;
//! ```

pub use crate::{
    // Cancellation
    CancelToken,
    // Options
    ChainOptions,
    ChainReport,
    // Model types
    Document,
    DocumentKind,
    // Errors
    FilterError,
    // Filters
    Filter,
    FilterChain,
    FilterContext,
    // Reports
    FilterReport,
    ItemFailure,
    NumberFormatFilter,
    NumberFormatOptions,
    Parallelism,
    SharedStylePolicy,
    SharedWorkbook,
    SinglePageFilter,
    SinglePageOptions,
    SpreadsheetDocument,
    Workbook,
    Worksheet,
};
