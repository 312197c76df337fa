//! Filter options

use std::fmt;

use sheetfit_format::ClassifierOptions;
use sheetfit_layout::FitOptions;

/// Options for the number-format filter
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NumberFormatOptions {
    /// Classification thresholds
    pub classifier: ClassifierOptions,
    /// Also reformat cells on hidden sheets (default: false)
    pub include_hidden_sheets: bool,
}

/// How sheets sharing one page style are fitted
///
/// A page style is a single object, so one style cannot hold a different
/// page size per sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SharedStylePolicy {
    /// Size each style to the largest content of the visible sheets using it,
    /// written once per style
    #[default]
    Union,
    /// Fit sheets one after the other in document order; the last visible
    /// sheet of a style decides its size
    LastWriteWins,
}

impl fmt::Display for SharedStylePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharedStylePolicy::Union => f.write_str("union"),
            SharedStylePolicy::LastWriteWins => f.write_str("last-write-wins"),
        }
    }
}

/// How many threads measure sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Parallelism {
    /// A shared pool sized from `RAYON_NUM_THREADS` or the available cores
    #[default]
    Auto,
    /// The calling thread only
    Serial,
    /// A dedicated pool of this many threads
    Threads(usize),
}

/// Options for the single-page filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SinglePageOptions {
    /// Fitting minimums and limits
    pub fit: FitOptions,
    /// Policy for shared page styles
    pub shared_styles: SharedStylePolicy,
    /// Measurement parallelism
    pub parallelism: Parallelism,
}

/// Options for a whole filter chain
///
/// A filter whose options are `None` is left out of the chain.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChainOptions {
    pub number_format: Option<NumberFormatOptions>,
    pub single_page: Option<SinglePageOptions>,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            number_format: Some(NumberFormatOptions::default()),
            single_page: Some(SinglePageOptions::default()),
        }
    }
}
