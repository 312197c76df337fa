//! Document kinds seen by the filter chain

use std::fmt;

use crate::facade::SpreadsheetDocument;

/// Kind of an office document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DocumentKind {
    Spreadsheet,
    Text,
    Presentation,
    Drawing,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DocumentKind::Spreadsheet => "spreadsheet",
            DocumentKind::Text => "text",
            DocumentKind::Presentation => "presentation",
            DocumentKind::Drawing => "drawing",
        };
        f.write_str(s)
    }
}

/// A document handed to the filter chain
///
/// The kind is decided once, when the document enters the chain; filters
/// match on it instead of probing for capabilities. Only spreadsheets carry a
/// model handle, the other kinds pass through untouched.
#[derive(Clone, Copy)]
pub enum Document<'a> {
    Spreadsheet(&'a dyn SpreadsheetDocument),
    Text,
    Presentation,
    Drawing,
}

impl<'a> Document<'a> {
    /// Kind of this document
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Spreadsheet(_) => DocumentKind::Spreadsheet,
            Document::Text => DocumentKind::Text,
            Document::Presentation => DocumentKind::Presentation,
            Document::Drawing => DocumentKind::Drawing,
        }
    }

    /// The spreadsheet model, if this is a spreadsheet
    pub fn as_spreadsheet(&self) -> Option<&'a dyn SpreadsheetDocument> {
        match self {
            Document::Spreadsheet(doc) => Some(*doc),
            _ => None,
        }
    }
}

impl fmt::Debug for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Document").field(&self.kind()).finish()
    }
}
