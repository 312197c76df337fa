//! Number format table
//!
//! Formats are keyed by `(pattern, locale)`. The table is seeded with the
//! built-in formats under the default locale; custom formats get fresh keys
//! from [`FormatTable::FIRST_CUSTOM_ID`] upwards.

use std::collections::BTreeMap;
use std::fmt;

use crate::cell::FormatId;
use crate::error::{ModelError, Result};

/// A language/country locale
///
/// An empty locale (all empty strings) is the document default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Locale {
    #[cfg_attr(feature = "serde", serde(default))]
    pub language: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub country: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub variant: String,
}

impl Locale {
    /// Create a locale with language and country.
    pub fn new(language: &str, country: &str) -> Self {
        Self {
            language: language.to_string(),
            country: country.to_string(),
            variant: String::new(),
        }
    }

    /// True for the document-default locale
    pub fn is_default(&self) -> bool {
        self.language.is_empty() && self.country.is_empty() && self.variant.is_empty()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            return write!(f, "default");
        }
        write!(f, "{}", self.language)?;
        if !self.country.is_empty() {
            write!(f, "-{}", self.country)?;
        }
        if !self.variant.is_empty() {
            write!(f, "-{}", self.variant)?;
        }
        Ok(())
    }
}

/// One entry of the format table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatEntry {
    pub pattern: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub locale: Locale,
}

impl FormatEntry {
    pub fn new<S: Into<String>>(pattern: S, locale: Locale) -> Self {
        Self {
            pattern: pattern.into(),
            locale,
        }
    }

    /// Check for the literal "General" pattern
    pub fn is_general(&self) -> bool {
        self.pattern == GENERAL_PATTERN
    }
}

/// Pattern string of the built-in General format
pub const GENERAL_PATTERN: &str = "General";

/// Built-in formats as `(key, pattern)`
const BUILTIN_FORMATS: &[(i32, &str)] = &[
    (0, GENERAL_PATTERN),
    (1, "0"),
    (2, "0.00"),
    (3, "#,##0"),
    (4, "#,##0.00"),
    (9, "0%"),
    (10, "0.00%"),
    (11, "0.00E+00"),
    (12, "# ?/?"),
    (13, "# ??/??"),
    (14, "mm-dd-yy"),
    (15, "d-mmm-yy"),
    (16, "d-mmm"),
    (17, "mmm-yy"),
    (18, "h:mm AM/PM"),
    (19, "h:mm:ss AM/PM"),
    (20, "h:mm"),
    (21, "h:mm:ss"),
    (22, "m/d/yy h:mm"),
    (37, "#,##0 ;(#,##0)"),
    (38, "#,##0 ;[Red](#,##0)"),
    (39, "#,##0.00;(#,##0.00)"),
    (40, "#,##0.00;[Red](#,##0.00)"),
    (49, "@"),
];

/// A document's number format table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatTable {
    entries: BTreeMap<i32, FormatEntry>,
    next_custom: i32,
}

impl FormatTable {
    /// First key handed out to custom formats
    pub const FIRST_CUSTOM_ID: i32 = 164;

    /// Create a table holding only the built-in formats
    pub fn new() -> Self {
        let entries = BUILTIN_FORMATS
            .iter()
            .map(|(id, pattern)| (*id, FormatEntry::new(*pattern, Locale::default())))
            .collect();
        Self {
            entries,
            next_custom: Self::FIRST_CUSTOM_ID,
        }
    }

    /// Number of registered formats
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no formats
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a format by key
    pub fn get(&self, id: FormatId) -> Result<&FormatEntry> {
        self.entries
            .get(&id.0)
            .ok_or(ModelError::FormatNotFound(id.0))
    }

    /// Find the key of an existing `(pattern, locale)` entry
    pub fn query_key(&self, pattern: &str, locale: &Locale) -> Option<FormatId> {
        self.entries
            .iter()
            .find(|(_, e)| e.pattern == pattern && &e.locale == locale)
            .map(|(id, _)| FormatId(*id))
    }

    /// Register a new format and return its key
    ///
    /// Fails with [`ModelError::DuplicateFormat`] if the entry exists, so
    /// callers must query first.
    pub fn add_new(&mut self, pattern: &str, locale: &Locale) -> Result<FormatId> {
        validate_pattern(pattern)?;
        if self.query_key(pattern, locale).is_some() {
            return Err(ModelError::DuplicateFormat {
                pattern: pattern.to_string(),
                locale: locale.to_string(),
            });
        }

        let id = self.next_custom.max(self.max_key() + 1);
        self.entries
            .insert(id, FormatEntry::new(pattern, locale.clone()));
        self.next_custom = id + 1;
        Ok(FormatId(id))
    }

    /// Iterate over all entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (FormatId, &FormatEntry)> {
        self.entries.iter().map(|(id, e)| (FormatId(*id), e))
    }

    fn max_key(&self) -> i32 {
        self.entries.keys().next_back().copied().unwrap_or(0)
    }
}

impl Default for FormatTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject patterns the table cannot store
fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.trim().is_empty() {
        return Err(ModelError::InvalidPattern(pattern.to_string()));
    }
    // Literal text sections must be closed
    if pattern.chars().filter(|c| *c == '"').count() % 2 != 0 {
        return Err(ModelError::InvalidPattern(pattern.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins() {
        let table = FormatTable::new();
        let general = table.get(FormatId::GENERAL).unwrap();
        assert!(general.is_general());
        assert!(general.locale.is_default());
        assert_eq!(table.get(FormatId(11)).unwrap().pattern, "0.00E+00");
        assert!(matches!(
            table.get(FormatId(5)),
            Err(ModelError::FormatNotFound(5))
        ));
    }

    #[test]
    fn test_query_then_add() {
        let mut table = FormatTable::new();
        let locale = Locale::new("en", "US");
        assert_eq!(table.query_key("0.###", &locale), None);

        let id = table.add_new("0.###", &locale).unwrap();
        assert_eq!(id, FormatId(FormatTable::FIRST_CUSTOM_ID));
        assert_eq!(table.query_key("0.###", &locale), Some(id));
        // Same pattern, other locale: different entry
        assert_eq!(table.query_key("0.###", &Locale::default()), None);
    }

    #[test]
    fn test_add_duplicate_fails() {
        let mut table = FormatTable::new();
        let before = table.len();
        table.add_new("0.#", &Locale::default()).unwrap();
        let err = table.add_new("0.#", &Locale::default()).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateFormat { .. }));
        assert_eq!(table.len(), before + 1);
    }

    #[test]
    fn test_invalid_patterns() {
        let mut table = FormatTable::new();
        assert!(matches!(
            table.add_new("   ", &Locale::default()),
            Err(ModelError::InvalidPattern(_))
        ));
        assert!(matches!(
            table.add_new("0.0\"x", &Locale::default()),
            Err(ModelError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_locale_display() {
        assert_eq!(Locale::default().to_string(), "default");
        assert_eq!(Locale::new("de", "DE").to_string(), "de-DE");
    }
}
