//! Resolution of `(pattern, locale)` pairs to format keys

use std::collections::HashMap;

use sheetfit_model::{FormatId, Locale, ModelError, NumberFormats};

use crate::error::{FormatError, Result};

/// Resolves patterns against a document's number format table
///
/// Lookups go through the table first; a format is created only when the
/// table does not know it yet. Resolved keys are remembered for the life of
/// the registry, which is one filter run.
pub struct FormatRegistry<'a> {
    formats: &'a dyn NumberFormats,
    resolved: HashMap<(String, Locale), FormatId>,
    created: usize,
}

impl<'a> FormatRegistry<'a> {
    pub fn new(formats: &'a dyn NumberFormats) -> Self {
        Self {
            formats,
            resolved: HashMap::new(),
            created: 0,
        }
    }

    /// Key of `pattern` under `locale`, creating the format if absent
    pub fn resolve_or_create(&mut self, pattern: &str, locale: &Locale) -> Result<FormatId> {
        let key = (pattern.to_string(), locale.clone());
        if let Some(id) = self.resolved.get(&key) {
            return Ok(*id);
        }

        let id = match self.formats.query_key(pattern, locale)? {
            Some(id) => id,
            None => self.create(pattern, locale)?,
        };
        self.resolved.insert(key, id);
        Ok(id)
    }

    /// Number of formats this registry added to the table
    pub fn created(&self) -> usize {
        self.created
    }

    fn create(&mut self, pattern: &str, locale: &Locale) -> Result<FormatId> {
        match self.formats.add_new(pattern, locale) {
            Ok(id) => {
                self.created += 1;
                tracing::debug!(pattern, %locale, id = id.0, "created number format");
                Ok(id)
            }
            // Another writer added it between our query and add
            Err(ModelError::DuplicateFormat { .. }) => self
                .formats
                .query_key(pattern, locale)?
                .ok_or_else(|| FormatError::Unresolved {
                    pattern: pattern.to_string(),
                    locale: locale.to_string(),
                }),
            Err(e) => Err(e.into()),
        }
    }
}
