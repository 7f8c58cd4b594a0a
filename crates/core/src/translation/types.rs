//! Translation input types.

use serde::{Deserialize, Serialize};

/// One requested (language, name) pair for an entity.
///
/// Drafts arrive shape-validated (lengths, required fields) from the API
/// boundary; the values here are still raw request text and are only
/// case-folded where a rule demands it, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationDraft {
    /// Language code (e.g. "en", "pt-br").
    pub lang: String,
    /// Display name in that language.
    pub name: String,
}

impl TranslationDraft {
    /// Creates a draft from raw request values.
    #[must_use]
    pub fn new(lang: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            name: name.into(),
        }
    }

    /// Case-folded language code, used for comparisons.
    #[must_use]
    pub fn lang_folded(&self) -> String {
        self.lang.trim().to_lowercase()
    }

    /// Case-folded display name, used for collision checks.
    #[must_use]
    pub fn name_folded(&self) -> String {
        self.name.trim().to_lowercase()
    }
}
