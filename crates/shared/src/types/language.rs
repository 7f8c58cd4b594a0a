//! Requested-language handling for localized reads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback language when a request does not name one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A requested language code, case-folded for comparison.
///
/// Language codes are matched case-insensitively everywhere (a translation
/// stored as `EN` must be found by a request for `en`), so the code is
/// folded to lowercase at the boundary and passed explicitly to every read
/// operation rather than read from ambient locale state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Language(String);

impl Language {
    /// Creates a language from a raw request value, trimming and folding it.
    /// Blank input falls back to [`DEFAULT_LANGUAGE`].
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let folded = raw.trim().to_lowercase();
        if folded.is_empty() {
            Self::default()
        } else {
            Self(folded)
        }
    }

    /// The folded language code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Language {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl From<String> for Language {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_case_and_whitespace() {
        assert_eq!(Language::new(" EN ").as_str(), "en");
        assert_eq!(Language::new("pt-BR").as_str(), "pt-br");
    }

    #[test]
    fn test_blank_falls_back_to_default() {
        assert_eq!(Language::new("").as_str(), DEFAULT_LANGUAGE);
        assert_eq!(Language::new("   ").as_str(), DEFAULT_LANGUAGE);
        assert_eq!(Language::default().as_str(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_folded_codes_compare_equal() {
        assert_eq!(Language::new("FR"), Language::new("fr"));
    }
}
