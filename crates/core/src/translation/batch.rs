//! Batch validation for translation writes.

use std::collections::HashSet;

use thiserror::Error;

use super::types::TranslationDraft;

/// Rejection reasons for a translation batch.
///
/// These are business invariants the shape validator cannot express:
/// shape validation sees each item in isolation, while the one-active
/// -translation-per-language rule is a property of the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// The batch contained no translations at all.
    #[error("at least one translation is required")]
    Empty,

    /// A language code was blank after trimming.
    #[error("translation #{index} has a blank language code")]
    BlankLanguage {
        /// Zero-based position in the submitted batch.
        index: usize,
    },

    /// A display name was blank after trimming.
    #[error("translation #{index} has a blank name")]
    BlankName {
        /// Zero-based position in the submitted batch.
        index: usize,
    },

    /// The same language appeared twice (case-insensitively) in one batch.
    #[error("language '{lang}' appears more than once in the batch")]
    DuplicateLanguage {
        /// The folded language code that repeated.
        lang: String,
    },
}

/// Validates a translation batch before any store access.
///
/// An entity may hold at most one active translation per language, and a
/// write replaces the whole set at once, so a batch that names the same
/// language twice can never be applied consistently and is rejected here.
///
/// # Errors
///
/// Returns the first violated rule; the caller treats any error as a
/// request-level validation failure with no side effects.
pub fn validate_batch(drafts: &[TranslationDraft]) -> Result<(), BatchError> {
    if drafts.is_empty() {
        return Err(BatchError::Empty);
    }

    let mut seen_langs: HashSet<String> = HashSet::with_capacity(drafts.len());

    for (index, draft) in drafts.iter().enumerate() {
        let lang = draft.lang_folded();
        if lang.is_empty() {
            return Err(BatchError::BlankLanguage { index });
        }
        if draft.name_folded().is_empty() {
            return Err(BatchError::BlankName { index });
        }
        if !seen_langs.insert(lang.clone()) {
            return Err(BatchError::DuplicateLanguage { lang });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn draft(lang: &str, name: &str) -> TranslationDraft {
        TranslationDraft::new(lang, name)
    }

    #[test]
    fn test_empty_batch_rejected() {
        assert_eq!(validate_batch(&[]), Err(BatchError::Empty));
    }

    #[test]
    fn test_valid_batch_accepted() {
        let batch = [draft("en", "Food"), draft("fr", "Nourriture")];
        assert_eq!(validate_batch(&batch), Ok(()));
    }

    #[test]
    fn test_blank_language_rejected() {
        let batch = [draft("en", "Food"), draft("   ", "Essen")];
        assert_eq!(
            validate_batch(&batch),
            Err(BatchError::BlankLanguage { index: 1 })
        );
    }

    #[test]
    fn test_blank_name_rejected() {
        let batch = [draft("en", "  ")];
        assert_eq!(validate_batch(&batch), Err(BatchError::BlankName { index: 0 }));
    }

    #[test]
    fn test_duplicate_language_rejected_case_insensitively() {
        let batch = [draft("en", "Food"), draft("EN", "Groceries")];
        assert_eq!(
            validate_batch(&batch),
            Err(BatchError::DuplicateLanguage { lang: "en".into() })
        );
    }

    #[test]
    fn test_same_name_in_different_languages_is_fine() {
        let batch = [draft("en", "Hotel"), draft("de", "Hotel")];
        assert_eq!(validate_batch(&batch), Ok(()));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A batch of distinct languages with non-blank names always passes.
        #[test]
        fn prop_distinct_languages_accepted(
            langs in proptest::collection::hash_set("[a-z]{2,5}", 1..6),
        ) {
            let batch: Vec<TranslationDraft> = langs
                .iter()
                .enumerate()
                .map(|(i, lang)| draft(lang, &format!("Name {i}")))
                .collect();
            prop_assert_eq!(validate_batch(&batch), Ok(()));
        }

        /// Repeating any language, whatever the casing, always fails.
        #[test]
        fn prop_repeated_language_rejected(
            lang in "[a-z]{2,5}",
            upper in any::<bool>(),
        ) {
            let second = if upper { lang.to_uppercase() } else { lang.clone() };
            let batch = [draft(&lang, "First"), draft(&second, "Second")];
            prop_assert_eq!(
                validate_batch(&batch),
                Err(BatchError::DuplicateLanguage { lang: lang.clone() })
            );
        }
    }
}
