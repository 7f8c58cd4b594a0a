//! Pure model of the name-uniqueness scope.
//!
//! The persistence layer answers "does this name exist?" with a SQL query;
//! this module states the same rule over an in-memory set so the semantics
//! can be pinned down by property tests without a database. The two must
//! agree: case-insensitive exact match, per language, across all *active*
//! translations of one entity kind, optionally excluding one owning entity.

use std::collections::HashSet;
use uuid::Uuid;

use super::types::TranslationDraft;

/// One active translation row as seen by the uniqueness rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeEntry {
    /// Entity owning the translation.
    pub owner: Uuid,
    /// Case-folded language code.
    pub lang: String,
    /// Case-folded display name.
    pub name: String,
}

impl ScopeEntry {
    /// Builds an entry from raw stored values, folding case.
    #[must_use]
    pub fn new(owner: Uuid, lang: &str, name: &str) -> Self {
        Self {
            owner,
            lang: lang.trim().to_lowercase(),
            name: name.trim().to_lowercase(),
        }
    }
}

/// Whether `draft`'s name is free within the kind's active translations.
///
/// `exclude_owner` is supplied on the update path so an entity may keep
/// its own current name. Soft-deleted rows must never be present in
/// `active`: a retired name is reusable.
#[must_use]
pub fn is_name_available(
    active: &HashSet<ScopeEntry>,
    draft: &TranslationDraft,
    exclude_owner: Option<Uuid>,
) -> bool {
    let lang = draft.lang_folded();
    let name = draft.name_folded();

    !active.iter().any(|entry| {
        entry.lang == lang && entry.name == name && Some(entry.owner) != exclude_owner
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn uuid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn active(entries: &[(Uuid, &str, &str)]) -> HashSet<ScopeEntry> {
        entries
            .iter()
            .map(|(owner, lang, name)| ScopeEntry::new(*owner, lang, name))
            .collect()
    }

    #[test]
    fn test_collision_is_case_insensitive() {
        let set = active(&[(uuid(1), "en", "Food")]);
        assert!(!is_name_available(
            &set,
            &TranslationDraft::new("EN", "food"),
            None
        ));
    }

    #[test]
    fn test_same_name_other_language_is_available() {
        let set = active(&[(uuid(1), "en", "Food")]);
        assert!(is_name_available(
            &set,
            &TranslationDraft::new("fr", "Food"),
            None
        ));
    }

    #[test]
    fn test_entity_keeps_its_own_name_on_update() {
        let owner = uuid(1);
        let set = active(&[(owner, "en", "Food")]);

        // Unchanged name, excluded owner: allowed.
        assert!(is_name_available(
            &set,
            &TranslationDraft::new("en", "Food"),
            Some(owner)
        ));
        // Another entity asking for the same name: blocked.
        assert!(!is_name_available(
            &set,
            &TranslationDraft::new("en", "Food"),
            Some(uuid(2))
        ));
    }

    #[test]
    fn test_retired_name_is_reusable() {
        // A soft-deleted row is simply absent from the active scope.
        let set = active(&[]);
        assert!(is_name_available(
            &set,
            &TranslationDraft::new("en", "Food"),
            None
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A name present in the scope is never available to a different owner,
        /// whatever the request casing.
        #[test]
        fn prop_present_name_blocks_other_owners(
            owner_bits in any::<u128>(),
            other_bits in any::<u128>(),
            lang in "[a-z]{2,5}",
            name in "[A-Za-z][A-Za-z ]{2,20}",
        ) {
            prop_assume!(owner_bits != other_bits);
            let set = active(&[(uuid(owner_bits), &lang, &name)]);

            let shouting = TranslationDraft::new(lang.to_uppercase(), name.to_uppercase());
            prop_assert!(!is_name_available(&set, &shouting, None));
            prop_assert!(!is_name_available(&set, &shouting, Some(uuid(other_bits))));
            prop_assert!(is_name_available(&set, &shouting, Some(uuid(owner_bits))));
        }

        /// A name absent from the scope is always available.
        #[test]
        fn prop_absent_name_is_available(
            lang in "[a-z]{2,5}",
            stored in "[a-z]{3,12}",
            requested in "[a-z]{3,12}",
        ) {
            prop_assume!(stored != requested);
            let set = active(&[(uuid(1), &lang, &stored)]);
            prop_assert!(is_name_available(
                &set,
                &TranslationDraft::new(&lang, &requested),
                None
            ));
        }
    }
}
