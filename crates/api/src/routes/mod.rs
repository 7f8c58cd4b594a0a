//! API route definitions.
//!
//! Every master-data kind exposes the same surface: create, fetch, full
//! translation replacement, guarded delete, paginated localized listing,
//! and dropdown options. Request shapes shared by all kinds live here so
//! the five route modules cannot drift apart.

use axum::Router;
use serde::{Deserialize, Serialize};
use validator::Validate;

use mondera_core::TranslationDraft;
use mondera_shared::{Language, PageRequest};

use crate::AppState;

pub mod accounts;
pub mod categories;
pub mod cities;
pub mod countries;
pub mod health;
pub mod respond;
pub mod subcategories;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(categories::routes())
        .merge(subcategories::routes())
        .merge(countries::routes())
        .merge(cities::routes())
        .merge(accounts::routes())
}

/// One translated name in a write request.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct TranslationPayload {
    /// Language code.
    #[validate(length(min = 2, max = 10))]
    pub lang: String,
    /// Display name.
    #[validate(length(min = 3, max = 100))]
    pub name: String,
}

/// Converts request payloads into engine drafts.
pub(crate) fn to_drafts(translations: Vec<TranslationPayload>) -> Vec<TranslationDraft> {
    translations
        .into_iter()
        .map(|t| TranslationDraft::new(t.lang, t.name))
        .collect()
}

/// Query parameters for paginated localized lists.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Requested language (defaults to "en").
    pub lang: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

impl ListQuery {
    pub(crate) fn language(&self) -> Language {
        Language::new(self.lang.as_deref().unwrap_or_default())
    }

    pub(crate) fn page_request(&self) -> PageRequest {
        let mut request = PageRequest::default();
        if let Some(page) = self.page {
            request.page = page;
        }
        if let Some(per_page) = self.per_page {
            request.per_page = per_page;
        }
        request
    }
}

/// Query parameters for dropdown option lists.
#[derive(Debug, Deserialize)]
pub struct OptionsQuery {
    /// Requested language (defaults to "en").
    pub lang: Option<String>,
}

impl OptionsQuery {
    pub(crate) fn language(&self) -> Language {
        Language::new(self.lang.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(lang: &str, name: &str) -> TranslationPayload {
        TranslationPayload {
            lang: lang.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_translation_payload_shape_bounds() {
        assert!(payload("en", "Food").validate().is_ok());
        assert!(payload("pt-br", "Alimentação").validate().is_ok());

        // Language must be 2..=10 characters.
        assert!(payload("e", "Food").validate().is_err());
        assert!(payload("a-very-long-code", "Food").validate().is_err());

        // Name must be 3..=100 characters.
        assert!(payload("en", "Fo").validate().is_err());
        assert!(payload("en", &"x".repeat(101)).validate().is_err());
    }

    #[test]
    fn test_list_query_defaults() {
        let query = ListQuery {
            lang: None,
            page: None,
            per_page: None,
        };
        assert_eq!(query.language().as_str(), "en");

        let request = query.page_request();
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, 10);
    }

    #[test]
    fn test_list_query_overrides() {
        let query = ListQuery {
            lang: Some("FR".to_string()),
            page: Some(3),
            per_page: Some(25),
        };
        assert_eq!(query.language().as_str(), "fr");

        let request = query.page_request();
        assert_eq!(request.page, 3);
        assert_eq!(request.per_page, 25);
    }

    #[test]
    fn test_to_drafts_preserves_values() {
        let drafts = to_drafts(vec![payload("en", "Food"), payload("fr", "Nourriture")]);
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].lang, "en");
        assert_eq!(drafts[1].name, "Nourriture");
    }
}
