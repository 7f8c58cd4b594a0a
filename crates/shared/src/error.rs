//! Application-wide error types.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every failure a caller can observe maps to exactly one of these kinds,
/// so API consumers can branch deterministically. Only `Infrastructure`
/// is eligible for caller-side retry.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A referenced parent record is missing or deleted.
    #[error("Referenced {kind} not found: {id}")]
    ParentNotFound {
        /// Kind of the missing parent (e.g. "category").
        kind: String,
        /// Id the request referenced.
        id: Uuid,
    },

    /// Target record missing or deleted.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Kind of the missing record.
        kind: String,
        /// Requested id.
        id: Uuid,
    },

    /// A translated name already exists for the language within the kind.
    #[error("Name '{name}' already exists for language '{lang}'")]
    DuplicateTranslation {
        /// Language code of the collision.
        lang: String,
        /// Colliding display name.
        name: String,
    },

    /// Delete blocked by live dependent records.
    #[error("{count} active {dependent} record(s) still reference this {kind}")]
    HasDependents {
        /// Kind of the record being deleted.
        kind: String,
        /// Kind of the blocking dependents.
        dependent: String,
        /// Number of live dependents found.
        count: u64,
    },

    /// Store or transport failure.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::ParentNotFound { .. } | Self::NotFound { .. } => 404,
            Self::DuplicateTranslation { .. } | Self::HasDependents { .. } => 409,
            Self::Infrastructure(_) => 500,
        }
    }

    /// Returns the stable error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::ParentNotFound { .. } => "PARENT_NOT_FOUND",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::DuplicateTranslation { .. } => "DUPLICATE_TRANSLATION",
            Self::HasDependents { .. } => "HAS_DEPENDENTS",
            Self::Infrastructure(_) => "INFRASTRUCTURE_ERROR",
        }
    }

    /// Whether a caller may retry the request unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Infrastructure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nil() -> Uuid {
        Uuid::nil()
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(
            AppError::ParentNotFound {
                kind: "category".into(),
                id: nil()
            }
            .status_code(),
            404
        );
        assert_eq!(
            AppError::NotFound {
                kind: "country".into(),
                id: nil()
            }
            .status_code(),
            404
        );
        assert_eq!(
            AppError::DuplicateTranslation {
                lang: "en".into(),
                name: "Food".into()
            }
            .status_code(),
            409
        );
        assert_eq!(
            AppError::HasDependents {
                kind: "category".into(),
                dependent: "account".into(),
                count: 1
            }
            .status_code(),
            409
        );
        assert_eq!(AppError::Infrastructure(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_FAILED"
        );
        assert_eq!(
            AppError::ParentNotFound {
                kind: "category".into(),
                id: nil()
            }
            .error_code(),
            "PARENT_NOT_FOUND"
        );
        assert_eq!(
            AppError::NotFound {
                kind: "city".into(),
                id: nil()
            }
            .error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            AppError::DuplicateTranslation {
                lang: "en".into(),
                name: "Food".into()
            }
            .error_code(),
            "DUPLICATE_TRANSLATION"
        );
        assert_eq!(
            AppError::HasDependents {
                kind: "category".into(),
                dependent: "sub_category".into(),
                count: 3
            }
            .error_code(),
            "HAS_DEPENDENTS"
        );
        assert_eq!(
            AppError::Infrastructure(String::new()).error_code(),
            "INFRASTRUCTURE_ERROR"
        );
    }

    #[test]
    fn test_only_infrastructure_is_retryable() {
        assert!(AppError::Infrastructure("timeout".into()).is_retryable());
        assert!(!AppError::Validation("bad".into()).is_retryable());
        assert!(
            !AppError::DuplicateTranslation {
                lang: "en".into(),
                name: "Food".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_error_display() {
        let err = AppError::DuplicateTranslation {
            lang: "en".into(),
            name: "Food".into(),
        };
        assert_eq!(
            err.to_string(),
            "Name 'Food' already exists for language 'en'"
        );

        let err = AppError::HasDependents {
            kind: "category".into(),
            dependent: "account".into(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "2 active account record(s) still reference this category"
        );
    }
}
