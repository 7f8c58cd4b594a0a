//! Error types for master-data operations.

use sea_orm::DbErr;
use uuid::Uuid;

use mondera_core::BatchError;
use mondera_shared::AppError;

/// Error types for the lifecycle engine.
///
/// Every variant except `Database` is detected before any mutation (or
/// aborts the surrounding transaction), so a failed call leaves the store
/// exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum MasterError {
    /// Request violates a batch-level business rule.
    #[error("invalid request: {0}")]
    Validation(String),

    /// A referenced parent record is missing or deleted.
    #[error("referenced {kind} not found: {id}")]
    ParentNotFound {
        /// Kind of the missing parent.
        kind: &'static str,
        /// Id the request referenced.
        id: Uuid,
    },

    /// Target record missing or deleted.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Kind of the missing record.
        kind: &'static str,
        /// Requested id.
        id: Uuid,
    },

    /// A translated name collides with another live record of the kind.
    #[error("name '{name}' already exists for language '{lang}'")]
    DuplicateTranslation {
        /// Language code of the collision.
        lang: String,
        /// Colliding display name as submitted.
        name: String,
    },

    /// Delete blocked by live dependent records.
    #[error("{count} active {dependent} record(s) still reference this {kind}")]
    HasDependents {
        /// Kind of the record being deleted.
        kind: &'static str,
        /// Kind of the blocking dependents.
        dependent: &'static str,
        /// Number of live dependents found.
        count: u64,
    },

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl From<BatchError> for MasterError {
    fn from(err: BatchError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<MasterError> for AppError {
    fn from(err: MasterError) -> Self {
        match err {
            MasterError::Validation(message) => Self::Validation(message),
            MasterError::ParentNotFound { kind, id } => Self::ParentNotFound {
                kind: kind.to_string(),
                id,
            },
            MasterError::NotFound { kind, id } => Self::NotFound {
                kind: kind.to_string(),
                id,
            },
            MasterError::DuplicateTranslation { lang, name } => {
                Self::DuplicateTranslation { lang, name }
            }
            MasterError::HasDependents {
                kind,
                dependent,
                count,
            } => Self::HasDependents {
                kind: kind.to_string(),
                dependent: dependent.to_string(),
                count,
            },
            MasterError::Database(db_err) => Self::Infrastructure(db_err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn master_errors() -> Vec<(MasterError, &'static str, u16)> {
        let id = Uuid::nil();
        vec![
            (
                MasterError::Validation("bad".into()),
                "VALIDATION_FAILED",
                400,
            ),
            (
                MasterError::ParentNotFound {
                    kind: "category",
                    id,
                },
                "PARENT_NOT_FOUND",
                404,
            ),
            (MasterError::NotFound { kind: "city", id }, "NOT_FOUND", 404),
            (
                MasterError::DuplicateTranslation {
                    lang: "en".into(),
                    name: "Food".into(),
                },
                "DUPLICATE_TRANSLATION",
                409,
            ),
            (
                MasterError::HasDependents {
                    kind: "category",
                    dependent: "account",
                    count: 2,
                },
                "HAS_DEPENDENTS",
                409,
            ),
            (
                MasterError::Database(DbErr::Custom("boom".into())),
                "INFRASTRUCTURE_ERROR",
                500,
            ),
        ]
    }

    #[test]
    fn test_every_kind_maps_to_a_distinct_app_error() {
        for (err, code, status) in master_errors() {
            let app: AppError = err.into();
            assert_eq!(app.error_code(), code);
            assert_eq!(app.status_code(), status);
        }
    }

    #[rstest]
    #[case(BatchError::Empty)]
    #[case(BatchError::BlankLanguage { index: 0 })]
    #[case(BatchError::DuplicateLanguage { lang: "en".into() })]
    fn test_batch_errors_become_validation(#[case] batch_err: BatchError) {
        let err: MasterError = batch_err.into();
        assert!(matches!(err, MasterError::Validation(_)));

        let app: AppError = err.into();
        assert_eq!(app.error_code(), "VALIDATION_FAILED");
    }

    #[test]
    fn test_only_database_errors_are_retryable() {
        for (err, _, _) in master_errors() {
            let retryable = matches!(err, MasterError::Database(_));
            let app: AppError = err.into();
            assert_eq!(app.is_retryable(), retryable);
        }
    }
}
