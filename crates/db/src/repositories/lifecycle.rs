//! The generic entity lifecycle engine.
//!
//! `MasterRepository<K>` runs the shared policy for every translated master
//! kind: create with an initial translation batch, read with live
//! translations, update as retire-all-then-insert, and guarded soft delete.
//! Each operation is one database transaction stamped with a single `now`;
//! any failure rolls the whole operation back, so a failed call leaves the
//! store untouched.

use std::marker::PhantomData;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, SqlErr, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use mondera_core::{TranslationDraft, validate_batch};

use super::kind::{AuditView, MasterKind, TranslationKind, TranslationView, WriteStamp, live};
use super::uniqueness::translation_exists;
use crate::error::MasterError;

/// Shorthand for a kind's translation configuration.
pub(crate) type TransOf<K> = <K as MasterKind>::Translation;

/// Full view of one master row with its live translations.
#[derive(Debug, Clone)]
pub struct MasterDetail<K: MasterKind> {
    /// Row id.
    pub id: Uuid,
    /// Kind-specific fields (parent references, extras).
    pub fields: K::Fields,
    /// All live translations, every language.
    pub translations: Vec<TranslationView>,
    /// Audit stamps.
    pub audit: AuditView,
}

/// Generic repository driving the lifecycle of one master kind.
#[derive(Debug, Clone)]
pub struct MasterRepository<K> {
    db: DatabaseConnection,
    kind: PhantomData<fn() -> K>,
}

impl<K: MasterKind> MasterRepository<K> {
    /// Creates a repository bound to a connection pool.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            kind: PhantomData,
        }
    }

    /// Read access to the underlying connection, for the listing queries.
    pub(crate) fn conn(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Creates a master row with its initial translation batch.
    ///
    /// All-or-nothing: a parent failure or any name collision creates
    /// nothing. Returns the new row's id.
    ///
    /// # Errors
    ///
    /// `Validation` for a bad batch, `ParentNotFound` for a dead or missing
    /// parent reference, `DuplicateTranslation` for a name collision,
    /// `Database` for store failures.
    pub async fn create(
        &self,
        fields: K::Fields,
        drafts: Vec<TranslationDraft>,
        actor: Uuid,
    ) -> Result<Uuid, MasterError> {
        validate_batch(&drafts)?;

        let stamp = WriteStamp::now(actor);
        let txn = self.db.begin().await?;

        K::verify_parents(&txn, &fields).await?;

        // The row does not exist yet, so nothing is excluded from scope.
        for draft in &drafts {
            if translation_exists::<TransOf<K>, _>(&txn, draft, None).await? {
                return Err(duplicate(draft));
            }
        }

        let id = Uuid::new_v4();
        K::insert_master(&txn, id, &fields, &stamp).await?;
        for draft in &drafts {
            TransOf::<K>::insert_row(&txn, id, draft, &stamp)
                .await
                .map_err(|err| map_insert_error(err, draft))?;
        }

        txn.commit().await?;

        debug!(kind = K::KIND, id = %id, "master row created");
        Ok(id)
    }

    /// Fetches one live row with all of its live translations.
    ///
    /// # Errors
    ///
    /// `NotFound` if the row is absent, soft-deleted, or outside the
    /// actor's scope.
    pub async fn get_by_id(&self, id: Uuid, actor: Uuid) -> Result<MasterDetail<K>, MasterError> {
        let model = self
            .find_active(&self.db, id, actor)
            .await?
            .ok_or(MasterError::NotFound { kind: K::KIND, id })?;

        let translations = <TransOf<K> as TranslationKind>::Entity::find()
            .filter(TransOf::<K>::owner_column().eq(id))
            .filter(live(TransOf::<K>::deleted_column()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(TransOf::<K>::view)
            .collect();

        Ok(MasterDetail {
            id,
            fields: K::fields_of(&model),
            translations,
            audit: K::audit_of(&model),
        })
    }

    /// Replaces the row's translation set and mutable fields.
    ///
    /// The translation set is fully replaced, never merged: every live
    /// translation is retired and the new batch inserted, all under one
    /// stamp. A collision with another live row of the kind aborts with
    /// prior state untouched; the row's own current names never collide.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Validation`, `ParentNotFound`, `DuplicateTranslation`,
    /// or `Database`.
    pub async fn update(
        &self,
        id: Uuid,
        fields: K::Fields,
        drafts: Vec<TranslationDraft>,
        actor: Uuid,
    ) -> Result<(), MasterError> {
        validate_batch(&drafts)?;

        let stamp = WriteStamp::now(actor);
        let txn = self.db.begin().await?;

        let model = self
            .find_active(&txn, id, actor)
            .await?
            .ok_or(MasterError::NotFound { kind: K::KIND, id })?;

        K::verify_parents(&txn, &fields).await?;

        for draft in &drafts {
            if translation_exists::<TransOf<K>, _>(&txn, draft, Some(id)).await? {
                return Err(duplicate(draft));
            }
        }

        K::update_master(&txn, model, &fields, &stamp).await?;
        retire_translations::<TransOf<K>>(&txn, id, &stamp).await?;
        for draft in &drafts {
            TransOf::<K>::insert_row(&txn, id, draft, &stamp)
                .await
                .map_err(|err| map_insert_error(err, draft))?;
        }

        txn.commit().await?;

        debug!(kind = K::KIND, id = %id, "translations replaced");
        Ok(())
    }

    /// Soft-deletes a row and cascades to its live translations.
    ///
    /// Blocked while any live dependent still references the row. The row
    /// and its translations share one deletion stamp; their history
    /// persists but they vanish from every read and collision check, so
    /// the names become reusable.
    ///
    /// # Errors
    ///
    /// `NotFound`, `HasDependents`, or `Database`.
    pub async fn delete(&self, id: Uuid, actor: Uuid) -> Result<(), MasterError> {
        let stamp = WriteStamp::now(actor);
        let txn = self.db.begin().await?;

        self.find_active(&txn, id, actor)
            .await?
            .ok_or(MasterError::NotFound { kind: K::KIND, id })?;

        if let Some((dependent, count)) = K::active_dependents(&txn, id).await? {
            return Err(MasterError::HasDependents {
                kind: K::KIND,
                dependent,
                count,
            });
        }

        retire_translations::<TransOf<K>>(&txn, id, &stamp).await?;
        soft_delete_master::<K>(&txn, id, &stamp).await?;

        txn.commit().await?;

        debug!(kind = K::KIND, id = %id, "master row soft-deleted");
        Ok(())
    }

    /// Finds one live row by id within the actor's scope.
    pub(crate) async fn find_active<C>(
        &self,
        conn: &C,
        id: Uuid,
        actor: Uuid,
    ) -> Result<Option<K::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut query = K::Entity::find()
            .filter(K::id_column().eq(id))
            .filter(live(K::deleted_column()));
        if let Some(scope) = K::owner_scope_column() {
            query = query.filter(scope.eq(actor));
        }
        query.one(conn).await
    }
}

fn duplicate(draft: &TranslationDraft) -> MasterError {
    MasterError::DuplicateTranslation {
        lang: draft.lang_folded(),
        name: draft.name.trim().to_string(),
    }
}

/// Maps a lost check-then-insert race on the partial unique indexes to the
/// same error the pre-check would have produced.
fn map_insert_error(err: DbErr, draft: &TranslationDraft) -> MasterError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate(draft),
        _ => MasterError::Database(err),
    }
}

/// Marks every live translation of `owner` deleted under one stamp.
async fn retire_translations<T: TranslationKind>(
    txn: &DatabaseTransaction,
    owner: Uuid,
    stamp: &WriteStamp,
) -> Result<(), DbErr> {
    T::Entity::update_many()
        .col_expr(T::deleted_column(), Expr::value(true))
        .col_expr(T::deleted_at_column(), Expr::value(stamp.at))
        .col_expr(T::deleted_by_column(), Expr::value(stamp.actor))
        .filter(T::owner_column().eq(owner))
        .filter(live(T::deleted_column()))
        .exec(txn)
        .await?;
    Ok(())
}

/// Marks the master row deleted under the operation's stamp.
async fn soft_delete_master<K: MasterKind>(
    txn: &DatabaseTransaction,
    id: Uuid,
    stamp: &WriteStamp,
) -> Result<(), DbErr> {
    K::Entity::update_many()
        .col_expr(K::deleted_column(), Expr::value(true))
        .col_expr(K::deleted_at_column(), Expr::value(stamp.at))
        .col_expr(K::deleted_by_column(), Expr::value(stamp.actor))
        .filter(K::id_column().eq(id))
        .filter(live(K::deleted_column()))
        .exec(txn)
        .await?;
    Ok(())
}
