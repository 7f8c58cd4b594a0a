//! Entity-kind configuration for the lifecycle engine.
//!
//! A [`MasterKind`] describes one translated master table: its entity pair,
//! its kind-specific mutable fields, how its parent references are verified,
//! and which live dependents block deletion. The engine is generic over this
//! trait; the five concrete kinds live in [`super::kinds`].

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, FromQueryResult, IntoSimpleExpr,
    ModelTrait,
};
use serde::Serialize;
use uuid::Uuid;

use mondera_core::TranslationDraft;

use crate::error::MasterError;

/// The live-row predicate.
///
/// Soft-deleted rows are logically nonexistent; every read, collision
/// check, and dependency check filters through this one predicate so the
/// rule cannot drift between call sites.
pub(crate) fn live<C: ColumnTrait>(deleted_column: C) -> SimpleExpr {
    deleted_column.eq(false)
}

/// Actor and instant shared by every row written in one logical operation.
///
/// Sampled once per operation so a batch's stamps are identical.
#[derive(Debug, Clone, Copy)]
pub struct WriteStamp {
    /// Acting principal, recorded for audit attribution.
    pub actor: Uuid,
    /// The operation's single "now".
    pub at: DateTimeWithTimeZone,
}

impl WriteStamp {
    /// Samples the clock once for a new logical operation.
    #[must_use]
    pub fn now(actor: Uuid) -> Self {
        Self {
            actor,
            at: Utc::now().into(),
        }
    }
}

/// Read view of one active translation row.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationView {
    /// Translation row id.
    pub id: Uuid,
    /// Language code as stored.
    pub lang: String,
    /// Display name as stored.
    pub name: String,
}

/// Audit fields exposed on detail views.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AuditView {
    /// Creation instant.
    pub created_at: DateTimeWithTimeZone,
    /// Last update instant.
    pub updated_at: DateTimeWithTimeZone,
}

/// Fields payload for kinds without parent references or extra columns.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoFields;

/// Configuration of one kind's translation table.
#[async_trait]
pub trait TranslationKind: Send + Sync + 'static {
    /// `SeaORM` entity of the translation table.
    type Entity: EntityTrait<Model = Self::Model, Column = Self::Column>;
    /// Row model.
    type Model: ModelTrait<Entity = Self::Entity> + FromQueryResult + Send + Sync;
    /// Column handle.
    type Column: ColumnTrait + IntoSimpleExpr;

    /// Foreign key pointing at the owning master row.
    fn owner_column() -> Self::Column;
    /// Language code column.
    fn lang_column() -> Self::Column;
    /// Display name column.
    fn name_column() -> Self::Column;
    /// Soft-delete flag column.
    fn deleted_column() -> Self::Column;
    /// Soft-delete instant column.
    fn deleted_at_column() -> Self::Column;
    /// Soft-delete actor column.
    fn deleted_by_column() -> Self::Column;

    /// Reads the owning master id off a row.
    fn owner_of(model: &Self::Model) -> Uuid;
    /// Converts a row into its read view.
    fn view(model: Self::Model) -> TranslationView;

    /// Inserts one fresh translation row for `owner` carrying `stamp`.
    async fn insert_row(
        txn: &DatabaseTransaction,
        owner: Uuid,
        draft: &TranslationDraft,
        stamp: &WriteStamp,
    ) -> Result<(), DbErr>;
}

/// Configuration of one master table for the lifecycle engine.
#[async_trait]
pub trait MasterKind: Send + Sync + Sized + 'static {
    /// `SeaORM` entity of the master table.
    type Entity: EntityTrait<Model = Self::Model, Column = Self::Column>;
    /// Row model.
    type Model: ModelTrait<Entity = Self::Entity> + FromQueryResult + Send + Sync;
    /// Column handle.
    type Column: ColumnTrait + IntoSimpleExpr;
    /// Translation table configuration for this kind.
    type Translation: TranslationKind;
    /// Kind-specific mutable payload: parent references and extra fields.
    type Fields: Clone + std::fmt::Debug + Send + Sync;

    /// Lowercase singular label used in errors and logs.
    const KIND: &'static str;

    /// Primary key column.
    fn id_column() -> Self::Column;
    /// Soft-delete flag column.
    fn deleted_column() -> Self::Column;
    /// Soft-delete instant column.
    fn deleted_at_column() -> Self::Column;
    /// Soft-delete actor column.
    fn deleted_by_column() -> Self::Column;
    /// Creation instant column, the listing sort key.
    fn created_at_column() -> Self::Column;

    /// Column restricting visibility to the acting principal, if any.
    fn owner_scope_column() -> Option<Self::Column> {
        None
    }

    /// Reads the primary key off a row.
    fn model_id(model: &Self::Model) -> Uuid;
    /// Extracts the kind-specific fields off a row.
    fn fields_of(model: &Self::Model) -> Self::Fields;
    /// Extracts the audit view off a row.
    fn audit_of(model: &Self::Model) -> AuditView;

    /// Verifies every declared parent reference resolves to a live row.
    async fn verify_parents(
        _txn: &DatabaseTransaction,
        _fields: &Self::Fields,
    ) -> Result<(), MasterError> {
        Ok(())
    }

    /// Counts live dependents that block deletion, returning the first
    /// blocking dependent label and its count.
    async fn active_dependents(
        _txn: &DatabaseTransaction,
        _id: Uuid,
    ) -> Result<Option<(&'static str, u64)>, DbErr> {
        Ok(None)
    }

    /// Inserts the master row.
    async fn insert_master(
        txn: &DatabaseTransaction,
        id: Uuid,
        fields: &Self::Fields,
        stamp: &WriteStamp,
    ) -> Result<(), DbErr>;

    /// Applies the mutable fields and audit stamp to an existing row.
    async fn update_master(
        txn: &DatabaseTransaction,
        model: Self::Model,
        fields: &Self::Fields,
        stamp: &WriteStamp,
    ) -> Result<(), DbErr>;
}

/// A master kind that aggregates a child kind in nested listings.
pub trait ParentKind: MasterKind {
    /// Child kind aggregated under this kind.
    type Child: MasterKind;

    /// Foreign-key column on the child pointing at this kind.
    fn child_parent_column() -> <Self::Child as MasterKind>::Column;
    /// Reads that foreign key off a child row.
    fn child_parent_of(child: &<Self::Child as MasterKind>::Model) -> Uuid;
}
