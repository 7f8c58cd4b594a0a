//! Dependency guard: live-dependent counting before parent deletion.
//!
//! A parent may only be soft-deleted once no live child row references it.
//! The count applies the same soft-delete filter as every other read; a
//! child that was itself soft-deleted no longer blocks its parent. This
//! never mutates anything.

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use super::kind::live;

/// Counts live rows in `E` whose `fk_column` references `id`.
pub async fn active_dependent_count<E, C>(
    conn: &C,
    fk_column: E::Column,
    deleted_column: E::Column,
    id: Uuid,
) -> Result<u64, DbErr>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync,
    C: ConnectionTrait,
{
    E::find()
        .filter(fk_column.eq(id))
        .filter(live(deleted_column))
        .count(conn)
        .await
}
