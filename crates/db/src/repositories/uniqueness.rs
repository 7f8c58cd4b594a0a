//! Case-insensitive translated-name collision detection.
//!
//! One query shape serves every kind: scope is always the live (non
//! deleted) translations of the kind, the match is exact case-folded
//! equality on language and name, and the update path excludes the entity
//! being updated so it may keep its own current name. The same rule is
//! stated as a pure model in `mondera_core::translation::scope`, which pins
//! these semantics under property tests.

use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use mondera_core::TranslationDraft;
use mondera_shared::Language;

use super::kind::{TranslationKind, live};

/// `lower(column) = value` where `value` is already folded.
fn folded_eq<C: ColumnTrait>(column: C, value: String) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).eq(value)
}

/// Filter matching rows in the requested language, case-insensitively.
pub(crate) fn lang_matches<T: TranslationKind>(lang: &Language) -> SimpleExpr {
    folded_eq(T::lang_column(), lang.as_str().to_string())
}

/// Whether `draft`'s name is already taken within its language across the
/// live translations of the kind.
///
/// `exclude_owner` is supplied on the update path: rows belonging to that
/// entity are out of scope, so an unchanged name never collides with
/// itself.
pub async fn translation_exists<T, C>(
    conn: &C,
    draft: &TranslationDraft,
    exclude_owner: Option<Uuid>,
) -> Result<bool, DbErr>
where
    T: TranslationKind,
    C: ConnectionTrait,
{
    let mut query = T::Entity::find()
        .filter(live(T::deleted_column()))
        .filter(folded_eq(T::lang_column(), draft.lang_folded()))
        .filter(folded_eq(T::name_column(), draft.name_folded()));

    if let Some(owner) = exclude_owner {
        query = query.filter(T::owner_column().ne(owner));
    }

    let count = query.count(conn).await?;
    Ok(count > 0)
}
