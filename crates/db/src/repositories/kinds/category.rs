//! Category kind: top-level grouping with sub-categories and accounts
//! hanging off it.

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, DbErr};
use uuid::Uuid;

use mondera_core::TranslationDraft;

use crate::entities::{accounts, categories, category_translations, sub_categories};
use crate::repositories::dependents::active_dependent_count;
use crate::repositories::kind::{
    AuditView, MasterKind, NoFields, ParentKind, TranslationKind, TranslationView, WriteStamp,
};
use super::sub_category::SubCategoryKind;

/// Marker for the category kind.
#[derive(Debug, Clone, Copy)]
pub struct CategoryKind;

#[async_trait]
impl MasterKind for CategoryKind {
    type Entity = categories::Entity;
    type Model = categories::Model;
    type Column = categories::Column;
    type Translation = CategoryTranslationKind;
    type Fields = NoFields;

    const KIND: &'static str = "category";

    fn id_column() -> Self::Column {
        categories::Column::Id
    }

    fn deleted_column() -> Self::Column {
        categories::Column::IsDeleted
    }

    fn deleted_at_column() -> Self::Column {
        categories::Column::DeletedAt
    }

    fn deleted_by_column() -> Self::Column {
        categories::Column::DeletedBy
    }

    fn created_at_column() -> Self::Column {
        categories::Column::CreatedAt
    }

    fn model_id(model: &Self::Model) -> Uuid {
        model.id
    }

    fn fields_of(_model: &Self::Model) -> NoFields {
        NoFields
    }

    fn audit_of(model: &Self::Model) -> AuditView {
        AuditView {
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    // A category is only deletable once every sub-category and account
    // referencing it is itself gone.
    async fn active_dependents(
        txn: &DatabaseTransaction,
        id: Uuid,
    ) -> Result<Option<(&'static str, u64)>, DbErr> {
        let sub_categories = active_dependent_count::<sub_categories::Entity, _>(
            txn,
            sub_categories::Column::CategoryId,
            sub_categories::Column::IsDeleted,
            id,
        )
        .await?;
        if sub_categories > 0 {
            return Ok(Some(("sub_category", sub_categories)));
        }

        let accounts = active_dependent_count::<accounts::Entity, _>(
            txn,
            accounts::Column::CategoryId,
            accounts::Column::IsDeleted,
            id,
        )
        .await?;
        if accounts > 0 {
            return Ok(Some(("account", accounts)));
        }

        Ok(None)
    }

    async fn insert_master(
        txn: &DatabaseTransaction,
        id: Uuid,
        _fields: &NoFields,
        stamp: &WriteStamp,
    ) -> Result<(), DbErr> {
        let row = categories::ActiveModel {
            id: Set(id),
            is_active: Set(true),
            created_at: Set(stamp.at),
            created_by: Set(stamp.actor),
            updated_at: Set(stamp.at),
            updated_by: Set(None),
            is_deleted: Set(false),
            deleted_at: Set(None),
            deleted_by: Set(None),
        };
        row.insert(txn).await?;
        Ok(())
    }

    async fn update_master(
        txn: &DatabaseTransaction,
        model: Self::Model,
        _fields: &NoFields,
        stamp: &WriteStamp,
    ) -> Result<(), DbErr> {
        let mut row: categories::ActiveModel = model.into();
        row.updated_at = Set(stamp.at);
        row.updated_by = Set(Some(stamp.actor));
        row.update(txn).await?;
        Ok(())
    }
}

impl ParentKind for CategoryKind {
    type Child = SubCategoryKind;

    fn child_parent_column() -> sub_categories::Column {
        sub_categories::Column::CategoryId
    }

    fn child_parent_of(child: &sub_categories::Model) -> Uuid {
        child.category_id
    }
}

/// Marker for the category translation table.
#[derive(Debug, Clone, Copy)]
pub struct CategoryTranslationKind;

#[async_trait]
impl TranslationKind for CategoryTranslationKind {
    type Entity = category_translations::Entity;
    type Model = category_translations::Model;
    type Column = category_translations::Column;

    fn owner_column() -> Self::Column {
        category_translations::Column::CategoryId
    }

    fn lang_column() -> Self::Column {
        category_translations::Column::Lang
    }

    fn name_column() -> Self::Column {
        category_translations::Column::Name
    }

    fn deleted_column() -> Self::Column {
        category_translations::Column::IsDeleted
    }

    fn deleted_at_column() -> Self::Column {
        category_translations::Column::DeletedAt
    }

    fn deleted_by_column() -> Self::Column {
        category_translations::Column::DeletedBy
    }

    fn owner_of(model: &Self::Model) -> Uuid {
        model.category_id
    }

    fn view(model: Self::Model) -> TranslationView {
        TranslationView {
            id: model.id,
            lang: model.lang,
            name: model.name,
        }
    }

    async fn insert_row(
        txn: &DatabaseTransaction,
        owner: Uuid,
        draft: &TranslationDraft,
        stamp: &WriteStamp,
    ) -> Result<(), DbErr> {
        let row = category_translations::ActiveModel {
            id: Set(Uuid::new_v4()),
            category_id: Set(owner),
            lang: Set(draft.lang.trim().to_string()),
            name: Set(draft.name.trim().to_string()),
            created_at: Set(stamp.at),
            created_by: Set(stamp.actor),
            updated_at: Set(stamp.at),
            updated_by: Set(None),
            is_deleted: Set(false),
            deleted_at: Set(None),
            deleted_by: Set(None),
        };
        row.insert(txn).await?;
        Ok(())
    }
}
