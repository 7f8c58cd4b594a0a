//! Sub-category kind: second level of the category hierarchy.

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, QueryFilter};
use serde::Serialize;
use uuid::Uuid;

use mondera_core::TranslationDraft;

use crate::entities::{accounts, categories, sub_categories, sub_category_translations};
use crate::error::MasterError;
use crate::repositories::dependents::active_dependent_count;
use crate::repositories::kind::{
    AuditView, MasterKind, TranslationKind, TranslationView, WriteStamp, live,
};

/// Marker for the sub-category kind.
#[derive(Debug, Clone, Copy)]
pub struct SubCategoryKind;

/// Mutable payload of a sub-category: its parent category.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubCategoryFields {
    /// Owning category.
    pub category_id: Uuid,
}

#[async_trait]
impl MasterKind for SubCategoryKind {
    type Entity = sub_categories::Entity;
    type Model = sub_categories::Model;
    type Column = sub_categories::Column;
    type Translation = SubCategoryTranslationKind;
    type Fields = SubCategoryFields;

    const KIND: &'static str = "sub_category";

    fn id_column() -> Self::Column {
        sub_categories::Column::Id
    }

    fn deleted_column() -> Self::Column {
        sub_categories::Column::IsDeleted
    }

    fn deleted_at_column() -> Self::Column {
        sub_categories::Column::DeletedAt
    }

    fn deleted_by_column() -> Self::Column {
        sub_categories::Column::DeletedBy
    }

    fn created_at_column() -> Self::Column {
        sub_categories::Column::CreatedAt
    }

    fn model_id(model: &Self::Model) -> Uuid {
        model.id
    }

    fn fields_of(model: &Self::Model) -> SubCategoryFields {
        SubCategoryFields {
            category_id: model.category_id,
        }
    }

    fn audit_of(model: &Self::Model) -> AuditView {
        AuditView {
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    async fn verify_parents(
        txn: &DatabaseTransaction,
        fields: &SubCategoryFields,
    ) -> Result<(), MasterError> {
        let category = categories::Entity::find()
            .filter(categories::Column::Id.eq(fields.category_id))
            .filter(live(categories::Column::IsDeleted))
            .one(txn)
            .await?;

        if category.is_none() {
            return Err(MasterError::ParentNotFound {
                kind: "category",
                id: fields.category_id,
            });
        }
        Ok(())
    }

    async fn active_dependents(
        txn: &DatabaseTransaction,
        id: Uuid,
    ) -> Result<Option<(&'static str, u64)>, DbErr> {
        let accounts = active_dependent_count::<accounts::Entity, _>(
            txn,
            accounts::Column::SubCategoryId,
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
        fields: &SubCategoryFields,
        stamp: &WriteStamp,
    ) -> Result<(), DbErr> {
        let row = sub_categories::ActiveModel {
            id: Set(id),
            category_id: Set(fields.category_id),
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
        fields: &SubCategoryFields,
        stamp: &WriteStamp,
    ) -> Result<(), DbErr> {
        let mut row: sub_categories::ActiveModel = model.into();
        row.category_id = Set(fields.category_id);
        row.updated_at = Set(stamp.at);
        row.updated_by = Set(Some(stamp.actor));
        row.update(txn).await?;
        Ok(())
    }
}

/// Marker for the sub-category translation table.
#[derive(Debug, Clone, Copy)]
pub struct SubCategoryTranslationKind;

#[async_trait]
impl TranslationKind for SubCategoryTranslationKind {
    type Entity = sub_category_translations::Entity;
    type Model = sub_category_translations::Model;
    type Column = sub_category_translations::Column;

    fn owner_column() -> Self::Column {
        sub_category_translations::Column::SubCategoryId
    }

    fn lang_column() -> Self::Column {
        sub_category_translations::Column::Lang
    }

    fn name_column() -> Self::Column {
        sub_category_translations::Column::Name
    }

    fn deleted_column() -> Self::Column {
        sub_category_translations::Column::IsDeleted
    }

    fn deleted_at_column() -> Self::Column {
        sub_category_translations::Column::DeletedAt
    }

    fn deleted_by_column() -> Self::Column {
        sub_category_translations::Column::DeletedBy
    }

    fn owner_of(model: &Self::Model) -> Uuid {
        model.sub_category_id
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
        let row = sub_category_translations::ActiveModel {
            id: Set(Uuid::new_v4()),
            sub_category_id: Set(owner),
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
