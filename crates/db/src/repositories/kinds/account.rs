//! Account kind: user-owned records referencing the category hierarchy.
//!
//! Unlike the admin master kinds, accounts are scoped to their owner: the
//! engine restricts every read, update, and delete to rows whose owner is
//! the acting principal. Name uniqueness stays global per kind.

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, QueryFilter};
use serde::Serialize;
use uuid::Uuid;

use mondera_core::TranslationDraft;

use crate::entities::{account_translations, accounts, categories, sub_categories};
use crate::error::MasterError;
use crate::repositories::kind::{
    AuditView, MasterKind, TranslationKind, TranslationView, WriteStamp, live,
};

/// Marker for the account kind.
#[derive(Debug, Clone, Copy)]
pub struct AccountKind;

/// Mutable payload of an account: hierarchy references and description.
#[derive(Debug, Clone, Serialize)]
pub struct AccountFields {
    /// Referenced category.
    pub category_id: Uuid,
    /// Referenced sub-category; must belong to `category_id`.
    pub sub_category_id: Uuid,
    /// Free-text description.
    pub description: Option<String>,
}

#[async_trait]
impl MasterKind for AccountKind {
    type Entity = accounts::Entity;
    type Model = accounts::Model;
    type Column = accounts::Column;
    type Translation = AccountTranslationKind;
    type Fields = AccountFields;

    const KIND: &'static str = "account";

    fn id_column() -> Self::Column {
        accounts::Column::Id
    }

    fn deleted_column() -> Self::Column {
        accounts::Column::IsDeleted
    }

    fn deleted_at_column() -> Self::Column {
        accounts::Column::DeletedAt
    }

    fn deleted_by_column() -> Self::Column {
        accounts::Column::DeletedBy
    }

    fn created_at_column() -> Self::Column {
        accounts::Column::CreatedAt
    }

    fn owner_scope_column() -> Option<Self::Column> {
        Some(accounts::Column::OwnerId)
    }

    fn model_id(model: &Self::Model) -> Uuid {
        model.id
    }

    fn fields_of(model: &Self::Model) -> AccountFields {
        AccountFields {
            category_id: model.category_id,
            sub_category_id: model.sub_category_id,
            description: model.description.clone(),
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
        fields: &AccountFields,
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

        // The sub-category must be live AND belong to the named category.
        let sub_category = sub_categories::Entity::find()
            .filter(sub_categories::Column::Id.eq(fields.sub_category_id))
            .filter(sub_categories::Column::CategoryId.eq(fields.category_id))
            .filter(live(sub_categories::Column::IsDeleted))
            .one(txn)
            .await?;

        if sub_category.is_none() {
            return Err(MasterError::ParentNotFound {
                kind: "sub_category",
                id: fields.sub_category_id,
            });
        }

        Ok(())
    }

    async fn insert_master(
        txn: &DatabaseTransaction,
        id: Uuid,
        fields: &AccountFields,
        stamp: &WriteStamp,
    ) -> Result<(), DbErr> {
        let row = accounts::ActiveModel {
            id: Set(id),
            category_id: Set(fields.category_id),
            sub_category_id: Set(fields.sub_category_id),
            owner_id: Set(stamp.actor),
            description: Set(fields.description.clone()),
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
        fields: &AccountFields,
        stamp: &WriteStamp,
    ) -> Result<(), DbErr> {
        let mut row: accounts::ActiveModel = model.into();
        row.category_id = Set(fields.category_id);
        row.sub_category_id = Set(fields.sub_category_id);
        row.description = Set(fields.description.clone());
        row.updated_at = Set(stamp.at);
        row.updated_by = Set(Some(stamp.actor));
        row.update(txn).await?;
        Ok(())
    }
}

/// Marker for the account translation table.
#[derive(Debug, Clone, Copy)]
pub struct AccountTranslationKind;

#[async_trait]
impl TranslationKind for AccountTranslationKind {
    type Entity = account_translations::Entity;
    type Model = account_translations::Model;
    type Column = account_translations::Column;

    fn owner_column() -> Self::Column {
        account_translations::Column::AccountId
    }

    fn lang_column() -> Self::Column {
        account_translations::Column::Lang
    }

    fn name_column() -> Self::Column {
        account_translations::Column::Name
    }

    fn deleted_column() -> Self::Column {
        account_translations::Column::IsDeleted
    }

    fn deleted_at_column() -> Self::Column {
        account_translations::Column::DeletedAt
    }

    fn deleted_by_column() -> Self::Column {
        account_translations::Column::DeletedBy
    }

    fn owner_of(model: &Self::Model) -> Uuid {
        model.account_id
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
        let row = account_translations::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(owner),
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
