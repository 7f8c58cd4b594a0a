//! Country kind: top-level geography with cities hanging off it.

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, DbErr};
use uuid::Uuid;

use mondera_core::TranslationDraft;

use crate::entities::{cities, countries, country_translations};
use crate::repositories::dependents::active_dependent_count;
use crate::repositories::kind::{
    AuditView, MasterKind, NoFields, ParentKind, TranslationKind, TranslationView, WriteStamp,
};
use super::city::CityKind;

/// Marker for the country kind.
#[derive(Debug, Clone, Copy)]
pub struct CountryKind;

#[async_trait]
impl MasterKind for CountryKind {
    type Entity = countries::Entity;
    type Model = countries::Model;
    type Column = countries::Column;
    type Translation = CountryTranslationKind;
    type Fields = NoFields;

    const KIND: &'static str = "country";

    fn id_column() -> Self::Column {
        countries::Column::Id
    }

    fn deleted_column() -> Self::Column {
        countries::Column::IsDeleted
    }

    fn deleted_at_column() -> Self::Column {
        countries::Column::DeletedAt
    }

    fn deleted_by_column() -> Self::Column {
        countries::Column::DeletedBy
    }

    fn created_at_column() -> Self::Column {
        countries::Column::CreatedAt
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

    async fn active_dependents(
        txn: &DatabaseTransaction,
        id: Uuid,
    ) -> Result<Option<(&'static str, u64)>, DbErr> {
        let cities = active_dependent_count::<cities::Entity, _>(
            txn,
            cities::Column::CountryId,
            cities::Column::IsDeleted,
            id,
        )
        .await?;
        if cities > 0 {
            return Ok(Some(("city", cities)));
        }
        Ok(None)
    }

    async fn insert_master(
        txn: &DatabaseTransaction,
        id: Uuid,
        _fields: &NoFields,
        stamp: &WriteStamp,
    ) -> Result<(), DbErr> {
        let row = countries::ActiveModel {
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
        let mut row: countries::ActiveModel = model.into();
        row.updated_at = Set(stamp.at);
        row.updated_by = Set(Some(stamp.actor));
        row.update(txn).await?;
        Ok(())
    }
}

impl ParentKind for CountryKind {
    type Child = CityKind;

    fn child_parent_column() -> cities::Column {
        cities::Column::CountryId
    }

    fn child_parent_of(child: &cities::Model) -> Uuid {
        child.country_id
    }
}

/// Marker for the country translation table.
#[derive(Debug, Clone, Copy)]
pub struct CountryTranslationKind;

#[async_trait]
impl TranslationKind for CountryTranslationKind {
    type Entity = country_translations::Entity;
    type Model = country_translations::Model;
    type Column = country_translations::Column;

    fn owner_column() -> Self::Column {
        country_translations::Column::CountryId
    }

    fn lang_column() -> Self::Column {
        country_translations::Column::Lang
    }

    fn name_column() -> Self::Column {
        country_translations::Column::Name
    }

    fn deleted_column() -> Self::Column {
        country_translations::Column::IsDeleted
    }

    fn deleted_at_column() -> Self::Column {
        country_translations::Column::DeletedAt
    }

    fn deleted_by_column() -> Self::Column {
        country_translations::Column::DeletedBy
    }

    fn owner_of(model: &Self::Model) -> Uuid {
        model.country_id
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
        let row = country_translations::ActiveModel {
            id: Set(Uuid::new_v4()),
            country_id: Set(owner),
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
