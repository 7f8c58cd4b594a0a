//! City kind: geography leaf, owned by a country.

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, QueryFilter};
use serde::Serialize;
use uuid::Uuid;

use mondera_core::TranslationDraft;

use crate::entities::{cities, city_translations, countries};
use crate::error::MasterError;
use crate::repositories::kind::{
    AuditView, MasterKind, TranslationKind, TranslationView, WriteStamp, live,
};

/// Marker for the city kind.
#[derive(Debug, Clone, Copy)]
pub struct CityKind;

/// Mutable payload of a city: its parent country.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CityFields {
    /// Owning country.
    pub country_id: Uuid,
}

#[async_trait]
impl MasterKind for CityKind {
    type Entity = cities::Entity;
    type Model = cities::Model;
    type Column = cities::Column;
    type Translation = CityTranslationKind;
    type Fields = CityFields;

    const KIND: &'static str = "city";

    fn id_column() -> Self::Column {
        cities::Column::Id
    }

    fn deleted_column() -> Self::Column {
        cities::Column::IsDeleted
    }

    fn deleted_at_column() -> Self::Column {
        cities::Column::DeletedAt
    }

    fn deleted_by_column() -> Self::Column {
        cities::Column::DeletedBy
    }

    fn created_at_column() -> Self::Column {
        cities::Column::CreatedAt
    }

    fn model_id(model: &Self::Model) -> Uuid {
        model.id
    }

    fn fields_of(model: &Self::Model) -> CityFields {
        CityFields {
            country_id: model.country_id,
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
        fields: &CityFields,
    ) -> Result<(), MasterError> {
        let country = countries::Entity::find()
            .filter(countries::Column::Id.eq(fields.country_id))
            .filter(live(countries::Column::IsDeleted))
            .one(txn)
            .await?;

        if country.is_none() {
            return Err(MasterError::ParentNotFound {
                kind: "country",
                id: fields.country_id,
            });
        }
        Ok(())
    }

    async fn insert_master(
        txn: &DatabaseTransaction,
        id: Uuid,
        fields: &CityFields,
        stamp: &WriteStamp,
    ) -> Result<(), DbErr> {
        let row = cities::ActiveModel {
            id: Set(id),
            country_id: Set(fields.country_id),
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
        fields: &CityFields,
        stamp: &WriteStamp,
    ) -> Result<(), DbErr> {
        let mut row: cities::ActiveModel = model.into();
        row.country_id = Set(fields.country_id);
        row.updated_at = Set(stamp.at);
        row.updated_by = Set(Some(stamp.actor));
        row.update(txn).await?;
        Ok(())
    }
}

/// Marker for the city translation table.
#[derive(Debug, Clone, Copy)]
pub struct CityTranslationKind;

#[async_trait]
impl TranslationKind for CityTranslationKind {
    type Entity = city_translations::Entity;
    type Model = city_translations::Model;
    type Column = city_translations::Column;

    fn owner_column() -> Self::Column {
        city_translations::Column::CityId
    }

    fn lang_column() -> Self::Column {
        city_translations::Column::Lang
    }

    fn name_column() -> Self::Column {
        city_translations::Column::Name
    }

    fn deleted_column() -> Self::Column {
        city_translations::Column::IsDeleted
    }

    fn deleted_at_column() -> Self::Column {
        city_translations::Column::DeletedAt
    }

    fn deleted_by_column() -> Self::Column {
        city_translations::Column::DeletedBy
    }

    fn owner_of(model: &Self::Model) -> Uuid {
        model.city_id
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
        let row = city_translations::ActiveModel {
            id: Set(Uuid::new_v4()),
            city_id: Set(owner),
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
