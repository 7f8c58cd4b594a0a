//! Localized listing and aggregation queries.
//!
//! Lists join each live master row with its translation for the requested
//! language. A row lacking that language still appears with no name; that
//! is deliberate, so admins see untranslated entries instead of losing
//! them. Ordering is by creation time ascending and `total` reflects the
//! full live population independent of the page window.

use std::collections::HashMap;

use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use mondera_shared::{Language, PageRequest};

use super::kind::{MasterKind, ParentKind, TranslationKind, TranslationView, live};
use super::lifecycle::{MasterRepository, TransOf};
use super::uniqueness::lang_matches;
use crate::error::MasterError;

/// One master row in a localized list.
#[derive(Debug, Clone)]
pub struct ListedMaster<K: MasterKind> {
    /// Row id.
    pub id: Uuid,
    /// Kind-specific fields (parent references, extras).
    pub fields: K::Fields,
    /// The row's translation in the requested language, if it has one.
    pub translation: Option<TranslationView>,
    /// Creation instant, the list sort key.
    pub created_at: DateTimeWithTimeZone,
}

/// A parent row with its aggregated live children.
pub struct ListedWithChildren<K: ParentKind> {
    /// The parent row.
    pub parent: ListedMaster<K>,
    /// Live children, each localized the same way as the parent.
    pub children: Vec<ListedMaster<<K as ParentKind>::Child>>,
}

impl<K: MasterKind> MasterRepository<K> {
    /// Lists live rows, localized, paginated, oldest first.
    ///
    /// Returns the page of items and the total live population.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list(
        &self,
        lang: &Language,
        page: &PageRequest,
        actor: Uuid,
    ) -> Result<(Vec<ListedMaster<K>>, u64), MasterError> {
        let mut base = K::Entity::find().filter(live(K::deleted_column()));
        if let Some(scope) = K::owner_scope_column() {
            base = base.filter(scope.eq(actor));
        }

        let total = base.clone().count(self.conn()).await?;
        let models = base
            .order_by_asc(K::created_at_column())
            .offset(page.offset())
            .limit(page.limit())
            .all(self.conn())
            .await?;

        let items = localized_views::<K, _>(self.conn(), models, lang).await?;
        Ok((items, total))
    }

    /// Lists every live row unpaginated, for dropdown population.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list_options(
        &self,
        lang: &Language,
        actor: Uuid,
    ) -> Result<Vec<ListedMaster<K>>, MasterError> {
        let mut base = K::Entity::find().filter(live(K::deleted_column()));
        if let Some(scope) = K::owner_scope_column() {
            base = base.filter(scope.eq(actor));
        }

        let models = base
            .order_by_asc(K::created_at_column())
            .all(self.conn())
            .await?;

        let items = localized_views::<K, _>(self.conn(), models, lang).await?;
        Ok(items)
    }

    /// Lists live parent rows with their aggregated live children.
    ///
    /// Pagination applies to parents only; every live child of a listed
    /// parent is included, localized like its parent.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list_with_children(
        &self,
        lang: &Language,
        page: &PageRequest,
        actor: Uuid,
    ) -> Result<(Vec<ListedWithChildren<K>>, u64), MasterError>
    where
        K: ParentKind,
    {
        let (parents, total) = self.list(lang, page, actor).await?;

        let parent_ids: Vec<Uuid> = parents.iter().map(|parent| parent.id).collect();
        let child_models = if parent_ids.is_empty() {
            Vec::new()
        } else {
            <K::Child as MasterKind>::Entity::find()
                .filter(K::child_parent_column().is_in(parent_ids))
                .filter(live(<K::Child as MasterKind>::deleted_column()))
                .order_by_asc(<K::Child as MasterKind>::created_at_column())
                .all(self.conn())
                .await?
        };

        // Remember each child's parent before the models are consumed.
        let parent_fks: Vec<Uuid> = child_models.iter().map(K::child_parent_of).collect();
        let child_views = localized_views::<K::Child, _>(self.conn(), child_models, lang).await?;

        let mut by_parent: HashMap<Uuid, Vec<ListedMaster<K::Child>>> = HashMap::new();
        for (fk, view) in parent_fks.into_iter().zip(child_views) {
            by_parent.entry(fk).or_default().push(view);
        }

        let items = parents
            .into_iter()
            .map(|parent| {
                let children = by_parent.remove(&parent.id).unwrap_or_default();
                ListedWithChildren { parent, children }
            })
            .collect();

        Ok((items, total))
    }
}

/// Attaches each model's translation in the requested language.
async fn localized_views<K, C>(
    conn: &C,
    models: Vec<K::Model>,
    lang: &Language,
) -> Result<Vec<ListedMaster<K>>, DbErr>
where
    K: MasterKind,
    C: ConnectionTrait,
{
    let ids: Vec<Uuid> = models.iter().map(K::model_id).collect();

    let mut by_owner: HashMap<Uuid, TranslationView> = HashMap::new();
    if !ids.is_empty() {
        let rows = <TransOf<K> as TranslationKind>::Entity::find()
            .filter(TransOf::<K>::owner_column().is_in(ids))
            .filter(live(TransOf::<K>::deleted_column()))
            .filter(lang_matches::<TransOf<K>>(lang))
            .all(conn)
            .await?;
        for row in rows {
            let owner = TransOf::<K>::owner_of(&row);
            by_owner.insert(owner, TransOf::<K>::view(row));
        }
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let id = K::model_id(&model);
            ListedMaster {
                id,
                fields: K::fields_of(&model),
                translation: by_owner.remove(&id),
                created_at: K::audit_of(&model).created_at,
            }
        })
        .collect())
}
