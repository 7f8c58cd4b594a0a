//! Category management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use mondera_db::{CategoryKind, ListedMaster, MasterRepository, NoFields};
use mondera_shared::PageResponse;

use super::respond::{error_response, validation_response};
use super::{ListQuery, OptionsQuery, TranslationPayload, to_drafts};
use crate::AppState;
use crate::middleware::ActorContext;

/// Creates the category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/options", get(category_options))
        .route(
            "/categories/with-subcategories",
            get(list_with_subcategories),
        )
        .route(
            "/categories/{category_id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}

fn repository(state: &AppState) -> MasterRepository<CategoryKind> {
    MasterRepository::new((*state.db).clone())
}

fn category_item(item: ListedMaster<CategoryKind>) -> serde_json::Value {
    json!({
        "category_id": item.id,
        "translation_id": item.translation.as_ref().map(|t| t.id),
        "name": item.translation.as_ref().map(|t| t.name.clone()),
        "lang": item.translation.map(|t| t.lang),
        "created_at": item.created_at,
    })
}

/// Request body for creating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Translated names, one per language.
    #[validate(length(min = 1), nested)]
    pub translations: Vec<TranslationPayload>,
}

/// Request body for updating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    /// Replacement translation set.
    #[validate(length(min = 1), nested)]
    pub translations: Vec<TranslationPayload>,
}

/// POST `/categories` - Create a category with its translations.
async fn create_category(
    State(state): State<AppState>,
    actor: ActorContext,
    Json(payload): Json<CreateCategoryRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_response(&errors);
    }

    match repository(&state)
        .create(NoFields, to_drafts(payload.translations), actor.actor_id)
        .await
    {
        Ok(id) => {
            info!(category_id = %id, "Category created");
            (StatusCode::CREATED, Json(json!({ "category_id": id }))).into_response()
        }
        Err(e) => error_response(e, "create category"),
    }
}

/// GET `/categories/{category_id}` - Fetch a category with its translations.
async fn get_category(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(category_id): Path<Uuid>,
) -> impl IntoResponse {
    match repository(&state).get_by_id(category_id, actor.actor_id).await {
        Ok(detail) => (
            StatusCode::OK,
            Json(json!({
                "category_id": detail.id,
                "translations": detail.translations,
                "created_at": detail.audit.created_at,
                "updated_at": detail.audit.updated_at,
            })),
        )
            .into_response(),
        Err(e) => error_response(e, "get category"),
    }
}

/// PUT `/categories/{category_id}` - Replace a category's translation set.
async fn update_category(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(category_id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_response(&errors);
    }

    match repository(&state)
        .update(
            category_id,
            NoFields,
            to_drafts(payload.translations),
            actor.actor_id,
        )
        .await
    {
        Ok(()) => {
            info!(category_id = %category_id, "Category translations replaced");
            (StatusCode::OK, Json(json!({ "category_id": category_id }))).into_response()
        }
        Err(e) => error_response(e, "update category"),
    }
}

/// DELETE `/categories/{category_id}` - Soft-delete a category.
async fn delete_category(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(category_id): Path<Uuid>,
) -> impl IntoResponse {
    match repository(&state).delete(category_id, actor.actor_id).await {
        Ok(()) => {
            info!(category_id = %category_id, "Category deleted");
            (StatusCode::OK, Json(json!({ "category_id": category_id }))).into_response()
        }
        Err(e) => error_response(e, "delete category"),
    }
}

/// GET `/categories` - Paginated localized category list.
async fn list_categories(
    State(state): State<AppState>,
    actor: ActorContext,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let lang = query.language();
    let page = query.page_request();

    match repository(&state).list(&lang, &page, actor.actor_id).await {
        Ok((items, total)) => {
            let data: Vec<_> = items.into_iter().map(category_item).collect();
            (StatusCode::OK, Json(PageResponse::new(data, &page, total))).into_response()
        }
        Err(e) => error_response(e, "list categories"),
    }
}

/// GET `/categories/options` - Dropdown options.
async fn category_options(
    State(state): State<AppState>,
    actor: ActorContext,
    Query(query): Query<OptionsQuery>,
) -> impl IntoResponse {
    let lang = query.language();

    match repository(&state).list_options(&lang, actor.actor_id).await {
        Ok(items) => {
            let data: Vec<_> = items.into_iter().map(category_item).collect();
            (StatusCode::OK, Json(json!({ "categories": data }))).into_response()
        }
        Err(e) => error_response(e, "list category options"),
    }
}

/// GET `/categories/with-subcategories` - Categories with nested live
/// sub-categories.
async fn list_with_subcategories(
    State(state): State<AppState>,
    actor: ActorContext,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let lang = query.language();
    let page = query.page_request();

    match repository(&state)
        .list_with_children(&lang, &page, actor.actor_id)
        .await
    {
        Ok((items, total)) => {
            let data: Vec<_> = items
                .into_iter()
                .map(|item| {
                    let subcategories: Vec<_> = item
                        .children
                        .into_iter()
                        .map(|child| {
                            json!({
                                "sub_category_id": child.id,
                                "name": child.translation.as_ref().map(|t| t.name.clone()),
                                "lang": child.translation.map(|t| t.lang),
                            })
                        })
                        .collect();

                    json!({
                        "category_id": item.parent.id,
                        "name": item.parent.translation.as_ref().map(|t| t.name.clone()),
                        "lang": item.parent.translation.map(|t| t.lang),
                        "subcategories": subcategories,
                    })
                })
                .collect();
            (StatusCode::OK, Json(PageResponse::new(data, &page, total))).into_response()
        }
        Err(e) => error_response(e, "list categories with subcategories"),
    }
}
