//! Sub-category management routes.

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

use mondera_db::{ListedMaster, MasterRepository, SubCategoryFields, SubCategoryKind};
use mondera_shared::PageResponse;

use super::respond::{error_response, validation_response};
use super::{ListQuery, OptionsQuery, TranslationPayload, to_drafts};
use crate::AppState;
use crate::middleware::ActorContext;

/// Creates the sub-category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/subcategories",
            get(list_subcategories).post(create_subcategory),
        )
        .route("/subcategories/options", get(subcategory_options))
        .route(
            "/subcategories/{sub_category_id}",
            get(get_subcategory)
                .put(update_subcategory)
                .delete(delete_subcategory),
        )
}

fn repository(state: &AppState) -> MasterRepository<SubCategoryKind> {
    MasterRepository::new((*state.db).clone())
}

fn subcategory_item(item: ListedMaster<SubCategoryKind>) -> serde_json::Value {
    json!({
        "sub_category_id": item.id,
        "category_id": item.fields.category_id,
        "translation_id": item.translation.as_ref().map(|t| t.id),
        "name": item.translation.as_ref().map(|t| t.name.clone()),
        "lang": item.translation.map(|t| t.lang),
        "created_at": item.created_at,
    })
}

/// Request body for creating a sub-category.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubCategoryRequest {
    /// Owning category.
    pub category_id: Uuid,
    /// Translated names, one per language.
    #[validate(length(min = 1), nested)]
    pub translations: Vec<TranslationPayload>,
}

/// Request body for updating a sub-category.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSubCategoryRequest {
    /// Owning category.
    pub category_id: Uuid,
    /// Replacement translation set.
    #[validate(length(min = 1), nested)]
    pub translations: Vec<TranslationPayload>,
}

/// POST `/subcategories` - Create a sub-category under a category.
async fn create_subcategory(
    State(state): State<AppState>,
    actor: ActorContext,
    Json(payload): Json<CreateSubCategoryRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_response(&errors);
    }

    let fields = SubCategoryFields {
        category_id: payload.category_id,
    };

    match repository(&state)
        .create(fields, to_drafts(payload.translations), actor.actor_id)
        .await
    {
        Ok(id) => {
            info!(sub_category_id = %id, category_id = %payload.category_id, "Sub-category created");
            (StatusCode::CREATED, Json(json!({ "sub_category_id": id }))).into_response()
        }
        Err(e) => error_response(e, "create sub-category"),
    }
}

/// GET `/subcategories/{sub_category_id}` - Fetch a sub-category.
async fn get_subcategory(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(sub_category_id): Path<Uuid>,
) -> impl IntoResponse {
    match repository(&state)
        .get_by_id(sub_category_id, actor.actor_id)
        .await
    {
        Ok(detail) => (
            StatusCode::OK,
            Json(json!({
                "sub_category_id": detail.id,
                "category_id": detail.fields.category_id,
                "translations": detail.translations,
                "created_at": detail.audit.created_at,
                "updated_at": detail.audit.updated_at,
            })),
        )
            .into_response(),
        Err(e) => error_response(e, "get sub-category"),
    }
}

/// PUT `/subcategories/{sub_category_id}` - Replace translations and parent.
async fn update_subcategory(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(sub_category_id): Path<Uuid>,
    Json(payload): Json<UpdateSubCategoryRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_response(&errors);
    }

    let fields = SubCategoryFields {
        category_id: payload.category_id,
    };

    match repository(&state)
        .update(
            sub_category_id,
            fields,
            to_drafts(payload.translations),
            actor.actor_id,
        )
        .await
    {
        Ok(()) => {
            info!(sub_category_id = %sub_category_id, "Sub-category translations replaced");
            (
                StatusCode::OK,
                Json(json!({ "sub_category_id": sub_category_id })),
            )
                .into_response()
        }
        Err(e) => error_response(e, "update sub-category"),
    }
}

/// DELETE `/subcategories/{sub_category_id}` - Soft-delete a sub-category.
async fn delete_subcategory(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(sub_category_id): Path<Uuid>,
) -> impl IntoResponse {
    match repository(&state)
        .delete(sub_category_id, actor.actor_id)
        .await
    {
        Ok(()) => {
            info!(sub_category_id = %sub_category_id, "Sub-category deleted");
            (
                StatusCode::OK,
                Json(json!({ "sub_category_id": sub_category_id })),
            )
                .into_response()
        }
        Err(e) => error_response(e, "delete sub-category"),
    }
}

/// GET `/subcategories` - Paginated localized sub-category list.
async fn list_subcategories(
    State(state): State<AppState>,
    actor: ActorContext,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let lang = query.language();
    let page = query.page_request();

    match repository(&state).list(&lang, &page, actor.actor_id).await {
        Ok((items, total)) => {
            let data: Vec<_> = items.into_iter().map(subcategory_item).collect();
            (StatusCode::OK, Json(PageResponse::new(data, &page, total))).into_response()
        }
        Err(e) => error_response(e, "list sub-categories"),
    }
}

/// GET `/subcategories/options` - Dropdown options.
async fn subcategory_options(
    State(state): State<AppState>,
    actor: ActorContext,
    Query(query): Query<OptionsQuery>,
) -> impl IntoResponse {
    let lang = query.language();

    match repository(&state).list_options(&lang, actor.actor_id).await {
        Ok(items) => {
            let data: Vec<_> = items.into_iter().map(subcategory_item).collect();
            (StatusCode::OK, Json(json!({ "subcategories": data }))).into_response()
        }
        Err(e) => error_response(e, "list sub-category options"),
    }
}
