//! City management routes.

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

use mondera_db::{CityFields, CityKind, ListedMaster, MasterRepository};
use mondera_shared::PageResponse;

use super::respond::{error_response, validation_response};
use super::{ListQuery, OptionsQuery, TranslationPayload, to_drafts};
use crate::AppState;
use crate::middleware::ActorContext;

/// Creates the city routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cities", get(list_cities).post(create_city))
        .route("/cities/options", get(city_options))
        .route(
            "/cities/{city_id}",
            get(get_city).put(update_city).delete(delete_city),
        )
}

fn repository(state: &AppState) -> MasterRepository<CityKind> {
    MasterRepository::new((*state.db).clone())
}

fn city_item(item: ListedMaster<CityKind>) -> serde_json::Value {
    json!({
        "city_id": item.id,
        "country_id": item.fields.country_id,
        "translation_id": item.translation.as_ref().map(|t| t.id),
        "name": item.translation.as_ref().map(|t| t.name.clone()),
        "lang": item.translation.map(|t| t.lang),
        "created_at": item.created_at,
    })
}

/// Request body for creating a city.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCityRequest {
    /// Owning country.
    pub country_id: Uuid,
    /// Translated names, one per language.
    #[validate(length(min = 1), nested)]
    pub translations: Vec<TranslationPayload>,
}

/// Request body for updating a city.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCityRequest {
    /// Owning country.
    pub country_id: Uuid,
    /// Replacement translation set.
    #[validate(length(min = 1), nested)]
    pub translations: Vec<TranslationPayload>,
}

/// POST `/cities` - Create a city under a country.
async fn create_city(
    State(state): State<AppState>,
    actor: ActorContext,
    Json(payload): Json<CreateCityRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_response(&errors);
    }

    let fields = CityFields {
        country_id: payload.country_id,
    };

    match repository(&state)
        .create(fields, to_drafts(payload.translations), actor.actor_id)
        .await
    {
        Ok(id) => {
            info!(city_id = %id, country_id = %payload.country_id, "City created");
            (StatusCode::CREATED, Json(json!({ "city_id": id }))).into_response()
        }
        Err(e) => error_response(e, "create city"),
    }
}

/// GET `/cities/{city_id}` - Fetch a city with its translations.
async fn get_city(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(city_id): Path<Uuid>,
) -> impl IntoResponse {
    match repository(&state).get_by_id(city_id, actor.actor_id).await {
        Ok(detail) => (
            StatusCode::OK,
            Json(json!({
                "city_id": detail.id,
                "country_id": detail.fields.country_id,
                "translations": detail.translations,
                "created_at": detail.audit.created_at,
                "updated_at": detail.audit.updated_at,
            })),
        )
            .into_response(),
        Err(e) => error_response(e, "get city"),
    }
}

/// PUT `/cities/{city_id}` - Replace translations and parent country.
async fn update_city(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(city_id): Path<Uuid>,
    Json(payload): Json<UpdateCityRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_response(&errors);
    }

    let fields = CityFields {
        country_id: payload.country_id,
    };

    match repository(&state)
        .update(city_id, fields, to_drafts(payload.translations), actor.actor_id)
        .await
    {
        Ok(()) => {
            info!(city_id = %city_id, "City translations replaced");
            (StatusCode::OK, Json(json!({ "city_id": city_id }))).into_response()
        }
        Err(e) => error_response(e, "update city"),
    }
}

/// DELETE `/cities/{city_id}` - Soft-delete a city.
async fn delete_city(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(city_id): Path<Uuid>,
) -> impl IntoResponse {
    match repository(&state).delete(city_id, actor.actor_id).await {
        Ok(()) => {
            info!(city_id = %city_id, "City deleted");
            (StatusCode::OK, Json(json!({ "city_id": city_id }))).into_response()
        }
        Err(e) => error_response(e, "delete city"),
    }
}

/// GET `/cities` - Paginated localized city list.
async fn list_cities(
    State(state): State<AppState>,
    actor: ActorContext,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let lang = query.language();
    let page = query.page_request();

    match repository(&state).list(&lang, &page, actor.actor_id).await {
        Ok((items, total)) => {
            let data: Vec<_> = items.into_iter().map(city_item).collect();
            (StatusCode::OK, Json(PageResponse::new(data, &page, total))).into_response()
        }
        Err(e) => error_response(e, "list cities"),
    }
}

/// GET `/cities/options` - Dropdown options.
async fn city_options(
    State(state): State<AppState>,
    actor: ActorContext,
    Query(query): Query<OptionsQuery>,
) -> impl IntoResponse {
    let lang = query.language();

    match repository(&state).list_options(&lang, actor.actor_id).await {
        Ok(items) => {
            let data: Vec<_> = items.into_iter().map(city_item).collect();
            (StatusCode::OK, Json(json!({ "cities": data }))).into_response()
        }
        Err(e) => error_response(e, "list city options"),
    }
}
