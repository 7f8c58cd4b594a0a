//! Country management routes.

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

use mondera_db::{CountryKind, ListedMaster, MasterRepository, NoFields};
use mondera_shared::PageResponse;

use super::respond::{error_response, validation_response};
use super::{ListQuery, OptionsQuery, TranslationPayload, to_drafts};
use crate::AppState;
use crate::middleware::ActorContext;

/// Creates the country routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(list_countries).post(create_country))
        .route("/countries/options", get(country_options))
        .route("/countries/with-cities", get(list_with_cities))
        .route(
            "/countries/{country_id}",
            get(get_country).put(update_country).delete(delete_country),
        )
}

fn repository(state: &AppState) -> MasterRepository<CountryKind> {
    MasterRepository::new((*state.db).clone())
}

fn country_item(item: ListedMaster<CountryKind>) -> serde_json::Value {
    json!({
        "country_id": item.id,
        "translation_id": item.translation.as_ref().map(|t| t.id),
        "name": item.translation.as_ref().map(|t| t.name.clone()),
        "lang": item.translation.map(|t| t.lang),
        "created_at": item.created_at,
    })
}

/// Request body for creating a country.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCountryRequest {
    /// Translated names, one per language.
    #[validate(length(min = 1), nested)]
    pub translations: Vec<TranslationPayload>,
}

/// Request body for updating a country.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCountryRequest {
    /// Replacement translation set.
    #[validate(length(min = 1), nested)]
    pub translations: Vec<TranslationPayload>,
}

/// POST `/countries` - Create a country with its translations.
async fn create_country(
    State(state): State<AppState>,
    actor: ActorContext,
    Json(payload): Json<CreateCountryRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_response(&errors);
    }

    match repository(&state)
        .create(NoFields, to_drafts(payload.translations), actor.actor_id)
        .await
    {
        Ok(id) => {
            info!(country_id = %id, "Country created");
            (StatusCode::CREATED, Json(json!({ "country_id": id }))).into_response()
        }
        Err(e) => error_response(e, "create country"),
    }
}

/// GET `/countries/{country_id}` - Fetch a country with its translations.
async fn get_country(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(country_id): Path<Uuid>,
) -> impl IntoResponse {
    match repository(&state).get_by_id(country_id, actor.actor_id).await {
        Ok(detail) => (
            StatusCode::OK,
            Json(json!({
                "country_id": detail.id,
                "translations": detail.translations,
                "created_at": detail.audit.created_at,
                "updated_at": detail.audit.updated_at,
            })),
        )
            .into_response(),
        Err(e) => error_response(e, "get country"),
    }
}

/// PUT `/countries/{country_id}` - Replace a country's translation set.
async fn update_country(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(country_id): Path<Uuid>,
    Json(payload): Json<UpdateCountryRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_response(&errors);
    }

    match repository(&state)
        .update(
            country_id,
            NoFields,
            to_drafts(payload.translations),
            actor.actor_id,
        )
        .await
    {
        Ok(()) => {
            info!(country_id = %country_id, "Country translations replaced");
            (StatusCode::OK, Json(json!({ "country_id": country_id }))).into_response()
        }
        Err(e) => error_response(e, "update country"),
    }
}

/// DELETE `/countries/{country_id}` - Soft-delete a country.
async fn delete_country(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(country_id): Path<Uuid>,
) -> impl IntoResponse {
    match repository(&state).delete(country_id, actor.actor_id).await {
        Ok(()) => {
            info!(country_id = %country_id, "Country deleted");
            (StatusCode::OK, Json(json!({ "country_id": country_id }))).into_response()
        }
        Err(e) => error_response(e, "delete country"),
    }
}

/// GET `/countries` - Paginated localized country list.
async fn list_countries(
    State(state): State<AppState>,
    actor: ActorContext,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let lang = query.language();
    let page = query.page_request();

    match repository(&state).list(&lang, &page, actor.actor_id).await {
        Ok((items, total)) => {
            let data: Vec<_> = items.into_iter().map(country_item).collect();
            (StatusCode::OK, Json(PageResponse::new(data, &page, total))).into_response()
        }
        Err(e) => error_response(e, "list countries"),
    }
}

/// GET `/countries/options` - Dropdown options.
async fn country_options(
    State(state): State<AppState>,
    actor: ActorContext,
    Query(query): Query<OptionsQuery>,
) -> impl IntoResponse {
    let lang = query.language();

    match repository(&state).list_options(&lang, actor.actor_id).await {
        Ok(items) => {
            let data: Vec<_> = items.into_iter().map(country_item).collect();
            (StatusCode::OK, Json(json!({ "countries": data }))).into_response()
        }
        Err(e) => error_response(e, "list country options"),
    }
}

/// GET `/countries/with-cities` - Countries with nested live cities.
async fn list_with_cities(
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
                    let cities: Vec<_> = item
                        .children
                        .into_iter()
                        .map(|child| {
                            json!({
                                "city_id": child.id,
                                "name": child.translation.as_ref().map(|t| t.name.clone()),
                                "lang": child.translation.map(|t| t.lang),
                            })
                        })
                        .collect();

                    json!({
                        "country_id": item.parent.id,
                        "name": item.parent.translation.as_ref().map(|t| t.name.clone()),
                        "lang": item.parent.translation.map(|t| t.lang),
                        "cities": cities,
                    })
                })
                .collect();
            (StatusCode::OK, Json(PageResponse::new(data, &page, total))).into_response()
        }
        Err(e) => error_response(e, "list countries with cities"),
    }
}
