//! Account management routes.
//!
//! Accounts are owner-scoped: the acting principal only ever sees and
//! mutates its own records. The owner is taken from the actor context,
//! never from the request body.

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

use mondera_db::{AccountFields, AccountKind, ListedMaster, MasterRepository};
use mondera_shared::PageResponse;

use super::respond::{error_response, validation_response};
use super::{ListQuery, TranslationPayload, to_drafts};
use crate::AppState;
use crate::middleware::ActorContext;

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route(
            "/accounts/{account_id}",
            get(get_account).put(update_account).delete(delete_account),
        )
}

fn repository(state: &AppState) -> MasterRepository<AccountKind> {
    MasterRepository::new((*state.db).clone())
}

fn account_item(item: ListedMaster<AccountKind>) -> serde_json::Value {
    json!({
        "account_id": item.id,
        "category_id": item.fields.category_id,
        "sub_category_id": item.fields.sub_category_id,
        "description": item.fields.description,
        "name": item.translation.as_ref().map(|t| t.name.clone()),
        "lang": item.translation.map(|t| t.lang),
        "created_at": item.created_at,
    })
}

/// Request body for creating an account.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    /// Referenced category.
    pub category_id: Uuid,
    /// Referenced sub-category; must belong to the category.
    pub sub_category_id: Uuid,
    /// Free-text description.
    #[validate(length(max = 100))]
    pub description: Option<String>,
    /// Translated names, one per language.
    #[validate(length(min = 1), nested)]
    pub translations: Vec<TranslationPayload>,
}

/// Request body for updating an account.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    /// Referenced category.
    pub category_id: Uuid,
    /// Referenced sub-category; must belong to the category.
    pub sub_category_id: Uuid,
    /// Free-text description.
    #[validate(length(max = 100))]
    pub description: Option<String>,
    /// Replacement translation set.
    #[validate(length(min = 1), nested)]
    pub translations: Vec<TranslationPayload>,
}

/// POST `/accounts` - Create an account owned by the acting principal.
async fn create_account(
    State(state): State<AppState>,
    actor: ActorContext,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_response(&errors);
    }

    let fields = AccountFields {
        category_id: payload.category_id,
        sub_category_id: payload.sub_category_id,
        description: payload.description,
    };

    match repository(&state)
        .create(fields, to_drafts(payload.translations), actor.actor_id)
        .await
    {
        Ok(id) => {
            info!(account_id = %id, owner_id = %actor.actor_id, "Account created");
            (StatusCode::CREATED, Json(json!({ "account_id": id }))).into_response()
        }
        Err(e) => error_response(e, "create account"),
    }
}

/// GET `/accounts/{account_id}` - Fetch one of the caller's accounts.
async fn get_account(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    match repository(&state).get_by_id(account_id, actor.actor_id).await {
        Ok(detail) => (
            StatusCode::OK,
            Json(json!({
                "account_id": detail.id,
                "category_id": detail.fields.category_id,
                "sub_category_id": detail.fields.sub_category_id,
                "description": detail.fields.description,
                "translations": detail.translations,
                "created_at": detail.audit.created_at,
                "updated_at": detail.audit.updated_at,
            })),
        )
            .into_response(),
        Err(e) => error_response(e, "get account"),
    }
}

/// PUT `/accounts/{account_id}` - Replace translations, refs, description.
async fn update_account(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<UpdateAccountRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_response(&errors);
    }

    let fields = AccountFields {
        category_id: payload.category_id,
        sub_category_id: payload.sub_category_id,
        description: payload.description,
    };

    match repository(&state)
        .update(
            account_id,
            fields,
            to_drafts(payload.translations),
            actor.actor_id,
        )
        .await
    {
        Ok(()) => {
            info!(account_id = %account_id, "Account updated");
            (StatusCode::OK, Json(json!({ "account_id": account_id }))).into_response()
        }
        Err(e) => error_response(e, "update account"),
    }
}

/// DELETE `/accounts/{account_id}` - Soft-delete one of the caller's accounts.
async fn delete_account(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    match repository(&state).delete(account_id, actor.actor_id).await {
        Ok(()) => {
            info!(account_id = %account_id, "Account deleted");
            (StatusCode::OK, Json(json!({ "account_id": account_id }))).into_response()
        }
        Err(e) => error_response(e, "delete account"),
    }
}

/// GET `/accounts` - The caller's accounts, localized and paginated.
async fn list_accounts(
    State(state): State<AppState>,
    actor: ActorContext,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let lang = query.language();
    let page = query.page_request();

    match repository(&state).list(&lang, &page, actor.actor_id).await {
        Ok((items, total)) => {
            let data: Vec<_> = items.into_iter().map(account_item).collect();
            (StatusCode::OK, Json(PageResponse::new(data, &page, total))).into_response()
        }
        Err(e) => error_response(e, "list accounts"),
    }
}
