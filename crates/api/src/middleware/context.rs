//! Actor-context extraction.
//!
//! Authentication happens upstream: a gateway verifies the caller's token
//! and installs the verified principal id on the request. This service
//! treats that id as an opaque value and uses it for audit attribution and
//! owner scoping only.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use serde_json::{Value, json};
use uuid::Uuid;

/// Header carrying the verified principal id.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// The acting principal for the current request.
#[derive(Debug, Clone, Copy)]
pub struct ActorContext {
    /// Verified principal id.
    pub actor_id: Uuid,
}

impl<S> FromRequestParts<S> for ActorContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "missing_actor",
                        "message": "Request is missing the authenticated actor id"
                    })),
                )
            })?;

        let actor_id = Uuid::parse_str(raw).map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_actor",
                    "message": "Actor id is not a valid UUID"
                })),
            )
        })?;

        Ok(Self { actor_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/v1/categories");
        if let Some(value) = value {
            builder = builder.header(ACTOR_HEADER, value);
        }
        let (parts, ()) = builder.body(()).expect("request builds").into_parts();
        parts
    }

    #[tokio::test]
    async fn test_extracts_valid_actor() {
        let actor = Uuid::new_v4();
        let mut parts = parts_with_header(Some(&actor.to_string()));

        let context = ActorContext::from_request_parts(&mut parts, &())
            .await
            .expect("extraction succeeds");
        assert_eq!(context.actor_id, actor);
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let mut parts = parts_with_header(None);

        let (status, _) = ActorContext::from_request_parts(&mut parts, &())
            .await
            .expect_err("extraction fails");
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_id_is_unauthorized() {
        let mut parts = parts_with_header(Some("not-a-uuid"));

        let (status, _) = ActorContext::from_request_parts(&mut parts, &())
            .await
            .expect_err("extraction fails");
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
