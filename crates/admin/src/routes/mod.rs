//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                             - Liveness
//! GET    /health/ready                       - Database reachability
//!
//! # Stores
//! GET    /api/stores                         - Caller's stores (identity)
//! POST   /api/stores                         - Create store (identity)
//! GET    /api/stores/{storeId}               - Store by id (public)
//! PATCH  /api/stores/{storeId}               - Rename store (owner)
//! DELETE /api/stores/{storeId}               - Delete store (owner)
//!
//! # Store resources: billboards, categories, colors, sizes, products
//! GET    /api/{storeId}/{resource}           - List, newest first (public)
//! POST   /api/{storeId}/{resource}           - Create (owner)
//! GET    /api/{storeId}/{resource}/{id}      - Record or null (public)
//! PATCH  /api/{storeId}/{resource}/{id}      - Full overwrite (owner)
//! DELETE /api/{storeId}/{resource}/{id}      - Delete (owner)
//! ```
//!
//! Every mutation runs the same gate in the same order: caller identity
//! (401), required fields (400), store ownership (403), then exactly one
//! write.

pub mod billboards;
pub mod categories;
pub mod colors;
pub mod health;
pub mod products;
pub mod sizes;
pub mod stores;

use axum::{
    Json, Router,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::FieldError;
use crate::state::AppState;

/// Build the full API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(stores::router())
        .merge(billboards::router())
        .merge(categories::router())
        .merge(colors::router())
        .merge(sizes::router())
        .merge(products::router())
}

/// JSON request body whose rejections are reported as `400` plain text.
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::JsonDataError(err)) => Err(data_error(&err.body_text())),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

/// Name the offending field when a value has the wrong type.
///
/// axum renders data errors as `"<summary>: <path>: <serde message>"`.
fn data_error(body_text: &str) -> AppError {
    body_text
        .split_once(": ")
        .and_then(|(_, detail)| detail.split_once(": "))
        .and_then(|(path, _)| FieldError::invalid_at(path))
        .map_or_else(|| AppError::Validation(body_text.to_string()), AppError::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, StatusCode, header};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use tower::ServiceExt;

    use super::*;
    use crate::db::MemoryCatalog;
    use crate::services::IdentityVerifier;

    const SECRET: &[u8] = b"k9$Qz!v2Lr#8Xw@p5Tn&3Mb*7Yc^1Hd%";

    fn router() -> Router {
        let state = AppState::new(
            Arc::new(MemoryCatalog::new()),
            IdentityVerifier::hs256(SECRET),
        );
        routes().with_state(state)
    }

    fn token(sub: &str) -> String {
        let exp = chrono::Utc::now().timestamp() + 3600;
        encode(
            &Header::default(),
            &serde_json::json!({ "sub": sub, "exp": exp }),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    async fn send(
        router: Router,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: &str,
    ) -> (StatusCode, String) {
        let mut request = axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(user) = user {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token(user)));
        }

        let response = router
            .oneshot(request.body(Body::from(body.to_owned())).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_identity_precedes_validation() {
        let store_id = shop_pilot_core::StoreId::generate();
        let (status, body) = send(
            router(),
            Method::POST,
            &format!("/api/{store_id}/billboards"),
            None,
            "{}",
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Unauthenticated");
    }

    #[tokio::test]
    async fn test_validation_precedes_ownership() {
        let store_id = shop_pilot_core::StoreId::generate();
        let (status, body) = send(
            router(),
            Method::POST,
            &format!("/api/{store_id}/billboards"),
            Some("user_a"),
            r#"{"label": "Summer"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Image URL is required");
    }

    #[tokio::test]
    async fn test_ownership_checked_last() {
        let store_id = shop_pilot_core::StoreId::generate();
        let (status, body) = send(
            router(),
            Method::POST,
            &format!("/api/{store_id}/billboards"),
            Some("user_a"),
            r#"{"label": "Summer", "imageUrl": "https://cdn.example/s.png"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, "Unauthorized");
    }

    #[tokio::test]
    async fn test_stores_path_is_not_a_store_id() {
        let (status, body) = send(router(), Method::GET, "/api/stores", Some("user_a"), "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn test_wrong_field_type_names_the_field() {
        let (status, body) = send(
            router(),
            Method::POST,
            "/api/stores",
            Some("user_a"),
            r#"{"name": 5}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Name is invalid");
    }

    #[test]
    fn test_data_error_falls_back_to_serde_text() {
        let text = "Failed to deserialize the JSON body into the target type: \
                    invalid type: sequence, expected struct StorePayload at line 1 column 0";
        assert_eq!(data_error(text).to_string(), text);

        let text = "Failed to deserialize the JSON body into the target type: \
                    price: invalid type: boolean `true` at line 1 column 14";
        assert_eq!(data_error(text).to_string(), "Price is invalid");
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let (status, _) = send(router(), Method::POST, "/api/stores", Some("user_a"), "{").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
