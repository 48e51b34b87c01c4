//! Typed REST client for the admin API.
//!
//! # Environment Variables
//!
//! - `SHOP_PILOT_API_URL` - Base URL of the admin API (default `http://127.0.0.1:3001`)
//! - `SHOP_PILOT_TOKEN` - Bearer token from the identity provider. Reads work
//!   without one; every mutation needs it.

use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use shop_pilot_admin::models::{BatchResult, Store};
use shop_pilot_core::StoreId;

use crate::resource::Resource;

const DEFAULT_API_URL: &str = "http://127.0.0.1:3001";

/// Errors from talking to the admin API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or an undecodable response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    /// Status code of an API error, if the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(_) => None,
        }
    }
}

/// Client for the store administration API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<SecretString>,
}

impl ApiClient {
    /// Create a client for `base_url`, authenticating with `token` if given.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<SecretString>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Build a client from `SHOP_PILOT_API_URL` and `SHOP_PILOT_TOKEN`.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url =
            std::env::var("SHOP_PILOT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let token = std::env::var("SHOP_PILOT_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .map(SecretString::from);

        Self::new(base_url, token)
    }

    /// The same client acting with a different token.
    #[must_use]
    pub fn with_token(&self, token: Option<SecretString>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token,
        }
    }

    // =========================================================================
    // Stores
    // =========================================================================

    /// Stores owned by the caller.
    pub async fn list_stores(&self) -> Result<Vec<Store>, ClientError> {
        self.send(self.request(Method::GET, "/api/stores")).await
    }

    pub async fn get_store(&self, id: StoreId) -> Result<Option<Store>, ClientError> {
        self.send(self.request(Method::GET, &format!("/api/stores/{id}")))
            .await
    }

    pub async fn create_store(&self, name: &str) -> Result<Store, ClientError> {
        let body = serde_json::json!({ "name": name });
        self.send(self.request(Method::POST, "/api/stores").json(&body))
            .await
    }

    pub async fn rename_store(&self, id: StoreId, name: &str) -> Result<BatchResult, ClientError> {
        let body = serde_json::json!({ "name": name });
        self.send(
            self.request(Method::PATCH, &format!("/api/stores/{id}"))
                .json(&body),
        )
        .await
    }

    /// Delete a store. The server refuses while anything still lives in it.
    pub async fn delete_store(&self, id: StoreId) -> Result<BatchResult, ClientError> {
        self.send(self.request(Method::DELETE, &format!("/api/stores/{id}")))
            .await
    }

    // =========================================================================
    // Store-scoped resources
    // =========================================================================

    /// Every record of `R` in a store, newest first.
    pub async fn list<R: Resource>(&self, store_id: StoreId) -> Result<Vec<R::Record>, ClientError> {
        self.send(self.request(Method::GET, &collection_path::<R>(store_id)))
            .await
    }

    /// One record of `R`, or `None` if the server has no such id.
    pub async fn get<R: Resource>(
        &self,
        store_id: StoreId,
        id: R::Id,
    ) -> Result<Option<R::Record>, ClientError> {
        self.send(self.request(Method::GET, &member_path::<R>(store_id, id)))
            .await
    }

    pub async fn create<R: Resource>(
        &self,
        store_id: StoreId,
        body: &impl Serialize,
    ) -> Result<R::Created, ClientError> {
        self.send(
            self.request(Method::POST, &collection_path::<R>(store_id))
                .json(body),
        )
        .await
    }

    /// Overwrite a record with `body`. Every required field must be present.
    pub async fn update<R: Resource>(
        &self,
        store_id: StoreId,
        id: R::Id,
        body: &impl Serialize,
    ) -> Result<R::Updated, ClientError> {
        self.send(
            self.request(Method::PATCH, &member_path::<R>(store_id, id))
                .json(body),
        )
        .await
    }

    pub async fn delete<R: Resource>(
        &self,
        store_id: StoreId,
        id: R::Id,
    ) -> Result<BatchResult, ClientError> {
        self.send(self.request(Method::DELETE, &member_path::<R>(store_id, id)))
            .await
    }

    // =========================================================================
    // Transport
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, format!("{}{path}", self.base_url));
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::debug!(status = %status, message = %message, "Admin API request failed");
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}

fn collection_path<R: Resource>(store_id: StoreId) -> String {
    format!("/api/{store_id}/{}", R::PATH)
}

fn member_path<R: Resource>(store_id: StoreId, id: R::Id) -> String {
    format!("/api/{store_id}/{}/{id}", R::PATH)
}
