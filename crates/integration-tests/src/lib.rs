//! Integration tests for Shop Pilot.
//!
//! Each test starts the admin application on an ephemeral port, backed by
//! the in-process catalog, and drives it over real HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shop-pilot-integration-tests
//! ```
//!
//! No database or identity provider is needed: tokens are minted locally
//! with the server's test signing key.

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::sync::Arc;

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::SecretString;
use serde::Serialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use shop_pilot_admin::AppState;
use shop_pilot_admin::db::MemoryCatalog;
use shop_pilot_admin::services::IdentityVerifier;
use shop_pilot_cli::ApiClient;

/// HS256 signing key shared by the test server and the token minter.
pub const SECRET: &[u8] = b"k9$Qz!v2Lr#8Xw@p5Tn&3Mb*7Yc^1Hd%";

#[derive(Serialize)]
struct Claims<'a> {
    sub: &'a str,
    exp: i64,
}

/// Mint a token for `user` that expires in an hour.
#[must_use]
pub fn token_for(user: &str) -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    encode(
        &Header::new(Algorithm::HS256),
        &Claims { sub: user, exp },
        &EncodingKey::from_secret(SECRET),
    )
    .expect("Failed to mint test token")
}

/// A running admin server.
pub struct TestServer {
    pub base_url: String,
    http: Client,
}

impl TestServer {
    /// Start a server with an empty catalog.
    pub async fn start() -> Self {
        let catalog = Arc::new(MemoryCatalog::new());
        let state = AppState::new(catalog, IdentityVerifier::hs256(SECRET));
        let app = shop_pilot_admin::app(state, &[]);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            http: Client::new(),
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A raw request, authenticated as `user` when given.
    #[must_use]
    pub fn request(&self, method: reqwest::Method, path: &str, user: Option<&str>) -> RequestBuilder {
        let request = self.http.request(method, self.url(path));
        match user {
            Some(user) => request.bearer_auth(token_for(user)),
            None => request,
        }
    }

    pub async fn get(&self, path: &str) -> Response {
        self.request(reqwest::Method::GET, path, None)
            .send()
            .await
            .expect("GET failed")
    }

    pub async fn post(&self, path: &str, user: Option<&str>, body: &Value) -> Response {
        self.request(reqwest::Method::POST, path, user)
            .json(body)
            .send()
            .await
            .expect("POST failed")
    }

    pub async fn patch(&self, path: &str, user: Option<&str>, body: &Value) -> Response {
        self.request(reqwest::Method::PATCH, path, user)
            .json(body)
            .send()
            .await
            .expect("PATCH failed")
    }

    pub async fn delete(&self, path: &str, user: Option<&str>) -> Response {
        self.request(reqwest::Method::DELETE, path, user)
            .send()
            .await
            .expect("DELETE failed")
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json(&self, path: &str) -> Value {
        let response = self.get(path).await;
        assert!(response.status().is_success(), "GET {path} failed");
        response.json().await.expect("GET body is not JSON")
    }

    /// The typed client, acting as `user`.
    #[must_use]
    pub fn client(&self, user: Option<&str>) -> ApiClient {
        ApiClient::new(
            self.base_url.clone(),
            user.map(|u| SecretString::from(token_for(u))),
        )
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    /// Create a store owned by `user` and return its id.
    pub async fn seed_store(&self, user: &str, name: &str) -> String {
        let response = self
            .post("/api/stores", Some(user), &json!({ "name": name }))
            .await;
        assert_eq!(response.status(), 200, "store seed failed");
        id_of(response).await
    }

    /// Create one billboard, category, color and size in a store.
    pub async fn seed_catalog(&self, user: &str, store: &str) -> Seeded {
        let billboard = self
            .create(
                user,
                store,
                "billboards",
                &json!({ "label": "Summer", "imageUrl": "https://cdn.example/summer.png" }),
            )
            .await;
        let category = self
            .create(
                user,
                store,
                "categories",
                &json!({ "name": "Shirts", "billboardId": billboard }),
            )
            .await;
        let color = self
            .create(user, store, "colors", &json!({ "name": "Red", "value": "#ff0000" }))
            .await;
        let size = self
            .create(user, store, "sizes", &json!({ "name": "Small", "value": "S" }))
            .await;

        Seeded {
            store: store.to_string(),
            billboard,
            category,
            color,
            size,
        }
    }

    /// Create a product with the given image URLs.
    pub async fn seed_product(&self, user: &str, seeded: &Seeded, images: &[&str]) -> String {
        self.create(user, &seeded.store, "products", &seeded.product_body("Runner", images))
            .await
    }

    /// POST a resource and return the new id.
    pub async fn create(&self, user: &str, store: &str, resource: &str, body: &Value) -> String {
        let response = self
            .post(&format!("/api/{store}/{resource}"), Some(user), body)
            .await;
        assert_eq!(response.status(), 200, "{resource} seed failed");
        id_of(response).await
    }
}

/// Ids of a seeded store catalog.
#[derive(Debug, Clone)]
pub struct Seeded {
    pub store: String,
    pub billboard: String,
    pub category: String,
    pub color: String,
    pub size: String,
}

impl Seeded {
    /// A complete product body referencing the seeded catalog.
    #[must_use]
    pub fn product_body(&self, name: &str, images: &[&str]) -> Value {
        json!({
            "name": name,
            "price": 59.5,
            "images": images.iter().map(|url| json!({ "url": url })).collect::<Vec<_>>(),
            "categoryId": self.category,
            "colorId": self.color,
            "sizeId": self.size,
        })
    }
}

async fn id_of(response: Response) -> String {
    let body: Value = response.json().await.expect("Body is not JSON");
    body["id"]
        .as_str()
        .expect("Body has no id")
        .to_string()
}
