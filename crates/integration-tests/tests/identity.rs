//! Caller identity on the admin API.
//!
//! Mutations without a valid bearer token are rejected before any field is
//! read or any write happens. Reads stay public.

#![allow(clippy::unwrap_used)]

use reqwest::{Method, StatusCode};
use serde_json::json;

use shop_pilot_integration_tests::TestServer;

#[tokio::test]
async fn test_create_without_token_is_unauthenticated() {
    let server = TestServer::start().await;
    let store = server.seed_store("user_owner", "Acme").await;

    let response = server
        .post(
            &format!("/api/{store}/colors"),
            None,
            &json!({ "name": "Red", "value": "#ff0000" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.text().await.unwrap(), "Unauthenticated");

    let colors = server.get_json(&format!("/api/{store}/colors")).await;
    assert_eq!(colors, json!([]));
}

#[tokio::test]
async fn test_identity_is_checked_before_fields() {
    let server = TestServer::start().await;
    let store = server.seed_store("user_owner", "Acme").await;

    // Empty body, no token: identity wins.
    let response = server
        .post(&format!("/api/{store}/billboards"), None, &json!({}))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_is_unauthenticated() {
    let server = TestServer::start().await;
    let store = server.seed_store("user_owner", "Acme").await;

    let response = server
        .request(Method::PATCH, &format!("/api/stores/{store}"), None)
        .bearer_auth("not-a-jwt")
        .json(&json!({ "name": "Hijacked" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = server.get_json(&format!("/api/stores/{store}")).await;
    assert_eq!(body["name"], "Acme");
}

#[tokio::test]
async fn test_delete_without_token_leaves_record() {
    let server = TestServer::start().await;
    let store = server.seed_store("user_owner", "Acme").await;
    let size = server
        .create(
            "user_owner",
            &store,
            "sizes",
            &json!({ "name": "Large", "value": "L" }),
        )
        .await;

    let response = server
        .delete(&format!("/api/{store}/sizes/{size}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = server.get_json(&format!("/api/{store}/sizes/{size}")).await;
    assert_eq!(body["value"], "L");
}

#[tokio::test]
async fn test_store_endpoints_require_identity() {
    let server = TestServer::start().await;

    let response = server.get("/api/stores").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/stores", None, &json!({ "name": "Acme" }))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.text().await.unwrap(), "Unauthenticated");
}

#[tokio::test]
async fn test_reads_are_public() {
    let server = TestServer::start().await;
    let store = server.seed_store("user_owner", "Acme").await;
    let seeded = server.seed_catalog("user_owner", &store).await;

    for path in [
        format!("/api/stores/{store}"),
        format!("/api/{store}/billboards"),
        format!("/api/{store}/billboards/{}", seeded.billboard),
        format!("/api/{store}/categories"),
        format!("/api/{store}/categories/{}", seeded.category),
        format!("/api/{store}/colors"),
        format!("/api/{store}/sizes/{}", seeded.size),
        format!("/api/{store}/products"),
    ] {
        let response = server.get(&path).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {path}");
    }
}

#[tokio::test]
async fn test_every_mutation_requires_identity() {
    let server = TestServer::start().await;
    let store = server.seed_store("user_owner", "Acme").await;
    let seeded = server.seed_catalog("user_owner", &store).await;
    let product = server
        .seed_product("user_owner", &seeded, &["https://cdn.example/a.png"])
        .await;

    let resources = [
        (
            format!("/api/{store}/billboards"),
            seeded.billboard.clone(),
            json!({ "label": "Taken", "imageUrl": "https://cdn.example/x.png" }),
        ),
        (
            format!("/api/{store}/categories"),
            seeded.category.clone(),
            json!({ "name": "Taken", "billboardId": seeded.billboard }),
        ),
        (
            format!("/api/{store}/colors"),
            seeded.color.clone(),
            json!({ "name": "Taken", "value": "#000000" }),
        ),
        (
            format!("/api/{store}/sizes"),
            seeded.size.clone(),
            json!({ "name": "Taken", "value": "XXL" }),
        ),
        (
            format!("/api/{store}/products"),
            product.clone(),
            seeded.product_body("Taken", &["https://cdn.example/x.png"]),
        ),
        ("/api/stores".to_string(), store.clone(), json!({ "name": "Taken" })),
    ];

    for (collection, id, body) in &resources {
        let member = format!("{collection}/{id}");
        let attempts = [
            ("POST", server.post(collection, None, body).await),
            ("PATCH", server.patch(&member, None, body).await),
            ("DELETE", server.delete(&member, None).await),
        ];
        for (method, response) in attempts {
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {member}");
            assert_eq!(
                response.text().await.unwrap(),
                "Unauthenticated",
                "{method} {member}"
            );
        }
    }

    // Nothing was written.
    assert_eq!(server.get_json(&format!("/api/stores/{store}")).await["name"], "Acme");
    for (resource, name_key, name) in [
        ("billboards", "label", "Summer"),
        ("categories", "name", "Shirts"),
        ("colors", "name", "Red"),
        ("sizes", "name", "Small"),
        ("products", "name", "Runner"),
    ] {
        let list = server.get_json(&format!("/api/{store}/{resource}")).await;
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1, "{resource}");
        assert_eq!(list[0][name_key], name, "{resource}");
    }

    let product_body = server
        .get_json(&format!("/api/{store}/products/{product}"))
        .await;
    assert_eq!(product_body["images"][0]["url"], "https://cdn.example/a.png");
    assert_eq!(product_body["images"].as_array().unwrap().len(), 1);
}
