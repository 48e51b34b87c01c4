//! Store ownership gates every mutation.
//!
//! A caller with a valid identity who does not own the store is refused
//! with 403, and nothing is written, even when the resource id is real.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::json;

use shop_pilot_integration_tests::TestServer;

const OWNER: &str = "user_u";
const INTRUDER: &str = "user_u2";

#[tokio::test]
async fn test_acme_belongs_to_its_creator() {
    let server = TestServer::start().await;
    let store = server.seed_store(OWNER, "Acme").await;

    let body = server.get_json(&format!("/api/stores/{store}")).await;
    assert_eq!(body["name"], "Acme");
    assert_eq!(body["userId"], OWNER);

    let response = server
        .post(
            &format!("/api/{store}/billboards"),
            Some(INTRUDER),
            &json!({ "label": "Spam", "imageUrl": "https://cdn.example/spam.png" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(response.text().await.unwrap(), "Unauthorized");

    let billboards = server.get_json(&format!("/api/{store}/billboards")).await;
    assert_eq!(billboards, json!([]));
}

#[tokio::test]
async fn test_non_owner_cannot_touch_existing_records() {
    let server = TestServer::start().await;
    let store = server.seed_store(OWNER, "Acme").await;
    let seeded = server.seed_catalog(OWNER, &store).await;
    let product = server
        .seed_product(OWNER, &seeded, &["https://cdn.example/a.png"])
        .await;

    let updates = [
        (
            format!("/api/{store}/billboards/{}", seeded.billboard),
            json!({ "label": "Taken", "imageUrl": "https://cdn.example/x.png" }),
        ),
        (
            format!("/api/{store}/categories/{}", seeded.category),
            json!({ "name": "Taken", "billboardId": seeded.billboard }),
        ),
        (
            format!("/api/{store}/colors/{}", seeded.color),
            json!({ "name": "Taken", "value": "#000000" }),
        ),
        (
            format!("/api/{store}/sizes/{}", seeded.size),
            json!({ "name": "Taken", "value": "XXL" }),
        ),
        (
            format!("/api/{store}/products/{product}"),
            seeded.product_body("Taken", &["https://cdn.example/x.png"]),
        ),
        (format!("/api/stores/{store}"), json!({ "name": "Taken" })),
    ];

    for (path, body) in &updates {
        let response = server.patch(path, Some(INTRUDER), body).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "PATCH {path}");

        let response = server.delete(path, Some(INTRUDER)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "DELETE {path}");
    }

    // Everything is still as the owner left it.
    let store_body = server.get_json(&format!("/api/stores/{store}")).await;
    assert_eq!(store_body["name"], "Acme");

    let billboard = server
        .get_json(&format!("/api/{store}/billboards/{}", seeded.billboard))
        .await;
    assert_eq!(billboard["label"], "Summer");

    let color = server
        .get_json(&format!("/api/{store}/colors/{}", seeded.color))
        .await;
    assert_eq!(color["name"], "Red");

    let product_body = server
        .get_json(&format!("/api/{store}/products/{product}"))
        .await;
    assert_eq!(product_body["name"], "Runner");
    assert_eq!(product_body["images"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_ownership_is_checked_after_fields() {
    let server = TestServer::start().await;
    let store = server.seed_store(OWNER, "Acme").await;

    // Missing field from a non-owner: validation answers first.
    let response = server
        .post(&format!("/api/{store}/sizes"), Some(INTRUDER), &json!({}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Name is required");
}

#[tokio::test]
async fn test_unknown_store_is_unauthorized() {
    let server = TestServer::start().await;
    let missing = uuid::Uuid::new_v4();

    let response = server
        .post(
            &format!("/api/{missing}/colors"),
            Some(OWNER),
            &json!({ "name": "Red", "value": "#ff0000" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_cannot_reach_into_another_store() {
    let server = TestServer::start().await;
    let theirs = server.seed_store(INTRUDER, "Other").await;
    let color = server
        .create(
            INTRUDER,
            &theirs,
            "colors",
            &json!({ "name": "Blue", "value": "#0000ff" }),
        )
        .await;
    let mine = server.seed_store(OWNER, "Acme").await;

    // Owner of `mine` addresses a color that lives in `theirs`.
    let response = server
        .delete(&format!("/api/{mine}/colors/{color}"), Some(OWNER))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["count"], 0);

    let still_there = server
        .get_json(&format!("/api/{theirs}/colors/{color}"))
        .await;
    assert_eq!(still_there["name"], "Blue");
}

#[tokio::test]
async fn test_store_list_is_scoped_to_caller() {
    let server = TestServer::start().await;
    server.seed_store(OWNER, "Acme").await;
    server.seed_store(OWNER, "Acme Outlet").await;
    server.seed_store(INTRUDER, "Other").await;

    let response = server
        .request(reqwest::Method::GET, "/api/stores", Some(OWNER))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stores: serde_json::Value = response.json().await.unwrap();
    let names: Vec<&str> = stores
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Acme", "Acme Outlet"]);
}
