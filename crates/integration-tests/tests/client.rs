//! The typed client and form flow against a live server.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::json;

use shop_pilot_cli::{
    Action, Billboards, Categories, Colors, Confirmation, Entity, Form, FormError, Notification,
    Products, Sizes,
};
use shop_pilot_core::{BillboardId, ColorId, StoreId};
use shop_pilot_integration_tests::TestServer;

const OWNER: &str = "user_owner";

#[tokio::test]
async fn test_client_store_lifecycle() {
    let server = TestServer::start().await;
    let client = server.client(Some(OWNER));

    let store = client.create_store("Acme").await.unwrap();
    assert_eq!(store.name.as_str(), "Acme");
    assert_eq!(store.owner_id.as_str(), OWNER);

    let renamed = client.rename_store(store.id, "Acme Outlet").await.unwrap();
    assert_eq!(renamed.count, 1);

    let stores = client.list_stores().await.unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0].name.as_str(), "Acme Outlet");

    client.delete_store(store.id).await.unwrap();
    assert!(client.get_store(store.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_client_typed_resources() {
    let server = TestServer::start().await;
    let client = server.client(Some(OWNER));
    let store = client.create_store("Acme").await.unwrap();

    let billboard = client
        .create::<Billboards>(
            store.id,
            &json!({ "label": "Summer", "imageUrl": "https://cdn.example/summer.png" }),
        )
        .await
        .unwrap();
    let category = client
        .create::<Categories>(store.id, &json!({ "name": "Shirts", "billboardId": billboard.id }))
        .await
        .unwrap();
    let color = client
        .create::<Colors>(store.id, &json!({ "name": "Red", "value": "#ff0000" }))
        .await
        .unwrap();
    let size = client
        .create::<Sizes>(store.id, &json!({ "name": "Small", "value": "S" }))
        .await
        .unwrap();

    let product = client
        .create::<Products>(
            store.id,
            &json!({
                "name": "Runner",
                "price": "59.50",
                "images": [{ "url": "https://cdn.example/a.png" }],
                "categoryId": category.id,
                "colorId": color.id,
                "sizeId": size.id,
                "isFeatured": true,
            }),
        )
        .await
        .unwrap();
    assert_eq!(product.category.id, category.id);
    assert_eq!(product.images.len(), 1);
    assert!(product.product.is_featured);
    assert_eq!(product.product.price.to_string(), "59.50");

    let detail = client
        .get::<Categories>(store.id, category.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.billboard.id, billboard.id);

    let updated = client
        .update::<Products>(
            store.id,
            product.product.id,
            &json!({
                "name": "Runner",
                "price": 64,
                "images": [{ "url": "https://cdn.example/b.png" }],
                "categoryId": category.id,
                "colorId": color.id,
                "sizeId": size.id,
            }),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.images[0].url.as_str(), "https://cdn.example/b.png");
    assert!(!updated.product.is_featured);

    let products = client.list::<Products>(store.id).await.unwrap();
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn test_client_surfaces_status_and_message() {
    let server = TestServer::start().await;
    let owner = server.client(Some(OWNER));
    let store = owner.create_store("Acme").await.unwrap();

    let anonymous = server.client(None);
    let err = anonymous
        .create::<Colors>(store.id, &json!({ "name": "Red", "value": "#ff0000" }))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

    let intruder = owner.with_token(Some(shop_pilot_integration_tests::token_for("user_u2").into()));
    let err = intruder
        .create::<Colors>(store.id, &json!({ "name": "Red", "value": "#ff0000" }))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert_eq!(err.to_string(), "403 Forbidden: Unauthorized");

    let missing = anonymous
        .get::<Colors>(store.id, ColorId::generate())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_form_delete_of_referenced_billboard_hints_at_categories() {
    let server = TestServer::start().await;
    let client = server.client(Some(OWNER));
    let store = client.create_store("Acme").await.unwrap();
    let billboard = client
        .create::<Billboards>(
            store.id,
            &json!({ "label": "Summer", "imageUrl": "https://cdn.example/summer.png" }),
        )
        .await
        .unwrap();
    client
        .create::<Categories>(store.id, &json!({ "name": "Shirts", "billboardId": billboard.id }))
        .await
        .unwrap();

    let mut form = Form::new(Entity::BILLBOARD);
    let result = form
        .delete(
            Confirmation::confirmed(),
            client.delete::<Billboards>(store.id, billboard.id),
        )
        .await
        .unwrap();

    assert_eq!(
        result.unwrap_err().status(),
        Some(StatusCode::INTERNAL_SERVER_ERROR)
    );
    assert_eq!(
        form.notification(),
        Some(&Notification::Error(
            "Make sure you removed all categories using this billboard first.".to_string()
        ))
    );
    assert!(
        client
            .get::<Billboards>(store.id, billboard.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_form_unconfirmed_delete_keeps_record() {
    let server = TestServer::start().await;
    let client = server.client(Some(OWNER));
    let store = client.create_store("Acme").await.unwrap();
    let color = client
        .create::<Colors>(store.id, &json!({ "name": "Red", "value": "#ff0000" }))
        .await
        .unwrap();

    let mut form = Form::new(Entity::COLOR);
    let result = form
        .delete(
            Confirmation::pending(),
            client.delete::<Colors>(store.id, color.id),
        )
        .await;

    assert!(matches!(result, Err(FormError::NotConfirmed)));
    assert!(client.get::<Colors>(store.id, color.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_form_create_success_notification() {
    let server = TestServer::start().await;
    let client = server.client(Some(OWNER));
    let store = client.create_store("Acme").await.unwrap();

    let mut form = Form::new(Entity::SIZE);
    let created = form
        .submit(
            Action::Create,
            client.create::<Sizes>(store.id, &json!({ "name": "Small", "value": "S" })),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(created.value.as_str(), "S");
    assert_eq!(
        form.notification().map(Notification::message),
        Some("Size created.")
    );
}

#[tokio::test]
async fn test_client_unknown_ids_are_typed() {
    let server = TestServer::start().await;
    let client = server.client(Some(OWNER));

    let result = client
        .delete::<Billboards>(StoreId::generate(), BillboardId::generate())
        .await;
    assert_eq!(
        result.unwrap_err().status(),
        Some(StatusCode::FORBIDDEN)
    );
}
