//! Store-scoped resource commands.
//!
//! # Usage
//!
//! ```bash
//! sp-cli categories -s <store-id> list
//! sp-cli categories -s <store-id> get <category-id>
//! sp-cli categories -s <store-id> create --json '{"name": "Shirts", "billboardId": "<id>"}'
//! sp-cli categories -s <store-id> update <category-id> --json '{...}'
//! sp-cli categories -s <store-id> delete <category-id>
//! ```
//!
//! Mutations need `SHOP_PILOT_TOKEN` for the owner of the store.

use shop_pilot_cli::{Action, ApiClient, Resource};
use shop_pilot_core::StoreId;

use super::{CommandError, print_json};

pub async fn list<R: Resource>(client: &ApiClient, store_id: StoreId) -> Result<(), CommandError> {
    let records = client.list::<R>(store_id).await?;
    tracing::debug!(resource = R::PATH, count = records.len(), "Listed records");
    print_json(&records)
}

/// Print one record, or `null` when it does not exist.
pub async fn get<R: Resource>(
    client: &ApiClient,
    store_id: StoreId,
    id: R::Id,
) -> Result<(), CommandError> {
    let record = client.get::<R>(store_id, id).await?;
    print_json(&record)
}

pub async fn create<R: Resource>(
    client: &ApiClient,
    store_id: StoreId,
    json: &str,
) -> Result<(), CommandError> {
    let body: serde_json::Value = serde_json::from_str(json)?;
    super::submit(R::ENTITY, Action::Create, client.create::<R>(store_id, &body)).await
}

pub async fn update<R: Resource>(
    client: &ApiClient,
    store_id: StoreId,
    id: R::Id,
    json: &str,
) -> Result<(), CommandError> {
    let body: serde_json::Value = serde_json::from_str(json)?;
    super::submit(R::ENTITY, Action::Update, client.update::<R>(store_id, id, &body)).await
}

pub async fn delete<R: Resource>(
    client: &ApiClient,
    store_id: StoreId,
    id: R::Id,
    yes: bool,
) -> Result<(), CommandError> {
    super::delete(R::ENTITY, id, yes, client.delete::<R>(store_id, id)).await
}
