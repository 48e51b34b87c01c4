//! Store management commands.
//!
//! # Usage
//!
//! ```bash
//! sp-cli stores list
//! sp-cli stores create -n "Acme"
//! sp-cli stores rename <store-id> -n "Acme Outlet"
//! sp-cli stores delete <store-id>
//! ```
//!
//! # Environment Variables
//!
//! - `SHOP_PILOT_API_URL` - Base URL of the admin API
//! - `SHOP_PILOT_TOKEN` - Bearer token of the acting user

use shop_pilot_cli::{Action, ApiClient, Entity};
use shop_pilot_core::StoreId;

use super::{CommandError, print_json};

/// List the caller's stores, oldest first.
pub async fn list(client: &ApiClient) -> Result<(), CommandError> {
    let stores = client.list_stores().await?;
    print_json(&stores)
}

pub async fn get(client: &ApiClient, id: StoreId) -> Result<(), CommandError> {
    let store = client.get_store(id).await?;
    print_json(&store)
}

/// Create a store owned by the caller.
pub async fn create(client: &ApiClient, name: &str) -> Result<(), CommandError> {
    super::submit(Entity::STORE, Action::Create, client.create_store(name)).await
}

pub async fn rename(client: &ApiClient, id: StoreId, name: &str) -> Result<(), CommandError> {
    super::submit(Entity::STORE, Action::Update, client.rename_store(id, name)).await
}

/// Delete a store. Fails while products or categories still live in it.
pub async fn delete(client: &ApiClient, id: StoreId, yes: bool) -> Result<(), CommandError> {
    super::delete(Entity::STORE, id, yes, client.delete_store(id)).await
}
