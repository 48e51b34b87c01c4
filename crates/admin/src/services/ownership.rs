//! Store ownership checks.

use shop_pilot_core::{OwnerId, StoreId};

use crate::db::Catalog;
use crate::error::AppError;
use crate::models::Store;

/// Prove that `owner` owns `store_id` before a mutation.
///
/// A missing store and a store owned by someone else are indistinguishable
/// to the caller; both are `Unauthorized`.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if the store is not owned by `owner`,
/// or `AppError::Database` if the lookup fails.
pub async fn authorize_store(
    catalog: &dyn Catalog,
    store_id: StoreId,
    owner: &OwnerId,
) -> Result<Store, AppError> {
    match catalog.find_owned_store(store_id, owner).await? {
        Some(store) => Ok(store),
        None => {
            tracing::warn!(%store_id, owner = %owner, "Store not owned by caller");
            Err(AppError::Unauthorized("Unauthorized".to_string()))
        }
    }
}
