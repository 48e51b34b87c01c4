//! Store endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use shop_pilot_core::StoreId;

use super::Payload;
use crate::error::AppError;
use crate::middleware::RequireIdentity;
use crate::models::{BatchResult, Store, StoreInput, StorePayload};
use crate::services::authorize_store;
use crate::state::AppState;

/// Build the stores router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stores", get(list_stores).post(create_store))
        .route(
            "/api/stores/{store_id}",
            get(get_store).patch(update_store).delete(delete_store),
        )
}

/// List the caller's stores.
///
/// # Errors
///
/// Returns `Unauthenticated` without a valid identity.
#[instrument(skip_all, fields(owner = %owner))]
pub async fn list_stores(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<Store>>, AppError> {
    let stores = state.catalog().list_stores_by_owner(&owner).await?;
    Ok(Json(stores))
}

/// Create a store owned by the caller.
///
/// # Errors
///
/// Returns `Unauthenticated` without a valid identity and `Validation` when
/// the name is missing.
#[instrument(skip_all, fields(owner = %owner))]
pub async fn create_store(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Payload(payload): Payload<StorePayload>,
) -> Result<Json<Store>, AppError> {
    let input = StoreInput::try_from(payload)?;

    let store = state.catalog().create_store(&owner, &input).await?;
    tracing::info!(store_id = %store.id, "Store created");

    Ok(Json(store))
}

/// Get a store by id, or `null`.
///
/// # Errors
///
/// Returns `Database` if the lookup fails.
#[instrument(skip_all, fields(store_id = %store_id))]
pub async fn get_store(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Option<Store>>, AppError> {
    Ok(Json(state.catalog().get_store(store_id).await?))
}

/// Rename a store.
///
/// # Errors
///
/// Returns `Unauthenticated`, `Validation` or `Unauthorized` in that order
/// of precedence.
#[instrument(skip_all, fields(store_id = %store_id))]
pub async fn update_store(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    Payload(payload): Payload<StorePayload>,
) -> Result<Json<BatchResult>, AppError> {
    let input = StoreInput::try_from(payload)?;
    authorize_store(state.catalog(), store_id, &owner).await?;

    let result = state
        .catalog()
        .update_store(store_id, &owner, &input)
        .await?;
    tracing::info!(count = result.count, "Store updated");

    Ok(Json(result))
}

/// Delete a store. Fails while it still has billboards, categories,
/// colors, sizes or products.
///
/// # Errors
///
/// Returns `Unauthenticated`, `Unauthorized`, or `Database` when the store
/// is still referenced.
#[instrument(skip_all, fields(store_id = %store_id))]
pub async fn delete_store(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<BatchResult>, AppError> {
    authorize_store(state.catalog(), store_id, &owner).await?;

    let result = state.catalog().delete_store(store_id, &owner).await?;
    tracing::info!(count = result.count, "Store deleted");

    Ok(Json(result))
}
