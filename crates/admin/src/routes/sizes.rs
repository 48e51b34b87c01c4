//! Size endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use shop_pilot_core::{SizeId, StoreId};

use super::Payload;
use crate::error::AppError;
use crate::middleware::RequireIdentity;
use crate::models::{BatchResult, Size, SizeInput, SizePayload};
use crate::services::authorize_store;
use crate::state::AppState;

/// Build the sizes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/{store_id}/sizes", get(list_sizes).post(create_size))
        .route(
            "/api/{store_id}/sizes/{size_id}",
            get(get_size).patch(update_size).delete(delete_size),
        )
}

#[instrument(skip_all, fields(store_id = %store_id))]
async fn list_sizes(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Size>>, AppError> {
    Ok(Json(state.catalog().list_sizes(store_id).await?))
}

#[instrument(skip_all, fields(size_id = %size_id))]
async fn get_size(
    State(state): State<AppState>,
    Path((_store_id, size_id)): Path<(StoreId, SizeId)>,
) -> Result<Json<Option<Size>>, AppError> {
    Ok(Json(state.catalog().get_size(size_id).await?))
}

#[instrument(skip_all, fields(store_id = %store_id))]
async fn create_size(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    Payload(payload): Payload<SizePayload>,
) -> Result<Json<Size>, AppError> {
    let input = SizeInput::try_from(payload)?;
    authorize_store(state.catalog(), store_id, &owner).await?;

    let size = state.catalog().create_size(store_id, &input).await?;
    tracing::info!(size_id = %size.id, "Size created");

    Ok(Json(size))
}

#[instrument(skip_all, fields(store_id = %store_id, size_id = %size_id))]
async fn update_size(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path((store_id, size_id)): Path<(StoreId, SizeId)>,
    Payload(payload): Payload<SizePayload>,
) -> Result<Json<BatchResult>, AppError> {
    let input = SizeInput::try_from(payload)?;
    authorize_store(state.catalog(), store_id, &owner).await?;

    let result = state
        .catalog()
        .update_size(store_id, size_id, &input)
        .await?;
    tracing::info!(count = result.count, "Size updated");

    Ok(Json(result))
}

#[instrument(skip_all, fields(store_id = %store_id, size_id = %size_id))]
async fn delete_size(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path((store_id, size_id)): Path<(StoreId, SizeId)>,
) -> Result<Json<BatchResult>, AppError> {
    authorize_store(state.catalog(), store_id, &owner).await?;

    let result = state.catalog().delete_size(store_id, size_id).await?;
    tracing::info!(count = result.count, "Size deleted");

    Ok(Json(result))
}
