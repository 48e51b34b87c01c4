//! Billboard endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use shop_pilot_core::{BillboardId, StoreId};

use super::Payload;
use crate::error::AppError;
use crate::middleware::RequireIdentity;
use crate::models::{BatchResult, Billboard, BillboardInput, BillboardPayload};
use crate::services::authorize_store;
use crate::state::AppState;

/// Build the billboards router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/{store_id}/billboards",
            get(list_billboards).post(create_billboard),
        )
        .route(
            "/api/{store_id}/billboards/{billboard_id}",
            get(get_billboard)
                .patch(update_billboard)
                .delete(delete_billboard),
        )
}

/// List a store's billboards, newest first.
///
/// # Errors
///
/// Returns `Database` if the query fails.
#[instrument(skip_all, fields(store_id = %store_id))]
pub async fn list_billboards(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Billboard>>, AppError> {
    Ok(Json(state.catalog().list_billboards(store_id).await?))
}

/// Get a billboard by id, or `null`.
///
/// # Errors
///
/// Returns `Database` if the query fails.
#[instrument(skip_all, fields(billboard_id = %billboard_id))]
pub async fn get_billboard(
    State(state): State<AppState>,
    Path((_store_id, billboard_id)): Path<(StoreId, BillboardId)>,
) -> Result<Json<Option<Billboard>>, AppError> {
    Ok(Json(state.catalog().get_billboard(billboard_id).await?))
}

/// Create a billboard.
///
/// # Errors
///
/// Returns `Unauthenticated`, `Validation` or `Unauthorized` in that order
/// of precedence, or `Database` if the insert fails.
#[instrument(skip_all, fields(store_id = %store_id))]
pub async fn create_billboard(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    Payload(payload): Payload<BillboardPayload>,
) -> Result<Json<Billboard>, AppError> {
    let input = BillboardInput::try_from(payload)?;
    authorize_store(state.catalog(), store_id, &owner).await?;

    let billboard = state.catalog().create_billboard(store_id, &input).await?;
    tracing::info!(billboard_id = %billboard.id, "Billboard created");

    Ok(Json(billboard))
}

/// Overwrite a billboard.
///
/// # Errors
///
/// Returns `Unauthenticated`, `Validation` or `Unauthorized` in that order
/// of precedence, or `Database` if the update fails.
#[instrument(skip_all, fields(store_id = %store_id, billboard_id = %billboard_id))]
pub async fn update_billboard(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path((store_id, billboard_id)): Path<(StoreId, BillboardId)>,
    Payload(payload): Payload<BillboardPayload>,
) -> Result<Json<BatchResult>, AppError> {
    let input = BillboardInput::try_from(payload)?;
    authorize_store(state.catalog(), store_id, &owner).await?;

    let result = state
        .catalog()
        .update_billboard(store_id, billboard_id, &input)
        .await?;
    tracing::info!(count = result.count, "Billboard updated");

    Ok(Json(result))
}

/// Delete a billboard. Fails while a category still uses it.
///
/// # Errors
///
/// Returns `Unauthenticated` or `Unauthorized`, or `Database` if the
/// billboard is still referenced.
#[instrument(skip_all, fields(store_id = %store_id, billboard_id = %billboard_id))]
pub async fn delete_billboard(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path((store_id, billboard_id)): Path<(StoreId, BillboardId)>,
) -> Result<Json<BatchResult>, AppError> {
    authorize_store(state.catalog(), store_id, &owner).await?;

    let result = state
        .catalog()
        .delete_billboard(store_id, billboard_id)
        .await?;
    tracing::info!(count = result.count, "Billboard deleted");

    Ok(Json(result))
}
