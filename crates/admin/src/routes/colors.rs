//! Color endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use shop_pilot_core::{ColorId, StoreId};

use super::Payload;
use crate::error::AppError;
use crate::middleware::RequireIdentity;
use crate::models::{BatchResult, Color, ColorInput, ColorPayload};
use crate::services::authorize_store;
use crate::state::AppState;

/// Build the colors router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/{store_id}/colors", get(list_colors).post(create_color))
        .route(
            "/api/{store_id}/colors/{color_id}",
            get(get_color).patch(update_color).delete(delete_color),
        )
}

#[instrument(skip_all, fields(store_id = %store_id))]
async fn list_colors(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Color>>, AppError> {
    Ok(Json(state.catalog().list_colors(store_id).await?))
}

#[instrument(skip_all, fields(color_id = %color_id))]
async fn get_color(
    State(state): State<AppState>,
    Path((_store_id, color_id)): Path<(StoreId, ColorId)>,
) -> Result<Json<Option<Color>>, AppError> {
    Ok(Json(state.catalog().get_color(color_id).await?))
}

#[instrument(skip_all, fields(store_id = %store_id))]
async fn create_color(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    Payload(payload): Payload<ColorPayload>,
) -> Result<Json<Color>, AppError> {
    let input = ColorInput::try_from(payload)?;
    authorize_store(state.catalog(), store_id, &owner).await?;

    let color = state.catalog().create_color(store_id, &input).await?;
    tracing::info!(color_id = %color.id, "Color created");

    Ok(Json(color))
}

#[instrument(skip_all, fields(store_id = %store_id, color_id = %color_id))]
async fn update_color(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path((store_id, color_id)): Path<(StoreId, ColorId)>,
    Payload(payload): Payload<ColorPayload>,
) -> Result<Json<BatchResult>, AppError> {
    let input = ColorInput::try_from(payload)?;
    authorize_store(state.catalog(), store_id, &owner).await?;

    let result = state
        .catalog()
        .update_color(store_id, color_id, &input)
        .await?;
    tracing::info!(count = result.count, "Color updated");

    Ok(Json(result))
}

#[instrument(skip_all, fields(store_id = %store_id, color_id = %color_id))]
async fn delete_color(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path((store_id, color_id)): Path<(StoreId, ColorId)>,
) -> Result<Json<BatchResult>, AppError> {
    authorize_store(state.catalog(), store_id, &owner).await?;

    let result = state.catalog().delete_color(store_id, color_id).await?;
    tracing::info!(count = result.count, "Color deleted");

    Ok(Json(result))
}
