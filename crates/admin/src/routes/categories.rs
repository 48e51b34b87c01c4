//! Category endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use shop_pilot_core::{CategoryId, StoreId};

use super::Payload;
use crate::error::AppError;
use crate::middleware::RequireIdentity;
use crate::models::{BatchResult, Category, CategoryDetail, CategoryInput, CategoryPayload};
use crate::services::authorize_store;
use crate::state::AppState;

/// Build the categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/{store_id}/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/api/{store_id}/categories/{category_id}",
            get(get_category)
                .patch(update_category)
                .delete(delete_category),
        )
}

/// List a store's categories with their billboards, newest first.
///
/// # Errors
///
/// Returns `Database` if the query fails.
#[instrument(skip_all, fields(store_id = %store_id))]
pub async fn list_categories(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<CategoryDetail>>, AppError> {
    Ok(Json(state.catalog().list_categories(store_id).await?))
}

/// Get a category with its billboard, or `null`.
///
/// # Errors
///
/// Returns `Database` if the query fails.
#[instrument(skip_all, fields(category_id = %category_id))]
pub async fn get_category(
    State(state): State<AppState>,
    Path((_store_id, category_id)): Path<(StoreId, CategoryId)>,
) -> Result<Json<Option<CategoryDetail>>, AppError> {
    Ok(Json(state.catalog().get_category(category_id).await?))
}

/// Create a category.
///
/// # Errors
///
/// Returns `Unauthenticated`, `Validation` or `Unauthorized` in that order
/// of precedence, or `Database` if the billboard does not exist.
#[instrument(skip_all, fields(store_id = %store_id))]
pub async fn create_category(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    Payload(payload): Payload<CategoryPayload>,
) -> Result<Json<Category>, AppError> {
    let input = CategoryInput::try_from(payload)?;
    authorize_store(state.catalog(), store_id, &owner).await?;

    let category = state.catalog().create_category(store_id, &input).await?;
    tracing::info!(category_id = %category.id, "Category created");

    Ok(Json(category))
}

/// Overwrite a category.
///
/// # Errors
///
/// Returns `Unauthenticated`, `Validation` or `Unauthorized` in that order
/// of precedence, or `Database` if the billboard does not exist.
#[instrument(skip_all, fields(store_id = %store_id, category_id = %category_id))]
pub async fn update_category(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path((store_id, category_id)): Path<(StoreId, CategoryId)>,
    Payload(payload): Payload<CategoryPayload>,
) -> Result<Json<BatchResult>, AppError> {
    let input = CategoryInput::try_from(payload)?;
    authorize_store(state.catalog(), store_id, &owner).await?;

    let result = state
        .catalog()
        .update_category(store_id, category_id, &input)
        .await?;
    tracing::info!(count = result.count, "Category updated");

    Ok(Json(result))
}

/// Delete a category. Fails while a product still uses it.
///
/// # Errors
///
/// Returns `Unauthenticated` or `Unauthorized`, or `Database` if the
/// category is still referenced.
#[instrument(skip_all, fields(store_id = %store_id, category_id = %category_id))]
pub async fn delete_category(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path((store_id, category_id)): Path<(StoreId, CategoryId)>,
) -> Result<Json<BatchResult>, AppError> {
    authorize_store(state.catalog(), store_id, &owner).await?;

    let result = state
        .catalog()
        .delete_category(store_id, category_id)
        .await?;
    tracing::info!(count = result.count, "Category deleted");

    Ok(Json(result))
}
