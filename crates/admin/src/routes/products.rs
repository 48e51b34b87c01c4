//! Product endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use shop_pilot_core::{ProductId, StoreId};

use super::Payload;
use crate::error::AppError;
use crate::middleware::RequireIdentity;
use crate::models::{BatchResult, ProductDetail, ProductInput, ProductPayload};
use crate::services::authorize_store;
use crate::state::AppState;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/{store_id}/products",
            get(list_products).post(create_product),
        )
        .route(
            "/api/{store_id}/products/{product_id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

/// List a store's products with images, category, color and size.
///
/// # Errors
///
/// Returns `Database` if the query fails.
#[instrument(skip_all, fields(store_id = %store_id))]
pub async fn list_products(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<ProductDetail>>, AppError> {
    Ok(Json(state.catalog().list_products(store_id).await?))
}

/// Get a product with its relations, or `null`.
///
/// # Errors
///
/// Returns `Database` if the query fails.
#[instrument(skip_all, fields(product_id = %product_id))]
pub async fn get_product(
    State(state): State<AppState>,
    Path((_store_id, product_id)): Path<(StoreId, ProductId)>,
) -> Result<Json<Option<ProductDetail>>, AppError> {
    Ok(Json(state.catalog().get_product(product_id).await?))
}

/// Create a product with its images.
///
/// # Errors
///
/// Returns `Unauthenticated`, `Validation` or `Unauthorized` in that order
/// of precedence, or `Database` if a referenced category, color or size
/// does not exist.
#[instrument(skip_all, fields(store_id = %store_id))]
pub async fn create_product(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    Payload(payload): Payload<ProductPayload>,
) -> Result<Json<ProductDetail>, AppError> {
    let input = ProductInput::try_from(payload)?;
    authorize_store(state.catalog(), store_id, &owner).await?;

    let product = state.catalog().create_product(store_id, &input).await?;
    tracing::info!(
        product_id = %product.product.id,
        images = product.images.len(),
        "Product created"
    );

    Ok(Json(product))
}

/// Overwrite a product and replace its image list.
///
/// Responds with the updated product, or `null` if the product is not in
/// this store.
///
/// # Errors
///
/// Returns `Unauthenticated`, `Validation` or `Unauthorized` in that order
/// of precedence, or `Database` if the update fails. A failed update
/// leaves the product and its images untouched.
#[instrument(skip_all, fields(store_id = %store_id, product_id = %product_id))]
pub async fn update_product(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path((store_id, product_id)): Path<(StoreId, ProductId)>,
    Payload(payload): Payload<ProductPayload>,
) -> Result<Json<Option<ProductDetail>>, AppError> {
    let input = ProductInput::try_from(payload)?;
    authorize_store(state.catalog(), store_id, &owner).await?;

    let product = state
        .catalog()
        .update_product(store_id, product_id, &input)
        .await?;
    tracing::info!(found = product.is_some(), "Product updated");

    Ok(Json(product))
}

/// Delete a product and its images.
///
/// # Errors
///
/// Returns `Unauthenticated` or `Unauthorized`, or `Database` if the delete
/// fails.
#[instrument(skip_all, fields(store_id = %store_id, product_id = %product_id))]
pub async fn delete_product(
    RequireIdentity(owner): RequireIdentity,
    State(state): State<AppState>,
    Path((store_id, product_id)): Path<(StoreId, ProductId)>,
) -> Result<Json<BatchResult>, AppError> {
    authorize_store(state.catalog(), store_id, &owner).await?;

    let result = state
        .catalog()
        .delete_product(store_id, product_id)
        .await?;
    tracing::info!(count = result.count, "Product deleted");

    Ok(Json(result))
}
