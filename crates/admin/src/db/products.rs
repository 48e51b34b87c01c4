//! Product repository.
//!
//! Products own their images. Reads always return [`ProductDetail`] with
//! the images, category, color and size attached.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use shop_pilot_core::{CategoryId, ColorId, ImageId, ProductId, SizeId, StoreId};

use super::categories::CategoryRow;
use super::colors::ColorRow;
use super::sizes::SizeRow;
use super::{PgCatalog, RepositoryError, batch, price_column, text_column};
use crate::models::{
    BatchResult, Category, Color, Image, Product, ProductDetail, ProductInput, Size,
};

/// Product persistence operations.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products of a store with their relations, newest first.
    async fn list_products(&self, store_id: StoreId)
    -> Result<Vec<ProductDetail>, RepositoryError>;

    /// A product by id, with its relations.
    async fn get_product(&self, id: ProductId) -> Result<Option<ProductDetail>, RepositoryError>;

    /// Create a product and its images.
    ///
    /// Fails if the category, color or size does not exist.
    async fn create_product(
        &self,
        store_id: StoreId,
        input: &ProductInput,
    ) -> Result<ProductDetail, RepositoryError>;

    /// Overwrite a product that lives in `store_id` and replace its images.
    ///
    /// Atomic: either the fields and the full image list are replaced, or
    /// nothing changes. Returns `None` if no such product is in the store.
    async fn update_product(
        &self,
        store_id: StoreId,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Option<ProductDetail>, RepositoryError>;

    /// Delete a product (and its images) that lives in `store_id`.
    async fn delete_product(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<BatchResult, RepositoryError>;
}

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    store_id: Uuid,
    category_id: Uuid,
    color_id: Uuid,
    size_id: Uuid,
    name: String,
    price: Decimal,
    is_featured: bool,
    is_archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(row.id),
            store_id: StoreId::new(row.store_id),
            category_id: CategoryId::new(row.category_id),
            color_id: ColorId::new(row.color_id),
            size_id: SizeId::new(row.size_id),
            name: text_column("product name", row.name)?,
            price: price_column(row.price)?,
            is_featured: row.is_featured,
            is_archived: row.is_archived,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ImageRow {
    id: Uuid,
    product_id: Uuid,
    url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ImageRow> for Image {
    type Error = RepositoryError;

    fn try_from(row: ImageRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ImageId::new(row.id),
            product_id: ProductId::new(row.product_id),
            url: text_column("image url", row.url)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PRODUCT_COLUMNS: &str = "id, store_id, category_id, color_id, size_id, name, price, \
                               is_featured, is_archived, created_at, updated_at";

// =============================================================================
// Relation loading
// =============================================================================

/// Attach images, category, color and size to product rows, keeping order.
async fn hydrate(
    conn: &mut PgConnection,
    rows: Vec<ProductRow>,
) -> Result<Vec<ProductDetail>, RepositoryError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let category_ids: Vec<Uuid> = rows.iter().map(|r| r.category_id).collect();
    let color_ids: Vec<Uuid> = rows.iter().map(|r| r.color_id).collect();
    let size_ids: Vec<Uuid> = rows.iter().map(|r| r.size_id).collect();

    let image_rows = sqlx::query_as::<_, ImageRow>(
        "SELECT id, product_id, url, created_at, updated_at FROM catalog.image \
         WHERE product_id = ANY($1) ORDER BY created_at ASC, id ASC",
    )
    .bind(&product_ids)
    .fetch_all(&mut *conn)
    .await?;

    let mut images: HashMap<Uuid, Vec<Image>> = HashMap::new();
    for row in image_rows {
        let product_id = row.product_id;
        images.entry(product_id).or_default().push(row.try_into()?);
    }

    let categories: HashMap<Uuid, Category> = sqlx::query_as::<_, CategoryRow>(
        "SELECT id, store_id, billboard_id, name, created_at, updated_at \
         FROM catalog.category WHERE id = ANY($1)",
    )
    .bind(&category_ids)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(|row| {
        let id = row.id;
        Category::try_from(row).map(|value| (id, value))
    })
    .collect::<Result<_, _>>()?;

    let colors: HashMap<Uuid, Color> = sqlx::query_as::<_, ColorRow>(
        "SELECT id, store_id, name, value, created_at, updated_at \
         FROM catalog.color WHERE id = ANY($1)",
    )
    .bind(&color_ids)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(|row| {
        let id = row.id;
        Color::try_from(row).map(|value| (id, value))
    })
    .collect::<Result<_, _>>()?;

    let sizes: HashMap<Uuid, Size> = sqlx::query_as::<_, SizeRow>(
        "SELECT id, store_id, name, value, created_at, updated_at \
         FROM catalog.size WHERE id = ANY($1)",
    )
    .bind(&size_ids)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(|row| {
        let id = row.id;
        Size::try_from(row).map(|value| (id, value))
    })
    .collect::<Result<_, _>>()?;

    rows.into_iter()
        .map(|row| {
            let product_id = row.id;
            let missing = |what: &str| {
                RepositoryError::DataCorruption(format!("product {product_id} has no {what}"))
            };

            let category = categories
                .get(&row.category_id)
                .cloned()
                .ok_or_else(|| missing("category"))?;
            let color = colors
                .get(&row.color_id)
                .cloned()
                .ok_or_else(|| missing("color"))?;
            let size = sizes
                .get(&row.size_id)
                .cloned()
                .ok_or_else(|| missing("size"))?;
            let product_images = images.remove(&row.id).unwrap_or_default();

            Ok(ProductDetail {
                product: row.try_into()?,
                images: product_images,
                category,
                color,
                size,
            })
        })
        .collect()
}

async fn insert_images(
    conn: &mut PgConnection,
    product_id: Uuid,
    input: &ProductInput,
) -> Result<(), RepositoryError> {
    for url in &input.image_urls {
        sqlx::query("INSERT INTO catalog.image (id, product_id, url) VALUES ($1, $2, $3)")
            .bind(ImageId::generate())
            .bind(product_id)
            .bind(url)
            .execute(&mut *conn)
            .await
            .map_err(RepositoryError::from_write)?;
    }
    Ok(())
}

// =============================================================================
// PostgreSQL
// =============================================================================

#[async_trait]
impl ProductRepository for PgCatalog {
    async fn list_products(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<ProductDetail>, RepositoryError> {
        let mut conn = self.pool().acquire().await?;

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM catalog.product \
             WHERE store_id = $1 ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(&mut *conn)
        .await?;

        hydrate(&mut conn, rows).await
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<ProductDetail>, RepositoryError> {
        let mut conn = self.pool().acquire().await?;

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM catalog.product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .into_iter()
        .collect();

        Ok(hydrate(&mut conn, rows).await?.into_iter().next())
    }

    async fn create_product(
        &self,
        store_id: StoreId,
        input: &ProductInput,
    ) -> Result<ProductDetail, RepositoryError> {
        let mut tx = self.pool().begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO catalog.product \
             (id, store_id, category_id, color_id, size_id, name, price, is_featured, is_archived) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(ProductId::generate())
        .bind(store_id)
        .bind(input.category_id)
        .bind(input.color_id)
        .bind(input.size_id)
        .bind(&input.name)
        .bind(input.price)
        .bind(input.is_featured)
        .bind(input.is_archived)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepositoryError::from_write)?;

        insert_images(&mut tx, row.id, input).await?;

        let detail = hydrate(&mut tx, vec![row])
            .await?
            .into_iter()
            .next()
            .ok_or(RepositoryError::NotFound)?;

        tx.commit().await?;

        Ok(detail)
    }

    async fn update_product(
        &self,
        store_id: StoreId,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Option<ProductDetail>, RepositoryError> {
        let mut tx = self.pool().begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE catalog.product SET \
             category_id = $3, color_id = $4, size_id = $5, name = $6, price = $7, \
             is_featured = $8, is_archived = $9, updated_at = NOW() \
             WHERE id = $1 AND store_id = $2 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(store_id)
        .bind(input.category_id)
        .bind(input.color_id)
        .bind(input.size_id)
        .bind(&input.name)
        .bind(input.price)
        .bind(input.is_featured)
        .bind(input.is_archived)
        .fetch_optional(&mut *tx)
        .await
        .map_err(RepositoryError::from_write)?;

        // Dropping the transaction rolls it back.
        let Some(row) = row else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM catalog.image WHERE product_id = $1")
            .bind(row.id)
            .execute(&mut *tx)
            .await?;

        insert_images(&mut tx, row.id, input).await?;

        let detail = hydrate(&mut tx, vec![row]).await?.into_iter().next();

        tx.commit().await?;

        Ok(detail)
    }

    async fn delete_product(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<BatchResult, RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog.product WHERE id = $1 AND store_id = $2")
            .bind(id)
            .bind(store_id)
            .execute(self.pool())
            .await
            .map_err(RepositoryError::from_write)?;

        Ok(batch(result.rows_affected()))
    }
}
