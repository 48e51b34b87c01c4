//! Category repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use shop_pilot_core::{BillboardId, CategoryId, StoreId};

use super::billboards::BillboardRow;
use super::{PgCatalog, RepositoryError, batch, text_column};
use crate::models::{BatchResult, Category, CategoryDetail, CategoryInput};

/// Category persistence operations.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories of a store with their billboards, newest first.
    async fn list_categories(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<CategoryDetail>, RepositoryError>;

    /// A category by id, with its billboard.
    async fn get_category(&self, id: CategoryId)
    -> Result<Option<CategoryDetail>, RepositoryError>;

    /// Create a category. Fails if the billboard does not exist.
    async fn create_category(
        &self,
        store_id: StoreId,
        input: &CategoryInput,
    ) -> Result<Category, RepositoryError>;

    /// Overwrite a category that lives in `store_id`.
    async fn update_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<BatchResult, RepositoryError>;

    /// Delete a category that lives in `store_id`.
    ///
    /// Fails with [`RepositoryError::ForeignKey`] while a product uses it.
    async fn delete_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<BatchResult, RepositoryError>;
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct CategoryRow {
    pub(super) id: Uuid,
    pub(super) store_id: Uuid,
    pub(super) billboard_id: Uuid,
    pub(super) name: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = RepositoryError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CategoryId::new(row.id),
            store_id: StoreId::new(row.store_id),
            billboard_id: BillboardId::new(row.billboard_id),
            name: text_column("category name", row.name)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A category joined with its billboard.
#[derive(Debug, sqlx::FromRow)]
struct CategoryDetailRow {
    #[sqlx(flatten)]
    category: CategoryRow,
    b_id: Uuid,
    b_store_id: Uuid,
    b_label: String,
    b_image_url: String,
    b_created_at: DateTime<Utc>,
    b_updated_at: DateTime<Utc>,
}

impl TryFrom<CategoryDetailRow> for CategoryDetail {
    type Error = RepositoryError;

    fn try_from(row: CategoryDetailRow) -> Result<Self, Self::Error> {
        let billboard = BillboardRow {
            id: row.b_id,
            store_id: row.b_store_id,
            label: row.b_label,
            image_url: row.b_image_url,
            created_at: row.b_created_at,
            updated_at: row.b_updated_at,
        };

        Ok(Self {
            category: row.category.try_into()?,
            billboard: billboard.try_into()?,
        })
    }
}

const CATEGORY_COLUMNS: &str = "id, store_id, billboard_id, name, created_at, updated_at";

const CATEGORY_DETAIL_SELECT: &str = "\
    SELECT c.id, c.store_id, c.billboard_id, c.name, c.created_at, c.updated_at, \
           b.id AS b_id, b.store_id AS b_store_id, b.label AS b_label, \
           b.image_url AS b_image_url, b.created_at AS b_created_at, \
           b.updated_at AS b_updated_at \
    FROM catalog.category c \
    JOIN catalog.billboard b ON b.id = c.billboard_id";

#[async_trait]
impl CategoryRepository for PgCatalog {
    async fn list_categories(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<CategoryDetail>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryDetailRow>(&format!(
            "{CATEGORY_DETAIL_SELECT} WHERE c.store_id = $1 ORDER BY c.created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn get_category(
        &self,
        id: CategoryId,
    ) -> Result<Option<CategoryDetail>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryDetailRow>(&format!(
            "{CATEGORY_DETAIL_SELECT} WHERE c.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn create_category(
        &self,
        store_id: StoreId,
        input: &CategoryInput,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "INSERT INTO catalog.category (id, store_id, billboard_id, name) \
             VALUES ($1, $2, $3, $4) RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(CategoryId::generate())
        .bind(store_id)
        .bind(input.billboard_id)
        .bind(&input.name)
        .fetch_one(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        row.try_into()
    }

    async fn update_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<BatchResult, RepositoryError> {
        let result = sqlx::query(
            "UPDATE catalog.category SET name = $3, billboard_id = $4, updated_at = NOW() \
             WHERE id = $1 AND store_id = $2",
        )
        .bind(id)
        .bind(store_id)
        .bind(&input.name)
        .bind(input.billboard_id)
        .execute(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(batch(result.rows_affected()))
    }

    async fn delete_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<BatchResult, RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog.category WHERE id = $1 AND store_id = $2")
            .bind(id)
            .bind(store_id)
            .execute(self.pool())
            .await
            .map_err(RepositoryError::from_write)?;

        Ok(batch(result.rows_affected()))
    }
}
