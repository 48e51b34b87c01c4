//! Size repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use shop_pilot_core::{SizeId, StoreId};

use super::{PgCatalog, RepositoryError, batch, text_column};
use crate::models::{BatchResult, Size, SizeInput};

/// Size persistence operations.
#[async_trait]
pub trait SizeRepository: Send + Sync {
    /// All sizes of a store, newest first.
    async fn list_sizes(&self, store_id: StoreId) -> Result<Vec<Size>, RepositoryError>;

    /// A size by id.
    async fn get_size(&self, id: SizeId) -> Result<Option<Size>, RepositoryError>;

    /// Create a size in a store.
    async fn create_size(&self, store_id: StoreId, input: &SizeInput)
    -> Result<Size, RepositoryError>;

    /// Overwrite a size that lives in `store_id`.
    async fn update_size(
        &self,
        store_id: StoreId,
        id: SizeId,
        input: &SizeInput,
    ) -> Result<BatchResult, RepositoryError>;

    /// Delete a size that lives in `store_id`. Fails while a product uses it.
    async fn delete_size(&self, store_id: StoreId, id: SizeId)
    -> Result<BatchResult, RepositoryError>;
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct SizeRow {
    pub(super) id: Uuid,
    pub(super) store_id: Uuid,
    pub(super) name: String,
    pub(super) value: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl TryFrom<SizeRow> for Size {
    type Error = RepositoryError;

    fn try_from(row: SizeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SizeId::new(row.id),
            store_id: StoreId::new(row.store_id),
            name: text_column("size name", row.name)?,
            value: text_column("size value", row.value)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SIZE_COLUMNS: &str = "id, store_id, name, value, created_at, updated_at";

#[async_trait]
impl SizeRepository for PgCatalog {
    async fn list_sizes(&self, store_id: StoreId) -> Result<Vec<Size>, RepositoryError> {
        let rows = sqlx::query_as::<_, SizeRow>(&format!(
            "SELECT {SIZE_COLUMNS} FROM catalog.size WHERE store_id = $1 ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn get_size(&self, id: SizeId) -> Result<Option<Size>, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(&format!(
            "SELECT {SIZE_COLUMNS} FROM catalog.size WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn create_size(
        &self,
        store_id: StoreId,
        input: &SizeInput,
    ) -> Result<Size, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(&format!(
            "INSERT INTO catalog.size (id, store_id, name, value) \
             VALUES ($1, $2, $3, $4) RETURNING {SIZE_COLUMNS}"
        ))
        .bind(SizeId::generate())
        .bind(store_id)
        .bind(&input.name)
        .bind(&input.value)
        .fetch_one(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        row.try_into()
    }

    async fn update_size(
        &self,
        store_id: StoreId,
        id: SizeId,
        input: &SizeInput,
    ) -> Result<BatchResult, RepositoryError> {
        let result = sqlx::query(
            "UPDATE catalog.size SET name = $3, value = $4, updated_at = NOW() \
             WHERE id = $1 AND store_id = $2",
        )
        .bind(id)
        .bind(store_id)
        .bind(&input.name)
        .bind(&input.value)
        .execute(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(batch(result.rows_affected()))
    }

    async fn delete_size(
        &self,
        store_id: StoreId,
        id: SizeId,
    ) -> Result<BatchResult, RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog.size WHERE id = $1 AND store_id = $2")
            .bind(id)
            .bind(store_id)
            .execute(self.pool())
            .await
            .map_err(RepositoryError::from_write)?;

        Ok(batch(result.rows_affected()))
    }
}
