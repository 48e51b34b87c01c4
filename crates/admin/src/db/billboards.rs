//! Billboard repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use shop_pilot_core::{BillboardId, StoreId};

use super::{PgCatalog, RepositoryError, batch, text_column};
use crate::models::{BatchResult, Billboard, BillboardInput};

/// Billboard persistence operations.
#[async_trait]
pub trait BillboardRepository: Send + Sync {
    /// All billboards of a store, newest first.
    async fn list_billboards(&self, store_id: StoreId) -> Result<Vec<Billboard>, RepositoryError>;

    /// A billboard by id.
    async fn get_billboard(&self, id: BillboardId) -> Result<Option<Billboard>, RepositoryError>;

    /// Create a billboard in a store.
    async fn create_billboard(
        &self,
        store_id: StoreId,
        input: &BillboardInput,
    ) -> Result<Billboard, RepositoryError>;

    /// Overwrite a billboard that lives in `store_id`.
    async fn update_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
        input: &BillboardInput,
    ) -> Result<BatchResult, RepositoryError>;

    /// Delete a billboard that lives in `store_id`.
    ///
    /// Fails with [`RepositoryError::ForeignKey`] while a category uses it.
    async fn delete_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<BatchResult, RepositoryError>;
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct BillboardRow {
    pub(super) id: Uuid,
    pub(super) store_id: Uuid,
    pub(super) label: String,
    pub(super) image_url: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl TryFrom<BillboardRow> for Billboard {
    type Error = RepositoryError;

    fn try_from(row: BillboardRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BillboardId::new(row.id),
            store_id: StoreId::new(row.store_id),
            label: text_column("billboard label", row.label)?,
            image_url: text_column("billboard image url", row.image_url)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const BILLBOARD_COLUMNS: &str = "id, store_id, label, image_url, created_at, updated_at";

#[async_trait]
impl BillboardRepository for PgCatalog {
    async fn list_billboards(&self, store_id: StoreId) -> Result<Vec<Billboard>, RepositoryError> {
        let rows = sqlx::query_as::<_, BillboardRow>(&format!(
            "SELECT {BILLBOARD_COLUMNS} FROM catalog.billboard \
             WHERE store_id = $1 ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn get_billboard(&self, id: BillboardId) -> Result<Option<Billboard>, RepositoryError> {
        let row = sqlx::query_as::<_, BillboardRow>(&format!(
            "SELECT {BILLBOARD_COLUMNS} FROM catalog.billboard WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn create_billboard(
        &self,
        store_id: StoreId,
        input: &BillboardInput,
    ) -> Result<Billboard, RepositoryError> {
        let row = sqlx::query_as::<_, BillboardRow>(&format!(
            "INSERT INTO catalog.billboard (id, store_id, label, image_url) \
             VALUES ($1, $2, $3, $4) RETURNING {BILLBOARD_COLUMNS}"
        ))
        .bind(BillboardId::generate())
        .bind(store_id)
        .bind(&input.label)
        .bind(&input.image_url)
        .fetch_one(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        row.try_into()
    }

    async fn update_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
        input: &BillboardInput,
    ) -> Result<BatchResult, RepositoryError> {
        let result = sqlx::query(
            "UPDATE catalog.billboard SET label = $3, image_url = $4, updated_at = NOW() \
             WHERE id = $1 AND store_id = $2",
        )
        .bind(id)
        .bind(store_id)
        .bind(&input.label)
        .bind(&input.image_url)
        .execute(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(batch(result.rows_affected()))
    }

    async fn delete_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<BatchResult, RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog.billboard WHERE id = $1 AND store_id = $2")
            .bind(id)
            .bind(store_id)
            .execute(self.pool())
            .await
            .map_err(RepositoryError::from_write)?;

        Ok(batch(result.rows_affected()))
    }
}
