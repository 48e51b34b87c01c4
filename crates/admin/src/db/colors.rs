//! Color repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use shop_pilot_core::{ColorId, StoreId};

use super::{PgCatalog, RepositoryError, batch, text_column};
use crate::models::{BatchResult, Color, ColorInput};

/// Color persistence operations.
#[async_trait]
pub trait ColorRepository: Send + Sync {
    /// All colors of a store, newest first.
    async fn list_colors(&self, store_id: StoreId) -> Result<Vec<Color>, RepositoryError>;

    /// A color by id.
    async fn get_color(&self, id: ColorId) -> Result<Option<Color>, RepositoryError>;

    /// Create a color in a store.
    async fn create_color(
        &self,
        store_id: StoreId,
        input: &ColorInput,
    ) -> Result<Color, RepositoryError>;

    /// Overwrite a color that lives in `store_id`.
    async fn update_color(
        &self,
        store_id: StoreId,
        id: ColorId,
        input: &ColorInput,
    ) -> Result<BatchResult, RepositoryError>;

    /// Delete a color that lives in `store_id`. Fails while a product uses it.
    async fn delete_color(
        &self,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<BatchResult, RepositoryError>;
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct ColorRow {
    pub(super) id: Uuid,
    pub(super) store_id: Uuid,
    pub(super) name: String,
    pub(super) value: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl TryFrom<ColorRow> for Color {
    type Error = RepositoryError;

    fn try_from(row: ColorRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ColorId::new(row.id),
            store_id: StoreId::new(row.store_id),
            name: text_column("color name", row.name)?,
            value: text_column("color value", row.value)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const COLOR_COLUMNS: &str = "id, store_id, name, value, created_at, updated_at";

#[async_trait]
impl ColorRepository for PgCatalog {
    async fn list_colors(&self, store_id: StoreId) -> Result<Vec<Color>, RepositoryError> {
        let rows = sqlx::query_as::<_, ColorRow>(&format!(
            "SELECT {COLOR_COLUMNS} FROM catalog.color \
             WHERE store_id = $1 ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn get_color(&self, id: ColorId) -> Result<Option<Color>, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(&format!(
            "SELECT {COLOR_COLUMNS} FROM catalog.color WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn create_color(
        &self,
        store_id: StoreId,
        input: &ColorInput,
    ) -> Result<Color, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(&format!(
            "INSERT INTO catalog.color (id, store_id, name, value) \
             VALUES ($1, $2, $3, $4) RETURNING {COLOR_COLUMNS}"
        ))
        .bind(ColorId::generate())
        .bind(store_id)
        .bind(&input.name)
        .bind(&input.value)
        .fetch_one(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        row.try_into()
    }

    async fn update_color(
        &self,
        store_id: StoreId,
        id: ColorId,
        input: &ColorInput,
    ) -> Result<BatchResult, RepositoryError> {
        let result = sqlx::query(
            "UPDATE catalog.color SET name = $3, value = $4, updated_at = NOW() \
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

    async fn delete_color(
        &self,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<BatchResult, RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog.color WHERE id = $1 AND store_id = $2")
            .bind(id)
            .bind(store_id)
            .execute(self.pool())
            .await
            .map_err(RepositoryError::from_write)?;

        Ok(batch(result.rows_affected()))
    }
}
