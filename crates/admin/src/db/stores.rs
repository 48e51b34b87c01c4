//! Store repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use shop_pilot_core::{OwnerId, StoreId};

use super::{PgCatalog, RepositoryError, batch, text_column};
use crate::models::{BatchResult, Store, StoreInput};

/// Store persistence operations.
///
/// Update and delete are scoped to `(id, owner)`; a caller that does not
/// own the store touches nothing.
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Create a store owned by `owner`.
    async fn create_store(
        &self,
        owner: &OwnerId,
        input: &StoreInput,
    ) -> Result<Store, RepositoryError>;

    /// All stores owned by `owner`, oldest first.
    async fn list_stores_by_owner(&self, owner: &OwnerId) -> Result<Vec<Store>, RepositoryError>;

    /// A store by id, regardless of owner.
    async fn get_store(&self, id: StoreId) -> Result<Option<Store>, RepositoryError>;

    /// A store by id, only if owned by `owner`.
    async fn find_owned_store(
        &self,
        id: StoreId,
        owner: &OwnerId,
    ) -> Result<Option<Store>, RepositoryError>;

    /// Rename a store.
    async fn update_store(
        &self,
        id: StoreId,
        owner: &OwnerId,
        input: &StoreInput,
    ) -> Result<BatchResult, RepositoryError>;

    /// Delete a store. Fails while any child row still references it.
    async fn delete_store(&self, id: StoreId, owner: &OwnerId)
    -> Result<BatchResult, RepositoryError>;
}

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: Uuid,
    user_id: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StoreRow> for Store {
    type Error = RepositoryError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        let owner_id = OwnerId::parse(&row.user_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid store owner in database: {e}"))
        })?;

        Ok(Self {
            id: StoreId::new(row.id),
            owner_id,
            name: text_column("store name", row.name)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const STORE_COLUMNS: &str = "id, user_id, name, created_at, updated_at";

// =============================================================================
// PostgreSQL
// =============================================================================

#[async_trait]
impl StoreRepository for PgCatalog {
    async fn create_store(
        &self,
        owner: &OwnerId,
        input: &StoreInput,
    ) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(&format!(
            "INSERT INTO catalog.store (id, user_id, name) VALUES ($1, $2, $3) \
             RETURNING {STORE_COLUMNS}"
        ))
        .bind(StoreId::generate())
        .bind(owner)
        .bind(&input.name)
        .fetch_one(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        row.try_into()
    }

    async fn list_stores_by_owner(&self, owner: &OwnerId) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(&format!(
            "SELECT {STORE_COLUMNS} FROM catalog.store WHERE user_id = $1 ORDER BY created_at ASC"
        ))
        .bind(owner)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn get_store(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(&format!(
            "SELECT {STORE_COLUMNS} FROM catalog.store WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_owned_store(
        &self,
        id: StoreId,
        owner: &OwnerId,
    ) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(&format!(
            "SELECT {STORE_COLUMNS} FROM catalog.store WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(self.pool())
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update_store(
        &self,
        id: StoreId,
        owner: &OwnerId,
        input: &StoreInput,
    ) -> Result<BatchResult, RepositoryError> {
        let result = sqlx::query(
            "UPDATE catalog.store SET name = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner)
        .bind(&input.name)
        .execute(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(batch(result.rows_affected()))
    }

    async fn delete_store(
        &self,
        id: StoreId,
        owner: &OwnerId,
    ) -> Result<BatchResult, RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog.store WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(self.pool())
            .await
            .map_err(RepositoryError::from_write)?;

        Ok(batch(result.rows_affected()))
    }
}
