//! Catalog persistence for the admin API.
//!
//! # Schema: `catalog`
//!
//! ## Tables
//!
//! - `store` - Tenants, keyed by owner identity
//! - `billboard` - Promotional banners
//! - `category` - Product groupings (references `billboard`)
//! - `color` / `size` - Product attributes
//! - `product` - Sellable items (references `category`, `color`, `size`)
//! - `image` - Product images (deleted with their product)
//!
//! Every child table references `store`. All foreign keys are `RESTRICT`
//! except `image.product_id`, which cascades. Deleting a row that is still
//! referenced fails with [`RepositoryError::ForeignKey`].
//!
//! # Backends
//!
//! - [`PgCatalog`] - `PostgreSQL` via sqlx (production)
//! - [`MemoryCatalog`] - in-process, same referential rules (tests, demos)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p sp-cli -- migrate
//! ```

pub mod billboards;
pub mod categories;
pub mod colors;
pub mod memory;
pub mod products;
pub mod sizes;
pub mod stores;

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use shop_pilot_core::{Price, RequiredText};

pub use billboards::BillboardRepository;
pub use categories::CategoryRepository;
pub use colors::ColorRepository;
pub use memory::MemoryCatalog;
pub use products::ProductRepository;
pub use sizes::SizeRepository;
pub use stores::StoreRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique key).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A referenced row is missing, or a row is still referenced.
    #[error("foreign key violation: {0}")]
    ForeignKey(String),
}

impl RepositoryError {
    /// Classify a sqlx error from a write, surfacing foreign-key violations.
    pub(crate) fn from_write(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_foreign_key_violation() {
                let constraint = db_err.constraint().unwrap_or("unknown").to_owned();
                return Self::ForeignKey(constraint);
            }
            if db_err.is_unique_violation() {
                return Self::Conflict(db_err.message().to_owned());
            }
        }
        Self::Database(e)
    }
}

/// The full set of catalog operations the API needs.
///
/// Handlers hold an `Arc<dyn Catalog>`, so the backend is chosen once at
/// startup.
#[async_trait]
pub trait Catalog:
    StoreRepository
    + BillboardRepository
    + CategoryRepository
    + ColorRepository
    + SizeRepository
    + ProductRepository
    + Send
    + Sync
{
    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// `PostgreSQL`-backed catalog.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    /// Create a new catalog over a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Rehydrate a required text column.
pub(crate) fn text_column(
    column: &'static str,
    value: String,
) -> Result<RequiredText, RepositoryError> {
    RequiredText::from_string(value)
        .ok_or_else(|| RepositoryError::DataCorruption(format!("blank {column} in database")))
}

/// Rehydrate a price column.
pub(crate) fn price_column(value: Decimal) -> Result<Price, RepositoryError> {
    Price::new(value)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid price in database: {e}")))
}

/// Convert an affected-row count into a batch summary.
pub(crate) const fn batch(rows_affected: u64) -> crate::models::BatchResult {
    crate::models::BatchResult::new(rows_affected)
}
