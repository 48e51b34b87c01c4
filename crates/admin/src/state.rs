//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::Catalog;
use crate::services::IdentityVerifier;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Arc<dyn Catalog>,
    identity: IdentityVerifier,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Persistence backend
    /// * `identity` - Verifier for caller identity tokens
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>, identity: IdentityVerifier) -> Self {
        Self {
            inner: Arc::new(AppStateInner { catalog, identity }),
        }
    }

    /// Get the catalog backend.
    #[must_use]
    pub fn catalog(&self) -> &dyn Catalog {
        self.inner.catalog.as_ref()
    }

    /// Get the identity verifier.
    #[must_use]
    pub fn identity(&self) -> &IdentityVerifier {
        &self.inner.identity
    }
}
