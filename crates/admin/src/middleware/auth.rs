//! Authentication extractor.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use shop_pilot_core::OwnerId;

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// Extractor that requires a verified caller identity.
///
/// Rejects with `401 Unauthenticated` when the bearer token is missing or
/// fails verification.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireIdentity(owner): RequireIdentity,
/// ) -> impl IntoResponse {
///     format!("Hello, {owner}!")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireIdentity(pub OwnerId);

impl<S> FromRequestParts<S> for RequireIdentity
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let owner = state.identity().identify(&parts.headers).map_err(|e| {
            tracing::debug!(error = %e, "Rejected caller identity");
            AppError::Unauthenticated("Unauthenticated".to_string())
        })?;

        set_sentry_user(&owner);
        Ok(Self(owner))
    }
}
