//! Identity verification error types.

use thiserror::Error;

/// Errors that can occur while resolving the caller's identity.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No `Authorization` header on the request.
    #[error("missing Authorization header")]
    MissingToken,

    /// Header present but not a usable `Bearer` token.
    #[error("authorization header must use Bearer token format")]
    MalformedHeader,

    /// Token signature, expiry, or issuer check failed.
    #[error("invalid identity token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// Token verified but its subject is not a usable user id.
    #[error("invalid token subject: {0}")]
    InvalidSubject(#[from] shop_pilot_core::OwnerIdError),

    /// Verification key could not be loaded from configuration.
    #[error("invalid verification key: {0}")]
    InvalidKey(String),
}
