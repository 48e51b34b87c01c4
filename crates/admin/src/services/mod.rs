//! Business logic services for the admin API.
//!
//! # Services
//!
//! - `auth` - Identity token verification
//! - `ownership` - Store ownership checks gating every mutation

pub mod auth;
pub mod ownership;

pub use auth::{IdentityError, IdentityVerifier};
pub use ownership::authorize_store;
