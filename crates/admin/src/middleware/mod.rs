//! HTTP middleware and extractors for the admin API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, bind a hub per request)
//! 2. `TraceLayer` (request tracing with status and latency)
//! 3. CORS (only when `ADMIN_CORS_ORIGINS` is set)
//!
//! Authentication is per handler via the [`RequireIdentity`] extractor, so
//! public reads need no guard.

pub mod auth;

pub use auth::RequireIdentity;
