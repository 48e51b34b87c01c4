//! Shop Pilot Core - Shared types library.
//!
//! This crate provides common types used across all Shop Pilot components:
//! - `admin` - Multi-tenant store administration API
//! - `cli` - Command-line client and operational tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, owner identities, required text, and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
