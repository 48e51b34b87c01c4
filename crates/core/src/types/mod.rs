//! Core types for Shop Pilot.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod owner;
pub mod price;
pub mod text;

pub use id::*;
pub use owner::{OwnerId, OwnerIdError};
pub use price::{Price, PriceError};
pub use text::RequiredText;
