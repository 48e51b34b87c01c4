//! Domain models for the admin API.
//!
//! Each resource has three shapes:
//!
//! - the record (`Billboard`), serialized to clients in camelCase;
//! - the payload (`BillboardPayload`), deserialized from request bodies with
//!   every field optional;
//! - the input (`BillboardInput`), produced by `TryFrom<Payload>` once every
//!   required field has been checked. Handlers and repositories only accept
//!   inputs.

pub mod billboard;
pub mod category;
pub mod color;
pub mod product;
pub mod size;
pub mod store;
pub mod validation;

use serde::{Deserialize, Serialize};

pub use billboard::{Billboard, BillboardInput, BillboardPayload};
pub use category::{Category, CategoryDetail, CategoryInput, CategoryPayload};
pub use color::{Color, ColorInput, ColorPayload};
pub use product::{Image, ImagePayload, Product, ProductDetail, ProductInput, ProductPayload};
pub use size::{Size, SizeInput, SizePayload};
pub use store::{Store, StoreInput, StorePayload};
pub use validation::{FieldError, FieldProblem};

/// Number of rows touched by an update or delete, returned as `{"count": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub count: u64,
}

impl BatchResult {
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self { count }
    }
}
