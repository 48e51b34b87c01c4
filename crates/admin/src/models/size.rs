//! Size domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shop_pilot_core::{RequiredText, SizeId, StoreId};

use super::validation::{FieldError, required_text};

/// A product size, e.g. name "Large" with value "L".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub id: SizeId,
    pub store_id: StoreId,
    pub name: RequiredText,
    pub value: RequiredText,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of size create/update requests.
#[derive(Debug, Default, Deserialize)]
pub struct SizePayload {
    pub name: Option<String>,
    pub value: Option<String>,
}

/// Validated size fields.
#[derive(Debug, Clone)]
pub struct SizeInput {
    pub name: RequiredText,
    pub value: RequiredText,
}

impl TryFrom<SizePayload> for SizeInput {
    type Error = FieldError;

    fn try_from(payload: SizePayload) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required_text(payload.name, "Name")?,
            value: required_text(payload.value, "Value")?,
        })
    }
}
