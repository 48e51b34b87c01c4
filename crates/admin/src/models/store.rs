//! Store domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shop_pilot_core::{OwnerId, RequiredText, StoreId};

use super::validation::{FieldError, required_text};

/// A tenant store. Every other resource belongs to exactly one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    /// Identity-provider user id of the owner. Gates every mutation.
    #[serde(rename = "userId")]
    pub owner_id: OwnerId,
    pub name: RequiredText,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// Whether `owner` owns this store.
    #[must_use]
    pub fn is_owned_by(&self, owner: &OwnerId) -> bool {
        &self.owner_id == owner
    }
}

/// Body of `POST /api/stores` and `PATCH /api/stores/{storeId}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePayload {
    pub name: Option<String>,
}

/// Validated store fields.
#[derive(Debug, Clone)]
pub struct StoreInput {
    pub name: RequiredText,
}

impl TryFrom<StorePayload> for StoreInput {
    type Error = FieldError;

    fn try_from(payload: StorePayload) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required_text(payload.name, "Name")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_store_input_requires_name() {
        let err = StoreInput::try_from(StorePayload::default()).unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
    }
}
