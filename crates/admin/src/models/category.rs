//! Category domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shop_pilot_core::{BillboardId, CategoryId, RequiredText, StoreId};

use super::billboard::Billboard;
use super::validation::{FieldError, required_id, required_text};

/// A product grouping, displayed under one billboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub store_id: StoreId,
    pub billboard_id: BillboardId,
    pub name: RequiredText,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category with its billboard expanded, as returned by reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub billboard: Billboard,
}

/// Body of category create/update requests.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: Option<String>,
    pub billboard_id: Option<String>,
}

/// Validated category fields.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub name: RequiredText,
    pub billboard_id: BillboardId,
}

impl TryFrom<CategoryPayload> for CategoryInput {
    type Error = FieldError;

    fn try_from(payload: CategoryPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required_text(payload.name, "Name")?,
            billboard_id: required_id(payload.billboard_id, "Billboard id")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_name_checked_before_billboard() {
        let err = CategoryInput::try_from(CategoryPayload::default()).unwrap_err();
        assert_eq!(err.to_string(), "Name is required");

        let err = CategoryInput::try_from(CategoryPayload {
            name: Some("Shoes".into()),
            billboard_id: None,
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Billboard id is required");
    }

    #[test]
    fn test_malformed_billboard_id() {
        let err = CategoryInput::try_from(CategoryPayload {
            name: Some("Shoes".into()),
            billboard_id: Some("42".into()),
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Billboard id is invalid");
    }
}
