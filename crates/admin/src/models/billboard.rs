//! Billboard domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shop_pilot_core::{BillboardId, RequiredText, StoreId};

use super::validation::{FieldError, required_text};

/// A promotional banner shown at the top of a category page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billboard {
    pub id: BillboardId,
    pub store_id: StoreId,
    pub label: RequiredText,
    pub image_url: RequiredText,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of billboard create/update requests.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillboardPayload {
    pub label: Option<String>,
    pub image_url: Option<String>,
}

/// Validated billboard fields.
#[derive(Debug, Clone)]
pub struct BillboardInput {
    pub label: RequiredText,
    pub image_url: RequiredText,
}

impl TryFrom<BillboardPayload> for BillboardInput {
    type Error = FieldError;

    fn try_from(payload: BillboardPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            label: required_text(payload.label, "Label")?,
            image_url: required_text(payload.image_url, "Image URL")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_label_checked_before_image_url() {
        let err = BillboardInput::try_from(BillboardPayload::default()).unwrap_err();
        assert_eq!(err.to_string(), "Label is required");

        let err = BillboardInput::try_from(BillboardPayload {
            label: Some("Summer".into()),
            image_url: Some(String::new()),
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Image URL is required");
    }
}
