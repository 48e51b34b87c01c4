//! Color domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shop_pilot_core::{ColorId, RequiredText, StoreId};

use super::validation::{FieldError, required_text};

/// A product color. `value` is the hex code shown as a swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: ColorId,
    pub store_id: StoreId,
    pub name: RequiredText,
    pub value: RequiredText,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of color create/update requests.
#[derive(Debug, Default, Deserialize)]
pub struct ColorPayload {
    pub name: Option<String>,
    pub value: Option<String>,
}

/// Validated color fields.
///
/// Only presence is enforced here; the `#` prefix is a client-side hint.
#[derive(Debug, Clone)]
pub struct ColorInput {
    pub name: RequiredText,
    pub value: RequiredText,
}

impl TryFrom<ColorPayload> for ColorInput {
    type Error = FieldError;

    fn try_from(payload: ColorPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required_text(payload.name, "Name")?,
            value: required_text(payload.value, "Value")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_value_required() {
        let err = ColorInput::try_from(ColorPayload {
            name: Some("Red".into()),
            value: None,
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Value is required");
    }

    #[test]
    fn test_value_without_hash_accepted() {
        let input = ColorInput::try_from(ColorPayload {
            name: Some("Red".into()),
            value: Some("ff0000".into()),
        });
        assert!(input.is_ok());
    }
}
