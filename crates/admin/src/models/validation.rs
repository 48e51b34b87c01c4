//! Required-field validation for mutation payloads.
//!
//! Payloads arrive with every field optional. Converting a payload into its
//! typed input checks the fields one at a time in declaration order and
//! stops at the first problem, so the caller always learns about exactly
//! one field.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use shop_pilot_core::{Price, PriceError, RequiredText};

/// What is wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    /// Absent, null, or blank.
    Missing,
    /// A list that is absent or empty.
    Empty,
    /// Present but not parseable (e.g. a malformed id).
    Invalid,
    /// A price below zero.
    Negative,
}

/// A single rejected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Human-readable field label, e.g. `"Billboard id"`.
    pub field: &'static str,
    /// What is wrong with it.
    pub problem: FieldProblem,
}

impl FieldError {
    /// The field is missing.
    #[must_use]
    pub const fn missing(field: &'static str) -> Self {
        Self {
            field,
            problem: FieldProblem::Missing,
        }
    }

    /// The field is present but malformed.
    #[must_use]
    pub const fn invalid(field: &'static str) -> Self {
        Self {
            field,
            problem: FieldProblem::Invalid,
        }
    }

    /// The payload field at a JSON path such as `price` or `images[0].url`
    /// had the wrong type. `None` for keys no payload declares.
    #[must_use]
    pub fn invalid_at(path: &str) -> Option<Self> {
        let key = path.split(['.', '[']).next().unwrap_or(path);
        field_label(key).map(Self::invalid)
    }
}

/// User-facing name of a payload key.
fn field_label(key: &str) -> Option<&'static str> {
    let label = match key {
        "name" => "Name",
        "label" => "Label",
        "imageUrl" => "Image URL",
        "billboardId" => "Billboard id",
        "value" => "Value",
        "images" => "Images",
        "price" => "Price",
        "categoryId" => "Category id",
        "colorId" => "Color id",
        "sizeId" => "Size id",
        "isFeatured" => "Featured",
        "isArchived" => "Archived",
        _ => return None,
    };
    Some(label)
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.problem {
            FieldProblem::Missing => write!(f, "{} is required", self.field),
            FieldProblem::Empty => write!(f, "{} are required", self.field),
            FieldProblem::Invalid => write!(f, "{} is invalid", self.field),
            FieldProblem::Negative => write!(f, "{} cannot be negative", self.field),
        }
    }
}

impl std::error::Error for FieldError {}

/// Require a non-blank text field.
///
/// # Errors
///
/// Returns `FieldError` (missing) if the value is absent or blank.
pub fn required_text(
    value: Option<String>,
    field: &'static str,
) -> Result<RequiredText, FieldError> {
    value
        .and_then(RequiredText::from_string)
        .ok_or(FieldError::missing(field))
}

/// Require an id field, given as a string.
///
/// # Errors
///
/// Returns `FieldError` (missing) if the value is absent or blank, or
/// (invalid) if it does not parse.
pub fn required_id<T: FromStr>(value: Option<String>, field: &'static str) -> Result<T, FieldError> {
    let raw = required_text(value, field)?;
    raw.as_str()
        .trim()
        .parse()
        .map_err(|_| FieldError::invalid(field))
}

/// A price as it arrives in JSON: either a number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    /// `19.99`
    Number(serde_json::Number),
    /// `"19.99"`
    Text(String),
}

impl PriceField {
    fn to_decimal(&self) -> Option<Decimal> {
        let raw = match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_owned(),
        };
        if raw.is_empty() {
            return None;
        }
        Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .ok()
    }
}

/// Require a price that is present and non-zero, rounded to whole cents.
///
/// Rounding happens before the zero check, so a sub-cent amount counts as
/// missing.
///
/// # Errors
///
/// Returns `FieldError` (missing) if the value is absent, blank, or rounds
/// to zero;
/// (invalid) if it is not a number; (negative) if it is below zero.
pub fn required_price(value: Option<PriceField>, field: &'static str) -> Result<Price, FieldError> {
    let value = value.ok_or(FieldError::missing(field))?;

    if matches!(&value, PriceField::Text(s) if s.trim().is_empty()) {
        return Err(FieldError::missing(field));
    }

    let amount = value
        .to_decimal()
        .ok_or(FieldError::invalid(field))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Price::new(amount).map_err(|e| match e {
        PriceError::Zero => FieldError::missing(field),
        PriceError::Negative => FieldError {
            field,
            problem: FieldProblem::Negative,
        },
    })
}

/// Require a non-empty list, mapping each element.
///
/// # Errors
///
/// Returns `FieldError` (empty) if the list is absent or empty, or
/// whatever error `map` returns for the first bad element.
pub fn required_list<T, U>(
    value: Option<Vec<T>>,
    field: &'static str,
    map: impl FnMut(T) -> Result<U, FieldError>,
) -> Result<Vec<U>, FieldError> {
    let items = value.unwrap_or_default();
    if items.is_empty() {
        return Err(FieldError {
            field,
            problem: FieldProblem::Empty,
        });
    }
    items.into_iter().map(map).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shop_pilot_core::StoreId;

    #[test]
    fn test_messages() {
        assert_eq!(FieldError::missing("Label").to_string(), "Label is required");
        assert_eq!(
            FieldError::invalid("Billboard id").to_string(),
            "Billboard id is invalid"
        );
    }

    #[test]
    fn test_required_text() {
        assert!(required_text(Some("Acme".into()), "Name").is_ok());
        assert_eq!(
            required_text(Some("  ".into()), "Name"),
            Err(FieldError::missing("Name"))
        );
        assert_eq!(required_text(None, "Name"), Err(FieldError::missing("Name")));
    }

    #[test]
    fn test_required_id() {
        let id = StoreId::generate();
        let parsed: StoreId = required_id(Some(id.to_string()), "Store id").unwrap();
        assert_eq!(parsed, id);

        assert_eq!(
            required_id::<StoreId>(Some(String::new()), "Store id"),
            Err(FieldError::missing("Store id"))
        );
        assert_eq!(
            required_id::<StoreId>(Some("not-a-uuid".into()), "Store id"),
            Err(FieldError::invalid("Store id"))
        );
    }

    #[test]
    fn test_required_price() {
        let from_number: PriceField = serde_json::from_str("19.99").unwrap();
        assert_eq!(
            required_price(Some(from_number), "Price").unwrap().to_string(),
            "19.99"
        );

        let from_text: PriceField = serde_json::from_str("\"5\"").unwrap();
        assert!(required_price(Some(from_text), "Price").is_ok());

        let zero: PriceField = serde_json::from_str("0").unwrap();
        assert_eq!(
            required_price(Some(zero), "Price"),
            Err(FieldError::missing("Price"))
        );

        let negative: PriceField = serde_json::from_str("-3").unwrap();
        assert_eq!(
            required_price(Some(negative), "Price").unwrap_err().to_string(),
            "Price cannot be negative"
        );

        let sub_cent: PriceField = serde_json::from_str("\"0.004\"").unwrap();
        assert_eq!(
            required_price(Some(sub_cent), "Price"),
            Err(FieldError::missing("Price"))
        );

        let half_cent: PriceField = serde_json::from_str("19.995").unwrap();
        assert_eq!(
            required_price(Some(half_cent), "Price").unwrap().amount(),
            Decimal::new(2000, 2)
        );

        let junk: PriceField = serde_json::from_str("\"cheap\"").unwrap();
        assert_eq!(
            required_price(Some(junk), "Price"),
            Err(FieldError::invalid("Price"))
        );
    }

    #[test]
    fn test_invalid_at_json_path() {
        assert_eq!(FieldError::invalid_at("name"), Some(FieldError::invalid("Name")));
        assert_eq!(
            FieldError::invalid_at("categoryId"),
            Some(FieldError::invalid("Category id"))
        );
        assert_eq!(
            FieldError::invalid_at("images[0].url"),
            Some(FieldError::invalid("Images"))
        );
        assert_eq!(FieldError::invalid_at("."), None);
        assert_eq!(FieldError::invalid_at("nickname"), None);
    }

    #[test]
    fn test_required_list() {
        let empty: Option<Vec<String>> = Some(vec![]);
        assert_eq!(
            required_list(empty, "Images", |s| required_text(Some(s), "Image URL"))
                .unwrap_err()
                .to_string(),
            "Images are required"
        );

        let urls = Some(vec!["https://cdn/a.png".to_owned()]);
        let parsed =
            required_list(urls, "Images", |s| required_text(Some(s), "Image URL")).unwrap();
        assert_eq!(parsed.len(), 1);
    }
}
