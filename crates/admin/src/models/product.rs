//! Product domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shop_pilot_core::{
    CategoryId, ColorId, ImageId, Price, ProductId, RequiredText, SizeId, StoreId,
};

use super::category::Category;
use super::color::Color;
use super::size::Size;
use super::validation::{
    FieldError, PriceField, required_id, required_list, required_price, required_text,
};

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub category_id: CategoryId,
    pub color_id: ColorId,
    pub size_id: SizeId,
    pub name: RequiredText,
    pub price: Price,
    pub is_featured: bool,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product image. Owned by its product and deleted with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: ImageId,
    pub product_id: ProductId,
    pub url: RequiredText,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product with images and its category, color and size expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<Image>,
    pub category: Category,
    pub color: Color,
    pub size: Size,
}

/// An image entry in a product payload: `{ "url": "..." }`.
#[derive(Debug, Default, Deserialize)]
pub struct ImagePayload {
    pub url: Option<String>,
}

/// Body of product create/update requests.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: Option<String>,
    pub images: Option<Vec<ImagePayload>>,
    pub price: Option<PriceField>,
    pub category_id: Option<String>,
    pub color_id: Option<String>,
    pub size_id: Option<String>,
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
}

/// Validated product fields.
///
/// Updates overwrite every field, so an omitted flag resets to `false` and
/// the image list replaces the stored one.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: RequiredText,
    pub image_urls: Vec<RequiredText>,
    pub price: Price,
    pub category_id: CategoryId,
    pub color_id: ColorId,
    pub size_id: SizeId,
    pub is_featured: bool,
    pub is_archived: bool,
}

impl TryFrom<ProductPayload> for ProductInput {
    type Error = FieldError;

    fn try_from(payload: ProductPayload) -> Result<Self, Self::Error> {
        let name = required_text(payload.name, "Name")?;
        let image_urls = required_list(payload.images, "Images", |image| {
            required_text(image.url, "Image URL")
        })?;
        let price = required_price(payload.price, "Price")?;
        let category_id = required_id(payload.category_id, "Category id")?;
        let color_id = required_id(payload.color_id, "Color id")?;
        let size_id = required_id(payload.size_id, "Size id")?;

        Ok(Self {
            name,
            image_urls,
            price,
            category_id,
            color_id,
            size_id,
            is_featured: payload.is_featured.unwrap_or(false),
            is_archived: payload.is_archived.unwrap_or(false),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn payload() -> serde_json::Value {
        serde_json::json!({
            "name": "Runner",
            "images": [{ "url": "https://cdn.example/a.png" }],
            "price": 59.5,
            "categoryId": CategoryId::generate().to_string(),
            "colorId": ColorId::generate().to_string(),
            "sizeId": SizeId::generate().to_string(),
        })
    }

    fn convert(value: serde_json::Value) -> Result<ProductInput, FieldError> {
        let payload: ProductPayload = serde_json::from_value(value).unwrap();
        ProductInput::try_from(payload)
    }

    #[test]
    fn test_valid_payload_defaults_flags() {
        let input = convert(payload()).unwrap();
        assert_eq!(input.name.as_str(), "Runner");
        assert_eq!(input.image_urls.len(), 1);
        assert_eq!(input.price.to_string(), "59.50");
        assert!(!input.is_featured);
        assert!(!input.is_archived);
    }

    #[test]
    fn test_fields_checked_in_order() {
        let cases = [
            ("name", "Name is required"),
            ("images", "Images are required"),
            ("price", "Price is required"),
            ("categoryId", "Category id is required"),
            ("colorId", "Color id is required"),
            ("sizeId", "Size id is required"),
        ];

        for (field, expected) in cases {
            let mut value = payload();
            value.as_object_mut().unwrap().remove(field);
            let err = convert(value).unwrap_err();
            assert_eq!(err.to_string(), expected, "removing {field}");
        }
    }

    #[test]
    fn test_empty_images_rejected() {
        let mut value = payload();
        value["images"] = serde_json::json!([]);
        assert_eq!(convert(value).unwrap_err().to_string(), "Images are required");
    }

    #[test]
    fn test_zero_price_rejected() {
        let mut value = payload();
        value["price"] = serde_json::json!(0);
        assert_eq!(convert(value).unwrap_err().to_string(), "Price is required");
    }
}
