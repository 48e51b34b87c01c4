//! Store-scoped resource kinds served under `/api/{storeId}/{resource}`.

use std::fmt::Display;

use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use shop_pilot_admin::models::{
    BatchResult, Billboard, Category, CategoryDetail, Color, ProductDetail, Size,
};
use shop_pilot_core::{BillboardId, CategoryId, ColorId, ProductId, SizeId};

use crate::form::Entity;

/// A resource collection and the shapes its endpoints answer with.
pub trait Resource {
    /// Path segment after the store id.
    const PATH: &'static str;

    /// Naming used in notifications.
    const ENTITY: Entity;

    type Id: Display + From<Uuid> + Copy + Send;

    /// Body of list entries and of `GET` by id.
    type Record: DeserializeOwned + Serialize + Send;

    /// Body of a successful `POST`.
    type Created: DeserializeOwned + Serialize + Send;

    /// Body of a successful `PATCH`.
    type Updated: DeserializeOwned + Serialize + Send;
}

#[derive(Debug, Clone, Copy)]
pub struct Billboards;

impl Resource for Billboards {
    const PATH: &'static str = "billboards";
    const ENTITY: Entity = Entity::BILLBOARD;
    type Id = BillboardId;
    type Record = Billboard;
    type Created = Billboard;
    type Updated = BatchResult;
}

#[derive(Debug, Clone, Copy)]
pub struct Categories;

impl Resource for Categories {
    const PATH: &'static str = "categories";
    const ENTITY: Entity = Entity::CATEGORY;
    type Id = CategoryId;
    type Record = CategoryDetail;
    type Created = Category;
    type Updated = BatchResult;
}

#[derive(Debug, Clone, Copy)]
pub struct Colors;

impl Resource for Colors {
    const PATH: &'static str = "colors";
    const ENTITY: Entity = Entity::COLOR;
    type Id = ColorId;
    type Record = Color;
    type Created = Color;
    type Updated = BatchResult;
}

#[derive(Debug, Clone, Copy)]
pub struct Sizes;

impl Resource for Sizes {
    const PATH: &'static str = "sizes";
    const ENTITY: Entity = Entity::SIZE;
    type Id = SizeId;
    type Record = Size;
    type Created = Size;
    type Updated = BatchResult;
}

/// Products answer updates with the refreshed product, or `null` when the
/// product is not in the store.
#[derive(Debug, Clone, Copy)]
pub struct Products;

impl Resource for Products {
    const PATH: &'static str = "products";
    const ENTITY: Entity = Entity::PRODUCT;
    type Id = ProductId;
    type Record = ProductDetail;
    type Created = ProductDetail;
    type Updated = Option<ProductDetail>;
}
