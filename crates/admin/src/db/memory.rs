//! In-process catalog backend.
//!
//! Mirrors the referential rules of the `PostgreSQL` schema: references to
//! missing rows and deletes of still-referenced rows fail with
//! [`RepositoryError::ForeignKey`] using the same constraint names, and
//! product images go away with their product. Used by the integration
//! tests and for running the API without a database.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use shop_pilot_core::{
    BillboardId, CategoryId, ColorId, ImageId, OwnerId, ProductId, SizeId, StoreId,
};

use super::{
    BillboardRepository, Catalog, CategoryRepository, ColorRepository, ProductRepository,
    RepositoryError, SizeRepository, StoreRepository, batch,
};
use crate::models::{
    BatchResult, Billboard, BillboardInput, Category, CategoryDetail, CategoryInput, Color,
    ColorInput, Image, Product, ProductDetail, ProductInput, Size, SizeInput, Store, StoreInput,
};

/// Rows in insertion order; lists walk them backwards for newest first.
#[derive(Debug, Default)]
struct Tables {
    stores: Vec<Store>,
    billboards: Vec<Billboard>,
    categories: Vec<Category>,
    colors: Vec<Color>,
    sizes: Vec<Size>,
    products: Vec<Product>,
    images: Vec<Image>,
}

fn fk(constraint: &str) -> RepositoryError {
    RepositoryError::ForeignKey(constraint.to_owned())
}

impl Tables {
    fn require_store(&self, id: StoreId, constraint: &str) -> Result<(), RepositoryError> {
        if self.stores.iter().any(|s| s.id == id) {
            Ok(())
        } else {
            Err(fk(constraint))
        }
    }

    fn require_billboard(&self, id: BillboardId) -> Result<(), RepositoryError> {
        if self.billboards.iter().any(|b| b.id == id) {
            Ok(())
        } else {
            Err(fk("category_billboard_id_fkey"))
        }
    }

    fn require_product_refs(&self, input: &ProductInput) -> Result<(), RepositoryError> {
        if !self.categories.iter().any(|c| c.id == input.category_id) {
            return Err(fk("product_category_id_fkey"));
        }
        if !self.colors.iter().any(|c| c.id == input.color_id) {
            return Err(fk("product_color_id_fkey"));
        }
        if !self.sizes.iter().any(|s| s.id == input.size_id) {
            return Err(fk("product_size_id_fkey"));
        }
        Ok(())
    }

    fn category_detail(&self, category: &Category) -> Result<CategoryDetail, RepositoryError> {
        let billboard = self
            .billboards
            .iter()
            .find(|b| b.id == category.billboard_id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!("category {} has no billboard", category.id))
            })?;

        Ok(CategoryDetail {
            category: category.clone(),
            billboard,
        })
    }

    fn product_detail(&self, product: &Product) -> Result<ProductDetail, RepositoryError> {
        let missing = |what: &str| {
            RepositoryError::DataCorruption(format!("product {} has no {what}", product.id))
        };

        Ok(ProductDetail {
            product: product.clone(),
            images: self
                .images
                .iter()
                .filter(|i| i.product_id == product.id)
                .cloned()
                .collect(),
            category: self
                .categories
                .iter()
                .find(|c| c.id == product.category_id)
                .cloned()
                .ok_or_else(|| missing("category"))?,
            color: self
                .colors
                .iter()
                .find(|c| c.id == product.color_id)
                .cloned()
                .ok_or_else(|| missing("color"))?,
            size: self
                .sizes
                .iter()
                .find(|s| s.id == product.size_id)
                .cloned()
                .ok_or_else(|| missing("size"))?,
        })
    }

    fn insert_images(&mut self, product_id: ProductId, input: &ProductInput) {
        let now = Utc::now();
        self.images
            .extend(input.image_urls.iter().map(|url| Image {
                id: ImageId::generate(),
                product_id,
                url: url.clone(),
                created_at: now,
                updated_at: now,
            }));
    }
}

/// Thread-safe in-memory catalog. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[async_trait]
impl StoreRepository for MemoryCatalog {
    async fn create_store(
        &self,
        owner: &OwnerId,
        input: &StoreInput,
    ) -> Result<Store, RepositoryError> {
        let now = Utc::now();
        let store = Store {
            id: StoreId::generate(),
            owner_id: owner.clone(),
            name: input.name.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.stores.push(store.clone());
        Ok(store)
    }

    async fn list_stores_by_owner(&self, owner: &OwnerId) -> Result<Vec<Store>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stores
            .iter()
            .filter(|s| s.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn get_store(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.stores.iter().find(|s| s.id == id).cloned())
    }

    async fn find_owned_store(
        &self,
        id: StoreId,
        owner: &OwnerId,
    ) -> Result<Option<Store>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stores
            .iter()
            .find(|s| s.id == id && s.is_owned_by(owner))
            .cloned())
    }

    async fn update_store(
        &self,
        id: StoreId,
        owner: &OwnerId,
        input: &StoreInput,
    ) -> Result<BatchResult, RepositoryError> {
        let mut tables = self.tables.write().await;
        let mut count = 0;
        for store in tables
            .stores
            .iter_mut()
            .filter(|s| s.id == id && s.is_owned_by(owner))
        {
            store.name = input.name.clone();
            store.updated_at = Utc::now();
            count += 1;
        }
        Ok(batch(count))
    }

    async fn delete_store(
        &self,
        id: StoreId,
        owner: &OwnerId,
    ) -> Result<BatchResult, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables
            .stores
            .iter()
            .any(|s| s.id == id && s.is_owned_by(owner))
        {
            return Ok(batch(0));
        }

        if tables.billboards.iter().any(|b| b.store_id == id) {
            return Err(fk("billboard_store_id_fkey"));
        }
        if tables.categories.iter().any(|c| c.store_id == id) {
            return Err(fk("category_store_id_fkey"));
        }
        if tables.colors.iter().any(|c| c.store_id == id) {
            return Err(fk("color_store_id_fkey"));
        }
        if tables.sizes.iter().any(|s| s.store_id == id) {
            return Err(fk("size_store_id_fkey"));
        }
        if tables.products.iter().any(|p| p.store_id == id) {
            return Err(fk("product_store_id_fkey"));
        }

        tables.stores.retain(|s| s.id != id);
        Ok(batch(1))
    }
}

#[async_trait]
impl BillboardRepository for MemoryCatalog {
    async fn list_billboards(&self, store_id: StoreId) -> Result<Vec<Billboard>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .billboards
            .iter()
            .rev()
            .filter(|b| b.store_id == store_id)
            .cloned()
            .collect())
    }

    async fn get_billboard(&self, id: BillboardId) -> Result<Option<Billboard>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.billboards.iter().find(|b| b.id == id).cloned())
    }

    async fn create_billboard(
        &self,
        store_id: StoreId,
        input: &BillboardInput,
    ) -> Result<Billboard, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.require_store(store_id, "billboard_store_id_fkey")?;

        let now = Utc::now();
        let billboard = Billboard {
            id: BillboardId::generate(),
            store_id,
            label: input.label.clone(),
            image_url: input.image_url.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.billboards.push(billboard.clone());
        Ok(billboard)
    }

    async fn update_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
        input: &BillboardInput,
    ) -> Result<BatchResult, RepositoryError> {
        let mut tables = self.tables.write().await;
        let mut count = 0;
        for billboard in tables
            .billboards
            .iter_mut()
            .filter(|b| b.id == id && b.store_id == store_id)
        {
            billboard.label = input.label.clone();
            billboard.image_url = input.image_url.clone();
            billboard.updated_at = Utc::now();
            count += 1;
        }
        Ok(batch(count))
    }

    async fn delete_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<BatchResult, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables
            .billboards
            .iter()
            .any(|b| b.id == id && b.store_id == store_id)
        {
            return Ok(batch(0));
        }
        if tables.categories.iter().any(|c| c.billboard_id == id) {
            return Err(fk("category_billboard_id_fkey"));
        }
        tables.billboards.retain(|b| b.id != id);
        Ok(batch(1))
    }
}

#[async_trait]
impl CategoryRepository for MemoryCatalog {
    async fn list_categories(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<CategoryDetail>, RepositoryError> {
        let tables = self.tables.read().await;
        tables
            .categories
            .iter()
            .rev()
            .filter(|c| c.store_id == store_id)
            .map(|c| tables.category_detail(c))
            .collect()
    }

    async fn get_category(
        &self,
        id: CategoryId,
    ) -> Result<Option<CategoryDetail>, RepositoryError> {
        let tables = self.tables.read().await;
        tables
            .categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| tables.category_detail(c))
            .transpose()
    }

    async fn create_category(
        &self,
        store_id: StoreId,
        input: &CategoryInput,
    ) -> Result<Category, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.require_store(store_id, "category_store_id_fkey")?;
        tables.require_billboard(input.billboard_id)?;

        let now = Utc::now();
        let category = Category {
            id: CategoryId::generate(),
            store_id,
            billboard_id: input.billboard_id,
            name: input.name.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<BatchResult, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables
            .categories
            .iter()
            .any(|c| c.id == id && c.store_id == store_id)
        {
            return Ok(batch(0));
        }
        tables.require_billboard(input.billboard_id)?;

        for category in tables.categories.iter_mut().filter(|c| c.id == id) {
            category.name = input.name.clone();
            category.billboard_id = input.billboard_id;
            category.updated_at = Utc::now();
        }
        Ok(batch(1))
    }

    async fn delete_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<BatchResult, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables
            .categories
            .iter()
            .any(|c| c.id == id && c.store_id == store_id)
        {
            return Ok(batch(0));
        }
        if tables.products.iter().any(|p| p.category_id == id) {
            return Err(fk("product_category_id_fkey"));
        }
        tables.categories.retain(|c| c.id != id);
        Ok(batch(1))
    }
}

#[async_trait]
impl ColorRepository for MemoryCatalog {
    async fn list_colors(&self, store_id: StoreId) -> Result<Vec<Color>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .colors
            .iter()
            .rev()
            .filter(|c| c.store_id == store_id)
            .cloned()
            .collect())
    }

    async fn get_color(&self, id: ColorId) -> Result<Option<Color>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.colors.iter().find(|c| c.id == id).cloned())
    }

    async fn create_color(
        &self,
        store_id: StoreId,
        input: &ColorInput,
    ) -> Result<Color, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.require_store(store_id, "color_store_id_fkey")?;

        let now = Utc::now();
        let color = Color {
            id: ColorId::generate(),
            store_id,
            name: input.name.clone(),
            value: input.value.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.colors.push(color.clone());
        Ok(color)
    }

    async fn update_color(
        &self,
        store_id: StoreId,
        id: ColorId,
        input: &ColorInput,
    ) -> Result<BatchResult, RepositoryError> {
        let mut tables = self.tables.write().await;
        let mut count = 0;
        for color in tables
            .colors
            .iter_mut()
            .filter(|c| c.id == id && c.store_id == store_id)
        {
            color.name = input.name.clone();
            color.value = input.value.clone();
            color.updated_at = Utc::now();
            count += 1;
        }
        Ok(batch(count))
    }

    async fn delete_color(
        &self,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<BatchResult, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables
            .colors
            .iter()
            .any(|c| c.id == id && c.store_id == store_id)
        {
            return Ok(batch(0));
        }
        if tables.products.iter().any(|p| p.color_id == id) {
            return Err(fk("product_color_id_fkey"));
        }
        tables.colors.retain(|c| c.id != id);
        Ok(batch(1))
    }
}

#[async_trait]
impl SizeRepository for MemoryCatalog {
    async fn list_sizes(&self, store_id: StoreId) -> Result<Vec<Size>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .sizes
            .iter()
            .rev()
            .filter(|s| s.store_id == store_id)
            .cloned()
            .collect())
    }

    async fn get_size(&self, id: SizeId) -> Result<Option<Size>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.sizes.iter().find(|s| s.id == id).cloned())
    }

    async fn create_size(
        &self,
        store_id: StoreId,
        input: &SizeInput,
    ) -> Result<Size, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.require_store(store_id, "size_store_id_fkey")?;

        let now = Utc::now();
        let size = Size {
            id: SizeId::generate(),
            store_id,
            name: input.name.clone(),
            value: input.value.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.sizes.push(size.clone());
        Ok(size)
    }

    async fn update_size(
        &self,
        store_id: StoreId,
        id: SizeId,
        input: &SizeInput,
    ) -> Result<BatchResult, RepositoryError> {
        let mut tables = self.tables.write().await;
        let mut count = 0;
        for size in tables
            .sizes
            .iter_mut()
            .filter(|s| s.id == id && s.store_id == store_id)
        {
            size.name = input.name.clone();
            size.value = input.value.clone();
            size.updated_at = Utc::now();
            count += 1;
        }
        Ok(batch(count))
    }

    async fn delete_size(
        &self,
        store_id: StoreId,
        id: SizeId,
    ) -> Result<BatchResult, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables
            .sizes
            .iter()
            .any(|s| s.id == id && s.store_id == store_id)
        {
            return Ok(batch(0));
        }
        if tables.products.iter().any(|p| p.size_id == id) {
            return Err(fk("product_size_id_fkey"));
        }
        tables.sizes.retain(|s| s.id != id);
        Ok(batch(1))
    }
}

#[async_trait]
impl ProductRepository for MemoryCatalog {
    async fn list_products(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<ProductDetail>, RepositoryError> {
        let tables = self.tables.read().await;
        tables
            .products
            .iter()
            .rev()
            .filter(|p| p.store_id == store_id)
            .map(|p| tables.product_detail(p))
            .collect()
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<ProductDetail>, RepositoryError> {
        let tables = self.tables.read().await;
        tables
            .products
            .iter()
            .find(|p| p.id == id)
            .map(|p| tables.product_detail(p))
            .transpose()
    }

    async fn create_product(
        &self,
        store_id: StoreId,
        input: &ProductInput,
    ) -> Result<ProductDetail, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.require_store(store_id, "product_store_id_fkey")?;
        tables.require_product_refs(input)?;

        let now = Utc::now();
        let product = Product {
            id: ProductId::generate(),
            store_id,
            category_id: input.category_id,
            color_id: input.color_id,
            size_id: input.size_id,
            name: input.name.clone(),
            price: input.price,
            is_featured: input.is_featured,
            is_archived: input.is_archived,
            created_at: now,
            updated_at: now,
        };
        tables.products.push(product.clone());
        tables.insert_images(product.id, input);

        tables.product_detail(&product)
    }

    async fn update_product(
        &self,
        store_id: StoreId,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Option<ProductDetail>, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables
            .products
            .iter()
            .any(|p| p.id == id && p.store_id == store_id)
        {
            return Ok(None);
        }
        // Checked before touching anything, so a bad reference changes nothing.
        tables.require_product_refs(input)?;

        let Some(product) = tables.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        product.category_id = input.category_id;
        product.color_id = input.color_id;
        product.size_id = input.size_id;
        product.name = input.name.clone();
        product.price = input.price;
        product.is_featured = input.is_featured;
        product.is_archived = input.is_archived;
        product.updated_at = Utc::now();
        let product = product.clone();

        tables.images.retain(|i| i.product_id != id);
        tables.insert_images(id, input);

        tables.product_detail(&product).map(Some)
    }

    async fn delete_product(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<BatchResult, RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.products.len();
        tables
            .products
            .retain(|p| !(p.id == id && p.store_id == store_id));
        let removed = before - tables.products.len();

        if removed > 0 {
            tables.images.retain(|i| i.product_id != id);
        }
        Ok(batch(u64::try_from(removed).unwrap_or(u64::MAX)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{
        BillboardPayload, CategoryPayload, ColorPayload, ImagePayload, ProductPayload,
        SizePayload, StorePayload,
    };

    fn owner(name: &str) -> OwnerId {
        OwnerId::parse(name).unwrap()
    }

    async fn store(catalog: &MemoryCatalog, owner_id: &OwnerId) -> Store {
        let input = StoreInput::try_from(StorePayload {
            name: Some("Acme".into()),
        })
        .unwrap();
        catalog.create_store(owner_id, &input).await.unwrap()
    }

    fn billboard_input(label: &str) -> BillboardInput {
        BillboardInput::try_from(BillboardPayload {
            label: Some(label.into()),
            image_url: Some("https://cdn.example/banner.png".into()),
        })
        .unwrap()
    }

    fn category_input(billboard_id: BillboardId) -> CategoryInput {
        CategoryInput::try_from(CategoryPayload {
            name: Some("Shoes".into()),
            billboard_id: Some(billboard_id.to_string()),
        })
        .unwrap()
    }

    struct Fixture {
        catalog: MemoryCatalog,
        store: Store,
        billboard: Billboard,
        category: Category,
        color: Color,
        size: Size,
    }

    async fn fixture() -> Fixture {
        let catalog = MemoryCatalog::new();
        let store = store(&catalog, &owner("user_a")).await;
        let billboard = catalog
            .create_billboard(store.id, &billboard_input("Summer"))
            .await
            .unwrap();
        let category = catalog
            .create_category(store.id, &category_input(billboard.id))
            .await
            .unwrap();
        let color = catalog
            .create_color(
                store.id,
                &ColorInput::try_from(ColorPayload {
                    name: Some("Red".into()),
                    value: Some("#ff0000".into()),
                })
                .unwrap(),
            )
            .await
            .unwrap();
        let size = catalog
            .create_size(
                store.id,
                &SizeInput::try_from(SizePayload {
                    name: Some("Large".into()),
                    value: Some("L".into()),
                })
                .unwrap(),
            )
            .await
            .unwrap();

        Fixture {
            catalog,
            store,
            billboard,
            category,
            color,
            size,
        }
    }

    fn product_input(f: &Fixture, urls: &[&str]) -> ProductInput {
        ProductInput::try_from(ProductPayload {
            name: Some("Runner".into()),
            images: Some(
                urls.iter()
                    .map(|u| ImagePayload {
                        url: Some((*u).to_owned()),
                    })
                    .collect(),
            ),
            price: Some(serde_json::from_str("59.99").unwrap()),
            category_id: Some(f.category.id.to_string()),
            color_id: Some(f.color.id.to_string()),
            size_id: Some(f.size.id.to_string()),
            is_featured: Some(true),
            is_archived: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_delete_referenced_billboard_fails() {
        let f = fixture().await;

        let result = f.catalog.delete_billboard(f.store.id, f.billboard.id).await;
        assert!(matches!(result, Err(RepositoryError::ForeignKey(_))));
        assert!(f.catalog.get_billboard(f.billboard.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_category_requires_existing_billboard() {
        let f = fixture().await;
        let result = f
            .catalog
            .create_category(f.store.id, &category_input(BillboardId::generate()))
            .await;
        assert!(matches!(result, Err(RepositoryError::ForeignKey(_))));
    }

    #[tokio::test]
    async fn test_update_replaces_images() {
        let f = fixture().await;
        let created = f
            .catalog
            .create_product(f.store.id, &product_input(&f, &["a.png", "b.png"]))
            .await
            .unwrap();
        assert_eq!(created.images.len(), 2);

        let updated = f
            .catalog
            .update_product(f.store.id, created.product.id, &product_input(&f, &["c.png"]))
            .await
            .unwrap()
            .unwrap();
        let urls: Vec<&str> = updated.images.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, ["c.png"]);

        let fetched = f.catalog.get_product(created.product.id).await.unwrap().unwrap();
        assert_eq!(fetched.images.len(), 1);
    }

    #[tokio::test]
    async fn test_update_scoped_to_store() {
        let f = fixture().await;
        let other = store(&f.catalog, &owner("user_a")).await;

        let result = f
            .catalog
            .update_billboard(other.id, f.billboard.id, &billboard_input("Hijacked"))
            .await
            .unwrap();
        assert_eq!(result.count, 0);

        let billboard = f.catalog.get_billboard(f.billboard.id).await.unwrap().unwrap();
        assert_eq!(billboard.label.as_str(), "Summer");
    }

    #[tokio::test]
    async fn test_delete_product_cascades_images() {
        let f = fixture().await;
        let created = f
            .catalog
            .create_product(f.store.id, &product_input(&f, &["a.png"]))
            .await
            .unwrap();

        let result = f
            .catalog
            .delete_product(f.store.id, created.product.id)
            .await
            .unwrap();
        assert_eq!(result.count, 1);
        assert!(f.catalog.tables.read().await.images.is_empty());

        // Category is free again once the product is gone.
        let result = f
            .catalog
            .delete_category(f.store.id, f.category.id)
            .await
            .unwrap();
        assert_eq!(result.count, 1);
    }

    #[tokio::test]
    async fn test_lists_are_newest_first() {
        let f = fixture().await;
        f.catalog
            .create_billboard(f.store.id, &billboard_input("Winter"))
            .await
            .unwrap();

        let labels: Vec<String> = f
            .catalog
            .list_billboards(f.store.id)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.label.into_inner())
            .collect();
        assert_eq!(labels, ["Winter", "Summer"]);
    }

    #[tokio::test]
    async fn test_store_with_children_cannot_be_deleted() {
        let f = fixture().await;
        let result = f.catalog.delete_store(f.store.id, &owner("user_a")).await;
        assert!(matches!(result, Err(RepositoryError::ForeignKey(_))));

        let result = f
            .catalog
            .delete_store(f.store.id, &owner("user_b"))
            .await
            .unwrap();
        assert_eq!(result.count, 0);
    }
}
