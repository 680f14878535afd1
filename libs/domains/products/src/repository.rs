use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{Product, ProductInput};

/// Repository trait for Product persistence
///
/// Every method is a single storage round trip. Absence is reported as `None`
/// so the service decides what "not found" means.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product and return it with its assigned id
    async fn create(&self, input: ProductInput) -> ProductResult<Product>;

    /// Every stored product, in storage order
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Products whose name contains `name`, case-insensitively and literally
    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// Replace name, description and price; returns the updated document
    async fn update(&self, id: ObjectId, input: ProductInput) -> ProductResult<Option<Product>>;

    /// Remove a product; returns the removed document
    async fn delete(&self, id: ObjectId) -> ProductResult<Option<Product>>;
}

/// In-memory implementation of ProductRepository (for testing)
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let product = Product::new(input);
        self.products.write().await.push(product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        let needle = name.to_lowercase();
        let products = self.products.read().await;

        Ok(products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, id: ObjectId, input: ProductInput) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        Ok(products.iter_mut().find(|p| p.id == id).map(|product| {
            product.apply(input);
            product.clone()
        }))
    }

    async fn delete(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        let index = products.iter().position(|p| p.id == id);

        Ok(index.map(|index| products.remove(index)))
    }
}
