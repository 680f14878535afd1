//! Product Service - Business logic layer

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Sole caller of the repository. Input shape is validated at the HTTP
/// boundary; this layer turns absence into `NotFound` and rejects empty
/// searches. Storage failures propagate as-is, without retry.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product. No duplicate check.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        self.repository.create(input).await
    }

    /// Every stored product, unfiltered and unpaginated
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    /// Case-insensitive substring search on name; an empty result is not an error
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        if name.is_empty() {
            return Err(ProductError::BadInput(
                "Name parameter is required".to_string(),
            ));
        }

        self.repository.find_by_name(name).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: ObjectId) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Full replacement of name, description and price
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: ObjectId, input: ProductInput) -> ProductResult<Product> {
        self.repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Hard delete. Deleting a product that does not exist is `NotFound`.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ObjectId) -> ProductResult<()> {
        self.repository
            .delete(id)
            .await?
            .map(|_| ())
            .ok_or(ProductError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn widget() -> ProductInput {
        ProductInput {
            name: "Widget".to_string(),
            description: "A useful widget".to_string(),
            price: 500,
        }
    }

    #[tokio::test]
    async fn test_create_returns_stored_product() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .with(eq(widget()))
            .times(1)
            .returning(|input| Ok(Product::new(input)));

        let service = ProductService::new(mock_repo);
        let product = service.create(widget()).await.unwrap();

        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, 500);
    }

    #[tokio::test]
    async fn test_find_by_name_rejects_empty_without_touching_storage() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_name().never();

        let service = ProductService::new(mock_repo);
        let err = service.find_by_name("").await.unwrap_err();

        assert!(matches!(err, ProductError::BadInput(ref msg) if msg == "Name parameter is required"));
    }

    #[tokio::test]
    async fn test_find_by_name_passes_term_through() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_name()
            .withf(|name| name.starts_with("wid") && name.len() == 3)
            .returning(|_| Ok(vec![]));

        let service = ProductService::new(mock_repo);
        let found = service.find_by_name("wid").await.unwrap();

        assert!(found.is_empty(), "No match is an empty list, not an error");
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        let id = ObjectId::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service.find_by_id(id).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(missing) if missing == id));
        assert_eq!(err.to_string(), format!("Product with ID {} not found", id.to_hex()));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().returning(|_, _| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service.update(ObjectId::new(), widget()).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_returns_post_update_document() {
        let mut mock_repo = MockProductRepository::new();
        let id = ObjectId::new();
        mock_repo
            .expect_update()
            .with(eq(id), eq(widget()))
            .returning(|id, input| {
                let mut product = Product::new(input);
                product.id = id;
                Ok(Some(product))
            });

        let service = ProductService::new(mock_repo);
        let updated = service.update(id, widget()).await.unwrap();

        assert_eq!(updated.id, id);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service.delete(ObjectId::new()).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_existing_succeeds() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete()
            .returning(|id| {
                let mut product = Product::new(widget());
                product.id = id;
                Ok(Some(product))
            });

        let service = ProductService::new(mock_repo);
        assert!(service.delete(ObjectId::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_all()
            .times(1)
            .returning(|| Err(ProductError::Database("server selection timeout".into())));

        let service = ProductService::new(mock_repo);
        let err = service.find_all().await.unwrap_err();

        assert!(matches!(err, ProductError::Database(_)));
    }
}
