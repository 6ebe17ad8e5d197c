use async_trait::async_trait;

use orderdesk_products::{Product, ProductChanges, ProductId};

use crate::StoreError;

/// Persistence for the product catalog.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new product. Fails with `Conflict` if the name is taken.
    async fn insert(&self, product: Product) -> Result<Product, StoreError>;

    async fn get(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    /// All products, oldest id first.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// Merge `changes` into the stored product. Renaming onto another
    /// product's name fails with `Conflict`.
    async fn update(&self, id: &ProductId, changes: ProductChanges) -> Result<Product, StoreError>;

    async fn delete(&self, id: &ProductId) -> Result<Product, StoreError>;
}
