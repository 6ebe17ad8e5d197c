use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use orderdesk_products::{Product, ProductChanges, ProductId};

use super::r#trait::ProductStore;
use crate::StoreError;

/// In-memory product catalog.
///
/// Intended for tests/dev. Name uniqueness is checked under the write lock.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<BTreeMap<ProductId, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

fn check_name_free(
    products: &BTreeMap<ProductId, Product>,
    name: &str,
    except: Option<ProductId>,
) -> Result<(), StoreError> {
    let taken = products
        .values()
        .any(|p| p.name() == name && Some(p.id()) != except);
    if taken {
        Err(StoreError::Conflict(format!("product {name} already exists")))
    } else {
        Ok(())
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: Product) -> Result<Product, StoreError> {
        let mut products = self.products.write().map_err(poisoned)?;
        if products.contains_key(&product.id()) {
            return Err(StoreError::Conflict(format!("product {} already exists", product.id())));
        }
        check_name_free(&products, product.name(), None)?;
        products.insert(product.id(), product.clone());
        Ok(product)
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().map_err(poisoned)?;
        Ok(products.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().map_err(poisoned)?;
        Ok(products.values().cloned().collect())
    }

    async fn update(&self, id: &ProductId, changes: ProductChanges) -> Result<Product, StoreError> {
        let mut products = self.products.write().map_err(poisoned)?;
        let mut next = products.get(id).cloned().ok_or(StoreError::NotFound)?;
        next.apply_changes(changes)?;
        check_name_free(&products, next.name(), Some(*id))?;
        products.insert(*id, next.clone());
        Ok(next)
    }

    async fn delete(&self, id: &ProductId) -> Result<Product, StoreError> {
        let mut products = self.products.write().map_err(poisoned)?;
        products.remove(id).ok_or(StoreError::NotFound)
    }
}
