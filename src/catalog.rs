//! Catalog query boundary.
//!
//! The catalog itself lives outside this crate; the engines only consume the
//! products it returns.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::aggregates::Product;
use crate::domain::value_objects::ProductId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait CatalogQuery: Send + Sync {
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError>;
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Fixed product list, used by the demo binary and tests.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self { Self { products } }
}

#[async_trait]
impl CatalogQuery for InMemoryCatalog {
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products.iter().find(|p| p.id == id).cloned().ok_or(CatalogError::NotFound(id))
    }

    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_lookup() {
        let catalog = InMemoryCatalog::new(vec![Product::new(1, "3M", "Polish", 800, 650)]);
        assert_eq!(catalog.get_product(ProductId::new(1)).await.unwrap().name, "Polish");
        assert_eq!(
            catalog.get_product(ProductId::new(2)).await,
            Err(CatalogError::NotFound(ProductId::new(2)))
        );
        assert_eq!(catalog.list_products().await.unwrap().len(), 1);
    }
}
