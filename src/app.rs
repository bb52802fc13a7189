//! Application context: the engines, built once and handed out by reference.

use std::sync::Arc;

use tracing::info;

use crate::catalog::CatalogQuery;
use crate::config::StorefrontConfig;
use crate::domain::aggregates::Product;
use crate::domain::checkout::{CheckoutEntry, CheckoutFlow};
use crate::domain::value_objects::ProductId;
use crate::product_detail::{ProductDetail, ProductDetailState};
use crate::storage::{FileStore, KeyValueStore};
use crate::store::{CartStore, WishlistStore};
use crate::Result;

#[derive(Clone)]
pub struct Storefront {
    pub config: StorefrontConfig,
    catalog: Arc<dyn CatalogQuery>,
    cart: Arc<CartStore>,
    wishlist: Arc<WishlistStore>,
}

impl Storefront {
    /// Restores cart and wishlist from `storage`.
    pub fn open(config: StorefrontConfig, catalog: Arc<dyn CatalogQuery>, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let cart = Arc::new(CartStore::load(Arc::clone(&storage))?);
        let wishlist = Arc::new(WishlistStore::load(storage)?);
        info!(app = %config.app_name, "storefront ready");
        Ok(Self { config, catalog, cart, wishlist })
    }

    /// Same as [`Storefront::open`] with a [`FileStore`] in the configured data directory.
    pub fn open_in_data_dir(config: StorefrontConfig, catalog: Arc<dyn CatalogQuery>) -> Result<Self> {
        let storage = Arc::new(FileStore::new(config.data_dir.clone()));
        Self::open(config, catalog, storage)
    }

    pub fn cart(&self) -> &Arc<CartStore> { &self.cart }
    pub fn wishlist(&self) -> &Arc<WishlistStore> { &self.wishlist }
    pub fn catalog(&self) -> &Arc<dyn CatalogQuery> { &self.catalog }

    pub async fn products(&self) -> Result<Vec<Product>> {
        Ok(self.catalog.list_products().await?)
    }

    pub async fn product_detail(&self, id: ProductId) -> ProductDetailState {
        ProductDetail::load(self.catalog.as_ref(), id).await
    }

    /// Opens a fresh checkout session. Single-product entries start fetching
    /// immediately when a Tokio runtime is available.
    pub fn checkout(&self, entry: CheckoutEntry) -> CheckoutFlow {
        CheckoutFlow::start(entry, Arc::clone(&self.catalog), Arc::clone(&self.cart))
    }
}
