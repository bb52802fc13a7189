//! Product detail view state.
//!
//! An unresolvable product is a terminal display state; the only way out is
//! back to the catalog root.

use tracing::warn;

use crate::catalog::CatalogQuery;
use crate::domain::aggregates::{Product, WishlistToggle};
use crate::domain::checkout::CheckoutEntry;
use crate::domain::value_objects::ProductId;
use crate::storage::StorageError;
use crate::store::{CartStore, WishlistStore};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductDetailState {
    NotFound(ProductId),
    Ready(ProductDetail),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductDetail {
    product: Product,
}

impl ProductDetail {
    pub async fn load(catalog: &dyn CatalogQuery, id: ProductId) -> ProductDetailState {
        match catalog.get_product(id).await {
            Ok(product) => ProductDetailState::Ready(Self { product }),
            Err(e) => {
                warn!(product_id = %id, error = %e, "product detail unavailable");
                ProductDetailState::NotFound(id)
            }
        }
    }

    pub fn product(&self) -> &Product { &self.product }
    pub fn discount_percentage(&self) -> i64 { self.product.discount_percentage() }
    pub fn has_discount(&self) -> bool { self.discount_percentage() > 0 }
    pub fn display_sale_price(&self) -> String { self.product.display_sale_price() }
    pub fn display_list_price(&self) -> String { self.product.display_list_price() }

    pub fn is_in_wishlist(&self, wishlist: &WishlistStore) -> bool { wishlist.is_in_wishlist(self.product.id) }

    pub fn add_to_cart(&self, cart: &CartStore) -> Result<(), StorageError> {
        cart.add_item(self.product.clone(), 1)
    }

    pub fn toggle_wishlist(&self, wishlist: &WishlistStore) -> Result<WishlistToggle, StorageError> {
        wishlist.toggle_item(self.product.clone())
    }

    /// Single-product checkout for this product.
    pub fn buy_now(&self) -> CheckoutEntry { CheckoutEntry::Single(Some(self.product.id)) }
}
