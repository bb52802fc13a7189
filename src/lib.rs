//! OpenSASE Storefront
//!
//! Client-side commerce state for a product-showcase storefront.
//!
//! ## Features
//! - Cart with quantity merging and write-through persistence
//! - Wishlist with idempotent toggles
//! - Display pricing and discount percentages in whole currency units
//! - Checkout flow for a single product or the whole cart
//!
//! Products come from an external catalog ([`catalog::CatalogQuery`]) and
//! state is kept in a [`storage::KeyValueStore`]. Payment is simulated.

use thiserror::Error;

pub mod app;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod pricing;
pub mod product_detail;
pub mod storage;
pub mod store;

pub use app::Storefront;
pub use catalog::{CatalogError, CatalogQuery, InMemoryCatalog};
pub use config::StorefrontConfig;
pub use domain::aggregates::{Cart, CartItem, CheckoutMode, OrderConfirmation, OrderLine, Product, Wishlist, WishlistToggle};
pub use domain::checkout::{
    CheckoutEntry, CheckoutError, CheckoutFlow, CheckoutForm, CheckoutIntent, CheckoutState, DeliveryAddress,
    EmptyReason, Navigation, PaymentMethod,
};
pub use domain::events::{CartEvent, CheckoutEvent, DomainEvent, WishlistEvent};
pub use domain::value_objects::{Money, ProductId, Quantity};
pub use pricing::{calculate_discount_percentage, format_display_price};
pub use product_detail::{ProductDetail, ProductDetailState};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CartStore, SubscriptionId, WishlistStore};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
