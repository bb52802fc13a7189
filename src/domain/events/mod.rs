//! Domain events
use crate::domain::value_objects::{Money, ProductId};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainEvent {
    Cart(CartEvent),
    Wishlist(WishlistEvent),
    Checkout(CheckoutEvent),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CartEvent {
    ItemAdded { product_id: ProductId, quantity: u32 },
    QuantityUpdated { product_id: ProductId, quantity: u32 },
    ItemRemoved { product_id: ProductId },
    Cleared,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WishlistEvent {
    Added { product_id: ProductId },
    Removed { product_id: ProductId },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutEvent {
    ProductResolved { product_id: ProductId },
    ProductNotFound { product_id: Option<ProductId> },
    ValidationFailed,
    OrderPlaced { order_id: Uuid, total: Money },
}
