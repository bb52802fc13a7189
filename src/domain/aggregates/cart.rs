//! Cart Aggregate
//!
//! Pure in-memory cart logic. Persistence and change notification live in
//! [`crate::store::CartStore`], which wraps this type.

use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::domain::aggregates::Product;
use crate::domain::events::{CartEvent, DomainEvent};
use crate::domain::value_objects::{Money, ProductId, Quantity};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn product_id(&self) -> ProductId { self.product.id }
    pub fn subtotal(&self) -> Money { self.product.sale_price.multiply(self.quantity) }
}

impl Cart {
    pub fn new() -> Self { Self::default() }

    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn get_item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    /// Merges into an existing line when the product is already present.
    ///
    /// A zero quantity is a caller error and leaves the cart untouched.
    pub fn add_item(&mut self, product: Product, quantity: u32) {
        if quantity == 0 { return; }
        let product_id = product.id;
        if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem { product, quantity });
        }
        debug!(%product_id, quantity, "cart item added");
        self.raise_event(CartEvent::ItemAdded { product_id, quantity });
    }

    /// Replaces the quantity of an existing line. Values below one are ignored;
    /// removing a line always goes through [`Cart::remove_item`].
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        let Some(quantity) = Quantity::try_new(quantity) else { return };
        let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) else { return };
        if item.quantity == quantity.value() { return; }
        item.quantity = quantity.value();
        debug!(%product_id, quantity = quantity.value(), "cart quantity updated");
        self.raise_event(CartEvent::QuantityUpdated { product_id, quantity: quantity.value() });
    }

    pub fn remove_item(&mut self, product_id: ProductId) {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        if self.items.len() != before {
            debug!(%product_id, "cart item removed");
            self.raise_event(CartEvent::ItemRemoved { product_id });
        }
    }

    pub fn clear(&mut self) {
        if self.items.is_empty() { return; }
        self.items.clear();
        self.raise_event(CartEvent::Cleared);
    }

    pub fn total(&self) -> Money { self.items.iter().map(CartItem::subtotal).sum() }
    pub fn item_count(&self) -> usize { self.items.len() }
    pub fn total_quantity(&self) -> u64 { self.items.iter().fold(0u64, |acc, i| acc.saturating_add(u64::from(i.quantity))) }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: CartEvent) { self.events.push(DomainEvent::Cart(e)); }
}
