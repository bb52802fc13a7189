//! Wishlist Aggregate

use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::domain::aggregates::Product;
use crate::domain::events::{DomainEvent, WishlistEvent};
use crate::domain::value_objects::ProductId;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    items: Vec<Product>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

/// Outcome of [`Wishlist::toggle_item`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WishlistToggle { Added, Removed }

impl Wishlist {
    pub fn new() -> Self { Self::default() }

    pub fn items(&self) -> &[Product] { &self.items }
    pub fn get(&self, product_id: ProductId) -> Option<&Product> { self.items.iter().find(|p| p.id == product_id) }
    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool { self.get(product_id).is_some() }
    pub fn count(&self) -> usize { self.items.len() }

    pub fn toggle_item(&mut self, product: Product) -> WishlistToggle {
        let product_id = product.id;
        if self.is_in_wishlist(product_id) {
            self.items.retain(|p| p.id != product_id);
            debug!(%product_id, "wishlist item removed");
            self.raise_event(WishlistEvent::Removed { product_id });
            WishlistToggle::Removed
        } else {
            self.items.push(product);
            debug!(%product_id, "wishlist item added");
            self.raise_event(WishlistEvent::Added { product_id });
            WishlistToggle::Added
        }
    }

    /// Returns the removed snapshot, if there was one.
    pub fn remove_item(&mut self, product_id: ProductId) -> Option<Product> {
        let idx = self.items.iter().position(|p| p.id == product_id)?;
        let product = self.items.remove(idx);
        self.raise_event(WishlistEvent::Removed { product_id });
        Some(product)
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: WishlistEvent) { self.events.push(DomainEvent::Wishlist(e)); }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64) -> Product { Product::new(id, "Sonax", format!("Item {id}"), 900, 800) }

    #[test]
    fn test_toggle_is_an_involution() {
        let mut w = Wishlist::new();
        w.toggle_item(product(5));
        let before = w.is_in_wishlist(ProductId::new(5));
        assert_eq!(w.toggle_item(product(1)), WishlistToggle::Added);
        assert_eq!(w.toggle_item(product(1)), WishlistToggle::Removed);
        assert!(!w.is_in_wishlist(ProductId::new(1)));
        assert_eq!(w.is_in_wishlist(ProductId::new(5)), before);
        assert_eq!(w.count(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut w = Wishlist::new();
        w.toggle_item(product(1));
        w.toggle_item(product(2));
        assert!(w.remove_item(ProductId::new(1)).is_some());
        assert!(w.remove_item(ProductId::new(1)).is_none());
        assert_eq!(w.count(), 1);
        assert_eq!(w.items()[0].id, ProductId::new(2));
    }

    #[test]
    fn test_events() {
        let mut w = Wishlist::new();
        w.remove_item(ProductId::new(3));
        assert!(w.take_events().is_empty());
        w.toggle_item(product(3));
        w.toggle_item(product(3));
        assert_eq!(w.take_events(), vec![
            DomainEvent::Wishlist(WishlistEvent::Added { product_id: ProductId::new(3) }),
            DomainEvent::Wishlist(WishlistEvent::Removed { product_id: ProductId::new(3) }),
        ]);
    }
}
