//! Persistent Wishlist Engine

use std::sync::Arc;

use tracing::info;

use super::{CartStore, SubscriptionId, WriteThrough};
use crate::domain::aggregates::{Product, Wishlist, WishlistToggle};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::ProductId;
use crate::storage::{KeyValueStore, StorageError, WISHLIST_KEY};

pub struct WishlistStore {
    inner: WriteThrough<Wishlist>,
}

impl WishlistStore {
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let inner = WriteThrough::<Wishlist>::load(storage, WISHLIST_KEY)?;
        info!(items = inner.read().count(), "wishlist loaded");
        Ok(Self { inner })
    }

    pub fn toggle_item(&self, product: Product) -> Result<WishlistToggle, StorageError> {
        self.inner.mutate(|w| w.toggle_item(product))
    }

    pub fn remove_item(&self, product_id: ProductId) -> Result<(), StorageError> {
        self.inner.mutate(|w| { w.remove_item(product_id); })
    }

    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool { self.inner.read().is_in_wishlist(product_id) }
    pub fn get_count(&self) -> usize { self.inner.read().count() }
    pub fn items(&self) -> Vec<Product> { self.inner.read().items().to_vec() }
    pub fn snapshot(&self) -> Wishlist { self.inner.read().clone() }

    /// Moves a saved product into the cart with quantity one.
    ///
    /// Returns `false` when the product is not in the wishlist. The cart is
    /// written first; if that fails the wishlist is left untouched.
    pub fn move_to_cart(&self, product_id: ProductId, cart: &CartStore) -> Result<bool, StorageError> {
        let saved = self.inner.read().get(product_id).cloned();
        let Some(product) = saved else {
            return Ok(false);
        };
        cart.add_item(product, 1)?;
        self.remove_item(product_id)?;
        Ok(true)
    }

    pub fn subscribe(&self, listener: impl Fn(&DomainEvent) + Send + Sync + 'static) -> SubscriptionId {
        self.inner.subscribers.subscribe(Arc::new(listener))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool { self.inner.subscribers.unsubscribe(id) }
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore").field("wishlist", &*self.inner.read()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn product(id: u64) -> Product { Product::new(id, "Turtle Wax", format!("P{id}"), 1500, 1200) }

    #[test]
    fn test_toggle_persists_and_reloads() {
        let storage = MemoryStore::new();
        let wishlist = WishlistStore::load(Arc::new(storage.clone())).unwrap();
        assert_eq!(wishlist.toggle_item(product(1)).unwrap(), WishlistToggle::Added);
        assert_eq!(wishlist.toggle_item(product(2)).unwrap(), WishlistToggle::Added);
        assert_eq!(wishlist.toggle_item(product(1)).unwrap(), WishlistToggle::Removed);

        let reloaded = WishlistStore::load(Arc::new(storage)).unwrap();
        assert_eq!(reloaded.items(), wishlist.items());
        assert!(reloaded.is_in_wishlist(ProductId::new(2)));
        assert!(!reloaded.is_in_wishlist(ProductId::new(1)));
    }

    #[test]
    fn test_move_to_cart() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let wishlist = WishlistStore::load(storage.clone()).unwrap();
        let cart = CartStore::load(storage).unwrap();
        wishlist.toggle_item(product(4)).unwrap();
        cart.add_item(product(4), 2).unwrap();

        assert!(wishlist.move_to_cart(ProductId::new(4), &cart).unwrap());
        assert_eq!(wishlist.get_count(), 0);
        assert_eq!(cart.get_item(ProductId::new(4)).map(|i| i.quantity), Some(3));

        assert!(!wishlist.move_to_cart(ProductId::new(4), &cart).unwrap());
        assert_eq!(cart.get_total_quantity(), 3);
    }

    #[test]
    fn test_remove_absent_notifies_nobody() {
        let wishlist = WishlistStore::load(Arc::new(MemoryStore::new())).unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        wishlist.subscribe(move |_| { counter.fetch_add(1, Ordering::SeqCst); });

        wishlist.remove_item(ProductId::new(9)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        wishlist.toggle_item(product(9)).unwrap();
        wishlist.remove_item(ProductId::new(9)).unwrap();
        wishlist.remove_item(ProductId::new(9)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
