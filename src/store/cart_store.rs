//! Persistent Cart Engine

use std::sync::Arc;

use tracing::info;

use super::{SubscriptionId, WriteThrough};
use crate::domain::aggregates::{Cart, CartItem, Product};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::{Money, ProductId};
use crate::storage::{KeyValueStore, StorageError, CART_KEY};

pub struct CartStore {
    inner: WriteThrough<Cart>,
}

impl CartStore {
    /// Restores the cart persisted under `"cart"`, or starts empty.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let inner = WriteThrough::<Cart>::load(storage, CART_KEY)?;
        info!(items = inner.read().item_count(), "cart loaded");
        Ok(Self { inner })
    }

    pub fn add_item(&self, product: Product, quantity: u32) -> Result<(), StorageError> {
        self.inner.mutate(|cart| cart.add_item(product, quantity))
    }

    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) -> Result<(), StorageError> {
        self.inner.mutate(|cart| cart.update_quantity(product_id, quantity))
    }

    pub fn remove_item(&self, product_id: ProductId) -> Result<(), StorageError> {
        self.inner.mutate(|cart| cart.remove_item(product_id))
    }

    pub fn clear_cart(&self) -> Result<(), StorageError> {
        self.inner.mutate(Cart::clear)
    }

    pub fn get_total(&self) -> Money { self.inner.read().total() }
    pub fn get_item_count(&self) -> usize { self.inner.read().item_count() }
    pub fn get_total_quantity(&self) -> u64 { self.inner.read().total_quantity() }
    pub fn is_empty(&self) -> bool { self.inner.read().is_empty() }
    pub fn items(&self) -> Vec<CartItem> { self.inner.read().items().to_vec() }
    pub fn get_item(&self, product_id: ProductId) -> Option<CartItem> { self.inner.read().get_item(product_id).cloned() }

    /// Point-in-time copy of the whole cart.
    pub fn snapshot(&self) -> Cart { self.inner.read().clone() }

    pub fn subscribe(&self, listener: impl Fn(&DomainEvent) + Send + Sync + 'static) -> SubscriptionId {
        self.inner.subscribers.subscribe(Arc::new(listener))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool { self.inner.subscribers.unsubscribe(id) }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore").field("cart", &*self.inner.read()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::CartEvent;
    use crate::storage::MemoryStore;
    use serde_json::Value;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    fn product(id: u64, price: u64) -> Product { Product::new(id, "Acme", format!("P{id}"), price, price) }

    /// Store whose writes can be switched off to simulate a full disk.
    #[derive(Debug, Default)]
    struct FlakyStore { inner: MemoryStore, fail: AtomicBool }

    impl KeyValueStore for FlakyStore {
        fn read(&self, key: &str) -> Result<Option<Value>, StorageError> { self.inner.read(key) }
        fn write(&self, key: &str, value: &Value) -> Result<(), StorageError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StorageError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")));
            }
            self.inner.write(key, value)
        }
    }

    #[test]
    fn test_every_mutation_is_written_through() {
        let storage = MemoryStore::new();
        let cart = CartStore::load(Arc::new(storage.clone())).unwrap();
        cart.add_item(product(1, 500), 2).unwrap();
        cart.add_item(product(2, 300), 1).unwrap();
        cart.update_quantity(ProductId::new(2), 4).unwrap();

        let persisted = storage.read(CART_KEY).unwrap().unwrap();
        assert_eq!(persisted["items"].as_array().unwrap().len(), 2);
        assert_eq!(persisted["items"][1]["quantity"], 4);
        assert_eq!(cart.get_total(), Money::new(2200));
    }

    #[test]
    fn test_failed_write_keeps_previous_state() {
        let storage = Arc::new(FlakyStore::default());
        let cart = CartStore::load(storage.clone()).unwrap();
        cart.add_item(product(1, 100), 1).unwrap();

        storage.fail.store(true, Ordering::SeqCst);
        assert!(cart.add_item(product(2, 100), 1).is_err());
        assert!(cart.clear_cart().is_err());
        assert_eq!(cart.get_item_count(), 1);
        assert_eq!(cart.get_total(), Money::new(100));
    }

    #[test]
    fn test_subscribers_see_committed_changes() {
        let cart = Arc::new(CartStore::load(Arc::new(MemoryStore::new())).unwrap());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let reader = Arc::clone(&cart);
        let id = cart.subscribe(move |event| {
            sink.lock().unwrap().push((event.clone(), reader.get_item_count()));
        });

        cart.add_item(product(1, 10), 1).unwrap();
        cart.update_quantity(ProductId::new(1), 0).unwrap(); // no-op, no event
        cart.remove_item(ProductId::new(1)).unwrap();
        assert!(cart.unsubscribe(id));
        cart.add_item(product(2, 10), 1).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], (DomainEvent::Cart(CartEvent::ItemAdded { product_id: ProductId::new(1), quantity: 1 }), 1));
        assert_eq!(seen[1], (DomainEvent::Cart(CartEvent::ItemRemoved { product_id: ProductId::new(1) }), 0));
    }

    #[test]
    fn test_reload_restores_snapshot() {
        let storage = MemoryStore::new();
        let cart = CartStore::load(Arc::new(storage.clone())).unwrap();
        cart.add_item(product(3, 250), 3).unwrap();
        cart.add_item(product(1, 100), 1).unwrap();

        let reloaded = CartStore::load(Arc::new(storage)).unwrap();
        assert_eq!(reloaded.items(), cart.items());
        assert_eq!(reloaded.get_total_quantity(), 4);
    }
}
