//! Persistent, subscribable engines.
//!
//! Each store owns one aggregate, writes the entire collection through to the
//! [`KeyValueStore`] after every change and then notifies its listeners.
//! Stores are built once per application and shared by `Arc`.

mod cart_store;
mod wishlist_store;

pub use cart_store::CartStore;
pub use wishlist_store::WishlistStore;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::domain::aggregates::{Cart, Wishlist};
use crate::domain::events::DomainEvent;
use crate::storage::{self, KeyValueStore, StorageError};

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&DomainEvent) + Send + Sync>;

#[derive(Default)]
struct Subscribers {
    next_id: AtomicU64,
    listeners: RwLock<Vec<(SubscriptionId, Listener)>>,
}

impl Subscribers {
    fn subscribe(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().unwrap_or_else(PoisonError::into_inner).push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    fn notify(&self, events: &[DomainEvent]) {
        // Snapshot first so listeners may read the store or (un)subscribe.
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for event in events {
            for listener in &listeners {
                listener(event);
            }
        }
    }
}

/// Aggregates that can be persisted as a whole and report what changed.
trait Persisted: Clone + Default + Serialize + DeserializeOwned {
    fn take_events(&mut self) -> Vec<DomainEvent>;
}

impl Persisted for Cart {
    fn take_events(&mut self) -> Vec<DomainEvent> { Cart::take_events(self) }
}

impl Persisted for Wishlist {
    fn take_events(&mut self) -> Vec<DomainEvent> { Wishlist::take_events(self) }
}

/// Write-through wrapper shared by the cart and wishlist stores.
struct WriteThrough<T> {
    key: &'static str,
    storage: Arc<dyn KeyValueStore>,
    state: RwLock<T>,
    subscribers: Subscribers,
}

impl<T: Persisted> WriteThrough<T> {
    fn load(storage: Arc<dyn KeyValueStore>, key: &'static str) -> Result<Self, StorageError> {
        let state: T = storage::load_or_default(storage.as_ref(), key)?;
        Ok(Self { key, storage, state: RwLock::new(state), subscribers: Subscribers::default() })
    }

    // State is only ever replaced wholesale, so a poisoned lock still guards
    // a consistent value.
    fn read(&self) -> RwLockReadGuard<'_, T> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `f` to a copy, persists the copy, then commits it.
    ///
    /// On a failed write the in-memory state is left exactly as it was.
    fn mutate<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, StorageError> {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = guard.clone();
        let out = f(&mut next);
        let events = next.take_events();
        if events.is_empty() {
            return Ok(out);
        }

        if let Err(e) = storage::save(self.storage.as_ref(), self.key, &next) {
            warn!(key = self.key, error = %e, "persisting failed; previous state kept");
            return Err(e);
        }
        *guard = next;
        drop(guard);

        debug!(key = self.key, events = events.len(), "state committed");
        self.subscribers.notify(&events);
        Ok(out)
    }
}
