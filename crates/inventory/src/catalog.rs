//! In-memory catalog of purchasable items.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use shopfront_core::{DomainError, DomainResult, ItemId};

use crate::item::Item;

/// Canonical item table.
///
/// Every mutation happens under the write lock, so `load` swaps the whole table
/// at once and concurrent `try_decrement` calls serialize.
#[derive(Debug, Default)]
pub struct CatalogStore {
    items: RwLock<HashMap<ItemId, Item>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let store = Self::new();
        store.load(items);
        store
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<ItemId, Item>> {
        self.items.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ItemId, Item>> {
        self.items.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the entire catalog. Returns the number of distinct items loaded.
    pub fn load(&self, items: impl IntoIterator<Item = Item>) -> usize {
        // Build the new table before taking the lock.
        let mut table = HashMap::new();
        for item in items {
            if let Some(previous) = table.insert(item.id, item) {
                tracing::warn!(item_id = %previous.id, "duplicate item id in catalog load; keeping last");
            }
        }

        let count = table.len();
        *self.write() = table;
        count
    }

    pub fn get(&self, item_id: &ItemId) -> Option<Item> {
        self.read().get(item_id).cloned()
    }

    /// Atomically take `quantity` units of an item.
    ///
    /// Returns the post-decrement item. Nothing is changed on error.
    pub fn try_decrement(&self, item_id: &ItemId, quantity: u64) -> DomainResult<Item> {
        let mut items = self.write();
        let item = items.get_mut(item_id).ok_or(DomainError::NotFound)?;

        if quantity < 1 || item.quantity < quantity {
            return Err(DomainError::insufficient_stock(quantity, item.quantity));
        }

        item.quantity -= quantity;
        Ok(item.clone())
    }

    /// Snapshot of every item, ordered by id.
    pub fn list(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self.read().values().cloned().collect();
        items.sort_by_key(|item| item.id);
        items
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
