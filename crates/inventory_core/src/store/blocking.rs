use super::{StoreInner, StoreResult};
use crate::model::item::{Item, ItemId};

/// Synchronous view of an [`super::ItemStore`].
///
/// Calls block the current thread on the connection lock and SQLite I/O.
/// Mutations still notify live queries.
pub struct BlockingItemStore<'store> {
    inner: &'store StoreInner,
}

impl<'store> BlockingItemStore<'store> {
    pub(super) fn new(inner: &'store StoreInner) -> Self {
        Self { inner }
    }

    /// Persists a new item; duplicate ids fail.
    pub fn insert(&self, item: &Item) -> StoreResult<()> {
        self.inner.insert(item)
    }

    /// Overwrites the item with the same id. Returns `false` when absent.
    pub fn update(&self, item: &Item) -> StoreResult<bool> {
        self.inner.update(item)
    }

    /// Removes the item matching `item.id`. Returns `false` when absent.
    pub fn delete(&self, item: &Item) -> StoreResult<bool> {
        self.inner.delete(item.id)
    }

    /// Current value of one item.
    pub fn get_item(&self, id: ItemId) -> StoreResult<Option<Item>> {
        self.inner.run(|repo| repo.get_item(id))
    }

    /// Every item, ordered by ascending id.
    pub fn get_all_items(&self) -> StoreResult<Vec<Item>> {
        self.inner.run(|repo| repo.list_items())
    }
}
