//! Async item store with live queries.
//!
//! # Responsibility
//! - Expose insert/update/delete and live `get_item`/`get_all_items` queries
//!   over the `items` table.
//! - Run blocking SQLite work on tokio's blocking pool.
//! - Notify live queries after every mutation that changed a row.
//!
//! # Invariants
//! - One connection per store, guarded by a mutex; the engine sees
//!   serialized writers.
//! - The change version only increases. It is bumped after each effective
//!   mutation and once on close.
//! - After `close`, every operation fails with `StoreError::Closed` and live
//!   queries end.

mod blocking;
mod error;
mod live;

pub use blocking::BlockingItemStore;
pub use error::{StoreError, StoreResult};
pub use live::LiveQuery;

use crate::config::StoreConfig;
use crate::db::open_db_with;
use crate::model::item::{Item, ItemId};
use crate::repo::item_repo::{ItemRepository, RepoResult, SqliteItemRepository};
use log::{debug, info, warn};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tokio::sync::watch;
use tokio::task;

/// Data access entry point for inventory items.
///
/// Cloning is cheap; clones share the same connection and change feed.
#[derive(Clone)]
pub struct ItemStore {
    inner: Arc<StoreInner>,
}

impl ItemStore {
    /// Opens the configured database, applies migrations and returns a store.
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        let allow_blocking_calls = config.allow_blocking_calls;
        let conn = task::spawn_blocking(move || open_db_with(&config)).await??;
        Ok(Self::from_connection(conn, allow_blocking_calls))
    }

    /// Wraps an already bootstrapped connection.
    ///
    /// The caller is responsible for having applied migrations, e.g. via
    /// [`crate::db::open_db`].
    pub fn from_connection(conn: Connection, allow_blocking_calls: bool) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            inner: Arc::new(StoreInner {
                conn: Mutex::new(Some(conn)),
                changes,
                allow_blocking_calls,
            }),
        }
    }

    /// Persists a new item. Fails with `RepoError::DuplicateId` when the id is
    /// already present.
    pub async fn insert(&self, item: &Item) -> StoreResult<()> {
        let item = item.clone();
        self.spawn(move |inner| inner.insert(&item)).await
    }

    /// Overwrites the stored item with the same id. Returns `false` when no
    /// such item exists.
    pub async fn update(&self, item: &Item) -> StoreResult<bool> {
        let item = item.clone();
        self.spawn(move |inner| inner.update(&item)).await
    }

    /// Removes the stored item matching `item.id`. Returns `false` when no
    /// such item exists.
    pub async fn delete(&self, item: &Item) -> StoreResult<bool> {
        self.delete_by_id(item.id).await
    }

    /// Removes the stored item with `id`. Returns `false` when it is absent.
    pub async fn delete_by_id(&self, id: ItemId) -> StoreResult<bool> {
        self.spawn(move |inner| inner.delete(id)).await
    }

    /// Live query for one item; yields `None` while it is absent.
    pub fn get_item(&self, id: ItemId) -> LiveQuery<Option<Item>> {
        LiveQuery::new(Arc::clone(&self.inner), move |repo| repo.get_item(id))
    }

    /// Live query for every item, ordered by ascending id.
    pub fn get_all_items(&self) -> LiveQuery<Vec<Item>> {
        LiveQuery::new(Arc::clone(&self.inner), |repo| repo.list_items())
    }

    /// Returns a synchronous handle for use from test code.
    ///
    /// # Errors
    /// - `StoreError::BlockingCallsDisabled` unless the store was opened with
    ///   `StoreConfig::allow_blocking_calls`.
    pub fn blocking(&self) -> StoreResult<BlockingItemStore<'_>> {
        if !self.inner.allow_blocking_calls {
            return Err(StoreError::BlockingCallsDisabled);
        }
        Ok(BlockingItemStore::new(&self.inner))
    }

    /// Releases the underlying connection.
    ///
    /// Closing twice is a no-op. A failure is returned to the caller; the
    /// connection is dropped either way.
    pub async fn close(&self) -> StoreResult<()> {
        self.spawn(|inner| inner.close()).await
    }

    /// Whether `close` has released the connection.
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    async fn spawn<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&StoreInner) -> StoreResult<T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        task::spawn_blocking(move || f(&inner)).await?
    }
}

pub(crate) struct StoreInner {
    conn: Mutex<Option<Connection>>,
    changes: watch::Sender<u64>,
    allow_blocking_calls: bool,
}

impl StoreInner {
    fn insert(&self, item: &Item) -> StoreResult<()> {
        self.mutate("insert", item.id, |repo| repo.insert_item(item).map(|()| true))
            .map(|_| ())
    }

    fn update(&self, item: &Item) -> StoreResult<bool> {
        self.mutate("update", item.id, |repo| repo.update_item(item))
    }

    fn delete(&self, id: ItemId) -> StoreResult<bool> {
        self.mutate("delete", id, |repo| repo.delete_item(id))
    }

    /// Runs a read against the live connection.
    pub(crate) fn run<T>(
        &self,
        f: impl FnOnce(&dyn ItemRepository) -> RepoResult<T>,
    ) -> StoreResult<T> {
        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or(StoreError::Closed)?;
        let repo = SqliteItemRepository::new(conn);
        Ok(f(&repo)?)
    }

    fn mutate(
        &self,
        op: &'static str,
        id: ItemId,
        f: impl FnOnce(&dyn ItemRepository) -> RepoResult<bool>,
    ) -> StoreResult<bool> {
        let started_at = Instant::now();
        match self.run(f) {
            Ok(changed) => {
                debug!(
                    "event=item_{} module=store status=ok id={} changed={} duration_ms={}",
                    op,
                    id,
                    changed,
                    started_at.elapsed().as_millis()
                );
                if changed {
                    self.notify();
                }
                Ok(changed)
            }
            Err(err) => {
                warn!(
                    "event=item_{} module=store status=error id={} duration_ms={} error={}",
                    op,
                    id,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn close(&self) -> StoreResult<()> {
        let Some(conn) = self.lock()?.take() else {
            return Ok(());
        };
        let result = conn.close().map_err(|(_, err)| StoreError::Close(err));
        match &result {
            Ok(()) => info!("event=store_close module=store status=ok"),
            Err(err) => warn!("event=store_close module=store status=error error={err}"),
        }
        self.notify();
        result
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.conn.lock().map_or(true, |guard| guard.is_none())
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    fn notify(&self) {
        self.changes
            .send_modify(|version| *version = version.wrapping_add(1));
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Option<Connection>>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}
