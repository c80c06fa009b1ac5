use super::{StoreError, StoreInner, StoreResult};
use crate::repo::item_repo::{ItemRepository, RepoResult};
use futures::Stream;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task;

type QueryFn<T> = dyn Fn(&dyn ItemRepository) -> RepoResult<T> + Send + Sync;

/// A query that re-runs whenever the `items` table changes.
///
/// The first call to [`LiveQuery::next`] yields the current result without
/// waiting. Later calls wait for the next change and yield the fresh result.
/// Changes that land between two polls are coalesced into one emission.
pub struct LiveQuery<T> {
    inner: Arc<StoreInner>,
    changes: watch::Receiver<u64>,
    query: Arc<QueryFn<T>>,
    primed: bool,
    ended: bool,
}

impl<T> LiveQuery<T>
where
    T: Send + 'static,
{
    pub(crate) fn new(
        inner: Arc<StoreInner>,
        query: impl Fn(&dyn ItemRepository) -> RepoResult<T> + Send + Sync + 'static,
    ) -> Self {
        let changes = inner.subscribe();
        Self {
            inner,
            changes,
            query: Arc::new(query),
            primed: false,
            ended: false,
        }
    }

    /// Waits for the next emission.
    ///
    /// Returns `None` once the store has been closed, and on every call after
    /// that.
    pub async fn next(&mut self) -> Option<StoreResult<T>> {
        if self.ended || (self.primed && self.inner.is_closed()) {
            self.ended = true;
            return None;
        }
        if self.primed {
            self.changes.changed().await.ok()?;
        } else {
            self.primed = true;
        }
        self.changes.borrow_and_update();

        let inner = Arc::clone(&self.inner);
        let query = Arc::clone(&self.query);
        let result = match task::spawn_blocking(move || inner.run(|repo| query(repo))).await {
            Ok(result) => result,
            Err(err) => Err(err.into()),
        };

        match result {
            Err(StoreError::Closed) => {
                self.ended = true;
                None
            }
            other => Some(other),
        }
    }

    /// Returns the current result, i.e. the first emission.
    pub async fn first(mut self) -> StoreResult<T> {
        self.next().await.unwrap_or(Err(StoreError::Closed))
    }

    /// Adapts this live query into a `Stream` that ends when the store closes.
    pub fn into_stream(self) -> impl Stream<Item = StoreResult<T>> + Send {
        futures::stream::unfold(self, |mut live| async move {
            let item = live.next().await?;
            Some((item, live))
        })
    }
}
