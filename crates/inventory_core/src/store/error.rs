use crate::db::DbError;
use crate::repo::item_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned by [`super::ItemStore`] operations.
#[derive(Debug)]
pub enum StoreError {
    Repo(RepoError),
    Db(DbError),
    /// The store has been closed; no connection is available.
    Closed,
    /// `blocking()` was called on a store opened without
    /// `StoreConfig::allow_blocking_calls`.
    BlockingCallsDisabled,
    LockPoisoned,
    /// Releasing the SQLite connection failed.
    Close(rusqlite::Error),
    /// The blocking worker running the operation panicked or was cancelled.
    Task(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Closed => write!(f, "item store is closed"),
            Self::BlockingCallsDisabled => {
                write!(f, "blocking calls are not enabled for this item store")
            }
            Self::LockPoisoned => write!(f, "item store connection lock is poisoned"),
            Self::Close(err) => write!(f, "failed to close item store: {err}"),
            Self::Task(message) => write!(f, "item store worker failed: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Close(err) => Some(err),
            Self::Closed | Self::BlockingCallsDisabled | Self::LockPoisoned | Self::Task(_) => {
                None
            }
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Task(value.to_string())
    }
}
