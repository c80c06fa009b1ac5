//! Store construction options.
//!
//! # Responsibility
//! - Select in-memory or file-backed storage explicitly at construction time.
//! - Carry connection tuning and the test-only blocking-call switch.
//!
//! # Invariants
//! - `from_env` never fails; an unset or blank `INVENTORY_DB_PATH` falls back
//!   to a file in the system temp directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable consulted by [`StoreConfig::from_env`].
pub const DB_PATH_ENV: &str = "INVENTORY_DB_PATH";

const DEFAULT_DB_FILE_NAME: &str = "inventory.sqlite3";
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the persistence engine keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    /// Non-durable database that disappears when the store is closed.
    InMemory,
    /// SQLite database file at the given path.
    File(PathBuf),
}

/// Configuration consumed by [`crate::ItemStore::open`] and
/// [`crate::db::open_db_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage: Storage,
    pub busy_timeout: Duration,
    /// Allows [`crate::ItemStore::blocking`] to hand out a synchronous handle.
    /// Meant for tests only.
    pub allow_blocking_calls: bool,
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self::with_storage(Storage::InMemory)
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::with_storage(Storage::File(path.as_ref().to_path_buf()))
    }

    /// Builds a file-backed config from `INVENTORY_DB_PATH`.
    pub fn from_env() -> Self {
        Self::file(resolve_db_path(std::env::var(DB_PATH_ENV).ok().as_deref()))
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn allow_blocking_calls(mut self) -> Self {
        self.allow_blocking_calls = true;
        self
    }

    /// Short label used in log events.
    pub fn mode_label(&self) -> &'static str {
        match self.storage {
            Storage::InMemory => "memory",
            Storage::File(_) => "file",
        }
    }

    fn with_storage(storage: Storage) -> Self {
        Self {
            storage,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            allow_blocking_calls: false,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn resolve_db_path(raw: Option<&str>) -> PathBuf {
    if let Some(raw) = raw {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{resolve_db_path, Storage, StoreConfig, DEFAULT_DB_FILE_NAME};
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn defaults_to_in_memory_without_blocking_calls() {
        let config = StoreConfig::default();
        assert_eq!(config.storage, Storage::InMemory);
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
        assert!(!config.allow_blocking_calls);
        assert_eq!(config.mode_label(), "memory");
    }

    #[test]
    fn builder_methods_override_defaults() {
        let config = StoreConfig::file("/tmp/stock.db")
            .with_busy_timeout(Duration::from_millis(250))
            .allow_blocking_calls();
        assert_eq!(config.storage, Storage::File(PathBuf::from("/tmp/stock.db")));
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert!(config.allow_blocking_calls);
        assert_eq!(config.mode_label(), "file");
    }

    #[test]
    fn resolve_db_path_trims_and_falls_back_on_blank() {
        assert_eq!(
            resolve_db_path(Some("  /data/inv.db \n")),
            PathBuf::from("/data/inv.db")
        );

        let fallback = std::env::temp_dir().join(DEFAULT_DB_FILE_NAME);
        assert_eq!(resolve_db_path(Some("   ")), fallback);
        assert_eq!(resolve_db_path(None), fallback);
    }
}
