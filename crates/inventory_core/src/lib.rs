//! Local data access layer for inventory items.
//!
//! Items live in a single SQLite table. [`ItemStore`] exposes async CRUD
//! operations plus live queries that re-emit whenever the table changes.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use config::{Storage, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::item::{Item, ItemId, ItemValidationError};
pub use repo::item_repo::{ItemRepository, RepoError, RepoResult, SqliteItemRepository};
pub use store::{BlockingItemStore, ItemStore, LiveQuery, StoreError, StoreResult};

/// Minimal health-check API for smoke tests.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
