//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the synchronous data access contract for items.
//! - Isolate SQLite query details from the async store.
//!
//! # Invariants
//! - Repository writes must enforce `Item::validate()` before persistence.
//! - Missing rows on update/delete are reported as `false`, not as errors.

pub mod item_repo;
