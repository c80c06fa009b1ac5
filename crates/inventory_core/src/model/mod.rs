//! Inventory domain model.
//!
//! # Responsibility
//! - Define the canonical `Item` record persisted by the store.
//!
//! # Invariants
//! - Every item is identified by a caller-assigned `ItemId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod item;
