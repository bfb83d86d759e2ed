//! Storage abstraction for Repbook.
//!
//! This module defines the `KeyValueStore` trait, its backends and the typed
//! `Store` wrapper the rest of the crate goes through.
//!
//! ## Architecture
//!
//! The storage layer is a flat string-to-string map:
//! - `SqliteStore`: durable, one row per key, every write committed at once
//! - `MemoryStore`: process-local map for tests and dry runs
//!
//! Namespacing lives one level up in [`crate::keys`]; backends know nothing
//! about prefixes. There is no locking across processes: the last write wins.

pub mod memory;
pub mod sqlite;
pub mod traits;
pub mod typed;
pub mod types;

// Re-export public types
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::KeyValueStore;
pub use typed::Store;
pub use types::StoreMetadata;
