//! # Repbook Core
//!
//! Core library for Repbook - a local-first workout log for one trainee:
//! strength sessions recorded set by set, cardio, body measurements and
//! progress series.
//!
//! This crate provides the storage abstractions, the in-progress draft cache,
//! the domain aggregates and the analytics, independent of the CLI.
//!
//! ## Architecture
//!
//! - **storage**: key-value store trait, SQLite and in-memory backends, typed access
//! - **keys**: install namespace and the persisted key layout
//! - **model**: plans, history entries, measurements, cardio, settings
//! - **drafts**: per-input draft cache and "last result" lookups
//! - **session**: active workout lifecycle and finalization
//! - **history** / **measurements** / **cardio**: aggregate operations
//! - **progress** / **tools** / **timer**: analytics and helpers
//! - **backup**: whole-profile JSON snapshot export and import
//! - **app**: the application-state handle passed to every view

pub mod app;
pub mod backup;
pub mod cardio;
pub mod defaults;
pub mod drafts;
pub mod error;
pub mod fs;
pub mod history;
pub mod keys;
pub mod measurements;
pub mod model;
pub mod plans;
pub mod progress;
pub mod session;
pub mod storage;
pub mod timer;
pub mod tools;

pub use app::AppState;
pub use error::{RepbookError, Result};
pub use keys::Namespace;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, Store};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
