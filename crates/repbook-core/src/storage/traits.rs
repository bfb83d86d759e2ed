//! Key-value store trait definition.
//!
//! The `KeyValueStore` trait is the only boundary between Repbook and the
//! medium its data lives on. Values are opaque strings; serialization is the
//! job of [`crate::storage::Store`].

use crate::error::Result;

/// Synchronous string key-value storage.
///
/// All implementations must ensure:
/// - A successful `set_raw` is durable before it returns
/// - Writes overwrite unconditionally (last write wins)
/// - Removing a missing key is not an error
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    fn get_raw(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set_raw(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`.
    fn remove(&self, key: &str) -> Result<()>;

    /// List every key currently stored, in ascending order.
    fn keys(&self) -> Result<Vec<String>>;

    /// List keys beginning with `prefix`.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(prefix))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn(_store: &dyn KeyValueStore) {}
    }
}
