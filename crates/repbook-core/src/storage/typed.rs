//! Typed access on top of a raw key-value backend.
//!
//! Reads never fail: a missing key, the literal `undefined`, a malformed
//! payload or a backend error all resolve to the caller's default. The
//! recovered corruption is logged so it does not disappear silently.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::storage::traits::KeyValueStore;

/// Marker some writers left behind for "no value".
const UNDEFINED: &str = "undefined";

/// JSON-serializing wrapper around a [`KeyValueStore`].
pub struct Store<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> Store<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Raw string under `key`; backend failures read as absent.
    pub fn raw(&self, key: &str) -> Option<String> {
        match self.backend.get_raw(key) {
            Ok(Some(value)) if value != UNDEFINED => Some(value),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "read failed, treating key as absent");
                None
            }
        }
    }

    /// Decode the value under `key`, or build the default.
    pub fn get_or<T, F>(&self, key: &str, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let Some(raw) = self.raw(key) else {
            return default();
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value is malformed, using default");
                default()
            }
        }
    }

    /// Decode the value under `key`, or `T::default()`.
    pub fn get_or_default<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        self.get_or(key, T::default)
    }

    /// Serialize `value` as JSON and write it under `key`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.backend.set_raw(key, &json)
    }

    /// Write a string verbatim, without JSON encoding.
    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.backend.set_raw(key, value)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.backend.remove(key)
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        self.backend.keys()
    }

    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        self.backend.keys_with_prefix(prefix)
    }
}
