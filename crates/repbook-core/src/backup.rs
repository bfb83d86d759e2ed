//! Whole-profile JSON backups.
//!
//! A backup is a flat JSON object mapping store keys to their raw string
//! values: every key of the profile namespace plus the settings key.
//! Drafts are never included. Restoring overwrites each key in the file
//! and leaves every other key alone.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{RepbookError, Result};
use crate::fs;
use crate::keys::{Namespace, SETTINGS_KEY, TEMP_PREFIX};
use crate::storage::{KeyValueStore, Store};

/// Key -> raw stored value.
pub type Snapshot = BTreeMap<String, String>;

fn whitespace_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is a valid regex"))
}

/// Replace each run of whitespace with a single `_`.
pub fn underscore_whitespace(name: &str) -> String {
    whitespace_run().replace_all(name, "_").into_owned()
}

/// `backup_<name>_<YYYY-MM-DD>.json`
pub fn backup_filename(display_name: &str, date: NaiveDate) -> String {
    format!(
        "backup_{}_{}.json",
        underscore_whitespace(display_name),
        date.format("%Y-%m-%d")
    )
}

/// Collect every key a backup of `namespace` contains.
pub fn export_snapshot<S: KeyValueStore>(store: &Store<S>, namespace: &Namespace) -> Result<Snapshot> {
    let mut snapshot = Snapshot::new();
    for key in store.keys()? {
        if key.starts_with(TEMP_PREFIX) {
            continue;
        }
        if !(namespace.owns(&key) || key == SETTINGS_KEY) {
            continue;
        }
        if let Some(value) = store.backend().get_raw(&key)? {
            snapshot.insert(key, value);
        }
    }
    Ok(snapshot)
}

/// Export `namespace` to `path` atomically; returns the number of keys.
pub fn write_backup<S: KeyValueStore>(
    store: &Store<S>,
    namespace: &Namespace,
    path: &Path,
) -> Result<usize> {
    let snapshot = export_snapshot(store, namespace)?;
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write_atomic(path, json.as_bytes())?;
    tracing::info!(path = %path.display(), keys = snapshot.len(), "exported backup");
    Ok(snapshot.len())
}

/// Parse backup text into the key/value pairs it will write.
///
/// String values are taken verbatim; any other JSON value is stored as its
/// JSON text.
pub fn parse_snapshot(json: &str) -> Result<Snapshot> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| RepbookError::InvalidInput(format!("Backup is not valid JSON: {}", e)))?;
    let serde_json::Value::Object(object) = value else {
        return Err(RepbookError::InvalidInput(
            "Backup must be a JSON object of keys to values".to_string(),
        ));
    };

    Ok(object
        .into_iter()
        .map(|(key, value)| {
            let raw = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, raw)
        })
        .collect())
}

/// Write every key of `json` to the store; returns how many were written.
///
/// Nothing is written unless the whole text parses. Callers reload their
/// in-memory state afterwards.
pub fn import_snapshot<S: KeyValueStore>(store: &Store<S>, json: &str) -> Result<usize> {
    let snapshot = parse_snapshot(json)?;
    for (key, value) in &snapshot {
        store.set_raw(key, value)?;
    }
    tracing::info!(keys = snapshot.len(), "imported backup");
    Ok(snapshot.len())
}

pub fn import_file<S: KeyValueStore>(store: &Store<S>, path: &Path) -> Result<usize> {
    let json = std::fs::read_to_string(path)?;
    import_snapshot(store, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn seeded() -> (Store<MemoryStore>, Namespace) {
        let store = Store::new(MemoryStore::new());
        store.set_raw("wk", "{}").unwrap();
        store.set_raw("wk_history_gora", "[]").unwrap();
        store.set_raw("app_settings", r#"{"volume":0.5,"soundType":"beep2"}"#).unwrap();
        store.set_raw("app_logo", "data:image/png;base64,AA==").unwrap();
        store.set_raw("temp_input_gora_g_1_s1_kg", "100").unwrap();
        store.set_raw("other_wk", "keep").unwrap();
        store.set_raw("wkx_cardio", "[]").unwrap();
        (store, Namespace::new("wk").unwrap())
    }

    #[test]
    fn test_export_selects_profile_keys() {
        let (store, ns) = seeded();
        let snapshot = export_snapshot(&store, &ns).unwrap();
        assert_eq!(
            snapshot.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["app_settings", "wk", "wk_history_gora"]
        );
    }

    #[test]
    fn test_filename() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert_eq!(
            backup_filename("Damian B.", date),
            "backup_Damian_B._2025-03-04.json"
        );
    }

    #[test]
    fn test_import_rejects_non_objects() {
        let (store, _) = seeded();
        assert!(import_snapshot(&store, "[1,2]").is_err());
        assert!(import_snapshot(&store, "not json").is_err());
        assert_eq!(store.raw("wk").as_deref(), Some("{}"));
    }

    #[test]
    fn test_import_overwrites_and_keeps_others() {
        let (store, _) = seeded();
        let written = import_snapshot(
            &store,
            r#"{"wk":"{\"x\":1}","wk_cardio":[{"id":"1"}],"new_key":"v"}"#,
        )
        .unwrap();
        assert_eq!(written, 3);
        assert_eq!(store.raw("wk").as_deref(), Some(r#"{"x":1}"#));
        assert_eq!(store.raw("wk_cardio").as_deref(), Some(r#"[{"id":"1"}]"#));
        assert_eq!(store.raw("other_wk").as_deref(), Some("keep"));
    }
}
