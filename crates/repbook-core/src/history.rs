//! Per-plan workout history.
//!
//! Each plan's history is a list stored newest first. Indices used by the
//! edit and delete operations are positions in that stored order, which is
//! also the order [`HistoryLog::list`] returns.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone};

use crate::error::{RepbookError, Result};
use crate::keys::Namespace;
use crate::model::{WorkoutHistoryEntry, WorkoutPlan};
use crate::storage::{KeyValueStore, Store};

/// `DD.MM.YYYY, HH:MM` in the zone of `at`.
pub fn display_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%d.%m.%Y, %H:%M").to_string()
}

pub struct HistoryLog<'a, S: KeyValueStore> {
    store: &'a Store<S>,
    namespace: &'a Namespace,
}

impl<'a, S: KeyValueStore> HistoryLog<'a, S> {
    pub fn new(store: &'a Store<S>, namespace: &'a Namespace) -> Self {
        Self { store, namespace }
    }

    /// Entries of `plan_id`, newest first.
    pub fn list(&self, plan_id: &str) -> Vec<WorkoutHistoryEntry> {
        self.store.get_or_default(&self.namespace.history_key(plan_id))
    }

    pub fn save(&self, plan_id: &str, entries: &[WorkoutHistoryEntry]) -> Result<()> {
        self.store.set(&self.namespace.history_key(plan_id), entries)
    }

    /// Put `entry` at the front of the plan's history.
    pub fn prepend(&self, plan_id: &str, entry: WorkoutHistoryEntry) -> Result<()> {
        let mut entries = self.list(plan_id);
        entries.insert(0, entry);
        self.save(plan_id, &entries)
    }

    /// Record a workout after the fact; the list is re-sorted by timestamp.
    pub fn add_manual(
        &self,
        plan_id: &str,
        date: impl Into<String>,
        timestamp: i64,
        results: BTreeMap<String, String>,
    ) -> Result<WorkoutHistoryEntry> {
        let date = date.into();
        if date.trim().is_empty() {
            return Err(RepbookError::Validation("Date is required".to_string()));
        }
        let entry = WorkoutHistoryEntry {
            date,
            timestamp,
            results,
            sets: BTreeMap::new(),
        };

        let mut entries = self.list(plan_id);
        entries.insert(0, entry.clone());
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.save(plan_id, &entries)?;
        tracing::info!(plan = plan_id, timestamp, "added manual history entry");
        Ok(entry)
    }

    /// Replace the display date of the entry at `index`.
    pub fn edit_date(&self, plan_id: &str, index: usize, date: impl Into<String>) -> Result<()> {
        let date = date.into();
        if date.trim().is_empty() {
            return Err(RepbookError::Validation("Date is required".to_string()));
        }
        let mut entries = self.list(plan_id);
        let len = entries.len();
        let entry = entries
            .get_mut(index)
            .ok_or_else(|| out_of_range(plan_id, index, len))?;
        entry.date = date;
        self.save(plan_id, &entries)
    }

    /// Remove and return the entry at `index`.
    pub fn delete(&self, plan_id: &str, index: usize) -> Result<WorkoutHistoryEntry> {
        let mut entries = self.list(plan_id);
        if index >= entries.len() {
            return Err(out_of_range(plan_id, index, entries.len()));
        }
        let removed = entries.remove(index);
        self.save(plan_id, &entries)?;
        tracing::info!(plan = plan_id, index, "deleted history entry");
        Ok(removed)
    }
}

fn out_of_range(plan_id: &str, index: usize, len: usize) -> RepbookError {
    RepbookError::NotFound(format!(
        "History entry at index {} of plan '{}' (plan has {} entries)",
        index, plan_id, len
    ))
}

/// Results paired with exercise names from `plan`, falling back to the id.
pub fn named_results(entry: &WorkoutHistoryEntry, plan: Option<&WorkoutPlan>) -> Vec<(String, String)> {
    entry
        .results
        .iter()
        .map(|(exercise_id, result)| {
            let name = plan
                .and_then(|p| p.exercise(exercise_id))
                .map(|ex| ex.name.clone())
                .unwrap_or_else(|| exercise_id.clone());
            (name, result.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::{FixedOffset, TimeZone};

    fn fixture() -> (Store<MemoryStore>, Namespace) {
        (Store::new(MemoryStore::new()), Namespace::new("t").unwrap())
    }

    #[test]
    fn test_display_date() {
        let at = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 4, 7, 5, 0)
            .unwrap();
        assert_eq!(display_date(&at), "04.03.2025, 07:05");
    }

    #[test]
    fn test_manual_entries_stay_sorted() {
        let (store, ns) = fixture();
        let log = HistoryLog::new(&store, &ns);
        log.add_manual("gora", "02.01.2025", 2_000, BTreeMap::new()).unwrap();
        log.add_manual("gora", "01.01.2025", 1_000, BTreeMap::new()).unwrap();
        log.add_manual("gora", "03.01.2025", 3_000, BTreeMap::new()).unwrap();

        let stamps: Vec<i64> = log.list("gora").iter().map(|e| e.timestamp).collect();
        assert_eq!(stamps, vec![3_000, 2_000, 1_000]);
    }

    #[test]
    fn test_edit_and_delete_by_index() {
        let (store, ns) = fixture();
        let log = HistoryLog::new(&store, &ns);
        log.add_manual("dol", "a", 2, BTreeMap::new()).unwrap();
        log.add_manual("dol", "b", 1, BTreeMap::new()).unwrap();

        log.edit_date("dol", 1, "fixed").unwrap();
        assert_eq!(log.list("dol")[1].date, "fixed");

        let removed = log.delete("dol", 0).unwrap();
        assert_eq!(removed.date, "a");
        assert_eq!(log.list("dol").len(), 1);

        assert!(log.delete("dol", 5).unwrap_err().is_not_found());
        assert!(log.edit_date("dol", 0, "  ").is_err());
    }

    #[test]
    fn test_named_results_fall_back_to_id() {
        let plan = crate::defaults::default_plan("gora").unwrap();
        let entry = WorkoutHistoryEntry {
            date: "x".to_string(),
            timestamp: 0,
            results: BTreeMap::from([
                ("g_1".to_string(), "100kg x 5".to_string()),
                ("gone".to_string(), "8p".to_string()),
            ]),
            sets: BTreeMap::new(),
        };
        let named = named_results(&entry, Some(&plan));
        assert_eq!(named[0].0, plan.exercises[0].name);
        assert_eq!(named[1], ("gone".to_string(), "8p".to_string()));
    }
}
