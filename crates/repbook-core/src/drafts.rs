//! In-progress workout drafts and "last result" lookups.
//!
//! Every input of an active workout is written to the store as soon as it
//! changes, under [`TEMP_PREFIX`](crate::keys::TEMP_PREFIX). When the
//! session finishes the drafts are folded into a summary string, cached as
//! the exercise's last result and removed.

use crate::error::{RepbookError, Result};
use crate::keys::{self, DraftField, Namespace};
use crate::model::{Exercise, ExerciseType, SetRecord, WorkoutHistoryEntry};
use crate::progress;
use crate::storage::{KeyValueStore, Store};

/// Summary assembled from the drafts of one exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSummary {
    /// Display string, e.g. `100kg x 5 | 8p [Note: easy]`
    pub text: String,
    /// Structured values of every set that contributed
    pub sets: Vec<SetRecord>,
}

/// Draft cache bound to one store and profile.
pub struct DraftCache<'a, S: KeyValueStore> {
    store: &'a Store<S>,
    namespace: &'a Namespace,
}

impl<'a, S: KeyValueStore> DraftCache<'a, S> {
    pub fn new(store: &'a Store<S>, namespace: &'a Namespace) -> Self {
        Self { store, namespace }
    }

    /// Write the draft `key` verbatim.
    pub fn save_temp_input(&self, key: &str, value: &str) -> Result<()> {
        self.store.set_raw(&keys::temp_key(key), value)
    }

    /// Read the draft `key`; empty when absent.
    pub fn get_temp_input(&self, key: &str) -> String {
        self.store.raw(&keys::temp_key(key)).unwrap_or_default()
    }

    pub fn remove_temp_input(&self, key: &str) -> Result<()> {
        self.store.remove(&keys::temp_key(key))
    }

    pub fn save_set_field(
        &self,
        plan_id: &str,
        exercise_id: &str,
        set: u32,
        field: DraftField,
        value: &str,
    ) -> Result<()> {
        self.save_temp_input(&keys::set_input_key(plan_id, exercise_id, set, field), value)
    }

    pub fn get_set_field(&self, plan_id: &str, exercise_id: &str, set: u32, field: DraftField) -> String {
        self.get_temp_input(&keys::set_input_key(plan_id, exercise_id, set, field))
    }

    pub fn save_note(&self, plan_id: &str, exercise_id: &str, note: &str) -> Result<()> {
        self.save_temp_input(&keys::note_key(plan_id, exercise_id), note)
    }

    pub fn get_note(&self, plan_id: &str, exercise_id: &str) -> String {
        self.get_temp_input(&keys::note_key(plan_id, exercise_id))
    }

    /// Last recorded result of an exercise.
    ///
    /// The cached last-result key wins; otherwise history is scanned from
    /// the newest entry for the first non-empty result.
    pub fn get_last_result(&self, plan_id: &str, exercise_id: &str) -> Option<String> {
        if let Some(cached) = self
            .store
            .raw(&self.namespace.last_result_key(plan_id, exercise_id))
            .filter(|value| !value.is_empty())
        {
            return Some(cached);
        }

        let mut history: Vec<WorkoutHistoryEntry> =
            self.store.get_or_default(&self.namespace.history_key(plan_id));
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        history.into_iter().find_map(|entry| {
            entry
                .results
                .get(exercise_id)
                .filter(|result| !result.is_empty())
                .cloned()
        })
    }

    /// Fold the drafts of `exercise` into a summary.
    ///
    /// Returns `None` when no set has anything recorded. A weight without
    /// reps contributes nothing.
    pub fn summarize_exercise(&self, plan_id: &str, exercise: &Exercise) -> Option<ExerciseSummary> {
        let mut parts = Vec::new();
        let mut sets = Vec::new();

        for set in 1..=exercise.sets {
            let kg = self.get_set_field(plan_id, &exercise.id, set, DraftField::Kg);
            let reps = self.get_set_field(plan_id, &exercise.id, set, DraftField::Reps);
            let time = self.get_set_field(plan_id, &exercise.id, set, DraftField::Time);

            let record = if !kg.is_empty() && !reps.is_empty() {
                parts.push(format!("{}kg x {}", kg, reps));
                SetRecord {
                    set,
                    weight_kg: progress::parse_weight(&kg),
                    reps: parse_count(&reps),
                    seconds: None,
                }
            } else if !reps.is_empty() {
                parts.push(format!("{}p", reps));
                SetRecord {
                    set,
                    weight_kg: None,
                    reps: parse_count(&reps),
                    seconds: None,
                }
            } else if !time.is_empty() {
                parts.push(format!("{}s", time));
                SetRecord {
                    set,
                    weight_kg: None,
                    reps: None,
                    seconds: parse_count(&time),
                }
            } else {
                continue;
            };

            if record.weight_kg.is_some() || record.reps.is_some() || record.seconds.is_some() {
                sets.push(record);
            }
        }

        if parts.is_empty() {
            return None;
        }

        let mut text = parts.join(" | ");
        let note = self.get_note(plan_id, &exercise.id);
        if !note.is_empty() {
            text.push_str(&format!(" [Note: {}]", note));
        }
        Some(ExerciseSummary { text, sets })
    }

    /// Cache each exercise's summary as its last result, then drop its drafts.
    pub fn clear_temp_inputs(&self, plan_id: &str, exercises: &[Exercise]) -> Result<()> {
        for exercise in exercises {
            if let Some(summary) = self.summarize_exercise(plan_id, exercise) {
                self.store.set_raw(
                    &self.namespace.last_result_key(plan_id, &exercise.id),
                    &summary.text,
                )?;
            }
            self.drop_exercise_drafts(plan_id, exercise)?;
        }
        tracing::debug!(plan = plan_id, exercises = exercises.len(), "cleared drafts");
        Ok(())
    }

    /// Remove every draft of `exercise` without touching the last result.
    pub fn drop_exercise_drafts(&self, plan_id: &str, exercise: &Exercise) -> Result<()> {
        for set in 1..=exercise.sets {
            for field in DraftField::ALL {
                self.remove_temp_input(&keys::set_input_key(plan_id, &exercise.id, set, field))?;
            }
        }
        self.remove_temp_input(&keys::note_key(plan_id, &exercise.id))
    }

    /// Copy the weights of the last result into this session's kg drafts.
    ///
    /// Set N gets the N-th weight found, or the final one when the last
    /// result has fewer weights than the exercise has sets. Reps are left
    /// alone. Returns the number of sets filled.
    pub fn fill_weights_from_last(&self, plan_id: &str, exercise: &Exercise) -> Result<u32> {
        if exercise.kind != ExerciseType::Standard {
            return Err(RepbookError::InvalidInput(format!(
                "Exercise '{}' does not record weights",
                exercise.id
            )));
        }
        let last = self.get_last_result(plan_id, &exercise.id).ok_or_else(|| {
            RepbookError::NotFound(format!("No previous result for exercise '{}'", exercise.id))
        })?;
        let weights = progress::weight_matches(&last);
        let Some(final_weight) = weights.last() else {
            return Err(RepbookError::NotFound(format!(
                "No weights found in last result '{}'",
                last
            )));
        };

        for set in 1..=exercise.sets {
            let weight = weights.get(set as usize - 1).unwrap_or(final_weight);
            self.save_set_field(plan_id, &exercise.id, set, DraftField::Kg, weight)?;
        }
        Ok(exercise.sets)
    }
}

fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::collections::BTreeMap;

    fn exercise(id: &str, sets: u32, kind: ExerciseType) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: id.to_string(),
            pl: String::new(),
            sets,
            reps: "8-10".to_string(),
            tempo: "2011".to_string(),
            rir: "1".to_string(),
            rest: 90,
            link: String::new(),
            kind,
        }
    }

    fn fixture() -> (Store<MemoryStore>, Namespace) {
        (
            Store::new(MemoryStore::new()),
            Namespace::new("test_app").unwrap(),
        )
    }

    #[test]
    fn test_last_write_wins_and_remove() {
        let (store, ns) = fixture();
        let drafts = DraftCache::new(&store, &ns);
        for value in ["1", "10", "100"] {
            drafts.save_temp_input("input_gora_g_1_s1_kg", value).unwrap();
        }
        assert_eq!(drafts.get_temp_input("input_gora_g_1_s1_kg"), "100");
        assert_eq!(
            store.raw("temp_input_gora_g_1_s1_kg").as_deref(),
            Some("100")
        );

        drafts.remove_temp_input("input_gora_g_1_s1_kg").unwrap();
        assert_eq!(drafts.get_temp_input("input_gora_g_1_s1_kg"), "");
    }

    #[test]
    fn test_summary_mixes_weight_and_reps_only() {
        let (store, ns) = fixture();
        let drafts = DraftCache::new(&store, &ns);
        let ex = exercise("g_1", 3, ExerciseType::Standard);
        drafts.save_set_field("gora", "g_1", 1, DraftField::Kg, "100").unwrap();
        drafts.save_set_field("gora", "g_1", 1, DraftField::Reps, "5").unwrap();
        drafts.save_set_field("gora", "g_1", 2, DraftField::Reps, "8").unwrap();
        drafts.save_set_field("gora", "g_1", 3, DraftField::Kg, "110").unwrap();

        let summary = drafts.summarize_exercise("gora", &ex).unwrap();
        assert_eq!(summary.text, "100kg x 5 | 8p");
        assert_eq!(summary.sets.len(), 2);
        assert_eq!(summary.sets[0].weight_kg, Some(100.0));
        assert_eq!(summary.sets[1].reps, Some(8));
    }

    #[test]
    fn test_summary_time_and_note() {
        let (store, ns) = fixture();
        let drafts = DraftCache::new(&store, &ns);
        let ex = exercise("g_9", 2, ExerciseType::Time);
        drafts.save_set_field("gora", "g_9", 1, DraftField::Time, "45").unwrap();
        drafts.save_set_field("gora", "g_9", 2, DraftField::Time, "40").unwrap();
        drafts.save_note("gora", "g_9", "shaky").unwrap();

        let summary = drafts.summarize_exercise("gora", &ex).unwrap();
        assert_eq!(summary.text, "45s | 40s [Note: shaky]");
        assert_eq!(summary.sets[0].seconds, Some(45));
    }

    #[test]
    fn test_note_alone_is_not_a_summary() {
        let (store, ns) = fixture();
        let drafts = DraftCache::new(&store, &ns);
        let ex = exercise("g_1", 2, ExerciseType::Standard);
        drafts.save_note("gora", "g_1", "skipped").unwrap();
        assert!(drafts.summarize_exercise("gora", &ex).is_none());
    }

    #[test]
    fn test_clear_caches_summary_with_note() {
        let (store, ns) = fixture();
        let drafts = DraftCache::new(&store, &ns);
        let ex = exercise("g_1", 1, ExerciseType::Standard);
        drafts.save_set_field("gora", "g_1", 1, DraftField::Kg, "80").unwrap();
        drafts.save_set_field("gora", "g_1", 1, DraftField::Reps, "6").unwrap();
        drafts.save_note("gora", "g_1", "ok").unwrap();

        drafts.clear_temp_inputs("gora", &[ex]).unwrap();

        assert_eq!(
            store.raw("test_app_last_gora_g_1").as_deref(),
            Some("80kg x 6 [Note: ok]")
        );
        assert!(store.keys_with_prefix("temp_").unwrap().is_empty());
    }

    #[test]
    fn test_last_result_prefers_cache() {
        let (store, ns) = fixture();
        let entry = WorkoutHistoryEntry {
            date: "01.01.2025, 10:00 (40:00)".to_string(),
            timestamp: 1,
            results: BTreeMap::from([("g_1".to_string(), "90kg x 5".to_string())]),
            sets: BTreeMap::new(),
        };
        store.set(&ns.history_key("gora"), &vec![entry]).unwrap();
        let drafts = DraftCache::new(&store, &ns);
        assert_eq!(
            drafts.get_last_result("gora", "g_1").as_deref(),
            Some("90kg x 5")
        );

        store.set_raw(&ns.last_result_key("gora", "g_1"), "95kg x 5").unwrap();
        assert_eq!(
            drafts.get_last_result("gora", "g_1").as_deref(),
            Some("95kg x 5")
        );
        assert_eq!(drafts.get_last_result("gora", "g_2"), None);
    }

    #[test]
    fn test_fill_weights_reuses_final_weight() {
        let (store, ns) = fixture();
        store
            .set_raw(&ns.last_result_key("gora", "g_1"), "100kg x 5 | 102,5 kg x 4")
            .unwrap();
        let drafts = DraftCache::new(&store, &ns);
        drafts.save_set_field("gora", "g_1", 1, DraftField::Reps, "7").unwrap();
        let ex = exercise("g_1", 3, ExerciseType::Standard);

        assert_eq!(drafts.fill_weights_from_last("gora", &ex).unwrap(), 3);
        assert_eq!(drafts.get_set_field("gora", "g_1", 1, DraftField::Kg), "100");
        assert_eq!(drafts.get_set_field("gora", "g_1", 2, DraftField::Kg), "102,5");
        assert_eq!(drafts.get_set_field("gora", "g_1", 3, DraftField::Kg), "102,5");
        assert_eq!(drafts.get_set_field("gora", "g_1", 1, DraftField::Reps), "7");
    }

    #[test]
    fn test_fill_weights_errors_without_weights() {
        let (store, ns) = fixture();
        let drafts = DraftCache::new(&store, &ns);
        let ex = exercise("g_1", 2, ExerciseType::Standard);
        assert!(drafts.fill_weights_from_last("gora", &ex).unwrap_err().is_not_found());

        store.set_raw(&ns.last_result_key("gora", "g_1"), "8p | 8p").unwrap();
        assert!(drafts.fill_weights_from_last("gora", &ex).is_err());
    }
}
