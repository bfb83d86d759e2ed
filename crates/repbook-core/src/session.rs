//! Active workout lifecycle.
//!
//! A plan is *in progress* from the moment anything is drafted for it (or
//! its start time is recorded) until it is finished or discarded.
//! Finishing writes one history entry, refreshes the last-result cache and
//! drops the drafts. The steps are not transactional: a failure half way
//! leaves the drafts in place and they seed the next session.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};

use crate::drafts::{DraftCache, ExerciseSummary};
use crate::error::{RepbookError, Result};
use crate::history::{display_date, HistoryLog};
use crate::keys::{self, Namespace};
use crate::model::{Exercise, WorkoutHistoryEntry, WorkoutPlan, WorkoutsMap};
use crate::storage::{KeyValueStore, Store};
use crate::timer::format_elapsed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress,
}

/// Result of [`WorkoutSession::finish`].
#[derive(Debug, Clone, PartialEq)]
pub enum FinishOutcome {
    /// Entry written to history
    Saved {
        entry: WorkoutHistoryEntry,
        elapsed: String,
    },
    /// Nothing was logged and finishing anyway was declined
    Declined,
}

/// One plan's workout, bound to the store.
pub struct WorkoutSession<'a, S: KeyValueStore> {
    store: &'a Store<S>,
    namespace: &'a Namespace,
    plan_id: String,
    plan: &'a WorkoutPlan,
}

impl<'a, S: KeyValueStore> WorkoutSession<'a, S> {
    pub fn new(
        store: &'a Store<S>,
        namespace: &'a Namespace,
        workouts: &'a WorkoutsMap,
        plan_id: &str,
    ) -> Result<Self> {
        let plan = workouts
            .get(plan_id)
            .ok_or_else(|| RepbookError::PlanNotFound(plan_id.to_string()))?;
        Ok(Self {
            store,
            namespace,
            plan_id: plan_id.to_string(),
            plan,
        })
    }

    pub fn plan_id(&self) -> &str {
        &self.plan_id
    }

    pub fn plan(&self) -> &WorkoutPlan {
        self.plan
    }

    pub fn drafts(&self) -> DraftCache<'a, S> {
        DraftCache::new(self.store, self.namespace)
    }

    fn history(&self) -> HistoryLog<'a, S> {
        HistoryLog::new(self.store, self.namespace)
    }

    /// Look up an exercise of this plan.
    pub fn exercise(&self, exercise_id: &str) -> Result<&'a Exercise> {
        self.plan.exercise(exercise_id).ok_or_else(|| {
            RepbookError::NotFound(format!(
                "Exercise '{}' in plan '{}'",
                exercise_id, self.plan_id
            ))
        })
    }

    pub fn state(&self) -> SessionState {
        if self.started_at().is_some() || self.has_drafts() {
            SessionState::InProgress
        } else {
            SessionState::NotStarted
        }
    }

    fn has_drafts(&self) -> bool {
        let drafts = self.drafts();
        self.plan.exercises.iter().any(|ex| {
            !drafts.get_note(&self.plan_id, &ex.id).is_empty()
                || (1..=ex.sets).any(|set| {
                    keys::DraftField::ALL
                        .iter()
                        .any(|field| !drafts.get_set_field(&self.plan_id, &ex.id, set, *field).is_empty())
                })
        })
    }

    /// When the running session started, if recorded.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.drafts().get_temp_input(&keys::session_started_key(&self.plan_id));
        raw.trim()
            .parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// Record the start time; an already running clock is kept.
    pub fn start(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        if let Some(started) = self.started_at() {
            tracing::debug!(plan = %self.plan_id, %started, "resuming session");
            return Ok(started);
        }
        self.drafts().save_temp_input(
            &keys::session_started_key(&self.plan_id),
            &now.timestamp_millis().to_string(),
        )?;
        tracing::info!(plan = %self.plan_id, "started session");
        Ok(now)
    }

    /// Whole seconds since the start, zero when no start was recorded.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        self.started_at()
            .map(|started| (now - started).num_seconds().max(0) as u64)
            .unwrap_or(0)
    }

    /// Summaries of every exercise in plan order.
    pub fn summaries(&self) -> Vec<(&'a Exercise, Option<ExerciseSummary>)> {
        let drafts = self.drafts();
        self.plan
            .exercises
            .iter()
            .map(|ex| (ex, drafts.summarize_exercise(&self.plan_id, ex)))
            .collect()
    }

    /// Turn the drafts into a history entry.
    ///
    /// When nothing was logged `confirm_empty` decides whether an entry
    /// with no results is written anyway.
    pub fn finish<Tz, F>(&self, now: &DateTime<Tz>, confirm_empty: F) -> Result<FinishOutcome>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
        F: FnOnce() -> bool,
    {
        let mut results = BTreeMap::new();
        let mut sets = BTreeMap::new();
        for (exercise, summary) in self.summaries() {
            if let Some(summary) = summary {
                results.insert(exercise.id.clone(), summary.text);
                if !summary.sets.is_empty() {
                    sets.insert(exercise.id.clone(), summary.sets);
                }
            }
        }

        if results.is_empty() && !confirm_empty() {
            tracing::debug!(plan = %self.plan_id, "empty finish declined");
            return Ok(FinishOutcome::Declined);
        }

        let elapsed = format_elapsed(self.elapsed_seconds(now.with_timezone(&Utc)));
        let entry = WorkoutHistoryEntry {
            date: format!("{} ({})", display_date(now), elapsed),
            timestamp: now.timestamp_millis(),
            results,
            sets,
        };

        self.history().prepend(&self.plan_id, entry.clone())?;
        self.drafts()
            .clear_temp_inputs(&self.plan_id, &self.plan.exercises)?;
        self.drafts()
            .remove_temp_input(&keys::session_started_key(&self.plan_id))?;

        tracing::info!(
            plan = %self.plan_id,
            exercises = entry.results.len(),
            %elapsed,
            "finished session"
        );
        Ok(FinishOutcome::Saved { entry, elapsed })
    }

    /// Drop every draft of the plan without writing history.
    pub fn discard(&self) -> Result<()> {
        let drafts = self.drafts();
        for exercise in &self.plan.exercises {
            drafts.drop_exercise_drafts(&self.plan_id, exercise)?;
        }
        drafts.remove_temp_input(&keys::session_started_key(&self.plan_id))?;
        tracing::info!(plan = %self.plan_id, "discarded session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_workouts;
    use crate::keys::DraftField;
    use crate::storage::MemoryStore;
    use chrono::{Duration, FixedOffset};

    fn fixture() -> (Store<MemoryStore>, Namespace, WorkoutsMap) {
        (
            Store::new(MemoryStore::new()),
            Namespace::new("t").unwrap(),
            default_workouts(),
        )
    }

    #[test]
    fn test_unknown_plan() {
        let (store, ns, workouts) = fixture();
        let err = WorkoutSession::new(&store, &ns, &workouts, "nope").err().unwrap();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_start_keeps_existing_clock() {
        let (store, ns, workouts) = fixture();
        let session = WorkoutSession::new(&store, &ns, &workouts, "gora").unwrap();
        assert_eq!(session.state(), SessionState::NotStarted);

        let first = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000).unwrap();
        session.start(first).unwrap();
        let again = session.start(first + Duration::minutes(5)).unwrap();
        assert_eq!(again, first);
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.elapsed_seconds(first + Duration::seconds(90)), 90);
    }

    #[test]
    fn test_finish_writes_entry_and_clears() {
        let (store, ns, workouts) = fixture();
        let session = WorkoutSession::new(&store, &ns, &workouts, "gora").unwrap();
        let tz = FixedOffset::east_opt(0).unwrap();
        let start = tz.with_ymd_and_hms(2025, 3, 4, 18, 0, 0).unwrap();
        session.start(start.with_timezone(&Utc)).unwrap();

        let drafts = session.drafts();
        drafts.save_set_field("gora", "g_1", 1, DraftField::Kg, "100").unwrap();
        drafts.save_set_field("gora", "g_1", 1, DraftField::Reps, "5").unwrap();
        drafts.save_set_field("gora", "g_1", 2, DraftField::Reps, "8").unwrap();

        let end = start + Duration::seconds(3725);
        let outcome = session.finish(&end, || panic!("not asked")).unwrap();
        let FinishOutcome::Saved { entry, elapsed } = outcome else {
            panic!("expected saved entry");
        };
        assert_eq!(elapsed, "1:02:05");
        assert_eq!(entry.date, "04.03.2025, 19:02 (1:02:05)");
        assert_eq!(entry.results["g_1"], "100kg x 5 | 8p");
        assert_eq!(entry.sets["g_1"].len(), 2);

        assert_eq!(HistoryLog::new(&store, &ns).list("gora"), vec![entry]);
        assert_eq!(
            drafts.get_last_result("gora", "g_1").as_deref(),
            Some("100kg x 5 | 8p")
        );
        assert!(store.keys_with_prefix("temp_").unwrap().is_empty());
        assert_eq!(session.state(), SessionState::NotStarted);
    }

    #[test]
    fn test_empty_finish_declined_then_accepted() {
        let (store, ns, workouts) = fixture();
        let session = WorkoutSession::new(&store, &ns, &workouts, "dol").unwrap();
        let now = Utc::now();

        assert_eq!(session.finish(&now, || false).unwrap(), FinishOutcome::Declined);
        assert!(HistoryLog::new(&store, &ns).list("dol").is_empty());

        let outcome = session.finish(&now, || true).unwrap();
        assert!(matches!(outcome, FinishOutcome::Saved { ref entry, .. } if entry.results.is_empty()));
        assert_eq!(HistoryLog::new(&store, &ns).list("dol").len(), 1);
    }

    #[test]
    fn test_discard_leaves_history() {
        let (store, ns, workouts) = fixture();
        let session = WorkoutSession::new(&store, &ns, &workouts, "fbw").unwrap();
        session.start(Utc::now()).unwrap();
        session
            .drafts()
            .save_note("fbw", "f_1", "tired")
            .unwrap();

        session.discard().unwrap();
        assert!(store.keys().unwrap().is_empty());
    }
}
