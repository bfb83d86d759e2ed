//! Cardio sessions and weekly summaries.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::error::{RepbookError, Result};
use crate::keys::Namespace;
use crate::model::CardioSession;
use crate::storage::{KeyValueStore, Store};

pub struct CardioLog<'a, S: KeyValueStore> {
    store: &'a Store<S>,
    namespace: &'a Namespace,
}

impl<'a, S: KeyValueStore> CardioLog<'a, S> {
    pub fn new(store: &'a Store<S>, namespace: &'a Namespace) -> Self {
        Self { store, namespace }
    }

    /// Sessions, newest date first.
    pub fn list(&self) -> Vec<CardioSession> {
        self.store.get_or_default(&self.namespace.cardio_key())
    }

    fn save(&self, sessions: &[CardioSession]) -> Result<()> {
        self.store.set(&self.namespace.cardio_key(), sessions)
    }

    /// Insert `session` at the front, then order the list by date, newest
    /// first. Sessions sharing a date keep insertion order.
    pub fn add(&self, session: CardioSession) -> Result<CardioSession> {
        if session.duration.trim().is_empty() {
            return Err(RepbookError::Validation("Duration is required".to_string()));
        }

        let mut sessions = self.list();
        sessions.insert(0, session.clone());
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        self.save(&sessions)?;
        tracing::debug!(id = %session.id, kind = session.kind.as_str(), "added cardio session");
        Ok(session)
    }

    pub fn delete(&self, id: &str) -> Result<CardioSession> {
        let mut sessions = self.list();
        let pos = sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| RepbookError::NotFound(format!("Cardio session '{}'", id)))?;
        let removed = sessions.remove(pos);
        self.save(&sessions)?;
        Ok(removed)
    }
}

/// Sessions of one Monday–Sunday week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekBucket {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// `DD.MM - DD.MM.YYYY`
    pub label: String,
    pub sessions: Vec<CardioSession>,
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn week_label(start: NaiveDate) -> String {
    let end = start + Duration::days(6);
    format!("{} - {}", start.format("%d.%m"), end.format("%d.%m.%Y"))
}

/// Group sessions into calendar weeks, newest week first.
///
/// Sessions keep their relative order inside a week. Sessions whose date
/// is not `YYYY-MM-DD` are left out.
pub fn weekly_groups(sessions: &[CardioSession]) -> Vec<WeekBucket> {
    let mut weeks: BTreeMap<NaiveDate, Vec<CardioSession>> = BTreeMap::new();
    for session in sessions {
        match NaiveDate::parse_from_str(session.date.trim(), "%Y-%m-%d") {
            Ok(date) => weeks.entry(week_start(date)).or_default().push(session.clone()),
            Err(_) => {
                tracing::debug!(id = %session.id, date = %session.date, "skipping undated cardio session");
            }
        }
    }

    weeks
        .into_iter()
        .rev()
        .map(|(start, sessions)| WeekBucket {
            start,
            end: start + Duration::days(6),
            label: week_label(start),
            sessions,
        })
        .collect()
}
