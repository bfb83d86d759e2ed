//! Weight progress series.
//!
//! Entries written by this crate carry structured [`SetRecord`]s and those
//! are used when present. Older entries only have the summary string, so
//! weights are pulled out of it with the `<number>kg` pattern the summary
//! format guarantees.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::model::{WorkoutHistoryEntry, WorkoutPlan};

fn weight_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*kg").expect("weight pattern is a valid regex")
    })
}

/// Every weight literal in `text`, as written (e.g. `"102,5"`).
pub fn weight_matches(text: &str) -> Vec<String> {
    weight_pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Parse a weight, accepting `,` as the decimal separator.
pub fn parse_weight(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
}

/// Every parseable weight in `text`.
pub fn extract_weights(text: &str) -> Vec<f64> {
    weight_matches(text)
        .iter()
        .filter_map(|raw| parse_weight(raw))
        .collect()
}

/// Heaviest weight logged for `exercise_id` in one entry.
pub fn max_weight(entry: &WorkoutHistoryEntry, exercise_id: &str) -> Option<f64> {
    let structured = entry
        .sets
        .get(exercise_id)
        .into_iter()
        .flatten()
        .filter_map(|set| set.weight_kg);
    if let Some(max) = structured.reduce(f64::max) {
        return Some(max);
    }

    entry
        .results
        .get(exercise_id)
        .map(|text| extract_weights(text))
        .and_then(|weights| weights.into_iter().reduce(f64::max))
}

/// One chart point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressPoint {
    /// Entry date up to the first comma
    pub date: String,
    pub weight: f64,
    pub full_date: String,
}

/// Oldest-first weight series of one exercise. Entries without a weight
/// for the exercise are skipped.
pub fn exercise_series(history: &[WorkoutHistoryEntry], exercise_id: &str) -> Vec<ProgressPoint> {
    let mut ordered: Vec<&WorkoutHistoryEntry> = history.iter().collect();
    ordered.sort_by_key(|entry| entry.timestamp);

    ordered
        .into_iter()
        .filter_map(|entry| {
            let weight = max_weight(entry, exercise_id)?;
            let date = entry.date.split(',').next().unwrap_or_default().to_string();
            Some(ProgressPoint {
                date,
                weight,
                full_date: entry.date.clone(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ExerciseSeries {
    pub exercise_id: String,
    pub name: String,
    pub pl: String,
    pub points: Vec<ProgressPoint>,
}

/// Progress of every exercise in a plan.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub client: String,
    pub plan_id: String,
    pub title: String,
    pub exercises: Vec<ExerciseSeries>,
}

pub fn plan_report(
    client: &str,
    plan_id: &str,
    plan: &WorkoutPlan,
    history: &[WorkoutHistoryEntry],
) -> ProgressReport {
    let exercises = plan
        .exercises
        .iter()
        .map(|ex| ExerciseSeries {
            exercise_id: ex.id.clone(),
            name: ex.name.clone(),
            pl: ex.pl.clone(),
            points: exercise_series(history, &ex.id),
        })
        .collect();

    ProgressReport {
        client: client.to_string(),
        plan_id: plan_id.to_string(),
        title: plan.title.clone(),
        exercises,
    }
}

/// `Raport_<client>_<plan>.<extension>`, whitespace runs in the name as `_`.
pub fn report_filename(client: &str, plan_id: &str, extension: &str) -> String {
    format!(
        "Raport_{}_{}.{}",
        crate::backup::underscore_whitespace(client),
        plan_id,
        extension
    )
}
