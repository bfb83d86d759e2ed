//! Output formatting helpers for the CLI.
//!
//! JSON shapes shared by several commands, and text renderings of
//! history results.

use serde::Serialize;

use repbook_core::history::named_results;
use repbook_core::model::{WorkoutHistoryEntry, WorkoutPlan};

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Convert a history entry to JSON, with exercise names resolved.
///
/// `position` is the 1-based position used by `history edit-date/delete`.
pub fn history_entry_json(
    plan_id: &str,
    position: usize,
    entry: &WorkoutHistoryEntry,
    plan: Option<&WorkoutPlan>,
) -> serde_json::Value {
    let results: Vec<serde_json::Value> = entry
        .results
        .iter()
        .zip(named_results(entry, plan))
        .map(|((exercise_id, summary), (name, _))| {
            serde_json::json!({
                "exercise_id": exercise_id,
                "name": name,
                "summary": summary,
            })
        })
        .collect();

    serde_json::json!({
        "plan": plan_id,
        "position": position,
        "date": entry.date,
        "timestamp": entry.timestamp,
        "results": results,
        "sets": entry.sets,
    })
}

/// One line per result: `name: summary`.
pub fn result_lines(entry: &WorkoutHistoryEntry, plan: Option<&WorkoutPlan>) -> Vec<String> {
    named_results(entry, plan)
        .into_iter()
        .map(|(name, summary)| format!("{}: {}", name, summary))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use repbook_core::defaults::default_plan;
    use std::collections::BTreeMap;

    fn entry() -> WorkoutHistoryEntry {
        let mut results = BTreeMap::new();
        results.insert("f_1".to_string(), "100kg x 5".to_string());
        results.insert("gone".to_string(), "8p".to_string());
        WorkoutHistoryEntry {
            date: "04.03.2025, 18:47 (47:00)".to_string(),
            timestamp: 1_741_110_420_000,
            results,
            sets: BTreeMap::new(),
        }
    }

    #[test]
    fn test_history_entry_json_resolves_names() {
        let plan = default_plan("fbw").unwrap();
        let json = history_entry_json("fbw", 1, &entry(), Some(&plan));
        assert_eq!(json["position"], 1);
        assert_eq!(json["results"][0]["exercise_id"], "f_1");
        assert_eq!(json["results"][0]["name"], plan.exercise("f_1").unwrap().name.as_str());
        // Unknown ids fall back to the id
        assert_eq!(json["results"][1]["name"], "gone");
    }

    #[test]
    fn test_result_lines() {
        let lines = result_lines(&entry(), None);
        assert_eq!(lines, vec!["f_1: 100kg x 5", "gone: 8p"]);
    }
}
