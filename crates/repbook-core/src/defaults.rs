//! Bundled defaults for a fresh install.

use crate::model::{WorkoutPlan, WorkoutsMap};

const DEFAULT_WORKOUTS_JSON: &str = include_str!("../data/default_workouts.json");

/// Logo shown until the trainee uploads their own.
pub const DEFAULT_LOGO_URL: &str =
    "https://lh3.googleusercontent.com/u/0/d/1GZ-QR4EyK6Ho9czlpTocORhwiHW4FGnP";

pub const DEFAULT_PROFILE_NAME: &str = "Damian B.";

pub const DEFAULT_PREFIX: &str = "workout_app_damian_v2";

/// The bundled plan set.
pub fn default_workouts() -> WorkoutsMap {
    match serde_json::from_str(DEFAULT_WORKOUTS_JSON) {
        Ok(map) => map,
        Err(e) => {
            tracing::error!(error = %e, "bundled workout plans failed to parse");
            WorkoutsMap::new()
        }
    }
}

/// Bundled version of a single plan, if one exists.
pub fn default_plan(plan_id: &str) -> Option<WorkoutPlan> {
    default_workouts().remove(plan_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExerciseType;

    #[test]
    fn test_bundled_plans_parse() {
        let plans = default_workouts();
        assert_eq!(
            plans.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["dol", "fbw", "gora"]
        );
        for plan in plans.values() {
            assert!(!plan.exercises.is_empty());
            assert!(plan.exercises.iter().all(|ex| ex.sets > 0));
        }
    }

    #[test]
    fn test_default_plan_lookup() {
        let gora = default_plan("gora").unwrap();
        assert_eq!(gora.exercises[0].id, "g_1");
        assert_eq!(gora.exercises[0].kind, ExerciseType::Standard);
        assert!(default_plan("nope").is_none());
    }
}
