//! Persisted key layout.
//!
//! Profile data lives under the install prefix held by [`Namespace`].
//! Settings and logo use fixed keys shared by every profile on the store.
//! Drafts live under [`TEMP_PREFIX`] so they never collide with committed
//! data and are skipped by backups.

use crate::error::{RepbookError, Result};

/// Fixed key holding [`crate::model::AppSettings`].
pub const SETTINGS_KEY: &str = "app_settings";

/// Fixed key holding the logo (URL or `data:` URL).
pub const LOGO_KEY: &str = "app_logo";

/// Prefix shared by every draft key.
pub const TEMP_PREFIX: &str = "temp_";

/// The install prefix every profile-owned key is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    prefix: String,
}

impl Namespace {
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(RepbookError::InvalidInput(
                "Storage prefix cannot be empty".to_string(),
            ));
        }
        if prefix.chars().any(char::is_whitespace) {
            return Err(RepbookError::InvalidInput(format!(
                "Storage prefix cannot contain whitespace: '{}'",
                prefix
            )));
        }
        let shadows_fixed_key = [SETTINGS_KEY, LOGO_KEY]
            .iter()
            .any(|fixed| *fixed == prefix || fixed.starts_with(&format!("{}_", prefix)));
        if prefix.starts_with(TEMP_PREFIX) || shadows_fixed_key {
            return Err(RepbookError::InvalidInput(format!(
                "Storage prefix '{}' collides with a reserved key",
                prefix
            )));
        }
        Ok(Self { prefix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Key of the workouts map.
    pub fn workouts_key(&self) -> String {
        self.prefix.clone()
    }

    pub fn history_key(&self, plan_id: &str) -> String {
        format!("{}_history_{}", self.prefix, plan_id)
    }

    pub fn measurements_key(&self) -> String {
        format!("{}_measurements", self.prefix)
    }

    pub fn cardio_key(&self) -> String {
        format!("{}_cardio", self.prefix)
    }

    /// Cached summary of the last finished set of `exercise_id`.
    pub fn last_result_key(&self, plan_id: &str, exercise_id: &str) -> String {
        format!("{}_last_{}_{}", self.prefix, plan_id, exercise_id)
    }

    /// True when `key` belongs to this profile (backups include these).
    pub fn owns(&self, key: &str) -> bool {
        match key.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('_'),
            None => false,
        }
    }
}

/// Which value of a set a draft holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Kg,
    Reps,
    Time,
}

impl DraftField {
    pub const ALL: [DraftField; 3] = [DraftField::Kg, DraftField::Reps, DraftField::Time];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Kg => "kg",
            DraftField::Reps => "reps",
            DraftField::Time => "time",
        }
    }
}

/// Draft id of one field of one set; `set` is 1-based.
pub fn set_input_key(plan_id: &str, exercise_id: &str, set: u32, field: DraftField) -> String {
    format!("input_{}_{}_s{}_{}", plan_id, exercise_id, set, field.as_str())
}

pub fn note_key(plan_id: &str, exercise_id: &str) -> String {
    format!("note_{}_{}", plan_id, exercise_id)
}

pub fn session_started_key(plan_id: &str) -> String {
    format!("session_{}_started", plan_id)
}

/// Store key for the draft id `key`.
pub fn temp_key(key: &str) -> String {
    format!("{}{}", TEMP_PREFIX, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_layout() {
        let ns = Namespace::new("workout_app_damian_v2").unwrap();
        assert_eq!(ns.workouts_key(), "workout_app_damian_v2");
        assert_eq!(ns.history_key("gora"), "workout_app_damian_v2_history_gora");
        assert_eq!(ns.measurements_key(), "workout_app_damian_v2_measurements");
        assert_eq!(ns.cardio_key(), "workout_app_damian_v2_cardio");
        assert_eq!(
            ns.last_result_key("gora", "g1"),
            "workout_app_damian_v2_last_gora_g1"
        );
        assert!(ns.owns("workout_app_damian_v2_cardio"));
        assert!(!ns.owns("app_settings"));
        assert!(!ns.owns("workout_app_damian_v2x"));
    }

    #[test]
    fn test_namespace_rejects_reserved() {
        assert!(Namespace::new("").is_err());
        assert!(Namespace::new("my app").is_err());
        assert!(Namespace::new("temp_x").is_err());
        assert!(Namespace::new("app_logo").is_err());
        assert!(Namespace::new("app").is_err());
        assert!(Namespace::new("apps").is_ok());
    }

    #[test]
    fn test_draft_keys() {
        assert_eq!(
            temp_key(&set_input_key("dol", "d2", 3, DraftField::Reps)),
            "temp_input_dol_d2_s3_reps"
        );
        assert_eq!(temp_key(&note_key("dol", "d2")), "temp_note_dol_d2");
        assert_eq!(session_started_key("fbw"), "session_fbw_started");
    }
}
