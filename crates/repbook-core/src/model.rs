//! Domain records persisted in the store.
//!
//! Field names match the stored JSON so data written by earlier installs
//! round-trips unchanged. Numeric fields the trainee types (measurements,
//! durations, rep ranges) stay strings at rest.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RepbookError, Result};

/// What a single set of an exercise records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    /// Weight and reps
    #[default]
    Standard,
    /// Elapsed seconds
    Time,
    /// Reps only
    RepsOnly,
}

impl ExerciseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Standard => "standard",
            ExerciseType::Time => "time",
            ExerciseType::RepsOnly => "reps_only",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = RepbookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "standard" => Ok(ExerciseType::Standard),
            "time" => Ok(ExerciseType::Time),
            "reps_only" | "reps-only" => Ok(ExerciseType::RepsOnly),
            other => Err(RepbookError::InvalidInput(format!(
                "Unknown exercise type '{}' (expected standard, time or reps_only)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarmupExercise {
    pub name: String,
    /// Localized name
    pub pl: String,
    pub link: String,
    pub reps: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    /// Localized name
    pub pl: String,
    pub sets: u32,
    /// Free-form rep range, e.g. "8-10"
    pub reps: String,
    pub tempo: String,
    pub rir: String,
    /// Rest between sets in seconds
    pub rest: u32,
    pub link: String,
    #[serde(rename = "type", default)]
    pub kind: ExerciseType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub title: String,
    #[serde(default)]
    pub warmup: Vec<WarmupExercise>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl WorkoutPlan {
    pub fn exercise(&self, exercise_id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|ex| ex.id == exercise_id)
    }
}

/// Plan id -> plan.
pub type WorkoutsMap = BTreeMap<String, WorkoutPlan>;

/// Structured values of one logged set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    /// 1-based set number
    pub set: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u32>,
}

/// One finished (or manually added) workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutHistoryEntry {
    /// Display date, e.g. "14.03.2025, 18:05 (52:10)"
    pub date: String,

    /// Epoch milliseconds
    pub timestamp: i64,

    /// Exercise id -> summary string
    #[serde(default)]
    pub results: BTreeMap<String, String>,

    /// Exercise id -> structured sets behind the summary
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sets: BTreeMap<String, Vec<SetRecord>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyMeasurement {
    pub id: String,
    /// YYYY-MM-DD
    pub date: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub waist: String,
    #[serde(default)]
    pub chest: String,
    #[serde(default)]
    pub biceps: String,
    #[serde(default)]
    pub thigh: String,
}

impl BodyMeasurement {
    /// Raw string of `metric`.
    pub fn value(&self, metric: Metric) -> &str {
        match metric {
            Metric::Weight => &self.weight,
            Metric::Waist => &self.waist,
            Metric::Chest => &self.chest,
            Metric::Biceps => &self.biceps,
            Metric::Thigh => &self.thigh,
        }
    }

    /// True when at least one metric holds something.
    pub fn has_any_value(&self) -> bool {
        Metric::ALL
            .iter()
            .any(|metric| !self.value(*metric).trim().is_empty())
    }
}

/// A body measurement series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Weight,
    Waist,
    Chest,
    Biceps,
    Thigh,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Weight,
        Metric::Waist,
        Metric::Chest,
        Metric::Biceps,
        Metric::Thigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Weight => "weight",
            Metric::Waist => "waist",
            Metric::Chest => "chest",
            Metric::Biceps => "biceps",
            Metric::Thigh => "thigh",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Weight => "Waga (kg)",
            Metric::Waist => "Pas (cm)",
            Metric::Chest => "Klatka (cm)",
            Metric::Biceps => "Biceps (cm)",
            Metric::Thigh => "Udo (cm)",
        }
    }
}

impl FromStr for Metric {
    type Err = RepbookError;

    fn from_str(s: &str) -> Result<Self> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.as_str() == s)
            .ok_or_else(|| {
                RepbookError::InvalidInput(format!(
                    "Unknown metric '{}' (expected weight, waist, chest, biceps or thigh)",
                    s
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardioType {
    Rowerek,
    Bieznia,
    Schody,
    Orbitrek,
}

impl CardioType {
    pub const ALL: [CardioType; 4] = [
        CardioType::Rowerek,
        CardioType::Bieznia,
        CardioType::Schody,
        CardioType::Orbitrek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardioType::Rowerek => "rowerek",
            CardioType::Bieznia => "bieznia",
            CardioType::Schody => "schody",
            CardioType::Orbitrek => "orbitrek",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CardioType::Rowerek => "Rowerek Stacjonarny",
            CardioType::Bieznia => "Bieżnia",
            CardioType::Schody => "Schody",
            CardioType::Orbitrek => "Orbitrek",
        }
    }
}

impl FromStr for CardioType {
    type Err = RepbookError;

    fn from_str(s: &str) -> Result<Self> {
        CardioType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                RepbookError::InvalidInput(format!(
                    "Unknown cardio type '{}' (expected rowerek, bieznia, schody or orbitrek)",
                    s
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardioSession {
    pub id: String,
    /// YYYY-MM-DD
    pub date: String,
    #[serde(rename = "type")]
    pub kind: CardioType,
    /// Free-form, e.g. "30 min"
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundType {
    Beep1,
    #[default]
    Beep2,
    Beep3,
}

impl SoundType {
    pub const ALL: [SoundType; 3] = [SoundType::Beep1, SoundType::Beep2, SoundType::Beep3];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundType::Beep1 => "beep1",
            SoundType::Beep2 => "beep2",
            SoundType::Beep3 => "beep3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SoundType::Beep1 => "Krótki Beep",
            SoundType::Beep2 => "Długi Beeeep",
            SoundType::Beep3 => "Podwójny Beep",
        }
    }
}

impl FromStr for SoundType {
    type Err = RepbookError;

    fn from_str(s: &str) -> Result<Self> {
        SoundType::ALL
            .into_iter()
            .find(|sound| sound.as_str() == s)
            .ok_or_else(|| {
                RepbookError::InvalidInput(format!(
                    "Unknown sound type '{}' (expected beep1, beep2 or beep3)",
                    s
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Alert volume in [0, 1]
    pub volume: f64,
    #[serde(rename = "soundType", default)]
    pub sound_type: SoundType,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            volume: 0.5,
            sound_type: SoundType::Beep2,
        }
    }
}

impl AppSettings {
    /// Copy with `volume` clamped into [0, 1].
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        self
    }

    pub fn with_sound_type(mut self, sound_type: SoundType) -> Self {
        self.sound_type = sound_type;
        self
    }
}

/// Per-install identity shown on every screen and report.
#[derive(Debug, Clone, PartialEq)]
pub struct Branding {
    pub display_name: String,
    /// URL or `data:` URL
    pub logo: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_type_wire_names() {
        let json = serde_json::to_string(&ExerciseType::RepsOnly).unwrap();
        assert_eq!(json, "\"reps_only\"");
        assert_eq!("time".parse::<ExerciseType>().unwrap(), ExerciseType::Time);
    }

    #[test]
    fn test_history_entry_without_sets_round_trips() {
        let raw = r#"{"date":"01.02.2025, 10:00 (45:00)","timestamp":1738400400000,"results":{"g_1":"100kg x 5"}}"#;
        let entry: WorkoutHistoryEntry = serde_json::from_str(raw).unwrap();
        assert!(entry.sets.is_empty());
        assert_eq!(serde_json::to_string(&entry).unwrap(), raw);
    }

    #[test]
    fn test_settings_wire_format() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"volume":0.8,"soundType":"beep3"}"#).unwrap();
        assert_eq!(settings.sound_type, SoundType::Beep3);
        assert_eq!(AppSettings::default().volume, 0.5);
        assert_eq!(AppSettings::default().with_volume(3.0).volume, 1.0);
        assert_eq!(AppSettings::default().with_volume(-1.0).volume, 0.0);
    }

    #[test]
    fn test_cardio_session_type_field() {
        let session = CardioSession {
            id: "1".to_string(),
            date: "2025-03-10".to_string(),
            kind: CardioType::Bieznia,
            duration: "30 min".to_string(),
            notes: None,
        };
        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(
            json,
            r#"{"id":"1","date":"2025-03-10","type":"bieznia","duration":"30 min"}"#
        );
    }

    #[test]
    fn test_measurement_has_any_value() {
        let mut m = BodyMeasurement {
            id: "1".to_string(),
            date: "2025-01-01".to_string(),
            ..Default::default()
        };
        assert!(!m.has_any_value());
        m.biceps = "38".to_string();
        assert!(m.has_any_value());
    }
}
