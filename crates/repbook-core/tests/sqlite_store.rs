use std::collections::BTreeMap;

use repbook_core::model::{
    AppSettings, BodyMeasurement, CardioSession, CardioType, SetRecord, SoundType,
    WorkoutHistoryEntry, WorkoutsMap,
};
use repbook_core::storage::{KeyValueStore, SqliteStore, Store};
use repbook_core::{defaults, Namespace};
use tempfile::TempDir;

fn open(dir: &TempDir) -> Store<SqliteStore> {
    let path = dir.path().join("nested").join("repbook.db");
    Store::new(SqliteStore::open(&path).expect("open should succeed"))
}

#[test]
fn test_values_survive_reopen() {
    let dir = TempDir::new().expect("tempdir");
    {
        let store = open(&dir);
        store.set_raw("k", "v").expect("set should succeed");
    }
    let store = open(&dir);
    assert_eq!(store.raw("k").as_deref(), Some("v"));
    store.backend().check_integrity().expect("integrity");
}

#[test]
fn test_device_id_is_stable_across_reopen() {
    let dir = TempDir::new().expect("tempdir");
    let first = open(&dir).backend().metadata().expect("metadata").device_id;
    let second = open(&dir).backend().metadata().expect("metadata").device_id;
    assert_eq!(first, second);
}

#[test]
fn test_aggregates_round_trip() {
    let dir = TempDir::new().expect("tempdir");
    let store = open(&dir);
    let ns = Namespace::new(defaults::DEFAULT_PREFIX).expect("prefix");

    let workouts = defaults::default_workouts();
    store.set(&ns.workouts_key(), &workouts).expect("set workouts");
    let back: WorkoutsMap = store.get_or_default(&ns.workouts_key());
    assert_eq!(back, workouts);

    let history = vec![WorkoutHistoryEntry {
        date: "04.03.2025, 19:02 (1:02:05)".to_string(),
        timestamp: 1_741_114_925_000,
        results: BTreeMap::from([("g_1".to_string(), "100kg x 5 | 8p".to_string())]),
        sets: BTreeMap::from([(
            "g_1".to_string(),
            vec![SetRecord {
                set: 1,
                weight_kg: Some(100.0),
                reps: Some(5),
                seconds: None,
            }],
        )]),
    }];
    store.set(&ns.history_key("gora"), &history).expect("set history");
    let back: Vec<WorkoutHistoryEntry> = store.get_or_default(&ns.history_key("gora"));
    assert_eq!(back, history);

    let measurements = vec![BodyMeasurement {
        id: "1".to_string(),
        date: "2025-03-01".to_string(),
        weight: "82,5".to_string(),
        waist: String::new(),
        chest: "104".to_string(),
        biceps: String::new(),
        thigh: String::new(),
    }];
    store.set(&ns.measurements_key(), &measurements).expect("set measurements");
    let back: Vec<BodyMeasurement> = store.get_or_default(&ns.measurements_key());
    assert_eq!(back, measurements);

    let cardio = vec![CardioSession {
        id: "2".to_string(),
        date: "2025-03-02".to_string(),
        kind: CardioType::Orbitrek,
        duration: "25 min".to_string(),
        notes: Some("interwały".to_string()),
    }];
    store.set(&ns.cardio_key(), &cardio).expect("set cardio");
    let back: Vec<CardioSession> = store.get_or_default(&ns.cardio_key());
    assert_eq!(back, cardio);

    let settings = AppSettings::default().with_sound_type(SoundType::Beep3);
    store.set("app_settings", &settings).expect("set settings");
    let back: AppSettings = store.get_or_default("app_settings");
    assert_eq!(back, settings);
}

#[test]
fn test_corrupt_rows_read_as_default() {
    let dir = TempDir::new().expect("tempdir");
    let store = open(&dir);
    store
        .backend()
        .set_raw("app_settings", "{\"volume\":")
        .expect("set raw");
    let settings: AppSettings = store.get_or_default("app_settings");
    assert_eq!(settings, AppSettings::default());

    store.backend().set_raw("list", "undefined").expect("set raw");
    let list: Vec<CardioSession> = store.get_or_default("list");
    assert!(list.is_empty());
}
