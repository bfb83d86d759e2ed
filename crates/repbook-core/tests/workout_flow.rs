use chrono::{Duration, FixedOffset, TimeZone, Utc};

use repbook_core::backup;
use repbook_core::keys::DraftField;
use repbook_core::model::{CardioSession, CardioType};
use repbook_core::session::FinishOutcome;
use repbook_core::storage::{MemoryStore, SqliteStore};
use repbook_core::{cardio, progress, AppState, KeyValueStore, Namespace};
use tempfile::TempDir;

fn sqlite_state(dir: &TempDir) -> AppState<SqliteStore> {
    let store = SqliteStore::open(&dir.path().join("repbook.db")).expect("open store");
    AppState::load(store, Namespace::new("wk").expect("prefix"), "Jan Kowalski")
}

#[test]
fn test_finished_session_feeds_next_one() {
    let dir = TempDir::new().expect("tempdir");
    let state = sqlite_state(&dir);
    let tz = FixedOffset::east_opt(3600).expect("offset");
    let start = tz.with_ymd_and_hms(2025, 3, 4, 18, 0, 0).unwrap();

    let session = state.session("gora").expect("plan exists");
    session.start(start.with_timezone(&Utc)).expect("start");
    let drafts = session.drafts();
    drafts.save_set_field("gora", "g_1", 1, DraftField::Kg, "100").unwrap();
    drafts.save_set_field("gora", "g_1", 1, DraftField::Reps, "5").unwrap();
    drafts.save_set_field("gora", "g_1", 2, DraftField::Reps, "8").unwrap();

    let end = start + Duration::minutes(47);
    let outcome = session.finish(&end, || false).expect("finish");
    assert!(matches!(outcome, FinishOutcome::Saved { ref elapsed, .. } if elapsed == "47:00"));

    let history = state.history().list("gora");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].date, "04.03.2025, 18:47 (47:00)");
    assert_eq!(history[0].results["g_1"], "100kg x 5 | 8p");

    let next = state.session("gora").expect("plan exists");
    let exercise = next.exercise("g_1").expect("exercise");
    next.drafts()
        .fill_weights_from_last("gora", exercise)
        .expect("fill");
    for set in 1..=exercise.sets {
        assert_eq!(next.drafts().get_set_field("gora", "g_1", set, DraftField::Kg), "100");
    }

    let series = progress::exercise_series(&history, "g_1");
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].weight, 100.0);
    assert_eq!(series[0].date, "04.03.2025");
}

#[test]
fn test_backup_restores_into_other_store() {
    let dir = TempDir::new().expect("tempdir");
    let mut source = sqlite_state(&dir);
    source
        .edit_workouts(|map| {
            map.remove("fbw");
            Ok(())
        })
        .expect("edit");
    source
        .cardio()
        .add(CardioSession {
            id: "1".to_string(),
            date: "2025-03-10".to_string(),
            kind: CardioType::Schody,
            duration: "20 min".to_string(),
            notes: None,
        })
        .expect("cardio");
    source
        .drafts()
        .save_temp_input("input_gora_g_1_s1_kg", "90")
        .expect("draft");

    let path = dir.path().join("out").join("backup.json");
    let written = backup::write_backup(source.store(), source.namespace(), &path).expect("export");
    assert_eq!(written, 2);

    let target = MemoryStore::new();
    target.set_raw("unrelated", "stay").unwrap();
    let mut restored = AppState::load(target, Namespace::new("wk").unwrap(), "Jan Kowalski");
    let imported = backup::import_file(restored.store(), &path).expect("import");
    assert_eq!(imported, 2);
    restored.reload();

    assert!(!restored.workouts().contains_key("fbw"));
    assert_eq!(restored.cardio().list().len(), 1);
    assert_eq!(restored.store().raw("unrelated").as_deref(), Some("stay"));
    assert_eq!(restored.drafts().get_temp_input("input_gora_g_1_s1_kg"), "");
}

#[test]
fn test_cardio_weekly_summary() {
    let state = AppState::load(MemoryStore::new(), Namespace::new("wk").unwrap(), "X");
    for (id, date) in [("1", "2025-03-03"), ("2", "2025-03-12"), ("3", "2025-03-16")] {
        state
            .cardio()
            .add(CardioSession {
                id: id.to_string(),
                date: date.to_string(),
                kind: CardioType::Bieznia,
                duration: "30 min".to_string(),
                notes: None,
            })
            .expect("add");
    }
    let weeks = cardio::weekly_groups(&state.cardio().list());
    let labels: Vec<&str> = weeks.iter().map(|w| w.label.as_str()).collect();
    assert_eq!(labels, vec!["10.03 - 16.03.2025", "03.03 - 09.03.2025"]);
    assert_eq!(weeks[0].sessions.len(), 2);
}
