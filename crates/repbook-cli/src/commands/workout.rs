use std::io::Write;
use std::sync::mpsc;
use std::time::Duration;

use chrono::{Local, Utc};

use repbook_core::keys::DraftField;
use repbook_core::model::{Exercise, ExerciseType};
use repbook_core::session::{FinishOutcome, SessionState};
use repbook_core::timer::{format_elapsed, Stopwatch, StopwatchToggle};
use repbook_core::RepbookError;

use crate::app::AppContext;
use crate::cli::{ExerciseRefArgs, LogSetArgs, NoteArgs, PlanIdArgs, TimerArgs, WorkoutStatusArgs};
use crate::errors::CliError;
use crate::helpers::parse_number;
use crate::output::print_json;
use crate::ui::{
    badge, blank_line, header, hint, kv, print, receipt, simple_table, truncate, Badge, Column,
    OutputMode,
};

pub fn handle_start(ctx: &AppContext, args: &PlanIdArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let session = state.session(&args.plan)?;
    let resumed = session.started_at().is_some();
    let started = session.start(Utc::now())?;

    if ctx.quiet() {
        return Ok(());
    }

    let ui_ctx = ctx.ui_context(false);
    let drafts = session.drafts();
    let started_display = started.with_timezone(&Local).format("%H:%M").to_string();
    let status = if resumed { "Workout resumed" } else { "Workout started" };

    print(&ui_ctx, &header(&ui_ctx, "workout", Some(&session.plan().title)));
    print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, status));
    print(&ui_ctx, &kv(&ui_ctx, "Started", &started_display));
    blank_line(&ui_ctx);

    let rows: Vec<Vec<String>> = session
        .plan()
        .exercises
        .iter()
        .map(|ex| {
            let last = drafts
                .get_last_result(&args.plan, &ex.id)
                .unwrap_or_else(|| "-".to_string());
            vec![
                ex.id.clone(),
                truncate(&ex.name, 32),
                format!("{} x {}", ex.sets, ex.reps),
                format!("{}s", ex.rest),
                last,
            ]
        })
        .collect();
    print(
        &ui_ctx,
        &simple_table(
            &ui_ctx,
            &[
                Column::new("ID"),
                Column::new("Exercise"),
                Column::new("Sets"),
                Column::new("Rest"),
                Column::new("Last"),
            ],
            &rows,
        ),
    );
    blank_line(&ui_ctx);
    if ui_ctx.mode.is_pretty() {
        print(
            &ui_ctx,
            &hint(
                &ui_ctx,
                &format!("repbook workout log {} <exercise> <set> --kg 80 --reps 8", args.plan),
            ),
        );
    }
    Ok(())
}

pub fn handle_log(ctx: &AppContext, args: &LogSetArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let session = state.session(&args.plan)?;
    let exercise = session.exercise(&args.exercise)?;
    check_set(exercise, args.set)?;

    let fields = [
        (DraftField::Kg, args.kg.as_deref()),
        (DraftField::Reps, args.reps.as_deref()),
        (DraftField::Time, args.time.as_deref()),
    ];
    if fields.iter().all(|(_, value)| value.is_none()) {
        return Err(CliError::invalid_input(
            "Nothing to record\nHint: Pass --kg, --reps or --time.",
        )
        .into());
    }
    for (field, value) in fields {
        if let Some(value) = value {
            validate_field(exercise, field, value)?;
        }
    }

    session.start(Utc::now())?;
    let drafts = session.drafts();
    for (field, value) in fields {
        let Some(value) = value else { continue };
        let value = value.trim();
        if value.is_empty() {
            drafts.remove_temp_input(&repbook_core::keys::set_input_key(
                &args.plan,
                &exercise.id,
                args.set,
                field,
            ))?;
        } else {
            drafts.save_set_field(&args.plan, &exercise.id, args.set, field, value)?;
        }
    }

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let set = format!("{}/{}", args.set, exercise.sets);
        let summary = drafts
            .summarize_exercise(&args.plan, exercise)
            .map(|s| s.text)
            .unwrap_or_else(|| "-".to_string());
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Set recorded",
                &[("Exercise", &exercise.name), ("Set", &set), ("Summary", &summary)],
            ),
        );
        if ui_ctx.mode.is_pretty() && args.set < exercise.sets {
            print(
                &ui_ctx,
                &hint(&ui_ctx, &format!("repbook tools rest {}", exercise.rest)),
            );
        }
    }
    Ok(())
}

pub fn handle_note(ctx: &AppContext, args: &NoteArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let session = state.session(&args.plan)?;
    let exercise = session.exercise(&args.exercise)?;

    session.start(Utc::now())?;
    let drafts = session.drafts();
    let note = args.text.trim();
    if note.is_empty() {
        drafts.remove_temp_input(&repbook_core::keys::note_key(&args.plan, &exercise.id))?;
    } else {
        drafts.save_note(&args.plan, &exercise.id, note)?;
    }

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let shown = if note.is_empty() { "(cleared)" } else { note };
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Note saved", &[("Exercise", &exercise.name), ("Note", shown)]),
        );
    }
    Ok(())
}

pub fn handle_fill(ctx: &AppContext, args: &ExerciseRefArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let session = state.session(&args.plan)?;
    let exercise = session.exercise(&args.exercise)?;

    session.start(Utc::now())?;
    let drafts = session.drafts();
    let filled = drafts.fill_weights_from_last(&args.plan, exercise)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let weights: Vec<String> = (1..=exercise.sets)
            .map(|set| drafts.get_set_field(&args.plan, &exercise.id, set, DraftField::Kg))
            .collect();
        let filled = filled.to_string();
        let weights = weights.join(", ");
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Weights filled from last result",
                &[("Exercise", &exercise.name), ("Sets", &filled), ("Kg", &weights)],
            ),
        );
    }
    Ok(())
}

pub fn handle_status(ctx: &AppContext, args: &WorkoutStatusArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let session = state.session(&args.plan)?;
    let ui_ctx = ctx.ui_context(args.output.json);
    let now = Utc::now();
    let in_progress = session.state() == SessionState::InProgress;
    let elapsed = format_elapsed(session.elapsed_seconds(now));
    let drafts = session.drafts();
    let summaries = session.summaries();

    if ui_ctx.mode.is_json() {
        let exercises: Vec<serde_json::Value> = summaries
            .iter()
            .map(|(ex, summary)| {
                serde_json::json!({
                    "id": ex.id,
                    "name": ex.name,
                    "summary": summary.as_ref().map(|s| s.text.clone()),
                    "sets": summary.as_ref().map(|s| s.sets.clone()).unwrap_or_default(),
                    "last_result": drafts.get_last_result(&args.plan, &ex.id),
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "plan": args.plan,
            "in_progress": in_progress,
            "started_at": session.started_at(),
            "elapsed": elapsed,
            "exercises": exercises,
        }));
    }

    print(&ui_ctx, &header(&ui_ctx, "workout", Some(&session.plan().title)));
    if !in_progress {
        print(&ui_ctx, &badge(&ui_ctx, Badge::Info, "No workout in progress"));
        if ui_ctx.mode.is_pretty() {
            print(
                &ui_ctx,
                &hint(&ui_ctx, &format!("repbook workout start {}", args.plan)),
            );
        }
        return Ok(());
    }

    print(&ui_ctx, &kv(&ui_ctx, "Elapsed", &elapsed));
    blank_line(&ui_ctx);
    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|(ex, summary)| {
            vec![
                ex.id.clone(),
                truncate(&ex.name, 32),
                summary
                    .as_ref()
                    .map(|s| s.text.clone())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print(
        &ui_ctx,
        &simple_table(
            &ui_ctx,
            &[Column::new("ID"), Column::new("Exercise"), Column::new("Recorded")],
            &rows,
        ),
    );
    Ok(())
}

pub fn handle_timer(ctx: &AppContext, args: &TimerArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let session = state.session(&args.plan)?;
    let exercise = session.exercise(&args.exercise)?;
    if exercise.kind != ExerciseType::Time {
        return Err(CliError::invalid_input(format!(
            "Exercise '{}' is not timed\nHint: Use `repbook workout log` with --kg/--reps.",
            exercise.id
        ))
        .into());
    }
    check_set(exercise, args.set)?;
    session.start(Utc::now())?;

    let ui_ctx = ctx.ui_context(false);
    let drafts = session.drafts();
    let draft = drafts.get_set_field(&args.plan, &exercise.id, args.set, DraftField::Time);
    let mut stopwatch = Stopwatch::from_draft(&draft);
    stopwatch.toggle();

    // Any line on stdin (or EOF) stops the stopwatch.
    let (stop_tx, stop_rx) = mpsc::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        let _ = stop_tx.send(());
    });

    if !ctx.quiet() {
        print(
            &ui_ctx,
            &format!(
                "{} set {}: press Enter to stop",
                exercise.name, args.set
            ),
        );
    }
    let seconds = loop {
        match stop_rx.recv_timeout(Duration::from_secs(1)) {
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if let Some(now) = stopwatch.tick() {
                    if ui_ctx.allows_animation() {
                        print!("\r{}", format_elapsed(now as u64));
                        let _ = std::io::stdout().flush();
                    }
                }
            }
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => match stopwatch.toggle() {
                StopwatchToggle::Stopped(seconds) => break seconds,
                StopwatchToggle::Started => continue,
            },
        }
    };

    drafts.save_set_field(
        &args.plan,
        &exercise.id,
        args.set,
        DraftField::Time,
        &seconds.to_string(),
    )?;

    if !ctx.quiet() {
        if ui_ctx.allows_animation() {
            println!();
        }
        let time = format!("{}s", seconds);
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Time recorded", &[("Exercise", &exercise.name), ("Time", &time)]),
        );
    }
    Ok(())
}

pub fn handle_finish(ctx: &AppContext, args: &PlanIdArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let session = state.session(&args.plan)?;
    let ui_ctx = ctx.ui_context(false);

    let outcome = session.finish(&Local::now(), || {
        ctx.confirm("Finish an empty workout?").unwrap_or_else(|e| {
            tracing::warn!(error = %e, "confirmation prompt failed");
            false
        })
    })?;

    match outcome {
        FinishOutcome::Declined => {
            match ui_ctx.mode {
                OutputMode::Pretty => {
                    print(&ui_ctx, &badge(&ui_ctx, Badge::Warn, "Workout not saved"));
                }
                OutputMode::Plain | OutputMode::Json => {
                    println!("status=cancelled");
                }
            }
            Err(RepbookError::Cancelled(
                "Finishing an empty workout not confirmed\nHint: Re-run with --yes to save it anyway."
                    .to_string(),
            )
            .into())
        }
        FinishOutcome::Saved { entry, elapsed } => {
            if !ctx.quiet() {
                let count = entry.results.len().to_string();
                print(
                    &ui_ctx,
                    &receipt(
                        &ui_ctx,
                        "Workout saved",
                        &[
                            ("Plan", &args.plan),
                            ("Date", &entry.date),
                            ("Duration", &elapsed),
                            ("Exercises", &count),
                        ],
                    ),
                );
                if ui_ctx.mode.is_pretty() {
                    for line in crate::output::result_lines(&entry, Some(session.plan())) {
                        println!("    {}", line);
                    }
                }
            }
            Ok(())
        }
    }
}

pub fn handle_discard(ctx: &AppContext, args: &PlanIdArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let session = state.session(&args.plan)?;
    let ui_ctx = ctx.ui_context(false);

    if session.state() == SessionState::NotStarted {
        if !ctx.quiet() {
            print(&ui_ctx, &badge(&ui_ctx, Badge::Info, "No workout in progress"));
        }
        return Ok(());
    }

    ctx.require_confirmation(
        &format!("Discard the {} workout in progress?", args.plan),
        "Discarding the workout",
    )?;
    session.discard()?;

    if !ctx.quiet() {
        print(&ui_ctx, &receipt(&ui_ctx, "Workout discarded", &[("Plan", &args.plan)]));
    }
    Ok(())
}

fn check_set(exercise: &Exercise, set: u32) -> anyhow::Result<()> {
    if set == 0 || set > exercise.sets {
        return Err(CliError::invalid_input(format!(
            "Set {} is out of range: '{}' has {} sets",
            set, exercise.id, exercise.sets
        ))
        .into());
    }
    Ok(())
}

/// Reject fields the exercise type does not record, and values that are
/// not numbers. Empty values are allowed (they clear the draft).
fn validate_field(exercise: &Exercise, field: DraftField, value: &str) -> anyhow::Result<()> {
    let allowed = match exercise.kind {
        ExerciseType::Standard => matches!(field, DraftField::Kg | DraftField::Reps),
        ExerciseType::RepsOnly => field == DraftField::Reps,
        ExerciseType::Time => field == DraftField::Time,
    };
    if !allowed {
        return Err(CliError::invalid_input(format!(
            "Exercise '{}' ({}) does not record --{}",
            exercise.id,
            exercise.kind,
            field.as_str()
        ))
        .into());
    }

    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    match field {
        DraftField::Kg => {
            let kg = parse_number(value, "weight")?;
            if kg < 0.0 {
                return Err(CliError::invalid_input(format!("Invalid weight: {}", value)).into());
            }
        }
        DraftField::Reps | DraftField::Time => {
            value.parse::<u32>().map_err(|_| {
                CliError::invalid_input(format!("Invalid {}: {}", field.as_str(), value))
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use repbook_core::defaults::default_plan;

    fn exercise(plan: &str, id: &str) -> Exercise {
        default_plan(plan).unwrap().exercise(id).unwrap().clone()
    }

    #[test]
    fn test_check_set_bounds() {
        let ex = exercise("fbw", "f_1");
        assert!(check_set(&ex, 1).is_ok());
        assert!(check_set(&ex, ex.sets).is_ok());
        assert!(check_set(&ex, 0).is_err());
        assert!(check_set(&ex, ex.sets + 1).is_err());
    }

    #[test]
    fn test_validate_field_by_type() {
        let standard = exercise("fbw", "f_1");
        assert!(validate_field(&standard, DraftField::Kg, "102,5").is_ok());
        assert!(validate_field(&standard, DraftField::Reps, "8").is_ok());
        assert!(validate_field(&standard, DraftField::Time, "30").is_err());
        assert!(validate_field(&standard, DraftField::Reps, "eight").is_err());
        assert!(validate_field(&standard, DraftField::Kg, "").is_ok());

        let reps_only = exercise("gora", "g_8");
        assert!(validate_field(&reps_only, DraftField::Reps, "12").is_ok());
        assert!(validate_field(&reps_only, DraftField::Kg, "20").is_err());

        let timed = exercise("gora", "g_9");
        assert!(validate_field(&timed, DraftField::Time, "45").is_ok());
        assert!(validate_field(&timed, DraftField::Reps, "5").is_err());
    }
}
