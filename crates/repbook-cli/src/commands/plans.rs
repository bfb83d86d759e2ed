use chrono::Utc;

use repbook_core::model::{Exercise, ExerciseType, WorkoutPlan};
use repbook_core::plans::{self, Direction, ExercisePatch};
use repbook_core::{AppState, RepbookError, SqliteStore};

use crate::app::AppContext;
use crate::cli::{
    AddExerciseArgs, EditExerciseArgs, ExerciseFields, MoveDirection, MoveExerciseArgs,
    OutputArgs, PlanIdArgs, PlanIndexArgs, PlanShowArgs,
};
use crate::errors::CliError;
use crate::helpers::parse_position;
use crate::output::print_json;
use crate::ui::{blank_line, header, hint, kv, print, receipt, simple_table, table, Column};

pub fn handle_list(ctx: &AppContext, output: &OutputArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let ui_ctx = ctx.ui_context(output.json);

    if ui_ctx.mode.is_json() {
        let plans: Vec<serde_json::Value> = state
            .workouts()
            .iter()
            .map(|(id, plan)| {
                serde_json::json!({
                    "id": id,
                    "title": plan.title,
                    "warmup": plan.warmup.len(),
                    "exercises": plan.exercises.len(),
                })
            })
            .collect();
        return print_json(&plans);
    }

    let rows: Vec<Vec<String>> = state
        .workouts()
        .iter()
        .map(|(id, plan)| {
            vec![
                id.clone(),
                plan.title.clone(),
                plan.exercises.len().to_string(),
            ]
        })
        .collect();

    print(&ui_ctx, &header(&ui_ctx, "plans", Some(state.display_name())));
    blank_line(&ui_ctx);
    print(
        &ui_ctx,
        &simple_table(
            &ui_ctx,
            &[Column::new("Plan"), Column::new("Title"), Column::numeric("Exercises")],
            &rows,
        ),
    );
    blank_line(&ui_ctx);
    if ui_ctx.mode.is_pretty() {
        print(&ui_ctx, &hint(&ui_ctx, "repbook plans show <plan>"));
    }
    Ok(())
}

pub fn handle_show(ctx: &AppContext, args: &PlanShowArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let plan = require_plan(&state, &args.plan)?;
    let ui_ctx = ctx.ui_context(args.output.json);

    if ui_ctx.mode.is_json() {
        return print_json(&serde_json::json!({
            "id": args.plan,
            "title": plan.title,
            "warmup": plan.warmup,
            "exercises": plan.exercises,
        }));
    }

    print(&ui_ctx, &header(&ui_ctx, "plan", Some(&args.plan)));
    print(&ui_ctx, &kv(&ui_ctx, "Title", &plan.title));

    if !plan.warmup.is_empty() {
        blank_line(&ui_ctx);
        let rows: Vec<Vec<String>> = plan
            .warmup
            .iter()
            .map(|w| vec!["warmup".to_string(), w.name.clone(), w.reps.clone()])
            .collect();
        print(
            &ui_ctx,
            &simple_table(
                &ui_ctx,
                &[Column::new("Warmup"), Column::new("Name"), Column::new("Reps")],
                &rows,
            ),
        );
    }

    blank_line(&ui_ctx);
    let rows: Vec<Vec<String>> = plan
        .exercises
        .iter()
        .enumerate()
        .map(|(i, ex)| exercise_row(i + 1, ex))
        .collect();
    print(
        &ui_ctx,
        &table(
            &ui_ctx,
            &[
                Column::numeric("#"),
                Column::new("ID"),
                Column::new("Name"),
                Column::numeric("Sets"),
                Column::new("Reps"),
                Column::new("Tempo"),
                Column::new("RIR"),
                Column::numeric("Rest"),
                Column::new("Type"),
            ],
            &rows,
        ),
    );
    Ok(())
}

pub fn handle_add_exercise(ctx: &AppContext, args: &AddExerciseArgs) -> anyhow::Result<()> {
    let mut state = ctx.open_state()?;
    let patch = patch_from_fields(&args.fields)?;
    let exercise = plans::new_exercise(Utc::now().timestamp_millis());

    let (index, exercise) = state.edit_workouts(|workouts| {
        let index = plans::add_exercise(workouts, &args.plan, exercise)?;
        if !patch.is_empty() {
            plans::update_exercise(workouts, &args.plan, index, patch)?;
        }
        let added = plans::plan_mut(workouts, &args.plan)?.exercises[index].clone();
        Ok((index, added))
    })?;
    tracing::info!(plan = %args.plan, exercise = %exercise.id, "added exercise");

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let position = (index + 1).to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Exercise added",
                &[
                    ("Plan", &args.plan),
                    ("Position", &position),
                    ("ID", &exercise.id),
                    ("Name", &exercise.name),
                ],
            ),
        );
    }
    Ok(())
}

pub fn handle_edit_exercise(ctx: &AppContext, args: &EditExerciseArgs) -> anyhow::Result<()> {
    let mut state = ctx.open_state()?;
    let index = parse_position(args.position, "Exercise")?;
    let patch = patch_from_fields(&args.fields)?;
    if patch.is_empty() {
        return Err(CliError::invalid_input(
            "Nothing to change\nHint: Pass at least one field, e.g. --sets 4 or --reps 8-10.",
        )
        .into());
    }

    let exercise = state.edit_workouts(|workouts| {
        plans::update_exercise(workouts, &args.plan, index, patch)?;
        Ok(plans::plan_mut(workouts, &args.plan)?.exercises[index].clone())
    })?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let sets = exercise.sets.to_string();
        let rest = format!("{}s", exercise.rest);
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Exercise updated",
                &[
                    ("Plan", &args.plan),
                    ("ID", &exercise.id),
                    ("Name", &exercise.name),
                    ("Sets", &sets),
                    ("Reps", &exercise.reps),
                    ("Rest", &rest),
                ],
            ),
        );
    }
    Ok(())
}

pub fn handle_remove_exercise(ctx: &AppContext, args: &PlanIndexArgs) -> anyhow::Result<()> {
    let mut state = ctx.open_state()?;
    let index = parse_position(args.position, "Exercise")?;
    let name = exercise_at(&state, &args.plan, args.position, index)?.name.clone();

    ctx.require_confirmation(
        &format!("Remove '{}' from plan {}?", name, args.plan),
        "Removing the exercise",
    )?;
    let removed = state.edit_workouts(|workouts| plans::remove_exercise(workouts, &args.plan, index))?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Exercise removed",
                &[("Plan", &args.plan), ("ID", &removed.id), ("Name", &removed.name)],
            ),
        );
    }
    Ok(())
}

pub fn handle_move(ctx: &AppContext, args: &MoveExerciseArgs) -> anyhow::Result<()> {
    let mut state = ctx.open_state()?;
    let index = parse_position(args.position, "Exercise")?;
    let direction = match args.direction {
        MoveDirection::Up => Direction::Up,
        MoveDirection::Down => Direction::Down,
    };

    let target = state.edit_workouts(|workouts| {
        plans::move_exercise(workouts, &args.plan, index, direction)
    })?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let from = args.position.to_string();
        let to = (target + 1).to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Exercise moved",
                &[("Plan", &args.plan), ("From", &from), ("To", &to)],
            ),
        );
    }
    Ok(())
}

pub fn handle_reset(ctx: &AppContext, args: &PlanIdArgs) -> anyhow::Result<()> {
    let mut state = ctx.open_state()?;
    require_plan(&state, &args.plan)?;

    ctx.require_confirmation(
        &format!("Reset plan {} to its default exercises?", args.plan),
        "Resetting the plan",
    )?;
    state.edit_workouts(|workouts| plans::reset_plan(workouts, &args.plan))?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let count = state
            .workouts()
            .get(&args.plan)
            .map(|p| p.exercises.len())
            .unwrap_or(0)
            .to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Plan reset",
                &[("Plan", &args.plan), ("Exercises", &count)],
            ),
        );
    }
    Ok(())
}

fn require_plan<'s>(state: &'s AppState<SqliteStore>, plan_id: &str) -> anyhow::Result<&'s WorkoutPlan> {
    state
        .workouts()
        .get(plan_id)
        .ok_or_else(|| RepbookError::PlanNotFound(plan_id.to_string()).into())
}

fn exercise_at<'s>(
    state: &'s AppState<SqliteStore>,
    plan_id: &str,
    position: usize,
    index: usize,
) -> anyhow::Result<&'s Exercise> {
    require_plan(state, plan_id)?
        .exercises
        .get(index)
        .ok_or_else(|| {
            RepbookError::NotFound(format!("Exercise #{} in plan '{}'", position, plan_id)).into()
        })
}

fn patch_from_fields(fields: &ExerciseFields) -> anyhow::Result<ExercisePatch> {
    let kind = fields
        .kind
        .as_deref()
        .map(|k| k.parse::<ExerciseType>())
        .transpose()?;
    Ok(ExercisePatch {
        name: fields.name.clone(),
        pl: fields.pl.clone(),
        sets: fields.sets,
        reps: fields.reps.clone(),
        tempo: fields.tempo.clone(),
        rir: fields.rir.clone(),
        rest: fields.rest,
        link: fields.link.clone(),
        kind,
    })
}

fn exercise_row(position: usize, ex: &Exercise) -> Vec<String> {
    vec![
        position.to_string(),
        ex.id.clone(),
        ex.name.clone(),
        ex.sets.to_string(),
        ex.reps.clone(),
        ex.tempo.clone(),
        ex.rir.clone(),
        format!("{}s", ex.rest),
        ex.kind.to_string(),
    ]
}
