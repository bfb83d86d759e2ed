use repbook_core::history::display_date;
use repbook_core::model::WorkoutHistoryEntry;
use repbook_core::RepbookError;

use crate::app::AppContext;
use crate::cli::{HistoryAddArgs, HistoryEditDateArgs, HistoryListArgs, PlanIndexArgs};
use crate::helpers::{parse_position, parse_result_pairs, parse_when};
use crate::output::{history_entry_json, print_json, result_lines};
use crate::ui::{badge, blank_line, divider, header, hint, print, receipt, Badge};

pub fn handle_list(ctx: &AppContext, args: &HistoryListArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let ui_ctx = ctx.ui_context(args.output.json);

    let plan_ids: Vec<String> = match &args.plan {
        Some(plan) => {
            if !state.workouts().contains_key(plan) {
                return Err(RepbookError::PlanNotFound(plan.clone()).into());
            }
            vec![plan.clone()]
        }
        None => state.workouts().keys().cloned().collect(),
    };

    let history = state.history();
    let lists: Vec<(String, Vec<WorkoutHistoryEntry>)> = plan_ids
        .into_iter()
        .map(|plan_id| {
            let entries = history.list(&plan_id);
            (plan_id, entries)
        })
        .collect();

    if ui_ctx.mode.is_json() {
        let entries: Vec<serde_json::Value> = lists
            .iter()
            .flat_map(|(plan_id, entries)| {
                let plan = state.workouts().get(plan_id);
                entries
                    .iter()
                    .enumerate()
                    .map(move |(i, entry)| history_entry_json(plan_id, i + 1, entry, plan))
            })
            .collect();
        return print_json(&entries);
    }

    let total: usize = lists.iter().map(|(_, entries)| entries.len()).sum();
    print(&ui_ctx, &header(&ui_ctx, "history", args.plan.as_deref()));
    if total == 0 {
        print(&ui_ctx, &badge(&ui_ctx, Badge::Info, "No finished workouts yet"));
        return Ok(());
    }

    for (plan_id, entries) in &lists {
        if entries.is_empty() {
            continue;
        }
        let plan = state.workouts().get(plan_id);
        blank_line(&ui_ctx);
        for (i, entry) in entries.iter().enumerate() {
            if ui_ctx.mode.is_pretty() {
                println!("{} #{}  {}", plan_id, i + 1, entry.date);
                for line in result_lines(entry, plan) {
                    println!("    {}", line);
                }
            } else {
                // plan, position, date, then one tab-separated field per result
                let mut fields = vec![plan_id.clone(), (i + 1).to_string(), entry.date.clone()];
                fields.extend(result_lines(entry, plan));
                println!("{}", fields.join("\t"));
            }
        }
        if ui_ctx.mode.is_pretty() {
            print(&ui_ctx, &divider(&ui_ctx));
        }
    }
    if ui_ctx.mode.is_pretty() {
        print(
            &ui_ctx,
            &hint(&ui_ctx, "repbook history edit-date <plan> <#> <date>  \u{00B7}  repbook progress <plan>"),
        );
    }
    Ok(())
}

pub fn handle_add(ctx: &AppContext, args: &HistoryAddArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    if !state.workouts().contains_key(&args.plan) {
        return Err(RepbookError::PlanNotFound(args.plan.clone()).into());
    }
    let at = parse_when(&args.at)?;
    let results = parse_result_pairs(&args.result)?;

    let entry = state.history().add_manual(
        &args.plan,
        display_date(&at),
        at.timestamp_millis(),
        results,
    )?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let count = entry.results.len().to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "History entry added",
                &[("Plan", &args.plan), ("Date", &entry.date), ("Exercises", &count)],
            ),
        );
    }
    Ok(())
}

pub fn handle_edit_date(ctx: &AppContext, args: &HistoryEditDateArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let index = parse_position(args.position, "History entry")?;
    require_entry(&state.history().list(&args.plan), &args.plan, args.position, index)?;

    state
        .history()
        .edit_date(&args.plan, index, args.date.trim())?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let position = args.position.to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Date updated",
                &[("Plan", &args.plan), ("Position", &position), ("Date", args.date.trim())],
            ),
        );
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &PlanIndexArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let index = parse_position(args.position, "History entry")?;
    let entries = state.history().list(&args.plan);
    let entry = require_entry(&entries, &args.plan, args.position, index)?;

    ctx.require_confirmation(
        &format!("Delete the {} workout from {}?", args.plan, entry.date),
        "Deleting the history entry",
    )?;
    let removed = state.history().delete(&args.plan, index)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "History entry deleted",
                &[("Plan", &args.plan), ("Date", &removed.date)],
            ),
        );
    }
    Ok(())
}

fn require_entry<'e>(
    entries: &'e [WorkoutHistoryEntry],
    plan_id: &str,
    position: usize,
    index: usize,
) -> anyhow::Result<&'e WorkoutHistoryEntry> {
    entries.get(index).ok_or_else(|| {
        RepbookError::NotFound(format!(
            "History entry #{} of plan '{}' ({} entries)",
            position,
            plan_id,
            entries.len()
        ))
        .into()
    })
}
