use chrono::Utc;

use repbook_core::cardio::weekly_groups;
use repbook_core::model::{CardioSession, CardioType};

use crate::app::AppContext;
use crate::cli::{CardioAddArgs, CardioListArgs, IdArgs};
use crate::errors::CliError;
use crate::helpers::{parse_date, today};
use crate::output::print_json;
use crate::ui::format::single_line;
use crate::ui::{badge, blank_line, header, hint, print, receipt, simple_table, Badge, Column};

pub fn handle_add(ctx: &AppContext, args: &CardioAddArgs) -> anyhow::Result<()> {
    let kind: CardioType = args.kind.trim().parse()?;
    let duration = args.duration.trim();
    if duration.is_empty() {
        return Err(CliError::invalid_input(
            "Duration cannot be empty\nHint: Pass e.g. --duration \"30 min\".",
        )
        .into());
    }
    let date = match args.date.as_deref() {
        Some(value) => parse_date(value)?,
        None => today(),
    };

    let state = ctx.open_state()?;
    let session = CardioSession {
        id: Utc::now().timestamp_millis().to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        kind,
        duration: duration.to_string(),
        notes: args
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
    };
    let saved = state.cardio().add(session)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Cardio saved",
                &[
                    ("ID", &saved.id),
                    ("Date", &saved.date),
                    ("Type", saved.kind.label()),
                    ("Duration", &saved.duration),
                ],
            ),
        );
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext, args: &CardioListArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let ui_ctx = ctx.ui_context(args.output.json);
    let sessions = state.cardio().list();

    if ui_ctx.mode.is_json() {
        if args.weekly {
            return print_json(&weekly_groups(&sessions));
        }
        return print_json(&sessions);
    }

    print(&ui_ctx, &header(&ui_ctx, "cardio", None));
    if sessions.is_empty() {
        print(&ui_ctx, &badge(&ui_ctx, Badge::Info, "No cardio sessions yet"));
        if ui_ctx.mode.is_pretty() {
            print(&ui_ctx, &hint(&ui_ctx, "repbook cardio add --duration \"30 min\""));
        }
        return Ok(());
    }

    let columns = [
        Column::new("ID"),
        Column::new("Date"),
        Column::new("Type"),
        Column::new("Duration"),
        Column::new("Notes"),
    ];

    if !args.weekly {
        blank_line(&ui_ctx);
        let rows: Vec<Vec<String>> = sessions.iter().map(session_row).collect();
        print(&ui_ctx, &simple_table(&ui_ctx, &columns, &rows));
        return Ok(());
    }

    for week in weekly_groups(&sessions) {
        blank_line(&ui_ctx);
        if ui_ctx.mode.is_pretty() {
            println!("Tydzień {} ({} sessions)", week.label, week.sessions.len());
        } else {
            println!("week\t{}\t{}", week.label, week.sessions.len());
        }
        let rows: Vec<Vec<String>> = week.sessions.iter().map(session_row).collect();
        print(&ui_ctx, &simple_table(&ui_ctx, &columns, &rows));
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &IdArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    ctx.require_confirmation(
        &format!("Delete cardio session {}?", args.id),
        "Deleting the cardio session",
    )?;
    let removed = state.cardio().delete(&args.id)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Cardio deleted",
                &[("ID", &removed.id), ("Date", &removed.date)],
            ),
        );
    }
    Ok(())
}

fn session_row(session: &CardioSession) -> Vec<String> {
    vec![
        session.id.clone(),
        session.date.clone(),
        session.kind.label().to_string(),
        session.duration.clone(),
        session.notes.as_deref().map(single_line).unwrap_or_default(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_row_flattens_notes() {
        let session = CardioSession {
            id: "1".to_string(),
            date: "2025-03-10".to_string(),
            kind: CardioType::Orbitrek,
            duration: "20 min".to_string(),
            notes: Some("easy\npace".to_string()),
        };
        let row = session_row(&session);
        assert_eq!(row[2], "Orbitrek");
        assert_eq!(row[4], "easy pace");
    }
}
