//! Repbook CLI - a local-first workout log
//!
//! This is the command-line interface for Repbook. It drives the core
//! library: plans, the workout in progress, history, measurements,
//! cardio, progress and backups.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use repbook_core::VERSION;

use crate::app::AppContext;
use crate::cli::{
    BackupSubcommand, CardioSubcommand, Cli, Commands, HistorySubcommand, LogoSubcommand,
    MeasureSubcommand, PlansSubcommand, ProfileSubcommand, SettingsSubcommand, ToolsSubcommand,
    WorkoutSubcommand,
};
use crate::commands::{
    backup, cardio, history, init, measurements, misc, plans, profile, progress, settings, tools,
    workout,
};
use crate::errors::exit_code_for;
use crate::ui::print_error;

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false);

        let error_msg = format!("{}", e);
        let (message, hint) = split_error_hint(&error_msg);

        print_error(&ui_ctx, message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_env(constants::env::LOG)
        .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Split an error message into its text and hint, or provide contextual
/// hints for common error patterns.
fn split_error_hint(error: &str) -> (&str, Option<String>) {
    for marker in ["\nHint:", "\nhint:"] {
        if let Some(idx) = error.find(marker) {
            let hint = error[idx + marker.len()..].trim().to_string();
            return (error[..idx].trim_end(), Some(hint));
        }
    }

    let error_lower = error.to_lowercase();

    if error_lower.contains("workout plan not found") {
        return (
            error,
            Some("Run `repbook plans list` to see available plans.".to_string()),
        );
    }

    if error_lower.contains("exercise") && error_lower.contains("not found") {
        return (
            error,
            Some("Run `repbook plans show <plan>` to see exercise IDs.".to_string()),
        );
    }

    if error_lower.contains("history entry") && error_lower.contains("not found") {
        return (
            error,
            Some("Run `repbook history list <plan>` to see entry positions.".to_string()),
        );
    }

    if error_lower.contains("no previous result") {
        return (
            error,
            Some("Finish a workout with weights first, or log them with `repbook workout log`.".to_string()),
        );
    }

    if error_lower.contains("backup") && error_lower.contains("json") {
        return (
            error,
            Some("Backups are JSON objects created by `repbook backup export`.".to_string()),
        );
    }

    (error, None)
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Plans(args)) => match &args.command {
            PlansSubcommand::List(output) => plans::handle_list(ctx, output)?,
            PlansSubcommand::Show(args) => plans::handle_show(ctx, args)?,
            PlansSubcommand::AddExercise(args) => plans::handle_add_exercise(ctx, args)?,
            PlansSubcommand::EditExercise(args) => plans::handle_edit_exercise(ctx, args)?,
            PlansSubcommand::RemoveExercise(args) => plans::handle_remove_exercise(ctx, args)?,
            PlansSubcommand::Move(args) => plans::handle_move(ctx, args)?,
            PlansSubcommand::Reset(args) => plans::handle_reset(ctx, args)?,
        },
        Some(Commands::Workout(args)) => match &args.command {
            WorkoutSubcommand::Start(args) => workout::handle_start(ctx, args)?,
            WorkoutSubcommand::Log(args) => workout::handle_log(ctx, args)?,
            WorkoutSubcommand::Note(args) => workout::handle_note(ctx, args)?,
            WorkoutSubcommand::Fill(args) => workout::handle_fill(ctx, args)?,
            WorkoutSubcommand::Status(args) => workout::handle_status(ctx, args)?,
            WorkoutSubcommand::Timer(args) => workout::handle_timer(ctx, args)?,
            WorkoutSubcommand::Finish(args) => workout::handle_finish(ctx, args)?,
            WorkoutSubcommand::Discard(args) => workout::handle_discard(ctx, args)?,
        },
        Some(Commands::History(args)) => match &args.command {
            HistorySubcommand::List(args) => history::handle_list(ctx, args)?,
            HistorySubcommand::Add(args) => history::handle_add(ctx, args)?,
            HistorySubcommand::EditDate(args) => history::handle_edit_date(ctx, args)?,
            HistorySubcommand::Delete(args) => history::handle_delete(ctx, args)?,
        },
        Some(Commands::Measure(args)) => match &args.command {
            MeasureSubcommand::Add(args) => measurements::handle_add(ctx, args)?,
            MeasureSubcommand::List(output) => measurements::handle_list(ctx, output)?,
            MeasureSubcommand::Delete(args) => measurements::handle_delete(ctx, args)?,
            MeasureSubcommand::Chart(args) => measurements::handle_chart(ctx, args)?,
        },
        Some(Commands::Cardio(args)) => match &args.command {
            CardioSubcommand::Add(args) => cardio::handle_add(ctx, args)?,
            CardioSubcommand::List(args) => cardio::handle_list(ctx, args)?,
            CardioSubcommand::Delete(args) => cardio::handle_delete(ctx, args)?,
        },
        Some(Commands::Progress(args)) => {
            progress::handle_progress(ctx, args)?;
        }
        Some(Commands::Tools(args)) => match &args.command {
            ToolsSubcommand::OneRm(args) => tools::handle_one_rm(ctx, args)?,
            ToolsSubcommand::Plates(args) => tools::handle_plates(ctx, args)?,
            ToolsSubcommand::Rest(args) => tools::handle_rest(ctx, args)?,
        },
        Some(Commands::Settings(args)) => match &args.command {
            SettingsSubcommand::Show(output) => settings::handle_show(ctx, output)?,
            SettingsSubcommand::Set(args) => settings::handle_set(ctx, args)?,
        },
        Some(Commands::Logo(args)) => match &args.command {
            LogoSubcommand::Show => settings::handle_logo_show(ctx)?,
            LogoSubcommand::Set(args) => settings::handle_logo_set(ctx, args)?,
        },
        Some(Commands::Backup(args)) => match &args.command {
            BackupSubcommand::Export(args) => backup::handle_export(ctx, args)?,
            BackupSubcommand::Import(args) => backup::handle_import(ctx, args)?,
        },
        Some(Commands::Profile(args)) => match &args.command {
            ProfileSubcommand::Show(output) => profile::handle_show(ctx, output)?,
            ProfileSubcommand::Switch(args) => profile::handle_switch(ctx, args)?,
        },
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            println!("Repbook {}", VERSION);
            println!();
            println!("Get started:");
            println!("  repbook init");
            println!("  repbook plans list");
            println!("  repbook workout start fbw");
            println!();
            println!("Run `repbook --help` for all commands.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_explicit_hint() {
        let (message, hint) = split_error_hint("No config found\nHint: Run `repbook init`.");
        assert_eq!(message, "No config found");
        assert_eq!(hint.as_deref(), Some("Run `repbook init`."));
    }

    #[test]
    fn test_contextual_hint_for_unknown_plan() {
        let (message, hint) = split_error_hint("Workout plan not found: legs");
        assert_eq!(message, "Workout plan not found: legs");
        assert!(hint.unwrap().contains("plans list"));
    }

    #[test]
    fn test_no_hint() {
        let (_, hint) = split_error_hint("disk full");
        assert!(hint.is_none());
    }
}
