use std::path::{Path, PathBuf};

use repbook_core::backup::{backup_filename, import_file, write_backup};

use crate::app::AppContext;
use crate::cli::{BackupExportArgs, BackupImportArgs};
use crate::errors::CliError;
use crate::helpers::today;
use crate::ui::{print, receipt};

pub fn handle_export(ctx: &AppContext, args: &BackupExportArgs) -> anyhow::Result<()> {
    let state = ctx.open_state()?;
    let filename = backup_filename(state.display_name(), today());
    let path = export_path(args.dest.as_deref(), &filename)?;

    let keys = write_backup(state.store(), state.namespace(), &path)
        .map_err(|e| anyhow::anyhow!("Failed to write backup {}: {}", path.display(), e))?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let file = path.display().to_string();
        let keys = keys.to_string();
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Backup exported", &[("File", &file), ("Keys", &keys)]),
        );
    }
    Ok(())
}

pub fn handle_import(ctx: &AppContext, args: &BackupImportArgs) -> anyhow::Result<()> {
    let path = Path::new(&args.file);
    if !path.is_file() {
        return Err(CliError::not_found(
            format!("Backup file not found: {}", path.display()),
            "Hint: Create one with `repbook backup export`.",
        )
        .into());
    }

    let mut state = ctx.open_state()?;
    ctx.require_confirmation(
        &format!(
            "Import {}? Keys in the backup overwrite the stored ones.",
            path.display()
        ),
        "Importing the backup",
    )?;

    let keys = import_file(state.store(), path)?;
    state.reload();

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let file = path.display().to_string();
        let keys = keys.to_string();
        let plans = state.workouts().len().to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Backup imported",
                &[("File", &file), ("Keys", &keys), ("Plans", &plans)],
            ),
        );
    }
    Ok(())
}

/// Where an export lands: inside `dest` when it is a directory, at `dest`
/// otherwise, or in the working directory.
fn export_path(dest: Option<&str>, filename: &str) -> anyhow::Result<PathBuf> {
    match dest {
        Some(dest) => {
            let dest = PathBuf::from(dest);
            if dest.is_dir() {
                Ok(dest.join(filename))
            } else {
                Ok(dest)
            }
        }
        None => Ok(std::env::current_dir()?.join(filename)),
    }
}
