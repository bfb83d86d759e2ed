use std::path::PathBuf;

use repbook_core::{Namespace, SqliteStore};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_store_path, write_config, ProfileSection, RepbookConfig};
use crate::errors::CliError;
use crate::ui::{blank_line, hint, print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {}\nHint: Pass --force to overwrite it, or use `repbook profile switch`.",
            config_path.display()
        ));
    }

    let defaults = ProfileSection::default();
    let name = args.name.clone().unwrap_or(defaults.name);
    let prefix = args.prefix.clone().unwrap_or(defaults.prefix);
    if name.trim().is_empty() {
        return Err(CliError::invalid_input("Display name cannot be empty").into());
    }
    Namespace::new(prefix.clone()).map_err(|e| CliError::invalid_input(e.to_string()))?;

    let store_path = match ctx.cli().store.as_deref() {
        Some(path) => PathBuf::from(path),
        None => default_store_path()?,
    };
    let store = SqliteStore::open(&store_path)
        .map_err(|e| anyhow::anyhow!("Failed to create store {}: {}", store_path.display(), e))?;
    let metadata = store.metadata()?;

    let config = RepbookConfig::new(name, prefix, &store_path);
    write_config(&config_path, &config)?;
    tracing::info!(config = %config_path.display(), store = %store_path.display(), "initialized");

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let config_display = config_path.display().to_string();
        let store_display = store_path.display().to_string();
        let device = metadata.device_id.to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Repbook initialized",
                &[
                    ("Name", &config.profile.name),
                    ("Prefix", &config.profile.prefix),
                    ("Config", &config_display),
                    ("Store", &store_display),
                    ("Device", &device),
                ],
            ),
        );
        blank_line(&ui_ctx);
        if ui_ctx.mode.is_pretty() {
            print(&ui_ctx, &hint(&ui_ctx, "repbook plans list  \u{00B7}  repbook workout start fbw"));
        }
    }
    Ok(())
}
