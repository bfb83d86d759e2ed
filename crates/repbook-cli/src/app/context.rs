//! Application context for the Repbook CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config, and opens the application state on demand.

use std::io::IsTerminal;
use std::path::PathBuf;

use dialoguer::Confirm;
use once_cell::unsync::OnceCell;

use repbook_core::{AppState, Namespace, RepbookError, SqliteStore};

use crate::cli::Cli;
use crate::config::RepbookConfig;
use crate::errors::CliError;
use crate::ui::UiContext;

use super::resolver::{load_config, missing_store_message, resolve_store_path};

/// Application context that bundles CLI args with the config.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<RepbookConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// UI context for a command's output.
    pub fn ui_context(&self, json: bool) -> UiContext {
        UiContext::from_env(json, self.cli.no_color)
    }

    /// Get the config, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&RepbookConfig> {
        self.config.get_or_try_init(|| load_config(self.cli))
    }

    /// Path of the store file in use.
    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        Ok(resolve_store_path(self.cli, self.config()?))
    }

    /// Open the store and load the active profile's state.
    pub fn open_state(&self) -> anyhow::Result<AppState<SqliteStore>> {
        let config = self.config()?;
        let path = resolve_store_path(self.cli, config);
        if !path.exists() && self.cli.store.is_none() {
            return Err(CliError::not_found(
                missing_store_message(&path),
                "Hint: Run `repbook init` or pass --store <path>.",
            )
            .into());
        }

        let namespace = Namespace::new(config.profile.prefix.clone()).map_err(|e| {
            CliError::invalid_input(format!(
                "Profile prefix '{}' in config is not usable: {}",
                config.profile.prefix, e
            ))
        })?;
        let store = SqliteStore::open(&path)
            .map_err(|e| anyhow::anyhow!("Failed to open store {}: {}", path.display(), e))?;

        tracing::debug!(path = %path.display(), prefix = namespace.prefix(), "opened store");
        Ok(AppState::load(store, namespace, config.profile.name.clone()))
    }

    /// Ask for confirmation of a destructive action.
    ///
    /// `--yes` confirms without asking. Without a terminal (or in quiet
    /// mode) the answer is "no".
    pub fn confirm(&self, prompt: &str) -> anyhow::Result<bool> {
        if self.cli.yes {
            return Ok(true);
        }
        if !std::io::stdin().is_terminal() || self.quiet() {
            tracing::debug!(prompt, "declining confirmation without a terminal");
            return Ok(false);
        }
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    /// Like [`confirm`](Self::confirm), but a "no" aborts the command.
    pub fn require_confirmation(&self, prompt: &str, action: &str) -> anyhow::Result<()> {
        if self.confirm(prompt)? {
            Ok(())
        } else {
            Err(RepbookError::Cancelled(format!(
                "{} not confirmed\nHint: Re-run with --yes to confirm.",
                action
            ))
            .into())
        }
    }
}
