//! Path resolution for the config and store files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, ProfileSection, RepbookConfig, StoreSection};
use crate::constants::env;
use crate::errors::CliError;

/// Resolve the config file path, checking REPBOOK_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(env::CONFIG) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file.
///
/// Without a config, an explicit `--store` runs against the default
/// profile; anything else asks for `repbook init`.
pub fn load_config(cli: &Cli) -> anyhow::Result<RepbookConfig> {
    let config_path = resolve_config_path()?;
    if config_path.exists() {
        return read_config(&config_path);
    }

    match cli.store.as_deref() {
        Some(store) => {
            tracing::debug!(path = %config_path.display(), "no config, using default profile");
            Ok(RepbookConfig {
                profile: ProfileSection::default(),
                store: StoreSection {
                    path: store.to_string(),
                },
            })
        }
        None => Err(CliError::not_found(
            missing_config_message(&config_path),
            "Hint: Run `repbook init` to create it.",
        )
        .into()),
    }
}

/// Resolve the store file path from CLI args or config.
pub fn resolve_store_path(cli: &Cli, config: &RepbookConfig) -> PathBuf {
    match cli.store.as_deref() {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(&config.store.path),
    }
}

/// Error message when the config file is missing.
pub fn missing_config_message(config_path: &Path) -> String {
    format!("No repbook config found at {}", config_path.display())
}

/// Error message when the store file is missing.
pub fn missing_store_message(store_path: &Path) -> String {
    format!("No store found at {}", store_path.display())
}
