use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use repbook_core::defaults::{DEFAULT_PREFIX, DEFAULT_PROFILE_NAME};

use crate::constants::{APP_DIR, STORE_FILE};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepbookConfig {
    pub profile: ProfileSection,
    pub store: StoreSection,
}

/// Identity of the active install: shown on every screen, and the key
/// prefix its data lives under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSection {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: String,
}

impl RepbookConfig {
    pub fn new(name: String, prefix: String, store_path: &Path) -> Self {
        Self {
            profile: ProfileSection { name, prefix },
            store: StoreSection {
                path: store_path.to_string_lossy().to_string(),
            },
        }
    }
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join(STORE_FILE))
}

pub fn read_config(path: &Path) -> anyhow::Result<RepbookConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &RepbookConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join(APP_DIR));
        }
    }
    Ok(home_dir()?.join(".config").join(APP_DIR))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join(APP_DIR));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join(APP_DIR))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_toml_layout() {
        let config = RepbookConfig::new(
            "Anna K.".to_string(),
            "anna_v1".to_string(),
            Path::new("/tmp/repbook.db"),
        );
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("[profile]"));
        assert!(text.contains("name = \"Anna K.\""));
        assert!(text.contains("[store]"));

        let parsed: RepbookConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.profile.prefix, "anna_v1");
        assert_eq!(parsed.store.path, "/tmp/repbook.db");
    }

    #[test]
    fn test_default_profile() {
        let profile = ProfileSection::default();
        assert_eq!(profile.name, DEFAULT_PROFILE_NAME);
        assert_eq!(profile.prefix, DEFAULT_PREFIX);
    }
}
