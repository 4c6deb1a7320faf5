use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub sync: SyncConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Overrides the reputation store location under the data dir.
    pub store_path: Option<String>,
    /// Write the computed tier back as the cached badge after a review.
    pub refresh_cached_badges: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub json: bool,
    pub show_projection: bool,
    pub show_assumption_note: bool,
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_path: PathBuf,
    pub data_dir: PathBuf,
    pub store_path: PathBuf,
}

impl Config {
    pub fn default_config() -> Self {
        Self {
            sync: SyncConfig {
                store_path: None,
                refresh_cached_badges: true,
            },
            display: DisplayConfig {
                json: false,
                show_projection: true,
                show_assumption_note: true,
            },
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let output = toml::to_string_pretty(self).context("render config TOML")?;
        Ok(output)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read config at {}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), SyncError> {
        if let Some(path) = &self.sync.store_path {
            if path.trim().is_empty() {
                return Err(SyncError::InvalidConfig(
                    "sync.store_path must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Loads the config if present, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default_config());
        }
        Self::load(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
        let contents = self.to_toml_string()?;
        fs::write(path, contents).with_context(|| format!("write config at {}", path.display()))?;
        Ok(())
    }

    /// Store location, honouring `sync.store_path` when set.
    pub fn store_path(&self, paths: &ConfigPaths) -> PathBuf {
        match &self.sync.store_path {
            Some(value) => expand_path_template(value, paths),
            None => paths.store_path.clone(),
        }
    }
}

impl ConfigPaths {
    pub fn resolve() -> Result<Self> {
        let project_dirs = ProjectDirs::from("app", "sync", "sync-badges")
            .ok_or_else(|| anyhow::anyhow!("unable to determine project directories"))?;
        let config_dir = project_dirs.config_dir();
        let data_dir = project_dirs.data_dir();
        Ok(Self {
            config_path: config_dir.join("config.toml"),
            data_dir: data_dir.to_path_buf(),
            store_path: data_dir.join("reputation.json"),
        })
    }
}

pub fn expand_path_template(template: &str, paths: &ConfigPaths) -> PathBuf {
    let home_dir = std::env::var("HOME").unwrap_or_else(|_| "/".to_string());
    let replaced = template
        .replace("${HOME}", &home_dir)
        .replace("${DATA_DIR}", &paths.data_dir.to_string_lossy());
    PathBuf::from(replaced)
}
