use std::path::PathBuf;

use anyhow::{Context, Result};

use sync_core::config::{Config, ConfigPaths};

pub mod badge;
pub mod business;
pub mod config;
pub mod status;

/// Paths given on the command line that win over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub store_path: Option<PathBuf>,
}

/// Effective config plus the store location it resolves to.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub store_path: PathBuf,
}

impl Session {
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let paths = ConfigPaths::resolve()?;
        let config_path = overrides
            .config_path
            .clone()
            .unwrap_or_else(|| paths.config_path.clone());
        let config = Config::load_or_default(&config_path)
            .with_context(|| format!("load config {}", config_path.display()))?;
        let store_path = overrides
            .store_path
            .clone()
            .unwrap_or_else(|| config.store_path(&paths));
        tracing::debug!(
            config = %config_path.display(),
            store = %store_path.display(),
            "resolved session"
        );
        Ok(Self { config, store_path })
    }
}
