use std::path::PathBuf;

use anyhow::Result;

use sync_core::config::{Config, ConfigPaths};

use super::{Overrides, Session};

pub fn init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let paths = ConfigPaths::resolve()?;
    let config_path = path.unwrap_or(paths.config_path);
    if config_path.exists() && !force {
        return Err(anyhow::anyhow!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
    }
    let config = Config::default_config();
    config.save(&config_path)?;
    println!("Config written to {}", config_path.display());
    Ok(())
}

pub fn print_effective(overrides: &Overrides) -> Result<()> {
    let session = Session::resolve(overrides)?;
    let output = session.config.to_toml_string()?;
    println!("{}", output);
    println!("# store: {}", session.store_path.display());
    Ok(())
}
