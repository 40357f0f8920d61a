use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;

use odometer_core::AppConfig;

pub fn run(config: &AppConfig, path: bool, init: bool) -> Result<()> {
    let config_path = AppConfig::config_path();

    if path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        write_default(&config_path)?;
        println!("Wrote default configuration to {}", config_path.display());
        return Ok(());
    }

    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Write a default configuration file, refusing to overwrite one
fn write_default(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    AppConfig::default().save_to(path)?;
    info!(path = %path.display(), "configuration initialized");
    Ok(())
}
