//! Settings file for tiltview: calibration, axis directions and the sample
//! source address, stored as TOML under the user's config directory.

mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

const APP_DIR: &str = "tiltview";
const CONFIG_FILE: &str = "config.toml";

/// Per-user settings directory (`$XDG_CONFIG_HOME/tiltview` on Linux,
/// `~/Library/Application Support/tiltview` on macOS, `{FOLDERID_RoamingAppData}\tiltview`
/// on Windows). Created if missing.
pub fn config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .context("No per-user config directory on this platform")?
        .join(APP_DIR);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Creating config directory {}", dir.display()))?;
    Ok(dir)
}

/// Settings file inside [`config_dir`].
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Settings from the per-user file; defaults when it does not exist yet.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path()?)
}

/// Write settings to the per-user file.
pub fn save_config(config: &AppConfig) -> Result<()> {
    save_config_to(config, &config_path()?)
}

/// Settings from `path`; defaults when the file is absent.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        info!(?path, "No config file, using default orientation settings");
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Reading {}", path.display()))?;
    let config = parse_config(&contents).with_context(|| format!("Parsing {}", path.display()))?;
    info!(
        ?path,
        calibration = config.orientation.enable_calibration,
        source = ?config.source.address,
        "Loaded config"
    );
    Ok(config)
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents).with_context(|| format!("Writing {}", path.display()))?;
    info!(?path, "Saved config");
    Ok(())
}

/// Parse a TOML config document. Missing keys take their defaults.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    Ok(toml::from_str(contents)?)
}
