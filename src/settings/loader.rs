//! Settings loading.
//!
//! Loads `VigilSettings` from a TOML file:
//! - an explicit `--config` path must exist and parse;
//! - the default `~/.vigil/settings.toml` is optional and silently
//!   falls back to defaults when absent.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::schema::VigilSettings;

/// Path to the global settings file.
pub fn settings_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vigil")
        .join("settings.toml")
}

/// Load settings from an explicit path, failing if it is missing or
/// malformed.
pub async fn load_from_path(path: &Path) -> Result<VigilSettings> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;

    let settings: VigilSettings = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

    tracing::info!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Load settings from the default location, using defaults when no
/// file exists.
pub async fn load_default() -> Result<VigilSettings> {
    let path = settings_path();
    if !path.exists() {
        tracing::debug!("Settings file not found at {}, using defaults", path.display());
        return Ok(VigilSettings::default());
    }
    load_from_path(&path).await
}
