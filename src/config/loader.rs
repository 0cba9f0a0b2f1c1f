//! Configuration loading and discovery for `pxs.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::PxsConfig;
use crate::smoothing::{EdgeMode, OverflowMode};
use log::debug;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for.
pub const CONFIG_FILE_NAME: &str = "pxs.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pxs.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the upscaler border policy
    pub edge_mode: Option<EdgeMode>,
    /// Override the brighten overflow policy
    pub overflow: Option<OverflowMode>,
    /// Override the GIF frame duration
    pub frame_duration_ms: Option<u32>,
    /// Override GIF looping
    pub loop_forever: Option<bool>,
}

/// Find pxs.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for pxs.toml
/// 2. Check XDG_CONFIG_HOME/pixelsmooth/pxs.toml (or ~/.config/pixelsmooth/pxs.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find pxs.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("pixelsmooth").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find pxs.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a pxs.toml file.
///
/// If a path is provided, loads from that file (a missing file is an error).
/// Otherwise uses [`find_config`], falling back to defaults when nothing is
/// found.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("art/pxs.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<PxsConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            debug!("No {} found, using defaults", CONFIG_FILE_NAME);
            Ok(PxsConfig::default())
        }
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<PxsConfig, ConfigError> {
    debug!("Loading config from {}", path.display());
    let contents = fs::read_to_string(path)?;
    let config: PxsConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut PxsConfig, overrides: &CliOverrides) {
    if let Some(edge_mode) = overrides.edge_mode {
        config.smoothing.edge_mode = edge_mode;
    }

    if let Some(overflow) = overrides.overflow {
        config.smoothing.overflow = overflow;
    }

    if let Some(duration) = overrides.frame_duration_ms {
        config.gif.frame_duration_ms = duration;
    }

    if let Some(loop_forever) = overrides.loop_forever {
        config.gif.loop_forever = loop_forever;
    }
}
