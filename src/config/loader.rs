//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields optional; unset fields fall back to hardcoded defaults.
/// Corresponds to `~/.config/pinview/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to the tracing log file.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Cap on pinned preview height, in lines.
    #[serde(default)]
    pub preview_max_lines: Option<u16>,

    /// Event poll timeout in milliseconds.
    #[serde(default)]
    pub tick_rate_ms: Option<u64>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Path to the tracing log file.
    pub log_file_path: PathBuf,
    /// Cap on pinned preview height, in lines.
    pub preview_max_lines: u16,
    /// Event poll timeout in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_file_path: default_log_path(),
            preview_max_lines: 5,
            tick_rate_ms: 250,
        }
    }
}

/// Resolve the default log file path.
///
/// `~/.local/state/pinview/pinview.log` on Unix-like systems; falls back to
/// the current directory when no state directory is available.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("pinview").join("pinview.log")
    } else {
        PathBuf::from("pinview.log")
    }
}

/// Resolve the default config file path.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pinview").join("config.toml"))
}

/// Load a config file from a specific path.
///
/// Missing files are not errors (`Ok(None)`); defaults apply.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Highest to lowest: explicit `config_path` (CLI `--config`), the
/// `PINVIEW_CONFIG` environment variable, then the default path.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("PINVIEW_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge a loaded config file into the defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        preview_max_lines: config
            .preview_max_lines
            .unwrap_or(defaults.preview_max_lines),
        tick_rate_ms: config.tick_rate_ms.unwrap_or(defaults.tick_rate_ms),
    }
}

/// Apply CLI argument overrides. CLI flags beat every other source.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    preview_lines_override: Option<u16>,
) -> ResolvedConfig {
    if let Some(lines) = preview_lines_override {
        config.preview_max_lines = lines;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
