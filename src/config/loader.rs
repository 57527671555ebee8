//! Configuration file loading with precedence handling.

use crate::view_state::controller::TableSettings;
use crate::view_state::types::RowHeight;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Largest accepted `overscan`; a window never needs more rows than a
/// screen holds.
pub const MAX_OVERSCAN: usize = 1024;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting has a value the application cannot use.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Setting name, as written in the file or environment.
        key: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/flowview/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Height of one table row, in terminal lines.
    #[serde(default)]
    pub row_height: Option<u32>,

    /// Height of the table header, in terminal lines.
    #[serde(default)]
    pub header_height: Option<u32>,

    /// Rows rendered beyond each edge of the viewport.
    #[serde(default)]
    pub overscan: Option<usize>,

    /// Slack when deciding whether the table is scrolled to the bottom.
    #[serde(default)]
    pub bottom_epsilon: Option<u32>,

    /// Event loop tick in milliseconds.
    #[serde(default)]
    pub tick_rate_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Row height; validated by [`ResolvedConfig::validate`].
    pub row_height: u32,
    /// Header height.
    pub header_height: u32,
    /// Overscan rows per side.
    pub overscan: usize,
    /// Bottom detection slack.
    pub bottom_epsilon: u32,
    /// Event loop tick in milliseconds.
    pub tick_rate_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            row_height: 1,
            header_height: 1,
            overscan: 1,
            bottom_epsilon: 0,
            tick_rate_ms: 250,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Check the merged values once, before any table is built.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero row height or tick
    /// rate, or an overscan above [`MAX_OVERSCAN`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        RowHeight::new(self.row_height).map_err(|e| ConfigError::InvalidValue {
            key: "row_height".to_string(),
            reason: e.to_string(),
        })?;
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "tick_rate_ms".to_string(),
                reason: "must be >= 1".to_string(),
            });
        }
        if self.overscan > MAX_OVERSCAN {
            return Err(ConfigError::InvalidValue {
                key: "overscan".to_string(),
                reason: format!("must be <= {MAX_OVERSCAN}"),
            });
        }
        Ok(())
    }

    /// Windowing settings for the flow table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero row height.
    pub fn table_settings(&self) -> Result<TableSettings, ConfigError> {
        let row_height = RowHeight::new(self.row_height).map_err(|e| ConfigError::InvalidValue {
            key: "row_height".to_string(),
            reason: e.to_string(),
        })?;
        Ok(TableSettings {
            row_height,
            header_height: self.header_height,
            overscan: self.overscan,
            bottom_epsilon: self.bottom_epsilon,
        })
    }

    /// Event loop tick interval.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/flowview/flowview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("flowview").join("flowview.log"),
        None => PathBuf::from("flowview.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
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

/// Resolve default config file path.
///
/// Returns `~/.config/flowview/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flowview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `FLOWVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/flowview/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("FLOWVIEW_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        row_height: config.row_height.unwrap_or(defaults.row_height),
        header_height: config.header_height.unwrap_or(defaults.header_height),
        overscan: config.overscan.unwrap_or(defaults.overscan),
        bottom_epsilon: config.bottom_epsilon.unwrap_or(defaults.bottom_epsilon),
        tick_rate_ms: config.tick_rate_ms.unwrap_or(defaults.tick_rate_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `FLOWVIEW_ROW_HEIGHT`: Override row height
/// - `FLOWVIEW_OVERSCAN`: Override overscan
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if a variable is set but not a number.
pub fn apply_env_overrides(config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

/// Same as [`apply_env_overrides`], reading variables through `lookup`.
pub fn apply_overrides_from(
    mut config: ResolvedConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(raw) = lookup("FLOWVIEW_ROW_HEIGHT") {
        config.row_height = parse_number("FLOWVIEW_ROW_HEIGHT", &raw)?;
    }
    if let Some(raw) = lookup("FLOWVIEW_OVERSCAN") {
        config.overscan = parse_number("FLOWVIEW_OVERSCAN", &raw)?;
    }
    Ok(config)
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: format!("{raw:?}: {e}"),
    })
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    row_height_override: Option<u32>,
) -> ResolvedConfig {
    if let Some(row_height) = row_height_override {
        config.row_height = row_height;
    }
    config
}

/// Run the whole precedence chain and validate the result.
///
/// # Errors
///
/// Returns the first read, parse, or validation failure.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    row_height_override: Option<u32>,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let config = apply_env_overrides(merge_config(file))?;
    let config = apply_cli_overrides(config, row_height_override);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
