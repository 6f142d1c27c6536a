//! Configuration file loading and config path resolution
//!
//! Config file resolution follows this priority order:
//! 1. Command-line argument (highest priority)
//! 2. `VOTD_CONFIG` environment variable
//! 3. Platform config directory (`~/.config/votd/config.toml` on Linux)
//!
//! A missing config file is never fatal: callers get [`TomlConfig::default`]
//! and every setting falls back to environment variables or compiled defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "VOTD_CONFIG";

/// Config file name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of `config.toml`
///
/// Every field is optional so a partial file only overrides what it names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Notion integration token
    pub notion_token: Option<String>,
    /// Notion page receiving the verse
    pub notion_page_id: Option<String>,
    /// Block inside the page to append to instead of the page root
    pub target_block_id: Option<String>,
    /// Delete existing content of the target before appending
    pub clear_daily: Option<bool>,
    /// `entry` or `image-only`
    pub publish_mode: Option<String>,
    pub logging: LoggingConfig,
    pub http: HttpSettings,
    pub sources: SourceSettings,
}

/// `[logging]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for the votd crates when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// `[http]` table: shared client settings, timeouts in seconds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub user_agent: Option<String>,
    pub page_timeout_secs: Option<u64>,
    pub api_timeout_secs: Option<u64>,
    pub probe_timeout_secs: Option<u64>,
    pub notion_timeout_secs: Option<u64>,
}

/// `[sources]` table: endpoint overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub votd_page_url: Option<String>,
    pub cdn_base_url: Option<String>,
    pub text_api_url: Option<String>,
    pub notion_api_url: Option<String>,
}

/// Resolve which config file to read, if any
///
/// Returns `None` when no file was requested and the platform default does not
/// exist. An explicitly requested path is returned even if missing so the
/// caller can report it.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory
    default_config_path().filter(|path| path.exists())
}

/// Platform config file location (`<config_dir>/votd/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("votd").join(CONFIG_FILE_NAME))
}

/// Parse a config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Where a loaded [`TomlConfig`] came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file requested and none at the platform location
    Defaults,
    /// Parsed from this file
    File(PathBuf),
    /// This file was requested but does not exist; defaults used
    Missing(PathBuf),
}

impl ConfigSource {
    /// Report the outcome; call once a subscriber is installed
    pub fn log(&self) {
        match self {
            ConfigSource::Defaults => debug!("No config file found, using defaults"),
            ConfigSource::File(path) => debug!("Loaded config from {}", path.display()),
            ConfigSource::Missing(path) => {
                warn!("Config file {} not found, using defaults", path.display())
            }
        }
    }
}

/// Load the config file if one resolves, reporting where it came from
///
/// Nothing is logged here so the caller can load config before logging is
/// set up and report the [`ConfigSource`] afterwards. A missing file degrades
/// to defaults; a file that exists but does not parse is an error.
pub fn load_with_source(cli_arg: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    let Some(path) = resolve_config_path(cli_arg) else {
        return Ok((TomlConfig::default(), ConfigSource::Defaults));
    };

    if !path.exists() {
        return Ok((TomlConfig::default(), ConfigSource::Missing(path)));
    }

    let config = load_toml_config(&path)?;
    Ok((config, ConfigSource::File(path)))
}

/// Load the config file if one resolves, otherwise defaults
pub fn load_or_default(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    let (config, source) = load_with_source(cli_arg)?;
    source.log();
    Ok(config)
}

/// Append `KEY=value` to a `.env` file, creating it if needed
pub fn append_env_var(path: &Path, key: &str, value: &str) -> Result<()> {
    if key.is_empty() || key.contains('=') || key.contains(char::is_whitespace) {
        return Err(Error::InvalidInput(format!("Invalid env key: {:?}", key)));
    }
    if value.contains('\n') {
        return Err(Error::InvalidInput(format!("Env value for {} spans lines", key)));
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "\n{}={}", key, value)?;
    Ok(())
}
