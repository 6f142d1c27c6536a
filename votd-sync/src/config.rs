//! Configuration resolution for votd-sync
//!
//! Each setting resolves with priority CLI flag → environment → TOML → default.
//! clap already merges flags with their environment variables (after `.env`
//! is loaded), so this module only has to layer the TOML file and compiled
//! defaults underneath.

use crate::http::HttpConfig;
use crate::services::{PublishMode, NOTION_API_BASE};
use crate::strategies::VerseSources;
use std::time::Duration;
use tracing::{debug, info};
use votd_common::config::TomlConfig;
use votd_common::{Error, Result};

/// Token value shipped in `.env.template`
pub const TOKEN_PLACEHOLDER: &str = "secret_xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx";

/// Page id value shipped in `.env.template`
pub const PAGE_ID_PLACEHOLDER: &str = "your_page_id_here";

/// Validate a setting (non-blank and not a template placeholder)
pub fn is_valid_setting(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != TOKEN_PLACEHOLDER && value != PAGE_ID_PLACEHOLDER
}

/// Values given on the command line or through their environment variables
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub notion_token: Option<String>,
    pub notion_page_id: Option<String>,
    pub target_block_id: Option<String>,
    pub clear_daily: Option<bool>,
    pub publish_mode: Option<PublishMode>,
}

/// Settings the verse sources need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub http: HttpConfig,
    pub sources: VerseSources,
}

impl FetchSettings {
    pub fn from_toml(toml: &TomlConfig) -> Self {
        let defaults = HttpConfig::default();
        let http_settings = &toml.http;
        let secs = |value: Option<u64>, default: Duration| {
            value.map(Duration::from_secs).unwrap_or(default)
        };

        let http = HttpConfig {
            user_agent: http_settings
                .user_agent
                .clone()
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            page_timeout: secs(http_settings.page_timeout_secs, defaults.page_timeout),
            api_timeout: secs(http_settings.api_timeout_secs, defaults.api_timeout),
            probe_timeout: secs(http_settings.probe_timeout_secs, defaults.probe_timeout),
            notion_timeout: secs(http_settings.notion_timeout_secs, defaults.notion_timeout),
        };

        let default_sources = VerseSources::default();
        let sources = VerseSources {
            votd_page_url: toml
                .sources
                .votd_page_url
                .clone()
                .unwrap_or(default_sources.votd_page_url),
            cdn_base_url: toml
                .sources
                .cdn_base_url
                .clone()
                .unwrap_or(default_sources.cdn_base_url),
            text_api_url: toml
                .sources
                .text_api_url
                .clone()
                .unwrap_or(default_sources.text_api_url),
        };

        Self { http, sources }
    }
}

/// Settings for talking to Notion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotionSettings {
    pub token: String,
    pub page_id: String,
    pub target_block_id: Option<String>,
    pub clear_daily: bool,
    pub publish_mode: PublishMode,
    pub api_url: String,
}

impl NotionSettings {
    pub fn resolve(cli: &CliOverrides, toml: &TomlConfig) -> Result<Self> {
        let token = pick("notion_token", cli.notion_token.as_deref(), toml.notion_token.as_deref())
            .ok_or_else(|| missing("Notion token", "--notion-token", "NOTION_TOKEN", "notion_token"))?;

        let page_id = pick(
            "notion_page_id",
            cli.notion_page_id.as_deref(),
            toml.notion_page_id.as_deref(),
        )
        .ok_or_else(|| missing("Notion page id", "--page-id", "NOTION_PAGE_ID", "notion_page_id"))?;

        let target_block_id = pick(
            "target_block_id",
            cli.target_block_id.as_deref(),
            toml.target_block_id.as_deref(),
        );

        let publish_mode = match (cli.publish_mode, toml.publish_mode.as_deref()) {
            (Some(mode), _) => mode,
            (None, Some(raw)) => raw.parse().map_err(Error::Config)?,
            (None, None) => PublishMode::default(),
        };

        let clear_daily = cli.clear_daily.or(toml.clear_daily).unwrap_or(false);

        let api_url = toml
            .sources
            .notion_api_url
            .clone()
            .unwrap_or_else(|| NOTION_API_BASE.to_string());

        Ok(Self {
            token,
            page_id,
            target_block_id,
            clear_daily,
            publish_mode,
            api_url,
        })
    }

    /// Block receiving the verse: the targeted block, else the page root
    pub fn target_id(&self) -> &str {
        self.target_block_id.as_deref().unwrap_or(&self.page_id)
    }
}

fn pick(name: &str, cli: Option<&str>, toml: Option<&str>) -> Option<String> {
    if let Some(value) = cli.filter(|v| is_valid_setting(v)) {
        debug!("{} from command line or environment", name);
        return Some(value.trim().to_string());
    }
    if let Some(value) = toml.filter(|v| is_valid_setting(v)) {
        info!("{} loaded from TOML config", name);
        return Some(value.trim().to_string());
    }
    None
}

fn missing(what: &str, flag: &str, env_var: &str, toml_key: &str) -> Error {
    Error::Config(format!(
        "{} not configured. Please configure using one of:\n\
         1. Command line: {} <value>\n\
         2. Environment or .env file: {}=...\n\
         3. TOML config: ~/.config/votd/config.toml ({} = \"...\")",
        what, flag, env_var, toml_key
    ))
}
