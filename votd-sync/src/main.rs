//! votd-sync - Verse of the Day to Notion
//!
//! Resolves today's verse (citation, passage, image) through the fallback
//! chain and appends it to a Notion page. Meant to run once a day from cron
//! or a CI schedule; any failure exits non-zero.
//!
//! Subcommands:
//! - `sync` (default): resolve and publish
//! - `fetch`: resolve and print, nothing is written
//! - `blocks`: list the page's block tree to find a target block id
//! - `setup-section`: create a "Daily Devotionals" toggle to collect verses in

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use votd_common::config::{append_env_var, load_with_source, TomlConfig};
use votd_sync::config::{CliOverrides, FetchSettings, NotionSettings};
use votd_sync::services::{
    create_devotional_section, render_tree, walk_blocks, NotionClient, NotionPageSink, PublishMode,
};
use votd_sync::{sync_verse_of_the_day, HttpClient, VerseRecord, VerseResolver};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", ",
    env!("BUILD_PROFILE"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

/// Command-line arguments for votd-sync
#[derive(Parser, Debug)]
#[command(name = "votd-sync")]
#[command(about = "Sync the YouVersion verse of the day into a Notion page")]
#[command(version, long_version = LONG_VERSION)]
struct Cli {
    /// TOML config file (default: ~/.config/votd/config.toml)
    #[arg(long, env = "VOTD_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Notion integration token
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true, global = true)]
    notion_token: Option<String>,

    /// Page the verses go on
    #[arg(long = "page-id", env = "NOTION_PAGE_ID", global = true)]
    notion_page_id: Option<String>,

    /// Block inside the page to append under instead of the page root
    #[arg(long, env = "TARGET_BLOCK_ID", global = true)]
    target_block_id: Option<String>,

    /// Delete the target's existing children before appending
    #[arg(
        long,
        env = "CLEAR_DAILY",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true",
        global = true
    )]
    clear_daily: Option<bool>,

    /// Blocks to append: entry (heading, citation, quote, image) or image-only
    #[arg(long, env = "VOTD_PUBLISH_MODE", global = true)]
    publish_mode: Option<PublishMode>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve today's verse and publish it to Notion
    Sync,
    /// Resolve today's verse and print it without publishing
    Fetch,
    /// Print the block tree under the page (or a given block)
    Blocks {
        /// Root block id (default: the configured page)
        block_id: Option<String>,
    },
    /// Append a "Daily Devotionals" section and print its toggle's id
    SetupSection {
        /// Append TARGET_BLOCK_ID=<toggle id> to the env file
        #[arg(long)]
        write_env: bool,

        /// Env file written by --write-env
        #[arg(long, default_value = ".env")]
        env_file: PathBuf,
    },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            notion_token: self.notion_token.clone(),
            notion_page_id: self.notion_page_id.clone(),
            target_block_id: self.target_block_id.clone(),
            clear_daily: self.clear_daily,
            publish_mode: self.publish_mode,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads the environment
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // The file picks the log level, so its outcome is reported after init
    let loaded = load_with_source(cli.config.as_deref());
    let level = if cli.verbose {
        "debug"
    } else {
        loaded
            .as_ref()
            .map(|(c, _)| c.logging.level.as_str())
            .unwrap_or("info")
    };
    init_tracing(level);
    let (toml_config, source) = loaded.context("Failed to load TOML config")?;
    source.log();

    debug!("votd-sync {}", LONG_VERSION);

    match cli.command.as_ref().unwrap_or(&Command::Sync) {
        Command::Sync => run_sync(&cli, &toml_config).await,
        Command::Fetch => run_fetch(&toml_config).await,
        Command::Blocks { block_id } => run_blocks(&cli, &toml_config, block_id.as_deref()).await,
        Command::SetupSection {
            write_env,
            env_file,
        } => run_setup_section(&cli, &toml_config, *write_env, env_file).await,
    }
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("votd_sync={0},votd_common={0}", level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn build_resolver(toml_config: &TomlConfig) -> Result<(HttpClient, VerseResolver)> {
    let fetch = FetchSettings::from_toml(toml_config);
    let http = HttpClient::from_config(fetch.http).context("Failed to build HTTP client")?;
    let resolver = VerseResolver::with_default_chain(&http, &fetch.sources);
    debug!(strategies = ?resolver.strategy_names(), "Strategy chain ready");
    Ok((http, resolver))
}

fn notion_client(toml_config: &TomlConfig, settings: &NotionSettings) -> Result<NotionClient> {
    let fetch = FetchSettings::from_toml(toml_config);
    let http = HttpClient::from_config(fetch.http).context("Failed to build HTTP client")?;
    Ok(notion_client_with(&http, settings))
}

fn notion_client_with(http: &HttpClient, settings: &NotionSettings) -> NotionClient {
    NotionClient::new(http.clone(), settings.token.clone()).with_base_url(settings.api_url.clone())
}

fn print_record(record: &VerseRecord) {
    println!("Date:     {}", record.date());
    println!("Citation: {}", record.citation());
    println!("Passage:  {}", record.passage());
    println!("Image:    {}", record.image_url().unwrap_or("-"));
}

async fn run_sync(cli: &Cli, toml_config: &TomlConfig) -> Result<()> {
    let settings = NotionSettings::resolve(&cli.overrides(), toml_config)
        .context("Notion is not configured")?;
    let (http, resolver) = build_resolver(toml_config)?;

    let sink = NotionPageSink::new(
        notion_client_with(&http, &settings),
        settings.target_id(),
        settings.publish_mode,
    )
    .clear_before_publish(settings.clear_daily);

    info!(
        target_block = %settings.target_id(),
        mode = %settings.publish_mode,
        clear = settings.clear_daily,
        "Starting verse sync"
    );

    let record = sync_verse_of_the_day(&resolver, &sink)
        .await
        .context("Verse sync failed")?;

    println!("Published verse of the day for {}", record.date());
    print_record(&record);
    Ok(())
}

async fn run_fetch(toml_config: &TomlConfig) -> Result<()> {
    let (_, resolver) = build_resolver(toml_config)?;
    let record = resolver
        .resolve()
        .await
        .context("Could not resolve today's verse")?;

    print_record(&record);
    Ok(())
}

async fn run_blocks(cli: &Cli, toml_config: &TomlConfig, block_id: Option<&str>) -> Result<()> {
    let settings = NotionSettings::resolve(&cli.overrides(), toml_config)
        .context("Notion is not configured")?;
    let client = notion_client(toml_config, &settings)?;

    let root = block_id.unwrap_or(&settings.page_id);
    let nodes = walk_blocks(&client, root)
        .await
        .with_context(|| format!("Failed to list blocks under {}", root))?;

    if nodes.is_empty() {
        println!("No blocks under {}", root);
        return Ok(());
    }

    println!("Blocks under {} ({} total)\n", root, nodes.len());
    print!("{}", render_tree(&nodes));
    Ok(())
}

async fn run_setup_section(
    cli: &Cli,
    toml_config: &TomlConfig,
    write_env: bool,
    env_file: &Path,
) -> Result<()> {
    let settings = NotionSettings::resolve(&cli.overrides(), toml_config)
        .context("Notion is not configured")?;
    let client = notion_client(toml_config, &settings)?;

    let toggle_id = create_devotional_section(&client, &settings.page_id)
        .await
        .context("Failed to create devotional section")?;

    println!("Created \"Current Month\" toggle: {}", toggle_id);

    if write_env {
        append_env_var(env_file, "TARGET_BLOCK_ID", &toggle_id)
            .with_context(|| format!("Failed to update {}", env_file.display()))?;
        println!("Wrote TARGET_BLOCK_ID to {}", env_file.display());
    } else {
        println!("Set TARGET_BLOCK_ID={} to publish verses inside it", toggle_id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_flags_match_config_guidance() {
        let cli = Cli::try_parse_from([
            "votd-sync",
            "--notion-token",
            "ntn_cli",
            "--page-id",
            "page-cli",
            "fetch",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.notion_token.as_deref(), Some("ntn_cli"));
        assert_eq!(overrides.notion_page_id.as_deref(), Some("page-cli"));
        assert!(Cli::try_parse_from(["votd-sync", "--notion-page-id", "p"]).is_err());
    }

    #[test]
    fn test_long_version_carries_build_stamp() {
        assert!(LONG_VERSION.starts_with(env!("CARGO_PKG_VERSION")));

        let hash = env!("GIT_HASH");
        assert!(hash == "unknown" || (hash.len() == 8 && hash.chars().all(|c| c.is_ascii_hexdigit())));

        let stamp = env!("BUILD_TIMESTAMP");
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%SZ").is_ok());
    }
}
