//! Settings resolution from a TOML file on disk
//!
//! Uses serial_test because VOTD_CONFIG is process-global.

use serial_test::serial;
use std::env;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use votd_common::config::{load_or_default, CONFIG_ENV_VAR};
use votd_sync::config::{CliOverrides, FetchSettings, NotionSettings};
use votd_sync::services::PublishMode;

const CONFIG: &str = r#"
notion_token = "ntn_from_file"
notion_page_id = "page-from-file"
target_block_id = "toggle-from-file"
clear_daily = true
publish_mode = "image-only"

[logging]
level = "debug"

[http]
page_timeout_secs = 20
probe_timeout_secs = 1

[sources]
cdn_base_url = "https://mirror.test/images/"
notion_api_url = "https://notion-proxy.test/v1"
"#;

#[test]
#[serial]
fn test_config_file_from_env_feeds_all_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("votd.toml");
    fs::write(&path, CONFIG).unwrap();
    env::set_var(CONFIG_ENV_VAR, &path);

    let toml = load_or_default(None);
    env::remove_var(CONFIG_ENV_VAR);
    let toml = toml.unwrap();

    assert_eq!(toml.logging.level, "debug");

    let notion = NotionSettings::resolve(&CliOverrides::default(), &toml).unwrap();
    assert_eq!(notion.token, "ntn_from_file");
    assert_eq!(notion.target_id(), "toggle-from-file");
    assert_eq!(notion.publish_mode, PublishMode::ImageOnly);
    assert!(notion.clear_daily);
    assert_eq!(notion.api_url, "https://notion-proxy.test/v1");

    let fetch = FetchSettings::from_toml(&toml);
    assert_eq!(fetch.http.page_timeout, Duration::from_secs(20));
    assert_eq!(fetch.http.probe_timeout, Duration::from_secs(1));
    assert_eq!(fetch.http.api_timeout, Duration::from_secs(5));
    assert_eq!(fetch.sources.cdn_base_url, "https://mirror.test/images/");
}

#[test]
#[serial]
fn test_cli_values_override_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("votd.toml");
    fs::write(&path, CONFIG).unwrap();
    env::remove_var(CONFIG_ENV_VAR);

    let toml = load_or_default(Some(&path)).unwrap();
    let cli = CliOverrides {
        notion_token: Some("ntn_cli".to_string()),
        target_block_id: Some("toggle-cli".to_string()),
        clear_daily: Some(false),
        publish_mode: Some(PublishMode::Entry),
        ..Default::default()
    };

    let notion = NotionSettings::resolve(&cli, &toml).unwrap();
    assert_eq!(notion.token, "ntn_cli");
    assert_eq!(notion.page_id, "page-from-file");
    assert_eq!(notion.target_id(), "toggle-cli");
    assert_eq!(notion.publish_mode, PublishMode::Entry);
    assert!(!notion.clear_daily);
}

#[test]
#[serial]
fn test_template_placeholders_count_as_unset() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("votd.toml");
    fs::write(
        &path,
        "notion_token = \"secret_xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx\"\nnotion_page_id = \"your_page_id_here\"\n",
    )
    .unwrap();
    env::remove_var(CONFIG_ENV_VAR);

    let toml = load_or_default(Some(&path)).unwrap();
    assert!(NotionSettings::resolve(&CliOverrides::default(), &toml).is_err());
}
