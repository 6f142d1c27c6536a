//! Config file resolution and loading
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate VOTD_CONFIG are marked with #[serial].

use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;
use votd_common::config::{
    append_env_var, default_config_path, load_or_default, load_toml_config, load_with_source,
    resolve_config_path, ConfigSource, TomlConfig, CONFIG_ENV_VAR,
};
use votd_common::Error;

#[test]
#[serial]
fn test_cli_path_wins_over_env() {
    let dir = TempDir::new().unwrap();
    let cli_path = dir.path().join("cli.toml");
    env::set_var(CONFIG_ENV_VAR, dir.path().join("env.toml"));

    let resolved = resolve_config_path(Some(&cli_path));

    env::remove_var(CONFIG_ENV_VAR);
    assert_eq!(resolved, Some(cli_path));
}

#[test]
#[serial]
fn test_env_path_used_without_cli_arg() {
    let dir = TempDir::new().unwrap();
    let env_path = dir.path().join("env.toml");
    env::set_var(CONFIG_ENV_VAR, &env_path);

    let resolved = resolve_config_path(None);

    env::remove_var(CONFIG_ENV_VAR);
    assert_eq!(resolved, Some(env_path));
}

#[test]
#[serial]
fn test_missing_explicit_file_degrades_to_defaults() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist.toml");

    let config = load_or_default(Some(&missing)).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
#[serial]
fn test_mistyped_config_path_is_reported_as_missing() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = TempDir::new().unwrap();
    let typo = dir.path().join("confg.toml");

    let (config, source) = load_with_source(Some(&typo)).unwrap();

    assert_eq!(config, TomlConfig::default());
    assert_eq!(source, ConfigSource::Missing(typo));
}

#[test]
#[serial]
fn test_source_names_the_file_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("votd.toml");
    fs::write(&path, "notion_page_id = \"page-7\"\n").unwrap();
    env::set_var(CONFIG_ENV_VAR, &path);

    let loaded = load_with_source(None);
    env::remove_var(CONFIG_ENV_VAR);

    let (config, source) = loaded.unwrap();
    assert_eq!(config.notion_page_id.as_deref(), Some("page-7"));
    assert_eq!(source, ConfigSource::File(path));
}

#[test]
#[serial]
fn test_no_config_anywhere_uses_defaults() {
    env::remove_var(CONFIG_ENV_VAR);
    if default_config_path().is_some_and(|p| p.exists()) {
        return;
    }

    let (config, source) = load_with_source(None).unwrap();
    assert_eq!(config, TomlConfig::default());
    assert_eq!(source, ConfigSource::Defaults);
}

#[test]
#[serial]
fn test_load_file_from_disk() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
notion_token = "ntn_123"
notion_page_id = "page-1"
target_block_id = "toggle-9"

[logging]
level = "debug"

[http]
user_agent = "votd-tests"
"#,
    )
    .unwrap();

    let config = load_or_default(Some(&path)).unwrap();
    assert_eq!(config.notion_token.as_deref(), Some("ntn_123"));
    assert_eq!(config.notion_page_id.as_deref(), Some("page-1"));
    assert_eq!(config.target_block_id.as_deref(), Some("toggle-9"));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.http.user_agent.as_deref(), Some("votd-tests"));
}

#[test]
fn test_malformed_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "notion_token = [unterminated").unwrap();

    let result = load_toml_config(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_append_env_var_preserves_existing_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "NOTION_TOKEN=ntn_abc").unwrap();

    append_env_var(&path, "TARGET_BLOCK_ID", "1234-abcd").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines, vec!["NOTION_TOKEN=ntn_abc", "TARGET_BLOCK_ID=1234-abcd"]);
}
