//! Configuration loading and theme persistence

use std::sync::Arc;
use std::time::Duration;

use tempfile::tempdir;

use folio_config::{DEFAULT_RELAY_BASE_URL, FolioConfig, persist_theme_at};
use folio_engine::{AppInit, Portfolio, ThemeMode, UnconfiguredRelay};

fn write_config(body: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, body).unwrap();
    (dir, path)
}

#[test]
fn full_config_drives_app_init() {
    let (_dir, path) = write_config(
        r#"
[app]
theme = "light"
ascii_only = true
reduced_motion = true

[relay]
form_id = "abc123"
base_url = "http://localhost:9999"
timeout_seconds = 3

[contact]
fallback_email = "hello@example.com"
subject = "Portfolio ping from {name}"
"#,
    );
    let config = FolioConfig::load_from(&path).unwrap();

    let relay = config.relay_settings();
    assert_eq!(relay.form_id.as_deref(), Some("abc123"));
    assert_eq!(relay.base_url, "http://localhost:9999");
    assert_eq!(relay.timeout, Duration::from_secs(3));

    let init = AppInit::from_config(
        Some(&config),
        Portfolio::bundled().unwrap(),
        Arc::new(UnconfiguredRelay),
    );
    assert_eq!(init.options.theme, ThemeMode::Light);
    assert!(init.options.ascii_only);
    assert!(init.options.reduced_motion);
    assert!(!init.options.high_contrast);
    assert_eq!(init.subject_template, "Portfolio ping from {name}");
    assert_eq!(init.fallback_email.as_deref(), Some("hello@example.com"));
}

#[test]
fn empty_config_uses_defaults() {
    let (_dir, path) = write_config("");
    let config = FolioConfig::load_from(&path).unwrap();

    assert_eq!(config.relay_settings().base_url, DEFAULT_RELAY_BASE_URL);
    assert_eq!(config.ui_options().theme, ThemeMode::Dark);
    assert_eq!(config.subject_template(), "New portfolio message from {name}");
    assert_eq!(config.fallback_email(), None);
    assert_eq!(config.content_path(), None);
}

#[test]
fn malformed_config_reports_path() {
    let (_dir, path) = write_config("[app\ntheme = ");
    let err = FolioConfig::load_from(&path).unwrap_err();
    assert_eq!(err.path(), path.as_path());
}

#[test]
fn persisted_theme_is_read_back() {
    let (_dir, path) = write_config("[relay]\nform_id = \"keep\" # comment\n");

    persist_theme_at(&path, ThemeMode::Light).unwrap();
    let config = FolioConfig::load_from(&path).unwrap();
    assert_eq!(config.ui_options().theme, ThemeMode::Light);
    assert_eq!(config.relay_settings().form_id.as_deref(), Some("keep"));
    assert!(std::fs::read_to_string(&path).unwrap().contains("# comment"));

    persist_theme_at(&path, ThemeMode::Dark).unwrap();
    let config = FolioConfig::load_from(&path).unwrap();
    assert_eq!(config.ui_options().theme, ThemeMode::Dark);
}

#[test]
fn persist_creates_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    persist_theme_at(&path, ThemeMode::Light).unwrap();
    let config = FolioConfig::load_from(&path).unwrap();
    assert_eq!(config.ui_options().theme, ThemeMode::Light);
}
