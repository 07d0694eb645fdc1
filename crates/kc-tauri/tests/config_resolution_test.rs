//! Config resolution against real files and environment variables.
//!
//! Everything touching process env lives in one test so runs stay serial.

use std::io::Write;
use std::path::PathBuf;

use kc_core::config::{DEFAULT_HANDSHAKE_DELAY_MS, DEFAULT_SITE_URL};
use kc_tauri::bootstrap::config::{CONFIG_PATH_ENV, PROJECT_ID_ENV};
use kc_tauri::bootstrap::resolve_config;

fn set(key: &str, value: Option<&str>) {
    match value {
        Some(value) => std::env::set_var(key, value),
        None => std::env::remove_var(key),
    }
}

#[test]
fn resolve_config_layers_file_env_and_defaults() {
    let data_dir = tempfile::tempdir().unwrap();

    // No file, no override: built-in defaults.
    set(CONFIG_PATH_ENV, None);
    set(PROJECT_ID_ENV, None);
    let config = resolve_config(data_dir.path().to_path_buf()).unwrap();
    assert_eq!(config.site_url, DEFAULT_SITE_URL);
    assert_eq!(config.handshake_delay_ms, DEFAULT_HANDSHAKE_DELAY_MS);
    assert_eq!(
        config.token_store_path,
        data_dir.path().join("token_store.json")
    );

    // Missing file: defaults, not an error.
    set(CONFIG_PATH_ENV, Some("/nonexistent/kc/config.toml"));
    let config = resolve_config(data_dir.path().to_path_buf()).unwrap();
    assert_eq!(config.site_url, DEFAULT_SITE_URL);

    // File values win over defaults, env wins over file.
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"
        [shell]
        handshake_delay_ms = 250

        [push]
        project_id = "proj-file"
        "#,
    )
    .unwrap();
    set(CONFIG_PATH_ENV, file.path().to_str());
    set(PROJECT_ID_ENV, Some("proj-1"));
    let config = resolve_config(data_dir.path().to_path_buf()).unwrap();
    assert_eq!(config.handshake_delay_ms, 250);
    assert_eq!(config.site_url, DEFAULT_SITE_URL);
    assert_eq!(config.project_id, "proj-1");

    // Broken file is reported.
    let mut broken = tempfile::NamedTempFile::new().unwrap();
    broken.write_all(b"[shell\n").unwrap();
    set(CONFIG_PATH_ENV, broken.path().to_str());
    assert!(resolve_config(PathBuf::from("/unused")).is_err());

    set(CONFIG_PATH_ENV, None);
    set(PROJECT_ID_ENV, None);
}
