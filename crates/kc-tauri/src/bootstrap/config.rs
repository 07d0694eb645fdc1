//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Parse TOML into AppConfig DTO / 将 TOML 解析为 AppConfig DTO
//! - ✅ Resolve the effective config from file, environment and built-in defaults
//!   / 合并配置文件、环境变量与内置默认值
//!
//! `load_config` accepts whatever is in the file. Defaults are applied only
//! by `resolve_config`, and only to fields the file left empty.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use kc_core::config::AppConfig;

/// Path of an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "KC_CONFIG";

/// Overrides the push project id at runtime.
pub const PROJECT_ID_ENV: &str = "KC_PROJECT_ID";

/// Project id baked in at build time, used when neither the file nor the
/// environment provides one.
const BUILD_PROJECT_ID: Option<&str> = option_env!("KC_PROJECT_ID");

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Resolve the effective configuration.
///
/// 1. `KC_CONFIG` file, if set and present
/// 2. Built-in defaults for every field the file left empty
/// 3. `KC_PROJECT_ID` (runtime, then build time) for the project id
///
/// `data_dir` is the application data directory reported by the runtime.
pub fn resolve_config(data_dir: PathBuf) -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::with_defaults(data_dir);

    let config = match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) if Path::new(&path).exists() => {
            let path = PathBuf::from(path);
            info!(path = %path.display(), "Loading config file");
            fill_missing(load_config(path)?, defaults)
        }
        Some(path) => {
            warn!(
                path = %Path::new(&path).display(),
                "Config file not found, using defaults"
            );
            defaults
        }
        None => defaults,
    };

    let runtime_project_id = std::env::var(PROJECT_ID_ENV).ok();
    Ok(apply_project_id(
        config,
        runtime_project_id.as_deref(),
        BUILD_PROJECT_ID,
    ))
}

fn fill_missing(mut config: AppConfig, defaults: AppConfig) -> AppConfig {
    if config.site_url.is_empty() {
        config.site_url = defaults.site_url;
    }
    if config.handshake_delay_ms == 0 {
        config.handshake_delay_ms = defaults.handshake_delay_ms;
    }
    if config.token_store_path.as_os_str().is_empty() {
        config.token_store_path = defaults.token_store_path;
    }
    if config.push_gateway_url.is_empty() {
        config.push_gateway_url = defaults.push_gateway_url;
    }
    config
}

fn apply_project_id(
    mut config: AppConfig,
    runtime: Option<&str>,
    build_time: Option<&str>,
) -> AppConfig {
    let non_blank = |value: Option<&str>| value.filter(|v| !v.trim().is_empty()).map(str::to_string);

    if let Some(project_id) = non_blank(runtime) {
        config.project_id = project_id;
    } else if config.project_id.is_empty() {
        if let Some(project_id) = non_blank(build_time) {
            config.project_id = project_id;
        }
    }
    config
}
