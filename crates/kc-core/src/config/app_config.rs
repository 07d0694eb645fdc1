use std::path::PathBuf;

/// Remote site rendered by the shell's webview.
pub const DEFAULT_SITE_URL: &str = "https://ku-check.vercel.app/";

/// Push gateway that exchanges native device tokens for delivery tokens.
pub const DEFAULT_PUSH_GATEWAY_URL: &str = "https://exp.host";

/// Delay between page-load completion and the startup message.
pub const DEFAULT_HANDSHAKE_DELAY_MS: u64 = 1000;

const DEFAULT_TOKEN_STORE_FILE: &str = "token_store.json";

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Website loaded into the embedded browser view.
    pub site_url: String,

    /// Push project identifier the delivery token is scoped to
    /// (may be empty - this is a fact, not an error)
    pub project_id: String,

    /// Delay in milliseconds before the startup message is posted to the webview.
    pub handshake_delay_ms: u64,

    /// Token store file path (path info only, no existence check)
    pub token_store_path: PathBuf,

    /// Base URL of the push gateway.
    pub push_gateway_url: String,

    /// Whether tokens are requested for the development (sandbox) environment.
    pub development: bool,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        Ok(Self {
            site_url: str_at("shell", "site_url"),
            project_id: str_at("push", "project_id"),
            handshake_delay_ms: toml_value
                .get("shell")
                .and_then(|s| s.get("handshake_delay_ms"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64,
            token_store_path: PathBuf::from(str_at("storage", "token_store_path")),
            push_gateway_url: str_at("push", "gateway_url"),
            development: toml_value
                .get("push")
                .and_then(|p| p.get("development"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    /// 创建空的 AppConfig（所有字段为空/默认值）
    pub fn empty() -> Self {
        Self {
            site_url: String::new(),
            project_id: String::new(),
            handshake_delay_ms: 0,
            token_store_path: PathBuf::new(),
            push_gateway_url: String::new(),
            development: false,
        }
    }

    /// Create AppConfig with the shell's built-in defaults.
    ///
    /// `data_dir` is computed by the caller with platform-specific logic
    /// (e.g. the `dirs` crate); this constructor only joins paths.
    pub fn with_defaults(data_dir: PathBuf) -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            project_id: String::new(),
            handshake_delay_ms: DEFAULT_HANDSHAKE_DELAY_MS,
            token_store_path: data_dir.join(DEFAULT_TOKEN_STORE_FILE),
            push_gateway_url: DEFAULT_PUSH_GATEWAY_URL.to_string(),
            development: false,
        }
    }
}
