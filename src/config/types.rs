use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration container. Every section is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote resource settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme + host + port of the REST server.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path between the host and the resource name (default: "/api").
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// How long an error notice stays on screen.
    #[serde(default = "default_notice_seconds")]
    pub notice_seconds: u64,
    /// chrono format string for dates in list and detail views.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

/// In-memory reference server settings (`salesdesk serve`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file for UI mode. `SALESDESK_LOG` is used when this is unset.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_path_prefix() -> String {
    "/api".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_notice_seconds() -> u64 {
    5
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_seed_demo_data() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path_prefix: default_path_prefix(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            notice_seconds: default_notice_seconds(),
            date_format: default_date_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
