//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Backend server location
    #[serde(default)]
    pub server: ServerConfig,

    /// HTTP client behaviour
    #[serde(default)]
    pub http: HttpConfig,

    /// Login session storage
    #[serde(default)]
    pub session: SessionConfig,

    /// CLI output preferences
    #[serde(default)]
    pub output: OutputConfig,
}

/// Backend server location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host name or IP address of the backend
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port of the backend
    #[serde(default = "default_port")]
    pub port: u16,

    /// `http` or `https`
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Path prefix under which the REST API is mounted
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Offset from UTC, in minutes, of the wall-clock times events are stored in
    #[serde(default = "default_event_utc_offset")]
    pub event_utc_offset_minutes: i32,

    /// Full base URL; when set it wins over host/port/scheme/prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Largest UTC offset, in minutes, a fixed offset can express
pub const MAX_UTC_OFFSET_MINUTES: i32 = 23 * 60 + 59;

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            scheme: default_scheme(),
            api_prefix: default_api_prefix(),
            event_utc_offset_minutes: default_event_utc_offset(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// Base URL of the REST API, always ending in `/`
    #[must_use]
    pub fn base_url(&self) -> String {
        if let Some(url) = self.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            let url = url.trim();
            return if url.ends_with('/') {
                url.to_string()
            } else {
                format!("{url}/")
            };
        }

        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            format!("{}://{}:{}/", self.scheme, self.host, self.port)
        } else {
            format!("{}://{}:{}/{}/", self.scheme, self.host, self.port, prefix)
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_api_prefix() -> String {
    "api".to_string()
}

fn default_event_utc_offset() -> i32 {
    // Events are entered in Pakistan Standard Time
    5 * 60
}

/// HTTP client behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Total request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub connect_timeout_secs: u64,

    /// Retries after the first attempt for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Log request and response bodies at trace level
    #[serde(default)]
    pub log_bodies: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            log_bodies: false,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

/// Login session storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Session file location; defaults to the user data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl SessionConfig {
    /// Resolved session file path
    #[must_use]
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| {
            dirs::data_dir().map(|d| d.join("eventmanager").join("session.json"))
        })
    }
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// CLI output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Colored output
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

fn default_true() -> bool {
    true
}
