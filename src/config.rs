//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::ga::GaClientConfig;
use crate::report::DateRange;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins, any origin when empty
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// GA4 property and reporting defaults
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_property_id")]
    pub property_id: String,

    /// Service account key file, application default credentials when unset
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,

    #[serde(default = "default_start_date")]
    pub start_date: String,

    #[serde(default = "default_end_date")]
    pub end_date: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_property_id() -> String {
    "501552511".to_string()
}

fn default_start_date() -> String {
    "2024-08-01".to_string()
}

fn default_end_date() -> String {
    "today".to_string()
}

fn default_api_base_url() -> String {
    "https://analyticsdata.googleapis.com".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            property_id: default_property_id(),
            credentials_path: None,
            start_date: default_start_date(),
            end_date: default_end_date(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl AnalyticsConfig {
    /// Date range applied to dated reports
    pub fn date_range(&self) -> DateRange {
        DateRange::new(&self.start_date, &self.end_date)
    }

    /// Settings for the reporting client
    pub fn client_config(&self) -> GaClientConfig {
        GaClientConfig {
            base_url: self.api_base_url.clone(),
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Standard config file locations, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("ga-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/ga-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load the first candidate file that exists, or defaults with environment
    /// overrides when none does. An existing file that fails to load is an error.
    ///
    /// Returns the path that was used, if any.
    pub fn load_first(candidates: &[PathBuf]) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match candidates.iter().find(|path| path.exists()) {
            Some(path) => Ok((Self::load_with_env(path)?, Some(path.clone()))),
            None => Ok((Self::from_env(), None)),
        }
    }

    /// Check values that would otherwise only fail at request time
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".to_string()));
        }

        let property_id = &self.analytics.property_id;
        if property_id.is_empty() || !property_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Invalid(format!(
                "analytics.property_id must be a numeric GA4 property id, got '{}'",
                property_id
            )));
        }

        for (name, value) in [
            ("analytics.start_date", &self.analytics.start_date),
            ("analytics.end_date", &self.analytics.end_date),
        ] {
            if !is_report_date(value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be YYYY-MM-DD, 'today', 'yesterday' or 'NdaysAgo', got '{}'",
                    name, value
                )));
            }
        }

        if self.analytics.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "analytics.request_timeout_secs must be non-zero".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be 'pretty' or 'json', got '{}'",
                self.logging.format
            )));
        }

        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Server overrides
        if let Ok(host) = std::env::var("GA_DASHBOARD_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("GA_DASHBOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Analytics overrides
        if let Ok(property_id) = std::env::var("GA_DASHBOARD_PROPERTY_ID") {
            self.analytics.property_id = property_id;
        }
        if let Ok(path) = std::env::var("GA_DASHBOARD_CREDENTIALS")
            .or_else(|_| std::env::var("GOOGLE_APPLICATION_CREDENTIALS"))
        {
            self.analytics.credentials_path = Some(PathBuf::from(path));
        }
        if let Ok(start) = std::env::var("GA_DASHBOARD_START_DATE") {
            self.analytics.start_date = start;
        }
        if let Ok(end) = std::env::var("GA_DASHBOARD_END_DATE") {
            self.analytics.end_date = end;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("GA_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("GA_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Whether `value` is a date bound the Data API accepts
fn is_report_date(value: &str) -> bool {
    static RELATIVE: OnceLock<Regex> = OnceLock::new();
    let relative = RELATIVE.get_or_init(|| Regex::new(r"^[0-9]+daysAgo$").expect("valid regex"));

    matches!(value, "today" | "yesterday")
        || relative.is_match(value)
        || chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# GA Dashboard Configuration
#
# Environment variables override these settings:
# - GA_DASHBOARD_HOST
# - GA_DASHBOARD_PORT
# - GA_DASHBOARD_PROPERTY_ID
# - GA_DASHBOARD_CREDENTIALS (or GOOGLE_APPLICATION_CREDENTIALS)
# - GA_DASHBOARD_START_DATE
# - GA_DASHBOARD_END_DATE
# - GA_DASHBOARD_LOG_LEVEL
# - GA_DASHBOARD_LOG_FORMAT

[server]
# API server host
host = "0.0.0.0"

# API server port
port = 9001

# Allowed CORS origins (empty = any origin)
cors_origins = []

[analytics]
# GA4 property id
property_id = "501552511"

# Service account key file (omit to use application default credentials)
# credentials_path = "service-account.json"

# Date range for dated reports: YYYY-MM-DD, today, yesterday or NdaysAgo
start_date = "2024-08-01"
end_date = "today"

# GA4 Data API root
api_base_url = "https://analyticsdata.googleapis.com"

# Request timeout in seconds
request_timeout_secs = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
