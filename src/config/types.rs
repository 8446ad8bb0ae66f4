//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing,
//! environment lookup, and validation of the tracker configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::config::constants::{
    API_BASE_URL_ENV, API_KEY_ENV, DEFAULT_SELF_IP_URL, DEFAULT_TILE_URL, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, DEFAULT_ZOOM, SELF_IP_URL_ENV, TILE_MAX_ZOOM,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// What happens to existing markers when the map is re-centered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MarkerPolicy {
    /// Remove every marker, then place exactly one (default)
    Replace,
    /// Keep earlier markers and add a new one on every lookup
    Accumulate,
}

/// Tracker configuration.
///
/// Parsed from the command line, with the service endpoints and API key also
/// readable from the environment (and a `.env` file loaded by the binary).
/// Can be constructed programmatically through [`Config::default`].
///
/// # Examples
///
/// ```no_run
/// use ip_tracker::Config;
///
/// let config = Config {
///     api_base_url: "https://geo.ipify.org/api/v2/country,city?apiKey=".into(),
///     api_key: "at_xxx".into(),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ip_tracker",
    version,
    about = "Look up geolocation metadata for IP addresses and domains"
)]
pub struct Config {
    /// IP addresses or domains to look up, in order
    pub queries: Vec<String>,

    /// Read additional queries from a file, one per line (`-` for stdin)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Geolocation API base URL; the API key is appended to it verbatim
    #[arg(long, env = API_BASE_URL_ENV, default_value = "")]
    pub api_base_url: String,

    /// Geolocation API key
    #[arg(long, env = API_KEY_ENV, default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Endpoint used to resolve this machine's public IP at startup
    #[arg(long, env = SELF_IP_URL_ENV, default_value = DEFAULT_SELF_IP_URL)]
    pub self_ip_url: String,

    /// Skip the automatic lookup of this machine's public IP
    #[arg(long)]
    pub no_self_lookup: bool,

    /// Tile URL template with `{z}`, `{x}` and `{y}` placeholders
    #[arg(long, default_value = DEFAULT_TILE_URL)]
    pub tile_url: String,

    /// Zoom level used when centering the map on a result
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: u8,

    /// Marker behaviour on consecutive lookups
    #[arg(long, value_enum, default_value_t = MarkerPolicy::Replace)]
    pub marker_policy: MarkerPolicy,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queries: Vec::new(),
            file: None,
            api_base_url: String::new(),
            api_key: String::new(),
            self_ip_url: DEFAULT_SELF_IP_URL.to_string(),
            no_self_lookup: false,
            tile_url: DEFAULT_TILE_URL.to_string(),
            zoom: DEFAULT_ZOOM,
            marker_policy: MarkerPolicy::Replace,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

/// A configuration value that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid configuration for '{field}': {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and how to fix it
    pub message: String,
}

impl ConfigValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Config {
    /// Validates the configuration, failing on the first bad field.
    ///
    /// The API base URL and key have no usable defaults, so a missing value is
    /// reported with the environment variable that supplies it.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigValidationError::new(
                "api_base_url",
                format!("must not be empty; set {API_BASE_URL_ENV} or pass --api-base-url"),
            ));
        }
        validate_http_url("api_base_url", &self.api_base_url)?;

        if self.api_key.trim().is_empty() {
            return Err(ConfigValidationError::new(
                "api_key",
                format!("must not be empty; set {API_KEY_ENV} or pass --api-key"),
            ));
        }

        if !self.no_self_lookup {
            validate_http_url("self_ip_url", &self.self_ip_url).map_err(|mut e| {
                e.message
                    .push_str(&format!(" (set {SELF_IP_URL_ENV} or pass --no-self-lookup)"));
                e
            })?;
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError::new(
                "timeout_seconds",
                "must be greater than 0",
            ));
        }

        if self.zoom > TILE_MAX_ZOOM {
            return Err(ConfigValidationError::new(
                "zoom",
                format!("must be between 0 and {TILE_MAX_ZOOM}"),
            ));
        }

        for placeholder in ["{z}", "{x}", "{y}"] {
            if !self.tile_url.contains(placeholder) {
                return Err(ConfigValidationError::new(
                    "tile_url",
                    format!("template is missing the {placeholder} placeholder"),
                ));
            }
        }

        Ok(())
    }
}

fn validate_http_url(field: &'static str, value: &str) -> Result<(), ConfigValidationError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(ConfigValidationError::new(
            field,
            format!("unsupported scheme '{}', expected http or https", parsed.scheme()),
        )),
        Err(e) => Err(ConfigValidationError::new(
            field,
            format!("'{value}' is not a valid URL: {e}"),
        )),
    }
}
