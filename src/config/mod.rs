//! Configuration management for pantry
//!
//! Configuration is read from a TOML file (`~/.pantry/config.toml` by
//! default) and then overridden by environment variables and command-line
//! arguments.
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Environment variable holding the Spoonacular API key.
pub const API_KEY_ENV: &str = "PANTRY_SPOONACULAR_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Autocomplete behaviour
    #[serde(default)]
    pub autocomplete: AutocompleteConfig,

    /// Ingredient candidate source
    #[serde(default)]
    pub source: SourceConfig,

    /// Recipe webhook
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Output configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Autocomplete timing and capping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteConfig {
    /// Quiet period after the last keystroke before a remote lookup starts
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Delay between losing focus and closing the suggestion list
    #[serde(default = "default_blur_grace_ms")]
    pub blur_grace_ms: u64,

    /// Maximum suggestions shown for a non-empty query
    #[serde(default = "default_display_cap")]
    pub display_cap: usize,

    /// Maximum suggestions shown for an empty query
    #[serde(default = "default_browse_cap")]
    pub browse_cap: usize,

    /// Shortest trimmed query that triggers a remote lookup
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Deadline for a single remote lookup
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,

    /// Drop duplicate suggestions (first occurrence wins)
    #[serde(default = "default_dedupe")]
    pub dedupe: bool,

    /// Push every keystroke to the bound value, not only commits
    #[serde(default = "default_commit_on_input")]
    pub commit_on_input: bool,
}

/// Where ingredient candidates come from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The bundled (or file-provided) ingredient list, filtered in memory
    Static,

    /// The Spoonacular ingredient search API
    Spoonacular,

    /// The static list served with artificial latency, for offline demos
    Simulated,
}

/// Candidate source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Which source to use
    #[serde(default = "default_source_kind")]
    pub kind: SourceKind,

    /// Ingredient list file, one name per line (bundled list if unset)
    #[serde(default)]
    pub ingredients_file: Option<PathBuf>,

    /// Spoonacular API base URL
    #[serde(default = "default_spoonacular_url")]
    pub spoonacular_url: String,

    /// Spoonacular API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Number of results requested per remote lookup
    #[serde(default = "default_results")]
    pub results: u32,

    /// Latency of the simulated source
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,
}

/// Recipe webhook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Remembered webhook URL
    #[serde(default)]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_webhook_timeout")]
    pub timeout_secs: u64,
}

/// Display and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Output format (plain, json, json-pretty, table)
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Enable colored output
    #[serde(default = "default_color_output")]
    pub color_output: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One item per line
    Plain,

    /// Compact JSON (single line)
    Json,

    /// Pretty-printed JSON
    JsonPretty,

    /// Rounded ASCII table
    Table,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_debounce_ms() -> u64 {
    300
}

fn default_blur_grace_ms() -> u64 {
    200
}

fn default_display_cap() -> usize {
    10
}

fn default_browse_cap() -> usize {
    100
}

fn default_min_query_len() -> usize {
    2
}

fn default_lookup_timeout_ms() -> u64 {
    10_000
}

fn default_dedupe() -> bool {
    true
}

fn default_commit_on_input() -> bool {
    true
}

fn default_source_kind() -> SourceKind {
    SourceKind::Static
}

fn default_spoonacular_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_results() -> u32 {
    10
}

fn default_simulated_latency_ms() -> u64 {
    500
}

fn default_webhook_timeout() -> u64 {
    30
}

fn default_format() -> OutputFormat {
    OutputFormat::Plain
}

fn default_color_output() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    false
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            blur_grace_ms: default_blur_grace_ms(),
            display_cap: default_display_cap(),
            browse_cap: default_browse_cap(),
            min_query_len: default_min_query_len(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
            dedupe: default_dedupe(),
            commit_on_input: default_commit_on_input(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: default_source_kind(),
            ingredients_file: None,
            spoonacular_url: default_spoonacular_url(),
            api_key: None,
            results: default_results(),
            simulated_latency_ms: default_simulated_latency_ms(),
        }
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_webhook_timeout(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color_output: default_color_output(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    ///
    /// A missing file is not an error: defaults are returned so a first run
    /// works without any setup. When `path` is `None` the default location is
    /// used.
    ///
    /// # Arguments
    /// * `path` - Optional path to the configuration file (TOML format)
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file absent, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&raw)
            .map_err(|e| ConfigError::InvalidFormat(format!("{}: {e}", path.display())))?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.source.api_key = Some(key);
            }
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pantry")
            .join("config.toml")
    }

    /// Save configuration to a file, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let raw = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let ac = &self.autocomplete;
        if ac.display_cap == 0 {
            return Err(invalid("autocomplete.display_cap", ac.display_cap).into());
        }
        if ac.browse_cap == 0 {
            return Err(invalid("autocomplete.browse_cap", ac.browse_cap).into());
        }
        if ac.min_query_len == 0 {
            return Err(invalid("autocomplete.min_query_len", ac.min_query_len).into());
        }
        if ac.lookup_timeout_ms == 0 {
            return Err(invalid("autocomplete.lookup_timeout_ms", ac.lookup_timeout_ms).into());
        }

        if url::Url::parse(&self.source.spoonacular_url).is_err() {
            return Err(invalid("source.spoonacular_url", &self.source.spoonacular_url).into());
        }

        if let Some(webhook) = &self.webhook.url {
            match url::Url::parse(webhook) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                _ => return Err(invalid("webhook.url", webhook).into()),
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

impl AutocompleteConfig {
    /// Debounce window as Duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Blur grace delay as Duration
    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }

    /// Remote lookup deadline as Duration
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

impl WebhookConfig {
    /// Request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl OutputFormat {
    /// Check if format requires pretty printing
    pub fn is_pretty(&self) -> bool {
        matches!(self, OutputFormat::JsonPretty | OutputFormat::Table)
    }

    /// Check if format is JSON-based
    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::JsonPretty)
    }
}

impl SourceKind {
    /// Parse a source kind from a command-line value
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "static" | "list" => Some(SourceKind::Static),
            "spoonacular" | "remote" => Some(SourceKind::Spoonacular),
            "simulated" | "mock" => Some(SourceKind::Simulated),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.autocomplete.debounce(), Duration::from_millis(300));
        assert_eq!(config.autocomplete.blur_grace(), Duration::from_millis(200));
        assert_eq!(config.autocomplete.display_cap, 10);
        assert_eq!(config.autocomplete.browse_cap, 100);
        assert_eq!(config.source.kind, SourceKind::Static);
        assert!(config.webhook.url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_format_checks() {
        assert!(OutputFormat::JsonPretty.is_pretty());
        assert!(OutputFormat::JsonPretty.is_json());
        assert!(!OutputFormat::Plain.is_pretty());
        assert!(OutputFormat::Table.is_pretty());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [autocomplete]
            debounce_ms = 150

            [source]
            kind = "simulated"
            "#,
        )
        .unwrap();

        assert_eq!(config.autocomplete.debounce_ms, 150);
        assert_eq!(config.autocomplete.display_cap, 10);
        assert_eq!(config.source.kind, SourceKind::Simulated);
        assert_eq!(config.source.simulated_latency_ms, 500);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_file(Some(dir.path().join("nope.toml").as_path())).unwrap();
        assert_eq!(config.autocomplete.debounce_ms, 300);
    }

    #[test]
    fn test_save_and_reload_webhook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.webhook.url = Some("https://hooks.example.com/recipes".to_string());
        config.save(&path).unwrap();

        let loaded = Config::load_from_file(Some(path.as_path())).unwrap();
        assert_eq!(
            loaded.webhook.url.as_deref(),
            Some("https://hooks.example.com/recipes")
        );
    }

    #[test]
    fn test_invalid_file_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "autocomplete = 3").unwrap();

        let err = Config::load_from_file(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("Invalid config format"));
    }

    #[test]
    fn test_validate_rejects_zero_cap() {
        let mut config = Config::default();
        config.autocomplete.display_cap = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_webhook() {
        let mut config = Config::default();
        config.webhook.url = Some("ftp://example.com/hook".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_source_kind_parse() {
        assert_eq!(SourceKind::parse("Static"), Some(SourceKind::Static));
        assert_eq!(SourceKind::parse("mock"), Some(SourceKind::Simulated));
        assert_eq!(SourceKind::parse("bogus"), None);
    }
}
