use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// Application configuration module
/// This module handles loading, validating and saving the settings of the
/// translation service: HTTP binding, database location and provider.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Document database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// HTTP server settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address the server listens on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Document database settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// SQLite file; the platform data directory is used when absent
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    #[default]
    Baidu,
    /// Offline canned translations, for demos and tests
    Mock,
}

impl TranslationProvider {
    pub fn display_name(&self) -> &str {
        match self {
            Self::Baidu => "Baidu Translate",
            Self::Mock => "Mock",
        }
    }
}

impl fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baidu => write!(f, "baidu"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "baidu" => Ok(Self::Baidu),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Baidu Translate API settings
    #[serde(default)]
    pub baidu: BaiduConfig,
}

/// Baidu Translate API settings
#[derive(Serialize, Deserialize, Clone)]
pub struct BaiduConfig {
    /// Application id issued by the Baidu developer console
    #[serde(default)]
    pub app_id: String,

    /// Secret key paired with the app id. Never logged.
    #[serde(default)]
    pub secret_key: String,

    /// Translate API URL
    #[serde(default = "default_baidu_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BaiduConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            secret_key: String::new(),
            endpoint: default_baidu_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for BaiduConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaiduConfig")
            .field("app_id", &self.app_id)
            .field("secret_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_baidu_endpoint() -> String {
    crate::providers::baidu::DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load the configuration file, writing a default one first if it is missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        self.server
            .bind_address
            .parse::<SocketAddr>()
            .map_err(|e| {
                AppError::Config(format!(
                    "Invalid bind address '{}': {}",
                    self.server.bind_address, e
                ))
            })?;

        if self.translation.provider == TranslationProvider::Baidu {
            let baidu = &self.translation.baidu;
            if baidu.app_id.trim().is_empty() {
                return Err(AppError::Config(
                    "Baidu app id is required for the Baidu provider".to_string(),
                ));
            }
            if baidu.secret_key.trim().is_empty() {
                return Err(AppError::Config(
                    "Baidu secret key is required for the Baidu provider".to_string(),
                ));
            }
            url::Url::parse(&baidu.endpoint).map_err(|e| {
                AppError::Config(format!("Invalid Baidu endpoint '{}': {}", baidu.endpoint, e))
            })?;
            if baidu.timeout_secs == 0 {
                return Err(AppError::Config("Timeout must be greater than zero".to_string()));
            }
        }

        Ok(())
    }
}
