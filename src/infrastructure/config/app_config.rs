//! Application configuration.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::services::MAX_AUTO_LOAD_BYTES;
use crate::infrastructure::cache::{DEFAULT_CACHE_ENTRIES, DEFAULT_MAX_STORE_SIZE};
use crate::infrastructure::opensea::DEFAULT_API_BASE;

const APP_NAME: &str = "mediagate";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "tecknian";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration from file and CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Auto-load size limit in bytes for attachments from other senders.
    #[serde(default = "default_max_auto_load_bytes")]
    pub max_auto_load_bytes: u64,

    /// Attachment cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Marketplace API configuration.
    #[serde(default)]
    pub opensea: OpenSeaConfig,
}

/// Attachment cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Store directory override.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Disk store byte budget.
    #[serde(default = "default_max_disk_bytes")]
    pub max_disk_bytes: u64,

    /// Maximum decoded attachments kept in memory.
    #[serde(default = "default_memory_entries")]
    pub memory_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            max_disk_bytes: default_max_disk_bytes(),
            memory_entries: default_memory_entries(),
        }
    }
}

/// Marketplace API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenSeaConfig {
    /// API key. Sourced from the environment or CLI, never the config file.
    #[serde(skip)]
    pub api_key: Option<String>,

    /// API base URL.
    #[serde(default = "default_api_base")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenSeaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_max_auto_load_bytes() -> u64 {
    MAX_AUTO_LOAD_BYTES
}

fn default_max_disk_bytes() -> u64 {
    DEFAULT_MAX_STORE_SIZE
}

fn default_memory_entries() -> usize {
    DEFAULT_CACHE_ENTRIES
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_key) = &args.api_key {
            self.opensea.api_key = Some(api_key.clone());
        }
        if let Some(cache_dir) = &args.cache_dir {
            self.cache.dir = Some(cache_dir.clone());
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("mediagate.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns the attachment store directory, honoring the override.
    #[must_use]
    pub fn effective_store_dir(&self) -> PathBuf {
        self.cache.dir.clone().unwrap_or_else(|| {
            ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).map_or_else(
                || {
                    std::env::temp_dir()
                        .join("mediagate")
                        .join("cache")
                        .join("attachments")
                },
                |dirs| dirs.cache_dir().join("attachments"),
            )
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            max_auto_load_bytes: default_max_auto_load_bytes(),
            cache: CacheConfig::default(),
            opensea: OpenSeaConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
            log_level = "debug"
            max_auto_load_bytes = 1048576

            [cache]
            max_disk_bytes = 1024
            memory_entries = 4

            [opensea]
            base_url = "http://localhost:8080"
            timeout_secs = 5
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.max_auto_load_bytes, 1_048_576);
        assert_eq!(config.cache.max_disk_bytes, 1024);
        assert_eq!(config.cache.memory_entries, 4);
        assert_eq!(config.opensea.base_url, "http://localhost:8080");
        assert_eq!(config.opensea.timeout_secs, 5);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.max_auto_load_bytes, MAX_AUTO_LOAD_BYTES);
        assert_eq!(config.cache.max_disk_bytes, DEFAULT_MAX_STORE_SIZE);
        assert!(config.opensea.api_key.is_none());
        assert_eq!(config.opensea.base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn test_api_key_never_read_from_file() {
        let config: AppConfig = toml::from_str(
            r#"
            [opensea]
            api_key = "leaked"
        "#,
        )
        .unwrap_or_else(|_| AppConfig::default());

        assert!(config.opensea.api_key.is_none());
    }

    #[test]
    fn test_store_dir_override() {
        let mut config = AppConfig::default();
        config.cache.dir = Some(PathBuf::from("/tmp/custom"));
        assert_eq!(config.effective_store_dir(), PathBuf::from("/tmp/custom"));
    }
}
