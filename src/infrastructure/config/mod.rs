//! Configuration loading and CLI arguments.

mod app_config;
mod args;
mod storage;

pub use app_config::{AppConfig, CacheConfig, LogLevel, OpenSeaConfig};
pub use args::{CacheAction, CliArgs, Command};
pub use storage::{ConfigError, StorageManager};
