//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::app_config::LogLevel;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "mediagate",
    version,
    about = "Attachment gating and caching engine for a decentralized social client",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// OpenSea API key.
    #[arg(long, env = "OPENSEA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Attachment store directory override.
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch marketplace metadata for a collection slug.
    Collection {
        /// Collection slug, e.g. "boredapeyachtclub".
        slug: String,
    },
    /// Inspect or clear the attachment store.
    Cache {
        /// Store operation.
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Attachment store operations.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Print entry count and disk usage.
    Stats,
    /// Remove every stored attachment.
    Clear,
}
