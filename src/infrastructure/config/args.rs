use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments. Global flags override values from `config.toml`.
#[derive(Debug, Parser)]
#[command(
    name = "image-protocols",
    version,
    about = "Convert blockchain image identifiers to display URLs",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Gateway used for ordinal, bitcoin file and native identifiers.
    #[arg(long, value_name = "URL", env = "IMAGE_PROTOCOLS_GATEWAY", global = true)]
    pub gateway: Option<String>,

    /// URL printed when an identifier cannot be resolved.
    #[arg(long, value_name = "URL", global = true)]
    pub fallback: Option<String>,

    /// Resolver timeout in milliseconds (0 disables).
    #[arg(long, value_name = "MS", global = true)]
    pub timeout_ms: Option<u64>,

    /// Disable the resolved URL cache.
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the `image-protocols` binary.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Convert a single identifier to a display URL.
    Resolve {
        /// Identifier to resolve.
        identifier: String,
    },
    /// Parse an identifier and print its details as JSON.
    Parse {
        /// Identifier to parse.
        identifier: String,
        /// Do not recognize bare txids and outpoints.
        #[arg(long)]
        no_native: bool,
    },
    /// Check whether an identifier is well formed.
    Validate {
        /// Identifier to validate.
        identifier: String,
    },
    /// Resolve several identifiers at once.
    Batch {
        /// Identifiers to resolve.
        #[arg(required = true)]
        identifiers: Vec<String>,
    },
    /// Show heuristic metadata and a security verdict for an identifier.
    Inspect {
        /// Identifier to inspect.
        identifier: String,
    },
}
