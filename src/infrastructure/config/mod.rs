//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{
    AppConfig, DEFAULT_BITFS_GATEWAY, DEFAULT_FALLBACK_IMAGE, DEFAULT_IPFS_GATEWAY,
    DEFAULT_ORDFS_GATEWAY, DEFAULT_TIMEOUT_MS, LogLevel, ResolverConfig,
};
pub use args::{CliArgs, Command};
pub use storage::{ConfigError, StorageManager};
