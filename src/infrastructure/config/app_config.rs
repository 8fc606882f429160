//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;

/// Gateway serving ordinal, bitcoin file and native outpoint content.
pub const DEFAULT_ORDFS_GATEWAY: &str = "https://ordfs.network";

/// Gateway serving bare BitFS transactions.
pub const DEFAULT_BITFS_GATEWAY: &str = "https://x.bitfs.network";

/// Gateway serving IPFS content.
pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs";

/// Grey "No Image" placeholder returned when resolution fails.
pub const DEFAULT_FALLBACK_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMjAwIiBoZWlnaHQ9IjIwMCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48cmVjdCB3aWR0aD0iMjAwIiBoZWlnaHQ9IjIwMCIgZmlsbD0iI2VlZSIvPjx0ZXh0IHRleHQtYW5jaG9yPSJtaWRkbGUiIHg9IjEwMCIgeT0iMTAwIiBzdHlsZT0iZmlsbDojYWFhO2ZvbnQtd2VpZ2h0OmJvbGQ7Zm9udC1zaXplOjEzcHg7Zm9udC1mYW1pbHk6QXJpYWwsSGVsdmV0aWNhLHNhbnMtc2VyaWY7ZG9taW5hbnQtYmFzZWxpbmU6Y2VudHJhbCI+Tm8gSW1hZ2U8L3RleHQ+PC9zdmc+";

/// Default resolver timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    Info,
    /// Warning level.
    #[default]
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
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

/// Application configuration, loaded from TOML and overridden by CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path. Logs go to stderr when unset.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Resolution configuration.
    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// Configuration for identifier resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Base URL for ordinal, bitcoin file, native and bitfs outpoint content.
    #[serde(default = "default_gateway")]
    pub default_gateway: String,

    /// Base URL for bitfs transactions without an output index.
    #[serde(default = "default_bitfs_gateway")]
    pub bitfs_gateway: String,

    /// Base URL for IPFS content.
    #[serde(default = "default_ipfs_gateway")]
    pub ipfs_gateway: String,

    /// URL returned when an identifier cannot be resolved.
    #[serde(default = "default_fallback_image")]
    pub fallback_image: String,

    /// Reserved. Stored and exposed, not consulted during parsing.
    #[serde(default = "default_true")]
    pub validate_txid: bool,

    /// Cache resolved URLs.
    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    /// Age in seconds after which a cached URL is ignored.
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,

    /// Maximum number of cached URLs.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Per-resolution timeout in milliseconds. Zero waits indefinitely.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ResolverConfig {
    /// Returns the cache time-to-live.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Returns the resolver timeout, or None when disabled.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.timeout_ms))
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_gateway: default_gateway(),
            bitfs_gateway: default_bitfs_gateway(),
            ipfs_gateway: default_ipfs_gateway(),
            fallback_image: default_fallback_image(),
            validate_txid: true,
            cache_enabled: true,
            cache_ttl_seconds: default_cache_ttl_seconds(),
            cache_capacity: default_cache_capacity(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

fn default_gateway() -> String {
    DEFAULT_ORDFS_GATEWAY.to_string()
}

fn default_bitfs_gateway() -> String {
    DEFAULT_BITFS_GATEWAY.to_string()
}

fn default_ipfs_gateway() -> String {
    DEFAULT_IPFS_GATEWAY.to_string()
}

fn default_fallback_image() -> String {
    DEFAULT_FALLBACK_IMAGE.to_string()
}

fn default_cache_ttl_seconds() -> u64 {
    3600
}

fn default_cache_capacity() -> usize {
    1000
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(gateway) = &args.gateway {
            self.resolver.default_gateway = gateway.clone();
        }
        if let Some(fallback) = &args.fallback {
            self.resolver.fallback_image = fallback.clone();
        }
        if let Some(timeout_ms) = args.timeout_ms {
            self.resolver.timeout_ms = timeout_ms;
        }
        if args.no_cache {
            self.resolver.cache_enabled = false;
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::default(),
            resolver: ResolverConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [resolver]
            default_gateway = "https://gateway.example"
            cache_enabled = false
            timeout_ms = 0
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.resolver.default_gateway, "https://gateway.example");
        assert!(!config.resolver.cache_enabled);
        assert_eq!(config.resolver.timeout(), None);
        assert_eq!(config.resolver.ipfs_gateway, DEFAULT_IPFS_GATEWAY);
        assert_eq!(config.resolver.cache_capacity, 1000);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.resolver.default_gateway, DEFAULT_ORDFS_GATEWAY);
        assert_eq!(config.resolver.fallback_image, DEFAULT_FALLBACK_IMAGE);
        assert!(config.resolver.validate_txid);
        assert!(config.resolver.cache_enabled);
        assert_eq!(config.resolver.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(
            config.resolver.timeout(),
            Some(Duration::from_millis(30_000))
        );
    }

    #[test]
    fn test_empty_file_matches_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.resolver, ResolverConfig::default());
    }

    #[test]
    fn test_round_trip() {
        let mut config = AppConfig::default();
        config.resolver.cache_ttl_seconds = 5;

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.resolver, config.resolver);
    }

    #[test]
    fn test_merge_with_args_overrides_file_values() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "image-protocols",
            "--gateway",
            "https://mirror.example",
            "--fallback",
            "F",
            "--timeout-ms",
            "250",
            "--no-cache",
            "--log-level",
            "trace",
            "resolve",
            "x",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.resolver.default_gateway, "https://mirror.example");
        assert_eq!(config.resolver.fallback_image, "F");
        assert_eq!(config.resolver.timeout_ms, 250);
        assert!(!config.resolver.cache_enabled);
        assert_eq!(config.log_level, LogLevel::Trace);
    }

    #[test]
    fn test_merge_without_flags_keeps_values() {
        let mut config = AppConfig::default();
        config.resolver.cache_enabled = false;
        let args = CliArgs::parse_from(["image-protocols", "resolve", "x"]);

        config.merge_with_args(&args);

        assert!(!config.resolver.cache_enabled);
        assert_eq!(config.resolver.default_gateway, DEFAULT_ORDFS_GATEWAY);
    }
}
