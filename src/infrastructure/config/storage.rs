//! On-disk configuration for the resolver CLI.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::{
    AppConfig, DEFAULT_BITFS_GATEWAY, DEFAULT_IPFS_GATEWAY, DEFAULT_ORDFS_GATEWAY,
};

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";
const APP_NAME: &str = "image-protocols";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while locating, reading or writing `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No per-user configuration directory exists on this platform.
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    /// Reading, creating or replacing the file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration could not be rendered as TOML.
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Reads and writes `config.toml` in the per-user configuration directory.
///
/// A missing file is created with defaults. A malformed file is left as it is
/// and defaults are used. Gateways that are not http(s) URLs fall back to
/// their defaults so every resolver has a usable base URL.
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Locates the platform configuration directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigDirNotFound` if the platform has none.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::ConfigDirNotFound)?;

        Ok(Self { config_dir })
    }

    /// Uses `path` as the configuration directory.
    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self { config_dir: path }
    }

    /// Returns the file read by [`load_config`](Self::load_config): `path_override`
    /// when given, otherwise `config.toml` in the configuration directory.
    #[must_use]
    pub fn config_path(&self, path_override: Option<&Path>) -> PathBuf {
        path_override.map_or_else(|| self.config_dir.join(CONFIG_FILE_NAME), Path::to_path_buf)
    }

    /// Loads the configuration, writing a default file if none exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the default cannot be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = self.config_path(path_override);

        if !path.exists() {
            info!(path = %path.display(), "No config file, writing defaults");
            let config = AppConfig::default();
            Self::write_atomic(&path, &config)?;
            return Ok(config);
        }

        let content = fs::read_to_string(&path)?;
        let mut config = match toml::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Malformed config file, using defaults");
                return Ok(AppConfig::default());
            }
        };

        repair_gateways(&mut config);
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Writes the configuration to `config.toml` in the configuration directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory or file cannot be written.
    pub fn save_config(&self, config: &AppConfig) -> Result<(), ConfigError> {
        Self::write_atomic(&self.config_path(None), config)
    }

    /// Replaces `path` through a temporary sibling so readers never see a partial file.
    fn write_atomic(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config)?;

        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("config path has no parent directory"))?;
        fs::create_dir_all(parent)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}

fn is_http_url(gateway: &str) -> bool {
    gateway.starts_with("https://") || gateway.starts_with("http://")
}

/// Resets every gateway that is not an http(s) URL to its default.
fn repair_gateways(config: &mut AppConfig) {
    let resolver = &mut config.resolver;
    for (name, gateway, default) in [
        ("default_gateway", &mut resolver.default_gateway, DEFAULT_ORDFS_GATEWAY),
        ("bitfs_gateway", &mut resolver.bitfs_gateway, DEFAULT_BITFS_GATEWAY),
        ("ipfs_gateway", &mut resolver.ipfs_gateway, DEFAULT_IPFS_GATEWAY),
    ] {
        if !is_http_url(gateway) {
            warn!(name, value = %gateway, default, "Ignoring gateway that is not an http(s) URL");
            *gateway = default.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("nested"));

        let config = manager.load_config(None).unwrap();

        assert!(config.resolver.cache_enabled);
        let written = fs::read_to_string(dir.path().join("nested").join(CONFIG_FILE_NAME)).unwrap();
        assert!(written.contains("[resolver]"));
        assert!(written.contains(DEFAULT_ORDFS_GATEWAY));
    }

    #[test]
    fn test_malformed_file_is_kept_and_defaults_used() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        let config_file = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_file, "[resolver\ntimeout_ms = 5").unwrap();

        let config = manager.load_config(None).unwrap();

        assert_eq!(config.resolver.timeout_ms, 30_000);
        assert_eq!(
            fs::read_to_string(&config_file).unwrap(),
            "[resolver\ntimeout_ms = 5"
        );
    }

    #[test]
    fn test_override_path_is_read() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("unused"));
        let custom = dir.path().join("custom.toml");
        fs::write(&custom, "[resolver]\ncache_ttl_seconds = 7\n").unwrap();

        let config = manager.load_config(Some(&custom)).unwrap();

        assert_eq!(config.resolver.cache_ttl_seconds, 7);
        assert_eq!(manager.config_path(Some(&custom)), custom);
        assert!(!dir.path().join("unused").exists());
    }

    #[test]
    fn test_non_http_gateways_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[resolver]\ndefault_gateway = \"ordfs.network\"\nipfs_gateway = \"https://dweb.link/ipfs\"\nbitfs_gateway = \"\"\n",
        )
        .unwrap();

        let config = manager.load_config(None).unwrap();

        assert_eq!(config.resolver.default_gateway, DEFAULT_ORDFS_GATEWAY);
        assert_eq!(config.resolver.bitfs_gateway, DEFAULT_BITFS_GATEWAY);
        assert_eq!(config.resolver.ipfs_gateway, "https://dweb.link/ipfs");
    }

    #[test]
    fn test_saved_config_is_loaded_back() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        let mut config = AppConfig::default();
        config.resolver.fallback_image = "https://example.com/none.png".to_string();
        config.resolver.cache_capacity = 10;

        manager.save_config(&config).unwrap();
        let loaded = manager.load_config(None).unwrap();

        assert_eq!(loaded.resolver, config.resolver);
    }
}
