//! Infrastructure layer with cache, configuration and gateway adapters.

/// In-memory URL cache.
pub mod cache;
/// Application configuration.
pub mod config;
/// Built-in resolvers.
pub mod resolvers;

pub use cache::MemoryUrlCache;
pub use config::{AppConfig, CliArgs, Command, LogLevel, ResolverConfig, StorageManager};
pub use resolvers::Gateways;
