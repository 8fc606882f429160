//! Domain layer with identifier entities, validators and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Identifier fragment validators.
pub mod validators;

pub use entities::{ParseOptions, ParsedIdentifier, ResolvedBatch, Shape, Validation};
pub use errors::{ParseFailure, ResolveError, ResolveResult};
pub use ports::{CacheStats, Resolver, SharedResolver, UrlCachePort, resolver_fn};
