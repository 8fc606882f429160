//! Image protocols - blockchain image identifiers to display URLs.
//!
//! This crate parses identifiers such as `b://<txid>`, `ord://<txid>_<vout>`,
//! `bitfs://<txid>.out.<vout>`, `ipfs://<hash>`, data URIs, http(s) URLs and
//! bare transaction ids, then resolves them through configurable gateways into
//! URLs an image renderer can load. Resolution is cached, bounded by a timeout
//! and never fails: anything that cannot be resolved yields a fallback image.
//!
//! ```no_run
//! # async fn demo() {
//! use image_protocols::{DisplayUrlService, ResolveOptions, ResolverConfig};
//!
//! let service = DisplayUrlService::new(ResolverConfig::default());
//! let url = service
//!     .resolve("ord://6ce94f75b88a6c24815d480437f4f06ae895afdab8039ddec10748660c29f910_0", &ResolveOptions::default())
//!     .await;
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::sync::LazyLock;

/// Application layer containing the parser, registry and resolution engine.
pub mod application;
/// Domain layer containing entities, errors, validators and port definitions.
pub mod domain;
/// Infrastructure layer containing configuration, caching and gateway resolvers.
pub mod infrastructure;

pub use application::{
    BATCH_WINDOW, DisplayUrlService, IdentifierMetadata, IdentifierParser, ResolveOptions,
    ResolverRegistry, SecurityVerdict, UrlInspector,
};
pub use domain::{
    CacheStats, ParseFailure, ParseOptions, ParsedIdentifier, ResolveError, ResolveResult,
    ResolvedBatch, Resolver, SharedResolver, Shape, UrlCachePort, Validation, resolver_fn,
};
pub use infrastructure::{AppConfig, MemoryUrlCache, ResolverConfig};

/// Current version of the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "image-protocols";

static DEFAULT_SERVICE: LazyLock<DisplayUrlService> = LazyLock::new(DisplayUrlService::default);

/// Parses an identifier without touching any service state.
#[must_use]
pub fn parse(input: &str, options: ParseOptions) -> ParsedIdentifier {
    IdentifierParser::parse(input, options)
}

/// Resolves an identifier with a process-wide service using default configuration.
///
/// The shared service has its own cache; build a [`DisplayUrlService`] for
/// custom gateways or resolvers.
pub async fn display_url(input: &str, options: &ResolveOptions) -> String {
    DEFAULT_SERVICE.resolve(input, options).await
}
