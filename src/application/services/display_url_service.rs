//! Identifier to display URL resolution.
//!
//! Pipeline: cache lookup, parse, resolver dispatch under a timeout, cache
//! store. Every failure along the way turns into the fallback URL.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::join_all;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::domain::entities::{ParseOptions, ParsedIdentifier, ResolvedBatch, Shape, Validation};
use crate::domain::errors::{ResolveError, ResolveResult};
use crate::domain::ports::{CacheStats, SharedResolver, UrlCachePort};
use crate::infrastructure::cache::MemoryUrlCache;
use crate::infrastructure::config::ResolverConfig;
use crate::infrastructure::resolvers::Gateways;

use super::identifier_parser::IdentifierParser;
use super::resolver_registry::ResolverRegistry;

/// Number of identifiers resolved concurrently by [`DisplayUrlService::resolve_many`].
pub const BATCH_WINDOW: usize = 10;

/// Per-call overrides for resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// URL returned on failure. Defaults to the configured fallback image.
    pub fallback: Option<String>,
    /// Resolver timeout in milliseconds. Zero disables the timeout; `None`
    /// uses the configured value.
    pub timeout_ms: Option<u64>,
}

impl ResolveOptions {
    /// Sets the fallback URL.
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Sets the timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

/// Resolves identifiers into display URLs.
///
/// `resolve` never fails: invalid identifiers, missing resolvers, resolver
/// errors and timeouts all produce the fallback URL.
pub struct DisplayUrlService {
    config: ResolverConfig,
    registry: RwLock<ResolverRegistry>,
    cache: Arc<dyn UrlCachePort>,
}

impl DisplayUrlService {
    /// Creates a service with the built-in resolvers.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        let cache = Arc::new(MemoryUrlCache::new(
            config.cache_capacity,
            config.cache_ttl(),
        ));
        Self::with_cache(config, cache)
    }

    /// Creates a service whose resolvers are overridden per shape.
    #[must_use]
    pub fn with_resolvers<I>(config: ResolverConfig, resolvers: I) -> Self
    where
        I: IntoIterator<Item = (Shape, SharedResolver)>,
    {
        let service = Self::new(config);
        {
            let mut registry = service.registry.write();
            for (shape, resolver) in resolvers {
                registry.register(shape, resolver);
            }
        }
        service
    }

    /// Creates a service backed by the given cache.
    #[must_use]
    pub fn with_cache(config: ResolverConfig, cache: Arc<dyn UrlCachePort>) -> Self {
        let registry = ResolverRegistry::with_gateways(&Gateways::from_config(&config));
        Self {
            config,
            registry: RwLock::new(registry),
            cache,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Returns the configured fallback image URL.
    #[must_use]
    pub fn fallback_image(&self) -> &str {
        &self.config.fallback_image
    }

    /// Parses an identifier.
    #[must_use]
    pub fn parse(&self, identifier: &str, options: ParseOptions) -> ParsedIdentifier {
        IdentifierParser::parse(identifier, options)
    }

    /// Reports whether an identifier parses cleanly.
    #[must_use]
    pub fn validate(&self, identifier: &str) -> Validation {
        self.parse(identifier, ParseOptions::default()).validation()
    }

    /// Replaces the resolver for one shape on this instance.
    ///
    /// Returns false for `Shape::Unknown`, which never resolves.
    pub fn register_resolver(&self, shape: Shape, resolver: SharedResolver) -> bool {
        self.registry.write().register(shape, resolver)
    }

    /// Drops every cached URL.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Returns cache counters.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Resolves an identifier, returning the fallback on any failure.
    pub async fn resolve(&self, identifier: &str, options: &ResolveOptions) -> String {
        let timeout = match options.timeout_ms {
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
            None => self.config.timeout(),
        };

        match self.try_resolve(identifier, timeout).await {
            Ok(url) => url,
            Err(e) => {
                warn!(identifier, error = %e, "Returning fallback image");
                options
                    .fallback
                    .clone()
                    .unwrap_or_else(|| self.config.fallback_image.clone())
            }
        }
    }

    /// Resolves many identifiers, [`BATCH_WINDOW`] at a time.
    ///
    /// Each window runs concurrently and completes before the next starts.
    /// Duplicate identifiers collapse into one entry.
    pub async fn resolve_many<I, S>(&self, identifiers: I, options: &ResolveOptions) -> ResolvedBatch
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers: Vec<String> = identifiers.into_iter().map(Into::into).collect();
        let mut batch = ResolvedBatch::with_capacity(identifiers.len());

        for window in identifiers.chunks(BATCH_WINDOW) {
            let urls = join_all(window.iter().map(|id| self.resolve(id, options))).await;
            for (identifier, url) in window.iter().zip(urls) {
                batch.insert(identifier.clone(), url);
            }
        }

        debug!(count = batch.len(), "Resolved batch");
        batch
    }

    async fn try_resolve(
        &self,
        identifier: &str,
        timeout: Option<Duration>,
    ) -> ResolveResult<String> {
        if self.config.cache_enabled {
            if let Some(url) = self.cache.get(identifier) {
                return Ok(url);
            }
        }

        let parsed = IdentifierParser::parse(identifier, ParseOptions::default());
        if !parsed.is_valid() {
            return Err(ResolveError::invalid_identifier(
                parsed.error_reason().unwrap_or_default(),
            ));
        }

        let shape = parsed.shape();
        let resolver = self
            .registry
            .read()
            .get(shape)
            .cloned()
            .ok_or(ResolveError::NoResolver { shape })?;

        debug!(identifier, %shape, "Dispatching to resolver");
        let url = match timeout {
            Some(limit) => Self::resolve_detached(resolver, parsed, limit).await?,
            None => Self::resolve_inline(&resolver, &parsed).await?,
        };

        if self.config.cache_enabled {
            debug!(identifier, url = %url, "Caching display URL");
            self.cache.put(identifier.to_string(), url.clone());
        }
        Ok(url)
    }

    /// Awaits the resolver on the caller's task, turning a panic into an error.
    async fn resolve_inline(
        resolver: &SharedResolver,
        parsed: &ParsedIdentifier,
    ) -> ResolveResult<String> {
        AssertUnwindSafe(async { resolver.resolve(parsed).await })
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(ResolveError::task_failed("resolver panicked")))
    }

    /// Runs the resolver on its own task and stops waiting after `limit`.
    /// The task is left running; its late result is discarded.
    async fn resolve_detached(
        resolver: SharedResolver,
        parsed: ParsedIdentifier,
        limit: Duration,
    ) -> ResolveResult<String> {
        let task = tokio::spawn(async move { resolver.resolve(&parsed).await });

        match tokio::time::timeout(limit, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(ResolveError::task_failed(e.to_string())),
            Err(_) => Err(ResolveError::Timeout {
                after_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}

impl Default for DisplayUrlService {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl std::fmt::Debug for DisplayUrlService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayUrlService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
