//! Port definition for identifier resolvers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::ParsedIdentifier;
use crate::domain::errors::ResolveResult;

/// Turns a parsed identifier into a display URL.
///
/// Implementations may be invoked on identifiers that were built by hand and
/// are missing fields, so they must check what they use.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolves the identifier to a display URL.
    async fn resolve(&self, parsed: &ParsedIdentifier) -> ResolveResult<String>;
}

#[async_trait]
impl<F> Resolver for F
where
    F: Fn(&ParsedIdentifier) -> ResolveResult<String> + Send + Sync,
{
    async fn resolve(&self, parsed: &ParsedIdentifier) -> ResolveResult<String> {
        self(parsed)
    }
}

/// Shared handle to a resolver.
pub type SharedResolver = Arc<dyn Resolver>;

/// Wraps a synchronous function as a shared resolver.
pub fn resolver_fn<F>(f: F) -> SharedResolver
where
    F: Fn(&ParsedIdentifier) -> ResolveResult<String> + Send + Sync + 'static,
{
    Arc::new(f)
}
