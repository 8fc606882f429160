//! Built-in resolvers that map identifiers onto public gateways.

use async_trait::async_trait;

use crate::domain::entities::ParsedIdentifier;
use crate::domain::errors::{ResolveError, ResolveResult};
use crate::domain::ports::Resolver;
use crate::infrastructure::config::ResolverConfig;

/// Base URLs the built-in resolvers append identifier fields to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gateways {
    /// Serves outpoints: `/{txid}_{vout}`.
    pub ordfs: String,
    /// Serves bare bitfs transactions: `/{txid}`.
    pub bitfs: String,
    /// Serves IPFS content: `/{hash}`.
    pub ipfs: String,
}

impl Gateways {
    /// Creates gateways from resolver configuration.
    #[must_use]
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            ordfs: normalize(&config.default_gateway),
            bitfs: normalize(&config.bitfs_gateway),
            ipfs: normalize(&config.ipfs_gateway),
        }
    }
}

impl Default for Gateways {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

fn normalize(gateway: &str) -> String {
    gateway.trim_end_matches('/').to_string()
}

/// Builds `{gateway}/{txid}` or `{gateway}/{txid}_{index}`.
#[must_use]
pub fn outpoint_url(gateway: &str, txid: &str, index: Option<u64>) -> String {
    match index {
        Some(index) => format!("{gateway}/{txid}_{index}"),
        None => format!("{gateway}/{txid}"),
    }
}

fn require_txid(parsed: &ParsedIdentifier) -> ResolveResult<&str> {
    parsed.txid().ok_or_else(ResolveError::missing_txid)
}

/// Resolves `b://` and native identifiers, defaulting the output index to 0.
#[derive(Debug, Clone)]
pub struct BitcoinFileResolver {
    gateway: String,
}

impl BitcoinFileResolver {
    /// Creates a resolver for the given gateway.
    #[must_use]
    pub fn new(gateway: impl Into<String>) -> Self {
        Self {
            gateway: gateway.into(),
        }
    }
}

#[async_trait]
impl Resolver for BitcoinFileResolver {
    async fn resolve(&self, parsed: &ParsedIdentifier) -> ResolveResult<String> {
        let txid = require_txid(parsed)?;
        let index = parsed.output_index().unwrap_or(0);
        Ok(outpoint_url(&self.gateway, txid, Some(index)))
    }
}

/// Resolves `ord://` identifiers, leaving out the index when absent.
#[derive(Debug, Clone)]
pub struct OrdinalResolver {
    gateway: String,
}

impl OrdinalResolver {
    /// Creates a resolver for the given gateway.
    #[must_use]
    pub fn new(gateway: impl Into<String>) -> Self {
        Self {
            gateway: gateway.into(),
        }
    }
}

#[async_trait]
impl Resolver for OrdinalResolver {
    async fn resolve(&self, parsed: &ParsedIdentifier) -> ResolveResult<String> {
        let txid = require_txid(parsed)?;
        Ok(outpoint_url(&self.gateway, txid, parsed.output_index()))
    }
}

/// Resolves `bitfs://` identifiers.
///
/// Outpoints go through the ordinal gateway; only bare transactions use the
/// bitfs gateway.
#[derive(Debug, Clone)]
pub struct BitFsResolver {
    outpoint_gateway: String,
    bitfs_gateway: String,
}

impl BitFsResolver {
    /// Creates a resolver routing outpoints and bare transactions separately.
    #[must_use]
    pub fn new(outpoint_gateway: impl Into<String>, bitfs_gateway: impl Into<String>) -> Self {
        Self {
            outpoint_gateway: outpoint_gateway.into(),
            bitfs_gateway: bitfs_gateway.into(),
        }
    }
}

#[async_trait]
impl Resolver for BitFsResolver {
    async fn resolve(&self, parsed: &ParsedIdentifier) -> ResolveResult<String> {
        let txid = require_txid(parsed)?;
        Ok(match parsed.output_index() {
            Some(index) => outpoint_url(&self.outpoint_gateway, txid, Some(index)),
            None => outpoint_url(&self.bitfs_gateway, txid, None),
        })
    }
}

/// Resolves `ipfs://` identifiers.
#[derive(Debug, Clone)]
pub struct IpfsResolver {
    gateway: String,
}

impl IpfsResolver {
    /// Creates a resolver for the given gateway.
    #[must_use]
    pub fn new(gateway: impl Into<String>) -> Self {
        Self {
            gateway: gateway.into(),
        }
    }
}

#[async_trait]
impl Resolver for IpfsResolver {
    async fn resolve(&self, parsed: &ParsedIdentifier) -> ResolveResult<String> {
        let hash = parsed
            .content_hash()
            .ok_or_else(ResolveError::missing_content_hash)?;
        Ok(format!("{}/{hash}", self.gateway))
    }
}

/// Returns the raw identifier unchanged. Used for data URIs and http(s) URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughResolver;

#[async_trait]
impl Resolver for PassthroughResolver {
    async fn resolve(&self, parsed: &ParsedIdentifier) -> ResolveResult<String> {
        Ok(parsed.raw().to_string())
    }
}
