use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::Shape;
use crate::domain::ports::SharedResolver;
use crate::infrastructure::resolvers::{
    BitFsResolver, BitcoinFileResolver, Gateways, IpfsResolver, OrdinalResolver,
    PassthroughResolver,
};

/// One resolver slot per resolvable shape.
///
/// `Shape::Unknown` has no slot; lookups for it always miss.
#[derive(Clone)]
pub struct ResolverRegistry {
    bitcoin_file: SharedResolver,
    ordinal: SharedResolver,
    bitfs: SharedResolver,
    ipfs: SharedResolver,
    data_uri: SharedResolver,
    http: SharedResolver,
    native: SharedResolver,
}

impl ResolverRegistry {
    /// Creates a registry populated with the built-in gateway resolvers.
    #[must_use]
    pub fn with_gateways(gateways: &Gateways) -> Self {
        let outpoints: SharedResolver = Arc::new(BitcoinFileResolver::new(&gateways.ordfs));
        let passthrough: SharedResolver = Arc::new(PassthroughResolver);

        Self {
            bitcoin_file: outpoints.clone(),
            ordinal: Arc::new(OrdinalResolver::new(&gateways.ordfs)),
            bitfs: Arc::new(BitFsResolver::new(&gateways.ordfs, &gateways.bitfs)),
            ipfs: Arc::new(IpfsResolver::new(&gateways.ipfs)),
            data_uri: passthrough.clone(),
            http: passthrough,
            native: outpoints,
        }
    }

    /// Returns the resolver for `shape`.
    #[must_use]
    pub fn get(&self, shape: Shape) -> Option<&SharedResolver> {
        match shape {
            Shape::BitcoinFile => Some(&self.bitcoin_file),
            Shape::Ordinal => Some(&self.ordinal),
            Shape::BitFs => Some(&self.bitfs),
            Shape::Ipfs => Some(&self.ipfs),
            Shape::DataUri => Some(&self.data_uri),
            Shape::Http => Some(&self.http),
            Shape::Native => Some(&self.native),
            Shape::Unknown => None,
        }
    }

    fn slot_mut(&mut self, shape: Shape) -> Option<&mut SharedResolver> {
        match shape {
            Shape::BitcoinFile => Some(&mut self.bitcoin_file),
            Shape::Ordinal => Some(&mut self.ordinal),
            Shape::BitFs => Some(&mut self.bitfs),
            Shape::Ipfs => Some(&mut self.ipfs),
            Shape::DataUri => Some(&mut self.data_uri),
            Shape::Http => Some(&mut self.http),
            Shape::Native => Some(&mut self.native),
            Shape::Unknown => None,
        }
    }

    /// Replaces the resolver for `shape`.
    ///
    /// Returns false, leaving the registry unchanged, for `Shape::Unknown`.
    pub fn register(&mut self, shape: Shape, resolver: SharedResolver) -> bool {
        let Some(slot) = self.slot_mut(shape) else {
            warn!(%shape, "Ignoring resolver for unresolvable shape");
            return false;
        };
        *slot = resolver;
        debug!(%shape, "Registered custom resolver");
        true
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::with_gateways(&Gateways::default())
    }
}

impl std::fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverRegistry").finish_non_exhaustive()
    }
}
