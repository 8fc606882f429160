//! Built-in gateway resolvers.

pub mod gateway;

pub use gateway::{
    BitFsResolver, BitcoinFileResolver, Gateways, IpfsResolver, OrdinalResolver,
    PassthroughResolver, outpoint_url,
};
