mod resolver_port;
mod url_cache_port;

pub use resolver_port::{Resolver, SharedResolver, resolver_fn};
pub use url_cache_port::{CacheStats, UrlCachePort};
