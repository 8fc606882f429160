pub mod display_url_service;
pub mod identifier_parser;
pub mod resolver_registry;
pub mod url_inspector;

pub use display_url_service::{BATCH_WINDOW, DisplayUrlService, ResolveOptions};
pub use identifier_parser::IdentifierParser;
pub use resolver_registry::ResolverRegistry;
pub use url_inspector::{DEFAULT_SRCSET_WIDTHS, IdentifierMetadata, SecurityVerdict, UrlInspector};
