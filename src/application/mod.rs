//! Application layer with parsing, dispatch and resolution services.

/// Parser, registry, resolution engine and inspector.
pub mod services;

pub use services::{
    BATCH_WINDOW, DEFAULT_SRCSET_WIDTHS, DisplayUrlService, IdentifierMetadata,
    IdentifierParser, ResolveOptions, ResolverRegistry, SecurityVerdict, UrlInspector,
};
