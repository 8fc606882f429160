//! Domain error types.

mod parse_failure;
mod resolve_error;

pub use parse_failure::ParseFailure;
pub use resolve_error::ResolveError;

/// Result type for resolver operations.
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
