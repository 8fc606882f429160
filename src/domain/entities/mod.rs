//! Domain entity definitions.

mod identifier;
mod resolved_batch;

pub use identifier::{ParseOptions, ParsedIdentifier, Shape, Validation};
pub use resolved_batch::ResolvedBatch;
