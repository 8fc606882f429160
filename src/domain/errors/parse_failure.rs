//! Parse-time failure reasons.

use thiserror::Error;

/// Reason an identifier failed to parse.
///
/// Never raised. The parser renders it into the identifier's error reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ParseFailure {
    #[error("invalid input")]
    EmptyInput,

    #[error("invalid data URI format")]
    DataUriFormat,

    #[error("invalid transaction ID")]
    TransactionId,

    #[error("invalid output index")]
    OutputIndex,

    #[error("invalid content hash")]
    ContentHash,

    #[error("unknown protocol: {scheme}")]
    UnknownProtocol { scheme: String },

    #[error("unrecognized format")]
    Unrecognized,
}

impl ParseFailure {
    /// Creates unknown protocol failure.
    #[must_use]
    pub fn unknown_protocol(scheme: impl Into<String>) -> Self {
        Self::UnknownProtocol {
            scheme: scheme.into(),
        }
    }
}
