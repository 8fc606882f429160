//! Resolution error types.

use thiserror::Error;

use crate::domain::entities::Shape;

/// Resolution error variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ResolveError {
    #[error("invalid identifier: {reason}")]
    InvalidIdentifier { reason: String },

    #[error("missing {field}")]
    MissingField { field: &'static str },

    #[error("no resolver registered for {shape}")]
    NoResolver { shape: Shape },

    #[error("resolver timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("resolver task failed: {message}")]
    TaskFailed { message: String },

    #[error("resolver failed: {message}")]
    Failed { message: String },
}

impl ResolveError {
    /// Creates missing transaction id error.
    #[must_use]
    pub const fn missing_txid() -> Self {
        Self::MissingField {
            field: "transaction ID",
        }
    }

    /// Creates missing content hash error.
    #[must_use]
    pub const fn missing_content_hash() -> Self {
        Self::MissingField {
            field: "content hash",
        }
    }

    /// Creates invalid identifier error.
    #[must_use]
    pub fn invalid_identifier(reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            reason: reason.into(),
        }
    }

    /// Creates generic resolver failure.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Creates task failure error.
    #[must_use]
    pub fn task_failed(message: impl Into<String>) -> Self {
        Self::TaskFailed {
            message: message.into(),
        }
    }

    /// Returns whether the failure came from the timer rather than the resolver.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
