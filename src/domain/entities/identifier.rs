//! Parsed identifier value object.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::ParseFailure;

/// Classification tag assigned to an identifier by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// Bitcoin Files protocol, `b://txid[_vout]`.
    BitcoinFile,
    /// Ordinals protocol, `ord://txid[_vout|.vout]`.
    Ordinal,
    /// BitFS protocol, `bitfs://txid[.out.vout[.chunk]]`.
    #[serde(rename = "bitfs")]
    BitFs,
    /// IPFS content identifier, `ipfs://hash`.
    Ipfs,
    /// Inline `data:` URI.
    DataUri,
    /// Plain `http://` or `https://` URL.
    Http,
    /// Bare txid or outpoint without a scheme.
    Native,
    /// Anything the parser could not classify.
    Unknown,
}

impl Shape {
    /// All shapes in declaration order.
    pub const ALL: [Self; 8] = [
        Self::BitcoinFile,
        Self::Ordinal,
        Self::BitFs,
        Self::Ipfs,
        Self::DataUri,
        Self::Http,
        Self::Native,
        Self::Unknown,
    ];

    /// Returns the tag as used in serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BitcoinFile => "bitcoin-file",
            Self::Ordinal => "ordinal",
            Self::BitFs => "bitfs",
            Self::Ipfs => "ipfs",
            Self::DataUri => "data-uri",
            Self::Http => "http",
            Self::Native => "native",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options accepted by the identifier parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Reserved. Accepted and carried, but does not change parsing.
    pub strict: bool,
    /// Whether bare txids and outpoints without a scheme are recognized.
    pub allow_native_format: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: false,
            allow_native_format: true,
        }
    }
}

/// Result of classifying a raw identifier string.
///
/// Instances produced by the parser uphold the invariant that `is_valid()`
/// implies every field required by the shape is present and validated. The
/// builder methods do not enforce it, so resolvers must still check for the
/// fields they need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedIdentifier {
    shape: Shape,
    raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    txid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<String>,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_reason: Option<String>,
}

impl ParsedIdentifier {
    /// Creates a valid identifier of the given shape with no extracted fields.
    #[must_use]
    pub fn new(shape: Shape, raw: impl Into<String>) -> Self {
        Self {
            shape,
            raw: raw.into(),
            txid: None,
            output_index: None,
            content_hash: None,
            mime_type: None,
            payload: None,
            valid: true,
            error_reason: None,
        }
    }

    /// Creates an invalid identifier of the given shape.
    #[must_use]
    pub fn rejected(shape: Shape, raw: impl Into<String>, failure: &ParseFailure) -> Self {
        Self::new(shape, raw).invalid(failure.to_string())
    }

    /// Sets the transaction id.
    #[must_use]
    pub fn with_txid(mut self, txid: impl Into<String>) -> Self {
        self.txid = Some(txid.into());
        self
    }

    /// Sets the output index.
    #[must_use]
    pub fn with_output_index(mut self, output_index: u64) -> Self {
        self.output_index = Some(output_index);
        self
    }

    /// Sets the content hash.
    #[must_use]
    pub fn with_content_hash(mut self, hash: impl Into<String>) -> Self {
        self.content_hash = Some(hash.into());
        self
    }

    /// Sets the MIME type and payload of a data URI.
    #[must_use]
    pub fn with_data(mut self, mime_type: impl Into<String>, payload: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self.payload = Some(payload.into());
        self
    }

    /// Marks the identifier invalid with the given reason.
    #[must_use]
    pub fn invalid(mut self, reason: impl Into<String>) -> Self {
        self.valid = false;
        self.error_reason = Some(reason.into());
        self
    }

    /// Returns the shape tag.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the original, untrimmed input.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the transaction id, if extracted.
    #[must_use]
    pub fn txid(&self) -> Option<&str> {
        self.txid.as_deref()
    }

    /// Returns the output index, if extracted.
    #[must_use]
    pub const fn output_index(&self) -> Option<u64> {
        self.output_index
    }

    /// Returns the content hash, if extracted.
    #[must_use]
    pub fn content_hash(&self) -> Option<&str> {
        self.content_hash.as_deref()
    }

    /// Returns the data URI MIME type, if extracted.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Returns the data URI payload, verbatim and undecoded.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Returns whether every required field was present and valid.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the reason the identifier is invalid.
    #[must_use]
    pub fn error_reason(&self) -> Option<&str> {
        self.error_reason.as_deref()
    }

    /// Projects the identifier to its validation outcome.
    #[must_use]
    pub fn validation(&self) -> Validation {
        Validation {
            valid: self.valid,
            reason: self.error_reason.clone(),
        }
    }
}

/// Outcome of validating an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    /// Whether the identifier is valid.
    pub valid: bool,
    /// Reason for rejection when invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
