//! Pattern-based heuristics over identifiers and display URLs.
//!
//! Nothing here parses strictly; use [`IdentifierParser`](super::IdentifierParser)
//! for that.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use base64::{Engine as _, engine::general_purpose};
use regex::{Regex, RegexSet};
use serde::Serialize;

static PROTOCOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)://").expect("protocol regex"));

static TXID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-fA-F0-9]{64}").expect("txid regex"));

/// Tried in order; the first match wins.
static VOUT_RES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [r"_(\d+)$", r"\.(\d+)$", r"o(\d+)$", r"\.out\.(\d+)"]
        .map(|pattern| Regex::new(pattern).expect("vout regex"))
});

static CHUNK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.out\.(\d+)\.(\d+)").expect("chunk regex"));

static IMAGE_EXTENSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp|svg|bmp|ico|tiff?)$").expect("extension regex")
});

static SUSPICIOUS_RE: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)javascript:",
        r"(?i)vbscript:",
        r"(?i)<script",
        r"(?i)onerror=",
        r"(?i)onload=",
    ])
    .expect("suspicious pattern set")
});

/// Widths used by [`UrlInspector::src_set`] callers that have no preference.
pub const DEFAULT_SRCSET_WIDTHS: [u32; 3] = [320, 640, 1280];

/// Gateways that serve one fixed rendition per resource.
const FIXED_SIZE_HOSTS: [&str; 2] = ["ordfs.network", "bitfs.network"];

const PLACEHOLDER_SVG: &str = r##"<svg width="100" height="100" xmlns="http://www.w3.org/2000/svg"><rect width="100" height="100" fill="#e0e0e0"/><text x="50" y="50" text-anchor="middle" fill="#999" font-size="14">Loading...</text></svg>"##;

static PLACEHOLDER: LazyLock<String> = LazyLock::new(|| {
    format!(
        "data:image/svg+xml;base64,{}",
        general_purpose::STANDARD.encode(PLACEHOLDER_SVG)
    )
});

const IMAGE_HOSTS: [&str; 4] = [
    "ordfs.network",
    "x.bitfs.network",
    "replicate.delivery",
    "cloudinary.com",
];

/// Loosely extracted identifier fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdentifierMetadata {
    /// Scheme before `://`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// First 64-hex run anywhere in the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    /// Output index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vout: Option<u64>,
    /// Chunk index of a `bitfs` path such as `<txid>.out.1.2`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk: Option<u64>,
}

/// Result of [`UrlInspector::check_security`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityVerdict {
    /// Nothing suspicious found.
    Safe,
    /// A data URI mentions script content.
    DataUriScript,
    /// A script scheme or event handler attribute appears in the URL.
    SuspiciousPattern,
}

impl SecurityVerdict {
    /// Returns true for [`SecurityVerdict::Safe`].
    #[must_use]
    pub const fn is_safe(self) -> bool {
        matches!(self, Self::Safe)
    }

    /// Rejection reason, if any.
    #[must_use]
    pub const fn reason(self) -> Option<&'static str> {
        match self {
            Self::Safe => None,
            Self::DataUriScript => Some("Potential XSS in data URI"),
            Self::SuspiciousPattern => Some("Suspicious pattern detected"),
        }
    }
}

impl fmt::Display for SecurityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            None => write!(f, "safe"),
            Some(reason) => write!(f, "unsafe: {reason}"),
        }
    }
}

/// Heuristic helpers for identifiers and the URLs they resolve to.
pub struct UrlInspector;

impl UrlInspector {
    /// Pulls protocol, txid, output index and bitfs chunk out of `url`.
    #[must_use]
    pub fn extract_metadata(url: &str) -> IdentifierMetadata {
        let mut metadata = IdentifierMetadata {
            protocol: PROTOCOL_RE
                .captures(url)
                .map(|caps| caps[1].to_string()),
            txid: TXID_RE.find(url).map(|m| m.as_str().to_string()),
            vout: VOUT_RES
                .iter()
                .find_map(|re| re.captures(url))
                .and_then(|caps| caps[1].parse().ok()),
            chunk: None,
        };

        if let Some(caps) = CHUNK_RE.captures(url) {
            metadata.vout = caps[1].parse().ok();
            metadata.chunk = caps[2].parse().ok();
        }

        metadata
    }

    /// Guesses from extension, data URI type or host whether `url` is an image.
    #[must_use]
    pub fn is_likely_image(url: &str) -> bool {
        IMAGE_EXTENSION_RE.is_match(url)
            || url.starts_with("data:image/")
            || IMAGE_HOSTS.iter().any(|host| url.contains(host))
    }

    /// Screens `url` for script injection.
    #[must_use]
    pub fn check_security(url: &str) -> SecurityVerdict {
        if url.starts_with("data:") && (url.contains("script") || url.contains("javascript:")) {
            return SecurityVerdict::DataUriScript;
        }
        if SUSPICIOUS_RE.is_match(url) {
            return SecurityVerdict::SuspiciousPattern;
        }
        SecurityVerdict::Safe
    }

    /// Builds an `srcset` value for `base_url`.
    ///
    /// Fixed-size gateways get a single `1x` entry; anything else gets one
    /// `?w=<width>` entry per width.
    #[must_use]
    pub fn src_set(base_url: &str, widths: &[u32]) -> String {
        if FIXED_SIZE_HOSTS.iter().any(|host| base_url.contains(host)) {
            return format!("{base_url} 1x");
        }
        widths
            .iter()
            .map(|width| format!("{base_url}?w={width} {width}w"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Grey "Loading..." SVG as a data URI, for use while an image loads.
    #[must_use]
    pub fn placeholder() -> &'static str {
        &PLACEHOLDER
    }

    /// Case- and whitespace-insensitive form of `url`.
    ///
    /// [`DisplayUrlService`](super::DisplayUrlService) keys its cache on the
    /// raw identifier and does not use this.
    #[must_use]
    pub fn cache_key(url: &str) -> String {
        url.trim().to_lowercase()
    }

    /// Quick format screen over many URLs, without parsing.
    ///
    /// Data URIs, anything starting with `http` and anything containing a
    /// 64-hex run pass. Duplicates are reported once, in first-occurrence order.
    #[must_use]
    pub fn batch_validate<'a, I>(urls: I) -> Vec<(&'a str, bool)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        urls.into_iter()
            .filter(|url| seen.insert(*url))
            .map(|url| {
                let ok = url.starts_with("data:")
                    || url.starts_with("http")
                    || TXID_RE.is_match(url);
                (url, ok)
            })
            .collect()
    }
}
