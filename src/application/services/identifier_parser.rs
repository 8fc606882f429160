use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::domain::entities::{ParseOptions, ParsedIdentifier, Shape};
use crate::domain::errors::ParseFailure;
use crate::domain::validators::{
    DATA_URI_RE, is_valid_content_hash, is_valid_txid, parse_output_index,
};

static SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*)://(.+)$").expect("scheme pattern compiles")
});

static OUTPOINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-fA-F]{64})([oi])([0-9]+)$").expect("outpoint pattern compiles")
});

/// Classifies raw identifier strings into parsed identifiers.
///
/// Rules are tried in a fixed order and the first match wins: data URIs,
/// http(s) URLs, `scheme://` identifiers, then bare native outpoints.
pub struct IdentifierParser;

impl IdentifierParser {
    /// Parses `input`. Never fails; problems are reported on the result.
    #[must_use]
    pub fn parse(input: &str, options: ParseOptions) -> ParsedIdentifier {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return ParsedIdentifier::rejected(Shape::Unknown, input, &ParseFailure::EmptyInput);
        }

        if trimmed.starts_with("data:") {
            return Self::parse_data_uri(input, trimmed);
        }

        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return ParsedIdentifier::new(Shape::Http, input);
        }

        if let Some(caps) = SCHEME_RE.captures(trimmed) {
            let scheme = caps.get(1).map_or("", |m| m.as_str());
            let content = caps.get(2).map_or("", |m| m.as_str());
            trace!(scheme, "Dispatching scheme identifier");

            return match scheme {
                "b" => Self::parse_bitcoin_file(input, content),
                "ord" => Self::parse_ordinal(input, content),
                "bitfs" => Self::parse_bitfs(input, content),
                "ipfs" => Self::parse_ipfs(input, content),
                other => ParsedIdentifier::rejected(
                    Shape::Unknown,
                    input,
                    &ParseFailure::unknown_protocol(other),
                ),
            };
        }

        if options.allow_native_format {
            return Self::parse_native(input, trimmed);
        }

        ParsedIdentifier::rejected(Shape::Unknown, input, &ParseFailure::Unrecognized)
    }

    /// Parses an input that may be absent.
    #[must_use]
    pub fn parse_optional(input: Option<&str>, options: ParseOptions) -> ParsedIdentifier {
        match input {
            Some(input) => Self::parse(input, options),
            None => ParsedIdentifier::rejected(Shape::Unknown, "", &ParseFailure::EmptyInput),
        }
    }

    fn parse_data_uri(raw: &str, trimmed: &str) -> ParsedIdentifier {
        let Some(caps) = DATA_URI_RE.captures(trimmed) else {
            return ParsedIdentifier::rejected(Shape::DataUri, raw, &ParseFailure::DataUriFormat);
        };

        let mime_type = caps.get(1).map_or("", |m| m.as_str());
        let payload = caps.get(3).map_or("", |m| m.as_str());
        ParsedIdentifier::new(Shape::DataUri, raw).with_data(mime_type, payload)
    }

    fn parse_bitcoin_file(raw: &str, content: &str) -> ParsedIdentifier {
        let (txid, index) = split_pair(content, '_');
        outpoint(Shape::BitcoinFile, raw, txid, index)
    }

    fn parse_ordinal(raw: &str, content: &str) -> ParsedIdentifier {
        let (txid, index) = if content.contains('_') {
            split_pair(content, '_')
        } else if content.contains('.') {
            split_pair(content, '.')
        } else {
            (content, None)
        };
        outpoint(Shape::Ordinal, raw, txid, index)
    }

    /// `txid[.out.vout[.chunk]]`. The chunk segment is accepted and dropped.
    fn parse_bitfs(raw: &str, content: &str) -> ParsedIdentifier {
        let parts: Vec<&str> = content.split('.').collect();
        let index = (parts.len() >= 3 && parts[1] == "out").then(|| parts[2]);
        outpoint(Shape::BitFs, raw, parts[0], index)
    }

    fn parse_ipfs(raw: &str, content: &str) -> ParsedIdentifier {
        if !is_valid_content_hash(content) {
            return ParsedIdentifier::rejected(Shape::Ipfs, raw, &ParseFailure::ContentHash);
        }
        ParsedIdentifier::new(Shape::Ipfs, raw).with_content_hash(content)
    }

    /// Bare txids and outpoints, optionally behind `/` and `/content/`.
    fn parse_native(raw: &str, trimmed: &str) -> ParsedIdentifier {
        let cleaned = trimmed.strip_prefix('/').unwrap_or(trimmed);
        let cleaned = cleaned.strip_prefix("content/").unwrap_or(cleaned);

        for separator in ['_', '.'] {
            if !cleaned.contains(separator) {
                continue;
            }
            let (txid, index) = split_pair(cleaned, separator);
            if let Some(index) = index.and_then(parse_output_index) {
                if is_valid_txid(txid) {
                    return native(raw, txid, Some(index));
                }
            }
        }

        // Trailing `o`/`i` is output/input notation; both select the output index.
        if let Some(caps) = OUTPOINT_RE.captures(cleaned) {
            let txid = caps.get(1).map_or("", |m| m.as_str());
            if let Some(index) = caps.get(3).and_then(|m| parse_output_index(m.as_str())) {
                return native(raw, txid, Some(index));
            }
        }

        if is_valid_txid(cleaned) {
            return native(raw, cleaned, None);
        }

        ParsedIdentifier::rejected(Shape::Unknown, raw, &ParseFailure::Unrecognized)
    }
}

/// First two `separator`-delimited segments; later segments are ignored.
fn split_pair(content: &str, separator: char) -> (&str, Option<&str>) {
    let mut parts = content.split(separator);
    let first = parts.next().unwrap_or_default();
    (first, parts.next())
}

fn outpoint(shape: Shape, raw: &str, txid: &str, index: Option<&str>) -> ParsedIdentifier {
    if !is_valid_txid(txid) {
        return ParsedIdentifier::rejected(shape, raw, &ParseFailure::TransactionId);
    }

    let parsed = ParsedIdentifier::new(shape, raw).with_txid(txid);
    match index {
        None => parsed,
        Some(index) => match parse_output_index(index) {
            Some(index) => parsed.with_output_index(index),
            None => parsed.invalid(ParseFailure::OutputIndex.to_string()),
        },
    }
}

fn native(raw: &str, txid: &str, index: Option<u64>) -> ParsedIdentifier {
    let parsed = ParsedIdentifier::new(Shape::Native, raw).with_txid(txid);
    match index {
        Some(index) => parsed.with_output_index(index),
        None => parsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const TXID: &str = "6ce94f75b88a6c24815d480437f4f06ae895afdab8039ddec10748660c29f910";
    const CID_V0: &str = "QmPK1s3pNYLi9ERiq3BDxKa4XosgWwFRQUydHUtz4YgpqB";

    fn parse(input: &str) -> ParsedIdentifier {
        IdentifierParser::parse(input, ParseOptions::default())
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "whitespace")]
    fn test_empty_input(input: &str) {
        let parsed = parse(input);

        assert_eq!(parsed.shape(), Shape::Unknown);
        assert!(!parsed.is_valid());
        assert_eq!(parsed.error_reason(), Some("invalid input"));
        assert_eq!(parsed.raw(), input);
    }

    #[test]
    fn test_absent_input() {
        let parsed = IdentifierParser::parse_optional(None, ParseOptions::default());

        assert_eq!(parsed.shape(), Shape::Unknown);
        assert_eq!(parsed.error_reason(), Some("invalid input"));
    }

    #[test]
    fn test_raw_preserves_untrimmed_input() {
        let input = format!("  b://{TXID}_1\n");
        let parsed = parse(&input);

        assert!(parsed.is_valid());
        assert_eq!(parsed.raw(), input);
        assert_eq!(parsed.txid(), Some(TXID));
    }

    #[test_case(0 ; "zero")]
    #[test_case(3 ; "small")]
    #[test_case(4_294_967_296 ; "beyond_u32")]
    fn test_bitcoin_file_with_index(index: u64) {
        let parsed = parse(&format!("b://{TXID}_{index}"));

        assert_eq!(parsed.shape(), Shape::BitcoinFile);
        assert_eq!(parsed.txid(), Some(TXID));
        assert_eq!(parsed.output_index(), Some(index));
        assert!(parsed.is_valid());
    }

    #[test]
    fn test_bitcoin_file_without_index() {
        let parsed = parse(&format!("b://{TXID}"));

        assert_eq!(parsed.shape(), Shape::BitcoinFile);
        assert_eq!(parsed.output_index(), None);
        assert!(parsed.is_valid());
    }

    #[test]
    fn test_bitcoin_file_invalid_txid() {
        let parsed = parse("b://invalid");

        assert_eq!(parsed.shape(), Shape::BitcoinFile);
        assert!(!parsed.is_valid());
        assert_eq!(parsed.error_reason(), Some("invalid transaction ID"));
    }

    #[test]
    fn test_bitcoin_file_invalid_index_keeps_shape() {
        let parsed = parse(&format!("b://{TXID}_x"));

        assert_eq!(parsed.shape(), Shape::BitcoinFile);
        assert!(!parsed.is_valid());
        assert_eq!(parsed.error_reason(), Some("invalid output index"));
        assert_eq!(parsed.txid(), Some(TXID));
    }

    #[test_case("_2", Some(2) ; "underscore")]
    #[test_case(".1", Some(1) ; "dot")]
    #[test_case("", None ; "bare")]
    fn test_ordinal_separators(suffix: &str, expected: Option<u64>) {
        let parsed = parse(&format!("ord://{TXID}{suffix}"));

        assert_eq!(parsed.shape(), Shape::Ordinal);
        assert_eq!(parsed.output_index(), expected);
        assert!(parsed.is_valid());
    }

    #[test]
    fn test_ordinal_underscore_wins_over_dot() {
        let parsed = parse(&format!("ord://{TXID}_1"));
        assert_eq!(parsed.output_index(), Some(1));

        let parsed = parse(&format!("ord://{TXID}_1.2"));
        assert_eq!(parsed.shape(), Shape::Ordinal);
        assert!(!parsed.is_valid());
        assert_eq!(parsed.error_reason(), Some("invalid output index"));
    }

    #[test_case("", None ; "bare")]
    #[test_case(".out.3", Some(3) ; "with_output")]
    #[test_case(".out.3.7", Some(3) ; "with_chunk")]
    #[test_case(".other.3", None ; "non_out_segment")]
    fn test_bitfs(suffix: &str, expected: Option<u64>) {
        let parsed = parse(&format!("bitfs://{TXID}{suffix}"));

        assert_eq!(parsed.shape(), Shape::BitFs);
        assert_eq!(parsed.txid(), Some(TXID));
        assert_eq!(parsed.output_index(), expected);
        assert!(parsed.is_valid());
    }

    #[test]
    fn test_bitfs_invalid_index() {
        let parsed = parse(&format!("bitfs://{TXID}.out.x"));

        assert_eq!(parsed.shape(), Shape::BitFs);
        assert_eq!(parsed.error_reason(), Some("invalid output index"));
    }

    #[test]
    fn test_ipfs() {
        let parsed = parse(&format!("ipfs://{CID_V0}"));

        assert_eq!(parsed.shape(), Shape::Ipfs);
        assert_eq!(parsed.content_hash(), Some(CID_V0));
        assert!(parsed.is_valid());
    }

    #[test]
    fn test_ipfs_invalid_hash() {
        let parsed = parse("ipfs://invalid");

        assert_eq!(parsed.shape(), Shape::Ipfs);
        assert!(!parsed.is_valid());
        assert_eq!(parsed.error_reason(), Some("invalid content hash"));
        assert_eq!(parsed.content_hash(), None);
    }

    #[test_case("data:image/png;base64,iVBORw0KGgo", "image/png", "iVBORw0KGgo" ; "base64")]
    #[test_case("data:text/plain,Hello%20World", "text/plain", "Hello%20World" ; "plain")]
    #[test_case("data:image/svg+xml,<svg/>", "image/svg+xml", "<svg/>" ; "svg")]
    fn test_data_uri(input: &str, mime: &str, payload: &str) {
        let parsed = parse(input);

        assert_eq!(parsed.shape(), Shape::DataUri);
        assert_eq!(parsed.mime_type(), Some(mime));
        assert_eq!(parsed.payload(), Some(payload));
        assert!(parsed.is_valid());
    }

    #[test]
    fn test_data_uri_malformed() {
        let parsed = parse("data:nocomma");

        assert_eq!(parsed.shape(), Shape::DataUri);
        assert!(!parsed.is_valid());
        assert_eq!(parsed.error_reason(), Some("invalid data URI format"));
    }

    #[test_case("http://example.com/image.png" ; "http")]
    #[test_case("https://example.com/image.png" ; "https")]
    fn test_http(input: &str) {
        let parsed = parse(input);

        assert_eq!(parsed.shape(), Shape::Http);
        assert!(parsed.is_valid());
    }

    #[test]
    fn test_unknown_scheme_reports_name() {
        let parsed = parse("invalid://url");

        assert_eq!(parsed.shape(), Shape::Unknown);
        assert!(!parsed.is_valid());
        assert_eq!(parsed.error_reason(), Some("unknown protocol: invalid"));
    }

    #[test]
    fn test_scheme_names_are_case_sensitive() {
        let parsed = parse(&format!("B://{TXID}"));
        assert_eq!(parsed.error_reason(), Some("unknown protocol: B"));
    }

    #[test]
    fn test_scheme_without_content_is_unrecognized() {
        let parsed = parse("b://");

        assert_eq!(parsed.shape(), Shape::Unknown);
        assert_eq!(parsed.error_reason(), Some("unrecognized format"));
    }

    #[test_case("", None ; "bare")]
    #[test_case("_2", Some(2) ; "underscore")]
    #[test_case(".3", Some(3) ; "dot")]
    #[test_case("o1", Some(1) ; "output_notation")]
    #[test_case("i2", Some(2) ; "input_notation")]
    fn test_native_formats(suffix: &str, expected: Option<u64>) {
        for prefix in ["", "/", "/content/"] {
            let parsed = parse(&format!("{prefix}{TXID}{suffix}"));

            assert_eq!(parsed.shape(), Shape::Native, "prefix {prefix:?}");
            assert_eq!(parsed.txid(), Some(TXID));
            assert_eq!(parsed.output_index(), expected);
            assert!(parsed.is_valid());
        }
    }

    #[test]
    fn test_native_content_prefix_without_slash() {
        let parsed = parse(&format!("content/{TXID}"));

        assert_eq!(parsed.shape(), Shape::Native);
        assert_eq!(parsed.txid(), Some(TXID));
    }

    #[test_case("not-a-real-identifier" ; "words")]
    #[test_case("abc_1" ; "short_txid")]
    #[test_case("/content/" ; "empty_after_prefix")]
    fn test_native_unrecognized(input: &str) {
        let parsed = parse(input);

        assert_eq!(parsed.shape(), Shape::Unknown);
        assert!(!parsed.is_valid());
        assert_eq!(parsed.error_reason(), Some("unrecognized format"));
    }

    #[test]
    fn test_native_disabled() {
        let options = ParseOptions {
            allow_native_format: false,
            ..ParseOptions::default()
        };
        let parsed = IdentifierParser::parse(TXID, options);

        assert_eq!(parsed.shape(), Shape::Unknown);
        assert_eq!(parsed.error_reason(), Some("unrecognized format"));
    }

    #[test]
    fn test_strict_is_inert() {
        let strict = ParseOptions {
            strict: true,
            ..ParseOptions::default()
        };

        for input in [TXID, "b://bad", "https://a.test/x.png", "data:oops"] {
            assert_eq!(
                IdentifierParser::parse(input, strict),
                IdentifierParser::parse(input, ParseOptions::default())
            );
        }
    }
}
