//! Shape predicates for identifier fragments.
//!
//! All checks are pure and total: they return `false` rather than erroring.

use std::sync::LazyLock;

use regex::Regex;

/// Length of a hex-encoded transaction id.
pub const TXID_LENGTH: usize = 64;

const CID_V0_PREFIX: &str = "Qm";
const CID_V0_LENGTH: usize = 46;
const CID_V1_PREFIX: &str = "baf";
const CID_V1_MIN_LENGTH: usize = 59;

/// `data:<mime>[;base64],<payload>`; groups are mime, base64 marker, payload.
pub(crate) static DATA_URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:([^;]+)(;base64)?,(.*)$").expect("data URI pattern compiles")
});

static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{25,34}$").expect("address pattern compiles")
});

static PROTOCOL_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(b|ord|bitfs|ipfs)://(.+)$").expect("protocol URL pattern compiles")
});

/// Returns true if `s` is exactly 64 hexadecimal characters, in either case.
#[must_use]
pub fn is_valid_txid(s: &str) -> bool {
    s.len() == TXID_LENGTH && hex::decode(s).is_ok()
}

/// Returns true if `s` is a non-empty run of ASCII digits that fits an index.
#[must_use]
pub fn is_valid_output_index(s: &str) -> bool {
    parse_output_index(s).is_some()
}

/// Returns true if `n` is a finite, non-negative integer.
#[must_use]
pub fn is_valid_output_index_value(n: f64) -> bool {
    n.is_finite() && n >= 0.0 && n.fract() == 0.0
}

/// Parses an output index, rejecting signs, whitespace and overflow.
#[must_use]
pub fn parse_output_index(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Returns true if `s` looks like an IPFS content identifier.
///
/// This is a prefix and length heuristic (`Qm` + 46 chars for v0, `baf` + at
/// least 59 chars for v1). It does not decode multibase or verify the
/// multihash, so some malformed CIDs pass. Length is counted in chars; for
/// non-ASCII input that differs from a UTF-16 count, but no real CID contains
/// non-ASCII characters.
#[must_use]
pub fn is_valid_content_hash(s: &str) -> bool {
    let len = s.chars().count();
    (s.starts_with(CID_V0_PREFIX) && len == CID_V0_LENGTH)
        || (s.starts_with(CID_V1_PREFIX) && len >= CID_V1_MIN_LENGTH)
}

/// Returns true if `s` has the shape of a base58 legacy Bitcoin address.
///
/// Checks the alphabet and length only; the checksum is not verified.
#[must_use]
pub fn is_valid_address(s: &str) -> bool {
    ADDRESS_RE.is_match(s)
}

/// Returns true if `s` is a well-formed data URI.
#[must_use]
pub fn is_valid_data_uri(s: &str) -> bool {
    DATA_URI_RE.is_match(s)
}

/// Returns true if `s` uses one of the `b`, `ord`, `bitfs` or `ipfs` schemes
/// with non-empty content.
#[must_use]
pub fn is_protocol_url(s: &str) -> bool {
    PROTOCOL_URL_RE.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const TXID: &str = "6ce94f75b88a6c24815d480437f4f06ae895afdab8039ddec10748660c29f910";

    #[test_case(TXID, true ; "lowercase")]
    #[test_case("6CE94F75B88A6C24815D480437F4F06AE895AFDAB8039DDEC10748660C29F910", true ; "uppercase")]
    #[test_case(&"0".repeat(64), true ; "zeros")]
    #[test_case(&"0".repeat(63), false ; "too_short")]
    #[test_case(&"0".repeat(65), false ; "too_long")]
    #[test_case(&format!("{}g", "0".repeat(63)), false ; "non_hex")]
    #[test_case("", false ; "empty")]
    fn test_is_valid_txid(input: &str, expected: bool) {
        assert_eq!(is_valid_txid(input), expected);
    }

    #[test_case("0", true ; "zero")]
    #[test_case("42", true ; "plain")]
    #[test_case("007", true ; "leading_zeros")]
    #[test_case("", false ; "empty")]
    #[test_case("-1", false ; "negative")]
    #[test_case("+1", false ; "plus_sign")]
    #[test_case("1.5", false ; "fraction")]
    #[test_case(" 1", false ; "whitespace")]
    #[test_case("99999999999999999999999", false ; "overflow")]
    fn test_is_valid_output_index(input: &str, expected: bool) {
        assert_eq!(is_valid_output_index(input), expected);
    }

    #[test_case(0.0, true ; "zero")]
    #[test_case(3.0, true ; "integer")]
    #[test_case(-1.0, false ; "negative")]
    #[test_case(1.5, false ; "fraction")]
    #[test_case(f64::NAN, false ; "nan")]
    #[test_case(f64::INFINITY, false ; "infinite")]
    fn test_is_valid_output_index_value(input: f64, expected: bool) {
        assert_eq!(is_valid_output_index_value(input), expected);
    }

    #[test]
    fn test_parse_output_index() {
        assert_eq!(parse_output_index("12"), Some(12));
        assert_eq!(parse_output_index("x"), None);
    }

    #[test_case("QmPK1s3pNYLi9ERiq3BDxKa4XosgWwFRQUydHUtz4YgpqB", true ; "v0")]
    #[test_case("QmPK1s3pNYLi9ERiq3BDxKa4XosgWwFRQUydHUtz4Ygpq", false ; "v0_short")]
    #[test_case("bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi", true ; "v1")]
    #[test_case("bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbz", false ; "v1_short")]
    #[test_case("invalid", false ; "garbage")]
    fn test_is_valid_content_hash(input: &str, expected: bool) {
        assert_eq!(is_valid_content_hash(input), expected);
    }

    #[test_case("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", true ; "p2pkh")]
    #[test_case("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy", true ; "p2sh")]
    #[test_case("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfN0", false ; "zero not in alphabet")]
    #[test_case("1short", false ; "too short")]
    #[test_case("", false ; "empty")]
    fn test_is_valid_address(input: &str, expected: bool) {
        assert_eq!(is_valid_address(input), expected);
    }

    #[test_case("data:image/png;base64,AAAA", true ; "base64")]
    #[test_case("data:text/plain,hello", true ; "plain")]
    #[test_case("data:image/png;base64", false ; "no comma")]
    #[test_case("data:,x", false ; "empty mime")]
    #[test_case("https://a.test/x.png", false ; "http")]
    fn test_is_valid_data_uri(input: &str, expected: bool) {
        assert_eq!(is_valid_data_uri(input), expected);
    }

    #[test_case("b://abc", true ; "bitcoin file")]
    #[test_case("ord://abc_1", true ; "ordinal")]
    #[test_case("bitfs://abc.out.0", true ; "bitfs")]
    #[test_case("ipfs://Qm", true ; "ipfs")]
    #[test_case("ord://", false ; "empty content")]
    #[test_case("ORD://abc", false ; "case sensitive")]
    #[test_case("ftp://abc", false ; "other scheme")]
    fn test_is_protocol_url(input: &str, expected: bool) {
        assert_eq!(is_protocol_url(input), expected);
    }
}
