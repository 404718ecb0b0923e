use crate::compat::String;
use crate::error::{ParseError, Result};

/// Check if 4 bytes match "xn--" (case insensitive)
fn is_punycode_prefix(slice: &[u8]) -> bool {
    slice.len() >= 4
        && matches!(slice[0], b'x' | b'X')
        && matches!(slice[1], b'n' | b'N')
        && slice[2] == b'-'
        && slice[3] == b'-'
}

/// Check if a domain contains a Punycode label (xn-- prefix, case
/// insensitive, at the start or after any dot).
pub fn has_punycode(domain: &str) -> bool {
    let bytes = domain.as_bytes();
    if bytes.len() < 4 {
        return false;
    }

    if is_punycode_prefix(bytes) {
        return true;
    }

    memchr::memchr_iter(b'.', bytes).any(|pos| is_punycode_prefix(&bytes[pos + 1..]))
}

/// Validate the shape of every `xn--` label: the suffix must be non-empty,
/// ASCII alphanumeric or hyphen, and may not begin or end with a hyphen.
pub fn validate_punycode_labels(domain: &str) -> Result<()> {
    for label in domain.split('.') {
        let bytes = label.as_bytes();
        if !is_punycode_prefix(bytes) {
            continue;
        }
        let suffix = &bytes[4..];
        let malformed = suffix.is_empty()
            || suffix.first() == Some(&b'-')
            || suffix.last() == Some(&b'-')
            || !suffix
                .iter()
                .all(|&b| b.is_ascii_alphanumeric() || b == b'-');
        if malformed {
            return Err(ParseError::InvalidHost);
        }
    }
    Ok(())
}

/// Best-effort ASCII conversion gate for special-scheme hostnames.
///
/// Pure-ASCII hostnames without Punycode labels take the cheap lowercase
/// path; everything else goes through full IDNA ToASCII. Returns `None` on
/// IDNA failure — the caller retains the original Unicode hostname instead
/// of failing the parse.
pub fn hostname_to_ascii(hostname: &str) -> Option<String> {
    if hostname.is_ascii() && !has_punycode(hostname) {
        return Some(hostname.to_ascii_lowercase());
    }

    idna::domain_to_ascii(hostname).ok()
}

/// Process a domain through IDNA `ToASCII`, as a hard-failing operation for
/// callers that need a definitive answer (host setters, legacy helpers).
pub fn domain_to_ascii(domain: &str) -> Result<String> {
    idna::domain_to_ascii(domain).map_err(|_| ParseError::IdnaError)
}

/// Unicode serialization of a domain.
pub fn domain_to_unicode(domain: &str) -> String {
    let (unicode, _result) = idna::domain_to_unicode(domain);
    unicode
}
