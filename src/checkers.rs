/// Syntactic predicates shared across the parser: the IPv4-attempt gate,
/// port digits, scheme syntax, Windows drive letters and credential
/// legality.
use crate::error::{ParseError, Result};

/// Check if a hostname must be treated as an IPv4-address attempt.
///
/// The gate is the LAST dot-separated segment, not all of them: a hostname
/// whose final label parses as a decimal or `0x`-hex integer is an IPv4
/// candidate, and a candidate that fails canonicalization is a hard parse
/// error rather than an opaque domain label. A single trailing dot is
/// tolerated.
pub fn looks_like_ipv4(input: &str) -> bool {
    let input = input.strip_suffix('.').unwrap_or(input);

    let Some(last_char) = input.chars().next_back() else {
        return false;
    };
    if !last_char.is_ascii_digit() && !matches!(last_char, 'a'..='f' | 'A'..='F' | 'x' | 'X') {
        return false;
    }

    let last_segment = input.rsplit('.').next().unwrap_or(input);

    if last_segment.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }

    if let Some(hex_part) = last_segment
        .strip_prefix("0x")
        .or_else(|| last_segment.strip_prefix("0X"))
    {
        return hex_part.is_empty() || hex_part.chars().all(|c| c.is_ascii_hexdigit());
    }

    false
}

/// Parse a port string to u16.
/// Returns None if empty, contains non-digit characters, or is out of range.
/// Leading zeros are accepted and normalized away by the numeric round-trip.
pub fn parse_port(port: &str) -> Option<u16> {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    port.parse::<u16>().ok()
}

/// Scheme syntax: `ALPHA (ALPHA | DIGIT | "+" | "-" | ".")*`
pub fn is_valid_scheme(scheme: &str) -> bool {
    let bytes = scheme.as_bytes();
    let Some(&first) = bytes.first() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && bytes[1..]
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
}

/// Check if bytes starting at `pos` form a Windows drive letter:
/// `[a-zA-Z][:|]` followed by `/`, `\`, `?`, `#` or end of input.
pub fn is_windows_drive_letter(bytes: &[u8], pos: usize) -> bool {
    if pos + 1 >= bytes.len() {
        return false;
    }

    let first = bytes[pos];
    let second = bytes[pos + 1];

    if !first.is_ascii_alphabetic() || !matches!(second, b':' | b'|') {
        return false;
    }

    pos + 2 >= bytes.len() || matches!(bytes[pos + 2], b'/' | b'\\' | b'?' | b'#')
}

/// Check if the input begins with a Windows drive letter.
pub fn starts_with_windows_drive_letter(input: &str) -> bool {
    is_windows_drive_letter(input.as_bytes(), 0)
}

/// Check if a path segment is a normalized drive letter (`X:`).
pub fn is_normalized_drive_letter(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Check if a path segment is a drive letter in any accepted spelling:
/// `X:`, `X|` or `X%7C` (either hex case). A double pipe is NOT a drive
/// letter.
pub fn is_drive_letter_segment(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    match bytes.len() {
        2 => bytes[0].is_ascii_alphabetic() && matches!(bytes[1], b':' | b'|'),
        4 => {
            bytes[0].is_ascii_alphabetic()
                && bytes[1] == b'%'
                && bytes[2] == b'7'
                && matches!(bytes[3], b'c' | b'C')
        }
        _ => false,
    }
}

/// Credentials may not contain control characters or the delimiters that
/// would break the authority grammar even when percent-encoded.
pub fn validate_credentials(userinfo: &str) -> Result<()> {
    for c in userinfo.chars() {
        let code = c as u32;
        if code < 0x20 || code == 0x7F || matches!(c, '/' | '?' | '#') {
            return Err(ParseError::InvalidCredentials);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_ipv4() {
        // Decimal
        assert!(looks_like_ipv4("192.168.1.1"));
        assert!(looks_like_ipv4("127.0.0.1"));
        assert!(looks_like_ipv4("255.255.255.255"));
        assert!(looks_like_ipv4("192.168.1.1.")); // Trailing dot

        // Hexadecimal (requires 0x prefix)
        assert!(looks_like_ipv4("0xC0A80101"));
        assert!(looks_like_ipv4("192.0x00A80001"));
        assert!(looks_like_ipv4("0x")); // "0x" alone parses as zero
        assert!(looks_like_ipv4("0X"));

        // Last-segment rule: these are failed attempts, not domains
        assert!(looks_like_ipv4("foo.0x4"));
        assert!(looks_like_ipv4("1.2.3.4.5"));

        // Not IPv4
        assert!(!looks_like_ipv4(""));
        assert!(!looks_like_ipv4("."));
        assert!(!looks_like_ipv4("example.com"));
        assert!(!looks_like_ipv4("192.168.1.g"));
        assert!(!looks_like_ipv4("ab")); // Bare hex without 0x prefix
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("80"), Some(80));
        assert_eq!(parse_port("8080"), Some(8080));
        assert_eq!(parse_port("0000000000080"), Some(80));
        assert_eq!(parse_port("65535"), Some(65535));
        assert_eq!(parse_port("65536"), None); // Out of range
        assert_eq!(parse_port("abc"), None);
        assert_eq!(parse_port(""), None);
    }

    #[test]
    fn test_is_valid_scheme() {
        assert!(is_valid_scheme("http"));
        assert!(is_valid_scheme("a"));
        assert!(is_valid_scheme("coap+tcp"));
        assert!(is_valid_scheme("view-source"));
        assert!(is_valid_scheme("z39.50r"));
        assert!(!is_valid_scheme(""));
        assert!(!is_valid_scheme("1http"));
        assert!(!is_valid_scheme("ht tp"));
        assert!(!is_valid_scheme("+x"));
    }

    #[test]
    fn test_windows_drive_letter() {
        assert!(starts_with_windows_drive_letter("C:"));
        assert!(starts_with_windows_drive_letter("C:/foo"));
        assert!(starts_with_windows_drive_letter("c|\\foo"));
        assert!(starts_with_windows_drive_letter("C:?q"));
        assert!(!starts_with_windows_drive_letter("C"));
        assert!(!starts_with_windows_drive_letter("C:x")); // No delimiter after
        assert!(!starts_with_windows_drive_letter("4:/"));
    }

    #[test]
    fn test_drive_letter_segment() {
        assert!(is_drive_letter_segment("C:"));
        assert!(is_drive_letter_segment("c|"));
        assert!(is_drive_letter_segment("C%7C"));
        assert!(is_drive_letter_segment("C%7c"));
        assert!(!is_drive_letter_segment("||"));
        assert!(!is_drive_letter_segment("CC:"));
        assert!(!is_drive_letter_segment("C"));
    }

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("user:pass").is_ok());
        assert!(validate_credentials("u%40ser").is_ok());
        assert!(validate_credentials("a/b").is_err());
        assert!(validate_credentials("a?b").is_err());
        assert!(validate_credentials("a#b").is_err());
        assert!(validate_credentials("a\x01b").is_err());
    }
}
