/// IPv4 canonicalizer: dotted, decimal, octal and hexadecimal numeric host
/// forms are all folded into canonical `a.b.c.d` notation. Callers gate the
/// attempt on `checkers::looks_like_ipv4`; once the gate fires, any failure
/// here is a hard parse error for the whole URL.
use crate::compat::{String, Vec, format};
use crate::error::{ParseError, Result};

/// Parse an IPv4 host into a u32.
///
/// 1–4 dot-separated parts; each part may be decimal, octal (leading `0`)
/// or hex (`0x`/`0X`). With n parts, the first n-1 each fit one octet and
/// the last fills the remaining 5-n octets big-endian. A single trailing
/// dot is stripped; empty segments and more than 4 parts fail outright.
pub fn parse_ipv4(input: &str) -> Result<u32> {
    if input.is_empty() {
        return Err(ParseError::InvalidIpv4);
    }

    let input = input.strip_suffix('.').unwrap_or(input);

    let parts: Vec<&str> = input.split('.').collect();
    if parts.is_empty() || parts.len() > 4 {
        return Err(ParseError::InvalidIpv4);
    }

    let numbers = parts
        .iter()
        .map(|part| parse_ipv4_number(part))
        .collect::<Result<Vec<u64>>>()?;

    let count = numbers.len();

    // The last number covers the remaining octets, so its range widens as
    // the part count shrinks: 4 parts => <256, 1 part => <2^32.
    let last = numbers[count - 1];
    if last >= 256u64.pow((5 - count) as u32) {
        return Err(ParseError::InvalidIpv4);
    }
    if numbers.iter().take(count - 1).any(|&n| n >= 256) {
        return Err(ParseError::InvalidIpv4);
    }

    let mut address: u32 = 0;
    for (i, &n) in numbers.iter().enumerate().take(count - 1) {
        address |= (n as u32) << ((3 - i) * 8);
    }
    address |= numbers[count - 1] as u32;

    Ok(address)
}

/// Parse one IPv4 part with auto-base detection.
fn parse_ipv4_number(input: &str) -> Result<u64> {
    if input.is_empty() {
        return Err(ParseError::InvalidIpv4);
    }

    if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        // A bare "0x" prefix with no digits is zero
        if hex.is_empty() {
            return Ok(0);
        }
        return u64::from_str_radix(hex, 16).map_err(|_| ParseError::InvalidIpv4);
    }

    if input.len() >= 2 && input.starts_with('0') {
        return u64::from_str_radix(input, 8).map_err(|_| ParseError::InvalidIpv4);
    }

    input.parse::<u64>().map_err(|_| ParseError::InvalidIpv4)
}

/// Serialize an IPv4 address to canonical dotted-decimal notation.
pub fn serialize_ipv4(address: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        (address >> 24) & 0xFF,
        (address >> 16) & 0xFF,
        (address >> 8) & 0xFF,
        address & 0xFF
    )
}

/// Canonicalize an IPv4-candidate hostname in one step.
pub fn canonicalize_ipv4(input: &str) -> Result<String> {
    parse_ipv4(input).map(serialize_ipv4)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreadable_literal)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_ipv4("192.168.1.1").unwrap(), 0xC0A80101);
        assert_eq!(parse_ipv4("127.0.0.1").unwrap(), 0x7F000001);
        assert_eq!(parse_ipv4("127.0.0.1.").unwrap(), 0x7F000001);
    }

    #[test]
    fn test_parse_hex_and_octal() {
        assert_eq!(parse_ipv4("0xC0A80101").unwrap(), 0xC0A80101);
        assert_eq!(parse_ipv4("192.0x00A80001").unwrap(), 0xC0A80001);
        assert_eq!(parse_ipv4("0300.0250.01.01").unwrap(), 0xC0A80101);
        assert_eq!(parse_ipv4("0x").unwrap(), 0);
    }

    #[test]
    fn test_short_forms_unpack_big_endian() {
        // 0x100 = 256 unpacks into the low three octets
        assert_eq!(canonicalize_ipv4("0x100").unwrap(), "0.0.1.0");
        assert_eq!(canonicalize_ipv4("192.0x00A80001").unwrap(), "192.168.0.1");
        assert_eq!(canonicalize_ipv4("4294967295").unwrap(), "255.255.255.255");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse_ipv4("").is_err());
        assert!(parse_ipv4("1.2.3.4.5").is_err()); // Too many parts
        assert!(parse_ipv4("1..2").is_err()); // Empty segment
        assert!(parse_ipv4("256.1.1.1").is_err()); // Octet overflow
        assert!(parse_ipv4("1.2.65536").is_err()); // Last part range
        assert!(parse_ipv4("4294967296").is_err()); // 2^32
        assert!(parse_ipv4("1.2.3.x").is_err());
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serialize_ipv4(0xC0A80101), "192.168.1.1");
        assert_eq!(serialize_ipv4(0), "0.0.0.0");
    }
}
