/// IPv6 canonicalizer: bracketed or bare literals, `::` compression and
/// embedded IPv4-mapped tails all normalize to the RFC-5952-style compressed
/// lowercase-hex form.
use crate::compat::{String, Vec};
use crate::error::{ParseError, Result};
use core::fmt::Write;

/// Parse an IPv6 address (brackets optional) into its 8 16-bit groups.
pub fn parse_ipv6(input: &str) -> Result<[u16; 8]> {
    let input = input
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(input);

    if input.is_empty() || !input.contains(':') {
        return Err(ParseError::InvalidIpv6);
    }

    // Only hex digits, colons and dots may appear; this also rejects
    // zone-ID suffixes (%eth0), which are not allowed in URLs.
    if !input
        .bytes()
        .all(|b| b.is_ascii_hexdigit() || b == b':' || b == b'.')
    {
        return Err(ParseError::InvalidIpv6);
    }

    // At most one "::"
    if let Some(first) = input.find("::")
        && input[first + 1..].contains("::")
    {
        return Err(ParseError::InvalidIpv6);
    }

    // An embedded dotted-quad tail occupies the final two groups
    let has_embedded_ipv4 = input
        .rfind(':')
        .is_some_and(|pos| input[pos + 1..].contains('.'));

    if has_embedded_ipv4 {
        parse_with_ipv4_tail(input)
    } else {
        parse_groups_only(input)
    }
}

fn parse_groups_only(input: &str) -> Result<[u16; 8]> {
    let mut groups = [0u16; 8];

    let Some(gap) = input.find("::") else {
        // No compression: exactly 8 explicit groups (7 colons)
        let parsed = parse_hex_groups(input)?;
        if parsed.len() != 8 {
            return Err(ParseError::InvalidIpv6);
        }
        groups.copy_from_slice(&parsed);
        return Ok(groups);
    };

    let head = parse_hex_groups(&input[..gap])?;
    let tail = parse_hex_groups(&input[gap + 2..])?;

    let total = head.len() + tail.len();
    if total > 7 {
        return Err(ParseError::InvalidIpv6);
    }

    for (i, &g) in head.iter().enumerate() {
        groups[i] = g;
    }
    let tail_start = 8 - tail.len();
    for (i, &g) in tail.iter().enumerate() {
        groups[tail_start + i] = g;
    }

    Ok(groups)
}

fn parse_with_ipv4_tail(input: &str) -> Result<[u16; 8]> {
    let last_colon = input.rfind(':').ok_or(ParseError::InvalidIpv6)?;
    let prefix = &input[..last_colon];
    let tail = parse_dotted_quad(&input[last_colon + 1..])?;

    let mut groups = [0u16; 8];
    groups[6] = ((tail >> 16) & 0xFFFF) as u16;
    groups[7] = (tail & 0xFFFF) as u16;

    if prefix.is_empty() || prefix == ":" {
        return Ok(groups);
    }

    if let Some(gap) = prefix.find("::") {
        let head = parse_hex_groups(&prefix[..gap])?;
        let mid = parse_hex_groups(&prefix[gap + 2..])?;

        let total = head.len() + mid.len();
        if total > 6 {
            return Err(ParseError::InvalidIpv6);
        }

        for (i, &g) in head.iter().enumerate() {
            groups[i] = g;
        }
        let mid_start = 6 - mid.len();
        for (i, &g) in mid.iter().enumerate() {
            groups[mid_start + i] = g;
        }
    } else {
        // No compression: exactly 6 explicit groups before the tail
        let parsed = parse_hex_groups(prefix)?;
        if parsed.len() != 6 {
            return Err(ParseError::InvalidIpv6);
        }
        groups[..6].copy_from_slice(&parsed);
    }

    Ok(groups)
}

/// Parse colon-separated hex groups; empty input is zero groups.
fn parse_hex_groups(s: &str) -> Result<Vec<u16>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(':').map(parse_hex_group).collect()
}

fn parse_hex_group(s: &str) -> Result<u16> {
    if s.is_empty() || s.len() > 4 {
        return Err(ParseError::InvalidIpv6);
    }
    u16::from_str_radix(s, 16).map_err(|_| ParseError::InvalidIpv6)
}

/// Parse the embedded IPv4 tail: exactly 4 decimal octets.
fn parse_dotted_quad(s: &str) -> Result<u32> {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() != 4 {
        return Err(ParseError::InvalidIpv4);
    }

    parts.iter().try_fold(0u32, |acc, part| {
        if part.is_empty() || part.len() > 3 {
            return Err(ParseError::InvalidIpv4);
        }
        let octet: u8 = part.parse().map_err(|_| ParseError::InvalidIpv4)?;
        Ok((acc << 8) | u32::from(octet))
    })
}

/// Serialize 8 groups to the un-bracketed canonical form: the longest run
/// of 2+ zero groups (first wins on ties) becomes `::`, everything else is
/// lowercase hex without leading zeros. Embedded IPv4 tails are always
/// rendered as hex groups. Callers re-wrap in brackets.
pub fn serialize_ipv6(groups: &[u16; 8]) -> String {
    let compress = find_longest_zero_run(groups).filter(|r| r.len() > 1);

    let mut out = String::with_capacity(39);
    let mut i = 0;
    while i < 8 {
        if let Some(ref range) = compress
            && range.start == i
        {
            out.push_str("::");
            i = range.end;
            continue;
        }

        if i > 0 && !out.ends_with(':') {
            out.push(':');
        }
        let _ = write!(&mut out, "{:x}", groups[i]);
        i += 1;
    }

    out
}

/// Find the longest run of consecutive zero groups.
fn find_longest_zero_run(groups: &[u16; 8]) -> Option<core::ops::Range<usize>> {
    let mut best: Option<core::ops::Range<usize>> = None;
    let mut current: Option<usize> = None;

    for (i, &g) in groups.iter().enumerate() {
        if g == 0 {
            let start = *current.get_or_insert(i);
            let len = i + 1 - start;
            if best.as_ref().is_none_or(|b| len > b.len()) {
                best = Some(start..i + 1);
            }
        } else {
            current = None;
        }
    }

    best
}
