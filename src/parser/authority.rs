use crate::character_sets::{
    OPAQUE_HOST_SET, is_forbidden_host_byte, is_forbidden_host_code_point, triplet_value,
};
use crate::checkers::{looks_like_ipv4, parse_port, validate_credentials};
use crate::compat::{Cow, String, ToString};
use crate::error::{ParseError, Result};
use crate::ipv4::canonicalize_ipv4;
use crate::ipv6::{parse_ipv6, serialize_ipv6};
use crate::scheme::SchemeType;
use crate::unicode::idna::{hostname_to_ascii, validate_punycode_labels};
use crate::unicode::normalize::{fold_fullwidth, strip_invisible};
use crate::unicode::percent_encode::{
    has_valid_triplets, percent_decode, percent_encode_with_set,
};

/// Parsed authority section: decoded userinfo plus the canonical host and
/// normalized port.
#[derive(Debug, Default, PartialEq)]
pub struct Authority {
    pub username: String,
    pub password: String,
    pub has_password_field: bool,
    pub double_colon_at: bool,
    pub hostname: String,
    pub port: String,
}

/// Parse `[userinfo@]host[:port]`.
///
/// The userinfo split uses the LAST `@` so a literal `@` in a still-encoded
/// userinfo cannot mis-split the host. Userinfo itself splits on the FIRST
/// `:`; absence of the colon means "no password field", not "empty
/// password". The port separator is found bracket-aware, default ports are
/// normalized away, and "authority implies non-empty host" is enforced
/// here.
pub fn parse_authority(raw: &str, scheme_type: SchemeType) -> Result<Authority> {
    let mut authority = Authority::default();

    let (userinfo, host_part) = match memchr::memrchr(b'@', raw.as_bytes()) {
        Some(pos) => (Some(&raw[..pos]), &raw[pos + 1..]),
        None => (None, raw),
    };

    if let Some(info) = userinfo {
        validate_credentials(info)?;
        if host_part.is_empty() {
            return Err(ParseError::InvalidHost);
        }
        if info == "::" {
            authority.double_colon_at = true;
        }
        if !info.is_empty() {
            match memchr::memchr(b':', info.as_bytes()) {
                Some(colon) => {
                    authority.username = percent_decode(&info[..colon], false);
                    authority.password = percent_decode(&info[colon + 1..], false);
                    authority.has_password_field = true;
                }
                None => {
                    authority.username = percent_decode(info, false);
                }
            }
        }
    }

    let (host_str, port_str) = split_host_port(host_part)?;

    if let Some(port) = port_str {
        // file: URLs never carry ports; a colon there is part of a
        // mis-parsed drive letter or plain invalid
        if scheme_type == SchemeType::File {
            return Err(ParseError::InvalidHost);
        }
        if !port.is_empty() {
            let number = parse_port(port).ok_or(ParseError::InvalidPort)?;
            if host_str.is_empty() {
                return Err(ParseError::InvalidHost);
            }
            if scheme_type.default_port() != Some(number) {
                authority.port = number.to_string();
            }
        }
    }

    if host_str.is_empty() {
        if scheme_type.is_special() && scheme_type != SchemeType::File {
            return Err(ParseError::InvalidHost);
        }
        return Ok(authority);
    }

    authority.hostname = parse_hostname(host_str, scheme_type)?;
    Ok(authority)
}

/// Split host and optional port, bracket-aware: a `:` inside `[...]` is
/// never the port separator.
fn split_host_port(host_part: &str) -> Result<(&str, Option<&str>)> {
    if host_part.starts_with('[') {
        let Some(close) = memchr::memchr(b']', host_part.as_bytes()) else {
            return Err(ParseError::InvalidIpv6);
        };
        let host = &host_part[..=close];
        let rest = &host_part[close + 1..];
        if rest.is_empty() {
            return Ok((host, None));
        }
        return rest
            .strip_prefix(':')
            .map(|port| (host, Some(port)))
            .ok_or(ParseError::InvalidHost);
    }

    match memchr::memrchr(b':', host_part.as_bytes()) {
        Some(pos) => Ok((&host_part[..pos], Some(&host_part[pos + 1..]))),
        None => Ok((host_part, None)),
    }
}

/// The full hostname pipeline: invisible-character stripping, validation,
/// scheme-aware percent-decoding, fullwidth folding, case folding,
/// IPv4/IPv6 canonicalization and the ASCII gate.
pub fn parse_hostname(raw: &str, scheme_type: SchemeType) -> Result<String> {
    if raw.starts_with('[') || raw.ends_with(']') {
        if !(raw.starts_with('[') && raw.ends_with(']')) {
            return Err(ParseError::InvalidIpv6);
        }
        let groups = parse_ipv6(raw)?;
        let mut out = String::with_capacity(41);
        out.push('[');
        out.push_str(&serialize_ipv6(&groups));
        out.push(']');
        return Ok(out);
    }

    // The fullwidth percent sign would fold into an encoding marker
    if raw.contains('％') {
        return Err(ParseError::InvalidHost);
    }

    let hostname = strip_invisible(raw)?;

    if scheme_type.is_special() {
        parse_domain(&hostname, scheme_type)
    } else {
        parse_opaque_hostname(&hostname)
    }
}

/// Special-scheme hostname: decode, fold, validate, then canonicalize as
/// IPv4 or ASCII domain.
fn parse_domain(hostname: &str, scheme_type: SchemeType) -> Result<String> {
    if !has_valid_triplets(hostname) {
        return Err(ParseError::InvalidHost);
    }
    if has_forbidden_domain_triplet(hostname) {
        return Err(ParseError::InvalidHost);
    }

    let decoded: Cow<'_, str> = if hostname.contains('%') {
        Cow::Owned(percent_decode(hostname, false))
    } else {
        Cow::Borrowed(hostname)
    };

    let folded = fold_fullwidth(&decoded, true)?;

    for c in folded.chars() {
        if c.is_ascii() {
            if is_forbidden_host_byte(c as u8) {
                return Err(ParseError::InvalidHost);
            }
        } else if is_forbidden_host_code_point(c) || c.is_whitespace() {
            return Err(ParseError::InvalidHost);
        }
    }

    let lowered = folded.to_lowercase();
    validate_punycode_labels(&lowered)?;

    // An IPv4-looking hostname that fails canonicalization is a hard error,
    // never an opaque passthrough
    if looks_like_ipv4(&lowered) {
        return canonicalize_ipv4(&lowered);
    }

    match hostname_to_ascii(&lowered) {
        Some(ascii) => {
            // IDNA can surface digits that were hidden in Unicode forms, so
            // the IPv4 gate runs once more on the ASCII result
            if looks_like_ipv4(&ascii) {
                canonicalize_ipv4(&ascii)
            } else {
                Ok(ascii)
            }
        }
        // Graceful degradation: the validated Unicode hostname is retained
        None => Ok(lowered),
    }
}

/// Opaque hostname for non-special schemes: forbidden delimiters are
/// rejected, percent triplets stay encoded, everything else (space
/// included) survives, with only controls, DEL and non-ASCII
/// percent-encoded. Case is preserved.
fn parse_opaque_hostname(hostname: &str) -> Result<String> {
    let drive_letter = crate::checkers::is_drive_letter_segment(hostname);

    for c in hostname.chars() {
        let rejected = matches!(
            c,
            '#' | '/' | '?' | '@' | '<' | '>' | '[' | ']' | '\\' | '^' | ':'
        ) || (c == '|' && !drive_letter);
        if rejected {
            return Err(ParseError::InvalidHost);
        }
    }

    Ok(percent_encode_with_set(hostname, OPAQUE_HOST_SET))
}

/// Percent-encoded byte values that may never appear in a special-scheme
/// hostname: forbidden delimiters, controls, and anything >= 0x80 (IDNA
/// must see raw Unicode, not pre-decoded arbitrary bytes).
fn has_forbidden_domain_triplet(hostname: &str) -> bool {
    let bytes = hostname.as_bytes();
    let mut i = 0;
    while let Some(pos) = memchr::memchr(b'%', &bytes[i..]) {
        let at = i + pos;
        match triplet_value(bytes, at) {
            Some(value) if value >= 0x80 || is_forbidden_host_byte(value) => return true,
            Some(_) => i = at + 3,
            None => i = at + 1,
        }
    }
    false
}

/// Hostname processing for `file://` hosts: percent-decoded, localhost
/// elided to the empty host, never combined with a port.
pub fn parse_file_host(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Ok(String::new());
    }

    // A percent-encoded drive letter is not a host and not a path either
    if raw.contains('%') {
        let decoded = percent_decode(raw, false);
        let bytes = decoded.as_bytes();
        if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && matches!(bytes[1], b':' | b'|') {
            return Err(ParseError::InvalidHost);
        }
    }

    let hostname = parse_hostname(raw, SchemeType::File)?;
    if hostname == "localhost" {
        return Ok(String::new());
    }
    Ok(hostname)
}
