use percent_encoding::{AsciiSet, CONTROLS};

// Per-component percent-encode sets. Each component of a URL carries its own
// exclusion set; serializing with the wrong one silently corrupts URLs that
// feed origin comparison. `CONTROLS` covers C0 plus DEL, and every set also
// encodes non-ASCII bytes (the percent-encoding crate always does).

/// Generic component set, also the default for non-special hierarchical
/// paths.
pub const COMPONENT_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Userinfo set: the component set plus every delimiter that would be
/// ambiguous inside `user:pass@host`.
pub const USERINFO_SET: &AsciiSet = &COMPONENT_SET
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b']');

/// Path set for special schemes. Unlike the component set this keeps `'`
/// and `|` literal.
pub const SPECIAL_PATH_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'{')
    .add(b'}')
    .add(b'`');

/// Opaque-path set for non-special schemes without authority. Deliberately
/// permissive: space, `\ ^ { | }` all survive.
pub const OPAQUE_PATH_SET: &AsciiSet = &CONTROLS.add(b'"').add(b'<').add(b'>').add(b'`');

/// Fragment set for special schemes.
pub const SPECIAL_FRAGMENT_SET: &AsciiSet =
    &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// Fragment set for non-special schemes: same, except spaces stay literal.
pub const FRAGMENT_SET: &AsciiSet = &CONTROLS.add(b'"').add(b'<').add(b'>').add(b'`');

/// Query set for non-special schemes.
pub const QUERY_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Query set for special schemes: single quote is additionally encoded.
pub const SPECIAL_QUERY_SET: &AsciiSet = &QUERY_SET.add(b'\'');

/// Hostname set for non-special schemes. Only C0 and DEL (plus non-ASCII)
/// are encoded; opaque hostnames keep the printable ASCII range, space
/// included.
pub const OPAQUE_HOST_SET: &AsciiSet = CONTROLS;

/// Check if a character is an ASCII tab or newline
pub fn is_ascii_tab_or_newline(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
}

/// Convert a hex digit byte to its value
pub fn hex_to_int(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decode the byte value of a `%XX` triplet starting at `pos`, if well-formed.
pub fn triplet_value(bytes: &[u8], pos: usize) -> Option<u8> {
    if bytes.get(pos) != Some(&b'%') {
        return None;
    }
    let hi = hex_to_int(*bytes.get(pos + 1)?)?;
    let lo = hex_to_int(*bytes.get(pos + 2)?)?;
    Some(hi * 16 + lo)
}

/// Bytes that may never appear (decoded) in a special-scheme hostname.
pub fn is_forbidden_host_byte(b: u8) -> bool {
    b <= 0x20
        || b == 0x7F
        || matches!(
            b,
            b'#' | b'%'
                | b'/'
                | b':'
                | b'?'
                | b'@'
                | b'['
                | b'\\'
                | b']'
                | b'^'
                | b'|'
                | b'`'
                | b'<'
                | b'>'
        )
}

/// Code points that are rejected in special-scheme hostnames beyond the
/// ASCII forbidden set: Unicode noncharacters, ideographic space, the
/// replacement character and the BOM.
pub fn is_forbidden_host_code_point(c: char) -> bool {
    let code = c as u32;
    matches!(code, 0xFDD0..=0xFDEF)
        || (code & 0xFFFE) == 0xFFFE
        || c == '\u{3000}'
        || c == '\u{FFFD}'
        || c == '\u{FEFF}'
}
