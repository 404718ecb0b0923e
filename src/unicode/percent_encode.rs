use crate::character_sets::{SPECIAL_PATH_SET, triplet_value};
use crate::compat::{Cow, String, Vec};
use percent_encoding::{AsciiSet, utf8_percent_encode};

/// Percent-encode a string using the provided encode set.
/// Already-valid `%XX` triplets are copied verbatim (the sets never contain
/// `%`), so canonical input is never double-encoded and stray `%` survives
/// as a literal.
pub fn percent_encode_with_set(input: &str, encode_set: &'static AsciiSet) -> String {
    let mut out = String::with_capacity(input.len());
    percent_encode_into(&mut out, input, encode_set);
    out
}

/// Write percent-encoded string directly to buffer.
pub fn percent_encode_into(buffer: &mut String, input: &str, encode_set: &'static AsciiSet) {
    buffer.reserve(input.len());
    for chunk in utf8_percent_encode(input, encode_set) {
        buffer.push_str(chunk);
    }
}

/// Decode percent-encoded bytes, substituting U+FFFD for byte sequences
/// that are not valid UTF-8. Malformed `%` triplets are preserved literally.
/// `plus_as_space` is true only for application/x-www-form-urlencoded
/// decoding.
pub fn percent_decode(input: &str, plus_as_space: bool) -> String {
    let bytes = input.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                if let Some(value) = triplet_value(bytes, i) {
                    out.push(value);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    match core::str::from_utf8(&out) {
        Ok(s) => s.into(),
        Err(_) => String::from_utf8_lossy(&out).into_owned(),
    }
}

/// Check that every `%` in the input heads a well-formed `%XX` triplet.
pub fn has_valid_triplets(input: &str) -> bool {
    let bytes = input.as_bytes();
    let mut i = 0;
    while let Some(pos) = memchr::memchr(b'%', &bytes[i..]) {
        if triplet_value(bytes, i + pos).is_none() {
            return false;
        }
        i += pos + 3;
    }
    true
}

/// Decode percent-encoded unreserved bytes (`A-Za-z0-9 - _ ~`) in place.
/// `.` is deliberately NOT decoded so `%2e` dot segments survive this layer
/// untouched. Used only by the file-path encoder.
pub fn decode_unreserved(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    if memchr::memchr(b'%', bytes).is_none() {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    for (pos, c) in input.char_indices() {
        if pos < i {
            continue;
        }
        if c == '%'
            && let Some(value) = triplet_value(bytes, pos)
            && (value.is_ascii_alphanumeric() || matches!(value, b'-' | b'_' | b'~'))
        {
            out.push(value as char);
            i = pos + 3;
        } else {
            out.push(c);
            i = pos + c.len_utf8();
        }
    }
    Cow::Owned(out)
}

/// Percent-encode a file-URL path segment: the special-path set, with
/// unreserved triplets re-decoded and `|` kept literal.
pub fn encode_file_path_segment(buffer: &mut String, segment: &str) {
    let decoded = decode_unreserved(segment);
    percent_encode_into(buffer, &decoded, SPECIAL_PATH_SET);
}
