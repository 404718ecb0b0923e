use super::authority::{Authority, parse_authority, parse_file_host};
use super::path::{encode_opaque_path, normalize_path};
use crate::character_sets::{FRAGMENT_SET, QUERY_SET, SPECIAL_FRAGMENT_SET, SPECIAL_QUERY_SET};
use crate::checkers::{is_windows_drive_letter, starts_with_windows_drive_letter};
use crate::compat::{Cow, String, ToString};
use crate::error::{ParseError, Result};
use crate::helpers::{
    normalize_backslashes, prune_fragment, strip_url_whitespace, validate_raw_characters,
};
use crate::scheme::{SchemeType, get_scheme_type};
use crate::unicode::percent_encode::percent_encode_into;
use crate::url_record::UrlRecord;

/// Parse an input string against an optional base URL string.
pub fn parse_record(input: &str, base: Option<&str>) -> Result<UrlRecord> {
    let base_record = match base {
        Some(b) => Some(parse_with_base(b, None)?),
        None => None,
    };
    parse_with_base(input, base_record.as_ref())
}

/// The parse entry point proper. Whitespace stripping and the raw-character
/// gate run before any structural work so no partially-built record ever
/// escapes; the fragment is pruned once up front and re-attached, encoded,
/// at the very end.
pub fn parse_with_base(input: &str, base: Option<&UrlRecord>) -> Result<UrlRecord> {
    let cleaned = strip_url_whitespace(input);
    validate_raw_characters(&cleaned)?;

    let (work, fragment) = prune_fragment(&cleaned);

    // Empty input against a base short-circuits to an exact copy, fragment
    // included — not an "empty relative path" resolution
    if work.is_empty() && fragment.is_none() {
        return match base {
            Some(b) => Ok(b.clone()),
            None => Err(ParseError::InvalidScheme),
        };
    }

    let mut record = parse_base_portion(work, base)?;

    if let Some(frag) = fragment {
        let set = if record.scheme_type.is_special() {
            SPECIAL_FRAGMENT_SET
        } else {
            FRAGMENT_SET
        };
        let mut hash = String::with_capacity(frag.len() + 1);
        hash.push('#');
        percent_encode_into(&mut hash, frag, set);
        record.hash = hash;
    }

    Ok(record)
}

/// Parse everything before the fragment.
fn parse_base_portion(work: &str, base: Option<&UrlRecord>) -> Result<UrlRecord> {
    // A bare Windows drive letter is a file path, not a scheme: "C:/x" and
    // "C|/x" become file URLs whenever there is no base or the base is file
    if starts_with_windows_drive_letter(work)
        && base.is_none_or(|b| b.scheme_type == SchemeType::File)
    {
        return parse_drive_letter_entry(work, base);
    }

    let Some((scheme, rest)) = detect_scheme(work) else {
        let Some(base_ref) = base else {
            return Err(ParseError::RelativeUrlWithoutBase);
        };

        // Scheme-less input gets backslash normalization regardless of the
        // base scheme; it resolves against a likely-special base
        let normalized = normalize_backslashes(work);

        if normalized.starts_with("//") {
            // Protocol-relative: inherit the base scheme and reparse
            let mut joined =
                String::with_capacity(base_ref.scheme.len() + normalized.len());
            joined.push_str(&base_ref.scheme);
            joined.push_str(&normalized);
            return parse_base_portion(&joined, None);
        }

        return resolve_relative(&normalized, base_ref);
    };

    let scheme_lower = scheme.to_ascii_lowercase();
    let scheme_type = get_scheme_type(&scheme_lower);

    if scheme_type == SchemeType::File {
        let rest = normalize_backslashes(rest);
        return parse_file(&rest, base);
    }

    if scheme_type.is_special() {
        let rest = normalize_backslashes(rest);
        if let Some(base_ref) = base
            && base_ref.scheme_type == scheme_type
            && !rest.starts_with("//")
        {
            // Same special scheme without authority syntax: relative form
            return resolve_relative(&rest, base_ref);
        }
        return parse_special(&rest, scheme_lower, scheme_type);
    }

    parse_nonspecial(rest, scheme_lower)
}

/// Detect `scheme:` at the start of the input: an alpha-led run of scheme
/// characters terminated by a colon. Anything else means "no scheme".
fn detect_scheme(input: &str) -> Option<(&str, &str)> {
    let bytes = input.as_bytes();
    if !bytes.first()?.is_ascii_alphabetic() {
        return None;
    }
    for (i, &b) in bytes.iter().enumerate() {
        if b == b':' {
            return Some((&input[..i], &input[i + 1..]));
        }
        if !b.is_ascii_alphanumeric() && !matches!(b, b'+' | b'-' | b'.') {
            return None;
        }
    }
    None
}

fn file_record() -> UrlRecord {
    UrlRecord {
        scheme: "file:".to_string(),
        scheme_type: SchemeType::File,
        has_authority: true,
        ..UrlRecord::default()
    }
}

/// Bare drive-letter input: `C:/x`, `C|`, `C:\x`. The hostname comes from a
/// file base when one is present; the path is the input itself.
fn parse_drive_letter_entry(work: &str, base: Option<&UrlRecord>) -> Result<UrlRecord> {
    let normalized = normalize_backslashes(work);
    let mut record = file_record();
    if let Some(b) = base {
        record.hostname = b.hostname.clone();
    }

    let (path_part, query) = split_query(&normalized);
    record.pathname = normalize_path(path_part, SchemeType::File);
    record.search = encode_search(query, true);
    Ok(record)
}

/// `file:` URLs: authority form with drive-letter-in-hostname recovery,
/// single-slash form with base drive preservation, and the slash-less
/// relative forms.
fn parse_file(rest: &str, base: Option<&UrlRecord>) -> Result<UrlRecord> {
    let mut record = file_record();

    if let Some(after) = rest.strip_prefix("//") {
        let (host_str, remainder) = split_authority(after);
        let (tail_path, query) = split_query(remainder);

        if host_str.len() == 2 && is_windows_drive_letter(after.as_bytes(), 0) {
            // A drive letter that landed where the hostname goes belongs in
            // the path; the host stays empty
            let mut path_input = String::with_capacity(2 + tail_path.len());
            path_input.push_str(host_str);
            path_input.push_str(tail_path);
            record.pathname = normalize_path(&path_input, SchemeType::File);
        } else {
            record.hostname = parse_file_host(host_str)?;
            record.pathname = normalize_path(tail_path, SchemeType::File);
        }
        record.search = encode_search(query, true);
        return Ok(record);
    }

    if rest.starts_with('/') {
        // file:/path keeps a file base's host and drive root
        if let Some(b) = base
            && b.scheme_type == SchemeType::File
        {
            record.hostname = b.hostname.clone();
        }
        let (path_part, query) = split_query(rest);
        let merged = prefix_base_drive(path_part, base);
        record.pathname = normalize_path(&merged, SchemeType::File);
        record.search = encode_search(query, true);
        return Ok(record);
    }

    if starts_with_windows_drive_letter(rest) {
        // Drive-letter file paths are never resolved against the base path,
        // though the base host survives
        if let Some(b) = base
            && b.scheme_type == SchemeType::File
        {
            record.hostname = b.hostname.clone();
        }
        let (path_part, query) = split_query(rest);
        record.pathname = normalize_path(path_part, SchemeType::File);
        record.search = encode_search(query, true);
        return Ok(record);
    }

    if let Some(b) = base
        && b.scheme_type == SchemeType::File
    {
        // file:.  file:..  file:name  — ordinary relative resolution
        return resolve_relative(rest, b);
    }

    let (path_part, query) = split_query(rest);
    record.pathname = normalize_path(path_part, SchemeType::File);
    record.search = encode_search(query, true);
    Ok(record)
}

/// Special non-file schemes require `//` authority syntax; `http:` alone or
/// `http:nonslash` is a hard failure. Extra slashes before the authority
/// collapse.
fn parse_special(rest: &str, scheme: String, scheme_type: SchemeType) -> Result<UrlRecord> {
    if !rest.starts_with('/') {
        return Err(ParseError::InvalidUrl);
    }

    let mut record = UrlRecord {
        scheme: push_colon(scheme),
        scheme_type,
        has_authority: true,
        ..UrlRecord::default()
    };

    let after = rest.trim_start_matches('/');
    let (authority_str, remainder) = split_authority(after);
    if authority_str.is_empty() {
        return Err(ParseError::InvalidHost);
    }

    apply_authority(&mut record, parse_authority(authority_str, scheme_type)?);

    let (path_part, query) = split_query(remainder);
    record.pathname = normalize_path(path_part, scheme_type);
    record.search = encode_search(query, true);
    Ok(record)
}

/// Non-special schemes: authority form, rooted hierarchical form, or an
/// opaque single-string path. `sc:` with nothing after the colon is
/// invalid.
fn parse_nonspecial(rest: &str, scheme: String) -> Result<UrlRecord> {
    if rest.is_empty() {
        return Err(ParseError::InvalidUrl);
    }

    let mut record = UrlRecord {
        scheme: push_colon(scheme),
        scheme_type: SchemeType::NotSpecial,
        ..UrlRecord::default()
    };

    if let Some(after) = rest.strip_prefix("//") {
        record.has_authority = true;
        let (authority_str, remainder) = split_authority(after);
        apply_authority(
            &mut record,
            parse_authority(authority_str, SchemeType::NotSpecial)?,
        );

        let (path_part, query) = split_query(remainder);
        record.pathname = if path_part.is_empty() {
            String::new()
        } else {
            normalize_path(path_part, SchemeType::NotSpecial)
        };
        record.search = encode_search(query, false);
        return Ok(record);
    }

    let (path_part, query) = split_query(rest);
    if path_part.starts_with('/') {
        record.pathname = normalize_path(path_part, SchemeType::NotSpecial);
    } else {
        record.opaque_path = true;
        record.pathname = encode_opaque_path(path_part);
    }
    record.search = encode_search(query, false);
    Ok(record)
}

/// Relative resolution: scheme and authority come from the base
/// unconditionally; dispatch on the shape of the input. An opaque base only
/// accepts fragment-only references.
fn resolve_relative(rel: &str, base: &UrlRecord) -> Result<UrlRecord> {
    let mut record = base.clone();
    record.hash = String::new();

    if rel.is_empty() {
        // Fragment-only: keep the base path and query
        return Ok(record);
    }

    if base.opaque_path {
        return Err(ParseError::RelativeUrlWithoutBase);
    }

    let special = record.scheme_type.is_special();

    if let Some(query) = rel.strip_prefix('?') {
        // Query-only: keep the base path
        record.search = encode_search(Some(query), special);
        return Ok(record);
    }

    let (path_part, query) = split_query(rel);
    let merged: Cow<'_, str> = if path_part.starts_with('/') {
        prefix_base_drive(path_part, Some(base))
    } else {
        // Directory-relative merge: the base path up to and including its
        // last slash, then the input. The same splice applies to
        // non-special schemes.
        let dir = base_directory(&base.pathname);
        let mut out = String::with_capacity(dir.len() + path_part.len());
        out.push_str(dir);
        out.push_str(path_part);
        Cow::Owned(out)
    };

    record.pathname = normalize_path(&merged, record.scheme_type);
    record.search = encode_search(query, special);
    Ok(record)
}

/// The base path up to and including its last `/`, or `/` alone.
fn base_directory(pathname: &str) -> &str {
    match pathname.rfind('/') {
        Some(pos) => &pathname[..=pos],
        None => "/",
    }
}

/// For file URLs, an absolute-path reference without its own drive letter
/// stays on the base's drive.
fn prefix_base_drive<'a>(path: &'a str, base: Option<&UrlRecord>) -> Cow<'a, str> {
    if let Some(b) = base
        && b.scheme_type == SchemeType::File
        && path_starts_with_drive_root(&b.pathname)
        && !starts_with_windows_drive_letter(path.strip_prefix('/').unwrap_or(path))
    {
        let mut out = String::with_capacity(3 + path.len());
        out.push_str(&b.pathname[..3]);
        out.push_str(path);
        return Cow::Owned(out);
    }
    Cow::Borrowed(path)
}

fn path_starts_with_drive_root(pathname: &str) -> bool {
    let bytes = pathname.as_bytes();
    bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':'
}

/// Authority ends at the first `/` or `?` (backslashes are normalized to
/// slashes before this point for the schemes where they count).
fn split_authority(input: &str) -> (&str, &str) {
    let end = memchr::memchr2(b'/', b'?', input.as_bytes()).unwrap_or(input.len());
    (&input[..end], &input[end..])
}

fn split_query(input: &str) -> (&str, Option<&str>) {
    match memchr::memchr(b'?', input.as_bytes()) {
        Some(pos) => (&input[..pos], Some(&input[pos + 1..])),
        None => (input, None),
    }
}

/// Encode a query component, delimiter included; `None` clears the search.
fn encode_search(query: Option<&str>, special: bool) -> String {
    match query {
        None => String::new(),
        Some(q) => {
            let set = if special { SPECIAL_QUERY_SET } else { QUERY_SET };
            let mut out = String::with_capacity(q.len() + 1);
            out.push('?');
            percent_encode_into(&mut out, q, set);
            out
        }
    }
}

fn apply_authority(record: &mut UrlRecord, authority: Authority) {
    record.username = authority.username;
    record.password = authority.password;
    record.has_password_field = authority.has_password_field;
    record.double_colon_at = authority.double_colon_at;
    record.hostname = authority.hostname;
    record.port = authority.port;
}

fn push_colon(mut scheme: String) -> String {
    scheme.push(':');
    scheme
}
