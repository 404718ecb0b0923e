use crate::character_sets::is_ascii_tab_or_newline;
use crate::compat::{Cow, String};
use crate::error::{ParseError, Result};

/// Fast check if string contains tabs or newlines
pub fn has_tabs_or_newline(input: &str) -> bool {
    memchr::memchr3(b'\t', b'\n', b'\r', input.as_bytes()).is_some()
}

/// Prune fragment (#hash) from URL string.
/// Returns (`url_without_fragment`, `fragment_without_hash`).
pub fn prune_fragment(input: &str) -> (&str, Option<&str>) {
    memchr::memchr(b'#', input.as_bytes()).map_or((input, None), |pos| {
        (&input[..pos], Some(&input[pos + 1..]))
    })
}

/// Characters trimmed from the edges of raw URL input: ASCII C0 controls
/// and space, plus the ideographic space and no-break space. U+FEFF is NOT
/// trimmed; a leading BOM survives to be percent-encoded downstream.
fn is_trimmable(c: char) -> bool {
    c as u32 <= 0x20 || c == '\u{3000}' || c == '\u{00A0}'
}

/// Trim URL whitespace from both edges and delete every interior tab, LF
/// and CR. Interior spaces are preserved for later percent-encoding.
/// Returns a Cow to avoid allocation on the common clean input.
pub fn strip_url_whitespace(input: &str) -> Cow<'_, str> {
    let trimmed = input.trim_matches(is_trimmable);

    if !has_tabs_or_newline(trimmed) {
        return Cow::Borrowed(trimmed);
    }

    Cow::Owned(
        trimmed
            .chars()
            .filter(|&c| !is_ascii_tab_or_newline(c))
            .collect(),
    )
}

/// Raw-input gate run before any structural parsing: a NUL byte anywhere is
/// a hard failure.
pub fn validate_raw_characters(input: &str) -> Result<()> {
    if memchr::memchr(0, input.as_bytes()).is_some() {
        return Err(ParseError::InvalidUrl);
    }
    Ok(())
}

/// Normalize backslashes to forward slashes in the scheme/authority/path
/// region. Stops at the first `?` (the fragment is pruned before this point)
/// so queries are never rewritten. Only applied for special schemes and
/// scheme-less input.
pub fn normalize_backslashes(input: &str) -> Cow<'_, str> {
    let limit = memchr::memchr(b'?', input.as_bytes()).unwrap_or(input.len());
    if memchr::memchr(b'\\', &input.as_bytes()[..limit]).is_none() {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    out.push_str(&input[..limit].replace('\\', "/"));
    out.push_str(&input[limit..]);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_url_whitespace() {
        assert_eq!(strip_url_whitespace("\t\nhello\r\n"), "hello");
        assert_eq!(strip_url_whitespace("hello"), "hello");
        assert_eq!(strip_url_whitespace("\t\n\r"), "");
        assert_eq!(strip_url_whitespace("hel\tlo\nworld"), "helloworld");

        // Spaces trimmed from edges, kept internally
        assert_eq!(strip_url_whitespace("  hello world  "), "hello world");

        // Unicode whitespace trimmed from edges
        assert_eq!(strip_url_whitespace("\u{3000}foo.com\u{00A0}"), "foo.com");

        // BOM survives
        assert_eq!(strip_url_whitespace("\u{FEFF}x"), "\u{FEFF}x");
    }

    #[test]
    fn test_prune_fragment() {
        assert_eq!(prune_fragment("a#b"), ("a", Some("b")));
        assert_eq!(prune_fragment("a#b#c"), ("a", Some("b#c")));
        assert_eq!(prune_fragment("a"), ("a", None));
        assert_eq!(prune_fragment("a#"), ("a", Some("")));
    }

    #[test]
    fn test_validate_raw_characters() {
        assert!(validate_raw_characters("http://ok/").is_ok());
        assert!(validate_raw_characters("http://h\0st/").is_err());
    }

    #[test]
    fn test_normalize_backslashes() {
        assert_eq!(normalize_backslashes("http:\\\\h\\p"), "http://h/p");
        assert_eq!(normalize_backslashes("a/b"), "a/b");
        // Query region untouched
        assert_eq!(normalize_backslashes("h\\p?a\\b"), "h/p?a\\b");
    }
}
