use crate::character_sets::{COMPONENT_SET, OPAQUE_PATH_SET, SPECIAL_PATH_SET};
use crate::checkers::{is_drive_letter_segment, is_normalized_drive_letter};
use crate::compat::{String, Vec};
use crate::scheme::SchemeType;
use crate::unicode::percent_encode::{
    encode_file_path_segment, percent_encode_into, percent_encode_with_set,
};

/// A path segment spelling `.`, decoded or not.
fn is_single_dot(segment: &str) -> bool {
    segment == "." || segment.eq_ignore_ascii_case("%2e")
}

/// A path segment spelling `..` — `%2e` counts only where it forms part of
/// the full dot segment; a stray `%2e` elsewhere stays encoded.
fn is_double_dot(segment: &str) -> bool {
    segment == ".."
        || segment.eq_ignore_ascii_case(".%2e")
        || segment.eq_ignore_ascii_case("%2e.")
        || segment.eq_ignore_ascii_case("%2e%2e")
}

/// Normalize a hierarchical path: resolve dot segments with the RFC 3986
/// segment stack, rewrite Windows drive letters for `file:` URLs, and
/// percent-encode each surviving segment with the scheme's path set.
///
/// The output always begins with `/`. A trailing slash is preserved when
/// the input ended with one or with a dot segment, so `/foo/..` normalizes
/// to `/` and `/a/b/.` to `/a/b/`. A drive-letter first segment is never
/// popped by `..`; `file:` paths cannot escape their drive root.
pub fn normalize_path(input: &str, scheme_type: SchemeType) -> String {
    let trimmed = input.strip_prefix('/').unwrap_or(input);
    let segments: Vec<&str> = trimmed.split('/').collect();
    let last_index = segments.len() - 1;

    let mut stack: Vec<String> = Vec::with_capacity(segments.len());
    let mut trailing = false;

    for (i, segment) in segments.iter().enumerate() {
        let is_last = i == last_index;

        if is_single_dot(segment) {
            if is_last {
                trailing = true;
            }
            continue;
        }

        if is_double_dot(segment) {
            let drive_protected = scheme_type == SchemeType::File
                && stack.len() == 1
                && is_normalized_drive_letter(&stack[0]);
            if !drive_protected {
                stack.pop();
            }
            if is_last {
                trailing = true;
            }
            continue;
        }

        let mut encoded = String::with_capacity(segment.len());
        if scheme_type == SchemeType::File && i == 0 && is_drive_letter_segment(segment) {
            // Drive letters keep their case; `|` and `%7C` normalize to `:`
            encoded.push(segment.as_bytes()[0] as char);
            encoded.push(':');
        } else {
            match scheme_type {
                SchemeType::File => encode_file_path_segment(&mut encoded, segment),
                SchemeType::NotSpecial => {
                    percent_encode_into(&mut encoded, segment, COMPONENT_SET);
                }
                _ => percent_encode_into(&mut encoded, segment, SPECIAL_PATH_SET),
            }
        }
        stack.push(encoded);
    }

    let mut out = String::with_capacity(input.len() + 1);
    for segment in &stack {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    } else if trailing && !out.ends_with('/') {
        out.push('/');
    }
    out
}

/// Encode an opaque path: one unstructured string, no segment processing.
pub fn encode_opaque_path(input: &str) -> String {
    percent_encode_with_set(input, OPAQUE_PATH_SET)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(path: &str) -> String {
        normalize_path(path, SchemeType::Http)
    }

    fn file(path: &str) -> String {
        normalize_path(path, SchemeType::File)
    }

    #[test]
    fn test_dot_segments() {
        assert_eq!(http("/a/b/../../c"), "/c");
        assert_eq!(http("/a/./b/"), "/a/b/");
        assert_eq!(http("/foo/.."), "/");
        assert_eq!(http("/a/b/.."), "/a/");
        assert_eq!(http("/./"), "/");
        assert_eq!(http(""), "/");
        assert_eq!(http("/.."), "/");
    }

    #[test]
    fn test_consecutive_slashes_preserved() {
        assert_eq!(http("//a//b"), "//a//b");
        assert_eq!(http("/a//../b"), "/a/b");
    }

    #[test]
    fn test_percent_encoded_dots() {
        assert_eq!(http("/%2e/path"), "/path");
        assert_eq!(http("/%2E%2e/path"), "/path");
        assert_eq!(http("/a/%2e%2e/c"), "/c");
        assert_eq!(http("/a/.%2e/c"), "/c");
        // A stray %2e inside a segment is not a dot segment
        assert_eq!(http("/a%2eb/c"), "/a%2eb/c");
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(http("/a b"), "/a%20b");
        assert_eq!(http("/a<b>"), "/a%3Cb%3E");
        // Special paths keep ' and |
        assert_eq!(http("/a'|b"), "/a'|b");
        // Existing triplets survive untouched
        assert_eq!(http("/Caf%C3%A9"), "/Caf%C3%A9");
    }

    #[test]
    fn test_non_special_component_set() {
        // The generic component set also encodes ' { | }
        assert_eq!(normalize_path("/a'b", SchemeType::NotSpecial), "/a%27b");
        assert_eq!(normalize_path("/a|b", SchemeType::NotSpecial), "/a%7Cb");
    }

    #[test]
    fn test_drive_letters() {
        assert_eq!(file("/C:/foo"), "/C:/foo");
        assert_eq!(file("/C|/foo"), "/C:/foo");
        assert_eq!(file("C|/foo"), "/C:/foo");
        assert_eq!(file("/C%7C/foo"), "/C:/foo");
        assert_eq!(file("/C%7c/foo"), "/C:/foo");
        // Double pipe is not a drive letter; file paths keep pipes literal
        assert_eq!(file("/C||/foo"), "/C||/foo");
    }

    #[test]
    fn test_drive_letter_never_popped() {
        assert_eq!(file("/C:/.."), "/C:/");
        assert_eq!(file("/C:/a/../.."), "/C:/");
        assert_eq!(file("/C:/a/../b"), "/C:/b");
    }

    #[test]
    fn test_file_unreserved_redecode() {
        assert_eq!(file("/%41bc"), "/Abc");
        // Dot stays encoded: %2e must not silently become a dot segment
        assert_eq!(file("/a/%2eb"), "/a/%2eb");
    }

    #[test]
    fn test_opaque_path() {
        assert_eq!(encode_opaque_path("foo@example.com"), "foo@example.com");
        // Permissive: space, ^, {, |, } survive
        assert_eq!(encode_opaque_path("a b^{|}"), "a b^{|}");
        assert_eq!(encode_opaque_path("a<b>`c"), "a%3Cb%3E%60c");
        // No dot processing
        assert_eq!(encode_opaque_path("a/../b"), "a/../b");
    }
}
