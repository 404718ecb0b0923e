#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Tests for UrlSearchParams and its coupling to a parent URL
use weburl::{ParseError, Url, UrlSearchParams};

#[test]
fn test_construct_from_query_string() {
    let params = UrlSearchParams::parse("a=1&b=2&a=3");
    assert_eq!(params.size(), 3);
    assert_eq!(params.get("a"), Some("1"));
    assert_eq!(params.get_all("a"), ["1", "3"]);
    assert_eq!(params.get("b"), Some("2"));
    assert_eq!(params.get("missing"), None);
}

#[test]
fn test_leading_question_mark_optional() {
    assert_eq!(
        UrlSearchParams::parse("?a=1"),
        UrlSearchParams::parse("a=1")
    );
    // Only the first is stripped
    let params = UrlSearchParams::parse("??a=1");
    assert_eq!(params.get("?a"), Some("1"));
}

#[test]
fn test_plus_and_percent_decoding() {
    let params = UrlSearchParams::parse("k=a+b&m=%C3%A9&n=1%2B1");
    assert_eq!(params.get("k"), Some("a b"));
    assert_eq!(params.get("m"), Some("é"));
    assert_eq!(params.get("n"), Some("1+1"));
}

#[test]
fn test_ordering_and_multiplicity() {
    let params = UrlSearchParams::parse("a=1&b=2&a=3");
    assert_eq!(params.to_string(), "a=1&b=2&a=3");

    let entries: Vec<(&str, &str)> = params.iter().collect();
    assert_eq!(entries, [("a", "1"), ("b", "2"), ("a", "3")]);
}

#[test]
fn test_set_collapses_to_first_position() {
    let mut params = UrlSearchParams::parse("a=1&b=2&a=3");
    params.set("a", "9");
    assert_eq!(params.to_string(), "a=9&b=2");
}

#[test]
fn test_append_and_delete() {
    let mut params = UrlSearchParams::new();
    params.append("k", "1");
    params.append("k", "2");
    params.append("other", "x");
    assert_eq!(params.get_all("k"), ["1", "2"]);

    params.delete("k", None);
    assert_eq!(params.size(), 1);
    assert!(params.has("other", None));
}

#[test]
fn test_value_filtered_delete_and_has() {
    let mut params = UrlSearchParams::parse("a=1&a=2&a=1");
    assert!(params.has("a", Some("2")));
    assert!(!params.has("a", Some("3")));

    params.delete("a", Some("1"));
    assert_eq!(params.get_all("a"), ["2"]);
}

#[test]
fn test_from_entries_shape_errors() {
    assert!(UrlSearchParams::from_entries([["a", "1"], ["b", "2"]]).is_ok());
    assert_eq!(
        UrlSearchParams::from_entries([vec!["a", "1"], vec!["b"]]),
        Err(ParseError::InvalidEntry)
    );
    assert_eq!(
        UrlSearchParams::from_entries([vec!["a", "1", "x"]]),
        Err(ParseError::InvalidEntry)
    );
}

#[test]
fn test_from_record_collapses_duplicates() {
    let params = UrlSearchParams::from_record([("a", "1"), ("b", "2"), ("a", "3")]);
    // Later keys overwrite in place, first position kept
    assert_eq!(params.to_string(), "a=3&b=2");
}

#[test]
fn test_clone_is_deep() {
    let mut original = UrlSearchParams::parse("a=1");
    let copy = original.clone();
    original.set("a", "2");
    assert_eq!(copy.get("a"), Some("1"));
}

#[test]
fn test_sort() {
    let mut params = UrlSearchParams::parse("z=1&a=2&z=3&a=4");
    params.sort();
    assert_eq!(params.to_string(), "a=2&a=4&z=1&z=3");
}

#[test]
fn test_serialization_encoding() {
    let mut params = UrlSearchParams::new();
    params.append("key with spaces", "a&b=c");
    assert_eq!(params.to_string(), "key+with+spaces=a%26b%3Dc");

    let reparsed = UrlSearchParams::parse(&params.to_string());
    assert_eq!(reparsed.get("key with spaces"), Some("a&b=c"));
}

#[test]
fn test_url_snapshot() {
    let url = Url::parse("https://h/p?a=1&a=2&b=3", None).unwrap();
    let params = url.search_params();
    assert_eq!(params.get_all("a"), ["1", "2"]);
    assert_eq!(params.size(), 3);
}

#[test]
fn test_url_mutation_propagates() {
    let mut url = Url::parse("https://h/p?a=1&b=2&a=3", None).unwrap();
    {
        let mut params = url.search_params_mut();
        params.set("a", "9");
    }
    assert_eq!(url.search(), "?a=9&b=2");
    assert_eq!(url.href(), "https://h/p?a=9&b=2");
}

#[test]
fn test_url_mutation_append_and_clear() {
    let mut url = Url::parse("https://h/p", None).unwrap();
    {
        let mut params = url.search_params_mut();
        params.append("x", "1 2");
    }
    assert_eq!(url.search(), "?x=1+2");

    {
        let mut params = url.search_params_mut();
        params.delete("x", None);
    }
    assert_eq!(url.search(), "");
    assert_eq!(url.href(), "https://h/p");
}

#[test]
fn test_url_query_survives_round_trip_through_params() {
    let mut url = Url::parse("https://h/p?name=Fran%C3%A7ois", None).unwrap();
    {
        let mut params = url.search_params_mut();
        assert_eq!(params.get("name"), Some("François"));
        params.append("tag", "café");
    }
    let reparsed = Url::parse(url.href(), None).unwrap();
    assert_eq!(reparsed.search_params().get("tag"), Some("café"));
}

#[test]
fn test_iteration_views() {
    let params = UrlSearchParams::parse("a=1&b=2");
    assert_eq!(params.keys().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(params.values().collect::<Vec<_>>(), ["1", "2"]);
    assert_eq!(
        params.entries().collect::<Vec<_>>(),
        [("a", "1"), ("b", "2")]
    );
}

#[test]
fn test_empty_pairs_skipped() {
    let params = UrlSearchParams::parse("a=1&&b=2&");
    assert_eq!(params.size(), 2);
}

#[test]
fn test_no_value_means_empty_string() {
    let params = UrlSearchParams::parse("flag&k=v");
    assert_eq!(params.get("flag"), Some(""));
    assert!(params.has("flag", None));
}
