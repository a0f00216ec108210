//! View URI assembly.
//!
//! Entity URIs are the primary user-facing identifier, so quoting is kept
//! stable and readable: query values preserve `:,!=/'` unescaped.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped in query parameters: everything outside
/// `[A-Za-z0-9_.~-]` except the store's safe set `:,!=/'`.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b':')
    .remove(b',')
    .remove(b'!')
    .remove(b'=')
    .remove(b'/')
    .remove(b'\'');

/// Render `params` as a query string, or the empty string if there are
/// none. Later entries win on duplicate keys; emission is key-ordered so
/// the same parameters always render the same URI.
pub fn uri_params(params: &[(&str, &str)]) -> String {
    let mut merged = BTreeMap::new();
    for (key, value) in params {
        merged.insert(*key, *value);
    }
    if merged.is_empty() {
        return String::new();
    }
    let query = merged
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY),
                utf8_percent_encode(value, QUERY)
            )
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("?{query}")
}

/// Replace any query or fragment on `base` with the rendered `params`.
pub fn uri_with_params(base: &str, params: &[(&str, &str)]) -> String {
    let base = match base.find(['?', '#']) {
        Some(cut) => &base[..cut],
        None => base,
    };
    format!("{}{}", base, uri_params(params))
}

#[cfg(test)]
mod tests {
    use super::{uri_params, uri_with_params};

    #[test]
    fn no_params_is_empty() {
        assert_eq!(uri_params(&[]), "");
        assert_eq!(uri_with_params("http://h/x", &[]), "http://h/x");
    }

    #[test]
    fn safe_set_is_preserved() {
        assert_eq!(
            uri_params(&[("search", "type:note,label!='a/b'")]),
            "?search=type:note,label!='a/b'"
        );
    }

    #[test]
    fn unsafe_characters_are_quoted() {
        assert_eq!(uri_params(&[("q", "a b&c")]), "?q=a%20b%26c");
    }

    #[test]
    fn later_params_win() {
        assert_eq!(uri_params(&[("view", "one"), ("view", "two")]), "?view=two");
    }

    #[test]
    fn emission_is_key_ordered() {
        assert_eq!(
            uri_params(&[("b", "2"), ("a", "1"), ("c", "3")]),
            "?a=1&b=2&c=3"
        );
    }

    #[test]
    fn old_query_and_fragment_are_dropped() {
        assert_eq!(
            uri_with_params("http://h/x?y=1#f", &[("a", "b:c")]),
            "http://h/x?a=b:c"
        );
    }
}
