use url::Url;

/// Truncate a string to at most `max` characters, respecting char boundaries.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Number of characters (not bytes) in a string.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Collapse all runs of whitespace in an element's text into single spaces
/// and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve a possibly-relative href against a base URL, returning the
/// absolute form. None when either side is unparseable.
pub fn resolve_url(base: &str, href: &str) -> Option<String> {
    Url::parse(base)
        .and_then(|b| b.join(href))
        .map(|u| u.to_string())
        .ok()
}
