//! Splitting a URL into its path and trailing `?#fragment` suffix.

/// Split `url` at its first `#`.
///
/// Returns the URL without the fragment and the suffix to append back after
/// resolution. A `?` immediately before the `#` moves into the suffix; any
/// other query string stays part of the URL. An empty fragment label is
/// dropped, so `a.png#` has no suffix and `a.png?#` keeps only `?`.
///
/// ```
/// use cssurl_rewriter::split_url;
///
/// assert_eq!(split_url("a.png?v=2#frag"), ("a.png?v=2", "#frag".to_string()));
/// assert_eq!(split_url("font.eot?#iefix"), ("font.eot", "?#iefix".to_string()));
/// ```
pub fn split_url(url: &str) -> (&str, String) {
    let Some(pos) = url.find('#') else {
        return (url, String::new());
    };

    let single_query = url[..pos].ends_with('?');
    let path_end = if single_query { pos - 1 } else { pos };
    let label = &url[pos + 1..];

    let mut hash = String::new();
    if single_query {
        hash.push('?');
    }
    if !label.is_empty() {
        hash.push('#');
        hash.push_str(label);
    }

    (&url[..path_end], hash)
}
