//! Search term assembly from free text and screen filters.

/// Builds the `s=` search term from a free-text query and optional filters.
///
/// Each non-empty filter appends its own clause in the fixed order
/// `&type=`, `&y=`, `&genre=`. Values are passed through untouched: no
/// URL-encoding and no year validation, the API rejects what it cannot use.
/// An empty result means "no explicit search".
///
/// # Examples
/// ```
/// use reelscope_search::build_search_query;
///
/// assert_eq!(build_search_query("batman", Some("movie"), Some(""), None), "batman&type=movie");
/// ```
pub fn build_search_query(
    query: &str,
    kind: Option<&str>,
    year: Option<&str>,
    genre: Option<&str>,
) -> String {
    let mut search = query.to_string();

    for (key, value) in [("type", kind), ("y", year), ("genre", genre)] {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            search.push('&');
            search.push_str(key);
            search.push('=');
            search.push_str(value);
        }
    }

    search
}
