/// Canonicalize a URL for equality comparison in the visited set only —
/// never used for display or for the reported `url` field on a
/// [`crate::PageRecord`].
///
/// Deliberately loose: lowercases the whole string (including the path,
/// which is lossy for case-sensitive servers) and strips only the fragment
/// and a single trailing slash. No query-string or percent-encoding
/// normalization is performed. See the design notes on why this exact
/// looseness is preserved rather than "fixed".
pub fn normalize(url: Option<&str>) -> String {
    let Some(raw) = url else {
        return String::new();
    };

    let trimmed = raw.trim().to_lowercase();
    let without_fragment = match trimmed.find('#') {
        Some(idx) => &trimmed[..idx],
        None => &trimmed[..],
    };

    if without_fragment.len() > 1 && without_fragment.ends_with('/') {
        without_fragment[..without_fragment.len() - 1].to_string()
    } else {
        without_fragment.to_string()
    }
}
