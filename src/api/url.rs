//! URL construction for API endpoints.
//!
//! Every endpoint URL is built here from the configured base URL, a list
//! of path segments and an ordered list of query parameters. Path segments
//! are percent-encoded and query values are form-urlencoded, so identifiers
//! containing `/`, `&`, `?` or spaces cannot change the shape of the URL.
//! Segments that are exactly `.` or `..` are rejected: URL parsing treats
//! them, and their percent-encoded forms, as relative path steps.

use reqwest::Url;

use super::GmapError;

/// Build `{base}/{segments...}?{query...}`.
///
/// A base URL with its own path keeps it as a prefix. An empty trailing
/// segment yields a trailing slash (`["search", ""]` → `/search/`). The
/// query string is omitted when `query` is empty. Parameters keep the
/// order given.
pub fn build_url<K, V>(base: &str, segments: &[&str], query: &[(K, V)]) -> Result<Url, GmapError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if let Some(segment) = segments.iter().find(|s| is_dot_segment(s)) {
        return Err(GmapError::InvalidUrl(format!(
            "path segment {:?} would be resolved as a relative path",
            segment
        )));
    }

    let mut url = Url::parse(base).map_err(|e| GmapError::InvalidUrl(format!("{}: {}", base, e)))?;

    url.path_segments_mut()
        .map_err(|_| GmapError::InvalidUrl(format!("{}: cannot be a base URL", base)))?
        .pop_if_empty()
        .extend(segments);

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key.as_ref(), value.as_ref());
        }
    }

    Ok(url)
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

/// `build_url` without query parameters
pub fn build_path(base: &str, segments: &[&str]) -> Result<Url, GmapError> {
    build_url::<&str, &str>(base, segments, &[])
}
