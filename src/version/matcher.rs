//! Version containment for Maven repositories
//!
//! Repositories often publish a requested version with a qualifier suffix,
//! so a request for `2.17` is satisfied by `2.17.0` or `2.17-beta`:
//! - `V == R` matches
//! - `V` starting with `R-` matches
//! - `V` starting with `R.` matches
//!
//! This is a textual prefix test, not a semver comparison.

/// Check whether a single published version satisfies the requested one
pub fn version_matches(requested: &str, published: &str) -> bool {
    match published.strip_prefix(requested) {
        Some(rest) => rest.is_empty() || rest.starts_with('-') || rest.starts_with('.'),
        None => false,
    }
}

/// Find the first published version satisfying the request
///
/// `available_versions` is expected newest first, so ties resolve to the
/// most recent release.
pub fn best_match<'a>(requested: &str, available_versions: &'a [String]) -> Option<&'a str> {
    available_versions
        .iter()
        .map(String::as_str)
        .find(|published| version_matches(requested, published))
}

/// Check if any published version satisfies the request
pub fn version_exists(requested: &str, available_versions: &[String]) -> bool {
    best_match(requested, available_versions).is_some()
}
