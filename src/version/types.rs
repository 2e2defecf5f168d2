//! Common types for version metadata

use serde::Serialize;

/// Placeholder reported when the repository metadata omits `latest` or `release`
pub const NOT_AVAILABLE: &str = "N/A";

/// Published version metadata for one artifact
///
/// `versions` is ordered newest first (the reverse of `maven-metadata.xml`
/// document order). Duplicates are kept exactly as published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionIndex {
    pub latest: String,
    pub release: String,
    pub versions: Vec<String>,
}

impl VersionIndex {
    pub fn new(latest: impl Into<String>, release: impl Into<String>, versions: Vec<String>) -> Self {
        Self {
            latest: latest.into(),
            release: release.into(),
            versions,
        }
    }

    /// Index describing exactly one matched version
    pub fn single(version: &str) -> Self {
        Self::new(version, version, vec![version.to_string()])
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Versions to display given a listing limit
    ///
    /// A negative `count` means unlimited.
    pub fn limited(&self, count: i32) -> &[String] {
        match usize::try_from(count) {
            Ok(limit) => &self.versions[..limit.min(self.versions.len())],
            Err(_) => &self.versions,
        }
    }
}
