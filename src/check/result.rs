//! Resolution results

use indexmap::IndexMap;
use serde::Serialize;

use crate::gav::Gav;
use crate::version::types::VersionIndex;

/// Outcome of checking one identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    /// The identifier asked for a specific version
    pub exact_match: bool,
    /// Exact match: the version was found. Listing: at least one version exists.
    pub available: bool,
    /// Narrowed to the matched version on an exact hit, otherwise the full index
    pub version_index: VersionIndex,
}

impl ResolutionResult {
    /// Requested explicitly but not published
    pub fn is_missing(&self) -> bool {
        self.exact_match && !self.available
    }

    /// The published version satisfying an exact request
    pub fn matched_version(&self) -> Option<&str> {
        if self.exact_match && self.available {
            self.version_index.versions.first().map(String::as_str)
        } else {
            None
        }
    }
}

/// Results for a batch of identifiers checked against one repository
///
/// Identifiers whose check failed (network, metadata) have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub repo_root: String,
    pub results: IndexMap<Gav, ResolutionResult>,
}

impl ResolutionReport {
    pub fn new(repo_root: impl Into<String>, results: IndexMap<Gav, ResolutionResult>) -> Self {
        Self {
            repo_root: repo_root.into(),
            results,
        }
    }

    pub fn get(&self, gav: &Gav) -> Option<&ResolutionResult> {
        self.results.get(gav)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Gav, &ResolutionResult)> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of identifiers requested with a version that is not available
    ///
    /// Identifiers that failed to fetch are not counted.
    pub fn failure_count(&self) -> usize {
        self.results.values().filter(|r| r.is_missing()).count()
    }

    /// Process exit status: the failure count, saturating at 255
    pub fn exit_code(&self) -> i32 {
        self.failure_count().min(255) as i32
    }
}
