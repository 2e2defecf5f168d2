//! Registry test utilities

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use gav_checker::version::error::RegistryError;
use gav_checker::version::registry::Registry;
use gav_checker::version::types::{NOT_AVAILABLE, VersionIndex};

pub const TEST_ROOT: &str = "https://repo.example.com/maven2";

/// Registry serving fixed version indexes keyed by `group:artifact`
pub struct InMemoryRegistry {
    indexes: HashMap<String, VersionIndex>,
    fetches: AtomicUsize,
}

#[allow(dead_code)]
impl InMemoryRegistry {
    pub fn new() -> Self {
        Self {
            indexes: HashMap::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Register `versions` (newest first); latest and release are the first entry
    pub fn with_versions(mut self, coordinates: &str, versions: Vec<&str>) -> Self {
        let newest = versions.first().copied().unwrap_or(NOT_AVAILABLE);
        self.indexes.insert(
            coordinates.to_string(),
            VersionIndex::new(
                newest,
                newest,
                versions.into_iter().map(str::to_string).collect(),
            ),
        );
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Registry for InMemoryRegistry {
    fn root(&self) -> String {
        TEST_ROOT.to_string()
    }

    async fn fetch_version_index(
        &self,
        group: &str,
        artifact: &str,
    ) -> Result<VersionIndex, RegistryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let coordinates = format!("{}:{}", group, artifact);
        self.indexes
            .get(&coordinates)
            .cloned()
            .ok_or(RegistryError::NotFound(coordinates))
    }
}
