//! Registry trait for fetching artifact version metadata

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::VersionIndex;

/// Trait for fetching the version index of an artifact
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Repository root this registry reads from, without trailing slash
    fn root(&self) -> String;

    /// Fetches the published version index for `group:artifact`
    ///
    /// # Returns
    /// * `Ok(VersionIndex)` - Versions ordered from newest to oldest
    /// * `Err(RegistryError)` - If the fetch or the metadata parse fails
    async fn fetch_version_index(
        &self,
        group: &str,
        artifact: &str,
    ) -> Result<VersionIndex, RegistryError>;
}
