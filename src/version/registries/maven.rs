//! Maven repository metadata implementation
//!
//! Reads `{root}/{group path}/{artifact}/maven-metadata.xml`:
//!
//! ```text
//! <metadata>
//!   <versioning>
//!     <latest>2.0.12</latest>
//!     <release>2.0.12</release>
//!     <versions>
//!       <version>2.0.11</version>
//!       <version>2.0.12</version>
//!     </versions>
//!   </versioning>
//! </metadata>
//! ```

use std::time::Duration;

use roxmltree::{Document, Node};
use tracing::{debug, trace, warn};

use crate::config::{DEFAULT_REPOSITORY_URL, FETCH_TIMEOUT_MS};
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::types::{NOT_AVAILABLE, VersionIndex};

/// File name of the per-artifact metadata document
pub const METADATA_FILE: &str = "maven-metadata.xml";

/// Registry implementation for a Maven 2 layout repository
pub struct MavenRegistry {
    client: reqwest::Client,
    root: String,
    timeout_ms: u64,
}

impl MavenRegistry {
    /// Creates a new MavenRegistry reading from `root`
    pub fn new(root: &str) -> Self {
        Self::with_options(root, FETCH_TIMEOUT_MS, false)
    }

    /// Creates a new MavenRegistry with an explicit fetch timeout and TLS policy
    pub fn with_options(root: &str, timeout_ms: u64, accept_invalid_certs: bool) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("gav-checker")
                .timeout(Duration::from_millis(timeout_ms))
                .danger_accept_invalid_certs(accept_invalid_certs)
                .build()
                .expect("Failed to create HTTP client"),
            root: root.trim_end_matches('/').to_string(),
            timeout_ms,
        }
    }

    /// Canonical metadata URL for an artifact
    pub fn metadata_url(&self, group: &str, artifact: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.root,
            group.replace('.', "/"),
            artifact,
            METADATA_FILE
        )
    }

    fn map_send_error(&self, url: &str, e: reqwest::Error) -> RegistryError {
        if e.is_timeout() {
            RegistryError::Timeout {
                url: url.to_string(),
                timeout_ms: self.timeout_ms,
            }
        } else {
            RegistryError::Network(e)
        }
    }
}

impl Default for MavenRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_REPOSITORY_URL)
    }
}

#[async_trait::async_trait]
impl Registry for MavenRegistry {
    fn root(&self) -> String {
        self.root.clone()
    }

    async fn fetch_version_index(
        &self,
        group: &str,
        artifact: &str,
    ) -> Result<VersionIndex, RegistryError> {
        let url = self.metadata_url(group, artifact);
        debug!("Opening {} ...", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(&url, e))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(format!("{}:{}", group, artifact)));
        }

        if !status.is_success() {
            warn!("Maven repository returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_send_error(&url, e))?;
        trace!("{}", body);

        parse_metadata(&body).map_err(|e| match e {
            RegistryError::MissingVersions(_) => {
                RegistryError::MissingVersions(format!("{}:{}", group, artifact))
            }
            other => other,
        })
    }
}

/// Parse a `maven-metadata.xml` document into a newest-first index
///
/// Missing `latest`/`release` map to [`NOT_AVAILABLE`]; a missing
/// `versioning` or `versions` element means nothing was published.
pub fn parse_metadata(xml: &str) -> Result<VersionIndex, RegistryError> {
    let document = Document::parse(xml).map_err(|e| {
        warn!("Failed to parse Maven metadata: {}", e);
        RegistryError::InvalidResponse(e.to_string())
    })?;

    let versioning = child(document.root_element(), "versioning")
        .ok_or_else(|| RegistryError::MissingVersions("versioning".to_string()))?;

    let latest = child_text(versioning, "latest").unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let release = child_text(versioning, "release").unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let versions = child(versioning, "versions")
        .ok_or_else(|| RegistryError::MissingVersions("versions".to_string()))?;

    let mut version_list: Vec<String> = versions
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "version")
        .map(|node| node.text().unwrap_or_default().trim().to_string())
        .collect();
    version_list.reverse();

    Ok(VersionIndex::new(latest, release, version_list))
}

fn child<'a, 'input>(parent: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    parent
        .children()
        .find(|node| node.is_element() && node.tag_name().name() == name)
}

fn child_text(parent: Node<'_, '_>, name: &str) -> Option<String> {
    child(parent, name).map(|node| node.text().unwrap_or_default().trim().to_string())
}
