//! Dependency listing of Maven project manifests
//!
//! Runs `mvn dependency:list` against a pom.xml and reads the listing it
//! writes, one dependency per line:
//!
//! ```text
//!    org.slf4j:slf4j-api:jar:2.0.12
//!    commons-io:commons-io:jar:2.17.0:compile
//! ```
//!
//! Working files live in a [`TempDir`] that is removed when processing ends,
//! whether it succeeded or not.

use std::path::Path;
use std::sync::Arc;

use regex::Regex;
use reqwest::Url;
use tempfile::TempDir;
use tracing::{debug, trace};

use crate::config::ManifestConfig;
use crate::gav::Gav;
use crate::process::CommandRunner;
use crate::source::traits::SourceError;

/// File name every downloaded manifest is stored under
pub const MANIFEST_FILE: &str = "pom.xml";

const DEPENDENCY_LIST_FILE: &str = "deps.txt";

/// Lists the dependencies declared by a pom.xml
pub struct ManifestProcessor {
    runner: Arc<dyn CommandRunner>,
    options: ManifestConfig,
    client: reqwest::Client,
    /// Matches `group:artifact:packaging:version` with optional leading whitespace
    dependency_re: Regex,
}

impl ManifestProcessor {
    pub fn new(runner: Arc<dyn CommandRunner>, options: ManifestConfig) -> Self {
        Self {
            runner,
            options,
            client: reqwest::Client::builder()
                .user_agent("gav-checker")
                .build()
                .expect("Failed to create HTTP client"),
            dependency_re: Regex::new(
                r"(?i)^\s*([a-z0-9._-]+):([a-z0-9._-]+):([a-z0-9._-]+):([a-z0-9._-]+).*$",
            )
            .unwrap(),
        }
    }

    pub fn options(&self) -> &ManifestConfig {
        &self.options
    }

    /// List the dependencies of the manifest at `url`
    ///
    /// `file:` URLs are read in place; anything else is downloaded first.
    pub async fn process_url(&self, url: &Url) -> Result<Vec<Gav>, SourceError> {
        debug!("Processing XML URL: {}", url);
        let work_dir = tempfile::Builder::new().prefix("gav-checker-").tempdir()?;

        if url.scheme() == "file" {
            let path = url.to_file_path().map_err(|_| SourceError::Unresolvable {
                input: url.to_string(),
                detail: "not a local file path".to_string(),
            })?;
            return self.list_dependencies(&path, &work_dir).await;
        }

        let pom = work_dir.path().join(MANIFEST_FILE);
        self.download(url, &pom).await?;
        self.list_dependencies(&pom, &work_dir).await
    }

    async fn download(&self, url: &Url, destination: &Path) -> Result<(), SourceError> {
        let to_download_error = |source: reqwest::Error| SourceError::Download {
            url: url.to_string(),
            source,
        };

        let bytes = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(to_download_error)?
            .bytes()
            .await
            .map_err(to_download_error)?;

        tokio::fs::write(destination, &bytes).await?;
        Ok(())
    }

    /// Run the dependency listing for `pom`, writing its output inside `work_dir`
    async fn list_dependencies(&self, pom: &Path, work_dir: &TempDir) -> Result<Vec<Gav>, SourceError> {
        debug!("Processing XML file: {:?}", pom);
        if tracing::enabled!(tracing::Level::TRACE)
            && let Ok(content) = tokio::fs::read_to_string(pom).await
        {
            trace!("{}", content);
        }

        let deps_file = work_dir.path().join(DEPENDENCY_LIST_FILE);

        self.runner.ensure_available("mvn")?;
        self.runner
            .run("mvn", &self.maven_args(pom, &deps_file))
            .await?
            .assert_ok()?;

        let listing = tokio::fs::read_to_string(&deps_file).await?;
        Ok(self.parse_dependency_list(&listing))
    }

    fn maven_args(&self, pom: &Path, deps_file: &Path) -> Vec<String> {
        vec![
            "-B".to_string(),
            "-q".to_string(),
            "-Dsilent".to_string(),
            format!("-DincludeScope={}", self.options.include_scope),
            format!("-DexcludeTransitive={}", !self.options.transitive_deps),
            format!("-DincludeParents={}", self.options.include_parent_pom),
            "-Dmdep.outputScope=false".to_string(),
            format!("-DoutputFile={}", absolute(deps_file).display()),
            format!("--file={}", absolute(pom).display()),
            "dependency:list".to_string(),
        ]
    }

    /// Parse the listing output; lines that are not dependencies are dropped
    pub fn parse_dependency_list(&self, listing: &str) -> Vec<Gav> {
        listing
            .lines()
            .inspect(|line| trace!("dependency: {}", line))
            .filter_map(|line| self.dependency_re.captures(line))
            .map(|caps| Gav::versioned(&caps[1], &caps[2], &caps[4]))
            .collect()
    }
}

fn absolute(path: &Path) -> std::path::PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
