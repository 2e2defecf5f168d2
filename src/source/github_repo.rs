//! GitHub repositories
//!
//! `https://github.com/<owner>/<repo>` resolves to the dependencies of the
//! pom.xml at the root of the repository's default branch.

use std::sync::Arc;

use regex::Regex;
use reqwest::Url;
use tracing::debug;

use crate::gav::Gav;
use crate::process::CommandRunner;
use crate::source::manifest::{MANIFEST_FILE, ManifestProcessor};
use crate::source::traits::{SourceError, SourceInput, SourceResolver};

/// Default base URL for raw repository content
const DEFAULT_RAW_CONTENT_URL: &str = "https://raw.githubusercontent.com";

pub struct GitHubRepositoryResolver {
    runner: Arc<dyn CommandRunner>,
    processor: Arc<ManifestProcessor>,
    raw_content_url: String,
    repo_re: Regex,
}

impl GitHubRepositoryResolver {
    pub fn new(runner: Arc<dyn CommandRunner>, processor: Arc<ManifestProcessor>) -> Self {
        Self::with_raw_content_url(runner, processor, DEFAULT_RAW_CONTENT_URL)
    }

    /// Creates a resolver fetching manifests from a custom raw content host
    pub fn with_raw_content_url(
        runner: Arc<dyn CommandRunner>,
        processor: Arc<ManifestProcessor>,
        raw_content_url: &str,
    ) -> Self {
        Self {
            runner,
            processor,
            raw_content_url: raw_content_url.trim_end_matches('/').to_string(),
            repo_re: Regex::new(
                r"(?i)^https?://(?:www\.)?github\.com/(?P<owner>[\w.-]+)/(?P<repo>[\w.-]+)/?$",
            )
            .unwrap(),
        }
    }

    /// `owner/repo` for a repository URL
    fn repository_id(&self, url: &Url) -> Option<String> {
        self.repo_re
            .captures(url.as_str())
            .map(|caps| format!("{}/{}", &caps["owner"], &caps["repo"]))
    }

    async fn default_branch(&self, repository: &str) -> Result<String, SourceError> {
        self.runner.ensure_available("gh")?;
        let args = vec![
            "repo".to_string(),
            "view".to_string(),
            "--json=defaultBranchRef".to_string(),
            "--jq=.defaultBranchRef.name".to_string(),
            repository.to_string(),
        ];
        let result = self.runner.run("gh", &args).await?.assert_ok()?;
        let branch = result.first_line().trim();

        if branch.is_empty() {
            return Err(SourceError::Unresolvable {
                input: repository.to_string(),
                detail: "gh reported no default branch".to_string(),
            });
        }
        Ok(branch.to_string())
    }

    /// Raw content URL of the manifest on `branch`
    pub fn manifest_url(&self, repository: &str, branch: &str) -> Result<Url, SourceError> {
        let raw = format!(
            "{}/{}/{}/{}",
            self.raw_content_url, repository, branch, MANIFEST_FILE
        );
        Url::parse(&raw).map_err(|e| SourceError::Unresolvable {
            input: raw,
            detail: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl SourceResolver for GitHubRepositoryResolver {
    fn name(&self) -> &'static str {
        "github-repository"
    }

    fn applies(&self, input: &SourceInput) -> bool {
        input
            .as_url()
            .is_some_and(|url| self.repository_id(url).is_some())
    }

    async fn resolve(&self, input: &SourceInput) -> Result<Vec<Gav>, SourceError> {
        let repository = input
            .as_url()
            .and_then(|url| self.repository_id(url))
            .ok_or_else(|| SourceError::Unresolvable {
                input: input.as_str().to_string(),
                detail: "not a GitHub repository URL".to_string(),
            })?;
        debug!("Processing GitHub repository: {}", repository);

        let branch = self.default_branch(&repository).await?;
        let manifest_url = self.manifest_url(&repository, &branch)?;
        debug!("Using manifest {} from default branch {}", manifest_url, branch);

        self.processor.process_url(&manifest_url).await
    }
}
