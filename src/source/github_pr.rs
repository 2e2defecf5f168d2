//! GitHub dependency-bump pull requests
//!
//! The PR title is tried first:
//! - Dependabot: `build(deps): bump commons-io:commons-io from 2.16.1 to 2.17.0`
//! - Renovate: `fix(deps): update dependency commons-io:commons-io to v2.17.0`
//!
//! Grouped Dependabot PRs carry the updates in the body instead, one per line:
//! ``Updates `org.x:y` from 1.0 to 1.1``

use std::sync::Arc;

use regex::Regex;
use reqwest::Url;
use tracing::{debug, trace};

use crate::gav::Gav;
use crate::process::{CommandRunner, ScriptResult};
use crate::source::traits::{SourceError, SourceInput, SourceResolver};

/// Resolves `https://github.com/<owner>/<repo>/pull/<n>` through the `gh` CLI
pub struct GitHubPullRequestResolver {
    runner: Arc<dyn CommandRunner>,
    /// Path shape `/<owner>/<repo>/pull/<number>`
    path_re: Regex,
    /// Dependabot single-dependency title
    bump_title_re: Regex,
    /// Renovate single-dependency title
    update_title_re: Regex,
    /// Dependabot grouped-update body line
    body_re: Regex,
}

impl GitHubPullRequestResolver {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            path_re: Regex::new(r"^/[\w.-]+/[\w.-]+/pull/\d+/?$").unwrap(),
            bump_title_re: Regex::new(
                r"^(?:[a-z]+\([\w-]+\): )?[Bb]ump ([A-Za-z0-9._-]+):([A-Za-z0-9._-]+) from [A-Za-z0-9._-]+ to ([A-Za-z0-9._-]+)$",
            )
            .unwrap(),
            update_title_re: Regex::new(
                r"^(?:[a-z]+\([\w-]+\): )?[Uu]pdate dependency ([A-Za-z0-9._-]+):([A-Za-z0-9._-]+) to v?([A-Za-z0-9._-]+)$",
            )
            .unwrap(),
            body_re: Regex::new(r"(?m)^Updates `([^:`]+):([^`]+)` from (.+) to (.+?)\s*$").unwrap(),
        }
    }

    /// Identifier named by a single-dependency PR title
    pub fn match_title(&self, title: &str) -> Option<Gav> {
        let title = title.trim();
        self.bump_title_re
            .captures(title)
            .or_else(|| self.update_title_re.captures(title))
            .map(|caps| Gav::versioned(&caps[1], &caps[2], &caps[3]))
    }

    /// Every identifier listed in a grouped-update PR body, in order of appearance
    pub fn match_body(&self, body: &str) -> Vec<Gav> {
        self.body_re
            .captures_iter(body)
            .map(|caps| Gav::versioned(&caps[1], &caps[2], &caps[4]))
            .inspect(|gav| trace!("Found {}", gav))
            .collect()
    }

    async fn fetch_field(&self, url: &Url, field: &str) -> Result<ScriptResult, SourceError> {
        let args = vec![
            "pr".to_string(),
            "view".to_string(),
            url.to_string(),
            "--json".to_string(),
            field.to_string(),
            "--jq".to_string(),
            format!(".{}", field),
        ];
        let result = self.runner.run("gh", &args).await?;
        trace!("{:?}", result.out);
        Ok(result.assert_ok()?)
    }
}

#[async_trait::async_trait]
impl SourceResolver for GitHubPullRequestResolver {
    fn name(&self) -> &'static str {
        "github-pull-request"
    }

    fn applies(&self, input: &SourceInput) -> bool {
        input.as_url().is_some_and(|url| {
            matches!(url.scheme(), "http" | "https")
                && url.host_str() == Some("github.com")
                && self.path_re.is_match(url.path())
        })
    }

    async fn resolve(&self, input: &SourceInput) -> Result<Vec<Gav>, SourceError> {
        let url = input.as_url().ok_or_else(|| SourceError::Unresolvable {
            input: input.as_str().to_string(),
            detail: "not a URL".to_string(),
        })?;

        self.runner.ensure_available("gh")?;

        let title = self.fetch_field(url, "title").await?.first_line().to_string();
        if let Some(gav) = self.match_title(&title) {
            debug!(
                "Interpreted GitHub PR title \"{}\" as request for {}",
                title, gav
            );
            return Ok(vec![gav]);
        }
        debug!(
            "GitHub PR title \"{}\" does not name a single dependency, checking body",
            title
        );

        let body = self.fetch_field(url, "body").await?.out.join("\n");
        let gavs = self.match_body(&body);
        if gavs.is_empty() {
            return Err(SourceError::Unresolvable {
                input: url.to_string(),
                detail: format!(
                    "Got title: \"{}\". Got body: \"{}\". Is this a Dependabot or Renovate Pull Request? \
                     Does the title contain a single GroupId:ArtifactId, or the body a list of \
                     'Updates `groupId:artifactId` from $from to $version' lines?",
                    title, body
                ),
            });
        }

        Ok(gavs)
    }
}
