//! Ordered source resolver dispatch
//!
//! Resolvers are tried in registration order and the first one whose
//! `applies` accepts the input produces its identifiers; no other resolver
//! runs. The default order is:
//!
//! 1. GitHub pull request
//! 2. GitHub repository
//! 3. pom.xml URL
//! 4. literal identifier

use std::sync::Arc;

use indexmap::IndexSet;
use tracing::{debug, error, trace};

use crate::config::ManifestConfig;
use crate::gav::Gav;
use crate::process::CommandRunner;
use crate::source::github_pr::GitHubPullRequestResolver;
use crate::source::github_repo::GitHubRepositoryResolver;
use crate::source::literal::LiteralGavResolver;
use crate::source::manifest::ManifestProcessor;
use crate::source::pom_url::PomUrlResolver;
use crate::source::traits::{SourceError, SourceInput, SourceResolver};

/// Outcome of resolving a batch of raw inputs
#[derive(Debug, Default)]
pub struct ResolvedInputs {
    /// Distinct identifiers in order of first appearance
    pub gavs: Vec<Gav>,
    /// Inputs that could not be resolved, with the reason
    pub failures: Vec<(String, SourceError)>,
}

pub struct SourceRegistry {
    resolvers: Vec<Arc<dyn SourceResolver>>,
}

impl SourceRegistry {
    pub fn new(resolvers: Vec<Arc<dyn SourceResolver>>) -> Self {
        Self { resolvers }
    }

    /// Create the default resolver chain
    pub fn with_defaults(runner: Arc<dyn CommandRunner>, options: ManifestConfig) -> Self {
        let processor = Arc::new(ManifestProcessor::new(runner.clone(), options));
        Self::new(vec![
            Arc::new(GitHubPullRequestResolver::new(runner.clone())),
            Arc::new(GitHubRepositoryResolver::new(runner, processor.clone())),
            Arc::new(PomUrlResolver::new(processor)),
            Arc::new(LiteralGavResolver),
        ])
    }

    /// Resolver names in dispatch order
    pub fn resolver_names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    /// Resolve one raw input with the first applicable resolver
    pub async fn resolve(&self, raw: &str) -> Result<Vec<Gav>, SourceError> {
        let input = SourceInput::parse(raw);

        let Some(resolver) = self.resolvers.iter().find(|r| r.applies(&input)) else {
            return Err(SourceError::Unresolvable {
                input: input.as_str().to_string(),
                detail: "No matching resolver found for provided URL".to_string(),
            });
        };

        debug!("Resolving {} with {}", input.as_str(), resolver.name());
        resolver.resolve(&input).await
    }

    /// Resolve every input, collecting failures instead of stopping at the first one
    ///
    /// Identifiers produced more than once are kept only at their first position.
    pub async fn resolve_all<S: AsRef<str>>(&self, inputs: &[S]) -> ResolvedInputs {
        let mut gavs = IndexSet::new();
        let mut failures = Vec::new();

        for raw in inputs {
            let raw = raw.as_ref();
            match self.resolve(raw).await {
                Ok(resolved) => {
                    if resolved.is_empty() {
                        debug!("{} did not name any dependencies", raw);
                    }
                    gavs.extend(resolved);
                }
                Err(e) => {
                    error!("Failed to resolve {}: {}", raw, e);
                    failures.push((raw.to_string(), e));
                }
            }
        }

        let gavs: Vec<Gav> = gavs.into_iter().collect();
        trace!("Processing GAVs: {:?}", gavs);
        ResolvedInputs { gavs, failures }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::MockCommandRunner;

    /// Resolver accepting URLs on one host and returning fixed identifiers
    struct FixedResolver {
        name: &'static str,
        host: &'static str,
        gavs: Vec<Gav>,
    }

    #[async_trait::async_trait]
    impl SourceResolver for FixedResolver {
        fn name(&self) -> &'static str {
            self.name
        }

        fn applies(&self, input: &SourceInput) -> bool {
            input
                .as_url()
                .is_some_and(|url| url.host_str() == Some(self.host))
        }

        async fn resolve(&self, _input: &SourceInput) -> Result<Vec<Gav>, SourceError> {
            Ok(self.gavs.clone())
        }
    }

    fn fixed(name: &'static str, host: &'static str, gavs: Vec<Gav>) -> Arc<dyn SourceResolver> {
        Arc::new(FixedResolver { name, host, gavs })
    }

    #[test]
    fn default_order_is_explicit() {
        let registry =
            SourceRegistry::with_defaults(Arc::new(MockCommandRunner::new()), ManifestConfig::default());

        assert_eq!(
            registry.resolver_names(),
            vec!["github-pull-request", "github-repository", "pom-url", "literal"]
        );
    }

    #[tokio::test]
    async fn resolve_uses_first_applicable_resolver_only() {
        let registry = SourceRegistry::new(vec![
            fixed("first", "example.com", vec![Gav::versioned("a", "first", "1")]),
            fixed("second", "example.com", vec![Gav::versioned("a", "second", "1")]),
            Arc::new(LiteralGavResolver),
        ]);

        let result = registry.resolve("https://example.com/x").await.unwrap();

        assert_eq!(result, vec![Gav::versioned("a", "first", "1")]);
    }

    #[tokio::test]
    async fn resolve_rejects_url_without_matching_resolver() {
        let registry = SourceRegistry::new(vec![Arc::new(LiteralGavResolver)]);

        let result = registry.resolve("https://unknown.example.org/thing").await;

        assert!(matches!(result, Err(SourceError::Unresolvable { .. })));
    }

    #[tokio::test]
    async fn resolve_parses_literal_identifiers() {
        let registry = SourceRegistry::new(vec![Arc::new(LiteralGavResolver)]);

        let result = registry.resolve("org.slf4j:slf4j-api").await.unwrap();

        assert_eq!(result, vec![Gav::unversioned("org.slf4j", "slf4j-api")]);
    }

    #[tokio::test]
    async fn resolve_all_contains_failures_and_deduplicates() {
        let registry = SourceRegistry::new(vec![
            fixed(
                "fixed",
                "example.com",
                vec![
                    Gav::versioned("org.slf4j", "slf4j-api", "2.0.12"),
                    Gav::versioned("commons-io", "commons-io", "2.17.0"),
                ],
            ),
            Arc::new(LiteralGavResolver),
        ]);

        let result = registry
            .resolve_all(&[
                "org.slf4j:slf4j-api:2.0.12",
                "not-a-gav",
                "https://example.com/pom.xml",
                "info.picocli:picocli",
            ])
            .await;

        assert_eq!(
            result.gavs,
            vec![
                Gav::versioned("org.slf4j", "slf4j-api", "2.0.12"),
                Gav::versioned("commons-io", "commons-io", "2.17.0"),
                Gav::unversioned("info.picocli", "picocli"),
            ]
        );
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].0, "not-a-gav");
        assert!(matches!(result.failures[0].1, SourceError::Parse(_)));
    }
}
