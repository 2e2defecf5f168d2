//! URLs pointing directly at a pom.xml

use std::sync::Arc;

use crate::gav::Gav;
use crate::source::manifest::ManifestProcessor;
use crate::source::traits::{SourceError, SourceInput, SourceResolver};

/// Resolves `file:`/`http(s):` URLs ending in `.xml` through the dependency listing
pub struct PomUrlResolver {
    processor: Arc<ManifestProcessor>,
}

impl PomUrlResolver {
    pub fn new(processor: Arc<ManifestProcessor>) -> Self {
        Self { processor }
    }
}

#[async_trait::async_trait]
impl SourceResolver for PomUrlResolver {
    fn name(&self) -> &'static str {
        "pom-url"
    }

    fn applies(&self, input: &SourceInput) -> bool {
        input.as_url().is_some_and(|url| {
            self.processor
                .options()
                .supported_protocols
                .iter()
                .any(|protocol| protocol == url.scheme())
                && url.path().ends_with(".xml")
        })
    }

    async fn resolve(&self, input: &SourceInput) -> Result<Vec<Gav>, SourceError> {
        let url = input.as_url().ok_or_else(|| SourceError::Unresolvable {
            input: input.as_str().to_string(),
            detail: "not a URL".to_string(),
        })?;
        self.processor.process_url(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ManifestConfig;
    use crate::process::MockCommandRunner;
    use rstest::rstest;

    fn resolver(protocols: &[&str]) -> PomUrlResolver {
        let options = ManifestConfig {
            supported_protocols: protocols.iter().map(|p| p.to_string()).collect(),
            ..ManifestConfig::default()
        };
        PomUrlResolver::new(Arc::new(ManifestProcessor::new(
            Arc::new(MockCommandRunner::new()),
            options,
        )))
    }

    #[rstest]
    #[case("https://example.com/project/pom.xml", true)]
    #[case("http://example.com/project/custom-pom.xml", true)]
    #[case("file:///home/user/project/pom.xml", true)]
    #[case("https://example.com/project/build.gradle", false)]
    #[case("ftp://example.com/project/pom.xml", false)]
    #[case("org.slf4j:slf4j-api", false)]
    fn applies_to_supported_manifest_urls(#[case] raw: &str, #[case] expected: bool) {
        let resolver = resolver(&["file", "http", "https"]);

        assert_eq!(resolver.applies(&SourceInput::parse(raw)), expected);
    }

    #[test]
    fn applies_honours_configured_protocols() {
        let resolver = resolver(&["https"]);

        assert!(!resolver.applies(&SourceInput::parse("file:///tmp/pom.xml")));
        assert!(resolver.applies(&SourceInput::parse("https://example.com/pom.xml")));
    }
}
