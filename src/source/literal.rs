//! Literal `group:artifact[:version]` inputs

use crate::gav::Gav;
use crate::source::traits::{SourceError, SourceInput, SourceResolver};

/// Fallback resolver for every non-URL input
#[derive(Debug, Default, Clone)]
pub struct LiteralGavResolver;

#[async_trait::async_trait]
impl SourceResolver for LiteralGavResolver {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn applies(&self, input: &SourceInput) -> bool {
        matches!(input, SourceInput::Literal(_))
    }

    async fn resolve(&self, input: &SourceInput) -> Result<Vec<Gav>, SourceError> {
        Ok(vec![input.as_str().parse()?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolve_parses_literal() {
        let input = SourceInput::parse("org.slf4j:slf4j-api:2.0.12");

        let result = LiteralGavResolver.resolve(&input).await.unwrap();

        assert_eq!(result, vec![Gav::versioned("org.slf4j", "slf4j-api", "2.0.12")]);
    }

    #[tokio::test]
    async fn resolve_rejects_malformed_literal() {
        let input = SourceInput::parse("org.slf4j");

        let result = LiteralGavResolver.resolve(&input).await;

        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[test]
    fn applies_only_to_literals() {
        assert!(LiteralGavResolver.applies(&SourceInput::parse("a:b")));
        assert!(!LiteralGavResolver.applies(&SourceInput::parse("https://github.com/a/b")));
    }
}
