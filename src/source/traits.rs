//! Source resolver trait definition

use reqwest::Url;

use crate::gav::{Gav, GavParseError};
use crate::process::ProcessError;

/// A raw input classified as either a URL or a literal identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceInput {
    Url(Url),
    Literal(String),
}

impl SourceInput {
    /// Classify `raw`
    ///
    /// Only absolute URLs with a host (or `file:` URLs) count as URLs;
    /// `org.slf4j:slf4j-api:2.0.12` is technically an opaque URI and stays a literal.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match Url::parse(raw) {
            Ok(url) if url.has_host() || url.scheme() == "file" => SourceInput::Url(url),
            _ => SourceInput::Literal(raw.to_string()),
        }
    }

    pub fn as_url(&self) -> Option<&Url> {
        match self {
            SourceInput::Url(url) => Some(url),
            SourceInput::Literal(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SourceInput::Url(url) => url.as_str(),
            SourceInput::Literal(raw) => raw,
        }
    }
}

/// Trait for expanding one class of input into dependency identifiers
#[async_trait::async_trait]
pub trait SourceResolver: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Check if this resolver can handle the given input
    fn applies(&self, input: &SourceInput) -> bool;

    /// Expand the input into zero or more identifiers
    async fn resolve(&self, input: &SourceInput) -> Result<Vec<Gav>, SourceError>;
}

/// Error type for source resolution; fatal for the one input that caused it
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Parse(#[from] GavParseError),

    /// No resolver accepted the input, or its content was not understood
    #[error("{input} was not understandable: {detail}")]
    Unresolvable { input: String, detail: String },

    #[error(transparent)]
    ExternalTool(#[from] ProcessError),

    #[error("Failed to download {url}: {source}")]
    Download { url: String, source: reqwest::Error },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
