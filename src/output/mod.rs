//! Report rendering
//!
//! This module provides:
//! - `human`: Plain text, one paragraph per identifier
//! - `json`: Pretty-printed JSON document
//! - `xml`: XML document
//!
//! Every reporter truncates version listings to the requested count
//! (see [`VersionIndex::limited`](crate::version::types::VersionIndex::limited)).

pub mod human;
pub mod json;
pub mod xml;

use std::fmt;
use std::io::{self, Write};

pub use human::HumanReporter;
pub use json::JsonReporter;
pub use xml::XmlReporter;

use crate::check::ResolutionReport;

/// Renders a [`ResolutionReport`] to a writer
pub trait Reporter: Send + Sync {
    /// Write `report`, listing at most `count` versions per identifier (negative: all)
    fn write_report(
        &self,
        report: &ResolutionReport,
        count: i32,
        out: &mut dyn Write,
    ) -> io::Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Xml,
}

impl OutputFormat {
    pub fn reporter(self) -> Box<dyn Reporter> {
        match self {
            OutputFormat::Human => Box::new(HumanReporter),
            OutputFormat::Json => Box::new(JsonReporter),
            OutputFormat::Xml => Box::new(XmlReporter),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Xml => write!(f, "xml"),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use indexmap::IndexMap;

    use crate::check::{ResolutionReport, ResolutionResult};
    use crate::gav::Gav;
    use crate::version::types::VersionIndex;

    pub const ROOT: &str = "https://repo.example.com/maven2";

    pub fn slf4j_index() -> VersionIndex {
        VersionIndex::new(
            "2.0.12",
            "2.0.12",
            vec![
                "2.0.12".to_string(),
                "2.0.11".to_string(),
                "2.0.10".to_string(),
            ],
        )
    }

    /// One exact hit, one exact miss and one listing
    pub fn sample_report() -> ResolutionReport {
        let mut results = IndexMap::new();
        results.insert(
            Gav::versioned("org.slf4j", "slf4j-api", "2.0.12"),
            ResolutionResult {
                exact_match: true,
                available: true,
                version_index: VersionIndex::single("2.0.12"),
            },
        );
        results.insert(
            Gav::versioned("org.slf4j", "slf4j-api", "9.9.9"),
            ResolutionResult {
                exact_match: true,
                available: false,
                version_index: slf4j_index(),
            },
        );
        results.insert(
            Gav::unversioned("org.slf4j", "slf4j-api"),
            ResolutionResult {
                exact_match: false,
                available: true,
                version_index: slf4j_index(),
            },
        );
        ResolutionReport::new(ROOT, results)
    }

    pub fn render(reporter: &dyn super::Reporter, report: &ResolutionReport, count: i32) -> String {
        let mut out = Vec::new();
        reporter.write_report(report, count, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }
}
