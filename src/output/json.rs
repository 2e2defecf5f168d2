//! JSON report
//!
//! ```json
//! {
//!   "repository": "https://repo.maven.apache.org/maven2",
//!   "results": [
//!     {
//!       "groupId": "org.slf4j",
//!       "artifactId": "slf4j-api",
//!       "version": "2.0.12",
//!       "exactMatch": true,
//!       "available": true,
//!       "versioning": { "latest": "2.0.12", "release": "2.0.12", "versions": ["2.0.12"] }
//!     }
//!   ]
//! }
//! ```

use std::io::{self, Write};

use serde::Serialize;

use crate::check::ResolutionReport;
use crate::gav::Gav;
use crate::output::Reporter;

pub struct JsonReporter;

#[derive(Serialize)]
struct JsonReport<'a> {
    repository: &'a str,
    results: Vec<JsonEntry<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonEntry<'a> {
    #[serde(flatten)]
    gav: &'a Gav,
    exact_match: bool,
    available: bool,
    versioning: JsonVersioning<'a>,
}

#[derive(Serialize)]
struct JsonVersioning<'a> {
    latest: &'a str,
    release: &'a str,
    versions: &'a [String],
}

impl<'a> JsonReport<'a> {
    fn new(report: &'a ResolutionReport, count: i32) -> Self {
        let results = report
            .iter()
            .map(|(gav, result)| JsonEntry {
                gav,
                exact_match: result.exact_match,
                available: result.available,
                versioning: JsonVersioning {
                    latest: &result.version_index.latest,
                    release: &result.version_index.release,
                    versions: result.version_index.limited(count),
                },
            })
            .collect();

        Self {
            repository: &report.repo_root,
            results,
        }
    }
}

impl Reporter for JsonReporter {
    fn write_report(
        &self,
        report: &ResolutionReport,
        count: i32,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, &JsonReport::new(report, count))?;
        writeln!(out)?;
        out.flush()
    }
}
