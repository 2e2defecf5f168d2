//! Plain text report

use std::io::{self, Write};

use crate::check::{ResolutionReport, ResolutionResult};
use crate::gav::Gav;
use crate::output::Reporter;

pub struct HumanReporter;

impl HumanReporter {
    fn write_entry(
        gav: &Gav,
        result: &ResolutionResult,
        repo_root: &str,
        count: i32,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let index = &result.version_index;

        if let Some(matched) = result.matched_version() {
            return writeln!(out, "{} is available as {} in {}", gav, matched, repo_root);
        }

        if result.exact_match {
            writeln!(out, "{} is NOT available in {}.", gav, repo_root)?;
            writeln!(out, "available:")?;
            for version in index.limited(count) {
                writeln!(out, "\t{}", version)?;
            }
            return Ok(());
        }

        writeln!(out, "{}", gav)?;
        writeln!(out, "latest:\t\t{}", index.latest)?;
        writeln!(out, "release:\t{}", index.release)?;
        writeln!(out, "available:")?;
        for version in index.limited(count) {
            writeln!(out, "\t\t{}", version)?;
        }
        Ok(())
    }
}

impl Reporter for HumanReporter {
    fn write_report(
        &self,
        report: &ResolutionReport,
        count: i32,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        for (gav, result) in report.iter() {
            Self::write_entry(gav, result, &report.repo_root, count, out)?;
        }
        out.flush()
    }
}
