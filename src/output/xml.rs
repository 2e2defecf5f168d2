//! XML report
//!
//! ```xml
//! <report>
//!   <repository>https://repo.maven.apache.org/maven2</repository>
//!   <results>
//!     <result groupId="org.slf4j" artifactId="slf4j-api" version="2.0.12">
//!       <exactMatch>true</exactMatch>
//!       <available>true</available>
//!       <versioning>
//!         <latest>2.0.12</latest>
//!         <release>2.0.12</release>
//!         <versions>
//!           <version>2.0.12</version>
//!         </versions>
//!       </versioning>
//!     </result>
//!   </results>
//! </report>
//! ```
//!
//! Listing entries carry no `version` attribute.

use std::borrow::Cow;
use std::io::{self, Write};

use crate::check::{ResolutionReport, ResolutionResult};
use crate::gav::Gav;
use crate::output::Reporter;

pub struct XmlReporter;

impl XmlReporter {
    fn write_result(
        gav: &Gav,
        result: &ResolutionResult,
        count: i32,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        write!(
            out,
            "    <result groupId=\"{}\" artifactId=\"{}\"",
            escape(&gav.group),
            escape(&gav.artifact)
        )?;
        if let Some(version) = &gav.version {
            write!(out, " version=\"{}\"", escape(version))?;
        }
        writeln!(out, ">")?;

        let index = &result.version_index;
        writeln!(out, "      <exactMatch>{}</exactMatch>", result.exact_match)?;
        writeln!(out, "      <available>{}</available>", result.available)?;
        writeln!(out, "      <versioning>")?;
        writeln!(out, "        <latest>{}</latest>", escape(&index.latest))?;
        writeln!(out, "        <release>{}</release>", escape(&index.release))?;
        writeln!(out, "        <versions>")?;
        for version in index.limited(count) {
            writeln!(out, "          <version>{}</version>", escape(version))?;
        }
        writeln!(out, "        </versions>")?;
        writeln!(out, "      </versioning>")?;
        writeln!(out, "    </result>")
    }
}

impl Reporter for XmlReporter {
    fn write_report(
        &self,
        report: &ResolutionReport,
        count: i32,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(out, "<report>")?;
        writeln!(out, "  <repository>{}</repository>", escape(&report.repo_root))?;
        writeln!(out, "  <results>")?;
        for (gav, result) in report.iter() {
            Self::write_result(gav, result, count, out)?;
        }
        writeln!(out, "  </results>")?;
        writeln!(out, "</report>")?;
        out.flush()
    }
}

/// Escape text for use in element content and double-quoted attributes
fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
