//! Maven dependency identifiers
//!
//! Textual form: `group:artifact[:version]`, where every part consists of
//! alphanumerics, dots, underscores and hyphens (case-insensitive).
//!
//! - `org.slf4j:slf4j-api:2.0.12` checks whether version 2.0.12 is published
//! - `info.picocli:picocli` lists every published version

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static GAV_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<group>[a-z0-9._-]+):(?P<artifact>[a-z0-9._-]+)(?::(?P<version>[a-z0-9._-]+))?$")
        .unwrap()
});

/// Error returned when a literal identifier does not follow the GAV grammar
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("GAV {0} was not parseable")]
pub struct GavParseError(pub String);

/// A Maven dependency identifier
///
/// Equality and hashing cover all three fields, so `version: None` and
/// `version: Some("")` are distinct identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Gav {
    #[serde(rename = "groupId")]
    pub group: String,
    #[serde(rename = "artifactId")]
    pub artifact: String,
    pub version: Option<String>,
}

impl Gav {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>, version: Option<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version,
        }
    }

    /// Identifier requesting one specific version
    pub fn versioned(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self::new(group, artifact, Some(version.into()))
    }

    /// Identifier requesting the list of all published versions
    pub fn unversioned(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self::new(group, artifact, None)
    }

    /// True when this identifier asks about one exact version rather than the full listing
    pub fn is_exact(&self) -> bool {
        self.version.is_some()
    }
}

impl FromStr for Gav {
    type Err = GavParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = GAV_RE
            .captures(s)
            .ok_or_else(|| GavParseError(s.to_string()))?;

        Ok(Self {
            group: caps["group"].to_string(),
            artifact: caps["artifact"].to_string(),
            version: caps.name("version").map(|m| m.as_str().to_string()),
        })
    }
}

impl fmt::Display for Gav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}:{}", self.group, self.artifact, version),
            None => write!(f, "{}:{}", self.group, self.artifact),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("org.slf4j:slf4j-api:2.0.12", Gav::versioned("org.slf4j", "slf4j-api", "2.0.12"))]
    #[case("info.picocli:picocli", Gav::unversioned("info.picocli", "picocli"))]
    #[case("commons-io:commons-io:2.17.0", Gav::versioned("commons-io", "commons-io", "2.17.0"))]
    #[case("io.netty:netty-all:4.1.111.Final", Gav::versioned("io.netty", "netty-all", "4.1.111.Final"))]
    #[case("Org.Example:My_Lib:1.0-SNAPSHOT", Gav::versioned("Org.Example", "My_Lib", "1.0-SNAPSHOT"))]
    fn parse_accepts_valid_identifiers(#[case] input: &str, #[case] expected: Gav) {
        assert_eq!(input.parse::<Gav>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("org.slf4j")]
    #[case("org.slf4j:")]
    #[case("org.slf4j:slf4j-api:")]
    #[case("org.slf4j:slf4j-api:2.0:extra")]
    #[case("org/slf4j:slf4j-api")]
    #[case(" org.slf4j:slf4j-api")]
    fn parse_rejects_malformed_identifiers(#[case] input: &str) {
        assert_eq!(input.parse::<Gav>(), Err(GavParseError(input.to_string())));
    }

    #[test]
    fn parse_error_names_the_offending_input() {
        let err = "not a gav".parse::<Gav>().unwrap_err();
        assert_eq!(err.to_string(), "GAV not a gav was not parseable");
    }

    #[rstest]
    #[case("org.slf4j:slf4j-api:2.0.12")]
    #[case("info.picocli:picocli")]
    fn display_round_trips_parsed_input(#[case] input: &str) {
        assert_eq!(input.parse::<Gav>().unwrap().to_string(), input);
    }

    #[test]
    fn missing_and_empty_versions_are_distinct() {
        let none = Gav::unversioned("g", "a");
        let empty = Gav::new("g", "a", Some(String::new()));

        assert_ne!(none, empty);
        assert!(!none.is_exact());
        assert!(empty.is_exact());
    }
}
