use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

// =============================================================================
// Defaults
// =============================================================================

/// Default Maven repository root
pub const DEFAULT_REPOSITORY_URL: &str = "https://repo.maven.apache.org/maven2/";

/// Timeout for a single metadata fetch in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Default number of metadata fetches running at the same time
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

/// Default `includeScope` passed to the dependency listing
pub const DEFAULT_INCLUDE_SCOPE: &str = "runtime";

/// Prefix shared by every environment override
const ENV_PREFIX: &str = "GAV_CHECKER_";

/// Tool configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Maven repository root; takes precedence over `--repository` when set
    pub repository_url: Option<String>,
    /// Accept invalid TLS certificates from the repository
    pub skip_tls_validation: bool,
    pub manifest: ManifestConfig,
    pub fetch: FetchConfig,
}

/// Options forwarded to the manifest dependency listing
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ManifestConfig {
    pub transitive_deps: bool,
    pub include_scope: String,
    pub include_parent_pom: bool,
    /// URL schemes accepted for manifest URLs
    pub supported_protocols: Vec<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            transitive_deps: false,
            include_scope: DEFAULT_INCLUDE_SCOPE.to_string(),
            include_parent_pom: false,
            supported_protocols: vec!["file".to_string(), "http".to_string(), "https".to_string()],
        }
    }
}

/// Metadata fetch configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FetchConfig {
    pub timeout_ms: u64,
    /// Zero means unbounded
    pub max_concurrent: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: FETCH_TIMEOUT_MS,
            max_concurrent: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

impl Config {
    /// Load configuration: defaults, then the config file, then environment overrides
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(default_path) if default_path.is_file() => Self::from_file(&default_path)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading configuration from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `GAV_CHECKER_*` overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{}{}", ENV_PREFIX, name)).filter(|v| !v.trim().is_empty())
        };

        if let Some(url) = var("REPOSITORY_URL") {
            self.repository_url = Some(url);
        }
        if let Some(value) = var("SKIP_TLS_VALIDATION") {
            self.skip_tls_validation = parse_value("SKIP_TLS_VALIDATION", &value)?;
        }
        if let Some(value) = var("TRANSITIVE_DEPS") {
            self.manifest.transitive_deps = parse_value("TRANSITIVE_DEPS", &value)?;
        }
        if let Some(value) = var("INCLUDE_SCOPE") {
            self.manifest.include_scope = value;
        }
        if let Some(value) = var("INCLUDE_PARENT_POM") {
            self.manifest.include_parent_pom = parse_value("INCLUDE_PARENT_POM", &value)?;
        }
        if let Some(value) = var("SUPPORTED_PROTOCOLS") {
            self.manifest.supported_protocols = value
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
        }
        if let Some(value) = var("FETCH_TIMEOUT_MS") {
            self.fetch.timeout_ms = parse_value("FETCH_TIMEOUT_MS", &value)?;
        }
        if let Some(value) = var("MAX_CONCURRENT_FETCHES") {
            self.fetch.max_concurrent = parse_value("MAX_CONCURRENT_FETCHES", &value)?;
        }

        Ok(())
    }

    /// Repository root to query: the configured URL wins over `cli_root`
    ///
    /// Trailing slashes are trimmed.
    pub fn repository_root(&self, cli_root: &str) -> String {
        self.repository_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(cli_root)
            .trim_end_matches('/')
            .to_string()
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: format!("{}{}", ENV_PREFIX, key),
        value: value.to_string(),
    })
}

/// Returns the default config file location.
/// Uses $XDG_CONFIG_HOME/gav-checker/config.json if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/gav-checker/config.json.
pub fn default_config_path() -> Option<PathBuf> {
    config_path_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

fn config_path_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> Option<PathBuf> {
    xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .map(|dir| dir.join("gav-checker").join("config.json"))
}
