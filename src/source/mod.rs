//! Source resolution layer
//!
//! Turns raw command-line inputs into dependency identifiers.
//! - traits.rs: `SourceResolver` trait, `SourceInput`, `SourceError`
//! - literal.rs: `group:artifact[:version]` literals
//! - manifest.rs: dependency listing of a pom.xml via `mvn dependency:list`
//! - pom_url.rs: URLs pointing at a pom.xml
//! - github_pr.rs: GitHub dependency-bump pull requests (Dependabot, Renovate)
//! - github_repo.rs: GitHub repositories (default branch pom.xml)
//! - registry.rs: ordered, first-match resolver dispatch

pub mod github_pr;
pub mod github_repo;
pub mod literal;
pub mod manifest;
pub mod pom_url;
pub mod registry;
pub mod traits;

pub use github_pr::GitHubPullRequestResolver;
pub use github_repo::GitHubRepositoryResolver;
pub use literal::LiteralGavResolver;
pub use manifest::ManifestProcessor;
pub use pom_url::PomUrlResolver;
pub use registry::{ResolvedInputs, SourceRegistry};
pub use traits::{SourceError, SourceInput, SourceResolver};
