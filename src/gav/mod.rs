//! Dependency identifier layer
//! - types.rs: `Gav` (group, artifact, optional version) and its textual grammar

pub mod types;

pub use types::{Gav, GavParseError};
