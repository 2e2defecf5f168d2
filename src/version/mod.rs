//! Version metadata layer
//!
//! Fetches published version lists from a Maven repository and decides whether
//! a requested version is available.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│VersionIndex │────▶│   Matcher   │
//! │  (fetch)    │     │ (metadata)  │     │(containment)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ Registries  │
//! │   (maven)   │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`registry`]: Registry trait for fetching version metadata
//! - [`registries`]: Concrete registry implementations (Maven 2 layout)
//! - [`matcher`]: Prefix-based version containment
//! - [`error`]: Error types for registry operations
//! - [`types`]: `VersionIndex`

pub mod error;
pub mod matcher;
pub mod registries;
pub mod registry;
pub mod types;
