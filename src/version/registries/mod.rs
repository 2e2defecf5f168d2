//! Registry implementations for fetching artifact version metadata

pub mod maven;

pub use maven::MavenRegistry;
