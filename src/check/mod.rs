//! Resolution engine
//!
//! Checks every identifier against the repository concurrently and gathers
//! the outcomes into a [`ResolutionReport`].
//!
//! # Modules
//!
//! - [`processor`]: fan-out/fan-in over identifiers
//! - [`result`]: per-identifier results and the aggregated report

pub mod processor;
pub mod result;

pub use processor::{Processor, evaluate};
pub use result::{ResolutionReport, ResolutionResult};
