//! Shared test utilities

pub mod registry;
pub mod runner;

#[allow(unused_imports)]
pub use registry::InMemoryRegistry;
#[allow(unused_imports)]
pub use runner::ScriptedRunner;
