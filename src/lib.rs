pub mod check;
pub mod config;
pub mod gav;
pub mod logging;
pub mod output;
pub mod process;
pub mod source;
pub mod version;
