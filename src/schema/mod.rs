//! Schema module - Configuration, genome and result types for optimization runs.

mod benchmark;
mod config;
mod evolution;

pub use benchmark::*;
pub use config::*;
pub use evolution::*;
