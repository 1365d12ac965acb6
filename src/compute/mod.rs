//! Compute module - Genetic search over candidate strings.

pub mod evolution;

pub use evolution::{GenerationReport, GenomeError, GenomeRng, Optimizer};
