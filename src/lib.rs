//! String Evolve - Approximating a target string through genetic search.
//!
//! A population of random printable strings is scored against the target,
//! bred through fitness-proportionate selection, mutation and single-point
//! crossover, and replaced every generation until a candidate matches the
//! target exactly or the generation budget runs out.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, genome and result types
//! - `compute`: The optimizer, fitness strategies and benchmark harness
//!
//! # Example
//!
//! ```rust,no_run
//! use string_evolve::{FitnessStrategy, Optimizer, OptimizerConfig};
//!
//! let config = OptimizerConfig::new("How many?", 200, 1000, FitnessStrategy::CharacterDistance);
//! let outcome = Optimizer::new(config)
//!     .expect("valid configuration")
//!     .optimize()
//!     .expect("genomes share the target length");
//!
//! println!("Reached: {} in {} generations", outcome.reached, outcome.generations);
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{GenerationReport, GenomeError, Optimizer};
pub use schema::{ConfigError, FitnessStrategy, Genome, OptimizationOutcome, OptimizerConfig};
