//! Evolutionary search module for approximating a target string.
//!
//! # Overview
//!
//! The evolutionary search system consists of:
//!
//! - **Fitness Functions** (`fitness`): Pluggable strategies scoring candidates
//! - **Genome Operations** (`genome`): Random generation, crossover, and mutation
//! - **Selection** (`selection`): Fitness-proportionate parent draws
//! - **Search** (`search`): The generation loop and convergence detection
//! - **Benchmark** (`benchmark`): Timed sweeps over strategies and population sizes
//!
//! # Example
//!
//! ```rust,no_run
//! use string_evolve::compute::evolution::Optimizer;
//! use string_evolve::schema::{FitnessStrategy, OptimizerConfig};
//!
//! let config = OptimizerConfig::new("Hello", 200, 1000, FitnessStrategy::EditDistance)
//!     .with_seed(42);
//!
//! let optimizer = Optimizer::new(config).expect("valid configuration");
//! let outcome = optimizer
//!     .optimize_with_callback(|report| {
//!         println!("Generation {}: {} ({:.3})",
//!             report.generation, report.fittest, report.fitness);
//!     })
//!     .expect("genomes share the target length");
//!
//! println!("Reached: {} after {} generations", outcome.reached, outcome.generations);
//! ```
//!
//! # Fitness Strategies
//!
//! - `CharacterDistance`: `1 / (1 + Σ |code point differences|)`
//! - `EditDistance`: `1 / (1 + levenshtein distance)`

mod benchmark;
mod fitness;
mod genome;
mod search;
mod selection;

pub use benchmark::{
    BenchmarkError, CSV_HEADER, run_benchmark, run_benchmark_with_callback, save_csv, save_json,
    summarize, write_csv,
};
pub use fitness::{
    CharacterDistance, EditDistance, FitnessFunction, character_distance, fitness_function,
    levenshtein,
};
pub use genome::{GenomeError, GenomeRng, PRINTABLE_MAX, PRINTABLE_MIN, crossover_at};
pub use search::{GenerationReport, Optimizer};
