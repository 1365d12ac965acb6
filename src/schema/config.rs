//! Configuration types for genetic string optimization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fitness strategy used to score candidates against the target.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FitnessStrategy {
    /// Sum of per-position code point distances.
    #[default]
    #[serde(alias = "unicode")]
    CharacterDistance,
    /// Levenshtein edit distance.
    #[serde(alias = "levenshtein")]
    EditDistance,
}

impl FitnessStrategy {
    /// All available strategies.
    pub const ALL: [FitnessStrategy; 2] = [Self::CharacterDistance, Self::EditDistance];

    /// Stable identifier used in logs and result tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CharacterDistance => "character_distance",
            Self::EditDistance => "edit_distance",
        }
    }
}

impl fmt::Display for FitnessStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-operation costs for the edit distance computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCosts {
    /// Cost of deleting a character from the candidate.
    pub deletion: usize,
    /// Cost of inserting a character into the candidate.
    pub insertion: usize,
    /// Cost of substituting one character for another.
    pub substitution: usize,
}

impl Default for EditCosts {
    fn default() -> Self {
        Self {
            deletion: 1,
            insertion: 1,
            substitution: 1,
        }
    }
}

/// Top-level configuration for a single optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// String the population evolves towards.
    pub target: String,
    /// Number of genomes per generation. Must be even and at least 2.
    pub population_size: usize,
    /// Generation budget. Zero reports failure without breeding.
    pub max_generations: usize,
    /// Fitness strategy.
    #[serde(default)]
    pub fitness: FitnessStrategy,
    /// Probability of redrawing each character during mutation.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Costs for the edit distance strategy.
    #[serde(default)]
    pub edit_costs: EditCosts,
    /// Log the fittest genome every N generations.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

fn default_mutation_rate() -> f64 {
    0.01
}

fn default_progress_interval() -> usize {
    10
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            target: "How many?".to_string(),
            population_size: 200,
            max_generations: 1000,
            fitness: FitnessStrategy::default(),
            mutation_rate: default_mutation_rate(),
            edit_costs: EditCosts::default(),
            progress_interval: default_progress_interval(),
            random_seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Create a configuration with default mutation, costs and reporting.
    pub fn new(
        target: impl Into<String>,
        population_size: usize,
        max_generations: usize,
        fitness: FitnessStrategy,
    ) -> Self {
        Self {
            target: target.into(),
            population_size,
            max_generations,
            fitness,
            ..Default::default()
        }
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Set the per-character mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Set the edit distance costs.
    pub fn with_edit_costs(mut self, costs: EditCosts) -> Self {
        self.edit_costs = costs;
        self
    }

    /// Set how often progress is logged.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Number of characters in the target.
    #[inline]
    pub fn dna_size(&self) -> usize {
        self.target.chars().count()
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.is_empty() {
            return Err(ConfigError::EmptyTarget);
        }
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.population_size % 2 != 0 {
            return Err(ConfigError::OddPopulationSize(self.population_size));
        }
        if !(self.mutation_rate > 0.0 && self.mutation_rate <= 1.0) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        let costs = &self.edit_costs;
        if costs.deletion == 0 || costs.insertion == 0 || costs.substitution == 0 {
            return Err(ConfigError::InvalidEditCosts);
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::InvalidProgressInterval);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Target string must be non-empty")]
    EmptyTarget,
    #[error("Population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("Population size must be even so parents pair up, got {0}")]
    OddPopulationSize(usize),
    #[error("Mutation rate must be in (0, 1], got {0}")]
    InvalidMutationRate(f64),
    #[error("Edit costs must all be positive")]
    InvalidEditCosts,
    #[error("Progress interval must be non-zero")]
    InvalidProgressInterval,
    #[error("Benchmark iterations must be non-zero")]
    InvalidIterations,
    #[error("Benchmark needs at least one population size")]
    NoPopulationSizes,
    #[error("Benchmark needs at least one fitness strategy")]
    NoStrategies,
}
