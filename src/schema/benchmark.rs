//! Benchmark configuration and result types.

use serde::{Deserialize, Serialize};

use super::{ConfigError, FitnessStrategy, OptimizerConfig};

/// Configuration for repeated, timed optimization runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Target string shared by every run.
    #[serde(default = "default_target")]
    pub target: String,
    /// Generation budget per run.
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
    /// Population sizes to sweep.
    #[serde(default = "default_population_sizes")]
    pub population_sizes: Vec<usize>,
    /// Fitness strategies to sweep.
    #[serde(default = "default_strategies")]
    pub strategies: Vec<FitnessStrategy>,
    /// Runs per (strategy, population size) combination.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Base seed; each run derives its own seed from it.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

fn default_target() -> String {
    "How many?".to_string()
}
fn default_max_generations() -> usize {
    5000
}
fn default_population_sizes() -> Vec<usize> {
    vec![10, 20, 50, 100]
}
fn default_strategies() -> Vec<FitnessStrategy> {
    FitnessStrategy::ALL.to_vec()
}
fn default_iterations() -> usize {
    10
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            max_generations: default_max_generations(),
            population_sizes: default_population_sizes(),
            strategies: default_strategies(),
            iterations: default_iterations(),
            random_seed: None,
        }
    }
}

impl BenchmarkConfig {
    /// Optimizer configuration for one run of the sweep.
    pub fn optimizer_config(
        &self,
        strategy: FitnessStrategy,
        population_size: usize,
        seed: Option<u64>,
    ) -> OptimizerConfig {
        OptimizerConfig {
            random_seed: seed,
            ..OptimizerConfig::new(
                self.target.clone(),
                population_size,
                self.max_generations,
                strategy,
            )
        }
    }

    /// Validate the sweep, including every optimizer configuration it produces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::InvalidIterations);
        }
        if self.population_sizes.is_empty() {
            return Err(ConfigError::NoPopulationSizes);
        }
        if self.strategies.is_empty() {
            return Err(ConfigError::NoStrategies);
        }
        for &strategy in &self.strategies {
            for &size in &self.population_sizes {
                self.optimizer_config(strategy, size, None).validate()?;
            }
        }
        Ok(())
    }
}

/// One timed optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub strategy: FitnessStrategy,
    pub population_size: usize,
    pub reached: bool,
    pub generations: usize,
    pub elapsed_seconds: f64,
}

/// Aggregate over all runs sharing a strategy and population size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub strategy: FitnessStrategy,
    pub population_size: usize,
    pub runs: usize,
    pub reached: usize,
    /// Fraction of runs that reached the target.
    pub success_rate: f64,
    pub mean_generations: f64,
    pub mean_elapsed_seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_benchmark_valid() {
        assert!(BenchmarkConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_sweeps_rejected() {
        let config = BenchmarkConfig {
            iterations: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidIterations));

        let config = BenchmarkConfig {
            population_sizes: vec![],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoPopulationSizes));

        let config = BenchmarkConfig {
            population_sizes: vec![10, 15],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::OddPopulationSize(15)));
    }

    #[test]
    fn test_optimizer_config_carries_sweep_settings() {
        let bench = BenchmarkConfig::default();
        let config = bench.optimizer_config(FitnessStrategy::EditDistance, 20, Some(3));
        assert_eq!(config.target, "How many?");
        assert_eq!(config.population_size, 20);
        assert_eq!(config.max_generations, 5000);
        assert_eq!(config.fitness, FitnessStrategy::EditDistance);
        assert_eq!(config.random_seed, Some(3));
    }
}
