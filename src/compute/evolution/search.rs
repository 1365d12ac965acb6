//! Genetic optimizer driving a population of strings towards a target.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::schema::{
    ConfigError, Genome, OptimizationOutcome, OptimizerConfig, OptimizerPhase, WeightedGenome,
};

use super::fitness::{FitnessFunction, fitness_function};
use super::genome::{GenomeError, GenomeRng};

/// Snapshot handed to the progress callback after each generation is scored.
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport<'a> {
    /// Zero-based generation index.
    pub generation: usize,
    /// Fittest genome of the generation.
    pub fittest: &'a Genome,
    /// Fitness of `fittest`.
    pub fitness: f64,
    /// Fitness of an exact match.
    pub target_fitness: f64,
    pub phase: OptimizerPhase,
}

/// Genetic optimizer for a single run.
///
/// The population is seeded at construction; [`Optimizer::optimize`] consumes
/// the optimizer, so each instance performs exactly one run.
pub struct Optimizer {
    config: OptimizerConfig,
    target: Genome,
    fitness: Box<dyn FitnessFunction>,
    rng: GenomeRng,
    population: Vec<Genome>,
    phase: OptimizerPhase,
    cancelled: Arc<AtomicBool>,
}

impl Optimizer {
    /// Create an optimizer using the configured fitness strategy.
    pub fn new(config: OptimizerConfig) -> Result<Self, ConfigError> {
        let fitness = fitness_function(config.fitness, config.edit_costs);
        Self::with_fitness(config, fitness)
    }

    /// Create an optimizer with a custom fitness function.
    ///
    /// `config.fitness` is ignored in favour of `fitness`.
    pub fn with_fitness(
        config: OptimizerConfig,
        fitness: Box<dyn FitnessFunction>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = config.random_seed.unwrap_or_else(rand::random);
        let mut rng = GenomeRng::new(seed);
        let target = Genome::from(config.target.as_str());

        if !target.is_printable_ascii() {
            warn!(
                "Target '{}' contains characters outside printable ASCII; \
                 mutation can never produce them",
                target
            );
        }

        let population = (0..config.population_size)
            .map(|_| rng.random_genome(target.len()))
            .collect();
        debug!(
            "Seeded {} genomes of length {} (seed {})",
            config.population_size,
            target.len(),
            seed
        );

        Ok(Self {
            config,
            target,
            fitness,
            rng,
            population,
            phase: OptimizerPhase::Initialized,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get cancellation handle, checked once per generation.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub fn phase(&self) -> OptimizerPhase {
        self.phase
    }

    /// Length every genome shares with the target.
    pub fn dna_size(&self) -> usize {
        self.target.len()
    }

    /// Current population.
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// Score every genome, preserving population order.
    fn weigh(&self, population: Vec<Genome>) -> Result<Vec<WeightedGenome>, GenomeError> {
        let fitness = self.fitness.as_ref();
        let target = &self.target;

        population
            .into_par_iter()
            .map(|genome| {
                let fitness = fitness.fitness(&genome, target)?;
                Ok(WeightedGenome { genome, fitness })
            })
            .collect()
    }

    /// Breed the next population from the current weighted population.
    fn breed(&mut self, weighted: &[WeightedGenome]) -> Result<Vec<Genome>, GenomeError> {
        let rate = self.config.mutation_rate;
        let mut next = Vec::with_capacity(self.config.population_size);

        for _ in 0..self.config.population_size / 2 {
            let mother = self
                .rng
                .weighted_choice(weighted)
                .ok_or(GenomeError::EmptyPopulation)?;
            let father = self
                .rng
                .weighted_choice(weighted)
                .ok_or(GenomeError::EmptyPopulation)?;

            let mother = self.rng.mutate(mother, rate);
            let father = self.rng.mutate(father, rate);

            let (first, second) = self.rng.crossover(&mother, &father)?;
            next.push(first);
            next.push(second);
        }

        Ok(next)
    }

    /// Run the optimization (blocking).
    pub fn optimize(self) -> Result<OptimizationOutcome, GenomeError> {
        self.optimize_with_callback(|_| {})
    }

    /// Run the optimization, reporting every scored generation.
    pub fn optimize_with_callback<F>(
        mut self,
        mut callback: F,
    ) -> Result<OptimizationOutcome, GenomeError>
    where
        F: FnMut(&GenerationReport<'_>),
    {
        let start_time = Instant::now();
        let max_generations = self.config.max_generations;
        let target_fitness = self.fitness.fitness(&self.target, &self.target)?;

        info!(
            "Optimizing towards '{}' with {} genomes using {} fitness (max {} generations)",
            self.target,
            self.config.population_size,
            self.fitness.name(),
            max_generations
        );

        if max_generations == 0 {
            info!("No generations budgeted, target was not reached");
            return Ok(OptimizationOutcome::exhausted(0));
        }

        let initial = std::mem::take(&mut self.population);
        let mut weighted = self.weigh(initial)?;
        self.phase = OptimizerPhase::Running;

        for generation in 0..max_generations {
            if self.cancelled.load(Ordering::Relaxed) {
                warn!("Optimizer cancelled after {} generations", generation);
                return Ok(OptimizationOutcome::cancelled(generation));
            }

            let next = self.breed(&weighted)?;
            weighted = self.weigh(next)?;

            let best = fittest(&weighted).ok_or(GenomeError::EmptyPopulation)?;
            if best.fitness == target_fitness {
                self.phase = OptimizerPhase::Converged;
            } else if generation + 1 == max_generations {
                self.phase = OptimizerPhase::Exhausted;
            }

            callback(&GenerationReport {
                generation,
                fittest: &best.genome,
                fitness: best.fitness,
                target_fitness,
                phase: self.phase,
            });

            if self.phase == OptimizerPhase::Converged {
                info!(
                    "Target '{}' reached in {} generations ({:.2?})",
                    best.genome,
                    generation,
                    start_time.elapsed()
                );
                return Ok(OptimizationOutcome::converged(generation));
            }

            if generation % self.config.progress_interval == 0 {
                info!(
                    "Fittest candidate after {} generations = {} with a fitness of {}",
                    generation, best.genome, best.fitness
                );
            } else {
                debug!(
                    "Generation {}: fittest {} ({})",
                    generation, best.genome, best.fitness
                );
            }
        }

        info!(
            "Target was not reached after {} generations ({:.2?}), stopping optimizer",
            max_generations,
            start_time.elapsed()
        );
        Ok(OptimizationOutcome::exhausted(max_generations))
    }
}

/// Fittest genome by strict comparison; ties keep the earliest.
fn fittest(weighted: &[WeightedGenome]) -> Option<&WeightedGenome> {
    weighted.iter().fold(None, |best, candidate| match best {
        Some(b) if b.fitness >= candidate.fitness => Some(b),
        _ => Some(candidate),
    })
}
