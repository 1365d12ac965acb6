//! Fitness function implementations for evolutionary string search.
//!
//! Provides pluggable fitness strategies for scoring candidate strings
//! against the target. Every strategy maps a candidate to a strictly positive
//! score where larger is better and an exact match scores the maximum.

use crate::schema::{EditCosts, FitnessStrategy, Genome};

use super::genome::{GenomeError, ensure_same_length};

/// Scores a candidate genome against the target.
pub trait FitnessFunction: Send + Sync {
    /// Strictly positive fitness; larger is better.
    fn fitness(&self, candidate: &Genome, target: &Genome) -> Result<f64, GenomeError>;

    /// Name used in logs.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Build the fitness function for a configured strategy.
pub fn fitness_function(strategy: FitnessStrategy, costs: EditCosts) -> Box<dyn FitnessFunction> {
    match strategy {
        FitnessStrategy::CharacterDistance => Box::new(CharacterDistance),
        FitnessStrategy::EditDistance => Box::new(EditDistance::new(costs)),
    }
}

/// Fitness from the summed code point distance of each position.
///
/// Score is `1 / (1 + distance)`, so identical strings score exactly 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterDistance;

impl FitnessFunction for CharacterDistance {
    fn fitness(&self, candidate: &Genome, target: &Genome) -> Result<f64, GenomeError> {
        let distance = character_distance(candidate, target)?;
        Ok(1.0 / (1.0 + distance as f64))
    }

    fn name(&self) -> &str {
        FitnessStrategy::CharacterDistance.as_str()
    }
}

/// Fitness from the Levenshtein distance to the target.
///
/// Score is `1 / (1 + distance)`. Candidates may differ in length from the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistance {
    costs: EditCosts,
}

impl EditDistance {
    pub fn new(costs: EditCosts) -> Self {
        Self { costs }
    }
}

impl FitnessFunction for EditDistance {
    fn fitness(&self, candidate: &Genome, target: &Genome) -> Result<f64, GenomeError> {
        let distance = levenshtein(candidate.chars(), target.chars(), &self.costs);
        Ok(1.0 / (1.0 + distance as f64))
    }

    fn name(&self) -> &str {
        FitnessStrategy::EditDistance.as_str()
    }
}

/// Sum of absolute code point differences per position.
pub fn character_distance(candidate: &Genome, target: &Genome) -> Result<u64, GenomeError> {
    ensure_same_length(target, candidate)?;

    Ok(candidate
        .chars()
        .iter()
        .zip(target.chars())
        .map(|(&c, &t)| (c as u32).abs_diff(t as u32) as u64)
        .sum())
}

/// Edit distance turning `source` into `target`.
///
/// Fills a `(|source| + 1) x (|target| + 1)` table, stored row-major, where
/// cell `(i, j)` is the cheapest edit of the first `i` source characters into
/// the first `j` target characters. Costs saturate at `usize::MAX`.
pub fn levenshtein(source: &[char], target: &[char], costs: &EditCosts) -> usize {
    let rows = source.len() + 1;
    let cols = target.len() + 1;
    let mut dist = vec![0usize; rows * cols];

    // Source prefixes shrink to the empty string by deletions
    for row in 1..rows {
        dist[row * cols] = row.saturating_mul(costs.deletion);
    }
    // Target prefixes grow from the empty string by insertions
    for col in 1..cols {
        dist[col] = col.saturating_mul(costs.insertion);
    }

    for row in 1..rows {
        for col in 1..cols {
            let substitution = if source[row - 1] == target[col - 1] {
                0
            } else {
                costs.substitution
            };

            let delete = dist[(row - 1) * cols + col].saturating_add(costs.deletion);
            let insert = dist[row * cols + col - 1].saturating_add(costs.insertion);
            let substitute = dist[(row - 1) * cols + col - 1].saturating_add(substitution);
            dist[row * cols + col] = delete.min(insert).min(substitute);
        }
    }

    dist[rows * cols - 1]
}
