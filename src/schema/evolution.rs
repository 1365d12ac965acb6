//! Genome and outcome types shared by the optimizer and its callers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A fixed-length candidate string.
///
/// Genomes are never modified in place: mutation and crossover always
/// produce new genomes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Genome(Vec<char>);

impl Genome {
    /// Create from characters.
    pub fn new(chars: Vec<char>) -> Self {
        Self(chars)
    }

    /// Number of characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Characters as a slice.
    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.0
    }

    /// Whether every character lies in printable ASCII (32..=126).
    pub fn is_printable_ascii(&self) -> bool {
        self.0.iter().all(|c| (' '..='~').contains(c))
    }
}

impl From<&str> for Genome {
    fn from(value: &str) -> Self {
        Self(value.chars().collect())
    }
}

impl From<String> for Genome {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Genome> for String {
    fn from(genome: Genome) -> Self {
        genome.0.into_iter().collect()
    }
}

impl FromIterator<char> for Genome {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// A genome paired with its fitness score for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedGenome {
    pub genome: Genome,
    pub fitness: f64,
}

/// Lifecycle phase of an optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizerPhase {
    /// Population seeded, no generation bred yet.
    Initialized,
    /// Breeding generations.
    Running,
    /// A genome matched the target.
    Converged,
    /// Generation budget spent without a match.
    Exhausted,
    /// Stopped through the cancellation handle.
    Cancelled,
}

/// Result of an optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    /// Whether a genome matched the target exactly.
    pub reached: bool,
    /// Generation index of the match, or generations spent otherwise.
    pub generations: usize,
    /// Terminal phase the run stopped in.
    pub phase: OptimizerPhase,
}

impl OptimizationOutcome {
    pub fn converged(generation: usize) -> Self {
        Self {
            reached: true,
            generations: generation,
            phase: OptimizerPhase::Converged,
        }
    }

    pub fn exhausted(generations: usize) -> Self {
        Self {
            reached: false,
            generations,
            phase: OptimizerPhase::Exhausted,
        }
    }

    pub fn cancelled(generations: usize) -> Self {
        Self {
            reached: false,
            generations,
            phase: OptimizerPhase::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genome_display() {
        let genome = Genome::from("hello world");
        assert_eq!(genome.len(), 11);
        assert_eq!(genome.to_string(), "hello world");
    }

    #[test]
    fn test_genome_serializes_as_string() {
        let genome = Genome::from("abc");
        let json = serde_json::to_string(&genome).unwrap();
        assert_eq!(json, "\"abc\"");
        let parsed: Genome = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, genome);
    }

    #[test]
    fn test_printable_ascii() {
        assert!(Genome::from(" ~Az09!").is_printable_ascii());
        assert!(!Genome::from("tab\there").is_printable_ascii());
        assert!(!Genome::from("héllo").is_printable_ascii());
    }

    #[test]
    fn test_outcome_phases() {
        let converged = OptimizationOutcome::converged(12);
        assert!(converged.reached);
        assert_eq!(converged.phase, OptimizerPhase::Converged);

        let exhausted = OptimizationOutcome::exhausted(50);
        assert!(!exhausted.reached);
        assert_eq!(exhausted.generations, 50);
        assert_eq!(exhausted.phase, OptimizerPhase::Exhausted);

        let cancelled = OptimizationOutcome::cancelled(3);
        assert!(!cancelled.reached);
        assert_eq!(cancelled.phase, OptimizerPhase::Cancelled);
        assert_ne!(cancelled, OptimizationOutcome::exhausted(3));
    }

    #[test]
    fn test_outcome_serializes_phase() {
        let json = serde_json::to_string(&OptimizationOutcome::exhausted(7)).unwrap();
        assert_eq!(json, r#"{"reached":false,"generations":7,"phase":"Exhausted"}"#);
    }
}
