//! Genome manipulation utilities for evolutionary search.
//!
//! Provides random generation, crossover, and mutation operations.

use rand::prelude::*;

use crate::schema::Genome;

/// Lowest code point drawn for random characters.
pub const PRINTABLE_MIN: u8 = 32;
/// Highest code point drawn for random characters (inclusive).
pub const PRINTABLE_MAX: u8 = 126;

/// Genome invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenomeError {
    #[error("Genome length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("Cannot select from an empty population")]
    EmptyPopulation,
}

/// Check that two genomes have the same length.
pub(crate) fn ensure_same_length(expected: &Genome, found: &Genome) -> Result<(), GenomeError> {
    if expected.len() != found.len() {
        return Err(GenomeError::LengthMismatch {
            expected: expected.len(),
            found: found.len(),
        });
    }
    Ok(())
}

/// Random number generator wrapper for genome operations.
pub struct GenomeRng {
    pub(super) rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Random printable ASCII character.
    pub fn random_char(&mut self) -> char {
        char::from(self.rng.gen_range(PRINTABLE_MIN..=PRINTABLE_MAX))
    }

    /// Generate a random genome of `length` printable characters.
    pub fn random_genome(&mut self, length: usize) -> Genome {
        (0..length).map(|_| self.random_char()).collect()
    }

    /// Redraw each character independently with probability `rate`.
    ///
    /// A rate of 0 returns an identical genome; a rate of 1 redraws every
    /// position (a redraw may land on the original character).
    pub fn mutate(&mut self, genome: &Genome, rate: f64) -> Genome {
        genome
            .chars()
            .iter()
            .map(|&c| {
                if self.rng.r#gen::<f64>() < rate {
                    self.random_char()
                } else {
                    c
                }
            })
            .collect()
    }

    /// Single-point crossover at a uniformly drawn point in `[0, len)`.
    pub fn crossover(
        &mut self,
        first: &Genome,
        second: &Genome,
    ) -> Result<(Genome, Genome), GenomeError> {
        ensure_same_length(first, second)?;
        if first.is_empty() {
            return Ok((first.clone(), second.clone()));
        }

        let point = self.rng.gen_range(0..first.len());
        crossover_at(first, second, point)
    }

    /// Generate next u64 for seeding child RNGs.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen()
    }
}

/// Single-point crossover at a fixed point.
///
/// Returns `(first[..point] + second[point..], second[..point] + first[point..])`.
/// Points past the end are clamped to the genome length.
pub fn crossover_at(
    first: &Genome,
    second: &Genome,
    point: usize,
) -> Result<(Genome, Genome), GenomeError> {
    ensure_same_length(first, second)?;
    let point = point.min(first.len());

    let (first_head, first_tail) = first.chars().split_at(point);
    let (second_head, second_tail) = second.chars().split_at(point);

    let child1 = first_head.iter().chain(second_tail).copied().collect();
    let child2 = second_head.iter().chain(first_tail).copied().collect();
    Ok((child1, child2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_random_genome() {
        let mut rng = GenomeRng::new(42);
        let genome = rng.random_genome(500);

        assert_eq!(genome.len(), 500);
        assert!(genome.is_printable_ascii());
    }

    #[test]
    fn test_random_genome_reproducible() {
        let a = GenomeRng::new(7).random_genome(32);
        let b = GenomeRng::new(7).random_genome(32);
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_chars_cover_range_ends() {
        let mut rng = GenomeRng::new(1);
        let genome = rng.random_genome(20_000);
        assert!(genome.chars().contains(&' '));
        assert!(genome.chars().contains(&'~'));
    }

    #[test]
    fn test_mutation_zero_rate_is_identity() {
        let mut rng = GenomeRng::new(42);
        let genome = Genome::from("a test string");

        assert_eq!(rng.mutate(&genome, 0.0), genome);
    }

    #[test]
    fn test_mutation_full_rate_redraws() {
        let mut rng = GenomeRng::new(42);
        let genome = Genome::from("a test string with some length to it");

        let mutated = rng.mutate(&genome, 1.0);
        assert_eq!(mutated.len(), genome.len());

        // Redraws can land on the same character with probability 1/95 each
        let unchanged = mutated
            .chars()
            .iter()
            .zip(genome.chars())
            .filter(|(a, b)| a == b)
            .count();
        assert!(unchanged <= 5, "{unchanged} positions unchanged");
    }

    #[test]
    fn test_crossover() {
        let mut rng = GenomeRng::new(42);
        let father = Genome::from("crossover1");
        let mother = Genome::from("crossover2");

        let (child1, child2) = rng.crossover(&father, &mother).unwrap();
        assert_eq!(child1.len(), father.len());
        assert_eq!(child2.len(), father.len());
    }

    #[test]
    fn test_crossover_at_ends() {
        let a = Genome::from("aaaa");
        let b = Genome::from("bbbb");

        let (c1, c2) = crossover_at(&a, &b, 0).unwrap();
        assert_eq!(c1, b);
        assert_eq!(c2, a);

        let (c1, c2) = crossover_at(&a, &b, 3).unwrap();
        assert_eq!(c1.to_string(), "aaab");
        assert_eq!(c2.to_string(), "bbba");
    }

    #[test]
    fn test_crossover_length_mismatch() {
        let mut rng = GenomeRng::new(42);
        let short = Genome::from("abc");
        let long = Genome::from("abcd");

        assert_eq!(
            rng.crossover(&short, &long),
            Err(GenomeError::LengthMismatch {
                expected: 3,
                found: 4
            })
        );
    }

    proptest! {
        #[test]
        fn crossover_preserves_prefix_and_suffix(
            (a, b, point) in (1usize..40).prop_flat_map(|len| (
                proptest::collection::vec(proptest::char::range(' ', '~'), len),
                proptest::collection::vec(proptest::char::range(' ', '~'), len),
                0..len,
            ))
        ) {
            let first = Genome::new(a.clone());
            let second = Genome::new(b.clone());
            let (child1, child2) = crossover_at(&first, &second, point).unwrap();

            prop_assert_eq!(child1.len(), a.len());
            prop_assert_eq!(child2.len(), a.len());
            prop_assert_eq!(&child1.chars()[..point], &a[..point]);
            prop_assert_eq!(&child1.chars()[point..], &b[point..]);
            prop_assert_eq!(&child2.chars()[..point], &b[..point]);
            prop_assert_eq!(&child2.chars()[point..], &a[point..]);
        }

        #[test]
        fn random_crossover_children_have_parent_length(seed in any::<u64>(), len in 1usize..64) {
            let mut rng = GenomeRng::new(seed);
            let a = rng.random_genome(len);
            let b = rng.random_genome(len);
            let (c1, c2) = rng.crossover(&a, &b).unwrap();
            prop_assert_eq!(c1.len(), len);
            prop_assert_eq!(c2.len(), len);
        }
    }
}
