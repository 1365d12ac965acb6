//! Fitness-proportionate parent selection.

use rand::Rng;

use crate::schema::{Genome, WeightedGenome};

use super::genome::GenomeRng;

impl GenomeRng {
    /// Index drawn with probability proportional to fitness.
    ///
    /// Draws `n` uniformly from `[0, total)` and walks the population,
    /// subtracting each weight until one exceeds what remains. Returns `None`
    /// only for an empty population. A population without positive total
    /// weight falls back to a uniform draw.
    pub fn weighted_index(&mut self, population: &[WeightedGenome]) -> Option<usize> {
        if population.is_empty() {
            return None;
        }

        let total: f64 = population.iter().map(|c| c.fitness).sum();
        if !(total.is_finite() && total > 0.0) {
            return Some(self.rng.gen_range(0..population.len()));
        }

        let mut remaining = self.rng.gen_range(0.0..total);
        for (i, candidate) in population.iter().enumerate() {
            if candidate.fitness > remaining {
                return Some(i);
            }
            remaining -= candidate.fitness;
        }

        // Rounding can leave a sliver past the last weight
        Some(population.len() - 1)
    }

    /// Genome drawn with probability proportional to fitness.
    pub fn weighted_choice<'a>(&mut self, population: &'a [WeightedGenome]) -> Option<&'a Genome> {
        self.weighted_index(population).map(|i| &population[i].genome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted(items: &[(&str, f64)]) -> Vec<WeightedGenome> {
        items
            .iter()
            .map(|&(s, fitness)| WeightedGenome {
                genome: Genome::from(s),
                fitness,
            })
            .collect()
    }

    #[test]
    fn test_empty_population() {
        let mut rng = GenomeRng::new(1);
        assert_eq!(rng.weighted_index(&[]), None);
        assert!(rng.weighted_choice(&[]).is_none());
    }

    #[test]
    fn test_single_candidate_always_chosen() {
        let mut rng = GenomeRng::new(1);
        let population = weighted(&[("only", 0.25)]);
        for _ in 0..100 {
            assert_eq!(rng.weighted_index(&population), Some(0));
        }
    }

    #[test]
    fn test_dominant_weight_wins() {
        let mut rng = GenomeRng::new(1);
        let population = weighted(&[
            ("some string", 0.1),
            ("test string", 0.1),
            ("TEST TEST", 100.0),
        ]);
        let expected = Genome::from("TEST TEST");

        let dominant = (0..1000)
            .filter(|_| rng.weighted_choice(&population) == Some(&expected))
            .count();
        assert!(dominant > 980, "dominant chosen {dominant}/1000 times");
    }

    #[test]
    fn test_selection_frequency_tracks_weight() {
        let mut rng = GenomeRng::new(9);
        let population = weighted(&[("a", 1.0), ("b", 3.0)]);

        let mut counts = [0usize; 2];
        for _ in 0..10_000 {
            counts[rng.weighted_index(&population).unwrap()] += 1;
        }
        let share = counts[1] as f64 / 10_000.0;
        assert!((share - 0.75).abs() < 0.03, "share {share}");
    }

    #[test]
    fn test_zero_total_weight_falls_back_to_uniform() {
        let mut rng = GenomeRng::new(3);
        let population = weighted(&[("a", 0.0), ("b", 0.0)]);

        let mut seen = [false; 2];
        for _ in 0..100 {
            seen[rng.weighted_index(&population).unwrap()] = true;
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn test_selection_reproducible() {
        let population = weighted(&[("a", 0.4), ("b", 12.0), ("c", 42.0)]);
        let mut rng1 = GenomeRng::new(11);
        let mut rng2 = GenomeRng::new(11);
        for _ in 0..50 {
            assert_eq!(
                rng1.weighted_index(&population),
                rng2.weighted_index(&population)
            );
        }
    }
}
