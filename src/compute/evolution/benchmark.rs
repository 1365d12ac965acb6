//! Benchmark harness: repeated, timed optimization runs and their export.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::schema::{
    BenchmarkConfig, BenchmarkRecord, BenchmarkSummary, ConfigError, FitnessStrategy,
};

use super::genome::{GenomeError, GenomeRng};
use super::search::Optimizer;

/// Column headers of the CSV export.
pub const CSV_HEADER: &str = "Method,Population Size,Target Reached?,Generations,Time";

/// Errors raised while running a benchmark sweep.
#[derive(Debug, thiserror::Error)]
pub enum BenchmarkError {
    #[error("Invalid benchmark configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Optimizer failed: {0}")]
    Genome(#[from] GenomeError),
}

/// Run every (strategy, population size) combination `iterations` times.
pub fn run_benchmark(config: &BenchmarkConfig) -> Result<Vec<BenchmarkRecord>, BenchmarkError> {
    run_benchmark_with_callback(config, |_| {})
}

/// Run the sweep, reporting each record as soon as its run finishes.
pub fn run_benchmark_with_callback<F>(
    config: &BenchmarkConfig,
    mut callback: F,
) -> Result<Vec<BenchmarkRecord>, BenchmarkError>
where
    F: FnMut(&BenchmarkRecord),
{
    config.validate()?;

    let mut seeds = config.random_seed.map(GenomeRng::new);
    let total = config.strategies.len() * config.population_sizes.len() * config.iterations;
    let mut records = Vec::with_capacity(total);

    info!(
        "Benchmarking '{}' over {} runs (max {} generations each)",
        config.target, total, config.max_generations
    );

    for &strategy in &config.strategies {
        for &population_size in &config.population_sizes {
            for iteration in 0..config.iterations {
                let seed = seeds.as_mut().map(GenomeRng::next_seed);
                let optimizer =
                    Optimizer::new(config.optimizer_config(strategy, population_size, seed))?;

                let start = Instant::now();
                let outcome = optimizer.optimize()?;
                let elapsed_seconds = start.elapsed().as_secs_f64();

                let record = BenchmarkRecord {
                    strategy,
                    population_size,
                    reached: outcome.reached,
                    generations: outcome.generations,
                    elapsed_seconds,
                };
                debug!(
                    "{} / {} #{}: reached={} generations={} in {:.3}s",
                    strategy,
                    population_size,
                    iteration,
                    record.reached,
                    record.generations,
                    elapsed_seconds
                );

                callback(&record);
                records.push(record);
            }
        }
    }

    Ok(records)
}

/// Write records as CSV, header first.
pub fn write_csv<W: Write>(records: &[BenchmarkRecord], mut writer: W) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for record in records {
        writeln!(
            writer,
            "{},{},{},{},{}",
            record.strategy,
            record.population_size,
            record.reached,
            record.generations,
            record.elapsed_seconds
        )?;
    }
    writer.flush()
}

/// Save records as CSV, creating parent directories as needed.
pub fn save_csv<P: AsRef<Path>>(records: &[BenchmarkRecord], path: P) -> io::Result<()> {
    let file = create_file(path.as_ref())?;
    write_csv(records, BufWriter::new(file))
}

/// Save records as pretty-printed JSON.
pub fn save_json<P: AsRef<Path>>(records: &[BenchmarkRecord], path: P) -> io::Result<()> {
    let file = create_file(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writer.flush()
}

fn create_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

/// Aggregate records per strategy and population size.
pub fn summarize(records: &[BenchmarkRecord]) -> Vec<BenchmarkSummary> {
    #[derive(Default)]
    struct Totals {
        runs: usize,
        reached: usize,
        generations: usize,
        elapsed_seconds: f64,
    }

    let mut groups: BTreeMap<(FitnessStrategy, usize), Totals> = BTreeMap::new();
    for record in records {
        let totals = groups
            .entry((record.strategy, record.population_size))
            .or_default();
        totals.runs += 1;
        totals.reached += usize::from(record.reached);
        totals.generations += record.generations;
        totals.elapsed_seconds += record.elapsed_seconds;
    }

    groups
        .into_iter()
        .map(|((strategy, population_size), totals)| {
            let runs = totals.runs as f64;
            BenchmarkSummary {
                strategy,
                population_size,
                runs: totals.runs,
                reached: totals.reached,
                success_rate: totals.reached as f64 / runs,
                mean_generations: totals.generations as f64 / runs,
                mean_elapsed_seconds: totals.elapsed_seconds / runs,
            }
        })
        .collect()
}
