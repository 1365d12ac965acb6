//! String Evolve CLI - Run and benchmark genetic string optimization.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;

use string_evolve::{
    GenomeError, Optimizer,
    compute::evolution::{
        BenchmarkError, run_benchmark_with_callback, save_csv, save_json, summarize,
    },
    schema::{BenchmarkConfig, ConfigError, FitnessStrategy, OptimizerConfig},
};

#[derive(Debug, Parser)]
#[command(name = "string-evolve", version, about = "Approximate a string through genetic search")]
struct Cli {
    /// Write log output to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evolve a population towards a target string.
    Run(RunArgs),
    /// Time repeated runs across strategies and population sizes.
    Bench(BenchArgs),
    /// Print default configurations as JSON.
    ExampleConfig,
}

/// Fitness method names accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    /// Per-character code point distance.
    Unicode,
    /// Levenshtein edit distance.
    Levenshtein,
}

impl From<Method> for FitnessStrategy {
    fn from(method: Method) -> Self {
        match method {
            Method::Unicode => FitnessStrategy::CharacterDistance,
            Method::Levenshtein => FitnessStrategy::EditDistance,
        }
    }
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Target string to optimize for.
    #[arg(short, long, required_unless_present = "config")]
    target: Option<String>,

    /// Fitness method (default: unicode).
    #[arg(short, long, value_enum)]
    method: Option<Method>,

    /// Genomes per generation; even and at least 2 (default: 200).
    #[arg(short, long)]
    population_size: Option<usize>,

    /// Generation budget (default: 1000).
    #[arg(short = 'g', long)]
    max_generations: Option<usize>,

    /// Per-character mutation probability (default: 0.01).
    #[arg(long)]
    mutation_rate: Option<f64>,

    /// Random seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration file; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct BenchArgs {
    /// Target string (default: "How many?").
    #[arg(short, long)]
    target: Option<String>,

    /// Generation budget per run (default: 5000).
    #[arg(short = 'g', long)]
    max_generations: Option<usize>,

    /// Comma-separated population sizes (default: 10,20,50,100).
    #[arg(short, long, value_delimiter = ',')]
    population_sizes: Option<Vec<usize>>,

    /// Runs per strategy and population size (default: 10).
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Base random seed for reproducible sweeps.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON benchmark configuration file; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file.
    #[arg(short, long, default_value = "benchmark_results.csv")]
    output: PathBuf,

    /// Write JSON instead of CSV.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Error parsing config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Optimizer failed: {0}")]
    Genome(#[from] GenomeError),
    #[error("Benchmark failed: {0}")]
    Benchmark(#[from] BenchmarkError),
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    let cli = Cli::parse();

    // The benchmark only reports errors unless RUST_LOG says otherwise
    let default_level = match cli.command {
        Command::Bench(_) => "error",
        _ => "info",
    };

    if let Err(e) = init_logging(default_level, cli.log_file.as_deref()) {
        eprintln!("Error opening log file: {}", e);
        std::process::exit(1);
    }

    let result = match cli.command {
        Command::Run(args) => run(args),
        Command::Bench(args) => bench(args),
        Command::ExampleConfig => print_example_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(default_level: &str, log_file: Option<&Path>) -> io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn run(args: RunArgs) -> Result<(), CliError> {
    let mut config: OptimizerConfig = match &args.config {
        Some(path) => load_json(path)?,
        None => OptimizerConfig::default(),
    };

    if let Some(target) = args.target {
        config.target = target;
    }
    if let Some(method) = args.method {
        config.fitness = method.into();
    }
    if let Some(size) = args.population_size {
        config.population_size = size;
    }
    if let Some(generations) = args.max_generations {
        config.max_generations = generations;
    }
    if let Some(rate) = args.mutation_rate {
        config.mutation_rate = rate;
    }
    if let Some(seed) = args.seed {
        config.random_seed = Some(seed);
    }

    println!("String Evolve");
    println!("=============");
    println!("Target: {:?} ({} chars)", config.target, config.dna_size());
    println!("Fitness: {}", config.fitness);
    println!("Population: {}", config.population_size);
    println!("Max generations: {}", config.max_generations);
    println!();

    let start = Instant::now();
    let outcome = Optimizer::new(config)?.optimize()?;
    let elapsed = start.elapsed();

    println!("Target reached: {}", outcome.reached);
    println!("Generations: {}", outcome.generations);
    println!("Stopped: {:?}", outcome.phase);
    println!("Time: {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

fn bench(args: BenchArgs) -> Result<(), CliError> {
    let mut config: BenchmarkConfig = match &args.config {
        Some(path) => load_json(path)?,
        None => BenchmarkConfig::default(),
    };

    if let Some(target) = args.target {
        config.target = target;
    }
    if let Some(generations) = args.max_generations {
        config.max_generations = generations;
    }
    if let Some(sizes) = args.population_sizes {
        config.population_sizes = sizes;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(seed) = args.seed {
        config.random_seed = Some(seed);
    }

    let total = config.strategies.len() * config.population_sizes.len() * config.iterations;
    println!(
        "Benchmarking {:?}: {} runs, max {} generations",
        config.target, total, config.max_generations
    );

    let start = Instant::now();
    let mut completed = 0;
    let records = run_benchmark_with_callback(&config, |_| {
        completed += 1;
        // Print progress every 10%
        if completed % (total / 10).max(1) == 0 {
            println!("  {}/{} runs", completed, total);
        }
    })?;

    if args.json {
        save_json(&records, &args.output)?;
    } else {
        save_csv(&records, &args.output)?;
    }

    println!();
    println!(
        "{:<20} {:>10} {:>8} {:>14} {:>10}",
        "Method", "Population", "Reached", "Generations", "Time (s)"
    );
    for summary in summarize(&records) {
        println!(
            "{:<20} {:>10} {:>7.0}% {:>14.1} {:>10.4}",
            summary.strategy.as_str(),
            summary.population_size,
            summary.success_rate * 100.0,
            summary.mean_generations,
            summary.mean_elapsed_seconds
        );
    }
    println!();
    println!(
        "Wrote {} records to {} in {:.2}s",
        records.len(),
        args.output.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn print_example_config() -> Result<(), CliError> {
    println!("Example run configuration (run --config):");
    println!("{}", serde_json::to_string_pretty(&OptimizerConfig::default())?);
    println!();
    println!("Example benchmark configuration (bench --config):");
    println!("{}", serde_json::to_string_pretty(&BenchmarkConfig::default())?);
    Ok(())
}
