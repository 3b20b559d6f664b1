//! Box-blur and shared-counter benchmark
//!
//! ```bash
//! # reference run: 1920x1080, 4 workers, 2 x 100,000 increments
//! blurbench
//!
//! # reproducible image, 8 workers, JSON output
//! blurbench --seed 42 --workers 8 --json
//!
//! # settings from a file, CLI flags win
//! blurbench --config bench.toml --iterations 1000000
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::thread_rng;
use tracing::info;

use parallel_blur::blur::{ParallelBlurEngine, RayonBlurEngine};
use parallel_blur::config::BenchConfig;
use parallel_blur::counter::CounterBenchmark;
use parallel_blur::generate::{random_buffer, seeded_buffer};
use parallel_blur::report::{time_blur_engines, RunReport};

#[derive(Parser, Debug)]
#[command(name = "blurbench")]
#[command(about = "Compare sequential and parallel box blur, and atomic vs mutex counters")]
#[command(version)]
struct Args {
    /// TOML file with benchmark settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<usize>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<usize>,

    /// Blur worker threads
    #[arg(short, long)]
    workers: Option<usize>,

    /// Threads per counter trial
    #[arg(long)]
    counter_workers: Option<usize>,

    /// Increments per counter thread
    #[arg(short, long)]
    iterations: Option<u64>,

    /// Seed for the test image
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    #[arg(long)]
    skip_blur: bool,

    #[arg(long)]
    skip_counter: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<BenchConfig> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => BenchConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(workers) = self.workers {
            config.blur_workers = workers;
        }
        if let Some(workers) = self.counter_workers {
            config.counter_workers = workers;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.resolve_config()?;
    info!(?config, "starting");

    let mut report = RunReport::new(config.width, config.height);

    if !args.skip_blur {
        let image = match config.seed {
            Some(seed) => seeded_buffer(config.width, config.height, seed)?,
            None => random_buffer(config.width, config.height, &mut thread_rng())?,
        };

        let threads = ParallelBlurEngine::new(config.blur_workers);
        let rayon = RayonBlurEngine::with_threads(config.blur_workers);
        report.blur = time_blur_engines(&image, &[&threads, &rayon])
            .context("blur benchmark failed")?;
    }

    if !args.skip_counter {
        let counter = CounterBenchmark::new(config.counter_workers, config.iterations)
            .run()
            .context("counter benchmark failed")?;
        report.record_counter(&counter);
    }

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());
    }

    if !report.all_outputs_match() {
        bail!("parallel blur output differs from the sequential reference");
    }
    Ok(())
}
