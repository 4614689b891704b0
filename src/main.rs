use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use percolation::estimator::{run_trial, trial_seed};
use percolation::random::create_rng;
use percolation::{EstimatorConfig, SamplingStrategy};

/// percolation-stats - estimate the percolation threshold of an N-by-N grid
///
/// Runs T independent Monte Carlo trials and prints the sample mean,
/// standard deviation and 95% confidence interval of the fraction of
/// open sites at which the grid first percolates.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Grid size N (positive)
    #[clap(value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    grid_size: u64,

    /// Number of trials T (positive)
    #[clap(value_name = "T", value_parser = clap::value_parser!(u64).range(1..))]
    trials: u64,

    /// Base random seed (random if not given)
    #[clap(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Site selection: rejection or shuffled
    #[clap(long = "strategy", default_value = "rejection")]
    strategy: SamplingStrategy,

    /// Number of worker threads; trials run in parallel when > 1
    #[clap(short = 't', long = "threads", default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    threads: u64,

    /// Print the grid of one extra percolating trial to stderr
    #[clap(long = "render")]
    render: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let grid_size = usize::try_from(args.grid_size).context("grid size does not fit in usize")?;
    let trials = usize::try_from(args.trials).context("trial count does not fit in usize")?;
    let threads = usize::try_from(args.threads).context("thread count does not fit in usize")?;

    if threads > 1 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to build thread pool")?;
        info!("using {threads} worker threads");
    }

    let seed = args.seed.unwrap_or_else(rand::random::<u64>);
    let config = EstimatorConfig::new(grid_size, trials)
        .with_seed(seed)
        .with_strategy(args.strategy)
        .with_parallel(threads > 1);

    if trials == 1 {
        warn!("a single trial has no sample standard deviation; stddev and the confidence interval will be NaN");
    }

    let stats = config
        .run()
        .with_context(|| format!("failed to estimate threshold for n={grid_size}, trials={trials}"))?;

    println!("mean = {}", stats.mean());
    println!("stddev = {}", stats.stddev());
    println!(
        "95% confidence interval = [{}, {}]",
        stats.confidence_lo(),
        stats.confidence_hi()
    );

    if args.render {
        // one past the last trial, so the grid is reproducible from --seed
        let mut rng = create_rng(trial_seed(seed, trials));
        let grid = run_trial(grid_size, args.strategy, &mut rng)
            .context("failed to run trial for rendering")?;
        eprintln!(
            "percolating grid ({} of {} sites open):",
            grid.number_of_open_sites(),
            grid_size * grid_size
        );
        eprint!("{grid}");
    }

    Ok(())
}
