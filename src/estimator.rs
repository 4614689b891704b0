//! Monte Carlo estimation of the percolation threshold.
//!
//! Each trial opens uniformly random blocked sites of a fresh grid until it
//! percolates, then records the fraction of open sites. Trials share no
//! state: trial `i` draws from its own RNG seeded with `base_seed + i`, so
//! running them on a rayon pool gives the same samples, in the same order,
//! as running them one after another.
//!
//! # Boundary case
//!
//! The sample standard deviation divides by `trials − 1`. With a single
//! trial it is undefined, and [`PercolationStats::stddev`] returns
//! `f64::NAN` (as do both confidence bounds) rather than inventing a value.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use log::{debug, info};
use rand::Rng;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::percolation::Percolation;
use crate::random::{create_rng, shuffled_indices, uniform_inclusive};
use crate::stats::{self, WelfordAccumulator};

/// z-score of the two-sided 95% normal confidence interval.
pub const CONFIDENCE_95: f64 = 1.96;

/// How the next site to open is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingStrategy {
    /// Draw `(row, col)` uniformly from the whole grid and redraw if the
    /// site is already open.
    #[default]
    Rejection,
    /// Open sites in the order of a random permutation of the grid.
    Shuffled,
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingStrategy::Rejection => f.write_str("rejection"),
            SamplingStrategy::Shuffled => f.write_str("shuffled"),
        }
    }
}

impl FromStr for SamplingStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rejection" => Ok(SamplingStrategy::Rejection),
            "shuffled" | "shuffle" => Ok(SamplingStrategy::Shuffled),
            other => Err(format!(
                "unknown sampling strategy '{other}', expected 'rejection' or 'shuffled'"
            )),
        }
    }
}

/// Opens random sites of a fresh `n`-by-`n` grid until it percolates and
/// returns the percolating grid.
///
/// Always terminates: a fully open grid percolates.
///
/// # Errors
/// [`Error::InvalidGridSize`] if `n == 0`.
///
/// # Examples
/// ```
/// use percolation::estimator::{run_trial, SamplingStrategy};
/// use percolation::random::create_rng;
///
/// let mut rng = create_rng(1);
/// let p = run_trial(8, SamplingStrategy::Shuffled, &mut rng).unwrap();
/// assert!(p.percolates());
/// assert!(p.number_of_open_sites() >= 8);
/// ```
pub fn run_trial<R: Rng>(n: usize, strategy: SamplingStrategy, rng: &mut R) -> Result<Percolation> {
    let mut p = Percolation::new(n)?;
    match strategy {
        SamplingStrategy::Rejection => {
            while !p.percolates() {
                let row = uniform_inclusive(rng, 1, n);
                let col = uniform_inclusive(rng, 1, n);
                if !p.is_open(row, col)? {
                    p.open(row, col)?;
                }
            }
        }
        SamplingStrategy::Shuffled => {
            for index in shuffled_indices(n * n, rng) {
                p.open(index / n + 1, index % n + 1)?;
                if p.percolates() {
                    break;
                }
            }
        }
    }
    Ok(p)
}

/// Seed used by trial `index` of a run started from `base_seed`.
pub fn trial_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add(index as u64)
}

/// Settings for one estimation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Side length `n` of the grid.
    pub grid_size: usize,
    /// Number of independent trials.
    pub trials: usize,
    /// Base seed; a random one is drawn when `None`.
    pub seed: Option<u64>,
    /// How each trial picks the next blocked site.
    pub strategy: SamplingStrategy,
    /// Run trials on the rayon global pool.
    pub parallel: bool,
}

impl Default for EstimatorConfig {
    /// A single trial on a 1x1 grid with a random seed.
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl EstimatorConfig {
    /// `trials` trials on an `n`-by-`n` grid, sequential rejection
    /// sampling, random seed.
    pub fn new(grid_size: usize, trials: usize) -> Self {
        Self {
            grid_size,
            trials,
            seed: None,
            strategy: SamplingStrategy::default(),
            parallel: false,
        }
    }

    /// Fixes the base seed so the run is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the site-selection strategy.
    pub fn with_strategy(mut self, strategy: SamplingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Runs trials on the rayon global pool when `true`.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that both the grid size and the trial count are positive.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(Error::InvalidGridSize { n: self.grid_size });
        }
        if self.trials == 0 {
            return Err(Error::InvalidTrialCount {
                trials: self.trials,
            });
        }
        Ok(())
    }

    /// Runs every trial and summarises the samples.
    pub fn run(&self) -> Result<PercolationStats> {
        self.validate()?;
        let n = self.grid_size;
        let strategy = self.strategy;
        let base_seed = self.seed.unwrap_or_else(rand::random::<u64>);
        info!(
            "estimating threshold: n={n}, trials={}, seed={base_seed}, strategy={strategy}, parallel={}",
            self.trials, self.parallel
        );

        let one = |i: usize| -> Result<f64> {
            let mut rng = create_rng(trial_seed(base_seed, i));
            let p = run_trial(n, strategy, &mut rng)?;
            debug!(
                "trial {i}: percolated with {} of {} sites open",
                p.number_of_open_sites(),
                n * n
            );
            Ok(p.open_fraction())
        };

        let start = Instant::now();
        let samples: Vec<f64> = if self.parallel {
            (0..self.trials).into_par_iter().map(one).collect::<Result<_>>()?
        } else {
            (0..self.trials).map(one).collect::<Result<_>>()?
        };
        info!(
            "finished {} trials in {:.3}s",
            samples.len(),
            start.elapsed().as_secs_f64()
        );

        PercolationStats::from_samples(n, samples)
    }
}

/// Per-trial open-site fractions and their summary statistics.
///
/// # Examples
/// ```
/// use percolation::PercolationStats;
///
/// // every 1x1 trial percolates after opening its only site
/// let stats = PercolationStats::new(1, 10).unwrap();
/// assert_eq!(stats.mean(), 1.0);
/// assert_eq!(stats.stddev(), 0.0);
/// assert_eq!(stats.confidence_lo(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct PercolationStats {
    grid_size: usize,
    // source of the mean, summed with Neumaier compensation
    samples: Vec<f64>,
    // second moment, carried through `merge`
    summary: WelfordAccumulator,
}

impl PercolationStats {
    /// Performs `trials` independent trials on an `n`-by-`n` grid with a
    /// random seed and rejection sampling.
    ///
    /// # Errors
    /// [`Error::InvalidGridSize`] if `n == 0`, [`Error::InvalidTrialCount`]
    /// if `trials == 0`.
    pub fn new(n: usize, trials: usize) -> Result<Self> {
        EstimatorConfig::new(n, trials).run()
    }

    /// Wraps samples gathered elsewhere, in trial order.
    ///
    /// # Errors
    /// [`Error::InvalidGridSize`] if `grid_size == 0`,
    /// [`Error::InvalidTrialCount`] if `samples` is empty.
    pub fn from_samples(grid_size: usize, samples: Vec<f64>) -> Result<Self> {
        if grid_size == 0 {
            return Err(Error::InvalidGridSize { n: grid_size });
        }
        if samples.is_empty() {
            return Err(Error::InvalidTrialCount { trials: 0 });
        }
        let mut summary = WelfordAccumulator::new();
        for &x in &samples {
            summary.update(x);
        }
        Ok(Self {
            grid_size,
            samples,
            summary,
        })
    }

    /// Side length of the grids the trials ran on.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Number of trials summarised.
    pub fn trials(&self) -> usize {
        self.samples.len()
    }

    /// Open-site fraction of each trial, in trial order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample mean of the percolation threshold.
    pub fn mean(&self) -> f64 {
        stats::mean(&self.samples).unwrap_or(f64::NAN)
    }

    /// Sample standard deviation of the percolation threshold.
    ///
    /// `NaN` when there is only one trial.
    pub fn stddev(&self) -> f64 {
        self.summary.sample_std_dev().unwrap_or(f64::NAN)
    }

    fn half_width(&self) -> f64 {
        CONFIDENCE_95 * self.stddev() / (self.trials() as f64).sqrt()
    }

    /// Low endpoint of the 95% confidence interval.
    pub fn confidence_lo(&self) -> f64 {
        self.mean() - self.half_width()
    }

    /// High endpoint of the 95% confidence interval.
    pub fn confidence_hi(&self) -> f64 {
        self.mean() + self.half_width()
    }

    /// Combines two batches of trials run on the same grid size.
    ///
    /// # Errors
    /// [`Error::GridSizeMismatch`] if the grid sizes differ.
    pub fn merge(mut self, other: &PercolationStats) -> Result<Self> {
        if self.grid_size != other.grid_size {
            return Err(Error::GridSizeMismatch {
                left: self.grid_size,
                right: other.grid_size,
            });
        }
        self.samples.extend_from_slice(&other.samples);
        self.summary.merge(&other.summary);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_arguments() {
        assert_eq!(
            PercolationStats::new(0, 10).unwrap_err(),
            Error::InvalidGridSize { n: 0 }
        );
        assert_eq!(
            PercolationStats::new(10, 0).unwrap_err(),
            Error::InvalidTrialCount { trials: 0 }
        );
    }

    #[test]
    fn test_default_config_validates() {
        let config = EstimatorConfig::default();
        assert_eq!(config, EstimatorConfig::new(1, 1));
        assert_eq!(config.seed, None);
        assert_eq!(config.strategy, SamplingStrategy::Rejection);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());

        let stats = config.with_seed(0).run().unwrap();
        assert_eq!(stats.mean(), 1.0);
        assert!(stats.stddev().is_nan());
    }

    #[test]
    fn test_single_site_grid() {
        let stats = EstimatorConfig::new(1, 25).with_seed(9).run().unwrap();
        assert_eq!(stats.trials(), 25);
        assert_eq!(stats.mean(), 1.0);
        assert_eq!(stats.stddev(), 0.0);
        assert_eq!(stats.confidence_lo(), 1.0);
        assert_eq!(stats.confidence_hi(), 1.0);
    }

    #[test]
    fn test_single_trial_stddev_is_nan() {
        let stats = EstimatorConfig::new(5, 1).with_seed(3).run().unwrap();
        assert_eq!(stats.trials(), 1);
        assert!(stats.mean() > 0.0 && stats.mean() <= 1.0);
        assert!(stats.stddev().is_nan());
        assert!(stats.confidence_lo().is_nan());
        assert!(stats.confidence_hi().is_nan());
    }

    #[test]
    fn test_samples_are_valid_fractions() {
        for strategy in [SamplingStrategy::Rejection, SamplingStrategy::Shuffled] {
            let n = 6;
            let stats = EstimatorConfig::new(n, 50)
                .with_seed(11)
                .with_strategy(strategy)
                .run()
                .unwrap();
            for &x in stats.samples() {
                // at least one site per row must be open to percolate
                assert!(x >= 1.0 / n as f64 && x <= 1.0, "{strategy}: {x}");
                let open = x * (n * n) as f64;
                assert!((open - open.round()).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_same_seed_same_samples() {
        let config = EstimatorConfig::new(8, 20).with_seed(2024);
        let a = config.run().unwrap();
        let b = config.run().unwrap();
        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = EstimatorConfig::new(10, 32)
            .with_seed(77)
            .with_strategy(SamplingStrategy::Shuffled);
        let sequential = config.run().unwrap();
        let parallel = config.clone().with_parallel(true).run().unwrap();
        assert_eq!(sequential.samples(), parallel.samples());
        assert_eq!(sequential.mean(), parallel.mean());
    }

    #[test]
    fn test_confidence_interval_brackets_mean() {
        let stats = EstimatorConfig::new(10, 40).with_seed(5).run().unwrap();
        let half = CONFIDENCE_95 * stats.stddev() / (40f64).sqrt();
        assert!((stats.confidence_lo() - (stats.mean() - half)).abs() < 1e-15);
        assert!((stats.confidence_hi() - (stats.mean() + half)).abs() < 1e-15);
        assert!(stats.confidence_lo() <= stats.mean());
        assert!(stats.mean() <= stats.confidence_hi());
    }

    #[test]
    fn test_from_samples() {
        let stats = PercolationStats::from_samples(4, vec![0.5, 0.75]).unwrap();
        assert_eq!(stats.mean(), 0.625);
        assert!((stats.stddev() - 0.03125_f64.sqrt()).abs() < 1e-12);
        assert_eq!(
            PercolationStats::from_samples(4, vec![]).unwrap_err(),
            Error::InvalidTrialCount { trials: 0 }
        );
    }

    #[test]
    fn test_merge_batches() {
        let a = PercolationStats::from_samples(4, vec![0.5, 0.625]).unwrap();
        let b = PercolationStats::from_samples(4, vec![0.75, 0.5625, 0.6875]).unwrap();
        let merged = a.merge(&b).unwrap();
        let all = [0.5, 0.625, 0.75, 0.5625, 0.6875];
        assert_eq!(merged.trials(), 5);
        assert_eq!(merged.samples(), &all);
        assert!((merged.stddev() - stats::std_dev(&all).unwrap()).abs() < 1e-12);
    }

    #[test]
    fn test_mean_agrees_with_running_summary() {
        let a = PercolationStats::from_samples(4, vec![0.5, 0.625, 0.5625]).unwrap();
        let b = PercolationStats::from_samples(4, vec![0.6875, 0.75]).unwrap();
        let merged = a.merge(&b).unwrap();
        let running = merged.summary.mean().unwrap();
        assert_eq!(merged.summary.count(), 5);
        assert!((merged.mean() - running).abs() < 1e-12);
        assert_eq!(merged.mean(), 0.625);
    }

    #[test]
    fn test_merge_rejects_different_grid_sizes() {
        let a = PercolationStats::from_samples(4, vec![0.5]).unwrap();
        let b = PercolationStats::from_samples(5, vec![0.6]).unwrap();
        assert_eq!(
            a.merge(&b).unwrap_err(),
            Error::GridSizeMismatch { left: 4, right: 5 }
        );
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("rejection".parse::<SamplingStrategy>(), Ok(SamplingStrategy::Rejection));
        assert_eq!("Shuffled".parse::<SamplingStrategy>(), Ok(SamplingStrategy::Shuffled));
        assert!("random".parse::<SamplingStrategy>().is_err());
        assert_eq!(SamplingStrategy::Shuffled.to_string(), "shuffled");
    }

    #[test]
    fn test_run_trial_rejects_zero() {
        let mut rng = create_rng(0);
        assert!(matches!(
            run_trial(0, SamplingStrategy::Rejection, &mut rng),
            Err(Error::InvalidGridSize { n: 0 })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn trial_stops_at_first_percolation(
            seed in 0_u64..10000,
            n in 1_usize..12,
            shuffled in any::<bool>(),
        ) {
            let strategy = if shuffled {
                SamplingStrategy::Shuffled
            } else {
                SamplingStrategy::Rejection
            };
            let mut rng = create_rng(seed);
            let p = run_trial(n, strategy, &mut rng).unwrap();
            prop_assert!(p.percolates());
            prop_assert!(p.number_of_open_sites() >= n);
            prop_assert!(p.number_of_open_sites() <= n * n);
        }
    }
}
