//! Summary statistics for per-trial open-site fractions.
//!
//! Samples are fractions in `(0, 1]`, many of them close to one another,
//! so the mean uses compensated summation and the variance is accumulated
//! as deviations from a running mean instead of `E[X²] − E[X]²`.
//!
//! - **Mean**: Neumaier summation. Neumaier (1974), *ZAMM* 54(1).
//! - **Variance/StdDev**: Welford (1962), *Technometrics* 4(3); batches
//!   combine with the pairwise update of Chan, Golub & LeVeque (1979).

/// Arithmetic mean of the samples, summed with [`kahan_sum`].
///
/// `None` for an empty slice or when any sample is NaN/Inf.
///
/// # Examples
/// ```
/// use percolation::stats::mean;
/// // three 4x4 trials that percolated after 9, 10 and 11 open sites
/// let fractions = [9.0 / 16.0, 10.0 / 16.0, 11.0 / 16.0];
/// assert_eq!(mean(&fractions), Some(0.625));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Sample variance (denominator `n − 1`).
///
/// `None` with fewer than two samples, which is the single-trial case the
/// estimator reports as NaN, or when any sample is NaN/Inf.
///
/// # Examples
/// ```
/// use percolation::stats::variance;
/// let fractions = [9.0 / 16.0, 10.0 / 16.0, 11.0 / 16.0];
/// assert_eq!(variance(&fractions), Some(1.0 / 256.0));
/// assert_eq!(variance(&[0.6]), None);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let mut acc = WelfordAccumulator::new();
    data.iter().for_each(|&x| acc.update(x));
    acc.sample_variance()
}

/// Sample standard deviation, `sqrt(variance(data))`.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Neumaier's variant of Kahan summation.
///
/// The compensation term picks up the low-order bits of whichever operand
/// is smaller, so it also holds when an addend outweighs the running sum.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let (sum, compensation) = data.iter().fold((0.0_f64, 0.0_f64), |(sum, c), &x| {
        let t = sum + x;
        let lost = if sum.abs() >= x.abs() {
            (sum - t) + x
        } else {
            (x - t) + sum
        };
        (t, c + lost)
    });
    sum + compensation
}

// ---------------------------------------------------------------------------
// Welford online accumulator
// ---------------------------------------------------------------------------

/// Running count, mean and sum of squared deviations.
///
/// Fed one trial at a time; two accumulators over disjoint batches of
/// trials combine with [`merge`](Self::merge).
///
/// # Examples
/// ```
/// use percolation::stats::WelfordAccumulator;
/// let mut first = WelfordAccumulator::new();
/// first.update(9.0 / 16.0);
/// first.update(10.0 / 16.0);
/// let mut second = WelfordAccumulator::new();
/// second.update(11.0 / 16.0);
///
/// first.merge(&second);
/// assert_eq!(first.count(), 3);
/// assert_eq!(first.mean(), Some(0.625));
/// assert_eq!(first.sample_std_dev(), Some(0.0625));
/// ```
#[derive(Debug, Clone, Default)]
pub struct WelfordAccumulator {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl WelfordAccumulator {
    /// Creates an accumulator with no samples.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one sample.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean_acc;
        self.mean_acc += delta / self.count as f64;
        self.m2 += delta * (value - self.mean_acc);
    }

    /// Number of samples added so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean; `None` before the first sample.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean_acc)
    }

    /// Sample variance (n − 1 denominator); `None` below two samples.
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Sample standard deviation; `None` below two samples.
    pub fn sample_std_dev(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }

    /// Folds `other`'s samples into this accumulator.
    pub fn merge(&mut self, other: &WelfordAccumulator) {
        match (self.count, other.count) {
            (_, 0) => {}
            (0, _) => *self = other.clone(),
            (na, nb) => {
                let total = na + nb;
                let (na, nb, n) = (na as f64, nb as f64, total as f64);
                let delta = other.mean_acc - self.mean_acc;
                self.mean_acc += delta * nb / n;
                self.m2 += other.m2 + delta * delta * na * nb / n;
                self.count = total;
            }
        }
    }
}
