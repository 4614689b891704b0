//! Error types shared by the connectivity structure, the percolation model,
//! and the threshold estimator.
//!
//! Every variant describes a violated precondition. None of them are
//! transient, so callers should fix their input rather than retry.

/// Errors returned by this crate.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Grid size was zero, or too large for `n² + 2` to be addressable.
    #[error("grid size must be positive and n*n + 2 must fit in usize, got {n}")]
    InvalidGridSize { n: usize },

    /// Trial count was zero.
    #[error("number of trials must be positive, got {trials}")]
    InvalidTrialCount { trials: usize },

    /// A 1-based `(row, col)` fell outside `[1, n] x [1, n]`.
    #[error("site ({row}, {col}) is outside the grid; row and column must be between 1 and {n}")]
    SiteOutOfRange { row: usize, col: usize, n: usize },

    /// A union-find element index was `>= len`.
    #[error("element index {index} out of range for union-find of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Two summaries from different grid sizes cannot be combined.
    #[error("cannot merge results for grid size {left} with results for grid size {right}")]
    GridSizeMismatch { left: usize, right: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
