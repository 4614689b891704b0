//! # percolation
//!
//! Monte Carlo estimation of the site-percolation threshold of an
//! n-by-n grid.
//!
//! Each trial starts from a fully blocked grid and opens uniformly random
//! sites until an open path connects the top row to the bottom row. The
//! fraction of open sites at that moment is one sample; many independent
//! samples give a mean, a standard deviation, and a 95% confidence
//! interval for the threshold (≈ 0.593 for large grids).
//!
//! ## Modules
//!
//! - [`collections`] — Disjoint-set forest used for connectivity
//! - [`percolation`] — The grid model with virtual top/bottom nodes
//! - [`render`] — Text dump of a grid for debugging
//! - [`estimator`] — Trial driver and summary statistics
//! - [`stats`] — Descriptive statistics with numerical stability guarantees
//! - [`random`] — Seeded RNG and uniform site selection
//!
//! ## Example
//!
//! ```
//! use percolation::{EstimatorConfig, SamplingStrategy};
//!
//! let stats = EstimatorConfig::new(20, 30)
//!     .with_seed(42)
//!     .with_strategy(SamplingStrategy::Shuffled)
//!     .run()
//!     .unwrap();
//! assert!(stats.confidence_lo() <= stats.mean());
//! assert!(stats.mean() <= stats.confidence_hi());
//! ```

pub mod collections;
pub mod error;
pub mod estimator;
pub mod percolation;
pub mod random;
pub mod render;
pub mod stats;

pub use error::{Error, Result};
pub use estimator::{EstimatorConfig, PercolationStats, SamplingStrategy};
pub use percolation::Percolation;
