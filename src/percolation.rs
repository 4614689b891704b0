//! Site percolation on an n-by-n grid.
//!
//! Sites are addressed by 1-based `(row, col)` and start blocked. Opening
//! a site unions it with its open neighbours. Two virtual nodes stand in
//! for the whole top row and the whole bottom row, so checking whether the
//! grid percolates is a single connectivity query instead of a row scan.
//!
//! # Backwash
//!
//! Once the grid percolates, the bottom virtual node is connected to the
//! top one. If fullness were answered by the same structure, every site
//! touching the bottom row would then look full. Fullness is therefore
//! answered by a second structure that never sees the bottom virtual node.
//! Both structures receive every other union in lockstep.

use crate::collections::UnionFind;
use crate::error::{Error, Result};

/// An n-by-n grid of sites that can only go from blocked to open.
///
/// # Examples
/// ```
/// use percolation::Percolation;
///
/// let mut p = Percolation::new(2).unwrap();
/// p.open(1, 1).unwrap();
/// p.open(2, 2).unwrap();
/// assert!(!p.percolates());
///
/// p.open(2, 1).unwrap();
/// assert!(p.percolates());
/// assert_eq!(p.number_of_open_sites(), 3);
/// assert!(!p.is_full(1, 2).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Percolation {
    n: usize,
    open: Vec<bool>,
    open_count: usize,
    /// Sites plus top and bottom virtual nodes; answers `percolates`.
    full: UnionFind,
    /// Sites plus the top virtual node only; answers `is_full`.
    top_only: UnionFind,
    percolating: bool,
}

impl Percolation {
    /// Creates an `n`-by-`n` grid with every site blocked.
    ///
    /// No unions are made here; the virtual nodes are wired in lazily as
    /// sites in the first and last rows are opened.
    ///
    /// # Errors
    /// [`Error::InvalidGridSize`] if `n == 0` or `n² + 2` overflows.
    pub fn new(n: usize) -> Result<Self> {
        let sites = n
            .checked_mul(n)
            .filter(|&s| s > 0 && s.checked_add(2).is_some())
            .ok_or(Error::InvalidGridSize { n })?;

        Ok(Self {
            n,
            open: vec![false; sites],
            open_count: 0,
            full: UnionFind::new(sites + 2),
            top_only: UnionFind::new(sites + 1),
            percolating: false,
        })
    }

    /// Side length of the grid.
    pub fn grid_size(&self) -> usize {
        self.n
    }

    fn top(&self) -> usize {
        self.n * self.n
    }

    fn bottom(&self) -> usize {
        self.n * self.n + 1
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row < 1 || row > self.n || col < 1 || col > self.n {
            return Err(Error::SiteOutOfRange {
                row,
                col,
                n: self.n,
            });
        }
        Ok((row - 1) * self.n + (col - 1))
    }

    fn union_both(&mut self, a: usize, b: usize) -> Result<()> {
        self.full.union(a, b)?;
        self.top_only.union(a, b)?;
        Ok(())
    }

    /// Opens the site at `(row, col)`. Opening an already open site does
    /// nothing.
    ///
    /// # Errors
    /// [`Error::SiteOutOfRange`] if either coordinate is outside `[1, n]`.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let i = self.index(row, col)?;
        if self.open[i] {
            return Ok(());
        }
        self.open[i] = true;
        self.open_count += 1;

        let n = self.n;
        if col > 1 && self.open[i - 1] {
            self.union_both(i, i - 1)?;
        }
        if col < n && self.open[i + 1] {
            self.union_both(i, i + 1)?;
        }
        if row == 1 {
            let top = self.top();
            self.union_both(i, top)?;
        } else if self.open[i - n] {
            self.union_both(i, i - n)?;
        }
        if row == n {
            // bottom goes into `full` only
            let bottom = self.bottom();
            self.full.union(i, bottom)?;
        } else if self.open[i + n] {
            self.union_both(i, i + n)?;
        }

        if !self.percolating {
            let (top, bottom) = (self.top(), self.bottom());
            self.percolating = self.full.connected(top, bottom)?;
        }
        Ok(())
    }

    /// Is the site at `(row, col)` open?
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        Ok(self.open[self.index(row, col)?])
    }

    /// Is the site at `(row, col)` full, i.e. open and connected to the
    /// top row through open sites?
    pub fn is_full(&self, row: usize, col: usize) -> Result<bool> {
        let i = self.index(row, col)?;
        if !self.open[i] {
            return Ok(false);
        }
        Ok(self.top_only.root_of(i)? == self.top_only.root_of(self.top())?)
    }

    /// Number of open sites.
    pub fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    /// Fraction of the n² sites that are open.
    pub fn open_fraction(&self) -> f64 {
        self.open_count as f64 / self.open.len() as f64
    }

    /// Does the system percolate?
    ///
    /// Cached after each effective [`open`](Self::open). The value never
    /// goes back to `false` because sites are never closed.
    pub fn percolates(&self) -> bool {
        self.percolating
    }
}
