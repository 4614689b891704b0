//! Disjoint-set (Union-Find) data structure.
//!
//! Maintains a collection of disjoint sets over elements `0..n` with
//! near-constant-time union and find operations.
//!
//! # Algorithm
//!
//! Uses **path halving** during `find` and **union by size** during
//! `union`. Together they give amortized O(α(n)) per operation, where α
//! is the inverse Ackermann function. Union by size alone bounds every
//! tree's height by ⌊log₂ n⌋, which is what makes the non-compressing
//! [`UnionFind::root_of`] usable from a shared reference.
//!
//! # References
//!
//! - Tarjan (1975), "Efficiency of a Good but Not Linear Set Union Algorithm"
//! - Tarjan & van Leeuwen (1984), "Worst-Case Analysis of Set Union Algorithms"

use crate::error::{Error, Result};

/// Disjoint-set forest with path halving and union by size.
///
/// Element indices are checked: any index `>= len()` yields
/// [`Error::IndexOutOfRange`] instead of a panic.
///
/// # Examples
/// ```
/// use percolation::collections::UnionFind;
///
/// let mut uf = UnionFind::new(5);
/// assert_eq!(uf.component_count(), 5);
///
/// uf.union(0, 1).unwrap();
/// uf.union(2, 3).unwrap();
/// assert_eq!(uf.component_count(), 3);
///
/// assert!(uf.connected(0, 1).unwrap());
/// assert!(!uf.connected(0, 2).unwrap());
///
/// uf.union(1, 3).unwrap();
/// assert!(uf.connected(0, 2).unwrap()); // transitivity
/// assert!(uf.union(7, 0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl UnionFind {
    /// Creates a new Union-Find with `n` disjoint singleton sets `{0}, {1}, ..., {n-1}`.
    ///
    /// # Complexity
    /// O(n)
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    fn check(&self, x: usize) -> Result<()> {
        if x < self.parent.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index: x,
                len: self.parent.len(),
            })
        }
    }

    /// Finds the representative (root) of the set containing `x`.
    ///
    /// Applies **path halving**: every visited node is re-pointed at its
    /// grandparent, roughly halving the path on each traversal.
    ///
    /// # Complexity
    /// Amortized O(α(n))
    ///
    /// # Errors
    /// [`Error::IndexOutOfRange`] if `x >= len()`.
    pub fn find(&mut self, x: usize) -> Result<usize> {
        self.check(x)?;
        let mut x = x;
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        Ok(x)
    }

    /// Finds the root of `x` without compressing the path.
    ///
    /// # Complexity
    /// O(log n) worst case, guaranteed by union by size.
    ///
    /// # Errors
    /// [`Error::IndexOutOfRange`] if `x >= len()`.
    pub fn root_of(&self, x: usize) -> Result<usize> {
        self.check(x)?;
        let mut x = x;
        while self.parent[x] != x {
            x = self.parent[x];
        }
        Ok(x)
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// Uses **union by size**: the root of the smaller tree is attached
    /// under the root of the larger one. On equal sizes, `y`'s root goes
    /// under `x`'s root.
    ///
    /// # Returns
    /// `Ok(true)` if `x` and `y` were in different sets (and are now merged),
    /// `Ok(false)` if they were already in the same set.
    ///
    /// # Errors
    /// [`Error::IndexOutOfRange`] if either index is `>= len()`. Nothing
    /// is merged in that case.
    pub fn union(&mut self, x: usize, y: usize) -> Result<bool> {
        self.check(y)?;
        let mut root_x = self.find(x)?;
        let mut root_y = self.find(y)?;

        if root_x == root_y {
            return Ok(false);
        }

        if self.size[root_x] < self.size[root_y] {
            std::mem::swap(&mut root_x, &mut root_y);
        }
        self.parent[root_y] = root_x;
        self.size[root_x] += self.size[root_y];

        self.components -= 1;
        Ok(true)
    }

    /// Returns `true` if `x` and `y` are in the same set.
    ///
    /// # Complexity
    /// Amortized O(α(n))
    pub fn connected(&mut self, x: usize, y: usize) -> Result<bool> {
        self.check(y)?;
        Ok(self.find(x)? == self.find(y)?)
    }

    /// Returns the number of disjoint sets.
    ///
    /// # Complexity
    /// O(1)
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Returns the size of the set containing `x`.
    pub fn component_size(&mut self, x: usize) -> Result<usize> {
        let root = self.find(x)?;
        Ok(self.size[root])
    }
}
