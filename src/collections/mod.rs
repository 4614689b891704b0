//! Data structures backing the percolation model.
//!
//! # Available Structures
//!
//! - [`UnionFind`]: Disjoint-set forest with path halving and union by size

mod union_find;

pub use union_find::UnionFind;
