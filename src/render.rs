//! Text dump of a percolation grid, for debugging.

use std::fmt;

use crate::percolation::Percolation;

/// Symbol for a site that is open and connected to the top row.
pub const FULL: char = 'F';
/// Symbol for a site that is open but not full.
pub const OPEN: char = '□';
/// Symbol for a blocked site.
pub const BLOCKED: char = '■';

/// Renders one line per row, one symbol per site, each line ending in `'\n'`.
///
/// Only reads `is_open`/`is_full`; nothing about the grid is copied.
///
/// # Examples
/// ```
/// use percolation::{render::render_grid, Percolation};
///
/// let mut p = Percolation::new(2).unwrap();
/// p.open(1, 1).unwrap();
/// p.open(2, 2).unwrap();
/// assert_eq!(render_grid(&p), "F■\n■□\n");
/// ```
pub fn render_grid(p: &Percolation) -> String {
    let n = p.grid_size();
    let mut out = String::with_capacity(n * (n + 1) * BLOCKED.len_utf8());
    for row in 1..=n {
        for col in 1..=n {
            // coordinates come from the grid's own bounds
            let symbol = if p.is_full(row, col).unwrap_or(false) {
                FULL
            } else if p.is_open(row, col).unwrap_or(false) {
                OPEN
            } else {
                BLOCKED
            };
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}

impl fmt::Display for Percolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_grid(self))
    }
}
