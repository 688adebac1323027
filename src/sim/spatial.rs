//! Uniform cell grid for pair searches within a cutoff.

use crate::model::types::Vec3;
use std::collections::HashMap;

type Cell = (i64, i64, i64);

/// Grid-based spatial index over atom positions.
///
/// Space is divided into cubic cells whose edge equals the search radius, so every
/// partner of an atom lies in its own cell or one of the 26 around it.
#[derive(Debug)]
pub struct SpatialGrid {
    inv_cell_size: f64,
    cells: HashMap<Cell, Vec<usize>>,
}

impl SpatialGrid {
    /// Creates an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size <= 0.0`.
    pub fn new(cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "Cell size must be positive");
        Self {
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
        }
    }

    /// Creates a grid holding every position, keyed by its slice index.
    ///
    /// # Arguments
    ///
    /// * `positions` - Atom positions in Å, in atom-index order.
    /// * `cell_size` - Cell edge in Å; use the largest cutoff the grid will serve.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size <= 0.0`.
    pub fn from_positions<'a>(positions: impl IntoIterator<Item = &'a Vec3>, cell_size: f64) -> Self {
        let mut grid = Self::new(cell_size);
        for (idx, pos) in positions.into_iter().enumerate() {
            grid.insert(idx, pos);
        }
        grid
    }

    fn cell_coords(&self, pos: &Vec3) -> Cell {
        (
            (pos.x * self.inv_cell_size).floor() as i64,
            (pos.y * self.inv_cell_size).floor() as i64,
            (pos.z * self.inv_cell_size).floor() as i64,
        )
    }

    /// Files atom `idx` under the cell containing `pos`.
    pub fn insert(&mut self, idx: usize, pos: &Vec3) {
        let cell = self.cell_coords(pos);
        self.cells.entry(cell).or_default().push(idx);
    }

    /// Every unordered pair `(i, j)` with `i < j` and separation at most `cutoff`.
    ///
    /// # Arguments
    ///
    /// * `positions` - The slice the grid was built from.
    /// * `cutoff` - Search radius in Å; must not exceed the cell size.
    ///
    /// # Returns
    ///
    /// The pairs sorted by `(i, j)`, so callers visit them in a deterministic order.
    pub fn pairs_within(&self, positions: &[Vec3], cutoff: f64) -> Vec<(usize, usize)> {
        let cutoff_sq = cutoff * cutoff;
        let mut pairs = Vec::new();

        for (&(cx, cy, cz), members) in &self.cells {
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let Some(neighbors) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                            continue;
                        };
                        for &i in members {
                            for &j in neighbors {
                                if j <= i {
                                    continue;
                                }
                                if (positions[i] - positions[j]).norm_squared() <= cutoff_sq {
                                    pairs.push((i, j));
                                }
                            }
                        }
                    }
                }
            }
        }

        pairs.sort_unstable();
        pairs
    }
}
