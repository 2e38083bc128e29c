#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Painted-cell storage together with the rules that decide whether the cells
//! form a path and the walk that orders them from start to end.

use std::collections::HashMap;

use path_defence_core::CellCoord;

pub mod order;
pub mod validate;

pub use order::order;

/// Set of painted cells that remembers the order cells were added in.
///
/// Membership operations are hash lookups. Iteration yields cells in
/// insertion order so that every consumer observes the same "input order".
#[derive(Clone, Debug, Default)]
pub struct GridCellSet {
    cells: HashMap<CellCoord, u64>,
    next_sequence: u64,
}

impl GridCellSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the cell. Returns `false` without changes if it was already present.
    pub fn insert(&mut self, cell: CellCoord) -> bool {
        if self.cells.contains_key(&cell) {
            return false;
        }
        let _ = self.cells.insert(cell, self.next_sequence);
        self.next_sequence = self.next_sequence.wrapping_add(1);
        true
    }

    /// Removes the cell, reporting whether it was present.
    pub fn remove(&mut self, cell: CellCoord) -> bool {
        self.cells.remove(&cell).is_some()
    }

    /// Reports whether the cell is painted.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Counts orthogonal neighbours of `cell` that are in the set.
    ///
    /// The queried cell itself does not need to be a member. A neighbour past
    /// the edge of the coordinate range counts as unpainted.
    #[must_use]
    pub fn neighbor_count(&self, cell: CellCoord) -> usize {
        cell.neighbors()
            .filter(|neighbor| self.contains(*neighbor))
            .count()
    }

    /// Number of painted cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether nothing is painted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Removes every cell.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Cells in insertion order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<CellCoord> {
        let mut ordered: Vec<(CellCoord, u64)> = self
            .cells
            .iter()
            .map(|(cell, sequence)| (*cell, *sequence))
            .collect();
        ordered.sort_by_key(|(_, sequence)| *sequence);
        ordered.into_iter().map(|(cell, _)| cell).collect()
    }

    /// Iterates over the cells in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> {
        self.to_vec().into_iter()
    }
}

impl FromIterator<CellCoord> for GridCellSet {
    fn from_iter<I: IntoIterator<Item = CellCoord>>(iter: I) -> Self {
        let mut set = Self::new();
        for cell in iter {
            let _ = set.insert(cell);
        }
        set
    }
}
