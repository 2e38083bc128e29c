//! Structural rules a painted cell set must satisfy to count as a path.
//!
//! A path is a simple chain: exactly the required number of cells, no fully
//! painted two by two square, no cell with more than two painted neighbours,
//! and every cell reachable from every other through orthogonal steps.

use std::collections::{HashSet, VecDeque};

use path_defence_core::{CellCoord, PaintRejection};

use crate::GridCellSet;

/// Structural rule broken by a cell set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Violation {
    /// Some cell completes a fully painted two by two square.
    SquareBlock,
    /// Some cell has more than two painted neighbours.
    Intersection,
    /// The cells fall apart into more than one connected piece.
    Disconnected,
}

impl From<Violation> for PaintRejection {
    fn from(violation: Violation) -> Self {
        match violation {
            Violation::SquareBlock => PaintRejection::CreatesBlock,
            Violation::Intersection => PaintRejection::CreatesIntersection,
            Violation::Disconnected => PaintRejection::NotContiguous,
        }
    }
}

/// Reports whether some cell has its right, upper and upper-right neighbours painted.
#[must_use]
pub fn has_square_block(cells: &GridCellSet) -> bool {
    let painted = |cell: CellCoord, dx: i32, dy: i32| {
        cell.offset(dx, dy)
            .is_some_and(|corner| cells.contains(corner))
    };
    cells
        .iter()
        .any(|cell| painted(cell, 1, 0) && painted(cell, 0, 1) && painted(cell, 1, 1))
}

/// Reports whether some cell has more than two painted neighbours.
#[must_use]
pub fn has_intersection(cells: &GridCellSet) -> bool {
    cells.iter().any(|cell| cells.neighbor_count(cell) > 2)
}

/// Reports whether a breadth-first walk from one cell reaches all of them.
///
/// Empty and single-cell sets are contiguous.
#[must_use]
pub fn is_contiguous(cells: &GridCellSet) -> bool {
    let Some(seed) = cells.iter().next() else {
        return true;
    };

    let mut visited: HashSet<CellCoord> = HashSet::with_capacity(cells.len());
    let mut queue = VecDeque::new();
    let _ = visited.insert(seed);
    queue.push_back(seed);

    while let Some(cell) = queue.pop_front() {
        for neighbor in cell.neighbors() {
            if !cells.contains(neighbor) {
                continue;
            }
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    visited.len() == cells.len()
}

/// Reports whether the set holds exactly the required number of cells.
#[must_use]
pub fn is_complete_length(cells: &GridCellSet, required: usize) -> bool {
    cells.len() == required
}

/// First structural rule the set breaks, checking blocks, then intersections,
/// then contiguity.
#[must_use]
pub fn first_violation(cells: &GridCellSet) -> Option<Violation> {
    if has_square_block(cells) {
        Some(Violation::SquareBlock)
    } else if has_intersection(cells) {
        Some(Violation::Intersection)
    } else if !is_contiguous(cells) {
        Some(Violation::Disconnected)
    } else {
        None
    }
}

/// Composite rule: complete length and no structural violation.
#[must_use]
pub fn is_valid_plan(cells: &GridCellSet, required: usize) -> bool {
    is_complete_length(cells, required) && first_violation(cells).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(cells: &[(i32, i32)]) -> GridCellSet {
        cells
            .iter()
            .map(|&(x, y)| CellCoord::new(x, y))
            .collect()
    }

    #[test]
    fn detects_square_block() {
        assert!(has_square_block(&set(&[(0, 0), (1, 0), (0, 1), (1, 1)])));
        assert!(!has_square_block(&set(&[(0, 0), (1, 0), (0, 1)])));
    }

    #[test]
    fn detects_intersection() {
        let t_shape = set(&[(0, 0), (1, 0), (-1, 0), (0, 1)]);
        assert!(has_intersection(&t_shape));
        assert!(!has_intersection(&set(&[(0, 0), (1, 0), (1, 1)])));
    }

    #[test]
    fn empty_and_singleton_sets_are_contiguous() {
        assert!(is_contiguous(&GridCellSet::new()));
        assert!(is_contiguous(&set(&[(4, 4)])));
    }

    #[test]
    fn diagonal_cells_are_not_contiguous() {
        assert!(!is_contiguous(&set(&[(0, 0), (1, 1)])));
        assert!(is_contiguous(&set(&[(0, 0), (1, 0), (1, 1)])));
    }

    #[test]
    fn length_check_is_exact() {
        let cells = set(&[(0, 0), (1, 0), (2, 0)]);
        assert!(is_complete_length(&cells, 3));
        assert!(!is_complete_length(&cells, 2));
        assert!(!is_complete_length(&cells, 4));
    }

    #[test]
    fn violations_are_reported_in_rule_order() {
        let block_and_branch = set(&[(0, 0), (1, 0), (0, 1), (1, 1), (2, 0)]);
        assert_eq!(
            first_violation(&block_and_branch),
            Some(Violation::SquareBlock)
        );
        assert_eq!(
            first_violation(&set(&[(0, 0), (5, 5)])),
            Some(Violation::Disconnected)
        );
        assert_eq!(
            PaintRejection::from(Violation::Intersection),
            PaintRejection::CreatesIntersection
        );
    }

    #[test]
    fn l_shaped_chain_is_a_valid_plan() {
        let cells = set(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]);
        assert!(is_valid_plan(&cells, 5));
        assert!(!is_valid_plan(&cells, 6));
    }
}
