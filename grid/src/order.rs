//! Orders an unordered chain of cells into a walkable sequence.

use path_defence_core::CellCoord;

use crate::GridCellSet;

/// Walks the painted cells from one end of the chain to the other.
///
/// The walk starts at the first cell (in insertion order) with exactly one
/// painted neighbour, falling back to the first cell when no endpoint exists.
/// From there it repeatedly steps to the first unvisited neighbour in
/// right, left, up, down order. For a valid path the result holds every cell;
/// on branched or disconnected input the walk stops early, so a result
/// shorter than `cells.len()` means the input was not a simple chain.
#[must_use]
pub fn order(cells: &GridCellSet) -> Vec<CellCoord> {
    let input = cells.to_vec();
    let Some(&first) = input.first() else {
        return Vec::new();
    };

    let start = input
        .iter()
        .copied()
        .find(|cell| cells.neighbor_count(*cell) == 1)
        .unwrap_or(first);

    let mut remaining = cells.clone();
    let _ = remaining.remove(start);
    let mut ordered = Vec::with_capacity(input.len());
    ordered.push(start);
    let mut current = start;

    while !remaining.is_empty() {
        let Some(next) = current
            .neighbors()
            .find(|neighbor| remaining.contains(*neighbor))
        else {
            break;
        };
        let _ = remaining.remove(next);
        ordered.push(next);
        current = next;
    }

    ordered
}
