use std::collections::HashSet;

use path_defence_core::{CellCoord, Event, PaintRejection};
use path_defence_system_pathfinder::{PathfinderController, PlacementOracle};

/// Square paintable area with an optional set of cells covered by towers.
struct Board {
    side: i32,
    towers: HashSet<CellCoord>,
}

impl Board {
    fn open(side: i32) -> Self {
        Self {
            side,
            towers: HashSet::new(),
        }
    }
}

impl PlacementOracle for Board {
    fn is_allowed(&self, cell: CellCoord) -> bool {
        (0..self.side).contains(&cell.x()) && (0..self.side).contains(&cell.y())
    }

    fn is_occupied(&self, cell: CellCoord) -> bool {
        self.towers.contains(&cell)
    }
}

fn paint_all(
    controller: &mut PathfinderController,
    board: &Board,
    cells: &[(i32, i32)],
) -> Vec<Event> {
    let mut events = Vec::new();
    for &(x, y) in cells {
        controller
            .try_paint(CellCoord::new(x, y), board, &mut events)
            .unwrap_or_else(|reason| panic!("painting ({x}, {y}) failed: {reason}"));
    }
    events
}

#[test]
fn straight_row_becomes_a_valid_plan() {
    let board = Board::open(10);
    let mut controller = PathfinderController::new(5);
    let _ = paint_all(
        &mut controller,
        &board,
        &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)],
    );

    let validity = controller.plan_validity();
    assert!(validity.is_valid);
    assert_eq!(validity.count, 5);
    assert_eq!(validity.required, 5);

    let plan = controller.plan().expect("plan published");
    let walked: Vec<CellCoord> = plan.cells().to_vec();
    let forward: Vec<CellCoord> = (0..5).map(|x| CellCoord::new(x, 0)).collect();
    let mut backward = forward.clone();
    backward.reverse();
    assert!(walked == forward || walked == backward, "walk was {walked:?}");
}

#[test]
fn completing_a_square_is_rejected_as_block() {
    let board = Board::open(10);
    let mut controller = PathfinderController::new(5);
    let _ = paint_all(&mut controller, &board, &[(0, 0), (1, 0), (0, 1)]);

    let mut events = Vec::new();
    let result = controller.try_paint(CellCoord::new(1, 1), &board, &mut events);

    assert_eq!(result, Err(PaintRejection::CreatesBlock));
    assert_eq!(controller.cells().len(), 3);
    assert!(!controller.cells().contains(CellCoord::new(1, 1)));
}

#[test]
fn third_branch_off_a_cell_is_rejected_as_intersection() {
    let board = Board::open(10);
    let mut controller = PathfinderController::new(6);
    let _ = paint_all(&mut controller, &board, &[(1, 1), (0, 1), (2, 1)]);

    let mut events = Vec::new();
    let result = controller.try_paint(CellCoord::new(1, 2), &board, &mut events);

    assert_eq!(result, Err(PaintRejection::CreatesIntersection));
    assert_eq!(controller.cells().len(), 3);
}

#[test]
fn detached_tile_is_rejected_as_not_contiguous() {
    let board = Board::open(10);
    let mut controller = PathfinderController::new(5);
    let _ = paint_all(&mut controller, &board, &[(0, 0), (1, 0)]);

    let mut events = Vec::new();
    let result = controller.try_paint(CellCoord::new(5, 5), &board, &mut events);

    assert_eq!(result, Err(PaintRejection::NotContiguous));
    assert_eq!(controller.cells().len(), 2);
}

#[test]
fn repainting_and_erasing_absent_cells_are_no_ops() {
    let board = Board::open(10);
    let mut controller = PathfinderController::new(5);
    let _ = paint_all(&mut controller, &board, &[(0, 0)]);

    let mut events = Vec::new();
    assert_eq!(
        controller.try_paint(CellCoord::new(0, 0), &board, &mut events),
        Err(PaintRejection::AlreadyPainted)
    );
    assert!(!controller.erase(CellCoord::new(3, 3), &mut events));
    assert_eq!(controller.cells().len(), 1);
}

#[test]
fn area_occupancy_and_capacity_are_enforced_in_order() {
    let mut board = Board::open(4);
    let _ = board.towers.insert(CellCoord::new(0, 1));
    let mut controller = PathfinderController::new(2);
    let mut events = Vec::new();

    assert_eq!(
        controller.try_paint(CellCoord::new(-1, 0), &board, &mut events),
        Err(PaintRejection::OutOfArea)
    );
    assert_eq!(
        controller.try_paint(CellCoord::new(0, 1), &board, &mut events),
        Err(PaintRejection::Occupied)
    );

    let _ = paint_all(&mut controller, &board, &[(0, 0), (1, 0)]);
    assert_eq!(
        controller.try_paint(CellCoord::new(2, 0), &board, &mut events),
        Err(PaintRejection::AtCapacity)
    );
}

#[test]
fn erasing_from_a_valid_path_retracts_the_plan() {
    let board = Board::open(10);
    let mut controller = PathfinderController::new(3);
    let _ = paint_all(&mut controller, &board, &[(0, 0), (1, 0), (2, 0)]);
    assert!(controller.plan().is_some());

    let mut events = Vec::new();
    assert!(controller.erase(CellCoord::new(2, 0), &mut events));

    assert!(controller.plan().is_none());
    assert!(!controller.plan_validity().is_valid);
    assert!(events.contains(&Event::PathPlanChanged { plan: None }));
    assert!(events.contains(&Event::MarkersChanged {
        start: None,
        end: None
    }));
}

#[test]
fn disabling_placement_hides_markers_and_locks_editing() {
    let board = Board::open(10);
    let mut controller = PathfinderController::new(2);
    let _ = paint_all(&mut controller, &board, &[(0, 0), (0, 1)]);

    let mut events = Vec::new();
    controller.set_placement_enabled(false, &mut events);
    assert_eq!(
        events,
        vec![
            Event::PlacementToggled { enabled: false },
            Event::MarkersChanged {
                start: None,
                end: None
            },
        ]
    );
    assert!(controller.plan().is_some(), "plan survives while locked");
    assert!(!controller.erase(CellCoord::new(0, 0), &mut events));
    assert!(!controller.clear(&mut events));

    events.clear();
    controller.set_placement_enabled(true, &mut events);
    assert_eq!(
        events,
        vec![
            Event::PlacementToggled { enabled: true },
            Event::MarkersChanged {
                start: Some(CellCoord::new(0, 0)),
                end: Some(CellCoord::new(0, 1)),
            },
        ]
    );
}

#[test]
fn clearing_starts_a_fresh_path() {
    let board = Board::open(10);
    let mut controller = PathfinderController::new(2);
    let _ = paint_all(&mut controller, &board, &[(3, 3), (4, 3)]);

    let mut events = Vec::new();
    assert!(controller.clear(&mut events));

    assert!(controller.cells().is_empty());
    assert!(controller.plan().is_none());
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::CellErased { .. }))
            .count(),
        2
    );
    let _ = paint_all(&mut controller, &board, &[(7, 7)]);
}
