#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Path-construction controller that applies paint and erase actions under the
//! path rules and republishes the ordered plan whenever it changes.

use path_defence_core::{CellCoord, Event, PaintRejection, PathPlan, PlanValidity};
use path_defence_grid::{order, validate, GridCellSet};
use tracing::{debug, info};

/// Answers placement questions the controller cannot decide on its own.
pub trait PlacementOracle {
    /// Reports whether the cell lies in the paintable area.
    fn is_allowed(&self, cell: CellCoord) -> bool;

    /// Reports whether a placed structure already covers the cell.
    fn is_occupied(&self, cell: CellCoord) -> bool;
}

/// Owns the painted cells and the plan derived from them.
#[derive(Clone, Debug)]
pub struct PathfinderController {
    cells: GridCellSet,
    required_length: usize,
    placement_enabled: bool,
    plan: Option<PathPlan>,
    markers: Option<(CellCoord, CellCoord)>,
}

impl PathfinderController {
    /// Creates a controller expecting paths of exactly `required_length` cells.
    ///
    /// Painting starts enabled.
    #[must_use]
    pub fn new(required_length: usize) -> Self {
        Self {
            cells: GridCellSet::new(),
            required_length,
            placement_enabled: true,
            plan: None,
            markers: None,
        }
    }

    /// Attempts to paint the cell.
    ///
    /// The cell is added to a copy of the painted set and the whole copy is
    /// re-validated; only a copy that passes every rule replaces the live set.
    /// Rejections leave the controller untouched.
    pub fn try_paint<O>(
        &mut self,
        cell: CellCoord,
        oracle: &O,
        out: &mut Vec<Event>,
    ) -> Result<(), PaintRejection>
    where
        O: PlacementOracle + ?Sized,
    {
        match self.paint_candidate(cell, oracle) {
            Ok(candidate) => {
                self.cells = candidate;
                debug!(x = cell.x(), y = cell.y(), count = self.cells.len(), "cell_painted");
                out.push(Event::CellPainted { cell });
                self.refresh(out);
                Ok(())
            }
            Err(reason) => {
                debug!(x = cell.x(), y = cell.y(), %reason, "paint_rejected");
                out.push(Event::PaintRejected { cell, reason });
                Err(reason)
            }
        }
    }

    /// Erases the cell. Returns `false` when editing is disabled or the cell
    /// carries no path tile.
    pub fn erase(&mut self, cell: CellCoord, out: &mut Vec<Event>) -> bool {
        if !self.placement_enabled || !self.cells.remove(cell) {
            return false;
        }
        debug!(x = cell.x(), y = cell.y(), count = self.cells.len(), "cell_erased");
        out.push(Event::CellErased { cell });
        self.refresh(out);
        true
    }

    /// Erases every painted cell so a fresh path can be drawn.
    ///
    /// Returns `false` when editing is disabled.
    pub fn clear(&mut self, out: &mut Vec<Event>) -> bool {
        if !self.placement_enabled {
            return false;
        }
        for cell in self.cells.to_vec() {
            out.push(Event::CellErased { cell });
        }
        self.cells.clear();
        self.refresh(out);
        true
    }

    /// Enables or disables paint and erase actions.
    ///
    /// While disabled the start and end markers stay hidden regardless of the
    /// painted cells.
    pub fn set_placement_enabled(&mut self, enabled: bool, out: &mut Vec<Event>) {
        if self.placement_enabled == enabled {
            return;
        }
        self.placement_enabled = enabled;
        info!(enabled, "path_placement_toggled");
        out.push(Event::PlacementToggled { enabled });
        self.publish_markers(out);
    }

    /// Measures the painted cells against the path rules.
    #[must_use]
    pub fn plan_validity(&self) -> PlanValidity {
        PlanValidity {
            count: self.cells.len(),
            required: self.required_length,
            is_valid: validate::is_valid_plan(&self.cells, self.required_length),
        }
    }

    /// Currently published plan, present only while the painted cells are valid.
    #[must_use]
    pub fn plan(&self) -> Option<&PathPlan> {
        self.plan.as_ref()
    }

    /// Painted cells.
    #[must_use]
    pub fn cells(&self) -> &GridCellSet {
        &self.cells
    }

    /// Whether paint and erase actions are accepted.
    #[must_use]
    pub fn placement_enabled(&self) -> bool {
        self.placement_enabled
    }

    /// Number of cells a complete path needs.
    #[must_use]
    pub fn required_length(&self) -> usize {
        self.required_length
    }

    fn paint_candidate<O>(
        &self,
        cell: CellCoord,
        oracle: &O,
    ) -> Result<GridCellSet, PaintRejection>
    where
        O: PlacementOracle + ?Sized,
    {
        if !self.placement_enabled {
            return Err(PaintRejection::PlacementDisabled);
        }
        if !oracle.is_allowed(cell) {
            return Err(PaintRejection::OutOfArea);
        }
        if oracle.is_occupied(cell) {
            return Err(PaintRejection::Occupied);
        }
        if self.cells.contains(cell) {
            return Err(PaintRejection::AlreadyPainted);
        }
        if self.cells.len() >= self.required_length {
            return Err(PaintRejection::AtCapacity);
        }

        let mut candidate = self.cells.clone();
        let _ = candidate.insert(cell);
        match validate::first_violation(&candidate) {
            Some(violation) => Err(violation.into()),
            None => Ok(candidate),
        }
    }

    fn refresh(&mut self, out: &mut Vec<Event>) {
        let plan = if validate::is_valid_plan(&self.cells, self.required_length) {
            let ordered = order(&self.cells);
            if ordered.len() == self.cells.len() {
                PathPlan::new(ordered)
            } else {
                None
            }
        } else {
            None
        };

        if plan != self.plan {
            match &plan {
                Some(plan) => info!(
                    length = plan.len(),
                    start_x = plan.start().x(),
                    start_y = plan.start().y(),
                    "path_plan_published"
                ),
                None => info!("path_plan_retracted"),
            }
            self.plan = plan.clone();
            out.push(Event::PathPlanChanged { plan });
        }

        self.publish_markers(out);
    }

    fn publish_markers(&mut self, out: &mut Vec<Event>) {
        let markers = if self.placement_enabled {
            self.plan.as_ref().map(|plan| (plan.start(), plan.end()))
        } else {
            None
        };

        if markers == self.markers {
            return;
        }
        self.markers = markers;
        out.push(Event::MarkersChanged {
            start: markers.map(|(start, _)| start),
            end: markers.map(|(_, end)| end),
        });
    }
}
