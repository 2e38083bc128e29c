//! Authoritative tower state management utilities.

use std::collections::BTreeMap;

use path_defence_core::{CellCoord, CellRect, TowerId, TowerKind, TowerSnapshot};

/// Snapshot of a tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    /// Identifier allocated by the world for the tower.
    pub(crate) id: TowerId,
    /// Kind of tower that was constructed.
    pub(crate) kind: TowerKind,
    /// Region of cells occupied by the tower.
    pub(crate) region: CellRect,
    /// Whether removal still returns the full cost.
    pub(crate) refundable: bool,
}

impl TowerState {
    /// Coins returned when the tower is removed now.
    pub(crate) const fn refund(&self) -> u32 {
        if self.refundable {
            self.kind.cost()
        } else {
            self.kind.partial_refund()
        }
    }

    pub(crate) const fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            region: self.region,
            refundable: self.refundable,
        }
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Stores a refundable tower and returns its freshly allocated identifier.
    pub(crate) fn insert(&mut self, kind: TowerKind, region: CellRect) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(
            id,
            TowerState {
                id,
                kind,
                region,
                refundable: true,
            },
        );
        id
    }

    pub(crate) fn remove(&mut self, id: TowerId) -> Option<TowerState> {
        self.entries.remove(&id)
    }

    /// Reports whether any tower covers the cell.
    pub(crate) fn occupies(&self, cell: CellCoord) -> bool {
        self.entries.values().any(|tower| tower.region.contains(cell))
    }

    /// Reports whether any cell of the region is covered by a tower.
    pub(crate) fn overlaps(&self, region: CellRect) -> bool {
        region.cells().any(|cell| self.occupies(cell))
    }

    /// Marks every tower as built before the running wave.
    pub(crate) fn lock_refunds(&mut self) {
        for tower in self.entries.values_mut() {
            tower.refundable = false;
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }
}
