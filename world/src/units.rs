//! Roster of the units walking the path.
//!
//! A unit leaves the roster on its first terminal transition, either
//! destruction by damage or escape at the end of the path. Callers notify the
//! spawn scheduler from that single removal, so each unit is counted out once
//! even when damage and escape land in the same frame.

use std::{collections::BTreeMap, time::Duration};

use path_defence_core::{CellCoord, PathPlan, UnitId, UnitKind};

use crate::config::UnitStats;

#[derive(Clone, Debug)]
pub(crate) struct UnitState {
    pub(crate) id: UnitId,
    pub(crate) kind: UnitKind,
    pub(crate) health: u32,
    speed: f32,
    plan: PathPlan,
    /// Cells travelled from the start of the plan.
    progress: f32,
}

impl UnitState {
    /// Cell the unit currently stands on.
    pub(crate) fn cell(&self) -> CellCoord {
        let cells = self.plan.cells();
        // Truncation picks the cell the unit last entered.
        let index = self.progress.max(0.0) as usize;
        cells
            .get(index.min(cells.len().saturating_sub(1)))
            .copied()
            .unwrap_or_else(|| self.plan.end())
    }

    pub(crate) const fn progress(&self) -> f32 {
        self.progress
    }

    fn has_escaped(&self) -> bool {
        let last = self.plan.len().saturating_sub(1) as f32;
        self.progress >= last
    }
}

/// Result of applying damage to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DamageOutcome {
    Damaged { remaining_health: u32 },
    Destroyed { kind: UnitKind },
}

#[derive(Debug)]
pub(crate) struct UnitRoster {
    units: BTreeMap<UnitId, UnitState>,
    next_unit_id: UnitId,
}

impl UnitRoster {
    pub(crate) fn new() -> Self {
        Self {
            units: BTreeMap::new(),
            next_unit_id: UnitId::new(0),
        }
    }

    /// Places a new unit on the first cell of the plan.
    pub(crate) fn spawn(&mut self, kind: UnitKind, stats: UnitStats, plan: PathPlan) -> UnitId {
        let id = self.next_unit_id;
        self.next_unit_id = UnitId::new(id.get().saturating_add(1));
        let _ = self.units.insert(
            id,
            UnitState {
                id,
                kind,
                health: stats.health,
                speed: stats.speed,
                plan,
                progress: 0.0,
            },
        );
        id
    }

    /// Moves every unit along its plan and removes the ones that reached the
    /// end, returning them in identifier order.
    pub(crate) fn advance(&mut self, dt: Duration) -> Vec<(UnitId, UnitKind)> {
        let seconds = dt.as_secs_f32();
        for unit in self.units.values_mut() {
            unit.progress += unit.speed * seconds;
        }

        let escaped: Vec<(UnitId, UnitKind)> = self
            .units
            .values()
            .filter(|unit| unit.has_escaped())
            .map(|unit| (unit.id, unit.kind))
            .collect();
        for (id, _) in &escaped {
            let _ = self.units.remove(id);
        }
        escaped
    }

    /// Applies damage, removing the unit when its health is exhausted.
    ///
    /// Returns `None` when the unit is unknown, which includes units that
    /// already escaped or were destroyed.
    pub(crate) fn damage(&mut self, id: UnitId, amount: u32) -> Option<DamageOutcome> {
        let unit = self.units.get_mut(&id)?;
        unit.health = unit.health.saturating_sub(amount);
        if unit.health > 0 {
            return Some(DamageOutcome::Damaged {
                remaining_health: unit.health,
            });
        }
        let kind = unit.kind;
        let _ = self.units.remove(&id);
        Some(DamageOutcome::Destroyed { kind })
    }

    /// Drops every unit without reporting terminal transitions.
    pub(crate) fn clear(&mut self) {
        self.units.clear();
    }

    pub(crate) fn ids(&self) -> Vec<UnitId> {
        self.units.keys().copied().collect()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &UnitState> {
        self.units.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.units.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(len: i32) -> PathPlan {
        PathPlan::new((0..len).map(|x| CellCoord::new(x, 0)).collect()).expect("non-empty plan")
    }

    #[test]
    fn units_walk_at_their_own_speed() {
        let mut roster = UnitRoster::new();
        let fast = roster.spawn(UnitKind::Minion, UnitStats::new(100, 2.0), plan(5));
        let slow = roster.spawn(UnitKind::Tank, UnitStats::new(300, 1.0), plan(5));

        assert!(roster.advance(Duration::from_millis(1_500)).is_empty());

        let cells: BTreeMap<UnitId, CellCoord> =
            roster.iter().map(|unit| (unit.id, unit.cell())).collect();
        assert_eq!(cells[&fast], CellCoord::new(3, 0));
        assert_eq!(cells[&slow], CellCoord::new(1, 0));
    }

    #[test]
    fn reaching_the_last_cell_escapes_once() {
        let mut roster = UnitRoster::new();
        let id = roster.spawn(UnitKind::Minion, UnitStats::new(100, 2.0), plan(3));

        assert_eq!(
            roster.advance(Duration::from_secs(1)),
            vec![(id, UnitKind::Minion)]
        );
        assert!(roster.advance(Duration::from_secs(1)).is_empty());
        assert_eq!(roster.damage(id, 10), None);
    }

    #[test]
    fn lethal_damage_removes_the_unit() {
        let mut roster = UnitRoster::new();
        let id = roster.spawn(UnitKind::Tank, UnitStats::new(300, 1.0), plan(5));

        assert_eq!(
            roster.damage(id, 120),
            Some(DamageOutcome::Damaged {
                remaining_health: 180
            })
        );
        assert_eq!(
            roster.damage(id, 500),
            Some(DamageOutcome::Destroyed {
                kind: UnitKind::Tank
            })
        );
        assert_eq!(roster.len(), 0);
    }
}
