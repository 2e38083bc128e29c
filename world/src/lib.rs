#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Path Defence.
//!
//! The world owns every piece of session state: the path controller, the
//! spawn scheduler, the wave controller, the unit roster, the tower registry,
//! the coin ledger and the defended base. Adapters mutate it exclusively via
//! [`apply`] and observe it through [`query`].

mod config;
mod economy;
mod towers;
mod units;

use std::time::Duration;

use path_defence_core::{
    CellCoord, CellRect, Command, Event, PlacementError, RemovalError, TowerId, TowerKind, UnitId,
    WaveStartRejection,
};
use path_defence_system_pathfinder::{PathfinderController, PlacementOracle};
use path_defence_system_spawning::{self as spawning, SpawnRequest, SpawnScheduler};
use path_defence_system_waves::WaveController;
use tracing::{debug, info, warn};

pub use config::{AllowedArea, Config, ConfigError, UnitStats};

use economy::CoinLedger;
use towers::TowerRegistry;
use units::{DamageOutcome, UnitRoster};

/// Represents the authoritative Path Defence world state.
#[derive(Debug)]
pub struct World {
    config: Config,
    pathfinder: PathfinderController,
    spawner: SpawnScheduler,
    waves: WaveController,
    units: UnitRoster,
    towers: TowerRegistry,
    coins: CoinLedger,
    base_health: u32,
    lost: bool,
    elapsed: Duration,
}

impl World {
    /// Creates a world using the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_config(Config::default())
    }

    /// Creates a world from an adapter-supplied configuration.
    pub fn with_config(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: Config) -> Self {
        let spawner = SpawnScheduler::new(spawning::Config::new(
            config.spawn_interval,
            config.rng_seed,
        ));
        Self {
            pathfinder: PathfinderController::new(config.path_length),
            spawner,
            waves: WaveController::new(config.waves.clone()),
            units: UnitRoster::new(),
            towers: TowerRegistry::new(),
            coins: CoinLedger::new(config.starting_coins),
            base_health: config.base_health,
            lost: false,
            elapsed: Duration::ZERO,
            config,
        }
    }

    fn sync_plan(&mut self) {
        self.spawner.set_plan(self.pathfinder.plan().cloned());
    }

    fn advance(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.elapsed = self.elapsed.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });
        if self.lost {
            return;
        }

        let mut cleared = false;
        for (unit, kind) in self.units.advance(dt) {
            debug!(unit = unit.get(), ?kind, "unit_escaped");
            out_events.push(Event::UnitEscaped { unit, kind });
            if self.spawner.unit_removed(kind) {
                cleared = true;
            }
            self.damage_base(out_events);
        }
        if self.lost {
            return;
        }

        let mut requests = Vec::new();
        if self.spawner.tick(dt, &mut requests) {
            cleared = true;
        }
        for request in requests {
            self.spawn_unit(request, out_events);
        }

        if self.waves.tick(dt, out_events) {
            self.pathfinder.set_placement_enabled(true, out_events);
        }

        if cleared {
            let _ = self.waves.phase_one_complete(out_events);
        }
    }

    fn spawn_unit(&mut self, request: SpawnRequest, out_events: &mut Vec<Event>) {
        let SpawnRequest { kind, path } = request;
        let cell = path.start();
        let stats = self.config.unit_stats(kind);
        let unit = self.units.spawn(kind, stats, path);
        debug!(unit = unit.get(), ?kind, x = cell.x(), y = cell.y(), "unit_spawned");
        out_events.push(Event::UnitSpawned { unit, kind, cell });
    }

    fn damage_base(&mut self, out_events: &mut Vec<Event>) {
        if self.lost {
            return;
        }
        self.base_health = self.base_health.saturating_sub(self.config.escape_damage);
        out_events.push(Event::BaseDamaged {
            remaining_health: self.base_health,
        });
        if self.base_health > 0 {
            return;
        }

        self.lost = true;
        warn!("base_destroyed");
        out_events.push(Event::BaseDestroyed);
        self.spawner.cancel();
        self.waves.cancel();
        self.units.clear();
    }

    fn damage_unit(&mut self, unit: UnitId, amount: u32, out_events: &mut Vec<Event>) {
        match self.units.damage(unit, amount) {
            Some(DamageOutcome::Damaged { remaining_health }) => {
                out_events.push(Event::UnitDamaged {
                    unit,
                    remaining_health,
                });
            }
            Some(DamageOutcome::Destroyed { kind }) => {
                debug!(unit = unit.get(), ?kind, "unit_destroyed");
                out_events.push(Event::UnitDestroyed { unit, kind });
                if self.spawner.unit_removed(kind) {
                    let _ = self.waves.phase_one_complete(out_events);
                }
            }
            None => debug!(unit = unit.get(), "damage_ignored_unknown_unit"),
        }
    }

    fn request_start_wave(&mut self, out_events: &mut Vec<Event>) {
        if self.lost {
            reject_wave_start(WaveStartRejection::SessionLost, out_events);
            return;
        }
        if self.spawner.wave_in_progress() {
            reject_wave_start(WaveStartRejection::WaveInProgress, out_events);
            return;
        }

        self.sync_plan();
        let path_valid = self.spawner.ready().is_ok();
        let Ok(definition) = self.waves.request_start(path_valid, out_events) else {
            return;
        };

        if let Err(error) = self.spawner.start_wave(definition.minions, definition.tanks) {
            warn!(%error, "wave_start_aborted");
            self.waves.cancel();
            reject_wave_start(error.into(), out_events);
            return;
        }
        self.pathfinder.set_placement_enabled(false, out_events);
        self.towers.lock_refunds();
    }

    fn place_tower(&mut self, kind: TowerKind, origin: CellCoord, out_events: &mut Vec<Event>) {
        let region = CellRect::from_origin_and_size(origin, kind.footprint());
        if let Err(reason) = self.claim_tower_site(kind, region) {
            debug!(?kind, x = origin.x(), y = origin.y(), %reason, "tower_placement_rejected");
            out_events.push(Event::TowerPlacementRejected {
                kind,
                origin,
                reason,
            });
            return;
        }

        let tower = self.towers.insert(kind, region);
        info!(tower = tower.get(), ?kind, x = origin.x(), y = origin.y(), "tower_placed");
        out_events.push(Event::TowerPlaced {
            tower,
            kind,
            region,
        });
        out_events.push(Event::CoinsChanged {
            balance: self.coins.balance(),
        });
    }

    /// Validates the footprint and charges the tower's cost.
    fn claim_tower_site(
        &mut self,
        kind: TowerKind,
        region: CellRect,
    ) -> Result<(), PlacementError> {
        if !region.is_representable()
            || !region.cells().all(|cell| self.config.area.contains(cell))
        {
            return Err(PlacementError::OutOfBounds);
        }
        if self.towers.overlaps(region) {
            return Err(PlacementError::Occupied);
        }
        if region.cells().any(|cell| self.pathfinder.cells().contains(cell)) {
            return Err(PlacementError::OnPath);
        }
        if !self.coins.spend(kind.cost()) {
            return Err(PlacementError::InsufficientFunds);
        }
        Ok(())
    }

    fn remove_tower(&mut self, tower: TowerId, out_events: &mut Vec<Event>) {
        let Some(state) = self.towers.remove(tower) else {
            let reason = RemovalError::MissingTower;
            debug!(tower = tower.get(), %reason, "tower_removal_rejected");
            out_events.push(Event::TowerRemovalRejected { tower, reason });
            return;
        };

        let refund = state.refund();
        self.coins.add(refund);
        info!(tower = tower.get(), refund, "tower_removed");
        out_events.push(Event::TowerRemoved {
            tower,
            region: state.region,
            refund,
        });
        out_events.push(Event::CoinsChanged {
            balance: self.coins.balance(),
        });
    }
}

fn reject_wave_start(reason: WaveStartRejection, out_events: &mut Vec<Event>) {
    debug!(%reason, "wave_start_rejected");
    out_events.push(Event::WaveStartRejected { reason });
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Answers placement questions from the allowed area and the standing towers.
struct Placement<'a> {
    area: &'a AllowedArea,
    towers: &'a TowerRegistry,
}

impl PlacementOracle for Placement<'_> {
    fn is_allowed(&self, cell: CellCoord) -> bool {
        self.area.contains(cell)
    }

    fn is_occupied(&self, cell: CellCoord) -> bool {
        self.towers.occupies(cell)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.advance(dt, out_events),
        Command::PaintCell { cell } => {
            let oracle = Placement {
                area: &world.config.area,
                towers: &world.towers,
            };
            if world.pathfinder.try_paint(cell, &oracle, out_events).is_ok() {
                world.sync_plan();
            }
        }
        Command::EraseCell { cell } => {
            if world.pathfinder.erase(cell, out_events) {
                world.sync_plan();
            }
        }
        Command::ClearPath => {
            if world.pathfinder.clear(out_events) {
                world.sync_plan();
            }
        }
        Command::RequestStartWave => world.request_start_wave(out_events),
        Command::DamageUnit { unit, amount } => world.damage_unit(unit, amount, out_events),
        Command::PlaceTower { kind, origin } => world.place_tower(kind, origin, out_events),
        Command::RemoveTower { tower } => world.remove_tower(tower, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use path_defence_core::{
        CellCoord, PathPlan, PlanValidity, TowerSnapshot, UnitId, UnitKind, WaveIndex, WavePhase,
    };
    use path_defence_grid::GridCellSet;
    use path_defence_system_spawning::SpawnState;

    /// Painted path cells.
    #[must_use]
    pub fn painted_cells(world: &World) -> &GridCellSet {
        world.pathfinder.cells()
    }

    /// Measures the painted cells against the path rules.
    #[must_use]
    pub fn plan_validity(world: &World) -> PlanValidity {
        world.pathfinder.plan_validity()
    }

    /// Published path plan, present only while the painted cells are valid.
    #[must_use]
    pub fn path_plan(world: &World) -> Option<&PathPlan> {
        world.pathfinder.plan()
    }

    /// Whether path tiles can currently be painted or erased.
    #[must_use]
    pub fn placement_enabled(world: &World) -> bool {
        world.pathfinder.placement_enabled()
    }

    /// Current wave lifecycle phase.
    #[must_use]
    pub fn wave_phase(world: &World) -> WavePhase {
        world.waves.phase()
    }

    /// Wave that is running or will start next.
    #[must_use]
    pub fn current_wave(world: &World) -> WaveIndex {
        world.waves.current_wave()
    }

    /// Number of waves the session was configured with.
    #[must_use]
    pub fn wave_count(world: &World) -> usize {
        world.waves.wave_count()
    }

    /// Whether the final wave already ended.
    #[must_use]
    pub fn waves_exhausted(world: &World) -> bool {
        world.waves.is_exhausted()
    }

    /// Whole seconds left in the survival countdown, if it is running.
    #[must_use]
    pub fn countdown_remaining(world: &World) -> Option<u32> {
        world.waves.countdown_remaining()
    }

    /// Units of each kind requested and still alive in the current wave.
    #[must_use]
    pub fn spawn_state(world: &World) -> SpawnState {
        world.spawner.state()
    }

    /// Captures the units walking the path in identifier order.
    #[must_use]
    pub fn units(world: &World) -> Vec<UnitSnapshot> {
        world
            .units
            .iter()
            .map(|unit| UnitSnapshot {
                id: unit.id,
                kind: unit.kind,
                health: unit.health,
                cell: unit.cell(),
                progress: unit.progress(),
            })
            .collect()
    }

    /// Identifiers of every unit on the path.
    #[must_use]
    pub fn unit_ids(world: &World) -> Vec<UnitId> {
        world.units.ids()
    }

    /// Number of units on the path.
    #[must_use]
    pub fn unit_count(world: &World) -> usize {
        world.units.len()
    }

    /// Captures the placed towers in identifier order.
    #[must_use]
    pub fn towers(world: &World) -> Vec<TowerSnapshot> {
        world.towers.iter().map(|tower| tower.snapshot()).collect()
    }

    /// Coins available to the player.
    #[must_use]
    pub fn coins(world: &World) -> u32 {
        world.coins.balance()
    }

    /// Remaining health of the defended base.
    #[must_use]
    pub fn base_health(world: &World) -> u32 {
        world.base_health
    }

    /// Whether the base fell and the session is over.
    #[must_use]
    pub fn is_lost(world: &World) -> bool {
        world.lost
    }

    /// Simulated time accumulated by ticks.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Immutable representation of a single unit's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct UnitSnapshot {
        /// Unique identifier assigned to the unit.
        pub id: UnitId,
        /// Kind of the unit.
        pub kind: UnitKind,
        /// Health left on the unit.
        pub health: u32,
        /// Cell the unit stands on.
        pub cell: CellCoord,
        /// Cells travelled from the start of the path.
        pub progress: f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_oracle_combines_area_and_towers() {
        let area = AllowedArea::default();
        let mut towers = TowerRegistry::new();
        let _ = towers.insert(
            TowerKind::Basic,
            CellRect::from_origin_and_size(CellCoord::new(4, 4), TowerKind::Basic.footprint()),
        );
        let oracle = Placement {
            area: &area,
            towers: &towers,
        };

        assert!(oracle.is_allowed(CellCoord::new(9, 0)));
        assert!(!oracle.is_allowed(CellCoord::new(-1, 0)));
        assert!(oracle.is_occupied(CellCoord::new(5, 5)));
        assert!(!oracle.is_occupied(CellCoord::new(6, 5)));
    }

    #[test]
    fn busy_spawner_refuses_the_wave_before_it_starts() {
        let config = Config {
            path_length: 2,
            waves: vec![path_defence_core::WaveDefinition::new(1, 0)],
            ..Config::default()
        };
        let mut world = World::with_config(config).expect("valid config");
        let mut events = Vec::new();
        for x in 0..2 {
            apply(
                &mut world,
                Command::PaintCell {
                    cell: CellCoord::new(x, 0),
                },
                &mut events,
            );
        }
        apply(&mut world, Command::RequestStartWave, &mut events);
        assert!(world.spawner.wave_in_progress());

        // Wave controller back at idle while the spawner still owes its units.
        world.waves.cancel();
        events.clear();
        apply(&mut world, Command::RequestStartWave, &mut events);

        assert_eq!(
            events,
            vec![Event::WaveStartRejected {
                reason: WaveStartRejection::WaveInProgress
            }]
        );
        assert_eq!(query::wave_phase(&world), path_defence_core::WavePhase::Idle);
    }

    #[test]
    fn tower_footprint_past_the_coordinate_range_is_out_of_bounds() {
        let config = Config {
            area: AllowedArea {
                min_x: i32::MAX - 3,
                min_y: 0,
                max_x: i32::MAX,
                max_y: 3,
            },
            ..Config::default()
        };
        let mut world = World::with_config(config).expect("valid config");

        assert_eq!(
            world.claim_tower_site(
                TowerKind::Basic,
                CellRect::from_origin_and_size(
                    CellCoord::new(i32::MAX, 0),
                    TowerKind::Basic.footprint()
                ),
            ),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            world.claim_tower_site(
                TowerKind::Basic,
                CellRect::from_origin_and_size(
                    CellCoord::new(i32::MAX - 1, 0),
                    TowerKind::Basic.footprint()
                ),
            ),
            Ok(())
        );
    }

    #[test]
    fn invalid_configuration_is_refused() {
        let config = Config {
            path_length: 0,
            ..Config::default()
        };
        assert!(matches!(
            World::with_config(config),
            Err(ConfigError::ZeroPathLength)
        ));
    }
}
