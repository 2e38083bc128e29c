#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave spawning scheduler that emits timed spawn requests along the published
//! path and counts the units of each kind that are still alive.

use std::time::Duration;

use path_defence_core::{
    timer::{TimerHandle, Timers},
    PathPlan, UnitKind, WaveStartRejection,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Pause between two consecutive spawns unless configured otherwise.
pub const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_secs(3);

/// Configuration parameters required to construct the scheduler.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence and seed.
    #[must_use]
    pub const fn new(spawn_interval: Duration, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            rng_seed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_SPAWN_INTERVAL, 0)
    }
}

/// Spawn request handed to the unit-instantiation collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnRequest {
    /// Kind of unit to create.
    pub kind: UnitKind,
    /// Path the unit walks.
    pub path: PathPlan,
}

/// Running counters for the wave being spawned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnState {
    /// Minions requested so far.
    pub requested_minions: u32,
    /// Tanks requested so far.
    pub requested_tanks: u32,
    /// Minions requested and not yet removed.
    pub active_minions: u32,
    /// Tanks requested and not yet removed.
    pub active_tanks: u32,
}

impl SpawnState {
    /// Units of the provided kind requested so far.
    #[must_use]
    pub const fn requested(&self, kind: UnitKind) -> u32 {
        match kind {
            UnitKind::Minion => self.requested_minions,
            UnitKind::Tank => self.requested_tanks,
        }
    }

    /// Units of the provided kind still alive.
    #[must_use]
    pub const fn active(&self, kind: UnitKind) -> u32 {
        match kind {
            UnitKind::Minion => self.active_minions,
            UnitKind::Tank => self.active_tanks,
        }
    }

    /// Units of every kind still alive.
    #[must_use]
    pub const fn total_active(&self) -> u32 {
        self.active_minions.saturating_add(self.active_tanks)
    }

    fn record_spawn(&mut self, kind: UnitKind) {
        match kind {
            UnitKind::Minion => {
                self.requested_minions += 1;
                self.active_minions += 1;
            }
            UnitKind::Tank => {
                self.requested_tanks += 1;
                self.active_tanks += 1;
            }
        }
    }

    fn active_mut(&mut self, kind: UnitKind) -> &mut u32 {
        match kind {
            UnitKind::Minion => &mut self.active_minions,
            UnitKind::Tank => &mut self.active_tanks,
        }
    }
}

/// Reasons the scheduler refuses to start a wave.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
    /// The previous wave is still spawning or still has live units.
    #[error("a wave is already spawning")]
    AlreadySpawning,
    /// No path plan has been handed to the scheduler.
    #[error("no path plan is available")]
    MissingPath,
}

impl From<SpawnError> for WaveStartRejection {
    fn from(error: SpawnError) -> Self {
        match error {
            SpawnError::AlreadySpawning => WaveStartRejection::WaveInProgress,
            SpawnError::MissingPath => WaveStartRejection::PathInvalid,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Emission;

/// Emits spawn requests on a fixed cadence until both quotas are exhausted.
#[derive(Debug)]
pub struct SpawnScheduler {
    spawn_interval: Duration,
    rng: ChaCha8Rng,
    plan: Option<PathPlan>,
    quota_minions: u32,
    quota_tanks: u32,
    state: SpawnState,
    spawning: bool,
    awaiting_clear: bool,
    timers: Timers<Emission>,
    next_emission: Option<TimerHandle>,
}

impl SpawnScheduler {
    /// Creates an idle scheduler using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            plan: None,
            quota_minions: 0,
            quota_tanks: 0,
            state: SpawnState::default(),
            spawning: false,
            awaiting_clear: false,
            timers: Timers::new(),
            next_emission: None,
        }
    }

    /// Replaces the path handed to future spawn requests.
    pub fn set_plan(&mut self, plan: Option<PathPlan>) {
        self.plan = plan;
    }

    /// Path handed to spawn requests.
    #[must_use]
    pub fn plan(&self) -> Option<&PathPlan> {
        self.plan.as_ref()
    }

    /// Starts spawning a wave with the provided quotas.
    ///
    /// Refused without touching any counter while the previous wave still
    /// spawns or has live units. The first unit is emitted by the next
    /// [`SpawnScheduler::tick`].
    pub fn start_wave(&mut self, minions: u32, tanks: u32) -> Result<(), SpawnError> {
        if let Err(error) = self.ready() {
            warn!(minions, tanks, %error, "spawn_start_ignored");
            return Err(error);
        }

        self.quota_minions = minions;
        self.quota_tanks = tanks;
        self.state = SpawnState::default();
        self.spawning = true;
        self.awaiting_clear = true;
        self.disarm();
        self.next_emission = Some(self.timers.schedule(Duration::ZERO, Emission));
        info!(minions, tanks, "spawning_started");
        Ok(())
    }

    /// Reports whether [`SpawnScheduler::start_wave`] would accept a new wave.
    pub fn ready(&self) -> Result<(), SpawnError> {
        if self.awaiting_clear {
            return Err(SpawnError::AlreadySpawning);
        }
        if self.plan.is_none() {
            return Err(SpawnError::MissingPath);
        }
        Ok(())
    }

    /// Advances the spawn clock, pushing every request that became due.
    ///
    /// A long `dt` emits one request per elapsed interval. Returns `true` when
    /// the wave is cleared during this call, which only happens here for
    /// waves whose quotas are both zero.
    pub fn tick(&mut self, dt: Duration, out: &mut Vec<SpawnRequest>) -> bool {
        self.timers.advance(dt);
        while let Some(fired) = self.timers.pop_due() {
            let Emission = fired.payload;
            self.next_emission = None;
            self.emit(out);
            if self.spawning {
                let next = fired.due.saturating_add(self.spawn_interval);
                self.next_emission = Some(self.timers.schedule_at(next, Emission));
            }
        }
        self.take_clear_signal()
    }

    /// Records that a spawned unit was destroyed or reached the end of the path.
    ///
    /// Returns `true` exactly once per wave: on the removal that leaves no
    /// live unit after both quotas were exhausted.
    pub fn unit_removed(&mut self, kind: UnitKind) -> bool {
        let active = self.state.active_mut(kind);
        if *active == 0 {
            warn!(?kind, "unit_removed_without_live_unit");
            return false;
        }
        *active -= 1;
        debug!(
            ?kind,
            active_minions = self.state.active_minions,
            active_tanks = self.state.active_tanks,
            "unit_removed"
        );
        self.take_clear_signal()
    }

    /// Stops the emission loop and forgets the wave in progress.
    pub fn cancel(&mut self) {
        self.disarm();
        self.spawning = false;
        self.awaiting_clear = false;
    }

    /// Counters for the current or most recent wave.
    #[must_use]
    pub fn state(&self) -> SpawnState {
        self.state
    }

    /// Whether units remain to be emitted.
    #[must_use]
    pub fn is_spawning(&self) -> bool {
        self.spawning
    }

    /// Whether a wave started and has not been cleared yet.
    #[must_use]
    pub fn wave_in_progress(&self) -> bool {
        self.awaiting_clear
    }

    /// Units of the provided kind still to be emitted in this wave.
    #[must_use]
    pub fn remaining(&self, kind: UnitKind) -> u32 {
        let quota = match kind {
            UnitKind::Minion => self.quota_minions,
            UnitKind::Tank => self.quota_tanks,
        };
        quota.saturating_sub(self.state.requested(kind))
    }

    fn emit(&mut self, out: &mut Vec<SpawnRequest>) {
        let Some(kind) = self.choose_kind() else {
            self.finish_spawning();
            return;
        };
        let Some(path) = self.plan.clone() else {
            warn!(?kind, "spawn_dropped_missing_path");
            self.finish_spawning();
            return;
        };

        self.state.record_spawn(kind);
        debug!(
            ?kind,
            requested_minions = self.state.requested_minions,
            requested_tanks = self.state.requested_tanks,
            "spawn_requested"
        );
        out.push(SpawnRequest { kind, path });

        if self.remaining(UnitKind::Minion) == 0 && self.remaining(UnitKind::Tank) == 0 {
            self.finish_spawning();
        }
    }

    fn choose_kind(&mut self) -> Option<UnitKind> {
        let minions_left = self.remaining(UnitKind::Minion) > 0;
        let tanks_left = self.remaining(UnitKind::Tank) > 0;
        match (minions_left, tanks_left) {
            (true, true) => Some(if self.rng.gen_bool(0.5) {
                UnitKind::Minion
            } else {
                UnitKind::Tank
            }),
            (true, false) => Some(UnitKind::Minion),
            (false, true) => Some(UnitKind::Tank),
            (false, false) => None,
        }
    }

    fn finish_spawning(&mut self) {
        if !self.spawning {
            return;
        }
        self.spawning = false;
        self.disarm();
        info!(
            minions = self.state.requested_minions,
            tanks = self.state.requested_tanks,
            "spawning_finished"
        );
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.next_emission.take() {
            let _ = self.timers.cancel(handle);
        }
    }

    fn take_clear_signal(&mut self) -> bool {
        if !self.awaiting_clear || self.spawning || self.state.total_active() > 0 {
            return false;
        }
        self.awaiting_clear = false;
        info!("wave_units_cleared");
        true
    }
}
