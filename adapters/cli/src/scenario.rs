//! Scripted sessions loaded from TOML and replayed against the world.

use std::{fmt, fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use path_defence_core::{CellCoord, Command, Event, TowerId, TowerKind};
use path_defence_world::{self as world, query, Config, World};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Scenario replayed when no file is supplied on the command line.
pub(crate) const DEFAULT_SCENARIO: &str = include_str!("../scenarios/default.toml");

const DEFAULT_AWAIT_SECONDS: f32 = 120.0;

/// Session configuration plus the ordered player actions to replay.
#[derive(Debug, Deserialize)]
pub(crate) struct Scenario {
    #[serde(default)]
    pub(crate) config: Config,
    #[serde(default)]
    pub(crate) actions: Vec<Action>,
}

impl Scenario {
    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to load scenario from {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse scenario toml contents")
    }
}

/// Single scripted player action.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub(crate) enum Action {
    Paint { x: i32, y: i32 },
    Erase { x: i32, y: i32 },
    ClearPath,
    StartWave,
    Advance { seconds: f32 },
    DamageAll { amount: u32 },
    PlaceTower { kind: TowerKind, x: i32, y: i32 },
    RemoveTower { tower: u32 },
    AwaitWaveEnd {
        #[serde(default = "default_await_seconds")]
        max_seconds: f32,
    },
}

fn default_await_seconds() -> f32 {
    DEFAULT_AWAIT_SECONDS
}

/// Totals gathered while a scenario runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) waves_ended: u32,
    pub(crate) units_spawned: u32,
    pub(crate) units_destroyed: u32,
    pub(crate) units_escaped: u32,
    pub(crate) rejections: u32,
    pub(crate) base_health: u32,
    pub(crate) coins: u32,
    pub(crate) lost: bool,
    pub(crate) elapsed: Duration,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "waves ended:     {}", self.waves_ended)?;
        writeln!(
            f,
            "units:           {} spawned, {} destroyed, {} escaped",
            self.units_spawned, self.units_destroyed, self.units_escaped
        )?;
        writeln!(f, "rejected inputs: {}", self.rejections)?;
        writeln!(f, "base health:     {}", self.base_health)?;
        writeln!(f, "coins:           {}", self.coins)?;
        writeln!(f, "simulated time:  {:.1}s", self.elapsed.as_secs_f32())?;
        write!(
            f,
            "outcome:         {}",
            if self.lost { "base destroyed" } else { "base standing" }
        )
    }
}

/// Drives a world through scripted actions using fixed-size ticks.
pub(crate) struct Runner {
    world: World,
    step: Duration,
    summary: Summary,
}

impl Runner {
    pub(crate) fn new(config: Config, step: Duration) -> Result<Self> {
        if step.is_zero() {
            bail!("tick step must be greater than zero");
        }
        let world = World::with_config(config).context("scenario configuration is invalid")?;
        Ok(Self {
            world,
            step,
            summary: Summary::default(),
        })
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Replays every action in order and reports the final totals.
    pub(crate) fn run(mut self, actions: &[Action]) -> Result<Summary> {
        for (index, action) in actions.iter().enumerate() {
            debug!(index, ?action, "scenario_action");
            self.perform(action)
                .with_context(|| format!("scenario action #{index} ({action:?}) failed"))?;
        }

        self.summary.base_health = query::base_health(&self.world);
        self.summary.coins = query::coins(&self.world);
        self.summary.lost = query::is_lost(&self.world);
        self.summary.elapsed = query::elapsed(&self.world);
        Ok(self.summary)
    }

    fn perform(&mut self, action: &Action) -> Result<()> {
        match *action {
            Action::Paint { x, y } => {
                let _ = self.submit(Command::PaintCell {
                    cell: CellCoord::new(x, y),
                });
            }
            Action::Erase { x, y } => {
                let _ = self.submit(Command::EraseCell {
                    cell: CellCoord::new(x, y),
                });
            }
            Action::ClearPath => {
                let _ = self.submit(Command::ClearPath);
            }
            Action::StartWave => {
                let _ = self.submit(Command::RequestStartWave);
            }
            Action::Advance { seconds } => {
                let total = seconds_to_duration(seconds)?;
                let _ = self.advance(total, |_| false);
            }
            Action::DamageAll { amount } => {
                for unit in query::unit_ids(&self.world) {
                    let _ = self.submit(Command::DamageUnit { unit, amount });
                }
            }
            Action::PlaceTower { kind, x, y } => {
                let _ = self.submit(Command::PlaceTower {
                    kind,
                    origin: CellCoord::new(x, y),
                });
            }
            Action::RemoveTower { tower } => {
                let _ = self.submit(Command::RemoveTower {
                    tower: TowerId::new(tower),
                });
            }
            Action::AwaitWaveEnd { max_seconds } => {
                let budget = seconds_to_duration(max_seconds)?;
                let finished = self.advance(budget, |event| {
                    matches!(event, Event::WaveEnded { .. } | Event::BaseDestroyed)
                });
                if !finished {
                    bail!(
                        "no wave ended within {max_seconds}s (current wave {}, phase {:?})",
                        query::current_wave(&self.world).number(),
                        query::wave_phase(&self.world)
                    );
                }
            }
        }
        Ok(())
    }

    /// Ticks until `total` elapsed or an event satisfies `stop`. Returns
    /// whether `stop` matched.
    fn advance(&mut self, total: Duration, stop: impl Fn(&Event) -> bool) -> bool {
        let mut remaining = total;
        while !remaining.is_zero() {
            let dt = remaining.min(self.step);
            remaining -= dt;
            let events = self.submit(Command::Tick { dt });
            if events.iter().any(&stop) {
                return true;
            }
        }
        false
    }

    fn submit(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        for event in &events {
            self.record(event);
        }
        events
    }

    fn record(&mut self, event: &Event) {
        match event {
            Event::TimeAdvanced { .. } => {}
            Event::UnitSpawned { .. } => {
                self.summary.units_spawned += 1;
                debug!(?event, "event");
            }
            Event::UnitDestroyed { .. } => {
                self.summary.units_destroyed += 1;
                debug!(?event, "event");
            }
            Event::UnitEscaped { .. } => {
                self.summary.units_escaped += 1;
                debug!(?event, "event");
            }
            Event::WaveEnded { wave } => {
                self.summary.waves_ended += 1;
                info!(wave = wave.number(), "wave_ended");
            }
            Event::PaintRejected { cell, reason } => {
                self.summary.rejections += 1;
                warn!(x = cell.x(), y = cell.y(), %reason, "paint_rejected");
            }
            Event::WaveStartRejected { reason } => {
                self.summary.rejections += 1;
                warn!(%reason, "wave_start_rejected");
            }
            Event::TowerPlacementRejected { kind, reason, .. } => {
                self.summary.rejections += 1;
                warn!(?kind, %reason, "tower_placement_rejected");
            }
            Event::TowerRemovalRejected { tower, reason } => {
                self.summary.rejections += 1;
                warn!(tower = tower.get(), %reason, "tower_removal_rejected");
            }
            Event::WaveStarted { .. }
            | Event::PhaseOneComplete { .. }
            | Event::PhaseTwoStarted { .. }
            | Event::AllWavesCompleted
            | Event::BaseDestroyed
            | Event::PathPlanChanged { .. } => info!(?event, "event"),
            _ => debug!(?event, "event"),
        }
    }
}

fn seconds_to_duration(seconds: f32) -> Result<Duration> {
    Duration::try_from_secs_f32(seconds)
        .with_context(|| format!("invalid number of seconds: {seconds}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scenario_parses() {
        let scenario = Scenario::parse(DEFAULT_SCENARIO).expect("embedded scenario parses");
        assert_eq!(scenario.config.path_length, 6);
        assert_eq!(scenario.config.waves.len(), 2);
        assert_eq!(
            scenario.actions.first(),
            Some(&Action::Paint { x: 0, y: 0 })
        );
        assert_eq!(
            scenario.actions.last(),
            Some(&Action::RemoveTower { tower: 0 })
        );
    }

    #[test]
    fn default_scenario_plays_both_waves() {
        let scenario = Scenario::parse(DEFAULT_SCENARIO).expect("embedded scenario parses");
        let runner =
            Runner::new(scenario.config, Duration::from_millis(100)).expect("valid configuration");

        let summary = runner.run(&scenario.actions).expect("scenario completes");

        assert_eq!(summary.waves_ended, 2);
        assert_eq!(summary.units_spawned, 7);
        assert_eq!(
            summary.units_destroyed + summary.units_escaped,
            summary.units_spawned
        );
        assert_eq!(summary.rejections, 0);
        assert!(!summary.lost);
        assert_eq!(summary.base_health, 100 - 10 * summary.units_escaped);
        assert_eq!(summary.coins, 100 + TowerKind::Basic.partial_refund());
    }

    #[test]
    fn omitted_sections_fall_back_to_defaults() {
        let scenario = Scenario::parse(
            r#"
            [config]
            starting_coins = 50

            [[actions]]
            action = "await_wave_end"
            "#,
        )
        .expect("partial scenario parses");

        assert_eq!(scenario.config.starting_coins, 50);
        assert_eq!(scenario.config.path_length, Config::default().path_length);
        assert_eq!(
            scenario.actions,
            vec![Action::AwaitWaveEnd {
                max_seconds: DEFAULT_AWAIT_SECONDS
            }]
        );
    }

    #[test]
    fn rejected_inputs_are_counted_not_fatal() {
        let scenario = Scenario::parse(
            r#"
            [[actions]]
            action = "start_wave"

            [[actions]]
            action = "paint"
            x = 40
            y = 0

            [[actions]]
            action = "remove_tower"
            tower = 3
            "#,
        )
        .expect("scenario parses");
        let runner = Runner::new(scenario.config, Duration::from_millis(50)).expect("valid");
        assert!(query::placement_enabled(runner.world()));

        let summary = runner.run(&scenario.actions).expect("rejections are not errors");
        assert_eq!(summary.rejections, 3);
        assert_eq!(summary.coins, 200);
    }

    #[test]
    fn waiting_for_a_wave_that_never_starts_times_out() {
        let scenario = Scenario::parse(
            r#"
            [[actions]]
            action = "await_wave_end"
            max_seconds = 2.0
            "#,
        )
        .expect("scenario parses");
        let runner = Runner::new(scenario.config, Duration::from_millis(500)).expect("valid");

        let error = runner.run(&scenario.actions).expect_err("no wave is running");
        assert!(format!("{error:#}").contains("no wave ended"));
    }

    #[test]
    fn zero_step_is_refused() {
        assert!(Runner::new(Config::default(), Duration::ZERO).is_err());
    }

    #[test]
    fn unknown_actions_are_reported() {
        let error = Scenario::parse(
            r#"
            [[actions]]
            action = "teleport"
            "#,
        )
        .expect_err("unknown action");
        assert!(format!("{error:#}").contains("scenario"));
    }
}
