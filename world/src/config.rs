//! Session configuration loaded by adapters before the world is created.

use std::time::Duration;

use path_defence_core::{seconds, CellCoord, UnitKind, WaveDefinition};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunables that shape a single session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of tiles a complete path needs.
    pub path_length: usize,
    /// Cells where path tiles and towers may be placed.
    pub area: AllowedArea,
    /// Pause between two consecutive spawns.
    #[serde(with = "seconds")]
    pub spawn_interval: Duration,
    /// Seed of the spawn-kind coin.
    pub rng_seed: u64,
    /// Coins available before the first tower is bought.
    pub starting_coins: u32,
    /// Health of the defended base at the end of the path.
    pub base_health: u32,
    /// Damage dealt to the base by every escaped unit.
    pub escape_damage: u32,
    /// Statistics of light units.
    pub minion: UnitStats,
    /// Statistics of heavy units.
    pub tank: UnitStats,
    /// Waves in the order they are played.
    pub waves: Vec<WaveDefinition>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path_length: 5,
            area: AllowedArea::default(),
            spawn_interval: Duration::from_secs(3),
            rng_seed: 0x5eed_0f_da7a,
            starting_coins: 200,
            base_health: 100,
            escape_damage: 10,
            minion: UnitStats::new(100, 2.0),
            tank: UnitStats::new(300, 1.0),
            waves: vec![
                WaveDefinition::new(5, 0),
                WaveDefinition::new(8, 2),
                WaveDefinition::new(10, 5),
            ],
        }
    }
}

impl Config {
    /// Checks the configuration for values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path_length == 0 {
            return Err(ConfigError::ZeroPathLength);
        }
        if self.area.is_empty() {
            return Err(ConfigError::EmptyArea);
        }
        if self.spawn_interval.is_zero() {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if self.waves.is_empty() {
            return Err(ConfigError::NoWaves);
        }
        if self.base_health == 0 {
            return Err(ConfigError::ZeroBaseHealth);
        }
        for kind in [UnitKind::Minion, UnitKind::Tank] {
            let stats = self.unit_stats(kind);
            if stats.health == 0 {
                return Err(ConfigError::ZeroUnitHealth { kind });
            }
            if !stats.speed.is_finite() || stats.speed <= 0.0 {
                return Err(ConfigError::InvalidUnitSpeed {
                    kind,
                    speed: stats.speed,
                });
            }
        }
        Ok(())
    }

    /// Statistics used for units of the provided kind.
    #[must_use]
    pub fn unit_stats(&self, kind: UnitKind) -> UnitStats {
        match kind {
            UnitKind::Minion => self.minion,
            UnitKind::Tank => self.tank,
        }
    }
}

/// Health and movement speed of a unit kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    /// Health a freshly spawned unit starts with.
    pub health: u32,
    /// Cells travelled per second.
    pub speed: f32,
}

impl UnitStats {
    /// Creates a new statistics block.
    #[must_use]
    pub const fn new(health: u32, speed: f32) -> Self {
        Self { health, speed }
    }
}

/// Inclusive rectangle of cells open to path tiles and towers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedArea {
    /// Smallest column inside the area.
    pub min_x: i32,
    /// Smallest row inside the area.
    pub min_y: i32,
    /// Largest column inside the area.
    pub max_x: i32,
    /// Largest row inside the area.
    pub max_y: i32,
}

impl Default for AllowedArea {
    fn default() -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            max_x: 9,
            max_y: 9,
        }
    }
}

impl AllowedArea {
    /// Reports whether the cell lies inside the area.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        (self.min_x..=self.max_x).contains(&cell.x())
            && (self.min_y..=self.max_y).contains(&cell.y())
    }

    /// Reports whether the bounds cover no cell at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }
}

/// Reasons a configuration cannot start a session.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Paths need at least one tile.
    #[error("path length must be at least one tile")]
    ZeroPathLength,
    /// The allowed area bounds are inverted.
    #[error("allowed area covers no cells")]
    EmptyArea,
    /// Spawning every instant would never advance the clock.
    #[error("spawn interval must be greater than zero")]
    ZeroSpawnInterval,
    /// At least one wave is required.
    #[error("no waves configured")]
    NoWaves,
    /// The base would already be destroyed.
    #[error("base health must be greater than zero")]
    ZeroBaseHealth,
    /// Units would spawn dead.
    #[error("{kind:?} health must be greater than zero")]
    ZeroUnitHealth {
        /// Kind with the offending statistics.
        kind: UnitKind,
    },
    /// Units would never reach the end of the path.
    #[error("{kind:?} speed {speed} must be a positive number of cells per second")]
    InvalidUnitSpeed {
        /// Kind with the offending statistics.
        kind: UnitKind,
        /// Configured speed.
        speed: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn empty_wave_list_is_rejected() {
        let config = Config {
            waves: Vec::new(),
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoWaves));
    }

    #[test]
    fn stalled_units_are_rejected() {
        let config = Config {
            tank: UnitStats::new(300, 0.0),
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidUnitSpeed {
                kind: UnitKind::Tank,
                speed: 0.0,
            })
        );
    }

    #[test]
    fn area_bounds_are_inclusive() {
        let area = AllowedArea::default();
        assert!(area.contains(CellCoord::new(0, 0)));
        assert!(area.contains(CellCoord::new(9, 9)));
        assert!(!area.contains(CellCoord::new(10, 9)));
        assert!(!area.contains(CellCoord::new(0, -1)));
    }
}
