#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Path Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the path, spawning and wave systems. Adapters
//! submit [`Command`] values describing player intent, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values that presentation layers react to. Nothing in this crate mutates
//! state on its own; it only names the values that flow between components.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod seconds;
pub mod timer;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a path tile be painted onto the provided cell.
    PaintCell {
        /// Cell the player attempted to paint.
        cell: CellCoord,
    },
    /// Requests that a painted path tile be erased.
    EraseCell {
        /// Cell the player attempted to erase.
        cell: CellCoord,
    },
    /// Discards every painted tile so a fresh path can be drawn.
    ClearPath,
    /// Requests that the next wave begins.
    RequestStartWave,
    /// Applies damage to a spawned unit on behalf of an external combat collaborator.
    DamageUnit {
        /// Identifier of the unit being damaged.
        unit: UnitId,
        /// Amount of health removed from the unit.
        amount: u32,
    },
    /// Requests placement of a tower anchored at the provided origin cell.
    PlaceTower {
        /// Type of tower to construct at the origin.
        kind: TowerKind,
        /// Lower-left cell that defines the tower's footprint.
        origin: CellCoord,
    },
    /// Requests removal of an existing tower from the world.
    RemoveTower {
        /// Identifier of the tower targeted for removal.
        tower: TowerId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a path tile was painted.
    CellPainted {
        /// Cell that now carries a path tile.
        cell: CellCoord,
    },
    /// Reports that a paint action was rejected without changing the path.
    PaintRejected {
        /// Cell named by the rejected action.
        cell: CellCoord,
        /// Specific reason the paint failed.
        reason: PaintRejection,
    },
    /// Confirms that a path tile was erased.
    CellErased {
        /// Cell whose path tile was removed.
        cell: CellCoord,
    },
    /// Announces that the published path plan changed.
    ///
    /// `None` means the painted cells no longer form a valid path.
    PathPlanChanged {
        /// Newly published plan, if the painted cells are valid.
        plan: Option<PathPlan>,
    },
    /// Moves or hides the start and end markers of the path.
    MarkersChanged {
        /// Cell that should carry the start marker, if visible.
        start: Option<CellCoord>,
        /// Cell that should carry the end (tower) marker, if visible.
        end: Option<CellCoord>,
    },
    /// Announces that path painting was enabled or disabled.
    PlacementToggled {
        /// Whether paint and erase actions are now accepted.
        enabled: bool,
    },
    /// Announces that a wave entered its first phase.
    WaveStarted {
        /// Wave that started.
        wave: WaveIndex,
        /// Number of minions the wave will spawn.
        minions: u32,
        /// Number of tanks the wave will spawn.
        tanks: u32,
    },
    /// Reports that a start-wave request was refused.
    WaveStartRejected {
        /// User-facing reason for the refusal.
        reason: WaveStartRejection,
    },
    /// Announces that every unit of the wave was spawned and removed.
    PhaseOneComplete {
        /// Wave whose first phase completed.
        wave: WaveIndex,
    },
    /// Announces that the timed survival window began.
    PhaseTwoStarted {
        /// Wave whose second phase started.
        wave: WaveIndex,
        /// Length of the countdown in whole seconds.
        duration_secs: u32,
    },
    /// Reports the remaining seconds of the survival countdown.
    CountdownTick {
        /// Wave whose countdown is running.
        wave: WaveIndex,
        /// Whole seconds left before the wave ends.
        remaining_secs: u32,
    },
    /// Announces that a wave finished.
    WaveEnded {
        /// Wave that ended.
        wave: WaveIndex,
    },
    /// Announces that the final configured wave ended.
    AllWavesCompleted,
    /// Confirms that a unit entered the path.
    UnitSpawned {
        /// Identifier assigned to the unit.
        unit: UnitId,
        /// Kind of the spawned unit.
        kind: UnitKind,
        /// Cell the unit spawned on.
        cell: CellCoord,
    },
    /// Reports that a unit lost health but survived.
    UnitDamaged {
        /// Identifier of the damaged unit.
        unit: UnitId,
        /// Health left after the damage was applied.
        remaining_health: u32,
    },
    /// Reports that a unit was destroyed by damage.
    UnitDestroyed {
        /// Identifier of the destroyed unit.
        unit: UnitId,
        /// Kind of the destroyed unit.
        kind: UnitKind,
    },
    /// Reports that a unit reached the end of the path.
    UnitEscaped {
        /// Identifier of the escaped unit.
        unit: UnitId,
        /// Kind of the escaped unit.
        kind: UnitKind,
    },
    /// Reports that the defended base took damage.
    BaseDamaged {
        /// Health left on the base.
        remaining_health: u32,
    },
    /// Announces that the defended base fell and the session is lost.
    BaseDestroyed,
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Region of cells occupied by the tower.
        region: CellRect,
    },
    /// Confirms that a tower was removed from the world.
    TowerRemoved {
        /// Identifier of the tower that was removed.
        tower: TowerId,
        /// Region of cells previously occupied by the tower.
        region: CellRect,
        /// Coins returned to the player.
        refund: u32,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Type of tower requested for placement.
        kind: TowerKind,
        /// Origin cell provided in the placement request.
        origin: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that a tower removal request was rejected.
    TowerRemovalRejected {
        /// Identifier of the tower targeted for removal.
        tower: TowerId,
        /// Specific reason the removal failed.
        reason: RemovalError,
    },
    /// Reports the player's coin balance after it changed.
    CoinsChanged {
        /// Coins available after the change.
        balance: u32,
    },
}

/// Cardinal directions on the grid. `North` points toward increasing `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward increasing `y`.
    North,
    /// Movement toward increasing `x`.
    East,
    /// Movement toward decreasing `y`.
    South,
    /// Movement toward decreasing `x`.
    West,
}

impl Direction {
    /// Order in which neighbours are scanned: right, left, up, down.
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
    ];

    /// Offset applied to a cell when stepping once in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }
}

/// Location of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: i32,
    y: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the cell displaced by the provided offsets, or `None` when the
    /// result falls outside the coordinate range.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }

    /// Returns the neighbouring cell in the provided direction, if it exists.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        self.offset(dx, dy)
    }

    /// Orthogonal neighbours in [`Direction::SCAN_ORDER`].
    ///
    /// Cells at the edge of the coordinate range have fewer than four.
    pub fn neighbors(self) -> impl Iterator<Item = CellCoord> {
        Direction::SCAN_ORDER
            .into_iter()
            .filter_map(move |direction| self.step(direction))
    }
}

/// Axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: CellCoord,
    size: CellRectSize,
}

impl CellRect {
    /// Constructs a rectangle from an origin cell and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: CellCoord, size: CellRectSize) -> Self {
        Self { origin, size }
    }

    /// Reports whether the cell lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        let dx = i64::from(cell.x()) - i64::from(self.origin.x());
        let dy = i64::from(cell.y()) - i64::from(self.origin.y());
        dx >= 0 && dy >= 0 && dx < i64::from(self.size.width) && dy < i64::from(self.size.height)
    }

    /// Reports whether every covered cell lies inside the coordinate range.
    #[must_use]
    pub fn is_representable(&self) -> bool {
        let last_x = i64::from(self.origin.x()) + i64::from(self.size.width) - 1;
        let last_y = i64::from(self.origin.y()) + i64::from(self.size.height) - 1;
        i32::try_from(last_x).is_ok() && i32::try_from(last_y).is_ok()
    }

    /// Iterates over every covered cell, row by row.
    ///
    /// Cells beyond the coordinate range are skipped.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let origin = self.origin;
        let width = self.size.width;
        let height = self.size.height;
        (0..height).flat_map(move |dy| {
            (0..width).filter_map(move |dx| {
                let dx = i32::try_from(dx).ok()?;
                let dy = i32::try_from(dy).ok()?;
                origin.offset(dx, dy)
            })
        })
    }
}

/// Size of a [`CellRect`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRectSize {
    width: u32,
    height: u32,
}

impl CellRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Ordered cells leading from the path start to the defended end.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathPlan {
    cells: Vec<CellCoord>,
}

impl PathPlan {
    /// Wraps an ordered cell sequence. Returns `None` for an empty sequence.
    #[must_use]
    pub fn new(cells: Vec<CellCoord>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Self { cells })
        }
    }

    /// Cells in walking order.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Cell where units enter the path.
    #[must_use]
    pub fn start(&self) -> CellCoord {
        self.cells[0]
    }

    /// Cell where units leave the path and strike the base.
    #[must_use]
    pub fn end(&self) -> CellCoord {
        self.cells[self.cells.len() - 1]
    }

    /// Number of cells in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; plans are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Summary of how the painted cells measure up against the path rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanValidity {
    /// Number of painted cells.
    pub count: usize,
    /// Number of cells a complete path needs.
    pub required: usize,
    /// Whether the painted cells form a valid path.
    pub is_valid: bool,
}

/// Position of the wave lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum WavePhase {
    /// No wave is running; the path can be edited and a wave requested.
    #[default]
    Idle,
    /// Units are spawning or still alive.
    PhaseOneActive,
    /// All units were cleared; the survival window is pending or counting down.
    PhaseTwoActive,
    /// The countdown expired and the next wave is being prepared.
    WaveEndSettling,
}

/// Kinds of units a wave can spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Light, fast unit counted by a wave's first quota.
    Minion,
    /// Heavy, slow unit counted by a wave's second quota.
    Tank,
}

/// Unique identifier assigned to a spawned unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Zero-based position of a wave in the configured list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaveIndex(u32);

impl WaveIndex {
    /// Creates a new wave index.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the zero-based index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// One-based number shown to players.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.0.saturating_add(1)
    }
}

/// Static description of a single wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveDefinition {
    /// Minions spawned during the first phase.
    pub minions: u32,
    /// Tanks spawned during the first phase.
    pub tanks: u32,
    /// Pause between clearing the first phase and starting the countdown.
    #[serde(with = "seconds", default = "default_phase_two_delay")]
    pub phase_two_delay: Duration,
    /// Length of the survival countdown.
    #[serde(with = "seconds", default = "default_phase_two_duration")]
    pub phase_two_duration: Duration,
}

impl WaveDefinition {
    /// Creates a wave with the default phase-two timing.
    #[must_use]
    pub const fn new(minions: u32, tanks: u32) -> Self {
        Self {
            minions,
            tanks,
            phase_two_delay: DEFAULT_PHASE_TWO_DELAY,
            phase_two_duration: DEFAULT_PHASE_TWO_DURATION,
        }
    }

    /// Overrides the phase-two delay and duration.
    #[must_use]
    pub const fn with_phase_two(mut self, delay: Duration, duration: Duration) -> Self {
        self.phase_two_delay = delay;
        self.phase_two_duration = duration;
        self
    }
}

const DEFAULT_PHASE_TWO_DELAY: Duration = Duration::from_secs(2);
const DEFAULT_PHASE_TWO_DURATION: Duration = Duration::from_secs(10);

fn default_phase_two_delay() -> Duration {
    DEFAULT_PHASE_TWO_DELAY
}

fn default_phase_two_duration() -> Duration {
    DEFAULT_PHASE_TWO_DURATION
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Region of cells occupied by the tower.
    pub region: CellRect,
    /// Whether removing the tower returns its full cost.
    pub refundable: bool,
}

/// Types of towers that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    /// Single-shot turret.
    Basic,
    /// Turret that fires short bursts.
    Burst,
    /// Continuous-beam turret.
    Laser,
}

impl TowerKind {
    /// Coins required to build the tower.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Basic => 100,
            Self::Burst => 125,
            Self::Laser => 150,
        }
    }

    /// Coins returned when a tower is removed after a wave locked it in.
    #[must_use]
    pub const fn partial_refund(self) -> u32 {
        self.cost() / 2
    }

    /// Footprint covered by the tower. Every kind spans two by two cells.
    #[must_use]
    pub const fn footprint(self) -> CellRectSize {
        match self {
            Self::Basic | Self::Burst | Self::Laser => CellRectSize::new(2, 2),
        }
    }
}

/// Reasons a paint action may be rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaintRejection {
    /// Path editing is locked while a wave runs.
    #[error("path editing is disabled")]
    PlacementDisabled,
    /// The cell lies outside the paintable area.
    #[error("cell is outside the allowed area")]
    OutOfArea,
    /// A tower already stands on the cell.
    #[error("cell is occupied by a tower")]
    Occupied,
    /// The cell already carries a path tile.
    #[error("cell is already painted")]
    AlreadyPainted,
    /// The path already has its required number of tiles.
    #[error("path already has the required number of tiles")]
    AtCapacity,
    /// The tile would complete a fully painted two by two square.
    #[error("tile would create a 2x2 block")]
    CreatesBlock,
    /// The tile would give some path tile more than two neighbours.
    #[error("tile would create an intersection")]
    CreatesIntersection,
    /// The tile would leave the path in disconnected pieces.
    #[error("tile is not connected to the path")]
    NotContiguous,
}

/// Reasons a start-wave request may be refused.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaveStartRejection {
    /// The painted path is incomplete or breaks a path rule.
    #[error("not enough tiles for a valid path")]
    PathInvalid,
    /// A wave is already running.
    #[error("a wave is already in progress")]
    WaveInProgress,
    /// The final wave already ended.
    #[error("no waves remaining")]
    NoWavesRemaining,
    /// No waves were configured.
    #[error("no waves configured")]
    NoWavesConfigured,
    /// The defended base was destroyed.
    #[error("the base has fallen")]
    SessionLost,
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The footprint extends beyond the allowed area.
    #[error("tower footprint leaves the allowed area")]
    OutOfBounds,
    /// The footprint overlaps another tower.
    #[error("tower footprint overlaps another tower")]
    Occupied,
    /// The footprint overlaps a painted path tile.
    #[error("tower footprint overlaps the path")]
    OnPath,
    /// The player cannot afford the tower.
    #[error("not enough coins")]
    InsufficientFunds,
}

/// Reasons a tower removal request may be rejected by the world.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalError {
    /// No tower with the provided identifier exists.
    #[error("no such tower")]
    MissingTower,
}

#[cfg(test)]
mod tests {
    use super::{
        CellCoord, CellRect, CellRectSize, Direction, PaintRejection, PathPlan, TowerKind,
        WaveDefinition,
    };
    use serde::{de::DeserializeOwned, Serialize};
    use std::time::Duration;

    #[test]
    fn neighbors_follow_scan_order() {
        let cell = CellCoord::new(0, 0);
        assert_eq!(
            cell.neighbors().collect::<Vec<_>>(),
            vec![
                CellCoord::new(1, 0),
                CellCoord::new(-1, 0),
                CellCoord::new(0, 1),
                CellCoord::new(0, -1),
            ]
        );
        assert_eq!(cell.step(Direction::North), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn steps_past_the_coordinate_range_do_not_exist() {
        let corner = CellCoord::new(i32::MAX, i32::MIN);
        assert_eq!(corner.step(Direction::East), None);
        assert_eq!(corner.step(Direction::South), None);
        assert_eq!(
            corner.neighbors().collect::<Vec<_>>(),
            vec![
                CellCoord::new(i32::MAX - 1, i32::MIN),
                CellCoord::new(i32::MAX, i32::MIN + 1),
            ]
        );
        assert_eq!(corner.offset(1, 1), None);
    }

    #[test]
    fn rect_at_the_coordinate_edge_skips_missing_cells() {
        let rect = CellRect::from_origin_and_size(
            CellCoord::new(i32::MAX, 0),
            CellRectSize::new(2, 2),
        );
        assert_eq!(
            rect.cells().collect::<Vec<_>>(),
            vec![CellCoord::new(i32::MAX, 0), CellCoord::new(i32::MAX, 1)]
        );
        assert!(!rect.is_representable());
        assert!(CellRect::from_origin_and_size(
            CellCoord::new(i32::MAX - 1, 0),
            CellRectSize::new(2, 2)
        )
        .is_representable());
    }

    #[test]
    fn rect_contains_and_enumerates_cells() {
        let rect = CellRect::from_origin_and_size(CellCoord::new(-1, 2), CellRectSize::new(2, 2));
        let cells: Vec<_> = rect.cells().collect();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(-1, 2),
                CellCoord::new(0, 2),
                CellCoord::new(-1, 3),
                CellCoord::new(0, 3),
            ]
        );
        assert!(rect.contains(CellCoord::new(0, 3)));
        assert!(!rect.contains(CellCoord::new(1, 3)));
        assert!(!rect.contains(CellCoord::new(-2, 2)));
    }

    #[test]
    fn path_plan_rejects_empty_sequences() {
        assert!(PathPlan::new(Vec::new()).is_none());
        let plan = PathPlan::new(vec![CellCoord::new(0, 0), CellCoord::new(1, 0)]).expect("plan");
        assert_eq!(plan.start(), CellCoord::new(0, 0));
        assert_eq!(plan.end(), CellCoord::new(1, 0));
    }

    #[test]
    fn tower_partial_refund_is_half_the_cost() {
        assert_eq!(TowerKind::Basic.cost(), 100);
        assert_eq!(TowerKind::Basic.partial_refund(), 50);
        assert_eq!(TowerKind::Laser.footprint(), CellRectSize::new(2, 2));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn wave_definition_round_trips_through_bincode() {
        let wave = WaveDefinition::new(3, 2)
            .with_phase_two(Duration::from_millis(1_500), Duration::from_secs(4));
        assert_round_trip(&wave);
    }

    #[test]
    fn paint_rejection_round_trips_through_bincode() {
        assert_round_trip(&PaintRejection::CreatesIntersection);
    }

    #[test]
    fn paint_rejection_messages_are_player_facing() {
        assert_eq!(
            PaintRejection::CreatesBlock.to_string(),
            "tile would create a 2x2 block"
        );
    }
}
