#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Furrow farming simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing player intents, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! changed. Systems consume event streams and respond with new commands.
//!
//! Collaborators owned by the host engine (tilemap lookup, collision and the
//! random sources feeding species selection and weather) are expressed as the
//! [`Terrain`], [`SpeciesSource`] and [`EnvironmentSource`] traits so the
//! world never reaches for ambient state.

mod config;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use config::{ConfigError, EnvironmentRange, SimulationConfig};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Furrow.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Requests that the player start walking one tile in the given direction.
    BeginMove {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Signals that the in-flight movement transition finished animating.
    CompleteMove,
    /// Requests that a seed be planted on the tile under the player.
    Plant,
    /// Requests that the crop under the player be harvested.
    Harvest,
    /// Requests that the most recent committed action be undone.
    Undo,
    /// Requests that the most recently undone action be replayed.
    Redo,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that the player started a movement transition.
    MoveStarted {
        /// Position the player occupies while the transition runs.
        from: WorldPoint,
        /// Position the player reaches once the transition completes.
        to: WorldPoint,
    },
    /// Confirms that a movement transition committed.
    PlayerMoved {
        /// Position the player occupied before the move.
        from: WorldPoint,
        /// Position the player occupies after the move.
        to: WorldPoint,
    },
    /// Confirms that a new crop was planted.
    PlantSpawned {
        /// Tile holding the new crop.
        tile: TilePosition,
        /// Species that was planted.
        species: Species,
    },
    /// Reports that a crop advanced to a new growth stage.
    PlantGrew {
        /// Tile holding the crop.
        tile: TilePosition,
        /// Species of the crop.
        species: Species,
        /// Growth stage reached by the crop.
        stage: u8,
        /// Sprite frame matching the new growth stage.
        frame: u32,
    },
    /// Reports that a crop became ready to harvest.
    PlantRipened {
        /// Tile holding the crop.
        tile: TilePosition,
        /// Species of the crop.
        species: Species,
    },
    /// Confirms that a crop was harvested and removed.
    PlantHarvested {
        /// Tile that held the crop.
        tile: TilePosition,
        /// Species of the harvested crop.
        species: Species,
        /// Total number of crops harvested so far.
        harvested: u32,
    },
    /// Announces that the harvest count reached the configured milestone.
    HarvestMilestone {
        /// Harvest count at the moment the milestone was reached.
        count: u32,
    },
    /// Reports the remaining action budget after an action or history step.
    ActionTaken {
        /// Number of actions still available in the current turn.
        actions_left: u32,
        /// Turn currently in progress.
        current_turn: u32,
    },
    /// Announces that the action budget was spent and a new turn began.
    TurnEnded {
        /// Turn that begins after the boundary.
        current_turn: u32,
    },
    /// Reports that a player intent was rejected without changing state.
    ActionRejected {
        /// Intent that was attempted.
        intent: Intent,
        /// Specific reason the intent failed.
        reason: ActionRejection,
    },
    /// Reports the effective action performed by an undo or redo step.
    HistoryApplied {
        /// Whether the step walked backwards or forwards through history.
        direction: HistoryDirection,
        /// Action whose effect the step reproduced.
        effect: Action,
    },
    /// Announces that the world was rebuilt from a snapshot.
    ///
    /// Presentation layers should discard plant sprites and re-query the world.
    WorldRestored,
}

/// Player intents that may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// A single-tile movement.
    Move,
    /// Planting a seed.
    Plant,
    /// Harvesting a crop.
    Harvest,
    /// Undoing an action.
    Undo,
    /// Redoing an action.
    Redo,
}

/// Reasons a player intent may be rejected by the world.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionRejection {
    /// The movement target lies outside the world or on a colliding obstacle.
    #[error("target position is blocked")]
    Blocked,
    /// A movement transition is still in flight.
    #[error("player is busy moving")]
    PlayerBusy,
    /// The tile under the player is not plantable terrain.
    #[error("tile is not plantable")]
    NotPlantable,
    /// The tile under the player already holds a crop.
    #[error("tile already holds a crop")]
    TileOccupied,
    /// No crop grows on the tile under the player.
    #[error("no crop on this tile")]
    NoPlant,
    /// The crop under the player has not ripened yet.
    #[error("crop is not ready to harvest")]
    NotReady,
    /// The player stands outside the addressable grid.
    #[error("player is outside the grid")]
    OffGrid,
}

/// Failures raised by the packed grid record store.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum GridError {
    /// The requested tile lies outside the grid dimensions.
    #[error("tile ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        /// Column of the requested tile.
        x: u32,
        /// Row of the requested tile.
        y: u32,
        /// Number of columns in the grid.
        width: u32,
        /// Number of rows in the grid.
        height: u32,
    },
}

/// Failures raised by the plant registry.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum RegistryError {
    /// A crop already grows on the tile.
    #[error("tile {0} already holds a crop")]
    TileOccupied(TilePosition),
    /// No crop grows on the tile.
    #[error("no crop grows on tile {0}")]
    NoPlant(TilePosition),
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing y.
    North,
    /// Movement toward increasing x.
    East,
    /// Movement toward increasing y.
    South,
    /// Movement toward decreasing x.
    West,
}

impl Direction {
    /// Unit offset of the direction in world axes.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Location of a single grid tile expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePosition {
    x: u32,
    y: u32,
}

impl TilePosition {
    /// Creates a new tile position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

impl fmt::Display for TilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Position in world units, the space the engine places sprites in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPoint {
    x: i32,
    y: i32,
}

impl WorldPoint {
    /// Creates a new world position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in world units.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate in world units.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the point reached by travelling `distance` units toward `direction`.
    #[must_use]
    pub fn step(self, direction: Direction, distance: u32) -> Self {
        let distance = i32::try_from(distance).unwrap_or(i32::MAX);
        let (dx, dy) = direction.offset();
        Self {
            x: self.x.saturating_add(dx.saturating_mul(distance)),
            y: self.y.saturating_add(dy.saturating_mul(distance)),
        }
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Extent of the playable world measured in world units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldBounds {
    width: u32,
    height: u32,
}

impl WorldBounds {
    /// Creates a new bounds descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the world in world units.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the world in world units.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the point lies within the bounds, edges included.
    #[must_use]
    pub fn contains(&self, point: WorldPoint) -> bool {
        let within = |value: i32, limit: u32| u32::try_from(value).is_ok_and(|v| v <= limit);
        within(point.x(), self.width) && within(point.y(), self.height)
    }
}

/// Crop species that can be planted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// Fast, forgiving root crop.
    Potato,
    /// Sun-loving fruit.
    Tomato,
    /// Demanding fruit that needs both sun and water.
    Eggplant,
}

impl Species {
    /// Every plantable species in code order.
    pub const ALL: [Species; 3] = [Species::Potato, Species::Tomato, Species::Eggplant];

    /// Number of sprite frames each species owns in the plant atlas.
    pub const FRAMES_PER_SPECIES: u32 = 4;

    /// Byte code stored in the grid state. Zero is reserved for "no crop".
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Potato => 1,
            Self::Tomato => 2,
            Self::Eggplant => 3,
        }
    }

    /// Decodes a grid species code, returning `None` for empty or unknown codes.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Potato),
            2 => Some(Self::Tomato),
            3 => Some(Self::Eggplant),
            _ => None,
        }
    }

    /// Lowercase display name of the species.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Potato => "potato",
            Self::Tomato => "tomato",
            Self::Eggplant => "eggplant",
        }
    }

    /// Growth thresholds that drive the species' state machine.
    #[must_use]
    pub const fn growth_profile(self) -> GrowthProfile {
        match self {
            Self::Potato => GrowthProfile::new(3, 25, 30, 2, 30, 30),
            Self::Tomato => GrowthProfile::new(3, 30, 25, 3, 32, 30),
            Self::Eggplant => GrowthProfile::new(3, 32, 32, 3, 35, 35),
        }
    }

    /// Atlas frame that depicts the species at the provided growth stage.
    ///
    /// Stages beyond the terminal stage reuse the terminal frame.
    #[must_use]
    pub const fn sprite_frame(self, stage: u8) -> u32 {
        let terminal = self.growth_profile().terminal_stage();
        let stage = if stage > terminal { terminal } else { stage };
        let base = (self.code() as u32 - 1) * Self::FRAMES_PER_SPECIES;
        base + stage as u32
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Species-specific thresholds consumed by the plant growth state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GrowthProfile {
    terminal_stage: u8,
    stage_sun: u32,
    stage_water: u32,
    ripening_window: usize,
    ripen_sun: u32,
    ripen_water: u32,
}

impl GrowthProfile {
    const fn new(
        terminal_stage: u8,
        stage_sun: u32,
        stage_water: u32,
        ripening_window: usize,
        ripen_sun: u32,
        ripen_water: u32,
    ) -> Self {
        Self {
            terminal_stage,
            stage_sun,
            stage_water,
            ripening_window,
            ripen_sun,
            ripen_water,
        }
    }

    /// Final growth stage; crops stop growing once they reach it.
    #[must_use]
    pub const fn terminal_stage(&self) -> u8 {
        self.terminal_stage
    }

    /// Minimum sunlight of the latest turn required to advance one stage.
    #[must_use]
    pub const fn stage_sun(&self) -> u32 {
        self.stage_sun
    }

    /// Minimum water of the latest turn required to advance one stage.
    #[must_use]
    pub const fn stage_water(&self) -> u32 {
        self.stage_water
    }

    /// Number of most recent turns averaged when deciding ripeness.
    #[must_use]
    pub const fn ripening_window(&self) -> usize {
        self.ripening_window
    }

    /// Average sunlight over the ripening window required to ripen.
    #[must_use]
    pub const fn ripen_sun(&self) -> u32 {
        self.ripen_sun
    }

    /// Average water over the ripening window required to ripen.
    #[must_use]
    pub const fn ripen_water(&self) -> u32 {
        self.ripen_water
    }
}

/// Packed per-tile record stored in the grid state.
///
/// The record upholds `species_code == 0 ⇒ growth_stage == 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridRecord {
    plantable: bool,
    species_code: u8,
    growth_stage: u8,
}

impl GridRecord {
    /// Number of bytes a record occupies in the packed grid.
    pub const SIZE: usize = 3;

    /// Creates an empty record for terrain with the given plantability.
    #[must_use]
    pub const fn terrain(plantable: bool) -> Self {
        Self {
            plantable,
            species_code: 0,
            growth_stage: 0,
        }
    }

    /// Decodes a record from its packed byte representation.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        let species_code = bytes[1];
        Self {
            plantable: bytes[0] != 0,
            species_code,
            growth_stage: if species_code == 0 { 0 } else { bytes[2] },
        }
    }

    /// Encodes the record into its packed byte representation.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; Self::SIZE] {
        [self.plantable as u8, self.species_code, self.growth_stage]
    }

    /// Returns a copy of the record occupied by `species` at `stage`.
    #[must_use]
    pub const fn with_crop(self, species: Species, stage: u8) -> Self {
        Self {
            plantable: self.plantable,
            species_code: species.code(),
            growth_stage: stage,
        }
    }

    /// Returns a copy of the record with its crop fields cleared.
    #[must_use]
    pub const fn cleared(self) -> Self {
        Self::terrain(self.plantable)
    }

    /// Whether the tile is plantable terrain.
    #[must_use]
    pub const fn plantable(&self) -> bool {
        self.plantable
    }

    /// Raw species code; zero when the tile holds no crop.
    #[must_use]
    pub const fn species_code(&self) -> u8 {
        self.species_code
    }

    /// Growth stage of the crop on the tile; zero when the tile holds no crop.
    #[must_use]
    pub const fn growth_stage(&self) -> u8 {
        self.growth_stage
    }

    /// Species of the crop on the tile, if any.
    #[must_use]
    pub const fn species(&self) -> Option<Species> {
        Species::from_code(self.species_code)
    }
}

/// Terrain properties reported by the tilemap collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileInfo {
    /// Whether seeds may be planted on the tile.
    pub plantable: bool,
}

/// Environmental inputs a tile receives during one turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvironmentSample {
    /// Sunlight received during the turn.
    pub sun: u32,
    /// Water received during the turn.
    pub water: u32,
}

/// Player actions recorded in history, each with its own payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// The player walked between two positions.
    Move {
        /// Position before the move.
        from: WorldPoint,
        /// Position after the move.
        to: WorldPoint,
    },
    /// A crop was planted.
    Plant {
        /// Species that was planted.
        species: Species,
        /// Tile that received the crop.
        tile: TilePosition,
    },
    /// A crop was harvested.
    Harvest {
        /// Species that was harvested.
        species: Species,
        /// Tile that held the crop.
        tile: TilePosition,
    },
}

impl Action {
    /// Returns the action that reverts this one.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Move { from, to } => Self::Move { from: to, to: from },
            Self::Plant { species, tile } => Self::Harvest { species, tile },
            Self::Harvest { species, tile } => Self::Plant { species, tile },
        }
    }

    /// Intent that produces this action.
    #[must_use]
    pub const fn intent(&self) -> Intent {
        match self {
            Self::Move { .. } => Intent::Move,
            Self::Plant { .. } => Intent::Plant,
            Self::Harvest { .. } => Intent::Harvest,
        }
    }
}

/// Direction of travel through the history stacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryDirection {
    /// Walked backwards to an earlier state.
    Undo,
    /// Walked forwards to a previously undone state.
    Redo,
}

/// Complete record of one crop, sufficient to recreate it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlantState {
    /// Tile holding the crop.
    pub tile: TilePosition,
    /// Species of the crop.
    pub species: Species,
    /// Growth stage reached so far.
    pub growth_stage: u8,
    /// Sunlight received per turn, oldest first.
    pub sunlight: Vec<u32>,
    /// Water received per turn, oldest first.
    pub water: Vec<u32>,
    /// Whether the crop may be harvested.
    pub ready_to_harvest: bool,
}

/// Restorable portion of the world state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimulationState {
    /// Position of the player.
    pub player_position: WorldPoint,
    /// Every crop in deterministic tile order.
    pub plant_states: Vec<PlantState>,
    /// Actions spent in the current turn.
    pub action_count: u32,
    /// Turn currently in progress.
    pub current_turn: u32,
    /// Total number of crops harvested.
    pub harvested_count: u32,
}

impl SimulationState {
    /// Tags the state with the action it belongs to, producing a history entry.
    #[must_use]
    pub fn tagged(self, action: Action) -> GameSnapshot {
        GameSnapshot {
            action,
            state: self,
        }
    }
}

/// History entry pairing an action with a fully restorable world state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Action the entry belongs to.
    pub action: Action,
    /// World state restored when the entry is applied.
    pub state: SimulationState,
}

/// Read-only summary of the turn economy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TurnState {
    /// Turn currently in progress, starting at one.
    pub current_turn: u32,
    /// Actions spent in the current turn.
    pub action_count: u32,
    /// Actions available per turn.
    pub actions_per_turn: u32,
}

impl TurnState {
    /// Actions still available in the current turn.
    #[must_use]
    pub const fn actions_left(&self) -> u32 {
        self.actions_per_turn.saturating_sub(self.action_count)
    }
}

/// Tilemap and collision collaborator supplied by the host engine.
pub trait Terrain: fmt::Debug {
    /// Grid dimensions measured in tiles as `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    /// Terrain properties of the tile, or `None` outside the map.
    fn tile_at(&self, tile: TilePosition) -> Option<TileInfo>;

    /// Tile containing the world point, or `None` for negative coordinates.
    fn world_to_tile(&self, point: WorldPoint) -> Option<TilePosition>;

    /// Whether the world point lies on a colliding obstacle.
    fn is_blocked(&self, point: WorldPoint) -> bool;

    /// Extent of the playable world.
    fn world_bounds(&self) -> WorldBounds;
}

/// Supplies the species of every newly planted crop.
pub trait SpeciesSource: fmt::Debug {
    /// Chooses the species for the next planting.
    fn next_species(&mut self) -> Species;
}

/// Supplies per-tile weather at every turn boundary.
pub trait EnvironmentSource: fmt::Debug {
    /// Samples the sunlight and water a tile receives this turn.
    fn sample(&mut self, tile: TilePosition) -> EnvironmentSample;
}
