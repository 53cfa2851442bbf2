#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Furrow.
//!
//! The [`World`] owns every piece of mutable simulation state: the packed grid,
//! the crop registry, the turn counters, the undo/redo history and the player.
//! It is only ever mutated through [`apply`], and read through [`query`].

mod environment;
mod grid;
mod history;
mod plants;
mod turn;

use furrow_core::{
    Action, ActionRejection, Command, ConfigError, Direction, EnvironmentSource, Event,
    GridRecord, HistoryDirection, Intent, SimulationConfig, SimulationState, SpeciesSource,
    Terrain, TilePosition, WorldPoint, WELCOME_BANNER,
};
use tracing::{debug, info, warn};

use environment::EnvironmentLayer;

pub use environment::{ConstantEnvironment, ScriptedSpecies, SeededEnvironment, SeededSpecies};
pub use grid::GridState;
pub use history::HistoryManager;
pub use plants::{GrowthOutcome, Plant, PlantRegistry};
pub use turn::{TurnController, TurnProgress};

const ENVIRONMENT_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Movement transition waiting for its completion callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingMove {
    from: WorldPoint,
    to: WorldPoint,
}

/// Represents the authoritative Furrow world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: SimulationConfig,
    terrain: Box<dyn Terrain>,
    species: Box<dyn SpeciesSource>,
    weather: Box<dyn EnvironmentSource>,
    grid: GridState,
    plants: PlantRegistry,
    environment: EnvironmentLayer,
    turns: TurnController,
    history: HistoryManager,
    player: WorldPoint,
    pending_move: Option<PendingMove>,
    harvested_count: u32,
    milestone_reached: bool,
}

impl World {
    /// Creates a world over `terrain` using the seeded default sources.
    pub fn new(config: SimulationConfig, terrain: Box<dyn Terrain>) -> Result<Self, ConfigError> {
        let species = Box::new(SeededSpecies::new(config.seed));
        let weather = Box::new(SeededEnvironment::new(
            config.seed ^ ENVIRONMENT_SEED_SALT,
            config.environment,
        ));
        Self::with_sources(config, terrain, species, weather)
    }

    /// Creates a world with explicit species and weather sources.
    pub fn with_sources(
        config: SimulationConfig,
        terrain: Box<dyn Terrain>,
        species: Box<dyn SpeciesSource>,
        mut weather: Box<dyn EnvironmentSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let (width, height) = terrain.dimensions();
        let mut grid = GridState::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let tile = TilePosition::new(x, y);
                let plantable = terrain.tile_at(tile).is_some_and(|info| info.plantable);
                if let Err(error) = grid.set(tile, GridRecord::terrain(plantable)) {
                    warn!(%error, "terrain reported a tile outside its own dimensions");
                }
            }
        }

        let mut environment = EnvironmentLayer::new(width, height);
        environment.regenerate(weather.as_mut());

        Ok(Self {
            banner: WELCOME_BANNER,
            turns: TurnController::new(config.actions_per_turn),
            player: config.player_start,
            config,
            terrain,
            species,
            weather,
            grid,
            plants: PlantRegistry::new(),
            environment,
            history: HistoryManager::new(),
            pending_move: None,
            harvested_count: 0,
            milestone_reached: false,
        })
    }

    fn begin_move(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.pending_move.is_some() {
            return reject(Intent::Move, ActionRejection::PlayerBusy, out_events);
        }

        let from = self.player;
        let to = from.step(direction, self.config.tile_length);
        if !self.terrain.world_bounds().contains(to) || self.terrain.is_blocked(to) {
            return reject(Intent::Move, ActionRejection::Blocked, out_events);
        }

        self.pending_move = Some(PendingMove { from, to });
        out_events.push(Event::MoveStarted { from, to });
    }

    fn complete_move(&mut self, out_events: &mut Vec<Event>) {
        let Some(PendingMove { from, to }) = self.pending_move.take() else {
            debug!("move completion without a move in flight");
            return;
        };

        let before = self.captured_state();
        self.player = to;
        out_events.push(Event::PlayerMoved { from, to });
        self.commit(Action::Move { from, to }, before, out_events);
    }

    fn plant(&mut self, out_events: &mut Vec<Event>) {
        if self.pending_move.is_some() {
            return reject(Intent::Plant, ActionRejection::PlayerBusy, out_events);
        }
        let (tile, record) = match self.occupied_tile() {
            Ok(found) => found,
            Err(reason) => return reject(Intent::Plant, reason, out_events),
        };
        if !record.plantable() {
            return reject(Intent::Plant, ActionRejection::NotPlantable, out_events);
        }
        if self.plants.get(tile).is_some() {
            return reject(Intent::Plant, ActionRejection::TileOccupied, out_events);
        }

        let before = self.captured_state();
        let species = self.species.next_species();
        if let Err(error) = self.plants.add(species, tile) {
            debug!(%error, "registry refused planting");
            return reject(Intent::Plant, ActionRejection::TileOccupied, out_events);
        }
        if let Err(error) = self.grid.set(tile, record.with_crop(species, 0)) {
            warn!(%error, "grid rejected a crop on a looked-up tile");
        }

        out_events.push(Event::PlantSpawned { tile, species });
        self.commit(Action::Plant { species, tile }, before, out_events);
    }

    fn harvest(&mut self, out_events: &mut Vec<Event>) {
        if self.pending_move.is_some() {
            return reject(Intent::Harvest, ActionRejection::PlayerBusy, out_events);
        }
        let (tile, record) = match self.occupied_tile() {
            Ok(found) => found,
            Err(reason) => return reject(Intent::Harvest, reason, out_events),
        };
        match self.plants.get(tile) {
            None => return reject(Intent::Harvest, ActionRejection::NoPlant, out_events),
            Some(plant) if !plant.is_ready_to_harvest() => {
                return reject(Intent::Harvest, ActionRejection::NotReady, out_events)
            }
            Some(_) => {}
        }

        let before = self.captured_state();
        let species = match self.plants.remove(tile) {
            Ok(plant) => plant.species(),
            Err(error) => {
                debug!(%error, "registry refused harvest");
                return reject(Intent::Harvest, ActionRejection::NoPlant, out_events);
            }
        };
        if let Err(error) = self.grid.set(tile, record.cleared()) {
            warn!(%error, "grid rejected clearing a looked-up tile");
        }
        self.harvested_count = self.harvested_count.saturating_add(1);
        out_events.push(Event::PlantHarvested {
            tile,
            species,
            harvested: self.harvested_count,
        });

        if !self.milestone_reached && self.harvested_count >= self.config.harvest_milestone {
            self.milestone_reached = true;
            info!(count = self.harvested_count, "harvest milestone reached");
            out_events.push(Event::HarvestMilestone {
                count: self.harvested_count,
            });
        }

        self.commit(Action::Harvest { species, tile }, before, out_events);
    }

    fn step_history(&mut self, direction: HistoryDirection, out_events: &mut Vec<Event>) {
        let intent = match direction {
            HistoryDirection::Undo => Intent::Undo,
            HistoryDirection::Redo => Intent::Redo,
        };
        if self.pending_move.is_some() {
            return reject(intent, ActionRejection::PlayerBusy, out_events);
        }

        let current = self.captured_state();
        let snapshot = match direction {
            HistoryDirection::Undo => self.history.undo(|action| current.tagged(action)),
            HistoryDirection::Redo => self.history.redo(|action| current.tagged(action)),
        };
        let Some(snapshot) = snapshot else {
            debug!(?direction, "history is empty");
            return;
        };

        self.restore(&snapshot.state);
        let effect = match direction {
            HistoryDirection::Undo => snapshot.action.reverse(),
            HistoryDirection::Redo => snapshot.action,
        };
        debug!(
            ?direction,
            ?effect,
            undo_depth = self.history.undo_depth(),
            redo_depth = self.history.redo_depth(),
            "history step applied"
        );

        out_events.push(Event::WorldRestored);
        out_events.push(Event::HistoryApplied { direction, effect });
        out_events.push(self.action_taken_event());
    }

    /// Spends one action, runs the turn boundary if reached and records history.
    fn commit(&mut self, action: Action, before: SimulationState, out_events: &mut Vec<Event>) {
        if self.turns.action_taken() == TurnProgress::TurnEnded {
            self.end_turn(out_events);
        }
        out_events.push(self.action_taken_event());
        self.history.record(before.tagged(action));
    }

    fn end_turn(&mut self, out_events: &mut Vec<Event>) {
        self.environment.regenerate(self.weather.as_mut());

        for plant in self.plants.iter_mut() {
            let tile = plant.tile();
            let sample = self.environment.sample_at(tile).unwrap_or_default();
            plant.record_environment(sample.sun, sample.water);
            let outcome = plant.check_growth_conditions();

            if outcome.advanced {
                let species = plant.species();
                let stage = plant.growth_stage();
                match self.grid.get(tile) {
                    Ok(record) => {
                        if let Err(error) = self.grid.set(tile, record.with_crop(species, stage)) {
                            warn!(%error, "grid rejected a growth update");
                        }
                    }
                    Err(error) => warn!(%error, "crop grows outside the grid"),
                }
                out_events.push(Event::PlantGrew {
                    tile,
                    species,
                    stage,
                    frame: species.sprite_frame(stage),
                });
            }
            if outcome.ripened {
                out_events.push(Event::PlantRipened {
                    tile,
                    species: plant.species(),
                });
            }
        }

        let current_turn = self.turns.current_turn();
        info!(current_turn, plants = self.plants.len(), "turn ended");
        out_events.push(Event::TurnEnded { current_turn });
    }

    fn restore(&mut self, state: &SimulationState) {
        self.player = state.player_position;
        self.pending_move = None;
        self.plants.rebuild(&state.plant_states);
        self.grid.clear_crops();
        for plant in &state.plant_states {
            let written = self.grid.get(plant.tile).and_then(|record| {
                self.grid
                    .set(plant.tile, record.with_crop(plant.species, plant.growth_stage))
            });
            if let Err(error) = written {
                warn!(%error, "snapshot holds a crop outside the grid");
            }
        }
        self.turns.restore(state.action_count, state.current_turn);
        self.harvested_count = state.harvested_count;
    }

    fn occupied_tile(&self) -> Result<(TilePosition, GridRecord), ActionRejection> {
        let Some(tile) = self.terrain.world_to_tile(self.player) else {
            warn!(position = %self.player, "player stands outside the tilemap");
            return Err(ActionRejection::OffGrid);
        };
        match self.grid.get(tile) {
            Ok(record) => Ok((tile, record)),
            Err(error) => {
                warn!(%error, "player tile lookup failed");
                Err(ActionRejection::OffGrid)
            }
        }
    }

    fn captured_state(&self) -> SimulationState {
        SimulationState {
            player_position: self.player,
            plant_states: self.plants.states(),
            action_count: self.turns.action_count(),
            current_turn: self.turns.current_turn(),
            harvested_count: self.harvested_count,
        }
    }

    fn action_taken_event(&self) -> Event {
        Event::ActionTaken {
            actions_left: self.turns.actions_left(),
            current_turn: self.turns.current_turn(),
        }
    }
}

fn reject(intent: Intent, reason: ActionRejection, out_events: &mut Vec<Event>) {
    debug!(?intent, %reason, "action rejected");
    out_events.push(Event::ActionRejected { intent, reason });
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::BeginMove { direction } => world.begin_move(direction, out_events),
        Command::CompleteMove => world.complete_move(out_events),
        Command::Plant => world.plant(out_events),
        Command::Harvest => world.harvest(out_events),
        Command::Undo => world.step_history(HistoryDirection::Undo, out_events),
        Command::Redo => world.step_history(HistoryDirection::Redo, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use furrow_core::{
        EnvironmentSample, GridError, GridRecord, PlantState, SimulationConfig, SimulationState,
        TilePosition, TurnState, WorldBounds, WorldPoint,
    };

    use super::{GridState, HistoryManager, Plant, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &SimulationConfig {
        &world.config
    }

    /// Current turn counters.
    #[must_use]
    pub fn turn_state(world: &World) -> TurnState {
        world.turns.state()
    }

    /// Committed player position. An in-flight move is not reflected until it completes.
    #[must_use]
    pub fn player_position(world: &World) -> WorldPoint {
        world.player
    }

    /// Tile under the committed player position, if it lies on the map.
    #[must_use]
    pub fn player_tile(world: &World) -> Option<TilePosition> {
        world.terrain.world_to_tile(world.player)
    }

    /// Reports whether a movement transition is awaiting completion.
    #[must_use]
    pub fn move_in_flight(world: &World) -> bool {
        world.pending_move.is_some()
    }

    /// Extent of the playable world.
    #[must_use]
    pub fn world_bounds(world: &World) -> WorldBounds {
        world.terrain.world_bounds()
    }

    /// Crop growing on `tile`, if any.
    #[must_use]
    pub fn plant_at(world: &World, tile: TilePosition) -> Option<&Plant> {
        world.plants.get(tile)
    }

    /// Iterates over every live crop in tile order.
    pub fn plants(world: &World) -> impl Iterator<Item = &Plant> {
        world.plants.iter()
    }

    /// Number of live crops.
    #[must_use]
    pub fn plant_count(world: &World) -> usize {
        world.plants.len()
    }

    /// Full records of every live crop in tile order.
    #[must_use]
    pub fn plant_states(world: &World) -> Vec<PlantState> {
        world.plants.states()
    }

    /// Restorable state as a history entry would capture it right now.
    #[must_use]
    pub fn simulation_state(world: &World) -> SimulationState {
        world.captured_state()
    }

    /// Provides read-only access to the packed grid.
    #[must_use]
    pub fn grid(world: &World) -> &GridState {
        &world.grid
    }

    /// Grid record stored for `tile`.
    pub fn grid_record(world: &World, tile: TilePosition) -> Result<GridRecord, GridError> {
        world.grid.get(tile)
    }

    /// Weather `tile` received at the most recent turn boundary.
    #[must_use]
    pub fn environment_at(world: &World, tile: TilePosition) -> Option<EnvironmentSample> {
        world.environment.sample_at(tile)
    }

    /// Total number of crops harvested.
    #[must_use]
    pub fn harvested_count(world: &World) -> u32 {
        world.harvested_count
    }

    /// Whether the harvest milestone has been announced.
    #[must_use]
    pub fn milestone_reached(world: &World) -> bool {
        world.milestone_reached
    }

    /// Provides read-only access to the undo and redo stacks.
    #[must_use]
    pub fn history(world: &World) -> &HistoryManager {
        &world.history
    }

    /// Number of actions that can be undone.
    #[must_use]
    pub fn undo_depth(world: &World) -> usize {
        world.history.undo_depth()
    }

    /// Number of actions that can be redone.
    #[must_use]
    pub fn redo_depth(world: &World) -> usize {
        world.history.redo_depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use furrow_core::{Species, TileInfo, WorldBounds};

    const TILE: u32 = 16;

    /// Ten by ten tile field; the left half is plantable, tile (0, 0) holds a rock.
    #[derive(Debug)]
    struct Field;

    impl Terrain for Field {
        fn dimensions(&self) -> (u32, u32) {
            (10, 10)
        }

        fn tile_at(&self, tile: TilePosition) -> Option<TileInfo> {
            (tile.x() < 10 && tile.y() < 10).then(|| TileInfo {
                plantable: tile.x() < 5,
            })
        }

        fn world_to_tile(&self, point: WorldPoint) -> Option<TilePosition> {
            let x = u32::try_from(point.x()).ok()?;
            let y = u32::try_from(point.y()).ok()?;
            Some(TilePosition::new(x / TILE, y / TILE))
        }

        fn is_blocked(&self, point: WorldPoint) -> bool {
            self.world_to_tile(point) == Some(TilePosition::new(0, 0))
        }

        fn world_bounds(&self) -> WorldBounds {
            WorldBounds::new(10 * TILE, 10 * TILE)
        }
    }

    fn world_at(start: WorldPoint) -> World {
        let config = SimulationConfig {
            player_start: start,
            ..SimulationConfig::default()
        };
        World::with_sources(
            config,
            Box::new(Field),
            Box::new(ScriptedSpecies::new(vec![Species::Potato])),
            Box::new(ConstantEnvironment::new(50, 50)),
        )
        .expect("valid config")
    }

    fn run(world: &mut World, commands: &[Command]) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            apply(world, *command, &mut events);
        }
        events
    }

    fn walk(direction: Direction) -> [Command; 2] {
        [Command::BeginMove { direction }, Command::CompleteMove]
    }

    #[test]
    fn grid_mirrors_terrain_plantability() {
        let world = world_at(WorldPoint::new(40, 40));
        assert_eq!(
            query::grid_record(&world, TilePosition::new(4, 9)),
            Ok(GridRecord::terrain(true))
        );
        assert_eq!(
            query::grid_record(&world, TilePosition::new(5, 0)),
            Ok(GridRecord::terrain(false))
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SimulationConfig {
            tile_length: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            World::new(config, Box::new(Field)),
            Err(ConfigError::ZeroTileLength)
        ));
    }

    #[test]
    fn move_waits_for_completion_before_committing() {
        let mut world = world_at(WorldPoint::new(40, 40));
        let events = run(
            &mut world,
            &[Command::BeginMove {
                direction: Direction::East,
            }],
        );

        assert_eq!(
            events,
            vec![Event::MoveStarted {
                from: WorldPoint::new(40, 40),
                to: WorldPoint::new(56, 40),
            }]
        );
        assert!(query::move_in_flight(&world));
        assert_eq!(query::player_position(&world), WorldPoint::new(40, 40));
        assert_eq!(query::turn_state(&world).action_count, 0);

        let events = run(&mut world, &[Command::CompleteMove]);
        assert_eq!(
            events,
            vec![
                Event::PlayerMoved {
                    from: WorldPoint::new(40, 40),
                    to: WorldPoint::new(56, 40),
                },
                Event::ActionTaken {
                    actions_left: 9,
                    current_turn: 1,
                },
            ]
        );
        assert!(!query::move_in_flight(&world));
        assert_eq!(query::undo_depth(&world), 1);
    }

    #[test]
    fn busy_player_rejects_everything_but_completion() {
        let mut world = world_at(WorldPoint::new(40, 40));
        let events = run(
            &mut world,
            &[
                Command::BeginMove {
                    direction: Direction::South,
                },
                Command::BeginMove {
                    direction: Direction::North,
                },
                Command::Plant,
                Command::Harvest,
                Command::Undo,
                Command::Redo,
            ],
        );

        let rejected: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                Event::ActionRejected { intent, reason } => Some((*intent, *reason)),
                _ => None,
            })
            .collect();
        assert_eq!(
            rejected,
            vec![
                (Intent::Move, ActionRejection::PlayerBusy),
                (Intent::Plant, ActionRejection::PlayerBusy),
                (Intent::Harvest, ActionRejection::PlayerBusy),
                (Intent::Undo, ActionRejection::PlayerBusy),
                (Intent::Redo, ActionRejection::PlayerBusy),
            ]
        );
        assert_eq!(query::plant_count(&world), 0);
    }

    #[test]
    fn blocked_and_out_of_bounds_moves_are_rejected() {
        let mut world = world_at(WorldPoint::new(16, 0));
        let events = run(
            &mut world,
            &[
                Command::BeginMove {
                    direction: Direction::West,
                },
                Command::BeginMove {
                    direction: Direction::North,
                },
            ],
        );
        assert_eq!(
            events,
            vec![
                Event::ActionRejected {
                    intent: Intent::Move,
                    reason: ActionRejection::Blocked,
                },
                Event::ActionRejected {
                    intent: Intent::Move,
                    reason: ActionRejection::Blocked,
                },
            ]
        );
        assert!(!query::move_in_flight(&world));
    }

    #[test]
    fn bounds_include_the_far_edge() {
        let mut world = world_at(WorldPoint::new(144, 144));
        let events = run(&mut world, &walk(Direction::East));
        assert!(events.contains(&Event::PlayerMoved {
            from: WorldPoint::new(144, 144),
            to: WorldPoint::new(160, 144),
        }));
    }

    #[test]
    fn plant_requires_plantable_empty_tile() {
        let mut world = world_at(WorldPoint::new(88, 40));
        let events = run(&mut world, &[Command::Plant]);
        assert_eq!(
            events,
            vec![Event::ActionRejected {
                intent: Intent::Plant,
                reason: ActionRejection::NotPlantable,
            }]
        );

        let mut world = world_at(WorldPoint::new(40, 40));
        let events = run(&mut world, &[Command::Plant, Command::Plant]);
        assert_eq!(
            events,
            vec![
                Event::PlantSpawned {
                    tile: TilePosition::new(2, 2),
                    species: Species::Potato,
                },
                Event::ActionTaken {
                    actions_left: 9,
                    current_turn: 1,
                },
                Event::ActionRejected {
                    intent: Intent::Plant,
                    reason: ActionRejection::TileOccupied,
                },
            ]
        );
        assert_eq!(
            query::grid_record(&world, TilePosition::new(2, 2)),
            Ok(GridRecord::terrain(true).with_crop(Species::Potato, 0))
        );
    }

    #[test]
    fn off_grid_player_cannot_plant() {
        let mut world = world_at(WorldPoint::new(160, 40));
        let events = run(&mut world, &[Command::Plant, Command::Harvest]);
        assert_eq!(
            events,
            vec![
                Event::ActionRejected {
                    intent: Intent::Plant,
                    reason: ActionRejection::OffGrid,
                },
                Event::ActionRejected {
                    intent: Intent::Harvest,
                    reason: ActionRejection::OffGrid,
                },
            ]
        );
    }

    #[test]
    fn crops_ripen_across_turns_and_can_be_harvested() {
        let mut world = world_at(WorldPoint::new(40, 40));
        let _ = run(&mut world, &[Command::Plant]);

        // Fill three turns by pacing east and back.
        let mut events = Vec::new();
        let mut direction = Direction::East;
        while query::turn_state(&world).current_turn < 4 {
            for command in walk(direction) {
                apply(&mut world, command, &mut events);
            }
            direction = if direction == Direction::East {
                Direction::West
            } else {
                Direction::East
            };
        }
        // Twenty-nine moves leave the player one tile east of the crop.
        assert_eq!(query::player_position(&world), WorldPoint::new(56, 40));
        let _ = run(&mut world, &walk(Direction::West));

        let grew = events
            .iter()
            .filter(|event| matches!(event, Event::PlantGrew { .. }))
            .count();
        assert_eq!(grew, 3);
        assert!(events.contains(&Event::PlantRipened {
            tile: TilePosition::new(2, 2),
            species: Species::Potato,
        }));
        assert!(events.contains(&Event::PlantGrew {
            tile: TilePosition::new(2, 2),
            species: Species::Potato,
            stage: 3,
            frame: 3,
        }));

        let events = run(&mut world, &[Command::Harvest]);
        assert_eq!(
            events[0],
            Event::PlantHarvested {
                tile: TilePosition::new(2, 2),
                species: Species::Potato,
                harvested: 1,
            }
        );
        assert_eq!(query::harvested_count(&world), 1);
        assert_eq!(
            query::grid_record(&world, TilePosition::new(2, 2)),
            Ok(GridRecord::terrain(true))
        );
    }

    #[test]
    fn turn_end_reports_growth_before_budget() {
        let mut world = world_at(WorldPoint::new(40, 40));
        let _ = run(&mut world, &[Command::Plant]);
        let mut events = Vec::new();
        for _ in 0..4 {
            for command in walk(Direction::South).into_iter().chain(walk(Direction::North)) {
                apply(&mut world, command, &mut events);
            }
        }
        events.clear();
        for command in walk(Direction::South) {
            apply(&mut world, command, &mut events);
        }

        assert_eq!(
            events,
            vec![
                Event::MoveStarted {
                    from: WorldPoint::new(40, 40),
                    to: WorldPoint::new(40, 56),
                },
                Event::PlayerMoved {
                    from: WorldPoint::new(40, 40),
                    to: WorldPoint::new(40, 56),
                },
                Event::PlantGrew {
                    tile: TilePosition::new(2, 2),
                    species: Species::Potato,
                    stage: 1,
                    frame: 1,
                },
                Event::TurnEnded { current_turn: 2 },
                Event::ActionTaken {
                    actions_left: 10,
                    current_turn: 2,
                },
            ]
        );
        assert_eq!(
            query::environment_at(&world, TilePosition::new(2, 2)),
            Some(furrow_core::EnvironmentSample { sun: 50, water: 50 })
        );
    }

    #[test]
    fn undo_reports_reverse_effect_and_redo_reports_action() {
        let mut world = world_at(WorldPoint::new(40, 40));
        let _ = run(&mut world, &[Command::Plant]);

        let events = run(&mut world, &[Command::Undo]);
        assert_eq!(
            events,
            vec![
                Event::WorldRestored,
                Event::HistoryApplied {
                    direction: HistoryDirection::Undo,
                    effect: Action::Harvest {
                        species: Species::Potato,
                        tile: TilePosition::new(2, 2),
                    },
                },
                Event::ActionTaken {
                    actions_left: 10,
                    current_turn: 1,
                },
            ]
        );
        assert_eq!(query::plant_count(&world), 0);

        let events = run(&mut world, &[Command::Redo]);
        assert_eq!(
            events[1],
            Event::HistoryApplied {
                direction: HistoryDirection::Redo,
                effect: Action::Plant {
                    species: Species::Potato,
                    tile: TilePosition::new(2, 2),
                },
            }
        );
        assert!(query::plant_at(&world, TilePosition::new(2, 2)).is_some());
    }

    #[test]
    fn empty_history_emits_nothing() {
        let mut world = world_at(WorldPoint::new(40, 40));
        assert!(run(&mut world, &[Command::Undo, Command::Redo, Command::CompleteMove]).is_empty());
    }
}
