use furrow_core::{
    Command, Direction, Event, SimulationConfig, Species, Terrain, TileInfo, TilePosition,
    WorldBounds, WorldPoint,
};
use furrow_world::{self as world, ConstantEnvironment, ScriptedSpecies, World};

pub const TILE: u32 = 16;

/// Rectangular field where every tile is plantable except the listed rocks.
#[derive(Debug, Clone)]
pub struct OpenField {
    pub width: u32,
    pub height: u32,
    pub rocks: Vec<TilePosition>,
}

impl OpenField {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rocks: Vec::new(),
        }
    }
}

impl Terrain for OpenField {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn tile_at(&self, tile: TilePosition) -> Option<TileInfo> {
        (tile.x() < self.width && tile.y() < self.height).then(|| TileInfo {
            plantable: !self.rocks.contains(&tile),
        })
    }

    fn world_to_tile(&self, point: WorldPoint) -> Option<TilePosition> {
        let x = u32::try_from(point.x()).ok()?;
        let y = u32::try_from(point.y()).ok()?;
        Some(TilePosition::new(x / TILE, y / TILE))
    }

    fn is_blocked(&self, point: WorldPoint) -> bool {
        self.world_to_tile(point)
            .is_some_and(|tile| self.rocks.contains(&tile))
    }

    fn world_bounds(&self) -> WorldBounds {
        WorldBounds::new(self.width * TILE, self.height * TILE)
    }
}

/// Twenty by fifteen field with potatoes and perfect weather.
pub fn potato_world(config: SimulationConfig) -> World {
    World::with_sources(
        config,
        Box::new(OpenField::new(20, 15)),
        Box::new(ScriptedSpecies::new(vec![Species::Potato])),
        Box::new(ConstantEnvironment::new(50, 50)),
    )
    .expect("valid config")
}

pub fn run(world: &mut World, commands: &[Command]) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, *command, &mut events);
    }
    events
}

pub fn walk(world: &mut World, direction: Direction) -> Vec<Event> {
    run(
        world,
        &[Command::BeginMove { direction }, Command::CompleteMove],
    )
}
