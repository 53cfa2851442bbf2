#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares a Furrow farm.

mod layout;

use furrow_core::{
    ConfigError, EnvironmentSource, SimulationConfig, Species, SpeciesSource, TilePosition,
};
use furrow_world::{query, World};

pub use layout::{FieldLayout, Ground, LayoutError};

/// Produces the world and the data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Builds a world on `layout` with the seeded default sources.
    pub fn build_world(
        &self,
        config: SimulationConfig,
        layout: FieldLayout,
    ) -> Result<World, ConfigError> {
        World::new(config, Box::new(layout))
    }

    /// Builds a world on `layout` with explicit species and weather sources.
    pub fn build_world_with_sources(
        &self,
        config: SimulationConfig,
        layout: FieldLayout,
        species: Box<dyn SpeciesSource>,
        weather: Box<dyn EnvironmentSource>,
    ) -> Result<World, ConfigError> {
        World::with_sources(config, Box::new(layout), species, weather)
    }

    /// Renders the farm as text, one glyph per tile.
    ///
    /// The player is drawn as `@`. Crops use the first letter of their species,
    /// upper-cased once ready to harvest.
    #[must_use]
    pub fn field_view(&self, world: &World, layout: &FieldLayout) -> String {
        let (width, height) = query::grid(world).dimensions();
        let player = query::player_tile(world);
        let mut view = String::with_capacity(((width + 1) * height) as usize);

        for y in 0..height {
            for x in 0..width {
                let tile = TilePosition::new(x, y);
                let glyph = if player == Some(tile) {
                    '@'
                } else if let Some(plant) = query::plant_at(world, tile) {
                    crop_glyph(plant.species(), plant.is_ready_to_harvest())
                } else {
                    layout.ground_at(tile).map_or(' ', |ground| ground.glyph())
                };
                view.push(glyph);
            }
            view.push('\n');
        }
        view
    }
}

fn crop_glyph(species: Species, ready: bool) -> char {
    let glyph = match species {
        Species::Potato => 'p',
        Species::Tomato => 't',
        Species::Eggplant => 'e',
    };
    if ready {
        glyph.to_ascii_uppercase()
    } else {
        glyph
    }
}
