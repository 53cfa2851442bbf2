//! Species and weather sources plus the per-tile environment layer.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use furrow_core::{
    EnvironmentRange, EnvironmentSample, EnvironmentSource, Species, SpeciesSource, TilePosition,
};

/// Draws planted species uniformly from a seeded generator.
#[derive(Clone, Debug)]
pub struct SeededSpecies {
    rng: ChaCha8Rng,
}

impl SeededSpecies {
    /// Creates a source whose sequence is fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl SpeciesSource for SeededSpecies {
    fn next_species(&mut self) -> Species {
        Species::ALL[self.rng.gen_range(0..Species::ALL.len())]
    }
}

/// Replays a fixed species sequence, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct ScriptedSpecies {
    sequence: Vec<Species>,
    cursor: usize,
}

impl ScriptedSpecies {
    /// Creates a source cycling through `sequence`; an empty sequence yields potatoes.
    #[must_use]
    pub fn new(sequence: Vec<Species>) -> Self {
        Self {
            sequence,
            cursor: 0,
        }
    }
}

impl SpeciesSource for ScriptedSpecies {
    fn next_species(&mut self) -> Species {
        let Some(&species) = self.sequence.get(self.cursor) else {
            return Species::Potato;
        };
        self.cursor = (self.cursor + 1) % self.sequence.len();
        species
    }
}

/// Draws independent sunlight and water values uniformly from an inclusive range.
#[derive(Clone, Debug)]
pub struct SeededEnvironment {
    rng: ChaCha8Rng,
    range: EnvironmentRange,
}

impl SeededEnvironment {
    /// Creates a source whose sequence is fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64, range: EnvironmentRange) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            range,
        }
    }
}

impl EnvironmentSource for SeededEnvironment {
    fn sample(&mut self, _tile: TilePosition) -> EnvironmentSample {
        let (min, max) = (self.range.min, self.range.max.max(self.range.min));
        EnvironmentSample {
            sun: self.rng.gen_range(min..=max),
            water: self.rng.gen_range(min..=max),
        }
    }
}

/// Gives every tile the same weather every turn.
#[derive(Clone, Copy, Debug)]
pub struct ConstantEnvironment {
    sample: EnvironmentSample,
}

impl ConstantEnvironment {
    /// Creates a source that always reports `sun` and `water`.
    #[must_use]
    pub const fn new(sun: u32, water: u32) -> Self {
        Self {
            sample: EnvironmentSample { sun, water },
        }
    }
}

impl EnvironmentSource for ConstantEnvironment {
    fn sample(&mut self, _tile: TilePosition) -> EnvironmentSample {
        self.sample
    }
}

/// Weather of every tile for the turn in progress, row-major.
#[derive(Clone, Debug)]
pub(crate) struct EnvironmentLayer {
    width: u32,
    height: u32,
    samples: Vec<EnvironmentSample>,
}

impl EnvironmentLayer {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        let tiles = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            width,
            height,
            samples: vec![EnvironmentSample::default(); tiles],
        }
    }

    /// Draws fresh weather for every tile in row-major order.
    pub(crate) fn regenerate(&mut self, source: &mut dyn EnvironmentSource) {
        let width = self.width.max(1);
        for (offset, slot) in self.samples.iter_mut().enumerate() {
            let Ok(offset) = u32::try_from(offset) else {
                break;
            };
            *slot = source.sample(TilePosition::new(offset % width, offset / width));
        }
    }

    pub(crate) fn sample_at(&self, tile: TilePosition) -> Option<EnvironmentSample> {
        if tile.x() >= self.width || tile.y() >= self.height {
            return None;
        }
        let index = tile.y() as usize * self.width as usize + tile.x() as usize;
        self.samples.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_are_reproducible() {
        let mut first = SeededSpecies::new(99);
        let mut second = SeededSpecies::new(99);
        let a: Vec<_> = (0..32).map(|_| first.next_species()).collect();
        let b: Vec<_> = (0..32).map(|_| second.next_species()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_environment_stays_within_range() {
        let mut source = SeededEnvironment::new(7, EnvironmentRange { min: 20, max: 50 });
        for index in 0..500 {
            let sample = source.sample(TilePosition::new(index, 0));
            assert!((20..=50).contains(&sample.sun), "sun {} out of range", sample.sun);
            assert!((20..=50).contains(&sample.water), "water {} out of range", sample.water);
        }
    }

    #[test]
    fn scripted_species_cycle() {
        let mut source = ScriptedSpecies::new(vec![Species::Tomato, Species::Eggplant]);
        assert_eq!(source.next_species(), Species::Tomato);
        assert_eq!(source.next_species(), Species::Eggplant);
        assert_eq!(source.next_species(), Species::Tomato);

        let mut empty = ScriptedSpecies::new(Vec::new());
        assert_eq!(empty.next_species(), Species::Potato);
    }

    #[test]
    fn layer_regenerates_every_tile() {
        let mut layer = EnvironmentLayer::new(3, 2);
        assert_eq!(
            layer.sample_at(TilePosition::new(2, 1)),
            Some(EnvironmentSample::default())
        );

        let mut source = ConstantEnvironment::new(41, 23);
        layer.regenerate(&mut source);

        assert_eq!(
            layer.sample_at(TilePosition::new(2, 1)),
            Some(EnvironmentSample { sun: 41, water: 23 })
        );
        assert_eq!(layer.sample_at(TilePosition::new(3, 0)), None);
    }
}
