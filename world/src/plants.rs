//! Crop entities and the registry that owns them.

use std::collections::BTreeMap;

use furrow_core::{PlantState, RegistryError, Species, TilePosition};

/// Result of a single growth evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthOutcome {
    /// The crop advanced by one growth stage.
    pub advanced: bool,
    /// The crop became ready to harvest.
    pub ripened: bool,
}

/// A single crop growing on one tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plant {
    species: Species,
    tile: TilePosition,
    growth_stage: u8,
    sunlight: Vec<u32>,
    water: Vec<u32>,
    ready_to_harvest: bool,
}

impl Plant {
    /// Creates a freshly planted seed.
    #[must_use]
    pub fn new(species: Species, tile: TilePosition) -> Self {
        Self {
            species,
            tile,
            growth_stage: 0,
            sunlight: Vec::new(),
            water: Vec::new(),
            ready_to_harvest: false,
        }
    }

    /// Recreates a crop from a captured state.
    #[must_use]
    pub fn from_state(state: &PlantState) -> Self {
        Self {
            species: state.species,
            tile: state.tile,
            growth_stage: state.growth_stage,
            sunlight: state.sunlight.clone(),
            water: state.water.clone(),
            ready_to_harvest: state.ready_to_harvest,
        }
    }

    /// Captures the full crop record.
    #[must_use]
    pub fn to_state(&self) -> PlantState {
        PlantState {
            tile: self.tile,
            species: self.species,
            growth_stage: self.growth_stage,
            sunlight: self.sunlight.clone(),
            water: self.water.clone(),
            ready_to_harvest: self.ready_to_harvest,
        }
    }

    /// Species of the crop.
    #[must_use]
    pub const fn species(&self) -> Species {
        self.species
    }

    /// Tile the crop grows on.
    #[must_use]
    pub const fn tile(&self) -> TilePosition {
        self.tile
    }

    /// Growth stage reached so far.
    #[must_use]
    pub const fn growth_stage(&self) -> u8 {
        self.growth_stage
    }

    /// Sunlight received per turn, oldest first.
    #[must_use]
    pub fn sunlight(&self) -> &[u32] {
        &self.sunlight
    }

    /// Water received per turn, oldest first.
    #[must_use]
    pub fn water(&self) -> &[u32] {
        &self.water
    }

    /// Whether the crop may be harvested.
    #[must_use]
    pub const fn is_ready_to_harvest(&self) -> bool {
        self.ready_to_harvest
    }

    /// Appends one turn of environmental input to the crop's history.
    pub fn record_environment(&mut self, sun: u32, water: u32) {
        self.sunlight.push(sun);
        self.water.push(water);
    }

    /// Evaluates the growth table against the accumulated history.
    ///
    /// Advances at most one stage per call, when the latest turn met the
    /// species' stage minimums. Once at the terminal stage the crop ripens when
    /// the averages over the ripening window meet the species thresholds.
    /// Neither the stage nor readiness ever regresses.
    pub fn check_growth_conditions(&mut self) -> GrowthOutcome {
        let profile = self.species.growth_profile();
        let mut outcome = GrowthOutcome::default();

        if self.growth_stage < profile.terminal_stage() {
            if let (Some(&sun), Some(&water)) = (self.sunlight.last(), self.water.last()) {
                if sun >= profile.stage_sun() && water >= profile.stage_water() {
                    self.growth_stage += 1;
                    outcome.advanced = true;
                }
            }
        }

        if !self.ready_to_harvest && self.growth_stage >= profile.terminal_stage() {
            let window = profile.ripening_window();
            let sun_ok = window_meets(&self.sunlight, window, profile.ripen_sun());
            let water_ok = window_meets(&self.water, window, profile.ripen_water());
            if sun_ok && water_ok {
                self.ready_to_harvest = true;
                outcome.ripened = true;
            }
        }

        outcome
    }
}

fn window_meets(history: &[u32], window: usize, threshold: u32) -> bool {
    if window == 0 || history.len() < window {
        return false;
    }
    let recent = &history[history.len() - window..];
    let total: u64 = recent.iter().map(|&value| u64::from(value)).sum();
    total >= u64::from(threshold) * window as u64
}

/// Live crops keyed by the tile they occupy; at most one crop per tile.
#[derive(Clone, Debug, Default)]
pub struct PlantRegistry {
    plants: BTreeMap<TilePosition, Plant>,
}

impl PlantRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plants a new seed of `species` on `tile`.
    pub fn add(&mut self, species: Species, tile: TilePosition) -> Result<&Plant, RegistryError> {
        match self.plants.entry(tile) {
            std::collections::btree_map::Entry::Occupied(_) => {
                Err(RegistryError::TileOccupied(tile))
            }
            std::collections::btree_map::Entry::Vacant(slot) => {
                Ok(slot.insert(Plant::new(species, tile)))
            }
        }
    }

    /// Removes and returns the crop growing on `tile`.
    pub fn remove(&mut self, tile: TilePosition) -> Result<Plant, RegistryError> {
        self.plants
            .remove(&tile)
            .ok_or(RegistryError::NoPlant(tile))
    }

    /// Crop growing on `tile`, if any.
    #[must_use]
    pub fn get(&self, tile: TilePosition) -> Option<&Plant> {
        self.plants.get(&tile)
    }

    /// Iterates over every crop in tile order.
    pub fn iter(&self) -> impl Iterator<Item = &Plant> {
        self.plants.values()
    }

    /// Iterates mutably over every crop in tile order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Plant> {
        self.plants.values_mut()
    }

    /// Number of live crops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plants.len()
    }

    /// Whether no crops are growing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Removes every crop.
    pub fn clear(&mut self) {
        self.plants.clear();
    }

    /// Captures every crop in tile order.
    #[must_use]
    pub fn states(&self) -> Vec<PlantState> {
        self.plants.values().map(Plant::to_state).collect()
    }

    /// Discards every crop and recreates the registry from captured states.
    pub fn rebuild(&mut self, states: &[PlantState]) {
        self.plants = states
            .iter()
            .map(|state| (state.tile, Plant::from_state(state)))
            .collect();
    }
}
