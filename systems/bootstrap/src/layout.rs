//! ASCII farm layouts acting as the tilemap and collision collaborator.

use furrow_core::{Terrain, TileInfo, TilePosition, WorldBounds, WorldPoint};
use thiserror::Error;

const DEFAULT_FIELD: &str = include_str!("../fields/default.txt");

/// Ground covering a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ground {
    /// Walkable tile that cannot be planted.
    Grass,
    /// Walkable, plantable soil.
    Dirt,
    /// Colliding obstacle.
    Fence,
}

impl Ground {
    fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Self::Grass),
            '=' => Some(Self::Dirt),
            '#' => Some(Self::Fence),
            _ => None,
        }
    }

    /// Glyph used for the ground in layout files.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Grass => '.',
            Self::Dirt => '=',
            Self::Fence => '#',
        }
    }
}

/// Errors raised while parsing a field layout.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout contains no rows.
    #[error("field layout is empty")]
    Empty,
    /// A row's width differs from the first row.
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A glyph does not name any ground.
    #[error("unknown glyph {glyph:?} at column {column}, row {row}")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// Zero-based column of the glyph.
        column: usize,
        /// Zero-based row of the glyph.
        row: usize,
    },
    /// The layout is too large to address.
    #[error("field layout exceeds the addressable size")]
    TooLarge,
    /// Tiles must have a positive edge length.
    #[error("tile length must be at least 1")]
    ZeroTileLength,
}

/// Rectangular farm parsed from ASCII, one glyph per tile.
///
/// `.` is grass, `=` plantable dirt and `#` a fence. Blank lines are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    width: u32,
    height: u32,
    tile_length: u32,
    tiles: Vec<Ground>,
}

impl FieldLayout {
    /// Parses a layout whose tiles measure `tile_length` world units.
    pub fn parse(source: &str, tile_length: u32) -> Result<Self, LayoutError> {
        if tile_length == 0 {
            return Err(LayoutError::ZeroTileLength);
        }

        let mut tiles = Vec::new();
        let mut width = None;
        let mut height = 0usize;
        for (row, line) in source
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .enumerate()
        {
            let found = line.chars().count();
            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected,
                    found,
                });
            }
            for (column, glyph) in line.chars().enumerate() {
                let ground = Ground::from_glyph(glyph).ok_or(LayoutError::UnknownGlyph {
                    glyph,
                    column,
                    row,
                })?;
                tiles.push(ground);
            }
            height += 1;
        }

        let width = width.ok_or(LayoutError::Empty)?;
        Ok(Self {
            width: u32::try_from(width).map_err(|_| LayoutError::TooLarge)?,
            height: u32::try_from(height).map_err(|_| LayoutError::TooLarge)?,
            tile_length,
            tiles,
        })
    }

    /// The stock twenty by fifteen farm with a dirt patch around tile (5, 5).
    pub fn default_farm(tile_length: u32) -> Result<Self, LayoutError> {
        Self::parse(DEFAULT_FIELD, tile_length)
    }

    /// Ground covering `tile`, or `None` outside the layout.
    #[must_use]
    pub fn ground_at(&self, tile: TilePosition) -> Option<Ground> {
        if tile.x() >= self.width || tile.y() >= self.height {
            return None;
        }
        let index = tile.y() as usize * self.width as usize + tile.x() as usize;
        self.tiles.get(index).copied()
    }

    /// Edge length of a tile in world units.
    #[must_use]
    pub const fn tile_length(&self) -> u32 {
        self.tile_length
    }

    /// Centre of `tile` in world units.
    #[must_use]
    pub fn tile_centre(&self, tile: TilePosition) -> WorldPoint {
        let half = self.tile_length / 2;
        let coordinate = |index: u32| {
            i32::try_from(u64::from(index) * u64::from(self.tile_length) + u64::from(half))
                .unwrap_or(i32::MAX)
        };
        WorldPoint::new(coordinate(tile.x()), coordinate(tile.y()))
    }
}

impl Terrain for FieldLayout {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn tile_at(&self, tile: TilePosition) -> Option<TileInfo> {
        self.ground_at(tile).map(|ground| TileInfo {
            plantable: ground == Ground::Dirt,
        })
    }

    fn world_to_tile(&self, point: WorldPoint) -> Option<TilePosition> {
        let x = u32::try_from(point.x()).ok()?;
        let y = u32::try_from(point.y()).ok()?;
        Some(TilePosition::new(x / self.tile_length, y / self.tile_length))
    }

    fn is_blocked(&self, point: WorldPoint) -> bool {
        self.world_to_tile(point)
            .and_then(|tile| self.ground_at(tile))
            .is_some_and(|ground| ground == Ground::Fence)
    }

    fn world_bounds(&self) -> WorldBounds {
        WorldBounds::new(
            self.width.saturating_mul(self.tile_length),
            self.height.saturating_mul(self.tile_length),
        )
    }
}
