//! Packed per-tile record store backing plantability and crop occupancy.

use furrow_core::{GridError, GridRecord, TilePosition};

/// Flat byte buffer holding one [`GridRecord`] per tile.
///
/// Records are addressed by `(y * width + x) * GridRecord::SIZE`. The store is
/// pure data: planting and harvesting rules live in the world's command
/// handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridState {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl GridState {
    /// Creates a grid of empty, unplantable records.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let tiles = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            width,
            height,
            bytes: vec![0; tiles * GridRecord::SIZE],
        }
    }

    /// Dimensions of the grid measured in tiles as `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Byte offset of the record describing `tile`.
    pub fn index(&self, tile: TilePosition) -> Result<usize, GridError> {
        if tile.x() >= self.width || tile.y() >= self.height {
            return Err(GridError::OutOfBounds {
                x: tile.x(),
                y: tile.y(),
                width: self.width,
                height: self.height,
            });
        }

        let row = tile.y() as usize;
        let column = tile.x() as usize;
        let width = self.width as usize;
        Ok((row * width + column) * GridRecord::SIZE)
    }

    /// Reads the record stored for `tile`.
    pub fn get(&self, tile: TilePosition) -> Result<GridRecord, GridError> {
        let index = self.index(tile)?;
        let mut packed = [0; GridRecord::SIZE];
        packed.copy_from_slice(&self.bytes[index..index + GridRecord::SIZE]);
        Ok(GridRecord::from_bytes(packed))
    }

    /// Overwrites all fields of the record stored for `tile`.
    pub fn set(&mut self, tile: TilePosition, record: GridRecord) -> Result<(), GridError> {
        let index = self.index(tile)?;
        self.bytes[index..index + GridRecord::SIZE].copy_from_slice(&record.to_bytes());
        Ok(())
    }

    /// Iterates over every tile that currently holds a crop, in row-major order.
    pub fn occupied_tiles(&self) -> impl Iterator<Item = (TilePosition, GridRecord)> + '_ {
        let width = self.width.max(1);
        self.bytes
            .chunks_exact(GridRecord::SIZE)
            .enumerate()
            .filter_map(move |(offset, chunk)| {
                let record = GridRecord::from_bytes([chunk[0], chunk[1], chunk[2]]);
                if record.species_code() == 0 {
                    return None;
                }
                let offset = u32::try_from(offset).ok()?;
                Some((TilePosition::new(offset % width, offset / width), record))
            })
    }

    /// Raw packed bytes of the grid.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Clears the crop fields of every record, keeping plantability.
    pub(crate) fn clear_crops(&mut self) {
        for chunk in self.bytes.chunks_exact_mut(GridRecord::SIZE) {
            chunk[1] = 0;
            chunk[2] = 0;
        }
    }
}
