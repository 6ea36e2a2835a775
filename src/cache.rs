//! The durable tile cache.
//!
//! Remembers every tile ever generated for a map, keyed by absolute
//! coordinate. Entries are never recomputed or evicted, which is what
//! guarantees that revisiting a region reproduces identical terrain.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldGenerator;
use crate::tile::{Tile, TileCoord};

/// Append-only coordinate-to-tile mapping.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TileCache {
    tiles: HashMap<TileCoord, Tile>,
}

impl TileCache {
    pub fn new() -> Self {
        TileCache {
            tiles: HashMap::new(),
        }
    }

    /// Fetch the tile at `coord`, generating and remembering it on first
    /// access. Hits return the stored tile unchanged.
    pub fn get_or_create(
        &mut self,
        coord: TileCoord,
        elevation: &FieldGenerator,
        moisture: &FieldGenerator,
    ) -> Tile {
        if let Some(tile) = self.tiles.get(&coord) {
            return *tile;
        }
        let tile = Tile::generate(
            coord,
            elevation.get(coord.x, coord.y),
            moisture.get(coord.x, coord.y),
        );
        self.tiles.insert(coord, tile);
        tile
    }

    /// Look up a tile without generating it.
    pub fn peek(&self, coord: &TileCoord) -> Option<&Tile> {
        self.tiles.get(coord)
    }

    pub fn contains(&self, coord: &TileCoord) -> bool {
        self.tiles.contains_key(coord)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TileCoord, &Tile)> {
        self.tiles.iter()
    }
}
