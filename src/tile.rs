//! Core tile types.
//!
//! A tile is a small immutable value: once generated for a coordinate it
//! never changes, so the cache and the live grid can both hold copies
//! without any sharing discipline.

use serde::{Deserialize, Serialize};

use crate::biome::Biome;

/// Absolute tile coordinate. The domain is unbounded in every direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i64,
    pub y: i64,
}

impl TileCoord {
    pub fn new(x: i64, y: i64) -> Self {
        TileCoord { x, y }
    }

    /// The coordinate shifted by (dx, dy).
    pub fn offset(self, dx: i64, dy: i64) -> Self {
        TileCoord::new(self.x + dx, self.y + dy)
    }
}

/// A single world tile.
///
/// The derived fields (`biome`, `blocked`, `block_sight`) are a pure
/// function of the two generated fields.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Tile {
    pub coord: TileCoord,
    /// Elevation in [0, 1]
    pub elevation: f32,
    /// Moisture in [0, 1]
    pub moisture: f32,
    pub biome: Biome,
    /// Occupants cannot enter this tile
    pub blocked: bool,
    /// Tile obstructs visibility (unused by any biome today)
    pub block_sight: bool,
}

impl Tile {
    /// Build the tile for a coordinate from its generated field values.
    pub fn generate(coord: TileCoord, elevation: f64, moisture: f64) -> Self {
        let elevation = elevation as f32;
        let moisture = moisture as f32;
        let biome = Biome::classify(elevation, moisture);
        Tile {
            coord,
            elevation,
            moisture,
            biome,
            blocked: biome.blocks_movement(),
            block_sight: biome.blocks_sight(),
        }
    }

    /// Display color: the biome palette shaded by elevation, so high
    /// ground reads brighter than low ground within the same biome.
    pub fn color(&self) -> (u8, u8, u8) {
        let (r, g, b) = self.biome.color();
        let brightness = 0.85 + self.elevation * 0.3;
        (shade(r, brightness), shade(g, brightness), shade(b, brightness))
    }

    /// Debug color packing the raw fields into channels:
    /// R = elevation, G = moisture, B = biome id.
    pub fn field_color(&self) -> (u8, u8, u8) {
        (
            (self.elevation * 255.0) as u8,
            (self.moisture * 255.0) as u8,
            self.biome.id() * 25,
        )
    }
}

/// Terrain identity: position is deliberately excluded, so a regenerated
/// tile compares equal to the cached one it reproduces.
impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.elevation == other.elevation
            && self.moisture == other.moisture
            && self.biome == other.biome
    }
}

fn shade(channel: u8, factor: f32) -> u8 {
    (channel as f32 * factor).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_fields_follow_classifier() {
        let tile = Tile::generate(TileCoord::new(3, -4), 0.05, 0.5);
        assert_eq!(tile.biome, Biome::Ocean);
        assert!(tile.blocked);
        assert!(!tile.block_sight);

        let land = Tile::generate(TileCoord::new(0, 0), 0.5, 0.5);
        assert_eq!(land.biome, Biome::Forest);
        assert!(!land.blocked);
    }

    #[test]
    fn test_equality_is_terrain_identity() {
        let a = Tile::generate(TileCoord::new(0, 0), 0.5, 0.5);
        let b = Tile::generate(TileCoord::new(100, -100), 0.5, 0.5);
        assert_eq!(a, b);

        let c = Tile::generate(TileCoord::new(0, 0), 0.5, 0.7);
        assert_ne!(a, c);
    }

    #[test]
    fn test_higher_ground_is_brighter() {
        let low = Tile::generate(TileCoord::new(0, 0), 0.15, 0.5);
        let high = Tile::generate(TileCoord::new(0, 0), 0.55, 0.5);
        // Same biome band boundaries aside, shading tracks elevation
        assert!(high.color().1 >= low.color().1);
    }

    #[test]
    fn test_field_color_packs_fields() {
        let tile = Tile::generate(TileCoord::new(0, 0), 1.0, 0.0);
        let (r, g, b) = tile.field_color();
        assert_eq!(r, 255);
        assert_eq!(g, 0);
        assert_eq!(b, tile.biome.id() * 25);
    }
}
