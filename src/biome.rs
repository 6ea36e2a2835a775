//! Biome classification from elevation and moisture.
//!
//! A fixed Whittaker-style decision table maps the two generated fields
//! onto ten discrete biomes. Classification is pure: two tiles with equal
//! elevation and moisture always land in the same biome.

use serde::{Deserialize, Serialize};

/// The ten terrain categories a tile can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Ocean = 0,
    Beach = 1,
    Desert = 2,
    Grassland = 3,
    Forest = 4,
    Rainforest = 5,
    Taiga = 6,
    Bare = 7,
    Tundra = 8,
    Snow = 9,
}

impl Biome {
    /// Classify a biome from elevation and moisture, both in [0, 1].
    ///
    /// Elevation picks the band, moisture picks within it. Water and shore
    /// ignore moisture entirely.
    pub fn classify(elevation: f32, moisture: f32) -> Biome {
        if elevation < 0.10 {
            return Biome::Ocean;
        }
        if elevation < 0.12 {
            return Biome::Beach;
        }

        if elevation < 0.60 {
            // Lowlands: the full dry-to-wet sweep
            match moisture {
                m if m < 0.16 => Biome::Desert,
                m if m < 0.33 => Biome::Grassland,
                m if m < 0.66 => Biome::Forest,
                _ => Biome::Rainforest,
            }
        } else if elevation < 0.80 {
            // Highlands: drier overall, conifers where it stays wet
            match moisture {
                m if m < 0.33 => Biome::Desert,
                m if m < 0.66 => Biome::Grassland,
                _ => Biome::Taiga,
            }
        } else {
            // Peaks
            match moisture {
                m if m < 0.20 => Biome::Bare,
                m if m < 0.50 => Biome::Tundra,
                _ => Biome::Snow,
            }
        }
    }

    /// Stable numeric id, 0..=9.
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Whether occupants cannot enter this terrain.
    pub fn blocks_movement(&self) -> bool {
        matches!(self, Biome::Ocean)
    }

    /// Whether this terrain obstructs visibility. No biome does today;
    /// tiles still carry the flag so saved maps survive a future
    /// line-of-sight system.
    pub fn blocks_sight(&self) -> bool {
        false
    }

    /// Get RGB color for biome visualization
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Biome::Ocean => (48, 62, 115),
            Biome::Beach => (208, 192, 154),
            Biome::Desert => (210, 185, 139),
            Biome::Grassland => (136, 171, 85),
            Biome::Forest => (67, 120, 62),
            Biome::Rainforest => (38, 92, 66),
            Biome::Taiga => (85, 110, 80),
            Biome::Bare => (136, 136, 136),
            Biome::Tundra => (153, 153, 119),
            Biome::Snow => (222, 222, 228),
        }
    }

    /// Get ASCII character for terminal display
    pub fn glyph(&self) -> char {
        match self {
            Biome::Ocean => '~',
            Biome::Beach => '.',
            Biome::Desert => 'd',
            Biome::Grassland => '"',
            Biome::Forest => 'T',
            Biome::Rainforest => 'R',
            Biome::Taiga => 'B',
            Biome::Bare => '^',
            Biome::Tundra => ':',
            Biome::Snow => 'A',
        }
    }

    /// Human-readable name for status displays.
    pub fn name(&self) -> &'static str {
        match self {
            Biome::Ocean => "Ocean",
            Biome::Beach => "Beach",
            Biome::Desert => "Desert",
            Biome::Grassland => "Grassland",
            Biome::Forest => "Forest",
            Biome::Rainforest => "Rainforest",
            Biome::Taiga => "Taiga",
            Biome::Bare => "Bare",
            Biome::Tundra => "Tundra",
            Biome::Snow => "Snow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ocean_below_water_line() {
        for m in [0.0, 0.3, 0.9] {
            assert_eq!(Biome::classify(0.05, m), Biome::Ocean);
        }
        assert!(Biome::classify(0.05, 0.5).blocks_movement());
    }

    #[test]
    fn test_beach_band_ignores_moisture() {
        assert_eq!(Biome::classify(0.11, 0.0), Biome::Beach);
        assert_eq!(Biome::classify(0.11, 1.0), Biome::Beach);
    }

    #[test]
    fn test_lowland_moisture_sweep() {
        assert_eq!(Biome::classify(0.3, 0.1), Biome::Desert);
        assert_eq!(Biome::classify(0.3, 0.2), Biome::Grassland);
        assert_eq!(Biome::classify(0.3, 0.5), Biome::Forest);
        assert_eq!(Biome::classify(0.5, 0.9), Biome::Rainforest);
    }

    #[test]
    fn test_highland_moisture_sweep() {
        assert_eq!(Biome::classify(0.7, 0.2), Biome::Desert);
        assert_eq!(Biome::classify(0.7, 0.5), Biome::Grassland);
        assert_eq!(Biome::classify(0.7, 0.8), Biome::Taiga);
    }

    #[test]
    fn test_peak_moisture_sweep() {
        assert_eq!(Biome::classify(0.95, 0.1), Biome::Bare);
        assert_eq!(Biome::classify(0.95, 0.3), Biome::Tundra);
        assert_eq!(Biome::classify(0.95, 0.8), Biome::Snow);
    }

    #[test]
    fn test_band_boundaries() {
        // Lower bounds are inclusive for the band above
        assert_eq!(Biome::classify(0.10, 0.5), Biome::Beach);
        assert_eq!(Biome::classify(0.12, 0.5), Biome::Forest);
        assert_eq!(Biome::classify(0.60, 0.5), Biome::Grassland);
        assert_eq!(Biome::classify(0.80, 0.3), Biome::Tundra);
    }

    #[test]
    fn test_only_ocean_blocks() {
        let all = [
            Biome::Ocean,
            Biome::Beach,
            Biome::Desert,
            Biome::Grassland,
            Biome::Forest,
            Biome::Rainforest,
            Biome::Taiga,
            Biome::Bare,
            Biome::Tundra,
            Biome::Snow,
        ];
        for biome in all {
            assert_eq!(biome.blocks_movement(), biome == Biome::Ocean);
            assert!(!biome.blocks_sight());
        }
    }

    #[test]
    fn test_ids_are_stable() {
        assert_eq!(Biome::Ocean.id(), 0);
        assert_eq!(Biome::Snow.id(), 9);
    }
}
