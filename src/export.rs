//! PNG export of the live window.
//!
//! Writes the currently materialized window as an image so a world can be
//! inspected without the interactive explorer.

use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::world::WorldMap;

/// Which per-tile color to write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportLayer {
    /// Biome palette shaded by elevation
    Biome,
    /// Raw fields packed into channels (R elevation, G moisture, B biome id)
    Fields,
}

/// Write the live window as a PNG, `scale` pixels per tile.
pub fn export_window_png<P: AsRef<Path>>(
    map: &WorldMap,
    layer: ExportLayer,
    scale: u32,
    path: P,
) -> Result<(), image::ImageError> {
    let scale = scale.max(1);
    let grid = map.grid();
    let width = grid.width() as u32 * scale;
    let height = grid.height() as u32 * scale;
    let mut img: RgbImage = ImageBuffer::new(width, height);

    for (i, j, tile) in grid.iter() {
        let (r, g, b) = match layer {
            ExportLayer::Biome => tile.color(),
            ExportLayer::Fields => tile.field_color(),
        };
        for dy in 0..scale {
            for dx in 0..scale {
                let px = i as u32 * scale + dx;
                let py = j as u32 * scale + dy;
                img.put_pixel(px, py, Rgb([r, g, b]));
            }
        }
    }

    img.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WorldConfig;
    use tempfile::tempdir;

    #[test]
    fn test_export_writes_scaled_image() {
        let map = WorldMap::new(WorldConfig {
            width: 6,
            height: 4,
            ..WorldConfig::default()
        });
        let dir = tempdir().unwrap();
        let path = dir.path().join("window.png");

        export_window_png(&map, ExportLayer::Biome, 3, &path).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), 18);
        assert_eq!(img.height(), 12);
    }

    #[test]
    fn test_field_layer_packs_channels() {
        let map = WorldMap::new(WorldConfig {
            width: 2,
            height: 2,
            ..WorldConfig::default()
        });
        let dir = tempdir().unwrap();
        let path = dir.path().join("fields.png");

        export_window_png(&map, ExportLayer::Fields, 1, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        let tile = map.grid().get(0, 0);
        let (r, g, b) = tile.field_color();
        assert_eq!(img.get_pixel(0, 0).0, [r, g, b]);
    }
}
