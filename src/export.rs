//! PNG export of the layered grid

use std::error::Error;
use std::path::Path;

use image::{Rgb, RgbImage};

use crate::generator::GeneratedCave;
use crate::grid::Coord;
use crate::tiles::{CellLayer, Tile};

/// Floor colors per biome index, cycled for larger counts.
const BIOME_COLORS: [(u8, u8, u8); 8] = [
    (70, 130, 90),   // moss
    (190, 160, 90),  // sandstone
    (90, 120, 190),  // ice
    (170, 70, 60),   // magma
    (140, 90, 170),  // crystal
    (60, 150, 150),  // fungal
    (160, 160, 70),  // sulfur
    (200, 120, 150), // coral
];

const EMPTY: (u8, u8, u8) = (12, 10, 16);

pub fn tile_color(tile: &Tile) -> (u8, u8, u8) {
    match tile {
        Tile::Biome(i) => BIOME_COLORS[*i as usize % BIOME_COLORS.len()],
        Tile::Stone => (105, 100, 95),
        Tile::Ore(v) => match v % 3 {
            0 => (230, 200, 60),
            1 => (80, 210, 230),
            _ => (220, 90, 200),
        },
        Tile::Border => (35, 32, 30),
        Tile::Background(i) => {
            let (r, g, b) = BIOME_COLORS[*i as usize % BIOME_COLORS.len()];
            (r / 4, g / 4, b / 4)
        }
        Tile::RadiusFill => (40, 40, 55),
        Tile::Outline => (220, 220, 210),
        Tile::Decoration(_) => (250, 240, 140),
    }
}

/// Color of a cell with all layers stacked.
fn cell_color(cave: &GeneratedCave, c: Coord) -> (u8, u8, u8) {
    [CellLayer::Decoration, CellLayer::Floor, CellLayer::Outline, CellLayer::Background]
        .into_iter()
        .find_map(|layer| cave.grid.get(layer, c).ok().flatten())
        .map_or(EMPTY, |t| tile_color(&t))
}

/// Render the composite map to an image, `cell_px` pixels per cell, `y` up.
pub fn render_image(cave: &GeneratedCave, cell_px: u32) -> RgbImage {
    let cell_px = cell_px.max(1);
    let (w, h) = (cave.grid.width as u32, cave.grid.height as u32);
    let mut img = RgbImage::new(w * cell_px, h * cell_px);

    for y in 0..h {
        for x in 0..w {
            let (r, g, b) = cell_color(cave, Coord::new(x as i32, y as i32));
            let top = (h - 1 - y) * cell_px;
            let left = x * cell_px;
            for py in 0..cell_px {
                for px in 0..cell_px {
                    img.put_pixel(left + px, top + py, Rgb([r, g, b]));
                }
            }
        }
    }
    img
}

/// Export the composite map as a PNG file.
pub fn export_png(cave: &GeneratedCave, path: impl AsRef<Path>, cell_px: u32) -> Result<(), Box<dyn Error>> {
    render_image(cave, cell_px).save(path.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaveConfig;
    use crate::generator::CaveGenerator;

    #[test]
    fn test_image_dimensions() {
        let cave = CaveGenerator::new(CaveConfig::small().with_seed(2)).unwrap().generate().unwrap();
        let img = render_image(&cave, 3);
        assert_eq!(img.width(), 48 * 3);
        assert_eq!(img.height(), 32 * 3);
    }

    #[test]
    fn test_bottom_left_cell_drawn_at_bottom() {
        let mut cave = CaveGenerator::new(CaveConfig::small().with_seed(2)).unwrap().generate().unwrap();
        cave.grid.clear_all();
        cave.grid.set(CellLayer::Floor, Coord::new(0, 0), Some(Tile::Stone)).unwrap();
        let img = render_image(&cave, 1);
        let (r, g, b) = tile_color(&Tile::Stone);
        assert_eq!(*img.get_pixel(0, 31), Rgb([r, g, b]));
        let (r, g, b) = EMPTY;
        assert_eq!(*img.get_pixel(0, 0), Rgb([r, g, b]));
    }
}
