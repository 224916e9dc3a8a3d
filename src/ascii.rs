//! ASCII rendering and export for generated caves
//!
//! Rows are printed from the highest `y` down so the map reads with `y` pointing up.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Write};

use chrono::Local;

use crate::config::CaveConfig;
use crate::generator::GeneratedCave;
use crate::grid::{Coord, Grid};
use crate::tiles::{CellLayer, Tile};

/// Get ASCII character for a tile
pub fn tile_char(tile: &Tile) -> char {
    match tile {
        Tile::Biome(i) if *i < 10 => (b'0' + i) as char,
        Tile::Biome(i) => (b'a' + (i - 10) % 26) as char,
        Tile::Stone => '#',
        Tile::Ore(_) => '*',
        Tile::Border => '=',
        Tile::Background(_) => '.',
        Tile::RadiusFill => '+',
        Tile::Outline => ':',
        Tile::Decoration(_) => '^',
    }
}

/// Topmost visible tile at a cell: decoration, floor, outline, then background.
pub fn composite_tile(grid: &Grid, c: Coord) -> Option<Tile> {
    [CellLayer::Decoration, CellLayer::Floor, CellLayer::Outline, CellLayer::Background]
        .into_iter()
        .find_map(|layer| grid.get(layer, c).ok().flatten())
}

fn render_with(grid: &Grid, cell: impl Fn(Coord) -> Option<Tile>) -> String {
    let mut result = String::with_capacity((grid.width + 1) * grid.height);
    for y in (0..grid.height as i32).rev() {
        for x in 0..grid.width as i32 {
            result.push(cell(Coord::new(x, y)).as_ref().map_or(' ', tile_char));
        }
        result.push('\n');
    }
    result
}

/// Render a single layer.
pub fn render_layer(grid: &Grid, layer: CellLayer) -> String {
    render_with(grid, |c| grid.get(layer, c).ok().flatten())
}

/// Render all layers stacked.
pub fn render_composite(grid: &Grid) -> String {
    render_with(grid, |c| composite_tile(grid, c))
}

pub fn tile_counts(grid: &Grid, layer: CellLayer) -> HashMap<Tile, usize> {
    let mut counts = HashMap::new();
    for (_, tile) in grid.layer(layer).iter() {
        if let Some(t) = tile {
            *counts.entry(*t).or_insert(0) += 1;
        }
    }
    counts
}

/// Generate legend for tile characters
pub fn tile_legend() -> String {
    let mut s = String::new();
    s.push_str("LEGEND:\n");
    s.push_str("  0-9 = Biome floor    # = Stone (fallback)   * = Ore\n");
    s.push_str("  =   = Border         : = Outline            ^ = Decoration\n");
    s.push_str("  .   = Biome background  + = Radius fill (layer view only)\n");
    s
}

/// Print the composite map to stdout.
pub fn print_ascii_map(grid: &Grid) {
    print!("{}", render_composite(grid));
}

/// Export a generated cave to a text file.
pub fn export_cave_file(cave: &GeneratedCave, config: &CaveConfig, path: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    let grid = &cave.grid;
    let report = &cave.report;

    writeln!(file, "=== CAVE GENERATOR MAP FILE ===")?;
    writeln!(file, "Seed: {}", cave.seed)?;
    writeln!(file, "Size: {}x{}", grid.width, grid.height)?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;

    writeln!(file, "=== BIOMES ===")?;
    writeln!(
        file,
        "Placed {} of {} requested (fallback index {})",
        report.placed_biomes(),
        report.requested_biomes(),
        cave.fallback_index
    )?;
    if !report.placement.skipped.is_empty() {
        writeln!(file, "Skipped indices: {:?}", report.placement.skipped)?;
    }
    for biome in cave.registry.iter() {
        let carved = report
            .carved
            .iter()
            .find(|(i, _)| *i == biome.index)
            .map_or(0, |(_, n)| *n);
        writeln!(
            file,
            "  biome {} at {} radius {:.1}: {} cells carved",
            biome.index, biome.center, biome.radius, carved
        )?;
    }
    writeln!(file, "Carve mode: {:?}, fallback rule: {:?}", config.carve_mode, config.fallback_rule)?;
    writeln!(file)?;

    writeln!(file, "=== STATS ===")?;
    writeln!(file, "Stone cells: {}", report.fallback.filled)?;
    writeln!(file, "Ore clusters: {} ({} cells)", report.ore.clusters, report.ore.written)?;
    writeln!(file, "Border cells: {} (+{} outside)", report.border_cells, cave.outer_border.len())?;
    writeln!(file, "Outline cells: {}", report.outline_cells)?;
    writeln!(file, "Decorations: {}", report.decorations)?;
    writeln!(file)?;

    writeln!(file, "=== MAP (Composite View) ===")?;
    write!(file, "{}", render_composite(grid))?;
    writeln!(file)?;

    write!(file, "{}", tile_legend())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_orientation_and_size() {
        let mut grid = Grid::new(3, 2);
        grid.set(CellLayer::Floor, Coord::new(0, 1), Some(Tile::Biome(0))).unwrap();
        grid.set(CellLayer::Floor, Coord::new(2, 0), Some(Tile::Stone)).unwrap();
        assert_eq!(render_layer(&grid, CellLayer::Floor), "0  \n  #\n");
    }

    #[test]
    fn test_composite_priority() {
        let mut grid = Grid::new(1, 1);
        let c = Coord::new(0, 0);
        grid.set(CellLayer::Background, c, Some(Tile::Background(1))).unwrap();
        assert_eq!(composite_tile(&grid, c), Some(Tile::Background(1)));
        grid.set(CellLayer::Floor, c, Some(Tile::Ore(0))).unwrap();
        assert_eq!(composite_tile(&grid, c), Some(Tile::Ore(0)));
        grid.set(CellLayer::Decoration, c, Some(Tile::Decoration(2))).unwrap();
        assert_eq!(render_composite(&grid), "^\n");
    }

    #[test]
    fn test_tile_counts() {
        let mut grid = Grid::new(4, 1);
        grid.set(CellLayer::Floor, Coord::new(0, 0), Some(Tile::Stone)).unwrap();
        grid.set(CellLayer::Floor, Coord::new(1, 0), Some(Tile::Stone)).unwrap();
        grid.set(CellLayer::Floor, Coord::new(3, 0), Some(Tile::Ore(1))).unwrap();
        let counts = tile_counts(&grid, CellLayer::Floor);
        assert_eq!(counts[&Tile::Stone], 2);
        assert_eq!(counts[&Tile::Ore(1)], 1);
        assert_eq!(counts.len(), 2);
    }
}
