//! Decorations spawned just above each biome center

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::biome::BiomeRegistry;
use crate::error::Result;
use crate::grid::Grid;
use crate::tiles::{CellLayer, Tile};

/// Horizontal offset range from the biome center, half-open.
pub const DECORATION_X: std::ops::Range<i32> = -5..5;
/// Vertical offset range, always above the center.
pub const DECORATION_Y: std::ops::Range<i32> = 1..5;

/// Try `per_biome` placements around every biome center. Attempts that leave the map
/// or hit an existing decoration are dropped.
pub fn spawn_decorations(
    grid: &mut Grid,
    registry: &BiomeRegistry,
    per_biome: usize,
    variants: u8,
    rng: &mut ChaCha8Rng,
) -> Result<usize> {
    if variants == 0 {
        return Ok(0);
    }
    let mut placed = 0;
    for biome in registry.iter() {
        for _ in 0..per_biome {
            let dx = rng.gen_range(DECORATION_X);
            let dy = rng.gen_range(DECORATION_Y);
            let variant = rng.gen_range(0..variants);
            let target = biome.center.offset(dx, dy);
            if !grid.contains(target) || grid.is_occupied(CellLayer::Decoration, target)? {
                continue;
            }
            grid.set(CellLayer::Decoration, target, Some(Tile::Decoration(variant)))?;
            placed += 1;
        }
    }
    debug!(placed, "decorations spawned");
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::Biome;
    use crate::grid::Coord;
    use rand::SeedableRng;

    #[test]
    fn test_decorations_stay_in_window_above_center() {
        let mut grid = Grid::new(30, 30);
        let mut registry = BiomeRegistry::new();
        registry.insert(Biome::new(0, Coord::new(15, 15), 5.0));
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let placed = spawn_decorations(&mut grid, &registry, 20, 3, &mut rng).unwrap();

        assert!(placed >= 1 && placed <= 20);
        assert_eq!(grid.count_occupied(CellLayer::Decoration), placed);
        for (c, tile) in grid.layer(CellLayer::Decoration).iter() {
            if let Some(Tile::Decoration(v)) = tile {
                assert!(*v < 3);
                assert!((10..20).contains(&c.x));
                assert!((16..20).contains(&c.y));
            }
        }
    }

    #[test]
    fn test_off_map_attempts_are_dropped() {
        // Center on the top row: every offset lands above the map.
        let mut grid = Grid::new(10, 10);
        let mut registry = BiomeRegistry::new();
        registry.insert(Biome::new(0, Coord::new(5, 9), 3.0));
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(spawn_decorations(&mut grid, &registry, 10, 2, &mut rng).unwrap(), 0);
    }
}
