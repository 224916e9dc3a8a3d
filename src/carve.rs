//! Noise-gated biome region carving
//!
//! A biome's footprint is the set of cells inside its radius whose shape noise clears
//! the threshold, which gives organic, non-convex regions instead of filled disks.

use tracing::{debug, trace};

use crate::biome::{Biome, BiomeRegistry};
use crate::config::{CarveMode, NoiseParams};
use crate::error::Result;
use crate::grid::{Coord, Grid};
use crate::noise_field::NoiseField;
use crate::tiles::CellLayer;

/// Writes biome floor tiles for one center at a time.
#[derive(Clone, Debug)]
pub struct RegionCarver {
    pub params: NoiseParams,
    pub mode: CarveMode,
    pub layer: CellLayer,
}

impl RegionCarver {
    pub fn new(params: NoiseParams, mode: CarveMode) -> Self {
        Self { params, mode, layer: CellLayer::Floor }
    }

    /// Shape noise for a cell, offset by the biome center so neighbouring
    /// biomes do not share the same pattern.
    fn shape_value(&self, noise: &NoiseField, biome: &Biome, c: Coord) -> f32 {
        let s = self.params.scale;
        noise.sample(
            (c.x as f32 + biome.center.x as f32) * s,
            (c.y as f32 + biome.center.y as f32) * s,
        )
    }

    /// Whether `c` belongs to the carved footprint of `biome`.
    pub fn is_carved(&self, noise: &NoiseField, biome: &Biome, c: Coord) -> bool {
        let distance = biome.center.distance(c);
        if distance > biome.radius {
            return false;
        }
        let value = self.shape_value(noise, biome, c);
        match self.mode {
            CarveMode::HardRadius => value > self.params.threshold,
            CarveMode::DistanceAttenuated => {
                let falloff = if biome.radius > 0.0 { distance / biome.radius } else { 0.0 };
                value > self.params.threshold * falloff
            }
        }
    }

    /// Carve one biome. Returns the number of cells written.
    ///
    /// Only the radius bounding box is visited; cells outside it can never pass
    /// the radius test.
    pub fn carve(&self, grid: &mut Grid, biome: &Biome, noise: &NoiseField) -> Result<usize> {
        let tile = biome.floor_tile();
        let mut written = 0;
        for c in grid.square_around(biome.center, biome.radius) {
            if self.is_carved(noise, biome, c) {
                grid.set(self.layer, c, Some(tile))?;
                written += 1;
            }
        }
        trace!(index = biome.index, written, "biome carved");
        Ok(written)
    }

    /// Carve every registered biome in ascending index order, so the higher index
    /// wins where two footprints touch. Returns `(index, cells written)` pairs.
    pub fn carve_all(
        &self,
        grid: &mut Grid,
        registry: &BiomeRegistry,
        noise: &NoiseField,
    ) -> Result<Vec<(usize, usize)>> {
        let mut counts = Vec::with_capacity(registry.len());
        for biome in registry.iter() {
            counts.push((biome.index, self.carve(grid, biome, noise)?));
        }
        debug!(
            biomes = counts.len(),
            cells = counts.iter().map(|(_, n)| n).sum::<usize>(),
            mode = ?self.mode,
            "regions carved"
        );
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::Tile;

    fn carver(threshold: f32, mode: CarveMode) -> RegionCarver {
        RegionCarver::new(NoiseParams::new(0.1, threshold), mode)
    }

    #[test]
    fn test_negative_threshold_fills_disk() {
        let mut grid = Grid::new(11, 11);
        let biome = Biome::new(2, Coord::new(5, 5), 3.0);
        let noise = NoiseField::new(1);
        carver(-1.0, CarveMode::HardRadius).carve(&mut grid, &biome, &noise).unwrap();

        for c in grid.coords() {
            let tile = grid.get(CellLayer::Floor, c).unwrap();
            if biome.contains(c) {
                assert_eq!(tile, Some(Tile::Biome(2)));
            } else {
                assert_eq!(tile, None);
            }
        }
    }

    #[test]
    fn test_radius_larger_than_map_covers_every_cell() {
        let mut grid = Grid::new(8, 6);
        let biome = Biome::new(0, Coord::new(7, 5), 1.0e10);
        let written = carver(-1.0, CarveMode::HardRadius)
            .carve(&mut grid, &biome, &NoiseField::new(3))
            .unwrap();
        assert_eq!(written, 48);
        assert_eq!(grid.count_occupied(CellLayer::Floor), 48);
    }

    #[test]
    fn test_threshold_above_range_writes_nothing() {
        let mut grid = Grid::new(11, 11);
        let biome = Biome::new(0, Coord::new(5, 5), 4.0);
        let written = carver(1.0, CarveMode::HardRadius)
            .carve(&mut grid, &biome, &NoiseField::new(1))
            .unwrap();
        assert_eq!(written, 0);
        assert_eq!(grid.count_occupied(CellLayer::Floor), 0);
    }

    #[test]
    fn test_carved_cells_stay_inside_radius() {
        let mut grid = Grid::new(40, 40);
        let biome = Biome::new(1, Coord::new(20, 20), 12.0);
        let noise = NoiseField::new(8);
        for mode in [CarveMode::HardRadius, CarveMode::DistanceAttenuated] {
            grid.clear_all();
            carver(0.5, mode).carve(&mut grid, &biome, &noise).unwrap();
            for (c, tile) in grid.layer(CellLayer::Floor).iter() {
                if tile.is_some() {
                    assert!(biome.contains(c));
                }
            }
        }
    }

    #[test]
    fn test_attenuated_center_always_carved() {
        // At distance 0 the attenuated gate is `value > 0`.
        let mut grid = Grid::new(9, 9);
        let biome = Biome::new(0, Coord::new(4, 4), 3.0);
        carver(0.9, CarveMode::DistanceAttenuated)
            .carve(&mut grid, &biome, &NoiseField::new(4))
            .unwrap();
        assert_eq!(grid.get(CellLayer::Floor, Coord::new(4, 4)).unwrap(), Some(Tile::Biome(0)));
    }

    #[test]
    fn test_attenuated_is_superset_of_hard_radius() {
        let noise = NoiseField::new(21);
        let biome = Biome::new(0, Coord::new(15, 15), 10.0);
        let hard = carver(0.5, CarveMode::HardRadius);
        let soft = carver(0.5, CarveMode::DistanceAttenuated);
        for y in 0..30 {
            for x in 0..30 {
                let c = Coord::new(x, y);
                if hard.is_carved(&noise, &biome, c) {
                    assert!(soft.is_carved(&noise, &biome, c));
                }
            }
        }
    }

    #[test]
    fn test_higher_index_wins_on_overlap() {
        let mut grid = Grid::new(12, 5);
        let mut registry = BiomeRegistry::new();
        registry.insert(Biome::new(1, Coord::new(7, 2), 4.0));
        registry.insert(Biome::new(0, Coord::new(4, 2), 4.0));
        carver(-1.0, CarveMode::HardRadius)
            .carve_all(&mut grid, &registry, &NoiseField::new(2))
            .unwrap();
        assert_eq!(grid.get(CellLayer::Floor, Coord::new(5, 2)).unwrap(), Some(Tile::Biome(1)));
        assert_eq!(grid.get(CellLayer::Floor, Coord::new(1, 2)).unwrap(), Some(Tile::Biome(0)));
    }
}
