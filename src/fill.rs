//! Fallback terrain and per-biome area fills
//!
//! The gap filler gives unclaimed space outside every biome radius the fallback
//! (stone) tile. The background and radius fills paint their own layers and never
//! touch the floor.

use tracing::debug;

use crate::biome::BiomeRegistry;
use crate::config::{FallbackRule, NoiseParams};
use crate::error::Result;
use crate::grid::{Coord, Grid};
use crate::noise_field::NoiseField;
use crate::tiles::{CellLayer, Tile};

/// Cell counts from one gap-fill run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Stone tiles removed from inside biome radii before filling
    pub cleared: usize,
    /// Stone tiles written
    pub filled: usize,
}

/// Assigns the fallback biome to unclaimed cells.
#[derive(Clone, Debug)]
pub struct GapFiller {
    pub params: NoiseParams,
    pub rule: FallbackRule,
}

impl GapFiller {
    pub fn new(params: NoiseParams, rule: FallbackRule) -> Self {
        Self { params, rule }
    }

    /// Whether the fallback noise admits stone at `c`.
    pub fn admits(&self, noise: &NoiseField, c: Coord) -> bool {
        let s = self.params.scale;
        let value = noise.sample(c.x as f32 * s, c.y as f32 * s);
        self.rule.accepts(value, self.params.threshold)
    }

    /// Fill every empty floor cell that lies outside all biome radii and passes the
    /// noise rule.
    ///
    /// The radius guard is a plain distance test, not the carved shape, so holes the
    /// noise left inside a biome's own footprint stay open.
    pub fn fill(
        &self,
        grid: &mut Grid,
        registry: &BiomeRegistry,
        noise: &NoiseField,
    ) -> Result<FillStats> {
        let mut stats = FillStats {
            cleared: clear_stone_in_biomes(grid, registry)?,
            ..FillStats::default()
        };

        let coords: Vec<Coord> = grid.coords().collect();
        for c in coords {
            if grid.is_occupied(CellLayer::Floor, c)? || registry.in_any_radius(c) {
                continue;
            }
            if self.admits(noise, c) {
                grid.set(CellLayer::Floor, c, Some(Tile::Stone))?;
                stats.filled += 1;
            }
        }

        debug!(filled = stats.filled, cleared = stats.cleared, rule = ?self.rule, "gaps filled");
        Ok(stats)
    }
}

/// Remove stone from inside any biome radius.
fn clear_stone_in_biomes(grid: &mut Grid, registry: &BiomeRegistry) -> Result<usize> {
    let mut cleared = 0;
    for biome in registry.iter() {
        for c in grid.square_around(biome.center, biome.radius) {
            if biome.contains(c) && grid.get(CellLayer::Floor, c)? == Some(Tile::Stone) {
                grid.set(CellLayer::Floor, c, None)?;
                cleared += 1;
            }
        }
    }
    Ok(cleared)
}

/// Paint each biome's full radius disk with its background tile, ascending index order.
pub fn fill_background(grid: &mut Grid, registry: &BiomeRegistry) -> Result<usize> {
    let mut written = 0;
    for biome in registry.iter() {
        let tile = Tile::Background(biome.index as u8);
        for c in grid.square_around(biome.center, biome.radius) {
            if biome.contains(c) {
                grid.set(CellLayer::Background, c, Some(tile))?;
                written += 1;
            }
        }
    }
    debug!(written, "background filled");
    Ok(written)
}

/// Paint the square of half-size `half_size` around each biome center, clamped to the map.
pub fn fill_radius_squares(grid: &mut Grid, registry: &BiomeRegistry, half_size: f32) -> Result<usize> {
    let mut written = 0;
    for biome in registry.iter() {
        for c in grid.square_around(biome.center, half_size) {
            grid.set(CellLayer::RadiusFill, c, Some(Tile::RadiusFill))?;
            written += 1;
        }
    }
    debug!(written, "radius squares filled");
    Ok(written)
}
