//! Ore cluster scattering
//!
//! Every occupied floor cell gets one spawn trial. A successful trial grows a small
//! cluster by independent bounded offsets from the seed cell; ore is only written
//! onto cells that already hold terrain.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::{CaveConfig, OreOverlap};
use crate::error::{CaveError, Result};
use crate::grid::{Coord, Grid};
use crate::tiles::{CellLayer, Tile};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OreStats {
    pub trials: usize,
    pub clusters: usize,
    pub written: usize,
    /// Walk steps that left the map or hit empty ground
    pub skipped: usize,
}

#[derive(Clone, Debug)]
pub struct OreScatterer {
    /// Spawn chance in percent
    pub chance: f32,
    pub cluster_min: usize,
    pub cluster_max: usize,
    pub spread: i32,
    pub palette: Vec<u8>,
    pub overlap: OreOverlap,
}

impl OreScatterer {
    pub fn from_config(config: &CaveConfig) -> Self {
        Self {
            chance: config.ore_chance,
            cluster_min: config.ore_cluster_min,
            cluster_max: config.ore_cluster_max,
            spread: config.ore_spread,
            palette: config.ore_palette.clone(),
            overlap: config.ore_overlap,
        }
    }

    fn check(&self) -> Result<()> {
        let fail = |msg: String| Err(CaveError::Configuration(msg));
        if !self.chance.is_finite() {
            return fail(format!("ore chance must be finite, got {}", self.chance));
        }
        if self.cluster_min > self.cluster_max {
            return fail(format!(
                "ore cluster bounds are reversed: {}..={}",
                self.cluster_min, self.cluster_max
            ));
        }
        if self.spread < 0 {
            return fail(format!("ore spread must be non-negative, got {}", self.spread));
        }
        Ok(())
    }

    /// Run one trial per floor cell occupied at call time, in row-major order.
    pub fn scatter(&self, grid: &mut Grid, rng: &mut ChaCha8Rng) -> Result<OreStats> {
        self.check()?;
        let mut stats = OreStats::default();
        if self.palette.is_empty() || self.chance <= 0.0 {
            return Ok(stats);
        }
        let p = (self.chance as f64 / 100.0).clamp(0.0, 1.0);

        let seeds: Vec<Coord> = grid
            .layer(CellLayer::Floor)
            .iter()
            .filter(|(_, t)| t.is_some())
            .map(|(c, _)| c)
            .collect();

        for seed in seeds {
            stats.trials += 1;
            if !rng.gen_bool(p) {
                continue;
            }
            stats.clusters += 1;
            let variant = self.palette[rng.gen_range(0..self.palette.len())];
            let size = rng.gen_range(self.cluster_min..=self.cluster_max);
            for _ in 0..size {
                let dx = rng.gen_range(-self.spread..=self.spread);
                let dy = rng.gen_range(-self.spread..=self.spread);
                if self.place(grid, seed.offset(dx, dy), variant)? {
                    stats.written += 1;
                } else {
                    stats.skipped += 1;
                }
            }
        }

        debug!(
            trials = stats.trials,
            clusters = stats.clusters,
            written = stats.written,
            skipped = stats.skipped,
            "ore scattered"
        );
        Ok(stats)
    }

    /// Write one ore tile if `target` is on the map and holds terrain.
    fn place(&self, grid: &mut Grid, target: Coord, variant: u8) -> Result<bool> {
        if !grid.contains(target) {
            return Ok(false);
        }
        match grid.get(CellLayer::Floor, target)? {
            None => Ok(false),
            Some(t) if t.is_ore() && self.overlap == OreOverlap::KeepExisting => Ok(false),
            Some(_) => {
                grid.set(CellLayer::Floor, target, Some(Tile::Ore(variant)))?;
                Ok(true)
            }
        }
    }
}
