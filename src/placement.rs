//! Biome center placement
//!
//! Fixed slots first (four corners, then the map center), then rejection sampling
//! for the remaining indices with a per-index attempt budget.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::biome::{Biome, BiomeRegistry};
use crate::config::CaveConfig;
use crate::error::{CaveError, Result};
use crate::grid::Coord;

/// Index of the biome placed at the map center.
pub const CENTER_SLOT: usize = 4;

/// Requested vs placed biomes for one pass. A degraded pass is still a success.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementReport {
    pub requested: usize,
    pub placed: usize,
    /// Indices that were requested but not placed, ascending
    pub skipped: Vec<usize>,
    /// Total random samples drawn
    pub attempts: u32,
}

impl PlacementReport {
    pub fn is_degraded(&self) -> bool {
        self.placed < self.requested
    }
}

/// Chooses biome centers subject to the minimum separation constraint.
#[derive(Clone, Debug)]
pub struct BiomePlacer {
    pub width: usize,
    pub height: usize,
    pub radius: f32,
    pub min_separation: f32,
    pub corner_margin: f32,
    pub attempt_budget: u32,
}

impl BiomePlacer {
    pub fn from_config(config: &CaveConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            radius: config.biome_radius,
            min_separation: config.min_separation,
            corner_margin: config.corner_margin,
            attempt_budget: config.placement_attempts,
        }
    }

    /// Corner candidates for indices 0-3: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Coord; 4] {
        let (w, h) = (self.width as i32, self.height as i32);
        [
            Coord::new(0, h - 1),
            Coord::new(w - 1, h - 1),
            Coord::new(0, 0),
            Coord::new(w - 1, 0),
        ]
    }

    pub fn center(&self) -> Coord {
        Coord::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// True when `c` lies within the corner margin on both axes of some map corner.
    pub fn is_near_corner(&self, c: Coord) -> bool {
        let m = self.corner_margin;
        let (x, y) = (c.x as f32, c.y as f32);
        let max_x = self.width.saturating_sub(1) as f32;
        let max_y = self.height.saturating_sub(1) as f32;
        let near_x = x < m || max_x - x < m;
        let near_y = y < m || max_y - y < m;
        near_x && near_y
    }

    /// Place up to `biome_count` biomes.
    ///
    /// The last index is the fallback biome and is never drawn by rejection sampling.
    /// Fixed slots are placed whatever the count, so a registry holds at least the
    /// corners that survive the separation check.
    pub fn place(
        &self,
        biome_count: usize,
        rng: &mut ChaCha8Rng,
    ) -> Result<(BiomeRegistry, PlacementReport)> {
        if biome_count < 4 {
            return Err(CaveError::Configuration(format!(
                "biome_count must be at least 4, got {}",
                biome_count
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(CaveError::Configuration(format!(
                "map size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > i32::MAX as usize || self.height > i32::MAX as usize {
            return Err(CaveError::Configuration(format!(
                "map size {}x{} exceeds coordinate range",
                self.width, self.height
            )));
        }

        let mut registry = BiomeRegistry::new();
        let mut report = PlacementReport::default();

        for (index, corner) in self.corners().into_iter().enumerate() {
            report.requested += 1;
            if registry.is_clear_of(corner, self.min_separation) {
                registry.insert(Biome::new(index, corner, self.radius));
                trace!(index, %corner, "corner biome placed");
            } else {
                debug!(index, %corner, "corner overlaps an earlier biome, skipped");
                report.skipped.push(index);
            }
        }

        if biome_count > CENTER_SLOT {
            report.requested += 1;
            let center = self.center();
            registry.insert(Biome::new(CENTER_SLOT, center, self.radius));
            trace!(index = CENTER_SLOT, %center, "center biome placed");
        }

        let fallback = biome_count - 1;
        for index in (CENTER_SLOT + 1)..fallback {
            report.requested += 1;
            match self.sample_center(&registry, rng, &mut report.attempts) {
                Some(c) => {
                    registry.insert(Biome::new(index, c, self.radius));
                    trace!(index, center = %c, "random biome placed");
                }
                None => {
                    warn!(index, budget = self.attempt_budget, "no valid biome center found, skipping");
                    report.skipped.push(index);
                }
            }
        }

        report.placed = registry.len();
        Ok((registry, report))
    }

    /// Rejection-sample one center. `None` once the budget is spent.
    fn sample_center(
        &self,
        registry: &BiomeRegistry,
        rng: &mut ChaCha8Rng,
        attempts: &mut u32,
    ) -> Option<Coord> {
        for _ in 0..self.attempt_budget {
            *attempts += 1;
            let c = Coord::new(
                rng.gen_range(0..self.width as i32),
                rng.gen_range(0..self.height as i32),
            );
            if self.is_near_corner(c) {
                continue;
            }
            if registry.is_clear_of(c, self.min_separation) {
                return Some(c);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn placer(width: usize, height: usize, radius: f32) -> BiomePlacer {
        BiomePlacer {
            width,
            height,
            radius,
            min_separation: radius,
            corner_margin: radius,
            attempt_budget: 500,
        }
    }

    #[test]
    fn test_corners_only() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let (registry, report) = placer(10, 10, 3.0).place(4, &mut rng).unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(report.requested, 4);
        assert!(!report.is_degraded());
        assert_eq!(registry.get(0).unwrap().center, Coord::new(0, 9));
        assert_eq!(registry.get(3).unwrap().center, Coord::new(9, 0));
    }

    #[test]
    fn test_overlapping_corners_are_skipped_not_retried() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // 6 wide, 20 tall: left and right corners are 5 apart, below the separation of 8.
        let (registry, report) = placer(6, 20, 8.0).place(4, &mut rng).unwrap();
        assert_eq!(registry.indices().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(report.skipped, vec![1, 3]);
        assert!(report.is_degraded());
        assert_eq!(report.attempts, 0);
    }

    #[test]
    fn test_center_slot_unconditional() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let (registry, _) = placer(10, 10, 6.0).place(5, &mut rng).unwrap();
        assert_eq!(registry.get(CENTER_SLOT).unwrap().center, Coord::new(5, 5));
    }

    #[test]
    fn test_random_slots_respect_separation_and_skip_fallback() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let p = placer(200, 200, 30.0);
        let (registry, report) = p.place(9, &mut rng).unwrap();
        assert!(registry.get(8).is_none(), "fallback index must not be placed");
        assert_eq!(report.requested, 8);

        let biomes: Vec<_> = registry.iter().collect();
        for a in &biomes {
            for b in &biomes {
                if a.index < b.index && a.index != CENTER_SLOT && b.index != CENTER_SLOT {
                    assert!(a.center.distance(b.center) >= 30.0);
                }
            }
            if a.index > CENTER_SLOT {
                assert!(!p.is_near_corner(a.center));
            }
        }
    }

    #[test]
    fn test_exhausted_budget_is_partial_success() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut p = placer(20, 20, 30.0);
        p.attempt_budget = 50;
        let (registry, report) = p.place(8, &mut rng).unwrap();
        // Only the first corner and the center fit on a 20x20 map with separation 30.
        assert_eq!(registry.len(), 2);
        assert_eq!(report.skipped, vec![1, 2, 3, 5, 6]);
        assert_eq!(report.attempts, 100);
        assert!(report.is_degraded());
    }

    #[test]
    fn test_too_few_biomes_is_configuration_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = placer(10, 10, 3.0).place(3, &mut rng).unwrap_err();
        assert!(matches!(err, CaveError::Configuration(_)));
    }

    #[test]
    fn test_empty_map_is_configuration_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for (w, h) in [(0, 10), (10, 0), (0, 0)] {
            let err = placer(w, h, 3.0).place(8, &mut rng).unwrap_err();
            assert!(matches!(err, CaveError::Configuration(_)));
        }
    }

    #[test]
    fn test_same_seed_same_registry() {
        let p = placer(200, 200, 30.0);
        let a = p.place(10, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        let b = p.place(10, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }
}
