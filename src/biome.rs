//! Biome records and the per-pass registry

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::grid::Coord;
use crate::tiles::Tile;

/// A placed biome region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Biome {
    pub index: usize,
    pub center: Coord,
    pub radius: f32,
}

impl Biome {
    pub fn new(index: usize, center: Coord, radius: f32) -> Self {
        Self { index, center, radius }
    }

    /// Radius test (inclusive), independent of the noise-carved shape.
    pub fn contains(&self, c: Coord) -> bool {
        self.center.distance(c) <= self.radius
    }

    pub fn floor_tile(&self) -> Tile {
        Tile::Biome(self.index as u8)
    }
}

/// Biomes placed in one pass, keyed and iterated by ascending index.
///
/// Rebuilt from scratch every pass and read-only once the pass completes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BiomeRegistry {
    biomes: BTreeMap<usize, Biome>,
}

impl BiomeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, biome: Biome) {
        self.biomes.insert(biome.index, biome);
    }

    pub fn get(&self, index: usize) -> Option<&Biome> {
        self.biomes.get(&index)
    }

    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    pub fn clear(&mut self) {
        self.biomes.clear();
    }

    /// Biomes in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = &Biome> {
        self.biomes.values()
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.biomes.keys().copied()
    }

    /// True when `c` lies within the radius of any registered biome.
    pub fn in_any_radius(&self, c: Coord) -> bool {
        self.iter().any(|b| b.contains(c))
    }

    /// True when `c` is at least `min_distance` away from every registered center.
    pub fn is_clear_of(&self, c: Coord, min_distance: f32) -> bool {
        self.iter().all(|b| b.center.distance(c) >= min_distance)
    }
}
