//! Tile palette and grid layers
//!
//! A cell holds `Option<Tile>`: `None` is empty ground, `Some` is an index into the
//! fixed palette the rendering side maps to drawable tiles.

use serde::{Deserialize, Serialize};

/// Tile identifiers written by the generation stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tile {
    /// Floor tile of a placed biome.
    Biome(u8),
    /// Floor tile of the fallback biome, written only by the gap filler.
    Stone,
    /// Ore variant embedded in terrain.
    Ore(u8),
    /// Map edge.
    Border,
    /// Background tile for a biome footprint.
    Background(u8),
    /// Square area painted around each biome center.
    RadiusFill,
    /// Empty cell bordering terrain.
    Outline,
    /// Decoration variant spawned above a biome center.
    Decoration(u8),
}

impl Tile {
    pub fn is_ore(&self) -> bool {
        matches!(self, Tile::Ore(_))
    }
}

/// Independent layers sharing the grid dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellLayer {
    Floor,
    Background,
    RadiusFill,
    Outline,
    Decoration,
}

impl CellLayer {
    pub const COUNT: usize = 5;

    pub fn all() -> &'static [CellLayer] {
        &[
            CellLayer::Floor,
            CellLayer::Background,
            CellLayer::RadiusFill,
            CellLayer::Outline,
            CellLayer::Decoration,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            CellLayer::Floor => 0,
            CellLayer::Background => 1,
            CellLayer::RadiusFill => 2,
            CellLayer::Outline => 3,
            CellLayer::Decoration => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CellLayer::Floor => "Floor",
            CellLayer::Background => "Background",
            CellLayer::RadiusFill => "RadiusFill",
            CellLayer::Outline => "Outline",
            CellLayer::Decoration => "Decoration",
        }
    }
}

impl std::fmt::Display for CellLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
