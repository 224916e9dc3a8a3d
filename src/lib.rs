//! Procedural cave generation library
//!
//! Builds a layered tile grid of biome regions, fallback stone, ore clusters and a
//! fading border from a seed and a [`CaveConfig`], and tracks which biome a moving
//! agent is in with [`BiomeLocator`].

pub mod ascii;
pub mod biome;
pub mod border;
pub mod carve;
pub mod config;
pub mod decoration;
pub mod error;
pub mod export;
pub mod fill;
pub mod generator;
pub mod grid;
pub mod locator;
pub mod logging;
pub mod noise_field;
pub mod ore;
pub mod outline;
pub mod placement;
pub mod seeds;
pub mod tiles;

pub use biome::{Biome, BiomeRegistry};
pub use config::{BorderStyle, CarveMode, CaveConfig, FallbackRule, NoiseParams, OreOverlap};
pub use error::{CaveError, Result};
pub use generator::{CaveGenerator, GeneratedCave, GenerationReport};
pub use grid::{Coord, Grid};
pub use locator::{BiomeLocator, BiomeTransition, OverlaySet};
pub use tiles::{CellLayer, Tile};
