//! Seed management for cave generation
//!
//! Every stage of a pass gets its own seed, derived from a master seed, so tuning
//! one stage never reshuffles the randomness of another.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::NoiseParams;
use crate::noise_field::NoiseField;

/// Seeds for all generation stages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaveSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Random biome center sampling
    pub placement: u64,
    /// Biome region shape noise
    pub shape: u64,
    /// Fallback (stone) fill noise
    pub fallback: u64,
    /// Ore trials and cluster walks
    pub ore: u64,
    /// Border fade noise
    pub border: u64,
    /// Decoration offsets and variants
    pub decoration: u64,
}

impl CaveSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            placement: derive_seed(master, "placement"),
            shape: derive_seed(master, "shape"),
            fallback: derive_seed(master, "fallback"),
            ore: derive_seed(master, "ore"),
            border: derive_seed(master, "border"),
            decoration: derive_seed(master, "decoration"),
        }
    }

    pub fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    pub fn noise(seed: u64, params: &NoiseParams) -> NoiseField {
        NoiseField::with_octaves(seed, params.octaves)
    }
}

/// Derive a sub-seed from a master seed and a stage name.
///
/// `DefaultHasher::new()` uses fixed keys, so the result is stable within a build.
fn derive_seed(master: u64, stage: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    stage.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for CaveSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CaveSeeds {{ master: {}, placement: {}, shape: {}, fallback: {}, \
             ore: {}, border: {}, decoration: {} }}",
            self.master,
            self.placement,
            self.shape,
            self.fallback,
            self.ore,
            self.border,
            self.decoration,
        )
    }
}
