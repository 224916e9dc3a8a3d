//! Generation parameters and policy selection

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CaveError, Result};

/// Scale/threshold pair for one noise-gated feature.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Multiplier applied to cell coordinates before sampling
    pub scale: f32,
    /// Gate compared against the sampled value (usually 0.0-1.0)
    pub threshold: f32,
    /// fBm octaves; 1 is plain Perlin
    pub octaves: u32,
}

impl NoiseParams {
    pub const fn new(scale: f32, threshold: f32) -> Self {
        Self { scale, threshold, octaves: 1 }
    }
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self::new(0.1, 0.5)
    }
}

/// How a biome's footprint is cut out of its radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CarveMode {
    /// `noise > threshold` anywhere inside the radius
    #[default]
    HardRadius,
    /// `noise > threshold * (distance / radius)`: dense core, ragged edge
    DistanceAttenuated,
}

/// Comparison used by the fallback (stone) fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FallbackRule {
    /// Fill where `noise > threshold`
    #[default]
    AboveThreshold,
    /// Fill where `noise < threshold`
    BelowThreshold,
}

impl FallbackRule {
    pub fn accepts(&self, value: f32, threshold: f32) -> bool {
        match self {
            FallbackRule::AboveThreshold => value > threshold,
            FallbackRule::BelowThreshold => value < threshold,
        }
    }
}

/// Map edge strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BorderStyle {
    /// Solid at the edge, dissolving toward the interior
    #[default]
    InwardFade,
    /// Additionally grows a ring outside the map bounds
    OutwardExtend,
}

/// Whether an ore cluster may replace ore written earlier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OreOverlap {
    #[default]
    Overwrite,
    KeepExisting,
}

/// Full configuration of one generation pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    // =========================================================================
    // Map
    // =========================================================================
    pub width: usize,
    pub height: usize,
    pub seed: u64,

    // =========================================================================
    // Biomes
    // =========================================================================
    /// Total biome count including the fallback biome (last index). Must be >= 4.
    pub biome_count: usize,
    /// Radius of every biome footprint
    pub biome_radius: f32,
    /// Minimum distance between accepted biome centers
    pub min_separation: f32,
    /// Random centers closer than this to a map corner (on both axes) are rejected
    pub corner_margin: f32,
    /// Attempt budget for each randomly placed biome index
    pub placement_attempts: u32,
    pub carve_mode: CarveMode,
    pub shape_noise: NoiseParams,

    // =========================================================================
    // Fallback fill
    // =========================================================================
    pub fallback_rule: FallbackRule,
    pub fallback_noise: NoiseParams,

    // =========================================================================
    // Ore
    // =========================================================================
    /// Per-cell spawn chance in percent (0-100)
    pub ore_chance: f32,
    pub ore_cluster_min: usize,
    pub ore_cluster_max: usize,
    /// Max per-axis offset of a cluster write from its seed cell
    pub ore_spread: i32,
    /// Ore tile variants drawn uniformly per cluster
    pub ore_palette: Vec<u8>,
    pub ore_overlap: OreOverlap,

    // =========================================================================
    // Border
    // =========================================================================
    pub border_width: usize,
    pub border_style: BorderStyle,
    pub border_noise: NoiseParams,

    // =========================================================================
    // Overlay layers
    // =========================================================================
    /// Half-size of the square painted on the RadiusFill layer around each center
    pub radius_size: f32,
    pub decorations_per_biome: usize,
    pub decoration_variants: u8,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            seed: 0,
            biome_count: 5,
            biome_radius: 30.0,
            min_separation: 30.0,
            corner_margin: 30.0,
            placement_attempts: 1000,
            carve_mode: CarveMode::default(),
            shape_noise: NoiseParams::default(),
            fallback_rule: FallbackRule::default(),
            fallback_noise: NoiseParams::default(),
            ore_chance: 2.0,
            ore_cluster_min: 3,
            ore_cluster_max: 6,
            ore_spread: 2,
            ore_palette: vec![0, 1, 2],
            ore_overlap: OreOverlap::default(),
            border_width: 5,
            border_style: BorderStyle::default(),
            border_noise: NoiseParams::default(),
            radius_size: 15.0,
            decorations_per_biome: 5,
            decoration_variants: 4,
        }
    }
}

impl CaveConfig {
    /// Small map for quick previews and tests
    pub fn small() -> Self {
        Self {
            width: 48,
            height: 32,
            biome_radius: 12.0,
            min_separation: 12.0,
            corner_margin: 12.0,
            radius_size: 6.0,
            border_width: 3,
            ..Self::default()
        }
    }

    /// Larger map with randomly placed interior biomes
    pub fn large() -> Self {
        Self {
            width: 200,
            height: 200,
            biome_count: 9,
            biome_radius: 35.0,
            min_separation: 35.0,
            corner_margin: 35.0,
            radius_size: 18.0,
            border_width: 8,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Index reserved for the fallback (stone) biome.
    pub fn fallback_index(&self) -> usize {
        self.biome_count - 1
    }

    /// Reject configurations that cannot drive a pass.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(CaveError::Configuration(msg));

        if self.width == 0 || self.height == 0 {
            return fail(format!("map size must be positive, got {}x{}", self.width, self.height));
        }
        if self.width > i32::MAX as usize || self.height > i32::MAX as usize {
            return fail(format!("map size {}x{} exceeds coordinate range", self.width, self.height));
        }
        if self.border_width > self.width.max(self.height) {
            return fail(format!(
                "border_width {} exceeds the map extent {}",
                self.border_width,
                self.width.max(self.height)
            ));
        }
        if self.biome_count < 4 {
            return fail(format!("biome_count must be at least 4, got {}", self.biome_count));
        }
        if self.biome_count > u8::MAX as usize + 1 {
            return fail(format!("biome_count {} exceeds the tile palette", self.biome_count));
        }
        for (name, value) in [
            ("biome_radius", self.biome_radius),
            ("min_separation", self.min_separation),
            ("corner_margin", self.corner_margin),
            ("radius_size", self.radius_size),
        ] {
            if !value.is_finite() || value < 0.0 {
                return fail(format!("{} must be a non-negative number, got {}", name, value));
            }
        }
        for (name, params) in [
            ("shape_noise", &self.shape_noise),
            ("fallback_noise", &self.fallback_noise),
            ("border_noise", &self.border_noise),
        ] {
            if !params.scale.is_finite() || params.scale <= 0.0 {
                return fail(format!("{}.scale must be positive, got {}", name, params.scale));
            }
            if !params.threshold.is_finite() {
                return fail(format!("{}.threshold must be finite", name));
            }
        }
        if !(0.0..=100.0).contains(&self.ore_chance) {
            return fail(format!("ore_chance must be within 0-100, got {}", self.ore_chance));
        }
        if self.ore_cluster_min > self.ore_cluster_max {
            return fail(format!(
                "ore cluster bounds are reversed: {}..={}",
                self.ore_cluster_min, self.ore_cluster_max
            ));
        }
        if self.ore_spread < 0 {
            return fail(format!("ore_spread must be non-negative, got {}", self.ore_spread));
        }
        if self.ore_chance > 0.0 && self.ore_palette.is_empty() {
            return fail("ore_palette is empty but ore_chance is positive".to_string());
        }
        if self.decorations_per_biome > 0 && self.decoration_variants == 0 {
            return fail("decoration_variants must be positive when decorations are enabled".to_string());
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| CaveError::Configuration(format!("cannot parse config: {}", e)))
    }

    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CaveError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CaveError::Configuration(format!("cannot serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(CaveConfig::default().validate().is_ok());
        assert!(CaveConfig::small().validate().is_ok());
        assert!(CaveConfig::large().validate().is_ok());
    }

    #[test]
    fn test_rejects_too_few_biomes() {
        let config = CaveConfig { biome_count: 3, ..CaveConfig::default() };
        assert!(matches!(config.validate(), Err(CaveError::Configuration(_))));
    }

    #[test]
    fn test_rejects_reversed_cluster_bounds() {
        let config = CaveConfig { ore_cluster_min: 5, ore_cluster_max: 2, ..CaveConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_ore_settings() {
        let base = CaveConfig::default();
        for chance in [-0.5, 100.5, f32::NAN] {
            let config = CaveConfig { ore_chance: chance, ..base.clone() };
            assert!(config.validate().is_err(), "ore_chance {} accepted", chance);
        }
        let config = CaveConfig { ore_palette: Vec::new(), ore_chance: 5.0, ..base.clone() };
        assert!(config.validate().is_err());
        let config = CaveConfig { ore_palette: Vec::new(), ore_chance: 0.0, ..base.clone() };
        assert!(config.validate().is_ok());
        let config = CaveConfig { ore_spread: -1, ..base };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_decoration_variants() {
        let config = CaveConfig { decoration_variants: 0, ..CaveConfig::default() };
        assert!(config.validate().is_err());
        let config = CaveConfig { decoration_variants: 0, decorations_per_biome: 0, ..CaveConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_border_wider_than_map() {
        let config = CaveConfig { border_width: 49, ..CaveConfig::small() };
        assert!(config.validate().is_err());
        let config = CaveConfig { border_width: 48, ..CaveConfig::small() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_noise_scale() {
        let mut config = CaveConfig::default();
        config.border_noise.scale = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CaveConfig::from_json_str(r#"{ "width": 64, "seed": 9 }"#).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.seed, 9);
        assert_eq!(config.height, 100);
        assert_eq!(config.fallback_rule, FallbackRule::AboveThreshold);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CaveConfig::large().with_seed(77);
        let parsed = CaveConfig::from_json_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_fallback_rule_direction() {
        assert!(FallbackRule::AboveThreshold.accepts(0.6, 0.5));
        assert!(!FallbackRule::AboveThreshold.accepts(0.5, 0.5));
        assert!(FallbackRule::BelowThreshold.accepts(0.4, 0.5));
        assert!(!FallbackRule::BelowThreshold.accepts(0.6, 0.5));
    }
}
