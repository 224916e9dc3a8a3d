//! Seeded coherent noise sampled in `[0, 1]`

use noise::{NoiseFn, Perlin};

/// Deterministic 2D Perlin field. Identical inputs always give identical outputs.
#[derive(Clone)]
pub struct NoiseField {
    perlin: Perlin,
    octaves: u32,
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        Self::with_octaves(seed, 1)
    }

    pub fn with_octaves(seed: u64, octaves: u32) -> Self {
        // Fold the upper half in so seeds differing only in high bits still differ.
        let folded = (seed ^ (seed >> 32)) as u32;
        Self {
            perlin: Perlin::new(folded),
            octaves: octaves.max(1),
        }
    }

    /// Sample at `(x, y)`. Total over finite inputs; the result is clamped to `[0, 1]`.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let raw = fbm(&self.perlin, x as f64, y as f64, self.octaves, 0.5, 2.0);
        ((raw * 0.5 + 0.5) as f32).clamp(0.0, 1.0)
    }
}

/// Fractional Brownian Motion, normalised by the summed amplitude.
fn fbm(
    noise: &impl NoiseFn<f64, 2>,
    x: f64,
    y: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += amplitude * noise.get([x * frequency, y * frequency]);
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    total / max_value
}
