//! Fading map border
//!
//! Cells within `width` of the map edge (Chebyshev distance) become border where
//! `noise > threshold * fade`, with `fade` rising linearly from 0 at the edge to 1
//! at the inner side of the band. The edge row itself is therefore solid.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{BorderStyle, CaveConfig, NoiseParams};
use crate::error::{CaveError, Result};
use crate::grid::{Coord, Grid};
use crate::noise_field::NoiseField;
use crate::tiles::{CellLayer, Tile};

/// Border cells outside `[0, width) x [0, height)`, produced by
/// [`BorderStyle::OutwardExtend`]. The grid has no storage for them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OuterBorder {
    pub cells: Vec<Coord>,
}

impl OuterBorder {
    pub fn contains(&self, c: Coord) -> bool {
        self.cells.binary_search_by(|p| (p.y, p.x).cmp(&(c.y, c.x))).is_ok()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct BorderFader {
    pub width: usize,
    pub params: NoiseParams,
    pub style: BorderStyle,
}

impl BorderFader {
    pub fn from_config(config: &CaveConfig) -> Self {
        Self {
            width: config.border_width,
            params: config.border_noise,
            style: config.border_style,
        }
    }

    /// Linear position of an edge distance across the band: 0 at the edge, 1 at the inner side.
    fn fade_factor(&self, distance_to_edge: usize) -> f32 {
        if self.width == 0 {
            return 1.0;
        }
        (distance_to_edge as f32 / self.width as f32).clamp(0.0, 1.0)
    }

    fn gate(&self, noise: &NoiseField, c: Coord, distance_to_edge: usize) -> bool {
        let s = self.params.scale;
        let value = noise.sample(c.x as f32 * s, c.y as f32 * s);
        value > self.params.threshold * self.fade_factor(distance_to_edge)
    }

    /// Apply the border. Returns the number of in-bounds cells written and, for the
    /// outward style, the ring of cells beyond the map.
    ///
    /// A band wider than the larger map side is a [`CaveError::Configuration`].
    pub fn apply(&self, grid: &mut Grid, noise: &NoiseField) -> Result<(usize, OuterBorder)> {
        let extent = grid.width.max(grid.height);
        if self.width > extent {
            return Err(CaveError::Configuration(format!(
                "border_width {} exceeds the map extent {}",
                self.width, extent
            )));
        }
        let mut written = 0;
        let mut outer = OuterBorder::default();
        if self.width == 0 {
            return Ok((written, outer));
        }

        let (w, h) = (grid.width as i32, grid.height as i32);
        let ext = match self.style {
            BorderStyle::InwardFade => 0,
            BorderStyle::OutwardExtend => self.width as i32,
        };

        for y in -ext..h + ext {
            for x in -ext..w + ext {
                let c = Coord::new(x, y);
                if !grid.contains(c) {
                    outer.cells.push(c);
                    continue;
                }
                let distance = x.min(y).min(w - 1 - x).min(h - 1 - y) as usize;
                if distance < self.width && self.gate(noise, c, distance) {
                    grid.set(CellLayer::Floor, c, Some(Tile::Border))?;
                    written += 1;
                }
            }
        }

        debug!(written, outer = outer.len(), style = ?self.style, "border applied");
        Ok((written, outer))
    }
}
