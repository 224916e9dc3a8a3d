//! Layered 2D cell grid
//!
//! Unlike the world tilemap this grid does not wrap: every access outside
//! `[0, width) x [0, height)` is a [`CaveError::Bounds`].

use serde::{Deserialize, Serialize};

use crate::error::{CaveError, Result};
use crate::tiles::{CellLayer, Tile};

/// Integer cell coordinate. Signed so random-walk offsets can leave the map
/// and be rejected by [`Grid::contains`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shifted coordinate. Saturates at the `i32` range, which is off any map.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Euclidean distance between two cells.
    pub fn distance(&self, other: Coord) -> f32 {
        let dx = self.x as f32 - other.x as f32;
        let dy = self.y as f32 - other.y as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Euclidean distance to a continuous position.
    pub fn distance_to_point(&self, x: f32, y: f32) -> f32 {
        let dx = self.x as f32 - x;
        let dy = self.y as f32 - y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One dense row-major layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Layer<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }

    /// Reset every cell to the default value.
    pub fn clear(&mut self) {
        self.data.fill(T::default());
    }
}

impl<T> Layer<T> {
    pub fn contains(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.width && (c.y as usize) < self.height
    }

    fn index(&self, c: Coord) -> Result<usize> {
        if !self.contains(c) {
            return Err(CaveError::Bounds {
                x: c.x,
                y: c.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(c.y as usize * self.width + c.x as usize)
    }

    pub fn get(&self, c: Coord) -> Result<&T> {
        let idx = self.index(c)?;
        Ok(&self.data[idx])
    }

    pub fn set(&mut self, c: Coord, value: T) -> Result<()> {
        let idx = self.index(c)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Iterate over all cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            (Coord::new((idx % width) as i32, (idx / width) as i32), val)
        })
    }

    /// In-bounds 8-connected neighbours. No wrapping at any edge.
    pub fn neighbors_8(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        (-1i32..=1)
            .flat_map(|dy| (-1i32..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| c.offset(dx, dy))
            .filter(move |n| self.contains(*n))
    }
}

/// The shared mutable resource of a generation pass: one layer per [`CellLayer`].
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    layers: Vec<Layer<Option<Tile>>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            layers: (0..CellLayer::COUNT).map(|_| Layer::new(width, height)).collect(),
        }
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.width && (c.y as usize) < self.height
    }

    pub fn get(&self, layer: CellLayer, c: Coord) -> Result<Option<Tile>> {
        self.layers[layer.index()].get(c).copied()
    }

    pub fn set(&mut self, layer: CellLayer, c: Coord, tile: Option<Tile>) -> Result<()> {
        self.layers[layer.index()].set(c, tile)
    }

    pub fn is_occupied(&self, layer: CellLayer, c: Coord) -> Result<bool> {
        Ok(self.get(layer, c)?.is_some())
    }

    pub fn clear(&mut self, layer: CellLayer) {
        self.layers[layer.index()].clear();
    }

    pub fn clear_all(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
    }

    pub fn layer(&self, layer: CellLayer) -> &Layer<Option<Tile>> {
        &self.layers[layer.index()]
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| Coord::new(x, y)))
    }

    /// In-bounds cells of the square `center ± floor(half_size)`, row-major.
    ///
    /// The half size is capped at the larger map side, so any radius is accepted.
    /// A negative half size yields nothing.
    pub fn square_around(&self, center: Coord, half_size: f32) -> impl Iterator<Item = Coord> {
        let extent = self.width.max(self.height) as f32;
        let r = half_size.floor().min(extent) as i32;
        let min_x = center.x.saturating_sub(r).max(0);
        let max_x = center.x.saturating_add(r).min(self.width as i32 - 1);
        let min_y = center.y.saturating_sub(r).max(0);
        let max_y = center.y.saturating_add(r).min(self.height as i32 - 1);
        (min_y..=max_y).flat_map(move |y| (min_x..=max_x).map(move |x| Coord::new(x, y)))
    }

    /// Number of non-empty cells on a layer.
    pub fn count_occupied(&self, layer: CellLayer) -> usize {
        self.layer(layer).iter().filter(|(_, t)| t.is_some()).count()
    }

    /// Number of cells on a layer holding a tile matching `pred`.
    pub fn count_where(&self, layer: CellLayer, pred: impl Fn(&Tile) -> bool) -> usize {
        self.layer(layer)
            .iter()
            .filter(|(_, t)| t.as_ref().map_or(false, &pred))
            .count()
    }
}
