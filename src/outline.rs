//! Outline layer: empty floor cells that touch terrain

use tracing::debug;

use crate::error::Result;
use crate::grid::{Coord, Grid};
use crate::tiles::{CellLayer, Tile};

/// Mark every empty floor cell with at least one occupied 8-neighbour.
pub fn trace_outline(grid: &mut Grid) -> Result<usize> {
    let floor = grid.layer(CellLayer::Floor);
    let edges: Vec<Coord> = floor
        .iter()
        .filter(|(_, t)| t.is_none())
        .map(|(c, _)| c)
        .filter(|&c| {
            floor
                .neighbors_8(c)
                .any(|n| floor.get(n).map_or(false, |t| t.is_some()))
        })
        .collect();

    for &c in &edges {
        grid.set(CellLayer::Outline, c, Some(Tile::Outline))?;
    }
    debug!(cells = edges.len(), "outline traced");
    Ok(edges.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_around_single_cell() {
        let mut grid = Grid::new(5, 5);
        grid.set(CellLayer::Floor, Coord::new(2, 2), Some(Tile::Stone)).unwrap();
        assert_eq!(trace_outline(&mut grid).unwrap(), 8);
        assert_eq!(grid.get(CellLayer::Outline, Coord::new(2, 2)).unwrap(), None);
        assert_eq!(grid.get(CellLayer::Outline, Coord::new(1, 1)).unwrap(), Some(Tile::Outline));
        assert_eq!(grid.get(CellLayer::Outline, Coord::new(0, 0)).unwrap(), None);
    }

    #[test]
    fn test_corner_cell_clips_at_edge() {
        let mut grid = Grid::new(4, 4);
        grid.set(CellLayer::Floor, Coord::new(0, 0), Some(Tile::Border)).unwrap();
        assert_eq!(trace_outline(&mut grid).unwrap(), 3);
    }

    #[test]
    fn test_empty_and_full_maps_have_no_outline() {
        let mut empty = Grid::new(4, 4);
        assert_eq!(trace_outline(&mut empty).unwrap(), 0);

        let mut full = Grid::new(4, 4);
        for c in full.coords().collect::<Vec<_>>() {
            full.set(CellLayer::Floor, c, Some(Tile::Stone)).unwrap();
        }
        assert_eq!(trace_outline(&mut full).unwrap(), 0);
    }
}
