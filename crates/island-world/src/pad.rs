//! Transition padding between two tile types.

use crate::grid::TileGrid;
use island_core::{Position, TileType};
use tracing::trace;

/// Convert every `edge` tile that touches a `neighbor` tile into `fill`.
///
/// Runs as mark-then-commit over the whole grid: all `edge` tiles are
/// checked against the grid as it was before the call, and conversions are
/// applied only once the scan is complete. Only orthogonal, in-range
/// neighbours count. Returns the number of tiles marked.
pub fn pad_transitions(
    grid: &mut TileGrid,
    edge: TileType,
    neighbor: TileType,
    fill: TileType,
) -> usize {
    let pending: Vec<Position> = grid
        .iter()
        .filter(|(pos, tile)| {
            *tile == edge && grid.neighbors(*pos).any(|(_, adjacent)| adjacent == neighbor)
        })
        .map(|(pos, _)| pos)
        .collect();

    for pos in &pending {
        grid.set(*pos, fill);
    }

    trace!(?edge, ?neighbor, ?fill, marked = pending.len(), "Transitions padded");
    pending.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::fill_region;

    fn grid_of(size: i32, tile: TileType) -> TileGrid {
        let mut grid = TileGrid::new(size);
        let bounds = grid.bounds();
        fill_region(&mut grid, bounds, tile);
        grid
    }

    #[test]
    fn test_isolated_water_tile_marks_four_neighbours() {
        let mut grid = grid_of(7, TileType::Dirt);
        grid.set(Position::new(3, 3), TileType::Ocean);

        let marked = pad_transitions(&mut grid, TileType::Dirt, TileType::Ocean, TileType::Dirt);
        assert_eq!(marked, 4);
        assert_eq!(grid.get(Position::new(3, 3)), Some(TileType::Ocean));
        assert_eq!(grid.count(TileType::Dirt), 48);
    }

    #[test]
    fn test_isolated_water_tile_gets_a_beach() {
        let mut grid = grid_of(7, TileType::Dirt);
        grid.set(Position::new(3, 3), TileType::Ocean);

        pad_transitions(&mut grid, TileType::Dirt, TileType::Ocean, TileType::Sand);
        for pos in Position::new(3, 3).neighbors() {
            assert_eq!(grid.get(pos), Some(TileType::Sand));
        }
        // diagonals are not neighbours
        assert_eq!(grid.get(Position::new(2, 2)), Some(TileType::Dirt));
        assert_eq!(grid.get(Position::new(3, 3)), Some(TileType::Ocean));
    }

    #[test]
    fn test_conversions_are_not_seen_within_the_same_call() {
        // row: Sand, Dirt, Dirt, Dirt
        let mut grid = grid_of(4, TileType::Rock);
        grid.set(Position::new(0, 0), TileType::Sand);
        for x in 1..4 {
            grid.set(Position::new(x, 0), TileType::Dirt);
        }

        let marked = pad_transitions(&mut grid, TileType::Dirt, TileType::Sand, TileType::Sand);
        assert_eq!(marked, 1);
        assert_eq!(grid.get(Position::new(1, 0)), Some(TileType::Sand));
        assert_eq!(grid.get(Position::new(2, 0)), Some(TileType::Dirt));
        assert_eq!(grid.get(Position::new(3, 0)), Some(TileType::Dirt));

        // the same holds against the scan direction
        let mut grid = grid_of(4, TileType::Rock);
        grid.set(Position::new(3, 3), TileType::Sand);
        for y in 0..3 {
            grid.set(Position::new(3, y), TileType::Dirt);
        }
        assert_eq!(
            pad_transitions(&mut grid, TileType::Dirt, TileType::Sand, TileType::Sand),
            1
        );
        assert_eq!(grid.get(Position::new(3, 1)), Some(TileType::Dirt));
    }

    #[test]
    fn test_edge_tiles_ignore_out_of_range_neighbours() {
        let mut grid = grid_of(3, TileType::Dirt);
        let marked = pad_transitions(&mut grid, TileType::Dirt, TileType::Ocean, TileType::Sand);
        assert_eq!(marked, 0);
        assert_eq!(grid.count(TileType::Dirt), 9);
    }

    #[test]
    fn test_repeated_padding_widens_one_ring_per_call() {
        let mut grid = grid_of(9, TileType::Dirt);
        grid.set(Position::new(4, 4), TileType::Lake);

        pad_transitions(&mut grid, TileType::Dirt, TileType::Lake, TileType::Lake);
        assert_eq!(grid.count(TileType::Lake), 5);
        pad_transitions(&mut grid, TileType::Dirt, TileType::Lake, TileType::Lake);
        assert_eq!(grid.count(TileType::Lake), 13);
    }
}
