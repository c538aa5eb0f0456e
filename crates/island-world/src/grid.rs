//! Square tile grid for the island.

use crate::random::RandomSource;
use island_core::{Error, Position, Rect, Result, TileType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attempts `random_position` makes before giving up on finding dry land
const DRY_SAMPLE_ATTEMPTS: usize = 100;

/// A bounded `size` x `size` grid of tile types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    size: i32,
    tiles: Vec<TileType>,
}

impl TileGrid {
    /// Create a grid with every tile set to `TileType::Debug`
    pub fn new(size: i32) -> Self {
        let size = size.max(0);
        let side = size as usize;
        Self {
            size,
            tiles: vec![TileType::Debug; side * side],
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Rectangle covering the whole grid
    pub fn bounds(&self) -> Rect {
        Rect::square(self.size)
    }

    pub fn in_range(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.size && pos.y < self.size
    }

    pub fn position_in_range(&self, x: i32, y: i32) -> bool {
        self.in_range(Position::new(x, y))
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_range(pos) {
            Some((pos.y * self.size + pos.x) as usize)
        } else {
            None
        }
    }

    /// Tile at `pos`, `None` when out of range
    pub fn get(&self, pos: Position) -> Option<TileType> {
        self.index(pos).map(|index| self.tiles[index])
    }

    /// Set the tile at `pos`. Returns false and leaves the grid untouched
    /// when out of range.
    pub fn set(&mut self, pos: Position, tile: TileType) -> bool {
        match self.index(pos) {
            Some(index) => {
                self.tiles[index] = tile;
                true
            }
            None => false,
        }
    }

    /// Bounds-checked query for external callers
    pub fn tile_type(&self, x: i32, y: i32) -> Result<TileType> {
        self.get(Position::new(x, y)).ok_or(Error::OutOfRange {
            x,
            y,
            size: self.size,
        })
    }

    /// Bounds-checked single-tile write for external callers
    pub fn set_tile_type(&mut self, x: i32, y: i32, tile: TileType) -> Result<()> {
        if self.set(Position::new(x, y), tile) {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                x,
                y,
                size: self.size,
            })
        }
    }

    /// In-range orthogonal neighbors of `pos`
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = (Position, TileType)> + '_ {
        pos.neighbors()
            .into_iter()
            .filter_map(move |neighbor| self.get(neighbor).map(|tile| (neighbor, tile)))
    }

    /// True when `pos` is in range and lies on the outermost ring
    pub fn is_edge(&self, pos: Position) -> bool {
        self.in_range(pos)
            && (pos.x == 0 || pos.y == 0 || pos.x == self.size - 1 || pos.y == self.size - 1)
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.size;
        let y = (index as i32) / self.size;
        Position::new(x, y)
    }

    /// Iterator over all tiles with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, TileType)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (self.index_to_pos(i), *tile))
    }

    /// Number of tiles of each type present on the grid
    pub fn census(&self) -> BTreeMap<TileType, usize> {
        let mut counts = BTreeMap::new();
        for tile in &self.tiles {
            *counts.entry(*tile).or_insert(0) += 1;
        }
        counts
    }

    pub fn count(&self, tile: TileType) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    /// Uniformly random in-range position.
    ///
    /// With `allow_water` unset, water tiles are rejected and resampled a
    /// bounded number of times; `None` if no dry tile turned up.
    pub fn random_position<R: RandomSource>(
        &self,
        rng: &mut R,
        allow_water: bool,
    ) -> Option<Position> {
        if self.size == 0 {
            return None;
        }
        let attempts = if allow_water { 1 } else { DRY_SAMPLE_ATTEMPTS };
        for _ in 0..attempts {
            let pos = Position::new(rng.range(0, self.size), rng.range(0, self.size));
            match self.get(pos) {
                Some(tile) if allow_water || !tile.is_water() => return Some(pos),
                _ => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;
    use proptest::prelude::*;

    #[test]
    fn test_grid_creation() {
        let grid = TileGrid::new(10);
        assert_eq!(grid.size(), 10);
        assert_eq!(grid.tiles.len(), 100);
        assert_eq!(grid.count(TileType::Debug), 100);
    }

    #[test]
    fn test_out_of_range_access() {
        let mut grid = TileGrid::new(10);

        assert!(grid.get(Position::new(-1, 0)).is_none());
        assert!(grid.get(Position::new(0, 10)).is_none());
        assert!(!grid.set(Position::new(10, 10), TileType::Ocean));
        assert_eq!(grid.count(TileType::Ocean), 0);

        let err = grid.tile_type(10, 3).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { x: 10, y: 3, size: 10 }));
        assert!(grid.set_tile_type(-1, 0, TileType::Dirt).is_err());
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = TileGrid::new(10);
        grid.set_tile_type(3, 4, TileType::Rock).unwrap();
        assert_eq!(grid.tile_type(3, 4).unwrap(), TileType::Rock);
        assert_eq!(grid.get(Position::new(4, 3)), Some(TileType::Debug));
    }

    #[test]
    fn test_neighbors_skip_out_of_range() {
        let grid = TileGrid::new(10);
        assert_eq!(grid.neighbors(Position::new(5, 5)).count(), 4);
        assert_eq!(grid.neighbors(Position::new(0, 0)).count(), 2);
        assert_eq!(grid.neighbors(Position::new(9, 5)).count(), 3);
    }

    #[test]
    fn test_edges() {
        let grid = TileGrid::new(10);
        assert!(grid.is_edge(Position::new(0, 5)));
        assert!(grid.is_edge(Position::new(9, 9)));
        assert!(!grid.is_edge(Position::new(5, 5)));
        assert!(!grid.is_edge(Position::new(-1, 5)));
    }

    #[test]
    fn test_census() {
        let mut grid = TileGrid::new(4);
        grid.set(Position::new(0, 0), TileType::Lake);
        grid.set(Position::new(1, 0), TileType::Lake);
        let census = grid.census();
        assert_eq!(census[&TileType::Lake], 2);
        assert_eq!(census[&TileType::Debug], 14);
        assert!(!census.contains_key(&TileType::Ocean));
    }

    #[test]
    fn test_random_position_rejects_water() {
        let mut grid = TileGrid::new(4);
        for pos in grid.bounds().positions() {
            grid.set(pos, TileType::Ocean);
        }
        grid.set(Position::new(2, 3), TileType::Dirt);

        // first draw lands on water, second on the only dry tile
        let mut rng = SequenceRandom::new(vec![0, 0, 2, 3]);
        assert_eq!(grid.random_position(&mut rng, false), Some(Position::new(2, 3)));

        let mut rng = SequenceRandom::new(vec![0, 0]);
        assert_eq!(grid.random_position(&mut rng, true), Some(Position::new(0, 0)));

        grid.set(Position::new(2, 3), TileType::Lake);
        let mut rng = SequenceRandom::new(vec![1, 2, 3]);
        assert_eq!(grid.random_position(&mut rng, false), None);
    }

    proptest! {
        #[test]
        fn prop_accessors_never_panic(x in -50i32..50, y in -50i32..50) {
            let mut grid = TileGrid::new(16);
            let in_range = grid.position_in_range(x, y);
            prop_assert_eq!(grid.tile_type(x, y).is_ok(), in_range);
            prop_assert_eq!(grid.set_tile_type(x, y, TileType::Sand).is_ok(), in_range);
            prop_assert_eq!(grid.count(TileType::Sand), usize::from(in_range));
        }
    }
}
