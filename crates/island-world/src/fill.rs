//! Rectangular region fill.

use crate::grid::TileGrid;
use island_core::{Rect, TileFilter, TileType};

/// Set every in-range tile of `region` to `tile`. Returns the number of
/// tiles written; parts of `region` outside the grid are ignored.
pub fn fill_region(grid: &mut TileGrid, region: Rect, tile: TileType) -> usize {
    let clipped = region.intersect(&grid.bounds());
    let mut written = 0;
    for pos in clipped.positions() {
        if grid.set(pos, tile) {
            written += 1;
        }
    }
    written
}

/// Convert every in-range tile of `area` that matches `replace` into `fill`.
/// Returns the number of tiles whose type changed.
pub fn stamp_region(grid: &mut TileGrid, area: Rect, replace: TileFilter, fill: TileType) -> usize {
    let clipped = area.intersect(&grid.bounds());
    let mut converted = 0;
    for pos in clipped.positions() {
        match grid.get(pos) {
            Some(tile) if tile != fill && replace.matches(tile) => {
                grid.set(pos, fill);
                converted += 1;
            }
            _ => {}
        }
    }
    converted
}
