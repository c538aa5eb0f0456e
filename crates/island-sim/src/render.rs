//! Plain-text rendering of an island.

use island_core::TileType;
use island_world::{SessionSummary, TileGrid};
use std::fmt::Write;

fn glyph(tile: TileType) -> char {
    match tile {
        TileType::Debug => '?',
        TileType::Ocean => '~',
        TileType::Dirt => '.',
        TileType::Sand => ':',
        TileType::Rock => '^',
        TileType::Lake => 'o',
        TileType::River => '=',
        TileType::VegetationSparse => ',',
        TileType::VegetationModerate => '"',
        TileType::VegetationDense => '#',
    }
}

/// One line per grid row, one character per tile
pub fn render_ascii(grid: &TileGrid) -> String {
    let size = grid.size();
    let mut out = String::with_capacity(((size + 1) * size) as usize);
    for y in 0..size {
        for x in 0..size {
            let tile = grid.tile_type(x, y).unwrap_or_default();
            out.push(glyph(tile));
        }
        out.push('\n');
    }
    out
}

/// Tile counts, largest first
pub fn render_census(summary: &SessionSummary) -> String {
    let total: usize = summary.census.values().sum();
    let mut rows: Vec<_> = summary.census.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "seed {} | {}x{} | {} ticks",
        summary.seed, summary.size, summary.size, summary.ticks
    );
    for (tile, count) in rows {
        let share = if total > 0 {
            *count as f64 * 100.0 / total as f64
        } else {
            0.0
        };
        let _ = writeln!(out, "{} {:<20} {:>7} {:>6.2}%", glyph(*tile), tile, count, share);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use island_core::Position;
    use island_world::GrowthReport;
    use std::collections::{BTreeMap, HashSet};

    #[test]
    fn test_glyphs_are_distinct() {
        let glyphs: HashSet<char> = TileType::all().into_iter().map(glyph).collect();
        assert_eq!(glyphs.len(), TileType::COUNT);
    }

    #[test]
    fn test_render_ascii() {
        let mut grid = TileGrid::new(3);
        for pos in grid.bounds().positions() {
            grid.set(pos, TileType::Ocean);
        }
        grid.set(Position::new(1, 1), TileType::Rock);
        assert_eq!(render_ascii(&grid), "~~~\n~^~\n~~~\n");
    }

    #[test]
    fn test_render_census_orders_by_count() {
        let census = BTreeMap::from([(TileType::Lake, 1), (TileType::Ocean, 3)]);
        let summary = SessionSummary {
            seed: 4,
            size: 2,
            ticks: 0,
            growth: GrowthReport::default(),
            census,
        };
        let text = render_census(&summary);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "seed 4 | 2x2 | 0 ticks");
        assert!(lines[1].starts_with("~ Ocean"));
        assert!(lines[1].ends_with("75.00%"));
        assert!(lines[2].starts_with("o Lake"));
    }
}
