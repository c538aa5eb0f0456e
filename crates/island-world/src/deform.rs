//! Perimeter deformation: random blobs along the four edges of a rectangle.

use crate::fill::stamp_region;
use crate::grid::TileGrid;
use crate::random::RandomSource;
use island_core::{Position, Rect, TileFilter, TileType};
use tracing::trace;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeformReport {
    pub rounds: i32,
    pub converted: usize,
}

/// Ruin the straight edges of `region`.
///
/// Runs a random number of rounds in `[0, iterations)`. Each round stamps one
/// blob on every edge of `region` (top, left, bottom, right, in that order),
/// each with a random half-size in `[0, blob_max_size)`. Only tiles matching
/// `replace` are turned into `fill`; later blobs may overwrite earlier ones.
pub fn deform_perimeter<R: RandomSource>(
    grid: &mut TileGrid,
    rng: &mut R,
    region: Rect,
    iterations: i32,
    blob_max_size: i32,
    replace: impl Into<TileFilter>,
    fill: TileType,
) -> DeformReport {
    let replace = replace.into();
    let rounds = rng.range(0, iterations);
    let mut report = DeformReport {
        rounds,
        converted: 0,
    };
    if region.is_empty() {
        return report;
    }

    for _ in 0..rounds {
        for anchor in perimeter_anchors(rng, region) {
            let half = rng.range(0, blob_max_size);
            report.converted += stamp_region(grid, Rect::around(anchor, half), replace, fill);
        }
    }

    trace!(
        rounds = report.rounds,
        converted = report.converted,
        ?fill,
        "Perimeter deformed"
    );
    report
}

fn perimeter_anchors<R: RandomSource>(rng: &mut R, region: Rect) -> [Position; 4] {
    let top = Position::new(rng.range(region.left(), region.right() + 1), region.top());
    let left = Position::new(region.left(), rng.range(region.top(), region.bottom() + 1));
    let bottom = Position::new(rng.range(region.left(), region.right() + 1), region.bottom());
    let right = Position::new(region.right(), rng.range(region.top(), region.bottom() + 1));
    [top, left, bottom, right]
}
