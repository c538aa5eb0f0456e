//! Cluster seeding: irregular blobs scattered inside a rectangle.

use crate::fill::stamp_region;
use crate::grid::TileGrid;
use crate::random::RandomSource;
use island_core::{Position, Rect, TileFilter, TileType};
use tracing::trace;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub rounds: i32,
    pub converted: usize,
}

/// Half-size of a seeded blob on a grid of `size` tiles, rounded to the
/// nearest tile
pub fn blob_half_size(size: i32, blob_size_ratio: f32) -> i32 {
    ((size as f32) * blob_size_ratio).round().max(0.0) as i32
}

/// Scatter clusters of `fill` inside `region`.
///
/// Runs a random number of rounds in `[0, iterations)`. Each round picks a
/// seed tile inside `region` and two jittered centres around it, one within
/// the blob half-size and one within twice that. Every centre stamps a
/// square of half-size `size * blob_size_ratio`, clipped to `region`.
pub fn seed_clusters<R: RandomSource>(
    grid: &mut TileGrid,
    rng: &mut R,
    region: Rect,
    iterations: i32,
    blob_size_ratio: f32,
    replace: impl Into<TileFilter>,
    fill: TileType,
) -> SeedReport {
    let replace = replace.into();
    let rounds = rng.range(0, iterations);
    let mut report = SeedReport {
        rounds,
        converted: 0,
    };
    if region.is_empty() {
        return report;
    }

    let half = blob_half_size(grid.size(), blob_size_ratio);
    for _ in 0..rounds {
        let seed = Position::new(
            rng.range(region.left(), region.right() + 1),
            rng.range(region.top(), region.bottom() + 1),
        );
        let near = seed.add(rng.range(-half, half + 1), rng.range(-half, half + 1));
        let far = seed.add(
            rng.range(-2 * half, 2 * half + 1),
            rng.range(-2 * half, 2 * half + 1),
        );

        for center in [seed, near, far] {
            let area = Rect::around(center, half).intersect(&region);
            report.converted += stamp_region(grid, area, replace, fill);
        }
    }

    trace!(
        rounds = report.rounds,
        converted = report.converted,
        ?fill,
        "Clusters seeded"
    );
    report
}
