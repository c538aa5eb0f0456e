//! Per-tick vegetation growth.

use crate::grid::TileGrid;
use crate::random::RandomSource;
use island_core::{GrowthConfig, Position, TileType};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// What a single growth iteration did to the tile it sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthOutcome {
    /// The centre moved up one vegetation tier
    Densified { from: TileType, to: TileType },
    /// The centre and its neighbours are vegetated but the centre is already dense
    Saturated,
    /// Bare neighbours of a moist or sparse tile turned sparse
    Spread(usize),
    Unchanged,
}

/// Totals for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthReport {
    pub iterations: i32,
    pub densified: usize,
    pub spread: usize,
}

impl GrowthReport {
    pub fn absorb(&mut self, other: &GrowthReport) {
        self.iterations += other.iterations;
        self.densified += other.densified;
        self.spread += other.spread;
    }
}

#[derive(Debug, Clone)]
pub struct VegetationGrowth {
    iterations_divisor: i32,
}

impl Default for VegetationGrowth {
    fn default() -> Self {
        Self::new(&GrowthConfig::default())
    }
}

impl VegetationGrowth {
    pub fn new(config: &GrowthConfig) -> Self {
        Self {
            iterations_divisor: config.iterations_divisor.max(1),
        }
    }

    /// Run one simulation tick: a random number of iterations in
    /// `[0, size / iterations_divisor)`, each applying `grow_at` to a random
    /// tile.
    pub fn tick<R: RandomSource>(&self, grid: &mut TileGrid, rng: &mut R) -> GrowthReport {
        let iterations = rng.range(0, grid.size() / self.iterations_divisor);
        let mut report = GrowthReport {
            iterations,
            ..Default::default()
        };

        for _ in 0..iterations {
            let Some(pos) = grid.random_position(rng, true) else {
                continue;
            };
            match grow_at(grid, pos) {
                GrowthOutcome::Densified { .. } => report.densified += 1,
                GrowthOutcome::Spread(count) => report.spread += count,
                GrowthOutcome::Saturated | GrowthOutcome::Unchanged => {}
            }
        }

        trace!(
            iterations = report.iterations,
            densified = report.densified,
            spread = report.spread,
            "Vegetation tick"
        );
        report
    }
}

/// Apply the growth rule to the tile at `pos` and its orthogonal neighbours.
///
/// Densifying takes precedence: when the centre and every in-range neighbour
/// are vegetated, only the centre changes. Otherwise sparse vegetation, lakes
/// and rivers turn every bare growable neighbour into sparse vegetation.
pub fn grow_at(grid: &mut TileGrid, pos: Position) -> GrowthOutcome {
    let Some(center) = grid.get(pos) else {
        return GrowthOutcome::Unchanged;
    };
    let neighbors: Vec<(Position, TileType)> = grid.neighbors(pos).collect();

    if center.is_vegetation() && neighbors.iter().all(|(_, tile)| tile.is_vegetation()) {
        return match center.densified() {
            Some(next) => {
                grid.set(pos, next);
                GrowthOutcome::Densified {
                    from: center,
                    to: next,
                }
            }
            None => GrowthOutcome::Saturated,
        };
    }

    if center.spreads_vegetation() {
        let mut spread = 0;
        for (neighbor, tile) in neighbors {
            if tile.is_growable() && grid.set(neighbor, TileType::VegetationSparse) {
                spread += 1;
            }
        }
        return GrowthOutcome::Spread(spread);
    }

    GrowthOutcome::Unchanged
}
