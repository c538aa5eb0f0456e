//! The island generation pipeline.
//!
//! Stages run in a fixed order against one grid and one random stream:
//!
//! 1. ocean everywhere, dirt on the base island rectangle
//! 2. coarse and fine coastline deformation
//! 3. gap closing and beaches
//! 4. lakes
//! 5. rock outcrops
//! 6. coastline deformation again, now over rock as well
//! 7. rivers and river mouths
//! 8. vegetation tiers
//!
//! Every round count and blob size is derived from the grid's linear size so
//! that islands look alike at any resolution.

use crate::deform::deform_perimeter;
use crate::fill::fill_region;
use crate::grid::TileGrid;
use crate::pad::pad_transitions;
use crate::random::RandomSource;
use crate::river::carve_river;
use crate::seed::seed_clusters;
use island_core::{IslandConfig, Rect, TileFilter, TileType};
use tracing::{debug, instrument};

/// Coarse coastline pass: up to `size / 20` rounds of blobs up to `size / 8`
const COARSE_DEFORM_ROUNDS_DIVISOR: i32 = 20;
const COARSE_DEFORM_BLOB_DIVISOR: i32 = 8;
/// Fine coastline pass: up to `size / 2` rounds of blobs up to `size / 25`
const FINE_DEFORM_ROUNDS_DIVISOR: i32 = 2;
const FINE_DEFORM_BLOB_DIVISOR: i32 = 25;
/// Beaches are widened by `[0, EXTRA_BEACH_PASSES)` extra padding passes
const EXTRA_BEACH_PASSES: i32 = 3;

const LAKE_ROUNDS_DIVISOR: i32 = 10;
const LAKE_BLOB_RATIO: f32 = 0.02;
/// Lakes are seeded `size / 20` tiles inside the base rectangle, plus one
/// tile for each lake padding pass
const LAKE_MARGIN_DIVISOR: i32 = 20;
const LAKE_PADDING_PASSES: i32 = 2;

const ROCK_ROUNDS_DIVISOR: i32 = 8;
const ROCK_BLOB_RATIO: f32 = 0.03;

const RIVER_COUNT: usize = 2;
const RIVER_MOUTH_EROSION_PASSES: usize = 2;

const SPARSE_ROUNDS_DIVISOR: i32 = 4;
const SPARSE_BLOB_RATIO: f32 = 0.04;
const MODERATE_ROUNDS_DIVISOR: i32 = 6;
const MODERATE_BLOB_RATIO: f32 = 0.03;
const DENSE_ROUNDS_DIVISOR: i32 = 8;
const DENSE_BLOB_RATIO: f32 = 0.02;

const GROUND: &[TileType] = &[TileType::Rock, TileType::Dirt];
const THINNER_VEGETATION: &[TileType] = &[TileType::VegetationSparse, TileType::VegetationModerate];

#[derive(Debug, Clone)]
pub struct MapGenerator {
    size: i32,
    border: i32,
}

impl MapGenerator {
    pub fn new(config: &IslandConfig) -> Self {
        Self {
            size: config.size.max(0),
            border: config.border(),
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Rectangle the island interior is generated in
    pub fn base_island_area(&self) -> Rect {
        Rect::square(self.size).inset(self.border)
    }

    /// Generate a fresh island. The grid is only handed out once every
    /// stage has run.
    #[instrument(skip_all, fields(size = self.size))]
    pub fn generate<R: RandomSource>(&self, rng: &mut R) -> TileGrid {
        let mut grid = TileGrid::new(self.size);

        self.fill_base(&mut grid);
        self.deform_coastline(&mut grid, rng, TileType::Dirt.into());
        self.close_gaps_and_add_beaches(&mut grid, rng);
        self.add_lakes(&mut grid, rng);
        self.add_rock(&mut grid, rng);
        self.resoften_coastline(&mut grid, rng);
        self.add_rivers(&mut grid, rng);
        self.add_vegetation(&mut grid, rng);

        debug!(census = ?grid.census(), "Island generated");
        grid
    }

    fn fill_base(&self, grid: &mut TileGrid) {
        let bounds = grid.bounds();
        fill_region(grid, bounds, TileType::Ocean);
        fill_region(grid, self.base_island_area(), TileType::Dirt);
    }

    fn deform_coastline<R: RandomSource>(&self, grid: &mut TileGrid, rng: &mut R, replace: TileFilter) {
        let base = self.base_island_area();
        let coarse = deform_perimeter(
            grid,
            rng,
            base,
            self.size / COARSE_DEFORM_ROUNDS_DIVISOR,
            self.size / COARSE_DEFORM_BLOB_DIVISOR,
            replace,
            TileType::Ocean,
        );
        let fine = self.deform_fine(grid, rng, replace);
        debug!(
            coarse_rounds = coarse.rounds,
            fine_rounds = fine,
            eroded = coarse.converted,
            "Coastline deformed"
        );
    }

    fn deform_fine<R: RandomSource>(&self, grid: &mut TileGrid, rng: &mut R, replace: TileFilter) -> i32 {
        deform_perimeter(
            grid,
            rng,
            self.base_island_area(),
            self.size / FINE_DEFORM_ROUNDS_DIVISOR,
            self.size / FINE_DEFORM_BLOB_DIVISOR,
            replace,
            TileType::Ocean,
        )
        .rounds
    }

    fn close_gaps_and_add_beaches<R: RandomSource>(&self, grid: &mut TileGrid, rng: &mut R) {
        let closed = pad_transitions(grid, TileType::Ocean, TileType::Dirt, TileType::Dirt);
        let mut beach = pad_transitions(grid, TileType::Dirt, TileType::Ocean, TileType::Sand);
        let extra = rng.range(0, EXTRA_BEACH_PASSES);
        for _ in 0..extra {
            beach += pad_transitions(grid, TileType::Dirt, TileType::Sand, TileType::Sand);
        }
        debug!(closed, beach, extra_passes = extra, "Beaches laid");
    }

    fn add_lakes<R: RandomSource>(&self, grid: &mut TileGrid, rng: &mut R) {
        let region = self
            .base_island_area()
            .inset(self.size / LAKE_MARGIN_DIVISOR + LAKE_PADDING_PASSES);
        let seeded = seed_clusters(
            grid,
            rng,
            region,
            self.size / LAKE_ROUNDS_DIVISOR,
            LAKE_BLOB_RATIO,
            TileFilter::Any,
            TileType::Lake,
        );
        pad_transitions(grid, TileType::Ocean, TileType::Lake, TileType::Lake);
        pad_transitions(grid, TileType::Dirt, TileType::Lake, TileType::Lake);
        pad_transitions(grid, TileType::Dirt, TileType::Lake, TileType::Sand);
        debug!(rounds = seeded.rounds, lake = grid.count(TileType::Lake), "Lakes filled");
    }

    fn add_rock<R: RandomSource>(&self, grid: &mut TileGrid, rng: &mut R) {
        let seeded = seed_clusters(
            grid,
            rng,
            self.base_island_area(),
            self.size / ROCK_ROUNDS_DIVISOR,
            ROCK_BLOB_RATIO,
            TileType::Dirt,
            TileType::Rock,
        );
        pad_transitions(grid, TileType::Dirt, TileType::Rock, TileType::Rock);
        debug!(rounds = seeded.rounds, rock = grid.count(TileType::Rock), "Rock placed");
    }

    fn resoften_coastline<R: RandomSource>(&self, grid: &mut TileGrid, rng: &mut R) {
        let rounds = self.deform_fine(grid, rng, TileFilter::OneOf(GROUND));
        let beach = pad_transitions(grid, TileType::Dirt, TileType::Ocean, TileType::Sand)
            + pad_transitions(grid, TileType::Rock, TileType::Ocean, TileType::Sand);
        debug!(rounds, beach, "Coastline softened");
    }

    fn add_rivers<R: RandomSource>(&self, grid: &mut TileGrid, rng: &mut R) {
        for index in 0..RIVER_COUNT {
            let river = carve_river(grid, rng);
            debug!(
                index,
                start = %river.start,
                end = %river.end,
                segments = river.segments,
                completed = river.completed,
                "River carved"
            );
        }

        for bank in [TileType::Dirt, TileType::Rock, TileType::Sand] {
            pad_transitions(grid, bank, TileType::River, TileType::River);
        }
        for _ in 0..RIVER_MOUTH_EROSION_PASSES {
            pad_transitions(grid, TileType::River, TileType::Ocean, TileType::Ocean);
        }
    }

    fn add_vegetation<R: RandomSource>(&self, grid: &mut TileGrid, rng: &mut R) {
        let base = self.base_island_area();

        seed_clusters(
            grid,
            rng,
            base,
            self.size / SPARSE_ROUNDS_DIVISOR,
            SPARSE_BLOB_RATIO,
            TileType::Dirt,
            TileType::VegetationSparse,
        );
        pad_transitions(
            grid,
            TileType::Dirt,
            TileType::VegetationSparse,
            TileType::VegetationSparse,
        );

        seed_clusters(
            grid,
            rng,
            base,
            self.size / MODERATE_ROUNDS_DIVISOR,
            MODERATE_BLOB_RATIO,
            TileType::VegetationSparse,
            TileType::VegetationModerate,
        );
        pad_transitions(
            grid,
            TileType::VegetationSparse,
            TileType::VegetationModerate,
            TileType::VegetationModerate,
        );

        seed_clusters(
            grid,
            rng,
            base,
            self.size / DENSE_ROUNDS_DIVISOR,
            DENSE_BLOB_RATIO,
            TileFilter::OneOf(THINNER_VEGETATION),
            TileType::VegetationDense,
        );
        pad_transitions(
            grid,
            TileType::VegetationModerate,
            TileType::VegetationDense,
            TileType::VegetationDense,
        );

        debug!(
            sparse = grid.count(TileType::VegetationSparse),
            moderate = grid.count(TileType::VegetationModerate),
            dense = grid.count(TileType::VegetationDense),
            "Vegetation planted"
        );
    }
}
