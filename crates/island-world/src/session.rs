//! Island session: generation plus the live growth simulation.

use crate::generator::MapGenerator;
use crate::grid::TileGrid;
use crate::growth::{GrowthReport, VegetationGrowth};
use island_core::{Result, SessionConfig, TileType};
use parking_lot::RwLock;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{event, info, instrument, Level};

/// Owns one island and the random stream every pass draws from.
///
/// The grid sits behind a read/write lock so renderers can hold a read
/// handle; generation and ticks take the write lock for their whole
/// read-modify-write.
pub struct IslandSession {
    grid: Arc<RwLock<TileGrid>>,
    generator: MapGenerator,
    growth: VegetationGrowth,
    config: SessionConfig,
    rng: ChaCha8Rng,
    tick: u64,
    generations: u64,
    growth_total: GrowthReport,
}

impl IslandSession {
    /// Create a session with an ungenerated (all `Debug`) grid
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let generator = MapGenerator::new(&config.island);
        let growth = VegetationGrowth::new(&config.growth);
        let grid = Arc::new(RwLock::new(TileGrid::new(config.island.size)));

        Ok(Self {
            grid,
            generator,
            growth,
            config,
            rng,
            tick: 0,
            generations: 0,
            growth_total: GrowthReport::default(),
        })
    }

    /// Generate a new island, replacing the current grid, and return a copy
    /// of it
    #[instrument(skip(self), fields(seed = self.config.seed, size = self.config.island.size))]
    pub fn generate_map(&mut self) -> TileGrid {
        let generated = self.generator.generate(&mut self.rng);
        *self.grid.write() = generated.clone();
        self.generations += 1;
        self.tick = 0;
        self.growth_total = GrowthReport::default();

        info!(
            generation = self.generations,
            land = generated.iter().filter(|(_, t)| !t.is_water()).count(),
            rivers = generated.count(TileType::River),
            lakes = generated.count(TileType::Lake),
            "Island generated"
        );
        generated
    }

    /// Advance the growth simulation by one tick
    pub fn tick(&mut self) -> GrowthReport {
        let report = {
            let mut grid = self.grid.write();
            self.growth.tick(&mut grid, &mut self.rng)
        };
        self.tick += 1;
        self.growth_total.absorb(&report);
        report
    }

    /// Run `num_ticks` growth ticks, logging every `log_interval`
    #[instrument(skip(self), fields(num_ticks = self.config.num_ticks))]
    pub fn run(&mut self) -> SessionSummary {
        info!("Starting growth for {} ticks", self.config.num_ticks);

        for _ in 0..self.config.num_ticks {
            self.tick();
            if self.tick % self.config.log_interval == 0 {
                self.emit_vegetation_metrics();
            }
        }

        let summary = self.summary();
        info!(
            event = "growth_summary",
            ticks = summary.ticks,
            iterations = summary.growth.iterations,
            densified = summary.growth.densified,
            spread = summary.growth.spread,
            vegetated = summary.vegetated_tiles(),
            "Growth complete"
        );
        summary
    }

    fn emit_vegetation_metrics(&self) {
        let grid = self.grid.read();
        let sparse = grid.count(TileType::VegetationSparse);
        let moderate = grid.count(TileType::VegetationModerate);
        let dense = grid.count(TileType::VegetationDense);
        let bare = grid.count(TileType::Dirt);

        info!(
            event = "vegetation_metrics",
            tick = self.tick,
            sparse,
            moderate,
            dense,
            bare,
            "Vegetation snapshot"
        );

        event!(
            Level::DEBUG,
            gauge_name = "vegetated_tiles",
            gauge_value = sparse + moderate + dense,
            tick = self.tick,
            "Vegetated tiles"
        );
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.config.seed,
            size: self.config.island.size,
            ticks: self.tick,
            growth: self.growth_total,
            census: self.grid.read().census(),
        }
    }

    pub fn tile_type(&self, x: i32, y: i32) -> Result<TileType> {
        self.grid.read().tile_type(x, y)
    }

    /// Single-tile write outside the pipeline, e.g. clearing ground for a
    /// building
    pub fn set_tile_type(&self, x: i32, y: i32, tile: TileType) -> Result<()> {
        self.grid.write().set_tile_type(x, y, tile)
    }

    pub fn position_in_range(&self, x: i32, y: i32) -> bool {
        self.grid.read().position_in_range(x, y)
    }

    /// Shared handle for readers such as renderers
    pub fn shared_grid(&self) -> Arc<RwLock<TileGrid>> {
        Arc::clone(&self.grid)
    }

    pub fn snapshot(&self) -> TileGrid {
        self.grid.read().clone()
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub size: i32,
    pub ticks: u64,
    pub growth: GrowthReport,
    pub census: BTreeMap<TileType, usize>,
}

impl SessionSummary {
    pub fn vegetated_tiles(&self) -> usize {
        self.census
            .iter()
            .filter(|(tile, _)| tile.is_vegetation())
            .map(|(_, count)| count)
            .sum()
    }
}
