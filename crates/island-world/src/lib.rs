//! Island generation engine.
//!
//! Builds a square tile grid into an island through a fixed pipeline of
//! randomised passes, then keeps it alive with a per-tick vegetation rule.
//! Every pass takes the grid and the shared random source explicitly.

pub mod grid;
pub mod random;
pub mod fill;
pub mod deform;
pub mod seed;
pub mod pad;
pub mod river;
pub mod growth;
pub mod generator;
pub mod session;

pub use grid::TileGrid;
pub use random::{RandomSource, SequenceRandom};
pub use generator::MapGenerator;
pub use growth::{GrowthOutcome, GrowthReport, VegetationGrowth};
pub use session::{IslandSession, SessionSummary};
