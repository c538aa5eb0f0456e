//! Generates an island, grows it, and prints the result.
//!
//! Usage: `island-sim [config.json]`. `ISLAND_SEED` overrides the seed.

mod render;
mod telemetry;

use anyhow::{Context, Result};
use island_core::SessionConfig;
use island_world::IslandSession;
use tracing::info;

fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let mut session = IslandSession::new(load_config()?)?;
    let config = session.config();
    info!(
        seed = config.seed,
        size = config.island.size,
        ticks = config.num_ticks,
        growth_divisor = config.growth.iterations_divisor,
        "Starting island simulator"
    );

    session.generate_map();
    let summary = session.run();

    print!("{}", render::render_ascii(&session.snapshot()));
    println!();
    print!("{}", render::render_census(&summary));

    Ok(())
}

fn load_config() -> Result<SessionConfig> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => SessionConfig::from_json_file(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => SessionConfig::default(),
    };

    if let Ok(seed) = std::env::var("ISLAND_SEED") {
        config.seed = seed
            .parse()
            .with_context(|| format!("ISLAND_SEED is not a number: {}", seed))?;
    }

    config.validate()?;
    Ok(config)
}
