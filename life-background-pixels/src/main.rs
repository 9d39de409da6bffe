#![deny(clippy::all)]
#![forbid(unsafe_code)]

use life_grid::{EdgeStrategy, LifeWorld, Random, SeedPolicy, DEFAULT_SEED};
use log::info;
use pixels_background::{animate, BackgroundError, BackgroundSettings};
use std::time::Duration;

const NUM_COLUMNS: u32 = 100;
const NUM_ROWS: u32 = 40;
const CELL_PIXEL_WIDTH: u32 = 8;
const TIME_STEP_MILLIS: u64 = 700;

// SeedPolicy::Random { density: ORIGINAL_RANDOM_DENSITY } gives the sparse random start.
const SEED_POLICY: SeedPolicy = SeedPolicy::Pattern(&DEFAULT_SEED);
const EDGE_STRATEGY: EdgeStrategy = EdgeStrategy::ClampedZero;

fn main() -> Result<(), BackgroundError> {
    env_logger::init();
    let settings = BackgroundSettings {
        cell_pixel_width: CELL_PIXEL_WIDTH,
        tick: Duration::from_millis(TIME_STEP_MILLIS),
        ..BackgroundSettings::default()
    };
    info!(
        "Starting {}x{} life background, {:?} edges, {} ms per generation",
        NUM_COLUMNS, NUM_ROWS, EDGE_STRATEGY, TIME_STEP_MILLIS
    );
    let world = LifeWorld::new(
        NUM_COLUMNS,
        NUM_ROWS,
        SEED_POLICY,
        EDGE_STRATEGY,
        &mut Random::new(),
    )?;
    animate(&settings, world)
}
