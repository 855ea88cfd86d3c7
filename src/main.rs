/*
 * Aquarium
 *
 * An underwater scene with a handful of fish that wander about and swim
 * towards food dropped on the floor, and bubbles that rise and fade away.
 *
 * Runs in a window by default, or headless for a fixed number of ticks.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aquarium::app::{self, LaunchOptions};
use aquarium::{FixedTicks, FrameDriver, Simulation, SimulationParams};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file overriding the default simulation parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the random generator (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run without a window for a fixed number of ticks
    #[arg(long)]
    headless: bool,

    /// Number of ticks to run in headless mode
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let params = match &args.config {
        Some(path) => SimulationParams::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimulationParams::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "starting aquarium");

    if args.headless {
        run_headless(params, seed, args.ticks);
    } else {
        app::launch(LaunchOptions { params, seed });
    }

    Ok(())
}

fn run_headless(params: SimulationParams, seed: u64, ticks: u64) {
    let mut sim = Simulation::new(params, seed);
    let mut driver = FrameDriver::new();
    let mut peak_bubbles = 0;

    driver.run(&mut FixedTicks::new(ticks), &mut sim, &mut |s: &Simulation| {
        peak_bubbles = peak_bubbles.max(s.bubbles().len());
    });

    for fish in sim.fish() {
        info!(
            fish = fish.index,
            x = fish.position.x,
            y = fish.position.y,
            z = fish.position.z,
            heading = fish.heading(),
            "final fish state"
        );
    }
    println!(
        "Ran {} ticks: {} bubbles live (peak {}), {} spawned in total.",
        driver.ticks(),
        sim.bubbles().len(),
        peak_bubbles,
        sim.bubbles().total_spawned()
    );
}
