//! Fibonacci Helix Manifold Simulator
//!
//! Run the manifold headless and report what it grew.
//!
//! Usage: `fibhelix-sim [frames] [seed] [config.json]`

use std::env;

use fibhelix_core::ManifoldConfig;
use fibhelix_vis::Simulation;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PROGRESS_EVERY: u64 = 100;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fibhelix=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line args
    let args: Vec<String> = env::args().collect();

    let frames: u64 = args.get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(600);

    let mut config = match args.get(3) {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str::<ManifoldConfig>(&text)?
        }
        None => ManifoldConfig::default(),
    };
    if let Some(seed) = args.get(2).and_then(|s| s.parse().ok()) {
        config.seed = seed;
    }

    println!("Fibonacci Helix Manifold");
    println!("========================");
    println!();
    println!("Growing {} frames with seed {}...", frames, config.seed);

    let mut sim = Simulation::new(config)?;
    for frame in 1..=frames {
        sim.step();
        if frame % PROGRESS_EVERY == 0 {
            tracing::info!(
                frame,
                loops = sim.manifold().len(),
                active = sim.manifold().active_count(),
                "progress"
            );
        }
    }

    let manifold = sim.manifold();
    let stats = sim.stats();
    println!();
    println!("Simulation complete:");
    println!("  Frames: {}", manifold.frame());
    println!("  Loops: {} ({} active)", manifold.len(), manifold.active_count());
    println!(
        "  Splits: {} ({} curvature, {} stochastic, {} rejected)",
        stats.splits(),
        stats.curvature_splits,
        stats.stochastic_splits,
        stats.rejected_splits
    );
    println!("  Merges: {}", stats.merges);
    println!("  Points: {}", manifold.total_points());
    match manifold.max_active_tip_z() {
        Some(z) => println!("  Highest tip: {:.1}", z),
        None => println!("  Highest tip: none"),
    }

    if env::var("FIBHELIX_SNAPSHOT").is_ok_and(|v| v == "1") {
        println!();
        println!("{}", serde_json::to_string_pretty(&sim.snapshot())?);
    }

    Ok(())
}
