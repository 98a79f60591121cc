//! Fibonacci Helix Manifold Runner
//!
//! Headless driver for the manifold with event recording.
//!
//! # Architecture
//!
//! - **Simulation**: ticks the manifold, records its events into a timeline
//!   and keeps a follow camera on the highest tip
//! - **Snapshot**: serializable per-loop summary of the current state
//! - **Render batch**: line strips ready for a graphics backend
//!
//! # Usage
//!
//! ```ignore
//! let mut sim = Simulation::new(ManifoldConfig::default())?;
//! sim.run(600);
//!
//! let strips = sim.render_batch();
//! let json = serde_json::to_string(&sim.snapshot())?;
//! ```

mod simulation;
mod snapshot;

pub use simulation::{Simulation, SimulationStats};
pub use snapshot::{LoopSummary, ManifoldSnapshot};
