//! Serializable views of the manifold state.

use fibhelix_core::{Loop, LoopId, Manifold};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Per-loop summary; the points themselves are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopSummary {
    pub id: LoopId,
    pub identity: u32,
    pub active: bool,
    pub fib_index: usize,
    pub cycle: u64,
    pub step: u32,
    pub point_count: usize,
    pub tip: Option<DVec3>,
    pub last_split_frame: Option<u64>,
}

impl LoopSummary {
    pub fn new(id: LoopId, lp: &Loop) -> Self {
        Self {
            id,
            identity: lp.identity(),
            active: lp.is_active(),
            fib_index: lp.fib_index(),
            cycle: lp.cycle(),
            step: lp.step(),
            point_count: lp.points().len(),
            tip: lp.tip(),
            last_split_frame: lp.last_split_frame(),
        }
    }
}

/// Manifold state at the end of a frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifoldSnapshot {
    pub frame: u64,
    pub loop_count: usize,
    pub active_count: usize,
    pub total_points: usize,
    /// Highest tip among active loops
    pub highest_tip: Option<f64>,
    pub loops: Vec<LoopSummary>,
}

impl ManifoldSnapshot {
    pub fn capture(manifold: &Manifold) -> Self {
        let loops: Vec<LoopSummary> = manifold
            .iter()
            .map(|(id, lp)| LoopSummary::new(id, lp))
            .collect();

        Self {
            frame: manifold.frame(),
            loop_count: loops.len(),
            active_count: loops.iter().filter(|l| l.active).count(),
            total_points: loops.iter().map(|l| l.point_count).sum(),
            highest_tip: manifold.max_active_tip_z(),
            loops,
        }
    }
}
