//! Manifold runner with event recording.

use fibhelix_core::{Manifold, ManifoldConfig, ManifoldEvent, Result, TickReport};
use fibhelix_render::{build_strips, FollowCamera, LineStrip};
use serde::{Deserialize, Serialize};

use crate::snapshot::ManifoldSnapshot;

/// Running totals over every frame simulated so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub frames: u64,
    pub points_grown: u64,
    pub cycles_completed: u64,
    pub curvature_splits: u64,
    pub stochastic_splits: u64,
    pub rejected_splits: u64,
    pub merges: u64,
}

impl SimulationStats {
    /// Fold one tick into the totals.
    pub fn record(&mut self, report: &TickReport) {
        self.frames += 1;
        self.points_grown += report.points_grown as u64;
        for event in &report.events {
            match event {
                ManifoldEvent::CycleCompleted { .. } => self.cycles_completed += 1,
                ManifoldEvent::CurvatureSplit { .. } => self.curvature_splits += 1,
                ManifoldEvent::StochasticSplit { .. } => self.stochastic_splits += 1,
                ManifoldEvent::SplitRejected { .. } => self.rejected_splits += 1,
                ManifoldEvent::Merged { .. } => self.merges += 1,
            }
        }
    }

    /// Accepted splits of either kind.
    pub fn splits(&self) -> u64 {
        self.curvature_splits + self.stochastic_splits
    }
}

/// Drives a manifold frame by frame and keeps its camera in step.
pub struct Simulation {
    manifold: Manifold,
    camera: FollowCamera,
    events: Vec<ManifoldEvent>,
    stats: SimulationStats,
}

impl Simulation {
    /// Create a simulation from a validated configuration.
    pub fn new(config: ManifoldConfig) -> Result<Self> {
        Ok(Self {
            manifold: Manifold::new(config)?,
            camera: FollowCamera::default(),
            events: Vec::new(),
            stats: SimulationStats::default(),
        })
    }

    /// Advance one frame: tick the manifold, record its events, move the camera.
    pub fn step(&mut self) -> TickReport {
        let report = self.manifold.tick();
        self.stats.record(&report);
        self.events.extend(report.events.iter().cloned());
        self.camera.update(self.manifold.max_active_tip_z());
        report
    }

    /// Advance `frames` frames.
    pub fn run(&mut self, frames: u64) {
        for _ in 0..frames {
            self.step();
        }
        tracing::debug!(
            frame = self.manifold.frame(),
            loops = self.manifold.len(),
            events = self.events.len(),
            "ran {} frames",
            frames
        );
    }

    /// Every event recorded so far, in order.
    pub fn events(&self) -> &[ManifoldEvent] {
        &self.events
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Events recorded during `frame`.
    pub fn events_in_frame(&self, frame: u64) -> impl Iterator<Item = &ManifoldEvent> {
        self.events.iter().filter(move |e| e.frame() == frame)
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn manifold(&self) -> &Manifold {
        &self.manifold
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    /// Camera handle for pan, orbit and zoom input.
    pub fn camera_mut(&mut self) -> &mut FollowCamera {
        &mut self.camera
    }

    /// Snapshot of the current state.
    pub fn snapshot(&self) -> ManifoldSnapshot {
        ManifoldSnapshot::capture(&self.manifold)
    }

    /// Line strips for the current state.
    pub fn render_batch(&self) -> Vec<LineStrip> {
        build_strips(&self.manifold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_follow_reports() {
        let mut sim = Simulation::new(ManifoldConfig { seed: 8, ..Default::default() }).unwrap();
        sim.run(300);

        let stats = sim.stats();
        assert_eq!(stats.frames, 300);
        assert_eq!(sim.manifold().len() as u64, 1 + stats.splits());

        // children arrive with 3 (curvature) or 2 (stochastic) seed points
        let seeded = 3 * stats.curvature_splits + 2 * stats.stochastic_splits;
        assert_eq!(sim.manifold().total_points() as u64, stats.points_grown + seeded);

        let merges = sim.events().iter().filter(|e| e.is_merge()).count() as u64;
        assert_eq!(merges, stats.merges);
    }

    #[test]
    fn camera_tracks_rising_tips() {
        let mut sim = Simulation::new(ManifoldConfig::default()).unwrap();
        sim.run(200);
        assert!(sim.camera().camera_z() > 0.0);
        assert!(sim.camera().translation().z < 0.0);
    }

    #[test]
    fn events_filter_by_frame() {
        let config = ManifoldConfig {
            points_per_frame: 1,
            base_split_prob: 0.0,
            curvature_split_threshold: 1e12,
            ..Default::default()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.run(360);

        let rollovers: Vec<_> = sim.events_in_frame(360).collect();
        assert_eq!(rollovers.len(), 1);
        assert!(matches!(rollovers[0], ManifoldEvent::CycleCompleted { cycle: 1, .. }));
        assert_eq!(sim.events_in_frame(359).count(), 0);
    }

    #[test]
    fn render_batch_covers_every_loop_with_points() {
        let config = ManifoldConfig {
            base_split_prob: 0.05,
            ..Default::default()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.run(50);

        let with_points = sim
            .manifold()
            .loops()
            .iter()
            .filter(|lp| !lp.points().is_empty())
            .count();
        assert_eq!(sim.render_batch().len(), with_points);
    }
}
