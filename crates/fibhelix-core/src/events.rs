//! Events emitted by a manifold tick.

use glam::DVec3;

use crate::loops::LoopId;

/// Something that changed the manifold's structure during a tick.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum ManifoldEvent {
    /// A loop finished a full cycle
    CycleCompleted {
        loop_id: LoopId,
        cycle: u64,
        fib_index: usize,
        frame: u64,
    },

    /// Curvature above threshold spawned a child
    CurvatureSplit {
        parent: LoopId,
        child: LoopId,
        curvature: f64,
        frame: u64,
    },

    /// A random split spawned a child near the parent's tip
    StochasticSplit {
        parent: LoopId,
        child: LoopId,
        frame: u64,
    },

    /// A split was due but the population cap was reached
    SplitRejected { parent: LoopId, frame: u64 },

    /// Two tips collapsed to their midpoint
    Merged {
        survivor: LoopId,
        absorbed: LoopId,
        midpoint: DVec3,
        frame: u64,
    },
}

impl ManifoldEvent {
    /// Frame in which the event happened.
    pub fn frame(&self) -> u64 {
        match self {
            ManifoldEvent::CycleCompleted { frame, .. } => *frame,
            ManifoldEvent::CurvatureSplit { frame, .. } => *frame,
            ManifoldEvent::StochasticSplit { frame, .. } => *frame,
            ManifoldEvent::SplitRejected { frame, .. } => *frame,
            ManifoldEvent::Merged { frame, .. } => *frame,
        }
    }

    /// Whether the event created a loop.
    pub fn is_split(&self) -> bool {
        matches!(
            self,
            ManifoldEvent::CurvatureSplit { .. } | ManifoldEvent::StochasticSplit { .. }
        )
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, ManifoldEvent::Merged { .. })
    }
}

/// Summary of one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Frame index of the tick (the first tick is frame 1)
    pub frame: u64,
    /// Points appended across all loops
    pub points_grown: usize,
    /// Structural events in the order they happened
    pub events: Vec<ManifoldEvent>,
}

impl TickReport {
    pub fn split_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_split()).count()
    }

    pub fn merge_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_merge()).count()
    }
}
