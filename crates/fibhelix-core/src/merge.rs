//! Tip-proximity merging.
//!
//! The pass works on a frozen snapshot: the candidate set (active loops with a
//! tip) and every tip position are captured once, all unordered pairs are
//! tested against those frozen positions, and only then are the midpoint
//! writes and deactivations applied, in pair order. A loop absorbed by an
//! earlier pair still takes part in later pairs, and when several pairs touch
//! the same loop the last write wins.

use glam::DVec3;

use crate::loops::{Loop, LoopId};

/// One merged pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeOutcome {
    /// Lower-indexed loop; stays active
    pub survivor: LoopId,
    /// Higher-indexed loop; deactivated
    pub absorbed: LoopId,
    /// Shared tip written to both loops
    pub midpoint: DVec3,
}

/// Find every pair of tips strictly closer than `merge_distance`.
///
/// Pure: reads the snapshot, changes nothing.
pub fn find_merges(loops: &[Loop], merge_distance: f64) -> Vec<MergeOutcome> {
    let tips: Vec<(usize, DVec3)> = loops
        .iter()
        .enumerate()
        .filter(|(_, lp)| lp.active)
        .filter_map(|(i, lp)| lp.tip().map(|tip| (i, tip)))
        .collect();

    let mut merges = Vec::new();
    for (a, &(i, tip_i)) in tips.iter().enumerate() {
        for &(j, tip_j) in &tips[a + 1..] {
            if tip_i.distance(tip_j) < merge_distance {
                merges.push(MergeOutcome {
                    survivor: LoopId(i),
                    absorbed: LoopId(j),
                    midpoint: (tip_i + tip_j) * 0.5,
                });
            }
        }
    }
    merges
}

/// Write the midpoints and deactivate absorbed loops.
pub fn apply_merges(loops: &mut [Loop], merges: &[MergeOutcome]) {
    for merge in merges {
        loops[merge.survivor.index()].set_tip(merge.midpoint);
        let absorbed = &mut loops[merge.absorbed.index()];
        absorbed.set_tip(merge.midpoint);
        absorbed.active = false;
    }
}

/// Run a full merge pass over `loops`.
pub fn merge_tips(loops: &mut [Loop], merge_distance: f64) -> Vec<MergeOutcome> {
    let merges = find_merges(loops, merge_distance);
    apply_merges(loops, &merges);
    merges
}
