//! Curvature-triggered and stochastic loop splitting.
//!
//! Both paths only propose a child; the engine decides whether the population
//! has room and appends accepted children after the whole frame is processed.

use glam::DVec3;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::config::ManifoldConfig;
use crate::curvature::discrete_curvature;
use crate::fibonacci::FibonacciTable;
use crate::loops::Loop;

const DEGENERATE_LEN: f64 = 1e-6;
const NORMALIZE_EPSILON: f64 = 1e-9;
/// Child phase differs from the parent by at most this much.
const CHILD_PHASE_SPREAD: f64 = 0.6;
/// Minimum distance of a curvature child from the split point.
const SPLIT_OFFSET_MIN: f64 = 4.0;
/// Random extra distance added on top of the minimum.
const SPLIT_OFFSET_SPREAD: f64 = 3.0;
/// Spacing of a curvature child's seed points along the normal.
const SEED_SPACING: f64 = 0.6;
/// Seed points of a curvature child.
const CURVATURE_SEED_POINTS: usize = 3;
/// Seed points of a stochastic child.
const STOCHASTIC_SEED_POINTS: usize = 2;
/// Standard deviation of a stochastic child's seed points around the tip.
const STOCHASTIC_SEED_SIGMA: f64 = 2.0;
/// A stochastic child's index is the parent's plus 0, 1 or 2.
const STOCHASTIC_FIB_SHIFT: usize = 3;

/// A curvature split that met the threshold and cooldown.
#[derive(Debug, Clone)]
pub struct CurvatureTrigger {
    /// Curvature measured at the second-to-last point
    pub curvature: f64,
    prev: DVec3,
    curr: DVec3,
    next: DVec3,
}

/// Decides when loops split and builds their children.
#[derive(Debug, Clone)]
pub struct Splitter {
    threshold: f64,
    cooldown_frames: u64,
    base_prob: f64,
    next_fib_prob: f64,
}

impl Splitter {
    pub fn new(config: &ManifoldConfig) -> Self {
        Self {
            threshold: config.curvature_split_threshold,
            cooldown_frames: config.split_cooldown_frames,
            base_prob: config.base_split_prob,
            next_fib_prob: config.split_next_fib_prob,
        }
    }

    /// Whether `lp` is outside its cooldown window at `frame`.
    pub fn cooled_down(&self, lp: &Loop, frame: u64) -> bool {
        lp.last_split_frame
            .map_or(true, |last| frame.saturating_sub(last) > self.cooldown_frames)
    }

    /// Check the curvature condition on the loop's latest geometry.
    ///
    /// Needs at least four points; curvature is taken at the second-to-last.
    pub fn curvature_trigger(&self, lp: &Loop, frame: u64) -> Option<CurvatureTrigger> {
        let n = lp.points.len();
        if n < 4 {
            return None;
        }
        let (prev, curr, next) = (lp.points[n - 3], lp.points[n - 2], lp.points[n - 1]);
        let curvature = discrete_curvature(Some(prev), Some(curr), Some(next));

        if curvature > self.threshold && self.cooled_down(lp, frame) {
            Some(CurvatureTrigger { curvature, prev, curr, next })
        } else {
            None
        }
    }

    /// Build the child of a curvature split and reset both cooldowns.
    pub fn curvature_child<R: Rng + ?Sized>(
        &self,
        parent: &mut Loop,
        trigger: &CurvatureTrigger,
        frame: u64,
        table: &FibonacciTable,
        rng: &mut R,
    ) -> Loop {
        let normal = split_normal(trigger.curr - trigger.prev, trigger.next - trigger.curr, rng);
        let offset = normal * (SPLIT_OFFSET_MIN + SPLIT_OFFSET_SPREAD * rng.gen::<f64>());
        let phase = parent.phase + rng.gen_range(-CHILD_PHASE_SPREAD..CHILD_PHASE_SPREAD);

        let fib_index = if rng.gen::<f64>() < self.next_fib_prob {
            table.next_index(parent.fib_index)
        } else {
            rng.gen_range(0..table.len())
        };

        let origin = trigger.curr + offset;
        let seeds = (0..CURVATURE_SEED_POINTS).map(|s| origin + normal * (s as f64 * SEED_SPACING));
        let mut child = Loop::spawn(phase, fib_index, table, rng)
            .with_points(seeds)
            .at_step(parent.step, parent.cycle);

        child.last_split_frame = Some(frame);
        parent.last_split_frame = Some(frame);
        child
    }

    /// Roll for a stochastic split; no cooldown applies.
    pub fn stochastic_roll<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen::<f64>() < self.base_prob
    }

    /// Build a child near the parent's tip on a nearby Fibonacci index.
    pub fn stochastic_child<R: Rng + ?Sized>(
        &self,
        parent: &Loop,
        table: &FibonacciTable,
        rng: &mut R,
    ) -> Loop {
        let fib_index = (parent.fib_index + rng.gen_range(0..STOCHASTIC_FIB_SHIFT)) % table.len();
        let phase = parent.phase + rng.gen_range(-CHILD_PHASE_SPREAD..CHILD_PHASE_SPREAD);
        let mut child = Loop::spawn(phase, fib_index, table, rng);

        if let Some(tip) = parent.tip() {
            for _ in 0..STOCHASTIC_SEED_POINTS {
                let jitter = DVec3::new(
                    rng.sample(StandardNormal),
                    rng.sample(StandardNormal),
                    rng.sample(StandardNormal),
                );
                child.points.push(tip + jitter * STOCHASTIC_SEED_SIGMA);
            }
        }
        child
    }
}

/// Unit normal of the plane spanned by two consecutive tangents.
///
/// Collinear tangents have no plane; a random horizontal direction is used.
fn split_normal<R: Rng + ?Sized>(tangent_in: DVec3, tangent_out: DVec3, rng: &mut R) -> DVec3 {
    let mut normal = tangent_in.cross(tangent_out);
    if normal.length() < DEGENERATE_LEN {
        normal = horizontal_fallback(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
    }
    normal / (normal.length() + NORMALIZE_EPSILON)
}

/// Horizontal direction from two draws; the x axis when both are near zero.
fn horizontal_fallback(x: f64, y: f64) -> DVec3 {
    let direction = DVec3::new(x, y, 0.0);
    if direction.length() < DEGENERATE_LEN {
        DVec3::X
    } else {
        direction
    }
}
