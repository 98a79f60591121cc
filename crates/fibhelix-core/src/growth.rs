//! Per-step loop growth: helix point, curvature-scaled twist, cycle rollover.

use glam::DVec3;
use rand::Rng;

use crate::config::ManifoldConfig;
use crate::curvature::discrete_curvature;
use crate::fibonacci::FibonacciTable;
use crate::helix::HelixGenerator;
use crate::loops::Loop;
use crate::noise::StepNoise;

/// Below this length a direction is treated as degenerate.
const DEGENERATE_LEN: f64 = 1e-6;
/// Guard on normalisation denominators.
const NORMALIZE_EPSILON: f64 = 1e-9;
/// Amplitude of the planar nudge applied to a loop's very first point.
const FIRST_POINT_NUDGE: f64 = 0.8;
/// Phase change at a cycle boundary is drawn from `[-0.15, 0.15)`.
const CYCLE_PHASE_TWEAK: f64 = 0.15;

/// What happened when a loop closed a cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleRollover {
    /// Cycle count after the rollover
    pub cycle: u64,
    /// Fibonacci index after the rollover
    pub fib_index: usize,
    /// Whether the index moved forward
    pub fib_advanced: bool,
}

/// Grows loops one point at a time.
#[derive(Debug, Clone)]
pub struct Grower {
    helix: HelixGenerator,
    cycle_length: u32,
    twist_scale: f64,
    fib_advance_prob: f64,
}

impl Grower {
    pub fn new(config: &ManifoldConfig, table: &FibonacciTable) -> Self {
        Self {
            helix: HelixGenerator::new(config, table),
            cycle_length: config.cycle_length,
            twist_scale: config.curvature_twist_scale,
            fib_advance_prob: config.fib_advance_prob,
        }
    }

    pub fn helix(&self) -> &HelixGenerator {
        &self.helix
    }

    /// The point the loop would append next.
    ///
    /// Depends only on the loop's own state; the twist noise is keyed to
    /// `(identity, step)`.
    pub fn next_point(&self, lp: &Loop) -> DVec3 {
        let base = self.helix.point(lp.step, lp.cycle, &lp.helix_params());

        let n = lp.points.len();
        let curr = n.checked_sub(1).map(|i| lp.points[i]);
        let prev = n.checked_sub(2).map(|i| lp.points[i]);

        let kappa = discrete_curvature(prev, curr, Some(base));
        let twist_amp = 1.0 + self.twist_scale * kappa.min(1.0);

        let mut noise = StepNoise::new(lp.identity, lp.step);
        let rnd = noise.signed();

        match curr {
            Some(curr) => {
                let perp = twist_direction(base - curr);
                let envelope = 0.6 + 0.4 * (f64::from(lp.step) * 0.03).sin();
                base + perp * (rnd * twist_amp * envelope)
            }
            None => {
                let second = noise.signed();
                base + DVec3::new(rnd * FIRST_POINT_NUDGE, second * FIRST_POINT_NUDGE, 0.0)
            }
        }
    }

    /// Append one point and advance the loop's counters.
    ///
    /// Returns the rollover details when the step wraps to a new cycle.
    pub fn grow_point<R: Rng + ?Sized>(
        &self,
        lp: &mut Loop,
        table: &FibonacciTable,
        rng: &mut R,
    ) -> Option<CycleRollover> {
        let point = self.next_point(lp);
        lp.points.push(point);
        lp.step += 1;

        if lp.step < self.cycle_length {
            return None;
        }

        lp.step = 0;
        lp.cycle += 1;

        let fib_advanced = rng.gen::<f64>() < self.fib_advance_prob;
        if fib_advanced {
            let next = table.next_index(lp.fib_index);
            lp.set_fib_index(next, table);
        }
        lp.phase += rng.gen_range(-CYCLE_PHASE_TWEAK..CYCLE_PHASE_TWEAK);

        tracing::trace!(
            identity = lp.identity,
            cycle = lp.cycle,
            fib_index = lp.fib_index,
            fib_advanced,
            "cycle completed"
        );

        Some(CycleRollover {
            cycle: lp.cycle,
            fib_index: lp.fib_index,
            fib_advanced,
        })
    }
}

/// Unit vector perpendicular to `tangent`, preferring the horizontal plane.
///
/// Falls back to the x axis for a vanishing tangent and to a cross with the
/// y axis when the tangent is vertical.
pub fn twist_direction(tangent: DVec3) -> DVec3 {
    let tangent = if tangent.length() < DEGENERATE_LEN {
        DVec3::X
    } else {
        tangent
    };
    let tangent = tangent / (tangent.length() + NORMALIZE_EPSILON);

    let mut perp = tangent.cross(DVec3::Z);
    if perp.length() < DEGENERATE_LEN {
        perp = tangent.cross(DVec3::Y);
    }
    perp / (perp.length() + NORMALIZE_EPSILON)
}
