//! The loop entity: one independently growing curve.

use glam::DVec3;
use rand::Rng;

use crate::fibonacci::FibonacciTable;
use crate::helix::HelixParams;

/// Per-loop radius perturbation is drawn from `[-8, 8)`.
const RADIUS_OFFSET_SPREAD: f64 = 8.0;
/// Per-loop pitch perturbation is drawn from `[-0.6, 0.6)`.
const PITCH_OFFSET_SPREAD: f64 = 0.6;
/// Identities are 31-bit.
const IDENTITY_BOUND: u32 = 1 << 31;

/// Stable arena index of a loop inside its manifold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoopId(pub usize);

impl LoopId {
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// A growing helical curve.
///
/// Points are append-only except for tip overwrites from merging. Once a loop
/// is deactivated it stops growing and splitting but stays in the manifold
/// for rendering.
#[derive(Debug, Clone)]
pub struct Loop {
    pub(crate) points: Vec<DVec3>,
    pub(crate) phase: f64,
    pub(crate) step: u32,
    pub(crate) cycle: u64,
    pub(crate) active: bool,
    pub(crate) identity: u32,
    pub(crate) last_split_frame: Option<u64>,
    pub(crate) fib_index: usize,
    pub(crate) fib_value: f64,
    pub(crate) radius_offset: f64,
    pub(crate) pitch_offset: f64,
}

impl Loop {
    /// Create a loop with a random identity and random shape offsets.
    pub fn spawn<R: Rng + ?Sized>(
        phase: f64,
        fib_index: usize,
        table: &FibonacciTable,
        rng: &mut R,
    ) -> Self {
        let identity = rng.gen_range(0..IDENTITY_BOUND);
        let mut lp = Self::with_identity(identity, phase, fib_index, table);
        lp.radius_offset = rng.gen_range(-RADIUS_OFFSET_SPREAD..RADIUS_OFFSET_SPREAD);
        lp.pitch_offset = rng.gen_range(-PITCH_OFFSET_SPREAD..PITCH_OFFSET_SPREAD);
        lp
    }

    /// Create a loop with a fixed identity and no shape offsets.
    ///
    /// `fib_index` wraps into the table.
    pub fn with_identity(
        identity: u32,
        phase: f64,
        fib_index: usize,
        table: &FibonacciTable,
    ) -> Self {
        let fib_index = fib_index % table.len();
        Self {
            points: Vec::new(),
            phase,
            step: 0,
            cycle: 0,
            active: true,
            identity: identity % IDENTITY_BOUND,
            last_split_frame: None,
            fib_index,
            fib_value: table.value(fib_index),
            radius_offset: 0.0,
            pitch_offset: 0.0,
        }
    }

    /// Recorded points in growth order.
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Last point appended, if any.
    #[inline]
    pub fn tip(&self) -> Option<DVec3> {
        self.points.last().copied()
    }

    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Step within the current cycle.
    #[inline]
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Completed cycles.
    #[inline]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Seed source for this loop's per-step noise.
    #[inline]
    pub fn identity(&self) -> u32 {
        self.identity
    }

    /// Frame of the last curvature split this loop took part in.
    #[inline]
    pub fn last_split_frame(&self) -> Option<u64> {
        self.last_split_frame
    }

    #[inline]
    pub fn fib_index(&self) -> usize {
        self.fib_index
    }

    #[inline]
    pub fn fib_value(&self) -> f64 {
        self.fib_value
    }

    #[inline]
    pub fn radius_offset(&self) -> f64 {
        self.radius_offset
    }

    #[inline]
    pub fn pitch_offset(&self) -> f64 {
        self.pitch_offset
    }

    /// Inputs to the helix law for this loop.
    pub fn helix_params(&self) -> HelixParams {
        HelixParams {
            phase: self.phase,
            fib_value: self.fib_value,
            radius_offset: self.radius_offset,
            pitch_offset: self.pitch_offset,
            identity: self.identity,
        }
    }

    /// Preload points, e.g. to resume a curve or seed a test.
    pub fn with_points(mut self, points: impl IntoIterator<Item = DVec3>) -> Self {
        self.points.extend(points);
        self
    }

    /// Place the loop at a given position in its cycle.
    pub fn at_step(mut self, step: u32, cycle: u64) -> Self {
        self.step = step;
        self.cycle = cycle;
        self
    }

    pub(crate) fn set_fib_index(&mut self, index: usize, table: &FibonacciTable) {
        self.fib_index = index % table.len();
        self.fib_value = table.value(self.fib_index);
    }

    pub(crate) fn set_tip(&mut self, point: DVec3) {
        if let Some(tip) = self.points.last_mut() {
            *tip = point;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn spawn_draws_offsets_in_range() {
        let table = FibonacciTable::new(30);
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        for _ in 0..100 {
            let lp = Loop::spawn(0.0, 3, &table, &mut rng);
            assert!(lp.identity() < IDENTITY_BOUND);
            assert!(lp.radius_offset().abs() <= RADIUS_OFFSET_SPREAD);
            assert!(lp.pitch_offset().abs() <= PITCH_OFFSET_SPREAD);
            assert!(lp.is_active());
            assert!(lp.points().is_empty());
        }
    }

    #[test]
    fn spawn_is_reproducible_from_seed() {
        let table = FibonacciTable::new(30);
        let a = Loop::spawn(0.0, 3, &table, &mut ChaCha12Rng::seed_from_u64(9));
        let b = Loop::spawn(0.0, 3, &table, &mut ChaCha12Rng::seed_from_u64(9));
        assert_eq!(a.identity(), b.identity());
        assert_eq!(a.radius_offset(), b.radius_offset());
    }

    #[test]
    fn fib_index_wraps_into_table() {
        let table = FibonacciTable::new(5);
        let lp = Loop::with_identity(1, 0.0, 7, &table);
        assert_eq!(lp.fib_index(), 2);
        assert_eq!(lp.fib_value(), 2.0);
    }

    #[test]
    fn set_tip_only_touches_last_point() {
        let table = FibonacciTable::new(5);
        let mut lp = Loop::with_identity(1, 0.0, 0, &table).with_points([DVec3::ZERO, DVec3::X]);
        lp.set_tip(DVec3::Y);
        assert_eq!(lp.points(), &[DVec3::ZERO, DVec3::Y]);

        let mut empty = Loop::with_identity(1, 0.0, 0, &table);
        empty.set_tip(DVec3::Y);
        assert!(empty.tip().is_none());
    }
}
