//! Manifold configuration.

use crate::error::ConfigError;
use crate::fibonacci::MAX_FIB_COUNT;

/// Tunables for the evolving manifold.
///
/// Defaults reproduce the reference look: 30 Fibonacci shells, 360-step
/// cycles, 80 loops at most.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ManifoldConfig {
    /// Points appended to every active loop per frame
    pub points_per_frame: usize,
    /// Height added per completed cycle
    pub loop_growth_z: f64,
    /// Steps per helix cycle
    pub cycle_length: u32,
    /// Population cap; spawns beyond it are dropped
    pub max_loops: usize,
    /// Tips strictly closer than this merge
    pub merge_distance: f64,
    /// Per-loop, per-frame chance of a stochastic split
    pub base_split_prob: f64,
    /// Curvature above which a loop splits
    pub curvature_split_threshold: f64,
    /// Frames a loop must wait between curvature splits
    pub split_cooldown_frames: u64,
    /// How strongly curvature amplifies the twist
    pub curvature_twist_scale: f64,
    /// Size of the shared Fibonacci table
    pub fib_count: usize,
    /// Radius gained per unit of Fibonacci value
    pub fib_radius_scale: f64,
    /// Pitch gained per unit of Fibonacci value
    pub fib_pitch_scale: f64,
    /// Base angular frequency multiplier
    pub fib_ang_freq_base: f64,
    /// Angular frequency gained per unit of Fibonacci value
    pub fib_ang_freq_scale: f64,
    /// Amplitude of the jitter orthogonal to the helix
    pub helix_noise_amp: f64,
    /// Helix radius before Fibonacci and per-loop terms
    pub base_radius: f64,
    /// Chance to advance the Fibonacci index at a cycle boundary
    pub fib_advance_prob: f64,
    /// Chance a curvature split child takes the parent's next index
    pub split_next_fib_prob: f64,
    /// Fibonacci index of the seed loop
    pub initial_fib_index: usize,
    /// Phase of the seed loop
    pub initial_phase: f64,
    /// Seed for the engine's random stream
    pub seed: u64,
}

impl Default for ManifoldConfig {
    fn default() -> Self {
        Self {
            points_per_frame: 4,
            loop_growth_z: 2.2,
            cycle_length: crate::DEFAULT_CYCLE_LENGTH,
            max_loops: 80,
            merge_distance: 10.0,
            base_split_prob: 0.0008,
            curvature_split_threshold: 0.35,
            split_cooldown_frames: 140,
            curvature_twist_scale: 20.0,
            fib_count: 30,
            fib_radius_scale: 0.75,
            fib_pitch_scale: 0.035,
            fib_ang_freq_base: 1.0,
            fib_ang_freq_scale: 0.006,
            helix_noise_amp: 6.0,
            base_radius: 60.0,
            fib_advance_prob: 0.25,
            split_next_fib_prob: 0.7,
            initial_fib_index: 3,
            initial_phase: 0.0,
            seed: 42,
        }
    }
}

impl ManifoldConfig {
    /// Check every invariant the engine assumes for its whole lifetime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        nonzero("points_per_frame", self.points_per_frame)?;
        nonzero("cycle_length", self.cycle_length as usize)?;
        nonzero("max_loops", self.max_loops)?;
        nonzero("fib_count", self.fib_count)?;

        if self.fib_count > MAX_FIB_COUNT {
            return Err(ConfigError::FibTableTooLarge {
                max: MAX_FIB_COUNT,
                actual: self.fib_count,
            });
        }
        if self.initial_fib_index >= self.fib_count {
            return Err(ConfigError::InitialFibIndexOutOfRange {
                index: self.initial_fib_index,
                count: self.fib_count,
            });
        }

        positive("merge_distance", self.merge_distance)?;
        positive("curvature_split_threshold", self.curvature_split_threshold)?;
        positive("base_radius", self.base_radius)?;
        positive("fib_ang_freq_base", self.fib_ang_freq_base)?;

        finite("loop_growth_z", self.loop_growth_z)?;
        finite("curvature_twist_scale", self.curvature_twist_scale)?;
        finite("fib_radius_scale", self.fib_radius_scale)?;
        finite("fib_pitch_scale", self.fib_pitch_scale)?;
        finite("fib_ang_freq_scale", self.fib_ang_freq_scale)?;
        finite("helix_noise_amp", self.helix_noise_amp)?;
        finite("initial_phase", self.initial_phase)?;

        probability("base_split_prob", self.base_split_prob)?;
        probability("fib_advance_prob", self.fib_advance_prob)?;
        probability("split_next_fib_prob", self.split_next_fib_prob)?;

        Ok(())
    }
}

fn nonzero(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::ZeroCount { field });
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field, value });
    }
    Ok(())
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::NotProbability { field, value });
    }
    Ok(())
}
