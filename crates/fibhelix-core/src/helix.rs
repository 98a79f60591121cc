//! Fibonacci-modulated helix point generator.
//!
//! A loop's position at step `t` of cycle `c` is a pure function of
//! `(t, c, HelixParams)`: no clock, no shared generator state. Larger Fibonacci
//! values widen the radius, steepen the pitch and compress the effective cycle,
//! so loops on higher indices wind tighter and climb faster.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec3;

use crate::config::ManifoldConfig;
use crate::fibonacci::FibonacciTable;

/// Relative amplitude of the radius wobble.
const RADIUS_WOBBLE: f64 = 0.06;
/// Step frequency of the radius wobble.
const RADIUS_WOBBLE_FREQ: f64 = 0.12;
/// Amplitude of the vertical sway.
const SWAY_AMP: f64 = 6.0;
/// Phase of the sway per unit of normalised Fibonacci value.
#[allow(clippy::approx_constant)]
const SWAY_FIB_PHASE: f64 = 3.14;
/// Step frequency of the orthogonal jitter.
const JITTER_FREQ: f64 = 0.23;
/// Jitter floor for the lowest Fibonacci values.
const JITTER_FLOOR: f64 = 0.2;

/// Per-loop inputs to the helix law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixParams {
    pub phase: f64,
    pub fib_value: f64,
    pub radius_offset: f64,
    pub pitch_offset: f64,
    pub identity: u32,
}

/// Shared constants of the helix law, fixed for the manifold's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct HelixGenerator {
    cycle_length: f64,
    loop_growth_z: f64,
    base_radius: f64,
    fib_max: f64,
    fib_radius_scale: f64,
    fib_pitch_scale: f64,
    fib_ang_freq_base: f64,
    fib_ang_freq_scale: f64,
    noise_amp: f64,
}

impl HelixGenerator {
    pub fn new(config: &ManifoldConfig, table: &FibonacciTable) -> Self {
        Self {
            cycle_length: f64::from(config.cycle_length),
            loop_growth_z: config.loop_growth_z,
            base_radius: config.base_radius,
            fib_max: table.max(),
            fib_radius_scale: config.fib_radius_scale,
            fib_pitch_scale: config.fib_pitch_scale,
            fib_ang_freq_base: config.fib_ang_freq_base,
            fib_ang_freq_scale: config.fib_ang_freq_scale,
            noise_amp: config.helix_noise_amp,
        }
    }

    /// Fibonacci value scaled into `[0, 1]` by the table maximum.
    #[inline]
    pub fn fib_norm(&self, fib_value: f64) -> f64 {
        fib_value / (self.fib_max + 1e-9)
    }

    /// Angular position in radians.
    pub fn angle(&self, t: u32, params: &HelixParams) -> f64 {
        let freq = self.fib_ang_freq_base + params.fib_value * self.fib_ang_freq_scale;
        f64::from(t) * (TAU / (self.cycle_length / freq)) + params.phase
    }

    /// Vertical rise per step.
    pub fn pitch(&self, params: &HelixParams) -> f64 {
        let fib_norm = self.fib_norm(params.fib_value);
        1.0 + fib_norm * self.fib_pitch_scale * params.fib_value + params.pitch_offset
    }

    /// Position at step `t` of completed cycle `cycle`.
    pub fn point(&self, t: u32, cycle: u64, params: &HelixParams) -> DVec3 {
        let t_f = f64::from(t);
        let fib_norm = self.fib_norm(params.fib_value);
        let ang = self.angle(t, params);

        let base_radius =
            self.base_radius + self.fib_radius_scale * params.fib_value + params.radius_offset;
        let wobble_phase = f64::from(params.identity % 17);
        let wobble = RADIUS_WOBBLE * (t_f * RADIUS_WOBBLE_FREQ + wobble_phase).sin();
        let radius = base_radius * (1.0 + wobble);

        let z = cycle as f64 * self.loop_growth_z
            + t_f * self.pitch(params)
            + SWAY_AMP * (2.0 * ang + fib_norm * SWAY_FIB_PHASE).sin();

        let (sin, cos) = ang.sin_cos();
        let mut x = radius * cos;
        let mut y = radius * sin;

        // jitter runs along the tangent of the circle, perpendicular to the radius
        let (jitter_sin, jitter_cos) = (ang + FRAC_PI_2).sin_cos();
        let jitter_phase = f64::from(params.identity % 31);
        let jitter = (t_f * JITTER_FREQ + jitter_phase).sin()
            * self.noise_amp
            * (JITTER_FLOOR + (1.0 - JITTER_FLOOR) * fib_norm);
        x += jitter_cos * jitter;
        y += jitter_sin * jitter;

        DVec3::new(x, y, z)
    }
}
