//! Per-point coloring by curvature and Fibonacci index.

use fibhelix_core::{discrete_curvature, Loop};

/// Color of both endpoints of a strip, where curvature is undefined.
pub const ENDPOINT_COLOR: [f32; 3] = [0.18, 0.18, 0.5];
/// Curvature mapped to full intensity.
const CURVATURE_FULL_SCALE: f64 = 0.6;
/// Hue shift at full curvature.
const CURVATURE_HUE_SHIFT: f64 = 0.12;

/// Color of point `idx` of `lp`.
///
/// The base hue comes from the loop's position in a table of `fib_count`
/// shells. Curvature at the point shifts the hue a little, brightens it and
/// washes out the saturation.
pub fn curvature_color(lp: &Loop, idx: usize, fib_count: usize) -> [f32; 3] {
    let points = lp.points();
    if idx == 0 || idx + 1 >= points.len() {
        return ENDPOINT_COLOR;
    }

    let k = discrete_curvature(
        Some(points[idx - 1]),
        Some(points[idx]),
        Some(points[idx + 1]),
    );
    let k_norm = (k / CURVATURE_FULL_SCALE).min(1.0);

    let base = (lp.fib_index() as f64 / fib_count.max(1) as f64) % 1.0;
    let hue = (base + CURVATURE_HUE_SHIFT * k_norm) % 1.0;
    let s = 0.6 + 0.4 * (1.0 - k_norm);
    let v = 0.6 + 0.4 * k_norm;

    let (r, g, b) = hsv_to_rgb(hue as f32, s as f32, v as f32);
    [r, g, b]
}

/// Pack an RGB triple in `[0, 1]` as opaque little-endian RGBA.
#[inline]
pub fn pack_rgba(rgb: [f32; 3]) -> u32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u32;
    let r = channel(rgb[0]);
    let g = channel(rgb[1]);
    let b = channel(rgb[2]);
    let a = 255u32;

    (a << 24) | (b << 16) | (g << 8) | r
}

/// HSV to RGB conversion.
///
/// `h` is in turns. `h == 1.0` lands in the last sector and yields the same
/// red as `h == 0.0`; values above one are not wrapped.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h * 6.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (r + m, g + m, b + m)
}
