//! Discrete curvature estimate over three consecutive points.

use glam::DVec3;

/// Guard added to the mean segment length.
const SEGMENT_EPSILON: f64 = 1e-6;

/// Guard added to the squared mean segment length.
const DENOMINATOR_EPSILON: f64 = 1e-12;

/// Curvature magnitude at `curr` given its neighbours.
///
/// Returns `0.0` when any of the three points is missing, so it can be fed
/// straight from a history shorter than three points. Otherwise:
///
/// ```text
/// kappa = |next - 2 curr + prev| / (mean_segment_len^2 + eps)
/// ```
///
/// Duplicate points are safe; the epsilons keep the denominator positive.
pub fn discrete_curvature(prev: Option<DVec3>, curr: Option<DVec3>, next: Option<DVec3>) -> f64 {
    let (Some(prev), Some(curr), Some(next)) = (prev, curr, next) else {
        return 0.0;
    };

    let second = next - 2.0 * curr + prev;
    let step_len = (curr.distance(prev) + next.distance(curr)) * 0.5 + SEGMENT_EPSILON;
    second.length() / (step_len * step_len + DENOMINATOR_EPSILON)
}

/// Curvature at `points[index]`, zero at either end of the slice.
pub fn curvature_at(points: &[DVec3], index: usize) -> f64 {
    if index == 0 || index + 1 >= points.len() {
        return 0.0;
    }
    discrete_curvature(
        Some(points[index - 1]),
        Some(points[index]),
        Some(points[index + 1]),
    )
}
