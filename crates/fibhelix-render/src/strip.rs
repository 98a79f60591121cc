//! Line strips handed to the graphics backend.

use fibhelix_core::{Loop, LoopId, Manifold};

use crate::color::{curvature_color, pack_rgba};
use crate::LineVertex;

/// Vertices of one loop, in growth order.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStrip {
    /// Loop the strip was built from
    pub loop_id: LoopId,
    /// Whether the loop was still growing
    pub active: bool,
    pub vertices: Vec<LineVertex>,
}

impl LineStrip {
    /// Build the strip for a single loop, or `None` if it has no points.
    pub fn from_loop(loop_id: LoopId, lp: &Loop, fib_count: usize) -> Option<Self> {
        if lp.points().is_empty() {
            return None;
        }

        let vertices = lp
            .points()
            .iter()
            .enumerate()
            .map(|(idx, &point)| {
                LineVertex::from_point(point, pack_rgba(curvature_color(lp, idx, fib_count)))
            })
            .collect();

        Some(Self {
            loop_id,
            active: lp.is_active(),
            vertices,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Raw vertex bytes, ready for a vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// One strip per loop that has points, in loop order.
///
/// Inactive loops are included; their geometry stays on screen.
pub fn build_strips(manifold: &Manifold) -> Vec<LineStrip> {
    let start = std::time::Instant::now();
    let fib_count = manifold.table().len();

    let strips: Vec<LineStrip> = manifold
        .iter()
        .filter_map(|(id, lp)| LineStrip::from_loop(id, lp, fib_count))
        .collect();

    tracing::trace!(
        strips = strips.len(),
        vertices = strips.iter().map(LineStrip::len).sum::<usize>(),
        elapsed = ?start.elapsed(),
        "built line strips"
    );
    strips
}
