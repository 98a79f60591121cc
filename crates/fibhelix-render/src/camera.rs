//! Follow camera that trails the highest growing tip.

use glam::{Mat4, Vec3};

/// Camera that eases toward a fixed distance above the highest active tip.
///
/// Drag input pans and orbits, wheel input zooms. The resulting view is a
/// translation by `(-pan_x, -pan_y, -camera_z)` followed by rotations about
/// X then Y.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowCamera {
    /// Distance kept above the followed tip
    pub distance: f64,
    /// Fraction of the remaining gap closed per update
    pub lerp: f64,
    /// Distance change per wheel step
    pub zoom_step: f64,
    /// Pan per pixel of drag
    pub pan_speed: f32,
    /// Degrees of orbit per pixel of drag
    pub orbit_speed: f32,

    camera_z: f64,
    pan_x: f32,
    pan_y: f32,
    rotation_x: f32,
    rotation_y: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            distance: 900.0,
            lerp: 0.06,
            zoom_step: 30.0,
            pan_speed: 0.6,
            orbit_speed: 0.28,
            camera_z: 0.0,
            pan_x: 0.0,
            pan_y: 0.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
        }
    }
}

impl FollowCamera {
    pub fn new(distance: f64) -> Self {
        Self {
            distance,
            ..Default::default()
        }
    }

    /// Ease toward `tip_z + distance`.
    ///
    /// With no active tip the camera follows height zero.
    pub fn update(&mut self, tip_z: Option<f64>) {
        let target = tip_z.unwrap_or(0.0) + self.distance;
        self.camera_z += (target - self.camera_z) * self.lerp;
    }

    /// Apply wheel steps; scrolling up moves closer.
    pub fn zoom(&mut self, wheel_steps: f64) {
        self.distance -= wheel_steps * self.zoom_step;
    }

    /// Pan by a drag of `(dx, dy)` pixels.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx * self.pan_speed;
        self.pan_y -= dy * self.pan_speed;
    }

    /// Orbit by a drag of `(dx, dy)` pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.rotation_y += dx * self.orbit_speed;
        self.rotation_x += dy * self.orbit_speed;
    }

    #[inline]
    pub fn camera_z(&self) -> f64 {
        self.camera_z
    }

    /// Offset applied to the scene before rotation.
    pub fn translation(&self) -> Vec3 {
        Vec3::new(-self.pan_x, -self.pan_y, -self.camera_z as f32)
    }

    /// Model-view transform for the current state.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation())
            * Mat4::from_rotation_x(self.rotation_x.to_radians())
            * Mat4::from_rotation_y(self.rotation_y.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_moves_six_percent() {
        let mut camera = FollowCamera::default();
        camera.update(Some(100.0));
        assert!((camera.camera_z() - 1000.0 * 0.06).abs() < 1e-9);
    }

    #[test]
    fn converges_on_a_still_tip() {
        let mut camera = FollowCamera::default();
        for _ in 0..1_000 {
            camera.update(Some(250.0));
        }
        assert!((camera.camera_z() - 1150.0).abs() < 1e-6);
        assert!((camera.translation().z + 1150.0).abs() < 1e-3);
    }

    #[test]
    fn no_tip_follows_ground() {
        let mut camera = FollowCamera::new(100.0);
        for _ in 0..1_000 {
            camera.update(None);
        }
        assert!((camera.camera_z() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn wheel_changes_distance() {
        let mut camera = FollowCamera::default();
        camera.zoom(2.0);
        assert_eq!(camera.distance, 840.0);
        camera.zoom(-1.0);
        assert_eq!(camera.distance, 870.0);
    }

    #[test]
    fn pan_flips_vertical_drag() {
        let mut camera = FollowCamera::default();
        camera.pan(10.0, 10.0);
        let t = camera.translation();
        assert!((t.x + 6.0).abs() < 1e-6);
        assert!((t.y - 6.0).abs() < 1e-6);
    }

    #[test]
    fn unrotated_view_is_pure_translation() {
        let mut camera = FollowCamera::default();
        camera.update(Some(0.0));
        let view = camera.view_matrix();
        let origin = view.transform_point3(Vec3::ZERO);
        assert!((origin - camera.translation()).length() < 1e-4);
    }
}
