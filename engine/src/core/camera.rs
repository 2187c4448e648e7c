//! Camera and projection utilities
//!
//! Provides a free-flying look-at camera and the perspective projection used
//! by both pipelines.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Anything that can produce a view matrix
pub trait Camera {
    /// World to view space transform
    fn view_matrix(&self) -> Mat4;
}

/// Camera defined by a position and a viewing direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleCamera {
    pub position: Vec3,
    /// Viewing direction, kept unit length by the movement helpers
    pub direction: Vec3,
    pub up: Vec3,
}

impl SimpleCamera {
    pub fn new(position: Vec3, direction: Vec3, up: Vec3) -> Self {
        Self {
            position,
            direction: direction.normalize(),
            up,
        }
    }

    /// Horizontal unit vector pointing to the right of the view
    pub fn right(&self) -> Vec3 {
        self.direction.cross(self.up).normalize_or_zero()
    }

    /// Move sideways, positive to the right
    pub fn strafe(&mut self, amount: f32) {
        self.position += self.right() * amount;
    }

    /// Move along the viewing direction
    pub fn advance(&mut self, amount: f32) {
        self.position += self.direction * amount;
    }

    /// Move along the up vector
    pub fn rise(&mut self, amount: f32) {
        self.position += self.up * amount;
    }

    /// Mouse look: yaw about `up`, then pitch about `up × direction`
    ///
    /// Positive `dx` turns right and positive `dy` looks down, matching window
    /// coordinates.
    pub fn look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        let up = self.up.normalize_or_zero();
        if up == Vec3::ZERO {
            return;
        }

        let yaw = Quat::from_axis_angle(up, -dx * sensitivity);
        let mut direction = yaw * self.direction;

        let pitch_axis = up.cross(direction);
        if pitch_axis.length_squared() > f32::EPSILON {
            let pitch = Quat::from_axis_angle(pitch_axis.normalize(), dy * sensitivity);
            let pitched = pitch * direction;
            let before = direction.cross(up);
            let after = pitched.cross(up);
            // Pitching onto or over the pole would flip the view
            if after.dot(before) > 0.0 && after.length_squared() > 1e-4 {
                direction = pitched;
            }
        }

        self.direction = direction.normalize();
    }
}

impl Camera for SimpleCamera {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.direction, self.up)
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov_y_radians: f32,
    /// Near clipping plane distance
    pub z_near: f32,
    /// Far clipping plane distance
    pub z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_radians: std::f32::consts::PI / 3.0,
            z_near: 0.1,
            z_far: 1024.0,
        }
    }
}

impl Projection {
    /// Create a projection from a field of view in degrees
    pub fn from_degrees(fov_y_degrees: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y_radians: fov_y_degrees.to_radians(),
            z_near,
            z_far,
        }
    }

    /// Calculate the projection matrix for a target aspect ratio
    pub fn matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_radians, aspect_ratio, self.z_near, self.z_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn test_view_matrix_moves_camera_to_origin() {
        let camera = SimpleCamera::new(Vec3::new(2.0, -1.0, 1.0), Vec3::NEG_Z, Vec3::Y);
        let view = camera.view_matrix();
        assert!(approx_eq(view.transform_point3(camera.position), Vec3::ZERO));
        // Looking down -Z keeps points in front on the -Z axis
        let ahead = camera.position + Vec3::NEG_Z * 3.0;
        assert!(approx_eq(view.transform_point3(ahead), Vec3::new(0.0, 0.0, -3.0)));
    }

    #[test]
    fn test_movement_helpers() {
        let mut camera = SimpleCamera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        camera.strafe(2.0);
        assert!(approx_eq(camera.position, Vec3::new(2.0, 0.0, 0.0)));
        camera.advance(1.0);
        assert!(approx_eq(camera.position, Vec3::new(2.0, 0.0, -1.0)));
        camera.rise(-0.5);
        assert!(approx_eq(camera.position, Vec3::new(2.0, -0.5, -1.0)));
    }

    #[test]
    fn test_look_turns_right_and_down() {
        let mut camera = SimpleCamera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        camera.look(100.0, 0.0, 0.001);
        assert!(camera.direction.x > 0.0);
        assert!((camera.direction.length() - 1.0).abs() < 1e-5);

        let mut camera = SimpleCamera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        camera.look(0.0, 100.0, 0.001);
        assert!(camera.direction.y < 0.0);
    }

    #[test]
    fn test_look_never_reaches_the_pole() {
        let mut camera = SimpleCamera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        for _ in 0..100 {
            camera.look(0.0, -100.0, 0.01);
        }
        assert!(camera.direction.cross(camera.up).length_squared() > 1e-4);
    }

    #[test]
    fn test_default_projection() {
        let projection = Projection::default();
        let proj = projection.matrix(16.0 / 9.0);
        // Perspective projection has w=0 in the last row
        assert_eq!(proj.w_axis.w, 0.0);
        assert!(proj.z_axis.z < 0.0);
        assert_eq!(projection.z_far, 1024.0);
    }
}
