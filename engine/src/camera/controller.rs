//! Camera Controller Module
//!
//! Mouse-look camera that rides on the player body. Look input pitches the
//! camera and yaws the body; the camera then sits at eye height with a short
//! over-the-shoulder offset.
//!
//! Key features:
//! - Sensitivity in degrees per input unit (default: 0.1)
//! - Pitch clamped to ±90 degrees
//! - Disabled controller ignores look input entirely
//!
//! ## Coordinate System
//! - +X = right
//! - +Y = up
//! - -Z = forward (yaw = 0)
//!
//! Positive yaw turns right; positive pitch looks up.

use glam::{Mat4, Quat, Vec2, Vec3};

/// Pitch limit in degrees
const PITCH_LIMIT_DEG: f32 = 90.0;

/// Forward direction on the XZ plane for a body yaw (degrees).
#[inline]
pub fn yaw_forward(yaw_degrees: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    Vec3::new(yaw.sin(), 0.0, -yaw.cos())
}

/// Right direction on the XZ plane for a body yaw (degrees).
#[inline]
pub fn yaw_right(yaw_degrees: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    Vec3::new(yaw.cos(), 0.0, yaw.sin())
}

/// Rotation for a body yaw and camera pitch, both in degrees.
#[inline]
pub fn look_rotation(yaw_degrees: f32, pitch_degrees: f32) -> Quat {
    Quat::from_rotation_y(-yaw_degrees.to_radians())
        * Quat::from_rotation_x(pitch_degrees.to_radians())
}

/// Camera controller state
///
/// ## Usage
/// ```rust,ignore
/// let mut camera = CameraController::new();
///
/// // Once per frame, with the frame's look delta
/// camera.apply_look(frame.look_delta, &mut player.yaw_degrees);
///
/// let view = camera.view_matrix(player.position(), player.yaw_degrees);
/// let proj = camera.projection_matrix(width as f32 / height as f32);
/// ```
#[derive(Clone, Debug)]
pub struct CameraController {
    /// Horizontal sensitivity (degrees per input unit)
    pub sensitivity_x: f32,
    /// Vertical sensitivity (degrees per input unit)
    pub sensitivity_y: f32,
    /// Camera pitch in degrees, clamped to ±90
    pitch: f32,
    /// Whether look input is applied
    pub enabled: bool,
    /// Pivot height above the body center (meters)
    pub eye_height: f32,
    /// Camera offset from the pivot in look space: x = right, y = up, z = back
    pub follow_offset: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane distance
    pub near: f32,
    /// Far clip plane distance
    pub far: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            sensitivity_x: 0.1,
            sensitivity_y: 0.1,
            pitch: 0.0,
            enabled: true,
            eye_height: 0.6,
            follow_offset: Vec3::new(0.6, 0.3, 3.5),
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraController {
    /// Create a new camera controller with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera controller with custom sensitivity (degrees per unit)
    pub fn with_sensitivity(sensitivity: f32) -> Self {
        Self {
            sensitivity_x: sensitivity,
            sensitivity_y: sensitivity,
            ..Default::default()
        }
    }

    /// Current pitch in degrees
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set the pitch directly (degrees, clamped to limits)
    #[inline]
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
    }

    /// Apply one frame of look input.
    ///
    /// `look.x` yaws the body (positive = turn right), `look.y` pitches the
    /// camera (positive = look down, matching screen-space mouse motion).
    pub fn apply_look(&mut self, look: Vec2, body_yaw_degrees: &mut f32) {
        if !self.enabled {
            return;
        }
        self.set_pitch(self.pitch - look.y * self.sensitivity_y);
        *body_yaw_degrees = (*body_yaw_degrees + look.x * self.sensitivity_x).rem_euclid(360.0);
    }

    /// Orientation of the camera for the given body yaw.
    #[inline]
    pub fn rotation(&self, body_yaw_degrees: f32) -> Quat {
        look_rotation(body_yaw_degrees, self.pitch)
    }

    /// Direction the camera is looking.
    #[inline]
    pub fn forward(&self, body_yaw_degrees: f32) -> Vec3 {
        self.rotation(body_yaw_degrees) * Vec3::NEG_Z
    }

    /// World-space camera position for a body at `body_position`.
    pub fn eye_position(&self, body_position: Vec3, body_yaw_degrees: f32) -> Vec3 {
        let pivot = body_position + Vec3::Y * self.eye_height;
        pivot + self.rotation(body_yaw_degrees) * self.follow_offset
    }

    /// World-to-view matrix.
    pub fn view_matrix(&self, body_position: Vec3, body_yaw_degrees: f32) -> Mat4 {
        let eye = self.eye_position(body_position, body_yaw_degrees);
        Mat4::from_rotation_translation(self.rotation(body_yaw_degrees), eye).inverse()
    }

    /// Perspective projection (right-handed, depth 0..1).
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            aspect.max(1e-3),
            self.near,
            self.far,
        )
    }

    /// Combined view-projection matrix.
    pub fn view_projection(&self, body_position: Vec3, body_yaw_degrees: f32, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix(body_position, body_yaw_degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_basis_is_orthonormal() {
        for yaw in [0.0, 37.0, 90.0, 215.0] {
            let f = yaw_forward(yaw);
            let r = yaw_right(yaw);
            assert!(f.dot(r).abs() < 1e-5);
            assert!((f.length() - 1.0).abs() < 1e-5);
            // Right-handed: right × forward = up
            assert!((r.cross(f) - Vec3::Y).length() < 1e-4);
        }
    }

    #[test]
    fn test_look_rotation_matches_yaw_forward() {
        let q = look_rotation(30.0, 0.0);
        assert!((q * Vec3::NEG_Z - yaw_forward(30.0)).length() < 1e-5);
    }

    #[test]
    fn test_pitch_up_looks_up() {
        let q = look_rotation(0.0, 45.0);
        assert!((q * Vec3::NEG_Z).y > 0.5);
    }
}
