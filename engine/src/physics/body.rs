//! Rigid body integration
//!
//! A single dynamic body driven by forces, used for the player capsule.
//! Rotation is frozen; only translation is simulated.
//!
//! # Example
//!
//! ```ignore
//! use lagoon_engine::physics::{ForceMode, RigidBody};
//! use glam::Vec3;
//!
//! let mut body = RigidBody::new(Vec3::new(0.0, 5.0, 0.0));
//! body.add_force(Vec3::new(50.0, 0.0, 0.0), ForceMode::Force);
//! body.integrate(1.0 / 50.0);
//! ```

use glam::Vec3;

/// Standard gravity (m/s²)
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// How a force passed to [`RigidBody::add_force`] is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous force, accumulated and applied over the next step
    Force,
    /// Instant change in momentum
    Impulse,
}

/// A translating body with linear drag.
#[derive(Debug, Clone, Copy)]
pub struct RigidBody {
    /// Position of the body's center (meters)
    pub position: Vec3,
    /// Linear velocity (m/s)
    pub velocity: Vec3,
    /// Mass (kg)
    pub mass: f32,
    /// Linear drag; velocity is scaled by `1 - drag * dt` each step
    pub drag: f32,
    /// Whether gravity is applied
    pub use_gravity: bool,
    /// Forces accumulated since the last step
    accumulated_force: Vec3,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            mass: 1.0,
            drag: 0.0,
            use_gravity: true,
            accumulated_force: Vec3::ZERO,
        }
    }
}

impl RigidBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Apply a force or impulse.
    pub fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Force => self.accumulated_force += force,
            ForceMode::Impulse => self.velocity += force / self.mass.max(0.001),
        }
    }

    /// Forces waiting for the next step.
    pub fn pending_force(&self) -> Vec3 {
        self.accumulated_force
    }

    /// Advance one fixed step with semi-implicit Euler.
    pub fn integrate(&mut self, dt: f32) {
        let mut acceleration = self.accumulated_force / self.mass.max(0.001);
        if self.use_gravity {
            acceleration += GRAVITY;
        }
        self.accumulated_force = Vec3::ZERO;

        self.velocity += acceleration * dt;
        self.velocity *= (1.0 - self.drag * dt).max(0.0);
        self.position += self.velocity * dt;
    }

    /// Horizontal (XZ) part of the velocity.
    #[inline]
    pub fn flat_velocity(&self) -> Vec3 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z)
    }

    /// Replace the horizontal velocity, keeping the vertical component.
    #[inline]
    pub fn set_flat_velocity(&mut self, flat: Vec3) {
        self.velocity.x = flat.x;
        self.velocity.z = flat.z;
    }

    /// Stop all motion and drop pending forces.
    pub fn halt(&mut self) {
        self.velocity = Vec3::ZERO;
        self.accumulated_force = Vec3::ZERO;
    }
}
