//! Player Movement Controller
//!
//! Force-driven movement for the player body. Movement direction is relative
//! to the body's yaw.
//!
//! # Physics Model
//!
//! - Move force: `move_speed * 10` N along the input direction (× `air_multiplier` airborne)
//! - Horizontal speed clamped to `move_speed`
//! - Linear drag `ground_drag` while grounded, none in the air
//! - Jump: vertical velocity zeroed, then an upward impulse of `jump_force`
//!
//! # Tick Split
//!
//! - [`PlayerMovement::update`] runs once per frame: timers, ground check,
//!   input, speed clamp and drag.
//! - [`PlayerMovement::fixed_update`] runs at the physics rate: move force,
//!   integration and ground contact.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lagoon_engine::player::{PlayerMovement, MovementSettings};
//! use glam::{Vec2, Vec3};
//!
//! let mut player = PlayerMovement::new(Vec3::new(0.0, 5.0, 0.0), MovementSettings::default());
//!
//! // Each frame:
//! player.update(dt, frame.move_input, &terrain);
//! if frame.triggered(InputAction::Jump) {
//!     player.jump();
//! }
//! // Each physics tick:
//! player.fixed_update(1.0 / 50.0, &terrain);
//! ```

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::{yaw_forward, yaw_right};
use crate::clock::DelayedQueue;
use crate::physics::{ForceMode, GroundProbe, RigidBody, project_on_plane};

/// Multiplier from move speed to move force
const FORCE_SCALE: f32 = 10.0;

/// Extra reach below the feet for the grounded check (meters)
const GROUND_CHECK_MARGIN: f32 = 0.2;

/// Extra reach below the feet for the slope probe (meters)
const SLOPE_CHECK_MARGIN: f32 = 0.3;

/// Tunable movement values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    /// Target horizontal speed in m/s
    pub move_speed: f32,
    /// Linear drag while grounded
    pub ground_drag: f32,
    /// Upward impulse applied on jump
    pub jump_force: f32,
    /// Seconds before another jump is allowed
    pub jump_cooldown: f32,
    /// Force multiplier while airborne
    pub air_multiplier: f32,
    /// Capsule height; the body center sits at half this above the ground
    pub player_height: f32,
    /// Radius of the grounded check
    pub ground_check_radius: f32,
    /// Slopes steeper than this (degrees) are not walked along
    pub max_slope_angle: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            ground_drag: 5.0,
            jump_force: 5.0,
            jump_cooldown: 0.25,
            air_multiplier: 0.4,
            player_height: 2.0,
            ground_check_radius: 0.2,
            max_slope_angle: 45.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerTimer {
    ResetJump,
}

/// Player movement controller.
#[derive(Debug, Clone)]
pub struct PlayerMovement {
    pub settings: MovementSettings,
    /// The simulated body (center of the capsule)
    pub body: RigidBody,
    /// Body facing in degrees; 0 looks down -Z, positive turns right
    pub yaw_degrees: f32,
    /// Whether input is read. A disabled controller still falls.
    pub enabled: bool,
    move_input: Vec2,
    grounded: bool,
    can_jump: bool,
    timers: DelayedQueue<PlayerTimer>,
}

impl PlayerMovement {
    pub fn new(position: Vec3, settings: MovementSettings) -> Self {
        let mut body = RigidBody::new(position);
        body.drag = 0.0;
        Self {
            settings,
            body,
            yaw_degrees: 0.0,
            enabled: true,
            move_input: Vec2::ZERO,
            grounded: false,
            can_jump: true,
            timers: DelayedQueue::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    #[inline]
    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    /// Move input read on the last frame update.
    #[inline]
    pub fn move_input(&self) -> Vec2 {
        self.move_input
    }

    /// Enable or disable input. Disabling drops any held input.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.move_input = Vec2::ZERO;
        }
    }

    /// Place the body somewhere and stop it.
    pub fn teleport(&mut self, position: Vec3) {
        self.body.position = position;
        self.body.halt();
    }

    /// Per-frame step.
    pub fn update(&mut self, dt: f32, move_input: Vec2, ground: &dyn GroundProbe) {
        for timer in self.timers.advance(dt) {
            match timer {
                PlayerTimer::ResetJump => self.can_jump = true,
            }
        }

        self.check_grounded(ground);
        self.move_input = if self.enabled { move_input } else { Vec2::ZERO };
        self.speed_control();

        self.body.drag = if self.grounded {
            self.settings.ground_drag
        } else {
            0.0
        };
    }

    /// Physics-rate step: apply move force, integrate, resolve ground contact.
    pub fn fixed_update(&mut self, dt: f32, ground: &dyn GroundProbe) {
        let direction = self.move_direction(ground);
        let mut force = direction.normalize_or_zero() * self.settings.move_speed * FORCE_SCALE;
        if !self.grounded {
            force *= self.settings.air_multiplier;
        }
        self.body.add_force(force, ForceMode::Force);
        self.body.integrate(dt);
        self.resolve_ground_contact(ground);
    }

    /// Try to jump. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.enabled || !self.grounded || !self.can_jump {
            return false;
        }
        self.can_jump = false;
        self.body.velocity.y = 0.0;
        self.body
            .add_force(Vec3::Y * self.settings.jump_force, ForceMode::Impulse);
        self.timers
            .schedule(self.settings.jump_cooldown, PlayerTimer::ResetJump);
        true
    }

    /// World-space move direction for the current input, projected onto the
    /// ground slope when standing on walkable ground. Not normalized.
    pub fn move_direction(&self, ground: &dyn GroundProbe) -> Vec3 {
        let direction = yaw_forward(self.yaw_degrees) * self.move_input.y
            + yaw_right(self.yaw_degrees) * self.move_input.x;

        if self.grounded {
            let reach = self.settings.player_height * 0.5 + SLOPE_CHECK_MARGIN;
            if let Some(hit) = ground.probe_down(self.body.position, reach) {
                if hit.slope_degrees() < self.settings.max_slope_angle {
                    return project_on_plane(direction, hit.normal);
                }
            }
        }
        direction
    }

    fn check_grounded(&mut self, ground: &dyn GroundProbe) {
        let reach = self.settings.player_height * 0.5 + GROUND_CHECK_MARGIN;
        self.grounded = ground
            .probe_down_wide(self.body.position, self.settings.ground_check_radius, reach)
            .is_some();
    }

    fn speed_control(&mut self) {
        let flat = self.body.flat_velocity();
        if flat.length() > self.settings.move_speed {
            self.body
                .set_flat_velocity(flat.normalize() * self.settings.move_speed);
        }
    }

    fn resolve_ground_contact(&mut self, ground: &dyn GroundProbe) {
        let half = self.settings.player_height * 0.5;
        // Probe from the top of the capsule so a body that sank into the
        // ground this step still finds it
        let top = self.body.position + Vec3::Y * half;
        if let Some(hit) = ground.probe_down(top, self.settings.player_height + half) {
            let feet = self.body.position.y - half;
            if feet < hit.point.y {
                self.body.position.y = hit.point.y + half;
                if self.body.velocity.y < 0.0 {
                    self.body.velocity.y = 0.0;
                }
            }
        }
    }
}
