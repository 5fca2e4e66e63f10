//! Physics module
//!
//! Small hand-written physics layer for the lagoon scene. No external
//! physics library.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//! - Mass in kg
//!
//! # Submodules
//!
//! - [`body`] - Force-driven rigid body with drag and gravity
//! - [`collision`] - Ray-AABB tests, oriented boxes and trigger volumes
//! - [`probe`] - Downward ground probes used by spawning and movement

pub mod body;
pub mod collision;
pub mod probe;

pub use body::{ForceMode, GRAVITY, RigidBody};
pub use collision::{
    OrientedBox, TriggerEvent, TriggerVolume, aabb_surface_normal, ray_aabb_intersect,
};
pub use probe::{BoxGround, FlatGround, GroundHit, GroundProbe, NoGround, project_on_plane};
