//! Player Module
//!
//! Provides player character movement.
//!
//! # Components
//!
//! - [`PlayerMovement`] - Force-based movement relative to body yaw
//!   - Ground check, slope projection, speed clamp and ground drag
//!   - Jump with cooldown
//! - [`MovementSettings`] - Tunable values, loadable from config

pub mod movement_controller;

pub use movement_controller::{MovementSettings, PlayerMovement};
