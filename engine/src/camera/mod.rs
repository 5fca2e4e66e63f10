//! Camera Module
//!
//! Provides camera control for the engine.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod controller;

pub use controller::{CameraController, look_rotation, yaw_forward, yaw_right};
