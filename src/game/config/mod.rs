//! Config Module
//!
//! Centralized configuration for gameplay and visual parameters, loaded from
//! an optional JSON file.

pub mod game_config;
pub mod visual_config;

pub use game_config::{CameraSettings, ConfigError, GameConfig, SpawnAreaConfig};
pub use visual_config::VisualConfig;
