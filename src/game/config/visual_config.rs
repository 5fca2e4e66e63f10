//! Visual Configuration
//!
//! Surface atmosphere settings (fog, sun, ambient) and the palette used for
//! the island, water and props. Underwater fog lives with the underwater
//! effect; these are the values it blends back to.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::render::FogMode;

/// Visual atmosphere configuration for the lagoon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    // Fog
    /// Surface fog color (RGBA, linear space)
    pub fog_color: [f32; 4],
    /// Exponential fog density
    pub fog_density: f32,
    /// Linear fog start distance
    pub fog_start: f32,
    /// Linear fog end distance
    pub fog_end: f32,
    /// Fog falloff curve
    pub fog_mode: FogMode,

    // Directional light (sun)
    /// Direction towards the sun (normalized on use)
    pub sun_direction: Vec3,
    /// Ambient light intensity (0.0 = pitch black, 1.0 = full)
    pub ambient_intensity: f32,

    // Palette
    /// Water surface color (RGBA, translucent)
    pub water_color: [f32; 4],
    /// Collectible color
    pub collectible_color: [f32; 4],
    /// Player body color
    pub player_color: [f32; 4],
    /// Quest giver color
    pub quest_giver_color: [f32; 4],
}

impl Default for VisualConfig {
    /// Returns a clear tropical afternoon: thin blue-grey haze, high sun.
    fn default() -> Self {
        Self {
            fog_color: [0.55, 0.7, 0.85, 1.0],
            fog_density: 0.01,
            fog_start: 0.0,
            fog_end: 300.0,
            fog_mode: FogMode::Exponential,

            sun_direction: Vec3::new(0.4, 0.8, 0.3),
            ambient_intensity: 0.35,

            water_color: [0.3, 0.65, 0.6, 0.85],
            collectible_color: [1.0, 0.82, 0.2, 1.0],
            player_color: [0.2, 0.45, 0.9, 1.0],
            quest_giver_color: [0.85, 0.35, 0.25, 1.0],
        }
    }
}
