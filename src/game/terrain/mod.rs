//! Terrain Module
//!
//! The procedural island: heightmap, texture painting and meshes.

pub mod generation;
pub mod painter;

use serde::{Deserialize, Serialize};

pub use generation::{
    generate_heightmap, generate_terrain_mesh, generate_water_plane, island_height_at,
    water_volume,
};
pub use painter::{
    LayerConfig, SplatPainter, SplatThresholds, TerrainLayer, WeightRaster, default_layers,
    splat_weights,
};

/// Island shape and painting parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Samples per side
    pub resolution: usize,
    /// Meters between samples
    pub cell_size: f32,
    /// Height that normalizes to 1.0
    pub max_height: f32,
    /// World height of the water surface
    pub water_level: f32,
    /// Normalized distance where the shore starts dropping into the sea
    pub island_radius: f32,
    /// Normalized radius of the sunken lagoon
    pub lagoon_radius: f32,
    /// Noise frequency per meter
    pub noise_scale: f32,
    pub octaves: u32,
    pub thresholds: SplatThresholds,
    pub layers: [LayerConfig; 3],
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            resolution: 129,
            cell_size: 2.0,
            max_height: 40.0,
            water_level: 3.0,
            island_radius: 0.45,
            lagoon_radius: 0.22,
            noise_scale: 0.02,
            octaves: 5,
            thresholds: SplatThresholds::default(),
            layers: default_layers(),
        }
    }
}
