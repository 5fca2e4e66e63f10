//! Terrain Texture Painter
//!
//! Splits the terrain into grass, dirt and rock by normalized height, with
//! steep slopes forced to rock. Runs once when the scene loads.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::world::Heightmap;

/// Layer order in every weight triple
pub const GRASS: usize = 0;
pub const DIRT: usize = 1;
pub const ROCK: usize = 2;

/// Height bands and the slope override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplatThresholds {
    /// Normalized height below which ground is grass
    pub grass_threshold: f32,
    /// Normalized height from which ground is rock
    pub rock_threshold: f32,
    /// Slopes steeper than this (degrees) get rock
    pub steep_angle: f32,
}

impl Default for SplatThresholds {
    fn default() -> Self {
        Self {
            grass_threshold: 0.3,
            rock_threshold: 0.7,
            steep_angle: 30.0,
        }
    }
}

/// Layer weights for one cell.
///
/// A cell can match more than one band (a steep lowland cell is grass and
/// rock); the matches are normalized to sum to one.
pub fn splat_weights(normalized_height: f32, steepness: f32, t: &SplatThresholds) -> [f32; 3] {
    let h = normalized_height;
    let grass = if h < t.grass_threshold { 1.0 } else { 0.0 };
    let dirt = if h >= t.grass_threshold && h < t.rock_threshold { 1.0 } else { 0.0 };
    let rock = if h >= t.rock_threshold || steepness > t.steep_angle { 1.0 } else { 0.0 };

    let total = grass + dirt + rock;
    if total > 0.0 {
        [grass / total, dirt / total, rock / total]
    } else {
        [0.0; 3]
    }
}

/// Per-cell `[grass, dirt, rock]` weights.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightRaster {
    width: usize,
    height: usize,
    weights: Vec<[f32; 3]>,
}

impl WeightRaster {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            weights: vec![[0.0; 3]; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<[f32; 3]> {
        if x < self.width && y < self.height {
            Some(self.weights[y * self.width + x])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, weights: [f32; 3]) {
        if x < self.width && y < self.height {
            self.weights[y * self.width + x] = weights;
        }
    }
}

/// Configuration of one terrain layer: the texture variants to pick from
/// (flat tints here) and how often the pattern repeats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub name: String,
    pub variants: Vec<[f32; 4]>,
    pub tile_scale: f32,
}

/// The layer actually applied, with its chosen variant.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainLayer {
    pub name: String,
    pub variant: usize,
    pub tint: [f32; 4],
    pub tile_scale: f32,
}

/// Default grass, dirt and rock layers (tile scales 3, 8, 15).
pub fn default_layers() -> [LayerConfig; 3] {
    [
        LayerConfig {
            name: "grass".to_owned(),
            variants: vec![[0.22, 0.42, 0.14, 1.0], [0.28, 0.48, 0.16, 1.0], [0.33, 0.45, 0.2, 1.0]],
            tile_scale: 3.0,
        },
        LayerConfig {
            name: "dirt".to_owned(),
            variants: vec![[0.45, 0.34, 0.22, 1.0], [0.5, 0.4, 0.27, 1.0]],
            tile_scale: 8.0,
        },
        LayerConfig {
            name: "rock".to_owned(),
            variants: vec![[0.42, 0.41, 0.4, 1.0], [0.5, 0.47, 0.44, 1.0], [0.36, 0.35, 0.37, 1.0]],
            tile_scale: 15.0,
        },
    ]
}

/// Fallback tint for a layer configured without variants
const MISSING_VARIANT_TINT: [f32; 4] = [1.0, 0.0, 1.0, 1.0];

/// Builds the terrain layers and paints the weight raster.
#[derive(Debug, Clone)]
pub struct SplatPainter {
    pub thresholds: SplatThresholds,
    pub layers: [LayerConfig; 3],
}

impl SplatPainter {
    pub fn new(thresholds: SplatThresholds, layers: [LayerConfig; 3]) -> Self {
        Self { thresholds, layers }
    }

    /// Pick one variant per layer at random.
    pub fn create_layers<R: Rng + ?Sized>(&self, rng: &mut R) -> [TerrainLayer; 3] {
        self.layers.clone().map(|config| {
            let (variant, tint) = if config.variants.is_empty() {
                log::warn!("Terrain layer '{}' has no variants", config.name);
                (0, MISSING_VARIANT_TINT)
            } else {
                let variant = rng.gen_range(0..config.variants.len());
                (variant, config.variants[variant])
            };
            TerrainLayer {
                name: config.name,
                variant,
                tint,
                tile_scale: config.tile_scale,
            }
        })
    }

    /// One weight triple per heightmap sample.
    pub fn paint(&self, heightmap: &Heightmap) -> WeightRaster {
        let mut raster = WeightRaster::new(heightmap.width(), heightmap.depth());
        for y in 0..heightmap.depth() {
            for x in 0..heightmap.width() {
                let h = heightmap.normalized_height_at_sample(x, y);
                let steepness = heightmap.steepness_at_sample(x, y);
                raster.set(x, y, splat_weights(h, steepness, &self.thresholds));
            }
        }
        log::info!("Painted {}x{} terrain weights", raster.width(), raster.height());
        raster
    }
}

impl Default for SplatPainter {
    fn default() -> Self {
        Self::new(SplatThresholds::default(), default_layers())
    }
}
