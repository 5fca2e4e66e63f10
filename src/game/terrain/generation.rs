//! Terrain Generation
//!
//! The island heightmap, its colored mesh and the lagoon water surface.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::TerrainSettings;
use super::painter::{TerrainLayer, WeightRaster};
use crate::game::types::{Mesh, Vertex, fbm_noise, noise_2d, smooth_step};
use crate::physics::OrientedBox;
use crate::world::Heightmap;

/// Depth of the water trigger volume below the surface
const WATER_VOLUME_DEPTH: f32 = 200.0;

/// Island height at a world XZ.
///
/// Radial falloff to the sea, a sunken lagoon in the middle and fbm hills in
/// between. `offset` shifts the noise field so each seed gives a new island.
pub fn island_height_at(x: f32, z: f32, settings: &TerrainSettings, offset: Vec2) -> f32 {
    let half_extent = (settings.resolution.max(2) - 1) as f32 * settings.cell_size * 0.5;
    let d = Vec2::new(x, z).length() / half_extent.max(1e-3);

    let shore = 1.0 - smooth_step(settings.island_radius, 0.95, d);
    let lagoon = smooth_step(0.0, settings.lagoon_radius, d);
    let hills = fbm_noise(
        x * settings.noise_scale + offset.x,
        z * settings.noise_scale + offset.y,
        settings.octaves,
    );

    settings.max_height * shore * (0.35 + 0.65 * hills) * (0.05 + 0.95 * lagoon)
}

/// Heightmap centered on the world origin.
pub fn generate_heightmap<R: Rng + ?Sized>(settings: &TerrainSettings, rng: &mut R) -> Heightmap {
    let offset = Vec2::new(rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0));
    let n = settings.resolution.max(2);
    let half = (n - 1) as f32 * settings.cell_size * 0.5;
    let origin = Vec2::splat(-half);

    let heightmap = Heightmap::from_fn(n, n, settings.cell_size, origin, settings.max_height, |x, z| {
        let p = origin + Vec2::new(x as f32, z as f32) * settings.cell_size;
        island_height_at(p.x, p.y, settings, offset)
    });
    log::info!("Generated {n}x{n} island heightmap");
    heightmap
}

/// Mix the three layer tints by weight, with a tiling pattern per layer.
fn splat_color(weights: [f32; 3], layers: &[TerrainLayer; 3], position: Vec2) -> [f32; 4] {
    let mut color = [0.0, 0.0, 0.0, 1.0];
    for (weight, layer) in weights.iter().zip(layers.iter()) {
        if *weight <= 0.0 {
            continue;
        }
        let p = position / layer.tile_scale.max(1e-3);
        let pattern = 0.85 + 0.3 * noise_2d(p.x, p.y);
        for c in 0..3 {
            color[c] += layer.tint[c] * pattern * weight;
        }
    }
    color
}

/// Terrain grid mesh colored from the painted weights.
pub fn generate_terrain_mesh(
    heightmap: &Heightmap,
    raster: &WeightRaster,
    layers: &[TerrainLayer; 3],
) -> Mesh {
    let width = heightmap.width();
    let depth = heightmap.depth();
    let mut vertices = Vec::with_capacity(width * depth);
    let mut indices = Vec::with_capacity((width - 1) * (depth - 1) * 6);

    for z in 0..depth {
        for x in 0..width {
            let p = heightmap.sample_position(x, z);
            let h = heightmap.height_at_sample(x, z);
            let normal = heightmap.normal_at(p.x, p.y);
            let weights = raster.get(x, z).unwrap_or([1.0, 0.0, 0.0]);
            vertices.push(Vertex {
                position: [p.x, h, p.y],
                normal: normal.to_array(),
                color: splat_color(weights, layers, p),
            });
        }
    }

    let w = width as u32;
    for z in 0..depth as u32 - 1 {
        for x in 0..w - 1 {
            let i00 = z * w + x;
            let i10 = z * w + x + 1;
            let i01 = (z + 1) * w + x;
            let i11 = (z + 1) * w + x + 1;
            indices.extend_from_slice(&[i00, i01, i10, i10, i01, i11]);
        }
    }

    Mesh { vertices, indices }
}

/// Flat translucent water surface over the whole terrain.
pub fn generate_water_plane(heightmap: &Heightmap, water_level: f32, color: [f32; 4]) -> Mesh {
    let subdivisions = 32u32;
    let grid_count = subdivisions + 1;
    let origin = heightmap.origin();
    let step = heightmap.size() / subdivisions as f32;
    let normal = [0.0, 1.0, 0.0];

    let mut vertices = Vec::with_capacity((grid_count * grid_count) as usize);
    let mut indices = Vec::with_capacity((subdivisions * subdivisions * 6) as usize);

    for gz in 0..grid_count {
        for gx in 0..grid_count {
            let x = origin.x + gx as f32 * step.x;
            let z = origin.y + gz as f32 * step.y;
            vertices.push(Vertex {
                position: [x, water_level, z],
                normal,
                color,
            });
        }
    }

    for gz in 0..subdivisions {
        for gx in 0..subdivisions {
            let i00 = gz * grid_count + gx;
            let i10 = gz * grid_count + gx + 1;
            let i01 = (gz + 1) * grid_count + gx;
            let i11 = (gz + 1) * grid_count + gx + 1;
            indices.extend_from_slice(&[i00, i01, i10, i10, i01, i11]);
        }
    }

    Mesh { vertices, indices }
}

/// Trigger volume filling everything below the water surface.
pub fn water_volume(heightmap: &Heightmap, water_level: f32) -> OrientedBox {
    let origin = heightmap.origin();
    let size = heightmap.size();
    OrientedBox::from_min_max(
        Vec3::new(origin.x, water_level - WATER_VOLUME_DEPTH, origin.y),
        Vec3::new(origin.x + size.x, water_level, origin.y + size.y),
    )
}
