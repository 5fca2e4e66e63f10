//! Shared Types Module
//!
//! Mesh structures, value noise and mesh primitives shared by the terrain
//! builder and the per-frame scene mesh.

use glam::{Quat, Vec3};

use crate::render::MeshVertex;

/// Vertex for terrain and objects
pub type Vertex = MeshVertex;

// ============================================================================
// MESH STRUCTURE
// ============================================================================

/// A mesh with vertices and indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, other: &Mesh) {
        let base_idx = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base_idx));
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

// ============================================================================
// PROCEDURAL NOISE FUNCTIONS
// ============================================================================

/// Simple hash function for noise generation
pub fn hash_2d(x: f32, y: f32) -> f32 {
    let n = (x * 127.1 + y * 311.7).sin() * 43758.5453;
    n.fract().abs()
}

/// Smoothstep interpolation
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Smoothstep between two edges, clamped
pub fn smooth_step(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    smoothstep(t)
}

/// 2D value noise in [0, 1]
pub fn noise_2d(x: f32, y: f32) -> f32 {
    let ix = x.floor();
    let iy = y.floor();
    let fx = x - ix;
    let fy = y - iy;

    let v00 = hash_2d(ix, iy);
    let v10 = hash_2d(ix + 1.0, iy);
    let v01 = hash_2d(ix, iy + 1.0);
    let v11 = hash_2d(ix + 1.0, iy + 1.0);

    let sx = smoothstep(fx);
    let sy = smoothstep(fy);

    let v0 = v00 + sx * (v10 - v00);
    let v1 = v01 + sx * (v11 - v01);

    v0 + sy * (v1 - v0)
}

/// Fractal Brownian Motion noise for natural terrain
pub fn fbm_noise(x: f32, z: f32, octaves: u32) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        value += amplitude * noise_2d(x * frequency, z * frequency);
        max_value += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }

    if max_value > 0.0 { value / max_value } else { 0.0 }
}

// ============================================================================
// MESH GENERATION PRIMITIVES
// ============================================================================

/// Generate a box mesh rotated about its center
pub fn generate_box(center: Vec3, half_extents: Vec3, rotation: Quat, color: [f32; 4]) -> Mesh {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    let (hx, hy, hz) = (half_extents.x, half_extents.y, half_extents.z);

    let corners = [
        Vec3::new(-hx, -hy, -hz),
        Vec3::new(hx, -hy, -hz),
        Vec3::new(hx, hy, -hz),
        Vec3::new(-hx, hy, -hz),
        Vec3::new(-hx, -hy, hz),
        Vec3::new(hx, -hy, hz),
        Vec3::new(hx, hy, hz),
        Vec3::new(-hx, hy, hz),
    ];

    let faces = [
        ([1, 0, 3, 2], Vec3::NEG_Z),
        ([4, 5, 6, 7], Vec3::Z),
        ([0, 4, 7, 3], Vec3::NEG_X),
        ([5, 1, 2, 6], Vec3::X),
        ([7, 6, 2, 3], Vec3::Y),
        ([0, 1, 5, 4], Vec3::NEG_Y),
    ];

    for (face_indices, normal) in &faces {
        let base = vertices.len() as u32;
        let n = rotation * *normal;
        for &i in face_indices {
            let pos = center + rotation * corners[i];
            vertices.push(Vertex {
                position: pos.to_array(),
                normal: n.to_array(),
                color,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh { vertices, indices }
}

/// Generate a UV sphere
pub fn generate_sphere(center: Vec3, radius: f32, color: [f32; 4], segments: u32) -> Mesh {
    let segments = segments.max(3);
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for lat in 0..=segments {
        let theta = (lat as f32) * std::f32::consts::PI / (segments as f32);
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for lon in 0..=segments {
            let phi = (lon as f32) * 2.0 * std::f32::consts::PI / (segments as f32);
            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            let pos = center + Vec3::new(x, y, z) * radius;
            vertices.push(Vertex {
                position: pos.to_array(),
                normal: [x, y, z],
                color,
            });
        }
    }

    for lat in 0..segments {
        for lon in 0..segments {
            let first = lat * (segments + 1) + lon;
            let second = first + segments + 1;

            indices.extend_from_slice(&[first, first + 1, second]);
            indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    Mesh { vertices, indices }
}
