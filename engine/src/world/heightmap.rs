//! Heightmap ground geometry
//!
//! A regular grid of height samples laid out on the XZ plane. The grid has
//! `width × depth` samples spaced `cell_size` meters apart, starting at
//! `origin` (the world XZ of sample (0, 0)).
//!
//! ## Sampling
//! - Heights between samples are bilinearly interpolated.
//! - Normals come from central differences of the interpolated surface.
//! - Steepness is the angle between the normal and world up, in degrees.

use glam::{Vec2, Vec3};

use crate::physics::probe::{GroundHit, GroundProbe};

/// Height samples over a rectangular XZ region.
#[derive(Debug, Clone)]
pub struct Heightmap {
    width: usize,
    depth: usize,
    cell_size: f32,
    origin: Vec2,
    /// Row-major samples: index = z * width + x
    heights: Vec<f32>,
    /// Vertical scale; heights are expected within [0, max_height]
    max_height: f32,
}

impl Heightmap {
    /// Build a heightmap from raw samples.
    ///
    /// Returns `None` when the sample count does not match `width * depth`
    /// or the grid is smaller than 2×2.
    pub fn new(
        width: usize,
        depth: usize,
        cell_size: f32,
        origin: Vec2,
        heights: Vec<f32>,
        max_height: f32,
    ) -> Option<Self> {
        if width < 2 || depth < 2 || heights.len() != width * depth {
            return None;
        }
        Some(Self {
            width,
            depth,
            cell_size: cell_size.max(1e-3),
            origin,
            heights,
            max_height: max_height.max(1e-3),
        })
    }

    /// Build a heightmap by evaluating `f(x, z)` at every sample index.
    pub fn from_fn(
        width: usize,
        depth: usize,
        cell_size: f32,
        origin: Vec2,
        max_height: f32,
        mut f: impl FnMut(usize, usize) -> f32,
    ) -> Self {
        let width = width.max(2);
        let depth = depth.max(2);
        let mut heights = Vec::with_capacity(width * depth);
        for z in 0..depth {
            for x in 0..width {
                heights.push(f(x, z));
            }
        }
        Self {
            width,
            depth,
            cell_size: cell_size.max(1e-3),
            origin,
            heights,
            max_height: max_height.max(1e-3),
        }
    }

    /// Flat heightmap at a constant height.
    pub fn flat(width: usize, depth: usize, cell_size: f32, origin: Vec2, height: f32) -> Self {
        Self::from_fn(width, depth, cell_size, origin, height.max(1.0), |_, _| height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    /// World-space XZ extent covered by the grid.
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            (self.width - 1) as f32 * self.cell_size,
            (self.depth - 1) as f32 * self.cell_size,
        )
    }

    /// World XZ of a sample index.
    pub fn sample_position(&self, x: usize, z: usize) -> Vec2 {
        self.origin + Vec2::new(x as f32, z as f32) * self.cell_size
    }

    /// Raw sample, with indices clamped to the grid.
    pub fn height_at_sample(&self, x: usize, z: usize) -> f32 {
        let x = x.min(self.width - 1);
        let z = z.min(self.depth - 1);
        self.heights[z * self.width + x]
    }

    /// Whether a world XZ lies over the grid.
    pub fn contains_xz(&self, x: f32, z: f32) -> bool {
        let local = Vec2::new(x, z) - self.origin;
        let size = self.size();
        local.x >= 0.0 && local.y >= 0.0 && local.x <= size.x && local.y <= size.y
    }

    /// Bilinear height at a world XZ (clamped to the grid edges).
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let gx = ((x - self.origin.x) / self.cell_size).clamp(0.0, (self.width - 1) as f32);
        let gz = ((z - self.origin.y) / self.cell_size).clamp(0.0, (self.depth - 1) as f32);

        let x0 = gx.floor() as usize;
        let z0 = gz.floor() as usize;
        let x1 = (x0 + 1).min(self.width - 1);
        let z1 = (z0 + 1).min(self.depth - 1);
        let tx = gx - x0 as f32;
        let tz = gz - z0 as f32;

        let h00 = self.height_at_sample(x0, z0);
        let h10 = self.height_at_sample(x1, z0);
        let h01 = self.height_at_sample(x0, z1);
        let h11 = self.height_at_sample(x1, z1);

        let top = h00 + (h10 - h00) * tx;
        let bottom = h01 + (h11 - h01) * tx;
        top + (bottom - top) * tz
    }

    /// Height divided by `max_height`.
    pub fn normalized_height_at_sample(&self, x: usize, z: usize) -> f32 {
        self.height_at_sample(x, z) / self.max_height
    }

    /// Surface normal at a world XZ.
    pub fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        let e = self.cell_size;
        let dx = self.height_at(x + e, z) - self.height_at(x - e, z);
        let dz = self.height_at(x, z + e) - self.height_at(x, z - e);
        Vec3::new(-dx, 2.0 * e, -dz).normalize()
    }

    /// Slope angle in degrees (0 = flat, 90 = vertical).
    pub fn steepness_at(&self, x: f32, z: f32) -> f32 {
        self.normal_at(x, z).angle_between(Vec3::Y).to_degrees()
    }

    /// Slope angle in degrees at a sample index.
    pub fn steepness_at_sample(&self, x: usize, z: usize) -> f32 {
        let p = self.sample_position(x, z);
        self.steepness_at(p.x, p.y)
    }
}

impl GroundProbe for Heightmap {
    fn probe_down(&self, origin: Vec3, max_distance: f32) -> Option<GroundHit> {
        if !self.contains_xz(origin.x, origin.z) {
            return None;
        }
        let ground = self.height_at(origin.x, origin.z);
        let distance = origin.y - ground;
        if !(0.0..=max_distance).contains(&distance) {
            return None;
        }
        Some(GroundHit {
            point: Vec3::new(origin.x, ground, origin.z),
            normal: self.normal_at(origin.x, origin.z),
            distance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Heightmap {
        // Height rises 1m per meter along X
        Heightmap::from_fn(11, 11, 1.0, Vec2::ZERO, 10.0, |x, _| x as f32)
    }

    #[test]
    fn test_rejects_mismatched_samples() {
        assert!(Heightmap::new(4, 4, 1.0, Vec2::ZERO, vec![0.0; 15], 1.0).is_none());
        assert!(Heightmap::new(1, 4, 1.0, Vec2::ZERO, vec![0.0; 4], 1.0).is_none());
    }

    #[test]
    fn test_bilinear_height() {
        let map = ramp();
        assert!((map.height_at(2.5, 3.0) - 2.5).abs() < 1e-5);
        assert!((map.height_at(0.0, 0.0)).abs() < 1e-5);
        // Clamped outside the grid
        assert!((map.height_at(50.0, 0.0) - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_steepness_of_ramp_is_45_degrees() {
        let map = ramp();
        assert!((map.steepness_at(5.0, 5.0) - 45.0).abs() < 0.5);
    }

    #[test]
    fn test_flat_normal_is_up() {
        let map = Heightmap::flat(8, 8, 2.0, Vec2::new(-8.0, -8.0), 3.0);
        assert!((map.normal_at(0.0, 0.0) - Vec3::Y).length() < 1e-5);
        assert!(map.steepness_at_sample(3, 3).abs() < 1e-3);
    }

    #[test]
    fn test_probe_inside_and_outside() {
        let map = Heightmap::flat(8, 8, 2.0, Vec2::new(-8.0, -8.0), 3.0);

        let hit = map.probe_down(Vec3::new(1.0, 103.0, 1.0), 200.0).unwrap();
        assert!((hit.point.y - 3.0).abs() < 1e-5);
        assert!((hit.distance - 100.0).abs() < 1e-4);

        assert!(map.probe_down(Vec3::new(100.0, 10.0, 0.0), 200.0).is_none());
        assert!(map.probe_down(Vec3::new(0.0, 1.0, 0.0), 200.0).is_none());
    }

    #[test]
    fn test_normalized_height() {
        let map = ramp();
        assert!((map.normalized_height_at_sample(5, 0) - 0.5).abs() < 1e-6);
    }
}
