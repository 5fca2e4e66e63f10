//! Ground Probing
//!
//! Downward ray queries against whatever counts as ground in the scene.
//! Spawn placement, the player's ground check and slope handling all go
//! through [`GroundProbe`] so they work against the terrain heightmap in game
//! and against simple shapes in tests.

use glam::Vec3;

use super::collision::{aabb_surface_normal, ray_aabb_intersect};

/// Result of a ground probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    /// World-space hit position
    pub point: Vec3,
    /// Surface normal at the hit (normalized)
    pub normal: Vec3,
    /// Distance from the probe origin
    pub distance: f32,
}

impl GroundHit {
    /// Angle between the surface normal and world up, in degrees.
    pub fn slope_degrees(&self) -> f32 {
        self.normal.angle_between(Vec3::Y).to_degrees()
    }
}

/// Anything that can answer "where is the ground below this point".
pub trait GroundProbe {
    /// Cast straight down from `origin` up to `max_distance`.
    fn probe_down(&self, origin: Vec3, max_distance: f32) -> Option<GroundHit>;

    /// Like [`probe_down`](Self::probe_down) but with a radius: the nearest
    /// hit among the center and four offset rays.
    fn probe_down_wide(&self, origin: Vec3, radius: f32, max_distance: f32) -> Option<GroundHit> {
        let offsets = [
            Vec3::ZERO,
            Vec3::new(radius, 0.0, 0.0),
            Vec3::new(-radius, 0.0, 0.0),
            Vec3::new(0.0, 0.0, radius),
            Vec3::new(0.0, 0.0, -radius),
        ];
        offsets
            .iter()
            .filter_map(|offset| self.probe_down(origin + *offset, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Infinite horizontal plane.
#[derive(Debug, Clone, Copy)]
pub struct FlatGround {
    pub height: f32,
}

impl GroundProbe for FlatGround {
    fn probe_down(&self, origin: Vec3, max_distance: f32) -> Option<GroundHit> {
        let distance = origin.y - self.height;
        if (0.0..=max_distance).contains(&distance) {
            Some(GroundHit {
                point: Vec3::new(origin.x, self.height, origin.z),
                normal: Vec3::Y,
                distance,
            })
        } else {
            None
        }
    }
}

/// Scene with no ground at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGround;

impl GroundProbe for NoGround {
    fn probe_down(&self, _origin: Vec3, _max_distance: f32) -> Option<GroundHit> {
        None
    }
}

/// A set of axis-aligned boxes acting as ground (platforms, rocks).
#[derive(Debug, Clone, Default)]
pub struct BoxGround {
    pub boxes: Vec<(Vec3, Vec3)>,
}

impl BoxGround {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_box(mut self, min: Vec3, max: Vec3) -> Self {
        self.boxes.push((min, max));
        self
    }
}

impl GroundProbe for BoxGround {
    fn probe_down(&self, origin: Vec3, max_distance: f32) -> Option<GroundHit> {
        self.boxes
            .iter()
            .filter_map(|&(min, max)| {
                let t = ray_aabb_intersect(origin, Vec3::NEG_Y, min, max)?;
                if t > max_distance {
                    return None;
                }
                let point = origin + Vec3::NEG_Y * t;
                Some(GroundHit {
                    point,
                    normal: aabb_surface_normal(point, min, max),
                    distance: t,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Projects `direction` onto the plane with the given normal.
pub fn project_on_plane(direction: Vec3, plane_normal: Vec3) -> Vec3 {
    let n = plane_normal.normalize_or_zero();
    direction - n * direction.dot(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_ground_hit() {
        let ground = FlatGround { height: 2.0 };
        let hit = ground.probe_down(Vec3::new(3.0, 10.0, -1.0), 100.0).unwrap();
        assert_eq!(hit.point, Vec3::new(3.0, 2.0, -1.0));
        assert_eq!(hit.distance, 8.0);
        assert!(hit.slope_degrees().abs() < 1e-4);
    }

    #[test]
    fn test_flat_ground_out_of_reach() {
        let ground = FlatGround { height: 0.0 };
        assert!(ground.probe_down(Vec3::new(0.0, 10.0, 0.0), 5.0).is_none());
        assert!(ground.probe_down(Vec3::new(0.0, -1.0, 0.0), 5.0).is_none());
    }

    #[test]
    fn test_no_ground() {
        assert!(NoGround.probe_down(Vec3::ZERO, 1000.0).is_none());
    }

    #[test]
    fn test_box_ground_picks_highest_surface() {
        let ground = BoxGround::new()
            .with_box(Vec3::new(-10.0, -1.0, -10.0), Vec3::new(10.0, 0.0, 10.0))
            .with_box(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 3.0, 1.0));

        let hit = ground.probe_down(Vec3::new(0.0, 50.0, 0.0), 100.0).unwrap();
        assert!((hit.point.y - 3.0).abs() < 1e-4);
        assert_eq!(hit.normal, Vec3::Y);

        let side = ground.probe_down(Vec3::new(5.0, 50.0, 0.0), 100.0).unwrap();
        assert!(side.point.y.abs() < 1e-4);
    }

    #[test]
    fn test_wide_probe_finds_edge() {
        let ground = BoxGround::new().with_box(Vec3::new(0.1, -1.0, -1.0), Vec3::new(2.0, 0.0, 1.0));
        let origin = Vec3::new(0.0, 1.0, 0.0);
        assert!(ground.probe_down(origin, 2.0).is_none());
        assert!(ground.probe_down_wide(origin, 0.2, 2.0).is_some());
    }

    #[test]
    fn test_project_on_plane_removes_normal_component() {
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        let projected = project_on_plane(Vec3::Z, normal);
        assert!(projected.dot(normal).abs() < 1e-5);
    }
}
