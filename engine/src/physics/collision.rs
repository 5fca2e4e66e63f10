//! Collision detection module
//!
//! Volumes and ray tests used for spawn areas, trigger volumes and ground
//! probing.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//!
//! # Example
//!
//! ```ignore
//! use lagoon_engine::physics::collision::{ray_aabb_intersect, OrientedBox};
//! use glam::{Quat, Vec3};
//!
//! let origin = Vec3::new(0.0, 0.0, -5.0);
//! let direction = Vec3::new(0.0, 0.0, 1.0);
//! if let Some(t) = ray_aabb_intersect(origin, direction, Vec3::splat(-1.0), Vec3::splat(1.0)) {
//!     let hit_point = origin + direction * t;
//! }
//!
//! let area = OrientedBox::new(Vec3::new(10.0, 0.0, 4.0), Vec3::new(6.0, 2.0, 6.0), Quat::IDENTITY);
//! assert!(area.contains(Vec3::new(12.0, 0.5, 5.0)));
//! ```

use glam::{Quat, Vec3};
use rand::Rng;

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Handle near-zero directions by using large values
    let inv = |d: f32| if d.abs() > 1e-10 { 1.0 / d } else { f32::MAX * d.signum() };
    let inv_dir = Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t1 = (aabb_min - ray_origin) * inv_dir;
    let t2 = (aabb_max - ray_origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 {
            Some(t_min)
        } else {
            // Ray starts inside the AABB
            Some(t_max)
        }
    } else {
        None
    }
}

/// Computes the outward surface normal for a point on an AABB surface.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = (aabb_max - aabb_min) * 0.5;
    let normalized = (point - center) / half_extents;

    // Closest face has the highest absolute normalized coordinate
    let abs_normalized = normalized.abs();

    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.x && abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

// =============================================================================
// OrientedBox - box collider with a transform
// =============================================================================

/// A box volume with position and rotation, the shape of every spawn area
/// and trigger volume in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// World-space center
    pub center: Vec3,
    /// Half of the box size along its local axes
    pub half_extents: Vec3,
    /// Rotation from local to world space
    pub rotation: Quat,
}

impl OrientedBox {
    /// Create a box from its full size (as an inspector would show it).
    pub fn new(center: Vec3, size: Vec3, rotation: Quat) -> Self {
        Self {
            center,
            half_extents: size.abs() * 0.5,
            rotation,
        }
    }

    /// Axis-aligned box from min/max corners.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            center: (min + max) * 0.5,
            half_extents: (max - min).abs() * 0.5,
            rotation: Quat::IDENTITY,
        }
    }

    /// Transform a world point into the box's local frame.
    #[inline]
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.center)
    }

    /// Transform a local point into world space.
    #[inline]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.center + self.rotation * local
    }

    /// Whether a world point lies inside or on the box.
    pub fn contains(&self, point: Vec3) -> bool {
        let local = self.inverse_transform_point(point).abs();
        local.x <= self.half_extents.x
            && local.y <= self.half_extents.y
            && local.z <= self.half_extents.z
    }

    /// Uniform random point over the box's horizontal cross-section through
    /// its center.
    pub fn random_point_on_center_plane<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let sample = |rng: &mut R, extent: f32| {
            if extent > 0.0 {
                rng.gen_range(-extent..=extent)
            } else {
                0.0
            }
        };
        let local = Vec3::new(
            sample(rng, self.half_extents.x),
            0.0,
            sample(rng, self.half_extents.z),
        );
        self.transform_point(local)
    }

    /// World-space AABB enclosing the rotated box.
    pub fn world_aabb(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for sx in [-1.0, 1.0] {
            for sy in [-1.0, 1.0] {
                for sz in [-1.0, 1.0] {
                    let corner = self.transform_point(self.half_extents * Vec3::new(sx, sy, sz));
                    min = min.min(corner);
                    max = max.max(corner);
                }
            }
        }
        (min, max)
    }
}

// =============================================================================
// TriggerVolume - enter/exit detection
// =============================================================================

/// Edge reported by a trigger volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Enter,
    Exit,
}

/// Reports when a tracked point crosses into or out of a volume.
#[derive(Debug, Clone)]
pub struct TriggerVolume {
    pub bounds: OrientedBox,
    inside: bool,
}

impl TriggerVolume {
    pub fn new(bounds: OrientedBox) -> Self {
        Self {
            bounds,
            inside: false,
        }
    }

    /// Feed the tracked position; returns an event when the inside state flips.
    pub fn update(&mut self, position: Vec3) -> Option<TriggerEvent> {
        let now_inside = self.bounds.contains(position);
        match (self.inside, now_inside) {
            (false, true) => {
                self.inside = true;
                Some(TriggerEvent::Enter)
            }
            (true, false) => {
                self.inside = false;
                Some(TriggerEvent::Exit)
            }
            _ => None,
        }
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_ray_hits_box_from_above() {
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::NEG_Y,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert_eq!(t, Some(9.0));
    }

    #[test]
    fn test_ray_misses_box() {
        let t = ray_aabb_intersect(
            Vec3::new(5.0, 10.0, 0.0),
            Vec3::NEG_Y,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_surface_normal_top_face() {
        let n = aabb_surface_normal(Vec3::new(0.2, 1.0, -0.3), Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(n, Vec3::Y);
    }

    #[test]
    fn test_rotated_box_contains() {
        // 10 x 2 x 2 box rotated 90 degrees about Y now extends along Z
        let b = OrientedBox::new(
            Vec3::ZERO,
            Vec3::new(10.0, 2.0, 2.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );
        assert!(b.contains(Vec3::new(0.0, 0.0, 4.5)));
        assert!(!b.contains(Vec3::new(4.5, 0.0, 0.0)));
    }

    #[test]
    fn test_random_point_inside_and_on_center_plane() {
        let b = OrientedBox::new(
            Vec3::new(20.0, 3.0, -7.0),
            Vec3::new(8.0, 4.0, 6.0),
            Quat::from_rotation_y(0.7),
        );
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = b.random_point_on_center_plane(&mut rng);
            assert!(b.contains(p));
            assert!((p.y - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_world_aabb_of_rotated_box() {
        let b = OrientedBox::new(
            Vec3::ZERO,
            Vec3::new(2.0, 2.0, 2.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_4),
        );
        let (min, max) = b.world_aabb();
        let diag = 2.0_f32.sqrt();
        assert!((max.x - diag).abs() < 1e-4);
        assert!((min.z + diag).abs() < 1e-4);
        assert!((max.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_trigger_enter_exit() {
        let mut trigger = TriggerVolume::new(OrientedBox::from_min_max(
            Vec3::new(-5.0, -10.0, -5.0),
            Vec3::new(5.0, 0.0, 5.0),
        ));

        assert_eq!(trigger.update(Vec3::new(0.0, 2.0, 0.0)), None);
        assert_eq!(trigger.update(Vec3::new(0.0, -1.0, 0.0)), Some(TriggerEvent::Enter));
        assert_eq!(trigger.update(Vec3::new(1.0, -2.0, 0.0)), None);
        assert!(trigger.is_inside());
        assert_eq!(trigger.update(Vec3::new(0.0, 1.0, 0.0)), Some(TriggerEvent::Exit));
    }
}
