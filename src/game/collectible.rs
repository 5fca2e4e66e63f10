//! Collectibles
//!
//! A collectible is a pickup resting above the ground. It only knows where
//! it is; which spawn area owns it is worked out from its position.

use glam::Vec3;

/// Stable handle for a live collectible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectibleId(pub u64);

/// A live pickup.
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    id: CollectibleId,
    position: Vec3,
    radius: f32,
}

impl Collectible {
    pub fn new(id: CollectibleId, position: Vec3, radius: f32) -> Self {
        Self {
            id,
            position,
            radius: radius.max(0.0),
        }
    }

    #[inline]
    pub fn id(&self) -> CollectibleId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Overlap against an upright capsule.
    ///
    /// `center` is the capsule middle, `half_segment` the distance from the
    /// middle to either cap center.
    pub fn touches_capsule(&self, center: Vec3, half_segment: f32, capsule_radius: f32) -> bool {
        let low = center.y - half_segment;
        let high = center.y + half_segment;
        let closest = Vec3::new(center.x, self.position.y.clamp(low, high), center.z);
        closest.distance_squared(self.position) <= (self.radius + capsule_radius).powi(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(position: Vec3) -> Collectible {
        Collectible::new(CollectibleId(1), position, 0.5)
    }

    #[test]
    fn test_touches_capsule_side() {
        let c = coin(Vec3::new(0.9, 1.0, 0.0));
        assert!(c.touches_capsule(Vec3::new(0.0, 1.0, 0.0), 0.5, 0.5));
        let far = coin(Vec3::new(1.1, 1.0, 0.0));
        assert!(!far.touches_capsule(Vec3::new(0.0, 1.0, 0.0), 0.5, 0.5));
    }

    #[test]
    fn test_touches_capsule_cap() {
        let above = coin(Vec3::new(0.0, 2.4, 0.0));
        assert!(above.touches_capsule(Vec3::new(0.0, 1.0, 0.0), 0.5, 0.5));
        let too_high = coin(Vec3::new(0.0, 2.6, 0.0));
        assert!(!too_high.touches_capsule(Vec3::new(0.0, 1.0, 0.0), 0.5, 0.5));
    }
}
