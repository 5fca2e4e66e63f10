//! Spawn Areas

use glam::{Quat, Vec3};
use rand::Rng;

use crate::game::config::SpawnAreaConfig;
use crate::physics::OrientedBox;

/// A volume collectibles may appear in.
///
/// An area without bounds is kept so indices stay stable, but it never
/// yields a spawn point and never contains anything.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnArea {
    index: usize,
    bounds: Option<OrientedBox>,
}

impl SpawnArea {
    pub fn new(index: usize, bounds: OrientedBox) -> Self {
        Self {
            index,
            bounds: Some(bounds),
        }
    }

    pub fn without_bounds(index: usize) -> Self {
        Self {
            index,
            bounds: None,
        }
    }

    pub fn from_config(index: usize, config: &SpawnAreaConfig) -> Self {
        match config.size {
            Some(size) => Self::new(
                index,
                OrientedBox::new(
                    config.center,
                    size,
                    Quat::from_rotation_y(-config.yaw_degrees.to_radians()),
                ),
            ),
            None => Self::without_bounds(index),
        }
    }

    /// Build the whole indexed list from config.
    pub fn from_configs(configs: &[SpawnAreaConfig]) -> Vec<Self> {
        configs
            .iter()
            .enumerate()
            .map(|(i, config)| Self::from_config(i, config))
            .collect()
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bounds(&self) -> Option<&OrientedBox> {
        self.bounds.as_ref()
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.bounds.is_some_and(|b| b.contains(point))
    }

    /// Uniform point over the box's local X/Z extents at its center height.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Vec3> {
        match &self.bounds {
            Some(bounds) => Some(bounds.random_point_on_center_plane(rng)),
            None => {
                log::error!("Spawn area {} has no bounds", self.index);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_point_stays_inside() {
        let area = SpawnArea::new(
            0,
            OrientedBox::new(Vec3::new(5.0, 2.0, -3.0), Vec3::new(4.0, 2.0, 6.0), Quat::from_rotation_y(0.6)),
        );
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let p = area.random_point(&mut rng).unwrap();
            assert!(area.contains(p));
            assert!((p.y - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_missing_bounds() {
        let area = SpawnArea::without_bounds(3);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(area.random_point(&mut rng).is_none());
        assert!(!area.contains(Vec3::ZERO));
    }
}
