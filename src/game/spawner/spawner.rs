//! Collectible Spawner
//!
//! Places collectibles on the ground inside spawn areas and respawns one
//! whenever one is collected.

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::allocator::SpawnAllocator;
use super::area::SpawnArea;
use crate::game::collectible::{Collectible, CollectibleId};
use crate::physics::GroundProbe;

/// Spawner tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerSettings {
    /// Collectibles kept alive at once
    pub max_collectibles: usize,
    /// Height above the sampled point the ground probe starts from
    pub probe_height: f32,
    /// Maximum ground probe length
    pub probe_distance: f32,
    /// Resting height above the ground hit
    pub ground_offset: f32,
    /// Pickup radius of each collectible
    pub pickup_radius: f32,
}

impl Default for SpawnerSettings {
    fn default() -> Self {
        Self {
            max_collectibles: 3,
            probe_height: 100.0,
            probe_distance: 200.0,
            ground_offset: 1.0,
            pickup_radius: 0.6,
        }
    }
}

/// Result of one spawn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// A collectible was placed in the given area
    Spawned { id: CollectibleId, area: usize },
    /// Every attempt failed; the next collection retries
    Abandoned,
}

/// Owns the live collectibles and the area bookkeeping.
#[derive(Debug, Clone)]
pub struct CollectibleSpawner {
    settings: SpawnerSettings,
    areas: Vec<SpawnArea>,
    allocator: SpawnAllocator,
    collectibles: Vec<Collectible>,
    rng: StdRng,
    next_id: u64,
}

impl CollectibleSpawner {
    /// Spawner with a deterministic RNG.
    pub fn new(settings: SpawnerSettings, areas: Vec<SpawnArea>, seed: u64) -> Self {
        Self::with_rng(settings, areas, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(settings: SpawnerSettings, areas: Vec<SpawnArea>, rng: StdRng) -> Self {
        let allocator = SpawnAllocator::new(areas.len());
        Self {
            settings,
            areas,
            allocator,
            collectibles: Vec::new(),
            rng,
            next_id: 0,
        }
    }

    pub fn settings(&self) -> &SpawnerSettings {
        &self.settings
    }

    pub fn areas(&self) -> &[SpawnArea] {
        &self.areas
    }

    pub fn allocator(&self) -> &SpawnAllocator {
        &self.allocator
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn get(&self, id: CollectibleId) -> Option<&Collectible> {
        self.collectibles.iter().find(|c| c.id() == id)
    }

    /// Run the start-of-scene spawns.
    pub fn initial_fill(&mut self, ground: &dyn GroundProbe) -> Vec<SpawnOutcome> {
        (0..self.settings.max_collectibles)
            .map(|_| self.spawn_one(ground))
            .collect()
    }

    /// Try to place one collectible, with at most two attempts per area.
    pub fn spawn_one(&mut self, ground: &dyn GroundProbe) -> SpawnOutcome {
        if self.allocator.available().is_empty() {
            log::warn!("No available spawn areas, reinitializing all areas");
            self.allocator.initialize();
        }

        let max_attempts = self.areas.len() * 2;
        for _ in 0..max_attempts {
            if self.allocator.available().is_empty() {
                log::error!("Ran out of available areas during spawn attempts");
                break;
            }
            let Some(index) = self.allocator.candidate(&mut self.rng) else {
                continue;
            };
            let Some(point) = self.areas[index].random_point(&mut self.rng) else {
                continue;
            };
            let Some(position) = self.place_on_ground(point, ground) else {
                continue;
            };

            let id = CollectibleId(self.next_id);
            self.next_id += 1;
            self.collectibles
                .push(Collectible::new(id, position, self.settings.pickup_radius));
            self.allocator.occupy(index);

            log::info!("Collectible spawned in area {index}");
            log::debug!("{}", self.allocator.status());
            return SpawnOutcome::Spawned { id, area: index };
        }

        log::error!("Failed to spawn collectible after {max_attempts} attempts");
        log::debug!("{}", self.allocator.status());
        SpawnOutcome::Abandoned
    }

    /// Remove a collected collectible, free its area and spawn a replacement.
    ///
    /// Returns `None` if the id is not live.
    pub fn on_collected(
        &mut self,
        id: CollectibleId,
        ground: &dyn GroundProbe,
    ) -> Option<SpawnOutcome> {
        let Some(slot) = self.collectibles.iter().position(|c| c.id() == id) else {
            log::warn!("Collected unknown collectible {id:?}");
            return None;
        };
        let collectible = self.collectibles.remove(slot);

        match self.area_containing(collectible.position()) {
            Some(index) => self.allocator.release(index),
            None => log::warn!(
                "Collectible at {:?} is outside every spawn area",
                collectible.position()
            ),
        }
        log::debug!("{}", self.allocator.status());

        Some(self.spawn_one(ground))
    }

    /// First live collectible overlapping an upright capsule.
    pub fn find_touching(
        &self,
        center: Vec3,
        half_segment: f32,
        radius: f32,
    ) -> Option<CollectibleId> {
        self.collectibles
            .iter()
            .find(|c| c.touches_capsule(center, half_segment, radius))
            .map(Collectible::id)
    }

    fn area_containing(&self, point: Vec3) -> Option<usize> {
        self.areas
            .iter()
            .find(|area| area.contains(point))
            .map(SpawnArea::index)
    }

    fn place_on_ground(&self, point: Vec3, ground: &dyn GroundProbe) -> Option<Vec3> {
        ground
            .probe_down(point + Vec3::Y * self.settings.probe_height, self.settings.probe_distance)
            .map(|hit| hit.point + Vec3::Y * self.settings.ground_offset)
    }
}
