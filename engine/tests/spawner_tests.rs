//! Spawner Tests - Area Allocation Invariants
//!
//! Drives the collectible spawner through long seeded pickup sequences and
//! checks the area bookkeeping after every step.

use std::collections::HashSet;

use glam::{Quat, Vec3};
use lagoon_engine::game::{CollectibleSpawner, SpawnArea, SpawnOutcome, SpawnerSettings};
use lagoon_engine::physics::{FlatGround, NoGround, OrientedBox};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const GROUND: FlatGround = FlatGround { height: 0.0 };

fn row_of_areas(count: usize) -> Vec<SpawnArea> {
    (0..count)
        .map(|i| {
            SpawnArea::new(
                i,
                OrientedBox::new(
                    Vec3::new(i as f32 * 20.0, 5.0, 0.0),
                    Vec3::new(8.0, 20.0, 8.0),
                    Quat::IDENTITY,
                ),
            )
        })
        .collect()
}

fn spawner(areas: usize, max: usize, seed: u64) -> CollectibleSpawner {
    let settings = SpawnerSettings {
        max_collectibles: max,
        ..Default::default()
    };
    CollectibleSpawner::new(settings, row_of_areas(areas), seed)
}

/// Available and occupied partition the area indices, and every live
/// collectible sits in an occupied area.
fn assert_consistent(spawner: &CollectibleSpawner) {
    let allocator = spawner.allocator();
    let available: HashSet<usize> = allocator.available().iter().copied().collect();
    let occupied: HashSet<usize> = allocator.occupied().iter().copied().collect();

    assert_eq!(available.len(), allocator.available().len(), "duplicate available");
    assert_eq!(occupied.len(), allocator.occupied().len(), "duplicate occupied");
    assert!(available.is_disjoint(&occupied));
    assert_eq!(available.len() + occupied.len(), spawner.areas().len());

    assert!(spawner.collectibles().len() <= spawner.settings().max_collectibles);
    for collectible in spawner.collectibles() {
        let area = spawner
            .areas()
            .iter()
            .find(|a| a.contains(collectible.position()))
            .expect("collectible outside every area");
        assert!(occupied.contains(&area.index()));
    }
}

#[test]
fn test_initial_fill_uses_distinct_areas() {
    let mut s = spawner(6, 3, 11);
    let outcomes = s.initial_fill(&GROUND);

    let areas: HashSet<usize> = outcomes
        .iter()
        .filter_map(|o| match o {
            SpawnOutcome::Spawned { area, .. } => Some(*area),
            SpawnOutcome::Abandoned => None,
        })
        .collect();
    assert_eq!(areas.len(), 3);
    assert_eq!(s.collectibles().len(), 3);
    assert_consistent(&s);
}

#[test]
fn test_collectibles_rest_on_ground() {
    let mut s = spawner(4, 2, 3);
    s.initial_fill(&GROUND);
    for collectible in s.collectibles() {
        assert!((collectible.position().y - 1.0).abs() < 1e-4);
    }
}

#[test]
fn test_random_pickup_sequences_keep_invariants() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut s = spawner(6, 3, seed);
        s.initial_fill(&GROUND);
        assert_consistent(&s);

        for _ in 0..200 {
            let live = s.collectibles();
            let pick = live[rng.gen_range(0..live.len())].id();
            let last_area = s.allocator().last_spawned();

            let outcome = s.on_collected(pick, &GROUND);
            assert!(matches!(outcome, Some(SpawnOutcome::Spawned { .. })));
            if let Some(SpawnOutcome::Spawned { area, .. }) = outcome {
                // With more than one free area the same area is never reused
                // twice in a row
                if s.areas().len() - (s.collectibles().len() - 1) > 1 {
                    assert_ne!(Some(area), last_area);
                }
            }
            assert_eq!(s.collectibles().len(), 3);
            assert_consistent(&s);
        }
    }
}

#[test]
fn test_unknown_id_is_ignored() {
    let mut s = spawner(3, 1, 1);
    s.initial_fill(&GROUND);
    let before = s.collectibles().to_vec();
    let missing = lagoon_engine::game::CollectibleId(9999);
    assert_eq!(s.on_collected(missing, &GROUND), None);
    assert_eq!(s.collectibles(), &before[..]);
}

#[test]
fn test_no_ground_abandons_without_leaking_areas() {
    let mut s = spawner(3, 2, 5);
    let outcomes = s.initial_fill(&NoGround);
    assert!(outcomes.iter().all(|o| *o == SpawnOutcome::Abandoned));
    assert!(s.collectibles().is_empty());
    assert!(s.allocator().occupied().is_empty());
}

#[test]
fn test_areas_without_bounds_are_skipped() {
    let mut areas = row_of_areas(5);
    areas.push(SpawnArea::without_bounds(5));
    let settings = SpawnerSettings {
        max_collectibles: 1,
        ..Default::default()
    };
    let mut s = CollectibleSpawner::new(settings, areas, 8);
    s.initial_fill(&GROUND);

    assert_eq!(s.collectibles().len(), 1);
    assert!(!s.allocator().occupied().contains(&5));
    assert_consistent(&s);
}

#[test]
fn test_find_touching_capsule() {
    let mut s = spawner(1, 1, 2);
    s.initial_fill(&GROUND);
    let target = s.collectibles()[0].position();

    let id = s.find_touching(target + Vec3::Y * 0.5, 0.5, 0.5);
    assert_eq!(id, Some(s.collectibles()[0].id()));
    assert_eq!(s.find_touching(target + Vec3::X * 10.0, 0.5, 0.5), None);
}
