//! Terrain Tests - Splat Painting, Island Mesh and Underwater Fog

use glam::{Vec2, Vec3};
use lagoon_engine::game::terrain::{
    SplatPainter, SplatThresholds, TerrainSettings, generate_heightmap, generate_terrain_mesh,
    splat_weights, water_volume,
};
use lagoon_engine::game::{FogSettings, UnderwaterEffect, UnderwaterSettings};
use lagoon_engine::physics::{GroundProbe, OrientedBox, TriggerEvent};
use lagoon_engine::world::Heightmap;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn small_settings() -> TerrainSettings {
    TerrainSettings {
        resolution: 33,
        cell_size: 4.0,
        ..Default::default()
    }
}

#[test]
fn test_weights_always_normalized() {
    let t = SplatThresholds::default();
    for hi in 0..=20 {
        for si in 0..=18 {
            let w = splat_weights(hi as f32 / 20.0, si as f32 * 5.0, &t);
            let sum: f32 = w.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "h={hi} s={si} sum={sum}");
        }
    }
}

#[test]
fn test_steep_lowland_is_grass_and_rock() {
    let w = splat_weights(0.1, 45.0, &SplatThresholds::default());
    assert_eq!(w, [0.5, 0.0, 0.5]);
}

#[test]
fn test_painted_ramp_bands() {
    // Gentle ramp from 0 to 100 over a long distance: no steep cells
    let hm = Heightmap::from_fn(101, 3, 10.0, Vec2::ZERO, 100.0, |x, _| x as f32);
    let raster = SplatPainter::default().paint(&hm);

    assert_eq!(raster.get(10, 1), Some([1.0, 0.0, 0.0]));
    assert_eq!(raster.get(50, 1), Some([0.0, 1.0, 0.0]));
    assert_eq!(raster.get(90, 1), Some([0.0, 0.0, 1.0]));
    assert_eq!(raster.get(101, 1), None);
}

#[test]
fn test_island_is_above_water_in_ring_and_sunken_in_lagoon() {
    let settings = small_settings();
    let mut rng = StdRng::seed_from_u64(4);
    let hm = generate_heightmap(&settings, &mut rng);

    assert!(hm.height_at(0.0, 0.0) < settings.water_level);
    let edge = hm.size().x * 0.5 - 1.0;
    assert!(hm.height_at(edge, 0.0) < 0.5);
    // Ring between the lagoon and the shore is dry land
    let ring = hm.size().x * 0.5 * 0.35;
    assert!(hm.height_at(ring, 0.0) > settings.water_level);
}

#[test]
fn test_heightmap_probe_lands_on_surface() {
    let settings = small_settings();
    let hm = generate_heightmap(&settings, &mut StdRng::seed_from_u64(9));
    let hit = hm.probe_down(Vec3::new(10.0, 100.0, -6.0), 200.0).unwrap();
    assert!((hit.point.y - hm.height_at(10.0, -6.0)).abs() < 1e-3);
}

#[test]
fn test_terrain_mesh_covers_grid() {
    let settings = small_settings();
    let mut rng = StdRng::seed_from_u64(1);
    let hm = generate_heightmap(&settings, &mut rng);
    let painter = SplatPainter::new(settings.thresholds, settings.layers.clone());
    let layers = painter.create_layers(&mut rng);
    let mesh = generate_terrain_mesh(&hm, &painter.paint(&hm), &layers);

    assert_eq!(mesh.vertices.len(), 33 * 33);
    assert_eq!(mesh.triangle_count(), 32 * 32 * 2);
}

#[test]
fn test_water_volume_top_is_surface() {
    let hm = Heightmap::flat(5, 5, 1.0, Vec2::ZERO, 0.0);
    let volume = water_volume(&hm, 3.0);
    assert!(volume.contains(Vec3::new(2.0, 2.9, 2.0)));
    assert!(!volume.contains(Vec3::new(2.0, 3.1, 2.0)));
}

fn surface() -> FogSettings {
    FogSettings {
        color: [0.55, 0.7, 0.85, 1.0],
        density: 0.01,
        start: 0.0,
        end: 300.0,
    }
}

#[test]
fn test_retrigger_mid_transition_blends_from_current() {
    let volume = OrientedBox::from_min_max(Vec3::splat(-10.0), Vec3::new(10.0, 0.0, 10.0));
    let settings = UnderwaterSettings::default();
    let mut fx = UnderwaterEffect::new(surface(), &settings, volume, true);

    let below = Vec3::new(0.0, -1.0, 0.0);
    let above = Vec3::new(0.0, 5.0, 0.0);

    assert_eq!(fx.update(0.0, below), Some(TriggerEvent::Enter));
    fx.update(0.5, below);
    let halfway = fx.fog();
    assert!(halfway.density > surface().density);
    assert!(halfway.density < settings.fog.density);

    // Leave halfway: the blend back starts where the fog is now
    assert_eq!(fx.update(0.0, above), Some(TriggerEvent::Exit));
    assert_eq!(fx.fog(), halfway);
    assert!(!fx.is_underwater());

    fx.update(0.5, above);
    assert!(fx.fog().density < halfway.density);
    fx.update(0.6, above);
    assert_eq!(fx.fog(), surface());
    assert!(!fx.is_transitioning());
}
