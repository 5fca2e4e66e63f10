//! Scene Tests - Event Routing Between Game Components
//!
//! Builds whole scenes on the generated island and drives them with frame
//! input: intro dialogue, pickups, win/lose, restart and the water volume.

use std::sync::Arc;

use glam::{Vec2, Vec3};
use lagoon_engine::game::ui::{Screen, restart_button};
use lagoon_engine::game::{
    DialogueDocument, DialogueNode, FIXED_TIMESTEP, GameConfig, Outcome, Scene, SceneEvent,
    SessionPhase,
};
use lagoon_engine::input::{FrameInput, InputAction};

const DT: f32 = 0.05;

fn document() -> Arc<DialogueDocument> {
    Arc::new(DialogueDocument::from_nodes(vec![
        DialogueNode::new("intro_1", "The tide took my relics", Some("intro_2")),
        DialogueNode::new("intro_2", "Will you help?", None)
            .with_response("Yes", "exit")
            .with_response("Tell me more", "intro_1"),
    ]))
}

fn config() -> GameConfig {
    GameConfig {
        seed: Some(7),
        ..Default::default()
    }
}

fn playing(config: GameConfig) -> Scene {
    Scene::with_document(config, document(), false, 7)
}

fn press(action: InputAction) -> FrameInput {
    FrameInput {
        actions: vec![action],
        ..Default::default()
    }
}

fn idle() -> FrameInput {
    FrameInput::default()
}

/// Drop the player onto the first live collectible and run a frame with a
/// single physics step.
fn grab_one(scene: &mut Scene) -> Vec<SceneEvent> {
    let target = scene.spawner().collectibles()[0].position();
    scene.teleport_player(target);
    scene.update(FIXED_TIMESTEP * 1.25, &idle()).events
}

#[test]
fn test_intro_blocks_play_until_closed() {
    let mut scene = Scene::with_document(config(), document(), true, 7);
    assert!(scene.quest_giver().is_active());
    assert!(scene.quest_giver().shows_prompt());
    assert!(!scene.player().enabled);

    // The countdown does not run during the intro
    scene.update(5.0, &idle());
    assert_eq!(scene.session().phase(), SessionPhase::NotStarted);

    let out = scene.update(DT, &press(InputAction::AdvanceDialogue));
    assert!(out.contains(&SceneEvent::DialogueShown {
        node_id: "intro_2".into()
    }));
    assert!(!scene.quest_giver().shows_prompt());

    // Looping back keeps the intro open
    scene.update(DT, &press(InputAction::Choose(1)));
    assert!(scene.quest_giver().is_active());
    scene.update(DT, &press(InputAction::AdvanceDialogue));

    let out = scene.update(DT, &press(InputAction::Choose(0)));
    assert!(out.contains(&SceneEvent::DialogueEnded));
    assert!(out.contains(&SceneEvent::SessionStarted));
    assert!(scene.session().is_active());
    assert!(scene.player().enabled);
    assert!(out.cursor_locked);
}

#[test]
fn test_begin_dialogue_ignored_during_intro() {
    let mut scene = Scene::with_document(config(), document(), true, 7);
    scene.update(DT, &press(InputAction::BeginDialogue));
    assert!(!scene.dialogue_manager().is_active());
}

#[test]
fn test_pickup_scores_and_respawns() {
    let mut scene = playing(config());
    assert_eq!(scene.spawner().collectibles().len(), 3);

    let events = grab_one(&mut scene);
    assert!(events.contains(&SceneEvent::Pickup { score: 1 }));
    assert_eq!(scene.session().score(), 1);
    assert_eq!(scene.spawner().collectibles().len(), 3);
}

#[test]
fn test_reaching_target_wins_and_freezes_player() {
    let mut cfg = config();
    cfg.session.target_score = 1;
    let mut scene = playing(cfg);

    let events = grab_one(&mut scene);
    assert!(events.contains(&SceneEvent::SessionEnded(Outcome::Win)));
    assert!(!scene.player().enabled);
    assert!(!scene.camera().enabled);

    // No more scoring once ended
    grab_one(&mut scene);
    assert_eq!(scene.session().score(), 1);
    assert!(scene.session().end_text().unwrap().starts_with("You Win!"));
}

#[test]
fn test_timeout_loses() {
    let mut cfg = config();
    cfg.session.duration = 1.0;
    let mut scene = playing(cfg);

    let mut ended = false;
    for _ in 0..40 {
        let out = scene.update(DT, &idle());
        if out.contains(&SceneEvent::SessionEnded(Outcome::Lose)) {
            ended = true;
            break;
        }
    }
    assert!(ended);
    assert!(!scene.update(DT, &idle()).cursor_locked);
}

#[test]
fn test_restart_with_key() {
    let mut cfg = config();
    cfg.session.target_score = 1;
    let mut scene = playing(cfg);
    grab_one(&mut scene);

    let out = scene.update(DT, &press(InputAction::Restart));
    assert!(out.contains(&SceneEvent::Restarted));
    assert!(out.static_meshes_dirty);
    assert!(scene.session().is_active());
    assert_eq!(scene.session().score(), 0);
    // Restarted scenes skip the intro
    assert!(!scene.quest_giver().is_active());
    assert!(scene.player().enabled);
}

#[test]
fn test_restart_key_ignored_while_playing() {
    let mut scene = playing(config());
    let out = scene.update(DT, &press(InputAction::Restart));
    assert!(!out.contains(&SceneEvent::Restarted));
}

#[test]
fn test_restart_button_click() {
    let mut cfg = config();
    cfg.session.target_score = 1;
    let mut scene = playing(cfg);
    scene.resize(800, 600);
    grab_one(&mut scene);

    let rect = restart_button(Screen::new(800.0, 600.0)).rect;
    let click = FrameInput {
        clicks: vec![Vec2::new(rect.x + rect.w * 0.5, rect.y + rect.h * 0.5)],
        ..Default::default()
    };
    assert!(scene.update(DT, &click).contains(&SceneEvent::Restarted));
}

#[test]
fn test_restart_keeps_island_shape() {
    let mut cfg = config();
    cfg.session.target_score = 1;
    let mut scene = playing(cfg);
    let before = scene.heightmap().height_at(10.0, 20.0);
    grab_one(&mut scene);
    scene.update(DT, &press(InputAction::Restart));
    assert_eq!(scene.heightmap().height_at(10.0, 20.0), before);
}

#[test]
fn test_q_dialogue_pauses_look_and_auto_advances() {
    let mut scene = playing(config());
    let out = scene.update(DT, &press(InputAction::BeginDialogue));
    assert!(out.contains(&SceneEvent::DialogueShown {
        node_id: "intro_1".into()
    }));
    assert!(!scene.camera().enabled);
    assert!(scene.player().enabled);
    assert!(!out.cursor_locked);

    // Plain line moves on by itself after the configured delay
    let mut shown = false;
    for _ in 0..60 {
        let out = scene.update(DT, &idle());
        if out.contains(&SceneEvent::DialogueShown {
            node_id: "intro_2".into(),
        }) {
            shown = true;
            break;
        }
    }
    assert!(shown);

    let out = scene.update(DT, &press(InputAction::Choose(0)));
    assert!(out.contains(&SceneEvent::DialogueEnded));
    assert!(scene.camera().enabled);
}

#[test]
fn test_entering_lagoon_switches_fog() {
    let mut scene = playing(config());
    let surface = scene.fog();
    let floor = scene.heightmap().height_at(0.0, 0.0);
    assert!(floor < scene.config().terrain.water_level);

    scene.teleport_player(Vec3::new(0.0, floor + 1.0, 0.0));
    let out = scene.update(DT, &idle());
    assert!(out.contains(&SceneEvent::EnteredWater));
    assert!(scene.underwater().is_underwater());

    for _ in 0..40 {
        scene.update(DT, &idle());
    }
    assert_eq!(scene.fog(), scene.config().underwater.fog);
    assert_ne!(scene.fog(), surface);
    assert_eq!(scene.clear_color(), scene.config().underwater.fog.color);
}

#[test]
fn test_fall_out_returns_to_spawn() {
    let mut scene = playing(config());
    scene.teleport_player(Vec3::new(0.0, -500.0, 0.0));
    scene.update(DT, &idle());
    let p = scene.player().position();
    assert!((p.x - scene.config().player_spawn.x).abs() < 0.5);
    assert!((p.z - scene.config().player_spawn.y).abs() < 0.5);
}

#[test]
fn test_escape_requests_quit() {
    let mut scene = playing(config());
    assert!(scene.update(DT, &press(InputAction::Escape)).contains(&SceneEvent::Quit));
}

#[test]
fn test_render_meshes_are_populated() {
    let scene = playing(config());
    assert!(!scene.terrain_mesh().is_empty());
    assert!(!scene.water_mesh().is_empty());
    assert!(!scene.dynamic_mesh().is_empty());
    // HUD is drawn once the session is running
    assert!(!scene.ui_mesh().is_empty());
}

#[test]
fn test_timer_reaching_zero_ends_that_frame() {
    let mut cfg = config();
    cfg.session.duration = DT * 2.0;
    let mut scene = playing(cfg);

    let out = scene.update(DT, &idle());
    assert!(!out.contains(&SceneEvent::SessionEnded(Outcome::Lose)));
    let out = scene.update(DT, &idle());
    assert!(out.contains(&SceneEvent::SessionEnded(Outcome::Lose)));
    assert_eq!(scene.session().remaining(), 0.0);
    assert_eq!(scene.session().timer_text(), "00:00");

    // Reaching a collectible once the clock shows 00:00 scores nothing
    let events = grab_one(&mut scene);
    assert!(!events.iter().any(|e| matches!(e, SceneEvent::Pickup { .. })));
    assert_eq!(scene.session().score(), 0);
    assert_eq!(scene.session().phase(), SessionPhase::Ended(Outcome::Lose));
}

#[test]
fn test_restart_closes_open_dialogue() {
    let mut cfg = config();
    cfg.session.target_score = 1;
    let mut scene = playing(cfg);
    grab_one(&mut scene);
    assert_eq!(scene.session().phase(), SessionPhase::Ended(Outcome::Win));

    scene.update(DT, &press(InputAction::BeginDialogue));
    assert!(scene.dialogue_manager().is_active());

    let out = scene.update(DT, &press(InputAction::Restart));
    let ended = out.events.iter().position(|e| *e == SceneEvent::DialogueEnded);
    let restarted = out.events.iter().position(|e| *e == SceneEvent::Restarted);
    assert!(ended.is_some());
    assert!(ended < restarted);
    assert!(!scene.dialogue_manager().is_active());
    assert!(scene.camera().enabled);
}

#[test]
fn test_camera_uses_configured_settings() {
    let mut cfg = config();
    cfg.camera.sensitivity_x = 0.25;
    cfg.camera.sensitivity_y = 0.15;
    cfg.camera.fov_degrees = 75.0;
    cfg.camera.follow_offset = Vec3::new(0.0, 1.0, 5.0);
    let scene = playing(cfg);

    let camera = scene.camera();
    assert_eq!(camera.sensitivity_x, 0.25);
    assert_eq!(camera.sensitivity_y, 0.15);
    assert_eq!(camera.fov_degrees, 75.0);
    assert_eq!(camera.follow_offset, Vec3::new(0.0, 1.0, 5.0));
    assert_eq!(camera.pitch(), 0.0);
}
