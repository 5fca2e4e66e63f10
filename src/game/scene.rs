//! Scene
//!
//! Owns every game component and routes what they report to the others:
//!
//! - pickup → session score, then spawner respawn
//! - quest giver dialogue closed → session start
//! - session ended → player movement and camera look off, end panel on
//! - water volume enter/exit → underwater fog blend
//!
//! Restart rebuilds the scene from config. Only the very first build shows
//! the quest giver's intro; rebuilt scenes start the session straight away.

use std::sync::Arc;

use glam::{Mat4, Quat, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::collectible::CollectibleId;
use super::config::GameConfig;
use super::dialogue::{
    CONTINUE_PROMPT, DialogueDocument, DialogueError, DialogueEvent, DialogueInput,
    DialogueManager, QuestGiver,
};
use super::session::{GameSession, Outcome, SessionPhase};
use super::spawner::{CollectibleSpawner, SpawnArea};
use super::terrain::{
    SplatPainter, TerrainLayer, WeightRaster, generate_heightmap, generate_terrain_mesh,
    generate_water_plane, water_volume,
};
use super::types::{Mesh, generate_box, generate_sphere};
use super::ui::{self, Screen};
use super::underwater::{FogSettings, UnderwaterEffect};
use crate::camera::CameraController;
use crate::input::{FrameInput, InputAction};
use crate::physics::TriggerEvent;
use crate::player::PlayerMovement;
use crate::render::FogMode;
use crate::world::Heightmap;

/// Physics rate (50 Hz)
pub const FIXED_TIMESTEP: f32 = 1.0 / 50.0;
/// Cap on physics steps per frame
const MAX_FIXED_STEPS: u32 = 8;
/// Player capsule radius
const PLAYER_RADIUS: f32 = 0.5;
/// How far below the water the player may fall before being put back
const FALL_LIMIT: f32 = 100.0;

/// Something that happened during a frame
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    SessionStarted,
    Pickup { score: u32 },
    SessionEnded(Outcome),
    DialogueShown { node_id: String },
    DialogueEnded,
    EnteredWater,
    LeftWater,
    Restarted,
    Quit,
}

/// What the host needs after a frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneOutput {
    pub events: Vec<SceneEvent>,
    /// Whether the cursor should be locked for mouse look
    pub cursor_locked: bool,
    /// Static meshes changed and must be re-uploaded
    pub static_meshes_dirty: bool,
}

impl SceneOutput {
    pub fn contains(&self, event: &SceneEvent) -> bool {
        self.events.contains(event)
    }
}

/// Which dialogue front-end a frame's input goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogueTarget {
    QuestGiver,
    Manager,
}

/// The whole game world.
pub struct Scene {
    config: GameConfig,
    document: Arc<DialogueDocument>,
    seed: u64,
    generation: u64,

    heightmap: Heightmap,
    terrain_layers: [TerrainLayer; 3],
    terrain_weights: WeightRaster,
    player_spawn: Vec3,

    player: PlayerMovement,
    camera: CameraController,
    session: GameSession,
    spawner: CollectibleSpawner,
    quest_giver: QuestGiver,
    dialogue: DialogueManager,
    underwater: UnderwaterEffect,

    screen: Screen,
    accumulator: f32,
    time: f32,
}

impl Scene {
    /// Load the dialogue file named in the config and build the first scene.
    pub fn new(config: GameConfig, first_start: bool, seed: u64) -> Result<Self, DialogueError> {
        let document = DialogueDocument::load(&config.dialogue.path)?;
        Ok(Self::with_document(config, Arc::new(document), first_start, seed))
    }

    /// Build a scene around an already loaded dialogue document.
    pub fn with_document(
        config: GameConfig,
        document: Arc<DialogueDocument>,
        first_start: bool,
        seed: u64,
    ) -> Self {
        Self::build(config, document, first_start, seed, 0)
    }

    fn build(
        config: GameConfig,
        document: Arc<DialogueDocument>,
        first_start: bool,
        seed: u64,
        generation: u64,
    ) -> Self {
        // The island shape depends only on the seed; everything random about
        // a play-through changes with each rebuild
        let mut terrain_rng = StdRng::seed_from_u64(seed);
        let mut play_rng =
            StdRng::seed_from_u64(seed ^ generation.wrapping_mul(0x9E37_79B9_7F4A_7C15));

        let heightmap = generate_heightmap(&config.terrain, &mut terrain_rng);
        let painter = SplatPainter::new(config.terrain.thresholds, config.terrain.layers.clone());
        let terrain_layers = painter.create_layers(&mut play_rng);
        let terrain_weights = painter.paint(&heightmap);

        let half_height = config.movement.player_height * 0.5;
        let ground_at = |xz: Vec2| heightmap.height_at(xz.x, xz.y);
        let player_spawn = Vec3::new(
            config.player_spawn.x,
            ground_at(config.player_spawn) + half_height + 0.05,
            config.player_spawn.y,
        );
        let player = PlayerMovement::new(player_spawn, config.movement);

        let mut camera = CameraController::new();
        camera.sensitivity_x = config.camera.sensitivity_x;
        camera.sensitivity_y = config.camera.sensitivity_y;
        camera.fov_degrees = config.camera.fov_degrees;
        camera.follow_offset = config.camera.follow_offset;

        let mut spawner = CollectibleSpawner::new(
            config.spawner,
            SpawnArea::from_configs(&config.spawn_areas),
            play_rng.r#gen(),
        );
        spawner.initial_fill(&heightmap);

        let giver_xz = config.quest_giver_position;
        let quest_giver = QuestGiver::new(
            document.clone(),
            config.dialogue.quest_start_id.clone(),
            Vec3::new(giver_xz.x, ground_at(giver_xz), giver_xz.y),
        );
        let dialogue = DialogueManager::new(
            document.clone(),
            config.dialogue.manager_start_id.clone(),
            config.dialogue.auto_advance_delay,
        );

        let underwater = UnderwaterEffect::new(
            surface_fog(&config),
            &config.underwater,
            water_volume(&heightmap, config.terrain.water_level),
            true,
        );

        let mut scene = Self {
            session: GameSession::new(config.session),
            config,
            document,
            seed,
            generation,
            heightmap,
            terrain_layers,
            terrain_weights,
            player_spawn,
            player,
            camera,
            spawner,
            quest_giver,
            dialogue,
            underwater,
            screen: Screen::new(1280.0, 720.0),
            accumulator: 0.0,
            time: 0.0,
        };

        let mut events = Vec::new();
        if first_start {
            let event = scene.quest_giver.show_initial_message();
            scene.on_dialogue_event(DialogueTarget::QuestGiver, event, &mut events);
        } else {
            scene.start_session(&mut events);
        }
        scene.refresh_control();
        scene
    }

    /// Close any open dialogue, then rebuild from config, skipping the intro.
    ///
    /// Returns what happened, in order.
    pub fn restart(&mut self) -> Vec<SceneEvent> {
        log::info!("Restarting scene");
        let mut events = Vec::new();
        let closed_giver = self.quest_giver.end();
        let closed_manager = self.dialogue.end();
        if closed_giver.is_some() || closed_manager.is_some() {
            events.push(SceneEvent::DialogueEnded);
        }

        let screen = self.screen;
        *self = Self::build(
            self.config.clone(),
            self.document.clone(),
            false,
            self.seed,
            self.generation + 1,
        );
        self.screen = screen;
        events.push(SceneEvent::Restarted);
        events.push(SceneEvent::SessionStarted);
        events
    }

    /// Window size for UI layout and click hit-testing.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.screen = Screen::new(width as f32, height as f32);
    }

    /// Advance one frame.
    pub fn update(&mut self, dt: f32, input: &FrameInput) -> SceneOutput {
        let dt = dt.max(0.0);
        let mut output = SceneOutput::default();
        self.time += dt;

        if input.triggered(InputAction::Escape) {
            output.events.push(SceneEvent::Quit);
        }

        if self.restart_requested(input) {
            output.events.extend(self.restart());
            output.static_meshes_dirty = true;
            output.cursor_locked = self.cursor_locked();
            return output;
        }

        self.route_dialogue_input(input, &mut output.events);
        if let Some(event) = self.dialogue.update(dt) {
            self.on_dialogue_event(DialogueTarget::Manager, event, &mut output.events);
        }

        self.camera
            .apply_look(input.look_delta, &mut self.player.yaw_degrees);
        if input.triggered(InputAction::Jump) {
            self.player.jump();
        }
        self.player.update(dt, input.move_input, &self.heightmap);

        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP && steps < MAX_FIXED_STEPS {
            self.player.fixed_update(FIXED_TIMESTEP, &self.heightmap);
            self.collect_touching(&mut output.events);
            self.accumulator -= FIXED_TIMESTEP;
            steps += 1;
        }
        if steps == MAX_FIXED_STEPS {
            self.accumulator = 0.0;
        }
        self.recover_fallen_player();

        if let Some(outcome) = self.session.tick(dt) {
            self.on_session_ended(outcome, &mut output.events);
        }

        match self.underwater.update(dt, self.player.position()) {
            Some(TriggerEvent::Enter) => output.events.push(SceneEvent::EnteredWater),
            Some(TriggerEvent::Exit) => output.events.push(SceneEvent::LeftWater),
            None => {}
        }

        output.cursor_locked = self.cursor_locked();
        output
    }

    fn restart_requested(&self, input: &FrameInput) -> bool {
        if !matches!(self.session.phase(), SessionPhase::Ended(_)) {
            return false;
        }
        input.triggered(InputAction::Restart)
            || input
                .clicks
                .iter()
                .any(|click| ui::restart_clicked(self.screen, *click))
    }

    /// Turn keys and clicks into dialogue input for whichever front-end owns
    /// the screen. The quest giver takes priority while it is open.
    fn route_dialogue_input(&mut self, input: &FrameInput, events: &mut Vec<SceneEvent>) {
        let target = if self.quest_giver.is_active() {
            DialogueTarget::QuestGiver
        } else {
            DialogueTarget::Manager
        };

        let mut intents = Vec::new();
        for action in &input.actions {
            match action {
                InputAction::AdvanceDialogue => intents.push(DialogueInput::Advance),
                InputAction::BeginDialogue => intents.push(DialogueInput::Begin),
                InputAction::Choose(index) => intents.push(DialogueInput::Choose(*index as usize)),
                _ => {}
            }
        }
        if self.dialogue_active(target) {
            let choices = self.choice_labels(target);
            for click in &input.clicks {
                intents.push(match ui::hit_choice(self.screen, &choices, *click) {
                    Some(index) => DialogueInput::Choose(index),
                    None => DialogueInput::ClickAway,
                });
            }
        }

        for intent in intents {
            let event = match target {
                DialogueTarget::QuestGiver => self.quest_giver.handle(intent),
                DialogueTarget::Manager => self.dialogue.handle(intent),
            };
            if let Some(event) = event {
                self.on_dialogue_event(target, event, events);
            }
        }
    }

    fn dialogue_active(&self, target: DialogueTarget) -> bool {
        match target {
            DialogueTarget::QuestGiver => self.quest_giver.is_active(),
            DialogueTarget::Manager => self.dialogue.is_active(),
        }
    }

    fn choice_labels(&self, target: DialogueTarget) -> Vec<String> {
        let runner = match target {
            DialogueTarget::QuestGiver => self.quest_giver.runner(),
            DialogueTarget::Manager => self.dialogue.runner(),
        };
        runner.choices().iter().map(|r| r.text.clone()).collect()
    }

    fn on_dialogue_event(
        &mut self,
        target: DialogueTarget,
        event: DialogueEvent,
        events: &mut Vec<SceneEvent>,
    ) {
        match event {
            DialogueEvent::Shown { node_id, .. } => {
                events.push(SceneEvent::DialogueShown { node_id });
            }
            DialogueEvent::Ended => {
                events.push(SceneEvent::DialogueEnded);
                if target == DialogueTarget::QuestGiver {
                    self.start_session(events);
                }
            }
        }
        self.refresh_control();
    }

    fn start_session(&mut self, events: &mut Vec<SceneEvent>) {
        self.session.start();
        events.push(SceneEvent::SessionStarted);
        self.refresh_control();
    }

    fn on_session_ended(&mut self, outcome: Outcome, events: &mut Vec<SceneEvent>) {
        events.push(SceneEvent::SessionEnded(outcome));
        self.refresh_control();
    }

    /// Movement follows the session and the quest giver; camera look also
    /// pauses while the Q-key dialogue is open.
    fn refresh_control(&mut self) {
        let control = self.session.is_active() && !self.quest_giver.is_active();
        self.player.set_enabled(control);
        self.camera.enabled = control && !self.dialogue.is_active();
    }

    fn cursor_locked(&self) -> bool {
        self.camera.enabled
    }

    fn collect_touching(&mut self, events: &mut Vec<SceneEvent>) {
        if !self.session.is_active() {
            return;
        }
        let half_segment = (self.config.movement.player_height * 0.5 - PLAYER_RADIUS).max(0.0);
        let Some(id) =
            self.spawner
                .find_touching(self.player.position(), half_segment, PLAYER_RADIUS)
        else {
            return;
        };
        self.pickup(id, events);
    }

    fn pickup(&mut self, id: CollectibleId, events: &mut Vec<SceneEvent>) {
        let phase = self.session.pickup();
        events.push(SceneEvent::Pickup {
            score: self.session.score(),
        });
        self.spawner.on_collected(id, &self.heightmap);
        if let SessionPhase::Ended(outcome) = phase {
            self.on_session_ended(outcome, events);
        }
    }

    fn recover_fallen_player(&mut self) {
        if self.player.position().y < self.config.terrain.water_level - FALL_LIMIT {
            log::warn!("Player fell out of the world, returning to spawn");
            self.player.teleport(self.player_spawn);
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn spawner(&self) -> &CollectibleSpawner {
        &self.spawner
    }

    pub fn player(&self) -> &PlayerMovement {
        &self.player
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn quest_giver(&self) -> &QuestGiver {
        &self.quest_giver
    }

    pub fn dialogue_manager(&self) -> &DialogueManager {
        &self.dialogue
    }

    pub fn underwater(&self) -> &UnderwaterEffect {
        &self.underwater
    }

    pub fn heightmap(&self) -> &Heightmap {
        &self.heightmap
    }

    pub fn terrain_weights(&self) -> &WeightRaster {
        &self.terrain_weights
    }

    pub fn terrain_layers(&self) -> &[TerrainLayer; 3] {
        &self.terrain_layers
    }

    /// Put the player somewhere (debugging and tests).
    pub fn teleport_player(&mut self, position: Vec3) {
        self.player.teleport(position);
    }

    // ------------------------------------------------------------------
    // Rendering data
    // ------------------------------------------------------------------

    pub fn camera_position(&self) -> Vec3 {
        self.camera
            .eye_position(self.player.position(), self.player.yaw_degrees)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.camera
            .view_projection(self.player.position(), self.player.yaw_degrees, aspect)
    }

    pub fn fog(&self) -> FogSettings {
        self.underwater.fog()
    }

    pub fn fog_mode(&self) -> FogMode {
        self.config.visual.fog_mode
    }

    /// Background follows the fog color
    pub fn clear_color(&self) -> [f32; 4] {
        self.underwater
            .background_color()
            .unwrap_or(self.config.visual.fog_color)
    }

    pub fn sun_direction(&self) -> Vec3 {
        self.config.visual.sun_direction
    }

    pub fn ambient(&self) -> f32 {
        self.config.visual.ambient_intensity
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn terrain_mesh(&self) -> Mesh {
        generate_terrain_mesh(&self.heightmap, &self.terrain_weights, &self.terrain_layers)
    }

    pub fn water_mesh(&self) -> Mesh {
        generate_water_plane(
            &self.heightmap,
            self.config.terrain.water_level,
            self.config.visual.water_color,
        )
    }

    /// Player, quest giver and collectibles for this frame
    pub fn dynamic_mesh(&self) -> Mesh {
        let visual = &self.config.visual;
        let mut mesh = Mesh::new();

        let half_height = self.config.movement.player_height * 0.5;
        mesh.merge(&generate_box(
            self.player.position(),
            Vec3::new(PLAYER_RADIUS, half_height, PLAYER_RADIUS),
            Quat::from_rotation_y(-self.player.yaw_degrees.to_radians()),
            visual.player_color,
        ));

        let giver = self.quest_giver.position;
        mesh.merge(&generate_box(
            giver + Vec3::Y * 0.9,
            Vec3::new(0.4, 0.9, 0.4),
            Quat::IDENTITY,
            visual.quest_giver_color,
        ));
        mesh.merge(&generate_sphere(
            giver + Vec3::Y * 2.1,
            0.3,
            visual.quest_giver_color,
            8,
        ));

        for collectible in self.spawner.collectibles() {
            let bob = (self.time * 2.0 + collectible.id().0 as f32).sin() * 0.15;
            mesh.merge(&generate_sphere(
                collectible.position() + Vec3::Y * bob,
                collectible.radius(),
                visual.collectible_color,
                10,
            ));
        }
        mesh
    }

    /// HUD, end panel and dialogue panel for the current state
    pub fn ui_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();
        let screen = self.screen;

        if self.session.phase() != SessionPhase::NotStarted {
            ui::draw_hud(
                &mut mesh,
                screen,
                &self.session.score_text(),
                &self.session.timer_text(),
            );
        }

        let panel = if self.quest_giver.is_active() {
            Some((self.quest_giver.runner(), self.quest_giver.shows_prompt()))
        } else if self.dialogue.is_active() {
            Some((self.dialogue.runner(), false))
        } else {
            None
        };
        if let Some((runner, prompt)) = panel {
            if let Some(node) = runner.current_node() {
                let choices: Vec<String> =
                    runner.choices().iter().map(|r| r.text.clone()).collect();
                ui::draw_dialogue_panel(
                    &mut mesh,
                    screen,
                    &node.text,
                    &choices,
                    prompt.then_some(CONTINUE_PROMPT),
                );
            }
        }

        if let Some(text) = self.session.end_text() {
            ui::draw_end_panel(&mut mesh, screen, &text);
        }
        mesh
    }
}

fn surface_fog(config: &GameConfig) -> FogSettings {
    FogSettings {
        color: config.visual.fog_color,
        density: config.visual.fog_density,
        start: config.visual.fog_start,
        end: config.visual.fog_end,
    }
}

/// Seed from the config, or a fresh one from the OS.
pub fn resolve_seed(config: &GameConfig) -> u64 {
    config.seed.unwrap_or_else(|| rand::thread_rng().r#gen())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::dialogue::DialogueNode;

    fn document() -> Arc<DialogueDocument> {
        Arc::new(DialogueDocument::from_nodes(vec![
            DialogueNode::new("intro_1", "Find ten shells", Some("exit")),
        ]))
    }

    #[test]
    fn test_first_start_waits_for_intro() {
        let mut scene = Scene::with_document(GameConfig::default(), document(), true, 1);
        assert_eq!(scene.session().phase(), SessionPhase::NotStarted);
        assert!(!scene.player().enabled);
        assert!(!scene.camera().enabled);

        let frame = FrameInput {
            actions: vec![InputAction::AdvanceDialogue],
            ..Default::default()
        };
        let out = scene.update(0.016, &frame);
        assert!(out.contains(&SceneEvent::DialogueEnded));
        assert!(out.contains(&SceneEvent::SessionStarted));
        assert!(scene.session().is_active());
        assert!(scene.player().enabled);
        assert!(out.cursor_locked);
    }

    #[test]
    fn test_rebuilt_scene_skips_intro() {
        let scene = Scene::with_document(GameConfig::default(), document(), false, 1);
        assert!(scene.session().is_active());
        assert!(!scene.quest_giver().is_active());
    }

    #[test]
    fn test_initial_collectibles() {
        let scene = Scene::with_document(GameConfig::default(), document(), false, 2);
        assert_eq!(scene.spawner().collectibles().len(), 3);
    }
}
