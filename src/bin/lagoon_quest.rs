//! Lagoon Quest
//!
//! Run with: `cargo run --bin lagoon_quest`
//!
//! Controls:
//! - WASD: Move
//! - Mouse: Look around
//! - Space: Jump
//! - Enter: Continue the quest giver's dialogue
//! - Q: Open the dialogue tree
//! - 1-4 or click: Pick a dialogue response
//! - R or click the button: Restart after the game ends
//! - ESC: Exit
//!
//! Config is read from `assets/game.json` (override with `LAGOON_CONFIG`).
//! Log level follows `RUST_LOG`, defaulting to `info`.

use std::sync::Arc;

use lagoon_engine::game::{GameConfig, Mesh, Scene, SceneEvent, resolve_seed};
use lagoon_engine::input::{InputState, KeyCode};
use lagoon_engine::render::{GpuContextConfig, SceneCoordinator, UiMesh};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

/// Translate a winit key into the engine's key set
fn map_key(key: WinitKey) -> KeyCode {
    match key {
        WinitKey::KeyW => KeyCode::W,
        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::KeyE => KeyCode::E,
        WinitKey::KeyQ => KeyCode::Q,
        WinitKey::KeyR => KeyCode::R,
        WinitKey::Space => KeyCode::Space,
        WinitKey::ShiftLeft => KeyCode::ShiftLeft,
        WinitKey::ShiftRight => KeyCode::ShiftRight,
        WinitKey::ArrowUp => KeyCode::ArrowUp,
        WinitKey::ArrowDown => KeyCode::ArrowDown,
        WinitKey::ArrowLeft => KeyCode::ArrowLeft,
        WinitKey::ArrowRight => KeyCode::ArrowRight,
        WinitKey::Digit1 => KeyCode::Digit1,
        WinitKey::Digit2 => KeyCode::Digit2,
        WinitKey::Digit3 => KeyCode::Digit3,
        WinitKey::Digit4 => KeyCode::Digit4,
        WinitKey::Escape => KeyCode::Escape,
        WinitKey::Enter => KeyCode::Enter,
        WinitKey::NumpadEnter => KeyCode::NumpadEnter,
        WinitKey::Tab => KeyCode::Tab,
        _ => KeyCode::Unknown,
    }
}

fn to_ui_mesh(mesh: Mesh) -> UiMesh {
    UiMesh {
        vertices: mesh.vertices,
        indices: mesh.indices,
    }
}

struct AppState {
    window: Arc<Window>,
    renderer: SceneCoordinator,
    scene: Scene,
    input: InputState,
    cursor_locked: bool,
}

impl AppState {
    fn new(window: Arc<Window>, config: GameConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let seed = resolve_seed(&config);
        log::info!("World seed {seed}");

        let renderer = SceneCoordinator::new(window.clone(), GpuContextConfig::default())?;
        let mut scene = Scene::new(config, true, seed)?;
        let (width, height) = renderer.dimensions();
        scene.resize(width, height);

        let mut state = Self {
            window,
            renderer,
            scene,
            input: InputState::new(),
            cursor_locked: false,
        };
        state.upload_static_meshes();
        state.set_cursor_locked(state.scene.camera().enabled);
        Ok(state)
    }

    fn upload_static_meshes(&mut self) {
        let terrain = self.scene.terrain_mesh();
        let water = self.scene.water_mesh();
        let (mesh_pass, device) = self.renderer.mesh_pass_and_device();
        mesh_pass.clear_static_meshes();
        mesh_pass.add_static_mesh(device, "Terrain", &terrain.vertices, &terrain.indices);
        mesh_pass.add_static_mesh(device, "Water", &water.vertices, &water.indices);
        log::info!(
            "Uploaded terrain ({} triangles) and water",
            terrain.triangle_count()
        );
    }

    /// Lock the cursor for mouse look, or free it for UI clicks.
    fn set_cursor_locked(&mut self, locked: bool) {
        if self.cursor_locked == locked {
            return;
        }
        self.cursor_locked = locked;
        if locked {
            let grabbed = self
                .window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                log::warn!("Cursor grab unavailable: {e}");
            }
        } else if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("Cursor release failed: {e}");
        }
        self.window.set_cursor_visible(!locked);
        self.input.pointer.set_captured(locked);
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.renderer.resize(size.width, size.height);
        self.scene.resize(size.width, size.height);
    }

    /// Simulate one frame. Returns false when the game asked to quit.
    fn update(&mut self) -> bool {
        let dt = self.renderer.update();
        let frame = self.input.take_frame();
        let output = self.scene.update(dt, &frame);

        if output.static_meshes_dirty {
            self.upload_static_meshes();
        }
        self.set_cursor_locked(output.cursor_locked);

        for event in &output.events {
            match event {
                SceneEvent::Pickup { score } => log::debug!("Pickup, score {score}"),
                SceneEvent::SessionEnded(outcome) => log::info!("Game over: {outcome:?}"),
                _ => {}
            }
        }
        !output.contains(&SceneEvent::Quit)
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let aspect = self.renderer.aspect_ratio();
        let fog = self.scene.fog();
        let fog_mode = self.scene.fog_mode();
        let view_proj = self.scene.view_projection(aspect);
        let camera_pos = self.scene.camera_position().to_array();
        let time = self.scene.time();
        let dynamic = self.scene.dynamic_mesh();
        let ui = self.scene.ui_mesh();

        let mesh_pass = self.renderer.mesh_pass_mut();
        mesh_pass.update_camera(view_proj, camera_pos, time);
        mesh_pass.set_fog(fog.color, fog.density, fog.start, fog.end, fog_mode);
        mesh_pass.set_lighting(self.scene.sun_direction(), self.scene.ambient());
        mesh_pass.set_dynamic_mesh(&dynamic.vertices, &dynamic.indices);
        self.renderer.ui_pass_mut().set_mesh(to_ui_mesh(ui));

        self.renderer.render(self.scene.clear_color())
    }
}

struct App {
    config: Option<GameConfig>,
    state: Option<AppState>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let Some(config) = self.config.take() else {
            return;
        };

        let window_attrs = WindowAttributes::default()
            .with_title("Lagoon Quest")
            .with_inner_size(PhysicalSize::new(1280, 720));
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match AppState::new(window, config) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Failed to start: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                state.resize(new_size);
            }
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                state
                    .input
                    .handle_key(map_key(key), key_state == ElementState::Pressed);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => {
                state.input.pointer.click();
            }
            WindowEvent::CursorMoved { position, .. } => {
                state
                    .input
                    .pointer
                    .set_cursor_position(position.x as f32, position.y as f32);
            }
            WindowEvent::Focused(false) => {
                state.input.reset();
                state.input.pointer.set_captured(state.cursor_locked);
            }
            WindowEvent::RedrawRequested => {
                if !state.update() {
                    event_loop.exit();
                    return;
                }

                match state.render() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("Render error: {e:?}"),
                }

                state.window.request_redraw();
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        let Some(state) = &mut self.state else {
            return;
        };
        if let DeviceEvent::MouseMotion { delta } = event {
            state
                .input
                .pointer
                .accumulate_delta(delta.0 as f32, delta.1 as f32);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::load_or_default();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        config: Some(config),
        state: None,
    };
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {e}");
        std::process::exit(1);
    }
}
