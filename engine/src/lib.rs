//! Lagoon Engine Library
//!
//! Host-agnostic building blocks for a small third-person exploration game,
//! plus the game itself. Everything except [`render`] is plain state and
//! math, driven once per frame by the host binary.
//!
//! # Modules
//!
//! - [`input`] - Platform-agnostic keyboard/pointer state and key bindings
//! - [`camera`] - Mouse-look camera riding on the player body
//! - [`physics`] - Rigid body, oriented boxes, trigger volumes, ground probes
//! - [`player`] - Force-driven player movement
//! - [`world`] - Heightmap ground geometry
//! - [`clock`] - Delayed callbacks against the frame clock
//! - [`render`] - wgpu mesh and UI passes
//! - [`game`] - Session, spawner, dialogue, terrain painting, UI and scene
//!
//! # Example
//!
//! ```ignore
//! use lagoon_engine::game::{GameConfig, Scene};
//! use lagoon_engine::input::InputState;
//!
//! let config = GameConfig::load_or_default();
//! let mut scene = Scene::new(config, true, 42)?;
//! let mut input = InputState::new();
//!
//! // Each frame:
//! let frame = input.take_frame();
//! let output = scene.update(dt, &frame);
//! ```

pub mod camera;
pub mod clock;
pub mod input;
pub mod physics;
pub mod player;
pub mod render;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used input types
pub use input::{FrameInput, InputAction, InputState, KeyCode};
// Re-export player types
pub use player::{MovementSettings, PlayerMovement};
