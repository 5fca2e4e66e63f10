//! Game Module
//!
//! The lagoon quest itself, built on top of the engine: a timed collection
//! session on a procedurally painted island, a quest giver and a dialogue
//! tree, and the underwater fog effect.

pub mod collectible;
pub mod config;
pub mod dialogue;
pub mod scene;
pub mod session;
pub mod spawner;
pub mod terrain;
pub mod types;
pub mod ui;
pub mod underwater;

pub use collectible::{Collectible, CollectibleId};
pub use config::{CameraSettings, ConfigError, GameConfig, SpawnAreaConfig, VisualConfig};
pub use dialogue::{
    AdvancePolicy, DialogueDocument, DialogueError, DialogueEvent, DialogueInput,
    DialogueManager, DialogueNode, DialogueRunner, DialogueState, QuestGiver,
};
pub use scene::{FIXED_TIMESTEP, Scene, SceneEvent, SceneOutput, resolve_seed};
pub use session::{GameSession, Outcome, SessionPhase, SessionSettings};
pub use spawner::{CollectibleSpawner, SpawnAllocator, SpawnArea, SpawnOutcome, SpawnerSettings};
pub use terrain::{SplatPainter, TerrainSettings};
pub use types::{Mesh, Vertex, fbm_noise, generate_box, generate_sphere, hash_2d, noise_2d};
pub use underwater::{FogSettings, UnderwaterEffect, UnderwaterSettings};
