//! Game Configuration
//!
//! Every tunable of the lagoon scene in one serde struct. All fields are
//! optional in the JSON file; anything left out keeps its default.

use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::visual_config::VisualConfig;
use crate::game::dialogue::DialogueSettings;
use crate::game::session::SessionSettings;
use crate::game::spawner::SpawnerSettings;
use crate::game::terrain::TerrainSettings;
use crate::game::underwater::UnderwaterSettings;
use crate::player::MovementSettings;

/// Environment variable that overrides the config file path.
pub const CONFIG_PATH_ENV: &str = "LAGOON_CONFIG";

/// Config file used when the environment variable is unset.
pub const DEFAULT_CONFIG_PATH: &str = "assets/game.json";

/// Errors from loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Mouse-look tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Degrees of yaw per pixel of horizontal mouse motion
    pub sensitivity_x: f32,
    /// Degrees of pitch per pixel of vertical mouse motion
    pub sensitivity_y: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Offset from the eye pivot: x = right, y = up, z = back
    pub follow_offset: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            sensitivity_x: 0.1,
            sensitivity_y: 0.1,
            fov_degrees: 60.0,
            follow_offset: Vec3::new(0.6, 0.3, 3.5),
        }
    }
}

/// One spawn area as placed in the scene.
///
/// `size` is optional so a misconfigured area can be detected and skipped
/// at spawn time instead of rejecting the whole file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnAreaConfig {
    pub center: Vec3,
    #[serde(default)]
    pub size: Option<Vec3>,
    #[serde(default)]
    pub yaw_degrees: f32,
}

impl SpawnAreaConfig {
    pub fn new(center: Vec3, size: Vec3, yaw_degrees: f32) -> Self {
        Self {
            center,
            size: Some(size),
            yaw_degrees,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub session: SessionSettings,
    pub spawner: SpawnerSettings,
    pub spawn_areas: Vec<SpawnAreaConfig>,
    pub movement: MovementSettings,
    pub camera: CameraSettings,
    pub dialogue: DialogueSettings,
    pub underwater: UnderwaterSettings,
    pub terrain: TerrainSettings,
    pub visual: VisualConfig,
    /// Player start (x, z); height comes from the terrain
    pub player_spawn: Vec2,
    /// Quest giver location (x, z)
    pub quest_giver_position: Vec2,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            session: SessionSettings::default(),
            spawner: SpawnerSettings::default(),
            spawn_areas: default_spawn_areas(),
            movement: MovementSettings::default(),
            camera: CameraSettings::default(),
            dialogue: DialogueSettings::default(),
            underwater: UnderwaterSettings::default(),
            terrain: TerrainSettings::default(),
            visual: VisualConfig::default(),
            player_spawn: Vec2::new(0.0, 42.0),
            quest_giver_position: Vec2::new(3.0, 36.0),
            seed: None,
        }
    }
}

/// Six areas in a ring on the island's shoulder, tall enough to contain
/// anything resting on the ground beneath them.
fn default_spawn_areas() -> Vec<SpawnAreaConfig> {
    let size = Vec3::new(14.0, 80.0, 10.0);
    (0..6)
        .map(|i| {
            let angle = i as f32 * std::f32::consts::TAU / 6.0 + 0.3;
            let center = Vec3::new(angle.cos() * 48.0, 20.0, angle.sin() * 48.0);
            SpawnAreaConfig::new(center, size, angle.to_degrees())
        })
        .collect()
}

impl GameConfig {
    /// Parse a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a config file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Config path from `LAGOON_CONFIG`, falling back to `assets/game.json`.
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Load the configured file, or defaults when it is missing or invalid.
    pub fn load_or_default() -> Self {
        let path = Self::config_path();
        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::error!("{e}; using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config =
            GameConfig::from_json(r#"{ "session": { "target_score": 3 }, "seed": 7 }"#).unwrap();
        assert_eq!(config.session.target_score, 3);
        assert_eq!(config.session.duration, 90.0);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_spawn_area_without_size() {
        let config =
            GameConfig::from_json(r#"{ "spawn_areas": [ { "center": [1.0, 2.0, 3.0] } ] }"#)
                .unwrap();
        assert_eq!(config.spawn_areas.len(), 1);
        assert!(config.spawn_areas[0].size.is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load_from("definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_default_areas_are_tall() {
        for area in default_spawn_areas() {
            let size = area.size.unwrap();
            assert!(size.y >= 60.0);
        }
    }
}
