//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings (consumed by the windowing shell).
    pub window: WindowConfig,
    /// Physics world settings.
    pub physics: PhysicsConfig,
    /// Player body and movement settings.
    pub player: PlayerConfig,
    /// Mouse-look settings.
    pub look: LookConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Window title.
    pub title: String,
}

/// Physics world configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// World gravity vector (m/s²).
    pub gravity: [f32; 3],
    /// Fixed simulation rate in Hz. The world steps by exactly `1/timestep_hz`.
    pub timestep_hz: u32,
    /// Constraint solver iteration count.
    pub solver_iterations: u32,
    /// Constraint solver convergence tolerance.
    pub solver_tolerance: f32,
    /// Friction coefficient of the shared surface material.
    pub friction: f32,
    /// Restitution (bounciness) of the shared surface material.
    pub restitution: f32,
}

/// Player body and movement configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Capsule radius in meters.
    pub capsule_radius: f32,
    /// Capsule cylinder height in meters (excluding the end spheres).
    pub capsule_height: f32,
    /// Horizontal displacement per simulation tick while a movement key is held.
    pub move_speed: f32,
    /// Upward velocity added by a jump (m/s).
    pub jump_impulse: f32,
    /// Spawn position in world space.
    pub spawn_position: [f32; 3],
    /// Minimum up-dot of a contact normal for the surface to count as ground.
    /// 1.0 restricts jumping to flat ground; values near 0 permit steep slopes.
    pub ground_normal_threshold: f32,
}

/// Mouse-look configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LookConfig {
    /// Radians of rotation per pixel of mouse movement.
    pub mouse_sensitivity: f32,
    /// Invert the vertical look axis.
    pub invert_y: bool,
    /// Camera eye height above the body origin in meters.
    pub eye_height: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log per-second tick statistics while the demo scenario runs.
    pub show_tick_stats: bool,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            fullscreen: false,
            title: "Strider".to_string(),
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -40.0, 0.0],
            timestep_hz: 120,
            solver_iterations: 7,
            solver_tolerance: 0.1,
            friction: 0.0,
            restitution: 0.0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            capsule_radius: 0.5,
            capsule_height: 2.0,
            move_speed: 0.1,
            jump_impulse: 24.0,
            spawn_position: [-2.0, 1.5, 15.0],
            ground_normal_threshold: 0.5,
        }
    }
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.002,
            invert_y: false,
            eye_height: 0.8,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_tick_stats: false,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
