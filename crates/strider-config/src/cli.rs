//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Strider command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "strider", about = "Strider first-person character controller")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Mouse-look sensitivity (radians per pixel).
    #[arg(long)]
    pub mouse_sensitivity: Option<f32>,

    /// Horizontal movement per simulation tick.
    #[arg(long)]
    pub move_speed: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of frames the demo scenario runs before exiting.
    #[arg(long)]
    pub frames: Option<u64>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(sens) = args.mouse_sensitivity {
            self.look.mouse_sensitivity = sens;
        }
        if let Some(speed) = args.move_speed {
            self.player.move_speed = speed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> CliArgs {
        CliArgs {
            width: None,
            height: None,
            fullscreen: None,
            mouse_sensitivity: None,
            move_speed: None,
            log_level: None,
            config: None,
            frames: None,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            move_speed: Some(0.25),
            ..empty_args()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert!((config.player.move_speed - 0.25).abs() < f32::EPSILON);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 800);
        assert!((config.look.mouse_sensitivity - 0.002).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&empty_args());
        assert_eq!(config, original);
    }
}
