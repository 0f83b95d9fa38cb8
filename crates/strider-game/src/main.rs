//! Headless first-person character demo.
//!
//! Loads configuration, initializes logging, then runs a scripted walk,
//! turn, jump, and pause sequence against the physics session.

mod scenario;

use clap::Parser;
use strider_config::{CliArgs, Config};
use tracing::info;

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .expect("Failed to resolve config directory")
            .join("strider")
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    // Initialize logging with config and debug settings
    let log_dir = config_dir.join("logs");
    strider_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    info!("{} starting", config.window.title);
    info!(
        "Window {}x{}, fullscreen: {}",
        config.window.width, config.window.height, config.window.fullscreen
    );
    info!(
        "Physics: {} Hz, gravity {:?}, {} solver iterations",
        config.physics.timestep_hz, config.physics.gravity, config.physics.solver_iterations
    );

    let frames = args.frames.unwrap_or(900);
    scenario::run(&config, frames);
}
