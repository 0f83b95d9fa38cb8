//! Player-facing control: mouse look, yaw extraction, and walk intent.

pub mod look;
pub mod movement;
pub mod orientation;

pub use look::LookController;
pub use movement::movement_intent;
pub use orientation::{rotate_heading, yaw_only};
