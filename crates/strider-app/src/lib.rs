//! Strider application framework.
//!
//! Provides the fixed-timestep game loop and the gameplay session that it
//! drives.

pub mod game_loop;
pub mod session;

pub use game_loop::GameLoop;
pub use session::{Session, SessionError, SessionState};
