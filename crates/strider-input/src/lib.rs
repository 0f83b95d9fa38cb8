//! Input abstraction: keyboard and mouse state mapped through configurable action bindings.

pub mod bindings;
pub mod keyboard;
pub mod mouse;

pub use bindings::{Action, Bindings};
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;
