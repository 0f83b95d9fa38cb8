//! Tick-coherent keyboard state tracker.
//!
//! [`KeyboardState`] accumulates key events delivered between simulation ticks
//! and answers three questions for any key code: is it held, was it just
//! pressed this tick, and was it just released this tick. The simulation reads
//! it only at tick boundaries, so a state change becomes visible starting from
//! the next tick after delivery.
//!
//! Key codes are physical (scan-code based) so that WASD movement works
//! identically regardless of the user's keyboard layout. Keys the platform
//! cannot identify are dropped; bindings only ever refer to real codes.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key code involved.
    pub code: KeyCode,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is a repeat event.
    pub repeat: bool,
}

/// Tracks per-tick keyboard state using physical key codes.
///
/// # Usage
///
/// 1. Forward every [`KeyEvent`] to [`process_event`](Self::process_event).
/// 2. Query state with [`is_pressed`](Self::is_pressed),
///    [`just_pressed`](Self::just_pressed), [`just_released`](Self::just_released).
/// 3. Call [`clear_transients`](Self::clear_transients) at the end of each tick.
#[derive(Debug, Clone)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
    just_released: HashSet<KeyCode>,
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardState {
    /// Creates a new `KeyboardState` with no keys pressed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    /// Processes a winit [`KeyEvent`], updating internal state.
    ///
    /// Keys without a known [`KeyCode`] (`PhysicalKey::Unidentified`) are
    /// ignored. Repeat events are ignored.
    pub fn process_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(code) = event.physical_key {
            self.process_raw(RawKeyEvent {
                code,
                state: event.state,
                repeat: event.repeat,
            });
        }
    }

    /// Processes a [`RawKeyEvent`] (platform-independent, test-friendly).
    ///
    /// - **Pressed** (non-repeat): inserts into `pressed` and `just_pressed`.
    /// - **Released**: removes from `pressed`, inserts into `just_released`.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                self.pressed.insert(event.code);
                self.just_pressed.insert(event.code);
            }
            ElementState::Released => {
                self.pressed.remove(&event.code);
                self.just_released.insert(event.code);
            }
        }
    }

    /// Returns `true` while the key is held down.
    #[must_use]
    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.pressed.contains(&code)
    }

    /// Returns `true` only during the tick the key transitioned to pressed.
    #[must_use]
    pub fn just_pressed(&self, code: KeyCode) -> bool {
        self.just_pressed.contains(&code)
    }

    /// Returns `true` only during the tick the key transitioned to released.
    #[must_use]
    pub fn just_released(&self, code: KeyCode) -> bool {
        self.just_released.contains(&code)
    }

    /// Clears `just_pressed` and `just_released` sets. Call at end of tick.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
