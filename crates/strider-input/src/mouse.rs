//! Tick-coherent mouse-look delta tracker.
//!
//! [`MouseState`] accumulates relative pointer motion delivered between
//! simulation ticks. The look controller drains the accumulated delta exactly
//! once per tick via [`take_delta`](MouseState::take_delta); whether the delta
//! actually rotates the view is the controller's decision (it discards input
//! while look is disabled).

use glam::Vec2;

/// Accumulated relative mouse motion since the last drain.
#[derive(Debug, Clone)]
pub struct MouseState {
    delta: Vec2,
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new()
    }
}

impl MouseState {
    /// Creates a new `MouseState` with zero accumulated motion.
    #[must_use]
    pub fn new() -> Self {
        Self { delta: Vec2::ZERO }
    }

    /// Process a `DeviceEvent::MouseMotion` raw delta.
    ///
    /// Raw deltas are used rather than cursor-position differences so look
    /// input keeps flowing when the host shell confines or locks the cursor.
    pub fn on_raw_motion(&mut self, dx: f64, dy: f64) {
        self.delta += Vec2::new(dx as f32, dy as f32);
    }

    /// Returns the accumulated delta without draining it.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Drains the accumulated delta, resetting it to zero.
    ///
    /// Call exactly once per simulation tick.
    pub fn take_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.delta)
    }
}
