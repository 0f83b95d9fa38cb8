//! Mouse-look controller: accumulates yaw and pitch from pointer deltas and
//! anchors the camera to the character.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

/// First-person look state: yaw/pitch driven by relative mouse movement.
///
/// Yaw is unbounded and wraps through trigonometric periodicity; pitch is
/// clamped so the view can never flip past straight up or straight down.
/// While `enabled` is false (pointer not captured), deltas are ignored and
/// the anchor stops tracking, but accumulated angles are frozen rather than
/// reset so releasing the pointer never snaps the view.
#[derive(Clone, Debug)]
pub struct LookController {
    /// Horizontal rotation in radians. Turning the mouse right decreases yaw.
    pub yaw: f32,
    /// Vertical rotation in radians. Positive pitch looks up.
    pub pitch: f32,
    /// Mouse sensitivity multiplier applied to raw mouse delta.
    pub mouse_sensitivity: f32,
    /// Inverts the vertical axis when set.
    pub invert_y: bool,
    /// Camera eye offset above the anchor point, in meters.
    pub eye_height: f32,
    /// Whether pointer input and anchor tracking are active.
    pub enabled: bool,
    /// Anchor position, tracking the character body while enabled.
    pub position: Vec3,
}

impl Default for LookController {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            mouse_sensitivity: 0.002,
            invert_y: false,
            eye_height: 0.8,
            enabled: false,
            position: Vec3::new(0.0, 2.0, 0.0),
        }
    }
}

impl LookController {
    /// Creates a controller with the given tuning, starting disabled.
    #[must_use]
    pub fn new(mouse_sensitivity: f32, invert_y: bool, eye_height: f32) -> Self {
        Self {
            mouse_sensitivity,
            invert_y,
            eye_height,
            ..Default::default()
        }
    }

    /// Compute the composed orientation: yaw about world-up, then pitch
    /// nested under it.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Apply mouse delta to yaw and pitch, clamping pitch to ±90 degrees.
    ///
    /// No-op while disabled.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        if !self.enabled {
            return;
        }
        let dy = if self.invert_y { -dy } else { dy };
        self.yaw -= dx * self.mouse_sensitivity;
        self.pitch -= dy * self.mouse_sensitivity;
        self.pitch = self.pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Track the character: copies `body_position` into the anchor while
    /// enabled.
    pub fn follow(&mut self, body_position: Vec3) {
        if self.enabled {
            self.position = body_position;
        }
    }

    /// World-space camera eye: the anchor plus the rotated eye offset.
    #[must_use]
    pub fn eye_position(&self) -> Vec3 {
        self.position + self.rotation() * Vec3::new(0.0, self.eye_height, 0.0)
    }
}
