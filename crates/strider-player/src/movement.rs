//! Walk intent: turns held movement keys into a per-tick displacement.

use glam::{Quat, Vec3};
use strider_input::{Action, Bindings, KeyboardState};

use crate::orientation::rotate_heading;

/// Computes the character's displacement for one tick.
///
/// Held keys accumulate unit contributions along the local axes (forward is
/// -Z, strafe right is +X). Opposing keys cancel by vector addition rather
/// than erroring. A non-zero result is normalized and scaled by `speed`, so
/// diagonals move no faster than cardinals, then rotated into world space by
/// the yaw component of `orientation`.
///
/// The result is a displacement in meters per tick, not a velocity.
#[must_use]
pub fn movement_intent(
    keyboard: &KeyboardState,
    bindings: &Bindings,
    speed: f32,
    orientation: Quat,
) -> Vec3 {
    let mut intent = Vec3::ZERO;
    if bindings.is_active(Action::MoveForward, keyboard) {
        intent.z -= 1.0;
    }
    if bindings.is_active(Action::MoveBack, keyboard) {
        intent.z += 1.0;
    }
    if bindings.is_active(Action::MoveLeft, keyboard) {
        intent.x -= 1.0;
    }
    if bindings.is_active(Action::MoveRight, keyboard) {
        intent.x += 1.0;
    }

    let scaled = intent.normalize_or_zero() * speed;
    rotate_heading(orientation, scaled)
}
