//! Yaw extraction: the single conversion point between the full look
//! orientation and the movement domain.
//!
//! Movement follows where the player faces horizontally but must never tilt
//! into the ground or sky, so the pitched look quaternion cannot rotate the
//! heading directly. The look orientation is decomposed in YXZ order, which
//! isolates the rotation about world-up from pitch, and a yaw-only quaternion
//! is rebuilt from that angle. Every heading rotation goes through this
//! module; no other code converts between the two representations.

use glam::{EulerRot, Quat, Vec3};

/// Strips pitch (and any residual roll) from `orientation`, returning the
/// rotation about world-up alone.
#[must_use]
pub fn yaw_only(orientation: Quat) -> Quat {
    let (yaw, _pitch, _roll) = orientation.to_euler(EulerRot::YXZ);
    Quat::from_rotation_y(yaw)
}

/// Rotates a movement heading by the yaw component of `orientation`.
///
/// A horizontal heading stays horizontal for every pitch angle.
#[must_use]
pub fn rotate_heading(orientation: Quat, heading: Vec3) -> Vec3 {
    yaw_only(orientation) * heading
}
