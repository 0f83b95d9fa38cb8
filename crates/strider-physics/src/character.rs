//! Player character body: dynamic capsule driven by per-tick position deltas.
//!
//! The character is a dynamic rigid body so gravity, contacts, and the
//! constraint solver act on it every step, but walking is applied as a direct
//! translation delta rather than a force. Rotation is locked so contacts can
//! never tip the capsule over.

use rapier3d::prelude::*;

use crate::error::ConstructionError;
use crate::PhysicsWorld;

/// Character mass in kilograms. Kept at exactly 1 so impulse and delta-v coincide.
const PLAYER_MASS: f32 = 1.0;
/// Linear velocity damping factor.
const LINEAR_DAMPING: f32 = 0.9;
/// Angular velocity damping factor.
const ANGULAR_DAMPING: f32 = 0.9;

/// Player character state: dynamic body + compound capsule collider.
pub struct CharacterBody {
    /// Handle to the dynamic rigid body in the physics world.
    pub body_handle: RigidBodyHandle,
    /// Handle to the compound capsule collider attached to the body.
    pub collider_handle: ColliderHandle,
    /// Whether a qualifying ground contact has been seen since the last jump.
    pub grounded: bool,
}

/// Builds the character capsule as a compound of three sub-shapes: a cylinder
/// for the trunk and a sphere cap at each end.
///
/// The total capsule height is `cylinder_height + 2 * radius`.
///
/// # Errors
/// Returns [`ConstructionError`] if either dimension is zero, negative, or NaN.
pub fn capsule_shapes(
    radius: f32,
    cylinder_height: f32,
) -> Result<Vec<(Isometry<Real>, SharedShape)>, ConstructionError> {
    if !(radius > 0.0) {
        return Err(ConstructionError::NonPositiveRadius(radius));
    }
    if !(cylinder_height > 0.0) {
        return Err(ConstructionError::NonPositiveHeight(cylinder_height));
    }

    let half = cylinder_height / 2.0;
    Ok(vec![
        (Isometry::identity(), SharedShape::cylinder(half, radius)),
        (Isometry::translation(0.0, half, 0.0), SharedShape::ball(radius)),
        (Isometry::translation(0.0, -half, 0.0), SharedShape::ball(radius)),
    ])
}

/// Spawns the player character at `spawn`: a dynamic body with locked
/// rotation, heavy velocity damping, and the compound capsule collider.
///
/// The character starts grounded so a jump queued on the very first tick is
/// honored even if the spawn point hangs in the air.
///
/// # Errors
/// Returns [`ConstructionError`] if the capsule dimensions are invalid.
pub fn spawn_character(
    world: &mut PhysicsWorld,
    radius: f32,
    cylinder_height: f32,
    spawn: glam::Vec3,
) -> Result<CharacterBody, ConstructionError> {
    let shapes = capsule_shapes(radius, cylinder_height)?;

    let body = RigidBodyBuilder::dynamic()
        .translation(Vector::new(spawn.x, spawn.y, spawn.z))
        .lock_rotations()
        .linear_damping(LINEAR_DAMPING)
        .angular_damping(ANGULAR_DAMPING)
        .build();
    let body_handle = world.rigid_body_set.insert(body);

    let collider = world
        .surface_material(ColliderBuilder::compound(shapes).mass(PLAYER_MASS))
        .build();
    let collider_handle =
        world
            .collider_set
            .insert_with_parent(collider, body_handle, &mut world.rigid_body_set);

    Ok(CharacterBody {
        body_handle,
        collider_handle,
        grounded: true,
    })
}

/// Translates the character by `delta` without touching its velocity.
///
/// Gravity and contact resolution still apply on the next step, so walking
/// into a wall is pushed back out by the solver. A zero delta is a no-op and
/// does not wake the body.
pub fn apply_movement(world: &mut PhysicsWorld, character: &CharacterBody, delta: glam::Vec3) {
    if delta == glam::Vec3::ZERO {
        return;
    }
    let body = &mut world.rigid_body_set[character.body_handle];
    let next = body.translation() + Vector::new(delta.x, delta.y, delta.z);
    body.set_translation(next, true);
}

/// Attempts a jump: adds `impulse` to the vertical velocity and consumes the
/// grounded flag.
///
/// Returns `false` without touching the body when the character is airborne.
/// The flag is not re-armed until a contact scan finds walkable ground again,
/// so holding the jump key cannot double-jump.
pub fn try_jump(world: &mut PhysicsWorld, character: &mut CharacterBody, impulse: f32) -> bool {
    if !character.grounded {
        return false;
    }
    let body = &mut world.rigid_body_set[character.body_handle];
    let mut velocity = *body.linvel();
    velocity.y += impulse;
    body.set_linvel(velocity, true);
    character.grounded = false;
    true
}

/// Returns the character's world-space position.
pub fn position(world: &PhysicsWorld, character: &CharacterBody) -> glam::Vec3 {
    let t = world.rigid_body_set[character.body_handle].translation();
    glam::Vec3::new(t.x, t.y, t.z)
}

/// Returns the character's linear velocity.
pub fn linear_velocity(world: &PhysicsWorld, character: &CharacterBody) -> glam::Vec3 {
    let v = world.rigid_body_set[character.body_handle].linvel();
    glam::Vec3::new(v.x, v.y, v.z)
}
