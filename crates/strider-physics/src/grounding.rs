//! Ground detection: classifies contact normals to decide whether the
//! character is standing on walkable ground.
//!
//! Contact normals reported by the narrow phase point from the first collider
//! of a pair toward the second, so the raw normal must be reoriented before
//! classification: when the character is the first collider the normal is
//! negated so it always points out of the touched surface toward the
//! character. A corrected normal within ~60 degrees of world-up counts as
//! ground.
//!
//! The grounded flag is sticky. A qualifying contact sets it; only a jump
//! clears it. Walking off a ledge keeps the flag armed until the jump is
//! actually spent.

use glam::Vec3;

use crate::character::CharacterBody;
use crate::PhysicsWorld;

/// Classifies a single contact normal.
///
/// `normal` is the raw pairwise normal, `player_is_first` tells whether the
/// character was the first collider in the pair, and `threshold` is the
/// minimum up-dot for a surface to count as ground (0.5 allows slopes up to
/// ~60 degrees; higher values restrict jumping to flatter ground).
///
/// The threshold comparison is strict, so a dot of exactly `threshold` does
/// not count as ground.
pub fn classify_contact(normal: Vec3, player_is_first: bool, threshold: f32) -> bool {
    let corrected = if player_is_first { -normal } else { normal };
    corrected.dot(Vec3::Y) > threshold
}

/// Scans contacts touching the character and re-arms the grounded flag if any
/// of them qualifies as ground.
///
/// Intended to run once per tick, immediately after the world step so the
/// narrow phase reflects the step's contact set. Non-qualifying scans leave
/// the flag unchanged.
pub fn refresh_grounded(world: &PhysicsWorld, character: &mut CharacterBody, threshold: f32) {
    for pair in world
        .narrow_phase
        .contact_pairs_with(character.collider_handle)
    {
        if !pair.has_any_active_contact {
            continue;
        }
        let player_is_first = pair.collider1 == character.collider_handle;
        for manifold in &pair.manifolds {
            let touching = manifold.points.iter().any(|contact| contact.dist <= 0.0);
            if !touching {
                continue;
            }
            let n = manifold.data.normal;
            if classify_contact(Vec3::new(n.x, n.y, n.z), player_is_first, threshold) {
                character.grounded = true;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{apply_movement, spawn_character, try_jump};
    use crate::{PhysicsWorld, WorldSettings};
    use rapier3d::prelude::*;

    const THRESHOLD: f32 = 0.5;

    fn raw() -> PhysicsWorld {
        PhysicsWorld::new(&WorldSettings::default()).unwrap()
    }

    /// Helper: step the world and rescan contacts, in tick order.
    fn step_n(world: &mut PhysicsWorld, character: &mut CharacterBody, n: usize) {
        for _ in 0..n {
            world.step();
            refresh_grounded(world, character, THRESHOLD);
        }
    }

    #[test]
    fn test_flat_ground_normal_is_grounded() {
        assert!(classify_contact(Vec3::new(0.0, 1.0, 0.0), false, THRESHOLD));
    }

    #[test]
    fn test_walkable_slope_is_grounded() {
        // Normalized (0.3, 0.6, 0) has up-dot ~0.894
        let normal = Vec3::new(0.3, 0.6, 0.0).normalize();
        assert!(classify_contact(normal, false, THRESHOLD));
    }

    #[test]
    fn test_steep_slope_is_not_grounded() {
        // Normalized (0.9, 0.4, 0) has up-dot ~0.406
        let normal = Vec3::new(0.9, 0.4, 0.0).normalize();
        assert!(!classify_contact(normal, false, THRESHOLD));
    }

    #[test]
    fn test_threshold_boundary_not_grounded() {
        // Exactly at the threshold is excluded by the strict comparison
        let dot = Vec3::new(0.75_f32.sqrt(), 0.5, 0.0).dot(Vec3::Y);
        assert_eq!(dot, 0.5);
        assert!(!classify_contact(Vec3::new(0.75_f32.sqrt(), 0.5, 0.0), false, THRESHOLD));
    }

    #[test]
    fn test_wall_and_ceiling_normals_not_grounded() {
        assert!(!classify_contact(Vec3::new(1.0, 0.0, 0.0), false, THRESHOLD));
        assert!(!classify_contact(Vec3::new(0.0, -1.0, 0.0), false, THRESHOLD));
    }

    #[test]
    fn test_normal_sign_reconciliation() {
        // The same physical contact reported with the character first carries
        // a flipped normal and must classify identically.
        let toward_player = Vec3::new(0.0, 1.0, 0.0);
        assert!(classify_contact(toward_player, false, THRESHOLD));
        assert!(classify_contact(-toward_player, true, THRESHOLD));
    }

    #[test]
    fn test_resting_contact_re_arms_grounded() {
        let mut world = raw();
        world.spawn_ground();
        let mut character =
            spawn_character(&mut world, 0.5, 2.0, glam::Vec3::new(0.0, 1.5, 0.0)).unwrap();

        character.grounded = false;
        step_n(&mut world, &mut character, 10);
        assert!(character.grounded, "Resting on the plane should re-arm the flag");
    }

    #[test]
    fn test_wall_contact_does_not_arm_grounded() {
        let mut world = raw();
        // Vertical wall, no floor: the only contact the falling capsule can
        // make is sideways.
        let wall_body = RigidBodyBuilder::fixed()
            .translation(Vector::new(0.7, 0.0, 0.0))
            .build();
        let wall_handle = world.rigid_body_set.insert(wall_body);
        let wall = ColliderBuilder::cuboid(0.1, 20.0, 5.0).build();
        world
            .collider_set
            .insert_with_parent(wall, wall_handle, &mut world.rigid_body_set);

        let mut character =
            spawn_character(&mut world, 0.5, 2.0, glam::Vec3::new(0.0, 0.0, 0.0)).unwrap();
        character.grounded = false;

        for _ in 0..20 {
            apply_movement(&mut world, &character, glam::Vec3::new(0.05, 0.0, 0.0));
            world.step();
            refresh_grounded(&mut world, &mut character, THRESHOLD);
        }
        assert!(
            !character.grounded,
            "A sideways wall contact must not re-arm the jump"
        );
    }

    #[test]
    fn test_separation_does_not_clear_grounded() {
        let mut world = raw();
        world.spawn_ground();
        let mut character =
            spawn_character(&mut world, 0.5, 2.0, glam::Vec3::new(0.0, 1.5, 0.0)).unwrap();
        step_n(&mut world, &mut character, 10);
        assert!(character.grounded);

        // Teleport well clear of the plane; the flag stays armed because only
        // a jump clears it.
        apply_movement(&mut world, &character, glam::Vec3::new(0.0, 10.0, 0.0));
        step_n(&mut world, &mut character, 5);
        assert!(character.grounded, "Separation alone must not clear the flag");
    }

    #[test]
    fn test_landing_re_arms_jump() {
        let mut world = raw();
        world.spawn_ground();
        let mut character =
            spawn_character(&mut world, 0.5, 2.0, glam::Vec3::new(0.0, 1.5, 0.0)).unwrap();
        step_n(&mut world, &mut character, 10);

        assert!(try_jump(&mut world, &mut character, 24.0));
        world.step();
        refresh_grounded(&mut world, &mut character, THRESHOLD);
        assert!(
            !character.grounded,
            "First airborne tick must not re-arm the jump"
        );

        // Ride the arc back down to the plane
        step_n(&mut world, &mut character, 900);
        assert!(character.grounded, "Landing should re-arm the jump");
        assert!(try_jump(&mut world, &mut character, 24.0));
    }
}
