//! Gameplay session: owns the physics world, the character, and the look
//! controller, and advances them one tick at a time.
//!
//! External flags decide what a tick may do. `can_move` gates character
//! control, `paused` freezes the simulation entirely. The session reads a
//! keyboard snapshot and a drained mouse delta each tick instead of listening
//! to events, so ticks are deterministic and replayable.

use glam::{Vec2, Vec3};
use thiserror::Error;
use tracing::debug;

use strider_config::Config;
use strider_input::{Action, Bindings, KeyboardState};
use strider_physics::character::{self, CharacterBody};
use strider_physics::{
    refresh_grounded, ConfigurationError, ConstructionError, PhysicsWorld, SolverSettings,
    WorldSettings,
};
use strider_player::{movement_intent, LookController};

/// What the session is allowed to do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Simulation runs but character control is ignored.
    Idle,
    /// Simulation runs and the character responds to input.
    Active,
    /// Simulation is frozen; nothing moves.
    Paused,
}

/// Errors from assembling a session out of a validated config.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid physics configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("invalid character dimensions: {0}")]
    Construction(#[from] ConstructionError),
}

/// A running gameplay session.
pub struct Session {
    world: PhysicsWorld,
    character: CharacterBody,
    look: LookController,
    bindings: Bindings,
    move_speed: f32,
    jump_impulse: f32,
    ground_normal_threshold: f32,
    can_move: bool,
    paused: bool,
}

impl Session {
    /// Builds the world, ground plane, character, and look controller from
    /// `config`.
    ///
    /// # Errors
    /// Returns [`SessionError`] if the solver configuration or the capsule
    /// dimensions fail validation.
    pub fn new(config: &Config) -> Result<Self, SessionError> {
        let settings = WorldSettings {
            gravity: Vec3::from_array(config.physics.gravity),
            timestep_hz: config.physics.timestep_hz,
            solver: SolverSettings {
                iterations: config.physics.solver_iterations,
                tolerance: config.physics.solver_tolerance,
            },
            friction: config.physics.friction,
            restitution: config.physics.restitution,
        };
        let mut world = PhysicsWorld::new(&settings)?;
        world.spawn_ground();

        let character = character::spawn_character(
            &mut world,
            config.player.capsule_radius,
            config.player.capsule_height,
            Vec3::from_array(config.player.spawn_position),
        )?;

        let look = LookController::new(
            config.look.mouse_sensitivity,
            config.look.invert_y,
            config.look.eye_height,
        );

        Ok(Self {
            world,
            character,
            look,
            bindings: Bindings::default(),
            move_speed: config.player.move_speed,
            jump_impulse: config.player.jump_impulse,
            ground_normal_threshold: config.player.ground_normal_threshold,
            can_move: false,
            paused: false,
        })
    }

    /// Derives the state machine position from the external flags.
    ///
    /// Pause dominates: a paused session ignores character control even if
    /// movement is allowed.
    pub fn state(&self) -> SessionState {
        if self.paused {
            SessionState::Paused
        } else if self.can_move {
            SessionState::Active
        } else {
            SessionState::Idle
        }
    }

    /// Grants or revokes character control (set by menus and cutscenes).
    pub fn set_can_move(&mut self, can_move: bool) {
        if self.can_move != can_move {
            debug!(
                "Character control {}",
                if can_move { "granted" } else { "revoked" }
            );
        }
        self.can_move = can_move;
    }

    /// Freezes or resumes the simulation.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            debug!("Session {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    /// Enables or disables mouse look (pointer capture).
    pub fn set_look_enabled(&mut self, enabled: bool) {
        self.look.enabled = enabled;
    }

    /// Advances the session by one fixed tick.
    ///
    /// `keyboard` is the input snapshot for this tick and `mouse_delta` is the
    /// pointer movement accumulated since the previous tick. Movement keys
    /// displace the body directly; only jumping and gravity act through
    /// velocity.
    pub fn tick(&mut self, keyboard: &KeyboardState, mouse_delta: Vec2) {
        self.look.apply_mouse_delta(mouse_delta.x, mouse_delta.y);

        let state = self.state();
        if state == SessionState::Active {
            if self.bindings.is_active(Action::Jump, keyboard) {
                character::try_jump(&mut self.world, &mut self.character, self.jump_impulse);
            }
            let delta = movement_intent(
                keyboard,
                &self.bindings,
                self.move_speed,
                self.look.rotation(),
            );
            character::apply_movement(&mut self.world, &self.character, delta);
        }

        if state != SessionState::Paused {
            self.world.step();
            // The scan must see the contact set produced by this step
            refresh_grounded(
                &self.world,
                &mut self.character,
                self.ground_normal_threshold,
            );
        }

        self.look.follow(character::position(&self.world, &self.character));
    }

    /// Returns whether the character can currently jump.
    pub fn grounded(&self) -> bool {
        self.character.grounded
    }

    /// Returns the character's world-space position.
    pub fn body_position(&self) -> Vec3 {
        character::position(&self.world, &self.character)
    }

    /// Returns the character's linear velocity.
    pub fn body_velocity(&self) -> Vec3 {
        character::linear_velocity(&self.world, &self.character)
    }

    /// Returns the camera eye position for the renderer.
    pub fn eye_position(&self) -> Vec3 {
        self.look.eye_position()
    }

    /// Returns the look controller (camera orientation source).
    pub fn look(&self) -> &LookController {
        &self.look
    }

    /// Returns the fixed timestep the session's world runs at, in seconds.
    pub fn timestep(&self) -> f32 {
        self.world.timestep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;
    use strider_input::RawKeyEvent;
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    fn session() -> Session {
        Session::new(&Config::default()).unwrap()
    }

    fn airborne_session() -> Session {
        let mut config = Config::default();
        config.player.spawn_position = [0.0, 5.0, 0.0];
        Session::new(&config).unwrap()
    }

    fn kb_with(codes: &[KeyCode]) -> KeyboardState {
        let mut kb = KeyboardState::new();
        for &code in codes {
            kb.process_raw(RawKeyEvent {
                code,
                state: ElementState::Pressed,
                repeat: false,
            });
        }
        kb
    }

    fn tick_n(session: &mut Session, keyboard: &KeyboardState, n: usize) {
        for _ in 0..n {
            session.tick(keyboard, Vec2::ZERO);
        }
    }

    #[test]
    fn test_state_derivation_from_flags() {
        let mut s = session();
        assert_eq!(s.state(), SessionState::Idle);

        s.set_can_move(true);
        assert_eq!(s.state(), SessionState::Active);

        s.set_paused(true);
        assert_eq!(s.state(), SessionState::Paused, "pause dominates control");

        s.set_paused(false);
        assert_eq!(s.state(), SessionState::Active);

        s.set_can_move(false);
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[test]
    fn test_paused_world_does_not_step() {
        let mut s = airborne_session();
        s.set_paused(true);

        let before = s.body_position();
        tick_n(&mut s, &KeyboardState::new(), 30);
        assert_eq!(
            s.body_position(),
            before,
            "gravity must not act while paused"
        );
    }

    #[test]
    fn test_unpaused_world_steps_under_gravity() {
        let mut s = airborne_session();
        tick_n(&mut s, &KeyboardState::new(), 60);
        assert!(
            s.body_position().y < 5.0,
            "airborne character should fall: y={}",
            s.body_position().y
        );
    }

    #[test]
    fn test_idle_blocks_movement_but_simulation_runs() {
        let mut s = airborne_session();
        tick_n(&mut s, &kb_with(&[KeyCode::KeyW]), 30);

        let pos = s.body_position();
        assert!(pos.x.abs() < 1e-4 && pos.z.abs() < 1e-4, "no walking while idle");
        assert!(pos.y < 5.0, "world still steps while idle");
    }

    #[test]
    fn test_active_walk_moves_forward() {
        let mut s = session();
        s.set_can_move(true);
        let start = s.body_position();

        tick_n(&mut s, &kb_with(&[KeyCode::KeyW]), 10);
        let pos = s.body_position();
        assert!(
            start.z - pos.z > 0.9,
            "10 ticks of forward walk should cover ~1m: moved {}",
            start.z - pos.z
        );
        assert!((pos.x - start.x).abs() < 0.01);
    }

    #[test]
    fn test_opposing_keys_freeze_in_place() {
        let mut s = session();
        s.set_can_move(true);
        let start = s.body_position();

        tick_n(&mut s, &kb_with(&[KeyCode::KeyW, KeyCode::KeyS]), 30);
        let pos = s.body_position();
        assert!((pos.x - start.x).abs() < 1e-4);
        assert!((pos.z - start.z).abs() < 1e-4);
    }

    #[test]
    fn test_jump_requires_active_state() {
        let mut s = session();
        tick_n(&mut s, &KeyboardState::new(), 10);

        // Idle: the jump key does nothing
        s.tick(&kb_with(&[KeyCode::Space]), Vec2::ZERO);
        assert!(s.body_velocity().y < 1.0, "idle jump must not fire");

        s.set_can_move(true);
        s.tick(&kb_with(&[KeyCode::Space]), Vec2::ZERO);
        assert!(
            s.body_velocity().y > 10.0,
            "active jump should launch: vy={}",
            s.body_velocity().y
        );
        assert!(!s.grounded());
    }

    #[test]
    fn test_holding_jump_does_not_double_jump() {
        let mut s = session();
        s.set_can_move(true);
        tick_n(&mut s, &KeyboardState::new(), 10);

        let held = kb_with(&[KeyCode::Space]);
        s.tick(&held, Vec2::ZERO);
        let mut previous_vy = s.body_velocity().y;
        assert!(previous_vy > 10.0);

        // While airborne, vertical velocity only ever decays. A second
        // impulse would show up as an upward jump in the sequence.
        for _ in 0..60 {
            s.tick(&held, Vec2::ZERO);
            let vy = s.body_velocity().y;
            assert!(
                vy < previous_vy + 1e-3,
                "unexpected upward impulse while airborne: {previous_vy} -> {vy}"
            );
            previous_vy = vy;
        }
    }

    #[test]
    fn test_landing_re_arms_jump_even_while_holding() {
        let mut s = session();
        s.set_can_move(true);
        tick_n(&mut s, &KeyboardState::new(), 10);

        let held = kb_with(&[KeyCode::Space]);
        s.tick(&held, Vec2::ZERO);
        assert!(!s.grounded());

        // Ride the full arc down; the rescan on landing re-arms the jump
        tick_n(&mut s, &held, 1200);
        assert!(
            s.body_velocity().y.abs() < 30.0,
            "character should have landed or re-jumped, not flown away"
        );
        let peak_regained = (0..600).any(|_| {
            s.tick(&held, Vec2::ZERO);
            s.body_velocity().y > 10.0
        });
        assert!(peak_regained, "holding jump should bunny-hop after landing");
    }

    #[test]
    fn test_mouse_steers_walk_direction() {
        let mut s = session();
        s.set_can_move(true);
        s.set_look_enabled(true);
        let start = s.body_position();

        // Turn a quarter circle to the right, then walk forward
        let quarter_turn = FRAC_PI_2 / 0.002;
        s.tick(&KeyboardState::new(), Vec2::new(quarter_turn, 0.0));
        tick_n(&mut s, &kb_with(&[KeyCode::KeyW]), 10);

        let pos = s.body_position();
        assert!(
            pos.x - start.x > 0.9,
            "after turning right, forward is +x: moved {}",
            pos.x - start.x
        );
        assert!((pos.z - start.z).abs() < 0.01);
    }

    #[test]
    fn test_camera_anchor_follows_body_when_look_enabled() {
        let mut s = airborne_session();
        let anchor_before = s.look().position;
        tick_n(&mut s, &KeyboardState::new(), 30);
        assert_eq!(
            s.look().position,
            anchor_before,
            "disabled look must not track the body"
        );

        s.set_look_enabled(true);
        s.tick(&KeyboardState::new(), Vec2::ZERO);
        assert_eq!(s.look().position, s.body_position());
    }

    #[test]
    fn test_pause_freezes_midair_character() {
        let mut s = session();
        s.set_can_move(true);
        tick_n(&mut s, &KeyboardState::new(), 10);
        s.tick(&kb_with(&[KeyCode::Space]), Vec2::ZERO);
        tick_n(&mut s, &KeyboardState::new(), 20);

        let frozen = s.body_position();
        let frozen_vel = s.body_velocity();
        s.set_paused(true);
        tick_n(&mut s, &kb_with(&[KeyCode::KeyW]), 60);
        assert_eq!(s.body_position(), frozen);
        assert_eq!(s.body_velocity(), frozen_vel);

        s.set_paused(false);
        tick_n(&mut s, &KeyboardState::new(), 10);
        assert_ne!(s.body_position(), frozen, "resume continues the arc");
    }

    #[test]
    fn test_invalid_solver_config_rejected() {
        let mut config = Config::default();
        config.physics.solver_iterations = 0;
        assert!(matches!(
            Session::new(&config),
            Err(SessionError::Configuration(
                ConfigurationError::InvalidIterations(0)
            ))
        ));
    }

    #[test]
    fn test_invalid_capsule_rejected() {
        let mut config = Config::default();
        config.player.capsule_radius = 0.0;
        assert!(matches!(
            Session::new(&config),
            Err(SessionError::Construction(
                ConstructionError::NonPositiveRadius(_)
            ))
        ));
    }
}
