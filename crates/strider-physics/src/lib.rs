//! Physics integration: rigid bodies, collision shapes, contact queries, and
//! physics world stepping.
//!
//! Wraps the Rapier 3D physics engine behind a single [`PhysicsWorld`] that
//! owns all simulation state and exposes a minimal, game-friendly API. The
//! world is tuned for stiff first-person character control rather than loose
//! ragdoll dynamics, so gravity, solver iterations, and surface materials are
//! all driven by [`WorldSettings`] rather than engine defaults.

use std::num::NonZeroUsize;

use rapier3d::prelude::*;

pub mod character;
pub mod error;
pub mod grounding;

pub use character::{spawn_character, CharacterBody};
pub use error::{ConfigurationError, ConstructionError};
pub use grounding::{classify_contact, refresh_grounded};

/// Constraint solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    /// Number of constraint solver iterations per step (must be >= 1).
    pub iterations: u32,
    /// Solver convergence tolerance (must be > 0).
    pub tolerance: f32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            iterations: 7,
            tolerance: 0.1,
        }
    }
}

/// Full world configuration validated by [`PhysicsWorld::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSettings {
    /// World-space gravity vector.
    pub gravity: glam::Vec3,
    /// Fixed simulation rate in Hz (must be >= 1).
    pub timestep_hz: u32,
    /// Constraint solver configuration.
    pub solver: SolverSettings,
    /// Friction coefficient applied to every collider registered through this world.
    pub friction: f32,
    /// Restitution coefficient applied to every collider registered through this world.
    pub restitution: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: glam::Vec3::new(0.0, -40.0, 0.0),
            timestep_hz: 120,
            solver: SolverSettings::default(),
            friction: 0.0,
            restitution: 0.0,
        }
    }
}

/// Central physics simulation state owning all Rapier structures.
///
/// Constructed once from validated [`WorldSettings`]. The character controller
/// reads body state between steps and mutates via the helpers in
/// [`character`] and [`grounding`].
pub struct PhysicsWorld {
    /// World-space gravity vector.
    pub gravity: Vector,
    /// Timestep and solver configuration.
    pub integration_parameters: IntegrationParameters,
    /// The main simulation pipeline.
    pub physics_pipeline: PhysicsPipeline,
    /// Tracks sleeping/awake body islands.
    pub island_manager: IslandManager,
    /// Broad-phase collision detection (also provides query pipeline).
    pub broad_phase: BroadPhaseBvh,
    /// Narrow-phase collision detection (contact manifolds).
    pub narrow_phase: NarrowPhase,
    /// All rigid bodies in the simulation.
    pub rigid_body_set: RigidBodySet,
    /// All colliders in the simulation.
    pub collider_set: ColliderSet,
    /// Impulse-based joints.
    pub impulse_joint_set: ImpulseJointSet,
    /// Multibody joints (reduced-coordinate articulations).
    pub multibody_joint_set: MultibodyJointSet,
    /// Continuous collision detection solver.
    pub ccd_solver: CCDSolver,
    /// Solver configuration this world was built with.
    solver: SolverSettings,
    /// Friction coefficient for registered colliders.
    friction: f32,
    /// Restitution coefficient for registered colliders.
    restitution: f32,
}

impl PhysicsWorld {
    /// Creates a new physics world from validated settings.
    ///
    /// # Errors
    /// Returns [`ConfigurationError`] if the timestep frequency is zero, the
    /// solver iteration count is zero, or the solver tolerance is not a
    /// positive number.
    pub fn new(settings: &WorldSettings) -> Result<Self, ConfigurationError> {
        if settings.timestep_hz == 0 {
            return Err(ConfigurationError::InvalidTimestep(settings.timestep_hz));
        }
        let iterations = NonZeroUsize::new(settings.solver.iterations as usize)
            .ok_or(ConfigurationError::InvalidIterations(settings.solver.iterations))?;
        if !(settings.solver.tolerance > 0.0) {
            return Err(ConfigurationError::InvalidTolerance(settings.solver.tolerance));
        }

        let integration_parameters = IntegrationParameters {
            dt: 1.0 / settings.timestep_hz as f32,
            num_solver_iterations: iterations,
            ..Default::default()
        };

        tracing::debug!(
            "Physics world: {} Hz, {} solver iterations, gravity {:?}",
            settings.timestep_hz,
            settings.solver.iterations,
            settings.gravity
        );

        Ok(Self {
            gravity: Vector::new(settings.gravity.x, settings.gravity.y, settings.gravity.z),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            solver: settings.solver,
            friction: settings.friction,
            restitution: settings.restitution,
        })
    }

    /// Advances the simulation by one fixed timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Registers an immovable ground plane with upward normal at y=0.
    ///
    /// The plane is infinite, so the character can never walk off its edge.
    pub fn spawn_ground(&mut self) -> ColliderHandle {
        let body = RigidBodyBuilder::fixed().build();
        let body_handle = self.rigid_body_set.insert(body);
        let collider = self
            .surface_material(ColliderBuilder::halfspace(Vector::y_axis()))
            .build();
        self.collider_set
            .insert_with_parent(collider, body_handle, &mut self.rigid_body_set)
    }

    /// Applies the world's surface material to a collider under construction.
    ///
    /// Min combine keeps contacts frictionless against any other surface when
    /// the world material is zero.
    pub(crate) fn surface_material(&self, builder: ColliderBuilder) -> ColliderBuilder {
        builder
            .friction(self.friction)
            .restitution(self.restitution)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .restitution_combine_rule(CoefficientCombineRule::Min)
    }

    /// Returns the fixed timestep in seconds.
    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Returns the solver configuration this world was built with.
    pub fn solver(&self) -> SolverSettings {
        self.solver
    }

    /// Returns the current gravity as `(x, y, z)`.
    pub fn gravity(&self) -> (f32, f32, f32) {
        (self.gravity.x, self.gravity.y, self.gravity.z)
    }
}
