//! Simulator façade: owns a world built from a scene, pins the actuator body
//! around each physics step, and can rebuild itself deterministically.

use std::path::{Path, PathBuf};

use glam::Vec2;

use crate::api::{ActuatorPolicy, PhysicsWorldApi};
use crate::error::{SceneError, SceneResult};
use crate::scene::Scene;
use crate::types::Shape;
use crate::world::PhysicsWorld;

/// Pin the actuator body to `angle`.
///
/// When body 0 is a rectangle distinct from the actuator it is treated as the
/// fulcrum base and the beam sits horizontally centered on top of it;
/// otherwise the beam is placed at the world's actuator pivot. Velocities are
/// zeroed either way. No-op without a binding or when the bound body is not a
/// rectangle.
pub fn apply_actuator_pose(world: &mut PhysicsWorld, angle: f32) {
    let Some(index) = world.actuator() else {
        return;
    };
    let Some(Shape::Rect { height: beam_h, .. }) = world.body(index).map(|b| b.shape) else {
        return;
    };

    let base = if index != 0 { world.body(0) } else { None };
    let position = match base.map(|b| (b.position, b.shape)) {
        Some((base_pos, Shape::Rect { height: base_h, .. })) => {
            Vec2::new(base_pos.x, base_pos.y - (base_h + beam_h) * 0.5)
        }
        _ => world.actuator_pivot(),
    };

    if let Some(beam) = world.body_mut(index) {
        beam.position = position;
        beam.angle = angle;
        beam.velocity = Vec2::ZERO;
        beam.angular_velocity = 0.0;
    }
}

/// The default pose policy: [`apply_actuator_pose`].
#[derive(Copy, Clone, Debug, Default)]
pub struct FulcrumPose;

impl ActuatorPolicy for FulcrumPose {
    fn apply(&self, world: &mut PhysicsWorld, action: f32) {
        apply_actuator_pose(world, action);
    }
}

/// Commanded beam state, tracked across steps.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ActuatorState {
    /// Last commanded angle (radians).
    pub angle: f32,
    /// Rate of change of the commanded angle over the last step (rad/s).
    pub angular_velocity: f32,
}

/// Beam/ball summary for controllers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Observation {
    pub beam_angle: f32,
    pub beam_angular_velocity: f32,
    /// Ball center relative to the beam center, along the beam's long axis (px).
    pub ball_offset: f32,
    /// Ball velocity along the beam's long axis (px/s).
    pub ball_velocity: f32,
}

/// Wraps one world and the identity needed to rebuild it.
pub struct Simulator<P: ActuatorPolicy = FulcrumPose> {
    world: PhysicsWorld,
    scene: Scene,
    scene_path: Option<PathBuf>,
    seed: u32,
    dt: f32,
    policy: P,
    actuator: ActuatorState,
    pose_enabled: bool,
    steps: u64,
}

impl Simulator<FulcrumPose> {
    /// Load the scene at `scene_path`, install `dt`, and seed the world RNG.
    /// A non-positive or non-finite `dt` is rejected as invalid.
    pub fn create(scene_path: impl AsRef<Path>, seed: u32, dt: f32) -> SceneResult<Self> {
        if !valid_dt(dt) {
            return Err(SceneError::invalid(format!("time step must be positive, got {dt}")));
        }
        let path = scene_path.as_ref();
        let scene = Scene::load(path)?;
        let mut sim = Self::from_scene(scene, seed, dt);
        sim.scene_path = Some(path.to_path_buf());
        Ok(sim)
    }

    /// Build from an in-memory scene. `reset` reuses the same scene.
    pub fn from_scene(scene: Scene, seed: u32, dt: f32) -> Self {
        Self::with_policy(scene, seed, dt, FulcrumPose)
    }
}

impl<P: ActuatorPolicy> Simulator<P> {
    /// # Panics
    ///
    /// If `dt` is not a positive finite number.
    pub fn with_policy(scene: Scene, seed: u32, dt: f32, policy: P) -> Self {
        assert!(valid_dt(dt), "time step must be positive, got {dt}");
        let mut world = PhysicsWorld::new(Default::default());
        scene.populate(&mut world);
        world.set_dt(dt);
        world.seed(u64::from(seed));
        let pose_enabled = check_binding(&world);
        log::debug!(
            "simulator created: {} bodies, seed {}, dt {:.6}",
            world.body_count(),
            seed,
            dt
        );
        Self {
            world,
            scene,
            scene_path: None,
            seed,
            dt,
            policy,
            actuator: ActuatorState::default(),
            pose_enabled,
            steps: 0,
        }
    }

    /// Rebuild the world from the scene (re-read from disk when it came from a
    /// file) and reseed. On error the current world is left as is.
    pub fn reset(&mut self) -> SceneResult<()> {
        if let Some(path) = &self.scene_path {
            self.scene = Scene::load(path)?;
        }
        self.scene.populate(&mut self.world);
        self.world.set_dt(self.dt);
        self.world.seed(u64::from(self.seed));
        self.pose_enabled = check_binding(&self.world);
        self.actuator = ActuatorState::default();
        self.steps = 0;
        log::debug!("simulator reset (seed {})", self.seed);
        Ok(())
    }

    /// Pin the actuator to `action` (radians), step physics, pin again.
    /// `action` is not clamped.
    pub fn step(&mut self, action: f32) {
        self.policy.apply(&mut self.world, action);
        self.world.step();
        self.policy.apply(&mut self.world, action);

        let previous = self.actuator.angle;
        self.actuator = ActuatorState {
            angle: action,
            angular_velocity: (action - previous) / self.dt,
        };
        self.steps += 1;
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    /// Mutable access, e.g. to toggle debug flags.
    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_path(&self) -> Option<&Path> {
        self.scene_path.as_deref()
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn actuator(&self) -> ActuatorState {
        self.actuator
    }

    /// Whether the scene binds the actuator to a rectangle the pose hook can drive.
    pub fn pose_enabled(&self) -> bool {
        self.pose_enabled
    }

    /// Steps taken since creation or the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Beam and ball state projected on the beam axis. The ball is the first
    /// dynamic circle. `None` without an actuator or a ball.
    pub fn observe(&self) -> Option<Observation> {
        let beam = self.world.body(self.world.actuator()?)?;
        let ball = self
            .world
            .bodies()
            .iter()
            .find(|b| b.shape.is_circle() && !b.is_static())?;
        let axis = Vec2::from_angle(beam.angle);
        Some(Observation {
            beam_angle: beam.angle,
            beam_angular_velocity: self.actuator.angular_velocity,
            ball_offset: (ball.position - beam.position).dot(axis),
            ball_velocity: ball.velocity.dot(axis),
        })
    }
}

fn valid_dt(dt: f32) -> bool {
    dt > 0.0 && dt.is_finite()
}

/// Warn about a binding the pose hook cannot drive; true when it can.
fn check_binding(world: &PhysicsWorld) -> bool {
    let Some(index) = world.actuator() else {
        return false;
    };
    match world.body(index) {
        Some(b) if b.shape.is_rect() => true,
        Some(_) => {
            log::warn!("actuator body {} is not a rectangle; pose hook disabled", index);
            false
        }
        None => {
            log::warn!("actuator body {} does not exist", index);
            false
        }
    }
}
