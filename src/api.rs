use glam::Vec2;

use crate::body::Body;
use crate::types::*;
use crate::world::PhysicsWorld;

/// Public API contract for the rigid-body world.
pub trait PhysicsWorldApi {
    /// Construct an empty world: no bodies, no bounds, debug flags off,
    /// no actuator binding.
    fn new(cfg: WorldConfig) -> Self
    where
        Self: Sized;

    // --- Membership --------------------------------------------------------

    /// Install axis-aligned domain limits.
    fn set_bounds(&mut self, bounds: Bounds);

    /// Append a body and return its index. Indices are never reused.
    fn add_body(&mut self, body: Body) -> usize;

    /// Borrow a body by index.
    fn body(&self, index: usize) -> Option<&Body>;

    /// Mutably borrow a body by index.
    fn body_mut(&mut self, index: usize) -> Option<&mut Body>;

    // --- Randomness --------------------------------------------------------

    /// Reseed the world's PRNG.
    fn seed(&mut self, seed: u64);

    /// Insert `n` dynamic circles with position uniform in `[min, max]`,
    /// radius uniform in `radius`, restitution uniform in `restitution`.
    fn spawn_random(
        &mut self,
        n: usize,
        min: Vec2,
        max: Vec2,
        radius: (f32, f32),
        restitution: (f32, f32),
    );

    // --- Simulation --------------------------------------------------------

    /// Advance one fixed step: integrate, detect and resolve pairwise, clamp.
    fn step(&mut self);
}

/// Narrowphase signatures.
pub trait NarrowphaseApi {
    /// Circle vs circle. Normal points from `a` toward `b`.
    fn circle_circle(a: &Body, b: &Body) -> Option<Contact>;

    /// Circle vs oriented rectangle. Normal points from the circle toward the rect.
    fn circle_obb(circle: &Body, rect: &Body) -> Option<Contact>;

    /// Dispatch on the shape pair; the normal always points from `a` toward `b`.
    /// Rect/rect pairs are unsupported and return `None`.
    fn detect(a: &Body, b: &Body) -> Option<Contact>;
}

/// Scripted pose hook applied by the simulator before and after each step.
pub trait ActuatorPolicy {
    fn apply(&self, world: &mut PhysicsWorld, action: f32);
}
