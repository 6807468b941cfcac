use glam::Vec2;

use crate::api::{NarrowphaseApi, PhysicsWorldApi};
use crate::body::{Body, DEFAULT_MASS};
use crate::narrowphase::Narrowphase;
use crate::rng::Rng;
use crate::solver;
use crate::types::*;

/// Owns the bodies and advances them with a fixed step.
pub struct PhysicsWorld {
    pub cfg: WorldConfig,
    pub debug: DebugFlags,

    bodies: Vec<Body>,
    bounds: Option<Bounds>,
    rng: Rng,

    // Body whose pose is scripted by the simulator, and the pivot used when
    // there is no fulcrum base.
    actuator: Option<usize>,
    actuator_pivot: Vec2,

    // Retained only while `debug.show_contacts` is set.
    contacts: Vec<ContactPair>,
    last_stats: StepStats,
}

impl PhysicsWorldApi for PhysicsWorld {
    fn new(cfg: WorldConfig) -> Self {
        Self {
            cfg,
            debug: DebugFlags::default(),
            bodies: Vec::new(),
            bounds: None,
            rng: Rng::default(),
            actuator: None,
            actuator_pivot: Vec2::ZERO,
            contacts: Vec::new(),
            last_stats: StepStats::default(),
        }
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }

    fn add_body(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    fn body_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    fn seed(&mut self, seed: u64) {
        self.rng = Rng::new(seed);
    }

    fn spawn_random(
        &mut self,
        n: usize,
        min: Vec2,
        max: Vec2,
        radius: (f32, f32),
        restitution: (f32, f32),
    ) {
        log::debug!("spawning {} random circles (rng state {:#018x})", n, self.rng.state());
        self.bodies.reserve(n);
        for _ in 0..n {
            let x = self.rng.range_f32(min.x, max.x);
            let y = self.rng.range_f32(min.y, max.y);
            let r = self.rng.range_f32(radius.0, radius.1);
            let e = self.rng.range_f32(restitution.0, restitution.1);
            self.bodies.push(Body::circle(Vec2::new(x, y), r, DEFAULT_MASS, e));
        }
    }

    fn step(&mut self) {
        self.contacts.clear();
        let mut stats = StepStats {
            bodies: self.bodies.len(),
            ..Default::default()
        };

        self.integrate();

        // Ascending (i, j): each resolution sees every earlier pair's effect.
        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = pair_mut(&mut self.bodies, i, j);
                if a.shape.is_rect() && b.shape.is_rect() {
                    stats.skipped_pairs += 1;
                    continue;
                }
                stats.pairs_tested += 1;
                let Some(contact) = Narrowphase::detect(a, b) else {
                    continue;
                };
                solver::resolve(a, b, &contact);
                stats.contacts += 1;
                if self.debug.show_contacts {
                    self.contacts.push(ContactPair { a: i, b: j, contact });
                }
            }
        }

        if let Some(bounds) = self.bounds {
            stats.clamped = self.clamp_to_bounds(bounds);
        }

        log::trace!(
            "step: {} bodies, {} pairs tested, {} contacts, {} rect/rect skipped, {} clamped",
            stats.bodies,
            stats.pairs_tested,
            stats.contacts,
            stats.skipped_pairs,
            stats.clamped
        );
        self.last_stats = stats;
    }
}

impl PhysicsWorld {
    fn integrate(&mut self) {
        let dt = self.cfg.dt;
        let g = self.cfg.gravity;
        for b in self.bodies.iter_mut().filter(|b| !b.is_static()) {
            b.velocity += g * dt;
            b.position += b.velocity * dt;
            b.angle += b.angular_velocity * dt;
        }
    }

    /// Snap dynamic circles back inside and reflect the wall-normal velocity
    /// with the body's restitution. Rectangles are left alone.
    fn clamp_to_bounds(&mut self, bounds: Bounds) -> usize {
        let mut clamped = 0;
        for b in self.bodies.iter_mut().filter(|b| !b.is_static()) {
            let Shape::Circle { radius } = b.shape else {
                continue;
            };
            let e = b.restitution;
            let before = b.position;

            if b.position.x - radius < bounds.min.x {
                b.position.x = bounds.min.x + radius;
                if b.velocity.x < 0.0 {
                    b.velocity.x = -e * b.velocity.x;
                }
            } else if b.position.x + radius > bounds.max.x {
                b.position.x = bounds.max.x - radius;
                if b.velocity.x > 0.0 {
                    b.velocity.x = -e * b.velocity.x;
                }
            }

            if b.position.y - radius < bounds.min.y {
                b.position.y = bounds.min.y + radius;
                if b.velocity.y < 0.0 {
                    b.velocity.y = -e * b.velocity.y;
                }
            } else if b.position.y + radius > bounds.max.y {
                b.position.y = bounds.max.y - radius;
                if b.velocity.y > 0.0 {
                    b.velocity.y = -e * b.velocity.y;
                }
            }

            if b.position != before {
                clamped += 1;
            }
        }
        clamped
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn gravity(&self) -> Vec2 {
        self.cfg.gravity
    }

    pub fn dt(&self) -> f32 {
        self.cfg.dt
    }

    pub fn set_dt(&mut self, dt: f32) {
        self.cfg.dt = dt;
    }

    /// Bind (or unbind with `None`) the body whose pose is scripted.
    pub fn set_actuator(&mut self, index: Option<usize>, pivot: Vec2) {
        self.actuator = index;
        self.actuator_pivot = pivot;
    }

    pub fn actuator(&self) -> Option<usize> {
        self.actuator
    }

    pub fn actuator_pivot(&self) -> Vec2 {
        self.actuator_pivot
    }

    /// Contacts from the last step; empty unless `debug.show_contacts` was set.
    pub fn contacts(&self) -> &[ContactPair] {
        &self.contacts
    }

    /// Return counters for the last completed `step`.
    pub fn last_stats(&self) -> StepStats {
        self.last_stats
    }

    pub fn rng_state(&self) -> u64 {
        self.rng.state()
    }
}

fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i < j);
    let (lo, hi) = bodies.split_at_mut(j);
    (&mut lo[i], &mut hi[0])
}
