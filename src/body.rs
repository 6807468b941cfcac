use glam::Vec2;

use crate::types::{Color, Shape};

/// Default mass for the `*_default` constructors.
pub const DEFAULT_MASS: f32 = 1.0;
/// Default restitution for dynamic bodies built by the `*_default` constructors.
pub const DEFAULT_RESTITUTION: f32 = 0.8;
/// Restitution given to static bodies.
pub const STATIC_RESTITUTION: f32 = 0.5;

/// One rigid body. Static iff `inv_mass == 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,

    pub mass: f32,
    pub inv_mass: f32,
    pub restitution: f32,

    pub angle: f32,
    pub angular_velocity: f32,
    pub inv_inertia: f32,

    pub shape: Shape,
    pub color: Color,
}

impl Body {
    fn new(position: Vec2, shape: Shape, mass: f32, restitution: f32, color: Color) -> Self {
        let inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        let inertia = moment_of_inertia(shape, mass);
        let inv_inertia = if inertia > 0.0 { 1.0 / inertia } else { 0.0 };
        Self {
            position,
            velocity: Vec2::ZERO,
            mass,
            inv_mass,
            restitution,
            angle: 0.0,
            angular_velocity: 0.0,
            inv_inertia,
            shape,
            color,
        }
    }

    // --- Circles -----------------------------------------------------------

    /// Dynamic circle with explicit mass and restitution (white).
    pub fn circle(position: Vec2, radius: f32, mass: f32, restitution: f32) -> Self {
        Self::new(position, Shape::Circle { radius }, mass, restitution, Color::WHITE)
    }

    /// Dynamic circle with mass 1 and restitution 0.8.
    pub fn circle_default(position: Vec2, radius: f32) -> Self {
        Self::circle(position, radius, DEFAULT_MASS, DEFAULT_RESTITUTION)
    }

    /// Immovable gray circle.
    pub fn circle_static(position: Vec2, radius: f32) -> Self {
        Self::new(position, Shape::Circle { radius }, 0.0, STATIC_RESTITUTION, Color::GRAY)
    }

    // --- Rectangles --------------------------------------------------------

    /// Dynamic rectangle with explicit mass and restitution (white).
    pub fn rect(position: Vec2, width: f32, height: f32, mass: f32, restitution: f32) -> Self {
        Self::new(position, Shape::Rect { width, height }, mass, restitution, Color::WHITE)
    }

    /// Dynamic rectangle with mass 1 and restitution 0.8.
    pub fn rect_default(position: Vec2, width: f32, height: f32) -> Self {
        Self::rect(position, width, height, DEFAULT_MASS, DEFAULT_RESTITUTION)
    }

    /// Immovable gray rectangle.
    pub fn rect_static(position: Vec2, width: f32, height: f32) -> Self {
        Self::new(
            position,
            Shape::Rect { width, height },
            0.0,
            STATIC_RESTITUTION,
            Color::GRAY,
        )
    }

    // --- Builders ----------------------------------------------------------

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    // --- State -------------------------------------------------------------

    /// Make the body immovable. One-way: there is no inverse transition.
    pub fn set_static(&mut self) {
        self.mass = 0.0;
        self.inv_mass = 0.0;
        self.inv_inertia = 0.0;
    }

    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    /// Moment of inertia about the center (0 for static bodies).
    pub fn inertia(&self) -> f32 {
        if self.inv_inertia > 0.0 { 1.0 / self.inv_inertia } else { 0.0 }
    }

    pub fn radius(&self) -> Option<f32> {
        match self.shape {
            Shape::Circle { radius } => Some(radius),
            Shape::Rect { .. } => None,
        }
    }
}

/// Circle: `½ m r²`. Rectangle: `m (w² + h²) / 12`. Zero for `m <= 0`.
pub fn moment_of_inertia(shape: Shape, mass: f32) -> f32 {
    if mass <= 0.0 {
        return 0.0;
    }
    match shape {
        Shape::Circle { radius } => 0.5 * mass * radius * radius,
        Shape::Rect { width, height } => (1.0 / 12.0) * mass * (width * width + height * height),
    }
}
