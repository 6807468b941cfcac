use glam::Vec2;

/// Supported body shapes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    /// Circle centered on the body position.
    Circle { radius: f32 },
    /// Rectangle centered on the body position (full extents, not half extents).
    Rect { width: f32, height: f32 },
}

impl Shape {
    pub fn is_circle(&self) -> bool {
        matches!(self, Shape::Circle { .. })
    }

    pub fn is_rect(&self) -> bool {
        matches!(self, Shape::Rect { .. })
    }

    /// Half extents of a rectangle, `None` for circles.
    pub fn half_extents(&self) -> Option<Vec2> {
        match *self {
            Shape::Rect { width, height } => Some(Vec2::new(width * 0.5, height * 0.5)),
            Shape::Circle { .. } => None,
        }
    }
}

/// 8-bit RGBA display color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(100, 100, 100);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const RED: Color = Color::rgb(255, 60, 60);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

/// Narrowphase result for one colliding pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from body A toward body B.
    pub normal: Vec2,
    /// Overlap depth along `normal` (≥ 0).
    pub penetration: f32,
    /// World-space application point.
    pub point: Vec2,
}

/// A contact tagged with the indices of the bodies it was detected between.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactPair {
    pub a: usize,
    pub b: usize,
    pub contact: Contact,
}

/// Axis-aligned domain limits.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(xmin: f32, ymin: f32, xmax: f32, ymax: f32) -> Self {
        Self {
            min: Vec2::new(xmin, ymin),
            max: Vec2::new(xmax, ymax),
        }
    }
}

/// Debug visualization toggles read by the render traversal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DebugFlags {
    pub show_velocity: bool,
    /// Also makes the world retain the last step's contacts.
    pub show_contacts: bool,
}

/// World-level configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    /// Acceleration applied to every dynamic body (px/s²).
    pub gravity: Vec2,
    /// Fixed step in seconds.
    pub dt: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 981.0),
            dt: 1.0 / 120.0,
        }
    }
}

/// Counters for the last completed step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub bodies: usize,
    /// Pairs handed to the narrowphase.
    pub pairs_tested: usize,
    /// Pairs that produced a contact (and were resolved).
    pub contacts: usize,
    /// Rect/rect pairs skipped as unsupported.
    pub skipped_pairs: usize,
    /// Circles pushed back inside the bounds.
    pub clamped: usize,
}
