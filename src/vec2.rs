//! 2D vector helpers on top of `glam::Vec2`.
//!
//! glam already provides add/sub/scale, `dot`, `perp` (90° CCW, `(-y, x)`),
//! `length` and `length_squared`. This module adds the few operations the
//! solver and narrowphase need that glam spells differently.

pub use glam::Vec2;

/// Extra operations used by the rigid-body core.
pub trait Vec2Ext {
    /// Scalar 2D cross product (z of the 3D cross): `a.x*b.y - a.y*b.x`.
    fn cross(self, rhs: Vec2) -> f32;

    /// Rotate counter-clockwise by `angle` radians.
    fn rotated(self, angle: f32) -> Vec2;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn cross(self, rhs: Vec2) -> f32 {
        self.perp_dot(rhs)
    }

    #[inline]
    fn rotated(self, angle: f32) -> Vec2 {
        Vec2::from_angle(angle).rotate(self)
    }
}

/// Free-function form of [`Vec2Ext::cross`].
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.cross(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_is_z_component() {
        let a = Vec2::new(2.0, 3.0);
        let b = Vec2::new(-1.0, 4.0);
        assert!((cross(a, b) - (2.0 * 4.0 - 3.0 * -1.0)).abs() < 1e-6);
        assert!((cross(a, a)).abs() < 1e-6);
        assert!((cross(a, b) + cross(b, a)).abs() < 1e-6);
    }

    #[test]
    fn test_perp_is_ccw() {
        let v = Vec2::new(1.0, 2.0);
        assert_eq!(v.perp(), Vec2::new(-2.0, 1.0));
        assert!(v.dot(v.perp()).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_round_trip() {
        let p = Vec2::new(37.5, -12.25);
        for angle in [0.0f32, 0.3, -1.2, 2.9, 3.14159] {
            let back = p.rotated(angle).rotated(-angle);
            assert!((back - p).length() < 1e-4);
        }
        let q = Vec2::X.rotated(core::f32::consts::FRAC_PI_2);
        assert!((q - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_lengths() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(Vec2::ZERO.length(), 0.0);
    }
}
