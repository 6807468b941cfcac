//! Read-only render traversal. The world never draws anything itself; an
//! external renderer implements [`DebugSink`] and receives primitives.

use glam::Vec2;

use crate::body::Body;
use crate::types::{Color, Shape};
use crate::vec2::Vec2Ext;
use crate::world::PhysicsWorld;

/// Velocity arrows are drawn `VELOCITY_ARROW_SCALE * v` long.
pub const VELOCITY_ARROW_SCALE: f32 = 20.0;
/// Contact normals are drawn this many pixels per unit of penetration (plus a base length).
pub const CONTACT_NORMAL_SCALE: f32 = 4.0;
pub const CONTACT_NORMAL_BASE: f32 = 12.0;

/// Receiver for debug primitives.
pub trait DebugSink {
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Corners in order top-left, top-right, bottom-right, bottom-left (local frame).
    fn polygon(&mut self, corners: [Vec2; 4], color: Color);
    fn arrow(&mut self, from: Vec2, to: Vec2, color: Color);
    fn point(&mut self, at: Vec2, size: f32, color: Color);
}

/// One recorded primitive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Circle { center: Vec2, radius: f32, color: Color },
    Polygon { corners: [Vec2; 4], color: Color },
    Arrow { from: Vec2, to: Vec2, color: Color },
    Point { at: Vec2, size: f32, color: Color },
}

/// A [`DebugSink`] that just collects commands.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn arrows(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds.iter().filter(|c| matches!(c, DrawCmd::Arrow { .. }))
    }
}

impl DebugSink for DrawList {
    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.cmds.push(DrawCmd::Circle { center, radius, color });
    }

    fn polygon(&mut self, corners: [Vec2; 4], color: Color) {
        self.cmds.push(DrawCmd::Polygon { corners, color });
    }

    fn arrow(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.cmds.push(DrawCmd::Arrow { from, to, color });
    }

    fn point(&mut self, at: Vec2, size: f32, color: Color) {
        self.cmds.push(DrawCmd::Point { at, size, color });
    }
}

/// World-space corners of a (possibly rotated) rectangle body.
pub fn rect_corners(center: Vec2, width: f32, height: f32, angle: f32) -> [Vec2; 4] {
    let hw = width * 0.5;
    let hh = height * 0.5;
    [
        Vec2::new(-hw, -hh),
        Vec2::new(hw, -hh),
        Vec2::new(hw, hh),
        Vec2::new(-hw, hh),
    ]
    .map(|c| center + c.rotated(angle))
}

fn draw_body(sink: &mut impl DebugSink, body: &Body, show_velocity: bool) {
    match body.shape {
        Shape::Circle { radius } => sink.circle(body.position, radius, body.color),
        Shape::Rect { width, height } => {
            sink.polygon(rect_corners(body.position, width, height, body.angle), body.color)
        }
    }
    if show_velocity && !body.is_static() {
        sink.arrow(
            body.position,
            body.position + body.velocity * VELOCITY_ARROW_SCALE,
            Color::YELLOW,
        );
    }
    sink.point(body.position, 4.0, Color::WHITE);
}

impl PhysicsWorld {
    /// Walk bodies (and retained contacts) in index order and emit primitives.
    pub fn render_debug(&self, sink: &mut impl DebugSink) {
        for body in self.bodies() {
            draw_body(sink, body, self.debug.show_velocity);
        }
        if self.debug.show_contacts {
            for pair in self.contacts() {
                let c = &pair.contact;
                sink.point(c.point, 6.0, Color::RED);
                let len = CONTACT_NORMAL_BASE + c.penetration * CONTACT_NORMAL_SCALE;
                sink.arrow(c.point, c.point + c.normal * len, Color::RED);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PhysicsWorldApi;
    use crate::types::WorldConfig;

    #[test]
    fn test_rect_corners_axis_aligned() {
        let c = rect_corners(Vec2::new(10.0, 20.0), 4.0, 2.0, 0.0);
        assert_eq!(c[0], Vec2::new(8.0, 19.0));
        assert_eq!(c[1], Vec2::new(12.0, 19.0));
        assert_eq!(c[2], Vec2::new(12.0, 21.0));
        assert_eq!(c[3], Vec2::new(8.0, 21.0));
    }

    #[test]
    fn test_rect_corners_rotated_keep_extents() {
        let c = rect_corners(Vec2::ZERO, 6.0, 2.0, 0.7);
        assert!(((c[1] - c[0]).length() - 6.0).abs() < 1e-4);
        assert!(((c[2] - c[1]).length() - 2.0).abs() < 1e-4);
        let centroid = (c[0] + c[1] + c[2] + c[3]) / 4.0;
        assert!(centroid.length() < 1e-4);
    }

    #[test]
    fn test_velocity_arrows_only_for_dynamic() {
        let mut w = PhysicsWorld::new(WorldConfig::default());
        w.add_body(Body::circle_default(Vec2::new(0.0, 0.0), 5.0).with_velocity(Vec2::new(1.0, 2.0)));
        w.add_body(Body::rect_static(Vec2::new(0.0, 100.0), 50.0, 10.0));

        let mut list = DrawList::new();
        w.render_debug(&mut list);
        assert_eq!(list.arrows().count(), 0);
        assert!(matches!(list.cmds[0], DrawCmd::Circle { radius, .. } if radius == 5.0));
        assert!(matches!(list.cmds[2], DrawCmd::Polygon { color, .. } if color == Color::GRAY));

        w.debug.show_velocity = true;
        list.clear();
        w.render_debug(&mut list);
        let arrows: Vec<_> = list.arrows().collect();
        assert_eq!(arrows.len(), 1);
        assert_eq!(
            *arrows[0],
            DrawCmd::Arrow {
                from: Vec2::ZERO,
                to: Vec2::new(20.0, 40.0),
                color: Color::YELLOW
            }
        );
    }

    #[test]
    fn test_contact_markers() {
        let mut w = PhysicsWorld::new(WorldConfig {
            gravity: Vec2::ZERO,
            dt: 1.0 / 60.0,
        });
        w.debug.show_contacts = true;
        w.add_body(Body::circle_default(Vec2::ZERO, 10.0));
        w.add_body(Body::circle_default(Vec2::new(15.0, 0.0), 10.0));
        w.step();

        let mut list = DrawList::new();
        w.render_debug(&mut list);
        let red_points = list
            .cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Point { color, .. } if *color == Color::RED))
            .count();
        assert_eq!(red_points, 1);
        assert_eq!(list.arrows().count(), 1);
    }
}
