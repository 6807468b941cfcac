use glam::Vec2;

use crate::api::NarrowphaseApi;
use crate::body::Body;
use crate::types::*;
use crate::vec2::Vec2Ext;

/// Distances below this are treated as coincident.
pub const EPSILON: f32 = 1e-8;

/// Stateless contact generation for circle/circle and circle/OBB pairs.
pub struct Narrowphase;

impl NarrowphaseApi for Narrowphase {
    fn circle_circle(a: &Body, b: &Body) -> Option<Contact> {
        let (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) = (a.shape, b.shape) else {
            return None;
        };
        let d = b.position - a.position;
        let dist2 = d.length_squared();
        let rsum = ra + rb;
        if dist2 >= rsum * rsum {
            return None;
        }
        let dist = dist2.sqrt();
        if dist < EPSILON {
            // Coincident centers; any axis will do.
            return Some(Contact {
                normal: Vec2::X,
                penetration: rsum,
                point: a.position,
            });
        }
        let normal = d / dist;
        let penetration = rsum - dist;
        let point = a.position + normal * (ra - penetration * 0.5);
        Some(Contact {
            normal,
            penetration,
            point,
        })
    }

    fn circle_obb(circle: &Body, rect: &Body) -> Option<Contact> {
        let Shape::Circle { radius } = circle.shape else {
            return None;
        };
        let half = rect.shape.half_extents()?;

        // Circle center in the rect's frame, where the rect is axis-aligned.
        let p = (circle.position - rect.position).rotated(-rect.angle);
        let closest = p.clamp(-half, half);
        let diff = p - closest;
        let dist2 = diff.length_squared();
        let inside = p.x >= -half.x && p.x <= half.x && p.y >= -half.y && p.y <= half.y;

        let (normal_local, penetration, contact_local) = if !inside {
            if dist2 >= radius * radius {
                return None;
            }
            let dist = dist2.sqrt();
            let (n, pen) = if dist < EPSILON {
                (Vec2::X, radius)
            } else {
                // From the circle toward the rect.
                (-diff / dist, radius - dist)
            };
            (n, pen, closest)
        } else {
            // Escape through the nearest edge; earlier edges win ties.
            let candidates = [
                (p.x + half.x, Vec2::X, Vec2::new(-half.x, p.y)),
                (half.x - p.x, Vec2::NEG_X, Vec2::new(half.x, p.y)),
                (p.y + half.y, Vec2::Y, Vec2::new(p.x, -half.y)),
                (half.y - p.y, Vec2::NEG_Y, Vec2::new(p.x, half.y)),
            ];
            let mut best = candidates[0];
            for c in &candidates[1..] {
                if c.0 < best.0 {
                    best = *c;
                }
            }
            let (min_dist, n, q) = best;
            (n, radius + min_dist, q)
        };

        Some(Contact {
            normal: normal_local.rotated(rect.angle),
            penetration,
            point: contact_local.rotated(rect.angle) + rect.position,
        })
    }

    fn detect(a: &Body, b: &Body) -> Option<Contact> {
        match (a.shape, b.shape) {
            (Shape::Circle { .. }, Shape::Circle { .. }) => Self::circle_circle(a, b),
            (Shape::Circle { .. }, Shape::Rect { .. }) => Self::circle_obb(a, b),
            (Shape::Rect { .. }, Shape::Circle { .. }) => {
                // Computed with the circle first, then flipped so the normal
                // still runs from `a` to `b`.
                let c = Self::circle_obb(b, a)?;
                Some(Contact {
                    normal: -c.normal,
                    ..c
                })
            }
            (Shape::Rect { .. }, Shape::Rect { .. }) => None,
        }
    }
}
