//! Impulse-based contact resolution with rotational terms and positional
//! correction. No friction, no warm-starting: one pass per contact per step.

use crate::body::Body;
use crate::narrowphase::EPSILON;
use crate::types::Contact;
use crate::vec2::Vec2Ext;

/// Fraction of the penetration removed per resolution.
pub const CORRECTION_PERCENT: f32 = 0.2;
/// Penetration tolerated before correction kicks in.
pub const CORRECTION_SLOP: f32 = 0.001;

/// Apply the normal impulse (if approaching) and positional correction to
/// `a` and `b`. `contact.normal` must point from `a` toward `b`.
pub fn resolve(a: &mut Body, b: &mut Body, contact: &Contact) {
    let inv_mass_sum = a.inv_mass + b.inv_mass;
    if inv_mass_sum == 0.0 {
        return;
    }

    let n = contact.normal;
    let r_a = contact.point - a.position;
    let r_b = contact.point - b.position;

    // Contact point velocities: v + ω × r, with ω × r = ω · perp(r) in 2D.
    let vel_a = a.velocity + r_a.perp() * a.angular_velocity;
    let vel_b = b.velocity + r_b.perp() * b.angular_velocity;
    let vel_along_normal = (vel_b - vel_a).dot(n);

    if vel_along_normal <= 0.0 {
        let ra_n = r_a.cross(n);
        let rb_n = r_b.cross(n);
        let k = inv_mass_sum + ra_n * ra_n * a.inv_inertia + rb_n * rb_n * b.inv_inertia;
        if k >= EPSILON {
            let e = a.restitution.min(b.restitution);
            let j = -(1.0 + e) * vel_along_normal / k;
            let impulse = n * j;

            a.velocity -= impulse * a.inv_mass;
            b.velocity += impulse * b.inv_mass;
            a.angular_velocity -= r_a.cross(impulse) * a.inv_inertia;
            b.angular_velocity += r_b.cross(impulse) * b.inv_inertia;
        }
    }

    positional_correction(a, b, contact);
}

/// Nudge overlapping bodies apart along the normal, weighted by inverse mass.
pub fn positional_correction(a: &mut Body, b: &mut Body, contact: &Contact) {
    let inv_mass_sum = a.inv_mass + b.inv_mass;
    if inv_mass_sum == 0.0 {
        return;
    }
    let correction =
        (contact.penetration - CORRECTION_SLOP).max(0.0) * CORRECTION_PERCENT / inv_mass_sum;
    let shift = contact.normal * correction;
    a.position -= shift * a.inv_mass;
    b.position += shift * b.inv_mass;
}
