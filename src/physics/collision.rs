//! Overlap testing and minimum-translation resolution
//!
//! The response model is deliberately simple (retro platformer rules): a
//! dynamic body is pushed out of whatever it overlaps along the axis of
//! least penetration, and the other body never moves.

use glam::Vec2;

use super::aabb::Aabb;
use super::body::{Body, BodyHandle};
use crate::consts::{BOUNCE_DAMPING, GROUND_TOLERANCE};

/// One resolved pair, reported to participants that opted in via
/// `monitor_contacts`
///
/// `normal` is the surface normal `body` was pushed along; the paired event
/// for the other participant carries the negation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub body: BodyHandle,
    pub other: BodyHandle,
    pub normal: Vec2,
}

/// Per-axis penetration depths of two boxes. A positive component means the
/// projections on that axis overlap by that much.
#[inline]
pub fn overlap_depth(a: &Aabb, b: &Aabb) -> Vec2 {
    Vec2::new(
        (a.max.x - b.min.x).min(b.max.x - a.min.x),
        (a.max.y - b.min.y).min(b.max.y - a.min.y),
    )
}

/// Push dynamic body `a` out of `b` along the axis of least penetration.
///
/// Returns the surface normal `a` was pushed along, or `None` when the boxes
/// do not actually overlap. Ties between the axes resolve vertically. The X
/// path keeps half the horizontal speed with the sign flipped; the Y path
/// kills vertical speed and grants grounding only when `a` came from above.
pub fn resolve_overlap(a: &mut Body, b: &Body) -> Option<Vec2> {
    let box_a = a.aabb();
    let box_b = b.aabb();
    if !box_a.overlaps(&box_b) {
        return None;
    }

    let depth = overlap_depth(&box_a, &box_b);
    let normal;
    if depth.x < depth.y {
        // Horizontal: settle flush against the side the body came from
        if a.pos.x < b.pos.x {
            a.pos.x = b.pos.x - a.size.x;
            normal = Vec2::NEG_X;
        } else {
            a.pos.x = b.pos.x + b.size.x;
            normal = Vec2::X;
        }
        a.vel.x = -a.vel.x * BOUNCE_DAMPING;
    } else {
        if a.pos.y < b.pos.y {
            // Landing: bottom flush with b's top
            a.pos.y = b.pos.y - a.size.y;
            a.on_ground = true;
            normal = Vec2::NEG_Y;
        } else {
            // Ceiling: top flush with b's bottom, no grounding
            a.pos.y = b.pos.y + b.size.y;
            normal = Vec2::Y;
        }
        a.vel.y = 0.0;
    }
    Some(normal)
}

/// Support test for the grounding classifier: `body` stands on `surface`
/// when its bottom edge is flush with (or sunk at most `GROUND_TOLERANCE`
/// into) the surface top and the horizontal extents strictly overlap.
///
/// One-sided on purpose: a body still falling toward the surface is
/// airborne, however close it is.
pub fn supported_on(body: &Aabb, surface: &Aabb) -> bool {
    if body.is_empty() || surface.is_empty() {
        return false;
    }
    let sink = body.max.y - surface.min.y;
    (0.0..=GROUND_TOLERANCE).contains(&sink)
        && body.min.x < surface.max.x
        && body.max.x > surface.min.x
}
