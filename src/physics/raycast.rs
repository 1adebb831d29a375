//! Segment-vs-box raycasts (slab method)
//!
//! Sensor queries for AI and gameplay: line of sight, ledge probes, ground
//! checks. Pure queries; nothing here mutates the world.

use glam::Vec2;

use super::aabb::Aabb;
use super::body::BodyHandle;
use super::world::PhysicsWorld;

/// Nearest intersection of a cast segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The body that was struck
    pub body: BodyHandle,
    /// Impact point in world units
    pub point: Vec2,
    /// Surface normal of the struck face
    pub normal: Vec2,
    /// Distance from the segment start in world units
    pub distance: f32,
}

/// Slab-method ray-vs-box intersection.
///
/// `dir` must be normalized. Returns the entry distance along the ray and
/// the normal of the entered face. The entry is negative when the origin is
/// inside the box; callers treat those as misses.
pub fn ray_aabb(origin: Vec2, dir: Vec2, aabb: &Aabb) -> Option<(f32, Vec2)> {
    if aabb.is_empty() {
        return None;
    }

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec2::ZERO;

    // X slab
    if dir.x.abs() < f32::EPSILON {
        if origin.x <= aabb.min.x || origin.x >= aabb.max.x {
            return None;
        }
    } else {
        let inv = 1.0 / dir.x;
        let mut t0 = (aabb.min.x - origin.x) * inv;
        let mut t1 = (aabb.max.x - origin.x) * inv;
        let mut face = Vec2::NEG_X;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            face = Vec2::X;
        }
        if t0 > t_enter {
            t_enter = t0;
            normal = face;
        }
        t_exit = t_exit.min(t1);
    }

    // Y slab
    if dir.y.abs() < f32::EPSILON {
        if origin.y <= aabb.min.y || origin.y >= aabb.max.y {
            return None;
        }
    } else {
        let inv = 1.0 / dir.y;
        let mut t0 = (aabb.min.y - origin.y) * inv;
        let mut t1 = (aabb.max.y - origin.y) * inv;
        let mut face = Vec2::NEG_Y;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            face = Vec2::Y;
        }
        if t0 > t_enter {
            t_enter = t0;
            normal = face;
        }
        t_exit = t_exit.min(t1);
    }

    if t_enter > t_exit || t_exit < 0.0 {
        return None;
    }
    Some((t_enter, normal))
}

impl PhysicsWorld {
    /// Cast a segment through the world and return the nearest struck body.
    ///
    /// Tests every visible body whose `layer` matches `mask`, in registration
    /// order (exact ties keep the earlier registration). Inactive bodies,
    /// zero-area bodies, and boxes the segment starts inside never register a
    /// hit. Zero-length segments miss everything.
    pub fn raycast(&self, start: Vec2, end: Vec2, mask: u32) -> Option<RayHit> {
        let delta = end - start;
        let len = delta.length();
        if len <= f32::EPSILON {
            return None;
        }
        let dir = delta / len;

        let mut best: Option<RayHit> = None;
        for (handle, body) in self.iter_bodies() {
            if !body.active || body.layer & mask == 0 {
                continue;
            }
            let Some((t, normal)) = ray_aabb(start, dir, &body.aabb()) else {
                continue;
            };
            if t < 0.0 || t > len {
                continue;
            }
            match &best {
                Some(hit) if t >= hit.distance => {}
                _ => {
                    best = Some(RayHit {
                        body: handle,
                        point: start + dir * t,
                        normal,
                        distance: t,
                    });
                }
            }
        }
        best
    }
}
