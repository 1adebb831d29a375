//! Body records, handles, and collision layers
//!
//! All per-body state the registry owns lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;

/// Named collision layer bits
pub mod layers {
    /// Solid level geometry (ground, platforms, blocks)
    pub const TERRAIN: u32 = 1 << 0;
    /// The player character
    pub const PLAYER: u32 = 1 << 1;
    /// Enemies
    pub const ENEMY: u32 = 1 << 2;
    /// Coins, power-ups and other collectables
    pub const PICKUP: u32 = 1 << 3;
    /// Projectiles
    pub const PROJECTILE: u32 = 1 << 4;
    /// Matches every layer
    pub const ALL: u32 = u32::MAX;
}

/// Whether a body is moved by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Immovable level geometry; never integrated, never pushed
    Static,
    /// Integrated and resolved every tick
    Dynamic,
}

/// Generational handle to a body slot
///
/// Slots are reused; freeing one bumps its generation, so stale handles fail
/// lookup instead of aliasing the slot's next occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    /// Sentinel that never resolves to a live body
    pub const NULL: BodyHandle = BodyHandle {
        index: u32::MAX,
        generation: u32::MAX,
    };

    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// A physics body: one axis-aligned rectangle plus its motion state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner in world units (+Y points down)
    pub pos: Vec2,
    /// Width and height in world units; zero-area bodies collide with nothing
    pub size: Vec2,
    /// Velocity in world units per second (dynamic bodies only)
    pub vel: Vec2,
    /// Position at the start of the current tick, for render interpolation
    /// and platform-borne velocity derivation
    pub prev_pos: Vec2,
    /// Fixed once registered; the registry partitions on it at flush
    pub kind: BodyKind,
    /// Whether the integrator applies gravity
    pub gravity: bool,
    /// Supported by a static surface. Written by the simulation every tick,
    /// read-only for gameplay.
    pub on_ground: bool,
    /// What this body is (bit pattern)
    pub layer: u32,
    /// What this body collides with, tested against the other body's layer
    pub mask: u32,
    /// Inactive bodies are skipped by integration, detection, and raycasts
    pub active: bool,
    /// Opt in to contact events when this body is part of a resolved pair
    #[serde(default)]
    pub monitor_contacts: bool,
}

impl Body {
    /// Create a body with default flags: gravity on, active, mask matching
    /// every layer, layer `TERRAIN`. Negative size components clamp to zero.
    pub fn new(kind: BodyKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size: size.max(Vec2::ZERO),
            vel: Vec2::ZERO,
            prev_pos: pos,
            kind,
            gravity: true,
            on_ground: false,
            layer: layers::TERRAIN,
            mask: layers::ALL,
            active: true,
            monitor_contacts: false,
        }
    }

    pub fn new_dynamic(pos: Vec2, size: Vec2) -> Self {
        Self::new(BodyKind::Dynamic, pos, size)
    }

    pub fn new_static(pos: Vec2, size: Vec2) -> Self {
        Self::new(BodyKind::Static, pos, size)
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_mask(mut self, mask: u32) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_gravity(mut self, gravity: bool) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn monitoring_contacts(mut self) -> Self {
        self.monitor_contacts = true;
        self
    }

    /// Collision box at the current position
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Movement accumulated this tick (`pos - prev_pos`); riders divide by
    /// dt to recover platform-borne velocity
    #[inline]
    pub fn frame_delta(&self) -> Vec2 {
        self.pos - self.prev_pos
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let body = Body::new_dynamic(Vec2::new(10.0, 20.0), Vec2::new(32.0, 32.0));
        assert_eq!(body.kind, BodyKind::Dynamic);
        assert!(body.gravity);
        assert!(body.active);
        assert!(!body.on_ground);
        assert!(!body.monitor_contacts);
        assert_eq!(body.mask, layers::ALL);
        assert_eq!(body.layer, layers::TERRAIN);
        assert_eq!(body.vel, Vec2::ZERO);
        assert_eq!(body.prev_pos, body.pos);
    }

    #[test]
    fn test_negative_size_clamps_to_zero() {
        let body = Body::new_static(Vec2::ZERO, Vec2::new(-5.0, 10.0));
        assert_eq!(body.size, Vec2::new(0.0, 10.0));
        assert!(body.aabb().is_empty());
    }

    #[test]
    fn test_builder_helpers() {
        let body = Body::new_dynamic(Vec2::ZERO, Vec2::new(16.0, 16.0))
            .with_layer(layers::ENEMY)
            .with_mask(layers::TERRAIN | layers::PLAYER)
            .with_gravity(false)
            .monitoring_contacts();
        assert_eq!(body.layer, layers::ENEMY);
        assert_eq!(body.mask, layers::TERRAIN | layers::PLAYER);
        assert!(!body.gravity);
        assert!(body.monitor_contacts);
    }

    #[test]
    fn test_null_handle_is_stale() {
        assert_eq!(BodyHandle::NULL.index(), u32::MAX);
        assert_ne!(BodyHandle::NULL, BodyHandle::new(0, 0));
    }
}
