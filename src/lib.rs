//! Bramble Run - a 2D side-scrolling platformer runtime
//!
//! Core modules:
//! - `physics`: deterministic AABB simulation (bodies, collision, raycasts)
//! - `level`: level geometry loaded into the physics world
//! - `sensors`: raycast probes for gameplay AI

pub mod level;
pub mod physics;
pub mod sensors;

pub use physics::{
    Aabb, Body, BodyHandle, BodyKind, ContactEvent, PhysicsWorld, RayHit, SimConfig, layers,
};

/// Simulation tuning constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Default downward acceleration (world units/s²; +Y points down)
    pub const GRAVITY: f32 = 1500.0;
    /// Default cap on downward speed (world units/s)
    pub const TERMINAL_VELOCITY: f32 = 900.0;
    /// Default horizontal damping applied each grounded tick
    pub const GROUND_FRICTION: f32 = 0.8;
    /// Grounded horizontal speeds below this snap to zero (world units/s)
    pub const FRICTION_SNAP_EPSILON: f32 = 0.01;

    /// Vertical slack between a body's bottom edge and a surface top that
    /// still counts as supported (world units)
    pub const GROUND_TOLERANCE: f32 = 1.0;
    /// Fraction of horizontal speed kept (sign flipped) after a wall hit
    pub const BOUNCE_DAMPING: f32 = 0.5;
}
