//! Deterministic physics module
//!
//! All runtime motion lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (registration order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod body;
pub mod collision;
pub mod config;
pub mod raycast;
pub mod world;

pub use aabb::Aabb;
pub use body::{Body, BodyHandle, BodyKind, layers};
pub use collision::{ContactEvent, overlap_depth, resolve_overlap, supported_on};
pub use config::SimConfig;
pub use raycast::{RayHit, ray_aabb};
pub use world::PhysicsWorld;
