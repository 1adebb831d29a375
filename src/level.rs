//! Level definitions: JSON in, static terrain bodies out
//!
//! A level file is data only. Geometry becomes physics bodies through
//! [`LevelData::register`]; nothing here touches rendering.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::physics::{Body, BodyHandle, PhysicsWorld, layers};

/// One axis-aligned solid in level space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolidDef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Collision layer bit; plain terrain when omitted
    #[serde(default = "default_layer")]
    pub layer: u32,
}

fn default_layer() -> u32 {
    layers::TERRAIN
}

/// A parsed level: a spawn point and the solid geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LevelData {
    #[serde(default)]
    pub name: String,
    /// Where the player starts, top-left corner
    #[serde(default)]
    pub spawn: Vec2,
    #[serde(default)]
    pub solids: Vec<SolidDef>,
}

impl LevelData {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let level: LevelData = serde_json::from_str(json)?;
        log::info!(
            "Loaded level '{}' with {} solids, spawn at {:?}",
            level.name,
            level.solids.len(),
            level.spawn
        );
        Ok(level)
    }

    #[inline]
    pub fn spawn_point(&self) -> Vec2 {
        self.spawn
    }

    /// Register every solid as a static body. Handles come back in file
    /// order; the caller still has to `flush` before the bodies collide.
    pub fn register(&self, world: &mut PhysicsWorld) -> Vec<BodyHandle> {
        self.solids
            .iter()
            .map(|solid| {
                world.register(
                    Body::new_static(
                        Vec2::new(solid.x, solid.y),
                        Vec2::new(solid.w, solid.h),
                    )
                    .with_layer(solid.layer),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::SimConfig;

    const TEST_LEVEL: &str = r#"{
        "name": "meadow",
        "spawn": [32.0, 40.0],
        "solids": [
            { "x": 0.0, "y": 100.0, "w": 320.0, "h": 32.0 },
            { "x": 400.0, "y": 80.0, "w": 64.0, "h": 16.0, "layer": 8 }
        ]
    }"#;

    #[test]
    fn test_parse_level() {
        let level = LevelData::from_json(TEST_LEVEL).unwrap();
        assert_eq!(level.name, "meadow");
        assert_eq!(level.spawn_point(), Vec2::new(32.0, 40.0));
        assert_eq!(level.solids.len(), 2);
        // Omitted layer falls back to terrain
        assert_eq!(level.solids[0].layer, layers::TERRAIN);
        assert_eq!(level.solids[1].layer, 8);
    }

    #[test]
    fn test_defaults_for_sparse_level() {
        let level = LevelData::from_json(r#"{ "solids": [] }"#).unwrap();
        assert_eq!(level.name, "");
        assert_eq!(level.spawn_point(), Vec2::ZERO);
        assert!(level.solids.is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(LevelData::from_json("{ not json").is_err());
        assert!(LevelData::from_json(r#"{ "solids": [{ "x": 1.0 }] }"#).is_err());
    }

    #[test]
    fn test_register_creates_static_bodies() {
        let level = LevelData::from_json(TEST_LEVEL).unwrap();
        let mut world = PhysicsWorld::new(SimConfig::default());
        let handles = level.register(&mut world);
        world.flush();

        assert_eq!(handles.len(), 2);
        assert_eq!(world.body_count(), 2);

        let floor = world.get(handles[0]).unwrap();
        assert!(floor.is_static());
        assert_eq!(floor.pos, Vec2::new(0.0, 100.0));
        assert_eq!(floor.size, Vec2::new(320.0, 32.0));
        assert_eq!(floor.layer, layers::TERRAIN);

        let ledge = world.get(handles[1]).unwrap();
        assert_eq!(ledge.layer, 8);
    }
}
