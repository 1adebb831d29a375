//! Raycast probes for gameplay and AI
//!
//! Pure queries over an already-flushed world: ledge checks ahead of a
//! patroller, wall checks before a turn, support depth below a faller. Each
//! probe uses the probing body's own collision mask, so a sensor sees
//! exactly what the body would collide with. Stale handles read as "nothing
//! there".

use glam::Vec2;

use crate::physics::{BodyHandle, PhysicsWorld, RayHit};

/// How far past the leading edge the ledge probe starts
const LOOKAHEAD: f32 = 1.0;

/// Is there ground within `drop` units below the leading bottom corner?
///
/// `facing` picks the edge: negative looks left, anything else looks right.
/// Returns `false` at a ledge, which is the patrol AI's cue to turn around.
pub fn ground_ahead(world: &PhysicsWorld, handle: BodyHandle, facing: f32, drop: f32) -> bool {
    let Some(body) = world.get(handle) else {
        return false;
    };
    let aabb = body.aabb();
    let ahead = if facing < 0.0 {
        aabb.min.x - LOOKAHEAD
    } else {
        aabb.max.x + LOOKAHEAD
    };
    let start = Vec2::new(ahead, aabb.max.y);
    world
        .raycast(start, start + Vec2::new(0.0, drop), body.mask)
        .is_some()
}

/// Is there a blocker within `reach` units ahead at mid-height?
pub fn wall_ahead(world: &PhysicsWorld, handle: BodyHandle, facing: f32, reach: f32) -> bool {
    let Some(body) = world.get(handle) else {
        return false;
    };
    let aabb = body.aabb();
    let (edge, step) = if facing < 0.0 {
        (aabb.min.x, -reach)
    } else {
        (aabb.max.x, reach)
    };
    let start = Vec2::new(edge, aabb.center().y);
    world
        .raycast(start, start + Vec2::new(step, 0.0), body.mask)
        .is_some()
}

/// Nearest surface within `max_depth` units straight below bottom-center.
///
/// A body standing flush on a floor reports that floor at distance zero.
pub fn ground_below(world: &PhysicsWorld, handle: BodyHandle, max_depth: f32) -> Option<RayHit> {
    let body = world.get(handle)?;
    let aabb = body.aabb();
    let start = Vec2::new(aabb.center().x, aabb.max.y);
    world.raycast(start, start + Vec2::new(0.0, max_depth), body.mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Body, SimConfig};

    /// Floor from x 0..200 at y 100, wall from x 240..272 rising above it
    fn patrol_world() -> (PhysicsWorld, BodyHandle, BodyHandle) {
        let mut world = PhysicsWorld::new(SimConfig::default());
        let floor = world.register(Body::new_static(
            Vec2::new(0.0, 100.0),
            Vec2::new(200.0, 32.0),
        ));
        world.register(Body::new_static(
            Vec2::new(240.0, 36.0),
            Vec2::new(32.0, 96.0),
        ));
        let walker = world.register(Body::new_dynamic(
            Vec2::new(20.0, 68.0),
            Vec2::new(32.0, 32.0),
        ));
        world.flush();
        (world, floor, walker)
    }

    #[test]
    fn test_ground_ahead_mid_floor_and_at_ledges() {
        let (mut world, _, walker) = patrol_world();

        assert!(ground_ahead(&world, walker, 1.0, 8.0));
        assert!(ground_ahead(&world, walker, -1.0, 8.0));

        // Right edge at 202, probe at 203: past the floor
        world.get_mut(walker).unwrap().pos.x = 170.0;
        assert!(!ground_ahead(&world, walker, 1.0, 8.0));
        assert!(ground_ahead(&world, walker, -1.0, 8.0));

        // Left edge at 0, probe at -1: past the other end
        world.get_mut(walker).unwrap().pos.x = 0.0;
        assert!(!ground_ahead(&world, walker, -1.0, 8.0));
    }

    #[test]
    fn test_wall_ahead_respects_reach() {
        let (mut world, _, walker) = patrol_world();

        world.get_mut(walker).unwrap().pos.x = 170.0;
        // Leading edge at 202, wall face at 240
        assert!(wall_ahead(&world, walker, 1.0, 50.0));
        assert!(!wall_ahead(&world, walker, 1.0, 30.0));
        assert!(!wall_ahead(&world, walker, -1.0, 50.0));
    }

    #[test]
    fn test_ground_below_reports_depth() {
        let (mut world, floor, walker) = patrol_world();

        // Standing flush on the floor
        let hit = ground_below(&world, walker, 10.0).unwrap();
        assert_eq!(hit.body, floor);
        assert!(hit.distance.abs() < 1e-6);

        // Mid-air, 38 units above the floor top
        world.get_mut(walker).unwrap().pos.y = 30.0;
        let hit = ground_below(&world, walker, 50.0).unwrap();
        assert_eq!(hit.body, floor);
        assert!((hit.distance - 38.0).abs() < 1e-4);
        assert_eq!(hit.normal, Vec2::NEG_Y);

        assert!(ground_below(&world, walker, 20.0).is_none());
    }

    #[test]
    fn test_probes_ignore_masked_out_layers() {
        let (mut world, _, walker) = patrol_world();
        // A walker that only collides with layer 8 sees no terrain at all
        world.get_mut(walker).unwrap().mask = 1 << 3;

        assert!(!ground_ahead(&world, walker, 1.0, 8.0));
        assert!(ground_below(&world, walker, 10.0).is_none());
    }

    #[test]
    fn test_dead_handle_senses_nothing() {
        let (mut world, _, walker) = patrol_world();
        world.unregister(walker);
        world.flush();

        assert!(!ground_ahead(&world, walker, 1.0, 8.0));
        assert!(!wall_ahead(&world, walker, 1.0, 50.0));
        assert!(ground_below(&world, walker, 10.0).is_none());
    }
}
