//! Bramble Run entry point
//!
//! Headless demo host: loads the built-in course, drops a scripted runner
//! in, and drives the fixed-timestep loop while the sensors steer.

use glam::Vec2;

use bramble_run::consts::{MAX_SUBSTEPS, SIM_DT};
use bramble_run::level::LevelData;
use bramble_run::{Body, BodyHandle, PhysicsWorld, SimConfig, layers, sensors};

/// A floor with a low wall to hop, ending at a gap the runner refuses
const DEMO_LEVEL: &str = r#"{
    "name": "demo-course",
    "spawn": [40.0, 100.0],
    "solids": [
        { "x": 0.0,   "y": 200.0, "w": 352.0, "h": 32.0 },
        { "x": 320.0, "y": 160.0, "w": 32.0,  "h": 40.0 },
        { "x": 352.0, "y": 200.0, "w": 168.0, "h": 32.0 },
        { "x": 580.0, "y": 200.0, "w": 180.0, "h": 32.0 }
    ]
}"#;

const RUN_SPEED: f32 = 140.0;
const JUMP_VELOCITY: f32 = -520.0;
const WALL_REACH: f32 = 12.0;
const LEDGE_DROP: f32 = 48.0;

/// Demo instance holding the world and the runner's tiny brain
struct DemoGame {
    world: PhysicsWorld,
    player: BodyHandle,
    accumulator: f32,
    facing: f32,
    was_grounded: bool,
}

impl DemoGame {
    fn new() -> Self {
        let level = LevelData::from_json(DEMO_LEVEL).expect("demo level parses");
        let mut world = PhysicsWorld::new(SimConfig::default());
        level.register(&mut world);
        let player = world.register(
            Body::new_dynamic(level.spawn_point(), Vec2::new(24.0, 32.0))
                .with_layer(layers::PLAYER)
                .with_mask(layers::TERRAIN)
                .monitoring_contacts(),
        );
        let config = world.config();
        log::info!(
            "World ready: {} solids, gravity {}, terminal velocity {}",
            level.solids.len(),
            config.gravity,
            config.terminal_velocity
        );

        Self {
            world,
            player,
            accumulator: 0.0,
            facing: 1.0,
            was_grounded: false,
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.steer();
            self.world.flush();
            self.world.step(SIM_DT);
            self.report();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// Sensor-driven steering: hop walls, turn at ledges, otherwise run
    fn steer(&mut self) {
        let Some(body) = self.world.get(self.player) else {
            return;
        };
        if !body.on_ground {
            return; // committed while airborne
        }

        if sensors::wall_ahead(&self.world, self.player, self.facing, WALL_REACH) {
            if let Some(body) = self.world.get_mut(self.player) {
                body.vel.y = JUMP_VELOCITY;
                log::info!("Jumping at wall, x={:.1}", body.pos.x);
            }
        } else if !sensors::ground_ahead(&self.world, self.player, self.facing, LEDGE_DROP) {
            self.facing = -self.facing;
            log::info!("Ledge ahead, turning around");
        }

        if let Some(body) = self.world.get_mut(self.player) {
            body.vel.x = self.facing * RUN_SPEED;
        }
    }

    /// Log grounding transitions and the runner's contacts
    fn report(&mut self) {
        let Some(body) = self.world.get(self.player) else {
            return;
        };
        if body.on_ground != self.was_grounded {
            if body.on_ground {
                log::info!("Landed at ({:.1}, {:.1})", body.pos.x, body.pos.y);
            } else {
                log::info!("Airborne at ({:.1}, {:.1})", body.pos.x, body.pos.y);
            }
            self.was_grounded = body.on_ground;
        }
        for contact in self.world.contacts() {
            if contact.body == self.player {
                log::debug!("Contact with {:?}, normal {:?}", contact.other, contact.normal);
            }
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Bramble Run (headless demo) starting...");

    let mut game = DemoGame::new();

    // Drive the host at 50 fps against the 60 Hz simulation so the
    // accumulator carries a remainder across frames
    const FRAME_DT: f32 = 1.0 / 50.0;
    for _ in 0..500 {
        game.update(FRAME_DT);
    }

    let body = game
        .world
        .get(game.player)
        .expect("runner still registered");
    println!("\nDemo finished after 10 seconds of simulated time");
    println!(
        "Runner at ({:.1}, {:.1}), grounded: {}",
        body.pos.x, body.pos.y, body.on_ground
    );
}
