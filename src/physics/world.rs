//! Body registry and the fixed-timestep tick pipeline
//!
//! `PhysicsWorld` owns every body. Gameplay holds generational handles and
//! queues insertions/removals; `flush` applies the queues at a single defined
//! point per tick, so the body set never changes mid-scan. `step` then runs
//! integrate -> detect/resolve -> classify grounding.

use serde::{Deserialize, Serialize};

use super::body::{Body, BodyHandle, BodyKind};
use super::collision::{self, ContactEvent};
use super::config::SimConfig;
use crate::consts::FRICTION_SNAP_EPSILON;

/// One reusable body slot
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot {
    generation: u32,
    body: Option<Body>,
}

/// Owner of all bodies plus the per-tick simulation pipeline
///
/// The whole world serializes, so hosts can snapshot and restore a run
/// mid-level; only the per-tick contact queue is skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsWorld {
    config: SimConfig,
    slots: Vec<Slot>,
    free: Vec<u32>,
    /// Visible bodies in registration order
    bodies: Vec<BodyHandle>,
    statics: Vec<BodyHandle>,
    dynamics: Vec<BodyHandle>,
    pending_insert: Vec<BodyHandle>,
    pending_remove: Vec<BodyHandle>,
    /// Contacts from the current tick; cleared when the next one starts
    #[serde(skip)]
    contacts: Vec<ContactEvent>,
}

impl PhysicsWorld {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config: config.sanitize(),
            slots: Vec::new(),
            free: Vec::new(),
            bodies: Vec::new(),
            statics: Vec::new(),
            dynamics: Vec::new(),
            pending_insert: Vec::new(),
            pending_remove: Vec::new(),
            contacts: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Queue a body for insertion.
    ///
    /// The returned handle answers `get`/`get_mut` immediately; the body
    /// joins detection and raycasts at the next `flush`.
    pub fn register(&mut self, body: Body) -> BodyHandle {
        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.body = Some(body);
                BodyHandle::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    body: Some(body),
                });
                BodyHandle::new(index, 0)
            }
        };
        self.pending_insert.push(handle);
        handle
    }

    /// Queue a body for removal at the next `flush`. Until then it keeps
    /// moving, colliding, and answering lookups. Stale handles are absorbed
    /// silently.
    pub fn unregister(&mut self, handle: BodyHandle) {
        self.pending_remove.push(handle);
    }

    /// Apply queued insertions, then queued removals.
    ///
    /// The host calls this exactly once per tick, before `step`. Flushing
    /// empty queues is a no-op; a body registered and unregistered within
    /// the same tick nets to nothing visible.
    pub fn flush(&mut self) {
        let inserts = std::mem::take(&mut self.pending_insert);
        for handle in inserts {
            let Some(body) = self.get(handle) else { continue };
            let kind = body.kind;
            self.bodies.push(handle);
            match kind {
                BodyKind::Static => self.statics.push(handle),
                BodyKind::Dynamic => self.dynamics.push(handle),
            }
        }

        let removals = std::mem::take(&mut self.pending_remove);
        for handle in removals {
            let Some(slot) = self.slots.get_mut(handle.index() as usize) else {
                continue;
            };
            if slot.generation != handle.generation() || slot.body.is_none() {
                continue; // already gone
            }
            slot.body = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(handle.index());
            self.bodies.retain(|h| *h != handle);
            self.statics.retain(|h| *h != handle);
            self.dynamics.retain(|h| *h != handle);
        }
    }

    /// Look up a body; `None` means the handle is stale (entity already gone)
    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        let slot = self.slots.get(handle.index() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.body.as_ref()
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        let slot = self.slots.get_mut(handle.index() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.body.as_mut()
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Number of bodies visible to detection and raycasts
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Visible bodies in registration order
    pub fn iter_bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
        self.bodies
            .iter()
            .filter_map(|&handle| self.get(handle).map(|body| (handle, body)))
    }

    /// Contacts recorded by the latest `step`, one per opted-in participant
    /// per resolved pair
    pub fn contacts(&self) -> &[ContactEvent] {
        &self.contacts
    }

    /// Serialize the whole world to JSON
    pub fn snapshot(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Restore a world previously captured with `snapshot`. The loaded
    /// config passes through the same sanitize step as `new`.
    pub fn from_snapshot(json: &str) -> serde_json::Result<Self> {
        let mut world: Self = serde_json::from_str(json)?;
        world.config = world.config.sanitize();
        Ok(world)
    }

    /// Advance the simulation one fixed timestep (`dt` in seconds).
    ///
    /// The host has already flushed this tick. Order matters: integrate,
    /// then detect/resolve, then classify grounding; gameplay reading
    /// `on_ground` afterwards sees this tick's classification.
    pub fn step(&mut self, dt: f32) {
        self.contacts.clear();
        self.integrate(dt);
        self.resolve_collisions();
        self.classify_grounding();
    }

    /// Gravity, terminal velocity, grounded friction, then movement
    fn integrate(&mut self, dt: f32) {
        let SimConfig {
            gravity,
            terminal_velocity,
            friction,
        } = self.config;

        for i in 0..self.dynamics.len() {
            let handle = self.dynamics[i];
            let Some(body) = self.get_mut(handle) else {
                continue;
            };
            if !body.active {
                continue;
            }

            if body.on_ground && body.vel.y >= 0.0 {
                // Supported and not jumping: hold level instead of sinking
                body.vel.y = 0.0;
            } else if body.gravity {
                body.vel.y = (body.vel.y + gravity * dt).min(terminal_velocity);
            }

            if body.on_ground {
                body.vel.x *= friction;
                if body.vel.x.abs() < FRICTION_SNAP_EPSILON {
                    body.vel.x = 0.0;
                }
            }

            body.prev_pos = body.pos;
            body.pos += body.vel * dt;
        }
    }

    /// Brute-force pair scan: each active dynamic body against the statics,
    /// then against the other dynamics. Pairs resolve immediately in scan
    /// order, so a correction from one pair feeds the next test; a residual
    /// overlap against a later body can survive until the following tick.
    fn resolve_collisions(&mut self) {
        for i in 0..self.dynamics.len() {
            let a = self.dynamics[i];
            for j in 0..self.statics.len() {
                let b = self.statics[j];
                self.resolve_pair(a, b);
            }
            for j in 0..self.dynamics.len() {
                let b = self.dynamics[j];
                if b == a {
                    continue; // self-test excluded by handle identity
                }
                self.resolve_pair(a, b);
            }
        }
    }

    /// Gate one directed pair (active flags, then a's mask against b's
    /// layer), resolve the overlap, and emit contact events for opted-in
    /// participants after the geometry is corrected.
    fn resolve_pair(&mut self, a_handle: BodyHandle, b_handle: BodyHandle) {
        let Some((a, b)) = pair_mut(&mut self.slots, a_handle, b_handle) else {
            return;
        };
        if !a.active || !b.active {
            return;
        }
        if a.mask & b.layer == 0 {
            return;
        }
        let Some(normal) = collision::resolve_overlap(a, b) else {
            return;
        };

        let notify_a = a.monitor_contacts;
        let notify_b = b.monitor_contacts;
        if notify_a {
            self.contacts.push(ContactEvent {
                body: a_handle,
                other: b_handle,
                normal,
            });
        }
        if notify_b {
            self.contacts.push(ContactEvent {
                body: b_handle,
                other: a_handle,
                normal: -normal,
            });
        }
    }

    /// Recompute `on_ground` from scratch for every active dynamic body:
    /// grounded iff some active static surface matching the body's mask
    /// passes the support test. First match wins. Runs unconditionally, so a
    /// body that walks off a ledge loses grounding the same tick.
    fn classify_grounding(&mut self) {
        for i in 0..self.dynamics.len() {
            let handle = self.dynamics[i];
            let Some(body) = self.get(handle) else {
                continue;
            };
            if !body.active {
                continue;
            }
            let aabb = body.aabb();
            let mask = body.mask;

            let mut grounded = false;
            for j in 0..self.statics.len() {
                let Some(surface) = self.get(self.statics[j]) else {
                    continue;
                };
                if !surface.active || mask & surface.layer == 0 {
                    continue;
                }
                if collision::supported_on(&aabb, &surface.aabb()) {
                    grounded = true;
                    break;
                }
            }

            if let Some(body) = self.get_mut(handle) {
                body.on_ground = grounded;
            }
        }
    }
}

/// Split-borrow two distinct live slots: the first mutably, the second
/// shared. `None` for stale handles or identical indices.
fn pair_mut(
    slots: &mut [Slot],
    a: BodyHandle,
    b: BodyHandle,
) -> Option<(&mut Body, &Body)> {
    let ai = a.index() as usize;
    let bi = b.index() as usize;
    if ai == bi || ai >= slots.len() || bi >= slots.len() {
        return None;
    }
    if slots[ai].generation != a.generation() || slots[bi].generation != b.generation() {
        return None;
    }

    let (a_slot, b_slot) = if ai < bi {
        let (lo, hi) = slots.split_at_mut(bi);
        (&mut lo[ai], &hi[0])
    } else {
        let (lo, hi) = slots.split_at_mut(ai);
        (&mut hi[0], &lo[bi])
    };

    match (a_slot.body.as_mut(), b_slot.body.as_ref()) {
        (Some(a), Some(b)) => Some((a, b)),
        _ => None,
    }
}
