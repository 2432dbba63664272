//! Entity model: shared body data plus a tagged union of behaviours

use glam::Vec2;
use slotmap::new_key_type;

use super::hazard::Hazard;
use super::kinematics::{EdgeEvent, Motion, Movable, integrate};
use super::path::Path;
use super::player::Player;
use super::projectile::{Bomb, Projectile};
use super::status_bar::StatusBar;
use crate::platform::Viewport;
use crate::renderer::DrawSink;

new_key_type! {
    /// Stable handle into the live-entity arena
    pub struct EntityId;
}

/// Data every entity carries regardless of kind
#[derive(Debug, Clone)]
pub struct Body {
    pub pos: Vec2,
    /// Half extents (width, height) used for edge tests and sizing
    pub half_extents: Vec2,
    /// Owned shapes, drawn in order
    pub paths: Vec<Path>,
    /// Flagged for removal at the next compaction
    pub destroyed: bool,
    pub collidable: bool,
    /// Touched something this frame (informational)
    pub colliding: bool,
}

impl Body {
    pub fn new(pos: Vec2, half_extents: Vec2, paths: Vec<Path>) -> Self {
        Self {
            pos,
            half_extents,
            paths,
            destroyed: false,
            collidable: true,
            colliding: false,
        }
    }

    /// One tick of `motion`; leaving the world under the destroy policy flags the body
    pub fn advance(&mut self, motion: &mut Motion, viewport: Viewport) {
        let event = integrate(
            &mut self.pos,
            self.half_extents,
            motion,
            &mut self.paths,
            viewport,
        );
        if event == EdgeEvent::Exited {
            self.destroyed = true;
        }
    }

    /// Current path vertices in world space
    pub fn world_vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        let origin = self.pos;
        self.paths
            .iter()
            .flat_map(move |path| path.vertices().map(move |v| origin + v))
    }
}

/// Per-kind state
#[derive(Debug, Clone)]
pub enum EntityKind {
    Player(Box<Player>),
    Hazard(Hazard),
    Projectile(Projectile),
    Bomb(Bomb),
    StatusBar(StatusBar),
}

impl EntityKind {
    pub fn motion(&self) -> Option<&Motion> {
        match self {
            EntityKind::Player(p) => Some(p.motion()),
            EntityKind::Hazard(h) => Some(h.motion()),
            EntityKind::Projectile(p) => Some(p.motion()),
            EntityKind::Bomb(b) => Some(b.motion()),
            EntityKind::StatusBar(_) => None,
        }
    }

    pub fn as_hazard(&self) -> Option<&Hazard> {
        match self {
            EntityKind::Hazard(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            EntityKind::Player(p) => Some(&**p),
            _ => None,
        }
    }
}

/// A live simulated object
#[derive(Debug, Clone)]
pub struct Entity {
    pub body: Body,
    pub kind: EntityKind,
}

impl Entity {
    pub fn is_hazard(&self) -> bool {
        matches!(self.kind, EntityKind::Hazard(_))
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player(_))
    }

    /// Outside the viewport with zero velocity; never true for the player or
    /// for entities without motion
    pub fn is_stranded(&self, viewport: Viewport) -> bool {
        if self.is_player() {
            return false;
        }
        match self.kind.motion() {
            Some(motion) => motion.is_stationary() && !viewport.contains(self.body.pos),
            None => false,
        }
    }

    /// Emit one shape per owned path
    pub fn draw<S: DrawSink + ?Sized>(&self, sink: &mut S) {
        for path in &self.body.paths {
            path.draw(self.body.pos, sink);
        }
    }
}

/// Result of applying damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Ignored (e.g. invulnerable)
    Rejected,
    /// Taken and survived
    Applied,
    /// Would bring the target to zero
    Fatal,
}

/// Capability: something that can be worn down
pub trait Damageable {
    fn take_damage(&mut self, amount: u32) -> DamageOutcome;
}

/// Side effects gathered during the update-and-collide pass
#[derive(Debug, Default)]
pub struct FrameEvents {
    /// Entities to append once the pass completes
    pub spawns: Vec<Entity>,
    /// Score earned this frame
    pub score: u64,
    /// The player took lethal damage
    pub game_over: bool,
}

impl FrameEvents {
    pub fn spawn(&mut self, entity: Entity) {
        self.spawns.push(entity);
    }
}
