//! Projectile variants and their steering
//!
//! Every variant shares the base update (facing rotation, integration, fade,
//! trigger gating, lifetime). Variants that steer do so in two phases so the
//! arena can be read while the projectile itself is not borrowed:
//! [`plan_steering`] looks at the other entities, [`apply_steering`] writes the
//! result back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::EntityArena;
use super::entity::{Body, Entity, EntityId, EntityKind, FrameEvents};
use super::kinematics::{EdgePolicy, Motion, Movable};
use super::path::Path;
use crate::consts::{ORBIT_APPROACH_DISTANCE, SEEK_RETURN_DISTANCE};
use crate::platform::Viewport;
use crate::renderer::{Rgba, palette};
use crate::{bearing_degrees, heading_to_velocity};

/// Every kind of shot the player can fire or a payload can release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileVariant {
    #[default]
    Straight,
    /// Homes on the nearest on-screen hazard
    Seeking,
    /// Circles the nearest hazard until it is gone
    Orbiting,
    /// Circles the player
    PlayerOrbiting,
    /// Ricochets off hazards instead of being spent
    Bouncing,
    /// Releases a ring of straight shots
    Bomb,
    /// Releases a ring of bomb shots
    RecursiveBomb,
    /// Splits in two on every hit
    Weird,
}

/// Ring released by a payload-carrying shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payload {
    pub shot: ProjectileVariant,
    pub count: u32,
    /// Degrees added to the carrier's heading
    pub offset: f32,
}

#[derive(Debug, Clone, Copy)]
struct Profile {
    max_speed: f32,
    max_lifetime: u32,
    prime_delay: u32,
    trigger_delay: u32,
}

impl ProjectileVariant {
    fn profile(&self) -> Profile {
        let base = Profile {
            max_speed: 10.0,
            max_lifetime: 200,
            prime_delay: 0,
            trigger_delay: 0,
        };
        match self {
            ProjectileVariant::Straight | ProjectileVariant::Bouncing | ProjectileVariant::Weird => {
                base
            }
            ProjectileVariant::Seeking => Profile {
                max_speed: 20.0,
                max_lifetime: 1000,
                prime_delay: 20,
                ..base
            },
            ProjectileVariant::Orbiting => Profile {
                max_lifetime: 2000,
                prime_delay: 20,
                ..base
            },
            ProjectileVariant::PlayerOrbiting => Profile {
                max_speed: 15.0,
                max_lifetime: 2000,
                prime_delay: 20,
                ..base
            },
            ProjectileVariant::Bomb | ProjectileVariant::RecursiveBomb => Profile {
                trigger_delay: 5,
                ..base
            },
        }
    }

    pub fn payload(&self) -> Option<Payload> {
        match self {
            ProjectileVariant::Bomb => Some(Payload {
                shot: ProjectileVariant::Straight,
                count: 3,
                offset: 0.0,
            }),
            ProjectileVariant::RecursiveBomb => Some(Payload {
                shot: ProjectileVariant::Bomb,
                count: 3,
                offset: 0.0,
            }),
            ProjectileVariant::Weird => Some(Payload {
                shot: ProjectileVariant::Weird,
                count: 2,
                offset: 90.0,
            }),
            _ => None,
        }
    }

    /// Payload also released when the shot runs out of lifetime.
    /// Weird shots would otherwise multiply without bound.
    fn deploys_on_expiry(&self) -> bool {
        self.payload().is_some() && *self != ProjectileVariant::Weird
    }

    pub fn steers(&self) -> bool {
        matches!(
            self,
            ProjectileVariant::Seeking
                | ProjectileVariant::Orbiting
                | ProjectileVariant::PlayerOrbiting
        )
    }

    fn color(&self) -> Rgba {
        match self {
            ProjectileVariant::Bomb => palette::BOMB_SHOT,
            ProjectileVariant::RecursiveBomb => palette::RECURSIVE_BOMB_SHOT,
            _ => palette::SHOT,
        }
    }

    fn half_extents(&self) -> Vec2 {
        match self {
            ProjectileVariant::Bomb | ProjectileVariant::RecursiveBomb => Vec2::splat(10.0),
            _ => Vec2::new(2.0, 5.0),
        }
    }

    fn shape(&self) -> Path {
        match self {
            ProjectileVariant::Bomb => Path::triangle(5.0),
            ProjectileVariant::RecursiveBomb => {
                let mut path = Path::triangle(5.0);
                path.bake_rotation(-90.0);
                path
            }
            _ => Path::rectangle(5.0, 10.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub variant: ProjectileVariant,
    pub motion: Motion,
    /// Hazard size removed per hit
    pub strength: u32,
    pub lifetime: u32,
    /// 0 means unlimited
    pub max_lifetime: u32,
    /// Lifetime ticks before steering starts
    pub prime_delay: u32,
    /// Ticks before the shot can collide
    pub trigger_delay: u32,
    pub trigger_time: u32,
    pub color: Rgba,
    /// Orbit binding; re-validated against the arena every frame
    pub orbit_target: Option<EntityId>,
}

impl Projectile {
    pub fn is_primed(&self) -> bool {
        self.variant.steers() && self.lifetime >= self.prime_delay
    }

    /// Base behaviour shared by every variant
    pub fn update(&mut self, body: &mut Body, viewport: Viewport, events: &mut FrameEvents) {
        let facing = self.motion.facing_angle();
        for path in &mut body.paths {
            path.set_rotation(facing);
        }

        body.advance(&mut self.motion, viewport);
        if body.destroyed {
            return;
        }

        let opacity = if self.max_lifetime > 0 {
            let t = self.lifetime as f32 / self.max_lifetime as f32;
            1.0 - t * t
        } else {
            1.0
        };
        let fill = self.color.with_alpha(opacity);
        for path in &mut body.paths {
            path.fill = Some(fill);
        }

        body.collidable = self.trigger_time == self.trigger_delay;
        if self.trigger_time < self.trigger_delay {
            self.trigger_time += 1;
        }

        if self.lifetime < self.max_lifetime || self.max_lifetime == 0 {
            self.lifetime += 1;
        } else if self.variant.deploys_on_expiry() {
            self.deploy_payload(body, events);
        } else {
            body.destroyed = true;
        }
    }

    /// Release the payload (if any) at the current position and spend the shot
    pub fn deploy_payload(&self, body: &mut Body, events: &mut FrameEvents) {
        if let Some(payload) = self.variant.payload() {
            events.spawn(spawn_bomb(body.pos, self.motion.angle, payload));
        }
        body.destroyed = true;
    }

    pub fn set_heading(&mut self, heading: f32) {
        self.motion.set_heading(heading);
    }
}

impl Movable for Projectile {
    fn motion(&self) -> &Motion {
        &self.motion
    }
}

/// A fresh shot heading `heading` degrees
pub fn spawn(variant: ProjectileVariant, pos: Vec2, heading: f32) -> Entity {
    let profile = variant.profile();
    let mut motion = Motion {
        max_speed: profile.max_speed,
        air_friction: 1.0,
        edge: EdgePolicy::Bounce,
        ..Default::default()
    };
    motion.vel = heading_to_velocity(heading, profile.max_speed);

    let mut body = Body::new(pos, variant.half_extents(), vec![variant.shape()]);
    body.collidable = profile.trigger_delay == 0;

    Entity {
        body,
        kind: EntityKind::Projectile(Projectile {
            variant,
            motion,
            strength: 1,
            lifetime: 0,
            max_lifetime: profile.max_lifetime,
            prime_delay: profile.prime_delay,
            trigger_delay: profile.trigger_delay,
            trigger_time: 0,
            color: variant.color(),
            orbit_target: None,
        }),
    }
}

/// One-shot emitter: fans out its payload on its first update, then disappears
#[derive(Debug, Clone)]
pub struct Bomb {
    pub motion: Motion,
    /// Heading of the shot that released it (degrees)
    pub heading: f32,
    pub payload: Payload,
}

impl Bomb {
    pub fn update(&mut self, body: &mut Body, viewport: Viewport, events: &mut FrameEvents) {
        body.advance(&mut self.motion, viewport);
        let count = self.payload.count.max(1);
        let step = 360.0 / count as f32;
        for i in 0..count {
            let heading = self.heading + self.payload.offset + i as f32 * step;
            events.spawn(spawn(self.payload.shot, body.pos, heading));
        }
        body.destroyed = true;
    }
}

impl Movable for Bomb {
    fn motion(&self) -> &Motion {
        &self.motion
    }
}

pub fn spawn_bomb(pos: Vec2, heading: f32, payload: Payload) -> Entity {
    let mut body = Body::new(pos, Vec2::splat(20.0), Vec::new());
    body.collidable = false;
    Entity {
        body,
        kind: EntityKind::Bomb(Bomb {
            motion: Motion::default(),
            heading,
            payload,
        }),
    }
}

/// Change to an orbiting shot's binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrbitChange {
    #[default]
    Keep,
    Bind(EntityId),
    /// Target destroyed or gone; lifetime restarts
    Release,
}

/// Result of a steering decision
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    pub heading: Option<f32>,
    /// Hazard to highlight as targeted
    pub mark: Option<EntityId>,
    pub orbit: OrbitChange,
}

/// Nearest live hazard whose center is inside the viewport; first found wins ties
fn nearest_hazard(arena: &EntityArena, from: Vec2, viewport: Viewport) -> Option<(EntityId, Vec2)> {
    let mut best: Option<(EntityId, Vec2, f32)> = None;
    for (id, entity) in arena.iter() {
        if !entity.is_hazard() || entity.body.destroyed || !viewport.contains(entity.body.pos) {
            continue;
        }
        let d = from.distance(entity.body.pos);
        if best.is_none_or(|(_, _, shortest)| d < shortest) {
            best = Some((id, entity.body.pos, d));
        }
    }
    best.map(|(id, pos, _)| (id, pos))
}

/// Heading offset around the player by distance band
fn player_orbit_offset(d: f32) -> f32 {
    if d > 300.0 {
        90.0
    } else if d > 200.0 {
        5.0
    } else if d > 150.0 {
        -90.0
    } else if d > 100.0 {
        90.0
    } else if d > 50.0 {
        -175.0
    } else {
        -90.0
    }
}

/// Decide how projectile `id` steers this frame
///
/// `reference` is the player position, or the viewport center without a player.
pub fn plan_steering(
    arena: &EntityArena,
    id: EntityId,
    reference: Vec2,
    viewport: Viewport,
) -> Steering {
    let Some(entity) = arena.get(id) else {
        return Steering::default();
    };
    let EntityKind::Projectile(shot) = &entity.kind else {
        return Steering::default();
    };
    if !shot.is_primed() {
        return Steering::default();
    }
    let pos = entity.body.pos;

    match shot.variant {
        ProjectileVariant::Seeking => match nearest_hazard(arena, pos, viewport) {
            Some((target, target_pos)) => Steering {
                heading: Some(-bearing_degrees(pos, target_pos) + 90.0),
                mark: Some(target),
                ..Default::default()
            },
            None => {
                let bearing = bearing_degrees(pos, reference);
                let heading = if pos.distance(reference) > SEEK_RETURN_DISTANCE {
                    -bearing + 90.0
                } else {
                    -bearing - 185.0
                };
                Steering {
                    heading: Some(heading),
                    ..Default::default()
                }
            }
        },
        ProjectileVariant::Orbiting => match shot.orbit_target {
            Some(target_id) => match arena.get(target_id) {
                Some(target) => {
                    let radius = target.kind.as_hazard().map_or(0.0, |h| h.radius());
                    let surface = pos.distance(target.body.pos) - radius;
                    let bearing = bearing_degrees(pos, target.body.pos);
                    let heading = if surface > ORBIT_APPROACH_DISTANCE {
                        -bearing + 90.0
                    } else {
                        -bearing - 180.0
                    };
                    Steering {
                        heading: Some(heading),
                        orbit: if target.body.destroyed {
                            OrbitChange::Release
                        } else {
                            OrbitChange::Keep
                        },
                        ..Default::default()
                    }
                }
                None => Steering {
                    orbit: OrbitChange::Release,
                    ..Default::default()
                },
            },
            None => Steering {
                orbit: nearest_hazard(arena, pos, viewport)
                    .map_or(OrbitChange::Keep, |(target, _)| OrbitChange::Bind(target)),
                ..Default::default()
            },
        },
        ProjectileVariant::PlayerOrbiting => {
            let offset = player_orbit_offset(pos.distance(reference));
            Steering {
                heading: Some(-bearing_degrees(pos, reference) + offset),
                ..Default::default()
            }
        }
        _ => Steering::default(),
    }
}

/// Write a steering decision back to projectile `id` and any marked hazard
pub fn apply_steering(arena: &mut EntityArena, id: EntityId, steering: Steering) {
    if let Some(Entity {
        body,
        kind: EntityKind::Hazard(hazard),
    }) = steering.mark.and_then(|target| arena.get_mut(target))
    {
        hazard.mark(body);
    }

    let Some(Entity {
        kind: EntityKind::Projectile(shot),
        ..
    }) = arena.get_mut(id)
    else {
        return;
    };
    if let Some(heading) = steering.heading {
        shot.set_heading(heading);
    }
    match steering.orbit {
        OrbitChange::Keep => {}
        OrbitChange::Bind(target) => shot.orbit_target = Some(target),
        OrbitChange::Release => {
            shot.orbit_target = None;
            shot.lifetime = 0;
        }
    }
}
