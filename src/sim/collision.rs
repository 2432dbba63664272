//! Collision detection and response
//!
//! Hazards are circles of radius `size * size_multiplier`. Everything else is
//! tested by its path vertices against a hazard's circle. Hazard pairs are
//! circle-circle and exchange momentum along the contact normal.

use glam::Vec2;

use super::entity::{DamageOutcome, Damageable, Entity, EntityKind, FrameEvents};
use super::hazard::Hazard;
use super::projectile::ProjectileVariant;

/// Which argument of a pair plays a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// A detected overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// A hazard's circle contains a vertex of the other entity
    Vertex {
        /// Which side is the hazard
        hazard: Side,
        /// World-space vertex that hit
        point: Vec2,
        /// Unit vector from the hazard center toward the vertex
        normal: Vec2,
        /// Distance from the hazard center to the vertex
        distance: f32,
    },
    /// Two hazard circles overlap
    Circles {
        /// Unit vector from the first center toward the second
        normal: Vec2,
        /// Overlap depth along the normal
        penetration: f32,
    },
}

/// Unit vector along `d` by its angle; +x when `d` is zero
fn normal_from(d: Vec2) -> Vec2 {
    let (sin, cos) = d.y.atan2(d.x).sin_cos();
    Vec2::new(cos, sin)
}

/// First vertex of `other` strictly inside the circle, in path and step order
pub fn circle_vertex_hit(center: Vec2, radius: f32, other: &Entity) -> Option<(Vec2, f32)> {
    other
        .body
        .world_vertices()
        .map(|v| (v, center.distance(v)))
        .find(|(_, d)| *d < radius)
}

/// Circle-circle overlap: `(distance, penetration)` when strictly overlapping
pub fn circle_circle_hit(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> Option<(f32, f32)> {
    let d = c1.distance(c2);
    (d < r1 + r2).then_some((d, r1 + r2 - d))
}

/// Test a pair without mutating anything
///
/// Returns `None` when either side is destroyed or not collidable, when
/// neither is a hazard, or when they do not overlap.
pub fn detect(a: &Entity, b: &Entity) -> Option<Contact> {
    let active = |e: &Entity| e.body.collidable && !e.body.destroyed;
    if !active(a) || !active(b) {
        return None;
    }

    match (a.kind.as_hazard(), b.kind.as_hazard()) {
        (Some(h1), Some(h2)) => {
            let (_, penetration) =
                circle_circle_hit(a.body.pos, h1.radius(), b.body.pos, h2.radius())?;
            Some(Contact::Circles {
                normal: normal_from(b.body.pos - a.body.pos),
                penetration,
            })
        }
        (Some(h), None) => vertex_contact(a, h, b, Side::First),
        (None, Some(h)) => vertex_contact(b, h, a, Side::Second),
        (None, None) => None,
    }
}

fn vertex_contact(hazard: &Entity, h: &Hazard, other: &Entity, side: Side) -> Option<Contact> {
    let center = hazard.body.pos;
    let (point, distance) = circle_vertex_hit(center, h.radius(), other)?;
    Some(Contact::Vertex {
        hazard: side,
        point,
        normal: normal_from(point - center),
        distance,
    })
}

/// Swap the velocity components along `normal` (equal masses, restitution 1)
pub fn exchange_normal_velocity(v1: Vec2, v2: Vec2, normal: Vec2) -> (Vec2, Vec2) {
    let n1 = v1.dot(normal);
    let n2 = v2.dot(normal);
    (v1 + (n2 - n1) * normal, v2 + (n1 - n2) * normal)
}

/// Apply the consequences of a contact found by [`detect`] on `(a, b)`
///
/// For hazard pairs `b` is the later entity and is the one moved apart.
pub fn resolve(a: &mut Entity, b: &mut Entity, contact: Contact, events: &mut FrameEvents) {
    a.body.colliding = true;
    b.body.colliding = true;

    match contact {
        Contact::Vertex {
            hazard: side,
            normal,
            distance,
            ..
        } => {
            let (hazard_entity, other) = match side {
                Side::First => (a, b),
                Side::Second => (b, a),
            };
            hazard_hit(hazard_entity, other, normal, distance, events);
        }
        Contact::Circles {
            normal,
            penetration,
        } => {
            b.body.pos += normal * penetration;
            if let (EntityKind::Hazard(h1), EntityKind::Hazard(h2)) = (&mut a.kind, &mut b.kind) {
                let (v1, v2) = exchange_normal_velocity(h1.motion.vel, h2.motion.vel, normal);
                h1.motion.vel = v1;
                h2.motion.vel = v2;
            }
        }
    }
}

fn hazard_hit(
    hazard_entity: &mut Entity,
    other: &mut Entity,
    normal: Vec2,
    distance: f32,
    events: &mut FrameEvents,
) {
    let EntityKind::Hazard(hazard) = &mut hazard_entity.kind else {
        return;
    };

    match &mut other.kind {
        EntityKind::Projectile(shot) => {
            shot.deploy_payload(&mut other.body, events);

            if hazard.take_damage(shot.strength) == DamageOutcome::Fatal {
                hazard_entity.body.destroyed = true;
                events.score += u64::from(hazard.initial_size);
                log::debug!("Hazard destroyed, +{}", hazard.initial_size);
            }

            if shot.variant == ProjectileVariant::Bouncing {
                other.body.destroyed = false;
                let extent = other.body.half_extents.max_element();
                let push = hazard.radius() + extent - distance;
                other.body.pos += normal * push;
                let normal_deg = normal.y.atan2(normal.x).to_degrees();
                shot.set_heading(-normal_deg + 90.0);
            }
        }
        EntityKind::Player(player) => {
            if player.take_damage(hazard.size) == DamageOutcome::Fatal {
                events.game_over = true;
            }
        }
        EntityKind::Hazard(_) | EntityKind::Bomb(_) | EntityKind::StatusBar(_) => {}
    }
}
