//! Drifting hazards ("asteroids")

use glam::Vec2;
use rand::Rng;

use super::entity::{Body, DamageOutcome, Damageable, Entity, EntityKind};
use super::kinematics::{EdgePolicy, Motion, Movable};
use super::path::Path;
use crate::platform::Viewport;
use crate::renderer::palette;

const MAX_SPEED: f32 = 30.0;

#[derive(Debug, Clone)]
pub struct Hazard {
    pub motion: Motion,
    /// Current size; radius is `size * size_multiplier`
    pub size: u32,
    /// Size at spawn, awarded as score on destruction
    pub initial_size: u32,
    pub size_multiplier: f32,
    /// Targeted by a seeking shot since the last update
    pub marked: bool,
}

impl Hazard {
    pub fn radius(&self) -> f32 {
        self.size as f32 * self.size_multiplier
    }

    /// Shrink by `amount`; `Fatal` means the hazard is used up and leaves its size as is
    pub fn reduce_size(&mut self, amount: u32) -> DamageOutcome {
        if amount >= self.size {
            DamageOutcome::Fatal
        } else {
            self.size -= amount;
            DamageOutcome::Applied
        }
    }

    /// Highlight as a seeking target until the next update
    pub fn mark(&mut self, body: &mut Body) {
        self.marked = true;
        if let Some(outline) = body.paths.first_mut() {
            outline.fill = Some(palette::HAZARD_TARGETED);
        }
    }

    pub fn update(&mut self, body: &mut Body, viewport: Viewport) {
        body.advance(&mut self.motion, viewport);
        self.marked = false;
        self.sync_outline(body);
    }

    fn sync_outline(&self, body: &mut Body) {
        body.half_extents = Vec2::splat(self.size as f32);
        let radius = self.radius();
        if let Some(outline) = body.paths.first_mut() {
            outline.fill = None;
            outline.set_scale(radius);
        }
    }
}

impl Movable for Hazard {
    fn motion(&self) -> &Motion {
        &self.motion
    }
}

impl Damageable for Hazard {
    fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        self.reduce_size(amount)
    }
}

/// A stationary hazard at `pos`
pub fn spawn(pos: Vec2, size: u32, size_multiplier: f32) -> Entity {
    let size = if size == 0 {
        log::warn!("Hazard size 0 raised to 1");
        1
    } else {
        size
    };
    let hazard = Hazard {
        motion: Motion {
            max_speed: MAX_SPEED,
            air_friction: 1.0,
            edge: EdgePolicy::Bounce,
            ..Default::default()
        },
        size,
        initial_size: size,
        size_multiplier,
        marked: false,
    };
    let outline = Path::regular_polygon(1.0, 5).with_stroke(palette::HAZARD_STROKE);
    let mut body = Body::new(pos, Vec2::splat(size as f32), vec![outline]);
    hazard.sync_outline(&mut body);
    Entity {
        body,
        kind: EntityKind::Hazard(hazard),
    }
}

/// A hazard with random drift and spin
pub fn spawn_drifting<R: Rng>(pos: Vec2, size: u32, size_multiplier: f32, rng: &mut R) -> Entity {
    let mut entity = spawn(pos, size, size_multiplier);
    if let EntityKind::Hazard(hazard) = &mut entity.kind {
        hazard.motion.randomize(rng);
    }
    entity
}

/// A point `offset` outside a random viewport edge
///
/// Sides: 0 top, 1 left, 2 bottom, 3 right. The coordinate along the side is uniform.
pub fn edge_spawn_position<R: Rng>(viewport: Viewport, offset: f32, rng: &mut R) -> Vec2 {
    let side = rng.random_range(0..4u8);
    let along_x = rng.random::<f32>() * viewport.width;
    let along_y = rng.random::<f32>() * viewport.height;
    match side {
        0 => Vec2::new(along_x, -offset),
        1 => Vec2::new(-offset, along_y),
        2 => Vec2::new(along_x, viewport.height + offset),
        _ => Vec2::new(viewport.width + offset, along_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn hazard_of(entity: &Entity) -> &Hazard {
        entity.kind.as_hazard().expect("hazard")
    }

    #[test]
    fn test_spawn_defaults() {
        let rock = spawn(Vec2::new(10.0, 20.0), 3, 10.0);
        let h = hazard_of(&rock);
        assert_eq!(h.radius(), 30.0);
        assert_eq!(h.initial_size, 3);
        assert_eq!(h.motion.edge, EdgePolicy::Bounce);
        assert_eq!(h.motion.air_friction, 1.0);
        assert_eq!(h.motion.max_speed, 30.0);
        assert!(h.motion.is_stationary());
        assert_eq!(rock.body.half_extents, Vec2::splat(3.0));
        assert_eq!(rock.body.paths[0].scale(), 30.0);
        assert_eq!(rock.body.paths[0].steps().len(), 5);
    }

    #[test]
    fn test_spawn_clamps_zero_size() {
        let rock = spawn(Vec2::ZERO, 0, 10.0);
        assert_eq!(hazard_of(&rock).size, 1);
    }

    #[test]
    fn test_reduce_size() {
        let mut rock = spawn(Vec2::ZERO, 5, 10.0);
        let EntityKind::Hazard(h) = &mut rock.kind else {
            unreachable!()
        };
        assert_eq!(h.reduce_size(2), DamageOutcome::Applied);
        assert_eq!(h.size, 3);
        assert_eq!(h.take_damage(3), DamageOutcome::Fatal);
        assert_eq!(h.size, 3);
        assert_eq!(h.initial_size, 5);
    }

    #[test]
    fn test_update_rescales_and_clears_mark() {
        let vp = Viewport::new(800.0, 600.0);
        let mut rock = spawn(Vec2::new(400.0, 300.0), 4, 10.0);
        let Entity { body, kind } = &mut rock;
        let EntityKind::Hazard(h) = kind else {
            unreachable!()
        };
        h.mark(body);
        assert_eq!(body.paths[0].fill, Some(palette::HAZARD_TARGETED));

        h.size = 2;
        h.update(body, vp);
        assert!(!h.marked);
        assert_eq!(body.paths[0].fill, None);
        assert_eq!(body.paths[0].scale(), 20.0);
        assert_eq!(body.half_extents, Vec2::splat(2.0));
    }

    #[test]
    fn test_drifting_hazard_moves() {
        let mut rng = Pcg32::seed_from_u64(3);
        let rock = spawn_drifting(Vec2::ZERO, 2, 10.0, &mut rng);
        let h = hazard_of(&rock);
        assert!(h.motion.spin.is_some());
        let limit = 15.0f32.sqrt();
        assert!(h.motion.vel.x.abs() <= limit && h.motion.vel.y.abs() <= limit);
    }

    #[test]
    fn test_edge_spawn_position_is_outside() {
        let vp = Viewport::new(640.0, 480.0);
        let mut rng = Pcg32::seed_from_u64(11);
        let mut sides = [false; 4];
        for _ in 0..200 {
            let p = edge_spawn_position(vp, 50.0, &mut rng);
            let side = if p.y == -50.0 {
                0
            } else if p.x == -50.0 {
                1
            } else if p.y == 530.0 {
                2
            } else if p.x == 690.0 {
                3
            } else {
                panic!("position {p:?} not on an edge");
            };
            sides[side] = true;
            assert!(!vp.contains(p));
        }
        assert!(sides.iter().all(|s| *s));
    }
}
