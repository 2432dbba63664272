//! Shared motion model for every moving entity
//!
//! Per-tick integration order:
//! 1. Snapshot previous velocity
//! 2. Snap near-zero velocity components to zero
//! 3. Spin owned paths
//! 4. Edge-of-world policy against the *predicted* position
//! 5. Air friction
//! 6. Commit position

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::path::Path;
use crate::consts::{AIR_FRICTION, MIN_SPEED};
use crate::platform::Viewport;

/// What happens when an entity reaches the viewport edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Reflect the offending velocity axis
    Bounce,
    /// Reappear on the opposite edge once fully off-screen
    #[default]
    Teleport,
    /// Flag for destruction once fully off-screen
    Destroy,
}

/// Outcome of an edge check during integration
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEvent {
    None,
    Bounced,
    Wrapped,
    /// Left the world under [`EdgePolicy::Destroy`]
    Exited,
}

/// Velocity state of a moving body
#[derive(Debug, Clone, PartialEq)]
pub struct Motion {
    /// Pixels per tick
    pub vel: Vec2,
    /// Velocity at the start of the previous integration
    pub prev_vel: Vec2,
    pub max_speed: f32,
    pub min_speed: f32,
    /// Per-tick acceleration applied by movement intent
    pub accel: f32,
    /// Last derived facing angle (degrees)
    pub angle: f32,
    pub air_friction: f32,
    pub edge: EdgePolicy,
    /// Degrees per tick applied to every owned path
    pub spin: Option<f32>,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            vel: Vec2::ZERO,
            prev_vel: Vec2::ZERO,
            max_speed: 1.0,
            min_speed: MIN_SPEED,
            accel: 1.0,
            angle: 0.0,
            air_friction: AIR_FRICTION,
            edge: EdgePolicy::Teleport,
            spin: None,
        }
    }
}

/// Sign as the quotient `v / |v|`: `None` for zero
fn direction(v: f32) -> Option<f32> {
    if v == 0.0 { None } else { Some(v.signum()) }
}

/// Pin one axis to the speed cap in the direction of the attempted change
fn accelerate_axis(v: f32, delta: f32, max: f32) -> f32 {
    let next = v + delta;
    if next.abs() > max {
        match direction(delta) {
            Some(sign) => max * sign,
            None => v,
        }
    } else {
        next
    }
}

impl Motion {
    /// Add `delta` to velocity, pinning each axis to `±max_speed` when it would overshoot
    pub fn accelerate(&mut self, delta: Vec2) {
        self.vel.x = accelerate_axis(self.vel.x, delta.x, self.max_speed);
        self.vel.y = accelerate_axis(self.vel.y, delta.y, self.max_speed);
    }

    /// Point velocity along `heading` degrees at full `max_speed`
    pub fn set_heading(&mut self, heading: f32) {
        self.vel = crate::heading_to_velocity(heading, self.max_speed);
    }

    /// Derive the facing angle (degrees) from velocity
    ///
    /// The previous angle is kept when either axis is at rest, unless an axis
    /// just started moving or reversed. Otherwise `atan(vx / vy)`, minus 180
    /// when moving up. With `vy == 0` and `vx != 0` the formula is singular;
    /// the result is its limit, ±90 by the sign of `vx`.
    pub fn facing_angle(&mut self) -> f32 {
        let (vx, vy) = (self.vel.x, self.vel.y);
        let (px, py) = (self.prev_vel.x, self.prev_vel.y);

        let x_start = px == 0.0 && vx != 0.0;
        let y_start = py == 0.0 && vy != 0.0;
        let reversed = |p: f32, v: f32| match (direction(p), direction(v)) {
            (Some(a), Some(b)) => a == -b,
            _ => false,
        };
        let x_reverse = reversed(px, vx);
        let y_reverse = reversed(py, vy);

        if (vx == 0.0 || vy == 0.0) && !(x_start || y_start || x_reverse || y_reverse) {
            return self.angle;
        }

        let angle = if vy == 0.0 {
            if vx == 0.0 { self.angle } else { 90.0 * vx.signum() }
        } else {
            let base = (vx / vy).atan().to_degrees();
            if vy < 0.0 { base - 180.0 } else { base }
        };
        self.angle = angle;
        angle
    }

    /// Random drift within `±sqrt(max_speed / 2)` per axis and spin in [-1, 1)
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        let limit = (self.max_speed / 2.0).max(0.0).sqrt();
        self.vel = Vec2::new(
            (2.0 * rng.random::<f32>() - 1.0) * limit,
            (2.0 * rng.random::<f32>() - 1.0) * limit,
        );
        self.spin = Some(2.0 * rng.random::<f32>() - 1.0);
    }

    pub fn is_stationary(&self) -> bool {
        self.vel == Vec2::ZERO
    }
}

/// Capability: an entity driven by a [`Motion`]
pub trait Movable {
    fn motion(&self) -> &Motion;
}

/// Advance one tick of motion
pub fn integrate(
    pos: &mut Vec2,
    half_extents: Vec2,
    motion: &mut Motion,
    paths: &mut [Path],
    viewport: Viewport,
) -> EdgeEvent {
    motion.prev_vel = motion.vel;

    if motion.vel.x.abs() < motion.min_speed {
        motion.vel.x = 0.0;
    }
    if motion.vel.y.abs() < motion.min_speed {
        motion.vel.y = 0.0;
    }

    if let Some(spin) = motion.spin.filter(|s| *s != 0.0) {
        for path in paths.iter_mut() {
            path.rotate(spin);
        }
    }

    let predicted = *pos + motion.vel;
    let (w, h) = (half_extents.x, half_extents.y);
    let (width, height) = (viewport.width, viewport.height);
    let mut event = EdgeEvent::None;
    let (mut wrapped_x, mut wrapped_y) = (false, false);

    match motion.edge {
        EdgePolicy::Bounce => {
            if (predicted.x - w < 0.0 && motion.vel.x < 0.0)
                || (predicted.x + w > width && motion.vel.x > 0.0)
            {
                motion.vel.x = -motion.vel.x;
                event = EdgeEvent::Bounced;
            }
            if (predicted.y - h < 0.0 && motion.vel.y < 0.0)
                || (predicted.y + h > height && motion.vel.y > 0.0)
            {
                motion.vel.y = -motion.vel.y;
                event = EdgeEvent::Bounced;
            }
        }
        EdgePolicy::Teleport => {
            if predicted.x + w < 0.0 && motion.vel.x < 0.0 {
                pos.x = width + w;
                wrapped_x = true;
            } else if predicted.x - w > width && motion.vel.x > 0.0 {
                pos.x = -w;
                wrapped_x = true;
            }
            if predicted.y + h < 0.0 && motion.vel.y < 0.0 {
                pos.y = height + h;
                wrapped_y = true;
            } else if predicted.y - h > height && motion.vel.y > 0.0 {
                pos.y = -h;
                wrapped_y = true;
            }
            if wrapped_x || wrapped_y {
                event = EdgeEvent::Wrapped;
            }
        }
        EdgePolicy::Destroy => {
            let gone = (predicted.x + w < 0.0 && motion.vel.x < 0.0)
                || (predicted.x - w > width && motion.vel.x > 0.0)
                || (predicted.y + h < 0.0 && motion.vel.y < 0.0)
                || (predicted.y - h > height && motion.vel.y > 0.0);
            if gone {
                event = EdgeEvent::Exited;
            }
        }
    }

    motion.vel *= motion.air_friction;

    // A wrapped axis has already been placed for this tick
    if !wrapped_x {
        pos.x += motion.vel.x;
    }
    if !wrapped_y {
        pos.y += motion.vel.y;
    }

    event
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_friction_decays_then_snaps_to_zero() {
        let mut motion = Motion {
            vel: Vec2::new(3.0, -2.0),
            max_speed: 10.0,
            air_friction: 0.9,
            edge: EdgePolicy::Bounce,
            ..Default::default()
        };
        let mut pos = Vec2::new(400.0, 300.0);
        let mut last = motion.vel.length();
        let mut ticks = 0;
        while !motion.is_stationary() {
            let _ = integrate(&mut pos, Vec2::splat(5.0), &mut motion, &mut [], viewport());
            let speed = motion.vel.length();
            assert!(speed <= last);
            last = speed;
            ticks += 1;
            assert!(ticks < 1000, "velocity never reached zero");
        }
        assert_eq!(motion.vel, Vec2::ZERO);
    }

    #[test]
    fn test_min_speed_snap_is_exact() {
        let mut motion = Motion {
            vel: Vec2::new(0.005, 2.0),
            max_speed: 10.0,
            air_friction: 1.0,
            ..Default::default()
        };
        let mut pos = Vec2::new(100.0, 100.0);
        let _ = integrate(&mut pos, Vec2::ZERO, &mut motion, &mut [], viewport());
        assert_eq!(motion.vel.x, 0.0);
        assert_eq!(pos, Vec2::new(100.0, 102.0));
    }

    #[test]
    fn test_teleport_right_edge_lands_at_negative_width() {
        let mut motion = Motion {
            vel: Vec2::new(5.0, 0.0),
            max_speed: 10.0,
            edge: EdgePolicy::Teleport,
            ..Default::default()
        };
        let half = Vec2::new(20.0, 10.0);
        let mut pos = Vec2::new(820.0, 300.0);
        let event = integrate(&mut pos, half, &mut motion, &mut [], viewport());
        assert_eq!(event, EdgeEvent::Wrapped);
        assert_eq!(pos.x, -20.0);
        assert_eq!(pos.y, 300.0);
    }

    #[test]
    fn test_teleport_top_edge_lands_below() {
        let mut motion = Motion {
            vel: Vec2::new(0.0, -4.0),
            max_speed: 10.0,
            air_friction: 1.0,
            ..Default::default()
        };
        let half = Vec2::new(20.0, 10.0);
        let mut pos = Vec2::new(50.0, -8.0);
        assert_eq!(
            integrate(&mut pos, half, &mut motion, &mut [], viewport()),
            EdgeEvent::Wrapped
        );
        assert_eq!(pos.y, 610.0);
    }

    #[test]
    fn test_bounce_left_edge_flips_velocity() {
        let mut motion = Motion {
            vel: Vec2::new(-6.0, 1.0),
            max_speed: 10.0,
            air_friction: 1.0,
            edge: EdgePolicy::Bounce,
            ..Default::default()
        };
        let mut pos = Vec2::new(8.0, 300.0);
        let event = integrate(&mut pos, Vec2::splat(5.0), &mut motion, &mut [], viewport());
        assert_eq!(event, EdgeEvent::Bounced);
        assert!(motion.vel.x > 0.0);
        assert_eq!(pos.x, 14.0);
    }

    #[test]
    fn test_bounce_ignores_inbound_motion() {
        // Already outside but moving back in: no flip
        let mut motion = Motion {
            vel: Vec2::new(3.0, 0.0),
            max_speed: 10.0,
            air_friction: 1.0,
            edge: EdgePolicy::Bounce,
            ..Default::default()
        };
        let mut pos = Vec2::new(-50.0, 300.0);
        let _ = integrate(&mut pos, Vec2::splat(10.0), &mut motion, &mut [], viewport());
        assert_eq!(motion.vel.x, 3.0);
    }

    #[test]
    fn test_destroy_policy_reports_exit() {
        let mut motion = Motion {
            vel: Vec2::new(0.0, 5.0),
            max_speed: 10.0,
            edge: EdgePolicy::Destroy,
            ..Default::default()
        };
        let mut pos = Vec2::new(100.0, 590.0);
        assert_eq!(
            integrate(&mut pos, Vec2::splat(2.0), &mut motion, &mut [], viewport()),
            EdgeEvent::None
        );
        let mut pos = Vec2::new(100.0, 610.0);
        assert_eq!(
            integrate(&mut pos, Vec2::splat(2.0), &mut motion, &mut [], viewport()),
            EdgeEvent::Exited
        );
    }

    #[test]
    fn test_spin_rotates_paths() {
        let mut motion = Motion {
            spin: Some(15.0),
            ..Default::default()
        };
        let mut paths = vec![Path::triangle(5.0), Path::rectangle(2.0, 2.0)];
        let mut pos = Vec2::new(10.0, 10.0);
        let _ = integrate(&mut pos, Vec2::ZERO, &mut motion, &mut paths, viewport());
        let _ = integrate(&mut pos, Vec2::ZERO, &mut motion, &mut paths, viewport());
        assert!(paths.iter().all(|p| (p.rotation() - 30.0).abs() < 1e-4));
    }

    #[test]
    fn test_accelerate_pins_to_max_speed() {
        let mut motion = Motion {
            vel: Vec2::new(14.5, -14.5),
            max_speed: 15.0,
            ..Default::default()
        };
        motion.accelerate(Vec2::new(1.0, -1.0));
        assert_eq!(motion.vel, Vec2::new(15.0, -15.0));

        // Accelerating against a pinned axis just adds
        motion.accelerate(Vec2::new(-1.0, 0.0));
        assert_eq!(motion.vel.x, 14.0);

        // Overshoot from a reversing push pins in the push direction
        let mut motion = Motion {
            vel: Vec2::new(0.5, 0.0),
            max_speed: 1.0,
            ..Default::default()
        };
        motion.accelerate(Vec2::new(-3.0, 0.0));
        assert_eq!(motion.vel.x, -1.0);
    }

    #[test]
    fn test_accelerate_zero_delta_leaves_axis() {
        let mut motion = Motion {
            vel: Vec2::new(20.0, 0.0),
            max_speed: 15.0,
            ..Default::default()
        };
        motion.accelerate(Vec2::new(0.0, 1.0));
        assert_eq!(motion.vel, Vec2::new(20.0, 1.0));
    }

    #[test]
    fn test_facing_angle_retained_while_stationary() {
        let mut motion = Motion {
            angle: 42.0,
            ..Default::default()
        };
        assert_eq!(motion.facing_angle(), 42.0);
    }

    #[test]
    fn test_facing_angle_formula() {
        let mut motion = Motion {
            vel: Vec2::new(1.0, 1.0),
            prev_vel: Vec2::new(1.0, 1.0),
            ..Default::default()
        };
        assert!((motion.facing_angle() - 45.0).abs() < 1e-4);

        motion.vel = Vec2::new(1.0, -1.0);
        motion.prev_vel = Vec2::new(1.0, -1.0);
        assert!((motion.facing_angle() - (-45.0 - 180.0)).abs() < 1e-4);
    }

    #[test]
    fn test_facing_angle_singular_axis() {
        // Starting to move purely along +x from rest
        let mut motion = Motion {
            vel: Vec2::new(3.0, 0.0),
            ..Default::default()
        };
        assert_eq!(motion.facing_angle(), 90.0);

        // Still moving along +x: keep the angle
        motion.prev_vel = motion.vel;
        motion.angle = 12.0;
        assert_eq!(motion.facing_angle(), 12.0);

        // Reversing along x re-derives it
        motion.prev_vel = Vec2::new(3.0, 0.0);
        motion.vel = Vec2::new(-3.0, 0.0);
        assert_eq!(motion.facing_angle(), -90.0);
        assert!(motion.facing_angle().is_finite());
    }

    #[test]
    fn test_randomize_within_limits() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut motion = Motion {
            max_speed: 30.0,
            ..Default::default()
        };
        for _ in 0..100 {
            motion.randomize(&mut rng);
            let limit = (15.0f32).sqrt();
            assert!(motion.vel.x.abs() <= limit && motion.vel.y.abs() <= limit);
            let spin = motion.spin.unwrap_or(f32::NAN);
            assert!((-1.0..1.0).contains(&spin));
        }
    }

    #[test]
    fn test_set_heading_uses_max_speed() {
        let mut motion = Motion {
            max_speed: 10.0,
            ..Default::default()
        };
        motion.set_heading(90.0);
        assert!((motion.vel.x - 10.0).abs() < 1e-4);
        assert!(motion.vel.y.abs() < 1e-4);
    }
}
