//! The player ship: movement intent, health, shield and weapons

use glam::Vec2;

use super::entity::{Body, DamageOutcome, Damageable, Entity, EntityKind, FrameEvents};
use super::kinematics::{EdgePolicy, Motion, Movable};
use super::path::Path;
use super::projectile::{self, ProjectileVariant};
use super::status_bar::GaugeReadings;
use super::tick::TickInput;
use crate::consts::{HIT_FLASH_TICKS, PLAYER_HALF_HEIGHT, PLAYER_HALF_WIDTH, SHIELD_BLINK_TICKS};
use crate::platform::Viewport;
use crate::renderer::{Rgba, palette};
use crate::settings::PlayerTuning;

/// Upper bound on a single burst ring
const MAX_RING_SHOTS: u32 = 360;

/// Hull colors while invulnerable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShieldPalette {
    #[default]
    Normal,
    /// Just hit
    Hit,
    Shielded,
    ShieldedFaded,
}

impl ShieldPalette {
    /// Palette for the remaining invulnerability `counter` out of `i_frames`
    pub fn for_counter(counter: u32, i_frames: u32) -> Self {
        if counter == 0 {
            ShieldPalette::Normal
        } else if counter > i_frames.saturating_sub(HIT_FLASH_TICKS) {
            ShieldPalette::Hit
        } else if counter % (2 * SHIELD_BLINK_TICKS) < SHIELD_BLINK_TICKS {
            ShieldPalette::Shielded
        } else {
            ShieldPalette::ShieldedFaded
        }
    }

    /// (fill, stroke)
    pub fn colors(&self) -> (Rgba, Rgba) {
        match self {
            ShieldPalette::Normal | ShieldPalette::Shielded => {
                (palette::PLAYER_FILL, palette::PLAYER_STROKE)
            }
            ShieldPalette::Hit => (palette::HIT_FILL, palette::HIT_STROKE),
            ShieldPalette::ShieldedFaded => {
                (palette::SHIELD_FADED_FILL, palette::SHIELD_FADED_STROKE)
            }
        }
    }
}

/// Cooldowns and ammo, all counted in ticks
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponState {
    pub shot_counter: u32,
    pub triple_current: f32,
    /// Ticks until triple ammo recharges again
    pub triple_delay_counter: u32,
    pub burst_counter: u32,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub motion: Motion,
    /// Held actions for this frame
    pub input: TickInput,
    pub health: u32,
    pub max_health: u32,
    pub weapons: WeaponState,
    pub i_frames_counter: u32,
    pub palette: ShieldPalette,
    pub tuning: PlayerTuning,
}

impl Player {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            motion: Motion {
                max_speed: tuning.max_speed,
                accel: tuning.accel,
                edge: EdgePolicy::Teleport,
                ..Default::default()
            },
            input: TickInput::default(),
            health: tuning.max_health,
            max_health: tuning.max_health,
            weapons: WeaponState {
                shot_counter: 0,
                triple_current: tuning.triple_ammo,
                triple_delay_counter: 0,
                burst_counter: 0,
            },
            i_frames_counter: 0,
            palette: ShieldPalette::Normal,
            tuning: tuning.clone(),
        }
    }

    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }

    pub fn is_invulnerable(&self) -> bool {
        self.i_frames_counter > 0
    }

    /// Apply damage unless shielded; lethal damage is reported, not applied
    pub fn inflict_damage(&mut self, damage: u32) -> DamageOutcome {
        if self.is_invulnerable() {
            return DamageOutcome::Rejected;
        }
        if self.health > damage {
            self.health -= damage;
            self.i_frames_counter = self.tuning.i_frames;
            log::debug!("Player took {damage} damage, health {}", self.health);
            DamageOutcome::Applied
        } else {
            log::info!("Player took lethal damage ({damage} at health {})", self.health);
            DamageOutcome::Fatal
        }
    }

    pub fn gauges(&self) -> GaugeReadings {
        let fraction = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        let cap = self.tuning.triple_ammo;
        let cooldown = self.tuning.burst_cooldown;
        GaugeReadings {
            health: fraction(self.health as f32 / self.max_health.max(1) as f32),
            triple: if cap > 0.0 {
                fraction((self.weapons.triple_current / 2.0).floor() * 2.0 / cap)
            } else {
                0.0
            },
            burst: if cooldown == 0 {
                1.0
            } else {
                fraction(
                    cooldown.saturating_sub(self.weapons.burst_counter) as f32 / cooldown as f32,
                )
            },
        }
    }

    fn launch(
        &mut self,
        variant: ProjectileVariant,
        offset: f32,
        pos: Vec2,
        events: &mut FrameEvents,
    ) {
        let heading = self.motion.facing_angle() + offset;
        events.spawn(projectile::spawn(variant, pos, heading));
    }

    fn shoot(&mut self, variant: ProjectileVariant, offset: f32, pos: Vec2, events: &mut FrameEvents) {
        self.launch(variant, offset, pos, events);
        self.weapons.shot_counter = self.tuning.shot_cooldown;
    }

    fn shoot_triple(&mut self, pos: Vec2, events: &mut FrameEvents) {
        let (variant, spread) = (self.tuning.triple_weapon, self.tuning.triple_spread);
        self.shoot(variant, spread, pos, events);
        self.shoot(variant, -spread, pos, events);
        self.weapons.triple_current -= 2.0;
        self.weapons.triple_delay_counter = self.tuning.triple_delay;
    }

    fn recharge_triple(&mut self) {
        let cap = self.tuning.triple_ammo;
        self.weapons.triple_current = (self.weapons.triple_current + self.tuning.triple_recharge).min(cap);
    }

    fn burst(&mut self, pos: Vec2, events: &mut FrameEvents) {
        let step = self.tuning.burst_step;
        if step.is_finite() && step > 0.0 {
            let count = ((360.0 / step).ceil() as u32).min(MAX_RING_SHOTS);
            let variant = self.tuning.burst_weapon;
            for i in 0..count {
                self.launch(variant, i as f32 * step, pos, events);
            }
        }
        self.weapons.burst_counter = self.tuning.burst_cooldown;
    }

    pub fn update(&mut self, body: &mut Body, viewport: Viewport, events: &mut FrameEvents) {
        let facing = self.motion.facing_angle();
        for path in &mut body.paths {
            path.set_rotation(facing);
        }

        self.palette = ShieldPalette::for_counter(self.i_frames_counter, self.tuning.i_frames);
        let (fill, stroke) = self.palette.colors();
        if let Some(hull) = body.paths.first_mut() {
            hull.fill = Some(fill);
            hull.stroke = Some(stroke);
        }

        body.advance(&mut self.motion, viewport);

        let accel = self.motion.accel;
        if self.input.left {
            self.motion.accelerate(Vec2::new(-accel, 0.0));
        }
        if self.input.up {
            self.motion.accelerate(Vec2::new(0.0, -accel));
        }
        if self.input.right {
            self.motion.accelerate(Vec2::new(accel, 0.0));
        }
        if self.input.down {
            self.motion.accelerate(Vec2::new(0.0, accel));
        }

        let pos = body.pos;
        let can_shoot = self.weapons.shot_counter == 0;
        if can_shoot && self.input.fire {
            self.shoot(self.tuning.primary_weapon, 0.0, pos, events);
        }

        if can_shoot && self.weapons.triple_current >= 2.0 && self.input.triple_fire {
            self.shoot_triple(pos, events);
        } else if self.weapons.triple_current < self.tuning.triple_ammo
            && self.weapons.triple_delay_counter == 0
        {
            self.recharge_triple();
        }

        if self.weapons.burst_counter == 0 && self.input.burst {
            self.burst(pos, events);
        }

        let w = &mut self.weapons;
        w.burst_counter = w.burst_counter.saturating_sub(1);
        w.shot_counter = w.shot_counter.saturating_sub(1);
        w.triple_delay_counter = w.triple_delay_counter.saturating_sub(1);
        self.i_frames_counter = self.i_frames_counter.saturating_sub(1);
    }
}

impl Movable for Player {
    fn motion(&self) -> &Motion {
        &self.motion
    }
}

impl Damageable for Player {
    fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        self.inflict_damage(amount)
    }
}

pub fn spawn(pos: Vec2, tuning: &PlayerTuning) -> Entity {
    let hull = Path::polygon(&[
        Vec2::new(0.0, 10.0),
        Vec2::new(10.0, -10.0),
        Vec2::new(0.0, -5.0),
        Vec2::new(-10.0, -10.0),
    ])
    .with_fill(palette::PLAYER_FILL)
    .with_stroke(palette::PLAYER_STROKE);
    Entity {
        body: Body::new(
            pos,
            Vec2::new(PLAYER_HALF_WIDTH, PLAYER_HALF_HEIGHT),
            vec![hull],
        ),
        kind: EntityKind::Player(Box::new(Player::new(tuning))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WeaponPreset;

    fn vp() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn ship(tuning: &PlayerTuning) -> Entity {
        spawn(Vec2::new(400.0, 300.0), tuning)
    }

    fn parts(entity: &mut Entity) -> (&mut Body, &mut Player) {
        match entity {
            Entity {
                body,
                kind: EntityKind::Player(p),
            } => (body, p),
            _ => panic!("not a player"),
        }
    }

    #[test]
    fn test_invulnerability_window() {
        let mut e = ship(&PlayerTuning::default());
        let (body, p) = parts(&mut e);
        let mut events = FrameEvents::default();

        assert_eq!(p.inflict_damage(5), DamageOutcome::Applied);
        assert_eq!(p.health, 95);
        assert_eq!(p.i_frames_counter, 100);

        assert_eq!(p.inflict_damage(5), DamageOutcome::Rejected);
        assert_eq!(p.health, 95);

        for _ in 0..100 {
            p.update(body, vp(), &mut events);
        }
        assert!(!p.is_invulnerable());
        assert_eq!(p.inflict_damage(5), DamageOutcome::Applied);
        assert_eq!(p.health, 90);
    }

    #[test]
    fn test_lethal_damage_is_not_applied() {
        let mut e = ship(&PlayerTuning::default());
        let (_, p) = parts(&mut e);
        p.set_health(5);
        assert_eq!(p.take_damage(5), DamageOutcome::Fatal);
        assert_eq!(p.health, 5);
        assert_eq!(p.i_frames_counter, 0);
    }

    #[test]
    fn test_set_health_clamps() {
        let mut e = ship(&PlayerTuning::default());
        let (_, p) = parts(&mut e);
        p.set_health(500);
        assert_eq!(p.health, 100);
        p.set_health(0);
        assert_eq!(p.health, 0);
    }

    #[test]
    fn test_palette_windows() {
        assert_eq!(ShieldPalette::for_counter(0, 100), ShieldPalette::Normal);
        assert_eq!(ShieldPalette::for_counter(100, 100), ShieldPalette::Hit);
        assert_eq!(ShieldPalette::for_counter(81, 100), ShieldPalette::Hit);
        assert_eq!(ShieldPalette::for_counter(80, 100), ShieldPalette::Shielded);
        assert_eq!(ShieldPalette::for_counter(70, 100), ShieldPalette::ShieldedFaded);
        assert_eq!(ShieldPalette::for_counter(61, 100), ShieldPalette::Shielded);
        assert_eq!(ShieldPalette::for_counter(59, 100), ShieldPalette::ShieldedFaded);
    }

    #[test]
    fn test_palette_applied_to_hull() {
        let mut e = ship(&PlayerTuning::default());
        let (body, p) = parts(&mut e);
        let mut events = FrameEvents::default();
        p.inflict_damage(1);
        p.update(body, vp(), &mut events);
        assert_eq!(p.palette, ShieldPalette::Hit);
        assert_eq!(body.paths[0].fill, Some(palette::HIT_FILL));

        p.i_frames_counter = 1;
        p.update(body, vp(), &mut events);
        p.update(body, vp(), &mut events);
        assert_eq!(p.palette, ShieldPalette::Normal);
        assert_eq!(body.paths[0].stroke, Some(palette::PLAYER_STROKE));
    }

    #[test]
    fn test_primary_fire_cooldown() {
        let mut e = ship(&PlayerTuning::default());
        let (body, p) = parts(&mut e);
        let mut events = FrameEvents::default();
        p.input.fire = true;
        for _ in 0..25 {
            p.update(body, vp(), &mut events);
        }
        // Fires on frames 1, 11 and 21
        assert_eq!(events.spawns.len(), 3);
    }

    #[test]
    fn test_triple_consumes_ammo_and_delays_recharge() {
        let mut e = ship(&PlayerTuning::default());
        let (body, p) = parts(&mut e);
        let mut events = FrameEvents::default();
        p.weapons.triple_current = 3.0;
        p.input.triple_fire = true;

        p.update(body, vp(), &mut events);
        assert_eq!(events.spawns.len(), 2);
        assert_eq!(p.weapons.triple_current, 1.0);
        assert_eq!(p.weapons.triple_delay_counter, 49);

        // Not enough ammo for another volley, and no recharge during the delay
        for _ in 0..49 {
            p.update(body, vp(), &mut events);
        }
        assert_eq!(events.spawns.len(), 2);
        assert_eq!(p.weapons.triple_current, 1.0);

        p.update(body, vp(), &mut events);
        assert!((p.weapons.triple_current - 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_triple_with_primary_fires_three() {
        let mut e = ship(&PlayerTuning::default());
        let (body, p) = parts(&mut e);
        let mut events = FrameEvents::default();
        p.input.fire = true;
        p.input.triple_fire = true;
        p.update(body, vp(), &mut events);
        assert_eq!(events.spawns.len(), 3);
        assert_eq!(p.weapons.triple_current, 18.0);
    }

    #[test]
    fn test_recharge_caps_at_capacity() {
        let mut e = ship(&PlayerTuning::default());
        let (body, p) = parts(&mut e);
        let mut events = FrameEvents::default();
        p.weapons.triple_current = 19.95;
        p.update(body, vp(), &mut events);
        assert_eq!(p.weapons.triple_current, 20.0);
    }

    #[test]
    fn test_burst_ring_and_cooldown() {
        let mut e = ship(&PlayerTuning::default());
        let (body, p) = parts(&mut e);
        let mut events = FrameEvents::default();
        p.input.burst = true;
        p.update(body, vp(), &mut events);
        assert_eq!(events.spawns.len(), 36);
        assert_eq!(p.weapons.burst_counter, 499);
        assert!((p.gauges().burst - 1.0 / 500.0).abs() < 1e-6);

        p.update(body, vp(), &mut events);
        assert_eq!(events.spawns.len(), 36);
    }

    #[test]
    fn test_burst_ring_is_capped() {
        let tuning = PlayerTuning {
            burst_step: 1.0e-6,
            ..Default::default()
        };
        let mut e = ship(&tuning);
        let (body, p) = parts(&mut e);
        let mut events = FrameEvents::default();
        p.input.burst = true;
        p.update(body, vp(), &mut events);
        assert_eq!(events.spawns.len(), MAX_RING_SHOTS as usize);
    }

    #[test]
    fn test_overpowered_burst_repeats() {
        let tuning = WeaponPreset::Overpowered.player_tuning();
        let mut e = ship(&tuning);
        let (body, p) = parts(&mut e);
        let mut events = FrameEvents::default();
        p.input.burst = true;
        for _ in 0..4 {
            p.update(body, vp(), &mut events);
        }
        assert_eq!(events.spawns.len(), 72);
    }

    #[test]
    fn test_intent_accelerates_after_integration() {
        let mut e = ship(&PlayerTuning::default());
        let (body, p) = parts(&mut e);
        let mut events = FrameEvents::default();
        p.input.right = true;
        p.update(body, vp(), &mut events);
        // Velocity was zero during integration, so no displacement yet
        assert_eq!(body.pos, Vec2::new(400.0, 300.0));
        assert_eq!(p.motion.vel, Vec2::new(1.0, 0.0));

        p.update(body, vp(), &mut events);
        assert!(body.pos.x > 400.0);
    }

    #[test]
    fn test_gauges() {
        let mut e = ship(&PlayerTuning::default());
        let (_, p) = parts(&mut e);
        p.set_health(25);
        p.weapons.triple_current = 7.5;
        let g = p.gauges();
        assert_eq!(g.health, 0.25);
        assert_eq!(g.triple, 6.0 / 20.0);
        assert_eq!(g.burst, 1.0);
    }
}
