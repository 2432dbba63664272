//! Game balance and tuning
//!
//! Loaded from a JSON file on native builds; every section falls back to its
//! defaults when missing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::consts::HAZARD_SIZE_MULTIPLIER;
use crate::sim::projectile::ProjectileVariant;

/// Smallest ring spacing in degrees; a burst never exceeds 360 shots
pub const MIN_BURST_STEP: f32 = 1.0;

/// Errors raised while reading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Weapon balance preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WeaponPreset {
    #[default]
    Standard,
    /// Near-instant cooldowns and a long shield, for testing
    Overpowered,
}

impl WeaponPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponPreset::Standard => "Standard",
            WeaponPreset::Overpowered => "Overpowered",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "std" => Some(WeaponPreset::Standard),
            "overpowered" | "op" => Some(WeaponPreset::Overpowered),
            _ => None,
        }
    }

    /// Player tuning for this preset
    pub fn player_tuning(&self) -> PlayerTuning {
        let mut tuning = PlayerTuning::default();
        tuning.apply_preset(*self);
        tuning
    }
}

/// Player movement, health and weapons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_speed: f32,
    pub accel: f32,
    pub max_health: u32,

    // === Primary ===
    /// Ticks between primary shots
    pub shot_cooldown: u32,
    pub primary_weapon: ProjectileVariant,

    // === Triple ===
    /// Ammo capacity; each triple shot costs 2
    pub triple_ammo: f32,
    /// Ammo restored per tick
    pub triple_recharge: f32,
    /// Ticks after a triple shot before recharge resumes
    pub triple_delay: u32,
    /// Degrees either side of the facing angle
    pub triple_spread: f32,
    pub triple_weapon: ProjectileVariant,

    // === Burst ===
    pub burst_cooldown: u32,
    /// Degrees between shots in the ring
    pub burst_step: f32,
    pub burst_weapon: ProjectileVariant,

    /// Invulnerability after taking damage, in ticks
    pub i_frames: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_speed: 15.0,
            accel: 1.0,
            max_health: 100,

            shot_cooldown: 10,
            primary_weapon: ProjectileVariant::Straight,

            triple_ammo: 20.0,
            triple_recharge: 0.1,
            triple_delay: 50,
            triple_spread: 10.0,
            triple_weapon: ProjectileVariant::Straight,

            burst_cooldown: 500,
            burst_step: 10.0,
            burst_weapon: ProjectileVariant::Straight,

            i_frames: 100,
        }
    }
}

impl PlayerTuning {
    /// Overwrite the preset-dependent weapon numbers
    pub fn apply_preset(&mut self, preset: WeaponPreset) {
        match preset {
            WeaponPreset::Standard => {
                let base = PlayerTuning::default();
                self.triple_ammo = base.triple_ammo;
                self.triple_recharge = base.triple_recharge;
                self.triple_delay = base.triple_delay;
                self.burst_cooldown = base.burst_cooldown;
                self.shot_cooldown = base.shot_cooldown;
                self.i_frames = base.i_frames;
            }
            WeaponPreset::Overpowered => {
                self.triple_ammo = 20.0;
                self.triple_recharge = 20.0;
                self.triple_delay = 0;
                self.burst_cooldown = 2;
                self.shot_cooldown = 0;
                self.i_frames = 10_000;
            }
        }
    }
}

/// Hazard spawning and sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardTuning {
    /// Periodic spawning from the viewport edges
    pub spawning: bool,
    /// Ticks between spawns, drawn from [min, max)
    pub interval_min: u32,
    pub interval_max: u32,
    /// Spawned sizes, drawn from [min, max]
    pub size_min: u32,
    pub size_max: u32,
    /// Radius per unit of size
    pub size_multiplier: f32,
}

impl Default for HazardTuning {
    fn default() -> Self {
        Self {
            spawning: true,
            interval_min: 20,
            interval_max: 50,
            size_min: 1,
            size_max: 10,
            size_multiplier: HAZARD_SIZE_MULTIPLIER,
        }
    }
}

/// Complete game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub preset: WeaponPreset,
    pub player: PlayerTuning,
    pub hazards: HazardTuning,
    /// Start with two hazards on a collision course and no spawning
    pub head_on_demo: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: WeaponPreset::Standard,
            player: PlayerTuning::default(),
            hazards: HazardTuning::default(),
            head_on_demo: false,
        }
    }
}

impl Settings {
    /// Create settings from a weapon preset (applies preset defaults)
    pub fn from_preset(preset: WeaponPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    pub fn apply_preset(&mut self, preset: WeaponPreset) {
        self.preset = preset;
        self.player.apply_preset(preset);
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and sanitize settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} (preset {})",
            path.display(),
            settings.preset.as_str()
        );
        Ok(settings)
    }

    /// Clamp values the simulation cannot work with
    pub fn sanitized(mut self) -> Self {
        let h = &mut self.hazards;
        if h.interval_min < 1 {
            log::warn!("Spawn interval minimum {} raised to 1", h.interval_min);
            h.interval_min = 1;
        }
        if h.interval_max < h.interval_min {
            log::warn!(
                "Spawn interval range {}..{} inverted, using {}",
                h.interval_min,
                h.interval_max,
                h.interval_min
            );
            h.interval_max = h.interval_min;
        }
        if h.size_min < 1 {
            log::warn!("Hazard size minimum {} raised to 1", h.size_min);
            h.size_min = 1;
        }
        if h.size_max < h.size_min {
            log::warn!(
                "Hazard size range {}..={} inverted, using {}",
                h.size_min,
                h.size_max,
                h.size_min
            );
            h.size_max = h.size_min;
        }
        if !(h.size_multiplier.is_finite() && h.size_multiplier > 0.0) {
            log::warn!("Hazard size multiplier {} reset", h.size_multiplier);
            h.size_multiplier = HAZARD_SIZE_MULTIPLIER;
        }

        let p = &mut self.player;
        if p.max_health == 0 {
            log::warn!("Player health of 0 raised to 1");
            p.max_health = 1;
        }
        if !(p.triple_ammo.is_finite() && p.triple_ammo >= 0.0) {
            p.triple_ammo = 0.0;
        }
        if !(p.triple_recharge.is_finite() && p.triple_recharge >= 0.0) {
            p.triple_recharge = 0.0;
        }
        if !(p.max_speed.is_finite() && p.max_speed >= 0.0) {
            p.max_speed = PlayerTuning::default().max_speed;
        }
        if !p.burst_step.is_finite() || p.burst_step <= 0.0 {
            log::warn!("Burst step {} reset", p.burst_step);
            p.burst_step = PlayerTuning::default().burst_step;
        } else if p.burst_step < MIN_BURST_STEP {
            log::warn!("Burst step {} raised to {MIN_BURST_STEP}", p.burst_step);
            p.burst_step = MIN_BURST_STEP;
        }
        self
    }
}
