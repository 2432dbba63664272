//! Asteroid Field - a 2D arcade asteroid shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (paths, kinematics, collisions, weapons)
//! - `renderer`: Ordered draw commands handed to the host canvas
//! - `platform`: Viewport and logical input supplied by the host
//! - `settings`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use platform::{Action, ActionState, Viewport};
pub use settings::{Settings, SettingsError, WeaponPreset};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Hazard radius per unit of size
    pub const HAZARD_SIZE_MULTIPLIER: f32 = 10.0;
    /// Velocity components below this snap to zero
    pub const MIN_SPEED: f32 = 0.01;
    /// Default multiplicative velocity decay per tick
    pub const AIR_FRICTION: f32 = 0.975;

    /// Player hull half extents (width, height)
    pub const PLAYER_HALF_WIDTH: f32 = 20.0;
    pub const PLAYER_HALF_HEIGHT: f32 = 10.0;

    /// Ticks after a hit that show the "hit" palette
    pub const HIT_FLASH_TICKS: u32 = 20;
    /// Shield palette alternates every this many ticks
    pub const SHIELD_BLINK_TICKS: u32 = 10;

    /// Seeking shots with no target swing back once farther than this from the player
    pub const SEEK_RETURN_DISTANCE: f32 = 200.0;
    /// Orbiting shots dive toward their target beyond this surface distance
    pub const ORBIT_APPROACH_DISTANCE: f32 = 100.0;

    /// Inset of a status bar's inner area relative to its frame
    pub const BAR_INSET: f32 = 5.0;
}

/// Beyond this magnitude, repeated ±360 stepping no longer converges in f32
const DIRECT_WRAP_LIMIT: f32 = 360.0 * 1024.0;

/// Normalize an angle in degrees to [0, 360)
///
/// Wraps by repeated ±360 adjustment so that negative and >360 inputs land on
/// the same values as the stepping wrap. Non-finite input maps to 0.
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut angle = if angle.abs() > DIRECT_WRAP_LIMIT {
        angle.rem_euclid(360.0)
    } else {
        angle
    };
    while angle >= 360.0 {
        angle -= 360.0;
    }
    while angle < 0.0 {
        angle += 360.0;
    }
    // A tiny negative plus 360 rounds up to 360 in f32
    if angle >= 360.0 {
        angle -= 360.0;
    }
    angle
}

/// Screen-space bearing from `from` to `to` in degrees (atan2 convention)
#[inline]
pub fn bearing_degrees(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees()
}

/// Velocity for a heading in degrees, where 0 points along +y and 90 along +x
#[inline]
pub fn heading_to_velocity(heading: f32, speed: f32) -> Vec2 {
    let rad = heading.to_radians();
    Vec2::new(speed * rad.sin(), speed * rad.cos())
}
