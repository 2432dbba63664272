//! Colors for shapes

use serde::{Deserialize, Serialize};

/// 8-bit RGB color with a fractional alpha channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha replaced (clamped to 0-1)
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 1.0 };
        Self { a, ..self }
    }
}

/// Colors for game elements
pub mod palette {
    use super::Rgba;

    pub const PLAYER_FILL: Rgba = Rgba::rgb(0x00, 0xff, 0xff);
    pub const PLAYER_STROKE: Rgba = Rgba::rgb(0x00, 0x99, 0xff);
    pub const HIT_FILL: Rgba = Rgba::rgb(0xff, 0x99, 0x00);
    pub const HIT_STROKE: Rgba = Rgba::rgb(0xff, 0x55, 0x55);
    pub const SHIELD_FADED_FILL: Rgba = Rgba::rgba(0x00, 0xff, 0xff, 0.5);
    pub const SHIELD_FADED_STROKE: Rgba = Rgba::rgba(0x00, 0x99, 0xff, 0.5);

    pub const HAZARD_STROKE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
    pub const HAZARD_TARGETED: Rgba = Rgba::rgb(0xff, 0x99, 0x99);

    pub const SHOT: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
    pub const BOMB_SHOT: Rgba = Rgba::rgb(0x00, 0x00, 0x00);
    pub const RECURSIVE_BOMB_SHOT: Rgba = Rgba::rgb(0x00, 0x55, 0x00);

    pub const BAR_FRAME: Rgba = Rgba::rgb(0x00, 0x00, 0x00);
    pub const BAR_EMPTY: Rgba = Rgba::rgb(0x55, 0x55, 0x55);
    pub const BAR_HEALTH: Rgba = Rgba::rgb(0xff, 0x55, 0x55);
    pub const BAR_TRIPLE: Rgba = Rgba::rgb(0x55, 0xff, 0x55);
    pub const BAR_BURST: Rgba = Rgba::rgb(0x55, 0x55, 0xff);
}
