//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick units only (no frame delta)
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - Output only through a draw sink; the viewport is passed in every tick

pub mod arena;
pub mod collision;
pub mod entity;
pub mod hazard;
pub mod kinematics;
pub mod path;
pub mod player;
pub mod projectile;
pub mod state;
pub mod status_bar;
pub mod tick;

pub use arena::EntityArena;
pub use collision::{Contact, detect, resolve};
pub use entity::{Body, DamageOutcome, Damageable, Entity, EntityId, EntityKind, FrameEvents};
pub use kinematics::{EdgeEvent, EdgePolicy, Motion, Movable, integrate};
pub use path::{Path, PathStep};
pub use player::{Player, ShieldPalette};
pub use projectile::{Projectile, ProjectileVariant};
pub use state::GameState;
pub use status_bar::{Gauge, GaugeReadings, StatusBar};
pub use tick::{TickInput, draw, step, tick};
