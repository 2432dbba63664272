//! Game state and simulation context
//!
//! Everything the frame loop touches lives here; given the same seed, settings
//! and inputs the simulation replays identically.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::arena::EntityArena;
use super::entity::{EntityId, EntityKind};
use super::player::{self, Player};
use super::{hazard, status_bar};
use crate::platform::Viewport;
use crate::settings::Settings;

/// Size of the two hazards placed by the head-on demo
const HEAD_ON_SIZE: u32 = 10;
const HEAD_ON_SPEED: f32 = 5.0;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: Settings,
    /// Live entities in insertion order
    pub entities: EntityArena,
    pub player: Option<EntityId>,
    pub score: u64,
    /// Cleared on game over; stepping stops
    pub running: bool,
    pub time_ticks: u64,
    /// Ticks since the last hazard spawn
    pub spawn_counter: u32,
    /// Tick count at which the next hazard spawns
    pub next_spawn: u32,
}

impl GameState {
    /// Create a new game with the given seed
    pub fn new(seed: u64, settings: Settings, viewport: Viewport) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings: settings.sanitized(),
            entities: EntityArena::new(),
            player: None,
            score: 0,
            running: true,
            time_ticks: 0,
            spawn_counter: 0,
            next_spawn: 0,
        };
        state.populate(viewport);
        state
    }

    /// Restart with the same seed and settings
    pub fn reset(&mut self, viewport: Viewport) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.entities.clear();
        self.player = None;
        self.score = 0;
        self.running = true;
        self.time_ticks = 0;
        self.spawn_counter = 0;
        self.populate(viewport);
    }

    fn populate(&mut self, viewport: Viewport) {
        let tuning = self.settings.player.clone();
        self.player = Some(
            self.entities
                .insert(player::spawn(viewport.center(), &tuning)),
        );
        for bar in status_bar::standard_bars(&tuning, viewport) {
            self.entities.insert(bar);
        }
        self.roll_spawn_interval();

        if self.settings.head_on_demo {
            let center = viewport.center();
            let multiplier = self.settings.hazards.size_multiplier;
            for (offset, vx) in [
                (Vec2::new(-150.0, -100.0), HEAD_ON_SPEED),
                (Vec2::new(150.0, 0.0), -HEAD_ON_SPEED),
            ] {
                let mut rock = hazard::spawn(center + offset, HEAD_ON_SIZE, multiplier);
                if let EntityKind::Hazard(h) = &mut rock.kind {
                    h.motion.vel.x = vx;
                }
                self.entities.insert(rock);
            }
        }

        log::info!(
            "Game started (seed {}, preset {}, head-on demo {})",
            self.seed,
            self.settings.preset.as_str(),
            self.settings.head_on_demo
        );
    }

    /// Periodic edge spawning is on
    pub fn spawning_enabled(&self) -> bool {
        self.settings.hazards.spawning && !self.settings.head_on_demo
    }

    /// Pick the next spawn interval from [min, max)
    pub fn roll_spawn_interval(&mut self) {
        let (min, max) = (
            self.settings.hazards.interval_min,
            self.settings.hazards.interval_max,
        );
        self.next_spawn = if max > min {
            self.rng.random_range(min..max)
        } else {
            min
        };
    }

    /// Spawn a random hazard just outside a random viewport edge
    pub fn spawn_hazard(&mut self, viewport: Viewport) -> EntityId {
        let tuning = &self.settings.hazards;
        let (min, max, multiplier) = (tuning.size_min, tuning.size_max, tuning.size_multiplier);
        let size = self.rng.random_range(min..=max.max(min));
        let pos = hazard::edge_spawn_position(viewport, size as f32 * multiplier, &mut self.rng);
        let rock = hazard::spawn_drifting(pos, size, multiplier, &mut self.rng);
        log::debug!("Hazard spawned: size {size} at ({:.0}, {:.0})", pos.x, pos.y);
        self.entities.insert(rock)
    }

    pub fn player(&self) -> Option<&Player> {
        self.player
            .and_then(|id| self.entities.get(id))
            .and_then(|e| e.kind.as_player())
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        let id = self.player?;
        match &mut self.entities.get_mut(id)?.kind {
            EntityKind::Player(p) => Some(&mut **p),
            _ => None,
        }
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.player
            .and_then(|id| self.entities.get(id))
            .map(|e| e.body.pos)
    }

    /// Point that player-relative steering aims at: the player, else the viewport center
    pub fn steering_reference(&self, viewport: Viewport) -> Vec2 {
        self.player_position().unwrap_or_else(|| viewport.center())
    }

    pub fn hazard_count(&self) -> usize {
        self.entities.iter().filter(|(_, e)| e.is_hazard()).count()
    }

    /// Stop the simulation
    pub fn game_over(&mut self) {
        if self.running {
            self.running = false;
            log::info!(
                "Game over after {} ticks, score {}",
                self.time_ticks,
                self.score
            );
        }
    }
}
