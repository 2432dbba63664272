//! Frame-stepped simulation tick
//!
//! One call to [`step`] advances every live entity by exactly one tick:
//! spawn timer, input, then a single pass in insertion order where each
//! entity is pair-tested against every later entity and then updated.
//! Entities produced during the pass are appended afterwards and first move
//! on the next tick.

use super::collision;
use super::entity::{Entity, EntityId, EntityKind, FrameEvents};
use super::projectile;
use super::state::GameState;
use crate::platform::{Action, ActionState, Viewport};
use crate::renderer::DrawSink;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub up: bool,
    pub right: bool,
    pub down: bool,
    /// Primary weapon
    pub fire: bool,
    /// Two-shot spread weapon
    pub triple_fire: bool,
    /// Full-circle ring
    pub burst: bool,
}

impl From<&ActionState> for TickInput {
    fn from(actions: &ActionState) -> Self {
        Self {
            left: actions.is_pressed(Action::MoveLeft),
            up: actions.is_pressed(Action::MoveUp),
            right: actions.is_pressed(Action::MoveRight),
            down: actions.is_pressed(Action::MoveDown),
            fire: actions.is_pressed(Action::Fire),
            triple_fire: actions.is_pressed(Action::TripleFire),
            burst: actions.is_pressed(Action::Burst),
        }
    }
}

/// Advance the game by one tick
pub fn step(state: &mut GameState, input: &TickInput, viewport: Viewport) {
    if !state.running {
        return;
    }
    state.time_ticks += 1;

    if state.spawning_enabled() {
        if state.spawn_counter == state.next_spawn {
            state.roll_spawn_interval();
            state.spawn_hazard(viewport);
            state.spawn_counter = 0;
        }
        state.spawn_counter += 1;
    }

    if let Some(player) = state.player_mut() {
        player.input = *input;
    }

    let ids: Vec<EntityId> = state.entities.ids().to_vec();
    for &id in &ids {
        if let Some(entity) = state.entities.get_mut(id) {
            entity.body.colliding = false;
        }
    }

    let mut events = FrameEvents::default();
    for (i, &id) in ids.iter().enumerate() {
        let Some(entity) = state.entities.get_mut(id) else {
            continue;
        };
        if entity.body.destroyed {
            continue;
        }
        if entity.is_stranded(viewport) {
            entity.body.destroyed = true;
            continue;
        }

        if entity.body.collidable {
            for &other in &ids[i + 1..] {
                let Some((a, b)) = state.entities.pair_mut(id, other) else {
                    continue;
                };
                if let Some(contact) = collision::detect(a, b) {
                    collision::resolve(a, b, contact, &mut events);
                }
            }
        }

        if state
            .entities
            .get(id)
            .is_some_and(|e| e.body.destroyed)
        {
            continue;
        }
        update_entity(state, id, viewport, &mut events);
    }

    let spawned = events.spawns.len();
    for entity in events.spawns.drain(..) {
        state.entities.insert(entity);
    }
    state.score += events.score;
    if events.game_over {
        state.game_over();
    }

    let removed = state.entities.compact();
    if removed > 0 || spawned > 0 {
        log::trace!(
            "Tick {}: +{spawned} -{removed}, {} live",
            state.time_ticks,
            state.entities.len()
        );
    }
    if state.player.is_some_and(|id| !state.entities.contains(id)) {
        state.player = None;
    }
}

/// Run one entity's own behaviour
fn update_entity(state: &mut GameState, id: EntityId, viewport: Viewport, events: &mut FrameEvents) {
    let reference = state.steering_reference(viewport);
    let readings = state.player().map(|p| p.gauges());

    let Some(Entity { body, kind }) = state.entities.get_mut(id) else {
        return;
    };
    let steer = match kind {
        EntityKind::Player(player) => {
            player.update(body, viewport, events);
            false
        }
        EntityKind::Hazard(hazard) => {
            hazard.update(body, viewport);
            false
        }
        EntityKind::Projectile(shot) => {
            shot.update(body, viewport, events);
            !body.destroyed && shot.is_primed()
        }
        EntityKind::Bomb(bomb) => {
            bomb.update(body, viewport, events);
            false
        }
        EntityKind::StatusBar(bar) => {
            bar.update(body, readings.as_ref(), viewport);
            false
        }
    };

    if steer {
        let plan = projectile::plan_steering(&state.entities, id, reference, viewport);
        projectile::apply_steering(&mut state.entities, id, plan);
    }
}

/// Emit every live entity, last inserted first
pub fn draw<S: DrawSink + ?Sized>(state: &GameState, sink: &mut S) {
    for (_, entity) in state.entities.iter().rev() {
        entity.draw(sink);
    }
}

/// One full frame: step then draw
pub fn tick<S: DrawSink + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    viewport: Viewport,
    sink: &mut S,
) {
    step(state, input, viewport);
    draw(state, sink);
}
