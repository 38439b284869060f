//! Per-frame simulation tick
//!
//! One call advances the game by one display frame. Velocities are in
//! pixels per tick, so there is no timestep parameter.

use super::collision::{HeartFate, classify};
use super::spawn::spawn_heart;
use super::state::{GameEvent, GamePhase, GameState, Particle};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer/touch x coordinate (one-shot)
    pub pointer_x: Option<f32>,
    /// Keyboard steering: -1 left, 0 idle, 1 right
    pub steer: f32,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Start => {}
        GamePhase::Playing => {
            state.time_ticks += 1;
            update_player(state, input);
            spawn_heart(state);
            update_hearts(state);
            update_particles(state);
        }
        // Round is decided: let what is on screen fall away and fade out
        GamePhase::Proposal | GamePhase::Celebration => {
            state.time_ticks += 1;
            update_hearts(state);
            update_particles(state);
        }
    }
}

fn update_player(state: &mut GameState, input: &TickInput) {
    if let Some(x) = input.pointer_x {
        state.player.follow_pointer(x);
    }
    state.player.dx = input.steer.clamp(-1.0, 1.0) * state.config.keyboard_speed;
    state.player.update(state.viewport.width);
}

/// Advance every heart once and rebuild the live set.
///
/// Hearts are taken out of the state and pushed back only if still falling,
/// so removals never shift an unvisited heart.
fn update_hearts(state: &mut GameState) {
    let hearts = std::mem::take(&mut state.hearts);
    let mut live = Vec::with_capacity(hearts.len());

    for mut heart in hearts {
        heart.update();
        let can_catch = state.phase == GamePhase::Playing;
        match classify(&heart, &state.player, state.viewport.height, can_catch) {
            HeartFate::Caught => {
                state.score += 1;
                log::debug!("Caught heart {}/{}", state.score, state.config.win_score);
                burst(state, heart.pos);
                state.events.push(GameEvent::HeartCaught { pos: heart.pos });
                if state.is_won() {
                    state.phase = GamePhase::Proposal;
                    state.events.push(GameEvent::ProposalTriggered);
                    log::info!("Meter full after {} ticks - proposing", state.time_ticks);
                }
            }
            HeartFate::Missed => state.events.push(GameEvent::HeartMissed),
            HeartFate::Falling => live.push(heart),
        }
    }

    state.hearts = live;
}

/// Emit a burst of particles at `pos`
fn burst(state: &mut GameState, pos: glam::Vec2) {
    let count = state.config.burst_size;
    for _ in 0..count {
        let particle = Particle::new(state.rng(), pos);
        state.particles.push(particle);
    }
}

fn update_particles(state: &mut GameState) {
    state.particles.retain_mut(|p| {
        p.update();
        p.is_alive()
    });
}
