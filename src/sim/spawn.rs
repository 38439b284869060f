//! Heart spawner
//!
//! A fixed per-tick chance gives a geometric inter-arrival time with mean
//! `1 / chance` ticks. There is no cap on live hearts.

use rand::Rng;

use super::state::{GamePhase, GameState, Heart};

/// Roll once for a new heart. Returns whether one was added.
pub fn spawn_heart(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let chance = state.config.spawn_chance;
    let width = state.viewport.width;
    let rng = state.rng();
    if !rng.random_bool(chance) {
        return false;
    }
    let heart = Heart::spawn(rng, width);
    state.hearts.push(heart);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::Viewport;

    fn playing(chance: f64) -> GameState {
        let config = GameConfig {
            spawn_chance: chance,
            ..Default::default()
        };
        let mut state = GameState::new(42, Viewport::new(800.0, 600.0), config);
        state.start();
        state
    }

    #[test]
    fn test_certain_spawn() {
        let mut state = playing(1.0);
        assert!(spawn_heart(&mut state));
        assert_eq!(state.hearts.len(), 1);
    }

    #[test]
    fn test_zero_chance_never_spawns() {
        let mut state = playing(0.0);
        for _ in 0..1000 {
            assert!(!spawn_heart(&mut state));
        }
        assert!(state.hearts.is_empty());
    }

    #[test]
    fn test_no_spawn_outside_playing() {
        let mut state = playing(1.0);
        state.phase = GamePhase::Proposal;
        assert!(!spawn_heart(&mut state));
        state.phase = GamePhase::Start;
        assert!(!spawn_heart(&mut state));
        assert!(state.hearts.is_empty());
    }

    #[test]
    fn test_default_rate_is_roughly_two_percent() {
        let mut state = playing(0.02);
        let spawned = (0..50_000).filter(|_| spawn_heart(&mut state)).count();
        // Mean 1000, sd ~31
        assert!((800..1200).contains(&spawned), "spawned {spawned}");
    }
}
