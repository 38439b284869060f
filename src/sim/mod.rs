//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per display frame, velocities in px/tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{HeartFate, classify, is_caught, is_missed};
pub use spawn::spawn_heart;
pub use state::{GameEvent, GamePhase, GameState, Heart, Particle, Player, Viewport, ground_line};
pub use tick::{TickInput, tick};
