//! Heart Catch - a single-screen catching game that ends in a proposal
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, catches, phases)
//! - `config`: Data-driven tuning with serde defaults
//! - `platform`: Frame loop control shared by browser and native drivers
//! - `ui`: Screen surfaces and the evasive decline button
//! - `audio`: Background music toggle and catch chime
//! - `renderer`: Canvas 2D drawing and shape geometry

pub mod audio;
pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod ui;

pub use config::GameConfig;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Hearts needed to fill the meter
    pub const WIN_SCORE: u32 = 15;
    /// Chance per tick that a new heart appears
    pub const SPAWN_CHANCE: f64 = 0.02;
    /// Particles emitted per catch
    pub const BURST_SIZE: usize = 5;
    /// Delay between the winning catch and the proposal reveal
    pub const PROPOSAL_REVEAL_DELAY_MS: u32 = 500;

    /// Basket dimensions
    pub const PLAYER_WIDTH: f32 = 100.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    /// Distance from the viewport bottom to the basket rim
    pub const PLAYER_GROUND_OFFSET: f32 = 100.0;
    /// Horizontal speed while steering with the keyboard (px/tick)
    pub const PLAYER_KEYBOARD_SPEED: f32 = 10.0;

    /// Heart size range [min, max)
    pub const HEART_MIN_SIZE: f32 = 20.0;
    pub const HEART_MAX_SIZE: f32 = 40.0;
    /// Heart fall speed range [min, max) in px/tick
    pub const HEART_MIN_SPEED: f32 = 2.0;
    pub const HEART_MAX_SPEED: f32 = 5.0;
    /// Heart hue band [min, max) in degrees
    pub const HEART_MIN_HUE: f32 = 340.0;
    pub const HEART_MAX_HUE: f32 = 360.0;

    /// Particle size range [min, max)
    pub const PARTICLE_MIN_SIZE: f32 = 2.0;
    pub const PARTICLE_MAX_SIZE: f32 = 7.0;
    /// Particle velocity component range is [-PARTICLE_MAX_DRIFT, PARTICLE_MAX_DRIFT)
    pub const PARTICLE_MAX_DRIFT: f32 = 2.0;
    /// Starting life budget
    pub const PARTICLE_LIFE: i32 = 100;
    /// Life lost per tick (a particle lives PARTICLE_LIFE / PARTICLE_DECAY ticks)
    pub const PARTICLE_DECAY: i32 = 2;

    /// Music volume used when the page starts the background track
    pub const MUSIC_VOLUME: f64 = 0.25;
    /// Catch chime volume
    pub const CHIME_VOLUME: f32 = 0.6;
}

/// Uniform sample in `[min, max)`, or `min` when the range is empty
#[inline]
pub fn sample_range<R: rand::Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Point halfway across the top edge of an axis-aligned box
#[inline]
pub fn top_center(pos: Vec2, width: f32) -> Vec2 {
    Vec2::new(pos.x + width / 2.0, pos.y)
}
