//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in `GameState`; entities are plain
//! data with their own per-tick update rule.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::*;
use crate::sample_range;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start button
    Start,
    /// Hearts are falling and can be caught
    Playing,
    /// Meter is full; the question is (or is about to be) on screen
    Proposal,
    /// The answer was yes
    Celebration,
}

/// Something the platform layer should react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A heart landed in the basket at `pos`
    HeartCaught { pos: Vec2 },
    /// A heart fell past the bottom of the viewport
    HeartMissed,
    /// The meter filled up; reveal the proposal after the configured delay
    ProposalTriggered,
}

/// Visible drawing area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The basket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; `y` is the basket rim
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity (px/tick), written only by input
    pub dx: f32,
}

impl Player {
    /// Centered horizontally, rim a fixed distance above the bottom edge
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pos: Vec2::new(
                viewport.width / 2.0 - PLAYER_WIDTH / 2.0,
                ground_line(viewport),
            ),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            dx: 0.0,
        }
    }

    /// Center the basket on a pointer coordinate (clamped on the next update)
    pub fn follow_pointer(&mut self, pointer_x: f32) {
        self.pos.x = pointer_x - self.width / 2.0;
    }

    /// Apply velocity, then keep the basket fully inside the viewport
    pub fn update(&mut self, viewport_width: f32) {
        self.pos.x += self.dx;
        let max_x = (viewport_width - self.width).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }

    /// Whether `x` lies in the basket's horizontal span `[x, x + width)`
    pub fn spans(&self, x: f32) -> bool {
        x >= self.pos.x && x < self.pos.x + self.width
    }
}

/// Vertical position of the basket rim for a viewport
#[inline]
pub fn ground_line(viewport: Viewport) -> f32 {
    viewport.height - PLAYER_GROUND_OFFSET
}

/// A falling heart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heart {
    /// Top-center tip of the silhouette
    pub pos: Vec2,
    pub size: f32,
    /// Fall speed (px/tick), fixed for the heart's lifetime
    pub speed: f32,
    /// Hue in degrees; saturation and lightness are fixed
    pub hue: f32,
}

impl Heart {
    /// Random heart just above the top edge, fully on screen horizontally
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport_width: f32) -> Self {
        let size = sample_range(rng, HEART_MIN_SIZE, HEART_MAX_SIZE);
        let x = sample_range(rng, 0.0, viewport_width - size);
        let speed = sample_range(rng, HEART_MIN_SPEED, HEART_MAX_SPEED);
        let hue = sample_range(rng, HEART_MIN_HUE, HEART_MAX_HUE);
        Self {
            pos: Vec2::new(x, -size),
            size,
            speed,
            hue,
        }
    }

    /// Fall straight down
    pub fn update(&mut self) {
        self.pos.y += self.speed;
    }

    /// Lowest point of the silhouette
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    /// CSS fill color
    pub fn css_color(&self) -> String {
        format!("hsl({:.1}, 100%, 60%)", self.hue)
    }
}

/// A spark from a catch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Remaining life budget; removed at <= 0
    pub life: i32,
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, pos: Vec2) -> Self {
        let size = sample_range(rng, PARTICLE_MIN_SIZE, PARTICLE_MAX_SIZE);
        let vel = Vec2::new(
            sample_range(rng, -PARTICLE_MAX_DRIFT, PARTICLE_MAX_DRIFT),
            sample_range(rng, -PARTICLE_MAX_DRIFT, PARTICLE_MAX_DRIFT),
        );
        Self {
            pos,
            vel,
            size,
            life: PARTICLE_LIFE,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life -= PARTICLE_DECAY;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Render opacity, fading linearly to 0 with remaining life
    pub fn alpha(&self) -> f32 {
        (self.life.max(0) as f32 / PARTICLE_LIFE as f32).min(1.0)
    }
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub config: GameConfig,
    pub viewport: Viewport,
    pub phase: GamePhase,
    /// Hearts caught this round
    pub score: u32,
    /// Simulation tick counter (reset on start)
    pub time_ticks: u64,
    pub player: Player,
    pub hearts: Vec<Heart>,
    pub particles: Vec<Particle>,
    /// Pending notifications for the platform layer
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game in the Start phase
    pub fn new(seed: u64, viewport: Viewport, config: GameConfig) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            viewport,
            phase: GamePhase::Start,
            score: 0,
            time_ticks: 0,
            player: Player::new(viewport),
            hearts: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Start (or restart) a round from any phase
    pub fn start(&mut self) {
        self.score = 0;
        self.time_ticks = 0;
        self.hearts.clear();
        self.particles.clear();
        self.events.clear();
        self.player = Player::new(self.viewport);
        self.phase = GamePhase::Playing;
        log::info!("Round started (need {} hearts)", self.config.win_score);
    }

    /// Answer the proposal. Returns false outside the Proposal phase.
    pub fn accept(&mut self) -> bool {
        if self.phase != GamePhase::Proposal {
            return false;
        }
        self.phase = GamePhase::Celebration;
        log::info!("Proposal accepted");
        true
    }

    /// Track a new viewport size and re-anchor the basket
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.player.pos.y = ground_line(viewport);
    }

    /// Meter fill in percent
    pub fn meter_percent(&self) -> f32 {
        100.0 * self.score as f32 / self.config.win_score as f32
    }

    /// Whether the meter is full
    pub fn is_won(&self) -> bool {
        self.score >= self.config.win_score
    }

    /// Drain pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_player_starts_centered_on_ground_line() {
        let player = Player::new(viewport());
        assert_eq!(player.pos.x, 350.0);
        assert_eq!(player.pos.y, 500.0);
        assert_eq!(player.dx, 0.0);
    }

    #[test]
    fn test_player_clamps_both_edges() {
        let mut player = Player::new(viewport());
        player.follow_pointer(-500.0);
        player.update(800.0);
        assert_eq!(player.pos.x, 0.0);

        player.follow_pointer(5000.0);
        player.update(800.0);
        assert_eq!(player.pos.x, 700.0);
    }

    #[test]
    fn test_player_velocity_applies_before_clamp() {
        let mut player = Player::new(viewport());
        player.dx = 10.0;
        player.update(800.0);
        assert_eq!(player.pos.x, 360.0);
        player.pos.x = 695.0;
        player.update(800.0);
        assert_eq!(player.pos.x, 700.0);
    }

    #[test]
    fn test_player_span_is_half_open() {
        let mut player = Player::new(viewport());
        player.pos.x = 100.0;
        assert!(player.spans(100.0));
        assert!(player.spans(199.9));
        assert!(!player.spans(200.0));
        assert!(!player.spans(99.9));
    }

    #[test]
    fn test_heart_falls_by_speed() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut heart = Heart::spawn(&mut rng, 800.0);
        let (x, y) = (heart.pos.x, heart.pos.y);
        heart.update();
        heart.update();
        assert_eq!(heart.pos.x, x);
        assert!((heart.pos.y - (y + 2.0 * heart.speed)).abs() < 1e-4);
    }

    #[test]
    fn test_heart_color_in_band() {
        let mut rng = Pcg32::seed_from_u64(3);
        let heart = Heart::spawn(&mut rng, 800.0);
        assert!(heart.css_color().starts_with("hsl("));
        assert!(heart.css_color().ends_with(", 100%, 60%)"));
    }

    #[test]
    fn test_heart_on_narrow_viewport_stays_at_origin() {
        let mut rng = Pcg32::seed_from_u64(3);
        let heart = Heart::spawn(&mut rng, 10.0);
        assert_eq!(heart.pos.x, 0.0);
    }

    #[test]
    fn test_particle_lives_fifty_ticks() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut particle = Particle::new(&mut rng, Vec2::new(10.0, 10.0));
        assert_eq!(particle.life, 100);
        for k in 1..=50 {
            particle.update();
            assert_eq!(particle.life, 100 - 2 * k);
        }
        assert!(!particle.is_alive());
        assert_eq!(particle.alpha(), 0.0);
    }

    #[test]
    fn test_particle_alpha_tracks_life() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut particle = Particle::new(&mut rng, Vec2::ZERO);
        assert_eq!(particle.alpha(), 1.0);
        for _ in 0..25 {
            particle.update();
        }
        assert!((particle.alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_accept_only_from_proposal() {
        let mut state = GameState::new(1, viewport(), GameConfig::default());
        assert!(!state.accept());
        state.start();
        assert!(!state.accept());
        state.phase = GamePhase::Proposal;
        assert!(state.accept());
        assert_eq!(state.phase, GamePhase::Celebration);
    }

    #[test]
    fn test_resize_reanchors_player() {
        let mut state = GameState::new(1, viewport(), GameConfig::default());
        state.resize(Viewport::new(1024.0, 900.0));
        assert_eq!(state.player.pos.y, 800.0);
        assert_eq!(state.viewport.width, 1024.0);
    }

    proptest! {
        #[test]
        fn prop_heart_spawn_ranges(seed in any::<u64>(), width in 40.0f32..4000.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let heart = Heart::spawn(&mut rng, width);
            prop_assert!(heart.size >= 20.0 && heart.size < 40.0);
            prop_assert!(heart.pos.x >= 0.0 && heart.pos.x <= width - heart.size);
            prop_assert_eq!(heart.pos.y, -heart.size);
            prop_assert!(heart.speed >= 2.0 && heart.speed < 5.0);
            prop_assert!(heart.hue >= 340.0 && heart.hue < 360.0);
        }

        #[test]
        fn prop_particle_spawn_ranges(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = Particle::new(&mut rng, Vec2::new(5.0, 5.0));
            prop_assert_eq!(p.life, 100);
            prop_assert!(p.size >= 2.0 && p.size < 7.0);
            prop_assert!(p.vel.x >= -2.0 && p.vel.x < 2.0);
            prop_assert!(p.vel.y >= -2.0 && p.vel.y < 2.0);
        }

        #[test]
        fn prop_player_always_inside(
            target in -10_000.0f32..10_000.0,
            dx in -50.0f32..50.0,
            width in 100.0f32..3000.0,
        ) {
            let mut player = Player::new(Viewport::new(width, 600.0));
            player.follow_pointer(target);
            player.dx = dx;
            player.update(width);
            prop_assert!(player.pos.x >= 0.0);
            prop_assert!(player.pos.x <= width - player.width);
        }
    }
}
