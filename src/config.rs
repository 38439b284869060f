//! Game tuning
//!
//! Every field defaults to the matching constant in `consts`, so a partial
//! JSON document only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable gameplay and audio parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Catches needed to trigger the proposal
    pub win_score: u32,
    /// Per-tick heart spawn probability
    pub spawn_chance: f64,
    /// Particles per catch
    pub burst_size: usize,
    /// Delay before the proposal surface is shown
    pub reveal_delay_ms: u32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f64,
    /// Keyboard steering speed (px/tick)
    pub keyboard_speed: f32,
    /// Play a chime on each catch
    pub sfx: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_score: WIN_SCORE,
            spawn_chance: SPAWN_CHANCE,
            burst_size: BURST_SIZE,
            reveal_delay_ms: PROPOSAL_REVEAL_DELAY_MS,
            music_volume: MUSIC_VOLUME,
            keyboard_speed: PLAYER_KEYBOARD_SPEED,
            sfx: true,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Clamp values that would break the simulation
    pub fn sanitized(mut self) -> Self {
        self.win_score = self.win_score.max(1);
        if !self.spawn_chance.is_finite() {
            self.spawn_chance = SPAWN_CHANCE;
        }
        self.spawn_chance = self.spawn_chance.clamp(0.0, 1.0);
        if !self.music_volume.is_finite() {
            self.music_volume = MUSIC_VOLUME;
        }
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        if !self.keyboard_speed.is_finite() || self.keyboard_speed < 0.0 {
            self.keyboard_speed = PLAYER_KEYBOARD_SPEED;
        }
        self
    }

    /// Element id of the inline JSON config block
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "game-config";

    /// Load from the page's `<script id="game-config">` block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from #{}", Self::ELEMENT_ID);
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config in #{}: {} - using defaults", Self::ELEMENT_ID, e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default config");
                Self::default()
            }
        }
    }

    /// Load from an optional JSON file path (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default config");
            return Self::default();
        };
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| Self::from_json(&json).map_err(|e| e.to_string()));
        match parsed {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Could not load config from {} ({}) - using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = GameConfig::default();
        assert_eq!(config.win_score, 15);
        assert!((config.spawn_chance - 0.02).abs() < f64::EPSILON);
        assert_eq!(config.burst_size, 5);
        assert_eq!(config.reveal_delay_ms, 500);
        assert!((config.music_volume - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "win_score": 3 }"#).unwrap();
        assert_eq!(config.win_score, 3);
        assert_eq!(config.burst_size, BURST_SIZE);
        assert!(config.sfx);
    }

    #[test]
    fn test_sanitize_clamps() {
        let config = GameConfig::from_json(
            r#"{ "win_score": 0, "spawn_chance": 7.5, "music_volume": -1.0 }"#,
        )
        .unwrap();
        assert_eq!(config.win_score, 1);
        assert_eq!(config.spawn_chance, 1.0);
        assert_eq!(config.music_volume, 0.0);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(GameConfig::from_json("{ not json").is_err());
    }
}
