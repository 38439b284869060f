//! Basket/heart overlap tests
//!
//! A heart is caught once its bottom edge reaches the basket rim while its
//! tip is inside the basket's horizontal span. Catch is checked before miss.

use super::state::{Heart, Player};

/// Outcome for one heart after it moved this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartFate {
    /// Landed in the basket
    Caught,
    /// Fell past the bottom of the viewport
    Missed,
    /// Still falling
    Falling,
}

/// Whether the heart overlaps the basket rim
pub fn is_caught(heart: &Heart, player: &Player) -> bool {
    heart.bottom() >= player.pos.y && player.spans(heart.pos.x)
}

/// Whether the heart left the bottom of the viewport
pub fn is_missed(heart: &Heart, viewport_height: f32) -> bool {
    heart.pos.y > viewport_height
}

/// Classify a heart. `can_catch` is false once the round is decided.
pub fn classify(heart: &Heart, player: &Player, viewport_height: f32, can_catch: bool) -> HeartFate {
    if can_catch && is_caught(heart, player) {
        HeartFate::Caught
    } else if is_missed(heart, viewport_height) {
        HeartFate::Missed
    } else {
        HeartFate::Falling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Viewport;
    use glam::Vec2;

    fn player_at(x: f32) -> Player {
        let mut player = Player::new(Viewport::new(800.0, 600.0));
        player.pos.x = x;
        player
    }

    fn heart(x: f32, y: f32, size: f32) -> Heart {
        Heart {
            pos: Vec2::new(x, y),
            size,
            speed: 3.0,
            hue: 350.0,
        }
    }

    #[test]
    fn test_caught_when_bottom_reaches_rim() {
        let player = player_at(100.0);
        // Rim at y = 500
        assert!(!is_caught(&heart(150.0, 469.0, 30.0), &player));
        assert!(is_caught(&heart(150.0, 470.0, 30.0), &player));
        assert!(is_caught(&heart(150.0, 520.0, 30.0), &player));
    }

    #[test]
    fn test_not_caught_outside_span() {
        let player = player_at(100.0);
        assert!(!is_caught(&heart(99.0, 480.0, 30.0), &player));
        assert!(!is_caught(&heart(200.0, 480.0, 30.0), &player));
        assert!(is_caught(&heart(100.0, 480.0, 30.0), &player));
    }

    #[test]
    fn test_missed_below_viewport() {
        let player = player_at(100.0);
        let h = heart(500.0, 601.0, 30.0);
        assert_eq!(classify(&h, &player, 600.0, true), HeartFate::Missed);
        let h = heart(500.0, 600.0, 30.0);
        assert_eq!(classify(&h, &player, 600.0, true), HeartFate::Falling);
    }

    #[test]
    fn test_catch_wins_tie() {
        let player = player_at(100.0);
        let h = heart(150.0, 650.0, 30.0);
        assert_eq!(classify(&h, &player, 600.0, true), HeartFate::Caught);
        assert_eq!(classify(&h, &player, 600.0, false), HeartFate::Missed);
    }
}
