//! Shape geometry for the 2D primitives
//!
//! Pure control-point math; the canvas backend only replays it.

use glam::Vec2;

use crate::sim::Player;
use crate::top_center;

/// Fraction of the heart's size taken by the two top lobes
pub const HEART_LOBE_RATIO: f32 = 0.3;
/// Handle arc sits this far above the bowl
pub const HANDLE_LIFT: f32 = 10.0;

/// One cubic Bezier segment continuing from the previous end point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub c1: Vec2,
    pub c2: Vec2,
    pub end: Vec2,
}

impl Cubic {
    fn new(c1: Vec2, c2: Vec2, end: Vec2) -> Self {
        Self { c1, c2, end }
    }
}

/// Closed heart outline: left lobe, left flank, right flank, right lobe
#[derive(Debug, Clone, PartialEq)]
pub struct HeartPath {
    pub start: Vec2,
    pub curves: [Cubic; 4],
}

/// Heart silhouette hanging from its top-center notch at `tip`
pub fn heart_path(tip: Vec2, size: f32) -> HeartPath {
    let Vec2 { x, y } = tip;
    let half = size / 2.0;
    let lobe = size * HEART_LOBE_RATIO;
    let flank = y + (size + lobe) / 2.0;
    let notch = Vec2::new(x, y + lobe);

    HeartPath {
        start: notch,
        curves: [
            Cubic::new(Vec2::new(x, y), Vec2::new(x - half, y), Vec2::new(x - half, y + lobe)),
            Cubic::new(Vec2::new(x - half, flank), Vec2::new(x, flank), Vec2::new(x, y + size)),
            Cubic::new(Vec2::new(x, flank), Vec2::new(x + half, flank), Vec2::new(x + half, y + lobe)),
            Cubic::new(Vec2::new(x + half, y), Vec2::new(x, y), notch),
        ],
    }
}

/// Basket as two half circles: a filled bowl and a stroked handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasketShape {
    pub bowl_center: Vec2,
    pub handle_center: Vec2,
    pub radius: f32,
}

pub fn basket(player: &Player) -> BasketShape {
    let bowl_center = top_center(player.pos, player.width);
    BasketShape {
        bowl_center,
        handle_center: bowl_center - Vec2::new(0.0, HANDLE_LIFT),
        radius: player.width / 2.0,
    }
}
