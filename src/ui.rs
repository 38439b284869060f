//! DOM surfaces around the canvas
//!
//! Screens are plain elements toggled with `active`/`hidden` classes. The
//! placement math for the decline button is pure so it can be tested natively.

use rand::Rng;

use crate::sample_range;
use crate::sim::Viewport;

/// Full-screen overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Proposal,
    Celebration,
}

impl Screen {
    pub fn element_id(&self) -> &'static str {
        match self {
            Screen::Start => "start-screen",
            Screen::Proposal => "proposal-screen",
            Screen::Celebration => "celebration-screen",
        }
    }
}

/// Element ids the page must provide
pub mod ids {
    pub const CANVAS: &str = "gameCanvas";
    pub const METER_FILL: &str = "love-fill";
    pub const START_BTN: &str = "start-btn";
    pub const YES_BTN: &str = "yes-btn";
    pub const NO_BTN: &str = "no-btn";
    pub const MUSIC: &str = "bgMusic";
    pub const MUSIC_BTN: &str = "musicBtn";
}

/// Random top-left corner that keeps a `width` x `height` button fully visible
pub fn evasive_position<R: Rng + ?Sized>(
    rng: &mut R,
    viewport: Viewport,
    width: f32,
    height: f32,
) -> (f32, f32) {
    (
        sample_range(rng, 0.0, viewport.width - width),
        sample_range(rng, 0.0, viewport.height - height),
    )
}

/// CSS width for the meter fill
pub fn meter_width(percent: f32) -> String {
    format!("{}%", percent)
}

#[cfg(target_arch = "wasm32")]
pub use dom::*;

#[cfg(target_arch = "wasm32")]
mod dom {
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlElement};

    use super::{Screen, ids};

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn html_element(id: &str) -> Option<HtmlElement> {
        document()?.get_element_by_id(id)?.dyn_into().ok()
    }

    /// Show a screen (swap `hidden` for `active`)
    pub fn show_screen(screen: Screen) {
        if let Some(el) = html_element(screen.element_id()) {
            let _ = el.class_list().remove_1("hidden");
            let _ = el.class_list().add_1("active");
        }
    }

    /// Hide a screen (swap `active` for `hidden`)
    pub fn hide_screen(screen: Screen) {
        if let Some(el) = html_element(screen.element_id()) {
            let _ = el.class_list().remove_1("active");
            let _ = el.class_list().add_1("hidden");
        }
    }

    /// Set the meter fill width
    pub fn set_meter(percent: f32) {
        if let Some(el) = html_element(ids::METER_FILL) {
            let _ = el.style().set_property("width", &super::meter_width(percent));
        }
    }

    /// Move the decline button somewhere else on screen
    pub fn move_button(id: &str, left: f32, top: f32) {
        if let Some(el) = html_element(id) {
            let style = el.style();
            let _ = style.set_property("position", "fixed");
            let _ = style.set_property("left", &format!("{left}px"));
            let _ = style.set_property("top", &format!("{top}px"));
        }
    }

    /// Rendered size of an element
    pub fn element_size(id: &str) -> Option<(f32, f32)> {
        let el = html_element(id)?;
        Some((el.offset_width() as f32, el.offset_height() as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_screen_ids() {
        assert_eq!(Screen::Start.element_id(), "start-screen");
        assert_eq!(Screen::Proposal.element_id(), "proposal-screen");
        assert_eq!(Screen::Celebration.element_id(), "celebration-screen");
    }

    #[test]
    fn test_meter_width() {
        assert_eq!(meter_width(0.0), "0%");
        assert_eq!(meter_width(100.0), "100%");
    }

    #[test]
    fn test_button_larger_than_viewport_pins_to_corner() {
        let mut rng = Pcg32::seed_from_u64(1);
        let pos = evasive_position(&mut rng, Viewport::new(50.0, 50.0), 80.0, 80.0);
        assert_eq!(pos, (0.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_button_stays_visible(
            seed in any::<u64>(),
            vw in 200.0f32..3000.0,
            vh in 200.0f32..3000.0,
            bw in 10.0f32..150.0,
            bh in 10.0f32..80.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let (x, y) = evasive_position(&mut rng, Viewport::new(vw, vh), bw, bh);
            prop_assert!(x >= 0.0 && x <= vw - bw);
            prop_assert!(y >= 0.0 && y <= vh - bh);
        }
    }
}
