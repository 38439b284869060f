//! Audio: background music toggle and a procedural catch chime
//!
//! The toggle's label/state logic is pure (`MusicToggle`); the browser side
//! wires it to an `<audio>` element and button. Every playback request is
//! best effort: a rejected `play()` only changes the label.

/// Toggle button labels
pub const LABEL_PLAY: &str = "▶ Play Music";
pub const LABEL_PAUSE: &str = "⏸ Pause Music";
pub const LABEL_RETRY: &str = "Click again to play ♪";

/// What the caller should do to the media element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicAction {
    Play,
    Pause,
    Nothing,
}

/// Who asked for playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaySource {
    /// The music button
    Toggle,
    /// First click anywhere on the page
    Autoplay,
}

/// Music button state machine
#[derive(Debug, Clone)]
pub struct MusicToggle {
    playing: bool,
    interacted: bool,
    label: &'static str,
}

impl Default for MusicToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl MusicToggle {
    pub fn new() -> Self {
        Self {
            playing: false,
            interacted: false,
            label: LABEL_PLAY,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Music button clicked
    pub fn toggle(&mut self) -> MusicAction {
        if self.playing {
            self.playing = false;
            self.label = LABEL_PLAY;
            MusicAction::Pause
        } else {
            // Optimistic; `play_finished` corrects on rejection
            self.playing = true;
            MusicAction::Play
        }
    }

    /// Any click on the page. Only the first one may start music.
    pub fn page_clicked(&mut self, media_paused: bool) -> MusicAction {
        if self.interacted || self.playing || !media_paused {
            return MusicAction::Nothing;
        }
        self.interacted = true;
        MusicAction::Play
    }

    /// Result of a `play()` request
    pub fn play_finished(&mut self, source: PlaySource, ok: bool) {
        match (source, ok) {
            (_, true) => {
                self.playing = true;
                self.label = LABEL_PAUSE;
            }
            (PlaySource::Toggle, false) => {
                self.playing = false;
                self.label = LABEL_RETRY;
            }
            // Silent: the user never asked for music
            (PlaySource::Autoplay, false) => {}
        }
    }

    /// Page became hidden
    pub fn hidden(&mut self) -> MusicAction {
        if !self.playing {
            return MusicAction::Nothing;
        }
        self.playing = false;
        self.label = LABEL_PLAY;
        MusicAction::Pause
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{Chime, install_music};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, HtmlElement, OscillatorNode, OscillatorType};

    use super::{MusicAction, MusicToggle, PlaySource};
    use crate::ui::ids;

    struct Music {
        element: HtmlAudioElement,
        button: HtmlElement,
        volume: f64,
        toggle: RefCell<MusicToggle>,
    }

    impl Music {
        fn apply(music: &Rc<Self>, action: MusicAction, source: PlaySource) {
            match action {
                MusicAction::Play => Self::play(music, source),
                MusicAction::Pause => {
                    let _ = music.element.pause();
                }
                MusicAction::Nothing => {}
            }
            music.refresh_label();
        }

        fn play(music: &Rc<Self>, source: PlaySource) {
            music.element.set_volume(music.volume);
            let promise = match music.element.play() {
                Ok(p) => p,
                Err(e) => {
                    log::info!("Playback failed: {:?}", e);
                    music.toggle.borrow_mut().play_finished(source, false);
                    return;
                }
            };
            let music = music.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let ok = match JsFuture::from(promise).await {
                    Ok(_) => true,
                    Err(e) => {
                        // Autoplay policy rejections are expected before any gesture
                        log::info!("Playback failed (normal on first load): {:?}", e);
                        false
                    }
                };
                music.toggle.borrow_mut().play_finished(source, ok);
                music.refresh_label();
            });
        }

        fn refresh_label(&self) {
            self.button.set_inner_html(self.toggle.borrow().label());
        }
    }

    /// Wire the music button, first-interaction autoplay and pause-on-hide.
    ///
    /// Returns false (music disabled) when the page lacks the elements.
    pub fn install_music(volume: f64) -> bool {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return false;
        };
        let element = document
            .get_element_by_id(ids::MUSIC)
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
        let button = document
            .get_element_by_id(ids::MUSIC_BTN)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let (Some(element), Some(button)) = (element, button) else {
            log::warn!(
                "Music elements not found. Check IDs: {} and {}",
                ids::MUSIC,
                ids::MUSIC_BTN
            );
            return false;
        };

        let music = Rc::new(Music {
            element,
            button,
            volume,
            toggle: RefCell::new(MusicToggle::new()),
        });

        // Toggle button
        {
            let toggled = music.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let action = toggled.toggle.borrow_mut().toggle();
                Music::apply(&toggled, action, PlaySource::Toggle);
            });
            let _ = music
                .button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // First interaction anywhere (mobile browsers block autoplay until then)
        if let Some(body) = document.body() {
            let music = music.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let paused = music.element.paused();
                let action = music.toggle.borrow_mut().page_clicked(paused);
                if action != MusicAction::Nothing {
                    Music::apply(&music, action, PlaySource::Autoplay);
                }
            });
            let _ = body.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pause when the tab is hidden
        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let action = music.toggle.borrow_mut().hidden();
                    if action != MusicAction::Nothing {
                        log::info!("Music paused (tab hidden)");
                        Music::apply(&music, action, PlaySource::Toggle);
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        true
    }

    /// Short rising blip played on each catch
    pub struct Chime {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Chime {
        pub fn new(volume: f32) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - chime disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Pitch climbs with the meter so the last catches sound brighter
        pub fn play(&self, meter_fraction: f32) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let base = 660.0 + 440.0 * meter_fraction.clamp(0.0, 1.0);
            let Some((osc, gain)) = Self::create_osc(ctx, base, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(self.volume * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.18)
                .ok();
            osc.frequency().set_value_at_time(base, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(base * 1.5, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_play_then_pause() {
        let mut music = MusicToggle::new();
        assert_eq!(music.label(), LABEL_PLAY);
        assert_eq!(music.toggle(), MusicAction::Play);
        music.play_finished(PlaySource::Toggle, true);
        assert_eq!(music.label(), LABEL_PAUSE);
        assert!(music.is_playing());
        assert_eq!(music.toggle(), MusicAction::Pause);
        assert_eq!(music.label(), LABEL_PLAY);
        assert!(!music.is_playing());
    }

    #[test]
    fn test_rejected_toggle_asks_to_retry() {
        let mut music = MusicToggle::new();
        music.toggle();
        music.play_finished(PlaySource::Toggle, false);
        assert_eq!(music.label(), LABEL_RETRY);
        assert!(!music.is_playing());
        // Next click tries again rather than pausing
        assert_eq!(music.toggle(), MusicAction::Play);
    }

    #[test]
    fn test_autoplay_only_once() {
        let mut music = MusicToggle::new();
        assert_eq!(music.page_clicked(true), MusicAction::Play);
        music.play_finished(PlaySource::Autoplay, false);
        assert_eq!(music.label(), LABEL_PLAY);
        assert_eq!(music.page_clicked(true), MusicAction::Nothing);
    }

    #[test]
    fn test_autoplay_skipped_when_already_playing() {
        let mut music = MusicToggle::new();
        music.toggle();
        assert_eq!(music.page_clicked(true), MusicAction::Nothing);
        let mut music = MusicToggle::new();
        assert_eq!(music.page_clicked(false), MusicAction::Nothing);
    }

    #[test]
    fn test_autoplay_success_updates_label() {
        let mut music = MusicToggle::new();
        music.page_clicked(true);
        music.play_finished(PlaySource::Autoplay, true);
        assert!(music.is_playing());
        assert_eq!(music.label(), LABEL_PAUSE);
    }

    #[test]
    fn test_hidden_pauses_only_when_playing() {
        let mut music = MusicToggle::new();
        assert_eq!(music.hidden(), MusicAction::Nothing);
        music.toggle();
        music.play_finished(PlaySource::Toggle, true);
        assert_eq!(music.hidden(), MusicAction::Pause);
        assert!(!music.is_playing());
    }
}
