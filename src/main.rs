//! Heart Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use heart_catch::GameConfig;
    use heart_catch::audio::{Chime, install_music};
    use heart_catch::consts::CHIME_VOLUME;
    use heart_catch::platform::LoopHandle;
    use heart_catch::renderer::CanvasRenderer;
    use heart_catch::sim::{GameEvent, GameState, TickInput, Viewport, tick};
    use heart_catch::ui::{self, Screen, ids};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        input: TickInput,
        chime: Option<Chime>,
        frame_loop: LoopHandle,
        /// UI-only randomness (decline button), kept apart from the sim RNG
        ui_rng: Pcg32,
    }

    impl Game {
        /// Run one simulation tick and react to its events
        fn update(&mut self) {
            let input = self.input.clone();
            tick(&mut self.state, &input);
            // Pointer position is one-shot
            self.input.pointer_x = None;

            for event in self.state.take_events() {
                match event {
                    GameEvent::HeartCaught { .. } => {
                        let percent = self.state.meter_percent();
                        ui::set_meter(percent);
                        if let Some(chime) = &self.chime {
                            chime.play(percent / 100.0);
                        }
                    }
                    GameEvent::HeartMissed => {}
                    GameEvent::ProposalTriggered => {
                        schedule_reveal(self.state.config.reveal_delay_ms);
                    }
                }
            }
        }

        fn render(&self) {
            self.renderer.render(&self.state);
        }

        /// Track the window size
        fn resize(&mut self) {
            let viewport = window_viewport();
            self.renderer
                .resize(viewport.width as u32, viewport.height as u32);
            self.state.resize(viewport);
        }

        /// Start or restart a round
        fn restart(&mut self) {
            self.resize();
            self.state.start();
            self.input = TickInput::default();
            ui::set_meter(self.state.meter_percent());
            ui::hide_screen(Screen::Start);
            ui::hide_screen(Screen::Proposal);
            ui::hide_screen(Screen::Celebration);
        }
    }

    fn window_viewport() -> Viewport {
        let window = web_sys::window().unwrap();
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        Viewport::new(width as f32, height as f32)
    }

    /// Show the proposal after a fire-and-forget delay
    fn schedule_reveal(delay_ms: u32) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move || {
            log::info!("Revealing proposal");
            ui::show_screen(Screen::Proposal);
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms as i32,
        );
        closure.forget();
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Heart Catch starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(ids::CANVAS)
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let config = GameConfig::load();
        let chime = config.sfx.then(|| Chime::new(CHIME_VOLUME));
        let music_enabled = install_music(config.music_volume);

        let seed = js_sys::Date::now() as u64;
        let viewport = window_viewport();
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, viewport, config),
            renderer: CanvasRenderer::new(canvas)?,
            input: TickInput::default(),
            chime,
            frame_loop: LoopHandle::new(),
            ui_rng: Pcg32::seed_from_u64(seed.rotate_left(32)),
        }));
        game.borrow_mut().resize();

        log::info!("Game initialized with seed: {} (music: {})", seed, music_enabled);

        setup_resize_handler(game.clone());
        setup_input_handlers(game.clone());
        setup_buttons(game.clone());

        // Start the perpetual frame loop; only the Playing phase simulates
        game.borrow().frame_loop.start();
        request_animation_frame(game);

        log::info!("Heart Catch running!");
        Ok(())
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Mouse move - center basket on the pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.pointer_x = Some(event.client_x() as f32);
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move - non-passive so the page does not scroll
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().input.pointer_x = Some(touch.client_x() as f32);
                }
            });
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        // Keyboard steering
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.steer = -1.0,
                    "ArrowRight" | "d" | "D" => g.input.steer = 1.0,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let released = match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => -1.0,
                    "ArrowRight" | "d" | "D" => 1.0,
                    _ => return,
                };
                if g.input.steer == released {
                    g.input.steer = 0.0;
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Start
        if let Some(btn) = document.get_element_by_id(ids::START_BTN) {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
                let frame_loop = game.borrow().frame_loop.clone();
                if !frame_loop.is_running() {
                    frame_loop.start();
                    request_animation_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("Start button #{} not found", ids::START_BTN);
        }

        // Yes
        if let Some(btn) = document.get_element_by_id(ids::YES_BTN) {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if game.borrow_mut().state.accept() {
                    ui::hide_screen(Screen::Proposal);
                    ui::show_screen(Screen::Celebration);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // No - runs away on hover or touch
        if let Some(btn) = document.get_element_by_id(ids::NO_BTN) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (w, h) = ui::element_size(ids::NO_BTN).unwrap_or((0.0, 0.0));
                let viewport = window_viewport();
                let mut g = game.borrow_mut();
                let (x, y) = ui::evasive_position(&mut g.ui_rng, viewport, w, h);
                ui::move_button(ids::NO_BTN, x, y);
            });
            for kind in ["mouseover", "touchstart"] {
                let _ = btn.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_going = {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.frame_loop.frame_done()
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Heart Catch (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let config_path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let config = heart_catch::GameConfig::load_from(config_path.as_deref());
    headless::run(config);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use heart_catch::GameConfig;
    use heart_catch::platform::LoopHandle;
    use heart_catch::sim::{GameEvent, GamePhase, GameState, TickInput, Viewport, tick};

    /// Give up if the auto-pilot cannot finish within this many frames
    const MAX_FRAMES: u64 = 200_000;
    /// Frames to keep running after the proposal so the last burst fades out
    const WIND_DOWN_FRAMES: u64 = 60;

    /// Steer under the lowest heart
    fn autopilot(state: &GameState) -> TickInput {
        let target = state
            .hearts
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|h| h.pos.x);
        TickInput {
            pointer_x: target,
            ..Default::default()
        }
    }

    pub fn run(config: GameConfig) {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        log::info!("Game initialized with seed: {}", seed);

        let mut state = GameState::new(seed, Viewport::new(800.0, 600.0), config);
        state.start();

        let frame_loop = LoopHandle::new();
        frame_loop.start();
        let mut misses = 0u32;
        let mut proposed_at = None;

        loop {
            let input = autopilot(&state);
            tick(&mut state, &input);

            for event in state.take_events() {
                match event {
                    GameEvent::HeartCaught { pos } => log::info!(
                        "Caught at ({:.0}, {:.0}) - meter {:.0}%",
                        pos.x,
                        pos.y,
                        state.meter_percent()
                    ),
                    GameEvent::HeartMissed => misses += 1,
                    GameEvent::ProposalTriggered => {
                        log::info!("Will you be my Valentine?");
                        proposed_at = Some(frame_loop.frames());
                    }
                }
            }

            if let Some(at) = proposed_at {
                if frame_loop.frames() >= at + WIND_DOWN_FRAMES {
                    frame_loop.stop();
                }
            } else if frame_loop.frames() >= MAX_FRAMES {
                log::warn!("Auto-pilot gave up after {} frames", MAX_FRAMES);
                frame_loop.stop();
            }

            if !frame_loop.frame_done() {
                break;
            }
        }

        if state.phase == GamePhase::Proposal && state.accept() {
            log::info!("Celebrating!");
        }
        log::info!(
            "Finished in {} frames: score {}, {} missed, {} particles left",
            frame_loop.frames(),
            state.score,
            misses,
            state.particles.len()
        );
    }
}
