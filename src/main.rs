//! Penguin Trek entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, PointerEvent};

    use penguin_trek::Settings;
    use penguin_trek::audio::AudioManager;
    use penguin_trek::report::{PlayFunReporter, relay_events};
    use penguin_trek::sim::{GameEvent, Trek};

    /// Longest frame we simulate in one tick (tab switches, debugger pauses)
    const MAX_FRAME_MS: f32 = 100.0;

    /// Game instance holding all state
    struct Game {
        trek: Trek,
        audio: AudioManager,
        reporter: PlayFunReporter,
        settings: Settings,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                trek: Trek::new(seed),
                audio: AudioManager::new(settings.muted),
                reporter: PlayFunReporter::new(),
                settings,
                last_time: 0.0,
            }
        }

        /// Run one simulation tick and fan the events out
        fn update(&mut self, delta_ms: f32) {
            self.trek.tick(delta_ms.min(MAX_FRAME_MS));
            self.dispatch();
        }

        /// Deliver queued events to audio, telemetry and the DOM
        fn dispatch(&mut self) {
            let events = self.trek.drain_events();
            for event in &events {
                self.audio.handle(*event);
                if let GameEvent::GameOver { score } = event {
                    show_game_over(*score, self.trek.state.best_score.floor() as u64);
                }
            }
            relay_events(&mut self.reporter, &events);
        }

        fn start(&mut self) {
            self.trek.start();
            self.dispatch();
            set_class("game-over", "hidden");
        }

        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_mute();
            self.settings.save();
            self.audio.set_muted(muted);
            log::info!("Muted: {}", muted);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let snapshot = self.trek.snapshot();
            set_text("hud-warmth", &format!("{}%", snapshot.warmth.floor() as i32));
            set_text("hud-distance", &format!("{}m", snapshot.score.floor() as u64));
            set_text("hud-best", &format!("{}m", snapshot.best_score.floor() as u64));
            set_text("hud-wind", if snapshot.is_windy { "WINDY!" } else { "" });
            set_class(
                "hud-warmth",
                if snapshot.warmth < 25.0 { "hud-value warn" } else { "hud-value" },
            );
        }
    }

    fn set_text(id: &str, text: &str) {
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(id: &str, class: &str) {
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute("class", class);
        }
    }

    fn show_game_over(score: u64, best: u64) {
        set_text("final-score", &format!("{}m", score));
        set_text("final-best", &format!("{}m", best));
        set_class("game-over", "");
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Penguin Trek starting...");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());

        game.borrow_mut().start();
        request_animation_frame(game);

        log::info!("Penguin Trek running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Pointer down: huddle (first press also unlocks audio)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut g = game.borrow_mut();
                g.audio.init();
                g.trek.huddle_start();
                g.dispatch();
            });
            let _ = window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up: walk on
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut g = game.borrow_mut();
                g.trek.huddle_end();
                g.dispatch();
            });
            let _ = window
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: M toggles mute
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let "m" | "M" = event.key().as_str() {
                    game.borrow_mut().toggle_mute();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().and_then(|w| w.document());
        let Some(btn) = document.and_then(|d| d.get_element_by_id("restart-btn")) else {
            log::warn!("No restart button in page");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            // Keep the click from also reaching the huddle handlers
            event.stop_propagation();
            game.borrow_mut().start();
            log::info!("Trek restarted");
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let delta_ms = if g.last_time > 0.0 {
                (time - g.last_time) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(delta_ms);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Headless trek with a simple huddle policy, for balance checks
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use penguin_trek::sim::{GameEvent, Trek};

    env_logger::init();
    log::info!("Penguin Trek (native) starting...");
    log::info!("Native mode runs a scripted trek - serve the wasm build to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);

    const FRAME_MS: f32 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    let mut trek = Trek::new(seed);
    trek.start();

    let mut gusts = 0u32;
    let mut steps = 0u32;
    for _ in 0..MAX_FRAMES {
        // Huddle when cold or when the wind is up, walk once warm again
        let snapshot = trek.snapshot();
        if !snapshot.is_huddling && (snapshot.warmth < 30.0 || snapshot.is_windy) {
            trek.huddle_start();
        } else if snapshot.is_huddling && snapshot.warmth > 90.0 && !snapshot.is_windy {
            trek.huddle_end();
        }

        trek.tick(FRAME_MS);
        for event in trek.drain_events() {
            match event {
                GameEvent::WindStarted { duration_ms } => {
                    gusts += 1;
                    log::debug!("Gust #{} for {} ms", gusts, duration_ms);
                }
                GameEvent::Step => steps += 1,
                GameEvent::GameOver { score } => log::info!("Froze at {}m", score),
                _ => {}
            }
        }
        if trek.state.game_over {
            break;
        }
    }

    let snapshot = trek.snapshot();
    println!(
        "seed {}: distance {}m, warmth {:.0}%, {} gusts, {} steps{}",
        seed,
        snapshot.score.floor() as u64,
        snapshot.warmth,
        gusts,
        steps,
        if snapshot.game_over { " (frozen)" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
