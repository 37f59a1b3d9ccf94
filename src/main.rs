//! Flappy Spark entry point
//!
//! Web: wires tap input, resize and the animation frame clock, and hands a
//! JSON snapshot to the page's renderer every frame.
//! Native: runs a headless demo where the autopilot plays a few rounds.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, PointerEvent};

    use flappy_spark::platform::AnimationFrameClock;
    use flappy_spark::sim::{GameController, Viewport};

    // Renderer hook: the page defines `window.renderSpark(snapshot)`
    #[wasm_bindgen(inline_js = "
        export function present_snapshot(json) {
            if (typeof window.renderSpark === 'function') {
                window.renderSpark(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn present_snapshot(json: &str);
    }

    type WebGame = GameController<AnimationFrameClock>;

    /// Current window size as a viewport
    fn window_viewport() -> Viewport {
        let Some(window) = web_sys::window() else {
            return Viewport::default();
        };
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
        match (dim(window.inner_width()), dim(window.inner_height())) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Viewport::new(w as f32, h as f32),
            _ => Viewport::default(),
        }
    }

    /// Push the current frame to the page and flush feedback events
    fn present(game: &mut WebGame) {
        for event in game.drain_events() {
            log::debug!("{:?}", event);
        }
        match serde_json::to_string(&game.snapshot()) {
            Ok(json) => present_snapshot(&json),
            Err(e) => log::warn!("Snapshot serialization failed: {}", e),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Flappy Spark starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(WebGame::new(
            window_viewport(),
            seed,
            AnimationFrameClock::new(),
        )));

        {
            let weak = Rc::downgrade(&game);
            game.borrow().clock().set_on_frame(move |now| {
                if let Some(game) = weak.upgrade() {
                    let mut g = game.borrow_mut();
                    g.on_frame_tick(now);
                    present(&mut g);
                }
            });
        }

        setup_input(game.clone());
        setup_resize(game.clone());
        present(&mut game.borrow_mut());

        // The game lives as long as the page
        std::mem::forget(game);
    }

    fn tap(game: &Rc<RefCell<WebGame>>) {
        let mut g = game.borrow_mut();
        g.tap();
        present(&mut g);
    }

    fn setup_input(game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Touch, mouse and pen all arrive as pointer events
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                tap(&game);
            });
            let _ = window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                if matches!(event.code().as_str(), "Space" | "ArrowUp" | "Enter") {
                    event.prevent_default();
                    tap(&game);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.resize(window_viewport());
            present(&mut g);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use flappy_spark::Settings;
    use flappy_spark::sim::GameController;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Flappy Spark (native) starting...");
    log::info!("Native mode is headless - the autopilot plays a few rounds");

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(path.as_deref());
    let seed = settings.seed.unwrap_or_else(clock_seed);

    let mut game = GameController::manual(settings.viewport, seed);
    run_demo(&mut game, &settings);

    println!("\nSession scoreboard (seed {}):", seed);
    let scores = game.state().scores();
    if scores.entries().is_empty() {
        println!("  no pipes cleared in {} runs", scores.runs());
    }
    for (rank, entry) in scores.entries().iter().enumerate() {
        println!(
            "  #{:<2} {:>4} pipes  {:>6.1}s",
            rank + 1,
            entry.score,
            entry.duration_secs
        );
    }
    println!("Best: {}", scores.best());
}

#[cfg(not(target_arch = "wasm32"))]
fn run_demo(game: &mut flappy_spark::sim::GameController, settings: &flappy_spark::Settings) {
    use flappy_spark::sim::{GamePhase, autopilot_should_tap};

    let frame_ms = settings.demo_frame_ms();
    let mut now = 0.0;

    for run in 1..=settings.demo_runs {
        // Launch from Waiting
        game.tap_at(now);

        let mut frames = 0;
        while game.phase() == GamePhase::Playing && frames < settings.demo_frames {
            now += frame_ms;
            game.on_frame_tick(now);
            if game.phase() == GamePhase::Playing && autopilot_should_tap(game.state()) {
                game.tap();
            }
            frames += 1;
        }

        for event in game.drain_events() {
            log::debug!("{:?}", event);
        }

        if game.phase() == GamePhase::Playing {
            log::info!(
                "Run {} still alive after {} frames with score {}, stopping",
                run,
                frames,
                game.state().score()
            );
            break;
        }

        log::info!("Run {} over after {} frames", run, frames);
        // Back to Waiting for the next launch
        game.tap();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
