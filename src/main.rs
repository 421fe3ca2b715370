//! Road Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use road_rush::Settings;
    use road_rush::audio::AudioDirector;
    use road_rush::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use road_rush::renderer::{Context2dCanvas, draw_frame};
    use road_rush::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        canvas: Context2dCanvas,
        audio: AudioDirector,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64, canvas: Context2dCanvas, audio: AudioDirector) -> Self {
            Self {
                state: GameState::new(seed),
                canvas,
                audio,
                input: TickInput::default(),
            }
        }

        /// One animation tick: simulate, react to events, draw
        fn frame(&mut self) {
            let input = self.input.clone();
            let events = tick(&mut self.state, &input);

            // One-shot inputs are consumed by exactly one tick
            self.input.start = false;
            self.input.cycle_weather = false;

            for event in &events {
                if matches!(event, GameEvent::Crashed) {
                    self.audio.play_crash();
                }
            }

            // Engine loop runs exactly while playing; paused otherwise
            self.audio
                .set_engine_running(self.state.phase == GamePhase::Playing);

            draw_frame(&self.state, &mut self.canvas);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Road Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fixed logical surface
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::default().sanitized();
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            Context2dCanvas::new(&canvas)?,
            AudioDirector::new(&settings),
        )));

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        request_animation_frame(game);

        log::info!("Road Rush running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down: held keys plus one-shot triggers
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowUp" | "w" => g.input.accelerate = true,
                    "ArrowDown" | "s" => g.input.reverse = true,
                    "ArrowLeft" | "a" => g.input.steer_left = true,
                    "ArrowRight" | "d" => g.input.steer_right = true,
                    " " => {
                        g.input.start = true;
                        // User gesture: safe point to unlock the audio context
                        g.audio.resume();
                    }
                    "t" => g.input.cycle_weather = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: release held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowUp" | "w" => g.input.accelerate = false,
                    "ArrowDown" | "s" => g.input.reverse = false,
                    "ArrowLeft" | "a" => g.input.steer_left = false,
                    "ArrowRight" | "d" => g.input.steer_right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
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

    /// Exactly one controller tick per animation callback
    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
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
    log::info!("Road Rush (native) starting...");
    log::info!("The playable build targets wasm32 in a browser; running a headless demo.");

    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted full-throttle run against the recording backend
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use road_rush::renderer::{RecordingCanvas, draw_frame};
    use road_rush::sim::{GamePhase, GameState, TickInput, tick};

    let mut state = GameState::new(0x524F_4144);
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
    );

    let drive = TickInput {
        accelerate: true,
        ..Default::default()
    };
    let mut frames = 0u32;
    while state.phase == GamePhase::Playing && frames < 3600 {
        tick(&mut state, &drive);
        frames += 1;
    }

    let mut canvas = RecordingCanvas::new();
    draw_frame(&state, &mut canvas);

    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string(&state) {
            Ok(json) => log::debug!("Final state: {json}"),
            Err(e) => log::warn!("State dump failed: {e}"),
        }
    }

    println!(
        "Demo over after {} frames: score {}, level {}, {} obstacles on screen, {} draw calls in the final frame",
        frames,
        state.score,
        state.level,
        state.obstacles.len(),
        canvas.calls.len()
    );
}
