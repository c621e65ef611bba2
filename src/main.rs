//! Space Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use space_shooter::GameConfig;
    use space_shooter::audio::AudioManager;
    use space_shooter::consts::*;
    use space_shooter::cue::CueSink;
    use space_shooter::hud::{Hud, HudView};
    use space_shooter::input::{Action, InputSampler, Source};
    use space_shooter::renderer::{RenderState, scene};
    use space_shooter::settings::Settings;
    use space_shooter::sim::{GamePhase, GameState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        sampler: InputSampler,
        audio: AudioManager,
        hud: Hud,
        settings: Settings,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, config: GameConfig, document: Document) -> Self {
            Self {
                state: GameState::with_tuning(seed, config.tuning),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                sampler: InputSampler::new(),
                audio: AudioManager::new(config.settings.clone()),
                hud: Hud::new(document),
                settings: config.settings,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.sampler.sample();
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                for event in self.state.take_events() {
                    self.audio.play_event(&event);
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
            if self.settings.show_fps && self.frame_index == 0 {
                log::info!("FPS: {}", self.fps);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene::build(&self.state);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            self.hud.apply(HudView::from_state(&self.state));
        }

        /// Queue a press from a UI gesture (also unlocks audio)
        fn press(&mut self, action: Action, source: Source) {
            self.audio.resume();
            self.sampler.press(action, source);
        }
    }

    /// Read the optional embedded `{ "tuning": ..., "settings": ... }` block
    fn read_config(document: &Document) -> GameConfig {
        match document
            .get_element_by_id("game-config")
            .and_then(|el| el.text_content())
        {
            Some(json) => GameConfig::from_json_or_default(&json),
            None => GameConfig::default(),
        }
    }

    /// Size the canvas backing store to its CSS size times the pixel ratio
    fn fit_canvas(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    async fn init_renderer(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
        play_size: (f32, f32),
    ) -> Result<RenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| format!("Failed to create surface: {e}"))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("Failed to get adapter: {e}"))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, play_size)
            .await
            .map_err(|e| format!("Failed to create device: {e}"))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Space Shooter starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no #gameCanvas element"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("#gameCanvas is not a canvas"))?;

        let (width, height) = fit_canvas(&canvas);

        // Initialize game
        let config = read_config(&document);
        let play_size = (config.tuning.play_width, config.tuning.play_height);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, config, document.clone())));

        log::info!("Game initialized with seed: {}", seed);

        // Without a GPU the game still runs; only the canvas stays blank
        match init_renderer(canvas.clone(), width, height, play_size).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("{e}; running without rendering"),
        }

        setup_keyboard(&window, game.clone());
        setup_touch_buttons(&document, game.clone());
        setup_menu_buttons(&document, game.clone());
        setup_auto_pause(&window, &document, game.clone());
        setup_resize(&window, canvas, game.clone());

        game.borrow_mut().update_hud();

        // Start game loop
        request_animation_frame(game);

        log::info!("Space Shooter running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(action) = Action::from_key_code(&event.code()) else {
                    return;
                };
                event.prevent_default();
                // Held keys are already tracked; repeats would re-toggle pause
                if event.repeat() {
                    return;
                }
                game.borrow_mut().press(action, Source::Keyboard);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = Action::from_key_code(&event.code()) {
                    game.borrow_mut().sampler.release(action, Source::Keyboard);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen left/right/fire buttons for touch devices
    fn setup_touch_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for (id, action) in [
            ("leftBtn", Action::MoveLeft),
            ("rightBtn", Action::MoveRight),
            ("fireBtn", Action::Fire),
        ] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    game.borrow_mut().press(action, Source::Pointer);
                });
                let _ = btn
                    .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            for release in ["pointerup", "pointerleave", "pointercancel"] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                    game.borrow_mut().sampler.release(action, Source::Pointer);
                });
                let _ = btn.add_event_listener_with_callback(release, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_menu_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for (id, action) in [
            ("playButton", Action::Start),
            ("restartButton", Action::Restart),
            ("pauseButton", Action::Pause),
        ] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().press(action, Source::Pointer);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        fn focus_lost(g: &mut Game, reason: &str) {
            g.sampler.release_all();
            let active = matches!(g.state.phase, GamePhase::Running | GamePhase::Countdown);
            if g.settings.pause_on_blur {
                g.sampler.suspend();
                if active {
                    log::info!("Auto-paused ({reason})");
                }
            }
        }

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    focus_lost(&mut game.borrow_mut(), "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                focus_lost(&mut game.borrow_mut(), "window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = fit_canvas(&canvas);
            if let Some(ref mut render_state) = game.borrow_mut().render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
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
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    let result = wasm_game::run().await;
    if let Err(ref e) = result {
        log::error!("Startup failed: {:?}", e);
    }
    result
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Space Shooter (native) starting...");
    log::info!("Native mode runs a headless autopilot session - run with `trunk serve` for the web version");

    let config = native::load_config(std::env::args().nth(1));
    let seed = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(native::DEMO_SEED);

    let report = native::run_autopilot(seed, config);
    println!(
        "Autopilot session (seed {}): score {}, {} ticks, {} cues{}",
        seed,
        report.score,
        report.ticks,
        report.cues,
        if report.game_over { "" } else { " (time limit reached)" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use space_shooter::GameConfig;
    use space_shooter::consts::SIM_HZ;
    use space_shooter::cue::{CueSink, LogSink};
    use space_shooter::sim::{GamePhase, GameState, TickInput, tick};

    pub const DEMO_SEED: u64 = 0x5EED;
    /// Five simulated minutes
    const MAX_TICKS: u64 = 5 * 60 * SIM_HZ as u64;

    pub struct Report {
        pub score: u32,
        pub ticks: u64,
        pub cues: u64,
        pub game_over: bool,
    }

    /// Read a JSON config file; a missing or bad file falls back to defaults
    pub fn load_config(path: Option<String>) -> GameConfig {
        let Some(path) = path else {
            return GameConfig::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => GameConfig::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Cannot read {path}: {e}; using default config");
                GameConfig::default()
            }
        }
    }

    pub fn run_autopilot(seed: u64, config: GameConfig) -> Report {
        let mut state = GameState::with_tuning(seed, config.tuning);
        let mut sink = LogSink::new();

        let mut input = TickInput {
            start: true,
            autopilot: true,
            ..TickInput::default()
        };

        let mut ticks = 0;
        while ticks < MAX_TICKS && state.phase != GamePhase::GameOver {
            tick(&mut state, &input);
            input.start = false;
            for event in state.take_events() {
                sink.play_event(&event);
            }
            ticks += 1;
        }

        Report {
            score: state.score,
            ticks: state.time_ticks,
            cues: sink.played(),
            game_over: state.phase == GamePhase::GameOver,
        }
    }
}
