//! Traffic Signs entry point
//!
//! Handles platform-specific initialization and runs the simulation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use traffic_signs::Settings;
    use traffic_signs::audio::WebAudio;
    use traffic_signs::platform::{FixedStep, InputLatch, Key};
    use traffic_signs::renderer::{RenderState, build_scene};
    use traffic_signs::sim::{SimulationState, tick};

    /// Simulation instance holding all state
    struct Game {
        state: SimulationState,
        render_state: Option<RenderState>,
        clock: FixedStep,
        latch: InputLatch,
        audio: WebAudio,
        last_time: f64,
        audio_resumed: bool,
        running: bool,
    }

    impl Game {
        fn new(seed: u64, settings: &Settings) -> Self {
            let tuning = settings.tuning();
            let clock = FixedStep::new(tuning.tick_rate);
            Self {
                state: SimulationState::new(seed, tuning),
                render_state: None,
                clock,
                latch: InputLatch::default(),
                audio: WebAudio::new(settings.effective_volume()),
                last_time: 0.0,
                audio_resumed: false,
                running: true,
            }
        }

        /// Run the simulation ticks owed for this frame
        fn update(&mut self, frame_ms: f64) {
            let steps = self.clock.advance(frame_ms);
            for _ in 0..steps {
                let now_ms = self.clock.complete_step();
                let input = self.latch.take(now_ms);
                tick(&mut self.state, &input, &mut self.audio);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.state);
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
        fn update_hud(&self, document: &Document) {
            let set_text = |id: &str, text: &str| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            };
            let set_visible = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let class = if visible { "hud-item" } else { "hud-item hidden" };
                    let _ = el.set_attribute("class", class);
                }
            };

            set_text(
                "hud-speed",
                &format!("Speed: {} km/h", self.state.display_speed()),
            );
            set_text(
                "hud-limit",
                &format!("Speed Limit: {} km/h", self.state.speed_limit),
            );
            set_visible("hud-no-horn", self.state.no_horn_zone);
            set_visible("hud-overspeed", self.state.overspeeding);
            set_visible("hud-horn-warning", self.state.horn_warning_active());
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Traffic Signs starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let query = window.location().search().unwrap_or_default();
        let settings = Settings::from_query(&query).unwrap_or_else(|e| {
            log::warn!("Bad settings in URL ({e}), using defaults");
            Settings::default()
        });

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = settings
            .seed
            .unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, &settings)));

        log::info!(
            "Simulation initialized: variant {}, seed {}",
            settings.variant,
            seed
        );

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Traffic Signs running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom_key(&event.key()) else {
                    return;
                };
                event.prevent_default();
                let mut g = game.borrow_mut();

                // Browsers only allow audio after a user gesture
                if !g.audio_resumed {
                    g.audio.resume();
                    g.audio_resumed = true;
                }
                // Auto-repeat would re-trigger the horn
                if key == Key::Horn && event.repeat() {
                    return;
                }
                g.latch.key_down(key);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    game.borrow_mut().latch.key_up(key);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur (keyup events are lost while unfocused)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().latch.release_all();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
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
            let frame_ms = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                g.clock.step_ms()
            };
            g.last_time = time;

            g.update(frame_ms);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }

            if g.latch.quit_requested() {
                g.running = false;
                log::info!(
                    "Quit after {} ticks ({} ms simulated)",
                    g.state.time_ticks,
                    g.clock.now_ms()
                );
            }
            if !g.running {
                return;
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use traffic_signs::Settings;
    use traffic_signs::audio::LogAudio;
    use traffic_signs::platform::FixedStep;
    use traffic_signs::sim::{Autopilot, SimulationState, tick};

    env_logger::init();
    log::info!("Traffic Signs (native, headless) starting...");

    let settings = Settings::from_env().unwrap_or_else(|e| {
        log::error!("Invalid settings ({e}), using defaults");
        Settings::default()
    });
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });

    let mut state = SimulationState::new(seed, settings.tuning());
    let tick_rate = state.tuning.tick_rate;
    let mut clock = FixedStep::new(tick_rate);
    let mut audio = LogAudio::new(settings.muted);
    let autopilot = Autopilot::default();
    let pace = Duration::from_secs_f64(state.tuning.tick_ms() / 1000.0);
    let total_ticks = settings.run_seconds as u64 * tick_rate as u64;

    log::info!(
        "Variant {}, seed {}, {} Hz, running {} s",
        settings.variant,
        seed,
        tick_rate,
        settings.run_seconds
    );

    let mut signs_seen = 0usize;
    while clock.steps() < total_ticks {
        let now_ms = clock.complete_step();
        let input = autopilot.input(&state, now_ms);
        let before = state.last_sign_spawn_ms;
        tick(&mut state, &input, &mut audio);
        if state.last_sign_spawn_ms != before {
            signs_seen += 1;
        }

        if state.time_ticks % tick_rate as u64 == 0 {
            log::info!(
                "t={:>3}s speed {:>3} km/h limit {:>3}{}{}{}",
                now_ms / 1000,
                state.display_speed(),
                state.speed_limit,
                if state.no_horn_zone { " [no horn]" } else { "" },
                if state.overspeeding { " OVERSPEEDING" } else { "" },
                if state.horn_warning_active() {
                    " HORN WARNING"
                } else {
                    ""
                },
            );
        }

        std::thread::sleep(pace);
    }

    log::info!(
        "Done: {} ticks, {} signs spawned, {} tones played, final speed {} km/h",
        state.time_ticks,
        signs_seen,
        audio.played(),
        state.display_speed()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
