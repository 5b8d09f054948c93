//! Jetpack Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use jetpack_dash::platform::{FrameDriver, InputEvent, InputMapper};
    use jetpack_dash::renderer::{PointRenderState, draw_scene};
    use jetpack_dash::sim::{GameState, tick};
    use jetpack_dash::sprite::{MemorySpriteSource, SpriteName, SpriteSet};
    use jetpack_dash::{GameConfig, HudSnapshot, HudTracker};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        sprites: SpriteSet,
        render_state: Option<PointRenderState>,
        clock: FrameDriver,
        input: InputMapper,
        hud: HudTracker,
    }

    impl Game {
        fn new(config: GameConfig, seed: u64, sprites: SpriteSet) -> Self {
            Self {
                state: GameState::new(config, seed),
                sprites,
                render_state: None,
                clock: FrameDriver::new(),
                input: InputMapper::new(),
                hud: HudTracker::new(),
            }
        }

        /// Advance the simulation by one display frame
        fn update(&mut self, time: f64) {
            let elapsed = self.clock.advance(time);
            let input = self.input.take();
            tick(&mut self.state, &input, elapsed);
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                draw_scene(render_state, &self.state, &self.sprites);
                match render_state.present() {
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

        /// Push HUD changes into the DOM
        fn update_hud(&mut self) {
            if let Some(snapshot) = self.hud.poll(&self.state) {
                show_hud(&snapshot);
            }
        }
    }

    fn show_hud(snapshot: &HudSnapshot) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(el) = document.get_element_by_id("visor") {
            el.set_text_content(Some(&snapshot.distance_label()));
        }

        let toggle = |id: &str, visible: bool| {
            if let Some(el) = document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        };
        toggle("game-over", snapshot.game_over);
        toggle("paused", snapshot.paused);

        if let Some(btn) = document.get_element_by_id("pauseBtn") {
            let label = if snapshot.paused { "Resume" } else { "Pause" };
            btn.set_text_content(Some(label));
        }
    }

    /// Fetch a text asset relative to the page
    async fn fetch_text(path: &str) -> Result<String, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let response: web_sys::Response = JsFuture::from(window.fetch_with_str(path))
            .await?
            .dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
        }
        let text = JsFuture::from(response.text()?).await?;
        text.as_string()
            .ok_or_else(|| JsValue::from_str("response body is not text"))
    }

    /// Fetch every sprite document; failures are left for the fallback path
    async fn fetch_sprites() -> MemorySpriteSource {
        let mut source = MemorySpriteSource::new();
        for name in SpriteName::ALL {
            match fetch_text(name.path()).await {
                Ok(json) => source.insert_json(name.path(), json),
                Err(e) => log::warn!("Could not fetch {}: {:?}", name.path(), e),
            }
        }
        source
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Jetpack Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let config = GameConfig::load();
        let seed = js_sys::Date::now() as u64;

        let source = fetch_sprites().await;
        let mut sprite_rng = <rand_pcg::Pcg32 as rand::SeedableRng>::seed_from_u64(seed);
        let sprites = SpriteSet::load(&source, &mut sprite_rng);

        let game = Rc::new(RefCell::new(Game::new(config, seed, sprites)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match PointRenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(game.clone());
        setup_pause_button(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Jetpack Dash running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.input.key_down(&event.code(), event.repeat()).is_some() {
                    // Keep Space/ArrowUp from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pause_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(btn) = document.get_element_by_id("pauseBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.push(InputEvent::Pause);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Held keys never see their keyup once focus leaves the page
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.input.release_all();
            g.clock.resync();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Jetpack Dash (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    let variant = std::env::args()
        .nth(1)
        .map(|arg| match jetpack_dash::Variant::from_str(&arg) {
            Some(v) => v,
            None => {
                log::warn!("Unknown variant '{}', using Classic", arg);
                jetpack_dash::Variant::Classic
            }
        })
        .unwrap_or_default();

    autopilot(variant);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run with a hover-in-place pilot, drawn into an off-screen batch
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(variant: jetpack_dash::Variant) {
    use jetpack_dash::consts::FRAME_MS;
    use jetpack_dash::renderer::{QuadBatch, draw_scene};
    use jetpack_dash::sim::{GameState, TickInput, tick};
    use jetpack_dash::sprite::{MemorySpriteSource, SpriteSet};
    use jetpack_dash::{GameConfig, HudTracker};
    use rand::SeedableRng;

    const MAX_FRAMES: u32 = 60 * 60;
    const HOVER_Y: f32 = -0.2;

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let config = GameConfig::from_variant(variant);
    log::info!("Variant {} with seed {}", variant.as_str(), seed);

    let mut sprite_rng = rand_pcg::Pcg32::seed_from_u64(seed);
    let sprites = SpriteSet::load(&MemorySpriteSource::new(), &mut sprite_rng);
    let mut state = GameState::new(config, seed);
    let mut batch = QuadBatch::for_surface(800, 600);
    let mut hud = HudTracker::new();

    for frame in 0..MAX_FRAMES {
        let input = TickInput {
            jump: frame == 0 || (state.player.y < HOVER_Y && state.player.velocity <= 0.0),
            ..Default::default()
        };
        let contact = tick(&mut state, &input, FRAME_MS);

        draw_scene(&mut batch, &state, &sprites);
        batch.clear();

        if let Some(snapshot) = hud.poll(&state) {
            log::debug!("HUD {}", snapshot.distance_label());
        }
        if let Some(contact) = contact {
            log::info!("Crashed ({:?}) after {} frames", contact, frame + 1);
            break;
        }
    }

    println!("Distance: {:04} m", state.score.score());
}
