//! Poor Man's Sky entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, TouchEvent};

    use glam::Vec2;
    use poor_mans_sky::platform::{key_action, touch_end_actions, touch_start_actions};
    use poor_mans_sky::renderer::RenderState;
    use poor_mans_sky::renderer::color::to_css;
    use poor_mans_sky::sim::{Color, DrawList, FrameInput, GameSession, PerlinNoise, step};
    use poor_mans_sky::{InputMode, Settings, Viewport};

    /// One text item as last written to the DOM
    #[derive(Clone, PartialEq)]
    struct TextItem {
        text: String,
        position: Vec2,
        size_pt: f32,
        color: Color,
    }

    /// Absolutely positioned DOM labels laid over the canvas
    struct TextLayer {
        root: HtmlElement,
        labels: Vec<HtmlElement>,
        shown: Vec<TextItem>,
        /// CSS pixels per viewport pixel
        scale: Vec2,
    }

    impl TextLayer {
        fn new(document: &Document, canvas: &HtmlCanvasElement, scale: Vec2) -> Option<Self> {
            let root: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
            root.set_id("text-layer");
            let rect = canvas.get_bounding_client_rect();
            let style = root.style();
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("left", &format!("{}px", rect.left()));
            let _ = style.set_property("top", &format!("{}px", rect.top()));
            let _ = style.set_property("width", &format!("{}px", rect.width()));
            let _ = style.set_property("height", &format!("{}px", rect.height()));
            let _ = style.set_property("pointer-events", "none");
            let _ = style.set_property("overflow", "hidden");
            document.body()?.append_child(&root).ok()?;
            Some(Self {
                root,
                labels: Vec::new(),
                shown: Vec::new(),
                scale,
            })
        }

        fn label(&mut self, index: usize) -> Option<&HtmlElement> {
            while self.labels.len() <= index {
                let document = web_sys::window()?.document()?;
                let el: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
                let style = el.style();
                let _ = style.set_property("position", "absolute");
                let _ = style.set_property("white-space", "nowrap");
                let _ = style.set_property("font-family", "Arial, sans-serif");
                let _ = style.set_property("transform", "translate(-50%, -100%)");
                self.root.append_child(&el).ok()?;
                self.labels.push(el);
            }
            self.labels.get(index)
        }

        /// Mirror the draw list's text commands into the DOM
        fn sync(&mut self, list: &DrawList) {
            let items: Vec<TextItem> = list
                .texts()
                .map(|(text, position, size_pt, color)| TextItem {
                    text: text.to_string(),
                    position,
                    size_pt,
                    color,
                })
                .collect();
            if items == self.shown {
                return;
            }

            let scale = self.scale;
            for (i, item) in items.iter().enumerate() {
                let Some(el) = self.label(i) else {
                    log::warn!("Could not create text label {}", i);
                    break;
                };
                el.set_text_content(Some(&item.text));
                let style = el.style();
                let _ = style.set_property("display", "block");
                let _ = style.set_property("left", &format!("{}px", item.position.x * scale.x));
                let _ = style.set_property("top", &format!("{}px", item.position.y * scale.y));
                let _ = style.set_property("font-size", &format!("{}pt", item.size_pt * scale.y));
                let _ = style.set_property("color", &to_css(item.color));
            }
            for el in self.labels.iter().skip(items.len()) {
                let _ = el.style().set_property("display", "none");
            }
            self.shown = items;
        }
    }

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        noise: PerlinNoise,
        input: FrameInput,
        render_state: Option<RenderState>,
        text_layer: Option<TextLayer>,
    }

    impl Game {
        fn new(session: GameSession) -> Self {
            Self {
                session,
                noise: PerlinNoise::default(),
                input: FrameInput::default(),
                render_state: None,
                text_layer: None,
            }
        }

        /// Advance one frame, draw it and drop the consumed input
        fn frame(&mut self) {
            let list = step(&mut self.session, &self.noise, &self.input);
            self.input.clear();

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&list) {
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
            if let Some(ref mut text_layer) = self.text_layer {
                text_layer.sync(&list);
            }
        }
    }

    /// Settings from the canvas `data-config` attribute, or defaults
    fn load_settings(canvas: &HtmlCanvasElement) -> Settings {
        match canvas.get_attribute("data-config") {
            Some(json) => match Settings::from_json(&json) {
                Ok(settings) => {
                    log::info!("Settings loaded from data-config");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring data-config: {}", e);
                    Settings::default()
                }
            },
            None => {
                log::info!("No data-config, using default settings");
                Settings::default()
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Poor Man's Sky starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = load_settings(&canvas);

        let client_w = canvas.client_width().max(1) as f32;
        let client_h = canvas.client_height().max(1) as f32;
        let viewport = settings.viewport_or(Viewport::new(client_w, client_h));

        let dpr = window.device_pixel_ratio();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let user_agent = window.navigator().user_agent().unwrap_or_default();
        let input_mode = settings.input_mode_or(InputMode::detect(&user_agent));
        log::info!(
            "Input mode {}, viewport {}x{}",
            input_mode.as_str(),
            viewport.width,
            viewport.height
        );

        let seed = js_sys::Date::now() as u64;
        let session = GameSession::new(&settings, viewport, input_mode, seed);
        let game = Rc::new(RefCell::new(Game::new(session)));
        log::info!("Session initialized with seed: {}", seed);

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

        let render_state = RenderState::new(surface, &adapter, width, height, viewport)
            .await
            .expect("Failed to create device");
        let scale = Vec2::new(client_w / viewport.width, client_h / viewport.height);

        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            g.text_layer = TextLayer::new(&document, &canvas, scale);
            if g.text_layer.is_none() {
                log::warn!("Text layer unavailable, overlays will have no text");
            }
        }

        setup_keyboard(&document, game.clone());
        if input_mode.is_touch() {
            setup_touch(&canvas, game.clone(), scale);
        }

        request_animation_frame(game);

        log::info!("Poor Man's Sky running!");
    }

    fn setup_keyboard(document: &Document, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(action) = key_action(&event.code()) {
                event.prevent_default();
                game.borrow_mut().input.push(action);
            }
        });
        let _ = document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_touch(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>, scale: Vec2) {
        // Touch start: Start plus an optional control press
        {
            let game = game.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let rect = target.get_bounding_client_rect();
                let list = event.touches();
                let touches: Vec<Vec2> = (0..list.length())
                    .filter_map(|i| list.get(i))
                    .map(|t| {
                        Vec2::new(
                            (t.client_x() as f64 - rect.left()) as f32 / scale.x,
                            (t.client_y() as f64 - rect.top()) as f32 / scale.y,
                        )
                    })
                    .collect();

                let mut g = game.borrow_mut();
                let (mode, viewport) = (g.session.input_mode, g.session.viewport);
                for action in touch_start_actions(mode, viewport, &touches) {
                    g.input.push(action);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end: release every control
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                for action in touch_end_actions() {
                    g.input.push(action);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames the native run flies before giving up on a crash
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_MAX_FRAMES: u64 = 100_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use poor_mans_sky::sim::{Action, Direction, LifecycleState, clearance};
    use poor_mans_sky::{FrameInput, GameSession, InputMode, PerlinNoise, Settings, Viewport, step};

    env_logger::init();
    log::info!("Poor Man's Sky (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the playable version");

    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Settings::from_json(&json) {
                Ok(settings) => {
                    log::info!("Settings loaded from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path, e);
                    Settings::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                Settings::default()
            }
        },
        None => Settings::default(),
    };

    let viewport = settings.viewport_or(Viewport::default());
    let input_mode = settings.input_mode_or(InputMode::Keyboard);
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    let mut session = GameSession::new(&settings, viewport, input_mode, seed);
    let noise = PerlinNoise::default();

    // Start, then keep nudging down until the ship meets the ground
    let mut input = FrameInput::new([Action::Start]);
    let mut frames = 0;
    while session.state != LifecycleState::GameOver && frames < HEADLESS_MAX_FRAMES {
        if session.state == LifecycleState::Flying && frames % 30 == 0 {
            input.push(Action::Nudge(Direction::Down));
        }
        let list = step(&mut session, &noise, &input);
        input.clear();
        frames += 1;

        if frames % 60 == 0 {
            log::debug!(
                "frame {}: y {:.1}, clearance {:.1}, {} draw commands",
                frames,
                session.ship_y,
                clearance(&session, &noise),
                list.len()
            );
        }
    }

    log::info!(
        "Headless run finished in state {} after {} frames (seed {})",
        session.state.as_str(),
        frames,
        seed
    );
}
