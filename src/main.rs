//! Sector Control entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MediaQueryList, PointerEvent};

    use sector_control::Settings;
    use sector_control::platform::{Joystick, KeyAction, map_key};
    use sector_control::renderer::{CanvasRenderer, Scene};
    use sector_control::sim::{Command, GameEvent, GameState, dispatch, update};
    use sector_control::ui::{BannerBoard, Hud};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        banners: BannerBoard,
        joystick: Joystick,
        document: Document,
        last_time: f64,
        /// Level whose background is on the playfield
        shown_background: Option<usize>,
    }

    impl Game {
        fn update(&mut self, dt: f32) {
            update(&mut self.state, dt);

            self.banners.advance(dt);
            for event in self.state.drain_events() {
                if event == GameEvent::RunRestarted {
                    self.joystick.reset();
                    if let Some(thumb) = html_element(&self.document, "[data-joystick-thumb]") {
                        set_thumb(&thumb, Vec2::ZERO);
                    }
                }
                self.banners.handle_event(&event);
            }
        }

        fn render(&self) {
            self.renderer.render(&Scene::from_state(&self.state));
        }

        /// Push HUD, banner, overlay and background into the DOM
        fn update_hud(&mut self) {
            let document = &self.document;
            let hud = Hud::from_state(&self.state);
            set_text(document, "[data-coverage]", &hud.coverage);
            set_text(document, "[data-lives]", &hud.lives);
            set_text(document, "[data-level]", &hud.level);

            if let Some(el) = query(document, ".status-banner") {
                let banner = self.banners.current();
                if let Some(banner) = banner {
                    el.set_text_content(Some(&banner.message));
                }
                let _ = el
                    .class_list()
                    .toggle_with_force("is-visible", banner.is_some());
            }

            if let Some(el) = query(document, "[data-victory-message]") {
                let visible = self.banners.victory_visible;
                let _ = el.set_attribute("aria-hidden", if visible { "false" } else { "true" });
                let _ = el.class_list().toggle_with_force("is-active", visible);
            }

            if self.shown_background != Some(self.state.level_index) {
                if let Some(el) = html_element(document, ".playfield") {
                    let url = format!("url('{}')", self.state.level().background);
                    let _ = el.style().set_property("--bg-image", &url);
                }
                self.shown_background = Some(self.state.level_index);
            }
        }

        fn send(&mut self, command: Command) {
            dispatch(&mut self.state, command);
        }
    }

    fn query(document: &Document, selector: &str) -> Option<Element> {
        document.query_selector(selector).ok().flatten()
    }

    fn html_element(document: &Document, selector: &str) -> Option<HtmlElement> {
        query(document, selector)?.dyn_into().ok()
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = query(document, selector) {
            el.set_text_content(Some(text));
        }
    }

    fn set_thumb(thumb: &HtmlElement, offset: Vec2) {
        let style = thumb.style();
        let _ = style.set_property("--dx", &format!("{}px", offset.x));
        let _ = style.set_property("--dy", &format!("{}px", offset.y));
    }

    fn js_error(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_error)?;

        log::info!("Sector Control starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let settings = Settings::load();
        let (width, height) = (settings.canvas_width, settings.canvas_height);
        let dead_zone = settings.joystick_dead_zone;

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(settings, seed).map_err(js_error)?;
        let renderer = CanvasRenderer::new(&document, width, height)?;
        log::info!("Game initialized with seed: {}", seed);

        if let Some(el) = query(&document, "[data-year]") {
            let year = js_sys::Date::new_0().get_full_year();
            el.set_text_content(Some(&year.to_string()));
        }

        let game = Rc::new(RefCell::new(Game {
            state,
            renderer,
            banners: BannerBoard::new(),
            joystick: Joystick::new(dead_zone),
            document: document.clone(),
            last_time: 0.0,
            shown_background: None,
        }));

        setup_keyboard(&document, game.clone())?;
        setup_restart_button(&document, game.clone())?;
        setup_touch_controls(&window, &document, game.clone())?;

        request_animation_frame(game);

        log::info!("Sector Control running!");
        Ok(())
    }

    fn setup_keyboard(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(action) = map_key(&event.key()) else {
                return;
            };
            let mut g = game.borrow_mut();
            match action {
                KeyAction::Steer(_) => event.prevent_default(),
                KeyAction::Restart if g.state.phase.is_terminal() => event.prevent_default(),
                KeyAction::Restart => return,
            }
            g.send(action.into());
        });
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        if let Some(btn) = query(document, "[data-action=\"restart\"]") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().send(Command::Restart);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    /// Touch controls apply on coarse pointers or touch-capable devices
    fn wants_touch(coarse: Option<&MediaQueryList>) -> bool {
        coarse.is_some_and(|q| q.matches())
            || web_sys::window().is_some_and(|w| w.navigator().max_touch_points() > 0)
    }

    fn setup_touch_controls(
        window: &web_sys::Window,
        document: &Document,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let (Some(controls), Some(base), Some(thumb)) = (
            html_element(document, "[data-touch-controls]"),
            query(document, "[data-joystick]"),
            html_element(document, "[data-joystick-thumb]"),
        ) else {
            return Ok(());
        };
        let coarse = window.match_media("(pointer: coarse)")?;

        let update_visibility = {
            let game = game.clone();
            let thumb = thumb.clone();
            let coarse = coarse.clone();
            move || {
                if wants_touch(coarse.as_ref()) {
                    controls.set_hidden(false);
                    let _ = controls.class_list().add_1("is-active");
                } else {
                    let _ = controls.class_list().remove_1("is-active");
                    controls.set_hidden(true);
                    set_thumb(&thumb, Vec2::ZERO);
                    let mut g = game.borrow_mut();
                    g.joystick.reset();
                    g.send(Command::Halt);
                }
            }
        };
        update_visibility();

        if let Some(query) = &coarse {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                update_visibility();
            });
            query.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Offset from the base centre and the base radius
        let measure = {
            let base = base.clone();
            move |event: &PointerEvent| {
                let rect = base.get_bounding_client_rect();
                let center = Vec2::new(
                    (rect.left() + rect.width() / 2.0) as f32,
                    (rect.top() + rect.height() / 2.0) as f32,
                );
                let pointer = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                (pointer - center, (rect.width() / 2.0) as f32)
            }
        };

        // Press
        {
            let game = game.clone();
            let base_el = base.clone();
            let thumb = thumb.clone();
            let measure = measure.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                if !wants_touch(coarse.as_ref()) {
                    return;
                }
                let coarse_pointer = coarse.as_ref().is_some_and(|q| q.matches());
                if event.pointer_type() == "mouse" && !coarse_pointer {
                    return;
                }
                event.prevent_default();
                let _ = base_el.set_pointer_capture(event.pointer_id());
                let _ = thumb.style().set_property("transition", "none");

                let (offset, radius) = measure(&event);
                let mut g = game.borrow_mut();
                if let Some(command) = g.joystick.press(event.pointer_id(), offset, radius) {
                    g.send(command);
                }
                set_thumb(&thumb, g.joystick.thumb);
            });
            base.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Drag
        {
            let game = game.clone();
            let thumb = thumb.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                if g.joystick.pointer_id != Some(event.pointer_id()) {
                    return;
                }
                event.prevent_default();
                let (offset, radius) = measure(&event);
                if let Some(command) = g.joystick.drag(event.pointer_id(), offset, radius) {
                    g.send(command);
                }
                set_thumb(&thumb, g.joystick.thumb);
            });
            base.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Release, cancel and leave all halt
        {
            let base_el = base.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let Some(command) = g.joystick.release(event.pointer_id()) else {
                    return;
                };
                let _ = base_el.release_pointer_capture(event.pointer_id());
                let _ = thumb.style().remove_property("transition");
                set_thumb(&thumb, Vec2::ZERO);
                g.send(command);
            });
            for name in ["pointerup", "pointercancel", "pointerleave"] {
                base.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            }
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

            // First frame advances nothing
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    log::info!("Sector Control (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    if let Err(e) = demo::run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted headless run: carve one pocket off the bottom wall and report
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use sector_control::sim::{Command, Direction, GameState, dispatch, update};
    use sector_control::ui::{BannerBoard, Hud};
    use sector_control::{ConfigError, Settings};

    const FRAME_DT: f32 = 1.0 / 60.0;

    pub fn run() -> Result<(), ConfigError> {
        let mut state = GameState::new(Settings::load(), 7)?;
        let mut banners = BannerBoard::new();

        let steps = state.settings.step_interval;
        let frames_for = |cells: u32| ((cells as f32 * steps) / FRAME_DT).ceil() as u32;
        let script = [
            (Direction::Up, 4),
            (Direction::Right, 6),
            (Direction::Down, 4),
        ];

        for (dir, cells) in script {
            dispatch(&mut state, Command::Steer(dir));
            for _ in 0..frames_for(cells) {
                update(&mut state, FRAME_DT);
                banners.advance(FRAME_DT);
                for event in state.drain_events() {
                    banners.handle_event(&event);
                    if let Some(banner) = banners.current() {
                        log::info!("{:?}: {}", event, banner.message);
                    }
                }
            }
            if state.phase.is_terminal() {
                break;
            }
        }

        let hud = Hud::from_state(&state);
        println!(
            "coverage {} | lives {} | sector {} | {:?}",
            hud.coverage, hud.lives, hud.level, state.phase
        );
        Ok(())
    }
}
