//! Apple Courier entry point
//!
//! Web: wires DOM input to the game loop and positions the page elements.
//! Native: plays one headless round with a simple autopilot and logs it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{AddEventListenerOptions, Document, Event, EventTarget, KeyboardEvent, TouchEvent};

    use apple_courier::consts::CELL_SIZE_PX;
    use apple_courier::present;
    use apple_courier::{Game, InputEvent, Settings};

    thread_local! {
        static SUBSCRIPTIONS: RefCell<Option<Subscriptions>> = const { RefCell::new(None) };
        static RUNNING: RefCell<bool> = const { RefCell::new(false) };
    }

    /// Event listeners owned for the lifetime of a game; removed on drop
    struct Subscriptions {
        target: EventTarget,
        listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
    }

    impl Subscriptions {
        fn new(target: EventTarget) -> Self {
            Self {
                target,
                listeners: Vec::new(),
            }
        }

        fn listen(&mut self, kind: &'static str, handler: impl FnMut(Event) + 'static) {
            self.listen_with(kind, handler, true);
        }

        /// Non-passive listener, allowed to call `prevent_default`
        fn listen_active(&mut self, kind: &'static str, handler: impl FnMut(Event) + 'static) {
            self.listen_with(kind, handler, false);
        }

        fn listen_with(
            &mut self,
            kind: &'static str,
            handler: impl FnMut(Event) + 'static,
            passive: bool,
        ) {
            let closure = Closure::<dyn FnMut(Event)>::new(handler);
            let options = AddEventListenerOptions::new();
            options.set_passive(passive);
            if let Err(e) = self
                .target
                .add_event_listener_with_callback_and_add_event_listener_options(
                    kind,
                    closure.as_ref().unchecked_ref(),
                    &options,
                )
            {
                log::warn!("Failed to add {} listener: {:?}", kind, e);
            }
            self.listeners.push((kind, closure));
        }
    }

    impl Drop for Subscriptions {
        fn drop(&mut self) {
            for (kind, closure) in self.listeners.drain(..) {
                let _ = self
                    .target
                    .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            }
            log::info!("Input listeners released");
        }
    }

    /// Game instance plus the page it draws into
    struct App {
        game: Game,
        document: Document,
        cell_size: f32,
    }

    impl App {
        /// Push the snapshot into the page
        fn render(&self) {
            let state = self.game.snapshot();
            let settings = self.game.settings();
            for sprite in present::sprites(state, self.cell_size) {
                let Some(el) = self.document.get_element_by_id(sprite.kind.as_str()) else {
                    continue;
                };
                let style = present::sprite_style(&sprite, settings.tick_interval_ms);
                let _ = el.set_attribute("style", &style);
                let class = if sprite.carried {
                    format!("{} positioned carrying", sprite.kind.as_str())
                } else {
                    format!("{} positioned", sprite.kind.as_str())
                };
                let _ = el.set_attribute("class", &class);
            }

            if let Some(el) = self.document.get_element_by_id("delivered") {
                el.set_text_content(Some(&present::delivery_label(
                    state,
                    settings.target_deliveries,
                )));
            }
            if let Some(el) = self.document.get_element_by_id("done") {
                let _ = el.set_attribute("class", if state.done { "" } else { "hidden" });
            }
        }

        fn handle(&mut self, event: InputEvent) {
            let now = js_sys::Date::now();
            if self.game.handle(event, now) {
                self.log_events();
            }
        }

        fn log_events(&mut self) {
            for event in self.game.take_events() {
                log::debug!("{:?}", event);
            }
        }
    }

    /// Settings from `#game[data-settings]`, defaults otherwise
    fn load_settings(document: &Document) -> Settings {
        let json = document
            .get_element_by_id("game")
            .and_then(|el| el.get_attribute("data-settings"));
        match json {
            Some(json) => match Settings::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from page");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring page settings: {}", e);
                    Settings::default()
                }
            },
            None => Settings::default(),
        }
    }

    /// Cell edge from `#game[data-cell-size]`, default otherwise
    fn load_cell_size(document: &Document) -> f32 {
        document
            .get_element_by_id("game")
            .and_then(|el| el.get_attribute("data-cell-size"))
            .and_then(|size| size.parse::<f32>().ok())
            .filter(|size| *size > 0.0)
            .unwrap_or(CELL_SIZE_PX)
    }

    fn first_touch(event: &Event) -> Option<Vec2> {
        let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
        Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
    }

    fn subscribe(window: &web_sys::Window, app: &Rc<RefCell<App>>) -> Subscriptions {
        let mut subs = Subscriptions::new(window.clone().into());

        {
            let app = app.clone();
            subs.listen("keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = event.key();
                let mut a = app.borrow_mut();
                if key == "r" && a.game.is_done() {
                    let seed = js_sys::Date::now() as u64;
                    if let Err(e) = a.game.restart(seed) {
                        log::warn!("Restart failed: {}", e);
                    }
                    return;
                }
                a.handle(InputEvent::KeyDown { key });
            });
        }
        {
            let app = app.clone();
            subs.listen("keyup", move |_event| {
                app.borrow_mut().handle(InputEvent::KeyUp);
            });
        }
        {
            let app = app.clone();
            subs.listen("touchstart", move |event| {
                if let Some(pos) = first_touch(&event) {
                    app.borrow_mut().handle(InputEvent::PointerDown { pos });
                }
            });
        }
        {
            let app = app.clone();
            // Swipes steer the player, not the page
            subs.listen_active("touchmove", move |event| {
                event.prevent_default();
                if let Some(pos) = first_touch(&event) {
                    app.borrow_mut().handle(InputEvent::PointerMove { pos });
                }
            });
        }
        {
            let app = app.clone();
            subs.listen("touchend", move |_event| {
                app.borrow_mut().handle(InputEvent::PointerUp);
            });
        }

        subs
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Apple Courier starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = load_settings(&document);
        let cell_size = load_cell_size(&document);
        let seed = js_sys::Date::now() as u64;
        let game = match Game::new(settings, seed) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Cannot start round: {}", e);
                return;
            }
        };

        let app = Rc::new(RefCell::new(App {
            game,
            document,
            cell_size,
        }));
        app.borrow().render();

        let subs = subscribe(&window, &app);
        SUBSCRIPTIONS.with(|s| *s.borrow_mut() = Some(subs));
        RUNNING.with(|r| *r.borrow_mut() = true);

        request_animation_frame(app);

        log::info!("Apple Courier running!");
    }

    /// Stop the frame loop and release every input listener
    pub fn shutdown() {
        RUNNING.with(|r| *r.borrow_mut() = false);
        SUBSCRIPTIONS.with(|s| s.borrow_mut().take());
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        if !RUNNING.with(|r| *r.borrow()) {
            return;
        }
        {
            let mut a = app.borrow_mut();
            if a.game.update(js_sys::Date::now()) {
                a.log_events();
            }
            a.render();
        }
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Tear down the running game (listeners and frame loop)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn shutdown() {
    wasm_game::shutdown();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Apple Courier (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                apple_courier::Settings::from_json(&json).map_err(|e| e.to_string())
            }) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Cannot use settings from {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => apple_courier::Settings::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();

    match autopilot::play(settings, seed) {
        Ok(moves) => println!("Round complete in {} moves", moves),
        Err(e) => {
            log::warn!("Cannot start round: {}", e);
            std::process::exit(2);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use apple_courier::sim::{Command, RoundState};
    use apple_courier::{ConfigError, Game, InputEvent, Point, Settings};

    /// Headless cap so a broken layout cannot spin forever
    const MAX_MOVES: u32 = 10_000;

    /// Next key toward the apple, or toward the box when carrying
    fn next_key(state: &RoundState) -> &'static str {
        let target: Point = if state.player.has_apple {
            state.apple_box.pos
        } else {
            state.apple.pos
        };
        let d = target - state.player.pos;
        let command = if d.x > 0 {
            Command::Right
        } else if d.x < 0 {
            Command::Left
        } else if d.y > 0 {
            Command::Down
        } else {
            Command::Up
        };
        match command {
            Command::Up => "w",
            Command::Right => "d",
            Command::Down => "s",
            Command::Left => "a",
        }
    }

    /// Play one round on a simulated clock; returns the number of moves
    pub fn play(settings: Settings, seed: u64) -> Result<u32, ConfigError> {
        let interval = settings.tick_interval_ms as f64;
        let mut game = Game::new(settings, seed)?;
        let mut now = 0.0;
        let mut moves = 0;

        while !game.is_done() && moves < MAX_MOVES {
            let key = next_key(game.snapshot()).to_string();
            if game.handle(InputEvent::KeyDown { key }, now) {
                moves += 1;
            }
            game.handle(InputEvent::KeyUp, now);
            for event in game.take_events() {
                log::info!("t={:>6}ms {:?}", now, event);
            }
            now += interval;
        }
        Ok(moves)
    }
}
