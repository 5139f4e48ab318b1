//! Flappy Bird entry point
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

    use flappy_bird::persistence::load_best;
    use flappy_bird::platform::InputQueue;
    use flappy_bird::renderer::{CanvasSurface, draw_scene};
    use flappy_bird::sim::{GameEvent, GameSession, InputEvent, tick};
    use flappy_bird::{LocalStore, Settings};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        store: LocalStore,
        input: InputQueue,
        surface: CanvasSurface,
    }

    impl Game {
        /// Run one simulation frame
        fn update(&mut self) {
            let input = self.input.take_tick_input();
            tick(&mut self.session, &input, &mut self.store);
        }

        /// Render the current frame
        fn render(&mut self) {
            draw_scene(&self.session, &mut self.surface);
        }

        /// Update DOM read-outs and controls from this frame's events
        fn update_hud(&mut self) {
            let events = self.session.drain_events();
            if events.is_empty() {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            for event in events {
                match event {
                    GameEvent::Scored { score } => {
                        set_text(&document, "score", score);
                    }
                    GameEvent::BestScore { best } => {
                        set_text(&document, "best", best);
                    }
                    GameEvent::Started => {
                        set_visible(&document, "instructions", false);
                    }
                    GameEvent::Crashed { .. } => {
                        set_visible(&document, "restartBtn", true);
                        set_visible(&document, "instructions", false);
                    }
                    GameEvent::Restarted => {
                        set_text(&document, "score", self.session.score());
                        set_visible(&document, "restartBtn", false);
                        set_visible(&document, "instructions", true);
                    }
                    GameEvent::Flapped | GameEvent::Spawned { .. } => {}
                }
            }
        }
    }

    fn set_text(document: &web_sys::Document, id: &str, value: u32) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(&value.to_string()));
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        else {
            return;
        };
        let display = if visible { "block" } else { "none" };
        let _ = el.style().set_property("display", display);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Bird starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        canvas.set_width(settings.canvas_width as u32);
        canvas.set_height(settings.canvas_height as u32);

        let surface = CanvasSurface::new(&canvas).expect("no 2d context");
        let store = LocalStore::open();
        let best = load_best(&store);
        set_text(&document, "best", best);
        set_text(&document, "score", 0);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: GameSession::new(settings, seed, best),
            store,
            input: InputQueue::new(),
            surface,
        }));

        log::info!("Game initialized with seed: {}", game.borrow().session.seed());

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Flappy Bird running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click on the play surface
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.push(InputEvent::Activate);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.push(InputEvent::Activate);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.push_key(&event.code()) {
                    // Keep Space from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.push(InputEvent::Restart);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No restart button found");
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
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
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

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_bird::persistence::load_best;
    use flappy_bird::platform::InputQueue;
    use flappy_bird::renderer::{DisplayList, draw_scene};
    use flappy_bird::sim::{GameEvent, GameSession, InputEvent, Mode, tick};
    use flappy_bird::{MemoryStore, Settings};

    /// Frames per headless run (about a minute at 60 Hz)
    const FRAMES: u32 = 3600;

    env_logger::init();
    log::info!("Flappy Bird (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - build for wasm32 to play");

    let mut store = MemoryStore::new();
    let best = load_best(&store);
    let mut session = GameSession::new(Settings::load(), 2024, best);
    let mut input = InputQueue::new();
    input.set_autopilot(true);
    log::info!("Headless run with seed {}", session.seed());

    let mut runs = 0;
    for _ in 0..FRAMES {
        if session.mode() == Mode::Over {
            input.push(InputEvent::Restart);
        }
        tick(&mut session, &input.take_tick_input(), &mut store);

        for event in session.drain_events() {
            match event {
                GameEvent::Crashed { cause, score } => {
                    runs += 1;
                    println!("Run {}: {:?}, score {}", runs, cause, score);
                }
                GameEvent::BestScore { best } => println!("  new best: {}", best),
                _ => {}
            }
        }
    }

    let mut frame = DisplayList::new();
    draw_scene(&session, &mut frame);
    log::info!("Last frame: {} draw commands", frame.commands.len());

    println!(
        "\n{} runs finished, best score {}",
        runs,
        session.pending_best()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
