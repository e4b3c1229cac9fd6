//! Ping Game entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent};

    use ping_game::consts::RECORD_KEY;
    use ping_game::persistence::{LocalStore, MemoryStore, RecordStore};
    use ping_game::platform::WebScheduler;
    use ping_game::renderer::{CanvasSurface, render};
    use ping_game::sim::Playfield;
    use ping_game::{Game, Modal, Settings, ui};

    /// Everything the browser callbacks need
    struct App {
        game: Game,
        scheduler: WebScheduler,
        surface: CanvasSurface,
        document: Document,
    }

    impl App {
        fn on_frame(&mut self) {
            if let Some(summary) = self.game.on_frame(&mut self.scheduler, &mut self.surface) {
                ui::show_modal(&self.document, &Modal::GameOver(summary));
            }
        }

        fn on_spawn_timer(&mut self) {
            self.game.on_spawn_timer();
        }

        fn on_play(&mut self) {
            if self.game.play(&mut self.scheduler) {
                ui::hide_modal(&self.document);
            }
        }

        fn on_click(&mut self, x: f32, y: f32) {
            self.game.fire(Vec2::new(x, y));
        }

        /// Background and player behind the welcome modal
        fn draw_idle(&mut self) {
            render(&self.game.session, &mut self.surface);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ping Game starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let Some(canvas) = document
            .get_element_by_id("game-container")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas #game-container, cannot start");
            return;
        };

        // Canvas fills the viewport
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let surface = match CanvasSurface::new(&canvas) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        let mut settings = Settings::load();
        if let Ok(search) = window.location().search() {
            if !search.is_empty() {
                settings.apply_query(&search);
                settings.save();
            }
        }

        let store: Box<dyn RecordStore> = match LocalStore::open(RECORD_KEY) {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{}; scores will not be kept", e);
                Box::new(MemoryStore::new())
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            Playfield::new(width as f32, height as f32),
            &settings,
            store,
            seed,
        );
        let welcome = game.welcome();

        let app = Rc::new_cyclic(|weak: &Weak<RefCell<App>>| {
            let on_frame = {
                let weak = weak.clone();
                Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                    if let Some(app) = weak.upgrade() {
                        app.borrow_mut().on_frame();
                    }
                })
            };
            let on_interval = {
                let weak = weak.clone();
                Closure::<dyn FnMut()>::new(move || {
                    if let Some(app) = weak.upgrade() {
                        app.borrow_mut().on_spawn_timer();
                    }
                })
            };
            RefCell::new(App {
                game,
                scheduler: WebScheduler::new(window.clone(), on_frame, on_interval),
                surface,
                document: document.clone(),
            })
        });

        app.borrow_mut().draw_idle();
        ui::show_modal(&document, &welcome);

        setup_input_handlers(&canvas, &document, app);

        log::info!("Ping Game running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, document: &Document, app: Rc<RefCell<App>>) {
        // Click on the playfield fires toward the pointer
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .on_click(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Modal button: play / play again
        if let Some(button) = document.get_element_by_id(ui::BUTTON_ID) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().on_play();
            });
            let _ = button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::error!("No #{} element, the game cannot be started", ui::BUTTON_ID);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use ping_game::persistence::MemoryStore;
    use ping_game::platform::ManualScheduler;
    use ping_game::renderer::DrawLog;
    use ping_game::sim::{Playfield, Session};
    use ping_game::{Game, Settings, Summary};

    /// Nominal display rate used to convert the spawn interval into frames
    const FRAMES_PER_SECOND: u64 = 60;
    /// The bot fires this often
    const FIRE_EVERY_FRAMES: u64 = 12;

    fn nearest_enemy(session: &Session) -> Option<Vec2> {
        let player = session.player.pos;
        session
            .enemies
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance(player)
                    .partial_cmp(&b.pos.distance(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|e| e.pos)
    }

    /// Play one session with an auto-aiming bot until game over or `max_frames`
    pub fn run(seed: u64, max_frames: u64) -> Option<Summary> {
        let settings = Settings::load();
        let frames_per_spawn =
            (settings.spawn_interval_ms as u64 * FRAMES_PER_SECOND / 1000).max(1);

        let mut game = Game::new(
            Playfield::new(800.0, 600.0),
            &settings,
            Box::new(MemoryStore::new()),
            seed,
        );
        let mut scheduler = ManualScheduler::new();
        let mut surface = DrawLog::default();

        game.play(&mut scheduler);

        let mut frame = 0u64;
        while frame < max_frames && scheduler.take_pending_frame().is_some() {
            frame += 1;
            if frame % frames_per_spawn == 0 && !scheduler.active_intervals().is_empty() {
                game.on_spawn_timer();
            }
            if frame % FIRE_EVERY_FRAMES == 0 {
                if let Some(target) = nearest_enemy(&game.session) {
                    game.fire(target);
                }
            }
            if let Some(summary) = game.on_frame(&mut scheduler, &mut surface) {
                log::info!(
                    "Bot lost after {} frames with {} entities alive",
                    frame,
                    game.session.entity_count()
                );
                return Some(summary);
            }
        }

        log::info!("Bot survived {} frames, ending session", frame);
        game.game_over(&mut scheduler)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ping Game (native) starting...");
    log::info!("Native mode plays a headless bot session - build for wasm32 to play in a browser");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let max_frames = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60);

    match headless::run(seed, max_frames) {
        Some(summary) => println!(
            "seed {}: score {} (best {})",
            seed, summary.score, summary.best_score
        ),
        None => println!("seed {}: session did not run", seed),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
