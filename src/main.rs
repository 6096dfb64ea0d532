//! Neon Sling entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use neon_sling::audio::AudioManager;
    use neon_sling::consts::*;
    use neon_sling::renderer::CanvasRenderer;
    use neon_sling::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use neon_sling::{HighScores, Settings};

    const GAME_OVER_MESSAGES: [&str; 5] = [
        "You're Neon-tastic!",
        "Slingshot Superstar!",
        "Keep Shining!",
        "Glow Getter!",
        "Bright Finish!",
    ];

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        audio: AudioManager,
        settings: Settings,
        highscores: HighScores,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Latched once the current run's score has been recorded
        score_recorded: bool,
    }

    impl Game {
        fn new(seed: u64, bounds: Vec2, ctx: CanvasRenderingContext2d) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new(settings.music_track);
            audio.set_volumes(
                settings.master_volume,
                settings.music_volume,
                settings.sfx_volume,
            );

            Self {
                state: GameState::new(seed, bounds),
                renderer: CanvasRenderer::new(ctx),
                audio,
                settings,
                highscores: HighScores::load(),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                score_recorded: false,
            }
        }

        /// Run simulation ticks and react to the events they emit
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.press = None;
                self.input.release = None;
                self.input.pause = false;
            }

            let events: Vec<GameEvent> = self.state.events.drain(..).collect();
            for event in events {
                self.audio.handle_event(event);
                if event == GameEvent::GameOver {
                    self.on_game_over();
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Err(e) = self.renderer.render(&self.state, &self.settings) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", self.state.score)));
            }
        }

        /// Swap to the game-over track and reveal the game-over screen
        fn on_game_over(&mut self) {
            self.audio.play_game_over_track();
            self.score_recorded = false;

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("game-over-screen") {
                let _ = el.class_list().remove_1("hidden");
            }
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("game-over-message") {
                let pick = (js_sys::Math::random() * GAME_OVER_MESSAGES.len() as f64) as usize;
                el.set_text_content(Some(
                    GAME_OVER_MESSAGES[pick.min(GAME_OVER_MESSAGES.len() - 1)],
                ));
            }
            if self.highscores.qualifies(self.state.score) {
                log::info!("Score {} qualifies for the leaderboard", self.state.score);
            }
        }

        /// Record the finished run on the leaderboard under the entered name
        fn record_score(&mut self) {
            if self.score_recorded || self.state.score == 0 {
                return;
            }
            let name = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("player-name"))
                .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();

            if let Some(rank) = self
                .highscores
                .add_score(&name, self.state.score, js_sys::Date::now())
            {
                log::info!("New high score rank {}: {}", rank, self.state.score);
                self.highscores.save();
            }
            self.score_recorded = true;
        }

        /// Reset and begin a fresh run
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed, self.state.bounds);
            self.state.start_run();
            self.accumulator = 0.0;
            self.input = TickInput::default();
            self.score_recorded = false;
            self.audio.resume();
            self.audio.play_music();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Sling starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let bounds = size_canvas(&canvas, &ctx);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, bounds, ctx.clone())));

        log::info!("Game initialized with seed: {}", seed);

        setup_pointer_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_keyboard(game.clone());
        setup_resize(canvas.clone(), ctx, game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Neon Sling running!");
    }

    /// Size the backing store for the device pixel ratio and return the
    /// logical bounds in CSS pixels
    fn size_canvas(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d) -> Vec2 {
        let window = web_sys::window().expect("no window");
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        canvas.set_width((client_w as f64 * dpr) as u32);
        canvas.set_height((client_h as f64 * dpr) as u32);
        let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        Vec2::new(client_w as f32, client_h as f32)
    }

    fn mouse_pos(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.offset_x() as f32, event.offset_y() as f32)
    }

    fn touch_pos(canvas: &HtmlCanvasElement, touch: &web_sys::Touch) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        )
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down - begin drag
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = mouse_pos(&event);
                g.input.press = Some(pos);
                g.input.drag = Some(pos);
                // First gesture unlocks audio
                g.audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - track the drag
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.drag = Some(mouse_pos(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up - release the shot
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.release = Some(mouse_pos(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let pos = touch_pos(&canvas_clone, &touch);
                    g.input.press = Some(pos);
                    g.input.drag = Some(pos);
                    g.audio.resume();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().input.drag = Some(touch_pos(&canvas_clone, &touch));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end - the lifted finger is in changed_touches
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.changed_touches().get(0) {
                    game.borrow_mut().input.release = Some(touch_pos(&canvas_clone, &touch));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Start button
        if let Some(btn) = document.get_element_by_id("start-button") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                if let Some(el) = document.get_element_by_id("start-screen") {
                    let _ = el.class_list().add_1("hidden");
                }
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                log::info!("Game started with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restart button on the game-over screen: records the score first
        if let Some(btn) = document.get_element_by_id("restart-button") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                if let Some(el) = document.get_element_by_id("game-over-screen") {
                    let _ = el.class_list().add_1("hidden");
                }
                let seed = js_sys::Date::now() as u64;
                let mut g = game.borrow_mut();
                g.record_score();
                g.restart(seed);
                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Track cycle button
        if let Some(btn) = document.get_element_by_id("change-track-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.next_track();
                g.settings.music_track = g.audio.current_track();
                g.settings.save();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "Escape" => g.input.pause = true,
                "m" | "M" => {
                    let muted = !g.audio.muted();
                    g.audio.set_muted(muted);
                    log::info!("Muted: {}", muted);
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        game: Rc<RefCell<Game>>,
    ) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let bounds = size_canvas(&canvas, &ctx);
            game.borrow_mut().state.resize(bounds);
            log::info!("Resized to {}x{}", bounds.x, bounds.y);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.input.pause = true;
                        g.audio.pause_music();
                        log::info!("Auto-paused (tab hidden)");
                    }
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
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
                if g.state.phase == GamePhase::Playing {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus regained - unmute (pause stays until the player resumes)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(false);
                }
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
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
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Sling (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning smoke simulation...");
    smoke_sim();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Ten seconds of headless play: the spawner must fire and the difficulty
/// ramp must hold its floor
#[cfg(not(target_arch = "wasm32"))]
fn smoke_sim() {
    use glam::Vec2;
    use neon_sling::consts::{MIN_SPAWN_INTERVAL, SIM_DT};
    use neon_sling::sim::{GameState, TickInput, tick};

    let mut state = GameState::new(42, Vec2::new(800.0, 600.0));
    state.start_run();
    for _ in 0..1200 {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }
    assert!(state.spawn_count > 0, "spawner never fired");
    assert!(state.spawn_interval >= MIN_SPAWN_INTERVAL);
    println!(
        "✓ Simulated 10s: {} enemies spawned, {} hearts left, score {}",
        state.spawn_count, state.hearts, state.score
    );
}
