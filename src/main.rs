//! Gem Crossing entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use thiserror::Error;
    use wasm_bindgen::prelude::*;
    use web_sys::{FocusEvent, KeyboardEvent};

    use gem_crossing::Settings;
    use gem_crossing::audio::{AudioManager, SoundEffect};
    use gem_crossing::consts::*;
    use gem_crossing::platform::{FrameClock, command_for_key};
    use gem_crossing::renderer::canvas::{AssetError, CanvasSurface, ImageCache};
    use gem_crossing::renderer::{Sprite, render_frame};
    use gem_crossing::sim::{Command, GameState, SpawnError, handle_command, tick};

    #[derive(Debug, Error)]
    enum BootError {
        #[error(transparent)]
        Asset(#[from] AssetError),
        #[error(transparent)]
        Spawn(#[from] SpawnError),
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FrameClock,
        surface: CanvasSurface,
        images: ImageCache,
        audio: AudioManager,
        warned_missing: bool,
    }

    impl Game {
        /// Simulate the elapsed steps, then draw once
        fn frame(&mut self, now_ms: f64) {
            let steps = self.clock.advance(now_ms);
            for _ in 0..steps {
                tick(&mut self.state, SIM_DT);
            }
            self.play_events();

            let missing = render_frame(&mut self.surface, &self.images, &self.state);
            if missing > 0 && !self.warned_missing {
                log::warn!("{} sprites missing from the image cache", missing);
                self.warned_missing = true;
            }
        }

        fn command(&mut self, command: Command) {
            // First key press unlocks audio
            self.audio.resume();
            if let Err(e) = handle_command(&mut self.state, command) {
                log::error!("Level generation failed: {}", e);
            }
            self.play_events();
        }

        fn play_events(&mut self) {
            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Gem Crossing starting...");
        if let Err(e) = start().await {
            log::error!("Gem Crossing failed to start: {}", e);
        }
    }

    async fn start() -> Result<(), BootError> {
        let window = web_sys::window().ok_or_else(|| AssetError::Dom("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| AssetError::Dom("no document".into()))?;

        let settings = Settings::load();
        let surface =
            CanvasSurface::create(&document, CANVAS_WIDTH as u32, CANVAS_HEIGHT as u32)?;

        // Nothing starts until every sprite is ready
        let images = ImageCache::load(&Sprite::ALL).await?;

        let seed = js_sys::Date::now() as u64;
        let audio = AudioManager::new(settings.effective_volume());
        let state = GameState::new(settings, seed)?;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            clock: FrameClock::new(),
            surface,
            images,
            audio,
            warned_missing: false,
        }));

        setup_input_handlers(&window, game.clone());
        request_animation_frame(game);

        log::info!("Gem Crossing running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(command) = command_for_key(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().command(command);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: don't bill the time away as one giant frame
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: FocusEvent| {
                game.borrow_mut().clock.reset();
                log::debug!("Frame clock reset (window blur)");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window went away, stopping the game loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
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
    log::info!("Gem Crossing (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);
    if let Err(e) = headless::run(seed) {
        log::error!("Headless session failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session driving the simulation without a browser
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use gem_crossing::Settings;
    use gem_crossing::audio::{AudioManager, SoundEffect};
    use gem_crossing::consts::*;
    use gem_crossing::sim::{
        Command, Direction, GamePhase, GameState, SpawnError, handle_command, tick,
    };

    /// Ticks between two player moves
    const MOVE_EVERY: u32 = 15;
    /// Give up after two simulated minutes
    const MAX_TICKS: u32 = 60 * 120;

    pub fn run(seed: u64) -> Result<(), SpawnError> {
        let settings = Settings::load();
        let audio = AudioManager::new(settings.effective_volume());
        let mut state = GameState::new(settings, seed)?;
        log::info!("Headless game with seed {}", seed);

        for step in 0..MAX_TICKS {
            tick(&mut state, SIM_DT);
            if step % MOVE_EVERY == 0 && state.phase == GamePhase::Playing {
                let mv = next_move(&state);
                handle_command(&mut state, Command::Move(mv))?;
            }
            for event in state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(event) {
                    audio.play(effect);
                }
            }
            if state.phase.is_over() {
                break;
            }
        }

        let score = state.score();
        log::info!(
            "Finished {:?} on level {} with {} points ({:?})",
            state.phase,
            state.level,
            score.total,
            score.gems
        );
        Ok(())
    }

    /// Head for the nearest rock-free column, then straight up
    fn next_move(state: &GameState) -> Direction {
        let cell = state.player.cell;
        let blocked = |col: i32| state.rocks.iter().any(|rock| rock.col == col);
        if cell.row > ROCK_ROW && blocked(cell.col) {
            let open = (0..NUM_COLS)
                .filter(|&col| !blocked(col))
                .min_by_key(|&col| (col - cell.col).abs());
            if let Some(col) = open {
                return if col < cell.col {
                    Direction::Left
                } else {
                    Direction::Right
                };
            }
        }
        Direction::Up
    }
}
