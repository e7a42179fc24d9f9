//! Slime Run entry point
//!
//! Web builds draw to a canvas and read the keyboard. Native builds run the
//! simulation headless under the autopilot and print frames as text.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::{Clamped, JsCast};
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData, KeyboardEvent};

    use slime_run::Game;
    use slime_run::Settings;
    use slime_run::audio::web::WebAudioSink;
    use slime_run::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use slime_run::input::{Buttons, InputSource, InputTracker};
    use slime_run::renderer::Framebuffer;
    use slime_run::sim::{GameState, Stage, TickInput};

    /// One simulation step per 60 Hz frame
    const FRAME_SECS: f64 = 1.0 / 60.0;
    /// Maximum steps per animation frame to prevent spiral of death
    const MAX_SUBSTEPS: u32 = 4;

    /// Keyboard state shared with the DOM listeners
    struct KeyboardInput {
        held: Rc<RefCell<Buttons>>,
        tracker: InputTracker,
    }

    impl InputSource for KeyboardInput {
        fn poll(&mut self, _state: &GameState) -> TickInput {
            let held = *self.held.borrow();
            self.tracker.sample(held)
        }
    }

    struct Runner {
        game: Game<KeyboardInput, Framebuffer, WebAudioSink>,
        settings: Settings,
        ctx: CanvasRenderingContext2d,
        accumulator: f64,
        last_time: f64,
    }

    impl Runner {
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0).min(0.1)
            } else {
                FRAME_SECS
            };
            self.last_time = time;
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= FRAME_SECS && substeps < MAX_SUBSTEPS {
                for event in self.game.tick() {
                    log::debug!("{:?}", event);
                }
                self.accumulator -= FRAME_SECS;
                substeps += 1;
            }
        }

        fn render(&mut self) {
            let rgba = {
                let fb = self.game.surface_mut();
                fb.compose();
                fb.to_rgba()
            };
            let viewport = self.game.surface().viewport();
            match ImageData::new_with_u8_clamped_array_and_sh(
                Clamped(&rgba),
                viewport.width as u32,
                viewport.height as u32,
            ) {
                Ok(image) => {
                    if let Err(e) = self.ctx.put_image_data(&image, 0.0, 0.0) {
                        log::warn!("Render error: {:?}", e);
                    }
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Flip mute on the live sink and persist it
        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_muted();
            self.game.audio_mut().sink_mut().set_muted(muted);
            self.settings.save();
            log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
        }
    }

    fn key_to_button(key: &str, buttons: &mut Buttons, down: bool) -> bool {
        match key {
            "ArrowLeft" | "a" => buttons.left = down,
            "ArrowRight" | "d" => buttons.right = down,
            "z" | "Z" | " " | "ArrowUp" => buttons.jump = down,
            "x" | "X" => buttons.restart = down,
            _ => return false,
        }
        true
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Slime Run starting...");
        let settings = Settings::load();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(SCREEN_WIDTH as u32);
        canvas.set_height(SCREEN_HEIGHT as u32);
        canvas.set_attribute(
            "style",
            &format!(
                "width:{}px;height:{}px;image-rendering:pixelated",
                SCREEN_WIDTH as u32 * settings.pixel_scale,
                SCREEN_HEIGHT as u32 * settings.pixel_scale
            ),
        )?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let held = Rc::new(RefCell::new(Buttons::default()));
        let input = KeyboardInput {
            held: held.clone(),
            tracker: InputTracker::new(),
        };
        let audio = WebAudioSink::new(&settings);
        let game = Game::new(Stage::default(), input, Framebuffer::new(), audio);

        let runner = Rc::new(RefCell::new(Runner {
            game,
            settings,
            ctx,
            accumulator: 0.0,
            last_time: 0.0,
        }));

        setup_keyboard(held, runner.clone())?;
        request_animation_frame(runner);

        log::info!("Slime Run running!");
        Ok(())
    }

    fn setup_keyboard(held: Rc<RefCell<Buttons>>, runner: Rc<RefCell<Runner>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        for (event_name, down) in [("keydown", true), ("keyup", false)] {
            let held = held.clone();
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if down && !event.repeat() && matches!(event.key().as_str(), "m" | "M") {
                    runner.borrow_mut().toggle_mute();
                    return;
                }
                if key_to_button(&event.key(), &mut held.borrow_mut(), down) {
                    event.prevent_default();
                    if down {
                        // Browsers only allow audio after a user gesture
                        runner.borrow().game.audio().sink().resume();
                    }
                }
            });
            window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(runner: Rc<RefCell<Runner>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(runner, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(runner: Rc<RefCell<Runner>>, time: f64) {
        {
            let mut r = runner.borrow_mut();
            r.update(time);
            r.render();
        }

        request_animation_frame(runner);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use slime_run::audio::LogSink;
    use slime_run::{Game, Settings};
    use slime_run::input::Autopilot;
    use slime_run::renderer::Framebuffer;
    use slime_run::sim::{GameEvent, Stage};

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Run Slime Run headless under the autopilot", long_about = None)]
    struct Args {
        /// Stage file ({"tiles": [...]}); the built-in course when omitted
        #[arg(long)]
        stage: Option<PathBuf>,
        /// Settings file (JSON); defaults when omitted
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Number of frames to simulate
        #[arg(long, default_value_t = 3600)]
        ticks: u64,
        /// Print the screen every N frames
        #[arg(long)]
        ascii_every: Option<u64>,
        /// Stop after the first clear
        #[arg(long)]
        stop_on_clear: bool,
    }

    #[derive(Debug, Default)]
    struct Tally {
        jumps: u32,
        checkpoints: u32,
        deaths: u32,
        clears: u32,
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();

        let stage = match &args.stage {
            Some(path) => Stage::load(path).with_context(|| format!("load stage {:?}", path))?,
            None => Stage::default(),
        };

        let settings = args
            .settings
            .as_deref()
            .map(Settings::load_from)
            .unwrap_or_default();
        let audio = LogSink::new(settings.muted);

        let mut game = Game::new(stage, Autopilot::new(), Framebuffer::new(), audio);
        let mut tally = Tally::default();

        for frame in 1..=args.ticks {
            for event in game.tick() {
                log::debug!("frame {}: {:?}", frame, event);
                match event {
                    GameEvent::Jumped => tally.jumps += 1,
                    GameEvent::CheckpointReached { .. } => tally.checkpoints += 1,
                    GameEvent::GameOver => tally.deaths += 1,
                    GameEvent::Cleared => tally.clears += 1,
                    GameEvent::Restarted { .. } => {}
                }
            }

            if args.ascii_every.is_some_and(|n| n > 0 && frame % n == 0) {
                println!("--- frame {} ---", frame);
                print_frame(&mut game);
            }

            if args.stop_on_clear && tally.clears > 0 {
                log::info!("Cleared on frame {}", frame);
                break;
            }
        }

        let state = game.state();
        println!(
            "phase {:?}, x {:.1}, last checkpoint {}, {:?}, {} cues heard",
            state.phase,
            state.player.pos.x,
            state.last_checkpoint,
            tally,
            game.audio().sink().audible()
        );
        print_frame(&mut game);
        Ok(())
    }

    fn print_frame<I, A>(game: &mut Game<I, Framebuffer, A>)
    where
        I: slime_run::input::InputSource,
        A: slime_run::audio::AudioSink,
    {
        let fb = game.surface_mut();
        fb.compose();
        print!("{}", fb.to_ascii());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Slime Run (native) starting...");

    if let Err(e) = headless::run() {
        log::error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
