//! Sky Slice entry point
//!
//! Native: runs a seeded headless session driven by the auto-player.
//! Web: exposes the simulation to the page, which owns rendering, audio and
//! input and calls back in once per animation frame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use glam::Vec2;
    use wasm_bindgen::prelude::*;

    use sky_slice::sim::Game;
    use sky_slice::tuning::Tuning;

    fn js_err(err: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&err.to_string())
    }

    /// Game instance owned by the page
    #[wasm_bindgen]
    pub struct WasmGame {
        game: Game,
    }

    #[wasm_bindgen]
    impl WasmGame {
        /// Play area in CSS pixels, resolved once for the game's lifetime
        #[wasm_bindgen(constructor)]
        pub fn new(width: f32, height: f32, seed: Option<f64>) -> Result<WasmGame, JsValue> {
            let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
            let game = Game::with_tuning(Tuning::with_area(width, height), seed).map_err(js_err)?;
            log::info!("Sky Slice ready ({}x{}, seed {})", width, height, seed);
            Ok(Self { game })
        }

        pub fn start(&mut self) {
            self.game.start();
        }

        pub fn stop(&mut self) {
            self.game.stop();
        }

        /// Call on unmount
        pub fn teardown(&mut self) {
            self.game.teardown();
        }

        /// Feed one animation frame's elapsed time. Returns whether still playing.
        pub fn advance(&mut self, elapsed_ms: f64) -> bool {
            self.game.advance(elapsed_ms);
            self.game.session().is_playing()
        }

        pub fn select(&mut self, id: u32) -> bool {
            self.game.select(id).is_some()
        }

        pub fn select_at(&mut self, x: f32, y: f32) -> bool {
            self.game.select_at(Vec2::new(x, y)).is_some()
        }

        pub fn snapshot_json(&self) -> Result<String, JsValue> {
            self.game.snapshot().to_json().map_err(js_err)
        }

        pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
            serde_json::to_string(&self.game.drain_events()).map_err(js_err)
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Sky Slice (web) starting...");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Sky Slice (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse()?,
        None => 12345,
    };
    let tuning = match args.next() {
        Some(path) => sky_slice::Tuning::from_json(&std::fs::read_to_string(path)?)?,
        None => sky_slice::Tuning::default(),
    };

    demo::run(tuning, seed)
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use sky_slice::consts::FRAME_PERIOD_MS;
    use sky_slice::sim::{EffectKind, Game, choose_target};
    use sky_slice::tuning::Tuning;

    /// Two minutes of display frames
    const DEMO_FRAMES: u32 = 60 * 120;
    /// Auto-player reaction time, in frames
    const REACTION_FRAMES: u32 = 9;

    pub fn run(tuning: Tuning, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
        let mut game = Game::with_tuning(tuning, seed)?;
        game.start();

        let (mut hits, mut misses) = (0u32, 0u32);
        for frame in 0..DEMO_FRAMES {
            game.advance(FRAME_PERIOD_MS);
            if frame % REACTION_FRAMES == 0 {
                if let Some(id) = choose_target(game.live(), &game.tuning().area) {
                    game.select(id);
                }
            }
            for event in game.drain_events() {
                match event.kind {
                    EffectKind::Hit => hits += 1,
                    EffectKind::HazardHit | EffectKind::Miss => misses += 1,
                }
            }
            if game.session().is_over() {
                break;
            }
        }

        let snapshot = game.snapshot();
        game.teardown();
        log::info!(
            "demo finished: score {}, lives {}, {} hits, {} misses, phase {:?}",
            snapshot.score,
            snapshot.lives,
            hits,
            misses,
            snapshot.phase
        );
        println!("{}", snapshot.to_json()?);
        Ok(())
    }
}
