//! WebAssembly bindings for the merge2048 engine.
//!
//! This module exposes the engine to JavaScript through wasm-bindgen. The
//! browser frontend feeds key names in and animates the JSON event lists
//! that come back; no game logic lives on the JavaScript side.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::Direction;
#[cfg(feature = "wasm")]
use crate::game::{Game, Turn};

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create a new game with a random seed
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { game: Game::new() }
    }

    /// Create a new game from an explicit seed (for replays and tests)
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(seed: u32) -> WasmGame {
        WasmGame {
            game: Game::with_seed(seed as u64),
        }
    }

    /// Run one turn from a direction key name ("Left", "ArrowLeft", ...)
    /// and return the resulting turn as JSON.
    ///
    /// An unrecognized key name is a no-op turn, not an error.
    #[wasm_bindgen]
    pub fn step(&mut self, direction: &str) -> String {
        let turn = match direction.parse::<Direction>() {
            Ok(dir) => self.game.step(dir),
            Err(_) => Turn {
                moved: false,
                events: Vec::new(),
                score: self.game.score(),
                status: self.game.status(),
            },
        };
        serde_json::to_string(&turn).unwrap_or_else(|_| "{}".to_string())
    }

    /// Restart the game and return the two spawn events as JSON
    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) -> String {
        let events = self.game.reset();
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get the 16 cell values, row-major, as a JSON array
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> String {
        serde_json::to_string(self.game.board().cells()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get the running score
    #[wasm_bindgen(js_name = getScore)]
    pub fn get_score(&self) -> u32 {
        self.game.score()
    }

    /// Get the game status as a JSON string ("InProgress", "Won", "Lost")
    #[wasm_bindgen(js_name = getStatus)]
    pub fn get_status(&self) -> String {
        serde_json::to_string(&self.game.status()).unwrap_or_else(|_| "\"InProgress\"".to_string())
    }

    /// Check if the game has reached a terminal state
    #[wasm_bindgen(js_name = isOver)]
    pub fn is_over(&self) -> bool {
        self.game.is_over()
    }
}

#[cfg(feature = "wasm")]
impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
