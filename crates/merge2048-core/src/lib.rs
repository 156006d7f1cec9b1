//! merge2048 - a sliding-tile merge puzzle engine
//!
//! This crate provides the board engine for the classic 2048 puzzle:
//! - The 4x4 board with per-direction slide and merge resolution
//! - Random tile spawning after every successful move
//! - Win/loss detection and score tracking
//!
//! # Architecture
//!
//! The engine performs no I/O and owns no presentation concerns. Each turn
//! the caller supplies a [`Direction`]; the engine mutates the board in
//! place and returns a [`Turn`] carrying one [`MoveEvent`] per tile for the
//! presentation layer to animate, plus the running score and game status.
//! It can be compiled to:
//! - Native Rust for embedding in any frontend or test harness
//! - WebAssembly for client-side browser play
//!
//! # Modules
//!
//! - [`board`]: The 16-slot grid, slide/merge resolution, and tile spawning
//! - [`actions`]: Per-turn input (`Direction`) and output (`MoveEvent`) types
//! - [`game`]: The engine object owning board, score, status, and RNG

pub mod actions;
pub mod board;
pub mod game;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{Direction, MoveEvent, ParseDirectionError};
pub use board::{Board, CellValue, SlideOutcome, CELL_COUNT, GRID_SIZE, SPAWN_VALUE};
pub use game::{Game, GameStatus, Turn, WINNING_TILE};
