//! The game engine owning board, score, and status.
//!
//! Each call to [`Game::step`] runs one atomic turn: resolve the direction,
//! fold merge points into the score, spawn a tile if anything moved, then
//! recompute the win/loss status.

use crate::actions::{Direction, MoveEvent};
use crate::board::{Board, CellValue};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Tile value that wins the game
pub const WINNING_TILE: CellValue = 2048;

/// Number of tiles spawned on a fresh board
const INITIAL_SPAWNS: usize = 2;

/// Where the game stands, recomputed from the board after each successful move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are still accepted
    InProgress,
    /// A tile reached [`WINNING_TILE`]
    Won,
    /// The board is full and no adjacent pair allows a merge
    Lost,
}

/// Everything the presentation layer needs after one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Whether any tile changed position or value
    pub moved: bool,
    /// Tile transitions to animate, including the spawn if one happened
    pub events: Vec<MoveEvent>,
    /// Running score after this turn
    pub score: u32,
    /// Game status after this turn
    pub status: GameStatus,
}

/// A single game of merge2048.
///
/// Owns the board, the running score, and the RNG that drives tile spawns.
/// The RNG seed is explicit so games can be replayed deterministically.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    score: u32,
    status: GameStatus,
    rng: StdRng,
    seed: u64,
}

impl Game {
    /// Create a game with a random seed, ready to play with two spawned tiles
    pub fn new() -> Self {
        Self::with_seed(rand::thread_rng().gen())
    }

    /// Create a game from an explicit seed for reproducible play
    pub fn with_seed(seed: u64) -> Self {
        let mut game = Self {
            board: Board::new(),
            score: 0,
            status: GameStatus::InProgress,
            rng: StdRng::seed_from_u64(seed),
            seed,
        };
        for _ in 0..INITIAL_SPAWNS {
            game.board.spawn_with_rng(&mut game.rng);
        }
        game
    }

    /// The board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Running score
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current status
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The seed this game was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether the game has reached a terminal state
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Run one turn: resolve `direction`, spawn a tile if anything moved,
    /// and recompute the status.
    ///
    /// On a terminal board this is a no-op returning `moved = false`; the
    /// board and score are left untouched until an explicit [`reset`].
    ///
    /// [`reset`]: Game::reset
    pub fn step(&mut self, direction: Direction) -> Turn {
        if self.is_over() {
            return Turn {
                moved: false,
                events: Vec::new(),
                score: self.score,
                status: self.status,
            };
        }

        let outcome = self.board.slide(direction);
        self.score += outcome.points;

        let mut events = outcome.events;
        if outcome.moved {
            events.push(self.board.spawn_with_rng(&mut self.rng));
            self.status = self.detect_status();
        }

        Turn {
            moved: outcome.moved,
            events,
            score: self.score,
            status: self.status,
        }
    }

    /// Start over: empty board, zero score, status back to in-progress, then
    /// two fresh spawns. Returns the spawn events so the presentation layer
    /// can render the new board. The RNG stream continues; construct with
    /// [`Game::with_seed`] when full determinism is needed.
    pub fn reset(&mut self) -> Vec<MoveEvent> {
        self.board = Board::new();
        self.score = 0;
        self.status = GameStatus::InProgress;
        (0..INITIAL_SPAWNS)
            .map(|_| self.board.spawn_with_rng(&mut self.rng))
            .collect()
    }

    /// Won takes priority over Lost: a merge can reach the winning tile on
    /// the very move that fills the board.
    fn detect_status(&self) -> GameStatus {
        if self.board.max_tile() >= WINNING_TILE {
            GameStatus::Won
        } else if !self.board.has_moves() {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
