//! Per-turn inputs and outputs of the board engine.
//!
//! This module defines the `Direction` a player chooses each turn and the
//! `MoveEvent` list the engine emits for the presentation layer to animate.

use crate::board::{CellValue, GRID_SIZE};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A move direction chosen by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// Error for direction names from the input layer that match none of the four
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized direction `{0}`")]
pub struct ParseDirectionError(pub String);

impl Direction {
    /// All four directions
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit step vector (row delta, column delta) along the direction of travel
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Map scan counters (outer `i`, inner `j`, both 0..4) to a (row, col) so
    /// that cells nearest the edge the tiles travel toward come first.
    /// Resolving a cell only after everything ahead of it has settled is what
    /// keeps a tile from merging twice in one turn.
    pub(crate) fn scan_cell(&self, i: usize, j: usize) -> (usize, usize) {
        let last = GRID_SIZE - 1;
        match self {
            Direction::Up => (i, j),
            Direction::Right => (j, last - i),
            Direction::Down => (last - i, j),
            Direction::Left => (j, i),
        }
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts plain names ("Up") and the DOM key names a browser input
    /// layer produces ("ArrowUp")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Up" | "ArrowUp" => Ok(Direction::Up),
            "Right" | "ArrowRight" => Ok(Direction::Right),
            "Down" | "ArrowDown" => Ok(Direction::Down),
            "Left" | "ArrowLeft" => Ok(Direction::Left),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

/// One tile transition for the presentation layer to animate.
///
/// Every non-empty cell produces one event per resolved move, whether or not
/// it actually moves; spawned tiles have no origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    /// Slot index the tile started from, or `None` for a newly spawned tile
    pub from: Option<usize>,
    /// Slot index the tile ends up in
    pub to: usize,
    /// The tile's value before any merge (what it displays while sliding)
    pub value: CellValue,
    /// Whether the transition ends in a merge (the destination doubles)
    pub merged: bool,
}

impl MoveEvent {
    /// Event for a tile spawned at `to`
    pub fn spawn(to: usize, value: CellValue) -> Self {
        Self {
            from: None,
            to,
            value,
            merged: false,
        }
    }
}
