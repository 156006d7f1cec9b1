//! The 4x4 tile grid and the slide/merge resolution that drives each turn.
//!
//! This module contains:
//! - The `Board` with its 16 ordered cell slots
//! - The per-direction slide and merge algorithm
//! - Random tile spawning into empty cells
//! - Legal-move queries used for loss detection

use crate::actions::{Direction, MoveEvent};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the square grid
pub const GRID_SIZE: usize = 4;

/// Total number of cell slots
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Value of every newly spawned tile
pub const SPAWN_VALUE: CellValue = 2;

/// A single cell value: 0 for empty, otherwise a power of two >= 2
pub type CellValue = u32;

/// The 4x4 game board, stored row-major as 16 ordered slots (`row * 4 + col`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [CellValue; CELL_COUNT],
}

/// Result of resolving one direction against the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideOutcome {
    /// Whether any tile changed position or value
    pub moved: bool,
    /// One event per non-empty source cell, in processing order
    pub events: Vec<MoveEvent>,
    /// Score delta: the sum of post-merge destination values
    pub points: u32,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [0; CELL_COUNT],
        }
    }

    /// Create a board from raw cell values (for tests and adapters)
    pub fn from_cells(cells: [CellValue; CELL_COUNT]) -> Self {
        debug_assert!(
            cells.iter().all(|&v| v == 0 || (v >= 2 && v.is_power_of_two())),
            "non-empty cells must hold powers of two >= 2"
        );
        Self { cells }
    }

    /// The raw cell slots, row-major
    pub fn cells(&self) -> &[CellValue; CELL_COUNT] {
        &self.cells
    }

    /// Value at a slot index
    pub fn get(&self, slot: usize) -> CellValue {
        self.cells[slot]
    }

    /// Indices of all empty slots
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Whether no empty slot remains
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Largest tile value on the board (0 when empty)
    pub fn max_tile(&self) -> CellValue {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Whether two equal tiles sit adjacent in some row or column
    pub fn has_adjacent_pair(&self) -> bool {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let value = self.cells[row * GRID_SIZE + col];
                if value == 0 {
                    continue;
                }
                if col + 1 < GRID_SIZE && self.cells[row * GRID_SIZE + col + 1] == value {
                    return true;
                }
                if row + 1 < GRID_SIZE && self.cells[(row + 1) * GRID_SIZE + col] == value {
                    return true;
                }
            }
        }
        false
    }

    /// Whether any of the four directions could still change the board.
    /// An empty slot always leaves room to slide; a full board needs an
    /// adjacent equal pair to allow a merge.
    pub fn has_moves(&self) -> bool {
        !self.is_full() || self.has_adjacent_pair()
    }

    /// Slide and merge all tiles toward `direction`, mutating the board in
    /// place.
    ///
    /// Cells are processed nearest-target-edge first. Each non-empty source
    /// cell walks step by step along the direction's unit vector: an empty
    /// cell extends the walk, an equal-valued occupied cell ends it with a
    /// merge (the destination doubles), any other occupied cell blocks. One
    /// `MoveEvent` is emitted per source cell, movement or not.
    pub fn slide(&mut self, direction: Direction) -> SlideOutcome {
        let (dr, dc) = direction.delta();
        let mut events = Vec::new();
        let mut points = 0;
        let mut moved = false;
        // Destinations that already received a merge this call. Such a cell
        // blocks a later equal tile instead of absorbing it, so no slot
        // doubles twice in one move ([2,2,4] left is [4,4], never [8]).
        let mut merged_into = [false; CELL_COUNT];

        for i in 0..GRID_SIZE {
            for j in 0..GRID_SIZE {
                let (row, col) = direction.scan_cell(i, j);
                let start = row * GRID_SIZE + col;
                let value = self.cells[start];
                if value == 0 {
                    continue;
                }

                let (mut r, mut c) = (row as isize, col as isize);
                let mut merged = false;
                loop {
                    let (tr, tc) = (r + dr, c + dc);
                    if tr < 0 || tr >= GRID_SIZE as isize || tc < 0 || tc >= GRID_SIZE as isize {
                        break;
                    }
                    let target = tr as usize * GRID_SIZE + tc as usize;
                    if self.cells[target] != 0 {
                        if self.cells[target] == value && !merged_into[target] {
                            merged = true;
                            r = tr;
                            c = tc;
                        }
                        break;
                    }
                    r = tr;
                    c = tc;
                }

                let end = r as usize * GRID_SIZE + c as usize;
                if merged {
                    self.cells[end] = value * 2;
                    merged_into[end] = true;
                    points += self.cells[end];
                } else {
                    self.cells[end] = value;
                }
                events.push(MoveEvent {
                    from: Some(start),
                    to: end,
                    value,
                    merged,
                });
                if start != end {
                    self.cells[start] = 0;
                    moved = true;
                }
            }
        }

        SlideOutcome {
            moved,
            events,
            points,
        }
    }

    /// Place a new tile of [`SPAWN_VALUE`] in an empty slot chosen uniformly
    /// at random among all empty slots.
    ///
    /// Panics if the board is full; the turn pipeline only spawns after a
    /// confirmed move, so a full board here is a caller bug.
    pub fn spawn_with_rng<R: Rng>(&mut self, rng: &mut R) -> MoveEvent {
        let empty = self.empty_cells();
        assert!(!empty.is_empty(), "spawn called on a full board");
        let slot = empty[rng.gen_range(0..empty.len())];
        self.cells[slot] = SPAWN_VALUE;
        MoveEvent::spawn(slot, SPAWN_VALUE)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let value = self.cells[row * GRID_SIZE + col];
                if value == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{:>6}", value)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sorted_tiles(board: &Board) -> Vec<CellValue> {
        let mut tiles: Vec<CellValue> =
            board.cells().iter().copied().filter(|&v| v != 0).collect();
        tiles.sort_unstable();
        tiles
    }

    #[test]
    fn test_pair_merges_left() {
        let mut board = Board::from_cells([
            2, 2, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        let outcome = board.slide(Direction::Left);

        assert_eq!(board.cells()[0..4], [4, 0, 0, 0]);
        assert!(outcome.moved);
        assert_eq!(outcome.points, 4);
        assert_eq!(outcome.events.iter().filter(|e| e.merged).count(), 1);
    }

    #[test]
    fn test_trailing_tiles_follow_merge() {
        let mut board = Board::from_cells([
            0, 2, 2, 2, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        let outcome = board.slide(Direction::Left);

        assert_eq!(board.cells()[0..4], [4, 2, 0, 0]);
        assert!(outcome.moved);
        assert_eq!(outcome.points, 4);
    }

    #[test]
    fn test_merged_destination_blocks_second_merge() {
        // [2,2,4] left must settle as [4,4], not cascade into [8].
        let mut board = Board::from_cells([
            2, 2, 4, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        let outcome = board.slide(Direction::Left);

        assert_eq!(board.cells()[0..4], [4, 4, 0, 0]);
        assert_eq!(outcome.points, 4);
        assert_eq!(outcome.events.iter().filter(|e| e.merged).count(), 1);
    }

    #[test]
    fn test_four_equal_tiles_merge_pairwise() {
        let mut board = Board::from_cells([
            2, 2, 2, 2, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        let outcome = board.slide(Direction::Left);

        assert_eq!(board.cells()[0..4], [4, 4, 0, 0]);
        assert_eq!(outcome.points, 8);
        assert_eq!(outcome.events.iter().filter(|e| e.merged).count(), 2);
    }

    #[test]
    fn test_unequal_neighbor_blocks() {
        let mut board = Board::from_cells([
            2, 4, 2, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        let outcome = board.slide(Direction::Left);

        assert_eq!(board.cells()[0..4], [2, 4, 2, 0]);
        assert!(!outcome.moved);
        assert_eq!(outcome.points, 0);
    }

    #[test]
    fn test_slide_right() {
        let mut board = Board::from_cells([
            2, 2, 0, 0, //
            0, 4, 4, 0, //
            2, 0, 2, 0, //
            8, 8, 8, 8,
        ]);
        let outcome = board.slide(Direction::Right);

        assert_eq!(
            *board.cells(),
            [
                0, 0, 0, 4, //
                0, 0, 0, 8, //
                0, 0, 0, 4, //
                0, 0, 16, 16,
            ]
        );
        assert_eq!(outcome.points, 4 + 8 + 4 + 32);
    }

    #[test]
    fn test_slide_up() {
        let mut board = Board::from_cells([
            2, 0, 2, 8, //
            2, 4, 0, 8, //
            0, 4, 2, 8, //
            0, 0, 0, 8,
        ]);
        let outcome = board.slide(Direction::Up);

        assert_eq!(
            *board.cells(),
            [
                4, 8, 4, 16, //
                0, 0, 0, 16, //
                0, 0, 0, 0, //
                0, 0, 0, 0,
            ]
        );
        assert_eq!(outcome.points, 4 + 8 + 4 + 32);
    }

    #[test]
    fn test_slide_down() {
        let mut board = Board::from_cells([
            2, 0, 2, 8, //
            2, 4, 0, 8, //
            0, 4, 2, 8, //
            0, 0, 0, 8,
        ]);
        let outcome = board.slide(Direction::Down);

        assert_eq!(
            *board.cells(),
            [
                0, 0, 0, 0, //
                0, 0, 0, 0, //
                0, 0, 0, 16, //
                4, 8, 4, 16,
            ]
        );
        assert_eq!(outcome.points, 4 + 8 + 4 + 32);
    }

    #[test]
    fn test_pure_shift_conserves_tiles() {
        let mut board = Board::from_cells([
            0, 2, 0, 4, //
            8, 0, 0, 0, //
            0, 0, 16, 0, //
            0, 32, 0, 0,
        ]);
        let before = sorted_tiles(&board);
        let outcome = board.slide(Direction::Left);

        assert!(outcome.moved);
        assert_eq!(outcome.points, 0);
        assert_eq!(sorted_tiles(&board), before);
    }

    #[test]
    fn test_merge_conserves_board_sum() {
        let mut board = Board::from_cells([
            4, 4, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        let sum_before: u32 = board.cells().iter().sum();
        let outcome = board.slide(Direction::Left);
        let sum_after: u32 = board.cells().iter().sum();

        // Two tiles valued v become one tile valued 2v: the board sum is
        // unchanged, and the score gains the post-merge value 2v.
        assert_eq!(sum_after, sum_before);
        assert_eq!(outcome.points, 8);
    }

    #[test]
    fn test_no_op_emits_no_movement() {
        let mut board = Board::from_cells([
            2, 0, 0, 0, //
            4, 0, 0, 0, //
            8, 0, 0, 0, //
            16, 0, 0, 0,
        ]);
        let before = board.clone();
        let outcome = board.slide(Direction::Left);

        assert!(!outcome.moved);
        assert_eq!(board, before);
        // Every non-empty cell still reports an event, all in place.
        assert_eq!(outcome.events.len(), 4);
        assert!(outcome.events.iter().all(|e| e.from == Some(e.to)));
    }

    #[test]
    fn test_event_per_source_cell() {
        let mut board = Board::from_cells([
            2, 2, 4, 0, //
            0, 8, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        let outcome = board.slide(Direction::Left);

        assert_eq!(outcome.events.len(), 4);
    }

    #[test]
    fn test_spawn_fills_the_only_empty_cell() {
        let mut cells = [2; CELL_COUNT];
        cells[9] = 0;
        let mut board = Board::from_cells(cells);
        let mut rng = rand::thread_rng();

        let event = board.spawn_with_rng(&mut rng);

        assert_eq!(event, MoveEvent::spawn(9, SPAWN_VALUE));
        assert!(board.is_full());
    }

    #[test]
    fn test_spawn_only_targets_empty_cells() {
        let mut board = Board::new();
        let mut rng = rand::thread_rng();

        for n in 1..=CELL_COUNT {
            let event = board.spawn_with_rng(&mut rng);
            assert_eq!(event.value, SPAWN_VALUE);
            assert_eq!(board.empty_cells().len(), CELL_COUNT - n);
        }
        assert!(board.is_full());
    }

    #[test]
    #[should_panic(expected = "spawn called on a full board")]
    fn test_spawn_on_full_board_panics() {
        let mut board = Board::from_cells([2; CELL_COUNT]);
        let mut rng = rand::thread_rng();
        board.spawn_with_rng(&mut rng);
    }

    #[test]
    fn test_full_board_with_pair_still_has_moves() {
        let board = Board::from_cells([
            2, 4, 2, 4, //
            4, 2, 4, 2, //
            2, 4, 2, 4, //
            4, 2, 2, 4, // adjacent pair at row 3
        ]);
        assert!(board.is_full());
        assert!(board.has_adjacent_pair());
        assert!(board.has_moves());
    }

    #[test]
    fn test_checkerboard_has_no_moves() {
        let board = Board::from_cells([
            2, 4, 2, 4, //
            4, 2, 4, 2, //
            2, 4, 2, 4, //
            4, 2, 4, 2,
        ]);
        assert!(board.is_full());
        assert!(!board.has_moves());
    }

    #[test]
    fn test_board_with_empty_cell_has_moves() {
        let mut cells = [2; CELL_COUNT];
        cells[0] = 0;
        // Even without an adjacent pair check, an empty slot means movable.
        let board = Board::from_cells(cells);
        assert!(board.has_moves());
    }

    #[test]
    fn test_display_shows_grid() {
        let board = Board::from_cells([
            2, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 1024,
        ]);
        let shown = board.to_string();
        assert!(shown.contains('2'));
        assert!(shown.contains("1024"));
        assert_eq!(shown.lines().count(), GRID_SIZE);
    }
}
