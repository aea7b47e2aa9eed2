//! # Game Module
//!
//! The maze engine: grid model, visibility bookkeeping, the move state machine,
//! level progress, timers and the session that ties them together.
//!
//! Coordinates are `(row, col)` with row 0 at the top. Column 0 is the entry
//! lane and the last column is the exit lane.

pub mod autoplay;
pub mod controller;
pub mod events;
pub mod grid;
pub mod level;
pub mod player;
pub mod progress;
pub mod scheduler;
pub mod state;
pub mod visibility;

pub use autoplay::*;
pub use controller::*;
pub use events::*;
pub use grid::*;
pub use level::*;
pub use player::*;
pub use progress::*;
pub use scheduler::*;
pub use state::*;
pub use visibility::*;

use serde::{Deserialize, Serialize};

/// A cell on the maze grid.
///
/// # Examples
///
/// ```
/// use trailmaze::Cell;
///
/// let cell = Cell::new(3, 1);
/// assert_eq!(cell.row, 3);
/// assert_eq!(cell.col, 1);
/// assert!(cell.is_adjacent(Cell::new(3, 2)));
/// assert!(!cell.is_adjacent(Cell::new(4, 2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Creates a new cell at the given row and column.
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Calculates the Manhattan distance to another cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::Cell;
    ///
    /// assert_eq!(Cell::new(0, 0).manhattan_distance(Cell::new(3, 4)), 7);
    /// ```
    pub fn manhattan_distance(self, other: Cell) -> u32 {
        ((self.row - other.row).abs() + (self.col - other.col).abs()) as u32
    }

    /// True when `other` is exactly one orthogonal step away.
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Returns the cell one step away in the given direction.
    pub fn step(self, facing: Facing) -> Cell {
        let (dr, dc) = facing.to_delta();
        Cell::new(self.row + dr, self.col + dc)
    }

    /// Returns the 4 orthogonal neighbours (up, left, right, down).
    pub fn cardinal_neighbors(self) -> [Cell; 4] {
        [
            self.step(Facing::Up),
            self.step(Facing::Left),
            self.step(Facing::Right),
            self.step(Facing::Down),
        ]
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orientation of the player sprite, derived from the last move's delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// Converts a facing to a `(row, col)` delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::Facing;
    ///
    /// assert_eq!(Facing::Up.to_delta(), (-1, 0));
    /// assert_eq!(Facing::Right.to_delta(), (0, 1));
    /// ```
    pub fn to_delta(self) -> (i32, i32) {
        match self {
            Facing::Up => (-1, 0),
            Facing::Down => (1, 0),
            Facing::Left => (0, -1),
            Facing::Right => (0, 1),
        }
    }

    /// Derives the facing for a move from `from` to `to`.
    ///
    /// Row changes win over column changes, so a diagonal delta faces up or
    /// down. Returns None when the cells are equal.
    pub fn between(from: Cell, to: Cell) -> Option<Facing> {
        if to.row < from.row {
            Some(Facing::Up)
        } else if to.row > from.row {
            Some(Facing::Down)
        } else if to.col > from.col {
            Some(Facing::Right)
        } else if to.col < from.col {
            Some(Facing::Left)
        } else {
            None
        }
    }

    /// Rotation in radians for a sprite drawn facing right at 0.
    pub fn rotation(self) -> f32 {
        match self {
            Facing::Right => 0.0,
            Facing::Down => std::f32::consts::FRAC_PI_2,
            Facing::Left => std::f32::consts::PI,
            Facing::Up => -std::f32::consts::FRAC_PI_2,
        }
    }

    /// Returns all 4 facings.
    pub fn all() -> [Facing; 4] {
        [Facing::Up, Facing::Down, Facing::Left, Facing::Right]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_creation() {
        let cell = Cell::new(5, 2);
        assert_eq!(cell.row, 5);
        assert_eq!(cell.col, 2);
    }

    #[test]
    fn test_cell_adjacency() {
        let cell = Cell::new(3, 3);
        for neighbor in cell.cardinal_neighbors() {
            assert!(cell.is_adjacent(neighbor));
        }
        assert!(!cell.is_adjacent(cell));
        assert!(!cell.is_adjacent(Cell::new(4, 4)));
        assert!(!cell.is_adjacent(Cell::new(3, 5)));
    }

    #[test]
    fn test_facing_between() {
        let origin = Cell::new(3, 3);
        assert_eq!(Facing::between(origin, Cell::new(2, 3)), Some(Facing::Up));
        assert_eq!(Facing::between(origin, Cell::new(4, 3)), Some(Facing::Down));
        assert_eq!(Facing::between(origin, Cell::new(3, 4)), Some(Facing::Right));
        assert_eq!(Facing::between(origin, Cell::new(3, 2)), Some(Facing::Left));
        assert_eq!(Facing::between(origin, origin), None);
    }

    #[test]
    fn test_step_round_trips_with_between() {
        let origin = Cell::new(3, 3);
        for facing in Facing::all() {
            assert_eq!(Facing::between(origin, origin.step(facing)), Some(facing));
        }
    }
}
