//! # Grid Model
//!
//! Grid dimensions and per-cell classification.
//!
//! The first and last columns are boundary lanes and never kill the player.
//! Every interior cell is either on the level's path or a dead cell.

use super::Cell;
use crate::generation::Path;
use crate::{MazeError, MazeResult};
use serde::{Deserialize, Serialize};

/// Grid dimensions. `rows >= 1` and `cols >= 3` once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: i32,
    pub cols: i32,
}

impl GridSize {
    /// Creates a validated grid size.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::GridSize;
    ///
    /// assert!(GridSize::new(7, 9).is_ok());
    /// assert!(GridSize::new(0, 9).is_err());
    /// assert!(GridSize::new(7, 2).is_err());
    /// ```
    pub fn new(rows: i32, cols: i32) -> MazeResult<Self> {
        let reason = if rows < 1 {
            Some("at least one row is required")
        } else if cols < 3 {
            Some("at least three columns are required (two lanes and one interior column)")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(MazeError::Configuration {
                rows: rows as i64,
                cols: cols as i64,
                reason: reason.to_string(),
            }),
            None => Ok(Self { rows, cols }),
        }
    }

    /// Column of the entry lane.
    pub fn entry_col(&self) -> i32 {
        0
    }

    /// Column of the exit lane.
    pub fn exit_col(&self) -> i32 {
        self.cols - 1
    }

    /// Last interior column, where every path ends.
    pub fn last_interior_col(&self) -> i32 {
        self.cols - 2
    }

    /// Checks if a cell lies inside the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.row < self.rows && cell.col >= 0 && cell.col < self.cols
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
    }
}

/// Which boundary lane a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    /// Column 0
    Entry,
    /// Last column
    Exit,
}

/// Classification of a cell for the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Column 0 or the last column, always safe
    BoundaryLane(Lane),
    /// Interior cell on the hidden path
    PathCell,
    /// Interior cell off the path
    DeadCell,
}

impl CellKind {
    /// Stepping onto this cell does not kill the player.
    pub fn is_safe(self) -> bool {
        !matches!(self, CellKind::DeadCell)
    }
}

/// The classified grid of one level. Immutable once the level starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridModel {
    size: GridSize,
    path: Path,
}

impl GridModel {
    /// Creates a grid model for a level's path.
    pub fn new(size: GridSize, path: Path) -> Self {
        Self { size, path }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks if a cell lies inside the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        self.size.contains(cell)
    }

    /// Returns the lane a cell sits in, if any.
    pub fn lane_of(&self, cell: Cell) -> Option<Lane> {
        if cell.col == self.size.entry_col() {
            Some(Lane::Entry)
        } else if cell.col == self.size.exit_col() {
            Some(Lane::Exit)
        } else {
            None
        }
    }

    /// Classifies a cell. Lanes take precedence over path membership.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::{Cell, CellKind, GridModel, GridSize, Lane, Path};
    ///
    /// let size = GridSize::new(3, 4).unwrap();
    /// let path = Path::from_steps(vec![Cell::new(1, 1), Cell::new(1, 2)]);
    /// let grid = GridModel::new(size, path);
    ///
    /// assert_eq!(grid.classify(Cell::new(1, 0)), CellKind::BoundaryLane(Lane::Entry));
    /// assert_eq!(grid.classify(Cell::new(0, 3)), CellKind::BoundaryLane(Lane::Exit));
    /// assert_eq!(grid.classify(Cell::new(1, 2)), CellKind::PathCell);
    /// assert_eq!(grid.classify(Cell::new(0, 2)), CellKind::DeadCell);
    /// ```
    pub fn classify(&self, cell: Cell) -> CellKind {
        match self.lane_of(cell) {
            Some(lane) => CellKind::BoundaryLane(lane),
            None if self.path.contains(cell) => CellKind::PathCell,
            None => CellKind::DeadCell,
        }
    }

    /// Manhattan distance between the cells is exactly 1.
    pub fn is_adjacent(&self, a: Cell, b: Cell) -> bool {
        a.is_adjacent(b)
    }

    /// In-bounds orthogonal neighbours of a cell.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        cell.cardinal_neighbors()
            .into_iter()
            .filter(move |neighbor| self.contains(*neighbor))
    }
}
