//! # Path Generation
//!
//! Random-walk generation of the hidden safe path.
//!
//! The walk starts in column 1 on a random row and repeatedly draws one of
//! three equally likely directions: up, down or right. Up and down are ignored
//! when they would leave the grid, but the step still records a cell, so a path
//! may contain immediate repeats. The walk ends once it reaches column
//! `cols - 2`, the last interior column.

use super::{GenerationConfig, Generator, RandomSource};
use crate::game::{Cell, GridSize};
use crate::{MazeError, MazeResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The hidden safe path of a level.
///
/// Keeps the generated step sequence for provenance and a membership set for
/// classification. Serializes as the plain step list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Path {
    steps: Vec<Cell>,
    members: HashSet<Cell>,
}

impl Path {
    /// Builds a path from its step sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::{Cell, Path};
    ///
    /// let path = Path::from_steps(vec![Cell::new(0, 1), Cell::new(0, 1), Cell::new(0, 2)]);
    /// assert_eq!(path.len(), 3);
    /// assert_eq!(path.cells().count(), 2);
    /// assert!(path.contains(Cell::new(0, 2)));
    /// ```
    pub fn from_steps(steps: Vec<Cell>) -> Self {
        let members = steps.iter().copied().collect();
        Self { steps, members }
    }

    /// The generated steps in order, repeats included.
    pub fn steps(&self) -> &[Cell] {
        &self.steps
    }

    /// Distinct path cells in first-visit order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let mut seen = HashSet::with_capacity(self.members.len());
        self.steps.iter().copied().filter(move |cell| seen.insert(*cell))
    }

    /// Membership test, ignoring order.
    pub fn contains(&self, cell: Cell) -> bool {
        self.members.contains(&cell)
    }

    /// Entry cell of the path, where the player spawns.
    pub fn first(&self) -> Option<Cell> {
        self.steps.first().copied()
    }

    /// Final cell of the path, in the last interior column.
    pub fn last(&self) -> Option<Cell> {
        self.steps.last().copied()
    }

    /// Number of generated steps, repeats included.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of distinct cells on the path.
    pub fn unique_len(&self) -> usize {
        self.members.len()
    }
}

impl From<Vec<Cell>> for Path {
    fn from(steps: Vec<Cell>) -> Self {
        Self::from_steps(steps)
    }
}

impl From<Path> for Vec<Cell> {
    fn from(path: Path) -> Self {
        path.steps
    }
}

/// One draw of the random walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStep {
    Up,
    Down,
    Right,
}

impl WalkStep {
    /// Maps a draw in `0..3` to a step.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => WalkStep::Up,
            1 => WalkStep::Down,
            _ => WalkStep::Right,
        }
    }
}

/// Random-walk path generator.
#[derive(Debug, Clone, Default)]
pub struct PathGenerator;

impl PathGenerator {
    /// Creates a new path generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::{GenerationConfig, Generator, PathGenerator};
    /// use trailmaze::generation::utils::create_rng;
    ///
    /// let config = GenerationConfig::new(7);
    /// let mut rng = create_rng(&config);
    /// let path = PathGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert_eq!(path.first().unwrap().col, 1);
    /// assert_eq!(path.last().unwrap().col, 7);
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Walks a path across a grid of the given size.
    pub fn walk<R: RandomSource + ?Sized>(&self, size: GridSize, rng: &mut R) -> Path {
        let last_col = size.last_interior_col();
        let mut row = rng.pick(size.rows as usize) as i32;
        let mut col = 1;

        let mut steps = vec![Cell::new(row, col)];
        while col < last_col {
            match WalkStep::from_index(rng.pick(3)) {
                WalkStep::Up if row > 0 => row -= 1,
                WalkStep::Down if row < size.rows - 1 => row += 1,
                WalkStep::Right => col += 1,
                // Blocked at the edge: the step still records the current cell
                _ => {}
            }
            steps.push(Cell::new(row, col));
        }

        Path::from_steps(steps)
    }
}

impl Generator<Path> for PathGenerator {
    fn generate<R: RandomSource + ?Sized>(
        &self,
        config: &GenerationConfig,
        rng: &mut R,
    ) -> MazeResult<Path> {
        let size = config.grid_size()?;
        let path = self.walk(size, rng);
        self.validate(&path, config)?;

        debug!(
            "{} produced {} steps ({} cells) on a {}x{} grid",
            self.generator_type(),
            path.len(),
            path.unique_len(),
            size.rows,
            size.cols
        );
        Ok(path)
    }

    fn validate(&self, path: &Path, config: &GenerationConfig) -> MazeResult<()> {
        let size = config.grid_size()?;
        validate_path(path, size)
    }

    fn generator_type(&self) -> &'static str {
        "PathGenerator"
    }
}

/// Checks the structural invariants of a path on a grid.
///
/// The path must start in column 1, end in column `cols - 2`, stay inside the
/// row range, and every consecutive pair must move at most one row and either
/// zero or one column to the right.
pub fn validate_path(path: &Path, size: GridSize) -> MazeResult<()> {
    let (first, last) = match (path.first(), path.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(MazeError::GenerationFailed("Path is empty".to_string())),
    };

    if first.col != 1 {
        return Err(MazeError::GenerationFailed(format!(
            "Path starts in column {} instead of 1",
            first.col
        )));
    }
    if last.col != size.last_interior_col() {
        return Err(MazeError::GenerationFailed(format!(
            "Path ends in column {} instead of {}",
            last.col,
            size.last_interior_col()
        )));
    }

    if let Some(cell) = path.steps().iter().find(|cell| !size.contains(**cell)) {
        return Err(MazeError::GenerationFailed(format!(
            "Path leaves the grid at {}",
            cell
        )));
    }

    for pair in path.steps().windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let row_delta = (to.row - from.row).abs();
        let col_delta = to.col - from.col;
        if row_delta > 1 || !(0..=1).contains(&col_delta) {
            return Err(MazeError::GenerationFailed(format!(
                "Invalid step from {} to {}",
                from, to
            )));
        }
    }

    Ok(())
}
