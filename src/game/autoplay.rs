//! # Autoplay Module
//!
//! Hint solver and an automatic driver that walks the hidden path.
//!
//! Useful for demos and for exercising whole sessions in tests. The solver only
//! ever steps onto safe cells, so it never dies.

use super::{Cell, CellKind, GridModel, Lane};
use pathfinding::prelude::bfs;

/// Shortest safe route from `from` to any exit-lane cell, both ends included.
///
/// Path cells and both lanes are walkable; dead cells are not. Returns None
/// when no route exists, which a generated path never causes.
///
/// # Examples
///
/// ```
/// use trailmaze::{solve_route, Cell, GridModel, GridSize, Path};
///
/// let size = GridSize::new(3, 4).unwrap();
/// let path = Path::from_steps(vec![Cell::new(1, 1), Cell::new(1, 2)]);
/// let grid = GridModel::new(size, path);
///
/// let route = solve_route(&grid, Cell::new(1, 1)).unwrap();
/// assert_eq!(route, vec![Cell::new(1, 1), Cell::new(1, 2), Cell::new(1, 3)]);
/// ```
pub fn solve_route(grid: &GridModel, from: Cell) -> Option<Vec<Cell>> {
    bfs(
        &from,
        |cell| {
            grid.neighbors(*cell)
                .filter(|neighbor| grid.classify(*neighbor).is_safe())
                .collect::<Vec<_>>()
        },
        |cell| grid.classify(*cell) == CellKind::BoundaryLane(Lane::Exit),
    )
}

/// Next safe step toward the exit, if any.
pub fn next_safe_step(grid: &GridModel, from: Cell) -> Option<Cell> {
    solve_route(grid, from).and_then(|route| route.get(1).copied())
}

/// Automatic driver state.
#[derive(Debug, Clone)]
pub struct Autoplay {
    /// Whether autoplay is currently enabled
    pub enabled: bool,
    /// Delay between steps in seconds
    pub step_delay: f64,
    since_last_step: f64,
}

impl Autoplay {
    /// Creates a disabled driver stepping twice per second.
    pub fn new() -> Self {
        Self {
            enabled: false,
            step_delay: 0.5,
            since_last_step: 0.0,
        }
    }

    /// Toggles autoplay on/off and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.since_last_step = 0.0;
        self.enabled
    }

    /// Accumulates frame time and decides whether a step is due.
    ///
    /// `ready` is whether the session is accepting moves. The timer only
    /// restarts after a step is actually taken.
    pub fn tick(&mut self, dt: f64, ready: bool) -> bool {
        if !self.enabled {
            return false;
        }
        self.since_last_step += dt;
        if ready && self.since_last_step >= self.step_delay {
            self.since_last_step = 0.0;
            true
        } else {
            false
        }
    }
}

impl Default for Autoplay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GridSize;
    use crate::generation::Path;

    fn sample_grid() -> GridModel {
        let size = GridSize::new(7, 9).unwrap();
        let path = Path::from_steps(vec![
            Cell::new(3, 1),
            Cell::new(3, 2),
            Cell::new(2, 2),
            Cell::new(2, 3),
            Cell::new(2, 4),
            Cell::new(2, 5),
            Cell::new(2, 6),
            Cell::new(2, 7),
        ]);
        GridModel::new(size, path)
    }

    #[test]
    fn test_route_follows_path_to_exit() {
        let grid = sample_grid();
        let route = solve_route(&grid, Cell::new(3, 1)).unwrap();

        assert_eq!(route.first(), Some(&Cell::new(3, 1)));
        assert_eq!(route.last(), Some(&Cell::new(2, 8)));
        for pair in route.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]));
        }
        for cell in &route {
            assert!(grid.classify(*cell).is_safe());
        }
    }

    #[test]
    fn test_route_from_entry_lane() {
        let grid = sample_grid();
        let route = solve_route(&grid, Cell::new(6, 0)).unwrap();
        assert_eq!(route.last().map(|cell| cell.col), Some(8));
        assert!(route.contains(&Cell::new(3, 0)));
        assert_eq!(next_safe_step(&grid, Cell::new(6, 0)), Some(Cell::new(5, 0)));
    }

    #[test]
    fn test_no_route_from_isolated_cell() {
        let size = GridSize::new(3, 5).unwrap();
        // (0, 2) is walled in by dead cells
        let path = Path::from_steps(vec![Cell::new(2, 3)]);
        let grid = GridModel::new(size, path);
        assert!(solve_route(&grid, Cell::new(0, 2)).is_none());
    }

    #[test]
    fn test_autoplay_toggle() {
        let mut autoplay = Autoplay::new();
        assert!(!autoplay.enabled);
        assert!(autoplay.toggle());
        assert!(!autoplay.toggle());
    }

    #[test]
    fn test_autoplay_waits_for_delay_and_readiness() {
        let mut autoplay = Autoplay::new();
        assert!(!autoplay.tick(1.0, true));

        autoplay.toggle();
        assert!(!autoplay.tick(0.25, true));
        assert!(!autoplay.tick(0.5, false));
        assert!(autoplay.tick(0.0, true));
        assert!(!autoplay.tick(0.1, true));
    }
}
