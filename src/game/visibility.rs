//! # Visibility Tracking
//!
//! Bookkeeping for the disappearing trail.
//!
//! Path cells start out visible so the route can be memorized. The first step
//! onto the path hides every path cell that is not yet part of the trail;
//! revealed cells stay lit for the rest of the attempt. Lanes and dead cells
//! are never touched.

use super::{Cell, GameEvent};
use crate::generation::Path;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Revealed trail and hidden path cells for one level attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityTracker {
    revealed: HashSet<Cell>,
    hidden: HashSet<Cell>,
}

impl VisibilityTracker {
    /// Creates an empty tracker with nothing revealed or hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `cell` to the trail. Idempotent.
    ///
    /// Returns the reveal event only when the cell was not already revealed.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::{Cell, GameEvent, VisibilityTracker};
    ///
    /// let mut tracker = VisibilityTracker::new();
    /// let cell = Cell::new(3, 1);
    /// assert_eq!(tracker.reveal(cell), Some(GameEvent::CellRevealed { cell }));
    /// assert_eq!(tracker.reveal(cell), None);
    /// assert!(tracker.is_revealed(cell));
    /// ```
    pub fn reveal(&mut self, cell: Cell) -> Option<GameEvent> {
        if self.revealed.insert(cell) {
            self.hidden.remove(&cell);
            Some(GameEvent::CellRevealed { cell })
        } else {
            None
        }
    }

    /// Hides every path cell that is not on the trail.
    ///
    /// Cells already hidden produce no event, so repeated calls are quiet.
    pub fn hide_unvisited(&mut self, path: &Path) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for cell in path.cells() {
            if !self.revealed.contains(&cell) && self.hidden.insert(cell) {
                events.push(GameEvent::CellHidden { cell });
            }
        }
        events
    }

    /// Whether a renderer should draw the cell at full opacity.
    ///
    /// Only path cells hidden by [`hide_unvisited`](Self::hide_unvisited)
    /// report false.
    pub fn is_visible(&self, cell: Cell) -> bool {
        !self.hidden.contains(&cell)
    }

    /// Whether the cell belongs to the trail.
    pub fn is_revealed(&self, cell: Cell) -> bool {
        self.revealed.contains(&cell)
    }

    /// Whether the cell has been faded out.
    pub fn is_hidden(&self, cell: Cell) -> bool {
        self.hidden.contains(&cell)
    }

    /// The revealed trail, in row-major order.
    pub fn trail(&self) -> Vec<Cell> {
        let mut trail: Vec<Cell> = self.revealed.iter().copied().collect();
        trail.sort();
        trail
    }

    pub fn trail_len(&self) -> usize {
        self.revealed.len()
    }

    pub fn hidden_len(&self) -> usize {
        self.hidden.len()
    }

    /// Clears the trail and the hidden set.
    ///
    /// Returns a single [`GameEvent::TrailCleared`] naming the former trail,
    /// or None when there was nothing to clear.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::{Cell, GameEvent, VisibilityTracker};
    ///
    /// let mut tracker = VisibilityTracker::new();
    /// tracker.reveal(Cell::new(2, 1));
    /// assert_eq!(
    ///     tracker.reset(),
    ///     Some(GameEvent::TrailCleared { cells: vec![Cell::new(2, 1)] })
    /// );
    /// assert_eq!(tracker.reset(), None);
    /// ```
    pub fn reset(&mut self) -> Option<GameEvent> {
        if self.revealed.is_empty() && self.hidden.is_empty() {
            return None;
        }
        let cells = self.trail();
        self.revealed.clear();
        self.hidden.clear();
        Some(GameEvent::TrailCleared { cells })
    }

    /// Every cell the tracker knows about, revealed or hidden.
    pub fn tracked_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.revealed.iter().chain(self.hidden.iter()).copied()
    }
}
