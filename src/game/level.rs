//! # Level
//!
//! One level instance: the classified grid with its path, and the controller
//! that owns the player and the trail for this attempt.

use super::{Cell, CommittedMove, GameEvent, GridModel, MoveController, MoveRequest};
use crate::{MazeError, MazeResult};

/// A single level attempt.
#[derive(Debug, Clone)]
pub struct Level {
    number: u32,
    grid: GridModel,
    controller: MoveController,
}

impl Level {
    /// Creates a level with the player on the first path cell.
    ///
    /// Returns the level and the events announcing it.
    pub fn start(number: u32, grid: GridModel) -> MazeResult<(Self, Vec<GameEvent>)> {
        let start = grid
            .path()
            .first()
            .ok_or_else(|| MazeError::GenerationFailed("Level path is empty".to_string()))?;

        let mut level = Self {
            number,
            grid,
            controller: MoveController::new(start),
        };

        let mut events = vec![GameEvent::LevelStarted {
            level: number,
            start,
        }];
        events.extend(level.controller.reveal_position(&level.grid));

        Ok((level, events))
    }

    /// Rebuilds a level from saved parts.
    pub fn from_parts(number: u32, grid: GridModel, controller: MoveController) -> Self {
        Self {
            number,
            grid,
            controller,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn controller(&self) -> &MoveController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut MoveController {
        &mut self.controller
    }

    /// Forwards a move request to the controller.
    pub fn request_move(&mut self, target: Cell) -> MoveRequest {
        self.controller.request_move(&self.grid, target)
    }

    /// Commits the settling move, if any.
    pub fn complete_move(&mut self) -> Option<CommittedMove> {
        self.controller.complete_move(&self.grid)
    }
}
