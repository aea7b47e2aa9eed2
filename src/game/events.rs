//! # Game Events
//!
//! Discrete notifications emitted by the engine. Renderers, audio and the HUD
//! consume these instead of polling engine state.

use super::{Cell, Facing};
use serde::{Deserialize, Serialize};

/// Events produced by the maze engine, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new level attempt began with the player on `start`
    LevelStarted { level: u32, start: Cell },
    /// A move was accepted and is settling
    MoveStarted { from: Cell, to: Cell, facing: Facing },
    /// A path cell joined the trail
    CellRevealed { cell: Cell },
    /// An unvisited path cell faded out
    CellHidden { cell: Cell },
    /// The attempt ended in victory and the trail was wiped; `cells` is the
    /// trail as it stood
    TrailCleared { cells: Vec<Cell> },
    /// The player committed a move onto a path cell or the entry lane
    PlayerMoved { from: Cell, to: Cell, facing: Facing },
    /// The player stepped onto a dead cell
    PlayerDied { at: Cell },
    /// The player reached the exit lane
    PlayerWon { at: Cell },
    /// The level counter changed
    LevelChanged { level: u32 },
    /// The level reached before a fatal move
    HeightReached { level: u32 },
}

impl GameEvent {
    /// True for the events that conclude a move: moved, died or won.
    pub fn is_move_outcome(&self) -> bool {
        matches!(
            self,
            GameEvent::PlayerMoved { .. }
                | GameEvent::PlayerDied { .. }
                | GameEvent::PlayerWon { .. }
        )
    }

    /// Short human-readable description for message logs.
    pub fn describe(&self) -> Option<String> {
        match self {
            GameEvent::LevelStarted { level, .. } => Some(format!("Level {} begins", level)),
            GameEvent::PlayerDied { .. } => Some("You fell off the path!".to_string()),
            GameEvent::PlayerWon { .. } => Some("You made it across!".to_string()),
            GameEvent::HeightReached { level } => {
                Some(format!("Height level reached: {}", level))
            }
            _ => None,
        }
    }
}
