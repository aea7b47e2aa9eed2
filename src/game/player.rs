//! # Player State
//!
//! Position, status and orientation of the player within one level attempt.

use super::{Cell, Facing};
use serde::{Deserialize, Serialize};

/// Lifecycle status of the player in the current attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    Alive,
    Dead,
    Won,
}

/// The player's current cell, status and facing.
///
/// Only the move controller mutates this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Cell,
    pub status: PlayerStatus,
    pub facing: Facing,
}

impl PlayerState {
    /// Creates a living player at `position`, facing the exit.
    pub fn new(position: Cell) -> Self {
        Self {
            position,
            status: PlayerStatus::Alive,
            facing: Facing::Right,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status == PlayerStatus::Alive
    }
}
