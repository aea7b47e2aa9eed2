//! # Move Controller
//!
//! The state machine that decides every move of a level attempt.
//!
//! ```text
//!            request_move (accepted)
//!   Idle ─────────────────────────────▶ Transitioning
//!    ▲                                      │ complete_move
//!    │        Traverse / SafeLane           │
//!    └──────────────────────────────────────┤
//!                                  Die ─────┼────▶ Dead
//!                                  Win ─────┴────▶ Won
//! ```
//!
//! A move is accepted in `Idle` only, so a second request while the first is
//! still settling is rejected rather than queued. `Dead` and `Won` are terminal
//! for the attempt.

use super::{
    Cell, CellKind, Facing, GameEvent, GridModel, Lane, PlayerState, PlayerStatus,
    VisibilityTracker,
};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// What a move onto a cell will do once it settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Onto a path cell: hide the unvisited path, reveal the cell, move
    Traverse,
    /// Onto the entry lane: move without touching visibility
    SafeLane,
    /// Onto a dead cell
    Die,
    /// Onto the exit lane
    Win,
}

impl MoveOutcome {
    /// The decision table for a target cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::{CellKind, Lane, MoveOutcome};
    ///
    /// assert_eq!(MoveOutcome::decide(CellKind::PathCell), MoveOutcome::Traverse);
    /// assert_eq!(MoveOutcome::decide(CellKind::DeadCell), MoveOutcome::Die);
    /// assert_eq!(MoveOutcome::decide(CellKind::BoundaryLane(Lane::Entry)), MoveOutcome::SafeLane);
    /// assert_eq!(MoveOutcome::decide(CellKind::BoundaryLane(Lane::Exit)), MoveOutcome::Win);
    /// ```
    pub fn decide(kind: CellKind) -> Self {
        match kind {
            CellKind::PathCell => MoveOutcome::Traverse,
            CellKind::DeadCell => MoveOutcome::Die,
            CellKind::BoundaryLane(Lane::Entry) => MoveOutcome::SafeLane,
            CellKind::BoundaryLane(Lane::Exit) => MoveOutcome::Win,
        }
    }

    /// True when the attempt ends with this outcome.
    pub fn is_terminal(self) -> bool {
        matches!(self, MoveOutcome::Die | MoveOutcome::Win)
    }
}

/// An accepted move waiting for its settle delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMove {
    pub from: Cell,
    pub to: Cell,
    pub facing: Facing,
    pub outcome: MoveOutcome,
}

/// Why a move request was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// Target lies outside the grid
    OutOfBounds,
    /// Target is not one orthogonal step from the player
    NotAdjacent,
    /// Another move is still settling
    InTransition,
    /// The attempt already ended in death or victory
    LevelOver,
}

/// A move request that was ignored. Nothing changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedMove {
    pub target: Cell,
    pub reason: RejectReason,
}

impl std::fmt::Display for RejectedMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self.reason {
            RejectReason::OutOfBounds => "outside the grid",
            RejectReason::NotAdjacent => "not adjacent",
            RejectReason::InTransition => "a move is in progress",
            RejectReason::LevelOver => "the level is over",
        };
        write!(f, "move to {} rejected: {}", self.target, reason)
    }
}

/// Result of a move request.
pub type MoveRequest = Result<PendingMove, RejectedMove>;

/// A settled move and the events it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedMove {
    pub pending: PendingMove,
    pub events: Vec<GameEvent>,
}

/// Controller states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerState {
    Idle,
    Transitioning(PendingMove),
    Dead,
    Won,
}

/// Gated move state machine for one level attempt.
///
/// Owns the attempt's [`PlayerState`] and [`VisibilityTracker`]; the grid is
/// owned by the level and passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveController {
    state: ControllerState,
    player: PlayerState,
    visibility: VisibilityTracker,
}

impl MoveController {
    /// Creates an idle controller with the player on `start`.
    pub fn new(start: Cell) -> Self {
        Self {
            state: ControllerState::Idle,
            player: PlayerState::new(start),
            visibility: VisibilityTracker::new(),
        }
    }

    /// Rebuilds a controller from saved player and visibility state.
    ///
    /// Dead or victorious players restore into the matching terminal state.
    pub fn restore(player: PlayerState, visibility: VisibilityTracker) -> Self {
        let state = match player.status {
            PlayerStatus::Alive => ControllerState::Idle,
            PlayerStatus::Dead => ControllerState::Dead,
            PlayerStatus::Won => ControllerState::Won,
        };
        Self {
            state,
            player,
            visibility,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn visibility(&self) -> &VisibilityTracker {
        &self.visibility
    }

    /// True when a move request would be considered.
    pub fn is_idle(&self) -> bool {
        self.state == ControllerState::Idle
    }

    /// The move currently settling, if any.
    pub fn pending(&self) -> Option<PendingMove> {
        match self.state {
            ControllerState::Transitioning(pending) => Some(pending),
            _ => None,
        }
    }

    /// Reveals the player's current cell if it is on the path.
    pub fn reveal_position(&mut self, grid: &GridModel) -> Option<GameEvent> {
        let position = self.player.position;
        if grid.classify(position) == CellKind::PathCell {
            self.visibility.reveal(position)
        } else {
            None
        }
    }

    /// Validates a move and, if accepted, locks the controller until
    /// [`complete_move`](Self::complete_move).
    ///
    /// Rejections leave every piece of state untouched.
    pub fn request_move(&mut self, grid: &GridModel, target: Cell) -> MoveRequest {
        let reject = |reason| {
            trace!("Rejected move to {}: {:?}", target, reason);
            Err(RejectedMove { target, reason })
        };

        match self.state {
            ControllerState::Idle => {}
            ControllerState::Transitioning(_) => return reject(RejectReason::InTransition),
            ControllerState::Dead | ControllerState::Won => {
                return reject(RejectReason::LevelOver)
            }
        }

        if !grid.contains(target) {
            return reject(RejectReason::OutOfBounds);
        }

        let from = self.player.position;
        if !grid.is_adjacent(from, target) {
            return reject(RejectReason::NotAdjacent);
        }

        let facing = Facing::between(from, target).unwrap_or(self.player.facing);
        let outcome = MoveOutcome::decide(grid.classify(target));
        let pending = PendingMove {
            from,
            to: target,
            facing,
            outcome,
        };

        self.player.facing = facing;
        self.state = ControllerState::Transitioning(pending);
        debug!("Accepted move {} -> {} ({:?})", from, target, outcome);

        Ok(pending)
    }

    /// Commits the settling move. Returns None when nothing is in flight.
    pub fn complete_move(&mut self, grid: &GridModel) -> Option<CommittedMove> {
        let pending = self.pending()?;
        let mut events = Vec::new();

        match pending.outcome {
            MoveOutcome::Traverse => {
                events.extend(self.visibility.hide_unvisited(grid.path()));
                events.extend(self.visibility.reveal(pending.to));
                self.player.position = pending.to;
                events.push(GameEvent::PlayerMoved {
                    from: pending.from,
                    to: pending.to,
                    facing: pending.facing,
                });
                self.state = ControllerState::Idle;
            }
            MoveOutcome::SafeLane => {
                self.player.position = pending.to;
                events.push(GameEvent::PlayerMoved {
                    from: pending.from,
                    to: pending.to,
                    facing: pending.facing,
                });
                self.state = ControllerState::Idle;
            }
            MoveOutcome::Die => {
                self.player.status = PlayerStatus::Dead;
                events.push(GameEvent::PlayerDied { at: pending.to });
                self.state = ControllerState::Dead;
            }
            MoveOutcome::Win => {
                self.player.status = PlayerStatus::Won;
                events.extend(self.visibility.reset());
                events.push(GameEvent::PlayerWon { at: pending.to });
                self.state = ControllerState::Won;
            }
        }

        Some(CommittedMove { pending, events })
    }

    /// Drops a settling move without applying it.
    pub fn cancel_pending(&mut self) -> Option<PendingMove> {
        let pending = self.pending()?;
        self.state = ControllerState::Idle;
        debug!("Cancelled move {} -> {}", pending.from, pending.to);
        Some(pending)
    }
}
