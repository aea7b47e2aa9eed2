//! # Trailmaze
//!
//! A grid-based memory maze. A hidden safe path crosses the grid from the entry
//! lane to the exit lane; cells the player has stepped on stay lit while the rest
//! of the path fades out, so the route has to be memorized.
//!
//! ## Architecture Overview
//!
//! The crate separates the logical maze engine from the thin presentation shell
//! that drives it:
//!
//! - **Generation**: seeded path generation behind the [`Generator`] trait
//! - **Grid**: cell classification into boundary lanes, path cells and dead cells
//! - **Visibility**: the revealed trail and the hidden remainder of the path
//! - **Move controller**: the gated state machine deciding every move
//! - **Game state**: level progress, timers and the session lifecycle
//! - **Rendering / input**: macroquad shell consuming [`GameEvent`]s
//!
//! The engine never reads raw input and never draws. Collaborators call
//! [`GameState::request_move`] and observe the events returned by
//! [`GameState::advance`].

pub mod config;
pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;

// Core module re-exports
pub use config::*;
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use scenes::*;

/// Core error type for the Trailmaze engine.
#[derive(thiserror::Error, Debug)]
pub enum MazeError {
    /// Grid dimensions or timing values cannot produce a playable level
    #[error("Invalid configuration ({rows}x{cols}): {reason}")]
    Configuration {
        rows: i64,
        cols: i64,
        reason: String,
    },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration file could not be parsed
    #[error("Config file error: {0}")]
    Config(#[from] toml::de::Error),

    /// Operation is not allowed in the current phase
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Generated content broke an invariant
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Trailmaze codebase.
pub type MazeResult<T> = Result<T, MazeError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
