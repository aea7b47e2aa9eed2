//! # Input Module
//!
//! Maps keyboard and mouse input to [`PlayerInput`] values.
//!
//! The engine itself never reads raw input; the scene loop turns these values
//! into move requests and session commands.

use crate::game::{Cell, Facing};
use crate::rendering::BoardLayout;
use macroquad::prelude::*;

/// Keys polled every frame, in priority order.
const POLLED_KEYS: [KeyCode; 17] = [
    KeyCode::Escape,
    KeyCode::F1,
    KeyCode::F12,
    KeyCode::R,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::W,
    KeyCode::S,
    KeyCode::A,
    KeyCode::D,
    KeyCode::K,
    KeyCode::J,
    KeyCode::H,
    KeyCode::L,
    KeyCode::Space,
];

/// Player input types that can be processed by the scene loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Step one cell in a direction
    Step(Facing),
    /// Move onto a clicked cell
    ClickCell(Cell),
    /// Start over after a game over
    Retry,
    /// Regenerate the current level
    Abandon,
    /// Toggle the automatic driver
    ToggleAutoplay,
    /// Show help information
    Help,
    /// Quit the game
    Quit,
}

impl PlayerInput {
    /// The cell this input asks to move onto, given the player's position.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::{Cell, Facing, PlayerInput};
    ///
    /// let here = Cell::new(3, 1);
    /// assert_eq!(PlayerInput::Step(Facing::Up).target_from(here), Some(Cell::new(2, 1)));
    /// let click = PlayerInput::ClickCell(Cell::new(0, 0));
    /// assert_eq!(click.target_from(here), Some(Cell::new(0, 0)));
    /// assert_eq!(PlayerInput::Help.target_from(here), None);
    /// ```
    pub fn target_from(self, current: Cell) -> Option<Cell> {
        match self {
            PlayerInput::Step(facing) => Some(current.step(facing)),
            PlayerInput::ClickCell(cell) => Some(cell),
            _ => None,
        }
    }
}

/// Input handler for processing player commands.
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// assert!(input_handler.vi_keys_enabled);
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Gets this frame's input, if any.
    ///
    /// Keys win over a mouse click in the same frame.
    pub fn get_input(&self, layout: &BoardLayout) -> Option<PlayerInput> {
        for key in POLLED_KEYS {
            if is_key_pressed(key) {
                if let Some(input) = self.map_key(key) {
                    return Some(input);
                }
            }
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            return layout.cell_at(x, y).map(PlayerInput::ClickCell);
        }

        None
    }

    /// Maps a single key to an input.
    pub fn map_key(&self, key: KeyCode) -> Option<PlayerInput> {
        let input = match key {
            KeyCode::Escape => PlayerInput::Quit,
            KeyCode::F1 => PlayerInput::Help,
            KeyCode::F12 => PlayerInput::ToggleAutoplay,
            KeyCode::R => PlayerInput::Retry,
            KeyCode::Space => PlayerInput::Abandon,
            KeyCode::Up | KeyCode::W => PlayerInput::Step(Facing::Up),
            KeyCode::Down | KeyCode::S => PlayerInput::Step(Facing::Down),
            KeyCode::Left | KeyCode::A => PlayerInput::Step(Facing::Left),
            KeyCode::Right | KeyCode::D => PlayerInput::Step(Facing::Right),
            KeyCode::K if self.vi_keys_enabled => PlayerInput::Step(Facing::Up),
            KeyCode::J if self.vi_keys_enabled => PlayerInput::Step(Facing::Down),
            KeyCode::H if self.vi_keys_enabled => PlayerInput::Step(Facing::Left),
            KeyCode::L if self.vi_keys_enabled => PlayerInput::Step(Facing::Right),
            _ => return None,
        };
        Some(input)
    }
}
