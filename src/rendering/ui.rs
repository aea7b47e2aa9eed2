//! # User Interface Elements
//!
//! The heads-up display showing the player's name and level.

use crate::game::GameEvent;
use macroquad::prelude::*;

/// Level and name widget above the board.
///
/// Only ever updated from events, never by reading the session directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub player_name: String,
    level: u32,
    height_reached: Option<u32>,
}

impl Hud {
    /// Creates a HUD showing level 1.
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            level: 1,
            height_reached: None,
        }
    }

    /// Applies a level or height event. Other events are ignored.
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::HeightReached { level } => {
                self.height_reached = Some(*level);
            }
            GameEvent::LevelChanged { level } => {
                self.level = *level;
            }
            GameEvent::LevelStarted { level, .. } => {
                self.level = *level;
                self.height_reached = None;
            }
            _ => {}
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Text for the level line.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::{GameEvent, Hud};
    ///
    /// let mut hud = Hud::new("Ada");
    /// assert_eq!(hud.level_text(), "Level: 1");
    ///
    /// hud.handle_event(&GameEvent::HeightReached { level: 3 });
    /// assert_eq!(hud.level_text(), "Height Level Reached: 3");
    /// ```
    pub fn level_text(&self) -> String {
        match self.height_reached {
            Some(height) => format!("Height Level Reached: {}", height),
            None => format!("Level: {}", self.level),
        }
    }

    /// Draws the HUD along the top of the screen.
    pub fn draw(&self, screen_width: f32) {
        draw_rectangle(0.0, 0.0, screen_width, 48.0, Color::new(0.0, 0.0, 0.0, 0.8));
        draw_text(&self.player_name, 16.0, 32.0, 26.0, YELLOW);

        let text = self.level_text();
        let dims = measure_text(&text, None, 26, 1.0);
        let color = if self.height_reached.is_some() { ORANGE } else { WHITE };
        draw_text(&text, screen_width - dims.width - 16.0, 32.0, 26.0, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    #[test]
    fn test_hud_tracks_level_changes() {
        let mut hud = Hud::new("Player");
        hud.handle_event(&GameEvent::LevelChanged { level: 4 });
        assert_eq!(hud.level(), 4);
        assert_eq!(hud.level_text(), "Level: 4");
    }

    #[test]
    fn test_height_shown_until_next_level_starts() {
        let mut hud = Hud::new("Player");
        hud.handle_event(&GameEvent::LevelChanged { level: 3 });
        hud.handle_event(&GameEvent::HeightReached { level: 3 });
        hud.handle_event(&GameEvent::LevelChanged { level: 1 });
        assert_eq!(hud.level_text(), "Height Level Reached: 3");

        hud.handle_event(&GameEvent::LevelStarted {
            level: 1,
            start: Cell::new(2, 1),
        });
        assert_eq!(hud.level_text(), "Level: 1");
    }

    #[test]
    fn test_unrelated_events_are_ignored() {
        let mut hud = Hud::new("Player");
        let before = hud.clone();
        hud.handle_event(&GameEvent::CellRevealed { cell: Cell::new(1, 1) });
        hud.handle_event(&GameEvent::PlayerDied { at: Cell::new(1, 2) });
        assert_eq!(hud, before);
    }
}
