//! # Display Management
//!
//! Board rendering with macroquad.
//!
//! The display keeps no game rules of its own. It draws whatever the session
//! exposes and keeps a short message log and a movement tween fed by
//! [`GameEvent`]s.

use super::{BoardLayout, Hud, MESSAGE_AREA_HEIGHT};
use crate::game::{Cell, CellKind, GameEvent, GamePhase, GameState, Outcome};
use crate::generation::RandomSource;
use macroquad::prelude::*;

const LANE_COLOR: Color = Color::new(0.18, 0.35, 0.55, 1.0);
const CELL_COLOR: Color = Color::new(0.12, 0.12, 0.14, 1.0);
const TRAIL_COLOR: Color = Color::new(0.95, 0.85, 0.35, 1.0);
const GRID_LINE_COLOR: Color = Color::new(0.3, 0.3, 0.32, 1.0);

/// Opacity of path cells the player has not stepped on yet, while visible
const UNVISITED_PATH_ALPHA: f32 = 0.35;

/// Linear tween of the player sprite between two cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveAnimation {
    pub from: Cell,
    pub to: Cell,
    elapsed: f32,
    duration: f32,
}

impl MoveAnimation {
    pub fn new(from: Cell, to: Cell, duration: f32) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// Fraction of the move completed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Current sprite centre on screen.
    pub fn position(&self, layout: &BoardLayout) -> (f32, f32) {
        let (fx, fy) = layout.cell_center(self.from);
        let (tx, ty) = layout.cell_center(self.to);
        let t = self.progress();
        (fx + (tx - fx) * t, fy + (ty - fy) * t)
    }
}

/// Macroquad display manager for the game.
pub struct MacroquadDisplay {
    /// Board placement, refreshed every frame
    pub layout: BoardLayout,
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    animation: Option<MoveAnimation>,
    move_duration: f32,
    fallen: bool,
    trail_cleared: bool,
}

impl MacroquadDisplay {
    /// Creates a display for the given layout. `move_duration` should match
    /// the session's settle delay.
    pub fn new(layout: BoardLayout, move_duration: f32) -> Self {
        Self {
            layout,
            messages: Vec::new(),
            max_messages: 100,
            animation: None,
            move_duration,
            fallen: false,
            trail_cleared: false,
        }
    }

    /// Recomputes the layout for the current window size.
    pub fn refresh_layout(&mut self) {
        self.layout = BoardLayout::for_screen(self.layout.size, screen_width(), screen_height());
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());

        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }

    /// Updates animation and log state from an engine event.
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::LevelStarted { .. } => {
                self.animation = None;
                self.fallen = false;
                self.trail_cleared = false;
            }
            GameEvent::TrailCleared { .. } => {
                self.trail_cleared = true;
            }
            GameEvent::MoveStarted { from, to, .. } => {
                self.animation = Some(MoveAnimation::new(*from, *to, self.move_duration));
            }
            GameEvent::PlayerMoved { .. } => {
                self.animation = None;
            }
            GameEvent::PlayerDied { .. } => {
                self.fallen = true;
            }
            _ => {}
        }

        if let Some(message) = event.describe() {
            self.add_message(message);
        }
    }

    /// Advances the movement tween.
    pub fn update(&mut self, dt: f32) {
        if let Some(animation) = self.animation.as_mut() {
            animation.update(dt);
        }
    }

    /// Renders the complete game screen.
    pub fn render<R: RandomSource>(&self, game: &GameState<R>, hud: &Hud) {
        clear_background(BLACK);

        self.render_board(game);
        self.render_player(game);
        hud.draw(screen_width());
        self.render_messages();

        match game.phase() {
            GamePhase::ShowingOutcome(Outcome::Won) => self.render_banner("Level cleared!", GREEN),
            GamePhase::ShowingOutcome(Outcome::Died) => self.render_banner("You fell!", RED),
            GamePhase::GameOver => {
                self.render_banner("Game over - R to retry, Esc to quit", ORANGE)
            }
            GamePhase::Playing => {}
        }
    }

    fn render_board<R: RandomSource>(&self, game: &GameState<R>) {
        let grid = game.grid();
        let visibility = game.visibility();
        let size = self.layout.cell_size;

        for cell in grid.size().cells() {
            let (x, y) = self.layout.cell_origin(cell);
            let color = match grid.classify(cell) {
                CellKind::BoundaryLane(_) => LANE_COLOR,
                CellKind::PathCell if self.trail_cleared => CELL_COLOR,
                CellKind::PathCell if visibility.is_revealed(cell) => TRAIL_COLOR,
                CellKind::PathCell if visibility.is_visible(cell) => Color::new(
                    TRAIL_COLOR.r,
                    TRAIL_COLOR.g,
                    TRAIL_COLOR.b,
                    UNVISITED_PATH_ALPHA,
                ),
                CellKind::PathCell | CellKind::DeadCell => CELL_COLOR,
            };

            draw_rectangle(x, y, size, size, CELL_COLOR);
            draw_rectangle(x, y, size, size, color);
            draw_rectangle_lines(x, y, size, size, 1.0, GRID_LINE_COLOR);
        }
    }

    fn render_player<R: RandomSource>(&self, game: &GameState<R>) {
        let player = game.player();
        let (cx, cy) = match self.animation {
            Some(animation) => animation.position(&self.layout),
            None => self.layout.cell_center(player.position),
        };

        let radius = self.layout.cell_size * 0.32;
        let body = if self.fallen { RED } else { WHITE };
        draw_circle(cx, cy, radius, body);

        let angle = player.facing.rotation();
        let tip_x = cx + angle.cos() * radius;
        let tip_y = cy + angle.sin() * radius;
        draw_line(cx, cy, tip_x, tip_y, 3.0, BLACK);
    }

    fn render_messages(&self) {
        let message_area_y = screen_height() - MESSAGE_AREA_HEIGHT + 20.0;
        let message_count = 3;
        let line_height = 18.0;

        draw_rectangle(
            0.0,
            message_area_y - 20.0,
            screen_width(),
            MESSAGE_AREA_HEIGHT,
            Color::new(0.0, 0.0, 0.0, 0.8),
        );

        let start_index = self.messages.len().saturating_sub(message_count);
        for (i, message) in self.messages.iter().skip(start_index).enumerate() {
            let y = message_area_y + i as f32 * line_height;
            draw_text(message, 10.0, y, 16.0, WHITE);
        }
    }

    fn render_banner(&self, text: &str, color: Color) {
        let dims = measure_text(text, None, 32, 1.0);
        let x = (screen_width() - dims.width) / 2.0;
        let y = self.layout.origin_y + self.layout.board_height() / 2.0;
        draw_rectangle(
            x - 12.0,
            y - dims.height - 12.0,
            dims.width + 24.0,
            dims.height + 24.0,
            Color::new(0.0, 0.0, 0.0, 0.85),
        );
        draw_text(text, x, y, 32.0, color);
    }
}
