//! # Board Layout
//!
//! Screen geometry of the maze board. Pure arithmetic, so it works without a
//! window.

use crate::game::{Cell, GridSize};

/// Space reserved above the board for the HUD, in pixels
pub const HUD_HEIGHT: f32 = 60.0;

/// Space reserved below the board for the message log, in pixels
pub const MESSAGE_AREA_HEIGHT: f32 = 80.0;

/// Outer margin around the board, in pixels
pub const BOARD_MARGIN: f32 = 16.0;

/// Placement of the board on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub size: GridSize,
    /// Left edge of the board
    pub origin_x: f32,
    /// Top edge of the board
    pub origin_y: f32,
    /// Side of one square cell
    pub cell_size: f32,
}

impl BoardLayout {
    /// Fits the largest square cells into the screen, centring the board
    /// horizontally between the HUD and the message area.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::{BoardLayout, GridSize};
    ///
    /// let size = GridSize::new(7, 9).unwrap();
    /// let layout = BoardLayout::for_screen(size, 1024.0, 768.0);
    /// assert!(layout.cell_size > 0.0);
    /// assert!(layout.origin_x + layout.board_width() <= 1024.0);
    /// ```
    pub fn for_screen(size: GridSize, screen_width: f32, screen_height: f32) -> Self {
        let available_width = (screen_width - 2.0 * BOARD_MARGIN).max(1.0);
        let available_height =
            (screen_height - HUD_HEIGHT - MESSAGE_AREA_HEIGHT - 2.0 * BOARD_MARGIN).max(1.0);

        let cell_size = (available_width / size.cols as f32)
            .min(available_height / size.rows as f32)
            .floor()
            .max(1.0);

        let board_width = cell_size * size.cols as f32;
        Self {
            size,
            origin_x: ((screen_width - board_width) / 2.0).max(0.0),
            origin_y: HUD_HEIGHT + BOARD_MARGIN,
            cell_size,
        }
    }

    pub fn board_width(&self) -> f32 {
        self.cell_size * self.size.cols as f32
    }

    pub fn board_height(&self) -> f32 {
        self.cell_size * self.size.rows as f32
    }

    /// Top-left corner of a cell.
    pub fn cell_origin(&self, cell: Cell) -> (f32, f32) {
        (
            self.origin_x + cell.col as f32 * self.cell_size,
            self.origin_y + cell.row as f32 * self.cell_size,
        )
    }

    /// Centre of a cell.
    pub fn cell_center(&self, cell: Cell) -> (f32, f32) {
        let (x, y) = self.cell_origin(cell);
        let half = self.cell_size / 2.0;
        (x + half, y + half)
    }

    /// The cell under a screen point, if the point lies on the board.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<Cell> {
        let local_x = x - self.origin_x;
        let local_y = y - self.origin_y;
        if local_x < 0.0 || local_y < 0.0 {
            return None;
        }

        let cell = Cell::new(
            (local_y / self.cell_size) as i32,
            (local_x / self.cell_size) as i32,
        );
        self.size.contains(cell).then_some(cell)
    }
}
