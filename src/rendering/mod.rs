//! # Rendering Module
//!
//! 2D rendering with macroquad: board layout, the board and player sprite, and
//! the HUD.

pub mod display;
pub mod layout;
pub mod ui;

pub use display::*;
pub use layout::*;
pub use ui::*;
