//! # Scene Management System
//!
//! The frame loop that connects input, the session clock and rendering.
//!
//! Each frame the loop forwards at most one input, lets autoplay take a step,
//! advances the session by the frame time and routes the resulting events to
//! the display and the HUD.

use crate::{
    Autoplay, GamePhase, GameState, Hud, InputHandler, MacroquadDisplay, MazeResult, PlayerInput,
};
use log::{debug, info};
use macroquad::prelude::*;

const HELP_TEXT: &str =
    "Arrows/WASD or click: move, Space: new path, R: retry, F12: autoplay, Esc: quit";

/// The main scene manager that coordinates the session and its presentation.
pub struct SceneManager {
    game: GameState,
    display: MacroquadDisplay,
    hud: Hud,
    input_handler: InputHandler,
    autoplay: Autoplay,
}

impl SceneManager {
    /// Creates a scene manager around a started session.
    pub fn new(mut game: GameState, input_handler: InputHandler, autoplay: bool) -> Self {
        let size = game.grid().size();
        let layout = crate::BoardLayout::for_screen(size, screen_width(), screen_height());
        let mut display = MacroquadDisplay::new(layout, game.config().timing.settle_delay as f32);
        let mut hud = Hud::new(game.config().player.name.clone());

        display.add_message("Remember the path, then walk it across!");
        display.add_message(HELP_TEXT);
        for event in game.drain_events() {
            display.handle_event(&event);
            hud.handle_event(&event);
        }

        let mut driver = Autoplay::new();
        if autoplay {
            driver.toggle();
        }

        Self {
            game,
            display,
            hud,
            input_handler,
            autoplay: driver,
        }
    }

    /// Runs the main scene loop until the game exits.
    pub async fn run(&mut self) -> MazeResult<()> {
        loop {
            if self.update()? {
                break;
            }
            next_frame().await;
        }
        info!("Scene loop ended");
        Ok(())
    }

    /// Runs one frame, returns true if exit is requested.
    fn update(&mut self) -> MazeResult<bool> {
        let dt = get_frame_time();
        self.display.refresh_layout();

        if let Some(input) = self.input_handler.get_input(&self.display.layout) {
            if self.handle_input(input)? {
                return Ok(true);
            }
        }

        if self.autoplay.tick(dt as f64, self.game.is_awaiting_input()) {
            if let Some(target) = self.game.hint() {
                if let Err(rejected) = self.game.request_move(target) {
                    debug!("Autoplay step ignored: {}", rejected);
                }
            }
        }

        let events = self.game.advance(dt as f64)?;
        for event in &events {
            self.display.handle_event(event);
            self.hud.handle_event(event);
        }

        self.display.update(dt);
        self.display.render(&self.game, &self.hud);
        Ok(false)
    }

    /// Handles one input, returns true if exit is requested.
    fn handle_input(&mut self, input: PlayerInput) -> MazeResult<bool> {
        match input {
            PlayerInput::Quit => {
                info!("Player quit the game");
                return Ok(true);
            }
            PlayerInput::Help => {
                self.display.add_message(HELP_TEXT);
            }
            PlayerInput::ToggleAutoplay => {
                if self.autoplay.toggle() {
                    self.display.add_message("Autoplay enabled (F12 to toggle off)");
                } else {
                    self.display.add_message("Autoplay disabled");
                }
            }
            PlayerInput::Retry => {
                if self.game.phase() == GamePhase::GameOver {
                    self.game.retry()?;
                }
            }
            PlayerInput::Abandon => {
                if self.game.phase() == GamePhase::Playing {
                    self.game.abandon_level()?;
                    self.display.add_message("A new path was drawn");
                }
            }
            PlayerInput::Step(_) | PlayerInput::ClickCell(_) => {
                if let Some(target) = input.target_from(self.game.player().position) {
                    if let Err(rejected) = self.game.request_move(target) {
                        debug!("Ignored input: {}", rejected);
                    }
                }
            }
        }
        Ok(false)
    }
}
