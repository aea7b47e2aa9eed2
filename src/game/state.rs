//! # Game State Module
//!
//! The session that coordinates levels, timers and progress.
//!
//! [`GameState`] owns the process-wide [`LevelProgress`], the current [`Level`],
//! the injected random source and the [`Scheduler`]. Input arrives through
//! [`GameState::request_move`]; the presentation layer drives time through
//! [`GameState::advance`] and receives every event emitted since the previous
//! call.

use super::{
    next_safe_step, Cell, Facing, GameEvent, GridModel, Level, LevelProgress,
    MoveController, MoveOutcome, MoveRequest, PendingMove, PlayerState, PlayerStatus,
    ScheduledTimer, Scheduler, TimerId, TimerKind, VisibilityTracker,
};
use crate::config::GameConfig;
use crate::generation::{utils, validate_path, Generator, PathGenerator, RandomSource};
use crate::{MazeError, MazeResult};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// How a level attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Died,
    Won,
}

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// A level is in progress
    Playing,
    /// The outcome screen is up; a timer moves on from here
    ShowingOutcome(Outcome),
    /// The player died and the level is paused until a retry
    GameOver,
}

/// Session statistics tracking player progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Committed moves onto path cells or the entry lane
    pub steps_taken: u64,
    /// Move requests that were turned down
    pub rejected_moves: u64,
    /// Number of times the player has died
    pub deaths: u32,
    /// Number of levels cleared
    pub wins: u32,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PlayerMoved { .. } => {
                self.steps_taken += 1;
            }
            GameEvent::PlayerDied { .. } => {
                self.deaths += 1;
            }
            GameEvent::PlayerWon { .. } => {
                self.wins += 1;
            }
            _ => {}
        }
    }
}

/// Serializable view of a session between moves.
///
/// A move that is still settling is not part of the snapshot; restoring
/// drops it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub progress: LevelProgress,
    pub level: u32,
    pub grid: GridModel,
    pub player: PlayerState,
    pub visibility: VisibilityTracker,
    pub statistics: GameStatistics,
}

impl GameSnapshot {
    /// Serializes the snapshot to pretty JSON.
    pub fn to_json(&self) -> MazeResult<String> {
        serde_json::to_string_pretty(self).map_err(MazeError::from)
    }

    /// Loads a snapshot from JSON.
    pub fn from_json(json: &str) -> MazeResult<Self> {
        serde_json::from_str(json).map_err(MazeError::from)
    }
}

/// Central game session.
pub struct GameState<R: RandomSource = StdRng> {
    config: GameConfig,
    rng: R,
    generator: PathGenerator,
    progress: LevelProgress,
    level: Level,
    scheduler: Scheduler,
    phase: GamePhase,
    epoch: u64,
    settle_timer: Option<TimerId>,
    events: Vec<GameEvent>,
    statistics: GameStatistics,
}

impl GameState<StdRng> {
    /// Creates a session seeded from the config, or from entropy when the
    /// config has no seed.
    pub fn seeded(config: GameConfig) -> MazeResult<Self> {
        let rng = match config.seed {
            Some(seed) => utils::create_rng(&config.generation_config(seed)),
            None => StdRng::from_entropy(),
        };
        Self::new(config, rng)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Creates a session at level 1 with a freshly generated path.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use trailmaze::{GameConfig, GamePhase, GameState};
    ///
    /// let game = GameState::new(GameConfig::default(), StdRng::seed_from_u64(1)).unwrap();
    /// assert_eq!(game.phase(), GamePhase::Playing);
    /// assert_eq!(game.progress().level(), 1);
    /// assert_eq!(game.player().position.col, 1);
    /// ```
    pub fn new(config: GameConfig, mut rng: R) -> MazeResult<Self> {
        config.validate()?;
        let generator = PathGenerator::new();
        let progress = LevelProgress::new();
        let (level, events) = generate_level(&config, &generator, &mut rng, progress.level())?;

        let mut state = Self {
            config,
            rng,
            generator,
            progress,
            level,
            scheduler: Scheduler::new(),
            phase: GamePhase::Playing,
            epoch: 0,
            settle_timer: None,
            events: Vec::new(),
            statistics: GameStatistics::new(),
        };
        state.emit_all(events);

        info!(
            "New session on a {}x{} grid",
            state.config.grid.rows, state.config.grid.cols
        );
        Ok(state)
    }

    /// Restores a session from a snapshot.
    ///
    /// A dead player restores into [`GamePhase::GameOver`]; a player who had
    /// just won starts the next level straight away. The level number must
    /// agree with the progress counter for the player's status, and the
    /// visibility sets may only name path cells.
    pub fn from_snapshot(config: GameConfig, rng: R, snapshot: GameSnapshot) -> MazeResult<Self> {
        config.validate()?;
        let size = config.grid_size()?;
        if snapshot.grid.size() != size {
            return Err(MazeError::InvalidState(format!(
                "Snapshot grid is {}x{} but the configuration asks for {}x{}",
                snapshot.grid.size().rows,
                snapshot.grid.size().cols,
                size.rows,
                size.cols
            )));
        }
        validate_path(snapshot.grid.path(), size)?;
        if !size.contains(snapshot.player.position) {
            return Err(MazeError::InvalidState(format!(
                "Snapshot player position {} is outside the grid",
                snapshot.player.position
            )));
        }

        let expected_progress = match snapshot.player.status {
            PlayerStatus::Alive => snapshot.level,
            PlayerStatus::Won => snapshot.level.saturating_add(1),
            PlayerStatus::Dead => 1,
        };
        if snapshot.level == 0 || snapshot.progress.level() != expected_progress {
            return Err(MazeError::InvalidState(format!(
                "Snapshot level {} with a {:?} player does not match progress level {}",
                snapshot.level,
                snapshot.player.status,
                snapshot.progress.level()
            )));
        }
        if let Some(cell) = snapshot
            .visibility
            .tracked_cells()
            .find(|cell| !snapshot.grid.path().contains(*cell))
        {
            return Err(MazeError::InvalidState(format!(
                "Snapshot visibility names {} which is not on the path",
                cell
            )));
        }

        let status = snapshot.player.status;
        let controller = MoveController::restore(snapshot.player, snapshot.visibility);
        let level = Level::from_parts(snapshot.level, snapshot.grid, controller);

        let mut state = Self {
            config,
            rng,
            generator: PathGenerator::new(),
            progress: snapshot.progress,
            level,
            scheduler: Scheduler::new(),
            phase: GamePhase::Playing,
            epoch: 0,
            settle_timer: None,
            events: Vec::new(),
            statistics: snapshot.statistics,
        };

        match status {
            PlayerStatus::Alive => {}
            PlayerStatus::Dead => state.phase = GamePhase::GameOver,
            PlayerStatus::Won => state.start_level()?,
        }

        info!("Restored session at level {}", state.progress.level());
        Ok(state)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn progress(&self) -> &LevelProgress {
        &self.progress
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn grid(&self) -> &GridModel {
        self.level.grid()
    }

    pub fn player(&self) -> &PlayerState {
        self.level.controller().player()
    }

    pub fn visibility(&self) -> &VisibilityTracker {
        self.level.controller().visibility()
    }

    pub fn statistics(&self) -> &GameStatistics {
        &self.statistics
    }

    /// Identifier of the current level attempt.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Current virtual time in seconds.
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    /// The move currently settling, if any.
    pub fn pending_move(&self) -> Option<PendingMove> {
        self.level.controller().pending()
    }

    /// True when a move request would be considered.
    pub fn is_awaiting_input(&self) -> bool {
        self.phase == GamePhase::Playing && self.level.controller().is_idle()
    }

    /// Takes every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Requests a move onto `target`.
    ///
    /// Accepted moves settle after the configured delay; rejected ones leave
    /// the session untouched apart from the rejection counter.
    pub fn request_move(&mut self, target: Cell) -> MoveRequest {
        match self.level.request_move(target) {
            Ok(pending) => {
                self.emit(GameEvent::MoveStarted {
                    from: pending.from,
                    to: pending.to,
                    facing: pending.facing,
                });
                let timer = self.scheduler.schedule(
                    self.config.timing.settle_delay,
                    TimerKind::MoveSettle,
                    self.epoch,
                );
                self.settle_timer = Some(timer);
                Ok(pending)
            }
            Err(rejected) => {
                self.statistics.rejected_moves += 1;
                debug!("{}", rejected);
                Err(rejected)
            }
        }
    }

    /// Requests a move one cell away in the given direction.
    pub fn step(&mut self, facing: Facing) -> MoveRequest {
        let target = self.player().position.step(facing);
        self.request_move(target)
    }

    /// Advances the clock by `dt` seconds, firing due timers, and returns all
    /// events emitted since the previous call.
    pub fn advance(&mut self, dt: f64) -> MazeResult<Vec<GameEvent>> {
        let deadline = self.scheduler.now() + dt.max(0.0);
        while let Some(timer) = self.scheduler.next_due(deadline) {
            self.handle_timer(timer)?;
        }
        self.scheduler.settle_clock(deadline);
        Ok(self.drain_events())
    }

    /// Starts over at level 1 after a game over.
    pub fn retry(&mut self) -> MazeResult<()> {
        if self.phase != GamePhase::GameOver {
            return Err(MazeError::InvalidState(format!(
                "Retry is only possible after a game over, current phase is {:?}",
                self.phase
            )));
        }
        self.start_level()
    }

    /// Abandons the current attempt and regenerates the level.
    ///
    /// Pending timers are invalidated; level progress is kept.
    pub fn abandon_level(&mut self) -> MazeResult<()> {
        if let Some(pending) = self.level.controller_mut().cancel_pending() {
            debug!("Abandoning in-flight move to {}", pending.to);
        }
        info!("Abandoning level {}", self.progress.level());
        self.start_level()
    }

    /// Next safe cell toward the exit, while the session awaits input.
    pub fn hint(&self) -> Option<Cell> {
        if !self.is_awaiting_input() {
            return None;
        }
        next_safe_step(self.grid(), self.player().position)
    }

    /// Captures the committed session state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            progress: self.progress,
            level: self.level.number(),
            grid: self.grid().clone(),
            player: *self.player(),
            visibility: self.visibility().clone(),
            statistics: self.statistics.clone(),
        }
    }

    /// Saves the committed session state to JSON.
    pub fn save_to_json(&self) -> MazeResult<String> {
        self.snapshot().to_json()
    }

    fn handle_timer(&mut self, timer: ScheduledTimer) -> MazeResult<()> {
        if timer.epoch != self.epoch {
            trace!("Dropping stale {:?} timer from epoch {}", timer.kind, timer.epoch);
            return Ok(());
        }

        match timer.kind {
            TimerKind::MoveSettle => {
                if self.settle_timer == Some(timer.id) {
                    self.settle_timer = None;
                }
                self.settle_move();
                Ok(())
            }
            TimerKind::OutcomeDisplay => self.finish_outcome(),
        }
    }

    fn settle_move(&mut self) {
        let committed = match self.level.complete_move() {
            Some(committed) => committed,
            None => return,
        };
        self.emit_all(committed.events);

        match committed.pending.outcome {
            MoveOutcome::Die => {
                let height = self.progress.on_loss();
                info!(
                    "Player fell at {}; height level reached: {}",
                    committed.pending.to, height
                );
                self.emit(GameEvent::HeightReached { level: height });
                self.emit(GameEvent::LevelChanged {
                    level: self.progress.level(),
                });
                self.begin_outcome(Outcome::Died);
            }
            MoveOutcome::Win => {
                let level = self.progress.on_win();
                info!("Level cleared, advancing to level {}", level);
                self.emit(GameEvent::LevelChanged { level });
                self.begin_outcome(Outcome::Won);
            }
            MoveOutcome::Traverse | MoveOutcome::SafeLane => {}
        }
    }

    fn begin_outcome(&mut self, outcome: Outcome) {
        self.phase = GamePhase::ShowingOutcome(outcome);
        self.scheduler.schedule(
            self.config.timing.outcome_delay,
            TimerKind::OutcomeDisplay,
            self.epoch,
        );
    }

    fn finish_outcome(&mut self) -> MazeResult<()> {
        match self.phase {
            GamePhase::ShowingOutcome(Outcome::Died) => {
                self.phase = GamePhase::GameOver;
                info!("Game over");
                Ok(())
            }
            GamePhase::ShowingOutcome(Outcome::Won) => self.start_level(),
            GamePhase::Playing | GamePhase::GameOver => Ok(()),
        }
    }

    fn start_level(&mut self) -> MazeResult<()> {
        self.epoch += 1;
        self.scheduler.cancel_all();
        self.settle_timer = None;

        let (level, events) = generate_level(
            &self.config,
            &self.generator,
            &mut self.rng,
            self.progress.level(),
        )?;
        self.level = level;
        self.phase = GamePhase::Playing;
        self.emit_all(events);

        info!(
            "Level {} started at {}",
            self.level.number(),
            self.player().position
        );
        Ok(())
    }

    fn emit(&mut self, event: GameEvent) {
        self.statistics.update_from_event(&event);
        self.events.push(event);
    }

    fn emit_all(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// Generates a level's path and starts the level.
fn generate_level<R: RandomSource + ?Sized>(
    config: &GameConfig,
    generator: &PathGenerator,
    rng: &mut R,
    number: u32,
) -> MazeResult<(Level, Vec<GameEvent>)> {
    let generation = config.generation_config(config.seed.unwrap_or_default());
    let path = generator.generate(&generation, rng)?;
    let grid = GridModel::new(generation.grid_size()?, path);
    Level::start(number, grid)
}

impl<R: RandomSource> std::fmt::Debug for GameState<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("phase", &self.phase)
            .field("level", &self.progress.level())
            .field("epoch", &self.epoch)
            .field("player", self.player())
            .field("controller", &self.level.controller().state())
            .finish()
    }
}
