//! # Level Progress
//!
//! The process-wide level counter. Wins advance it; a loss reports the level
//! the player had reached and starts over from level 1.

use serde::{Deserialize, Serialize};

/// Level counter shared across level instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    level: u32,
    best_height: u32,
}

impl LevelProgress {
    /// Starts at level 1.
    pub fn new() -> Self {
        Self {
            level: 1,
            best_height: 0,
        }
    }

    /// Current level, always at least 1.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Highest level ever reported as a height on loss.
    pub fn best_height(&self) -> u32 {
        self.best_height
    }

    /// Advances to the next level and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::LevelProgress;
    ///
    /// let mut progress = LevelProgress::new();
    /// assert_eq!(progress.on_win(), 2);
    /// assert_eq!(progress.on_win(), 3);
    /// assert_eq!(progress.on_loss(), 3);
    /// assert_eq!(progress.level(), 1);
    /// ```
    pub fn on_win(&mut self) -> u32 {
        self.level += 1;
        self.level
    }

    /// Reports the level reached and resets the counter to 1.
    pub fn on_loss(&mut self) -> u32 {
        let height = self.level;
        self.best_height = self.best_height.max(height);
        self.level = 1;
        height
    }
}

impl Default for LevelProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_level_one() {
        let progress = LevelProgress::new();
        assert_eq!(progress.level(), 1);
        assert_eq!(progress.best_height(), 0);
    }

    #[test]
    fn test_loss_reports_pre_reset_level() {
        let mut progress = LevelProgress::new();
        progress.on_win();
        progress.on_win();
        assert_eq!(progress.level(), 3);

        assert_eq!(progress.on_loss(), 3);
        assert_eq!(progress.level(), 1);
        assert_eq!(progress.best_height(), 3);
    }

    #[test]
    fn test_best_height_keeps_maximum() {
        let mut progress = LevelProgress::new();
        progress.on_win();
        progress.on_win();
        progress.on_win();
        progress.on_loss();
        assert_eq!(progress.on_loss(), 1);
        assert_eq!(progress.best_height(), 4);
    }
}
