//! # Configuration
//!
//! Game configuration constants and the TOML-backed [`GameConfig`].
//!
//! ```toml
//! seed = 12345
//!
//! [grid]
//! rows = 7
//! cols = 9
//!
//! [timing]
//! settle_delay = 0.5
//! outcome_delay = 1.5
//!
//! [player]
//! name = "Ada"
//! ```

use crate::game::GridSize;
use crate::generation::GenerationConfig;
use crate::{MazeError, MazeResult};
use serde::{Deserialize, Serialize};
use std::fs;

/// Default number of grid rows
pub const DEFAULT_ROWS: i32 = 7;

/// Default number of grid columns, both lanes included
pub const DEFAULT_COLS: i32 = 9;

/// Seconds between accepting a move and committing it
pub const MOVE_SETTLE_DELAY: f64 = 0.5;

/// Seconds the death or victory screen stays up
pub const OUTCOME_DISPLAY_DELAY: f64 = 1.5;

/// Name shown when the player does not pick one
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Top-level game configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    /// Seed for path generation; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: i32,
    #[serde(default = "default_cols")]
    pub cols: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_settle_delay")]
    pub settle_delay: f64,
    #[serde(default = "default_outcome_delay")]
    pub outcome_delay: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_player_name")]
    pub name: String,
}

fn default_rows() -> i32 { DEFAULT_ROWS }
fn default_cols() -> i32 { DEFAULT_COLS }
fn default_settle_delay() -> f64 { MOVE_SETTLE_DELAY }
fn default_outcome_delay() -> f64 { OUTCOME_DISPLAY_DELAY }
fn default_player_name() -> String { DEFAULT_PLAYER_NAME.to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle_delay: default_settle_delay(),
            outcome_delay: default_outcome_delay(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: default_player_name(),
        }
    }
}

impl GameConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::GameConfig;
    ///
    /// let config = GameConfig::from_toml_str("[grid]\nrows = 5\n").unwrap();
    /// assert_eq!(config.grid.rows, 5);
    /// assert_eq!(config.grid.cols, 9);
    /// ```
    pub fn from_toml_str(text: &str) -> MazeResult<Self> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    pub fn load(path: impl AsRef<std::path::Path>) -> MazeResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks grid dimensions and timing values.
    pub fn validate(&self) -> MazeResult<()> {
        let size = self.grid_size()?;
        for (name, value) in [
            ("settle_delay", self.timing.settle_delay),
            ("outcome_delay", self.timing.outcome_delay),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MazeError::Configuration {
                    rows: size.rows as i64,
                    cols: size.cols as i64,
                    reason: format!("{} must be a positive number of seconds, got {}", name, value),
                });
            }
        }
        Ok(())
    }

    /// Validated grid dimensions.
    pub fn grid_size(&self) -> MazeResult<GridSize> {
        GridSize::new(self.grid.rows, self.grid.cols)
    }

    /// Generation settings for the given seed.
    pub fn generation_config(&self, seed: u64) -> GenerationConfig {
        GenerationConfig::with_size(seed, self.grid.rows, self.grid.cols)
    }

    /// Applies command line overrides on top of file values.
    pub fn with_overrides(
        mut self,
        rows: Option<i32>,
        cols: Option<i32>,
        seed: Option<u64>,
        name: Option<String>,
    ) -> Self {
        if let Some(rows) = rows {
            self.grid.rows = rows;
        }
        if let Some(cols) = cols {
            self.grid.cols = cols;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(name) = name {
            self.player.name = name;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid.rows, 7);
        assert_eq!(config.grid.cols, 9);
        assert_eq!(config.timing.settle_delay, 0.5);
        assert_eq!(config.timing.outcome_delay, 1.5);
        assert_eq!(config.player.name, "Player");
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_full_toml_parses() {
        let text = r#"
            seed = 99

            [grid]
            rows = 5
            cols = 12

            [timing]
            settle_delay = 0.25
            outcome_delay = 2.0

            [player]
            name = "Ada"
        "#;
        let config = GameConfig::from_toml_str(text).unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.grid.rows, 5);
        assert_eq!(config.grid.cols, 12);
        assert_eq!(config.timing.settle_delay, 0.25);
        assert_eq!(config.player.name, "Ada");
    }

    #[test]
    fn test_invalid_grid_is_configuration_error() {
        let result = GameConfig::from_toml_str("[grid]\ncols = 2\n");
        assert!(matches!(result, Err(MazeError::Configuration { .. })));
    }

    #[test]
    fn test_non_positive_delay_rejected() {
        let result = GameConfig::from_toml_str("[timing]\nsettle_delay = 0.0\n");
        assert!(matches!(result, Err(MazeError::Configuration { .. })));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let result = GameConfig::from_toml_str("[grid\nrows = ");
        assert!(matches!(result, Err(MazeError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[grid]\nrows = 4").unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.grid.rows, 4);
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let config =
            GameConfig::default().with_overrides(Some(3), None, Some(8), Some("Bo".into()));
        assert_eq!(config.grid.rows, 3);
        assert_eq!(config.grid.cols, 9);
        assert_eq!(config.seed, Some(8));
        assert_eq!(config.player.name, "Bo");

        let untouched = GameConfig::default().with_overrides(None, None, None, None);
        assert_eq!(untouched, GameConfig::default());
    }
}
