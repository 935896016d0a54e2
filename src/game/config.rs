use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::state::Position;

/// Largest grid side the renderer can lay out on a terminal
pub const MAX_GRID_SIZE: i32 = 255;

/// Configuration for the game
///
/// Every field has a default, so a config file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square playing field, in pixels
    pub canvas_size: u32,
    /// Side length of one grid cell, in pixels
    pub tile_size: u32,
    /// Number of segments the snake starts with
    pub initial_snake_length: usize,
    /// Cell of the snake's head at the start of a game.
    /// The body trails to the left of it.
    pub start_head: Position,
    /// Score added for each food item
    pub food_reward: u32,
    /// Tick interval at the start of a game, in milliseconds
    pub initial_interval_ms: u64,
    /// Amount the tick interval shrinks per food item, in milliseconds
    pub speed_step_ms: u64,
    /// Fastest allowed tick interval, in milliseconds
    pub min_interval_ms: u64,
    /// Random draws tried before falling back to scanning the free cells
    pub food_placement_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_size: 400,
            tile_size: 20,
            initial_snake_length: 3,
            start_head: Position::new(5, 10),
            food_reward: 10,
            initial_interval_ms: 150,
            speed_step_ms: 2,
            min_interval_ms: 50,
            food_placement_attempts: 64,
        }
    }
}

impl GameConfig {
    /// Create a configuration whose grid has `cells` cells per side
    pub fn with_grid_size(cells: u32) -> Self {
        let defaults = Self::default();
        Self {
            canvas_size: cells.saturating_mul(defaults.tile_size),
            ..defaults
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            start_head: Position::new(5, 5),
            ..Self::with_grid_size(10)
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Number of cells along each side of the grid
    pub fn grid_size(&self) -> i32 {
        if self.tile_size == 0 {
            return 0;
        }
        (self.canvas_size / self.tile_size).min(i32::MAX as u32) as i32
    }

    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    pub fn speed_step(&self) -> Duration {
        Duration::from_millis(self.speed_step_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.tile_size == 0 {
            return Err("tile_size must be at least 1".to_string());
        }

        let grid = self.grid_size();
        if grid < 2 {
            return Err(format!(
                "grid must be at least 2 cells wide, got {} ({} / {})",
                grid, self.canvas_size, self.tile_size
            ));
        }

        if grid > MAX_GRID_SIZE {
            return Err(format!(
                "grid must be at most {} cells wide, got {}",
                MAX_GRID_SIZE, grid
            ));
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        let head = self.start_head;
        if head.x < 0 || head.x >= grid || head.y < 0 || head.y >= grid {
            return Err(format!(
                "start_head ({}, {}) lies outside the {}x{} grid",
                head.x, head.y, grid, grid
            ));
        }

        let tail_x = head.x as i64 - (self.initial_snake_length as i64 - 1);
        if tail_x < 0 {
            return Err(format!(
                "a snake of length {} does not fit left of start_head ({}, {})",
                self.initial_snake_length, head.x, head.y
            ));
        }

        if self.min_interval_ms == 0 {
            return Err("min_interval_ms must be positive".to_string());
        }

        if self.min_interval_ms > self.initial_interval_ms {
            return Err(format!(
                "min_interval_ms ({}) cannot exceed initial_interval_ms ({})",
                self.min_interval_ms, self.initial_interval_ms
            ));
        }

        Ok(())
    }
}
