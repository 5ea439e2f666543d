use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Solo or two-player round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Solo,
    Duo,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::Solo, GameMode::Duo];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Solo => "Solo",
            GameMode::Duo => "Duo",
        }
    }
}

/// Simulation speed, picked before each round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Slow: 5 ticks per second
    Slow,
    /// Medium: 10 ticks per second
    #[default]
    Medium,
    /// Fast: 15 ticks per second
    Fast,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Slow, Difficulty::Medium, Difficulty::Fast];

    pub fn ticks_per_second(&self) -> u32 {
        match self {
            Self::Slow => 5,
            Self::Medium => 10,
            Self::Fast => 15,
        }
    }

    /// Get the tick interval for this difficulty
    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.ticks_per_second()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Easy",
            Self::Medium => "Medium",
            Self::Fast => "Hard",
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Length of each snake at round start
    pub initial_snake_length: usize,
    /// Snakes never grow past this many segments
    pub max_snake_length: usize,
    /// Obstacle count is drawn uniformly from `min_obstacles..=max_obstacles`
    pub min_obstacles: usize,
    pub max_obstacles: usize,
    /// Chance that freshly spawned food is a bonus
    pub bonus_probability: f64,
    /// Score for regular food
    pub food_points: u32,
    /// Score for bonus food
    pub bonus_points: u32,
    /// Fixed RNG seed, mostly for reproducible tests
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 30,
            initial_snake_length: 5,
            max_snake_length: 100,
            min_obstacles: 5,
            max_obstacles: 20,
            bonus_probability: 0.2,
            food_points: 1,
            bonus_points: 5,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            max_snake_length: 20,
            min_obstacles: 1,
            max_obstacles: 3,
            ..Self::new(16, 12)
        }
    }

    /// Read a JSON config file; absent keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Row both snakes start on
    pub fn start_row(&self) -> i32 {
        (self.grid_height / 2).min(10) as i32
    }

    /// Reject configurations a round cannot be played on
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.max_snake_length >= 1,
            "max_snake_length must be at least 1"
        );
        ensure!(
            (1..=self.max_snake_length).contains(&self.initial_snake_length),
            "initial_snake_length {} must be within 1..={}",
            self.initial_snake_length,
            self.max_snake_length
        );
        ensure!(
            self.grid_width >= 2 * (self.initial_snake_length + 1) && self.grid_height >= 1,
            "grid {}x{} is too small for two snakes of length {}",
            self.grid_width,
            self.grid_height,
            self.initial_snake_length
        );
        ensure!(
            self.min_obstacles <= self.max_obstacles,
            "min_obstacles ({}) exceeds max_obstacles ({})",
            self.min_obstacles,
            self.max_obstacles
        );
        ensure!(
            (0.0..=1.0).contains(&self.bonus_probability),
            "bonus_probability {} is not a probability",
            self.bonus_probability
        );

        let needed = 2 * self.max_snake_length + self.max_obstacles + 1;
        let cells = self.grid_width * self.grid_height;
        ensure!(
            cells > needed,
            "grid has {} cells but up to {} may be occupied",
            cells,
            needed
        );
        Ok(())
    }
}
