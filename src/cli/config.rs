//! Shared configuration types for CLI commands

use std::path::Path;

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    games::{ConnectFour, DotsAndBoxes, Nim},
    search::SamplingOptions,
};

/// Which game to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    /// Connect four on a small gravity board
    ConnectFour,
    /// Normal-play Nim
    Nim,
    /// Dots and boxes
    DotsAndBoxes,
}

impl GameKind {
    pub fn name(&self) -> &'static str {
        match self {
            GameKind::ConnectFour => "connect four",
            GameKind::Nim => "nim",
            GameKind::DotsAndBoxes => "dots and boxes",
        }
    }
}

/// Where the search starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StartKind {
    /// The configured empty board or heaps
    #[default]
    Initial,
    /// A random position drawn from the configured seed
    Random,
}

/// Connect-four settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectFourConfig {
    pub rows: usize,
    pub cols: usize,
    pub depth: u32,
    /// Plies played out for a random start
    pub random_plies: usize,
}

impl Default for ConnectFourConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            depth: 4,
            random_plies: 6,
        }
    }
}

/// Nim settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NimConfig {
    pub heaps: Vec<u32>,
    pub depth: u32,
}

impl Default for NimConfig {
    fn default() -> Self {
        Self {
            heaps: vec![3, 5, 7],
            depth: 10,
        }
    }
}

/// Dots-and-boxes settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotsAndBoxesConfig {
    /// Boxes per side
    pub size: usize,
    pub depth: u32,
}

impl Default for DotsAndBoxesConfig {
    fn default() -> Self {
        Self { size: 3, depth: 3 }
    }
}

/// Search configuration shared by the `search` and `compare` commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub connect_four: ConnectFourConfig,
    pub nim: NimConfig,
    pub dots_and_boxes: DotsAndBoxesConfig,

    /// Use transposition tables where the strategy supports them
    pub use_table: bool,

    /// Moves explored per node by sampled minimax
    pub sample_size: usize,

    /// Seed for random starts and sampled search
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            connect_four: ConnectFourConfig::default(),
            nim: NimConfig::default(),
            dots_and_boxes: DotsAndBoxesConfig::default(),
            use_table: false,
            sample_size: 3,
            seed: 42,
        }
    }
}

impl SearchConfig {
    /// Load a configuration from a JSON file and validate it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Check that every game can be built from these settings
    pub fn validate(&self) -> Result<()> {
        ConnectFour::new(self.connect_four.rows, self.connect_four.cols)?;
        DotsAndBoxes::new(self.dots_and_boxes.size)?;

        if self.nim.heaps.iter().all(|&heap| heap == 0) {
            return Err(Error::InvalidConfiguration {
                message: "nim needs at least one non-empty heap".to_string(),
            });
        }
        if self.sample_size == 0 {
            return Err(Error::InvalidConfiguration {
                message: "sample_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Default depth for `game`
    pub fn depth(&self, game: GameKind) -> u32 {
        match game {
            GameKind::ConnectFour => self.connect_four.depth,
            GameKind::Nim => self.nim.depth,
            GameKind::DotsAndBoxes => self.dots_and_boxes.depth,
        }
    }

    /// Override the depth for `game`
    pub fn set_depth(&mut self, game: GameKind, depth: u32) {
        match game {
            GameKind::ConnectFour => self.connect_four.depth = depth,
            GameKind::Nim => self.nim.depth = depth,
            GameKind::DotsAndBoxes => self.dots_and_boxes.depth = depth,
        }
    }

    pub fn sampling(&self) -> SamplingOptions {
        SamplingOptions {
            sample_size: Some(self.sample_size),
            seed: self.seed,
        }
    }

    pub fn connect_four_position<R: Rng + ?Sized>(
        &self,
        start: StartKind,
        rng: &mut R,
    ) -> Result<ConnectFour> {
        let board = &self.connect_four;
        match start {
            StartKind::Initial => ConnectFour::new(board.rows, board.cols),
            StartKind::Random => ConnectFour::random(board.rows, board.cols, board.random_plies, rng),
        }
    }

    pub fn nim_position<R: Rng + ?Sized>(&self, start: StartKind, rng: &mut R) -> Nim {
        match start {
            StartKind::Initial => Nim::new(self.nim.heaps.clone()),
            StartKind::Random => Nim::random(rng),
        }
    }

    pub fn dots_and_boxes_position<R: Rng + ?Sized>(
        &self,
        start: StartKind,
        rng: &mut R,
    ) -> Result<DotsAndBoxes> {
        match start {
            StartKind::Initial => DotsAndBoxes::new(self.dots_and_boxes.size),
            StartKind::Random => DotsAndBoxes::random(self.dots_and_boxes.size, rng),
        }
    }
}
