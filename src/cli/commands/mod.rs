//! Subcommands of the `gamesearch` binary

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::config::{GameKind, SearchConfig, StartKind};

pub mod compare;
pub mod search;

/// Arguments shared by every command that searches a position
#[derive(Args, Debug)]
pub struct GameArgs {
    /// Game to search
    #[arg(value_enum)]
    pub game: GameKind,

    /// Starting position
    #[arg(long, short = 's', value_enum, default_value = "initial")]
    pub start: StartKind,

    /// Search depth in plies (defaults to the per-game depth in the config)
    #[arg(long, short = 'd')]
    pub depth: Option<u32>,

    /// Use transposition tables
    #[arg(long)]
    pub table: bool,

    /// JSON configuration file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Seed for random starts and sampled search
    #[arg(long)]
    pub seed: Option<u64>,

    /// Moves explored per node by sampled search
    #[arg(long)]
    pub sample_size: Option<usize>,
}

impl GameArgs {
    /// Load the configuration file, if any, and apply command-line overrides
    pub fn resolve(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => SearchConfig::default(),
        };

        if let Some(depth) = self.depth {
            config.set_depth(self.game, depth);
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(sample_size) = self.sample_size {
            config.sample_size = sample_size;
        }
        config.use_table |= self.table;

        config.validate()?;
        Ok(config)
    }
}
