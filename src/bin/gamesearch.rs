//! gamesearch CLI - compare game-tree search strategies
//!
//! This CLI provides:
//! - Searching a connect-four, Nim or dots-and-boxes position with minimax,
//!   alpha-beta, SCOUT or sampled minimax
//! - Comparing node counts and run times of the strategies, with CSV and JSON
//!   export

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "gamesearch")]
#[command(version, about = "Game-tree search strategies side by side", long_about = None)]
struct Cli {
    /// Log search details (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the best move in a position
    Search(gamesearch::cli::commands::search::SearchArgs),

    /// Compare search strategies on one position
    Compare(gamesearch::cli::commands::compare::CompareArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Search(args) => gamesearch::cli::commands::search::execute(args),
        Commands::Compare(args) => gamesearch::cli::commands::compare::execute(args),
    }
}
