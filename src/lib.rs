//! Game-tree search engine for two-player, zero-sum, perfect-information games
//!
//! This crate provides:
//! - A [`Game`](ports::Game) capability trait and static [`Evaluator`](ports::Evaluator)s
//! - Minimax, alpha-beta, SCOUT and sampled minimax over any game
//! - A transposition table with exact and bounded stores
//! - Connect four, Nim and dots-and-boxes adapters
//! - Comparative runs measuring nodes and time saved against plain minimax

pub mod cli;
pub mod error;
pub mod games;
pub mod identifiers;
pub mod pipeline;
pub mod ports;
pub mod search;
pub mod transposition;

pub use error::{Error, Result};
pub use search::{Algorithm, SearchResult, Value, Window};
pub use transposition::TranspositionTable;
