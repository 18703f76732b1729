//! Command-line interface for the gamesearch toolkit
//!
//! Searches a position with one strategy, or compares strategies side by
//! side on the same position.

pub mod commands;
pub mod config;
pub mod output;
