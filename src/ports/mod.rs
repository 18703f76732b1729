//! Ports (trait boundaries) between the search core and the games it plays.
//!
//! The search core never names a concrete game. Each game is an adapter that
//! implements [`Game`], and its static evaluation implements [`Evaluator`].

pub mod evaluator;
pub mod game;

pub use evaluator::Evaluator;
pub use game::{Game, Role};
