//! Game adapters
//!
//! Each game implements [`Game`](crate::ports::Game) once, together with a
//! static evaluator for depth-limited searches. The search core never looks
//! inside a concrete game.

pub mod connect_four;
pub mod dots_and_boxes;
pub mod nim;

pub use connect_four::{Column, ConnectFour, ConnectFourHeuristic};
pub use dots_and_boxes::{DotsAndBoxes, DotsAndBoxesHeuristic, Line, Orientation};
pub use nim::{Nim, NimHeuristic, Take};
