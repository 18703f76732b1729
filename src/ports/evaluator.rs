//! Evaluator port - static evaluation of non-terminal positions

use super::game::{Game, Role};

/// Static evaluator for a game
///
/// Scores a non-terminal position from the maximizer's point of view, with
/// `to_move` to play. Scores are plain `i32`s; the search core clamps them
/// strictly inside the win/loss sentinels, so a heuristic can never be
/// mistaken for a proven result.
///
/// Any `Fn(&G, Role) -> i32` closure is an evaluator, which keeps test
/// fixtures short:
///
/// ```
/// use gamesearch::{games::Nim, ports::{Evaluator, Role}};
///
/// let count_sticks = |nim: &Nim, _to_move: Role| nim.heaps().iter().sum::<u32>() as i32;
/// assert_eq!(count_sticks.heuristic(&Nim::new(vec![3, 4]), Role::Maximizer), 7);
/// ```
pub trait Evaluator<G: Game + ?Sized> {
    /// Heuristic score of `game` with `to_move` to play
    fn heuristic(&self, game: &G, to_move: Role) -> i32;
}

impl<G, F> Evaluator<G> for F
where
    G: Game + ?Sized,
    F: Fn(&G, Role) -> i32,
{
    fn heuristic(&self, game: &G, to_move: Role) -> i32 {
        self(game, to_move)
    }
}
