//! Game-tree search strategies
//!
//! Three interchangeable strategies share one recursion shape:
//!
//! - [`minimax`] explores every legal move to the depth limit;
//! - [`alpha_beta`] prunes branches that cannot change the root decision;
//! - [`scout`] searches the first move fully and only re-searches siblings
//!   that a cheap null-window test says might beat it.
//!
//! [`sampling`] is an approximate minimax that looks at a random subset of
//! moves per node.
//!
//! Every strategy counts one node per call, including calls answered by the
//! transposition table, and returns the count alongside its result. Every
//! move applied to the game is undone before the call returns.

pub mod alpha_beta;
pub mod minimax;
pub mod sampling;
pub mod scout;
pub mod value;

use std::fmt;

use clap::ValueEnum;
use log::debug;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

pub use value::{Value, Window};

use crate::{
    ports::{Evaluator, Game, Role},
    transposition::{GameTable, TableHit},
};

/// Result of a search: the move to play, its value and the work it took
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<M> {
    /// Best move found, `None` at leaves
    pub best_move: Option<M>,
    /// Value from the maximizer's point of view
    pub value: Value,
    /// Number of search calls made, this one included
    pub nodes: u64,
}

impl<M> SearchResult<M> {
    /// A node resolved without expanding children
    pub fn leaf(value: Value) -> Self {
        Self {
            best_move: None,
            value,
            nodes: 1,
        }
    }

    fn from_hit(hit: TableHit<M>) -> Self {
        Self {
            best_move: hit.best_move,
            value: hit.value,
            nodes: 1,
        }
    }
}

/// The search strategies available to a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Plain minimax, no pruning
    Minimax,
    /// Minimax with alpha-beta pruning
    AlphaBeta,
    /// SCOUT: full search of the first move, null-window tests for the rest
    Scout,
    /// Minimax over a random sample of moves at each node
    Sampled,
}

impl Algorithm {
    /// Strategies that compute the exact minimax value
    pub const EXACT: [Algorithm; 3] = [Algorithm::Minimax, Algorithm::AlphaBeta, Algorithm::Scout];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Minimax => "minimax",
            Algorithm::AlphaBeta => "alpha-beta",
            Algorithm::Scout => "scout",
            Algorithm::Sampled => "sampled",
        }
    }

    /// Whether the strategy can use a transposition table
    pub fn uses_table(&self) -> bool {
        !matches!(self, Algorithm::Sampled)
    }

    /// Run this strategy from the root with a full window.
    ///
    /// `table` is ignored by [`Algorithm::Sampled`].
    pub fn search<G, E>(
        self,
        game: &mut G,
        evaluator: &E,
        depth: u32,
        role: Role,
        table: Option<&mut GameTable<G>>,
        sampling: SamplingOptions,
    ) -> SearchResult<G::Move>
    where
        G: Game,
        E: Evaluator<G> + ?Sized,
    {
        let result = match self {
            Algorithm::Minimax => minimax::search(game, evaluator, depth, role, table),
            Algorithm::AlphaBeta => {
                alpha_beta::search(game, evaluator, depth, Window::FULL, role, table)
            }
            Algorithm::Scout => scout::search(game, evaluator, depth, Window::FULL, role, table),
            Algorithm::Sampled => {
                let mut rng = StdRng::seed_from_u64(sampling.seed);
                sampling::search(game, evaluator, depth, role, sampling.sample_size, &mut rng)
            }
        };
        debug!(
            "{} depth {}: value {} move {:?} after {} nodes",
            self.name(),
            depth,
            result.value,
            result.best_move,
            result.nodes
        );
        result
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parameters for [`Algorithm::Sampled`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingOptions {
    /// Moves explored per node; `None` explores all of them
    pub sample_size: Option<usize>,
    /// RNG seed, so sampled searches are reproducible
    pub seed: u64,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            sample_size: Some(3),
            seed: 0,
        }
    }
}

/// Score of a finished game, or the heuristic score at the depth limit.
///
/// Returns `None` when the node has to be expanded.
fn leaf_value<G, E>(game: &G, evaluator: &E, depth: u32, to_move: Role) -> Option<Value>
where
    G: Game,
    E: Evaluator<G> + ?Sized,
{
    if game.is_terminal() {
        return Some(match game.winner(to_move) {
            Some(Role::Maximizer) => Value::INFINITY,
            Some(Role::Minimizer) => Value::NEG_INFINITY,
            None => Value::DRAW,
        });
    }
    if depth == 0 {
        return Some(heuristic_value(game, evaluator, to_move));
    }
    None
}

fn heuristic_value<G, E>(game: &G, evaluator: &E, to_move: Role) -> Value
where
    G: Game,
    E: Evaluator<G> + ?Sized,
{
    Value::heuristic(evaluator.heuristic(game, to_move))
}

/// Starting value for `role`: the worst outcome it could get
fn worst_for(role: Role) -> Value {
    match role {
        Role::Maximizer => Value::NEG_INFINITY,
        Role::Minimizer => Value::INFINITY,
    }
}

/// Whether `candidate` is strictly better than `incumbent` for `role`
fn improves(role: Role, candidate: Value, incumbent: Value) -> bool {
    match role {
        Role::Maximizer => candidate > incumbent,
        Role::Minimizer => candidate < incumbent,
    }
}

/// Narrow `window` from `role`'s side after it has secured `value`
fn tighten(window: &mut Window, role: Role, value: Value) {
    match role {
        Role::Maximizer => window.alpha = window.alpha.max(value),
        Role::Minimizer => window.beta = window.beta.min(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn improvement_is_strict() {
        let three = Value::heuristic(3);
        let four = Value::heuristic(4);
        assert!(improves(Role::Maximizer, four, three));
        assert!(!improves(Role::Maximizer, three, three));
        assert!(improves(Role::Minimizer, three, four));
        assert!(!improves(Role::Minimizer, four, four));
    }

    #[test]
    fn tighten_moves_the_right_edge() {
        let mut window = Window::FULL;
        tighten(&mut window, Role::Maximizer, Value::heuristic(2));
        assert_eq!(window.alpha, Value::heuristic(2));
        assert_eq!(window.beta, Value::INFINITY);

        tighten(&mut window, Role::Minimizer, Value::heuristic(5));
        assert_eq!(window.beta, Value::heuristic(5));

        tighten(&mut window, Role::Maximizer, Value::heuristic(1));
        assert_eq!(window.alpha, Value::heuristic(2));
    }

    #[test]
    fn algorithm_names_round_trip_through_serde() {
        for algorithm in [
            Algorithm::Minimax,
            Algorithm::AlphaBeta,
            Algorithm::Scout,
            Algorithm::Sampled,
        ] {
            let json = serde_json::to_string(&algorithm).unwrap();
            assert_eq!(json, format!("\"{}\"", algorithm.name()));
        }
    }
}
