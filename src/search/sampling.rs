//! Sampled minimax
//!
//! Keeps wide games tractable by exploring at most `sample_size` randomly
//! chosen moves at each interior node. The sampled moves keep their
//! enumeration order, so ties still go to the earliest move. The result is an
//! estimate: a good move that is never sampled is never found.

use rand::{Rng, seq::index};

use super::{SearchResult, heuristic_value, improves, leaf_value, worst_for};
use crate::ports::{Evaluator, Game, Role};

/// Minimax over a random subset of moves at each node.
///
/// `None`, or a sample size at least the branching factor, explores every
/// move and gives the same result as plain minimax.
pub fn search<G, E, R>(
    game: &mut G,
    evaluator: &E,
    depth: u32,
    role: Role,
    sample_size: Option<usize>,
    rng: &mut R,
) -> SearchResult<G::Move>
where
    G: Game,
    E: Evaluator<G> + ?Sized,
    R: Rng + ?Sized,
{
    if let Some(value) = leaf_value(game, evaluator, depth, role) {
        return SearchResult::leaf(value);
    }

    let moves = sample_moves(game.legal_moves(), sample_size, rng);
    if moves.is_empty() {
        return SearchResult::leaf(heuristic_value(game, evaluator, role));
    }

    let mut nodes = 1;
    let mut best_move = None;
    let mut best_value = worst_for(role);

    for mv in moves {
        game.apply_move(&mv, role);
        let child = search(
            game,
            evaluator,
            depth - 1,
            role.opponent(),
            sample_size,
            rng,
        );
        game.undo_move(&mv, role);

        nodes += child.nodes;
        if best_move.is_none() || improves(role, child.value, best_value) {
            best_value = child.value;
            best_move = Some(mv);
        }
    }

    SearchResult {
        best_move,
        value: best_value,
        nodes,
    }
}

fn sample_moves<M, R>(moves: Vec<M>, sample_size: Option<usize>, rng: &mut R) -> Vec<M>
where
    R: Rng + ?Sized,
{
    let Some(amount) = sample_size else {
        return moves;
    };
    if moves.len() <= amount {
        return moves;
    }

    let mut picked = index::sample(rng, moves.len(), amount).into_vec();
    picked.sort_unstable();

    let mut slots: Vec<Option<M>> = moves.into_iter().map(Some).collect();
    picked
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}
