//! Plain minimax

use log::trace;

use super::{SearchResult, heuristic_value, improves, leaf_value, worst_for};
use crate::{
    ports::{Evaluator, Game, Role},
    transposition::GameTable,
};

/// Search `depth` plies below `game` with `role` to move.
///
/// Every legal move is explored. Ties go to the first move that reaches the
/// best value, so the result depends on the game's move order. When a table
/// is supplied, results are read from and written to its exact store.
pub fn search<G, E>(
    game: &mut G,
    evaluator: &E,
    depth: u32,
    role: Role,
    mut table: Option<&mut GameTable<G>>,
) -> SearchResult<G::Move>
where
    G: Game,
    E: Evaluator<G> + ?Sized,
{
    let key = table.as_ref().map(|_| game.state_key(role));
    if let (Some(table), Some(key)) = (table.as_deref_mut(), key.as_ref()) {
        if let Some(hit) = table.probe_exact(key, depth) {
            trace!("minimax table hit at depth {depth}: {key:?}");
            return SearchResult::from_hit(hit);
        }
    }

    if let Some(value) = leaf_value(game, evaluator, depth, role) {
        return SearchResult::leaf(value);
    }

    let moves = game.legal_moves();
    if moves.is_empty() {
        return SearchResult::leaf(heuristic_value(game, evaluator, role));
    }

    let mut nodes = 1;
    let mut best_move = None;
    let mut best_value = worst_for(role);

    for mv in moves {
        game.apply_move(&mv, role);
        let child = search(game, evaluator, depth - 1, role.opponent(), table.as_deref_mut());
        game.undo_move(&mv, role);

        nodes += child.nodes;
        if best_move.is_none() || improves(role, child.value, best_value) {
            best_value = child.value;
            best_move = Some(mv);
        }
    }

    if let (Some(table), Some(key)) = (table, key) {
        table.store_exact(key, depth, best_value, best_move.clone());
    }

    SearchResult {
        best_move,
        value: best_value,
        nodes,
    }
}
