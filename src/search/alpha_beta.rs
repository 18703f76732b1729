//! Minimax with alpha-beta pruning

use log::trace;

use super::{SearchResult, Window, heuristic_value, improves, leaf_value, tighten, worst_for};
use crate::{
    ports::{Evaluator, Game, Role},
    transposition::GameTable,
};

/// Alpha-beta search of `depth` plies below `game` inside `window`.
///
/// Results are fail-soft: a value at or below `alpha` is an upper bound on
/// the true value, one at or above `beta` a lower bound, anything in between
/// exact. With [`Window::FULL`] the result equals plain minimax.
///
/// The maximizer raises alpha after each child and the minimizer lowers beta;
/// once `alpha >= beta` the remaining siblings are skipped. The finished node
/// is stored in the table's bounded store, classified against the window it
/// was called with.
pub fn search<G, E>(
    game: &mut G,
    evaluator: &E,
    depth: u32,
    window: Window,
    role: Role,
    mut table: Option<&mut GameTable<G>>,
) -> SearchResult<G::Move>
where
    G: Game,
    E: Evaluator<G> + ?Sized,
{
    let key = table.as_ref().map(|_| game.state_key(role));
    if let (Some(table), Some(key)) = (table.as_deref_mut(), key.as_ref()) {
        if let Some(hit) = table.probe_bounded(key, depth, window) {
            trace!("alpha-beta table hit at depth {depth}: {key:?}");
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

    let original = window;
    let mut window = window;
    let mut nodes = 1;
    let mut best_move = None;
    let mut value = worst_for(role);

    for mv in moves {
        game.apply_move(&mv, role);
        let child = search(
            game,
            evaluator,
            depth - 1,
            window,
            role.opponent(),
            table.as_deref_mut(),
        );
        game.undo_move(&mv, role);

        nodes += child.nodes;
        if best_move.is_none() || improves(role, child.value, value) {
            value = child.value;
            best_move = Some(mv);
        }

        tighten(&mut window, role, value);
        if window.is_closed() {
            break;
        }
    }

    if let (Some(table), Some(key)) = (table, key) {
        table.store_bounded(key, depth, value, best_move.clone(), original);
    }

    SearchResult {
        best_move,
        value,
        nodes,
    }
}
