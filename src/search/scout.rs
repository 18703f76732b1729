//! SCOUT search
//!
//! The first move is searched with the real window and becomes the baseline.
//! Each later move is first tested with a null window around the baseline,
//! which prunes almost everything. Only a move the test cannot rule out is
//! searched again with the real window.
//!
//! Null-window tests run without the transposition table: a bound proved in a
//! one-point window says nothing useful to queries with other windows.

use log::trace;

use super::{
    SearchResult, Value, Window, heuristic_value, improves, leaf_value, tighten, worst_for,
};
use crate::{
    ports::{Evaluator, Game, Role},
    transposition::GameTable,
};

/// SCOUT search of `depth` plies below `game` inside `window`.
///
/// Shares the fail-soft contract of [`alpha_beta::search`](super::alpha_beta::search).
/// If the baseline never improves on the role's worst value (every move
/// loses), no best move is reported.
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
            trace!("scout table hit at depth {depth}: {key:?}");
            return SearchResult::from_hit(hit);
        }
    }

    if let Some(value) = leaf_value(game, evaluator, depth, role) {
        return SearchResult::leaf(value);
    }

    let mut moves = game.legal_moves().into_iter();
    let Some(first) = moves.next() else {
        return SearchResult::leaf(heuristic_value(game, evaluator, role));
    };

    let original = window;
    let mut window = window;
    let mut nodes = 1;

    game.apply_move(&first, role);
    let child = search(
        game,
        evaluator,
        depth - 1,
        window,
        role.opponent(),
        table.as_deref_mut(),
    );
    game.undo_move(&first, role);
    nodes += child.nodes;

    let mut baseline = child.value;
    let mut best_move = Some(first);
    tighten(&mut window, role, baseline);
    record::<G>(&mut table, key.as_ref(), depth, baseline, &best_move, original);

    if !window.is_closed() {
        for mv in moves {
            let test_window = match role {
                Role::Maximizer => Window::null_above(baseline),
                Role::Minimizer => Window::null_below(baseline),
            };

            game.apply_move(&mv, role);
            let test = search(game, evaluator, depth - 1, test_window, role.opponent(), None);
            game.undo_move(&mv, role);
            nodes += test.nodes;

            let might_improve = match role {
                Role::Maximizer => test.value >= baseline,
                Role::Minimizer => test.value <= baseline,
            };
            if !might_improve {
                continue;
            }

            game.apply_move(&mv, role);
            let full = search(
                game,
                evaluator,
                depth - 1,
                window,
                role.opponent(),
                table.as_deref_mut(),
            );
            game.undo_move(&mv, role);
            nodes += full.nodes;

            if improves(role, full.value, baseline) {
                baseline = full.value;
                best_move = Some(mv);
                tighten(&mut window, role, baseline);
                record::<G>(&mut table, key.as_ref(), depth, baseline, &best_move, original);
                if window.is_closed() {
                    break;
                }
            }
        }
    }

    if baseline == worst_for(role) {
        best_move = None;
    }

    SearchResult {
        best_move,
        value: baseline,
        nodes,
    }
}

/// Store a full-window result in the bounded store, if a table is in use
fn record<G: Game>(
    table: &mut Option<&mut GameTable<G>>,
    key: Option<&G::Key>,
    depth: u32,
    value: Value,
    best_move: &Option<G::Move>,
    window: Window,
) {
    if let (Some(table), Some(key)) = (table.as_deref_mut(), key) {
        table.store_bounded(key.clone(), depth, value, best_move.clone(), window);
    }
}
