//! Transposition table behaviour seen through whole searches

mod common;

use common::{deep_tree, leaf_heuristic};
use gamesearch::{
    Algorithm, TranspositionTable, Value,
    games::{ConnectFour, ConnectFourHeuristic, Nim, NimHeuristic},
    identifiers::StateKey,
    ports::{Evaluator, Game, Role},
    search::{SamplingOptions, SearchResult},
    transposition::GameTable,
};

fn run_with<G, E>(
    algorithm: Algorithm,
    game: &mut G,
    evaluator: &E,
    depth: u32,
    table: &mut GameTable<G>,
) -> SearchResult<G::Move>
where
    G: Game,
    E: Evaluator<G>,
{
    algorithm.search(
        game,
        evaluator,
        depth,
        Role::Maximizer,
        Some(table),
        SamplingOptions::default(),
    )
}

#[test]
fn fresh_tables_give_identical_results() {
    for algorithm in Algorithm::EXACT {
        let first = run_with(
            algorithm,
            &mut ConnectFour::default(),
            &ConnectFourHeuristic,
            5,
            &mut TranspositionTable::new(),
        );
        let second = run_with(
            algorithm,
            &mut ConnectFour::default(),
            &ConnectFourHeuristic,
            5,
            &mut TranspositionTable::new(),
        );
        assert_eq!(first, second, "{algorithm}");
    }
}

#[test]
fn warm_table_answers_the_root_at_once() {
    for algorithm in Algorithm::EXACT {
        let mut table = TranspositionTable::new();
        let mut board = ConnectFour::default();
        let cold = run_with(algorithm, &mut board, &ConnectFourHeuristic, 4, &mut table);
        let warm = run_with(algorithm, &mut board, &ConnectFourHeuristic, 4, &mut table);

        assert_eq!(warm.value, cold.value, "{algorithm}");
        assert_eq!(warm.best_move, cold.best_move, "{algorithm}");
        assert_eq!(warm.nodes, 1, "{algorithm}");
        assert_eq!(board, ConnectFour::default());
    }
}

#[test]
fn full_depth_table_searches_match_plain_ones() {
    let heaps = Nim::new(vec![1, 2, 4]);
    for algorithm in Algorithm::EXACT {
        let plain = algorithm.search(
            &mut heaps.clone(),
            &NimHeuristic,
            7,
            Role::Maximizer,
            None,
            SamplingOptions::default(),
        );
        let mut table = TranspositionTable::new();
        let cached = run_with(algorithm, &mut heaps.clone(), &NimHeuristic, 7, &mut table);

        assert_eq!(cached.value, plain.value, "{algorithm}");
        assert!(cached.nodes < plain.nodes, "{algorithm} gained nothing from the table");
        assert!(table.stats().hits > 0);
    }
}

#[test]
fn mock_tree_values_survive_the_table() {
    for algorithm in Algorithm::EXACT {
        let mut table = TranspositionTable::new();
        let result = run_with(algorithm, &mut deep_tree(), &leaf_heuristic, 4, &mut table);
        assert_eq!(result.value, Value::heuristic(6), "{algorithm}");
        assert!(!table.is_empty());
    }
}

#[test]
fn shallow_entries_do_not_answer_deeper_searches() {
    let mut table = TranspositionTable::new();
    let mut nim = Nim::new(vec![1, 2, 3]);
    let root = StateKey::new("1,2,3_X");

    let shallow = run_with(Algorithm::Minimax, &mut nim, &NimHeuristic, 1, &mut table);
    assert_eq!(table.exact_entry(&root).map(|e| e.depth), Some(1));
    // depth 1: the root and its six replies
    assert_eq!(shallow.nodes, 7);

    let deep = run_with(Algorithm::Minimax, &mut nim, &NimHeuristic, 3, &mut table);
    assert!(deep.nodes > 1);
    assert_eq!(table.exact_entry(&root).map(|e| e.depth), Some(3));

    // and the deeper entry now answers a shallower search
    let again = run_with(Algorithm::Minimax, &mut nim, &NimHeuristic, 2, &mut table);
    assert_eq!(again.nodes, 1);
    assert_eq!(again.value, deep.value);
}

#[test]
fn bounded_entries_are_depth_gated_too() {
    for algorithm in [Algorithm::AlphaBeta, Algorithm::Scout] {
        let mut table = TranspositionTable::new();
        let mut board = ConnectFour::default();
        let root = board.state_key(Role::Maximizer);

        run_with(algorithm, &mut board, &ConnectFourHeuristic, 2, &mut table);
        assert_eq!(table.bounded_entry(&root).map(|e| e.depth), Some(2));

        let deeper = run_with(algorithm, &mut board, &ConnectFourHeuristic, 3, &mut table);
        assert!(deeper.nodes > 1, "{algorithm} reused a shallow entry");
        assert_eq!(table.bounded_entry(&root).map(|e| e.depth), Some(3));
    }
}

#[test]
fn minimax_and_bounded_searches_use_separate_stores() {
    let mut table = TranspositionTable::new();
    let mut nim = Nim::new(vec![2, 2]);

    run_with(Algorithm::Minimax, &mut nim, &NimHeuristic, 4, &mut table);
    assert!(table.exact_len() > 0);
    assert_eq!(table.bounded_len(), 0);

    let result = run_with(Algorithm::AlphaBeta, &mut nim, &NimHeuristic, 4, &mut table);
    assert!(result.nodes > 1);
    assert!(table.bounded_len() > 0);
}

#[test]
fn scout_never_stores_null_window_tests() {
    let mut tree = deep_tree();
    let mut table = TranspositionTable::new();
    let result = run_with(Algorithm::Scout, &mut tree, &leaf_heuristic, 4, &mut table);
    assert_eq!(result.value, Value::heuristic(6));

    let mut seen = 0;
    for node in 0..tree.node_count() {
        for role in [Role::Maximizer, Role::Minimizer] {
            let Some(entry) = table.bounded_entry(&(node, role)) else {
                continue;
            };
            seen += 1;
            assert_ne!(
                entry.window.beta,
                entry.window.alpha.succ(),
                "node {node} with {role} to move was stored from a null-window test"
            );
        }
    }
    assert!(seen > 0);
    assert_eq!(seen, table.bounded_len());
    assert_eq!(table.exact_len(), 0);
}
