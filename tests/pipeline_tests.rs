//! Tests for comparative runs and report export

use gamesearch::{
    Algorithm,
    games::{ConnectFour, ConnectFourHeuristic, DotsAndBoxes, DotsAndBoxesHeuristic, Nim, NimHeuristic},
    pipeline::{ComparisonConfig, ComparisonFramework, ComparisonReport, Contender},
};
use tempfile::TempDir;

#[test]
fn standard_comparison_on_connect_four() {
    let framework = ComparisonFramework::new(ComparisonConfig::standard(4));
    let board = ConnectFour::default();
    let report = framework.run(&board, &ConnectFourHeuristic).unwrap();

    assert_eq!(report.runs.len(), 5);
    assert!(report.agreement);
    assert_eq!(board, ConnectFour::default());

    let baseline = report.baseline().unwrap();
    assert_eq!(baseline.contender, Contender::new(Algorithm::Minimax, false));
    assert!(baseline.table_stats.is_none());

    for run in report.runs.iter().filter(|run| run.contender.table) {
        let stats = run.table_stats.unwrap();
        assert!(stats.probes > 0, "{}", run.contender.label());
        assert!(run.table_entries > 0);
    }
}

#[test]
fn alpha_beta_saves_nodes_on_every_game() {
    let config = ComparisonConfig {
        contenders: vec![
            Contender::new(Algorithm::Minimax, false),
            Contender::new(Algorithm::AlphaBeta, false),
        ],
        ..ComparisonConfig::standard(3)
    };
    let framework = ComparisonFramework::new(config);

    let reports = [
        framework.run(&ConnectFour::default(), &ConnectFourHeuristic).unwrap(),
        framework.run(&Nim::default(), &NimHeuristic).unwrap(),
        framework
            .run(&DotsAndBoxes::new(2).unwrap(), &DotsAndBoxesHeuristic)
            .unwrap(),
    ];
    for report in &reports {
        assert!(report.agreement);
        assert!(report.runs[1].nodes <= report.runs[0].nodes);
        assert!(report.runs[1].node_reduction >= 0.0);
    }
}

#[test]
fn sampled_runs_do_not_affect_agreement() {
    let config = ComparisonConfig::standard(3)
        .with_contender(Contender::new(Algorithm::Sampled, false));
    let report = ComparisonFramework::new(config)
        .run(&Nim::default(), &NimHeuristic)
        .unwrap();
    assert_eq!(report.runs.len(), 6);
    assert!(report.agreement);
}

#[test]
fn reports_export_to_csv_and_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = temp_dir.path().join("report.csv");
    let json_path = temp_dir.path().join("report.json");

    let report = ComparisonFramework::new(ComparisonConfig::standard(2))
        .run(&ConnectFour::default(), &ConnectFourHeuristic)
        .unwrap();
    report.save_csv(&csv_path).unwrap();
    report.save_json(&json_path).unwrap();

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("strategy,table,best_move,value,nodes"));
    assert_eq!(lines.count(), report.runs.len());
    assert!(csv.contains("alpha-beta,true"));

    let loaded = ComparisonReport::load_json(&json_path).unwrap();
    assert_eq!(loaded.runs.len(), report.runs.len());
    assert_eq!(loaded.agreement, report.agreement);
    for (a, b) in loaded.runs.iter().zip(&report.runs) {
        assert_eq!(a.contender, b.contender);
        assert_eq!(a.value, b.value);
        assert_eq!(a.nodes, b.nodes);
        assert_eq!(a.best_move, b.best_move);
    }
}
