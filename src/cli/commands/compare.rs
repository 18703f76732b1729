//! Compare command - run several strategies on the same position

use std::{fmt, path::PathBuf};

use anyhow::{Result, bail};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use super::GameArgs;
use crate::{
    cli::{
        config::{GameKind, SearchConfig},
        output::{
            create_spinner, format_duration, format_number, format_value, print_kv, print_section,
            print_subsection,
        },
    },
    games::{ConnectFourHeuristic, DotsAndBoxesHeuristic, NimHeuristic},
    pipeline::{ComparisonConfig, ComparisonFramework, ComparisonReport, Contender},
    ports::{Evaluator, Game},
    search::Algorithm,
};

#[derive(Parser, Debug)]
#[command(about = "Compare search strategies on one position")]
pub struct CompareArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Strategies to run (defaults to minimax, alpha-beta and scout)
    #[arg(long, short = 'a', value_enum, value_delimiter = ',')]
    pub algorithms: Vec<Algorithm>,

    /// Export the comparison to CSV
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Export the comparison to JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

pub fn execute(args: CompareArgs) -> Result<()> {
    let config = args.game.resolve()?;
    let comparison = comparison_config(&args.algorithms, args.game.game, &config);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let start = args.game.start;

    let report = match args.game.game {
        GameKind::ConnectFour => run(
            &config.connect_four_position(start, &mut rng)?,
            &ConnectFourHeuristic,
            comparison,
        )?,
        GameKind::Nim => run(&config.nim_position(start, &mut rng), &NimHeuristic, comparison)?,
        GameKind::DotsAndBoxes => run(
            &config.dots_and_boxes_position(start, &mut rng)?,
            &DotsAndBoxesHeuristic,
            comparison,
        )?,
    };

    print_report(&report);

    if let Some(path) = &args.output {
        report.save_csv(path)?;
        println!("\nResults exported to: {}", path.display());
    }
    if let Some(path) = &args.json {
        report.save_json(path)?;
        println!("Results exported to: {}", path.display());
    }

    if !report.agreement {
        bail!("exact strategies disagree on the value of the position");
    }
    Ok(())
}

/// Contenders for the requested strategies, or minimax, alpha-beta and SCOUT
/// when none are named. Minimax always runs first as the baseline;
/// `use_table` adds a table run for every strategy that supports one.
fn comparison_config(algorithms: &[Algorithm], game: GameKind, config: &SearchConfig) -> ComparisonConfig {
    let requested: &[Algorithm] = if algorithms.is_empty() {
        &Algorithm::EXACT
    } else {
        algorithms
    };

    let mut ordered = vec![Algorithm::Minimax];
    ordered.extend(requested.iter().filter(|&&a| a != Algorithm::Minimax));

    let mut contenders = Vec::new();
    for algorithm in ordered {
        contenders.push(Contender::new(algorithm, false));
        if config.use_table && algorithm.uses_table() {
            contenders.push(Contender::new(algorithm, true));
        }
    }

    ComparisonConfig {
        contenders,
        sampling: config.sampling(),
        ..ComparisonConfig::standard(config.depth(game))
    }
}

fn run<G, E>(game: &G, evaluator: &E, comparison: ComparisonConfig) -> Result<ComparisonReport>
where
    G: Game + Clone + PartialEq + fmt::Display,
    E: Evaluator<G>,
{
    print_section("Starting position");
    println!("{game}");

    let spinner = create_spinner(&format!(
        "running {} strategies to depth {}...",
        comparison.contenders.len(),
        comparison.depth
    ));
    let report = ComparisonFramework::new(comparison).run(game, evaluator);
    spinner.finish_and_clear();
    Ok(report?)
}

fn print_report(report: &ComparisonReport) {
    print_section(&format!("Comparison at depth {}", report.depth));

    for run in &report.runs {
        print_subsection(&run.contender.label());
        print_kv("Best move", run.best_move.as_deref().unwrap_or("none"));
        print_kv("Value", &format_value(run.value));
        print_kv("Nodes", &format_number(run.nodes));
        print_kv("Time", &format_duration(run.elapsed));
        if let Some(stats) = &run.table_stats {
            print_kv(
                "Table hits",
                &format!("{:.1}% of {}", stats.hit_rate() * 100.0, format_number(stats.probes)),
            );
        }
        if report.baseline().is_some() {
            print_kv("Node reduction", &format!("{:.2}%", run.node_reduction));
            print_kv("Time reduction", &format!("{:.2}%", run.time_reduction));
        }
    }

    println!();
    print_kv(
        "Agreement",
        if report.agreement { "yes" } else { "NO" },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimax_baseline_is_always_first() {
        let config = SearchConfig::default();
        let comparison = comparison_config(&[Algorithm::Scout], GameKind::Nim, &config);
        assert_eq!(
            comparison.contenders,
            vec![
                Contender::new(Algorithm::Minimax, false),
                Contender::new(Algorithm::Scout, false),
            ]
        );
        assert_eq!(comparison.depth, 10);
    }

    #[test]
    fn tables_add_runs_for_supporting_strategies() {
        let config = SearchConfig {
            use_table: true,
            ..SearchConfig::default()
        };
        let comparison = comparison_config(
            &[Algorithm::Sampled, Algorithm::AlphaBeta],
            GameKind::DotsAndBoxes,
            &config,
        );
        assert_eq!(
            comparison.contenders,
            vec![
                Contender::new(Algorithm::Minimax, false),
                Contender::new(Algorithm::Minimax, true),
                Contender::new(Algorithm::Sampled, false),
                Contender::new(Algorithm::AlphaBeta, false),
                Contender::new(Algorithm::AlphaBeta, true),
            ]
        );
        assert_eq!(comparison.sampling.sample_size, Some(3));
    }

    #[test]
    fn default_strategies_follow_the_table_flag() {
        let plain = comparison_config(&[], GameKind::ConnectFour, &SearchConfig::default());
        assert_eq!(
            plain.contenders,
            vec![
                Contender::new(Algorithm::Minimax, false),
                Contender::new(Algorithm::AlphaBeta, false),
                Contender::new(Algorithm::Scout, false),
            ]
        );

        let config = SearchConfig {
            use_table: true,
            ..SearchConfig::default()
        };
        let explicit = comparison_config(&Algorithm::EXACT, GameKind::ConnectFour, &config);
        let defaulted = comparison_config(&[], GameKind::ConnectFour, &config);
        assert_eq!(defaulted.contenders, explicit.contenders);
        assert_eq!(defaulted.contenders.len(), 6);
        assert!(defaulted.contenders.contains(&Contender::new(Algorithm::Minimax, true)));
    }
}
