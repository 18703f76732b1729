//! Search command - find the best move in one position

use std::{fmt, time::Instant};

use anyhow::Result;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use super::GameArgs;
use crate::{
    cli::{
        config::{GameKind, SearchConfig},
        output::{
            create_spinner, format_duration, format_number, format_value, print_kv, print_section,
        },
    },
    games::{ConnectFourHeuristic, DotsAndBoxesHeuristic, NimHeuristic},
    ports::{Evaluator, Game, Role},
    search::Algorithm,
    transposition::TranspositionTable,
};

#[derive(Parser, Debug)]
#[command(about = "Search one position with one strategy")]
pub struct SearchArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Search strategy
    #[arg(long, short = 'a', value_enum, default_value = "alpha-beta")]
    pub algorithm: Algorithm,
}

pub fn execute(args: SearchArgs) -> Result<()> {
    let config = args.game.resolve()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let start = args.game.start;
    let kind = args.game.game;

    match kind {
        GameKind::ConnectFour => run(
            config.connect_four_position(start, &mut rng)?,
            &ConnectFourHeuristic,
            kind,
            args.algorithm,
            &config,
        ),
        GameKind::Nim => run(
            config.nim_position(start, &mut rng),
            &NimHeuristic,
            kind,
            args.algorithm,
            &config,
        ),
        GameKind::DotsAndBoxes => run(
            config.dots_and_boxes_position(start, &mut rng)?,
            &DotsAndBoxesHeuristic,
            kind,
            args.algorithm,
            &config,
        ),
    }
}

fn run<G, E>(
    mut game: G,
    evaluator: &E,
    kind: GameKind,
    algorithm: Algorithm,
    config: &SearchConfig,
) -> Result<()>
where
    G: Game + fmt::Display,
    E: Evaluator<G>,
{
    let depth = config.depth(kind);
    let use_table = config.use_table && algorithm.uses_table();

    print_section(&format!("Starting {} position", kind.name()));
    println!("{game}");

    let mut table = use_table.then(TranspositionTable::new);
    let spinner = create_spinner(&format!("{algorithm} to depth {depth}..."));
    let start = Instant::now();
    let result = algorithm.search(
        &mut game,
        evaluator,
        depth,
        Role::Maximizer,
        table.as_mut(),
        config.sampling(),
    );
    let elapsed = start.elapsed();
    spinner.finish_and_clear();

    print_section(&format!("{algorithm} results"));
    let best_move = result
        .best_move
        .as_ref()
        .map_or_else(|| "none".to_string(), ToString::to_string);
    print_kv("Best move", &best_move);
    print_kv("Value", &format_value(result.value));
    print_kv("Nodes", &format_number(result.nodes));
    print_kv("Time", &format_duration(elapsed));

    if let Some(table) = &table {
        let stats = table.stats();
        print_kv("Table entries", &format_number(table.len() as u64));
        print_kv(
            "Table hits",
            &format!(
                "{} / {} ({:.1}%)",
                format_number(stats.hits),
                format_number(stats.probes),
                stats.hit_rate() * 100.0
            ),
        );
    }

    Ok(())
}
