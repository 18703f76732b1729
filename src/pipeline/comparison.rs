//! Comparative runs of several search strategies on one position
//!
//! Every run starts from its own clone of the position, so no run can see
//! another's moves or table. The first plain minimax run without a table is
//! the baseline that node and time reductions are measured against.

use std::{
    fs::File,
    path::Path,
    time::{Duration, Instant},
};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Evaluator, Game, Role},
    search::{Algorithm, SamplingOptions, Value},
    transposition::{TableStats, TranspositionTable},
};

/// One strategy to run, with or without a transposition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contender {
    pub algorithm: Algorithm,
    pub table: bool,
}

impl Contender {
    pub fn new(algorithm: Algorithm, table: bool) -> Self {
        Self { algorithm, table }
    }

    /// Label used in reports, e.g. `alpha-beta+tt`
    pub fn label(&self) -> String {
        if self.table {
            format!("{}+tt", self.algorithm)
        } else {
            self.algorithm.to_string()
        }
    }
}

/// Settings for a comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonConfig {
    pub depth: u32,
    /// Role to move at the root
    pub role: Role,
    pub contenders: Vec<Contender>,
    pub sampling: SamplingOptions,
}

impl ComparisonConfig {
    /// Minimax, alpha-beta and SCOUT without tables, the last two again with
    /// tables
    pub fn standard(depth: u32) -> Self {
        Self {
            depth,
            role: Role::Maximizer,
            contenders: vec![
                Contender::new(Algorithm::Minimax, false),
                Contender::new(Algorithm::AlphaBeta, false),
                Contender::new(Algorithm::Scout, false),
                Contender::new(Algorithm::AlphaBeta, true),
                Contender::new(Algorithm::Scout, true),
            ],
            sampling: SamplingOptions::default(),
        }
    }

    /// Add a contender
    pub fn with_contender(mut self, contender: Contender) -> Self {
        self.contenders.push(contender);
        self
    }
}

/// Outcome of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub contender: Contender,
    pub best_move: Option<String>,
    pub value: Value,
    pub nodes: u64,
    pub elapsed: Duration,
    /// Table counters, when the run used a table
    pub table_stats: Option<TableStats>,
    /// Entries left in the table after the run
    pub table_entries: usize,
    /// Percentage of baseline nodes saved
    pub node_reduction: f64,
    /// Percentage of baseline time saved
    pub time_reduction: f64,
}

/// Result of a comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub depth: u32,
    pub role: Role,
    pub runs: Vec<RunReport>,
    /// Whether every exact strategy run without a table found the same value
    pub agreement: bool,
}

/// Flat CSV record for one run
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    strategy: String,
    table: bool,
    best_move: &'a str,
    value: String,
    nodes: u64,
    seconds: f64,
    node_reduction: f64,
    time_reduction: f64,
    table_hits: u64,
    table_probes: u64,
    table_entries: usize,
}

impl ComparisonReport {
    /// The run reductions were measured against
    pub fn baseline(&self) -> Option<&RunReport> {
        self.runs.iter().find(|run| is_baseline(&run.contender))
    }

    /// Save the report as pretty JSON
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a report saved by [`ComparisonReport::save_json`]
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let report = serde_json::from_reader(file)?;
        Ok(report)
    }

    /// Save one CSV row per run
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for run in &self.runs {
            let stats = run.table_stats.unwrap_or_default();
            writer.serialize(CsvRow {
                strategy: run.contender.algorithm.to_string(),
                table: run.contender.table,
                best_move: run.best_move.as_deref().unwrap_or(""),
                value: run.value.to_string(),
                nodes: run.nodes,
                seconds: run.elapsed.as_secs_f64(),
                node_reduction: run.node_reduction,
                time_reduction: run.time_reduction,
                table_hits: stats.hits,
                table_probes: stats.probes,
                table_entries: run.table_entries,
            })?;
        }
        writer.flush().map_err(|source| Error::Io {
            operation: "flush CSV report".to_string(),
            source,
        })?;
        Ok(())
    }
}

/// Runs every configured contender on the same position
pub struct ComparisonFramework {
    config: ComparisonConfig,
}

impl ComparisonFramework {
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Run all contenders on clones of `game`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when there are no contenders.
    pub fn run<G, E>(&self, game: &G, evaluator: &E) -> Result<ComparisonReport>
    where
        G: Game + Clone + PartialEq,
        E: Evaluator<G> + ?Sized,
    {
        if self.config.contenders.is_empty() {
            return Err(Error::InvalidConfiguration {
                message: "comparison needs at least one strategy".to_string(),
            });
        }

        let mut runs: Vec<RunReport> = self
            .config
            .contenders
            .iter()
            .map(|&contender| self.run_one(game, evaluator, contender))
            .collect();

        if let Some((nodes, elapsed)) = runs
            .iter()
            .find(|run| is_baseline(&run.contender))
            .map(|run| (run.nodes, run.elapsed))
        {
            for run in &mut runs {
                run.node_reduction = reduction(nodes as f64, run.nodes as f64);
                run.time_reduction = reduction(elapsed.as_secs_f64(), run.elapsed.as_secs_f64());
            }
        }

        let mut exact = runs.iter().filter(|run| {
            !run.contender.table && Algorithm::EXACT.contains(&run.contender.algorithm)
        });
        let agreement = match exact.next() {
            Some(first) => exact.all(|run| run.value == first.value),
            None => true,
        };

        Ok(ComparisonReport {
            depth: self.config.depth,
            role: self.config.role,
            runs,
            agreement,
        })
    }

    fn run_one<G, E>(&self, game: &G, evaluator: &E, contender: Contender) -> RunReport
    where
        G: Game + Clone + PartialEq,
        E: Evaluator<G> + ?Sized,
    {
        let mut position = game.clone();
        let mut table = (contender.table && contender.algorithm.uses_table())
            .then(TranspositionTable::new);

        let start = Instant::now();
        let result = contender.algorithm.search(
            &mut position,
            evaluator,
            self.config.depth,
            self.config.role,
            table.as_mut(),
            self.config.sampling,
        );
        let elapsed = start.elapsed();
        debug_assert!(position == *game, "{} left the position changed", contender.label());

        info!(
            "{}: value {} in {} nodes, {:?}",
            contender.label(),
            result.value,
            result.nodes,
            elapsed
        );

        RunReport {
            contender,
            best_move: result.best_move.map(|mv| mv.to_string()),
            value: result.value,
            nodes: result.nodes,
            elapsed,
            table_stats: table.as_ref().map(|table| table.stats()),
            table_entries: table.as_ref().map_or(0, |table| table.len()),
            node_reduction: 0.0,
            time_reduction: 0.0,
        }
    }
}

/// Percentage of `base` saved by `other`; zero when there is no base
pub fn reduction(base: f64, other: f64) -> f64 {
    if base > 0.0 {
        (base - other) / base * 100.0
    } else {
        0.0
    }
}

fn is_baseline(contender: &Contender) -> bool {
    contender.algorithm == Algorithm::Minimax && !contender.table
}
