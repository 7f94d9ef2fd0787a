//! Command-line interface and client session orchestration

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::Parser;

use crate::io::configuration::{CLIENT_NAME, DEFAULT_MEMORY_CEILING_MB, DEFAULT_SEED};
use crate::io::error::{self, Result};
use crate::io::progress::SearchMonitor;
use crate::io::protocol;
use crate::search::engine::{SearchEngine, SearchStatus};
use crate::search::frontier::Frontier;
use crate::search::heuristic::{Heuristic, Objective};
use crate::search::state::State;

#[derive(Parser)]
#[command(name = "gridplan")]
#[command(
    author,
    version,
    about = "Graph-search client for multi-agent grid puzzle levels"
)]
/// Command-line arguments for the search client
pub struct Cli {
    /// Use the breadth-first strategy
    #[arg(long, group = "strategy")]
    pub bfs: bool,

    /// Use the depth-first strategy
    #[arg(long, group = "strategy")]
    pub dfs: bool,

    /// Use the A* strategy
    #[arg(long, group = "strategy")]
    pub astar: bool,

    /// Use the weighted A* strategy with an optional integer weight
    #[arg(
        long,
        group = "strategy",
        value_name = "W",
        num_args = 0..=1,
        default_missing_value = "5",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub wastar: Option<u32>,

    /// Use the greedy best-first strategy
    #[arg(long, group = "strategy")]
    pub greedy: bool,

    /// Soft maximum memory usage in megabytes
    #[arg(long, value_name = "MB", default_value_t = DEFAULT_MEMORY_CEILING_MB)]
    pub max_memory: f64,

    /// Random seed for reproducible successor shuffling
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress the periodic search status display
    #[arg(short, long)]
    pub quiet: bool,
}

/// Mutually-exclusive search strategy choice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Breadth-first (FIFO frontier)
    Bfs,
    /// Depth-first (LIFO frontier)
    Dfs,
    /// Best-first ordered by `g + h`
    AStar,
    /// Best-first ordered by `g + W·h`
    WeightedAStar(u32),
    /// Best-first ordered by `h` alone
    Greedy,
}

impl Cli {
    /// The explicitly selected strategy, if any flag was given
    pub const fn strategy(&self) -> Option<Strategy> {
        if self.bfs {
            Some(Strategy::Bfs)
        } else if self.dfs {
            Some(Strategy::Dfs)
        } else if self.astar {
            Some(Strategy::AStar)
        } else if let Some(weight) = self.wastar {
            Some(Strategy::WeightedAStar(weight))
        } else if self.greedy {
            Some(Strategy::Greedy)
        } else {
            None
        }
    }
}

/// Orchestrates one client session: handshake, level, search, submission
pub struct PlannerClient {
    cli: Cli,
}

impl PlannerClient {
    /// Create a client from parsed CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the session over the process's standard streams
    ///
    /// # Errors
    ///
    /// Returns an error if the memory ceiling is not a non-negative number,
    /// the level is malformed, or a server stream operation fails. Failing
    /// to find a plan is a normal outcome, not an error, and still exits
    /// successfully.
    pub fn run(&self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut reader = stdin.lock();
        let mut writer = stdout.lock();
        self.run_with(&mut reader, &mut writer)
    }

    /// Drive the session over explicit streams
    ///
    /// # Errors
    ///
    /// As [`PlannerClient::run`].
    pub fn run_with<R: BufRead, W: Write>(&self, reader: &mut R, writer: &mut W) -> Result<()> {
        if !self.cli.max_memory.is_finite() || self.cli.max_memory < 0.0 {
            return Err(error::invalid_parameter(
                "max-memory",
                &self.cli.max_memory,
                &"must be a non-negative number of megabytes",
            ));
        }

        protocol::send_name(writer, CLIENT_NAME)?;
        let initial = protocol::parse_level(reader)?;

        let strategy = self.cli.strategy().unwrap_or_else(|| {
            Self::notice(
                "Defaulting to BFS search. Use --bfs, --dfs, --astar, --wastar, or --greedy to set the strategy.",
            );
            Strategy::Bfs
        });
        let frontier = build_frontier(strategy, &initial);

        let mut engine = SearchEngine::new(frontier, self.cli.seed, self.cli.max_memory);
        protocol::send_comment(writer, &format!("Strategy: {}", engine.strategy_name()))?;
        if !self.cli.quiet {
            let monitor = SearchMonitor::new(&engine.strategy_name());
            engine = engine.with_monitor(monitor);
        }

        let outcome = engine.run(Arc::clone(&initial));
        match (&outcome.plan, outcome.status) {
            (Some(plan), _) => {
                Self::notice(&format!("Found solution of length {}.", plan.len()));
                protocol::submit_plan(plan, writer, reader)?;
            }
            (None, SearchStatus::MemoryExceeded) => {
                Self::notice("Maximum memory usage exceeded.");
                Self::notice("Unable to solve level.");
            }
            (None, _) => {
                Self::notice("Unable to solve level.");
            }
        }
        Ok(())
    }

    // Allow print for user feedback on the diagnostic stream
    #[allow(clippy::print_stderr)]
    fn notice(text: &str) {
        eprintln!("{text}");
    }
}

/// Instantiate the frontier for a strategy choice
fn build_frontier(strategy: Strategy, initial: &State) -> Frontier {
    match strategy {
        Strategy::Bfs => Frontier::bfs(),
        Strategy::Dfs => Frontier::dfs(),
        Strategy::AStar => Frontier::best_first(Heuristic::new(initial, Objective::AStar)),
        Strategy::WeightedAStar(weight) => {
            Frontier::best_first(Heuristic::new(initial, Objective::WeightedAStar(weight)))
        }
        Strategy::Greedy => Frontier::best_first(Heuristic::new(initial, Objective::Greedy)),
    }
}
