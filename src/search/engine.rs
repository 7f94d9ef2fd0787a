//! Bounded Graph-Search driver
//!
//! Single-threaded expansion loop over a frontier and an explored set, with
//! a soft memory ceiling checked once per iteration and a purely
//! observational status display at a fixed cadence.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::io::configuration::STATUS_INTERVAL;
use crate::io::memory;
use crate::io::progress::SearchMonitor;
use crate::search::action::Action;
use crate::search::frontier::Frontier;
use crate::search::state::State;

/// Terminal condition of a search run
///
/// Exhaustion and the memory ceiling are normal "no plan" outcomes, not
/// faults: the level is unsolvable under the given resource bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// A goal configuration was popped; a plan was extracted
    GoalFound,
    /// The frontier emptied without reaching a goal
    FrontierExhausted,
    /// Resident memory exceeded the configured soft ceiling
    MemoryExceeded,
}

/// Result of one search run: terminal status, plan and final counters
pub struct SearchOutcome {
    /// Why the run terminated
    pub status: SearchStatus,
    /// The solution as ordered joint actions; present iff a goal was found
    pub plan: Option<Vec<Vec<Action>>>,
    /// Configurations expanded (size of the explored set)
    pub explored: usize,
    /// Configurations still open when the run ended
    pub frontier: usize,
    /// Wall-clock duration of the run
    pub elapsed: std::time::Duration,
}

impl SearchOutcome {
    /// Total configurations generated: explored plus still-open
    pub const fn generated(&self) -> usize {
        self.explored + self.frontier
    }
}

/// Graph-search driver owning the frontier, explored set and shuffle rng
///
/// Both sets are exclusively owned for the duration of one [`run`]; the
/// returned plan is fully detached data.
///
/// [`run`]: SearchEngine::run
pub struct SearchEngine {
    frontier: Frontier,
    explored: HashSet<Arc<State>>,
    rng: StdRng,
    memory_ceiling_mb: f64,
    monitor: Option<SearchMonitor>,
}

impl SearchEngine {
    /// Create an engine with a strategy, shuffle seed and soft memory
    /// ceiling in megabytes
    pub fn new(frontier: Frontier, seed: u64, memory_ceiling_mb: f64) -> Self {
        Self {
            frontier,
            explored: HashSet::new(),
            rng: StdRng::seed_from_u64(seed),
            memory_ceiling_mb,
            monitor: None,
        }
    }

    /// Attach a status monitor reporting at the fixed iteration cadence
    #[must_use]
    pub fn with_monitor(mut self, monitor: SearchMonitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Display name of the configured strategy
    pub fn strategy_name(&self) -> String {
        self.frontier.name()
    }

    /// Run bounded Graph-Search from an initial configuration
    ///
    /// Loops: report status at the cadence, stop on an empty frontier or a
    /// breached memory ceiling, otherwise pop a leaf, test it for the goal,
    /// and add its unseen successors to the frontier.
    pub fn run(&mut self, initial: Arc<State>) -> SearchOutcome {
        let start = Instant::now();
        self.frontier.add(initial);

        let mut iterations = 0_usize;
        loop {
            if iterations % STATUS_INTERVAL == 0 {
                self.report(start);
            }
            iterations += 1;

            if self.frontier.is_empty() {
                return self.finish(start, SearchStatus::FrontierExhausted, None);
            }

            if memory::resident_megabytes().is_some_and(|used| used > self.memory_ceiling_mb) {
                return self.finish(start, SearchStatus::MemoryExceeded, None);
            }

            let Some(leaf) = self.frontier.pop() else {
                return self.finish(start, SearchStatus::FrontierExhausted, None);
            };

            if leaf.is_goal_state() {
                let plan = leaf.extract_plan();
                return self.finish(start, SearchStatus::GoalFound, Some(plan));
            }

            self.explored.insert(Arc::clone(&leaf));
            for successor in leaf.expand(&mut self.rng) {
                if !self.explored.contains(&successor) && !self.frontier.contains(&successor) {
                    self.frontier.add(successor);
                }
            }
        }
    }

    fn report(&self, start: Instant) {
        if let Some(monitor) = &self.monitor {
            monitor.report(
                self.explored.len(),
                self.frontier.len(),
                start.elapsed(),
                memory::resident_megabytes(),
            );
        }
    }

    fn finish(
        &mut self,
        start: Instant,
        status: SearchStatus,
        plan: Option<Vec<Vec<Action>>>,
    ) -> SearchOutcome {
        let elapsed = start.elapsed();
        if let Some(monitor) = &self.monitor {
            monitor.report(
                self.explored.len(),
                self.frontier.len(),
                elapsed,
                memory::resident_megabytes(),
            );
            monitor.finish();
        }
        SearchOutcome {
            status,
            plan,
            explored: self.explored.len(),
            frontier: self.frontier.len(),
            elapsed,
        }
    }
}
