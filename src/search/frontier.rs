//! Pluggable open-set orderings for the graph search
//!
//! The strategy set is closed, so the frontier is a tagged union rather than
//! a trait object: FIFO (breadth-first), LIFO (depth-first), and
//! priority-by-evaluation (best-first, covering A*, weighted A* and greedy).
//! Every variant keeps a side hash set so membership testing is O(1)
//! regardless of the ordering structure.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::sync::Arc;

use crate::search::heuristic::Heuristic;
use crate::search::state::State;

/// Heap entry ordered by ascending evaluation, ties broken by insertion
/// sequence so equal-priority configurations pop in FIFO order
struct RankedEntry {
    evaluation: u64,
    sequence: u64,
    state: Arc<State>,
}

impl PartialEq for RankedEntry {
    fn eq(&self, other: &Self) -> bool {
        self.evaluation == other.evaluation && self.sequence == other.sequence
    }
}

impl Eq for RankedEntry {}

impl Ord for RankedEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Inverted: BinaryHeap is a max-heap, we pop the smallest evaluation.
        other
            .evaluation
            .cmp(&self.evaluation)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for RankedEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

enum Ordered {
    Fifo(VecDeque<Arc<State>>),
    Lifo(Vec<Arc<State>>),
    Ranked {
        heap: BinaryHeap<RankedEntry>,
        heuristic: Heuristic,
        sequence: u64,
    },
}

/// The open set of configurations discovered but not yet expanded
///
/// Created by [`Frontier::bfs`], [`Frontier::dfs`] or
/// [`Frontier::best_first`]; the ordering structure is fixed for the
/// frontier's lifetime.
pub struct Frontier {
    ordered: Ordered,
    set: HashSet<Arc<State>>,
}

impl Frontier {
    /// Create a FIFO frontier (breadth-first search)
    pub fn bfs() -> Self {
        Self {
            ordered: Ordered::Fifo(VecDeque::new()),
            set: HashSet::new(),
        }
    }

    /// Create a LIFO frontier (depth-first search)
    pub fn dfs() -> Self {
        Self {
            ordered: Ordered::Lifo(Vec::new()),
            set: HashSet::new(),
        }
    }

    /// Create a priority frontier ordered by the given evaluation function
    pub fn best_first(heuristic: Heuristic) -> Self {
        Self {
            ordered: Ordered::Ranked {
                heap: BinaryHeap::new(),
                heuristic,
                sequence: 0,
            },
            set: HashSet::new(),
        }
    }

    /// Add a configuration to the open set
    pub fn add(&mut self, state: Arc<State>) {
        self.set.insert(Arc::clone(&state));
        match &mut self.ordered {
            Ordered::Fifo(queue) => queue.push_back(state),
            Ordered::Lifo(stack) => stack.push(state),
            Ordered::Ranked {
                heap,
                heuristic,
                sequence,
            } => {
                let evaluation = heuristic.evaluate(&state);
                heap.push(RankedEntry {
                    evaluation,
                    sequence: *sequence,
                    state,
                });
                *sequence += 1;
            }
        }
    }

    /// Remove and return the next configuration per strategy order
    pub fn pop(&mut self) -> Option<Arc<State>> {
        let state = match &mut self.ordered {
            Ordered::Fifo(queue) => queue.pop_front()?,
            Ordered::Lifo(stack) => stack.pop()?,
            Ordered::Ranked { heap, .. } => heap.pop()?.state,
        };
        self.set.remove(&state);
        Some(state)
    }

    /// Whether the open set is empty
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Number of configurations currently in the open set
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Whether a configuration was added and has not yet been popped
    pub fn contains(&self, state: &Arc<State>) -> bool {
        self.set.contains(state)
    }

    /// Strategy display name for the status stream
    pub fn name(&self) -> String {
        match &self.ordered {
            Ordered::Fifo(_) => "breadth-first search".to_owned(),
            Ordered::Lifo(_) => "depth-first search".to_owned(),
            Ordered::Ranked { heuristic, .. } => {
                format!("best-first search using {heuristic}")
            }
        }
    }
}
