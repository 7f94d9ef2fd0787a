//! Evaluation functions ordering the informed search strategies

use std::fmt;

use crate::level::Position;
use crate::search::state::State;

/// How a strategy combines accumulated path cost with the estimate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Objective {
    /// `g + h`: optimal when the estimate never overestimates
    AStar,
    /// `g + W·h` for a positive integer weight
    WeightedAStar(u32),
    /// `h` alone, ignoring accumulated cost
    Greedy,
}

/// Remaining-cost estimator with a fixed objective
///
/// The estimate is the sum, over unsatisfied goal cells, of the Manhattan
/// distance to the nearest matching box (letter goals) or to the named agent
/// (digit goals). It depends on configuration content only, never on the
/// derivation history, and is deterministic and non-negative.
pub struct Heuristic {
    objective: Objective,
    goal_cells: Vec<(Position, u8)>,
}

impl Heuristic {
    /// Build the estimator for a level, precomputing its goal cells
    pub fn new(initial: &State, objective: Objective) -> Self {
        Self {
            objective,
            goal_cells: initial.level().goal_cells(),
        }
    }

    /// Estimated number of joint actions still needed to satisfy all goals
    pub fn estimate(&self, state: &State) -> u64 {
        self.goal_cells
            .iter()
            .map(|&(cell, goal)| match goal {
                b'A'..=b'Z' => {
                    if state.box_at(cell) == Some(goal) {
                        0
                    } else {
                        nearest_box_distance(state, cell, goal)
                    }
                }
                digit => {
                    let agent = digit.saturating_sub(b'0') as usize;
                    state
                        .agents()
                        .get(agent)
                        .map_or(0, |&pos| u64::from(pos.distance(cell)))
                }
            })
            .sum()
    }

    /// Evaluation value used for priority ordering, per the objective
    pub fn evaluate(&self, state: &State) -> u64 {
        let h = self.estimate(state);
        match self.objective {
            Objective::AStar => u64::from(state.g()) + h,
            Objective::WeightedAStar(weight) => u64::from(state.g()) + u64::from(weight) * h,
            Objective::Greedy => h,
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.objective {
            Objective::AStar => write!(f, "A* evaluation"),
            Objective::WeightedAStar(weight) => write!(f, "WA*({weight}) evaluation"),
            Objective::Greedy => write!(f, "greedy evaluation"),
        }
    }
}

/// Manhattan distance from a goal cell to the nearest box of its letter
///
/// A letter with no remaining box on the grid contributes nothing; such a
/// level is unsolvable and the search will report that through exhaustion.
fn nearest_box_distance(state: &State, cell: Position, letter: u8) -> u64 {
    state
        .boxes()
        .indexed_iter()
        .filter(|&(_, &occupant)| occupant == letter)
        .map(|((row, col), _)| u64::from(Position::new(row as i32, col as i32).distance(cell)))
        .min()
        .unwrap_or(0)
}
