//! Immutable level layout: walls, goals and color assignments
//!
//! One `Level` is produced by the loader and shared (via `Arc`) by every
//! configuration reachable from the initial one. Nothing in it changes
//! during a search.

use ndarray::Array2;

use crate::io::configuration::MAX_BOX_TYPES;
use crate::level::cell::{Color, Position};

/// Static level data: wall grid, goal grid and entity color assignments
#[derive(Debug)]
pub struct Level {
    /// Level name from the `#levelname` section
    pub name: String,
    /// Wall grid; `true` marks an impassable cell
    pub walls: Array2<bool>,
    /// Goal grid; 0 means unconstrained, otherwise the required occupant
    /// as an ASCII agent digit (`b'0'..=b'9'`) or box letter (`b'A'..=b'Z'`)
    pub goals: Array2<u8>,
    /// Color of each agent, indexed by agent id
    pub agent_colors: Vec<Color>,
    /// Color of each box type, indexed by letter offset from `A`
    pub box_colors: [Option<Color>; MAX_BOX_TYPES],
}

impl Level {
    /// Number of grid rows
    pub fn rows(&self) -> usize {
        self.walls.nrows()
    }

    /// Number of grid columns
    pub fn cols(&self) -> usize {
        self.walls.ncols()
    }

    /// Number of agents in the level
    pub fn num_agents(&self) -> usize {
        self.agent_colors.len()
    }

    /// Convert a signed position to grid indices, if inside the grid
    pub fn grid_index(&self, pos: Position) -> Option<(usize, usize)> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        (row < self.rows() && col < self.cols()).then_some((row, col))
    }

    /// Whether the position is a wall; out-of-grid counts as wall
    pub fn is_wall(&self, pos: Position) -> bool {
        self.grid_index(pos)
            .and_then(|index| self.walls.get(index).copied())
            .unwrap_or(true)
    }

    /// The goal requirement at a position, if any
    pub fn goal_at(&self, pos: Position) -> Option<u8> {
        self.grid_index(pos)
            .and_then(|index| self.goals.get(index).copied())
            .filter(|&goal| goal != 0)
    }

    /// The color assigned to a box type letter, if any
    pub fn box_color(&self, letter: u8) -> Option<Color> {
        let index = letter.checked_sub(b'A')? as usize;
        self.box_colors.get(index).copied().flatten()
    }

    /// All goal cells paired with their required occupant
    pub fn goal_cells(&self) -> Vec<(Position, u8)> {
        self.goals
            .indexed_iter()
            .filter(|&(_, &goal)| goal != 0)
            .map(|((row, col), &goal)| (Position::new(row as i32, col as i32), goal))
            .collect()
    }
}
