//! Immutable world configurations and the joint-action transition model
//!
//! A [`State`] is one fully-specified snapshot of the world: agent positions
//! and the box grid, plus a shared handle to the invariant [`Level`] data.
//! States form a tree through parent links; the structural hash is computed
//! eagerly at construction so a state is safe to use as a set key for its
//! whole lifetime.

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::level::{Level, Position};
use crate::search::action::{Action, ActionKind, CATALOGUE};

/// Cells touched by one agent's action, used for pairwise conflict checks
///
/// Move publishes the agent's current cell as the box cell: agents never
/// share a cell before the step, so the sentinel can never collide with
/// another agent's sentinel or with a real box cell. NoOp touches nothing
/// and yields no footprint.
struct Footprint {
    destination: Position,
    box_cell: Position,
}

/// One immutable configuration of the world
///
/// Equality and hashing cover world content only (agent positions and box
/// layout), never the derivation history, so configurations reached by
/// different paths collapse in the explored set. Walls, goals and colors are
/// invariant per level and shared by every state of one search.
#[derive(Debug)]
pub struct State {
    level: Arc<Level>,
    agents: Vec<Position>,
    boxes: Array2<u8>,
    parent: Option<Arc<State>>,
    joint_action: Option<Vec<Action>>,
    g: u32,
    hash: u64,
}

impl State {
    /// Create the initial configuration of a level
    ///
    /// `boxes` holds 0 for empty cells, otherwise the box letter; `agents`
    /// is indexed by agent id.
    pub fn initial(level: Arc<Level>, agents: Vec<Position>, boxes: Array2<u8>) -> Self {
        let hash = structural_hash(&agents, &boxes);
        Self {
            level,
            agents,
            boxes,
            parent: None,
            joint_action: None,
            g: 0,
            hash,
        }
    }

    /// The invariant level data this configuration belongs to
    pub const fn level(&self) -> &Arc<Level> {
        &self.level
    }

    /// Agent positions, indexed by agent id
    pub fn agents(&self) -> &[Position] {
        &self.agents
    }

    /// The box grid: 0 for empty cells, otherwise the box letter
    pub const fn boxes(&self) -> &Array2<u8> {
        &self.boxes
    }

    /// Path cost: number of joint actions applied since the initial state
    pub const fn g(&self) -> u32 {
        self.g
    }

    /// The configuration this one was derived from, if any
    pub const fn parent(&self) -> Option<&Arc<Self>> {
        self.parent.as_ref()
    }

    /// The box letter at a position, if one is there
    pub fn box_at(&self, pos: Position) -> Option<u8> {
        self.level
            .grid_index(pos)
            .and_then(|index| self.boxes.get(index))
            .copied()
            .filter(|&letter| letter != 0)
    }

    /// The id of the agent standing at a position, if any
    pub fn agent_at(&self, pos: Position) -> Option<usize> {
        self.agents.iter().position(|&agent| agent == pos)
    }

    /// Whether a cell is enterable: inside the grid, no wall, box or agent
    pub fn is_free(&self, pos: Position) -> bool {
        !self.level.is_wall(pos) && self.box_at(pos).is_none() && self.agent_at(pos).is_none()
    }

    /// Whether one agent could legally perform an action in this state
    ///
    /// Push and Pull additionally require the manipulated box to carry the
    /// agent's color.
    pub fn is_applicable(&self, agent: usize, action: Action) -> bool {
        let Some(&agent_pos) = self.agents.get(agent) else {
            return false;
        };
        let Some(&agent_color) = self.level.agent_colors.get(agent) else {
            return false;
        };

        match action.kind {
            ActionKind::NoOp => true,
            ActionKind::Move => self.is_free(agent_pos.offset(action.agent_delta)),
            ActionKind::Push => {
                let box_pos = agent_pos.offset(action.agent_delta);
                match self.box_at(box_pos) {
                    Some(letter) if self.level.box_color(letter) == Some(agent_color) => {
                        self.is_free(box_pos.offset(action.box_delta))
                    }
                    _ => false,
                }
            }
            ActionKind::Pull => {
                let box_pos = agent_pos.offset(action.box_delta);
                match self.box_at(box_pos) {
                    Some(letter) if self.level.box_color(letter) == Some(agent_color) => {
                        self.is_free(agent_pos.offset(action.agent_delta))
                    }
                    _ => false,
                }
            }
        }
    }

    /// Whether two agents' actions collide in this state
    ///
    /// A conflict is a shared destination cell or a shared manipulated box
    /// cell. Each component action must be individually applicable.
    pub fn is_conflicting(&self, joint_action: &[Action]) -> bool {
        let footprints: Vec<Option<Footprint>> = joint_action
            .iter()
            .zip(&self.agents)
            .map(|(action, &agent_pos)| match action.kind {
                ActionKind::NoOp => None,
                ActionKind::Move => Some(Footprint {
                    destination: agent_pos.offset(action.agent_delta),
                    box_cell: agent_pos,
                }),
                ActionKind::Push => {
                    let box_cell = agent_pos.offset(action.agent_delta);
                    Some(Footprint {
                        destination: box_cell.offset(action.box_delta),
                        box_cell,
                    })
                }
                ActionKind::Pull => Some(Footprint {
                    destination: agent_pos.offset(action.agent_delta),
                    box_cell: agent_pos.offset(action.box_delta),
                }),
            })
            .collect();

        for (index, first) in footprints.iter().enumerate() {
            let Some(first) = first else { continue };
            for second in footprints.iter().skip(index + 1).flatten() {
                if first.destination == second.destination {
                    return true;
                }
                if first.box_cell == second.box_cell {
                    return true;
                }
            }
        }
        false
    }

    /// Apply a joint action, producing the successor configuration
    ///
    /// Precondition: every component action is applicable for its agent and
    /// the joint action is non-conflicting; the result is unspecified
    /// otherwise. Successor generation only calls this after both checks.
    pub fn apply(self: &Arc<Self>, joint_action: Vec<Action>) -> Self {
        let mut agents = self.agents.clone();
        let mut boxes = self.boxes.clone();

        for (agent_pos, action) in agents.iter_mut().zip(&joint_action) {
            match action.kind {
                ActionKind::NoOp => {}
                ActionKind::Move => {
                    *agent_pos = agent_pos.offset(action.agent_delta);
                }
                ActionKind::Push => {
                    *agent_pos = agent_pos.offset(action.agent_delta);
                    relocate_box(
                        &self.level,
                        &mut boxes,
                        *agent_pos,
                        agent_pos.offset(action.box_delta),
                    );
                }
                ActionKind::Pull => {
                    relocate_box(
                        &self.level,
                        &mut boxes,
                        agent_pos.offset(action.box_delta),
                        *agent_pos,
                    );
                    *agent_pos = agent_pos.offset(action.agent_delta);
                }
            }
        }

        let hash = structural_hash(&agents, &boxes);
        Self {
            level: Arc::clone(&self.level),
            agents,
            boxes,
            parent: Some(Arc::clone(self)),
            joint_action: Some(joint_action),
            g: self.g + 1,
            hash,
        }
    }

    /// Generate every legal, non-conflicting successor configuration
    ///
    /// Enumerates the Cartesian product of per-agent applicable actions and
    /// filters conflicting combinations. The result is shuffled with the
    /// engine-owned seeded generator so uninformed strategies see no
    /// systematic enumeration bias, while runs stay reproducible per seed.
    pub fn expand(self: &Arc<Self>, rng: &mut StdRng) -> Vec<Arc<Self>> {
        let num_agents = self.agents.len();
        let applicable: Vec<Vec<Action>> = (0..num_agents)
            .map(|agent| {
                CATALOGUE
                    .iter()
                    .copied()
                    .filter(|&action| self.is_applicable(agent, action))
                    .collect()
            })
            .collect();

        let mut permutation = vec![0_usize; num_agents];
        let mut expanded = Vec::new();
        loop {
            let joint_action: Vec<Action> = applicable
                .iter()
                .zip(&permutation)
                .filter_map(|(actions, &index)| actions.get(index).copied())
                .collect();

            if !self.is_conflicting(&joint_action) {
                expanded.push(Arc::new(self.apply(joint_action)));
            }

            // Advance the per-agent permutation counters, leftmost first.
            let mut advanced = false;
            for (index, actions) in permutation.iter_mut().zip(&applicable) {
                if *index + 1 < actions.len() {
                    *index += 1;
                    advanced = true;
                    break;
                }
                *index = 0;
            }
            if !advanced {
                break;
            }
        }

        expanded.shuffle(rng);
        expanded
    }

    /// Whether every goal cell is satisfied by the required box or agent
    pub fn is_goal_state(&self) -> bool {
        self.level
            .goals
            .indexed_iter()
            .all(|((row, col), &goal)| match goal {
                0 => true,
                b'A'..=b'Z' => self.boxes.get((row, col)).copied() == Some(goal),
                digit => {
                    let agent = (digit.wrapping_sub(b'0')) as usize;
                    self.agents
                        .get(agent)
                        .is_some_and(|&pos| pos == Position::new(row as i32, col as i32))
                }
            })
    }

    /// The ordered joint actions leading from the initial state to this one
    ///
    /// Length always equals [`State::g`].
    pub fn extract_plan(&self) -> Vec<Vec<Action>> {
        let mut plan = Vec::with_capacity(self.g as usize);
        let mut state = self;
        while let (Some(parent), Some(joint_action)) = (&state.parent, &state.joint_action) {
            plan.push(joint_action.clone());
            state = parent;
        }
        plan.reverse();
        plan
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.agents == other.agents && self.boxes == other.boxes
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        hasher.write_u64(self.hash);
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.level.rows() {
            for col in 0..self.level.cols() {
                let pos = Position::new(row as i32, col as i32);
                let glyph = self
                    .box_at(pos)
                    .map(char::from)
                    .or_else(|| self.level.is_wall(pos).then_some('+'))
                    .or_else(|| {
                        self.agent_at(pos)
                            .and_then(|agent| char::from_digit(agent as u32, 10))
                    })
                    .unwrap_or(' ');
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Hash of world content only; parent links and path cost never contribute
fn structural_hash(agents: &[Position], boxes: &Array2<u8>) -> u64 {
    let mut hasher = DefaultHasher::new();
    agents.hash(&mut hasher);
    for &cell in boxes {
        cell.hash(&mut hasher);
    }
    hasher.finish()
}

/// Move a box letter between two cells of the working box grid
fn relocate_box(level: &Level, boxes: &mut Array2<u8>, from: Position, to: Position) {
    let letter = level
        .grid_index(from)
        .and_then(|index| boxes.get_mut(index))
        .map(std::mem::take)
        .unwrap_or(0);
    if let Some(cell) = level.grid_index(to).and_then(|index| boxes.get_mut(index)) {
        *cell = letter;
    }
}
