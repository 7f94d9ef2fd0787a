//! Closed catalogue of single-agent actions and their geometric effects

/// Behavioral category of an action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    /// Stay in place for one timestep
    NoOp,
    /// Relocate the agent into a free neighboring cell
    Move,
    /// Step into a box's cell while shoving the box one cell onward
    Push,
    /// Step away from a box while dragging it into the vacated cell
    Pull,
}

/// Immutable description of one single-agent action
///
/// The action set is fixed at 1 NoOp + 4 moves + 12 pushes + 12 pulls.
/// Deltas are (row, col) offsets of exactly one compass step; the box delta
/// is meaningful for Push and Pull only. Direction pairs that cannot occur
/// geometrically (pushing a box back through the agent, pulling a box onto
/// the agent) are absent from the catalogue rather than rejected at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Action {
    /// Display name in server syntax, e.g. `Push(N,W)`
    pub name: &'static str,
    /// Behavioral category
    pub kind: ActionKind,
    /// Agent displacement as (row delta, col delta)
    pub agent_delta: (i32, i32),
    /// Box displacement as (row delta, col delta); zero for NoOp and Move
    pub box_delta: (i32, i32),
}

impl Action {
    const fn new(
        name: &'static str,
        kind: ActionKind,
        agent_delta: (i32, i32),
        box_delta: (i32, i32),
    ) -> Self {
        Self {
            name,
            kind,
            agent_delta,
            box_delta,
        }
    }

    /// The do-nothing action
    pub const NO_OP: Self = Self::new("NoOp", ActionKind::NoOp, (0, 0), (0, 0));

    /// Move one cell north
    pub const MOVE_N: Self = Self::new("Move(N)", ActionKind::Move, (-1, 0), (0, 0));
    /// Move one cell south
    pub const MOVE_S: Self = Self::new("Move(S)", ActionKind::Move, (1, 0), (0, 0));
    /// Move one cell east
    pub const MOVE_E: Self = Self::new("Move(E)", ActionKind::Move, (0, 1), (0, 0));
    /// Move one cell west
    pub const MOVE_W: Self = Self::new("Move(W)", ActionKind::Move, (0, -1), (0, 0));

    /// Push: agent north, box north
    pub const PUSH_NN: Self = Self::new("Push(N,N)", ActionKind::Push, (-1, 0), (-1, 0));
    /// Push: agent north, box east
    pub const PUSH_NE: Self = Self::new("Push(N,E)", ActionKind::Push, (-1, 0), (0, 1));
    /// Push: agent north, box west
    pub const PUSH_NW: Self = Self::new("Push(N,W)", ActionKind::Push, (-1, 0), (0, -1));
    /// Push: agent south, box south
    pub const PUSH_SS: Self = Self::new("Push(S,S)", ActionKind::Push, (1, 0), (1, 0));
    /// Push: agent south, box east
    pub const PUSH_SE: Self = Self::new("Push(S,E)", ActionKind::Push, (1, 0), (0, 1));
    /// Push: agent south, box west
    pub const PUSH_SW: Self = Self::new("Push(S,W)", ActionKind::Push, (1, 0), (0, -1));
    /// Push: agent east, box north
    pub const PUSH_EN: Self = Self::new("Push(E,N)", ActionKind::Push, (0, 1), (-1, 0));
    /// Push: agent east, box south
    pub const PUSH_ES: Self = Self::new("Push(E,S)", ActionKind::Push, (0, 1), (1, 0));
    /// Push: agent east, box east
    pub const PUSH_EE: Self = Self::new("Push(E,E)", ActionKind::Push, (0, 1), (0, 1));
    /// Push: agent west, box north
    pub const PUSH_WN: Self = Self::new("Push(W,N)", ActionKind::Push, (0, -1), (-1, 0));
    /// Push: agent west, box south
    pub const PUSH_WS: Self = Self::new("Push(W,S)", ActionKind::Push, (0, -1), (1, 0));
    /// Push: agent west, box west
    pub const PUSH_WW: Self = Self::new("Push(W,W)", ActionKind::Push, (0, -1), (0, -1));

    /// Pull: agent north, box trailing from the south
    pub const PULL_NS: Self = Self::new("Pull(N,S)", ActionKind::Pull, (-1, 0), (1, 0));
    /// Pull: agent north, box trailing from the east
    pub const PULL_NE: Self = Self::new("Pull(N,E)", ActionKind::Pull, (-1, 0), (0, 1));
    /// Pull: agent north, box trailing from the west
    pub const PULL_NW: Self = Self::new("Pull(N,W)", ActionKind::Pull, (-1, 0), (0, -1));
    /// Pull: agent south, box trailing from the north
    pub const PULL_SN: Self = Self::new("Pull(S,N)", ActionKind::Pull, (1, 0), (-1, 0));
    /// Pull: agent south, box trailing from the east
    pub const PULL_SE: Self = Self::new("Pull(S,E)", ActionKind::Pull, (1, 0), (0, 1));
    /// Pull: agent south, box trailing from the west
    pub const PULL_SW: Self = Self::new("Pull(S,W)", ActionKind::Pull, (1, 0), (0, -1));
    /// Pull: agent east, box trailing from the north
    pub const PULL_EN: Self = Self::new("Pull(E,N)", ActionKind::Pull, (0, 1), (-1, 0));
    /// Pull: agent east, box trailing from the south
    pub const PULL_ES: Self = Self::new("Pull(E,S)", ActionKind::Pull, (0, 1), (1, 0));
    /// Pull: agent east, box trailing from the west
    pub const PULL_EW: Self = Self::new("Pull(E,W)", ActionKind::Pull, (0, 1), (0, -1));
    /// Pull: agent west, box trailing from the north
    pub const PULL_WN: Self = Self::new("Pull(W,N)", ActionKind::Pull, (0, -1), (-1, 0));
    /// Pull: agent west, box trailing from the south
    pub const PULL_WS: Self = Self::new("Pull(W,S)", ActionKind::Pull, (0, -1), (1, 0));
    /// Pull: agent west, box trailing from the east
    pub const PULL_WE: Self = Self::new("Pull(W,E)", ActionKind::Pull, (0, -1), (0, 1));
}

/// Every action an agent can take in one timestep, in server enumeration
/// order
pub const CATALOGUE: [Action; 29] = [
    Action::NO_OP,
    Action::MOVE_N,
    Action::MOVE_S,
    Action::MOVE_E,
    Action::MOVE_W,
    Action::PUSH_NN,
    Action::PUSH_NE,
    Action::PUSH_NW,
    Action::PUSH_SS,
    Action::PUSH_SE,
    Action::PUSH_SW,
    Action::PUSH_EN,
    Action::PUSH_ES,
    Action::PUSH_EE,
    Action::PUSH_WN,
    Action::PUSH_WS,
    Action::PUSH_WW,
    Action::PULL_NS,
    Action::PULL_NE,
    Action::PULL_NW,
    Action::PULL_SN,
    Action::PULL_SE,
    Action::PULL_SW,
    Action::PULL_EN,
    Action::PULL_ES,
    Action::PULL_EW,
    Action::PULL_WN,
    Action::PULL_WS,
    Action::PULL_WE,
];
