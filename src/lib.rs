//! Graph-search planner for multi-agent grid puzzle levels
//!
//! The system reads a level description (walls, colored boxes, agents and
//! per-cell goals), searches the joint-action state space with a pluggable
//! strategy, and emits one joint action per timestep to the controlling
//! server until every goal cell is satisfied.

#![forbid(unsafe_code)]

/// Input/output operations: level protocol, CLI, diagnostics, errors
pub mod io;
/// Static level data shared by every state of one search
pub mod level;
/// State representation, transition model, frontiers and search engine
pub mod search;

pub use io::error::{PlannerError, Result};
