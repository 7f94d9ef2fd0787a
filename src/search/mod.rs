//! The state-space search core
//!
//! Leaves first: the fixed action catalogue, the immutable configuration
//! and its transition model, evaluation functions for informed strategies,
//! the pluggable frontier orderings, and the bounded Graph-Search driver
//! tying them together.

/// Fixed catalogue of single-agent actions
pub mod action;
/// Bounded Graph-Search driver and outcome reporting
pub mod engine;
/// Open-set orderings: FIFO, LIFO and priority-by-evaluation
pub mod frontier;
/// Remaining-cost estimators for informed strategies
pub mod heuristic;
/// Immutable configurations and the joint-action transition model
pub mod state;

pub use engine::{SearchEngine, SearchOutcome, SearchStatus};
pub use state::State;
