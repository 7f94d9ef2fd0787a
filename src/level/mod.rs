//! Static level data and grid primitives
//!
//! Everything here is fixed once the level is parsed: wall layout, goal
//! layout, and the color affiliations of agents and box types. The mutable
//! part of the world (agent positions and the box grid) lives in
//! [`crate::search::state`].

/// Cell coordinates and entity colors
pub mod cell;
/// Immutable level layout shared across all configurations
pub mod layout;

pub use cell::{Color, Position};
pub use layout::Level;
