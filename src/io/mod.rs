//! Input/output operations: server protocol, CLI, diagnostics and errors
//!
//! Everything that touches the outside world lives here; the search core
//! under [`crate::search`] never reads or writes a stream itself.

/// Command-line surface and client session orchestration
pub mod cli;
/// Planner constants and runtime configuration defaults
pub mod configuration;
/// Error types and constructor helpers
pub mod error;
/// Process memory sampling for the soft search ceiling
pub mod memory;
/// Periodic search status display
pub mod progress;
/// Level and plan line protocol with the controlling server
pub mod protocol;
