//! Planner constants and runtime configuration defaults

/// Maximum number of agents a level may contain (ids `0`-`9`)
pub const MAX_AGENTS: usize = 10;

/// Number of box type letters (`A`-`Z`)
pub const MAX_BOX_TYPES: usize = 26;

/// Maximum allowed grid dimension in cells, per the server level format
pub const MAX_GRID_DIMENSION: usize = 130;

/// Search loop iterations between status reports
pub const STATUS_INTERVAL: usize = 1000;

/// Fixed seed for reproducible successor shuffling; identical seeds replay
/// identical searches
pub const DEFAULT_SEED: u64 = 1;

/// Default soft memory ceiling in megabytes
pub const DEFAULT_MEMORY_CEILING_MB: f64 = 2048.0;

/// Default weight for the weighted A* strategy
pub const DEFAULT_WASTAR_WEIGHT: u32 = 5;

/// Client name sent to the server before the level is read
pub const CLIENT_NAME: &str = "GridPlan";
