pub const GRID_WIDTH: usize = 64;
pub const GRID_HEIGHT: usize = 64;

/// Fixed simulation step in seconds (10 Hz).
pub const TICK_SECONDS: f64 = 0.1;

pub const HAPPINESS_MAX: f32 = 100.0;
pub const HAPPINESS_START: f32 = 50.0;
/// Happiness gained by a tile each time its kind is edited.
pub const HAPPINESS_EDIT_NUDGE: f32 = 1.0;

pub const BUILDING_HEALTH_MAX: f32 = 100.0;

/// Consecutive non-active lifecycle passes after which a zone building is
/// marked abandoned.
pub const ABANDON_AFTER_TROUBLE_TICKS: u32 = 300;

pub const WATER_THRESHOLD: f32 = 0.30;
pub const TREE_THRESHOLD: f32 = 0.72;
pub const TERRAIN_BASE_FREQUENCY: f32 = 0.05;
pub const TREE_FREQUENCY: f32 = 0.15;

/// Demand values are expressed on this scale.
pub const DEMAND_MAX: f32 = 100.0;

pub const STARTING_FUNDS: f64 = 20_000.0;

pub const DEFAULT_SEED: u64 = 42;
