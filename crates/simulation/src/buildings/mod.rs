mod index;
mod lifecycle;
mod plugin;
mod registry;
pub mod types;

pub use index::{building_lookup, coverage_grid, BuildingIndexEntry};
pub use lifecycle::{evaluate_status, update_building_lifecycle, update_building_states};
pub use plugin::BuildingsPlugin;
pub use registry::{place_building, remove_building, validate_placement, BuildingRegistry};
pub use types::{
    BuildingId, BuildingInstance, BuildingState, BuildingStatus, PlacementError,
};
