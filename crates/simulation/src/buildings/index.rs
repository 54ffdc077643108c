//! Read-only views of building placement for renderers and tooling.

use std::collections::BTreeMap;

use serde::Serialize;

use super::registry::BuildingRegistry;
use super::types::{BuildingId, BuildingStatus};
use crate::grid::WorldGrid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingIndexEntry {
    pub template_id: String,
    pub origin: (usize, usize),
    pub status: BuildingStatus,
}

/// Building id → template and origin.
pub fn building_lookup(registry: &BuildingRegistry) -> BTreeMap<BuildingId, BuildingIndexEntry> {
    registry
        .iter()
        .map(|b| {
            (
                b.id,
                BuildingIndexEntry {
                    template_id: b.template_id.clone(),
                    origin: b.origin,
                    status: b.state.status,
                },
            )
        })
        .collect()
}

/// Flat, row-major map of which building covers each cell.
pub fn coverage_grid(grid: &WorldGrid) -> Vec<Option<BuildingId>> {
    grid.tiles.iter().map(|t| t.building_id).collect()
}
