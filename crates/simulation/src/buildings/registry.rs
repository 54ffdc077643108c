use std::collections::BTreeMap;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::lifecycle::evaluate_status;
use super::types::{BuildingId, BuildingInstance, BuildingState, PlacementError};
use crate::config::BUILDING_HEALTH_MAX;
use crate::grid::{TileKind, WorldGrid};
use crate::templates::BuildingTemplate;

/// Owner of every placed building. Tiles only hold the id.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct BuildingRegistry {
    pub buildings: BTreeMap<BuildingId, BuildingInstance>,
    pub next_id: u32,
}

impl BuildingRegistry {
    pub fn get(&self, id: BuildingId) -> Option<&BuildingInstance> {
        self.buildings.get(&id)
    }

    pub fn get_mut(&mut self, id: BuildingId) -> Option<&mut BuildingInstance> {
        self.buildings.get_mut(&id)
    }

    /// Instances in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &BuildingInstance> {
        self.buildings.values()
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// The building whose footprint covers `(x, y)`, if any.
    pub fn building_at(&self, grid: &WorldGrid, x: usize, y: usize) -> Option<&BuildingInstance> {
        grid.get(x, y)
            .and_then(|t| t.building_id)
            .and_then(|id| self.get(id))
    }

    /// Health is an external input. Returns `false` for unknown ids and for
    /// non-finite values, leaving the building untouched.
    pub fn set_health(&mut self, id: BuildingId, health: f32) -> bool {
        if !health.is_finite() {
            return false;
        }
        match self.buildings.get_mut(&id) {
            Some(b) => {
                b.state.health = health.clamp(0.0, BUILDING_HEALTH_MAX);
                true
            }
            None => false,
        }
    }

    pub fn count_for_template(&self, template_id: &str) -> usize {
        self.iter().filter(|b| b.template_id == template_id).count()
    }
}

/// Checks that `template` fits at `origin` without touching anything.
pub fn validate_placement(
    grid: &WorldGrid,
    template: &BuildingTemplate,
    origin: (usize, usize),
) -> Result<(), PlacementError> {
    let (ox, oy) = origin;
    let fits = template.width > 0
        && template.height > 0
        && ox.checked_add(template.width).is_some_and(|e| e <= grid.width)
        && oy.checked_add(template.height).is_some_and(|e| e <= grid.height);
    if !fits {
        return Err(PlacementError::OutOfBounds {
            origin,
            width: template.width,
            height: template.height,
        });
    }
    for (x, y) in template.footprint(origin) {
        let Some(tile) = grid.get(x, y) else {
            continue;
        };
        if tile.building_id.is_some() || tile.has_power_plant() {
            return Err(PlacementError::Overlap {
                x,
                y,
                occupant: tile.building_id.or(tile.power_plant_id),
            });
        }
    }
    Ok(())
}

/// Places a building. On failure the grid and the id counter are untouched.
///
/// The initial status is evaluated against the freshly stamped tiles, so a
/// source that needs no utilities starts `Active` while anything that needs
/// power waits for the next network pass.
pub fn place_building(
    grid: &mut WorldGrid,
    registry: &mut BuildingRegistry,
    template: &BuildingTemplate,
    origin: (usize, usize),
) -> Result<BuildingId, PlacementError> {
    validate_placement(grid, template, origin)?;

    let id = BuildingId(registry.next_id);
    registry.next_id += 1;

    let plant_type = (template.tile_kind == Some(TileKind::PowerPlant)
        || template.is_power_source())
    .then_some(template.id.as_str());
    for (x, y) in template.footprint(origin) {
        grid.stamp_building_tile(x, y, template.tile_kind, id, plant_type);
    }

    let state = BuildingState {
        status: evaluate_status(grid, template, origin, BUILDING_HEALTH_MAX),
        ..Default::default()
    };
    registry.buildings.insert(
        id,
        BuildingInstance {
            id,
            template_id: template.id.clone(),
            origin,
            state,
        },
    );
    debug!(
        "Placed {} {} at ({}, {})",
        template.id, id, origin.0, origin.1
    );
    Ok(id)
}

/// Drops the instance and resets every tile referencing it to bare land.
pub fn remove_building(
    grid: &mut WorldGrid,
    registry: &mut BuildingRegistry,
    id: BuildingId,
) -> Option<BuildingInstance> {
    let removed = registry.buildings.remove(&id)?;
    let referencing: Vec<usize> = grid
        .tiles
        .iter()
        .enumerate()
        .filter(|(_, t)| t.building_id == Some(id) || t.power_plant_id == Some(id))
        .map(|(idx, _)| idx)
        .collect();
    for idx in referencing {
        let (x, y) = grid.coords(idx);
        grid.set_tile(x, y, TileKind::Land);
    }
    debug!("Removed {} {}", removed.template_id, id);
    Some(removed)
}
