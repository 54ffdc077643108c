use std::collections::BTreeMap;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::coverage::{reachable_zones, ServiceCandidate};
use crate::adjacency::is_zone;
use crate::buildings::BuildingRegistry;
use crate::grid::{TileService, WorldGrid};
use crate::templates::{ServiceDescriptor, ServiceLoad, TemplateCatalog};
use crate::zones::ZoneLoads;

/// How much of a service tile `idx` needs.
pub fn tile_load(
    descriptor: &ServiceDescriptor,
    loads: &ZoneLoads,
    idx: usize,
    worker_share: f32,
) -> f32 {
    let raw = match descriptor.load {
        ServiceLoad::Residents => loads.population_at(idx),
        ServiceLoad::Workforce => loads.jobs_at(idx) + loads.population_at(idx) * worker_share,
    };
    (raw * descriptor.load_share).max(0.0)
}

/// Greedy capacity-limited allocation over `candidates` in order. Tiles
/// already partly served by an earlier building only draw the unmet rest.
/// Returns the capacity consumed, never more than `descriptor.capacity`.
pub fn allocate_service(
    grid: &mut WorldGrid,
    descriptor: &ServiceDescriptor,
    candidates: &[ServiceCandidate],
    loads: &ZoneLoads,
    worker_share: f32,
) -> f32 {
    let capacity = descriptor.capacity.max(0.0);
    let mut remaining = capacity;

    for candidate in candidates {
        if remaining <= 0.0 {
            break;
        }
        let load = tile_load(descriptor, loads, candidate.idx, worker_share);
        if load <= 0.0 {
            continue;
        }
        let record = grid.tiles[candidate.idx]
            .services
            .entry(descriptor.id.clone())
            .or_default();
        let unmet = load * (1.0 - record.score);
        if unmet <= 0.0 {
            continue;
        }
        let applied = unmet.min(remaining);
        remaining -= applied;
        record.score = ((record.score * load + applied) / load).clamp(0.0, 1.0);
        record.served = true;
    }

    capacity - remaining
}

/// City-wide figures for one service id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ServiceCoverage {
    pub capacity: f32,
    pub used: f32,
    /// Total load of every zone tile, reachable or not.
    pub demand: f32,
    pub served_tiles: u32,
    /// Share of `demand` that received capacity.
    pub coverage: f32,
}

/// Coverage per service id. For the built-in catalog these are the
/// education figures (`elementary`, `high_school`).
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ServiceStats {
    pub services: BTreeMap<String, ServiceCoverage>,
}

impl ServiceStats {
    pub fn get(&self, service_id: &str) -> Option<&ServiceCoverage> {
        self.services.get(service_id)
    }
}

/// Full allocation pass: clears every tile's service records, then lets each
/// active service building allocate in id order.
pub fn update_service_coverage(
    grid: &mut WorldGrid,
    registry: &mut BuildingRegistry,
    catalog: &TemplateCatalog,
    loads: &ZoneLoads,
    worker_share: f32,
) -> ServiceStats {
    for tile in &mut grid.tiles {
        tile.services.clear();
    }

    let mut stats = ServiceStats::default();
    let mut descriptors: BTreeMap<String, ServiceDescriptor> = BTreeMap::new();
    for template in catalog.iter() {
        if let Some(service) = &template.service {
            descriptors
                .entry(service.id.clone())
                .or_insert_with(|| service.clone());
        }
    }

    for building in registry.buildings.values_mut() {
        building.state.slots_used.clear();
        if !building.state.status.is_active() {
            continue;
        }
        let Some(template) = catalog.get(&building.template_id) else {
            continue;
        };
        let Some(descriptor) = &template.service else {
            continue;
        };
        let candidates = reachable_zones(
            grid,
            building.origin,
            (template.width, template.height),
            descriptor.coverage_radius,
        );
        let used = allocate_service(grid, descriptor, &candidates, loads, worker_share);
        building
            .state
            .slots_used
            .insert(descriptor.id.clone(), used);

        let entry = stats.services.entry(descriptor.id.clone()).or_default();
        entry.capacity += descriptor.capacity.max(0.0);
        entry.used += used;
    }

    for (service_id, descriptor) in &descriptors {
        let entry = stats.services.entry(service_id.clone()).or_default();
        let mut served_load = 0.0;
        for (idx, tile) in grid.tiles.iter().enumerate() {
            if !is_zone(tile) {
                continue;
            }
            let load = tile_load(descriptor, loads, idx, worker_share);
            entry.demand += load;
            if let Some(TileService { served: true, score }) = tile.services.get(service_id) {
                entry.served_tiles += 1;
                served_load += load * score;
            }
        }
        entry.coverage = if entry.demand > 0.0 {
            (served_load / entry.demand).clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    stats
}
